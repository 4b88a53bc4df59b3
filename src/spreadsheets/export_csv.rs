use crate::domain::{PropertyRecord, PROPERTY_COLUMNS};
use crate::errors::ExportError;
use crate::spreadsheets::SUMMARY_HEADERS;
use csv::{ReaderBuilder, StringRecord, Writer, WriterBuilder};
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// A CSV file held as raw string rows, so columns pass through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

impl Table {
    pub fn column(&self, name: &str) -> Result<usize, ExportError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ExportError::MissingColumn(name.to_string()))
    }
}

fn create(path: &Path) -> Result<Writer<File>, ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    // headers are written explicitly so an empty table still gets them
    Ok(WriterBuilder::new().has_headers(false).from_writer(file))
}

fn finish(mut wtr: Writer<File>, path: &Path) -> Result<(), ExportError> {
    wtr.flush().map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn write_properties_csv(records: &[PropertyRecord], path: &Path) -> Result<(), ExportError> {
    debug!(rows = records.len(), path = %path.display(), "Writing property table");

    let mut wtr = create(path)?;
    wtr.write_record(PROPERTY_COLUMNS)?;
    for record in records {
        wtr.write_record(record.to_row())?;
    }
    finish(wtr, path)
}

pub fn read_table(path: &Path) -> Result<Table, ExportError> {
    let file = File::open(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = rdr.headers()?.clone();
    let rows = rdr.records().collect::<Result<Vec<_>, _>>()?;
    debug!(rows = rows.len(), path = %path.display(), "Read table");

    Ok(Table { headers, rows })
}

pub fn write_table(table: &Table, path: &Path) -> Result<(), ExportError> {
    let mut wtr = create(path)?;
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    finish(wtr, path)
}

pub fn write_summary_csv(summary: &[(String, usize)], path: &Path) -> Result<(), ExportError> {
    let mut wtr = create(path)?;
    wtr.write_record(SUMMARY_HEADERS)?;
    for (agent, count) in summary {
        wtr.write_record([agent.clone(), count.to_string()])?;
    }
    finish(wtr, path)
}
