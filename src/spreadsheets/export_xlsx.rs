use crate::domain::{PropertyRecord, PROPERTY_COLUMNS};
use crate::errors::ExportError;
use crate::spreadsheets::SUMMARY_HEADERS;
use rust_xlsxwriter::Workbook;
use std::path::Path;

pub fn export_properties_xlsx(records: &[PropertyRecord], path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // Headers
    for (col, header) in PROPERTY_COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    // Rows
    for (i, record) in records.iter().enumerate() {
        let r = (i + 1) as u32;

        match record.price.as_ref().and_then(|p| p.as_f64()) {
            Some(price) => worksheet.write_number(r, 0, price)?,
            None => worksheet.write_string(r, 0, "")?,
        };

        match record.bedrooms {
            Some(beds) => worksheet.write_number(r, 1, beds as f64)?,
            None => worksheet.write_string(r, 1, "")?,
        };

        // Text columns
        for (col, cell) in record.to_row().iter().enumerate().skip(2) {
            worksheet.write_string(r, col as u16, cell)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

pub fn export_summary_xlsx(summary: &[(String, usize)], path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in SUMMARY_HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (i, (agent, count)) in summary.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_string(r, 0, agent)?;
        worksheet.write_number(r, 1, *count as f64)?;
    }

    workbook.save(path)?;
    Ok(())
}
