use crate::config::ScrapeConfig;
use crate::domain::{dedup_by_url, AgentGroup, AgentGrouper, Deduplicated, PropertyRecord};
use crate::errors::ExportError;
use crate::responses::error_to_response;
use crate::router::handle;
use crate::scraper::{EmbeddedDataExtractor, HttpFetcher, ListingScraper, PageSource};
use crate::spreadsheets::{
    export_properties_xlsx, export_summary_xlsx, read_table, write_properties_csv,
    write_summary_csv, write_table, Table,
};
use anyhow::Context;
use astra::Server;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::info;

/// Column the grouping pass reads branch names from.
pub const BRANCH_COLUMN: &str = "formattedBranchName";
/// Column the grouping pass appends.
pub const GROUPED_AGENT_COLUMN: &str = "groupedAgent";

#[derive(Debug)]
pub struct ScrapeSummary {
    pub pages_fetched: usize,
    pub unique: usize,
    pub removed: usize,
}

/// Scrapes every page of `config.query` over HTTP and writes the table.
pub fn run_scrape(
    config: &ScrapeConfig,
    output: &Path,
    xlsx: Option<&Path>,
) -> anyhow::Result<ScrapeSummary> {
    let fetcher = HttpFetcher::new(&config.user_agent, config.timeout)?;
    scrape_to_files(fetcher, config, output, xlsx)
}

/// The scrape pass against any page source.
pub fn scrape_to_files<S: PageSource>(
    source: S,
    config: &ScrapeConfig,
    output: &Path,
    xlsx: Option<&Path>,
) -> anyhow::Result<ScrapeSummary> {
    let scraper = ListingScraper::new(
        source,
        EmbeddedDataExtractor::new(&config.marker_global),
        config.pagination.clone(),
    );

    let outcome = scraper
        .fetch_all_properties_paginated(&config.query)
        .context("scrape aborted")?;
    info!(
        pages = outcome.pages_fetched,
        stop = ?outcome.stop_reason,
        "Pagination finished"
    );

    let Deduplicated { records, removed } = dedup_by_url(outcome.records);
    info!(removed, "Removed duplicate properties");

    write_output(&records, output, xlsx)?;
    info!(
        unique = records.len(),
        output = %output.display(),
        "Scraping complete"
    );

    Ok(ScrapeSummary {
        pages_fetched: outcome.pages_fetched,
        unique: records.len(),
        removed,
    })
}

fn write_output(
    records: &[PropertyRecord],
    output: &Path,
    xlsx: Option<&Path>,
) -> anyhow::Result<()> {
    write_properties_csv(records, output)
        .with_context(|| format!("writing {}", output.display()))?;
    if let Some(path) = xlsx {
        export_properties_xlsx(records, path)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

#[derive(Debug)]
pub struct GroupingReport {
    pub rows: usize,
    pub groups: Vec<AgentGroup>,
    pub summary: Vec<(String, usize)>,
}

/// Reads a property table, appends the group column and writes both the
/// grouped table and the count summary.
pub fn run_group_agents(
    input: &Path,
    output: &Path,
    summary_path: &Path,
    xlsx: Option<&Path>,
) -> Result<GroupingReport, ExportError> {
    let table = read_table(input)?;
    let branch_col = table.column(BRANCH_COLUMN)?;

    let mut grouper = AgentGrouper::new();
    let mut headers = table.headers.clone();
    headers.push_field(GROUPED_AGENT_COLUMN);

    let rows = table
        .rows
        .iter()
        .map(|row| {
            let key = grouper.assign(row.get(branch_col).unwrap_or_default());
            let mut out = row.clone();
            out.push_field(&key);
            out
        })
        .collect::<Vec<_>>();
    let row_count = rows.len();

    write_table(&Table { headers, rows }, output)?;
    info!(output = %output.display(), "Grouped agents saved");

    let summary = grouper.summary();
    write_summary_csv(&summary, summary_path)?;
    if let Some(path) = xlsx {
        export_summary_xlsx(&summary, path)?;
    }
    info!(summary = %summary_path.display(), "Agent summary saved");

    Ok(GroupingReport {
        rows: row_count,
        groups: grouper.groups().to_vec(),
        summary,
    })
}

/// Serves `root` on all interfaces until the process is stopped.
pub fn run_server(root: PathBuf, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Serving {} at http://localhost:{port}", root.display());
    info!("To view the maps, open http://localhost:{port}/property_map.html");
    info!("or http://localhost:{port}/estate_agents_map.html");

    Server::bind(addr)
        .serve(move |req: astra::Request, _info| {
            let head_only = req.method().as_str() == "HEAD";
            match handle(req, &root) {
                Ok(resp) => resp,
                Err(err) => error_to_response(err, head_only),
            }
        })
        .with_context(|| format!("server on port {port} failed"))
}
