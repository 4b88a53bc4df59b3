use crate::config::{default_search_query, ScrapeConfig, DEFAULT_TIMEOUT_SECS};
use crate::scraper::{ScraperError, SearchQuery};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "rightmove-scraper")]
#[command(about = "Scrape property search results, group listing agents and serve the generated maps")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging (-v for DEBUG, -vv for TRACE). RUST_LOG overrides this
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every results page and write the deduplicated property table
    Scrape(ScrapeArgs),
    /// Group properties by estate agent and write a count summary
    GroupAgents(GroupArgs),
    /// Serve a directory over HTTP for viewing generated maps
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct ScrapeArgs {
    /// Full search URL; replaces the built-in query and the filter flags below
    #[arg(long, env = "RIGHTMOVE_SEARCH_URL")]
    pub url: Option<String>,

    #[arg(long)]
    pub location_identifier: Option<String>,

    #[arg(long)]
    pub min_bedrooms: Option<u32>,

    #[arg(long)]
    pub min_price: Option<u64>,

    #[arg(long)]
    pub max_price: Option<u64>,

    /// e.g. "flat" or "detached,semi-detached"
    #[arg(long)]
    pub property_types: Option<String>,

    /// Stop after this many pages even if the site keeps returning results
    #[arg(long, default_value = "200", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_pages: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[arg(short, long, default_value = "rightmove_properties_streamlined.csv")]
    pub output: PathBuf,

    /// Also write the table as an .xlsx workbook
    #[arg(long)]
    pub xlsx: Option<PathBuf>,
}

impl ScrapeArgs {
    pub fn to_config(&self) -> Result<ScrapeConfig, ScraperError> {
        let query = match &self.url {
            Some(url) => SearchQuery::from_url(url)?,
            None => self.apply_filters(default_search_query()?),
        };

        let mut config = ScrapeConfig::new(query);
        config.pagination.max_pages = self.max_pages as usize;
        config.timeout = Duration::from_secs(self.timeout_secs);
        Ok(config)
    }

    fn apply_filters(&self, mut query: SearchQuery) -> SearchQuery {
        if let Some(v) = &self.location_identifier {
            query = query.set("locationIdentifier", v);
        }
        if let Some(v) = self.min_bedrooms {
            query = query.set("minBedrooms", v);
        }
        if let Some(v) = self.min_price {
            query = query.set("minPrice", v);
        }
        if let Some(v) = self.max_price {
            query = query.set("maxPrice", v);
        }
        if let Some(v) = &self.property_types {
            query = query.set("propertyTypes", v);
        }
        query
    }
}

#[derive(Args, Debug)]
pub struct GroupArgs {
    #[arg(short, long, default_value = "rightmove_properties_streamlined.csv")]
    pub input: PathBuf,

    #[arg(short, long, default_value = "rightmove_properties_grouped_agents.csv")]
    pub output: PathBuf,

    #[arg(short, long, default_value = "estate_agents_summary.csv")]
    pub summary: PathBuf,

    /// Also write the summary as an .xlsx workbook
    #[arg(long)]
    pub xlsx: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,

    /// Directory to serve
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}
