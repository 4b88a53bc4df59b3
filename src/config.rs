use crate::scraper::{PaginationOptions, ScraperError, SearchQuery, DEFAULT_MARKER_GLOBAL};
use std::time::Duration;

pub const SEARCH_ENDPOINT: &str = "https://www.rightmove.co.uk/property-for-sale/find.html";

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything one scrape run needs. Built once, never changed mid-run.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub query: SearchQuery,
    pub pagination: PaginationOptions,
    pub timeout: Duration,
    pub user_agent: String,
    pub marker_global: String,
}

impl ScrapeConfig {
    pub fn new(query: SearchQuery) -> Self {
        Self {
            query,
            pagination: PaginationOptions::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            marker_global: DEFAULT_MARKER_GLOBAL.to_string(),
        }
    }
}

/// Flats between £240k and £300k with at least one bedroom in a saved
/// drawn search area, newest first.
pub fn default_search_query() -> Result<SearchQuery, ScraperError> {
    Ok(SearchQuery::new(SEARCH_ENDPOINT)?
        .param("locationIdentifier", r#"USERDEFINEDAREA^{"id":8791529}"#)
        .param("minBedrooms", 1)
        .param("maxPrice", 300000)
        .param("minPrice", 240000)
        .param("propertyTypes", "flat")
        .param("includeSSTC", "false")
        .param("mustHave", "")
        .param("dontShow", "")
        .param("furnishTypes", "")
        .param("keywords", "")
        .param("sortType", 6)
        .param("numberOfPropertiesPerPage", 499)
        .param("viewType", "LIST"))
}
