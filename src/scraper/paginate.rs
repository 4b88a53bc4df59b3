use crate::domain::PropertyRecord;
use crate::scraper::{
    EmbeddedDataExtractor, PagePayload, PageResult, PageSource, ResultCount, ScraperError,
    SearchQuery,
};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationOptions {
    /// Offset advance per page.
    pub offset_step: usize,
    /// Value sent as the page size parameter.
    pub results_per_page: usize,
    /// Upper bound on fetched pages.
    pub max_pages: usize,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            offset_step: 24,
            results_per_page: 499,
            max_pages: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// A page had no parseable embedded payload.
    NoData,
    /// A page's listing array was empty.
    EmptyPage,
    /// The accumulated count reached the advertised total.
    ReachedResultCount(u64),
    /// `max_pages` pages were fetched without another stop condition.
    PageLimit(usize),
}

#[derive(Debug)]
pub struct ScrapeOutcome {
    pub records: Vec<PropertyRecord>,
    pub pages_fetched: usize,
    pub stop_reason: StopReason,
}

pub struct ListingScraper<S> {
    source: S,
    extractor: EmbeddedDataExtractor,
    options: PaginationOptions,
}

impl<S: PageSource> ListingScraper<S> {
    pub fn new(source: S, extractor: EmbeddedDataExtractor, options: PaginationOptions) -> Self {
        Self {
            source,
            extractor,
            options,
        }
    }

    /// Fetches and extracts page `page` (zero based) of `query`.
    pub fn fetch_page(&self, query: &SearchQuery, page: usize) -> Result<PageResult, ScraperError> {
        let url = query.page_url(page * self.options.offset_step, self.options.results_per_page);
        info!(page = page + 1, url = %url, "Scraping page");

        let html = self.source.fetch_page(&url)?;

        Ok(match self.extractor.extract(&html)? {
            Some(data) => PageResult::Page(PagePayload::from_value(&data)),
            None => PageResult::NoData,
        })
    }

    /// Walks result pages until one of the stop conditions holds. Fetch
    /// errors abort the whole run.
    pub fn fetch_all_properties_paginated(
        &self,
        query: &SearchQuery,
    ) -> Result<ScrapeOutcome, ScraperError> {
        let mut records = Vec::new();
        let mut page = 0;

        let stop_reason = loop {
            if page >= self.options.max_pages {
                warn!(max_pages = self.options.max_pages, "Page limit reached, stopping");
                break StopReason::PageLimit(page);
            }

            let payload = match self.fetch_page(query, page)? {
                PageResult::Page(payload) => payload,
                PageResult::NoData => {
                    info!(page = page + 1, "Couldn't find any embedded property data, stopping");
                    break StopReason::NoData;
                }
            };

            if payload.raw_count == 0 {
                info!(page = page + 1, "No properties found on this page, stopping");
                break StopReason::EmptyPage;
            }

            let found = payload.listings.len();
            if found < payload.raw_count {
                warn!(
                    page = page + 1,
                    skipped = payload.raw_count - found,
                    "Some listings on this page could not be decoded"
                );
            }
            records.extend(payload.listings.iter().map(PropertyRecord::from_raw));
            info!(page = page + 1, count = found, total = records.len(), "Found properties on this page");
            page += 1;

            match payload.result_count {
                ResultCount::Known(total) if records.len() as u64 >= total => {
                    info!(total, "Reached the end of results");
                    break StopReason::ReachedResultCount(total);
                }
                ResultCount::Known(_) => {}
                ResultCount::Unparseable(raw) => {
                    warn!(raw = %raw, "Couldn't convert resultCount to an integer");
                }
                ResultCount::Missing => {
                    warn!("Couldn't find resultCount in page data");
                }
            }
        };

        let pages_fetched = match stop_reason {
            StopReason::NoData | StopReason::EmptyPage => page + 1,
            StopReason::ReachedResultCount(_) | StopReason::PageLimit(_) => page,
        };

        Ok(ScrapeOutcome {
            records,
            pages_fetched,
            stop_reason,
        })
    }
}
