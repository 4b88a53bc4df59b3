mod extract;
mod fetcher;
mod models;
mod paginate;
mod query;
mod scraper_error;

pub use extract::{EmbeddedDataExtractor, DEFAULT_MARKER_GLOBAL};
pub use fetcher::{HttpFetcher, PageSource};
pub use models::{PagePayload, PageResult, RawListing, ResultCount};
pub use paginate::{ListingScraper, PaginationOptions};
pub use query::SearchQuery;
pub use scraper_error::ScraperError;

#[cfg(test)]
pub use models::{Customer, ListingId, Location, Price, ProductLabel};
#[cfg(test)]
pub use paginate::StopReason;
#[cfg(test)]
pub use query::{OFFSET_PARAM, PAGE_SIZE_PARAM};
