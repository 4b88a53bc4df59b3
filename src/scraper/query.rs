use crate::scraper::ScraperError;
use url::Url;

/// Query parameter carrying the result offset.
pub const OFFSET_PARAM: &str = "index";
/// Query parameter carrying the requested page size.
pub const PAGE_SIZE_PARAM: &str = "numberOfPropertiesPerPage";

/// A search endpoint plus its filter parameters, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    endpoint: Url,
    params: Vec<(String, String)>,
}

impl SearchQuery {
    pub fn new(endpoint: &str) -> Result<Self, ScraperError> {
        let mut endpoint = Url::parse(endpoint)?;
        endpoint.set_query(None);
        endpoint.set_fragment(None);
        Ok(Self {
            endpoint,
            params: Vec::new(),
        })
    }

    /// Splits a full search URL into endpoint and parameters.
    pub fn from_url(url: &str) -> Result<Self, ScraperError> {
        let mut endpoint = Url::parse(url)?;
        let params = endpoint
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        endpoint.set_query(None);
        endpoint.set_fragment(None);
        Ok(Self { endpoint, params })
    }

    /// Appends a parameter, keeping any existing values for the same key.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Replaces every value of `key` with a single one at the first
    /// occurrence, or appends it when absent.
    pub fn set(mut self, key: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        match self.params.iter().position(|(k, _)| k == key) {
            Some(first) => {
                self.params[first].1 = value;
                let mut idx = 0;
                self.params.retain(|(k, _)| {
                    let keep = k != key || idx == first;
                    idx += 1;
                    keep
                });
            }
            None => self.params.push((key.to_string(), value)),
        }
        self
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn url(&self) -> Url {
        let mut url = self.endpoint.clone();
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.params);
        }
        url
    }

    /// The URL for one results page: `index` set to `offset` and the page
    /// size parameter set to `page_size`, everything else untouched.
    pub fn page_url(&self, offset: usize, page_size: usize) -> Url {
        self.clone()
            .set(OFFSET_PARAM, offset)
            .set(PAGE_SIZE_PARAM, page_size)
            .url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> SearchQuery {
        SearchQuery::new("https://www.rightmove.co.uk/property-for-sale/find.html")
            .unwrap()
            .param("minBedrooms", 1)
            .param(PAGE_SIZE_PARAM, 24)
            .param("sortType", 6)
    }

    #[test]
    fn page_url_overrides_window_and_keeps_order() {
        let url = query().page_url(48, 499);
        assert_eq!(
            url.query(),
            Some("minBedrooms=1&numberOfPropertiesPerPage=499&sortType=6&index=48")
        );
    }

    #[test]
    fn page_url_does_not_mutate_the_base_query() {
        let base = query();
        let _ = base.page_url(24, 499);
        assert_eq!(base.get(OFFSET_PARAM), None);
        assert_eq!(base.get(PAGE_SIZE_PARAM), Some("24"));
    }

    #[test]
    fn from_url_round_trips_encoded_identifiers() {
        let base = SearchQuery::new("https://example.com/find.html")
            .unwrap()
            .param("locationIdentifier", r#"USERDEFINEDAREA^{"id":8791529}"#);

        let parsed = SearchQuery::from_url(base.url().as_str()).unwrap();

        assert_eq!(
            parsed.get("locationIdentifier"),
            Some(r#"USERDEFINEDAREA^{"id":8791529}"#)
        );
        assert_eq!(parsed, base);
    }

    #[test]
    fn set_collapses_repeated_keys() {
        let q = SearchQuery::new("https://example.com/")
            .unwrap()
            .param("a", 1)
            .param("b", 2)
            .param("a", 3)
            .set("a", 9);
        assert_eq!(q.url().query(), Some("a=9&b=2"));
    }
}
