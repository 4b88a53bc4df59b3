use crate::scraper::ScraperError;
use reqwest::blocking::Client;
use std::time::Duration;
use url::Url;

/// Anything that can hand back the HTML body for a results page URL.
pub trait PageSource {
    fn fetch_page(&self, url: &Url) -> Result<String, ScraperError>;
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn fetch_page(&self, url: &Url) -> Result<String, ScraperError> {
        (**self).fetch_page(url)
    }
}

/// Blocking HTTP fetcher with a browser-like user agent.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

impl PageSource for HttpFetcher {
    fn fetch_page(&self, url: &Url) -> Result<String, ScraperError> {
        let resp = self
            .client
            .get(url.as_str())
            .send()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScraperError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        resp.text()
            .map_err(|e| ScraperError::Network(e.to_string()))
    }
}
