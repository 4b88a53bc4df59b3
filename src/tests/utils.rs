// src/tests/utils.rs
use crate::scraper::{PageSource, ScraperError};
use serde_json::{json, Value};
use std::cell::RefCell;
use url::Url;

/// Wraps a payload the way the search page embeds it.
pub fn results_page(payload: &Value) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <script src="/static/app.js"></script>
  <script>window.dataLayer = [];</script>
</head>
<body>
  <div id="l-searchResults"></div>
  <script>
    window.jsonModel = {payload};
    window.adData = {{"slots": []}};
  </script>
</body>
</html>"#
    )
}

/// A listing object with an id, a branch and coordinates.
pub fn listing(id: u64, branch: &str) -> Value {
    json!({
        "id": id,
        "price": {"amount": 250000 + id, "currencyCode": "GBP"},
        "bedrooms": 2,
        "propertySubType": "Flat",
        "displayAddress": format!("{id} High Street, London"),
        "location": {"latitude": 51.5, "longitude": -0.12},
        "customer": {"branchDisplayName": branch},
        "addedOrReduced": "Added today",
        "firstVisibleDate": "2024-05-01T10:00:00Z",
        "displaySize": "",
        "productLabel": {"productLabelText": null}
    })
}

pub fn page_with(ids: &[u64], result_count: Option<Value>) -> String {
    let properties: Vec<Value> = ids.iter().map(|id| listing(*id, "Foxtons, Battersea")).collect();
    let mut payload = json!({ "properties": properties });
    if let Some(count) = result_count {
        payload["resultCount"] = count;
    }
    results_page(&payload)
}

/// Serves canned pages in order and records every URL requested.
pub struct ScriptedSource {
    pages: Vec<String>,
    pub requested: RefCell<Vec<Url>>,
}

impl ScriptedSource {
    pub fn new(pages: Vec<String>) -> Self {
        Self {
            pages,
            requested: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> usize {
        self.requested.borrow().len()
    }
}

impl PageSource for ScriptedSource {
    fn fetch_page(&self, url: &Url) -> Result<String, ScraperError> {
        let n = self.requests();
        self.requested.borrow_mut().push(url.clone());
        self.pages
            .get(n)
            .cloned()
            .ok_or_else(|| ScraperError::Network(format!("no scripted page for {url}")))
    }
}
