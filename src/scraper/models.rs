use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use tracing::warn;

// listing
//  ├── id
//  ├── price
//  │    └── amount
//  ├── bedrooms
//  ├── propertySubType
//  ├── displayAddress
//  ├── location
//  │    ├── latitude
//  │    └── longitude
//  ├── customer
//  │    └── branchDisplayName
//  ├── addedOrReduced
//  ├── firstVisibleDate
//  ├── displaySize
//  └── productLabel
//       └── productLabelText

/// One listing object as embedded in a search results page. Every field may be
/// missing or `null`, and a field holding an unexpected JSON type is read as
/// missing rather than failing the listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<ListingId>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<Price>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub bedrooms: Option<u32>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub property_sub_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub display_address: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<Location>,
    #[serde(default, deserialize_with = "lenient")]
    pub customer: Option<Customer>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub added_or_reduced: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub first_visible_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub display_size: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub product_label: Option<ProductLabel>,
}

/// Listing ids arrive as numbers, but some pages quote them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListingId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingId::Number(n) => write!(f, "{n}"),
            ListingId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Price {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Option<serde_json::Number>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Location {
    #[serde(default, deserialize_with = "lenient_float")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_float")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, deserialize_with = "lenient_text")]
    pub branch_display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLabel {
    #[serde(default, deserialize_with = "lenient_text")]
    pub product_label_text: Option<String>,
}

// Field readers: a value of the wrong shape becomes `None`.

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => whole_number(&n).and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_amount<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<serde_json::Number>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => Some(n),
        Value::String(s) => {
            let digits: String = s.chars().filter(|c| *c != ',').collect();
            digits.trim().parse().ok()
        }
        _ => None,
    })
}

/// Non-negative integers, including floats with no fractional part.
fn whole_number(n: &serde_json::Number) -> Option<u64> {
    n.as_u64().or_else(|| {
        n.as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

/// The `resultCount` field of a page payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultCount {
    Known(u64),
    /// Present but not a number, kept verbatim for the warning.
    Unparseable(String),
    Missing,
}

impl ResultCount {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => ResultCount::Missing,
            Some(Value::Number(n)) => match whole_number(n) {
                Some(count) => ResultCount::Known(count),
                None => ResultCount::Unparseable(n.to_string()),
            },
            Some(Value::String(s)) => {
                // "1,234" style counts
                let digits: String = s.chars().filter(|c| *c != ',').collect();
                match digits.trim().parse::<u64>() {
                    Ok(count) => ResultCount::Known(count),
                    Err(_) => ResultCount::Unparseable(s.clone()),
                }
            }
            Some(other) => ResultCount::Unparseable(other.to_string()),
        }
    }
}

/// The parts of a page's embedded payload that pagination cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePayload {
    pub listings: Vec<RawListing>,
    /// Length of the `properties` array before decoding.
    pub raw_count: usize,
    pub result_count: ResultCount,
}

impl PagePayload {
    /// Reads `properties` and `resultCount` out of a parsed payload.
    ///
    /// A missing or non-array `properties` yields no listings. Elements that
    /// are not listing objects are skipped with a warning but still count
    /// towards `raw_count`.
    pub fn from_value(data: &Value) -> Self {
        let items = data
            .get("properties")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let listings = items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| match RawListing::deserialize(item) {
                Ok(listing) => Some(listing),
                Err(e) => {
                    warn!(index = idx, error = %e, "Skipping listing that could not be decoded");
                    None
                }
            })
            .collect();

        PagePayload {
            listings,
            raw_count: items.len(),
            result_count: ResultCount::from_value(data.get("resultCount")),
        }
    }
}

/// Outcome of one fetch and extract cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum PageResult {
    /// No script block carried a usable payload.
    NoData,
    Page(PagePayload),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn result_count_accepts_numbers_and_grouped_strings() {
        assert_eq!(ResultCount::from_value(Some(&json!(57))), ResultCount::Known(57));
        assert_eq!(
            ResultCount::from_value(Some(&json!("1,234"))),
            ResultCount::Known(1234)
        );
        assert_eq!(ResultCount::from_value(None), ResultCount::Missing);
        assert_eq!(ResultCount::from_value(Some(&Value::Null)), ResultCount::Missing);
        assert_eq!(ResultCount::from_value(Some(&json!(1.0))), ResultCount::Known(1));
        assert_eq!(
            ResultCount::from_value(Some(&json!(2.5))),
            ResultCount::Unparseable("2.5".to_string())
        );
        assert_eq!(
            ResultCount::from_value(Some(&json!(-3))),
            ResultCount::Unparseable("-3".to_string())
        );
        assert_eq!(
            ResultCount::from_value(Some(&json!("lots"))),
            ResultCount::Unparseable("lots".to_string())
        );
    }

    #[test]
    fn payload_skips_listings_that_are_not_objects() {
        let data = json!({
            "properties": [{"id": 1}, "garbage", {"id": "2", "bedrooms": null}],
            "resultCount": "2"
        });

        let payload = PagePayload::from_value(&data);

        assert_eq!(payload.listings.len(), 2);
        assert_eq!(payload.raw_count, 3);
        assert_eq!(payload.listings[0].id, Some(ListingId::Number(1.into())));
        assert_eq!(payload.listings[1].id, Some(ListingId::Text("2".into())));
        assert_eq!(payload.listings[1].bedrooms, None);
        assert_eq!(payload.result_count, ResultCount::Known(2));
    }

    #[test]
    fn payload_without_properties_is_empty() {
        let payload = PagePayload::from_value(&json!({"properties": null}));
        assert!(payload.listings.is_empty());
        assert_eq!(payload.result_count, ResultCount::Missing);
    }

    #[test]
    fn mistyped_fields_become_missing_instead_of_dropping_the_listing() {
        let data = json!({
            "properties": [
                {"id": 1, "bedrooms": "2", "displaySize": 624},
                {"id": 2.0, "location": {"latitude": "51.5", "longitude": -0.12}},
                {"id": 3, "price": {"amount": "250,000"}, "customer": "Foxtons", "bedrooms": [2]}
            ]
        });

        let payload = PagePayload::from_value(&data);

        assert_eq!(payload.listings.len(), 3);
        let first = &payload.listings[0];
        assert_eq!(first.bedrooms, Some(2));
        assert_eq!(first.display_size.as_deref(), Some("624"));

        let second = &payload.listings[1];
        assert_eq!(second.id.as_ref().map(|id| id.to_string()).as_deref(), Some("2.0"));
        let location = second.location.as_ref().unwrap();
        assert_eq!(location.latitude, Some(51.5));
        assert_eq!(location.longitude, Some(-0.12));

        let third = &payload.listings[2];
        assert_eq!(third.price.as_ref().and_then(|p| p.amount.clone()), Some(250_000.into()));
        assert_eq!(third.customer, None);
        assert_eq!(third.bedrooms, None);
    }
}
