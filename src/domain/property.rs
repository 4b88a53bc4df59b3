// src/domain/property.rs

use crate::scraper::RawListing;
use serde::Serialize;

pub const LISTING_BASE_URL: &str = "https://www.rightmove.co.uk/properties/";
const MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Column order of the property table.
pub const PROPERTY_COLUMNS: [&str; 11] = [
    "price",
    "bedrooms",
    "propertySubType",
    "address",
    "location",
    "url",
    "formattedBranchName",
    "addedOrReduced",
    "firstVisibleDate",
    "displaySize",
    "productLabel",
];

/// A listing flattened into one row of the property table.
/// `url` is the dedup key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub price: Option<serde_json::Number>,
    pub bedrooms: Option<u32>,
    pub property_sub_type: Option<String>,
    pub address: Option<String>,
    /// Map search link, empty when either coordinate is missing.
    pub location: String,
    pub url: String,
    pub formatted_branch_name: Option<String>,
    pub added_or_reduced: Option<String>,
    pub first_visible_date: Option<String>,
    pub display_size: Option<String>,
    pub product_label: Option<String>,
}

impl PropertyRecord {
    /// Flattens a raw listing. Missing nested objects only produce missing
    /// fields. A listing without an id still gets a (bare) detail URL.
    pub fn from_raw(raw: &RawListing) -> Self {
        let location = raw.location.as_ref();
        let id = raw.id.as_ref().map(|id| id.to_string()).unwrap_or_default();

        PropertyRecord {
            price: raw.price.as_ref().and_then(|p| p.amount.clone()),
            bedrooms: raw.bedrooms,
            property_sub_type: raw.property_sub_type.clone(),
            address: raw.display_address.clone(),
            location: map_link(
                location.and_then(|l| l.latitude),
                location.and_then(|l| l.longitude),
            ),
            url: format!("{LISTING_BASE_URL}{id}"),
            formatted_branch_name: raw
                .customer
                .as_ref()
                .and_then(|c| c.branch_display_name.clone()),
            added_or_reduced: raw.added_or_reduced.clone(),
            first_visible_date: raw.first_visible_date.clone(),
            display_size: raw.display_size.clone(),
            product_label: raw
                .product_label
                .as_ref()
                .and_then(|l| l.product_label_text.clone()),
        }
    }

    /// The record as table cells, in `PROPERTY_COLUMNS` order.
    pub fn to_row(&self) -> [String; 11] {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        [
            self.price.as_ref().map(|p| p.to_string()).unwrap_or_default(),
            self.bedrooms.map(|b| b.to_string()).unwrap_or_default(),
            text(&self.property_sub_type),
            text(&self.address),
            self.location.clone(),
            self.url.clone(),
            text(&self.formatted_branch_name),
            text(&self.added_or_reduced),
            text(&self.first_visible_date),
            text(&self.display_size),
            text(&self.product_label),
        ]
    }
}

/// Google Maps search link for a coordinate pair, or an empty string unless
/// both are present.
pub fn map_link(latitude: Option<f64>, longitude: Option<f64>) -> String {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => format!("{MAP_SEARCH_URL}{lat},{lon}"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::{Customer, ListingId, Location, Price, ProductLabel};

    fn full_listing() -> RawListing {
        RawListing {
            id: Some(ListingId::Number(148_275_923.into())),
            price: Some(Price {
                amount: Some(275_000.into()),
            }),
            bedrooms: Some(2),
            property_sub_type: Some("Flat".into()),
            display_address: Some("Lavender Hill, London SW11".into()),
            location: Some(Location {
                latitude: Some(51.5),
                longitude: Some(-0.12),
            }),
            customer: Some(Customer {
                branch_display_name: Some("Foxtons, Battersea".into()),
            }),
            added_or_reduced: Some("Reduced on 02/05/2024".into()),
            first_visible_date: Some("2024-04-11T09:12:44Z".into()),
            display_size: Some("624 sq. ft.".into()),
            product_label: Some(ProductLabel {
                product_label_text: Some("Online viewing".into()),
            }),
        }
    }

    #[test]
    fn maps_every_field() {
        let record = PropertyRecord::from_raw(&full_listing());

        assert_eq!(record.price, Some(275_000.into()));
        assert_eq!(record.bedrooms, Some(2));
        assert_eq!(record.url, "https://www.rightmove.co.uk/properties/148275923");
        assert_eq!(
            record.location,
            "https://www.google.com/maps/search/?api=1&query=51.5,-0.12"
        );
        assert_eq!(record.formatted_branch_name.as_deref(), Some("Foxtons, Battersea"));
        assert_eq!(record.product_label.as_deref(), Some("Online viewing"));
    }

    #[test]
    fn missing_nested_objects_yield_missing_fields() {
        let record = PropertyRecord::from_raw(&RawListing::default());

        assert_eq!(record.price, None);
        assert_eq!(record.bedrooms, None);
        assert_eq!(record.location, "");
        assert_eq!(record.url, LISTING_BASE_URL);
        assert_eq!(record.formatted_branch_name, None);
        assert_eq!(record.product_label, None);
        assert_eq!(record.to_row()[0], "");
    }

    #[test]
    fn map_link_requires_both_coordinates() {
        assert!(map_link(Some(51.5), Some(-0.12)).contains("51.5,-0.12"));
        assert_eq!(map_link(Some(51.5), None), "");
        assert_eq!(map_link(None, Some(-0.12)), "");

        let mut listing = full_listing();
        listing.location = Some(Location {
            latitude: None,
            longitude: Some(-0.12),
        });
        assert_eq!(PropertyRecord::from_raw(&listing).location, "");
    }

    #[test]
    fn normalizing_twice_gives_the_same_record() {
        let listing = full_listing();
        assert_eq!(
            PropertyRecord::from_raw(&listing),
            PropertyRecord::from_raw(&listing)
        );
    }

    #[test]
    fn row_follows_column_order() {
        let row = PropertyRecord::from_raw(&full_listing()).to_row();
        assert_eq!(row.len(), PROPERTY_COLUMNS.len());
        assert_eq!(row[0], "275000");
        assert_eq!(row[5], "https://www.rightmove.co.uk/properties/148275923");
        assert_eq!(row[6], "Foxtons, Battersea");
    }
}
