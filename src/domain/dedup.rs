use crate::domain::PropertyRecord;
use std::collections::HashMap;

#[derive(Debug)]
pub struct Deduplicated {
    pub records: Vec<PropertyRecord>,
    pub removed: usize,
}

/// Keeps one record per `url`. The last occurrence wins, and it takes the
/// slot where that url was first seen.
pub fn dedup_by_url(records: Vec<PropertyRecord>) -> Deduplicated {
    let total = records.len();
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(total);
    let mut unique: Vec<PropertyRecord> = Vec::with_capacity(total);

    for record in records {
        match slots.get(&record.url) {
            Some(&slot) => unique[slot] = record,
            None => {
                slots.insert(record.url.clone(), unique.len());
                unique.push(record);
            }
        }
    }

    Deduplicated {
        removed: total - unique.len(),
        records: unique,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LISTING_BASE_URL;

    fn record(id: u32, address: &str) -> PropertyRecord {
        PropertyRecord {
            price: None,
            bedrooms: None,
            property_sub_type: None,
            address: Some(address.to_string()),
            location: String::new(),
            url: format!("{LISTING_BASE_URL}{id}"),
            formatted_branch_name: None,
            added_or_reduced: None,
            first_visible_date: None,
            display_size: None,
            product_label: None,
        }
    }

    #[test]
    fn later_duplicate_wins() {
        let out = dedup_by_url(vec![record(1, "old"), record(1, "new")]);

        assert_eq!(out.removed, 1);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].address.as_deref(), Some("new"));
    }

    #[test]
    fn order_follows_first_sighting() {
        let out = dedup_by_url(vec![
            record(1, "a"),
            record(2, "b"),
            record(1, "a2"),
            record(3, "c"),
        ]);

        let addresses: Vec<_> = out
            .records
            .iter()
            .map(|r| r.address.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(addresses, ["a2", "b", "c"]);
        assert_eq!(out.removed, 1);
    }

    #[test]
    fn empty_input() {
        let out = dedup_by_url(Vec::new());
        assert!(out.records.is_empty());
        assert_eq!(out.removed, 0);
    }
}
