pub mod agents;
pub mod dedup;
pub mod property;

pub use agents::{AgentGroup, AgentGrouper};
pub use dedup::{dedup_by_url, Deduplicated};
pub use property::{PropertyRecord, PROPERTY_COLUMNS};

#[cfg(test)]
pub use property::LISTING_BASE_URL;
