pub mod export_csv;
pub mod export_xlsx;

pub use export_csv::{read_table, write_properties_csv, write_summary_csv, write_table, Table};
pub use export_xlsx::{export_properties_xlsx, export_summary_xlsx};

/// Header row of the agent summary table.
pub const SUMMARY_HEADERS: [&str; 2] = ["Grouped Agent", "Number of Properties"];
