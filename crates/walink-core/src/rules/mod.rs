pub mod links;

pub use links::{
    process_table, NoopObserver, ProcessedTable, RowObserver, RowOutcome, TableSummary,
    PHONE_COLUMN, WEBSITE_COLUMN,
};
