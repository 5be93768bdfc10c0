//! Dataset loading and cleaning.

pub mod cleaner;
pub mod loader;

pub use cleaner::{clean_table, into_records, CleanedTable, COLUMN_RENAMES};
pub use loader::{fetch_dataset, DatasetSource, LoadError, LoadOptions, RawTable, DATASET_URL};
