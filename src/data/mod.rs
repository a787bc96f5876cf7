//! Data module - CSV loading and cleaning

mod cleaner;
mod loader;

pub use cleaner::{CleaningStrategy, ColumnSummary, DataCleaner};
pub use loader::{is_numeric, CsvOptions, DataLoader};
