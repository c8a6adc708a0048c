//! Data module - splitting, table building, cleaning and CSV loading

mod cleaner;
mod loader;
mod schema;
mod splitter;
mod table;

pub use cleaner::{clean, ensure_numeric, CleanError};
pub use loader::{read_csv, LoaderError};
pub use schema::{Schema, DEFAULT_COLUMNS, DEFAULT_METRICS, DEFAULT_NUMERIC_COLUMNS};
pub use splitter::{split_columns, split_rows, Cell, Cohorts, ColumnMap, SplitError};
pub use table::{build_table, TableError, TableInput};
