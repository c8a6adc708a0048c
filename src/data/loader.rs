//! CSV Data Loader Module
//! Reads whole CSV files (season data) into a DataFrame using Polars.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File '{}' not found", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Load a CSV file with a header row and inferred column types.
pub fn read_csv(path: impl AsRef<Path>) -> Result<DataFrame, LoaderError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(LoaderError::NotFound(path.to_path_buf()));
    }

    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;

    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "loaded csv");
    Ok(df)
}
