//! Cleaner Module
//! Deduplication, missing-value removal and numeric coercion.

use crate::data::Schema;
use polars::prelude::*;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Remove duplicates and incomplete rows, then coerce the schema's numeric
/// columns and drop the rows that failed coercion or became duplicates.
pub fn clean(df: &DataFrame, schema: &Schema) -> Result<DataFrame, CleanError> {
    let input_rows = df.height();

    let deduped = drop_duplicates(df)?;
    let duplicates = input_rows - deduped.height();

    let complete = drop_missing(&deduped)?;
    let incomplete = deduped.height() - complete.height();

    let coerced = ensure_numeric(&complete, &schema.numeric_columns)?;
    let numeric = drop_missing(&coerced)?;
    let non_numeric = coerced.height() - numeric.height();

    // "7" and "7.0" only collide once coerced.
    let cleaned = drop_duplicates(&numeric)?;

    debug!(
        input_rows,
        duplicates = duplicates + numeric.height() - cleaned.height(),
        incomplete,
        non_numeric,
        output_rows = cleaned.height(),
        "cleaned table"
    );
    Ok(cleaned)
}

/// Cast `columns` to Float64; unparseable values become null.
pub fn ensure_numeric<S: AsRef<str>>(
    df: &DataFrame,
    columns: &[S],
) -> Result<DataFrame, CleanError> {
    if columns.is_empty() {
        return Ok(df.clone());
    }

    let casts: Vec<Expr> = columns
        .iter()
        .map(|c| col(c.as_ref()).cast(DataType::Float64))
        .collect();

    let coerced = df.clone().lazy().with_columns(casts).collect()?;
    Ok(coerced)
}

/// Keep the first occurrence of every distinct row, preserving order.
fn drop_duplicates(df: &DataFrame) -> Result<DataFrame, CleanError> {
    let unique = df
        .clone()
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    Ok(unique)
}

/// Drop every row holding a null, or a NaN in a float column.
fn drop_missing(df: &DataFrame) -> Result<DataFrame, CleanError> {
    let predicate = df
        .get_columns()
        .iter()
        .map(|column| {
            let present = col(column.name().clone()).is_not_null();
            if column.dtype().is_float() {
                present.and(col(column.name().clone()).is_not_nan())
            } else {
                present
            }
        })
        .reduce(|acc, next| acc.and(next));

    match predicate {
        Some(predicate) => Ok(df.clone().lazy().filter(predicate).collect()?),
        None => Ok(df.clone()),
    }
}
