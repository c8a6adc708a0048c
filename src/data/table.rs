//! Table Builder Module
//! Resolves column-major and row-major inputs into a single DataFrame.

use crate::data::{Cell, ColumnMap};
use polars::prelude::*;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Duplicate column '{0}'")]
    DuplicateColumn(String),
    #[error("Column '{column}' has {actual} values, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("Row {row} has {actual} fields, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// The two shapes a cohort can arrive in.
#[derive(Debug, Clone)]
pub enum TableInput {
    /// Column name mapped to its values.
    Columns(ColumnMap),
    /// Rows of fields, named positionally by `columns`.
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<Cell>>,
    },
}

/// Build a DataFrame with one string column per input column.
pub fn build_table(input: TableInput) -> Result<DataFrame, TableError> {
    let entries = match input {
        TableInput::Columns(map) => map.into_entries(),
        TableInput::Rows { columns, rows } => transpose(columns, rows)?,
    };

    let mut seen = HashSet::new();
    let height = entries.first().map(|(_, v)| v.len()).unwrap_or(0);
    let mut columns = Vec::with_capacity(entries.len());

    for (name, values) in entries {
        if !seen.insert(name.clone()) {
            return Err(TableError::DuplicateColumn(name));
        }
        if values.len() != height {
            return Err(TableError::RaggedColumn {
                column: name,
                expected: height,
                actual: values.len(),
            });
        }
        columns.push(Column::new(name.into(), values));
    }

    Ok(DataFrame::new(columns)?)
}

fn transpose(
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
) -> Result<Vec<(String, Vec<Cell>)>, TableError> {
    let width = columns.len();
    let mut values: Vec<Vec<Cell>> = (0..width).map(|_| Vec::with_capacity(rows.len())).collect();

    for (row_idx, row) in rows.into_iter().enumerate() {
        if row.len() != width {
            return Err(TableError::RowWidth {
                row: row_idx,
                expected: width,
                actual: row.len(),
            });
        }
        for (column, cell) in values.iter_mut().zip(row) {
            column.push(cell);
        }
    }

    Ok(columns.into_iter().zip(values).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Cell> {
        values.iter().map(|v| Some(v.to_string())).collect()
    }

    #[test]
    fn mapping_and_rows_build_equal_tables() {
        let mut map = ColumnMap::default();
        map.insert("A", cells(&["1", "2"]));
        let from_map = build_table(TableInput::Columns(map)).unwrap();

        let from_rows = build_table(TableInput::Rows {
            columns: vec!["A".to_string()],
            rows: vec![cells(&["1"]), cells(&["2"])],
        })
        .unwrap();

        assert_eq!(from_map.shape(), (2, 1));
        assert!(from_map.equals_missing(&from_rows));
    }

    #[test]
    fn column_order_is_preserved() {
        let df = build_table(TableInput::Rows {
            columns: vec!["PTS".to_string(), "Team".to_string()],
            rows: vec![cells(&["101", "Heat"])],
        })
        .unwrap();

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["PTS", "Team"]);
    }

    #[test]
    fn missing_cells_become_nulls() {
        let mut map = ColumnMap::default();
        map.insert("FGP", vec![Some("0.45".to_string()), None]);

        let df = build_table(TableInput::Columns(map)).unwrap();
        assert_eq!(df.column("FGP").unwrap().null_count(), 1);
    }

    #[test]
    fn ragged_columns_are_rejected() {
        let mut map = ColumnMap::default();
        map.insert("A", cells(&["1", "2"]));
        map.insert("B", cells(&["1"]));

        let err = build_table(TableInput::Columns(map)).unwrap_err();
        assert!(matches!(err, TableError::RaggedColumn { ref column, .. } if column == "B"));
    }

    #[test]
    fn short_rows_are_rejected() {
        let err = build_table(TableInput::Rows {
            columns: vec!["A".to_string(), "B".to_string()],
            rows: vec![cells(&["1", "2"]), cells(&["3"])],
        })
        .unwrap_err();

        assert!(matches!(err, TableError::RowWidth { row: 1, .. }));
    }

    #[test]
    fn duplicate_columns_are_rejected() {
        let mut map = ColumnMap::default();
        map.insert("A", cells(&["1"]));
        map.insert("A", cells(&["2"]));

        let err = build_table(TableInput::Columns(map)).unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn(ref c) if c == "A"));
    }

    #[test]
    fn empty_input_builds_empty_table() {
        let df = build_table(TableInput::Rows {
            columns: vec!["A".to_string()],
            rows: Vec::new(),
        })
        .unwrap();

        assert_eq!(df.shape(), (0, 1));
    }
}
