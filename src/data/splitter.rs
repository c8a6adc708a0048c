//! Row Splitter Module
//! Reads a comma-delimited file and routes each row to the home or away cohort.

use crate::data::Schema;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const DELIMITER: char = ',';

/// A single extracted field. `None` when the row is too short to have it;
/// a blank field is an empty string.
pub type Cell = Option<String>;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} has no header line")]
    EmptyFile { path: PathBuf },
    #[error("Column '{column}' not found in header of {path}")]
    MissingColumn { column: String, path: PathBuf },
}

/// A pair of accumulators, one per side of the game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cohorts<T> {
    pub home: T,
    pub away: T,
}

impl<T> Cohorts<T> {
    pub fn map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<Cohorts<U>, E> {
        Ok(Cohorts {
            home: f(self.home)?,
            away: f(self.away)?,
        })
    }

    pub fn as_ref(&self) -> Cohorts<&T> {
        Cohorts {
            home: &self.home,
            away: &self.away,
        }
    }
}

/// Ordered mapping of column name to its values, in source row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    entries: Vec<(String, Vec<Cell>)>,
}

impl ColumnMap {
    /// Empty map with one (empty) entry per column, in the given order.
    pub fn with_columns<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            entries: columns
                .iter()
                .map(|c| (c.as_ref().to_string(), Vec::new()))
                .collect(),
        }
    }

    /// Append a column. Duplicate names are rejected later, by `build_table`.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<Cell>) {
        self.entries.push((name.into(), values));
    }

    pub fn get(&self, name: &str) -> Option<&[Cell]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Cell])> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    pub fn into_entries(self) -> Vec<(String, Vec<Cell>)> {
        self.entries
    }

    /// Number of rows, taken from the first column.
    pub fn row_count(&self) -> usize {
        self.entries.first().map(|(_, v)| v.len()).unwrap_or(0)
    }

    fn push_row(&mut self, row: Vec<Cell>) {
        for ((_, values), cell) in self.entries.iter_mut().zip(row) {
            values.push(cell);
        }
    }
}

/// Column-oriented split: returns one [`ColumnMap`] per cohort.
pub fn split_columns(
    path: impl AsRef<Path>,
    schema: &Schema,
) -> Result<Cohorts<ColumnMap>, SplitError> {
    let mut cohorts = Cohorts {
        home: ColumnMap::with_columns(&schema.columns),
        away: ColumnMap::with_columns(&schema.columns),
    };

    scan(path.as_ref(), schema, |is_home, row| {
        if is_home {
            cohorts.home.push_row(row);
        } else {
            cohorts.away.push_row(row);
        }
    })?;

    Ok(cohorts)
}

/// Row-oriented split: returns the extracted rows of each cohort, with fields
/// in `schema.columns` order.
pub fn split_rows(
    path: impl AsRef<Path>,
    schema: &Schema,
) -> Result<Cohorts<Vec<Vec<Cell>>>, SplitError> {
    let mut cohorts: Cohorts<Vec<Vec<Cell>>> = Cohorts::default();

    scan(path.as_ref(), schema, |is_home, row| {
        if is_home {
            cohorts.home.push(row);
        } else {
            cohorts.away.push(row);
        }
    })?;

    Ok(cohorts)
}

/// Header positions of the requested columns and the home indicator.
struct HeaderIndex {
    positions: Vec<usize>,
    home: usize,
}

impl HeaderIndex {
    fn resolve(header: &str, schema: &Schema, path: &Path) -> Result<Self, SplitError> {
        let names: Vec<&str> = header
            .trim_start_matches('\u{feff}')
            .trim()
            .split(DELIMITER)
            .collect();

        let position = |column: &str| {
            names
                .iter()
                .position(|n| *n == column)
                .ok_or_else(|| SplitError::MissingColumn {
                    column: column.to_string(),
                    path: path.to_path_buf(),
                })
        };

        let positions = schema
            .columns
            .iter()
            .map(|c| position(c.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let home = position(schema.home_column.as_str())?;

        Ok(Self { positions, home })
    }
}

fn field(fields: &[&str], index: usize) -> Cell {
    fields.get(index).map(|f| f.to_string())
}

/// Single pass over the file; `route` receives `(is_home, extracted_row)` for
/// every non-blank data line in file order.
fn scan(
    path: &Path,
    schema: &Schema,
    mut route: impl FnMut(bool, Vec<Cell>),
) -> Result<(), SplitError> {
    let io_err = |source| SplitError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let mut lines = BufReader::new(file).lines();

    let header = match lines.next() {
        Some(line) => line.map_err(io_err)?,
        None => {
            return Err(SplitError::EmptyFile {
                path: path.to_path_buf(),
            })
        }
    };
    let index = HeaderIndex::resolve(&header, schema, path)?;

    let (mut home_rows, mut away_rows) = (0usize, 0usize);
    for line in lines {
        let line = line.map_err(io_err)?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Only the line is stripped; fields are compared verbatim.
        let fields: Vec<&str> = line.split(DELIMITER).collect();
        let is_home = fields.get(index.home) == Some(&"1");
        let row = index.positions.iter().map(|&i| field(&fields, i)).collect();

        if is_home {
            home_rows += 1;
        } else {
            away_rows += 1;
        }
        route(is_home, row);
    }

    debug!(path = %path.display(), home_rows, away_rows, "split file into cohorts");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const SAMPLE: &str = "\
Year,Team,Game,Win,Home,PTS
2019,Raptors,1,1,1,118
2019,Raptors,2,0,1,104
2019,Raptors,3,1,0,123
2019,Raptors,4,1,0,105
";

    #[test]
    fn columns_are_routed_by_home_indicator() {
        let file = write_csv(SAMPLE);
        let schema = Schema::with_columns(&["Team", "PTS", "Win"]);

        let cohorts = split_columns(file.path(), &schema).unwrap();

        assert_eq!(
            cohorts.home.names().collect::<Vec<_>>(),
            vec!["Team", "PTS", "Win"]
        );
        assert_eq!(
            cohorts.home.get("PTS").unwrap(),
            &[Some("118".to_string()), Some("104".to_string())]
        );
        assert_eq!(
            cohorts.away.get("Win").unwrap(),
            &[Some("1".to_string()), Some("1".to_string())]
        );
    }

    #[test]
    fn rows_follow_requested_column_order() {
        let file = write_csv(SAMPLE);
        let schema = Schema::with_columns(&["PTS", "Year"]);

        let cohorts = split_rows(file.path(), &schema).unwrap();

        assert_eq!(cohorts.home.len(), 2);
        assert_eq!(
            cohorts.away[0],
            vec![Some("123".to_string()), Some("2019".to_string())]
        );
    }

    #[test]
    fn missing_column_is_fatal() {
        let file = write_csv(SAMPLE);
        let schema = Schema::with_columns(&["Team", "TRB"]);

        let err = split_rows(file.path(), &schema).unwrap_err();
        assert!(matches!(err, SplitError::MissingColumn { ref column, .. } if column == "TRB"));
    }

    #[test]
    fn missing_home_column_is_fatal() {
        let file = write_csv("Team,Win\nLakers,1\n");
        let schema = Schema::with_columns(&["Team"]);

        let err = split_columns(file.path(), &schema).unwrap_err();
        assert!(matches!(err, SplitError::MissingColumn { ref column, .. } if column == "Home"));
    }

    #[test]
    fn short_rows_have_missing_cells_and_blank_fields_stay_text() {
        let file = write_csv("Team,Home,PTS\nLakers,1,\nCeltics,0\n\n");
        let schema = Schema::with_columns(&["Team", "PTS"]);

        let cohorts = split_rows(file.path(), &schema).unwrap();

        assert_eq!(
            cohorts.home,
            vec![vec![Some("Lakers".to_string()), Some(String::new())]]
        );
        assert_eq!(cohorts.away, vec![vec![Some("Celtics".to_string()), None]]);
    }

    #[test]
    fn padded_home_value_is_not_home() {
        let file = write_csv("Team,Home\nLakers, 1\nCeltics,1\r\n");
        let schema = Schema::with_columns(&["Team"]);

        let cohorts = split_rows(file.path(), &schema).unwrap();

        assert_eq!(cohorts.home, vec![vec![Some("Celtics".to_string())]]);
        assert_eq!(cohorts.away, vec![vec![Some("Lakers".to_string())]]);
    }

    #[test]
    fn empty_file_is_rejected() {
        let file = write_csv("");
        let err = split_rows(file.path(), &Schema::default()).unwrap_err();
        assert!(matches!(err, SplitError::EmptyFile { .. }));
    }

    #[test]
    fn unreadable_path_reports_io_error() {
        let err = split_columns("/nonexistent/championsdata.csv", &Schema::default()).unwrap_err();
        assert!(matches!(err, SplitError::Io { .. }));
    }
}
