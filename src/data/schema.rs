//! Column schema shared by every pipeline stage.

/// Box-score columns extracted from the championship series files.
pub const DEFAULT_COLUMNS: [&str; 8] = ["Year", "Team", "Win", "FGP", "TRB", "AST", "TOV", "PTS"];

/// Columns the cleaner coerces to numbers.
pub const DEFAULT_NUMERIC_COLUMNS: [&str; 6] = ["Win", "FGP", "TRB", "AST", "TOV", "PTS"];

/// Performance metrics compared between home and away games.
pub const DEFAULT_METRICS: [&str; 5] = ["FGP", "TRB", "AST", "TOV", "PTS"];

/// Describes which columns are extracted, how rows are routed and which
/// columns are treated as numeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Columns to extract, in output order.
    pub columns: Vec<String>,
    /// Indicator column; a value of `"1"` routes the row to the home cohort.
    pub home_column: String,
    pub numeric_columns: Vec<String>,
    pub metric_columns: Vec<String>,
    pub win_column: String,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            columns: to_owned(&DEFAULT_COLUMNS),
            home_column: "Home".to_string(),
            numeric_columns: to_owned(&DEFAULT_NUMERIC_COLUMNS),
            metric_columns: to_owned(&DEFAULT_METRICS),
            win_column: "Win".to_string(),
        }
    }
}

impl Schema {
    /// Schema extracting `columns`, with no numeric coercion or metrics.
    pub fn with_columns<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            numeric_columns: Vec::new(),
            metric_columns: Vec::new(),
            ..Self::default()
        }
    }
}

fn to_owned(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}
