//! Courtside - home court advantage analysis for NBA box-score data.
//!
//! Splits championship series files into home and away cohorts, cleans them
//! with Polars, compares win rates and performance metrics, and renders the
//! comparisons as bar charts.

pub mod charts;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod stats;

pub use config::AnalysisConfig;
pub use data::Schema;
pub use pipeline::{run, AnalysisSummary, SeriesReport};
