//! Stats module - cohort aggregation and significance testing

mod calculator;
mod report;

pub use calculator::{GroupStats, MetricComparison, StatsCalculator, SIGNIFICANCE_THRESHOLD};
pub use report::{
    column_mean, metric_differentials, season_overview, win_rates, MetricDifferential,
    ReportError, SeasonOverview, WinRates, AWAY_SCORE, HOME_SCORE,
};
