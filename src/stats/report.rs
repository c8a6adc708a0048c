//! Report Module
//! Win rates, season overview and metric differentials between cohorts.

use crate::data::{ensure_numeric, CleanError, Cohorts};
use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

pub const HOME_SCORE: &str = "home_score";
pub const AWAY_SCORE: &str = "away_score";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error(transparent)]
    Clean(#[from] CleanError),
}

/// Share of games won by each cohort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WinRates {
    pub home: f64,
    pub away: f64,
}

/// Home and away win counts over a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonOverview {
    pub games: usize,
    pub home_wins: usize,
    pub away_wins: usize,
}

/// Mean of one metric per cohort and their signed difference (home - away).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDifferential {
    pub metric: String,
    pub home_mean: f64,
    pub away_mean: f64,
    pub difference: f64,
}

/// Mean of `column` after coercion; NaN for an empty or all-missing column.
pub fn column_mean(df: &DataFrame, column: &str) -> Result<f64, ReportError> {
    let numeric = ensure_numeric(df, &[column])?;
    let mean = numeric.column(column)?.f64()?.mean();
    Ok(mean.unwrap_or(f64::NAN))
}

/// Mean of the win column for each cohort.
pub fn win_rates(tables: Cohorts<&DataFrame>, win_column: &str) -> Result<WinRates, ReportError> {
    let rates = WinRates {
        home: column_mean(tables.home, win_column)?,
        away: column_mean(tables.away, win_column)?,
    };
    if rates.home.is_nan() || rates.away.is_nan() {
        warn!(?rates, "a cohort has no games; its win rate is undefined");
    }
    Ok(rates)
}

/// Count home wins as games where the home score is strictly greater.
///
/// Every other game is an away win, so ties and unparseable scores land on
/// the away side.
pub fn season_overview(season: &DataFrame) -> Result<SeasonOverview, ReportError> {
    let scores = ensure_numeric(season, &[HOME_SCORE, AWAY_SCORE])?;
    let home = scores.column(HOME_SCORE)?.f64()?;
    let away = scores.column(AWAY_SCORE)?.f64()?;

    let home_wins = home
        .into_iter()
        .zip(away)
        .filter(|pair| matches!(pair, (Some(h), Some(a)) if h > a))
        .count();
    let games = season.height();

    Ok(SeasonOverview {
        games,
        home_wins,
        away_wins: games - home_wins,
    })
}

/// Home-minus-away mean for each metric, in the given order.
pub fn metric_differentials<S: AsRef<str>>(
    tables: Cohorts<&DataFrame>,
    metrics: &[S],
) -> Result<Vec<MetricDifferential>, ReportError> {
    let home = ensure_numeric(tables.home, metrics)?;
    let away = ensure_numeric(tables.away, metrics)?;

    metrics
        .iter()
        .map(|metric| {
            let metric = metric.as_ref();
            let home_mean = column_mean(&home, metric)?;
            let away_mean = column_mean(&away, metric)?;
            Ok(MetricDifferential {
                metric: metric.to_string(),
                home_mean,
                away_mean,
                difference: home_mean - away_mean,
            })
        })
        .collect()
}
