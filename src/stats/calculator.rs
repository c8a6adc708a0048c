//! Statistics Calculator Module
//! Descriptive statistics and Welch's t-test for home vs away cohorts.

use crate::data::{Cohorts, Schema};
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Significance threshold for t-test
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Statistics for a single cohort.
#[derive(Debug, Clone, Serialize)]
pub struct GroupStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
}

impl Default for GroupStats {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
        }
    }
}

/// Home vs away comparison of one column.
#[derive(Debug, Clone, Serialize)]
pub struct MetricComparison {
    pub metric: String,
    pub home: GroupStats,
    pub away: GroupStats,
    pub p_value: f64,
    pub is_significant: bool,
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> GroupStats {
        let n = values.len();
        if n == 0 {
            return GroupStats::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        GroupStats {
            count: n,
            mean,
            median,
            std: variance.sqrt(),
        }
    }

    /// Perform Welch's t-test (independent samples, unequal variance).
    ///
    /// Returns the two-tailed p-value and whether it falls under
    /// [`SIGNIFICANCE_THRESHOLD`]. Samples with fewer than two values give NaN.
    pub fn perform_ttest(group_values: &[f64], control_values: &[f64]) -> (f64, bool) {
        let n1 = group_values.len() as f64;
        let n2 = control_values.len() as f64;

        if n1 < 2.0 || n2 < 2.0 {
            return (f64::NAN, false);
        }

        let mean1 = group_values.iter().sum::<f64>() / n1;
        let mean2 = control_values.iter().sum::<f64>() / n2;

        let var1 = group_values
            .iter()
            .map(|x| (x - mean1).powi(2))
            .sum::<f64>()
            / (n1 - 1.0);
        let var2 = control_values
            .iter()
            .map(|x| (x - mean2).powi(2))
            .sum::<f64>()
            / (n2 - 1.0);

        let se = (var1 / n1 + var2 / n2).sqrt();
        if se == 0.0 {
            // Both samples constant: either identical or perfectly separated.
            return if mean1 == mean2 { (1.0, false) } else { (0.0, true) };
        }

        let t = (mean1 - mean2) / se;

        // Welch-Satterthwaite degrees of freedom
        let df_num = (var1 / n1 + var2 / n2).powi(2);
        let df_denom = (var1 / n1).powi(2) / (n1 - 1.0) + (var2 / n2).powi(2) / (n2 - 1.0);
        let df = df_num / df_denom;

        if let Ok(dist) = StudentsT::new(0.0, 1.0, df) {
            let p_value = 2.0 * (1.0 - dist.cdf(t.abs()));
            (p_value, p_value <= SIGNIFICANCE_THRESHOLD)
        } else {
            (f64::NAN, false)
        }
    }

    /// Non-missing values of a column, coerced to f64.
    pub fn column_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<f64>> {
        let values = df.column(column)?.cast(&DataType::Float64)?;
        Ok(values
            .f64()?
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect())
    }

    /// Compare one column between the home and away tables.
    pub fn compare_metric(
        tables: Cohorts<&DataFrame>,
        metric: &str,
    ) -> PolarsResult<MetricComparison> {
        let home_values = Self::column_values(tables.home, metric)?;
        let away_values = Self::column_values(tables.away, metric)?;
        let (p_value, is_significant) = Self::perform_ttest(&home_values, &away_values);

        Ok(MetricComparison {
            metric: metric.to_string(),
            home: Self::compute_descriptive_stats(&home_values),
            away: Self::compute_descriptive_stats(&away_values),
            p_value,
            is_significant,
        })
    }

    /// Compare the win column and every metric of the schema in parallel,
    /// returned in schema order.
    pub fn compare_all_parallel(
        tables: Cohorts<&DataFrame>,
        schema: &Schema,
    ) -> PolarsResult<Vec<MetricComparison>> {
        let mut columns: Vec<&str> = vec![schema.win_column.as_str()];
        columns.extend(
            schema
                .metric_columns
                .iter()
                .map(String::as_str)
                .filter(|m| *m != schema.win_column),
        );

        columns
            .par_iter()
            .map(|metric| Self::compare_metric(tables.clone(), metric))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptive_stats_of_small_sample() {
        let stats = StatsCalculator::compute_descriptive_stats(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.median, 2.5);
        assert!((stats.std - 1.2909944).abs() < 1e-6);
    }

    #[test]
    fn empty_sample_has_nan_stats() {
        let stats = StatsCalculator::compute_descriptive_stats(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
    }

    #[test]
    fn identical_samples_are_not_significant() {
        let sample = [101.0, 98.0, 110.0, 95.0];
        let (p, significant) = StatsCalculator::perform_ttest(&sample, &sample);
        assert!((p - 1.0).abs() < 1e-9);
        assert!(!significant);
    }

    #[test]
    fn separated_samples_are_significant() {
        let home = [120.0, 121.0, 119.0, 122.0, 118.0];
        let away = [90.0, 91.0, 89.0, 92.0, 88.0];
        let (p, significant) = StatsCalculator::perform_ttest(&home, &away);
        assert!(p < 0.001);
        assert!(significant);
    }

    #[test]
    fn constant_but_different_samples_are_significant() {
        let (p, significant) = StatsCalculator::perform_ttest(&[1.0, 1.0], &[0.0, 0.0]);
        assert_eq!(p, 0.0);
        assert!(significant);
    }

    #[test]
    fn tiny_samples_yield_nan() {
        let (p, significant) = StatsCalculator::perform_ttest(&[1.0], &[0.0, 1.0]);
        assert!(p.is_nan());
        assert!(!significant);
    }

    #[test]
    fn compares_win_column_first_then_metrics() {
        let home = DataFrame::new(vec![
            Column::new("Win".into(), [1.0, 1.0, 0.0, 1.0]),
            Column::new("PTS".into(), [110.0, 104.0, 99.0, 120.0]),
        ])
        .unwrap();
        let away = DataFrame::new(vec![
            Column::new("Win".into(), [0.0, 1.0, 0.0, 0.0]),
            Column::new("PTS".into(), [101.0, 107.0, 95.0, 98.0]),
        ])
        .unwrap();
        let schema = Schema {
            metric_columns: vec!["PTS".to_string()],
            ..Schema::default()
        };

        let comparisons = StatsCalculator::compare_all_parallel(
            Cohorts {
                home: &home,
                away: &away,
            },
            &schema,
        )
        .unwrap();

        let metrics: Vec<&str> = comparisons.iter().map(|c| c.metric.as_str()).collect();
        assert_eq!(metrics, vec!["Win", "PTS"]);
        assert_eq!(comparisons[0].home.mean, 0.75);
        assert_eq!(comparisons[0].away.mean, 0.25);
    }
}
