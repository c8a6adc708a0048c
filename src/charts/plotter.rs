//! Chart Plotter Module
//! Turns report results into bar chart descriptions.

use crate::stats::{MetricDifferential, SeasonOverview, WinRates};
use plotters::style::RGBColor;

pub const HOME_COLOR: RGBColor = RGBColor(31, 119, 180); // Blue
pub const AWAY_COLOR: RGBColor = RGBColor(255, 127, 14); // Orange
pub const HOME_WINS_COLOR: RGBColor = RGBColor(0, 128, 0); // Green
pub const AWAY_WINS_COLOR: RGBColor = RGBColor(255, 0, 0); // Red

/// Colors cycled across metric bars
pub const METRIC_PALETTE: [RGBColor; 5] = [
    RGBColor(135, 206, 235), // Sky blue
    RGBColor(144, 238, 144), // Light green
    RGBColor(240, 128, 128), // Light coral
    RGBColor(255, 182, 193), // Light pink
    RGBColor(245, 222, 179), // Wheat
];

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: RGBColor,
}

/// A titled bar chart ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
    /// Draw a zero line and horizontal grid, for signed values.
    pub signed: bool,
}

/// Builds chart descriptions for each report.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn win_rates(title: &str, rates: &WinRates) -> BarChart {
        BarChart {
            title: title.to_string(),
            y_label: "Win Rate".to_string(),
            bars: vec![
                Self::bar("Home", rates.home, HOME_COLOR),
                Self::bar("Away", rates.away, AWAY_COLOR),
            ],
            signed: false,
        }
    }

    pub fn season_overview(title: &str, overview: &SeasonOverview) -> BarChart {
        BarChart {
            title: title.to_string(),
            y_label: "Number of Wins".to_string(),
            bars: vec![
                Self::bar("Home Wins", overview.home_wins as f64, HOME_WINS_COLOR),
                Self::bar("Away Wins", overview.away_wins as f64, AWAY_WINS_COLOR),
            ],
            signed: false,
        }
    }

    pub fn metric_differentials(title: &str, diffs: &[MetricDifferential]) -> BarChart {
        BarChart {
            title: title.to_string(),
            y_label: "Difference (Home - Away)".to_string(),
            bars: diffs
                .iter()
                .enumerate()
                .map(|(i, d)| {
                    Self::bar(&d.metric, d.difference, METRIC_PALETTE[i % METRIC_PALETTE.len()])
                })
                .collect(),
            signed: true,
        }
    }

    fn bar(label: &str, value: f64, color: RGBColor) -> Bar {
        Bar {
            label: label.to_string(),
            value,
            color,
        }
    }
}

impl BarChart {
    /// Value range covering every bar and zero, padded by 10%.
    /// Undefined (NaN) bars are drawn as zero.
    pub fn y_range(&self) -> (f64, f64) {
        let (min, max) = self
            .bars
            .iter()
            .map(|b| if b.value.is_finite() { b.value } else { 0.0 })
            .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));

        if min == max {
            return (0.0, 1.0);
        }
        let pad = (max - min) * 0.1;
        (
            if min < 0.0 { min - pad } else { 0.0 },
            if max > 0.0 { max + pad } else { 0.0 },
        )
    }

    pub fn labels(&self) -> Vec<String> {
        self.bars.iter().map(|b| b.label.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_rate_chart_has_home_then_away() {
        let chart = ChartPlotter::win_rates("Champions", &WinRates { home: 0.75, away: 0.25 });
        assert_eq!(chart.labels(), vec!["Home", "Away"]);
        assert_eq!(chart.bars[0].value, 0.75);
        let (lo, hi) = chart.y_range();
        assert_eq!(lo, 0.0);
        assert!((hi - 0.825).abs() < 1e-12);
    }

    #[test]
    fn differential_range_spans_negative_values() {
        let diffs = vec![
            MetricDifferential {
                metric: "FGP".to_string(),
                home_mean: 0.48,
                away_mean: 0.45,
                difference: 2.0,
            },
            MetricDifferential {
                metric: "TOV".to_string(),
                home_mean: 13.0,
                away_mean: 15.0,
                difference: -2.0,
            },
        ];

        let chart = ChartPlotter::metric_differentials("Diff", &diffs);

        assert!(chart.signed);
        assert_eq!(chart.bars[1].color, METRIC_PALETTE[1]);
        let (lo, hi) = chart.y_range();
        assert!((lo + 2.4).abs() < 1e-12);
        assert!((hi - 2.4).abs() < 1e-12);
    }

    #[test]
    fn undefined_values_fall_back_to_unit_range() {
        let chart = ChartPlotter::win_rates("Empty", &WinRates { home: f64::NAN, away: 0.0 });
        assert_eq!(chart.y_range(), (0.0, 1.0));
    }
}
