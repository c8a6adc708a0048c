//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::{Bar, BarChart, ChartPlotter, METRIC_PALETTE};
pub use renderer::{ChartError, StaticChartRenderer, SMALL_CHART, WIDE_CHART};
