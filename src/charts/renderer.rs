//! Static Chart Renderer
//! Draws bar charts to PNG files with plotters.
//!
//! Layout:
//! 1. Title centered above the plot
//! 2. One bar per category, labelled on the x axis
//! 3. Signed charts get a grey zero line and a light horizontal grid

use crate::charts::BarChart;
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

const GRID: RGBColor = RGBColor(200, 200, 200);
const ZERO_LINE: RGBColor = RGBColor(128, 128, 128);

/// Default image size for two-bar charts.
pub const SMALL_CHART: (u32, u32) = (700, 500);
/// Default image size for metric charts.
pub const WIDE_CHART: (u32, u32) = (1000, 600);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to render chart '{title}': {message}")]
    Render { title: String, message: String },
    #[error("Chart '{0}' has no bars")]
    Empty(String),
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `chart` into a PNG at `path`.
    pub fn render_png(chart: &BarChart, path: &Path, size: (u32, u32)) -> Result<(), ChartError> {
        if chart.bars.is_empty() {
            return Err(ChartError::Empty(chart.title.clone()));
        }
        let fail = |e| render_error(&chart.title, e);

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(fail)?;

        let (y_min, y_max) = chart.y_range();
        let labels = chart.labels();
        let n = chart.bars.len();
        let label_of = |x: &SegmentValue<usize>| match x {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        };

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(if chart.signed { 60 } else { 40 })
            .y_label_area_size(70)
            .build_cartesian_2d((0..n).into_segmented(), y_min..y_max)
            .map_err(fail)?;

        let mut mesh = ctx.configure_mesh();
        mesh.disable_x_mesh()
            .y_desc(chart.y_label.as_str())
            .x_labels(n)
            .x_label_formatter(&label_of);
        if chart.signed {
            mesh.light_line_style(GRID.mix(0.7));
        } else {
            mesh.disable_y_mesh();
        }
        mesh.draw().map_err(fail)?;

        ctx.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
            let value = if bar.value.is_finite() { bar.value } else { 0.0 };
            let mut rect = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), value),
                ],
                bar.color.filled(),
            );
            rect.set_margin(0, 0, 15, 15);
            rect
        }))
        .map_err(fail)?;

        if chart.signed {
            ctx.draw_series(LineSeries::new(
                [(SegmentValue::Exact(0), 0.0), (SegmentValue::Last, 0.0)],
                ZERO_LINE.stroke_width(1),
            ))
            .map_err(fail)?;
        }

        root.present().map_err(fail)?;
        Ok(())
    }
}

fn render_error(title: &str, e: impl std::fmt::Display) -> ChartError {
    ChartError::Render {
        title: title.to_string(),
        message: e.to_string(),
    }
}
