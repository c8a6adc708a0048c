//! Pipeline Module
//! File → split → table → clean → aggregate → chart, for each data set.

use crate::charts::{BarChart, ChartPlotter, StaticChartRenderer, SMALL_CHART, WIDE_CHART};
use crate::config::AnalysisConfig;
use crate::data::{
    build_table, clean, read_csv, split_columns, split_rows, Cohorts, Schema, TableInput,
};
use crate::stats::{
    metric_differentials, season_overview, win_rates, MetricComparison, MetricDifferential,
    SeasonOverview, StatsCalculator, WinRates,
};
use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Aggregates for one championship data set.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesReport {
    pub name: String,
    pub home_games: usize,
    pub away_games: usize,
    pub win_rates: WinRates,
    pub differentials: Vec<MetricDifferential>,
    pub comparisons: Vec<MetricComparison>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub champions: SeriesReport,
    pub runner_ups: SeriesReport,
    /// Absent when the season file could not be read.
    pub season: Option<SeasonOverview>,
    pub charts: Vec<PathBuf>,
}

/// Split a file column-wise and clean both cohort tables.
pub fn load_series_by_columns(path: &Path, schema: &Schema) -> Result<Cohorts<DataFrame>> {
    split_columns(path, schema)?
        .map(|columns| build_table(TableInput::Columns(columns)))?
        .map(|table| clean(&table, schema))
        .with_context(|| format!("cleaning {}", path.display()))
}

/// Split a file row-wise and clean both cohort tables.
pub fn load_series_by_rows(path: &Path, schema: &Schema) -> Result<Cohorts<DataFrame>> {
    split_rows(path, schema)?
        .map(|rows| {
            build_table(TableInput::Rows {
                columns: schema.columns.clone(),
                rows,
            })
        })?
        .map(|table| clean(&table, schema))
        .with_context(|| format!("cleaning {}", path.display()))
}

/// Win rates, metric differentials and significance tests for one data set.
pub fn analyze_series(
    name: &str,
    tables: Cohorts<&DataFrame>,
    schema: &Schema,
) -> Result<SeriesReport> {
    let report = SeriesReport {
        name: name.to_string(),
        home_games: tables.home.height(),
        away_games: tables.away.height(),
        win_rates: win_rates(tables.clone(), &schema.win_column)?,
        differentials: metric_differentials(tables.clone(), &schema.metric_columns)?,
        comparisons: StatsCalculator::compare_all_parallel(tables, schema)?,
    };

    info!(
        series = name,
        home_games = report.home_games,
        away_games = report.away_games,
        home_win_rate = report.win_rates.home,
        away_win_rate = report.win_rates.away,
        "analyzed series"
    );
    Ok(report)
}

/// Run the whole analysis: print the cohort tables, render charts and
/// optionally write the JSON summary.
///
/// A missing or unreadable season file does not stop the other reports, but
/// the run still ends in an error once everything else is done.
pub fn run(config: &AnalysisConfig, schema: &Schema) -> Result<AnalysisSummary> {
    let champions = load_series_by_columns(&config.champions_path(), schema)?;
    let runner_ups = load_series_by_rows(&config.runnerups_path(), schema)?;

    let season_path = config.season_path();
    let season = read_csv(&season_path);

    print_table("Champion Home Teams:", &champions.home);
    print_table("\nChampion Away Teams:", &champions.away);
    print_table("\nRunner-Up Home Teams:", &runner_ups.home);
    print_table("\nRunner-Up Away Teams:", &runner_ups.away);
    match &season {
        Ok(df) => print_table("\n2021 Season Overview:", df),
        Err(e) => error!(path = %season_path.display(), "season data unavailable: {e}"),
    }

    let champion_report = analyze_series("Champion", champions.as_ref(), schema)?;
    let runner_up_report = analyze_series("Runner-Up", runner_ups.as_ref(), schema)?;
    let season_report = season.as_ref().ok().map(season_overview).transpose()?;

    print_comparisons(&champion_report);
    print_comparisons(&runner_up_report);

    let mut charts = vec![
        (
            "champion_win_rates.png",
            ChartPlotter::win_rates(
                "Champion Teams Home vs Away Win Rates",
                &champion_report.win_rates,
            ),
            SMALL_CHART,
        ),
        (
            "runner_up_win_rates.png",
            ChartPlotter::win_rates(
                "Runner-Up Teams Home vs Away Win Rates",
                &runner_up_report.win_rates,
            ),
            SMALL_CHART,
        ),
    ];
    if let Some(overview) = &season_report {
        charts.push((
            "season_2021_overview.png",
            ChartPlotter::season_overview("2021 Season Home vs Away Wins", overview),
            SMALL_CHART,
        ));
    }
    charts.push((
        "champion_metric_differences.png",
        ChartPlotter::metric_differentials(
            "Champion Team Performance Metrics Difference: Home vs Away",
            &champion_report.differentials,
        ),
        WIDE_CHART,
    ));
    charts.push((
        "runner_up_metric_differences.png",
        ChartPlotter::metric_differentials(
            "Runner-Up Team Performance Metrics Difference: Home vs Away",
            &runner_up_report.differentials,
        ),
        WIDE_CHART,
    ));

    let chart_paths = if config.render_charts {
        render_charts(config, &charts)?
    } else {
        Vec::new()
    };

    let summary = AnalysisSummary {
        champions: champion_report,
        runner_ups: runner_up_report,
        season: season_report,
        charts: chart_paths,
    };

    if let Some(path) = &config.summary {
        write_summary(&summary, path)?;
    }

    season.with_context(|| format!("reading season data from {}", season_path.display()))?;
    Ok(summary)
}

fn render_charts(
    config: &AnalysisConfig,
    charts: &[(&str, BarChart, (u32, u32))],
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("creating chart directory {}", config.out_dir.display()))?;

    let mut paths = Vec::with_capacity(charts.len());
    for (file_name, chart, size) in charts {
        let path = config.out_dir.join(file_name);
        StaticChartRenderer::render_png(chart, &path, *size)?;
        info!(path = %path.display(), title = %chart.title, "rendered chart");

        if config.open_charts {
            if let Err(e) = show_chart(&path) {
                warn!(path = %path.display(), "could not open chart: {e}");
            }
        }
        paths.push(path);
    }
    Ok(paths)
}

/// Open `path` in the system viewer and wait for the viewer command to exit,
/// so charts come up one after another.
fn show_chart(path: &Path) -> io::Result<()> {
    let mut last_error = None;
    for mut command in open::commands(path) {
        match command.status() {
            Ok(status) if status.success() => return Ok(()),
            Ok(status) => {
                last_error = Some(io::Error::other(format!("viewer exited with {status}")))
            }
            Err(e) => last_error = Some(e),
        }
    }
    Err(last_error.unwrap_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no viewer found")))
}

/// Serialize the summary as pretty JSON.
pub fn write_summary(summary: &AnalysisSummary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json).with_context(|| format!("writing summary to {}", path.display()))?;
    info!(path = %path.display(), "wrote summary");
    Ok(())
}

fn print_table(title: &str, df: &DataFrame) {
    println!("{title}");
    println!("{df}");
}

fn print_comparisons(report: &SeriesReport) {
    println!("\n{} Home vs Away (Welch t-test):", report.name);
    println!(
        "{:<6} {:>10} {:>10} {:>11} {:>11} {:>10} {:>10}  sig",
        "Metric", "Home mean", "Away mean", "Home median", "Away median", "Diff", "P-value"
    );
    for c in &report.comparisons {
        println!("{}", comparison_row(c));
    }
}

fn comparison_row(c: &MetricComparison) -> String {
    format!(
        "{:<6} {:>10.3} {:>10.3} {:>11.3} {:>11.3} {:>10.3} {:>10.4}  {}",
        c.metric,
        c.home.mean,
        c.away.mean,
        c.home.median,
        c.away.median,
        c.home.mean - c.away.mean,
        c.p_value,
        if c.is_significant { "*" } else { "" }
    )
}
