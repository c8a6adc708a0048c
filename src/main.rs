//! Courtside - home court advantage analysis
//!
//! Prints the cleaned cohort tables and renders the comparison charts.

use clap::Parser;
use courtside::{AnalysisConfig, Schema};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Test the home court advantage in NBA finals and the 2021 season."
)]
struct Cli {
    /// Directory the input files are read from.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Champion teams' finals box scores.
    #[arg(long, default_value = courtside::config::CHAMPIONS_FILE)]
    champions: PathBuf,

    /// Runner-up teams' finals box scores.
    #[arg(long, default_value = courtside::config::RUNNERUPS_FILE)]
    runnerups: PathBuf,

    /// 2021 regular season games with home_score and away_score.
    #[arg(long, default_value = courtside::config::SEASON_FILE)]
    season: PathBuf,

    /// Directory the chart images are written to.
    #[arg(long, default_value = courtside::config::CHARTS_DIR)]
    out_dir: PathBuf,

    /// Skip chart rendering entirely.
    #[arg(long)]
    no_charts: bool,

    /// Write the charts without opening them.
    #[arg(long)]
    no_open: bool,

    /// Write a JSON summary of every comparison to this path.
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> AnalysisConfig {
        AnalysisConfig {
            data_dir: self.data_dir.clone(),
            champions: self.champions.clone(),
            runnerups: self.runnerups.clone(),
            season: self.season.clone(),
            out_dir: self.out_dir.clone(),
            render_charts: !self.no_charts,
            open_charts: !self.no_charts && !self.no_open,
            summary: self.summary.clone(),
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(error) = courtside::run(&cli.config(), &Schema::default()) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
