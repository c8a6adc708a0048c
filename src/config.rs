//! Run configuration: input files, output locations and rendering switches.

use std::path::{Path, PathBuf};

pub const CHAMPIONS_FILE: &str = "championsdata.csv";
pub const RUNNERUPS_FILE: &str = "runnerupsdata.csv";
pub const SEASON_FILE: &str = "season_2021_basic.csv";
pub const CHARTS_DIR: &str = "charts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Directory relative input paths are resolved against.
    pub data_dir: PathBuf,
    pub champions: PathBuf,
    pub runnerups: PathBuf,
    pub season: PathBuf,
    /// Directory the chart images are written to.
    pub out_dir: PathBuf,
    pub render_charts: bool,
    /// Open each rendered chart with the system viewer, one after another.
    pub open_charts: bool,
    /// Optional path for the JSON summary.
    pub summary: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            champions: PathBuf::from(CHAMPIONS_FILE),
            runnerups: PathBuf::from(RUNNERUPS_FILE),
            season: PathBuf::from(SEASON_FILE),
            out_dir: PathBuf::from(CHARTS_DIR),
            render_charts: true,
            open_charts: true,
            summary: None,
        }
    }
}

impl AnalysisConfig {
    /// Config reading the default file names from `data_dir` with no chart output.
    pub fn headless(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            render_charts: false,
            open_charts: false,
            ..Self::default()
        }
    }

    pub fn champions_path(&self) -> PathBuf {
        self.resolve(&self.champions)
    }

    pub fn runnerups_path(&self) -> PathBuf {
        self.resolve(&self.runnerups)
    }

    pub fn season_path(&self) -> PathBuf {
        self.resolve(&self.season)
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.data_dir.join(file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_inputs_resolve_against_data_dir() {
        let config = AnalysisConfig::headless("/data/nba");
        assert_eq!(
            config.champions_path(),
            PathBuf::from("/data/nba/championsdata.csv")
        );
        assert!(!config.render_charts);
    }

    #[test]
    fn absolute_inputs_are_kept() {
        let config = AnalysisConfig {
            season: PathBuf::from("/tmp/season.csv"),
            ..AnalysisConfig::default()
        };
        assert_eq!(config.season_path(), PathBuf::from("/tmp/season.csv"));
    }
}
