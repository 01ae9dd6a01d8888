//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Scenario file picked up from the working directory when nothing else is set
pub const LOCAL_SCENARIO_FILE: &str = "relia.yaml";

const DEFAULT_OUTPUT_DIR: &str = "charts";
const DEFAULT_CHART_WIDTH: u32 = 1000;
const DEFAULT_CHART_HEIGHT: u32 = 600;

/// Relia configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scenario file to analyse
    pub scenario: Option<PathBuf>,

    /// Directory charts are written to
    pub output_dir: Option<PathBuf>,

    /// Default output format
    pub default_format: Option<String>,

    /// Chart width in pixels
    pub chart_width: Option<u32>,

    /// Chart height in pixels
    pub chart_height: Option<u32>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/relia/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "relia")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Read one config file; unreadable or malformed files are skipped with a warning
    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read config file");
                return None;
            }
        };
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(scenario) = lookup("RELIA_SCENARIO") {
            self.scenario = Some(PathBuf::from(scenario));
        }
        if let Some(dir) = lookup("RELIA_OUTPUT_DIR") {
            self.output_dir = Some(PathBuf::from(dir));
        }
        if let Some(format) = lookup("RELIA_FORMAT") {
            self.default_format = Some(format);
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.scenario.is_some() {
            self.scenario = other.scenario;
        }
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.chart_width.is_some() {
            self.chart_width = other.chart_width;
        }
        if other.chart_height.is_some() {
            self.chart_height = other.chart_height;
        }
    }

    /// Resolve the scenario file: explicit flag, then config, then ./relia.yaml
    ///
    /// `None` means the built-in scenario.
    pub fn scenario_path(&self, explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Some(ref path) = self.scenario {
            return Some(path.clone());
        }
        let local = cwd.join(LOCAL_SCENARIO_FILE);
        local.exists().then_some(local)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    pub fn chart_size(&self) -> (u32, u32) {
        (
            self.chart_width.unwrap_or(DEFAULT_CHART_WIDTH),
            self.chart_height.unwrap_or(DEFAULT_CHART_HEIGHT),
        )
    }
}
