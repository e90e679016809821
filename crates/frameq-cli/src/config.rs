//! Configuration file support for frameq.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/frameq/config.toml` (lowest priority)
//! - Project-local: `.frameq.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where frames are read from.
    pub input: InputConfig,
    /// Batch defaults.
    pub batch: BatchConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// Input configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Root that requested directories are resolved under.
    pub root: Option<PathBuf>,
    /// Allowed frame extensions, without dots.
    pub extensions: Option<Vec<String>>,
}

/// Batch configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Frames per batch.
    pub size: Option<usize>,
    /// Lead each batch with the frame before the cursor.
    pub pre_frame: Option<bool>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/frameq/config.toml`
    /// 2. Project-local: `.frameq.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are dropped with a warning.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Checks values and drops the invalid ones.
    ///
    /// Returns every problem found, joined into one message.
    fn validate(&mut self) -> Result<(), String> {
        let mut problems = Vec::new();

        if self.batch.size == Some(0) {
            problems.push("batch.size must be at least 1, got 0".to_string());
            self.batch.size = None;
        }

        if let Some(ref extensions) = self.input.extensions {
            if extensions.is_empty() {
                problems.push("input.extensions must not be empty".to_string());
                self.input.extensions = None;
            } else if let Some(bad) = extensions
                .iter()
                .find(|e| e.is_empty() || e.contains('.'))
            {
                problems.push(format!(
                    "input.extensions entries must be bare extensions like 'png', got '{bad}'"
                ));
                self.input.extensions = None;
            }
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                problems.push(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
                self.output.format = None;
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("; "))
        }
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // Input
        self.input.root = other.input.root.or_else(|| self.input.root.take());
        self.input.extensions = other
            .input
            .extensions
            .or_else(|| self.input.extensions.take());

        // Batch
        self.batch.size = other.batch.size.or(self.batch.size);
        self.batch.pre_frame = other.batch.pre_frame.or(self.batch.pre_frame);

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("frameq").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.frameq.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".frameq.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
