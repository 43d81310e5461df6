use anyhow::{Context, Result};
use confyg::{env, Confygery};
use partsong_game::ScoringPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for partsong.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (PARTSONG_* prefix)
/// 3. Config file (~/.config/partsong/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Exercise data file used by the `exercise` commands.
    ///
    /// Can be set via:
    /// - CLI: --exercises /path/to/exercises.toml
    /// - ENV: PARTSONG_EXERCISES_PATH
    /// - Config: exercises_path = "/path/to/exercises.toml"
    /// - Default: ~/.local/share/partsong/exercises.toml
    pub exercises_path: PathBuf,

    /// Chapter used by `check` when --chapter is not given.
    pub default_chapter: u32,

    /// Points for a submission with no issues.
    pub perfect_score: u32,

    /// Points lost per rule error or constraint violation.
    pub error_penalty: u32,

    /// One of: error, warn, info, debug, trace.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let scoring = ScoringPolicy::default();
        Self {
            exercises_path: default_exercises_path(),
            default_chapter: 1,
            perfect_score: scoring.perfect_score,
            error_penalty: scoring.error_penalty,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default config file and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `config_path` (if it exists) and environment variables.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder.add_file(path_str).context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("partsong");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;
        log::debug!("Loaded configuration: {config:?}");
        Ok(config)
    }

    /// Use `path` for exercise data instead of the configured file.
    ///
    /// This is used when the --exercises CLI flag is provided.
    #[must_use]
    pub fn with_exercises_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.exercises_path = path;
        }
        self
    }

    #[must_use]
    pub fn scoring(&self) -> ScoringPolicy {
        ScoringPolicy::new(self.perfect_score, self.error_penalty)
    }
}

/// Returns: ~/.local/share/partsong/exercises.toml (or platform equivalent)
fn default_exercises_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("partsong")
        .join("exercises.toml")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/partsong/config.toml
/// - macOS: ~/Library/Application Support/partsong/config.toml
/// - Windows: %APPDATA%\partsong\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("partsong")
        .join("config.toml")
}

pub fn example_config() -> &'static str {
    r#"# Partsong Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (PARTSONG_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Exercise data file for the `exercise` commands (TOML or JSON)
#
# Can also be set via:
# - CLI: partsong --exercises /path/to/exercises.toml exercise list
# - Environment: PARTSONG_EXERCISES_PATH=/path/to/exercises.toml
#
# Default: Platform-specific data directory
#exercises_path = "/path/to/exercises.toml"

# Chapter whose cumulative rule set `partsong check` applies
default_chapter = 1

# Scoring for `partsong exercise submit`
perfect_score = 100
error_penalty = 10

# Log level: error, warn, info, debug or trace (-v flags override this)
log_level = "warn"
"#
}

/// Create the config file at `config_path` if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file_at(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

pub fn ensure_config_file() -> Result<bool> {
    ensure_config_file_at(&config_file_path())
}
