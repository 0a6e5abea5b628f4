// Configuration loading and parsing (config/groupwheel.toml).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Default location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/groupwheel.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub roster: RosterConfig,
    pub wheel: WheelConfig,
}

/// Initial setup inputs. These are not validated here: they go through the
/// session's `prepare` so setup errors are reported the same way whether
/// they came from the file, the command line, or the setup screen.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub members: String,
    pub sequence: String,
    pub group_count: i64,
}

impl Default for RosterConfig {
    fn default() -> Self {
        RosterConfig {
            members: "Budi, Ani, Candra, Desi, Eka, Fajar, Gita, Hani, Ilham, Joko".into(),
            sequence: String::new(),
            group_count: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub spin_duration_ms: u64,
    pub frame_interval_ms: u64,
    pub seed: Option<u64>,
}

impl Default for WheelConfig {
    fn default() -> Self {
        WheelConfig {
            spin_duration_ms: 800,
            frame_interval_ms: 33,
            seed: None,
        }
    }
}

impl WheelConfig {
    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Number of animation frames in one spin (at least 1).
    pub fn spin_frames(&self) -> u32 {
        let frames = self.spin_duration().as_millis() / self.frame_interval().as_millis().max(1);
        u32::try_from(frames).unwrap_or(u32::MAX).max(1)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse and validate config text. `path` is only used in error messages.
pub fn parse_config(content: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Load config from `path`, falling back to built-in defaults when the file
/// does not exist.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        info!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&content, path)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let wheel = &config.wheel;
    if !(1..=60_000).contains(&wheel.spin_duration_ms) {
        return Err(ConfigError::ValidationError {
            field: "wheel.spin_duration_ms".into(),
            message: format!("must be between 1 and 60000, got {}", wheel.spin_duration_ms),
        });
    }
    if wheel.frame_interval_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "wheel.frame_interval_ms".into(),
            message: "must be greater than 0".into(),
        });
    }
    if wheel.frame_interval_ms > wheel.spin_duration_ms {
        return Err(ConfigError::ValidationError {
            field: "wheel.frame_interval_ms".into(),
            message: format!(
                "must not exceed wheel.spin_duration_ms ({})",
                wheel.spin_duration_ms
            ),
        });
    }
    Ok(())
}
