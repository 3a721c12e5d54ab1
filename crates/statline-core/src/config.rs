// Configuration loading and parsing (statline.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the configuration, both under `defaults/` and `config/`.
pub const CONFIG_FILE: &str = "statline.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// statline.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub leaderboard: LeaderboardConfig,
    pub qualification: QualificationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardConfig {
    pub length: usize,
}

/// Per-session qualification rates plus the fixed career minimums.
#[derive(Debug, Clone, Deserialize)]
pub struct QualificationConfig {
    pub pa_per_session: f64,
    pub outs_per_session: u32,
    pub min_attempts: u32,
    pub min_decisions: u32,
    pub career: CareerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CareerConfig {
    pub min_pa: u32,
    pub min_ip: f64,
    pub min_attempts: u32,
    pub min_decisions: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "statline_cli=info,statline_core=info,statline_baseball=info,warn".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/statline.toml` relative to `base_dir`.
///
/// This does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config = parse_config(&text, &path)?;
    validate(&config)?;
    Ok(config)
}

/// Install `defaults/statline.toml` as `config/statline.toml` when there is
/// no copy yet. Returns the written path, or `None` when a copy exists.
/// A defaults file that does not parse is never installed.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let text = std::fs::read_to_string(&source).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!(
            "no config/{CONFIG_FILE} in {} and cannot read {}: {e}",
            base_dir.display(),
            source.display()
        ),
    })?;
    parse_config(&text, &source)?;

    std::fs::create_dir_all(base_dir.join("config")).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    std::fs::write(&target, text).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to write {}: {e}", target.display()),
    })?;
    Ok(Some(target))
}

/// Load config relative to the current working directory, installing the
/// defaults on first run.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.dir.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.dir".into(),
            message: "must not be empty".into(),
        });
    }

    if config.leaderboard.length == 0 {
        return Err(ConfigError::ValidationError {
            field: "leaderboard.length".into(),
            message: "must be greater than 0".into(),
        });
    }

    let q = &config.qualification;
    let float_fields: &[(&str, f64)] = &[
        ("qualification.pa_per_session", q.pa_per_session),
        ("qualification.career.min_ip", q.career.min_ip),
    ];
    for (name, val) in float_fields {
        if !val.is_finite() || *val <= 0.0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be > 0, got {val}"),
            });
        }
    }

    let count_fields: &[(&str, u32)] = &[
        ("qualification.outs_per_session", q.outs_per_session),
        ("qualification.min_attempts", q.min_attempts),
        ("qualification.min_decisions", q.min_decisions),
        ("qualification.career.min_pa", q.career.min_pa),
        ("qualification.career.min_attempts", q.career.min_attempts),
        ("qualification.career.min_decisions", q.career.min_decisions),
    ];
    for (name, val) in count_fields {
        if *val == 0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must be > 0".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
