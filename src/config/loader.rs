//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a configuration from TOML text without touching the environment.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Read the TOML file at `path`, or start from defaults when no file is given.
///
/// The environment is not consulted; see [`overlay_env`].
pub fn read_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_config(&content)
        }
        None => Ok(AppConfig::default()),
    }
}

/// Overlay values from `lookup` and validate the result.
///
/// Unparsable overlay values and semantic problems are reported together.
pub fn overlay_env<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut errors = config.apply_env(lookup);
    if let Err(problems) = validate_config(&config) {
        errors.extend(problems);
    }

    if errors.is_empty() {
        Ok(config)
    } else {
        Err(ConfigError::Validation(errors))
    }
}

/// Load configuration.
///
/// Reads the TOML file at `path` when given (otherwise starts from
/// defaults), overlays the process environment and validates the result.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    overlay_env(read_config(path)?, |key| std::env::var(key).ok())
}
