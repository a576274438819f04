//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::LanesConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::{PatternError, RouteTable};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),

    #[error("Route table error: {0}")]
    Pattern(#[from] PatternError),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LanesConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<LanesConfig, ConfigError> {
    let config: LanesConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Compile the route table described by a configuration.
pub fn build_table(config: &LanesConfig) -> Result<RouteTable, ConfigError> {
    let table = RouteTable::from_pairs(
        config
            .routes
            .iter()
            .map(|r| (r.name.as_str(), r.pattern.as_str())),
    )?;
    Ok(table)
}
