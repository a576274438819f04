//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging and metrics
//! - Build the routing context
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Command-line overrides are applied before validation

use std::path::Path;

use crate::config::{load_config, ConfigError, LanesConfig};
use crate::lanes::Lanes;
use crate::observability::{logging, metrics};

/// Values from the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub prefix: Option<String>,
    pub initial: Option<String>,
    pub debug: bool,
}

/// Load the config file (or defaults) and apply overrides.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &Overrides,
) -> Result<LanesConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => LanesConfig::default(),
    };

    if let Some(prefix) = &overrides.prefix {
        config.prefix = prefix.clone();
    }
    if let Some(initial) = &overrides.initial {
        config.initial = initial.clone();
    }
    config.debug |= overrides.debug;

    Ok(config)
}

/// Initialize observability and build the routing context.
///
/// Must run inside a tokio runtime when metrics are enabled.
pub fn start(config: &LanesConfig) -> Result<Lanes, ConfigError> {
    logging::init_logging(&config.observability, config.debug);

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    tracing::info!(
        prefix = %config.prefix,
        routes = config.routes.len(),
        debug = config.debug,
        "Configuration loaded"
    );

    Lanes::from_config(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let overrides = Overrides {
            prefix: Some("!".into()),
            initial: Some("/users/1".into()),
            debug: true,
        };
        let config = resolve_config(None, &overrides).unwrap();
        assert_eq!(config.prefix, "!");
        assert_eq!(config.initial, "/users/1");
        assert!(config.debug);
    }

    #[test]
    fn test_defaults_without_file() {
        let config = resolve_config(None, &Overrides::default()).unwrap();
        assert!(config.routes.is_empty());
        assert!(!config.debug);
    }
}
