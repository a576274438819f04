//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LanesConfig {
    /// Prefix of location tokens owned by this router (e.g. "!" for "#!/path").
    pub prefix: String,

    /// Turn on debug logging for route resolution and emitted events.
    pub debug: bool,

    /// Location resolved at startup.
    pub initial: String,

    /// Route table, in match order.
    pub routes: Vec<RouteConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// One route table entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route name used in event topics.
    pub name: String,

    /// Path pattern (e.g. "/users/:id").
    pub pattern: String,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config: LanesConfig = toml::from_str(
            r#"
            [[routes]]
            name = "home"
            pattern = "/"
            "#,
        )
        .unwrap();

        assert_eq!(config.prefix, "");
        assert!(!config.debug);
        assert_eq!(config.initial, "");
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_full_config() {
        let config: LanesConfig = toml::from_str(
            r#"
            prefix = "!"
            debug = true
            initial = "/users/1"

            [[routes]]
            name = "home"
            pattern = "/"

            [[routes]]
            name = "user"
            pattern = "/users/:id"

            [observability]
            log_level = "warn"
            metrics_enabled = true
            "#,
        )
        .unwrap();

        assert_eq!(config.prefix, "!");
        assert!(config.debug);
        assert_eq!(config.initial, "/users/1");
        assert_eq!(config.routes[1].pattern, "/users/:id");
        assert!(config.observability.metrics_enabled);
        assert_eq!(config.observability.metrics_address, "127.0.0.1:9090");
    }
}
