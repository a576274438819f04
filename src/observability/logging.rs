//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Pick the log filter from environment, debug flag and config
//!
//! # Design Decisions
//! - `RUST_LOG` always wins
//! - Logs go to stderr so stdout stays reserved for emitted events

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::ObservabilityConfig;

/// Default filter directive when `RUST_LOG` is not set.
pub fn default_directive(config: &ObservabilityConfig, debug: bool) -> String {
    if debug {
        "route_lanes=debug".to_string()
    } else {
        format!("route_lanes={}", config.log_level)
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(config: &ObservabilityConfig, debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(config, debug).into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
