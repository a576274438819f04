//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LanesConfig (validated, immutable)
//!     → loader::build_table → RouteTable
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → sent to the service, which swaps the route table
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - An invalid reload is logged and ignored; the old table stays

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{build_table, load_config, parse_config, ConfigError};
pub use schema::{LanesConfig, ObservabilityConfig, RouteConfig};
pub use validation::ValidationError;
pub use watcher::ConfigWatcher;
