//! Location subsystem.
//!
//! # Data Flow
//! ```text
//! Producer (stdin, host, tests)
//!     → LocationHandle::set_token / set_value
//!     → watch channel (latest token)
//!     → LocationChanges::changed() wakes the driver
//!     → LocationWatcher::poll_change() yields the path to resolve
//! ```

pub mod watcher;

pub use watcher::{LocationChanges, LocationHandle, LocationWatcher};
