//! Routing context and its driver.
//!
//! # Data Flow
//! ```text
//! Navigator::navigate → service::run → Lanes::set_location (gated)
//!     → LocationWatcher (watch channel) → Lanes::tick()
//! LocationHandle::set_value
//!     → LocationWatcher (watch channel)
//!     → service::run wakes, Lanes::tick()
//!     → TableResolver → ReadinessGate → RouteSynchronizer → EventBus
//!     → observers; acknowledged route committed as current
//! ```

pub mod root;
pub mod service;

pub use root::{Lanes, LanesOptions};
pub use service::{request_channel, Navigator, Request};
