//! Route synchronization library.
//!
//! Keeps an application's current route in sync with a location token and
//! notifies observers with ordered `leave` → `update` → `route` events.

pub mod config;
pub mod lanes;
pub mod lifecycle;
pub mod location;
pub mod observability;
pub mod routing;
pub mod sync;

pub use config::schema::LanesConfig;
pub use lanes::{Lanes, LanesOptions};
pub use lifecycle::Shutdown;
pub use routing::{routes_equal, Route, RouteTable};
pub use sync::{Audience, RouteEvent, Topic, TopicFilter};
