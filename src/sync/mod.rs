//! Route synchronization subsystem.
//!
//! # Data Flow
//! ```text
//! Resolution { candidate, previous }
//!     → gate.rs (FIFO until the host is ready)
//!     → synchronizer.rs (compare with current, propose)
//!     → notify.rs (leave → update → route, root then descendants)
//!     → ack queue → synchronizer.rs (commit current)
//! ```
//!
//! # Design Decisions
//! - Single-threaded: no locks, callers serialize resolutions
//! - Current route changes only after the route event is broadcast
//! - Stopping is terminal and drops deferred work

pub mod gate;
pub mod notify;
pub mod synchronizer;

pub use gate::ReadinessGate;
pub use notify::{
    Audience, EventBus, Notifier, RouteEvent, SubscriptionId, Topic, TopicFilter,
    TopicParseError,
};
pub use synchronizer::{Outcome, RouteSynchronizer, SyncState};
