//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Init logging/metrics → Build routing context
//!
//! Shutdown (shutdown.rs):
//!     Trigger → service loop exits → context stopped (no more events)
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl-C) → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then observability, then the context
//! - Stopping the context is synchronous and final

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
