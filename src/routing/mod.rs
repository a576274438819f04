//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Location path ("/users/42")
//!     → resolver.rs (remembers the previous result)
//!     → table.rs (ordered entries, first match wins)
//!     → matcher.rs (segment pattern evaluation)
//!     → Return: Resolution { candidate: Option<Route>, previous: Option<Route> }
//!
//! Table Compilation (at startup / reload):
//!     (name, pattern)[] or a registration closure
//!     → Compile patterns into segment lists
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Patterns compiled once, immutable afterwards
//! - No regex: literal, `:param` and trailing `*` segments only
//! - Deterministic: same input always resolves to the same route
//! - First match wins (table order)
//! - No match is a value (`None`), never an error

pub mod matcher;
pub mod resolver;
pub mod route;
pub mod table;

pub use matcher::{PathPattern, PatternError};
pub use resolver::{Resolution, Resolve, TableResolver};
pub use route::{routes_equal, Route};
pub use table::{Registrar, RouteTable};
