//! Location resolution.
//!
//! # Responsibilities
//! - Resolve a location path against the current table
//! - Remember the previous result so callers can detect route exits
//! - Swap the table on reload without losing the previous result

use super::route::Route;
use super::table::RouteTable;
use crate::observability::metrics;

/// Output of one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Route matched by this location, or `None` when nothing matched.
    pub candidate: Option<Route>,

    /// What the resolver produced on the previous call.
    pub previous: Option<Route>,
}

/// Anything that turns a location into a [`Resolution`].
pub trait Resolve {
    fn resolve(&mut self, location: &str) -> Resolution;
}

/// Resolver backed by a [`RouteTable`].
#[derive(Debug, Default)]
pub struct TableResolver {
    table: RouteTable,
    previous: Option<Route>,
}

impl TableResolver {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            previous: None,
        }
    }

    /// Replace the table. The remembered previous route is kept.
    pub fn replace_table(&mut self, table: RouteTable) {
        self.table = table;
    }
}

impl Resolve for TableResolver {
    fn resolve(&mut self, location: &str) -> Resolution {
        let candidate = self.table.lookup(location);
        metrics::record_resolution(candidate.is_some());

        tracing::debug!(
            location,
            route = candidate.as_ref().map(|r| r.name.as_str()),
            "Location resolved"
        );

        let previous = std::mem::replace(&mut self.previous, candidate.clone());
        Resolution {
            candidate,
            previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> TableResolver {
        TableResolver::new(
            RouteTable::from_pairs([("home", "/"), ("user", "/users/:id")]).unwrap(),
        )
    }

    #[test]
    fn test_previous_tracks_last_result() {
        let mut resolver = resolver();

        let first = resolver.resolve("/");
        assert_eq!(first.candidate.as_ref().unwrap().name, "home");
        assert!(first.previous.is_none());

        let second = resolver.resolve("/users/42");
        assert_eq!(second.candidate.as_ref().unwrap().name, "user");
        assert_eq!(second.previous, first.candidate);

        let third = resolver.resolve("/missing");
        assert!(third.candidate.is_none());
        assert_eq!(third.previous, second.candidate);

        let fourth = resolver.resolve("/");
        assert!(fourth.previous.is_none());
    }

    #[test]
    fn test_replace_table_keeps_previous() {
        let mut resolver = resolver();
        resolver.resolve("/users/1");

        resolver.replace_table(RouteTable::from_pairs([("member", "/users/:id")]).unwrap());
        let res = resolver.resolve("/users/1");
        assert_eq!(res.candidate.unwrap().name, "member");
        assert_eq!(res.previous.unwrap().name, "user");
    }
}
