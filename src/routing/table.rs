//! Ordered route table.
//!
//! # Responsibilities
//! - Store compiled (name, pattern) entries in registration order
//! - Build from a list of pairs or a registration closure
//! - Look up the first entry matching a location
//!
//! # Design Decisions
//! - Immutable after construction; reload builds a new table
//! - Duplicate names are accepted here (first match wins);
//!   config validation is where they are rejected

use super::matcher::{PathPattern, PatternError};
use super::route::Route;

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    pattern: PathPattern,
}

/// Route entries in match order.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<Entry>,
}

/// Collects registrations made by [`RouteTable::from_registrar`].
#[derive(Debug, Default)]
pub struct Registrar {
    pairs: Vec<(String, String)>,
}

impl Registrar {
    /// Register a named pattern.
    pub fn route(&mut self, name: impl Into<String>, pattern: impl Into<String>) -> &mut Self {
        self.pairs.push((name.into(), pattern.into()));
        self
    }
}

impl RouteTable {
    /// A table that matches nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile a table from `(name, pattern)` pairs.
    pub fn from_pairs<I, N, P>(pairs: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: AsRef<str>,
    {
        let entries = pairs
            .into_iter()
            .map(|(name, pattern)| {
                Ok(Entry {
                    name: name.into(),
                    pattern: PathPattern::parse(pattern.as_ref())?,
                })
            })
            .collect::<Result<Vec<_>, PatternError>>()?;

        Ok(Self { entries })
    }

    /// Compile a table from a registration closure.
    ///
    /// ```
    /// use route_lanes::routing::RouteTable;
    ///
    /// let table = RouteTable::from_registrar(|r| {
    ///     r.route("home", "/").route("user", "/users/:id");
    /// })
    /// .unwrap();
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn from_registrar<F>(register: F) -> Result<Self, PatternError>
    where
        F: FnOnce(&mut Registrar),
    {
        let mut registrar = Registrar::default();
        register(&mut registrar);
        Self::from_pairs(registrar.pairs)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry names in match order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Resolve a location to the first matching entry.
    pub fn lookup(&self, location: &str) -> Option<Route> {
        self.entries.iter().find_map(|entry| {
            entry
                .pattern
                .captures(location)
                .map(|params| Route::new(entry.name.clone(), location, params))
        })
    }
}
