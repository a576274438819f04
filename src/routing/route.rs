//! Resolved route values and structural comparison.

use serde::{Deserialize, Serialize};

/// A location resolved against the route table.
///
/// Produced by the resolver and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Name of the matched table entry (e.g. "user").
    pub name: String,

    /// Raw location that matched (e.g. "/users/42").
    pub path: String,

    /// Values captured by the pattern, in pattern order.
    pub params: Vec<String>,
}

impl Route {
    /// Create a new route value.
    pub fn new(name: impl Into<String>, path: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            params,
        }
    }
}

/// Structural equality of two resolved routes.
///
/// Absence is never equal to anything, absence included: callers that need
/// "both absent" semantics must check for it themselves.
pub fn routes_equal(a: Option<&Route>, b: Option<&Route>) -> bool {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => return false,
    };

    if a.name != b.name || a.path != b.path || a.params.len() != b.params.len() {
        return false;
    }

    a.params.iter().zip(&b.params).all(|(x, y)| x == y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> Route {
        Route::new("user", format!("/users/{}", id), vec![id.to_string()])
    }

    #[test]
    fn test_reflexive() {
        let route = user("42");
        assert!(routes_equal(Some(&route), Some(&route)));

        let home = Route::new("home", "/", vec![]);
        assert!(routes_equal(Some(&home), Some(&home.clone())));
    }

    #[test]
    fn test_absent_is_never_equal() {
        let route = user("42");
        assert!(!routes_equal(Some(&route), None));
        assert!(!routes_equal(None, Some(&route)));
        assert!(!routes_equal(None, None));
    }

    #[test]
    fn test_name_and_path_must_match() {
        let a = user("42");

        let mut renamed = a.clone();
        renamed.name = "member".into();
        assert!(!routes_equal(Some(&a), Some(&renamed)));

        let mut moved = a.clone();
        moved.path = "/members/42".into();
        assert!(!routes_equal(Some(&a), Some(&moved)));
    }

    #[test]
    fn test_params_compared_by_position() {
        let a = Route::new("pair", "/p/1/2", vec!["1".into(), "2".into()]);
        let b = Route::new("pair", "/p/1/2", vec!["1".into(), "2".into()]);
        assert!(routes_equal(Some(&a), Some(&b)));

        let swapped = Route::new("pair", "/p/1/2", vec!["2".into(), "1".into()]);
        assert!(!routes_equal(Some(&a), Some(&swapped)));

        let mismatch = Route::new("pair", "/p/1/2", vec!["1".into(), "3".into()]);
        assert!(!routes_equal(Some(&a), Some(&mismatch)));
    }

    #[test]
    fn test_param_length_mismatch() {
        let a = Route::new("pair", "/p", vec!["1".into()]);
        let b = Route::new("pair", "/p", vec!["1".into(), "1".into()]);
        assert!(!routes_equal(Some(&a), Some(&b)));
        assert!(!routes_equal(Some(&b), Some(&a)));
    }
}
