//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route names are present and unique
//! - Check every pattern compiles
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LanesConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::LanesConfig;
use crate::routing::{PathPattern, PatternError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("route {name:?} is defined more than once")]
    DuplicateName { name: String },

    #[error("route {name:?}: {source}")]
    InvalidPattern { name: String, source: PatternError },
}

/// Check a configuration before it is accepted.
pub fn validate_config(config: &LanesConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName { index });
        } else if !seen.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateName {
                name: route.name.clone(),
            });
        }

        if let Err(source) = PathPattern::parse(&route.pattern) {
            errors.push(ValidationError::InvalidPattern {
                name: route.name.clone(),
                source,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    fn route(name: &str, pattern: &str) -> RouteConfig {
        RouteConfig {
            name: name.into(),
            pattern: pattern.into(),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = LanesConfig {
            routes: vec![route("home", "/"), route("user", "/users/:id")],
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let config = LanesConfig {
            routes: vec![
                route("home", "/"),
                route("", "/empty"),
                route("home", "/again"),
                route("broken", "broken"),
            ],
            ..Default::default()
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0], ValidationError::EmptyName { index: 1 });
        assert_eq!(
            errors[1],
            ValidationError::DuplicateName {
                name: "home".into()
            }
        );
        assert!(matches!(
            &errors[2],
            ValidationError::InvalidPattern { name, .. } if name == "broken"
        ));
    }
}
