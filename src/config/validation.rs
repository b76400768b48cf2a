//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Check route methods, path templates and duplicates
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Handler names are resolved later, against the handler registry

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::Method;
use thiserror::Error;

use crate::config::schema::RouterConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),

    #[error("limits.max_body_bytes must be greater than 0")]
    ZeroBodyLimit,

    #[error("timeouts.request_secs must be greater than 0")]
    ZeroRequestTimeout,

    #[error("route {index}: method must not be empty")]
    EmptyMethod { index: usize },

    #[error("route {index}: invalid method '{method}'")]
    InvalidMethod { index: usize, method: String },

    #[error("route {index}: path '{path}' must start with '/'")]
    InvalidPath { index: usize, path: String },

    #[error("route {index}: handler must not be empty")]
    EmptyHandler { index: usize },

    #[error("route {index}: duplicate route {method} {path}")]
    DuplicateRoute {
        index: usize,
        method: String,
        path: String,
    },
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let mut seen = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if route.method.is_empty() {
            errors.push(ValidationError::EmptyMethod { index });
        } else if Method::from_bytes(route.method.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidMethod {
                index,
                method: route.method.clone(),
            });
        }

        if !route.path.starts_with('/') {
            errors.push(ValidationError::InvalidPath {
                index,
                path: route.path.clone(),
            });
        }

        if route.handler.is_empty() {
            errors.push(ValidationError::EmptyHandler { index });
        }

        if !seen.insert((route.method.as_str(), route.path.as_str())) {
            errors.push(ValidationError::DuplicateRoute {
                index,
                method: route.method.clone(),
                path: route.path.clone(),
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
    use crate::config::RouteConfig;

    fn route(method: &str, path: &str, handler: &str) -> RouteConfig {
        RouteConfig {
            method: method.into(),
            path: path.into(),
            produces: String::new(),
            consumes: String::new(),
            handler: handler.into(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&RouterConfig::default()), Ok(()));
    }

    #[test]
    fn test_valid_routes() {
        let mut config = RouterConfig::default();
        config.routes.push(route("GET", "/users/{id}", "echo"));
        config.routes.push(route("PUT", "/users/{id}", "echo"));
        config.routes.push(route("GET", "/", "ok"));
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.limits.max_body_bytes = 0;
        config.timeouts.request_secs = 0;
        config.routes.push(route("", "users", ""));
        config.routes.push(route("GE T", "/a", "ok"));
        config.routes.push(route("GET", "/b", "ok"));
        config.routes.push(route("GET", "/b", "echo"));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidBindAddress("not-an-address".into()),
                ValidationError::ZeroBodyLimit,
                ValidationError::ZeroRequestTimeout,
                ValidationError::EmptyMethod { index: 0 },
                ValidationError::InvalidPath {
                    index: 0,
                    path: "users".into()
                },
                ValidationError::EmptyHandler { index: 0 },
                ValidationError::InvalidMethod {
                    index: 1,
                    method: "GE T".into()
                },
                ValidationError::DuplicateRoute {
                    index: 3,
                    method: "GET".into(),
                    path: "/b".into()
                },
            ]
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = RouterConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert_eq!(validate_config(&config), Ok(()));

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::InvalidMetricsAddress("nowhere".into())])
        );
    }

    #[test]
    fn test_method_case_is_preserved() {
        // Lowercase methods are valid tokens; they simply never match uppercase requests.
        let mut config = RouterConfig::default();
        config.routes.push(route("get", "/", "ok"));
        assert_eq!(validate_config(&config), Ok(()));
    }
}
