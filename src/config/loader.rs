//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Replace the listener address (e.g. from `--bind`) and re-validate.
pub fn apply_bind_override(
    mut config: RouterConfig,
    bind: Option<String>,
) -> Result<RouterConfig, ConfigError> {
    if let Some(bind) = bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;
    use std::io::Write;

    const SAMPLE: &str = r#"
[listener]
bind_address = "127.0.0.1:3000"

[observability]
log_level = "debug"
log_format = "json"

[[routes]]
method = "GET"
path = "/users/{id}"
produces = "application/json"
handler = "echo"

[[routes]]
method = "PUT"
path = "/users/{id}"
consumes = "application/json"
handler = "echo"
"#;

    #[test]
    fn test_parse_config() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].produces, "application/json");
        assert_eq!(config.routes[0].consumes, "");
        assert_eq!(config.routes[1].consumes, "application/json");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[[routes]]\nmethod = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_validation_error_message() {
        let err = parse_config("[timeouts]\nrequest_secs = 0\n[limits]\nmax_body_bytes = 0").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: limits.max_body_bytes must be greater than 0, \
             timeouts.request_secs must be greater than 0"
        );
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.routes[1].method, "PUT");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_bind_override_is_validated() {
        let config = parse_config(SAMPLE).unwrap();

        let config = apply_bind_override(config, Some("127.0.0.1:0".to_string())).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:0");

        let err = apply_bind_override(config, Some("not-an-address".to_string())).unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(
                errors,
                vec![ValidationError::InvalidBindAddress("not-an-address".into())]
            ),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_no_bind_override_keeps_config() {
        let config = apply_bind_override(RouterConfig::default(), None).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }
}
