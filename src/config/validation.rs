//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Config → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::Config;

/// A single semantic problem in a configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("data_dir must not be empty")]
    EmptyDataDir,

    #[error("shutdown_timeout_secs must be greater than zero")]
    ZeroShutdownTimeout,

    #[error("request_timeout_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("invalid http_addr `{0}`")]
    InvalidHttpAddr(String),

    #[error("allowed_origins contains an empty entry")]
    EmptyOrigin,
}

/// Check a deserialized configuration for semantic problems.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.data_dir.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyDataDir);
    }
    if config.shutdown_timeout_secs == 0 {
        errors.push(ValidationError::ZeroShutdownTimeout);
    }
    if config.serve.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if let Some(addr) = &config.serve.http_addr {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidHttpAddr(addr.clone()));
        }
    }
    if config.serve.allowed_origins.iter().any(|o| o.trim().is_empty()) {
        errors.push(ValidationError::EmptyOrigin);
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
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_collects_every_problem() {
        let mut config = Config::default();
        config.data_dir = PathBuf::new();
        config.shutdown_timeout_secs = 0;
        config.serve.http_addr = Some("localhost".into());
        config.serve.allowed_origins.push(" ".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyDataDir,
                ValidationError::ZeroShutdownTimeout,
                ValidationError::InvalidHttpAddr("localhost".into()),
                ValidationError::EmptyOrigin,
            ]
        );
    }
}
