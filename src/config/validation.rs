//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce base-path invariants (leading '/', no trailing '/')
//! - Validate value ranges (timeouts > 0, bind address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PreviewConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::PreviewConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "site.base_path").
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn err(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &PreviewConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(err(
            "server.bind_address",
            format!("not a valid socket address: {:?}", config.server.bind_address),
        ));
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(err("server.request_timeout_secs", "must be greater than zero"));
    }

    let base = &config.site.base_path;
    if !base.is_empty() {
        if !base.starts_with('/') {
            errors.push(err("site.base_path", "must start with '/' when set"));
        }
        if base.ends_with('/') {
            errors.push(err("site.base_path", "must not end with '/'"));
        }
        if base.contains(char::is_whitespace) {
            errors.push(err("site.base_path", "must not contain whitespace"));
        }
    }

    if config.build.manifest.is_empty() {
        errors.push(err("build.manifest", "manifest file name must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
