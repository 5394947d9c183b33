//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the base URL is an absolute http(s) URL with a host
//! - Validate value ranges (timeouts > 0) and endpoint paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SdkConfig → Result<(), Vec<ValidationError>>
//! - Runs before a client is constructed, so no request is ever sent with a bad config

use thiserror::Error;
use url::Url;

use crate::config::schema::SdkConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("base_url is required")]
    MissingBaseUrl,

    #[error("base_url '{url}' is invalid: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("{field} '{path}' must start with '/'")]
    InvalidPath { field: &'static str, path: String },

    #[error("user_agent must not be empty when set")]
    EmptyUserAgent,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &SdkConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_base_url(&config.base_url, &mut errors);

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "timeouts.request_secs",
        });
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "timeouts.connect_secs",
        });
    }

    for (field, path) in [
        ("auth.token_path", &config.auth.token_path),
        ("auth.logout_path", &config.auth.logout_path),
    ] {
        if !path.starts_with('/') {
            errors.push(ValidationError::InvalidPath {
                field,
                path: path.clone(),
            });
        }
    }

    if matches!(&config.user_agent, Some(ua) if ua.trim().is_empty()) {
        errors.push(ValidationError::EmptyUserAgent);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_base_url(raw: &str, errors: &mut Vec<ValidationError>) {
    if raw.trim().is_empty() {
        errors.push(ValidationError::MissingBaseUrl);
        return;
    }

    let invalid = |reason: &str| ValidationError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    match Url::parse(raw) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(invalid("scheme must be http or https"));
            } else if url.host_str().is_none() {
                errors.push(invalid("missing host"));
            } else if url.query().is_some() || url.fragment().is_some() {
                errors.push(invalid("must not carry a query or fragment"));
            }
        }
        Err(e) => errors.push(invalid(&e.to_string())),
    }
}
