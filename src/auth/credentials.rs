//! API key / secret pair.
//!
//! # Security
//! - The secret is only ever serialized into the credential exchange body
//! - `Debug` output redacts it

use serde::Serialize;

use crate::error::{SdkError, SdkResult};

/// Environment variable holding the API key.
pub const API_KEY_ENV_VAR: &str = "MPC_API_KEY";

/// Environment variable holding the API secret.
pub const API_SECRET_ENV_VAR: &str = "MPC_API_SECRET";

/// Credentials exchanged for a bearer token. Immutable once built.
#[derive(Clone, Serialize)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Both values must be non-empty.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> SdkResult<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.trim().is_empty() {
            return Err(SdkError::Configuration("api_key is required".to_string()));
        }
        if api_secret.trim().is_empty() {
            return Err(SdkError::Configuration("api_secret is required".to_string()));
        }

        Ok(Self { api_key, api_secret })
    }

    /// Read `MPC_API_KEY` and `MPC_API_SECRET`.
    pub fn from_env() -> SdkResult<Self> {
        let read = |name: &str| {
            std::env::var(name)
                .map_err(|_| SdkError::Configuration(format!("environment variable {} is not set", name)))
        };
        Self::new(read(API_KEY_ENV_VAR)?, read(API_SECRET_ENV_VAR)?)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_both_values() {
        let err = Credentials::new("", "secret").unwrap_err();
        assert!(err.to_string().contains("api_key is required"));

        let err = Credentials::new("key", "  ").unwrap_err();
        assert!(err.to_string().contains("api_secret is required"));

        assert!(Credentials::new("key", "secret").is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("key-1", "super-secret").unwrap();
        let printed = format!("{:?}", creds);
        assert!(printed.contains("key-1"));
        assert!(!printed.contains("super-secret"));
    }

    #[test]
    fn test_exchange_body_shape() {
        let creds = Credentials::new("k", "s").unwrap();
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(json, serde_json::json!({"api_key": "k", "api_secret": "s"}));
    }
}
