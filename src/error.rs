//! SDK error taxonomy.
//!
//! Every operation returns [`SdkResult`]. The variants separate failures the
//! caller can act on differently: a transport failure may be retried, an API
//! error carries the server's code and trace id for diagnosis, and a protocol
//! error means client and server disagree on the wire shape.

use thiserror::Error;

/// Errors that can occur while talking to the MPC gateway.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Missing or invalid credential, base URL or configuration file.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Credential exchange or logout was rejected or could not be performed.
    #[error("Authentication failed: {message}")]
    Authentication {
        message: String,
        #[source]
        source: Option<Box<SdkError>>,
    },

    /// Network-level failure (timeout, connection refused, TLS).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response did not have the expected envelope or payload shape.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The envelope decoded but reported a non-success code.
    #[error("API error: {message} (code: {code}, trace_id: {trace_id})")]
    Api {
        code: i64,
        message: String,
        trace_id: String,
    },
}

/// Result type for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;

impl SdkError {
    pub(crate) fn authentication(message: impl Into<String>, source: SdkError) -> Self {
        Self::Authentication {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The server's envelope code, when the failure came from the server.
    ///
    /// Looks through an authentication failure to the API error that caused it.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            Self::Authentication {
                source: Some(inner),
                ..
            } => inner.code(),
            _ => None,
        }
    }

    /// The server-assigned trace identifier, if any.
    pub fn trace_id(&self) -> Option<&str> {
        match self {
            Self::Api { trace_id, .. } => Some(trace_id.as_str()),
            Self::Authentication {
                source: Some(inner),
                ..
            } => inner.trace_id(),
            _ => None,
        }
    }

    /// Whether the server rejected the bearer token (`401` or `401xxx`).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { code, .. } if *code == 401 || (401_000..=401_999).contains(code))
    }

    /// Transport failures are the only ones worth retrying blindly.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SdkError::Api {
            code: 400000,
            message: "invalid credential".to_string(),
            trace_id: "trace-1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error: invalid credential (code: 400000, trace_id: trace-1)"
        );

        let err = SdkError::Configuration("apiKey is required".into());
        assert!(err.to_string().contains("apiKey is required"));
    }

    #[test]
    fn test_authentication_exposes_inner_code() {
        let inner = SdkError::Api {
            code: 400000,
            message: "invalid credential".into(),
            trace_id: "abc".into(),
        };
        let err = SdkError::authentication("credential exchange rejected", inner);

        assert_eq!(err.code(), Some(400000));
        assert_eq!(err.trace_id(), Some("abc"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_unauthorized_classification() {
        let api = |code| SdkError::Api {
            code,
            message: String::new(),
            trace_id: String::new(),
        };
        assert!(api(401).is_unauthorized());
        assert!(api(401001).is_unauthorized());
        assert!(!api(400000).is_unauthorized());
        assert!(!api(403000).is_unauthorized());
        assert!(!SdkError::Protocol("x".into()).is_unauthorized());
    }

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(!SdkError::Protocol("bad".into()).is_retryable());
        assert!(!SdkError::Configuration("bad".into()).is_retryable());
    }
}
