//! Bearer token value.

use serde::Deserialize;
use std::time::{Duration, Instant};

/// A bearer token with an optional expiry.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    value: String,
    lifetime: Option<Duration>,
    expires_at: Option<Instant>,
}

impl Token {
    pub fn new(value: impl Into<String>, lifetime: Option<Duration>) -> Self {
        Self {
            value: value.into(),
            lifetime,
            expires_at: lifetime.map(|ttl| Instant::now() + ttl),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Whether the token expires within `skew` from now.
    ///
    /// The skew is capped at half the token's lifetime, so a short-lived
    /// token is still reused for the first half of its life. Tokens without a
    /// known expiry never go stale locally; the gateway rejecting them is the
    /// only signal.
    pub fn is_stale(&self, skew: Duration) -> bool {
        match (self.expires_at, self.lifetime) {
            (Some(at), Some(lifetime)) => Instant::now() + skew.min(lifetime / 2) >= at,
            _ => false,
        }
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// `data` payload of a successful credential exchange.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenGrant {
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl TokenGrant {
    pub fn into_token(self) -> Token {
        Token::new(self.token, self.expires_in.map(Duration::from_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staleness() {
        let forever = Token::new("a", None);
        assert!(!forever.is_stale(Duration::from_secs(3600)));

        let long = Token::new("b", Some(Duration::from_secs(3600)));
        assert!(!long.is_stale(Duration::from_secs(30)));
        assert!(long.is_stale(Duration::from_secs(3600)));

        let expired = Token::new("c", Some(Duration::ZERO));
        assert!(expired.is_stale(Duration::from_secs(30)));
    }

    #[test]
    fn test_short_lifetime_caps_skew() {
        // 25 s lifetime against a 30 s skew: usable for the first 12.5 s.
        let short = Token::new("d", Some(Duration::from_secs(25)));
        assert!(!short.is_stale(Duration::from_secs(30)));
        assert!(!short.is_stale(Duration::from_secs(3600)));
    }

    #[test]
    fn test_debug_redacts_value() {
        let token = Token::new("eyJhbGciOi", None);
        assert!(!format!("{:?}", token).contains("eyJhbGciOi"));
    }

    #[test]
    fn test_grant_aliases() {
        let grant: TokenGrant = serde_json::from_str(r#"{"access_token":"t","expires_in":60}"#).unwrap();
        assert_eq!(grant.token, "t");
        let token = grant.into_token();
        assert!(token.expires_at().is_some());

        let grant: TokenGrant = serde_json::from_str(r#"{"token":"u"}"#).unwrap();
        assert!(grant.into_token().expires_at().is_none());
    }
}
