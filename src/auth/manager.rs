//! Bearer token lifecycle.
//!
//! # States
//! - Unauthenticated: no token cached
//! - Authenticated: a token is cached and handed to every request
//!
//! # State Transitions
//! ```text
//! Unauthenticated → Authenticated: token() performs the credential exchange
//! Authenticated → Unauthenticated: logout() confirmed by the gateway
//! Authenticated → Unauthenticated: invalidate() after the gateway rejects the token
//! Authenticated → Authenticated: token() finds the cached token stale and exchanges again
//! ```
//!
//! # Design Decisions
//! - The cache is a tokio mutex held across the exchange, so concurrent callers
//!   share one exchange instead of racing
//! - logout clears the cache only after the gateway confirms; a failed logout
//!   leaves the caller authenticated
//! - No background refresh; staleness is checked when a token is requested

use std::time::Duration;

use reqwest::Client;
use tokio::sync::Mutex;
use url::Url;
use uuid::Uuid;

use crate::auth::credentials::Credentials;
use crate::auth::token::{Token, TokenGrant};
use crate::config::AuthConfig;
use crate::error::{SdkError, SdkResult};
use crate::http::client::{endpoint_url, send_envelope, REQUEST_ID_HEADER};
use crate::http::response::Envelope;
use crate::observability::metrics;

/// Exchanges credentials for a bearer token and caches it.
pub struct TokenManager {
    credentials: Credentials,
    http: Client,
    base_url: Url,
    config: AuthConfig,
    cached: Mutex<Option<Token>>,
}

impl TokenManager {
    pub fn new(credentials: Credentials, http: Client, base_url: Url, config: AuthConfig) -> Self {
        Self {
            credentials,
            http,
            base_url,
            config,
            cached: Mutex::new(None),
        }
    }

    /// Return the cached token, authenticating first if there is none or it
    /// has gone stale.
    pub async fn token(&self) -> SdkResult<Token> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if !token.is_stale(self.skew()) {
                return Ok(token.clone());
            }
            tracing::debug!("Cached bearer token is stale");
            *cached = None;
        }

        let token = self.exchange().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    /// Invalidate the token server-side, then drop it locally.
    ///
    /// A no-op when nothing is cached. On failure the cached token is kept.
    pub async fn logout(&self) -> SdkResult<()> {
        let mut cached = self.cached.lock().await;
        let Some(token) = cached.as_ref() else {
            tracing::debug!("Logout requested without a cached token");
            return Ok(());
        };

        let url = endpoint_url(&self.base_url, &self.config.logout_path, &[], None)?;
        let builder = self
            .http
            .post(url)
            .bearer_auth(token.as_str())
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string());

        send_envelope(builder)
            .await
            .and_then(Envelope::ensure_success)
            .map_err(|e| {
                tracing::warn!(error = %e, "Logout failed, keeping cached token");
                SdkError::authentication("logout failed", e)
            })?;

        *cached = None;
        tracing::info!(api_key = self.credentials.api_key(), "Logged out");
        Ok(())
    }

    /// Drop the cached token if it is still `rejected`.
    ///
    /// Returns whether anything was dropped. A token refreshed by another task
    /// in the meantime is left alone.
    pub async fn invalidate(&self, rejected: &Token) -> bool {
        let mut cached = self.cached.lock().await;
        if cached.as_ref() == Some(rejected) {
            *cached = None;
            true
        } else {
            false
        }
    }

    /// Whether a usable token is cached right now.
    pub async fn is_authenticated(&self) -> bool {
        self.cached
            .lock()
            .await
            .as_ref()
            .is_some_and(|token| !token.is_stale(self.skew()))
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn skew(&self) -> Duration {
        Duration::from_secs(self.config.expiry_skew_secs)
    }

    async fn exchange(&self) -> SdkResult<Token> {
        let result = self.request_token().await;
        metrics::record_token_exchange(metrics::outcome_label(&result));

        match result {
            Ok(token) => {
                tracing::info!(
                    api_key = self.credentials.api_key(),
                    expires = token.expires_at().is_some(),
                    "Obtained bearer token"
                );
                Ok(token)
            }
            Err(e) => {
                tracing::warn!(api_key = self.credentials.api_key(), error = %e, "Credential exchange failed");
                Err(SdkError::authentication("credential exchange failed", e))
            }
        }
    }

    async fn request_token(&self) -> SdkResult<Token> {
        let url = endpoint_url(&self.base_url, &self.config.token_path, &[], None)?;
        let builder = self
            .http
            .post(url)
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string())
            .json(&self.credentials);

        let grant: TokenGrant = send_envelope(builder)
            .await?
            .ensure_success()?
            .decode_data()?
            .ok_or_else(|| SdkError::Protocol("credential exchange returned no token".to_string()))?;

        if grant.token.is_empty() {
            return Err(SdkError::Protocol("credential exchange returned an empty token".to_string()));
        }
        Ok(grant.into_token())
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("api_key", &self.credentials.api_key())
            .field("base_url", &self.base_url.as_str())
            .field("token_path", &self.config.token_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(base: &str) -> TokenManager {
        TokenManager::new(
            Credentials::new("key", "secret").unwrap(),
            Client::new(),
            Url::parse(base).unwrap(),
            AuthConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_logout_without_token_is_noop() {
        // Port 9 (discard) is never contacted because nothing is cached.
        let tokens = manager("http://127.0.0.1:9");
        assert!(tokens.logout().await.is_ok());
        assert!(!tokens.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_unreachable_exchange_is_authentication_error() {
        let tokens = manager("http://127.0.0.1:1");
        let err = tokens.token().await.unwrap_err();
        match &err {
            SdkError::Authentication { source: Some(inner), .. } => {
                assert!(matches!(**inner, SdkError::Transport(_)));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!tokens.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_invalidate_only_matching_token() {
        let tokens = manager("http://127.0.0.1:1");
        let current = Token::new("current", None);
        *tokens.cached.lock().await = Some(current.clone());

        assert!(!tokens.invalidate(&Token::new("older", None)).await);
        assert!(tokens.is_authenticated().await);

        assert!(tokens.invalidate(&current).await);
        assert!(!tokens.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_cached_token_is_reused_without_network() {
        let tokens = manager("http://127.0.0.1:1");
        *tokens.cached.lock().await = Some(Token::new("cached", Some(Duration::from_secs(3600))));

        let token = tokens.token().await.unwrap();
        assert_eq!(token.as_str(), "cached");
    }
}
