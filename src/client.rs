//! Client facade.
//!
//! # Responsibilities
//! - Validate credentials and configuration before anything touches the network
//! - Build the shared HTTP client, token manager and request pipeline
//! - Hand out the resource services

use std::sync::Arc;

use url::Url;

use crate::auth::{Credentials, TokenManager};
use crate::config::{validate_config, SdkConfig};
use crate::error::{SdkError, SdkResult};
use crate::http::{build_http_client, ApiClient};
use crate::services::{AccountService, AssetService, TransactionService, WalletService};

/// Entry point of the SDK.
///
/// Cheap to clone; clones share the connection pool and the cached token.
#[derive(Debug, Clone)]
pub struct MpcClient {
    config: Arc<SdkConfig>,
    api: ApiClient,
}

impl MpcClient {
    /// Create a client. Fails with [`SdkError::Configuration`] on an empty
    /// key or secret, or an invalid configuration.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>, config: SdkConfig) -> SdkResult<Self> {
        Self::with_credentials(Credentials::new(api_key, api_secret)?, config)
    }

    pub fn with_credentials(credentials: Credentials, config: SdkConfig) -> SdkResult<Self> {
        validate_config(&config).map_err(|errors| {
            let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
            SdkError::Configuration(joined.join(", "))
        })?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| SdkError::Configuration(format!("invalid base_url: {}", e)))?;
        let http = build_http_client(&config)?;
        let tokens = Arc::new(TokenManager::new(
            credentials,
            http.clone(),
            base_url.clone(),
            config.auth.clone(),
        ));
        let api = ApiClient::new(http, base_url, tokens, &config);

        tracing::debug!(base_url = %config.base_url, "MPC client created");
        Ok(Self {
            config: Arc::new(config),
            api,
        })
    }

    /// Credentials from `MPC_API_KEY` / `MPC_API_SECRET`, environment from
    /// `MPC_BASE_URL` / `MPC_ENVIRONMENT`.
    pub fn from_env() -> SdkResult<Self> {
        Self::with_credentials(Credentials::from_env()?, SdkConfig::from_env())
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// The underlying pipeline, for endpoints without a typed service.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn wallet(&self) -> WalletService {
        WalletService::new(self.api.clone())
    }

    pub fn account(&self) -> AccountService {
        AccountService::new(self.api.clone())
    }

    pub fn asset(&self) -> AssetService {
        AssetService::new(self.api.clone())
    }

    pub fn transaction(&self) -> TransactionService {
        TransactionService::new(self.api.clone())
    }

    /// Invalidate the bearer token on the gateway and forget it locally.
    pub async fn logout(&self) -> SdkResult<()> {
        self.api.token_manager().logout().await
    }
}
