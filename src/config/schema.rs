//! Configuration schema definitions.
//!
//! All types derive Serde traits so a configuration can be read from a TOML
//! file as well as built in code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sandbox gateway.
pub const SANDBOX_BASE_URL: &str = "https://mpcgwapi-sandbox.reefiy.dev";

/// Production gateway.
pub const PRODUCTION_BASE_URL: &str = "https://mpcgwapi.reefiy.com";

/// Environment variable selecting a named environment or URL.
pub const ENVIRONMENT_ENV_VAR: &str = "MPC_ENVIRONMENT";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV_VAR: &str = "MPC_BASE_URL";

/// Named gateway environments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Sandbox,
    Production,
    Custom(String),
}

impl Environment {
    /// `sandbox` and `production` (case-insensitive) name the hosted
    /// gateways; anything else is taken as a custom base URL.
    pub fn from_name(name: &str) -> Self {
        let trimmed = name.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "sandbox" => Environment::Sandbox,
            "production" | "prod" => Environment::Production,
            _ => Environment::Custom(trimmed.to_string()),
        }
    }

    pub fn base_url(&self) -> &str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
            Environment::Custom(url) => url,
        }
    }
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
            Environment::Custom(url) => write!(f, "{}", url),
        }
    }
}

/// Root configuration for the SDK client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SdkConfig {
    /// Gateway base URL, without a trailing path (e.g. "https://mpcgwapi.reefiy.com").
    pub base_url: String,

    /// Overrides the default `mpc-sdk-rust/<version>` user agent.
    pub user_agent: Option<String>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Credential exchange settings.
    pub auth: AuthConfig,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self::sandbox()
    }
}

impl SdkConfig {
    /// Configuration for the sandbox environment.
    pub fn sandbox() -> Self {
        Self::for_environment(Environment::Sandbox)
    }

    /// Configuration for the production environment.
    pub fn production() -> Self {
        Self::for_environment(Environment::Production)
    }

    /// Configuration for a custom base URL.
    pub fn custom(base_url: impl Into<String>) -> Self {
        Self::for_environment(Environment::Custom(base_url.into()))
    }

    pub fn for_environment(environment: Environment) -> Self {
        Self {
            base_url: environment.base_url().to_string(),
            user_agent: None,
            timeouts: TimeoutConfig::default(),
            auth: AuthConfig::default(),
        }
    }

    /// Build a configuration from `MPC_BASE_URL` or `MPC_ENVIRONMENT`,
    /// falling back to sandbox. The explicit base URL wins.
    pub fn from_env() -> Self {
        if let Ok(url) = std::env::var(BASE_URL_ENV_VAR) {
            if !url.trim().is_empty() {
                return Self::custom(url.trim());
            }
        }
        match std::env::var(ENVIRONMENT_ENV_VAR) {
            Ok(name) if !name.trim().is_empty() => {
                Self::for_environment(Environment::from_name(&name))
            }
            _ => Self::sandbox(),
        }
    }

    /// User agent sent with every request.
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("mpc-sdk-rust/{}", env!("CARGO_PKG_VERSION")))
    }
}

/// Timeout configuration in seconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time for one request/response exchange.
    pub request_secs: u64,

    /// Connection establishment timeout.
    pub connect_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            connect_secs: 10,
        }
    }
}

/// Credential exchange configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Path exchanging API key + secret for a bearer token.
    pub token_path: String,

    /// Path invalidating the current bearer token.
    pub logout_path: String,

    /// A token with a known expiry is treated as stale this many seconds early.
    pub expiry_skew_secs: u64,

    /// Re-authenticate and retry once when the gateway rejects the token.
    pub reauth_on_unauthorized: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_path: "/api/v1/auth/token".to_string(),
            logout_path: "/api/v1/auth/logout".to_string(),
            expiry_skew_secs: 30,
            reauth_on_unauthorized: true,
        }
    }
}
