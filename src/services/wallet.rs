//! Wallet endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SdkResult;
use crate::http::{ApiClient, ApiRequest, Page, QueryParams};
use crate::services::{null_as_default, require_data, require_id};

pub const WALLETS_PATH: &str = "/api/v1/wallets";

/// Lifecycle state of a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletStatus {
    Pending,
    Active,
    Frozen,
    Deleted,
    #[default]
    #[serde(other)]
    Unknown,
}

impl WalletStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletStatus::Pending => "PENDING",
            WalletStatus::Active => "ACTIVE",
            WalletStatus::Frozen => "FROZEN",
            WalletStatus::Deleted => "DELETED",
            WalletStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for WalletStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WalletStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(WalletStatus::Pending),
            "ACTIVE" => Ok(WalletStatus::Active),
            "FROZEN" => Ok(WalletStatus::Frozen),
            "DELETED" => Ok(WalletStatus::Deleted),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

/// Request to create a new MPC wallet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateWalletRequest {
    pub wallet_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ETH, TRX, BTC, ...
    pub chain: String,
    /// mainnet, testnet
    pub network: String,
}

/// An MPC wallet as stored by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wallet {
    #[serde(deserialize_with = "null_as_default")]
    pub wallet_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wallet_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chain: String,
    #[serde(deserialize_with = "null_as_default")]
    pub network: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wallet_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: WalletStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Filters for listing wallets.
#[derive(Debug, Clone, Default)]
pub struct ListWalletsRequest {
    pub status: Option<WalletStatus>,
    /// 0 means server default.
    pub page: u32,
    pub page_size: u32,
}

impl ListWalletsRequest {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .insert_opt("status", self.status.map(|s| s.as_str()))
            .insert_nonzero("page", self.page)
            .insert_nonzero("page_size", self.page_size);
        query
    }
}

#[derive(Debug, Clone)]
pub struct WalletService {
    api: ApiClient,
}

impl WalletService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create(&self, request: &CreateWalletRequest) -> SdkResult<Wallet> {
        let call = ApiRequest::post(WALLETS_PATH).json(request)?;
        let wallet: Wallet = require_data(self.api.execute(&call).await?, "create wallet")?;
        tracing::debug!(wallet_id = %wallet.wallet_id, "Wallet created");
        Ok(wallet)
    }

    pub async fn get(&self, wallet_id: &str) -> SdkResult<Wallet> {
        let call = ApiRequest::get(WALLETS_PATH).segment(require_id("wallet_id", wallet_id)?);
        require_data(self.api.execute(&call).await?, "get wallet")
    }

    pub async fn list(&self, request: &ListWalletsRequest) -> SdkResult<Page<Wallet>> {
        let call = ApiRequest::get(WALLETS_PATH).query(request.to_query());
        self.api.execute_page(&call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde() {
        let status: WalletStatus = serde_json::from_str("\"FROZEN\"").unwrap();
        assert_eq!(status, WalletStatus::Frozen);
        let status: WalletStatus = serde_json::from_str("\"ARCHIVED\"").unwrap();
        assert_eq!(status, WalletStatus::Unknown);
        assert_eq!(serde_json::to_string(&WalletStatus::Active).unwrap(), "\"ACTIVE\"");
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("frozen".parse::<WalletStatus>().unwrap(), WalletStatus::Frozen);
        assert!("unknown".parse::<WalletStatus>().is_err());
    }

    #[test]
    fn test_create_request_omits_missing_description() {
        let request = CreateWalletRequest {
            wallet_name: "Treasury".into(),
            chain: "ETH".into(),
            network: "testnet".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"wallet_name": "Treasury", "chain": "ETH", "network": "testnet"})
        );
    }

    #[test]
    fn test_wallet_tolerates_missing_fields() {
        let wallet: Wallet = serde_json::from_str(r#"{"wallet_id":"w-1","status":"ACTIVE"}"#).unwrap();
        assert_eq!(wallet.wallet_id, "w-1");
        assert_eq!(wallet.status, WalletStatus::Active);
        assert!(wallet.updated_at.is_none());
    }

    #[test]
    fn test_wallet_tolerates_null_fields() {
        let wallet: Wallet =
            serde_json::from_str(r#"{"wallet_id":"w-1","description":null,"wallet_type":null,"status":"ACTIVE"}"#)
                .unwrap();
        assert_eq!(wallet.description, "");
        assert_eq!(wallet.status, WalletStatus::Active);
    }

    #[test]
    fn test_list_query() {
        assert!(ListWalletsRequest::default().to_query().is_empty());

        let query = ListWalletsRequest {
            status: Some(WalletStatus::Pending),
            page: 2,
            page_size: 0,
        }
        .to_query();
        assert_eq!(query.get("status"), Some("PENDING"));
        assert_eq!(query.get("page"), Some("2"));
        assert_eq!(query.get("page_size"), None);
    }
}
