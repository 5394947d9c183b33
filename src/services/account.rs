//! Account (address) endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SdkResult;
use crate::http::{ApiClient, ApiRequest, Page, QueryParams};
use crate::services::{null_as_default, require_data, require_id};

pub const ACCOUNTS_PATH: &str = "/api/v1/accounts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Frozen,
    Deleted,
    #[default]
    #[serde(other)]
    Unknown,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Frozen => "FROZEN",
            AccountStatus::Deleted => "DELETED",
            AccountStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to derive a new account inside a wallet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub wallet_id: String,
    pub chain: String,
    pub network: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// EOA, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
}

/// An on-chain address derived from a wallet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    #[serde(deserialize_with = "null_as_default")]
    pub account_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wallet_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chain: String,
    #[serde(deserialize_with = "null_as_default")]
    pub network: String,
    #[serde(deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(deserialize_with = "null_as_default")]
    pub derivation_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address_index: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub status: AccountStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ListAccountsRequest {
    pub wallet_id: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl ListAccountsRequest {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .insert_opt("wallet_id", self.wallet_id.as_deref())
            .insert_nonzero("page", self.page)
            .insert_nonzero("page_size", self.page_size);
        query
    }
}

#[derive(Debug, Clone)]
pub struct AccountService {
    api: ApiClient,
}

impl AccountService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create(&self, request: &CreateAccountRequest) -> SdkResult<Account> {
        require_id("wallet_id", &request.wallet_id)?;
        let call = ApiRequest::post(ACCOUNTS_PATH).json(request)?;
        let account: Account = require_data(self.api.execute(&call).await?, "create account")?;
        tracing::debug!(account_id = %account.account_id, address = %account.address, "Account created");
        Ok(account)
    }

    pub async fn get(&self, account_id: &str) -> SdkResult<Account> {
        let call = ApiRequest::get(ACCOUNTS_PATH).segment(require_id("account_id", account_id)?);
        require_data(self.api.execute(&call).await?, "get account")
    }

    pub async fn list(&self, request: &ListAccountsRequest) -> SdkResult<Page<Account>> {
        let call = ApiRequest::get(ACCOUNTS_PATH).query(request.to_query());
        self.api.execute_page(&call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_decode() {
        let account: Account = serde_json::from_str(
            r#"{"account_id":"a-1","wallet_id":"w-1","address":"0xabc","address_index":3,"status":"FROZEN"}"#,
        )
        .unwrap();
        assert_eq!(account.address_index, 3);
        assert_eq!(account.status, AccountStatus::Frozen);
    }

    #[test]
    fn test_list_query() {
        let query = ListAccountsRequest {
            wallet_id: Some(String::new()),
            page: 0,
            page_size: 50,
        }
        .to_query();
        assert_eq!(query.get("wallet_id"), None);
        assert_eq!(query.get("page_size"), Some("50"));
        assert_eq!(query.len(), 1);
    }
}
