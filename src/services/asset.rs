//! Asset (token balance) endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SdkResult;
use crate::http::{ApiClient, ApiRequest, Page, QueryParams};
use crate::services::{null_as_default, require_data, require_id};

pub const ASSETS_PATH: &str = "/api/v1/assets";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetStatus {
    Active,
    Inactive,
    #[default]
    #[serde(other)]
    Unknown,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Active => "ACTIVE",
            AssetStatus::Inactive => "INACTIVE",
            AssetStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to track a token on an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAssetRequest {
    pub account_id: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Asset {
    #[serde(deserialize_with = "null_as_default")]
    pub asset_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wallet_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub account_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub symbol: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub asset_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub contract_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub decimals: u32,
    /// Decimal string in the asset's smallest unit scaled by `decimals`.
    #[serde(deserialize_with = "null_as_default")]
    pub balance: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: AssetStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ListAssetsRequest {
    pub wallet_id: Option<String>,
    pub account_id: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl ListAssetsRequest {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .insert_opt("wallet_id", self.wallet_id.as_deref())
            .insert_opt("account_id", self.account_id.as_deref())
            .insert_nonzero("page", self.page)
            .insert_nonzero("page_size", self.page_size);
        query
    }
}

#[derive(Debug, Clone)]
pub struct AssetService {
    api: ApiClient,
}

impl AssetService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create(&self, request: &CreateAssetRequest) -> SdkResult<Asset> {
        require_id("account_id", &request.account_id)?;
        let call = ApiRequest::post(ASSETS_PATH).json(request)?;
        require_data(self.api.execute(&call).await?, "create asset")
    }

    pub async fn get(&self, asset_id: &str) -> SdkResult<Asset> {
        let call = ApiRequest::get(ASSETS_PATH).segment(require_id("asset_id", asset_id)?);
        require_data(self.api.execute(&call).await?, "get asset")
    }

    pub async fn list(&self, request: &ListAssetsRequest) -> SdkResult<Page<Asset>> {
        let call = ApiRequest::get(ASSETS_PATH).query(request.to_query());
        self.api.execute_page(&call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_filters() {
        let query = ListAssetsRequest {
            wallet_id: Some("w-1".into()),
            account_id: Some("a-1".into()),
            page: 1,
            page_size: 20,
        }
        .to_query();
        let pairs: Vec<_> = query.iter().collect();
        assert_eq!(
            pairs,
            vec![("account_id", "a-1"), ("page", "1"), ("page_size", "20"), ("wallet_id", "w-1")]
        );
    }
}
