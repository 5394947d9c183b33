//! Transaction endpoints.
//!
//! Transfers are requested here and signed, broadcast and tracked by the
//! gateway; the SDK never touches keys or the chain.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SdkResult;
use crate::http::{ApiClient, ApiRequest, Page, QueryParams};
use crate::services::{null_as_default, require_data, require_id};

pub const TRANSACTIONS_PATH: &str = "/api/v1/transactions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Confirming,
    Confirmed,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Confirming => "CONFIRMING",
            TransactionStatus::Confirmed => "CONFIRMED",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Unknown => "UNKNOWN",
        }
    }

    /// Confirmed and failed transactions do not change any more.
    pub fn is_final(&self) -> bool {
        matches!(self, TransactionStatus::Confirmed | TransactionStatus::Failed)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(TransactionStatus::Pending),
            "CONFIRMING" => Ok(TransactionStatus::Confirming),
            "CONFIRMED" => Ok(TransactionStatus::Confirmed),
            "FAILED" => Ok(TransactionStatus::Failed),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Send,
    Receive,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Request to send funds from an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub wallet_id: String,
    pub account_id: String,
    /// Omit for the chain's native coin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    pub to_address: String,
    /// Decimal string, in whole units of the asset.
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    #[serde(deserialize_with = "null_as_default")]
    pub tx_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wallet_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub from_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub to_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fee: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chain: String,
    #[serde(deserialize_with = "null_as_default")]
    pub network: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tx_hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub block_number: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub confirmations: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub status: TransactionStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub tx_type: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ListTransactionsRequest {
    pub wallet_id: Option<String>,
    pub account_id: Option<String>,
    pub status: Option<TransactionStatus>,
    pub page: u32,
    pub page_size: u32,
}

impl ListTransactionsRequest {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .insert_opt("wallet_id", self.wallet_id.as_deref())
            .insert_opt("account_id", self.account_id.as_deref())
            .insert_opt("status", self.status.map(|s| s.as_str()))
            .insert_nonzero("page", self.page)
            .insert_nonzero("page_size", self.page_size);
        query
    }
}

#[derive(Debug, Clone)]
pub struct TransactionService {
    api: ApiClient,
}

impl TransactionService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create(&self, request: &CreateTransactionRequest) -> SdkResult<Transaction> {
        require_id("wallet_id", &request.wallet_id)?;
        require_id("account_id", &request.account_id)?;
        let call = ApiRequest::post(TRANSACTIONS_PATH).json(request)?;
        let tx: Transaction = require_data(self.api.execute(&call).await?, "create transaction")?;
        tracing::info!(tx_id = %tx.tx_id, status = %tx.status, "Transaction submitted");
        Ok(tx)
    }

    pub async fn get(&self, tx_id: &str) -> SdkResult<Transaction> {
        let call = ApiRequest::get(TRANSACTIONS_PATH).segment(require_id("tx_id", tx_id)?);
        require_data(self.api.execute(&call).await?, "get transaction")
    }

    pub async fn list(&self, request: &ListTransactionsRequest) -> SdkResult<Page<Transaction>> {
        let call = ApiRequest::get(TRANSACTIONS_PATH).query(request.to_query());
        self.api.execute_page(&call).await
    }
}
