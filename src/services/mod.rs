//! Resource services.
//!
//! # Data Flow
//! ```text
//! caller request struct (CreateXRequest / ListXRequest / id)
//!     → service builds ApiRequest (path, JSON body or query params)
//!     → http::ApiClient executes it
//!     → typed entity or Page<entity>
//! ```
//!
//! # Design Decisions
//! - Services hold no state beyond a clone of the shared ApiClient
//! - List options are sent only when set: empty strings, `None` and zero
//!   page numbers are omitted
//! - Create/Get treat a success envelope without `data` as a protocol error

pub mod account;
pub mod asset;
pub mod transaction;
pub mod wallet;

pub use account::{Account, AccountService, AccountStatus, CreateAccountRequest, ListAccountsRequest};
pub use asset::{Asset, AssetService, AssetStatus, CreateAssetRequest, ListAssetsRequest};
pub use transaction::{
    CreateTransactionRequest, ListTransactionsRequest, Transaction, TransactionService,
    TransactionStatus, TransactionType,
};
pub use wallet::{CreateWalletRequest, ListWalletsRequest, Wallet, WalletService, WalletStatus};

use crate::error::{SdkError, SdkResult};
pub(crate) use crate::http::response::null_as_default;

/// Reject empty identifiers before they turn into a listing URL.
pub(crate) fn require_id<'a>(name: &str, id: &'a str) -> SdkResult<&'a str> {
    if id.trim().is_empty() {
        Err(SdkError::Configuration(format!("{} is required", name)))
    } else {
        Ok(id)
    }
}

pub(crate) fn require_data<T>(data: Option<T>, operation: &str) -> SdkResult<T> {
    data.ok_or_else(|| SdkError::Protocol(format!("{}: response carried no data", operation)))
}
