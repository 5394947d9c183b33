//! Rust client for the MPC wallet gateway.
//!
//! Typed request/response structures and thin services for wallets,
//! accounts, assets and transactions, over one authenticated request
//! pipeline. Signing and custody happen on the gateway.
//!
//! ```no_run
//! use mpc_sdk::{MpcClient, SdkConfig};
//! use mpc_sdk::services::CreateWalletRequest;
//!
//! # async fn run() -> Result<(), mpc_sdk::SdkError> {
//! let client = MpcClient::new("api-key", "api-secret", SdkConfig::sandbox())?;
//! let wallet = client
//!     .wallet()
//!     .create(&CreateWalletRequest {
//!         wallet_name: "Treasury".into(),
//!         chain: "ETH".into(),
//!         network: "testnet".into(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{}", wallet.wallet_id);
//! client.logout().await?;
//! # Ok(())
//! # }
//! ```

// Core pipeline
pub mod auth;
pub mod http;

// Resource endpoints
pub mod services;

// Cross-cutting concerns
pub mod config;
pub mod error;
pub mod observability;

pub mod client;

pub use client::MpcClient;
pub use config::{Environment, SdkConfig};
pub use error::{SdkError, SdkResult};
pub use http::{Page, Pagination};
