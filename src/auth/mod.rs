//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Credentials (API key + secret, validated at construction)
//!     → manager.rs: POST {token_path} with the credentials
//!     → token.rs: Token cached in memory (never persisted)
//!     → http::client attaches `Authorization: Bearer <token>`
//!
//! On logout:
//!     manager.rs: POST {logout_path} with the bearer token
//!     → cache cleared once the gateway confirms
//! ```

pub mod credentials;
pub mod manager;
pub mod token;

pub use credentials::Credentials;
pub use manager::TokenManager;
pub use token::Token;
