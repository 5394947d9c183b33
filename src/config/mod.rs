//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! named environment / custom URL / TOML file / MPC_* env vars
//!     → schema.rs (SdkConfig with defaults)
//!     → loader.rs (parse & deserialize, files only)
//!     → validation.rs (semantic checks)
//!     → MpcClient::new (rejects invalid config before any request)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once a client is built
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AuthConfig, Environment, SdkConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};
