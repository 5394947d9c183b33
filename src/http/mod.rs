//! HTTP request pipeline.
//!
//! # Data Flow
//! ```text
//! resource service
//!     → request.rs (method, path, body, query)
//!     → client.rs (token from auth, headers, send with timeout)
//!     → response.rs (envelope decode, code check, data / page decode)
//!     → typed result or SdkError
//! ```
//!
//! # Design Decisions
//! - Envelope unwrapping and error classification live here only
//! - Stateless apart from the shared token manager
//! - No retries except one re-authentication after a rejected token

pub mod client;
pub mod request;
pub mod response;

pub use client::{build_http_client, ApiClient};
pub use request::{ApiRequest, QueryParams, RequestBody};
pub use response::{Envelope, Page, Pagination, SUCCESS_CODE};
