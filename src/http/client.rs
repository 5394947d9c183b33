//! Authenticated request pipeline.
//!
//! # Responsibilities
//! - Build the URL (base + path + encoded segments + non-empty query params)
//! - Attach the bearer token, request id and content type
//! - Send with the configured timeout and read the full body
//! - Decode the envelope and classify failures into [`SdkError`] kinds
//! - Re-authenticate and retry once when the gateway rejects the token

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;
use uuid::Uuid;

use crate::auth::{Token, TokenManager};
use crate::config::SdkConfig;
use crate::error::{SdkError, SdkResult};
use crate::http::request::{ApiRequest, QueryParams, RequestBody};
use crate::http::response::{Envelope, Page};
use crate::observability::metrics;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Build the shared reqwest client from configuration.
pub fn build_http_client(config: &SdkConfig) -> SdkResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeouts.request_secs))
        .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
        .user_agent(config.user_agent())
        .build()
        .map_err(|e| SdkError::Configuration(format!("failed to build HTTP client: {}", e)))
}

/// Join the base URL with a path, extra segments and a query string.
pub(crate) fn endpoint_url(
    base: &Url,
    path: &str,
    segments: &[String],
    query: Option<&QueryParams>,
) -> SdkResult<Url> {
    let joined = format!("{}{}", base.as_str().trim_end_matches('/'), path);
    let mut url = Url::parse(&joined)
        .map_err(|e| SdkError::Configuration(format!("invalid request URL '{}': {}", joined, e)))?;

    if !segments.is_empty() {
        url.path_segments_mut()
            .map_err(|_| SdkError::Configuration(format!("base URL '{}' cannot carry a path", base)))?
            .pop_if_empty()
            .extend(segments);
    }

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.query_pairs_mut().extend_pairs(query.iter());
    }

    Ok(url)
}

/// Send a prepared request and decode the envelope, without judging its code.
pub(crate) async fn send_envelope(builder: RequestBuilder) -> SdkResult<Envelope> {
    let response = builder.send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    Envelope::from_slice(&body).map_err(|e| match e {
        SdkError::Protocol(msg) if !status.is_success() => {
            SdkError::Protocol(format!("HTTP {}: {}", status, msg))
        }
        other => other,
    })
}

/// HTTP client for the gateway's resource endpoints.
///
/// Cheap to clone; all clones share one connection pool and one token cache.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    tokens: Arc<TokenManager>,
    reauth_on_unauthorized: bool,
}

impl ApiClient {
    pub fn new(http: Client, base_url: Url, tokens: Arc<TokenManager>, config: &SdkConfig) -> Self {
        Self {
            http,
            base_url,
            tokens,
            reauth_on_unauthorized: config.auth.reauth_on_unauthorized,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token_manager(&self) -> &TokenManager {
        &self.tokens
    }

    /// Perform one call and decode the envelope's `data` into `T`.
    ///
    /// Returns `Ok(None)` when the call succeeded without a payload.
    pub async fn execute<T: DeserializeOwned>(&self, request: &ApiRequest) -> SdkResult<Option<T>> {
        self.send(request).await?.decode_data()
    }

    /// Perform one listing call.
    pub async fn execute_page<T: DeserializeOwned>(&self, request: &ApiRequest) -> SdkResult<Page<T>> {
        let envelope = self.send(request).await?;
        Page::from_envelope(&envelope)
    }

    async fn send(&self, request: &ApiRequest) -> SdkResult<Envelope> {
        let started = Instant::now();
        let result = self.send_with_reauth(request).await;
        metrics::record_request(request.method().as_str(), metrics::outcome_label(&result), started.elapsed());
        result
    }

    async fn send_with_reauth(&self, request: &ApiRequest) -> SdkResult<Envelope> {
        let token = self.tokens.token().await?;

        match self.send_once(request, &token).await {
            Err(err) if err.is_unauthorized() && self.reauth_on_unauthorized => {
                tracing::info!(
                    method = %request.method(),
                    path = request.path(),
                    trace_id = err.trace_id().unwrap_or_default(),
                    "Bearer token rejected, re-authenticating"
                );
                metrics::record_reauthentication();
                self.tokens.invalidate(&token).await;

                let token = self.tokens.token().await?;
                self.send_once(request, &token).await
            }
            other => other,
        }
    }

    async fn send_once(&self, request: &ApiRequest, token: &Token) -> SdkResult<Envelope> {
        let url = endpoint_url(&self.base_url, request.path(), request.segments(), Some(request.query_params()))?;
        let request_id = Uuid::new_v4().to_string();
        let started = Instant::now();

        let mut builder = self
            .http
            .request(request.method().clone(), url)
            .bearer_auth(token.as_str())
            .header(REQUEST_ID_HEADER, &request_id);
        if let RequestBody::Json(bytes) = request.body() {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(bytes.clone());
        }

        let result = send_envelope(builder).await.and_then(Envelope::ensure_success);

        match &result {
            Ok(envelope) => tracing::debug!(
                method = %request.method(),
                path = request.path(),
                request_id = %request_id,
                trace_id = %envelope.trace_id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Request completed"
            ),
            Err(SdkError::Api { code, message, trace_id }) => tracing::warn!(
                method = %request.method(),
                path = request.path(),
                request_id = %request_id,
                code = *code,
                trace_id = %trace_id,
                message = %message,
                "Gateway returned an error"
            ),
            Err(e) => tracing::warn!(
                method = %request.method(),
                path = request.path(),
                request_id = %request_id,
                error = %e,
                "Request failed"
            ),
        }

        result
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("reauth_on_unauthorized", &self.reauth_on_unauthorized)
            .finish()
    }
}
