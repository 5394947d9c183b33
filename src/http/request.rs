//! Outgoing request description.
//!
//! An [`ApiRequest`] is built by a resource service and handed to the
//! pipeline. The body is a sum type, so "no body" can never be confused with
//! an empty JSON document.

use std::collections::BTreeMap;

use reqwest::Method;
use serde::Serialize;

use crate::error::{SdkError, SdkResult};

/// Request payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    /// Nothing is sent; no `Content-Type` header either.
    #[default]
    Empty,
    /// Serialized JSON document.
    Json(Vec<u8>),
}

impl RequestBody {
    pub fn json<B: Serialize + ?Sized>(body: &B) -> SdkResult<Self> {
        serde_json::to_vec(body)
            .map(RequestBody::Json)
            .map_err(|e| SdkError::Protocol(format!("failed to encode request body: {}", e)))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Empty)
    }
}

/// Query string parameters.
///
/// Empty values are never stored, and a key appears at most once: inserting
/// an existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key=value`, ignoring empty values.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        if !value.is_empty() {
            self.0.insert(key.into(), value);
        }
        self
    }

    /// Insert a numeric option; zero means unset.
    pub fn insert_nonzero(&mut self, key: impl Into<String>, value: u32) -> &mut Self {
        if value > 0 {
            self.0.insert(key.into(), value.to_string());
        }
        self
    }

    /// Insert an optional filter; `None` means unset.
    pub fn insert_opt<V: AsRef<str>>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value.as_ref());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// One call against the gateway: method, path, body and query.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    segments: Vec<String>,
    body: RequestBody,
    query: QueryParams,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            segments: Vec::new(),
            body: RequestBody::Empty,
            query: QueryParams::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Append one path segment (e.g. a resource id). It is percent-encoded
    /// when the URL is built, so ids containing `/` or `?` stay one segment.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> SdkResult<Self> {
        self.body = RequestBody::json(body)?;
        Ok(self)
    }

    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query
    }
}
