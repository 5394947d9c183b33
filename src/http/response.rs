//! Response envelope and page decoding.
//!
//! Every gateway response is wrapped in the same envelope:
//!
//! ```json
//! { "code": 200000, "message": "success", "trace_id": "...", "timestamp": 0,
//!   "data": { ... }, "page": 1, "page_size": 20, "total": 42 }
//! ```
//!
//! The pagination fields are optional and decoded separately from the rest of
//! the envelope.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{SdkError, SdkResult};

/// The single envelope code meaning success.
pub const SUCCESS_CODE: i64 = 200_000;

/// Decoded response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trace_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: i64,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(skip)]
    pub pagination: Option<Pagination>,
}

/// Read an explicit `null` as the field's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Pagination fields as they appear at the top level of the envelope.
#[derive(Debug, Default, Deserialize)]
struct EnvelopePagination {
    page: Option<u32>,
    page_size: Option<u32>,
    total: Option<u64>,
}

impl Envelope {
    /// Decode an envelope from a raw response body.
    pub fn from_slice(body: &[u8]) -> SdkResult<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| SdkError::Protocol(format!("response is not valid JSON: {}", e)))?;
        if !value.is_object() {
            return Err(SdkError::Protocol("response is not a JSON object".to_string()));
        }

        let mut envelope = Envelope::deserialize(&value)
            .map_err(|e| SdkError::Protocol(format!("failed to decode response envelope: {}", e)))?;

        let fields = EnvelopePagination::deserialize(&value).unwrap_or_default();
        envelope.pagination = Pagination::from_parts(fields.page, fields.page_size, fields.total, None);

        Ok(envelope)
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Turn a non-success envelope into an [`SdkError::Api`].
    pub fn ensure_success(self) -> SdkResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(SdkError::Api {
                code: self.code,
                message: self.message,
                trace_id: self.trace_id,
            })
        }
    }

    /// Decode the payload, if any. `null` counts as absent.
    pub fn decode_data<T: DeserializeOwned>(&self) -> SdkResult<Option<T>> {
        match &self.data {
            None | Some(Value::Null) => Ok(None),
            Some(data) => decode_value(data).map(Some),
        }
    }
}

pub(crate) fn decode_value<T: DeserializeOwned>(data: &Value) -> SdkResult<T> {
    T::deserialize(data)
        .map_err(|e| SdkError::Protocol(format!("failed to decode response data: {}", e)))
}

/// Position of a page within a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// Build from whichever fields the server sent; `None` if it sent none.
    /// A missing page count is derived from the total and the page size.
    pub fn from_parts(
        page: Option<u32>,
        page_size: Option<u32>,
        total_count: Option<u64>,
        total_pages: Option<u32>,
    ) -> Option<Self> {
        if page.is_none() && page_size.is_none() && total_count.is_none() && total_pages.is_none() {
            return None;
        }
        let page_size = page_size.unwrap_or(0);
        let total_count = total_count.unwrap_or(0);
        let total_pages = total_pages.unwrap_or_else(|| {
            if page_size > 0 {
                u32::try_from(total_count.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
            } else {
                0
            }
        });
        Some(Self {
            page: page.unwrap_or(0),
            page_size,
            total_count,
            total_pages,
        })
    }
}

/// One page of a listing call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

/// The two listing shapes the gateway uses for `data`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListPayload<T> {
    Bare(Vec<T>),
    Wrapped(WrappedList<T>),
}

#[derive(Deserialize)]
struct WrappedList<T> {
    items: Vec<T>,
    page: Option<u32>,
    page_size: Option<u32>,
    #[serde(alias = "total")]
    total_count: Option<u64>,
    total_pages: Option<u32>,
}

impl<T: DeserializeOwned> Page<T> {
    /// Assemble a page from a success envelope.
    ///
    /// Pagination inside `data` takes precedence over the envelope's own.
    pub fn from_envelope(envelope: &Envelope) -> SdkResult<Self> {
        let payload = match &envelope.data {
            None | Some(Value::Null) => None,
            Some(data) => Some(
                ListPayload::<T>::deserialize(data)
                    .map_err(|e| SdkError::Protocol(format!("failed to decode list data: {}", e)))?,
            ),
        };

        Ok(match payload {
            None => Page {
                items: Vec::new(),
                pagination: envelope.pagination,
            },
            Some(ListPayload::Bare(items)) => Page {
                items,
                pagination: envelope.pagination,
            },
            Some(ListPayload::Wrapped(list)) => Page {
                pagination: Pagination::from_parts(list.page, list.page_size, list.total_count, list.total_pages)
                    .or(envelope.pagination),
                items: list.items,
            },
        })
    }
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the server reports pages after this one.
    pub fn has_more(&self) -> bool {
        self.pagination
            .map(|p| p.page > 0 && p.page < p.total_pages)
            .unwrap_or(false)
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
