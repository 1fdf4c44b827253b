use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;
use std::sync::Arc;

use crate::status::StatusCode;

/// Maximum inline headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 8;

/// Header storage for responses. Names are `Arc<str>` so static names clone cheaply.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Final output of a dispatch: a formatted result or a normalized fault.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub status: StatusCode,
    #[serde(skip_serializing)]
    pub headers: HeaderVec,
    pub body: Value,
}

impl Response {
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderVec, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a JSON response with default headers
    #[must_use]
    pub fn json(status: StatusCode, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create an error response
    #[must_use]
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get a header by name
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or replace a header
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }

    /// Message of an error response built by [`Response::error`].
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}
