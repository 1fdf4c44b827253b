//! # Formatter Module
//!
//! Turns a controller's return value into a [`Response`]. The coordinator
//! asks [`Formatter::supports`] about the negotiated format before binding
//! the handler, and calls [`Formatter::transform`] with the result.
//!
//! [`JsonFormatter`] is the bundled implementation. Domain objects that need
//! a custom wire shape implement [`Decorable`] and go through
//! [`JsonDecorator`].

mod decorator;

pub use decorator::{Decorable, JsonDecorator};

use serde_json::Value;
use std::sync::Arc;

use crate::error::DispatchError;
use crate::response::Response;
use crate::status::StatusCode;

/// Response formatter capability.
pub trait Formatter: Send + Sync {
    /// Whether this formatter renders `format` (an extension, format name or MIME type).
    fn supports(&self, format: &str) -> bool;

    /// # Errors
    ///
    /// Fails when the result cannot be rendered.
    fn transform(&self, result: Option<Value>) -> Result<Response, DispatchError>;
}

/// Formats accepted by [`JsonFormatter`].
pub const JSON_FORMATS: &[&str] = &[
    "json",
    "application/json",
    "text/json",
    "*/*",
    "application/*",
    "cli",
];

/// Renders results as JSON. An empty result becomes `204 No Content`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    #[must_use]
    pub fn shared() -> Arc<dyn Formatter> {
        Arc::new(JsonFormatter)
    }
}

impl Formatter for JsonFormatter {
    fn supports(&self, format: &str) -> bool {
        JSON_FORMATS
            .iter()
            .any(|f| f.eq_ignore_ascii_case(format.trim()))
    }

    fn transform(&self, result: Option<Value>) -> Result<Response, DispatchError> {
        Ok(match result {
            Some(body) => Response::json(StatusCode::OK, body),
            None => Response::json(StatusCode::NO_CONTENT, Value::Null),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_supported_formats() {
        let f = JsonFormatter;
        assert!(f.supports("json"));
        assert!(f.supports("Application/JSON"));
        assert!(f.supports("cli"));
        assert!(!f.supports("xml"));
        assert!(!f.supports("text/html"));
    }

    #[test]
    fn test_empty_result_is_no_content() {
        let res = JsonFormatter.transform(None).unwrap();
        assert_eq!(res.status_code(), 204);
        let res = JsonFormatter.transform(Some(json!({"id": 1}))).unwrap();
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.get_header("content-type"), Some("application/json"));
    }
}
