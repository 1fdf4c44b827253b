//! Failure taxonomy for the dispatch pipeline.
//!
//! Every variant carries a numeric code (see [`DispatchError::code`]). The
//! code is a *suggestion*: [`StatusNormalizer`](crate::status::StatusNormalizer)
//! clamps it into the recognized HTTP status set before it reaches a
//! response.

use std::fmt;

use thiserror::Error;

use crate::status::StatusCode;

/// Severity reported alongside a runtime error.
///
/// Informational only. It never changes the resulting status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Notice,
    Warning,
    Error,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Notice => "notice",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        };
        write!(f, "{s}")
    }
}

/// A runtime failure raised by a controller, formatter or the pipeline itself.
///
/// `code` is whatever the raiser asked for; it is not validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub code: i64,
    pub message: String,
    pub severity: Option<Severity>,
    /// Source location (`file`, `line`) when known.
    pub location: Option<(String, u32)>,
}

impl Fault {
    #[must_use]
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            severity: None,
            location: None,
        }
    }

    /// Status the normalizer assigned to this fault.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        crate::status::StatusNormalizer::status(self.code)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Fault {}

/// Errors surfaced by request normalization, resolution and dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The method is outside DELETE, GET, HEAD, OPTIONS, POST, PUT.
    #[error("Unsupported method {method}")]
    UnsupportedMethod { method: String },

    /// Neither declared routes nor convention fallback matched.
    #[error("Unknown route requested")]
    NoRoute,

    /// The negotiated format has no formatter.
    #[error("Unsupported format requested")]
    UnsupportedFormat { format: Option<String> },

    /// The handler names a controller nobody registered.
    #[error("Unknown controller {name}")]
    UnknownController { name: String },

    /// The router kept rewriting the request.
    #[error("Request rewritten more than {limit} times")]
    InspectionLimit { limit: usize },

    #[error(transparent)]
    Fault(#[from] Fault),
}

impl DispatchError {
    /// Numeric code carried by the error, before normalization.
    #[must_use]
    pub fn code(&self) -> i64 {
        match self {
            DispatchError::UnsupportedMethod { .. } => 501,
            DispatchError::NoRoute => 404,
            DispatchError::UnsupportedFormat { .. } => 415,
            DispatchError::UnknownController { .. } => 404,
            DispatchError::InspectionLimit { .. } => 508,
            DispatchError::Fault(fault) => fault.code,
        }
    }

    /// Shorthand for raising a [`Fault`] from controller code.
    #[must_use]
    pub fn fault(code: i64, message: impl Into<String>) -> Self {
        DispatchError::Fault(Fault::new(code, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_taxonomy() {
        assert_eq!(DispatchError::NoRoute.to_string(), "Unknown route requested");
        assert_eq!(
            DispatchError::UnsupportedFormat { format: None }.to_string(),
            "Unsupported format requested"
        );
        assert_eq!(
            DispatchError::UnsupportedMethod {
                method: "PATCH".into()
            }
            .to_string(),
            "Unsupported method PATCH"
        );
    }

    #[test]
    fn test_fault_code_passes_through() {
        let err = DispatchError::fault(418, "teapot");
        assert_eq!(err.code(), 418);
        assert_eq!(err.to_string(), "teapot");
    }
}
