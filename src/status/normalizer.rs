use std::sync::{Arc, Mutex};

use tracing::{error, warn};

use super::core::StatusCode;
use crate::error::{DispatchError, Fault, Severity};
use crate::response::Response;

/// Destination for normalized fault responses when they are not return-only.
pub trait ResponseSink: Send + Sync {
    fn emit(&self, response: &Response);
}

/// Converts failures into responses with a valid status code.
///
/// Holds at most one recorded fatal fault, which [`on_shutdown`](Self::on_shutdown)
/// turns into a last-resort response.
#[derive(Default)]
pub struct StatusNormalizer {
    sink: Option<Arc<dyn ResponseSink>>,
    fatal: Mutex<Option<Fault>>,
}

impl StatusNormalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sink(sink: Arc<dyn ResponseSink>) -> Self {
        Self {
            sink: Some(sink),
            fatal: Mutex::new(None),
        }
    }

    /// Clamp `code` into the recognized status set (unrecognized → 500).
    #[must_use]
    pub fn status(code: i64) -> StatusCode {
        StatusCode::from_code(code)
    }

    /// Build a fault for a runtime error. The status is always 500.
    ///
    /// Fatal faults are remembered until [`on_shutdown`](Self::on_shutdown)
    /// or [`take_fatal`](Self::take_fatal) consumes them.
    pub fn from_runtime_error(
        &self,
        severity: Severity,
        message: &str,
        file: &str,
        line: u32,
        is_fatal: bool,
    ) -> Fault {
        let fault = Fault {
            code: 500,
            message: message.to_string(),
            severity: Some(severity),
            location: Some((file.to_string(), line)),
        };
        warn!(
            severity = %severity,
            file = %file,
            line = line,
            fatal = is_fatal,
            message = %message,
            "Runtime error normalized"
        );
        if is_fatal {
            if let Ok(mut slot) = self.fatal.lock() {
                *slot = Some(fault.clone());
            }
        }
        fault
    }

    /// Build a response for `err`, using its code when it is a recognized status.
    ///
    /// With `return_only` the response is only returned; otherwise it is also
    /// logged and handed to the sink.
    pub fn from_exception(&self, err: &DispatchError, return_only: bool) -> Response {
        let status = Self::status(err.code());
        let response = Response::error(status, &err.to_string());
        if !return_only {
            self.emit(&response, err.code());
        }
        response
    }

    /// Remove and return the recorded fatal fault, if any.
    pub fn take_fatal(&self) -> Option<Fault> {
        self.fatal.lock().ok().and_then(|mut slot| slot.take())
    }

    /// Process-lifecycle hook: normalize a fatal fault nobody handled.
    pub fn on_shutdown(&self) -> Option<Response> {
        let fault = self.take_fatal()?;
        error!(
            message = %fault.message,
            location = ?fault.location,
            "Unhandled fatal fault at shutdown"
        );
        Some(self.from_exception(&DispatchError::Fault(fault), false))
    }

    fn emit(&self, response: &Response, raw_code: i64) {
        error!(
            status = response.status_code(),
            raw_code = raw_code,
            message = response.error_message().unwrap_or_default(),
            "Fault response emitted"
        );
        if let Some(sink) = &self.sink {
            sink.emit(response);
        }
    }
}

impl std::fmt::Debug for StatusNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusNormalizer")
            .field("sink", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}
