use serde::Serialize;
use std::fmt;

/// Codes the normalizer accepts verbatim.
const RECOGNIZED: &[u16] = &[
    100, 101, 102, 103, //
    200, 201, 202, 203, 204, 205, 206, 207, 208, 226, //
    300, 301, 302, 303, 304, 305, 307, 308, //
    400, 401, 402, 403, 404, 405, 406, 407, 408, 409, 410, 411, 412, 413, 414, 415, 416, 417,
    418, 421, 422, 423, 424, 425, 426, 428, 429, 431, 451, //
    500, 501, 502, 503, 504, 505, 506, 507, 508, 510, 511,
];

/// Whether `code` belongs to the recognized HTTP status set.
#[must_use]
pub fn is_recognized(code: i64) -> bool {
    u16::try_from(code)
        .map(|c| RECOGNIZED.binary_search(&c).is_ok())
        .unwrap_or(false)
}

/// An HTTP status code from the recognized set.
///
/// Only [`StatusNormalizer::status`](super::StatusNormalizer::status) builds
/// these, so holding one means the value is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StatusCode(u16);

impl StatusCode {
    pub(crate) const OK: StatusCode = StatusCode(200);
    pub(crate) const NO_CONTENT: StatusCode = StatusCode(204);
    pub(crate) const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);

    pub(crate) fn from_code(code: i64) -> Self {
        match u16::try_from(code) {
            Ok(c) if RECOGNIZED.binary_search(&c).is_ok() => StatusCode(c),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn as_u16(self) -> u16 {
        self.0
    }

    /// Reason phrase, e.g. `Not Found`.
    #[must_use]
    pub fn reason(self) -> &'static str {
        http::StatusCode::from_u16(self.0)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
    }

    #[must_use]
    pub fn is_success(self) -> bool {
        (200..300).contains(&self.0)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.reason())
    }
}
