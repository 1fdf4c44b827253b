//! # Request Module
//!
//! Turns raw transport input into a [`RequestContext`]: a canonical method,
//! path, payload and the format hints (explicit format, path extension,
//! `Accept` MIME type) used for content negotiation.
//!
//! ## Sources
//!
//! Input is passed in explicitly as a [`RequestSource`]; nothing is read
//! from the process environment.
//!
//! - [`HttpInput`] - method, request target, headers, body fields, route values
//! - [`CliInput`] - positional arguments: method, path, format, query string
//!
//! ## Method Precedence
//!
//! 1. Explicit method passed to [`RequestContext::new`]
//! 2. `_method` body field
//! 3. `X-HTTP-Method-Override` header
//! 4. First CLI argument (`GET` when absent)
//! 5. The transport's request method
//!
//! ## Example
//!
//! ```rust
//! use brrtdispatch::request::{HttpInput, Method, RequestContext};
//!
//! let input = HttpInput::new("post", "/users.json?q=users.json")
//!     .body_field("_method", "put");
//! let mut ctx = RequestContext::from_http(input).unwrap();
//! assert_eq!(ctx.method(), Method::Put);
//! assert_eq!(ctx.extension(), Some("json"));
//! assert_eq!(ctx.path(), "/users");
//! ```

mod core;
mod input;
mod method;
#[cfg(test)]
mod tests;

pub use core::{
    decode_path, normalize_path, OriginKind, RequestContext, CLI_MIME_TYPE,
    METHOD_OVERRIDE_FIELD, METHOD_OVERRIDE_HEADER, REQUEST_ID_HEADER,
};
pub use input::{parse_query_string, CliInput, HttpInput, Payload, RequestSource};
pub use method::Method;
