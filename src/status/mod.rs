//! # Status Module
//!
//! Every response leaving the dispatcher carries a [`StatusCode`] from the
//! recognized HTTP status set. Codes are produced in exactly one place,
//! [`StatusNormalizer::status`], which clamps anything unrecognized to 500.
//!
//! ## Failure Mapping
//!
//! ```text
//! DispatchError ──code()──► StatusNormalizer::from_exception ──► Response
//! panic / runtime fault ──► StatusNormalizer::from_runtime_error ──► Fault (500)
//! recorded fatal fault ──► StatusNormalizer::on_shutdown ──► Response
//! ```

mod core;
mod normalizer;

pub use core::{is_recognized, StatusCode};
pub use normalizer::{ResponseSink, StatusNormalizer};
