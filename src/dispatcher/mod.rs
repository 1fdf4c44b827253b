//! # Dispatcher Module
//!
//! Ties resolution, invocation and formatting together for one request and
//! maps every failure onto a status-normalized response.
//!
//! ## Request Flow
//!
//! ```text
//! START ─► INSPECTING ─┬─► (Rewritten) ─► INSPECTING ...
//!                      ├─► (NoRoute)   ─► FAILED  404 "Unknown route requested"
//!                      └─► (Handler)   ─► RESOLVED ─► INVOKED ─► FORMATTED
//! ```
//!
//! In `RESOLVED` the coordinator checks, in order:
//!
//! 1. the negotiated format is supported by the formatter (else 415)
//! 2. the handler's controller class is registered (else 404)
//!
//! then binds a fresh controller instance, the `{action}_action` method and
//! the arguments, and invokes it. Controller panics are caught and turned
//! into a 500 fault.
//!
//! ## Modes
//!
//! - [`DispatchMode::Normalize`] (default): failures become fault responses
//!   via [`StatusNormalizer`](crate::status::StatusNormalizer); `dispatch`
//!   always returns `Ok`.
//! - [`DispatchMode::ReturnOnly`]: failures are returned as `Err` for the
//!   caller to handle.
//!
//! Inspection is bounded (see [`DEFAULT_MAX_INSPECTIONS`]); a router that
//! keeps rewriting fails the request with 508.

mod core;
mod handler;

pub use core::{DispatchCoordinator, DispatchMode, DispatchState, DEFAULT_MAX_INSPECTIONS};
pub use handler::{Callback, Controller, ControllerFactory, ControllerRegistry, HandlerRef};
