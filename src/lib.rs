//! # brrtdispatch
//!
//! **brrtdispatch** is the request-to-action core of a server framework. It
//! takes a raw request (HTTP or command-line), normalizes it, resolves it to
//! a controller action, invokes that action and turns the result, or any
//! failure, into a response with a valid status code.
//!
//! ## Architecture
//!
//! - **[`request`]** - [`RequestContext`]: method, path, payload and format negotiation
//! - **[`routes`]** - [`RouteTable`]: declared routes and controller aliases, loaded from JSON/YAML/TOML
//! - **[`router`]** - [`RouteResolver`]: declared routes first, REST convention fallback second
//! - **[`dispatcher`]** - [`DispatchCoordinator`]: inspection loop, binding, invocation, formatting
//! - **[`status`]** - [`StatusNormalizer`]: every failure becomes a recognized HTTP status
//! - **[`formatter`]** - response formatter capability and the JSON formatter
//! - **[`hot_reload`]** - swap in a new route table when the route source changes
//!
//! ### Request Flow
//!
//! ```text
//! HttpInput / CliInput
//!        │
//!        ▼
//!  RequestContext ──► DispatchCoordinator ──► Inspector (RouteInspector)
//!                            │                    │
//!                            │                    ▼
//!                            │              RouteResolver ──► RouteTable + RouteMatcher
//!                            │                    │
//!                            ◄──── HandlerRef ────┘
//!                            │
//!                            ├──► Controller (from ControllerRegistry)
//!                            ├──► Formatter
//!                            ▼
//!                        Response ◄── StatusNormalizer (any failure)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use brrtdispatch::dispatcher::{Controller, ControllerRegistry, DispatchCoordinator};
//! use brrtdispatch::error::DispatchError;
//! use brrtdispatch::formatter::JsonFormatter;
//! use brrtdispatch::request::{HttpInput, RequestContext};
//! use brrtdispatch::router::{RouteInspector, RouteResolver};
//! use brrtdispatch::routes::RouteTable;
//! use serde_json::{json, Value};
//!
//! struct Users;
//!
//! impl Controller for Users {
//!     fn call(
//!         &mut self,
//!         method: &str,
//!         args: &[String],
//!         _ctx: &RequestContext,
//!     ) -> Result<Option<Value>, DispatchError> {
//!         Ok(Some(json!({ "method": method, "id": args.first() })))
//!     }
//! }
//!
//! let resolver = RouteResolver::new(RouteTable::new().into_shared());
//! let coordinator = DispatchCoordinator::new(Arc::new(RouteInspector::new(resolver)))
//!     .with_formatter(JsonFormatter::shared())
//!     .with_controllers(ControllerRegistry::new().with("Users", || Box::new(Users)));
//!
//! let ctx = RequestContext::from_http(HttpInput::new("GET", "/users/5")).unwrap();
//! let response = coordinator.dispatch(ctx).unwrap();
//! assert_eq!(response.status_code(), 200);
//! assert_eq!(response.body, json!({ "method": "read_action", "id": "5" }));
//! ```
//!
//! ## Configuration
//!
//! Runtime settings come from `BRRTD_*` environment variables, see
//! [`runtime_config`] and [`logging`].

pub mod cli;
pub mod dispatcher;
pub mod error;
pub mod formatter;
pub mod hot_reload;
pub mod ids;
pub mod logging;
pub mod request;
pub mod response;
pub mod router;
pub mod routes;
pub mod runtime_config;
pub mod status;

pub use dispatcher::DispatchCoordinator;
pub use error::{DispatchError, Fault, Severity};
pub use request::RequestContext;
pub use response::Response;
pub use router::RouteResolver;
pub use routes::RouteTable;
pub use status::StatusNormalizer;
