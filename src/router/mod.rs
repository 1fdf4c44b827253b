//! # Router Module
//!
//! Resolves a [`RequestContext`](crate::request::RequestContext) to a
//! [`ResolvedTarget`](crate::routes::ResolvedTarget): a controller name, an
//! action name and positional arguments.
//!
//! ## Resolution Phases
//!
//! 1. **Declared routes**: each route in the [`RouteTable`](crate::routes::RouteTable)
//!    is offered to the [`RouteMatcher`] in declaration order. The first
//!    match wins and resolution stops.
//! 2. **Convention fallback**: the first path segment names the controller
//!    (through the alias map, or converted to `ClassStyle`), the method picks
//!    the action and the remaining segments become arguments:
//!
//! | Request           | Action   | Arguments |
//! |-------------------|----------|-----------|
//! | `GET /users`      | `list`   | `[]`      |
//! | `GET /users/5`    | `read`   | `["5"]`   |
//! | `POST /users`     | `create` | `[]`      |
//! | `PUT /users/5`    | `update` | `["5"]`   |
//! | `DELETE /users/5` | `delete` | `["5"]`   |
//!
//! The fallback target is checked by the same matcher before it is returned.
//!
//! ## Example
//!
//! ```rust
//! use brrtdispatch::request::RequestContext;
//! use brrtdispatch::router::RouteResolver;
//! use brrtdispatch::routes::RouteTable;
//!
//! let table = RouteTable::new().with_alias("people", "Users").into_shared();
//! let resolver = RouteResolver::new(table);
//!
//! let ctx = RequestContext::from_cli(["GET", "/people/7"]).unwrap();
//! let target = resolver.resolve(&ctx).unwrap();
//! assert_eq!(target.controller_name, "Users");
//! assert_eq!(target.action_name, "read");
//! assert_eq!(target.arguments, ["7"]);
//! ```

mod core;
mod inspector;
mod matcher;
#[cfg(test)]
mod tests;

pub use core::{class_name, convention_action, RouteResolver};
pub use inspector::{Inspection, Inspector, RouteInspector};
pub use matcher::{PatternMatcher, RouteMatcher};
