//! # Routes Module
//!
//! In-memory route table: named declared routes in declaration order plus a
//! controller alias map, loaded from a JSON, YAML or TOML route source.
//!
//! ## Route Source
//!
//! ```yaml
//! routes:
//!   user_posts:
//!     route: /users/{id}/posts
//!     callback: Posts::list
//!     method: GET          # optional, `verb` is accepted too
//!     arguments: [mine]    # optional leading arguments
//! controllers:
//!   people: Users
//! ```
//!
//! Either section may be missing. A missing file is an empty table, not an
//! error. Parsers are picked by file extension; the resolver only ever sees
//! [`RouteTable`].
//!
//! ## Sharing
//!
//! A table is read-only once loaded. [`SharedRouteTable`] wraps it in an
//! `ArcSwap` so a reload can replace the whole table without blocking
//! readers.

mod load;
mod pattern;
mod table;
mod types;

pub use load::RouteSourceFormat;
pub use pattern::RoutePattern;
pub use table::{RouteTable, SharedRouteTable};
pub use types::{ResolvedTarget, RouteDefinition, RouteTarget};
