//! # CLI Module
//!
//! Command-line tooling for inspecting route sources and checking how a
//! request resolves, without a running application.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! List the declared routes (in match order) and controller aliases:
//!
//! ```bash
//! brrtdispatch routes --routes config/routes.yaml
//! ```
//!
//! ### `resolve`
//!
//! Build a command-line request and print the resolved target as JSON:
//!
//! ```bash
//! brrtdispatch resolve --routes config/routes.yaml GET /users/5.json
//! brrtdispatch resolve GET /users json "page=2&sort=name"
//! ```
//!
//! Positional arguments follow the command-line request layout: method,
//! path, forced format, query string. Pass `""` to skip the format. Exits
//! with status 1 when no route matches.
//!
//! `--routes` defaults to `BRRTD_ROUTES_FILE`, then `config/routes.yaml`.

mod commands;


pub use commands::{run_cli, run_cli_with, Cli, Commands};
