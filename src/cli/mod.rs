//! # CLI Module
//!
//! Command-line access to route files, mainly for checking a table before it
//! ships.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Print the routing table built from a route file:
//!
//! ```bash
//! brrtmatch routes --routes routes.yaml
//! ```
//!
//! ### `match`
//!
//! Print every route matching a request, in the order they would be tried:
//!
//! ```bash
//! brrtmatch match --routes routes.yaml GET /users/42
//! ```
//!
//! ### `dispatch`
//!
//! Run the full dispatch (middleware, first match, not-found) with echo
//! handlers and print the JSON result. Exits non-zero when nothing matches
//! and the file has no `not_found` handler:
//!
//! ```bash
//! brrtmatch dispatch --routes routes.yaml GET /users/42?tab=posts
//! ```
//!
//! ## Environment
//!
//! `BRRTR_BASE_PATH` and `BRRTR_SLOW_MATCH_US` are honored; a `base_path` in
//! the route file wins over `BRRTR_BASE_PATH`. Logging is configured with the
//! `BRRTR_LOG_*` variables and goes to stderr.

mod commands;


pub use commands::{run_cli, run_command, Cli, Commands};
