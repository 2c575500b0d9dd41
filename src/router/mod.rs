//! # Router Module
//!
//! The router module holds the route tables and answers "which routes match
//! this method and URI?".
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Registering routes and before-middleware per HTTP method
//! - Applying group prefixes at registration time
//! - Compiling URI templates into anchored regular expressions
//! - Matching cleaned request URIs and extracting positional parameters
//!
//! ## Pattern Syntax
//!
//! - Literal segments match verbatim (`users/all`)
//! - `{name}` matches any character sequence, non-greedily (`users/{id}`)
//! - `{name}?` makes the whole segment optional (`albums/{year}?`)
//! - Raw regex is passed through, captures included (`movies(/\d+)?`)
//!
//! Placeholder names are not kept; every capture is handed to the handler by
//! position, left to right.
//!
//! ## Example
//!
//! ```rust
//! use brrtmatch::handlers::Handler;
//! use brrtmatch::router::{Registrar, Router};
//!
//! # fn main() -> Result<(), brrtmatch::RouterError> {
//! let mut router: Router<String> = Router::new();
//! router.get("/users/{id}", Handler::from_fn(|p| format!("user {}", &p[0])))?;
//! router.group("/admin", |admin| {
//!     admin.get("/stats", Handler::from_fn(|_| "stats".to_string()))
//! })?;
//!
//! let found = router.matches("get", "/users/42?tab=posts");
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].route.pattern(), "users/{id}");
//! assert_eq!(found[0].params.get(0), Some("42"));
//! assert_eq!(router.matches("GET", "/admin/stats")[0].route.pattern(), "admin/stats");
//! # Ok(())
//! # }
//! ```
//!
//! ## Ordering
//!
//! Routes are tested in registration order and [`Router::matches`] returns all
//! of them. There is no specificity ranking: when two patterns match the same
//! URI, the one registered first comes first.

mod core;
mod group;
mod pattern;
#[cfg(test)]
mod tests;

pub use core::{Route, RouteMatch, Router};
pub use group::{Registrar, RouteGroup};
pub use pattern::{compile_pattern, extract_params, pattern_to_regex_source};
