//! # brrtmatch
//!
//! **brrtmatch** is a synchronous request router: a table of
//! (HTTP method, URI pattern) → handler bindings, a matcher over that table,
//! and a dispatcher that runs before-middleware and the first matching
//! handler.
//!
//! ## Overview
//!
//! - **[`router`]** - Route and middleware tables, group prefixes, pattern
//!   compilation and matching
//! - **[`dispatcher`]** - Middleware → first match → not-found orchestration
//! - **[`handlers`]** - Closure and `Type@method` handlers, positional
//!   parameters, pluggable resolution
//! - **[`route_file`]** - Declarative route tables in YAML, JSON or TOML
//! - **[`cli`]** - The `brrtmatch` command-line tool
//! - **[`otel`]** / **[`runtime_config`]** - Logging and environment configuration
//!
//! There is no transport layer. Callers hand in a method and a URI string and
//! get back whatever the selected handler returns.
//!
//! ## Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Dispatcher
//!     participant Router
//!     participant Middleware
//!     participant Handler
//!
//!     Caller->>Dispatcher: dispatch("GET", "/users/42?tab=posts")
//!     Dispatcher->>Router: before_middleware(method, uri)
//!     Router->>Router: clean URI → "users/42"
//!     Router-->>Dispatcher: matching middleware, registration order
//!     loop each middleware
//!         Dispatcher->>Middleware: invoke()
//!     end
//!     Dispatcher->>Router: matches(method, uri)
//!     Router-->>Dispatcher: all matching routes, registration order
//!     alt at least one match
//!         Dispatcher->>Handler: invoke first match with ["42"]
//!         Handler-->>Caller: handler result
//!     else no match
//!         Dispatcher-->>Caller: not-found handler result or RouteNotFound
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtmatch::{Dispatcher, Handler, Registrar, Router};
//!
//! # fn main() -> Result<(), brrtmatch::RouterError> {
//! let mut router: Router<String> = Router::new();
//! router.get("/users/{id}", Handler::from_fn(|p| format!("user {}", &p[0])))?;
//! router.get("/albums/{year}?", Handler::from_fn(|p| {
//!     format!("albums {}", p.get(0).unwrap_or("all"))
//! }))?;
//! router.group("/admin", |admin| {
//!     admin.get("/stats", Handler::from_fn(|_| "stats".to_string()))
//! })?;
//! router.set_route_not_found_handler(Handler::from_fn(|_| "404".to_string()))?;
//!
//! let dispatcher = Dispatcher::new(router);
//! assert_eq!(dispatcher.dispatch("GET", "/users/42")?, "user 42");
//! assert_eq!(dispatcher.dispatch("GET", "/albums")?, "albums all");
//! assert_eq!(dispatcher.dispatch("GET", "/albums/2023")?, "albums 2023");
//! assert_eq!(dispatcher.dispatch("GET", "/admin/stats")?, "stats");
//! assert_eq!(dispatcher.dispatch("GET", "/nowhere")?, "404");
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Registration takes `&mut self`; matching and dispatch take `&self`. Build
//! the router during startup, then share the [`Dispatcher`] (e.g. in an
//! `Arc`) across threads. Handlers run synchronously on the calling thread.

pub mod cli;
pub mod dispatcher;
mod echo;
pub mod error;
pub mod handlers;
pub mod ids;
pub mod method;
pub mod otel;
pub mod route_file;
pub mod router;
pub mod runtime_config;
pub mod uri;

pub use dispatcher::Dispatcher;
pub use echo::EchoResolver;
pub use error::{InvalidRouteKind, RouterError};
pub use handlers::{Handler, HandlerRegistry, HandlerResolver, Params};
pub use method::{Methods, SUPPORTED_METHODS};
pub use route_file::RouteFile;
pub use router::{Registrar, RouteMatch, Router};
