//! # Dispatcher Module
//!
//! The dispatcher turns one `(method, URI)` pair into one handler call.
//!
//! ## Request Flow
//!
//! 1. **Middleware phase** - every before-middleware entry matching the
//!    request runs, in registration order, with no parameters. Results are
//!    discarded; side effects stay even if a later phase fails.
//! 2. **Route phase** - the router reports all matching routes; only the
//!    first (earliest registered) is invoked, with its captured parameters,
//!    and its return value is handed back to the caller.
//! 3. **Not-found phase** - when nothing matched, the not-found handler runs
//!    if one is registered; otherwise dispatch fails with
//!    [`RouterError::RouteNotFound`](crate::RouterError::RouteNotFound).
//!
//! ## Deferred Handlers
//!
//! `Type@method` handlers are resolved when they are about to run, through
//! the [`HandlerResolver`](crate::handlers::HandlerResolver) given to
//! [`Dispatcher::with_resolver`]. Resolution failure is reported as
//! [`RouterError::UnresolvedHandler`](crate::RouterError::UnresolvedHandler).
//!
//! ## Example
//!
//! ```rust
//! use brrtmatch::dispatcher::Dispatcher;
//! use brrtmatch::handlers::Handler;
//! use brrtmatch::router::{Registrar, Router};
//!
//! # fn main() -> Result<(), brrtmatch::RouterError> {
//! let mut router = Router::new();
//! router.get("/users/{id}", Handler::from_fn(|p| format!("user {}", &p[0])))?;
//!
//! let dispatcher = Dispatcher::new(router);
//! assert_eq!(dispatcher.dispatch("GET", "/users/42")?, "user 42");
//! assert!(dispatcher.dispatch("POST", "/users/42").unwrap_err().is_not_found());
//! # Ok(())
//! # }
//! ```

mod core;

pub use core::Dispatcher;
