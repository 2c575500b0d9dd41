//! # Handlers Module
//!
//! Handler representation shared by the router and dispatcher.
//!
//! A handler is either a closure ([`Handler::Direct`]) or a `Type@method`
//! reference ([`Handler::Deferred`]) whose lookup is postponed until the route
//! is actually dispatched. References are resolved through a
//! [`HandlerResolver`]; [`HandlerRegistry`] is the stock implementation and
//! supports both static and instance call conventions.
//!
//! Handlers receive the captured URI parameters positionally as [`Params`].

mod resolver;
mod types;

pub use resolver::{HandlerRegistry, HandlerResolver};
pub use types::{Handler, HandlerFn, HandlerRef, Params, RouteHandler, MAX_INLINE_PARAMS};
