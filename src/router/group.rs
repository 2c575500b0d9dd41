use crate::error::RouterError;
use crate::handlers::Handler;
use crate::method::Methods;
use http::Method;

use super::core::{join_prefix, Router};

/// Route registration surface shared by [`Router`] and [`RouteGroup`]
///
/// Only [`add_route`](Registrar::add_route) and [`before`](Registrar::before)
/// are required; the per-verb helpers forward to `add_route`.
pub trait Registrar<T> {
    /// Register `handler` for `pattern` under one or more methods
    ///
    /// Fails with [`RouterError::InvalidRoute`] on an empty or unsupported
    /// method list, a malformed handler reference, an uncompilable pattern,
    /// or a pattern already registered for one of the methods.
    fn add_route(
        &mut self,
        methods: impl Into<Methods>,
        pattern: &str,
        handler: impl Into<Handler<T>>,
    ) -> Result<(), RouterError>;

    /// Register before-middleware; the same pattern may be registered repeatedly
    fn before(
        &mut self,
        methods: impl Into<Methods>,
        pattern: &str,
        handler: impl Into<Handler<T>>,
    ) -> Result<(), RouterError>;

    fn get(&mut self, pattern: &str, handler: impl Into<Handler<T>>) -> Result<(), RouterError> {
        self.add_route(Method::GET, pattern, handler)
    }

    fn head(&mut self, pattern: &str, handler: impl Into<Handler<T>>) -> Result<(), RouterError> {
        self.add_route(Method::HEAD, pattern, handler)
    }

    fn post(&mut self, pattern: &str, handler: impl Into<Handler<T>>) -> Result<(), RouterError> {
        self.add_route(Method::POST, pattern, handler)
    }

    fn put(&mut self, pattern: &str, handler: impl Into<Handler<T>>) -> Result<(), RouterError> {
        self.add_route(Method::PUT, pattern, handler)
    }

    fn delete(&mut self, pattern: &str, handler: impl Into<Handler<T>>) -> Result<(), RouterError> {
        self.add_route(Method::DELETE, pattern, handler)
    }

    fn patch(&mut self, pattern: &str, handler: impl Into<Handler<T>>) -> Result<(), RouterError> {
        self.add_route(Method::PATCH, pattern, handler)
    }

    fn options(&mut self, pattern: &str, handler: impl Into<Handler<T>>) -> Result<(), RouterError> {
        self.add_route(Method::OPTIONS, pattern, handler)
    }

    /// Register under every supported method
    fn any(&mut self, pattern: &str, handler: impl Into<Handler<T>>) -> Result<(), RouterError> {
        self.add_route(Methods::Any, pattern, handler)
    }
}

impl<T> Registrar<T> for Router<T> {
    fn add_route(
        &mut self,
        methods: impl Into<Methods>,
        pattern: &str,
        handler: impl Into<Handler<T>>,
    ) -> Result<(), RouterError> {
        self.register_route("", methods.into(), pattern, handler.into())
            .map(|_| ())
    }

    fn before(
        &mut self,
        methods: impl Into<Methods>,
        pattern: &str,
        handler: impl Into<Handler<T>>,
    ) -> Result<(), RouterError> {
        self.register_before("", methods.into(), pattern, handler.into())
            .map(|_| ())
    }
}

/// Registrar scoped to a group prefix
///
/// Handed to the callback of [`Router::group`]. The prefix is owned by the
/// group value, so leaving the callback drops it and the outer scope keeps
/// its own prefix.
pub struct RouteGroup<'r, T> {
    router: &'r mut Router<T>,
    prefix: String,
}

impl<'r, T> RouteGroup<'r, T> {
    pub(crate) fn new(router: &'r mut Router<T>, prefix: String) -> Self {
        Self { router, prefix }
    }

    /// Combined, slash-trimmed prefix of this group and its parents
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Open a nested group whose prefix extends this one
    pub fn group<R>(&mut self, prefix: &str, f: impl FnOnce(&mut RouteGroup<'_, T>) -> R) -> R {
        let mut nested = RouteGroup::new(&mut *self.router, join_prefix(&self.prefix, prefix));
        f(&mut nested)
    }
}

impl<T> Registrar<T> for RouteGroup<'_, T> {
    fn add_route(
        &mut self,
        methods: impl Into<Methods>,
        pattern: &str,
        handler: impl Into<Handler<T>>,
    ) -> Result<(), RouterError> {
        self.router
            .register_route(&self.prefix, methods.into(), pattern, handler.into())
            .map(|_| ())
    }

    fn before(
        &mut self,
        methods: impl Into<Methods>,
        pattern: &str,
        handler: impl Into<Handler<T>>,
    ) -> Result<(), RouterError> {
        self.router
            .register_before(&self.prefix, methods.into(), pattern, handler.into())
            .map(|_| ())
    }
}
