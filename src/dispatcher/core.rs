//! Dispatcher core module - middleware, route and not-found phases.

use crate::error::RouterError;
use crate::handlers::{HandlerResolver, Params};
use crate::ids::RequestId;
use crate::router::Router;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs middleware and the first matching handler for a request
///
/// Owns the [`Router`]. `dispatch` takes `&self`, so a dispatcher built once
/// at startup can serve requests from several threads.
pub struct Dispatcher<T> {
    router: Router<T>,
    resolver: Option<Arc<dyn HandlerResolver<T>>>,
}

impl<T> Dispatcher<T> {
    /// Create a dispatcher with no resolver; deferred handlers will not resolve
    #[must_use]
    pub fn new(router: Router<T>) -> Self {
        Dispatcher {
            router,
            resolver: None,
        }
    }

    /// Attach the resolver used for `Type@method` handlers
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl HandlerResolver<T> + 'static) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Attach an already shared resolver
    #[must_use]
    pub fn with_shared_resolver(mut self, resolver: Arc<dyn HandlerResolver<T>>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    #[must_use]
    pub fn router(&self) -> &Router<T> {
        &self.router
    }

    #[must_use]
    pub fn into_router(self) -> Router<T> {
        self.router
    }

    fn resolver(&self) -> Option<&dyn HandlerResolver<T>> {
        self.resolver.as_deref()
    }

    /// Serve one request
    ///
    /// Returns whatever the chosen handler returns. Fails with
    /// [`RouterError::RouteNotFound`] when no route matches and no not-found
    /// handler is set, or [`RouterError::UnresolvedHandler`] when a deferred
    /// handler on the path cannot be resolved. Middleware that already ran is
    /// not undone.
    pub fn dispatch(&self, method: &str, uri: &str) -> Result<T, RouterError> {
        let request_id = RequestId::new();
        let dispatch_start = Instant::now();

        // D1: middleware phase
        let middleware = self.router.before_middleware(method, uri);
        for (position, entry) in middleware.iter().enumerate() {
            debug!(
                request_id = %request_id,
                position,
                pattern = %entry.route.pattern(),
                handler = %entry.route.handler().describe(),
                "Running before-middleware"
            );
            entry
                .route
                .handler()
                .invoke(&Params::new(), self.resolver())?;
        }

        // D2: route phase, first match wins
        if let Some(matched) = self.router.matches(method, uri).into_iter().next() {
            info!(
                request_id = %request_id,
                method = %method,
                uri = %uri,
                pattern = %matched.route.pattern(),
                handler = %matched.route.handler().describe(),
                params = ?matched.params,
                middleware_count = middleware.len(),
                "Route matched"
            );
            let result = matched
                .route
                .handler()
                .invoke(&matched.params, self.resolver());
            debug!(
                request_id = %request_id,
                execution_time_us = dispatch_start.elapsed().as_micros(),
                ok = result.is_ok(),
                "Dispatch complete"
            );
            return result;
        }

        // D3: not-found phase
        if let Some(handler) = self.router.route_not_found_handler() {
            info!(
                request_id = %request_id,
                method = %method,
                uri = %uri,
                handler = %handler.describe(),
                "No route matched, running not-found handler"
            );
            return handler.invoke(&Params::new(), self.resolver());
        }

        let method = method.trim().to_ascii_uppercase();
        let uri = self.router.clean_request_uri(uri);
        warn!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            "No route matched"
        );
        Err(RouterError::RouteNotFound { method, uri })
    }
}

impl<T> fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("router", &self.router)
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}
