//! Router core module - route tables, registration and matching.

use crate::error::{InvalidRouteKind, RouterError};
use crate::handlers::{Handler, Params, RouteHandler};
use crate::method::{normalize_method, Methods, SUPPORTED_METHODS};
use crate::runtime_config::RuntimeConfig;
use crate::uri::{clean_uri, strip_base_path};
use http::Method;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::group::RouteGroup;
use super::pattern::{compile_pattern, extract_params};

/// A registered (pattern, handler) binding
///
/// The pattern is the effective one: group prefixes applied and slashes
/// trimmed. One `Route` is shared by every method it was registered for.
pub struct Route<T> {
    pattern: String,
    regex: Regex,
    handler: RouteHandler<T>,
}

impl<T> Route<T> {
    /// Effective pattern as registered (prefixed, slash-trimmed, not compiled)
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Anchored expression the pattern compiled to
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    #[must_use]
    pub fn handler(&self) -> &RouteHandler<T> {
        &self.handler
    }

    /// Captured parameters if `cleaned_uri` matches this route
    #[must_use]
    pub fn match_uri(&self, cleaned_uri: &str) -> Option<Params> {
        extract_params(&self.regex, cleaned_uri)
    }
}

impl<T> fmt::Debug for Route<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .field("regex", &self.regex.as_str())
            .field("handler", &self.handler)
            .finish()
    }
}

/// A route that matched a request, with its positional captures
pub struct RouteMatch<T> {
    pub route: Arc<Route<T>>,
    pub params: Params,
}

impl<T> Clone for RouteMatch<T> {
    fn clone(&self) -> Self {
        Self {
            route: Arc::clone(&self.route),
            params: self.params.clone(),
        }
    }
}

impl<T> fmt::Debug for RouteMatch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("pattern", &self.route.pattern)
            .field("params", &self.params)
            .finish()
    }
}

/// Per-method routes in registration order, with the set of patterns for
/// the uniqueness check
struct RouteTable<T> {
    order: Vec<Arc<Route<T>>>,
    patterns: HashSet<String>,
}

impl<T> Default for RouteTable<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            patterns: HashSet::new(),
        }
    }
}

/// Join a group prefix and a pattern, both slash-trimmed, with a single `/`
pub(crate) fn join_prefix(prefix: &str, pattern: &str) -> String {
    let pattern = pattern.trim_matches('/');
    match (prefix.is_empty(), pattern.is_empty()) {
        (true, _) => pattern.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}/{pattern}"),
    }
}

/// Request router: route table, before-middleware table and not-found slot
///
/// Routes are tested in registration order and every match is reported;
/// picking the first one is the [`Dispatcher`](crate::dispatcher::Dispatcher)'s
/// job. Registration needs `&mut self`, matching only `&self`, so a router
/// that has finished registration can be shared across threads.
pub struct Router<T> {
    routes: HashMap<Method, RouteTable<T>>,
    before_routes: HashMap<Method, Vec<Arc<Route<T>>>>,
    not_found: Option<RouteHandler<T>>,
    base_path: String,
    slow_match_threshold: Duration,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Create an empty router with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&RuntimeConfig::default())
    }

    /// Create an empty router using `config` for the base path and slow-match threshold
    #[must_use]
    pub fn with_config(config: &RuntimeConfig) -> Self {
        Self {
            routes: HashMap::new(),
            before_routes: HashMap::new(),
            not_found: None,
            base_path: config
                .base_path
                .as_deref()
                .unwrap_or_default()
                .trim_matches('/')
                .to_string(),
            slow_match_threshold: config.slow_match_threshold,
        }
    }

    /// Mount prefix stripped from incoming URIs before matching
    pub fn set_base_path(&mut self, base_path: &str) {
        self.base_path = base_path.trim_matches('/').to_string();
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Install the handler used when no route matches, replacing any previous one
    pub fn set_route_not_found_handler(
        &mut self,
        handler: impl Into<Handler<T>>,
    ) -> Result<(), RouterError> {
        let handler = handler.into().normalize()?;
        if self.not_found.is_some() {
            debug!(handler = %handler.describe(), "Replacing not-found handler");
        }
        self.not_found = Some(handler);
        Ok(())
    }

    #[must_use]
    pub fn route_not_found_handler(&self) -> Option<&RouteHandler<T>> {
        self.not_found.as_ref()
    }

    /// Run `f` with a registrar that prefixes every pattern with `prefix`
    ///
    /// The prefix lives in the [`RouteGroup`] handed to `f`, so nothing on the
    /// router changes and there is nothing to restore when `f` returns.
    /// Groups nest through [`RouteGroup::group`]. Whatever `f` returns is
    /// passed back to the caller.
    pub fn group<R>(&mut self, prefix: &str, f: impl FnOnce(&mut RouteGroup<'_, T>) -> R) -> R {
        let mut group = RouteGroup::new(self, join_prefix("", prefix));
        f(&mut group)
    }

    /// Register a route under `prefix`
    ///
    /// All methods are validated, including the duplicate check, before any
    /// table is touched, so a failed call leaves the router unchanged.
    pub(crate) fn register_route(
        &mut self,
        prefix: &str,
        methods: Methods,
        pattern: &str,
        handler: Handler<T>,
    ) -> Result<Arc<Route<T>>, RouterError> {
        let methods = methods.resolve()?;
        let pattern = join_prefix(prefix, pattern);

        for method in &methods {
            let duplicate = self
                .routes
                .get(method)
                .is_some_and(|table| table.patterns.contains(&pattern));
            if duplicate {
                return Err(RouterError::invalid(InvalidRouteKind::DuplicatePattern {
                    method: method.to_string(),
                    pattern,
                }));
            }
        }

        let route = Self::build_route(pattern, handler)?;
        for method in methods {
            let table = self.routes.entry(method.clone()).or_default();
            table.patterns.insert(route.pattern.clone());
            table.order.push(Arc::clone(&route));
            debug!(
                method = %method,
                pattern = %route.pattern,
                regex = %route.regex.as_str(),
                handler = %route.handler.describe(),
                "Route registered"
            );
        }
        Ok(route)
    }

    /// Append a before-middleware entry under `prefix`; duplicates are kept
    pub(crate) fn register_before(
        &mut self,
        prefix: &str,
        methods: Methods,
        pattern: &str,
        handler: Handler<T>,
    ) -> Result<Arc<Route<T>>, RouterError> {
        let methods = methods.resolve()?;
        let route = Self::build_route(join_prefix(prefix, pattern), handler)?;
        for method in methods {
            self.before_routes
                .entry(method.clone())
                .or_default()
                .push(Arc::clone(&route));
            debug!(
                method = %method,
                pattern = %route.pattern,
                handler = %route.handler.describe(),
                "Before-middleware registered"
            );
        }
        Ok(route)
    }

    fn build_route(pattern: String, handler: Handler<T>) -> Result<Arc<Route<T>>, RouterError> {
        let handler = handler.normalize()?;
        let regex = compile_pattern(&pattern).map_err(|e| {
            RouterError::invalid(InvalidRouteKind::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })
        })?;
        Ok(Arc::new(Route {
            pattern,
            regex,
            handler,
        }))
    }

    /// Clean a request URI and strip the base path
    #[must_use]
    pub fn clean_request_uri(&self, uri: &str) -> String {
        let cleaned = clean_uri(uri);
        strip_base_path(&cleaned, &self.base_path).to_string()
    }

    /// Every route matching the request, in registration order
    ///
    /// An unknown method, or one with no routes, yields an empty list.
    #[must_use]
    pub fn matches(&self, method: &str, uri: &str) -> Vec<RouteMatch<T>> {
        let Some(method) = normalize_method(method) else {
            debug!(method = %method, uri = %uri, "Unsupported method, nothing to match");
            return Vec::new();
        };
        let Some(table) = self.routes.get(&method) else {
            return Vec::new();
        };
        let cleaned = self.clean_request_uri(uri);
        self.collect_matches("route", &method, &cleaned, &table.order)
    }

    /// Every before-middleware entry matching the request, in registration order
    ///
    /// The same pattern registered twice appears twice.
    #[must_use]
    pub fn before_middleware(&self, method: &str, uri: &str) -> Vec<RouteMatch<T>> {
        let Some(method) = normalize_method(method) else {
            return Vec::new();
        };
        let Some(entries) = self.before_routes.get(&method) else {
            return Vec::new();
        };
        let cleaned = self.clean_request_uri(uri);
        self.collect_matches("before", &method, &cleaned, entries)
    }

    fn collect_matches(
        &self,
        table: &'static str,
        method: &Method,
        cleaned: &str,
        routes: &[Arc<Route<T>>],
    ) -> Vec<RouteMatch<T>> {
        let match_start = Instant::now();
        let found: Vec<RouteMatch<T>> = routes
            .iter()
            .filter_map(|route| {
                route.match_uri(cleaned).map(|params| RouteMatch {
                    route: Arc::clone(route),
                    params,
                })
            })
            .collect();
        let match_duration = match_start.elapsed();

        if match_duration > self.slow_match_threshold {
            warn!(
                table,
                method = %method,
                uri = %cleaned,
                candidates = routes.len(),
                matched = found.len(),
                duration_us = match_duration.as_micros(),
                "Slow route matching detected"
            );
        } else {
            debug!(
                table,
                method = %method,
                uri = %cleaned,
                candidates = routes.len(),
                matched = found.len(),
                duration_us = match_duration.as_micros(),
                "Route match attempt"
            );
        }
        found
    }

    /// Routes registered for `method`, in registration order
    pub fn routes_for(&self, method: &Method) -> impl Iterator<Item = &Arc<Route<T>>> {
        self.routes
            .get(method)
            .into_iter()
            .flat_map(|table| table.order.iter())
    }

    /// Number of (method, pattern) registrations
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.values().map(|t| t.order.len()).sum()
    }

    /// Every registered pattern, one entry per (method, pattern)
    ///
    /// Methods are listed in [`SUPPORTED_METHODS`] order.
    #[must_use]
    pub fn get_all_path_patterns(&self) -> Vec<String> {
        SUPPORTED_METHODS
            .iter()
            .flat_map(|m| self.routes_for(m))
            .map(|route| route.pattern.clone())
            .collect()
    }

    /// Human-readable listing of routes and before-middleware
    #[must_use]
    pub fn dump_routes(&self) -> String {
        let mut out = format!(
            "[routes] base_path=/{} count={}\n",
            self.base_path,
            self.route_count()
        );
        for method in &SUPPORTED_METHODS {
            for route in self.before_routes.get(method).into_iter().flatten() {
                out.push_str(&format!(
                    "[before] {method} /{} -> {}\n",
                    route.pattern,
                    route.handler.describe()
                ));
            }
            for route in self.routes_for(method) {
                out.push_str(&format!(
                    "[route] {method} /{} -> {}\n",
                    route.pattern,
                    route.handler.describe()
                ));
            }
        }
        if let Some(handler) = &self.not_found {
            out.push_str(&format!("[not_found] -> {}\n", handler.describe()));
        }
        info!(
            routes_count = self.route_count(),
            base_path = %self.base_path,
            "Routing table dumped"
        );
        out
    }
}

impl<T> fmt::Debug for Router<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.route_count())
            .field("base_path", &self.base_path)
            .field("has_not_found", &self.not_found.is_some())
            .finish()
    }
}
