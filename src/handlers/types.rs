use super::HandlerResolver;
use crate::error::{InvalidRouteKind, RouterError};
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

/// Maximum number of captured parameters stored inline before spilling to the heap.
/// Routes rarely carry more than a handful of captures.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Positional parameters captured from a matched URI, left to right
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(SmallVec<[String; MAX_INLINE_PARAMS]>);

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: impl Into<String>) {
        self.0.push(value.into());
    }

    /// Parameter at `index`, if the handler received that many
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0.into_vec()
    }
}

impl Index<usize> for Params {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.0[index]
    }
}

impl<S: Into<String>> FromIterator<S> for Params {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Params(iter.into_iter().map(Into::into).collect())
    }
}

/// A callable handler: receives the captured parameters, returns the response value
pub type HandlerFn<T> = Arc<dyn Fn(&Params) -> T + Send + Sync>;

/// A `Type@method` handler reference, resolved only when invoked
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerRef {
    pub type_name: String,
    pub method_name: String,
}

impl HandlerRef {
    /// Parse `Type@method`; both halves must be identifiers
    #[must_use]
    pub fn parse(reference: &str) -> Option<Self> {
        let (type_name, method_name) = reference.split_once('@')?;
        if !is_identifier(type_name) || !is_identifier(method_name) {
            return None;
        }
        Some(Self {
            type_name: type_name.to_string(),
            method_name: method_name.to_string(),
        })
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.type_name, self.method_name)
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A route, middleware or not-found handler
///
/// `Direct` handlers are stored as-is. `Deferred` handlers hold the raw
/// `Type@method` string; the router validates its shape at registration and
/// the dispatcher resolves it through a
/// [`HandlerResolver`] at invocation time.
pub enum Handler<T> {
    Direct(HandlerFn<T>),
    Deferred(String),
}

impl<T> Handler<T> {
    /// Wrap a closure
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Params) -> T + Send + Sync + 'static,
    {
        Handler::Direct(Arc::new(f))
    }

    /// A `Type@method` reference; its shape is checked when it is registered
    pub fn deferred(reference: impl Into<String>) -> Self {
        Handler::Deferred(reference.into())
    }

    /// Human-readable label used in logs and route dumps
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Handler::Direct(_) => "<closure>".to_string(),
            Handler::Deferred(reference) => reference.clone(),
        }
    }
}

// Manual impl: deriving would require `T: Clone`.
impl<T> Clone for Handler<T> {
    fn clone(&self) -> Self {
        match self {
            Handler::Direct(f) => Handler::Direct(Arc::clone(f)),
            Handler::Deferred(r) => Handler::Deferred(r.clone()),
        }
    }
}

impl<T> fmt::Debug for Handler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Direct(_) => f.write_str("Handler::Direct(..)"),
            Handler::Deferred(r) => f.debug_tuple("Handler::Deferred").field(r).finish(),
        }
    }
}

/// A handler after registration-time normalization
///
/// Deferred references have been checked for `Type@method` shape and parsed.
pub enum RouteHandler<T> {
    Direct(HandlerFn<T>),
    Deferred(HandlerRef),
}

impl<T> Handler<T> {
    /// Validate and parse the handler; fails on a malformed `Type@method` string
    pub fn normalize(self) -> Result<RouteHandler<T>, RouterError> {
        match self {
            Handler::Direct(f) => Ok(RouteHandler::Direct(f)),
            Handler::Deferred(reference) => HandlerRef::parse(&reference)
                .map(RouteHandler::Deferred)
                .ok_or(RouterError::invalid(
                    InvalidRouteKind::MalformedHandlerReference { reference },
                )),
        }
    }
}

impl<T> RouteHandler<T> {
    /// Call the handler, resolving a deferred reference first
    ///
    /// A deferred handler with no resolver, or one the resolver does not know,
    /// fails with [`RouterError::UnresolvedHandler`].
    pub fn invoke(
        &self,
        params: &Params,
        resolver: Option<&dyn HandlerResolver<T>>,
    ) -> Result<T, RouterError> {
        match self {
            RouteHandler::Direct(f) => Ok(f(params)),
            RouteHandler::Deferred(reference) => {
                let f = resolver
                    .and_then(|r| r.resolve(reference))
                    .ok_or_else(|| RouterError::UnresolvedHandler {
                        reference: reference.to_string(),
                    })?;
                Ok(f(params))
            }
        }
    }

    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            RouteHandler::Direct(_) => "<closure>".to_string(),
            RouteHandler::Deferred(reference) => reference.to_string(),
        }
    }
}

impl<T> Clone for RouteHandler<T> {
    fn clone(&self) -> Self {
        match self {
            RouteHandler::Direct(f) => RouteHandler::Direct(Arc::clone(f)),
            RouteHandler::Deferred(r) => RouteHandler::Deferred(r.clone()),
        }
    }
}

impl<T> fmt::Debug for RouteHandler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteHandler::Direct(_) => f.write_str("RouteHandler::Direct(..)"),
            RouteHandler::Deferred(r) => f.debug_tuple("RouteHandler::Deferred").field(r).finish(),
        }
    }
}

impl<T> From<&str> for Handler<T> {
    fn from(value: &str) -> Self {
        Handler::deferred(value)
    }
}

impl<T> From<String> for Handler<T> {
    fn from(value: String) -> Self {
        Handler::deferred(value)
    }
}

impl<T> From<HandlerFn<T>> for Handler<T> {
    fn from(value: HandlerFn<T>) -> Self {
        Handler::Direct(value)
    }
}
