//! Error types for route registration and dispatch.
//!
//! Registration problems surface as [`RouterError::InvalidRoute`] the moment the
//! offending call is made. Dispatch problems ([`RouterError::RouteNotFound`],
//! [`RouterError::UnresolvedHandler`]) only surface from
//! [`Dispatcher::dispatch`](crate::dispatcher::Dispatcher::dispatch).

use std::fmt;

/// Why a registration call was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidRouteKind {
    /// The method list normalized to nothing (e.g. `""` or `[]`)
    EmptyMethods,
    /// A method outside GET, HEAD, POST, PUT, DELETE, PATCH, OPTIONS
    UnsupportedMethod {
        /// The method as supplied by the caller
        method: String,
    },
    /// The exact pattern is already registered for this method
    DuplicatePattern {
        /// Upper-cased method name
        method: String,
        /// Effective (group-prefixed, slash-trimmed) pattern
        pattern: String,
    },
    /// A handler reference that is not of the form `Type@method`
    MalformedHandlerReference {
        /// The reference string as supplied
        reference: String,
    },
    /// The pattern does not compile into a regular expression
    InvalidPattern {
        /// Effective pattern
        pattern: String,
        /// Message from the regex engine
        reason: String,
    },
}

/// Errors raised by the router and dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// Raised at registration time only
    InvalidRoute(InvalidRouteKind),
    /// No route matched and no not-found handler is registered
    RouteNotFound {
        /// Upper-cased request method
        method: String,
        /// Cleaned request URI
        uri: String,
    },
    /// A deferred `Type@method` handler could not be resolved when invoked
    UnresolvedHandler {
        /// The reference in `Type@method` form
        reference: String,
    },
}

impl RouterError {
    pub(crate) fn invalid(kind: InvalidRouteKind) -> Self {
        RouterError::InvalidRoute(kind)
    }

    /// `true` for [`RouterError::RouteNotFound`]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, RouterError::RouteNotFound { .. })
    }
}

impl fmt::Display for InvalidRouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidRouteKind::EmptyMethods => write!(f, "no HTTP method given"),
            InvalidRouteKind::UnsupportedMethod { method } => write!(
                f,
                "unsupported HTTP method '{}'. Expected one of GET, HEAD, POST, PUT, DELETE, PATCH, OPTIONS or '*'",
                method
            ),
            InvalidRouteKind::DuplicatePattern { method, pattern } => {
                write!(f, "pattern '{}' is already registered for {}", pattern, method)
            }
            InvalidRouteKind::MalformedHandlerReference { reference } => write!(
                f,
                "handler reference '{}' is not of the form Type@method",
                reference
            ),
            InvalidRouteKind::InvalidPattern { pattern, reason } => {
                write!(f, "pattern '{}' does not compile: {}", pattern, reason)
            }
        }
    }
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::InvalidRoute(kind) => write!(f, "Invalid route: {}", kind),
            RouterError::RouteNotFound { method, uri } => {
                write!(f, "Route not found: {} /{}", method, uri)
            }
            RouterError::UnresolvedHandler { reference } => {
                write!(f, "Handler '{}' could not be resolved", reference)
            }
        }
    }
}

impl std::error::Error for InvalidRouteKind {}

impl std::error::Error for RouterError {}
