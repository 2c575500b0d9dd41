//! HTTP method vocabulary and normalization.
//!
//! Only seven methods are routable. Names are matched case-insensitively and
//! `*` expands to all of them.

use crate::error::{InvalidRouteKind, RouterError};
use http::Method;

/// Methods that can carry routes, in the order `*` expands to
pub const SUPPORTED_METHODS: [Method; 7] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
];

/// Method selector accepted at registration time
///
/// Built from a single name (`"GET"`), the wildcard (`"*"`), a `|`-separated
/// list (`"GET|POST"`) or any list of names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Methods {
    /// Every supported method
    Any,
    /// An explicit list, validated by [`Methods::resolve`]
    List(Vec<String>),
}

impl Methods {
    /// Normalize to a de-duplicated list of supported methods
    ///
    /// Fails when the list is empty or names a method outside
    /// [`SUPPORTED_METHODS`].
    pub fn resolve(&self) -> Result<Vec<Method>, RouterError> {
        let names = match self {
            Methods::Any => return Ok(SUPPORTED_METHODS.to_vec()),
            Methods::List(names) => names,
        };

        let mut resolved: Vec<Method> = Vec::with_capacity(names.len());
        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            if name == "*" {
                return Ok(SUPPORTED_METHODS.to_vec());
            }
            let method = normalize_method(name).ok_or_else(|| {
                RouterError::invalid(InvalidRouteKind::UnsupportedMethod {
                    method: name.to_string(),
                })
            })?;
            if !resolved.contains(&method) {
                resolved.push(method);
            }
        }

        if resolved.is_empty() {
            return Err(RouterError::invalid(InvalidRouteKind::EmptyMethods));
        }
        Ok(resolved)
    }
}

impl From<&str> for Methods {
    fn from(value: &str) -> Self {
        if value.trim() == "*" {
            return Methods::Any;
        }
        Methods::List(value.split('|').map(str::to_string).collect())
    }
}

impl From<String> for Methods {
    fn from(value: String) -> Self {
        Methods::from(value.as_str())
    }
}

impl From<Method> for Methods {
    fn from(value: Method) -> Self {
        Methods::List(vec![value.as_str().to_string()])
    }
}

impl From<&[&str]> for Methods {
    fn from(value: &[&str]) -> Self {
        Methods::List(value.iter().map(|m| (*m).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Methods {
    fn from(value: [&str; N]) -> Self {
        Methods::from(&value[..])
    }
}

impl From<Vec<String>> for Methods {
    fn from(value: Vec<String>) -> Self {
        Methods::List(value)
    }
}

impl From<Vec<&str>> for Methods {
    fn from(value: Vec<&str>) -> Self {
        Methods::from(value.as_slice())
    }
}

/// Trim and upper-case a request method, returning it only if it is routable
#[must_use]
pub fn normalize_method(method: &str) -> Option<Method> {
    let upper = method.trim().to_ascii_uppercase();
    SUPPORTED_METHODS
        .iter()
        .find(|m| m.as_str() == upper)
        .cloned()
}
