use crate::handlers::{HandlerFn, HandlerRef, HandlerResolver, Params};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Resolver that answers every `Type@method` with a handler echoing its input
///
/// Lets a route file be exercised end to end without any application code.
/// The echoed document is `{ "handler": "Type@method", "params": [...] }`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoResolver;

impl HandlerResolver<Value> for EchoResolver {
    fn resolve(&self, reference: &HandlerRef) -> Option<HandlerFn<Value>> {
        let name = reference.to_string();
        Some(Arc::new(move |params: &Params| {
            info!(handler = %name, params = ?params, "Echo handler invoked");
            json!({
                "handler": name,
                "params": params,
            })
        }))
    }
}
