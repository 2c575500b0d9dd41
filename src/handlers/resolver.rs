use super::types::{HandlerFn, HandlerRef, Params};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Turns a deferred `Type@method` reference into something callable
///
/// The router never looks inside a reference beyond checking its shape; any
/// lookup mechanism (a static table, a plugin registry, generated code) can
/// sit behind this trait.
pub trait HandlerResolver<T>: Send + Sync {
    fn resolve(&self, reference: &HandlerRef) -> Option<HandlerFn<T>>;
}

impl<T, F> HandlerResolver<T> for F
where
    F: Fn(&HandlerRef) -> Option<HandlerFn<T>> + Send + Sync,
{
    fn resolve(&self, reference: &HandlerRef) -> Option<HandlerFn<T>> {
        self(reference)
    }
}

/// Table-backed resolver supporting static and instance call conventions
///
/// A `Type@method` pair may be bound as a static function, or as a method on
/// a value built by a factory. Static bindings win; an instance binding builds
/// a fresh value for every invocation.
///
/// ```
/// use brrtmatch::handlers::{HandlerRef, HandlerRegistry, HandlerResolver, Params};
///
/// struct Greeter { greeting: &'static str }
///
/// let mut registry = HandlerRegistry::<String>::new();
/// registry.register_instance(
///     "Greeter",
///     "hello",
///     || Greeter { greeting: "hello" },
///     |g: &Greeter, p: &Params| format!("{} {}", g.greeting, p.get(0).unwrap_or("world")),
/// );
///
/// let reference = HandlerRef::parse("Greeter@hello").unwrap();
/// let handler = registry.resolve(&reference).unwrap();
/// assert_eq!(handler(&Params::new()), "hello world");
/// ```
pub struct HandlerRegistry<T> {
    statics: HashMap<HandlerRef, HandlerFn<T>>,
    instances: HashMap<HandlerRef, HandlerFn<T>>,
}

impl<T> Default for HandlerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HandlerRegistry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            statics: HashMap::new(),
            instances: HashMap::new(),
        }
    }

    fn key(type_name: &str, method_name: &str) -> HandlerRef {
        HandlerRef {
            type_name: type_name.to_string(),
            method_name: method_name.to_string(),
        }
    }

    /// Bind `type_name@method_name` to a free function
    pub fn register_static<F>(&mut self, type_name: &str, method_name: &str, f: F)
    where
        F: Fn(&Params) -> T + Send + Sync + 'static,
    {
        debug!(type_name, method_name, "Static handler registered");
        self.statics
            .insert(Self::key(type_name, method_name), Arc::new(f));
    }

    /// Bind `type_name@method_name` to a method on a value built by `factory`
    pub fn register_instance<S, C, M>(
        &mut self,
        type_name: &str,
        method_name: &str,
        factory: C,
        method: M,
    ) where
        S: 'static,
        C: Fn() -> S + Send + Sync + 'static,
        M: Fn(&S, &Params) -> T + Send + Sync + 'static,
    {
        debug!(type_name, method_name, "Instance handler registered");
        let invoker = move |params: &Params| {
            let instance = factory();
            method(&instance, params)
        };
        self.instances
            .insert(Self::key(type_name, method_name), Arc::new(invoker));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statics.len() + self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> HandlerResolver<T> for HandlerRegistry<T> {
    fn resolve(&self, reference: &HandlerRef) -> Option<HandlerFn<T>> {
        self.statics
            .get(reference)
            .or_else(|| self.instances.get(reference))
            .map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_static_binding_preferred_over_instance() {
        let mut registry = HandlerRegistry::<&'static str>::new();
        registry.register_instance("Users", "show", || (), |_: &(), _: &Params| "instance");
        registry.register_static("Users", "show", |_| "static");
        let handler = registry
            .resolve(&HandlerRef::parse("Users@show").unwrap())
            .unwrap();
        assert_eq!(handler(&Params::new()), "static");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_instance_binding_builds_fresh_value_per_call() {
        static BUILT: AtomicUsize = AtomicUsize::new(0);
        let mut registry = HandlerRegistry::<usize>::new();
        registry.register_instance(
            "Counter",
            "built",
            || BUILT.fetch_add(1, Ordering::SeqCst) + 1,
            |n: &usize, _: &Params| *n,
        );
        let handler = registry
            .resolve(&HandlerRef::parse("Counter@built").unwrap())
            .unwrap();
        assert_eq!(handler(&Params::new()), 1);
        assert_eq!(handler(&Params::new()), 2);
    }

    #[test]
    fn test_unknown_reference_is_none() {
        let registry = HandlerRegistry::<()>::new();
        assert!(registry.is_empty());
        assert!(registry
            .resolve(&HandlerRef::parse("Missing@method").unwrap())
            .is_none());
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |r: &HandlerRef| -> Option<HandlerFn<String>> {
            let name = r.to_string();
            Some(Arc::new(move |_: &Params| name.clone()))
        };
        let handler = resolver
            .resolve(&HandlerRef::parse("A@b").unwrap())
            .unwrap();
        assert_eq!(handler(&Params::new()), "A@b");
    }
}
