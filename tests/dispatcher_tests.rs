//! Tests for the dispatcher phases
//!
//! # Test Coverage
//!
//! - First registered matching route wins; later matches never run
//! - Before-middleware runs in registration order before the route
//! - Middleware side effects persist when dispatch then fails
//! - Not-found handler suppresses `RouteNotFound`
//! - Deferred `Type@method` handlers resolve through the resolver
//!
//! Handlers record their invocations in a shared log so ordering and
//! exclusivity can be asserted.

use brrtmatch::dispatcher::Dispatcher;
use brrtmatch::handlers::{Handler, HandlerRef, HandlerRegistry, Params};
use brrtmatch::router::{Registrar, Router};
use brrtmatch::RouterError;
use std::sync::{Arc, Mutex};

type CallLog = Arc<Mutex<Vec<String>>>;

fn recording(log: &CallLog, name: &'static str) -> Handler<String> {
    let log = Arc::clone(log);
    Handler::from_fn(move |params: &Params| {
        let entry = format!("{name}{:?}", params.as_slice());
        log.lock().unwrap().push(entry.clone());
        entry
    })
}

fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

#[test]
fn test_handler_receives_positional_params() {
    let log = CallLog::default();
    let mut router = Router::new();
    router.get("/users/{id}", recording(&log, "show")).unwrap();
    router
        .get("/users/{id}/posts/(\\d+)", recording(&log, "post"))
        .unwrap();

    let dispatcher = Dispatcher::new(router);
    assert_eq!(dispatcher.dispatch("GET", "/users/42").unwrap(), "show[\"42\"]");
    assert_eq!(
        dispatcher.dispatch("get", "/users/7/posts/9").unwrap(),
        "post[\"7\", \"9\"]"
    );
}

#[test]
fn test_first_match_wins_others_never_invoked() {
    let log = CallLog::default();
    let mut router = Router::new();
    router.get("/items/{id}", recording(&log, "first")).unwrap();
    router.get("/items/(\\d+)", recording(&log, "second")).unwrap();
    router.get("/items/5", recording(&log, "third")).unwrap();

    let dispatcher = Dispatcher::new(router);
    assert_eq!(dispatcher.router().matches("GET", "/items/5").len(), 3);
    dispatcher.dispatch("GET", "/items/5").unwrap();
    assert_eq!(calls(&log), vec!["first[\"5\"]"]);
}

#[test]
fn test_optional_segment_route() {
    let log = CallLog::default();
    let mut router = Router::new();
    router.get("/albums/{year}?", recording(&log, "albums")).unwrap();

    let dispatcher = Dispatcher::new(router);
    assert_eq!(dispatcher.dispatch("GET", "/albums/2023").unwrap(), "albums[\"2023\"]");
    assert_eq!(dispatcher.dispatch("GET", "/albums").unwrap(), "albums[]");
    assert_eq!(dispatcher.dispatch("GET", "/albums/").unwrap(), "albums[]");
}

#[test]
fn test_middleware_runs_in_order_before_route() {
    let log = CallLog::default();
    let mut router = Router::new();
    router.before("GET", "/admin/.*", recording(&log, "auth")).unwrap();
    router.before("*", "/admin/.*", recording(&log, "audit")).unwrap();
    router.before("GET", "/admin/.*", recording(&log, "auth")).unwrap();
    router.before("GET", "/public", recording(&log, "never")).unwrap();
    router.get("/admin/{page}", recording(&log, "page")).unwrap();

    let dispatcher = Dispatcher::new(router);
    let result = dispatcher.dispatch("GET", "/admin/settings").unwrap();
    assert_eq!(result, "page[\"settings\"]");
    // Middleware is called without parameters, results are discarded.
    assert_eq!(
        calls(&log),
        vec!["auth[]", "audit[]", "auth[]", "page[\"settings\"]"]
    );
}

#[test]
fn test_route_not_found_without_handler() {
    let log = CallLog::default();
    let mut router = Router::new();
    router.get("/users/{id}", recording(&log, "show")).unwrap();

    let dispatcher = Dispatcher::new(router);
    let err = dispatcher.dispatch("post", "/users/42/?q=1").unwrap_err();
    assert_eq!(
        err,
        RouterError::RouteNotFound {
            method: "POST".to_string(),
            uri: "users/42".to_string(),
        }
    );
    assert!(calls(&log).is_empty());
}

#[test]
fn test_middleware_effects_survive_not_found() {
    let log = CallLog::default();
    let mut router = Router::new();
    router.before("*", "/.*", recording(&log, "logger")).unwrap();

    let dispatcher = Dispatcher::new(router);
    assert!(dispatcher.dispatch("GET", "/missing").unwrap_err().is_not_found());
    assert_eq!(calls(&log), vec!["logger[]"]);
}

#[test]
fn test_not_found_handler_suppresses_error() {
    let log = CallLog::default();
    let mut router = Router::new();
    router.get("/", recording(&log, "home")).unwrap();
    router
        .set_route_not_found_handler(recording(&log, "missing"))
        .unwrap();
    router
        .set_route_not_found_handler(recording(&log, "custom404"))
        .unwrap();

    let dispatcher = Dispatcher::new(router);
    assert_eq!(dispatcher.dispatch("GET", "/nope").unwrap(), "custom404[]");
    assert_eq!(dispatcher.dispatch("TRACE", "/").unwrap(), "custom404[]");
    assert_eq!(calls(&log), vec!["custom404[]", "custom404[]"]);
}

struct UserController {
    prefix: &'static str,
}

impl UserController {
    fn show(&self, params: &Params) -> String {
        format!("{} {}", self.prefix, params.get(0).unwrap_or("?"))
    }
}

#[test]
fn test_deferred_handlers_resolve_static_and_instance() {
    let mut registry = HandlerRegistry::<String>::new();
    registry.register_static("Pages", "about", |_| "about page".to_string());
    registry.register_instance(
        "UserController",
        "show",
        || UserController { prefix: "user" },
        UserController::show,
    );

    let mut router: Router<String> = Router::new();
    router.get("/about", "Pages@about").unwrap();
    router.get("/users/{id}", "UserController@show").unwrap();
    router.get("/ghost", "Ghost@boo").unwrap();

    let dispatcher = Dispatcher::new(router).with_resolver(registry);
    assert_eq!(dispatcher.dispatch("GET", "/about").unwrap(), "about page");
    assert_eq!(dispatcher.dispatch("GET", "/users/9").unwrap(), "user 9");
    assert_eq!(
        dispatcher.dispatch("GET", "/ghost").unwrap_err(),
        RouterError::UnresolvedHandler {
            reference: "Ghost@boo".to_string()
        }
    );
}

#[test]
fn test_deferred_without_resolver_fails_at_dispatch_not_registration() {
    let mut router: Router<String> = Router::new();
    router.get("/lazy", "Lazy@load").unwrap();
    let dispatcher = Dispatcher::new(router);
    assert!(matches!(
        dispatcher.dispatch("GET", "/lazy"),
        Err(RouterError::UnresolvedHandler { .. })
    ));
}

#[test]
fn test_closure_resolver() {
    let mut router: Router<String> = Router::new();
    router.get("/x/{v}", "Any@thing").unwrap();
    let dispatcher = Dispatcher::new(router).with_resolver(|r: &HandlerRef| {
        let name = r.to_string();
        Some(Arc::new(move |p: &Params| format!("{name}:{}", &p[0]))
            as brrtmatch::handlers::HandlerFn<String>)
    });
    assert_eq!(dispatcher.dispatch("GET", "/x/1").unwrap(), "Any@thing:1");
}

#[test]
fn test_dispatcher_shared_across_threads() {
    let mut router = Router::new();
    router
        .get("/echo/{v}", Handler::from_fn(|p: &Params| p[0].to_string()))
        .unwrap();
    let dispatcher = Arc::new(Dispatcher::new(router));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let dispatcher = Arc::clone(&dispatcher);
            std::thread::spawn(move || dispatcher.dispatch("GET", &format!("/echo/{t}")).unwrap())
        })
        .collect();
    let mut results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    results.sort();
    assert_eq!(results, vec!["0", "1", "2", "3"]);
}
