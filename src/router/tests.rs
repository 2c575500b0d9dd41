use super::core::join_prefix;
use super::{compile_pattern, extract_params, pattern_to_regex_source, Registrar, Router};
use crate::error::{InvalidRouteKind, RouterError};
use crate::handlers::Handler;
use http::Method;

fn params_of(pattern: &str, uri: &str) -> Option<Vec<String>> {
    let re = compile_pattern(pattern).unwrap();
    extract_params(&re, uri).map(|p| p.into_vec())
}

fn noop() -> Handler<()> {
    Handler::from_fn(|_| ())
}

#[test]
fn test_root_pattern() {
    assert_eq!(pattern_to_regex_source(""), "^/$");
    assert_eq!(params_of("", ""), Some(vec![]));
    assert_eq!(params_of("", "a"), None);
}

#[test]
fn test_placeholder_translation() {
    assert_eq!(pattern_to_regex_source("users/{id}"), "^/users/(.*?)$");
    assert_eq!(pattern_to_regex_source("{slug}"), "^/(.*?)$");
    assert_eq!(
        pattern_to_regex_source("albums/{year}?"),
        "^/albums(?:/(.*?))?$"
    );
    assert_eq!(pattern_to_regex_source(r"movies(/\d+)?"), r"^/movies(/\d+)?$");
}

#[test]
fn test_only_identifier_placeholders_are_translated() {
    assert_eq!(pattern_to_regex_source("q/{user_id2}"), "^/q/(.*?)$");
    assert_eq!(pattern_to_regex_source(r"q/{id:\d+}"), r"^/q/{id:\d+}$");
    assert_eq!(pattern_to_regex_source("q/{}"), "^/q/{}$");
    assert_eq!(pattern_to_regex_source("q/{1st}"), "^/q/{1st}$");
}

#[test]
fn test_constrained_brace_group_is_invalid_pattern() {
    let mut router = Router::new();
    let err = router.get(r"/q/{id:\d+}", noop()).unwrap_err();
    assert!(matches!(
        err,
        RouterError::InvalidRoute(InvalidRouteKind::InvalidPattern { .. })
    ));
    assert_eq!(router.route_count(), 0);
}

#[test]
fn test_static_pattern_matches_only_itself() {
    assert_eq!(params_of("about/team", "about/team"), Some(vec![]));
    assert_eq!(params_of("about/team", "about/team/x"), None);
    assert_eq!(params_of("about/team", "about"), None);
    assert_eq!(params_of("About", "about"), None);
}

#[test]
fn test_placeholder_captures_positionally() {
    assert_eq!(
        params_of("users/{id}/posts/{post}", "users/7/posts/hello"),
        Some(vec!["7".to_string(), "hello".to_string()])
    );
    assert_eq!(params_of("{slug}", "anything"), Some(vec!["anything".to_string()]));
}

#[test]
fn test_placeholder_spans_segments_non_greedily() {
    assert_eq!(
        params_of("files/{a}/{b}", "files/x/y/z"),
        Some(vec!["x".to_string(), "y/z".to_string()])
    );
}

#[test]
fn test_mixed_placeholders_and_raw_regex() {
    assert_eq!(
        params_of(r"blog/(\d+)/{slug}", "blog/2023/hello-world"),
        Some(vec!["2023".to_string(), "hello-world".to_string()])
    );
    assert_eq!(params_of(r"blog/(\d+)/{slug}", "blog/abc/hello"), None);
}

#[test]
fn test_optional_placeholder() {
    assert_eq!(
        params_of("albums/{year}?", "albums/2023"),
        Some(vec!["2023".to_string()])
    );
    assert_eq!(params_of("albums/{year}?", "albums"), Some(vec![]));
    assert_eq!(params_of("albums/{year}?", "albumsX"), None);
}

#[test]
fn test_optional_raw_group_is_slash_trimmed() {
    assert_eq!(params_of(r"movies(/\d+)?", "movies/42"), Some(vec!["42".to_string()]));
    assert_eq!(params_of(r"movies(/\d+)?", "movies"), Some(vec![]));
}

#[test]
fn test_nested_optional_groups_are_split() {
    let pattern = r"blog(/\d+(/\d+(/\d+)?)?)?";
    assert_eq!(params_of(pattern, "blog"), Some(vec![]));
    assert_eq!(params_of(pattern, "blog/2023"), Some(vec!["2023".to_string()]));
    assert_eq!(
        params_of(pattern, "blog/2023/07/15"),
        Some(vec!["2023".to_string(), "07".to_string(), "15".to_string()])
    );
}

#[test]
fn test_absent_interior_group_is_empty_string() {
    assert_eq!(
        params_of(r"report(/x\d+)?/(\w+)", "report/summary"),
        Some(vec![String::new(), "summary".to_string()])
    );
}

#[test]
fn test_join_prefix() {
    assert_eq!(join_prefix("", "/users/"), "users");
    assert_eq!(join_prefix("api", "/users"), "api/users");
    assert_eq!(join_prefix("api", "/"), "api");
    assert_eq!(join_prefix("", ""), "");
}

#[test]
fn test_duplicate_pattern_same_method_rejected() {
    let mut router = Router::new();
    router.get("/users/{id}", noop()).unwrap();
    let err = router.get("users/{id}/", noop()).unwrap_err();
    assert_eq!(
        err,
        RouterError::InvalidRoute(InvalidRouteKind::DuplicatePattern {
            method: "GET".to_string(),
            pattern: "users/{id}".to_string(),
        })
    );
    // Different spelling of an equivalent pattern is a different pattern.
    router.get("/users/{user}", noop()).unwrap();
    router.post("/users/{id}", noop()).unwrap();
}

#[test]
fn test_failed_multi_method_registration_changes_nothing() {
    let mut router = Router::new();
    router.post("/items", noop()).unwrap();
    assert!(router.add_route("GET|POST", "/items", noop()).is_err());
    assert_eq!(router.routes_for(&Method::GET).count(), 0);
    assert_eq!(router.route_count(), 1);
}

#[test]
fn test_route_shared_across_methods() {
    let mut router = Router::new();
    router.add_route(["get", "put"], "/items/{id}", noop()).unwrap();
    let get = router.routes_for(&Method::GET).next().unwrap();
    let put = router.routes_for(&Method::PUT).next().unwrap();
    assert!(std::sync::Arc::ptr_eq(get, put));
}

#[test]
fn test_invalid_regex_rejected_at_registration() {
    let mut router = Router::new();
    let err = router.get("/broken/(\\d+", noop()).unwrap_err();
    assert!(matches!(
        err,
        RouterError::InvalidRoute(InvalidRouteKind::InvalidPattern { .. })
    ));
    assert_eq!(router.route_count(), 0);
}

#[test]
fn test_unknown_method_matches_nothing() {
    let mut router = Router::new();
    router.any("/x", noop()).unwrap();
    assert_eq!(router.matches("TRACE", "/x").len(), 0);
    assert_eq!(router.matches(" get ", "/x").len(), 1);
    assert_eq!(router.matches("options", "/x").len(), 1);
}

#[test]
fn test_base_path_is_stripped() {
    let mut router = Router::new();
    router.set_base_path("/api/");
    router.get("/users", noop()).unwrap();
    assert_eq!(router.base_path(), "api");
    assert_eq!(router.matches("GET", "/api/users").len(), 1);
    assert_eq!(router.matches("GET", "/users").len(), 1);
    assert_eq!(router.matches("GET", "/apiusers").len(), 0);
}

#[test]
fn test_all_path_patterns_in_method_order() {
    let mut router = Router::new();
    router.post("/b", noop()).unwrap();
    router.get("/a", noop()).unwrap();
    router.get("/c", noop()).unwrap();
    assert_eq!(router.get_all_path_patterns(), vec!["a", "c", "b"]);
}
