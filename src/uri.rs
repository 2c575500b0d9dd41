//! Request URI cleaning shared by route and middleware matching.

/// Reduce a raw request URI to the form patterns are matched against
///
/// Whitespace is trimmed, everything from the first `?` or `#` is dropped
/// and leading/trailing `/` are removed. Percent-escapes are left alone, so
/// `a%2Fb` stays one segment and never reaches a route written as `a/b`.
///
/// ```
/// use brrtmatch::uri::clean_uri;
///
/// assert_eq!(clean_uri(" /users/42/?page=2#top "), "users/42");
/// assert_eq!(clean_uri("/a%20b"), "a%20b");
/// assert_eq!(clean_uri("/"), "");
/// ```
#[must_use]
pub fn clean_uri(uri: &str) -> String {
    let uri = uri.trim();
    let path = match uri.find(['?', '#']) {
        Some(idx) => &uri[..idx],
        None => uri,
    };
    path.trim_matches('/').to_string()
}

/// Strip a mount prefix from a cleaned URI
///
/// The prefix only applies at a segment boundary: base `api` strips
/// `api/users` to `users` but leaves `apiary` untouched.
#[must_use]
pub fn strip_base_path<'a>(cleaned: &'a str, base_path: &str) -> &'a str {
    let base = base_path.trim_matches('/');
    if base.is_empty() {
        return cleaned;
    }
    match cleaned.strip_prefix(base) {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => cleaned,
    }
}
