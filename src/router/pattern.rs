//! Pattern compiler: route templates to anchored regular expressions.
//!
//! Templates and cleaned URIs are both slash-trimmed. Compilation works on the
//! template with a leading `/` restored, so `{id}` in the first segment is
//! still recognised, and matching is done against `"/" + cleaned_uri`.
//!
//! | Template          | Compiled                    |
//! |-------------------|-----------------------------|
//! | `users/{id}`      | `^/users/(.*?)$`            |
//! | `albums/{year}?`  | `^/albums(?:/(.*?))?$`      |
//! | `movies(/\d+)?`   | `^/movies(/\d+)?$`          |
//! | *(empty)*         | `^/$`                       |

use crate::handlers::Params;
use once_cell::sync::Lazy;
use regex::{Captures, Match, Regex};

/// `/{name}` with an optional trailing `?`; `name` must be an identifier
///
/// Any other brace group, such as `{id:\d+}`, is left for the regex engine.
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/\{[A-Za-z_][A-Za-z0-9_]*\}(\?)?").expect("placeholder regex should be valid")
});

/// Translate placeholders and anchor the template
///
/// Everything other than `/{name}` and `/{name}?` is passed to the regex
/// engine untouched, including caller-supplied capture groups.
#[must_use]
pub fn pattern_to_regex_source(pattern: &str) -> String {
    let source = format!("/{pattern}");
    let replaced = PLACEHOLDER_REGEX.replace_all(&source, |caps: &Captures<'_>| {
        if caps.get(1).is_some() {
            "(?:/(.*?))?"
        } else {
            "/(.*?)"
        }
    });
    format!("^{replaced}$")
}

/// Compile a slash-trimmed route template
pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&pattern_to_regex_source(pattern))
}

/// Test a cleaned URI against a compiled template and collect its captures
///
/// Returns `None` when the URI does not match. Captures are positional and
/// have surrounding `/` trimmed. A capture that encloses the next capture is
/// cut where the inner one starts, so `(/\d+(/\d+)?)?` on `/1/2` yields
/// `["1", "2"]`. Trailing groups that did not participate are omitted; a
/// non-participating group before a participating one becomes `""`.
#[must_use]
pub fn extract_params(regex: &Regex, cleaned_uri: &str) -> Option<Params> {
    let subject = format!("/{cleaned_uri}");
    let caps = regex.captures(&subject)?;

    let groups: Vec<Option<Match<'_>>> = caps.iter().skip(1).collect();
    let mut params = Params::new();
    let Some(last) = groups.iter().rposition(Option::is_some) else {
        return Some(params);
    };

    for (i, group) in groups[..=last].iter().enumerate() {
        let value = match group {
            None => "",
            Some(m) => {
                let end = match groups.get(i + 1) {
                    Some(Some(next)) if next.start() >= m.start() && next.start() < m.end() => {
                        next.start()
                    }
                    _ => m.end(),
                };
                subject[m.start()..end].trim_matches('/')
            }
        };
        params.push(value);
    }

    Some(params)
}
