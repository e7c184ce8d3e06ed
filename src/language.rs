//! Language fragments in request paths: `en`, `de-CH` and so on.

use once_cell::sync::Lazy;
use regex::Regex;

static PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]{2}(-[A-Z]{2})?/").unwrap());
static BARE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]{2}(-[A-Z]{2})?$").unwrap());

/// Whether the path starts with a language fragment followed by a slash.
pub fn has_prefix(path: &str) -> bool {
    PREFIX.is_match(path)
}

/// Whether the path is nothing but a language code.
pub fn is_bare(path: &str) -> bool {
    BARE.is_match(path)
}

/// Splits off the leading language fragment, if any.
pub fn split_prefix(path: &str) -> (Option<&str>, &str) {
    match PREFIX.find(path) {
        Some(prefix) => (Some(&path[..prefix.end() - 1]), &path[prefix.end()..]),
        None => (None, path),
    }
}
