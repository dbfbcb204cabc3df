//! Utility functions and helpers.

pub mod http;
pub mod text;

#[cfg(test)]
pub(crate) mod test_server;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Resolve a URL string against an optional base URL.
///
/// Without a base, or when joining fails, the raw `href` is returned.
pub fn resolve_or_raw(base: Option<&Url>, href: &str) -> String {
    match base {
        Some(base) => resolve_url(base, href),
        None => href.to_string(),
    }
}
