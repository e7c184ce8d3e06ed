//! Root page detection.

use crate::pages::Page;

/// Picks the root page for the host and the requested language.
///
/// Roots bound to the host take precedence over the ones serving any host.
/// Among those, the one with the requested language wins, then the fallback root, then the first one.
pub fn select(roots: Vec<Page>, host: &str, language: Option<&str>) -> Option<Page> {
    let (bound, unbound): (Vec<Page>, Vec<Page>) =
        roots.into_iter().partition(|root| !root.dns.is_empty() && root.dns == host);
    let candidates = if bound.is_empty() { unbound } else { bound };

    let position = language
        .and_then(|language| candidates.iter().position(|root| root.language == language))
        .or_else(|| candidates.iter().position(|root| root.fallback))
        .or_else(|| (!candidates.is_empty()).then_some(0))?;
    candidates.into_iter().nth(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::PageType;

    fn root(id: i64, dns: &str, language: &str, fallback: bool) -> Page {
        let mut page = Page::new(id, 0, PageType::Root);
        page.dns = dns.to_string();
        page.language = language.to_string();
        page.fallback = fallback;
        page
    }

    #[test]
    fn select_bound_first_ok() {
        let roots = vec![root(1, "", "en", true), root(2, "example.org", "de", false)];
        assert_eq!(select(roots, "example.org", None).map(|root| root.id), Some(2));
    }

    #[test]
    fn select_language_ok() {
        let roots = vec![root(1, "", "en", true), root(2, "", "de", false)];
        assert_eq!(select(roots, "example.org", Some("de")).map(|root| root.id), Some(2));
    }

    #[test]
    fn select_fallback_ok() {
        let roots = vec![root(1, "", "en", false), root(2, "", "de", true)];
        assert_eq!(select(roots.clone(), "example.org", None).map(|root| root.id), Some(2));
        assert_eq!(select(roots, "example.org", Some("fr")).map(|root| root.id), Some(2));
    }

    #[test]
    fn select_first_ok() {
        let roots = vec![root(1, "", "en", false), root(2, "", "de", false)];
        assert_eq!(select(roots, "example.org", None).map(|root| root.id), Some(1));
    }

    #[test]
    fn select_empty_ok() {
        assert!(select(Vec::new(), "example.org", Some("en")).is_none());
    }
}
