// src/resource/resolve.rs
// =============================================================================
// Turns whatever appears in an href/src attribute into an absolute URL.
//
// Url::join implements RFC 3986 reference resolution:
//   base = "https://example.com/a/page"
//   "https://other.com/x" -> "https://other.com/x"     (absolute, passes through)
//   "//cdn.example.com/y" -> "https://cdn.example.com/y" (scheme-relative)
//   "../img/z.png"        -> "https://example.com/img/z.png"
//   "#top"                -> "https://example.com/a/page#top"
//
// The result is compared as-is: no trailing-slash or query reordering.
// =============================================================================

use url::Url;

/// Resolves `reference` against `base`.
///
/// Returns None when the reference can't be parsed at all; callers drop
/// those silently.
pub fn resolve(base: &Url, reference: &str) -> Option<Url> {
    base.join(reference).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/a/page").unwrap()
    }

    #[test]
    fn test_resolve_absolute_link() {
        let result = resolve(&base(), "https://other.com");
        assert_eq!(result.unwrap().as_str(), "https://other.com/");
    }

    #[test]
    fn test_resolve_scheme_relative_link() {
        let result = resolve(&base(), "//cdn.example.com/y.png");
        assert_eq!(result.unwrap().as_str(), "https://cdn.example.com/y.png");
    }

    #[test]
    fn test_resolve_relative_link() {
        assert_eq!(
            resolve(&base(), "/docs").unwrap().as_str(),
            "https://example.com/docs"
        );
        assert_eq!(
            resolve(&base(), "../img/z.png").unwrap().as_str(),
            "https://example.com/img/z.png"
        );
        assert_eq!(
            resolve(&base(), "other").unwrap().as_str(),
            "https://example.com/a/other"
        );
    }

    #[test]
    fn test_fragment_is_kept() {
        let result = resolve(&base(), "#top");
        assert_eq!(result.unwrap().as_str(), "https://example.com/a/page#top");
    }

    #[test]
    fn test_no_normalization_between_variants() {
        let with_slash = resolve(&base(), "/docs/").unwrap();
        let without = resolve(&base(), "/docs").unwrap();
        assert_ne!(with_slash, without);
    }

    #[test]
    fn test_unparseable_reference() {
        assert_eq!(resolve(&base(), "http://[::1"), None);
    }
}
