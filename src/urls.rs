/// URL normalization and origin checks for favorites
use url::Url;

/// Canonical comparison key for a page URL
///
/// Algorithm:
/// 1. Parse the URL
/// 2. Take the hostname (already lowercased by the parser) and the path
/// 3. Strip one trailing "/" from the path unless the path is exactly "/"
/// 4. Drop scheme, port, query and fragment
///
/// Unparseable input is returned unchanged, so lookups on it degrade to exact match.
///
/// Examples:
/// - https://Example.com/a/b/ → example.com/a/b
/// - https://example.com/a/b?x=1#top → example.com/a/b
/// - https://example.com/ → example.com/
pub fn normalize_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }

    match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or("").to_lowercase();
            let path = parsed.path();
            let path = if path.len() > 1 && path.ends_with('/') {
                &path[..path.len() - 1]
            } else {
                path
            };
            format!("{}{}", host, path)
        }
        Err(e) => {
            log::warn!("Failed to normalize URL {:?}: {}", url, e);
            url.to_string()
        }
    }
}

/// Two URLs name the same favorite when their normalized keys match
pub fn same_page(a: &str, b: &str) -> bool {
    normalize_url(a) == normalize_url(b)
}

/// Lowercased hostname of an absolute URL, if it has one
pub fn hostname(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|h| h.to_lowercase()))
        .filter(|h| !h.is_empty())
}

/// True iff the URL's hostname equals the current page's hostname.
/// Malformed or host-less URLs are never same-origin.
pub fn is_same_origin(url: &str, current_host: &str) -> bool {
    match hostname(url) {
        Some(host) => host.eq_ignore_ascii_case(current_host),
        None => false,
    }
}

/// Absolute form of a relative URL, resolved against `base`.
/// `None` when `url` is already absolute or cannot be resolved.
pub fn resolve_relative(url: &str, base: &str) -> Option<String> {
    if url.is_empty() || Url::parse(url).is_ok() {
        return None;
    }
    let base = Url::parse(base).ok()?;
    match base.join(url) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(e) => {
            log::warn!("Could not resolve {:?} against {}: {}", url, base, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_case_and_trailing_slash() {
        assert_eq!(
            normalize_url("https://Example.com/a/b/"),
            normalize_url("https://example.com/a/b")
        );
        assert_eq!(normalize_url("https://Example.com/a/b/"), "example.com/a/b");
    }

    #[test]
    fn test_normalize_keeps_root() {
        assert_eq!(normalize_url("https://example.com/"), "example.com/");
        assert_eq!(normalize_url("https://example.com"), "example.com/");
    }

    #[test]
    fn test_normalize_drops_scheme_query_fragment_port() {
        assert_eq!(normalize_url("http://example.com/docs?page=2#intro"), "example.com/docs");
        assert_eq!(normalize_url("https://example.com:8443/docs/"), "example.com/docs");
        assert_eq!(
            normalize_url("http://example.com/docs"),
            normalize_url("https://example.com/docs/")
        );
    }

    #[test]
    fn test_normalize_only_one_trailing_slash() {
        assert_eq!(normalize_url("https://example.com/a//"), "example.com/a/");
    }

    #[test]
    fn test_normalize_malformed_fails_open() {
        assert_eq!(normalize_url("not a url"), "not a url");
        assert_eq!(normalize_url("/docs/page.html"), "/docs/page.html");
        assert_eq!(normalize_url(""), "");
    }

    #[test]
    fn test_same_page() {
        assert!(same_page("https://docs.rs/serde/", "http://DOCS.rs/serde#derive"));
        assert!(!same_page("https://docs.rs/serde", "https://docs.rs/serde_json"));
    }

    #[test]
    fn test_hostname() {
        assert_eq!(hostname("https://WWW.Example.com/x"), Some("www.example.com".to_string()));
        assert_eq!(hostname("mailto:someone@example.com"), None);
        assert_eq!(hostname("garbage"), None);
    }

    #[test]
    fn test_is_same_origin() {
        assert!(is_same_origin("https://docs.example.com/guide", "docs.example.com"));
        assert!(is_same_origin("http://docs.example.com:8080/", "docs.example.com"));
        assert!(!is_same_origin("https://other.example.com/guide", "docs.example.com"));
        assert!(!is_same_origin("::not-a-url::", "docs.example.com"));
        assert!(!is_same_origin("", ""));
    }

    #[test]
    fn test_resolve_relative() {
        let base = "https://docs.example.com/guide/intro.html?x=1";
        assert_eq!(
            resolve_relative("/docs/oldest.html", base),
            Some("https://docs.example.com/docs/oldest.html".to_string())
        );
        assert_eq!(
            resolve_relative("setup.html", base),
            Some("https://docs.example.com/guide/setup.html".to_string())
        );
        assert_eq!(resolve_relative("https://other.org/a", base), None);
        assert_eq!(resolve_relative("", base), None);
        assert_eq!(resolve_relative("/a", "not a base"), None);
    }
}
