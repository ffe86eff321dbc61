//! URL helpers for turning scraped image references into absolute URLs.

use std::collections::HashSet;

/// Make a scraped URL absolute
///
/// - `//host/path` gets the `https:` scheme
/// - `/path` gets the site origin
/// - anything else passes through unchanged
///
/// Blank or absent input yields `None`.
///
/// # Examples
///
/// ```rust
/// use encar_bot::url_normalizer::normalize_url;
///
/// let origin = "https://m.encar.com";
/// assert_eq!(normalize_url(Some("/img/1.jpg"), origin).as_deref(), Some("https://m.encar.com/img/1.jpg"));
/// assert_eq!(normalize_url(Some("//ci.encar.com/a.jpg"), origin).as_deref(), Some("https://ci.encar.com/a.jpg"));
/// assert_eq!(normalize_url(None, origin), None);
/// ```
pub fn normalize_url(raw: Option<&str>, origin: &str) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.starts_with("//") {
        Some(format!("https:{raw}"))
    } else if raw.starts_with('/') {
        Some(format!("{}{raw}", origin.trim_end_matches('/')))
    } else {
        Some(raw.to_string())
    }
}

/// Remove duplicates while keeping the first occurrence of each URL
pub fn dedup_preserving_order(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(urls.len());
    urls.into_iter()
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://m.encar.com";

    #[test]
    fn test_protocol_relative() {
        assert_eq!(
            normalize_url(Some("//cdn/a.jpg"), ORIGIN),
            Some("https://cdn/a.jpg".to_string())
        );
    }

    #[test]
    fn test_root_relative() {
        assert_eq!(
            normalize_url(Some("/a.jpg"), ORIGIN),
            Some("https://m.encar.com/a.jpg".to_string())
        );
        assert_eq!(
            normalize_url(Some("/a.jpg"), "https://m.encar.com/"),
            Some("https://m.encar.com/a.jpg".to_string())
        );
    }

    #[test]
    fn test_absolute_and_other_pass_through() {
        assert_eq!(
            normalize_url(Some("http://x.org/a.jpg"), ORIGIN),
            Some("http://x.org/a.jpg".to_string())
        );
        assert_eq!(
            normalize_url(Some("img/a.jpg"), ORIGIN),
            Some("img/a.jpg".to_string())
        );
    }

    #[test]
    fn test_absent_input() {
        assert_eq!(normalize_url(None, ORIGIN), None);
        assert_eq!(normalize_url(Some(""), ORIGIN), None);
        assert_eq!(normalize_url(Some("   "), ORIGIN), None);
    }

    #[test]
    fn test_dedup_keeps_first_seen_order() {
        let urls = ["/a.jpg", "//cdn/a.jpg", "/a.jpg"]
            .iter()
            .filter_map(|u| normalize_url(Some(u), ORIGIN))
            .collect();

        assert_eq!(
            dedup_preserving_order(urls),
            vec![
                "https://m.encar.com/a.jpg".to_string(),
                "https://cdn/a.jpg".to_string()
            ]
        );
    }
}
