//! Metadata extraction from fetched HTML
//!
//! Scans for the small set of Open Graph and fallback tags a preview card
//! needs. Pattern-based on purpose: only a handful of tags matter, and the
//! scan never interprets markup beyond them.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::types::PageMetadata;

// Each meta target has two patterns because real pages emit attributes in
// both orders (property-first and content-first).
static OG_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta[^>]+property=["']og:title["'][^>]+content=["']([^"']*)["']"#).unwrap()
});

static OG_TITLE_RE2: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta[^>]+content=["']([^"']*)["'][^>]+property=["']og:title["']"#).unwrap()
});

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<title[^>]*>([^<]*)</title>").unwrap());

static OG_DESC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta[^>]+property=["']og:description["'][^>]+content=["']([^"']*)["']"#).unwrap()
});

static OG_DESC_RE2: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta[^>]+content=["']([^"']*)["'][^>]+property=["']og:description["']"#).unwrap()
});

static META_DESC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta[^>]+name=["']description["'][^>]+content=["']([^"']*)["']"#).unwrap()
});

static META_DESC_RE2: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta[^>]+content=["']([^"']*)["'][^>]+name=["']description["']"#).unwrap()
});

static OG_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta[^>]+property=["']og:image["'][^>]+content=["']([^"']*)["']"#).unwrap()
});

static OG_IMAGE_RE2: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta[^>]+content=["']([^"']*)["'][^>]+property=["']og:image["']"#).unwrap()
});

static OG_SITE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta[^>]+property=["']og:site_name["'][^>]+content=["']([^"']*)["']"#).unwrap()
});

static OG_SITE_RE2: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta[^>]+content=["']([^"']*)["'][^>]+property=["']og:site_name["']"#).unwrap()
});

/// Extract preview metadata from HTML
///
/// Pure function; never fails. Tags that are absent simply yield absent
/// fields. `base_url` is the URL the page was fetched from, used to
/// absolutize relative og:image values.
pub fn extract_metadata(html: &str, base_url: &Url) -> PageMetadata {
    PageMetadata {
        title: extract_title(html),
        description: extract_description(html),
        image_url: extract_image(html, base_url),
        site_name: extract_site_name(html),
    }
}

/// og:title, falling back to the title element
fn extract_title(html: &str) -> Option<String> {
    if let Some(value) = capture(html, &OG_TITLE_RE, &OG_TITLE_RE2) {
        return Some(value);
    }

    let raw = TITLE_RE.captures(html)?.get(1)?.as_str();
    clean_value(raw)
}

/// og:description, falling back to the meta description
fn extract_description(html: &str) -> Option<String> {
    capture(html, &OG_DESC_RE, &OG_DESC_RE2)
        .or_else(|| capture(html, &META_DESC_RE, &META_DESC_RE2))
}

/// og:image, resolved against the fetched URL; no fallback
fn extract_image(html: &str, base_url: &Url) -> Option<String> {
    let value = capture(html, &OG_IMAGE_RE, &OG_IMAGE_RE2)?;
    resolve_url(&value, base_url)
}

/// og:site_name; no fallback
fn extract_site_name(html: &str) -> Option<String> {
    capture(html, &OG_SITE_RE, &OG_SITE_RE2)
}

/// Try both attribute orders for one meta target
fn capture(html: &str, primary: &Regex, reversed: &Regex) -> Option<String> {
    let cap = primary.captures(html).or_else(|| reversed.captures(html))?;
    clean_value(cap.get(1)?.as_str())
}

/// Entity-decode and trim; empty values count as absent
fn clean_value(raw: &str) -> Option<String> {
    let value = decode_html_entities(raw).trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Resolve a possibly-relative URL against the page's own URL
fn resolve_url(raw: &str, base: &Url) -> Option<String> {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        Some(raw.to_string())
    } else {
        base.join(raw).ok().map(|u| u.to_string())
    }
}

/// Decode the named and numeric entities commonly seen in meta content
fn decode_html_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/article/1").unwrap()
    }

    #[test]
    fn test_og_title_preferred() {
        let html = r#"<html><head>
            <meta property="og:title" content="Test Title">
            <title>Ignored</title>
        </head><body>content</body></html>"#;

        let meta = extract_metadata(html, &base());
        assert_eq!(meta.title.as_deref(), Some("Test Title"));
    }

    #[test]
    fn test_title_element_fallback() {
        let html = "<html><head><title>Fallback Title</title></head></html>";
        let meta = extract_metadata(html, &base());
        assert_eq!(meta.title.as_deref(), Some("Fallback Title"));
    }

    #[test]
    fn test_meta_description_fallback() {
        let html = r#"<html><head><meta name="description" content="Meta Desc"></head></html>"#;
        let meta = extract_metadata(html, &base());
        assert_eq!(meta.description.as_deref(), Some("Meta Desc"));
    }

    #[test]
    fn test_og_description_preferred() {
        let html = r#"<html><head>
            <meta property="og:description" content="OG Desc">
            <meta name="description" content="Meta Desc">
        </head></html>"#;

        let meta = extract_metadata(html, &base());
        assert_eq!(meta.description.as_deref(), Some("OG Desc"));
    }

    #[test]
    fn test_image_and_site_name() {
        let html = r#"<html><head>
            <meta property="og:image" content="https://cdn.example.com/og.png">
            <meta property="og:site_name" content="Example News">
        </head></html>"#;

        let meta = extract_metadata(html, &base());
        assert_eq!(meta.image_url.as_deref(), Some("https://cdn.example.com/og.png"));
        assert_eq!(meta.site_name.as_deref(), Some("Example News"));
    }

    #[test]
    fn test_relative_image_is_absolutized() {
        let html = r#"<meta property="og:image" content="/images/og.png">"#;
        let meta = extract_metadata(html, &base());
        assert_eq!(
            meta.image_url.as_deref(),
            Some("https://example.com/images/og.png")
        );
    }

    #[test]
    fn test_empty_page_yields_all_absent() {
        let meta = extract_metadata("<html><body><p>Just text</p></body></html>", &base());
        assert!(meta.title.is_none());
        assert!(meta.description.is_none());
        assert!(meta.image_url.is_none());
        assert!(meta.site_name.is_none());
    }

    #[test]
    fn test_attribute_order_reversed() {
        let html = r#"<meta content="Reversed Title" property="og:title">"#;
        let meta = extract_metadata(html, &base());
        assert_eq!(meta.title.as_deref(), Some("Reversed Title"));
    }

    #[test]
    fn test_single_quoted_attributes() {
        let html = r#"<meta property='og:title' content='Single Quoted'>"#;
        let meta = extract_metadata(html, &base());
        assert_eq!(meta.title.as_deref(), Some("Single Quoted"));
    }

    #[test]
    fn test_values_are_trimmed() {
        let html = "<title>  Spaced Title  </title>";
        let meta = extract_metadata(html, &base());
        assert_eq!(meta.title.as_deref(), Some("Spaced Title"));
    }

    #[test]
    fn test_entities_are_decoded() {
        let html = r#"<meta property="og:title" content="Cats &amp; Dogs &#39;24">"#;
        let meta = extract_metadata(html, &base());
        assert_eq!(meta.title.as_deref(), Some("Cats & Dogs '24"));
    }

    #[test]
    fn test_empty_content_counts_as_absent() {
        let html = r#"<meta property="og:title" content="">"#;
        let meta = extract_metadata(html, &base());
        assert!(meta.title.is_none());
    }

    #[test]
    fn test_script_content_is_not_executed_or_matched() {
        let html = r#"<html><head>
            <script>document.title = "Injected";</script>
            <title>Real Title</title>
        </head></html>"#;

        let meta = extract_metadata(html, &base());
        assert_eq!(meta.title.as_deref(), Some("Real Title"));
    }
}
