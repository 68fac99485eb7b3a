use std::time::Duration;

use scraper::{
    Html,
    Selector,
};

use crate::core::{
    http,
    ReflinksError,
};

const FETCH_TIMEOUT: Duration = Duration::from_secs(6);

/// What one GET came back with, reduced to the fields the pipeline inspects.
pub struct Fetched {
    pub success: bool,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl Fetched {
    fn is_image(&self) -> bool {
        is_image_content_type(&self.content_type)
    }
}

/// Prefixes a scheme when the stored website omits one.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Host portion of a normalized URL (`https://host/...`).
pub fn host_of(normalized: &str) -> Option<&str> {
    normalized.split('/').nth(2).filter(|host| !host.is_empty())
}

/// Scheme of a normalized URL; anything that is not plain http counts as
/// https.
pub fn scheme_of(normalized: &str) -> &'static str {
    if normalized.starts_with("http://") {
        "http"
    } else {
        "https"
    }
}

/// A response counts as an icon only when the server says so.
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type.contains("image")
}

/// First `<link>` whose `rel` contains "icon" (case-insensitive), href
/// returned verbatim for the caller to resolve.
pub fn find_icon_href(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("link").ok()?;
    for link in document.select(&selector) {
        let rel = link.value().attr("rel").unwrap_or("");
        if rel.to_lowercase().contains("icon") {
            if let Some(href) = link.value().attr("href") {
                if !href.trim().is_empty() {
                    return Some(href.to_string());
                }
            }
        }
    }
    None
}

/// Resolves an icon href against the site: protocol-relative, absolute, and
/// site-relative forms.
pub fn resolve_icon_href(href: &str, scheme: &str, host: &str) -> String {
    if href.starts_with("//") {
        format!("{scheme}:{href}")
    } else if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}://{}/{}", scheme, host, href.trim_start_matches('/'))
    }
}

/// The favicon pipeline: try `/favicon.ico`, fall back to parsing the site's
/// HTML for a link tag. Returns raw image bytes; the caller re-encodes to
/// PNG. Runs synchronously with a 6 s per-request timeout.
pub fn fetch_favicon(website: &str) -> Result<Vec<u8>, ReflinksError> {
    let client = http::client(FETCH_TIMEOUT)?;
    fetch_favicon_with(website, |url| {
        let response = client.get(url).send()?;
        let success = response.status().is_success();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();
        Ok(Fetched { success, content_type, body: response.bytes()?.to_vec() })
    })
}

/// The pipeline itself, over an injected fetch so the step ordering is
/// testable without a network.
pub fn fetch_favicon_with<F>(website: &str, fetch: F) -> Result<Vec<u8>, ReflinksError>
where
    F: Fn(&str) -> Result<Fetched, ReflinksError>,
{
    let url = normalize_url(website.trim());
    let scheme = scheme_of(&url);
    let host = host_of(&url)
        .ok_or_else(|| ReflinksError::Custom(format!("Could not determine host from {url}")))?;

    // Step 1: the conventional location. Any failure here just falls through.
    let ico_url = format!("{scheme}://{host}/favicon.ico");
    if let Ok(response) = fetch(&ico_url) {
        if response.success && response.is_image() && !response.body.is_empty() {
            return Ok(response.body);
        }
    }

    // Step 2: whatever the page itself declares.
    let page = fetch(&url)?;
    let html = String::from_utf8_lossy(&page.body);
    let href = find_icon_href(&html)
        .ok_or_else(|| ReflinksError::Custom("Favicon not found.".to_string()))?;
    let icon_url = resolve_icon_href(&href, scheme, host);

    let response = fetch(&icon_url)?;
    if response.success && response.is_image() && !response.body.is_empty() {
        return Ok(response.body);
    }
    Err(ReflinksError::Custom("Favicon not found or not an image.".to_string()))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn normalize_url_prefixes_missing_scheme() {
        assert_eq!(normalize_url("kraken.com"), "https://kraken.com");
        assert_eq!(normalize_url("https://kraken.com"), "https://kraken.com");
        assert_eq!(normalize_url("http://kraken.com"), "http://kraken.com");
    }

    #[test]
    fn host_of_extracts_the_authority() {
        assert_eq!(host_of("https://kraken.com/pro"), Some("kraken.com"));
        assert_eq!(host_of("https://kraken.com"), Some("kraken.com"));
        assert_eq!(host_of("https://"), None);
    }

    #[test]
    fn icon_href_resolution_covers_all_three_forms() {
        assert_eq!(
            resolve_icon_href("//cdn.example.com/i.png", "https", "kraken.com"),
            "https://cdn.example.com/i.png"
        );
        assert_eq!(resolve_icon_href("https://x.com/i.png", "https", "kraken.com"), "https://x.com/i.png");
        assert_eq!(resolve_icon_href("/icons/a.png", "https", "kraken.com"), "https://kraken.com/icons/a.png");
        assert_eq!(resolve_icon_href("icons/a.png", "http", "kraken.com"), "http://kraken.com/icons/a.png");
    }

    #[test]
    fn scheme_of_defaults_to_https() {
        assert_eq!(scheme_of("http://kraken.com"), "http");
        assert_eq!(scheme_of("https://kraken.com"), "https");
    }

    #[test]
    fn finds_link_rel_icon_case_insensitively() {
        let html = r#"<html><head>
            <link rel="stylesheet" href="/main.css">
            <link rel="Shortcut Icon" href="/icons/a.png">
        </head></html>"#;
        assert_eq!(find_icon_href(html), Some("/icons/a.png".to_string()));
    }

    #[test]
    fn ignores_icon_links_without_href() {
        let html = r#"<head><link rel="icon"><link rel="apple-touch-icon" href="/apple.png"></head>"#;
        assert_eq!(find_icon_href(html), Some("/apple.png".to_string()));
        assert_eq!(find_icon_href("<head></head>"), None);
    }

    #[test]
    fn content_type_acceptance() {
        assert!(is_image_content_type("image/x-icon"));
        assert!(is_image_content_type("image/png; charset=binary"));
        assert!(!is_image_content_type("text/html; charset=utf-8"));
    }

    fn image(body: &[u8]) -> Fetched {
        Fetched { success: true, content_type: "image/x-icon".to_string(), body: body.to_vec() }
    }

    fn html(body: &str) -> Fetched {
        Fetched {
            success: true,
            content_type: "text/html; charset=utf-8".to_string(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn successful_ico_probe_skips_html_parsing() {
        let requested = RefCell::new(Vec::new());
        let bytes = fetch_favicon_with("https://kraken.com", |url| {
            requested.borrow_mut().push(url.to_string());
            match url {
                "https://kraken.com/favicon.ico" => Ok(image(b"icon-bytes")),
                other => panic!("unexpected request to {other}"),
            }
        })
        .unwrap();
        assert_eq!(bytes, b"icon-bytes");
        assert_eq!(*requested.borrow(), vec!["https://kraken.com/favicon.ico"]);
    }

    #[test]
    fn non_image_ico_falls_back_to_link_tag() {
        let page = r#"<head><link rel="icon" href="/static/fav.png"></head>"#;
        let bytes = fetch_favicon_with("kraken.com", |url| match url {
            "https://kraken.com/favicon.ico" => Ok(html("<html>404 page</html>")),
            "https://kraken.com" => Ok(html(page)),
            "https://kraken.com/static/fav.png" => Ok(image(b"png-bytes")),
            other => panic!("unexpected request to {other}"),
        })
        .unwrap();
        assert_eq!(bytes, b"png-bytes");
    }

    #[test]
    fn empty_ico_body_falls_through_to_link_tag() {
        let page = r#"<head><link rel="icon" href="//cdn.example.com/i.png"></head>"#;
        let bytes = fetch_favicon_with("https://kraken.com", |url| match url {
            "https://kraken.com/favicon.ico" => Ok(image(b"")),
            "https://kraken.com" => Ok(html(page)),
            "https://cdn.example.com/i.png" => Ok(image(b"cdn-bytes")),
            other => panic!("unexpected request to {other}"),
        })
        .unwrap();
        assert_eq!(bytes, b"cdn-bytes");
    }

    #[test]
    fn failed_ico_probe_falls_through_to_link_tag() {
        let page = r#"<head><link rel="icon" href="/fav.ico"></head>"#;
        let bytes = fetch_favicon_with("http://kraken.com", |url| match url {
            "http://kraken.com/favicon.ico" => {
                Err(ReflinksError::Custom("connection refused".to_string()))
            }
            "http://kraken.com" => Ok(html(page)),
            "http://kraken.com/fav.ico" => Ok(image(b"ico-bytes")),
            other => panic!("unexpected request to {other}"),
        })
        .unwrap();
        assert_eq!(bytes, b"ico-bytes");
    }

    #[test]
    fn page_without_link_tag_reports_not_found() {
        let result = fetch_favicon_with("https://kraken.com", |url| match url {
            "https://kraken.com/favicon.ico" => Ok(html("nope")),
            "https://kraken.com" => Ok(html("<head></head>")),
            other => panic!("unexpected request to {other}"),
        });
        assert_eq!(result.unwrap_err().to_string(), "Favicon not found.");
    }

    #[test]
    fn non_image_link_target_reports_not_an_image() {
        let page = r#"<head><link rel="icon" href="/fav.png"></head>"#;
        let result = fetch_favicon_with("https://kraken.com", |url| match url {
            "https://kraken.com/favicon.ico" => Ok(html("nope")),
            "https://kraken.com" => Ok(html(page)),
            "https://kraken.com/fav.png" => Ok(html("still html")),
            other => panic!("unexpected request to {other}"),
        });
        assert_eq!(result.unwrap_err().to_string(), "Favicon not found or not an image.");
    }
}
