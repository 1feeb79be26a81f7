use url::Url;

/// Resolves a link href against a catalog's link base
///
/// Returns None if the link should be discarded:
/// - empty or whitespace-only hrefs
/// - hrefs that resolve to the bare base itself
/// - invalid URLs
/// - non-HTTP(S) URLs after resolution
///
/// # Examples
///
/// ```
/// use ccan_archiver::url::resolve_href;
///
/// let link = resolve_href("ccan-dl.pl?id=42", "https://ccan.de/cgi-bin/ccan/");
/// assert_eq!(link.as_deref(), Some("https://ccan.de/cgi-bin/ccan/ccan-dl.pl?id=42"));
/// assert_eq!(resolve_href("", "https://ccan.de/cgi-bin/ccan/"), None);
/// ```
pub fn resolve_href(href: &str, base: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    let base_url = Url::parse(base).ok()?;
    let absolute_url = base_url.join(href).ok()?;

    if absolute_url == base_url {
        return None;
    }

    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    Some(absolute_url.to_string())
}

/// Extracts the file extension from the final path segment of a URL
///
/// The extension is everything after the last `.` of the last segment, without
/// the dot. Query strings and fragments never contribute. Returns an empty
/// string when the segment has no extension.
pub fn url_extension(link: &str) -> String {
    let segment = match Url::parse(link) {
        Ok(url) => url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .map(str::to_string)
            .unwrap_or_default(),
        Err(_) => {
            let path = link.split(['?', '#']).next().unwrap_or_default();
            path.rsplit('/').next().unwrap_or_default().to_string()
        }
    };

    match segment.rsplit_once('.') {
        Some((_, ext)) => ext.to_string(),
        None => String::new(),
    }
}
