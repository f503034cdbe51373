// src/utils/url.rs

//! URL inspection utilities.

use url::Url;

/// Extract the host from a URL string.
///
/// # Examples
/// ```
/// use kamkalima_chef::utils::url::get_host;
///
/// assert_eq!(
///     get_host("https://kamkalima.com/api/v1/content/texts"),
///     Some("kamkalima.com".to_string())
/// );
/// ```
pub fn get_host(url_str: &str) -> Option<String> {
    Url::parse(url_str)
        .ok()
        .and_then(|u| u.host_str().map(|s| s.to_lowercase()))
}

/// Whether `url_str` points at the same host as `domain`.
///
/// Used as the open-redirect guard on pagination cursors: a next-page
/// reference leaving the content domain is never followed.
pub fn same_domain(url_str: &str, domain: &str) -> bool {
    match (get_host(url_str), get_host(domain)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// File extension of a URL's last path segment, if any.
pub fn file_extension(url_str: &str) -> Option<String> {
    let parsed = Url::parse(url_str).ok()?;
    let last = parsed.path_segments()?.next_back()?;
    let (_, ext) = last.rsplit_once('.')?;
    if ext.is_empty() || ext.contains('/') {
        return None;
    }
    Some(ext.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_host() {
        assert_eq!(
            get_host("https://Kamkalima.COM/path"),
            Some("kamkalima.com".to_string())
        );
        assert_eq!(get_host("not a url"), None);
    }

    #[test]
    fn test_same_domain() {
        assert!(same_domain(
            "https://kamkalima.com/api/v1/content/texts?page=2",
            "https://kamkalima.com"
        ));
        assert!(!same_domain(
            "https://evil.example/api/v1/content/texts",
            "https://kamkalima.com"
        ));
        assert!(!same_domain("garbage", "https://kamkalima.com"));
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(
            file_extension("https://kamkalima.com/media/lesson-12.mp3"),
            Some("mp3".to_string())
        );
        assert_eq!(
            file_extension("https://kamkalima.com/media/lesson-12.MP3?t=1"),
            Some("mp3".to_string())
        );
        assert_eq!(file_extension("https://kamkalima.com/media/lesson"), None);
    }
}
