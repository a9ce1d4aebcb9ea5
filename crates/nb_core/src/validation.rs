use url::Url;

/// Longest value kept for a free-text field or search query
pub const MAX_FIELD_LENGTH: usize = 500;

/// True when `candidate` is an absolute http(s) URL with a host.
pub fn is_valid_url(candidate: &str) -> bool {
    let candidate = candidate.trim();
    // `Url::parse` repairs forms like `http:host` that carry no authority.
    let lowered = candidate.to_ascii_lowercase();
    if !lowered.starts_with("http://") && !lowered.starts_with("https://") {
        return false;
    }
    match Url::parse(candidate) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().map_or(false, |host| !host.is_empty())
        }
        Err(_) => false,
    }
}

/// Trim and cap a user supplied value.
pub fn sanitize_input(text: &str) -> String {
    text.trim().chars().take(MAX_FIELD_LENGTH).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(is_valid_url("https://acme.example/about"));
        assert!(is_valid_url("http://example.com"));
        assert!(is_valid_url("  https://www.linkedin.com/in/jane-doe  "));
        assert!(is_valid_url("http://127.0.0.1:8080/path?q=1"));
    }

    #[test]
    fn test_rejects_other_schemes_and_missing_hosts() {
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("acme.example"));
        assert!(!is_valid_url("www.acme.example/about"));
        assert!(!is_valid_url("ftp://acme.example"));
        assert!(!is_valid_url("mailto:jane@acme.example"));
        assert!(!is_valid_url("file:///etc/passwd"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("http:acme.example"));
        assert!(!is_valid_url("https:/acme.example/about"));
        assert!(!is_valid_url("http:\\\\acme.example"));
        assert!(is_valid_url("HTTPS://Acme.example"));
    }

    #[test]
    fn test_sanitize_input() {
        assert_eq!(sanitize_input("  hello \n"), "hello");
        assert_eq!(sanitize_input(""), "");
        assert_eq!(sanitize_input(&"é".repeat(600)).chars().count(), MAX_FIELD_LENGTH);
    }
}
