//! Validation of destination URLs before they are stored.
//!
//! Only absolute `http` and `https` URLs with a host are accepted. The
//! accepted URL is returned in the canonical form produced by the `url`
//! crate (lowercase scheme and host, default port removed, empty path
//! written as `/`). Path, query and fragment are preserved.

use url::Url;

/// Schemes a shortlink may redirect to.
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL scheme must be one of: http, https")]
    UnsupportedScheme,

    #[error("URL must have a host")]
    MissingHost,
}

/// Parses and validates a destination URL.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for strings that are not absolute URLs.
/// Returns [`UrlValidationError::UnsupportedScheme`] for schemes other than HTTP(S),
/// which rejects `javascript:`, `data:`, `steam:` and similar.
/// Returns [`UrlValidationError::MissingHost`] if the URL has an empty host.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     parse_long_url("HTTPS://EXAMPLE.COM:443/Path").unwrap(),
///     "https://example.com/Path"
/// );
/// assert!(parse_long_url("steam://example.com").is_err());
/// ```
pub fn parse_long_url(input: &str) -> Result<String, UrlValidationError> {
    let url = Url::parse(input.trim())
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(UrlValidationError::UnsupportedScheme);
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlValidationError::MissingHost),
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http() {
        assert_eq!(
            parse_long_url("http://example.com/long-url").unwrap(),
            "http://example.com/long-url"
        );
    }

    #[test]
    fn test_accepts_https_and_adds_root_path() {
        assert_eq!(
            parse_long_url("https://example.com").unwrap(),
            "https://example.com/"
        );
    }

    #[test]
    fn test_lowercases_host() {
        assert_eq!(
            parse_long_url("https://EXAMPLE.COM/Path").unwrap(),
            "https://example.com/Path"
        );
    }

    #[test]
    fn test_removes_default_port() {
        assert_eq!(
            parse_long_url("https://example.com:443/path").unwrap(),
            "https://example.com/path"
        );
        assert_eq!(
            parse_long_url("http://example.com:8080/path").unwrap(),
            "http://example.com:8080/path"
        );
    }

    #[test]
    fn test_keeps_query_and_fragment() {
        assert_eq!(
            parse_long_url("https://example.com/page?key=value#section").unwrap(),
            "https://example.com/page?key=value#section"
        );
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(
            parse_long_url("  https://example.com/a  ").unwrap(),
            "https://example.com/a"
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            parse_long_url("bad url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_long_url(""),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_relative_url() {
        assert!(matches!(
            parse_long_url("/just/a/path"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_disallowed_schemes() {
        for input in [
            "steam://example.com",
            "wss://example.com/long-url",
            "ftp://example.com/file",
            "javascript:alert('xss')",
            "data:text/plain,Hello",
            "mailto:test@example.com",
        ] {
            assert_eq!(
                parse_long_url(input),
                Err(UrlValidationError::UnsupportedScheme),
                "{input}"
            );
        }
    }

    #[test]
    fn test_accepts_very_long_url() {
        let url = format!("https://example.com/{}", "a".repeat(2000));
        assert!(parse_long_url(&url).unwrap().len() > 2000);
    }

    #[test]
    fn test_keeps_encoded_characters() {
        assert!(
            parse_long_url("https://example.com/path%20with%20spaces")
                .unwrap()
                .contains("path%20with%20spaces")
        );
    }
}
