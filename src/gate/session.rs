use axum::http::{header::COOKIE, HeaderMap};
use secrecy::SecretString;

/// Extract the opaque session credential from the `Cookie` header.
///
/// The gate only observes the cookie. It never issues, refreshes or clears
/// it; that is the identity provider's job.
#[must_use]
pub fn credential(headers: &HeaderMap, cookie_name: &str) -> Option<SecretString> {
    headers.get_all(COOKIE).iter().find_map(|value| {
        let raw = value.to_str().ok()?;

        raw.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            if name == cookie_name && !value.is_empty() {
                Some(SecretString::from(value.to_string()))
            } else {
                None
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use secrecy::ExposeSecret;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).expect("valid header"));
        headers
    }

    #[test]
    fn test_extracts_session_cookie() {
        let headers = headers("__session=tok-123");
        let token = credential(&headers, "__session").expect("cookie should be found");
        assert_eq!(token.expose_secret(), "tok-123");
    }

    #[test]
    fn test_extracts_among_multiple_cookies() {
        let headers = headers("theme=dark; __session=tok-123; lang=en");
        let token = credential(&headers, "__session").expect("cookie should be found");
        assert_eq!(token.expose_secret(), "tok-123");
    }

    #[test]
    fn test_missing_cookie() {
        let headers = headers("theme=dark; lang=en");
        assert!(credential(&headers, "__session").is_none());
    }

    #[test]
    fn test_empty_value_counts_as_absent() {
        let headers = headers("__session=");
        assert!(credential(&headers, "__session").is_none());
    }

    #[test]
    fn test_no_cookie_header() {
        assert!(credential(&HeaderMap::new(), "__session").is_none());
    }

    #[test]
    fn test_name_must_match_exactly() {
        let headers = headers("__session_old=tok-123");
        assert!(credential(&headers, "__session").is_none());
    }
}
