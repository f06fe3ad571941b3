use tinylink::error::ValidationError;
use tinylink::utils::*;

#[test]
fn test_validate_long_url_accepts_scheme_and_dot() {
    assert_eq!(validate_long_url("https://example.com"), Ok("https://example.com"));
    assert_eq!(
        validate_long_url("https://very-long-domain.example/path?x=1"),
        Ok("https://very-long-domain.example/path?x=1")
    );
    assert!(validate_long_url("http://a.b").is_ok());
    assert!(validate_long_url("ftp://files.example.org/pub/file.tar.gz").is_ok());
}

#[test]
fn test_validate_long_url_trims_whitespace() {
    assert_eq!(
        validate_long_url("  https://example.com/long/path\n"),
        Ok("https://example.com/long/path")
    );
}

#[test]
fn test_validate_long_url_rejects_empty() {
    assert_eq!(validate_long_url(""), Err(ValidationError::Empty));
    assert_eq!(validate_long_url("   \t"), Err(ValidationError::Empty));
}

#[test]
fn test_validate_long_url_rejects_missing_scheme() {
    for input in [
        "example.com",
        "www.example.com/path",
        "://example.com",
        "mailto:someone@example.com",
        "1http://example.com",
        "not a url",
    ] {
        assert_eq!(
            validate_long_url(input),
            Err(ValidationError::MissingScheme),
            "input: {input}"
        );
    }
}

#[test]
fn test_validate_long_url_rejects_missing_dot() {
    for input in ["https://localhost", "http://intranet/path", "https://"] {
        assert_eq!(
            validate_long_url(input),
            Err(ValidationError::MissingDot),
            "input: {input}"
        );
    }
}

#[test]
fn test_validate_long_url_dot_must_follow_scheme() {
    // The only dot is inside the scheme itself.
    assert_eq!(
        validate_long_url("web.cal://calendar"),
        Err(ValidationError::MissingDot)
    );
}

#[test]
fn test_extract_short_code_takes_last_segment() {
    assert_eq!(extract_short_code("https://tiny.example/abc123"), Some("abc123"));
    assert_eq!(extract_short_code("http://localhost:8080/ab12"), Some("ab12"));
    assert_eq!(extract_short_code("https://tiny.example/a/b/c"), Some("c"));
}

#[test]
fn test_extract_short_code_bare_code() {
    assert_eq!(extract_short_code("ab12"), Some("ab12"));
    assert_eq!(extract_short_code(" ab12 "), Some("ab12"));
}

#[test]
fn test_extract_short_code_empty_segment() {
    assert_eq!(extract_short_code("https://tiny.example/"), None);
    assert_eq!(extract_short_code(""), None);
    assert_eq!(extract_short_code("/"), None);
}
