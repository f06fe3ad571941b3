use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

static SCHEME_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("scheme pattern is valid")
});

/// Superficial check of a user-supplied long URL.
///
/// Accepts anything that starts with `scheme://` and has a dot somewhere
/// after the scheme. The backend does the real parsing. Returns the trimmed
/// input on success.
pub fn validate_long_url(input: &str) -> Result<&str, ValidationError> {
    let url = input.trim();
    if url.is_empty() {
        return Err(ValidationError::Empty);
    }

    let Some(prefix) = SCHEME_PREFIX.find(url) else {
        return Err(ValidationError::MissingScheme);
    };

    if !url[prefix.end()..].contains('.') {
        return Err(ValidationError::MissingDot);
    }

    Ok(url)
}

/// Returns the text after the last `/` of a short URL, or `None` when that
/// segment is empty.
///
/// Input without any `/` is returned whole, so a bare code passes through.
pub fn extract_short_code(short_url: &str) -> Option<&str> {
    let trimmed = short_url.trim();
    let code = trimmed.rsplit_once('/').map_or(trimmed, |(_, last)| last);

    if code.is_empty() { None } else { Some(code) }
}
