// ABOUTME: URL validation for user-entered scrape targets.
// ABOUTME: A target is valid only when it parses and carries both a scheme and a host.

use url::Url;

use crate::error::ScrapeError;

/// Returns true if `input` parses as an absolute URL with a host.
pub fn is_valid_url(input: &str) -> bool {
    parse_target(input).is_ok()
}

/// Parse `input` into a URL, rejecting anything without a scheme or host.
pub fn parse_target(input: &str) -> Result<Url, ScrapeError> {
    let parsed = Url::parse(input).map_err(|e| {
        ScrapeError::invalid_url(input, "Validate", Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    if !has_authority(input.trim(), parsed.scheme().len()) {
        return Err(ScrapeError::invalid_url(
            input,
            "Validate",
            Some(anyhow::anyhow!("URL has no //authority section")),
        ));
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(ScrapeError::invalid_url(
            input,
            "Validate",
            Some(anyhow::anyhow!("URL has no host")),
        )),
    }
}

/// True when the text after `scheme:` is `//` followed by a non-empty authority.
///
/// `Url::parse` repairs inputs like `http:example.com` for special schemes,
/// so the raw text is checked too.
fn has_authority(input: &str, scheme_len: usize) -> bool {
    let Some(rest) = input.get(scheme_len..).and_then(|r| r.strip_prefix("://")) else {
        return false;
    };
    !matches!(rest.chars().next(), None | Some('/' | '\\' | '?' | '#'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_scheme_and_host() {
        assert!(is_valid_url("http://example.com"));
        assert!(is_valid_url("https://example.com/forum/thread?id=3"));
        assert!(is_valid_url("https://127.0.0.1:8080/"));
        assert!(is_valid_url("ftp://files.example.org/pub"));
    }

    #[test]
    fn rejects_missing_scheme_or_host() {
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("www.example.com/page"));
        assert!(!is_valid_url("/relative/path"));
        assert!(!is_valid_url("mailto:someone@example.com"));
        assert!(!is_valid_url("file:///etc/hosts"));
        assert!(!is_valid_url("http://"));
        assert!(!is_valid_url("http:example.com"));
        assert!(!is_valid_url("http:/example.com"));
        assert!(!is_valid_url("http:///example.com"));
        assert!(!is_valid_url("https:\\\\example.com\\x"));
    }

    #[test]
    fn scheme_case_and_surrounding_space_are_accepted() {
        assert!(is_valid_url("HTTPS://Example.com/a"));
        assert!(is_valid_url("  http://example.com  "));
    }

    #[test]
    fn parse_target_reports_invalid_url() {
        let err = parse_target("not a url").expect_err("should be rejected");
        assert!(err.is_invalid_url());
        assert_eq!(err.op, "Validate");
    }
}
