// ABOUTME: Error types for tagpick including the ErrorCode enum and ScrapeError struct.
// ABOUTME: Classifies reqwest failures into DNS, connect, timeout and transport categories.

use std::error::Error as StdError;
use std::fmt;

/// Error codes representing different categories of scrape failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl,
    Dns,
    Connect,
    Timeout,
    Transport,
    Unexpected,
    Config,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::Dns => "name resolution failed",
            ErrorCode::Connect => "connection failed",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Transport => "transport error",
            ErrorCode::Unexpected => "unexpected error",
            ErrorCode::Config => "configuration error",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for tagpick operations.
#[derive(Debug, thiserror::Error)]
pub struct ScrapeError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tagpick: {} {}: {}", self.op, self.url, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

/// Fragments that show up in resolver errors across platforms.
const DNS_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "failed to resolve",
    "no such host",
    "nodename nor servname",
];

impl ScrapeError {
    fn with_code(
        code: ErrorCode,
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an InvalidUrl error.
    pub fn invalid_url(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::InvalidUrl, url, op, source)
    }

    /// Create a Dns error.
    pub fn dns(url: impl Into<String>, op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self::with_code(ErrorCode::Dns, url, op, source)
    }

    /// Create a Connect error.
    pub fn connect(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Connect, url, op, source)
    }

    /// Create a Timeout error.
    pub fn timeout(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Timeout, url, op, source)
    }

    /// Create a Transport error.
    pub fn transport(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Transport, url, op, source)
    }

    /// Create an Unexpected error.
    pub fn unexpected(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Unexpected, url, op, source)
    }

    /// Create a Config error.
    pub fn config(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self::with_code(ErrorCode::Config, String::new(), op, source)
    }

    /// Classify a reqwest failure.
    ///
    /// Timeouts win over connect failures; a connect failure whose cause chain
    /// mentions name resolution becomes `Dns`.
    pub fn from_reqwest(url: impl Into<String>, op: impl Into<String>, err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            ErrorCode::Timeout
        } else if err.is_connect() {
            if chain_mentions_dns(&err) {
                ErrorCode::Dns
            } else {
                ErrorCode::Connect
            }
        } else {
            ErrorCode::Transport
        };
        Self::with_code(code, url, op, Some(anyhow::Error::new(err)))
    }

    /// Innermost message of the source chain, used for user-facing detail.
    pub fn detail(&self) -> String {
        match self.source {
            Some(ref src) => src
                .chain()
                .last()
                .map(|e| e.to_string())
                .unwrap_or_default(),
            None => self.code.to_string(),
        }
    }

    /// Returns true if this is a Dns error.
    pub fn is_dns(&self) -> bool {
        self.code == ErrorCode::Dns
    }

    /// Returns true if this is a Connect error.
    pub fn is_connect(&self) -> bool {
        self.code == ErrorCode::Connect
    }

    /// Returns true if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    /// Returns true if this is a Transport error.
    pub fn is_transport(&self) -> bool {
        self.code == ErrorCode::Transport
    }

    /// Returns true if this is an InvalidUrl error.
    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }
}

fn chain_mentions_dns(err: &(dyn StdError + 'static)) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = current {
        let msg = e.to_string().to_lowercase();
        if DNS_MARKERS.iter().any(|m| msg.contains(m)) {
            return true;
        }
        current = e.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Wrapped(&'static str, Option<Box<Wrapped>>);

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.1.as_deref().map(|w| w as &(dyn StdError + 'static))
        }
    }

    #[test]
    fn dns_marker_found_deep_in_chain() {
        let err = Wrapped(
            "error sending request",
            Some(Box::new(Wrapped(
                "client error (Connect)",
                Some(Box::new(Wrapped(
                    "dns error: failed to lookup address information: Name or service not known",
                    None,
                ))),
            ))),
        );
        assert!(chain_mentions_dns(&err));
    }

    #[test]
    fn refused_connection_is_not_dns() {
        let err = Wrapped(
            "error sending request",
            Some(Box::new(Wrapped("Connection refused (os error 111)", None))),
        );
        assert!(!chain_mentions_dns(&err));
    }

    #[test]
    fn display_includes_op_url_code_and_source() {
        let err = ScrapeError::timeout(
            "http://example.com",
            "Fetch",
            Some(anyhow::anyhow!("operation timed out")),
        );
        assert_eq!(
            err.to_string(),
            "tagpick: Fetch http://example.com: timeout: operation timed out"
        );
        assert!(err.is_timeout());
        assert!(!err.is_dns());
    }

    #[test]
    fn detail_falls_back_to_code() {
        let err = ScrapeError::config("LoadFingerprint", None);
        assert_eq!(err.detail(), "configuration error");
        assert_eq!(err.code, ErrorCode::Config);
    }
}
