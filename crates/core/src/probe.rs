// ABOUTME: Reachability probe outcomes and status classification.
// ABOUTME: Every probe result degrades to a reachable flag plus an optional diagnostic line.

use crate::error::{ErrorCode, ScrapeError};
use crate::options::NotFoundPolicy;

/// Outcome of a HEAD reachability probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// Status below 400.
    Ok(u16),
    /// 404 let through by [`NotFoundPolicy::Reachable`].
    NotFoundTolerated,
    /// Status of 400 or above that blocks the fetch.
    Rejected(u16),
    ConnectFailed,
    TimedOut,
    Failed(String),
}

impl Probe {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Probe::Ok(_) | Probe::NotFoundTolerated)
    }

    /// Line to show the user, if the outcome warrants one.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Probe::Ok(_) => None,
            Probe::NotFoundTolerated => {
                Some("Edge case trying to find if there is any usual info.".to_string())
            }
            Probe::Rejected(code) => Some(format!(
                "Domain is reachable but returned status code {}.",
                code
            )),
            Probe::ConnectFailed => {
                Some("Failed to connect to the domain. Please check the URL.".to_string())
            }
            Probe::TimedOut => {
                Some("Request timed out. The domain took too long to respond.".to_string())
            }
            Probe::Failed(detail) => Some(format!(
                "An error occurred while checking domain reachability: {}",
                detail
            )),
        }
    }

    /// Map a transport failure onto a probe outcome.
    pub fn from_error(err: &ScrapeError) -> Self {
        match err.code {
            ErrorCode::Dns | ErrorCode::Connect => Probe::ConnectFailed,
            ErrorCode::Timeout => Probe::TimedOut,
            _ => Probe::Failed(err.detail()),
        }
    }
}

/// Classify a probe response status.
pub fn classify_status(status: u16, policy: NotFoundPolicy) -> Probe {
    match status {
        s if s < 400 => Probe::Ok(s),
        404 if policy == NotFoundPolicy::Reachable => Probe::NotFoundTolerated,
        s => Probe::Rejected(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn below_400_is_reachable() {
        for status in [100, 200, 204, 301, 302, 304, 399] {
            let probe = classify_status(status, NotFoundPolicy::Reachable);
            assert_eq!(probe, Probe::Ok(status));
            assert!(probe.is_reachable());
            assert_eq!(probe.diagnostic(), None);
        }
    }

    #[test]
    fn exactly_404_is_tolerated_by_default() {
        let probe = classify_status(404, NotFoundPolicy::Reachable);
        assert_eq!(probe, Probe::NotFoundTolerated);
        assert!(probe.is_reachable());
        assert!(probe.diagnostic().is_some());
    }

    #[test]
    fn strict_policy_rejects_404() {
        let probe = classify_status(404, NotFoundPolicy::Unreachable);
        assert_eq!(probe, Probe::Rejected(404));
        assert!(!probe.is_reachable());
    }

    #[test]
    fn other_client_and_server_errors_are_unreachable() {
        for status in [400, 401, 403, 405, 410, 429, 500, 502, 503] {
            let probe = classify_status(status, NotFoundPolicy::Reachable);
            assert!(!probe.is_reachable(), "status {} should be unreachable", status);
            assert_eq!(
                probe.diagnostic().as_deref(),
                Some(format!("Domain is reachable but returned status code {}.", status).as_str())
            );
        }
    }

    #[test]
    fn transport_failures_are_unreachable() {
        let dns = ScrapeError::dns("http://x.invalid", "Probe", None);
        let refused = ScrapeError::connect("http://x", "Probe", None);
        let slow = ScrapeError::timeout("http://x", "Probe", None);
        let other = ScrapeError::transport(
            "http://x",
            "Probe",
            Some(anyhow::anyhow!("invalid HTTP version")),
        );

        assert_eq!(Probe::from_error(&dns), Probe::ConnectFailed);
        assert_eq!(Probe::from_error(&refused), Probe::ConnectFailed);
        assert_eq!(Probe::from_error(&slow), Probe::TimedOut);
        assert_eq!(
            Probe::from_error(&other),
            Probe::Failed("invalid HTTP version".to_string())
        );
        for probe in [
            Probe::ConnectFailed,
            Probe::TimedOut,
            Probe::Failed("x".into()),
        ] {
            assert!(!probe.is_reachable());
        }
    }
}
