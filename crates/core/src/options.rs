// ABOUTME: Configuration options for tagpick including NotFoundPolicy, Options, and ClientBuilder.
// ABOUTME: Holds the browser fingerprint headers sent on the full page fetch.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::client::Client;
use crate::error::ScrapeError;

/// Default User-Agent, a desktop Chrome build on Windows.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Timeout for the HEAD reachability probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for the full GET.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// How a 404 answer to the reachability probe is treated.
///
/// Some sites answer HEAD with 404 on routes that serve content to GET, so
/// the default lets the fetch go ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotFoundPolicy {
    #[default]
    Reachable,
    Unreachable,
}

impl fmt::Display for NotFoundPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotFoundPolicy::Reachable => "reachable",
            NotFoundPolicy::Unreachable => "unreachable",
        };
        write!(f, "{}", s)
    }
}

/// Header set that mimics a desktop Chrome 131 navigation request.
///
/// These values go stale as browsers ship; callers can replace them through
/// [`ClientBuilder::headers`].
pub fn default_fingerprint() -> HashMap<String, String> {
    [
        (
            "accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
        ),
        ("accept-language", "en-US,en;q=0.9"),
        (
            "sec-ch-ua",
            "\"Google Chrome\";v=\"131\", \"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\"",
        ),
        ("sec-ch-ua-mobile", "?0"),
        ("sec-ch-ua-platform", "\"Windows\""),
        ("sec-fetch-dest", "document"),
        ("sec-fetch-mode", "navigate"),
        ("sec-fetch-site", "none"),
        ("sec-fetch-user", "?1"),
        ("upgrade-insecure-requests", "1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Configuration options for the tagpick client.
#[derive(Debug, Clone)]
pub struct Options {
    pub probe_timeout: Duration,
    pub fetch_timeout: Duration,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
    pub not_found_policy: NotFoundPolicy,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: default_fingerprint(),
            not_found_policy: NotFoundPolicy::Reachable,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the reachability probe timeout.
    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.opts.probe_timeout = timeout;
        self
    }

    /// Set the page fetch timeout.
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.opts.fetch_timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Add a header to the fingerprint, replacing any existing value.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Replace the whole fingerprint header set.
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.opts.headers = headers;
        self
    }

    /// Choose how a 404 probe answer is treated.
    pub fn not_found_policy(mut self, policy: NotFoundPolicy) -> Self {
        self.opts.not_found_policy = policy;
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Result<Client, ScrapeError> {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
