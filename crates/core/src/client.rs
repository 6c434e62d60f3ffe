// ABOUTME: The tagpick Client: reachability probe, page fetch, and selector extraction.
// ABOUTME: Holds two blocking reqwest clients, one for HEAD probes and one for fingerprinted GETs.

use crate::error::ScrapeError;
use crate::extract::extract;
use crate::options::{ClientBuilder, Options};
use crate::probe::{classify_status, Probe};
use crate::resource::{self, Page};
use crate::selector::SelectorSpec;

/// The main tagpick client.
pub struct Client {
    opts: Options,
    probe_http: reqwest::blocking::Client,
    fetch_http: reqwest::blocking::Client,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Result<Self, ScrapeError> {
        // The probe reports the first answer it gets; redirects count as reachable.
        let probe_http = reqwest::blocking::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(&opts.user_agent)
            .build()
            .map_err(|e| ScrapeError::config("BuildClient", Some(anyhow::Error::new(e))))?;

        let fetch_http = reqwest::blocking::Client::builder()
            .user_agent(&opts.user_agent)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| ScrapeError::config("BuildClient", Some(anyhow::Error::new(e))))?;

        Ok(Self {
            opts,
            probe_http,
            fetch_http,
        })
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Check whether `url` answers a HEAD request well enough to fetch.
    ///
    /// Never fails; transport errors become unreachable outcomes.
    pub fn probe(&self, url: &str) -> Probe {
        tracing::debug!(url, timeout = ?self.opts.probe_timeout, "probing");
        let probe = match resource::head_status(&self.probe_http, url, self.opts.probe_timeout) {
            Ok(status) => classify_status(status, self.opts.not_found_policy),
            Err(err) => {
                tracing::debug!(url, error = %err, "probe failed");
                Probe::from_error(&err)
            }
        };
        tracing::debug!(url, ?probe, reachable = probe.is_reachable(), "probe finished");
        probe
    }

    /// Fetch `url` with the configured fingerprint.
    pub fn fetch(&self, url: &str) -> Result<Page, ScrapeError> {
        tracing::debug!(url, timeout = ?self.opts.fetch_timeout, "fetching");
        let page = resource::fetch(
            &self.fetch_http,
            url,
            &self.opts.headers,
            self.opts.fetch_timeout,
        )?;
        tracing::info!(
            url,
            status = page.status,
            bytes = page.body.len(),
            final_url = %page.final_url,
            "fetched page"
        );
        Ok(page)
    }

    /// Apply `selector` to an already fetched page.
    pub fn scrape_page(&self, page: &Page, selector: &SelectorSpec) -> Result<Vec<String>, ScrapeError> {
        let pattern = selector.compile()?;
        Ok(extract(&page.text(), &pattern))
    }
}
