// ABOUTME: Resource handling for fetching pages over blocking HTTP.
// ABOUTME: Sends the HEAD probe and the fingerprinted GET, and decodes bodies by charset.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;

use crate::error::ScrapeError;

/// A fetched page, kept regardless of its status code.
#[derive(Debug, Clone)]
pub struct Page {
    pub status: u16,
    pub url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Page {
    /// Decode the body to text, using the charset from the content-type header
    /// or detection when it is absent.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Send a HEAD request and return the status code.
pub fn head_status(
    client: &reqwest::blocking::Client,
    url: &str,
    timeout: Duration,
) -> Result<u16, ScrapeError> {
    let response = client
        .head(url)
        .timeout(timeout)
        .send()
        .map_err(|e| ScrapeError::from_reqwest(url, "Probe", e))?;
    Ok(response.status().as_u16())
}

/// Fetch a page with the given headers. Non-success statuses are not errors.
pub fn fetch(
    client: &reqwest::blocking::Client,
    url: &str,
    headers: &HashMap<String, String>,
    timeout: Duration,
) -> Result<Page, ScrapeError> {
    let mut request = client.get(url).timeout(timeout);
    for (key, value) in headers {
        request = request.header(key.as_str(), value.as_str());
    }

    let response = request
        .send()
        .map_err(|e| ScrapeError::from_reqwest(url, "Fetch", e))?;

    let status = response.status().as_u16();
    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = response
        .bytes()
        .map_err(|e| ScrapeError::from_reqwest(url, "Fetch", e))?;

    Ok(Page {
        status,
        url: url.to_string(),
        final_url,
        content_type,
        body,
    })
}

/// Decode body bytes to a String using charset from content-type header or detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract charset value from Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        let trimmed = part.trim();
        if let Some(charset) = trimmed.strip_prefix("charset=") {
            let charset = charset.trim_matches('"').trim_matches('\'');
            return Some(charset.to_string());
        }
    }
    None
}
