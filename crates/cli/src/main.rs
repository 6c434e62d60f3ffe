// ABOUTME: Interactive CLI for tagpick: prompts for a URL and selector, prints matched element text.
// ABOUTME: Sets up logging on stderr and builds the client from flags and an optional fingerprint file.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tagpick_core::{Client, NotFoundPolicy, Session};
use tracing_subscriber::EnvFilter;

/// Extract text from page elements chosen by class, id, or tag name.
#[derive(Parser, Debug)]
#[command(name = "tagpick")]
#[command(about = "Interactively scrape element text from web pages", long_about = None)]
struct Args {
    /// Seconds to wait for the HEAD reachability probe.
    #[arg(long, default_value_t = 10)]
    probe_timeout: u64,

    /// Seconds to wait for the full page fetch.
    #[arg(long, default_value_t = 30)]
    fetch_timeout: u64,

    /// Override the User-Agent sent with every request.
    #[arg(long)]
    user_agent: Option<String>,

    /// JSON file mapping header names to values; replaces the built-in browser headers.
    #[arg(long)]
    fingerprint: Option<PathBuf>,

    /// Treat a 404 answer to the reachability probe as unreachable.
    #[arg(long, default_value_t = false)]
    strict_404: bool,

    /// Log debug events to stderr (RUST_LOG takes precedence).
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let client = build_client(&args)?;
    tracing::debug!(options = ?client.options(), "client ready");

    let stdin = io::stdin();
    let mut session = Session::new(&client, stdin.lock(), io::stdout());
    session.run()?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn build_client(args: &Args) -> Result<Client> {
    let mut builder = Client::builder()
        .probe_timeout(Duration::from_secs(args.probe_timeout))
        .fetch_timeout(Duration::from_secs(args.fetch_timeout));

    if let Some(path) = &args.fingerprint {
        builder = builder.headers(load_fingerprint(path)?);
    }
    if let Some(user_agent) = &args.user_agent {
        builder = builder.user_agent(user_agent);
    }
    if args.strict_404 {
        builder = builder.not_found_policy(NotFoundPolicy::Unreachable);
    }

    Ok(builder.build()?)
}

/// Read a JSON object of header name to value.
fn load_fingerprint(path: &Path) -> Result<HashMap<String, String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read fingerprint file {}", path.display()))?;
    let headers: HashMap<String, String> = serde_json::from_str(&raw)
        .with_context(|| format!("fingerprint file {} is not a JSON object of strings", path.display()))?;
    if headers.keys().any(|k| k.trim().is_empty()) {
        bail!("fingerprint file {} has an empty header name", path.display());
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_header_map() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fp.json");
        fs::write(&path, r#"{"accept": "text/html", "sec-ch-ua-mobile": "?1"}"#).unwrap();

        let headers = load_fingerprint(&path).unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["sec-ch-ua-mobile"], "?1");
    }

    #[test]
    fn rejects_non_string_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fp.json");
        fs::write(&path, r#"{"accept": 1}"#).unwrap();

        let err = load_fingerprint(&path).unwrap_err();
        assert!(err.to_string().contains("not a JSON object of strings"));
    }

    #[test]
    fn rejects_blank_header_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fp.json");
        fs::write(&path, r#"{" ": "x"}"#).unwrap();

        assert!(load_fingerprint(&path).is_err());
    }

    #[test]
    fn strict_flag_sets_policy() {
        let args = Args::parse_from(["tagpick", "--strict-404", "--probe-timeout", "3"]);
        let client = build_client(&args).unwrap();
        assert_eq!(client.options().not_found_policy, NotFoundPolicy::Unreachable);
        assert_eq!(client.options().probe_timeout, Duration::from_secs(3));
    }
}
