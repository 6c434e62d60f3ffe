// ABOUTME: Main library entry point for tagpick, a regex-based page text extractor.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, Session, SelectorSpec, Probe, ScrapeError.

//! tagpick - pull the text out of elements chosen by class, id, or tag name.
//!
//! Matching is done with regular expressions, not a DOM parser, so it is only
//! reliable on flat markup where the selected element has no same-name
//! children.
//!
//! # Example
//!
//! ```no_run
//! use tagpick_core::{Client, ScrapeError, SelectorKind, SelectorSpec};
//!
//! fn main() -> Result<(), ScrapeError> {
//!     let client = Client::builder().build()?;
//!     let url = "https://example.com/forum/thread/1";
//!     if client.probe(url).is_reachable() {
//!         let page = client.fetch(url)?;
//!         let selector = SelectorSpec::new(SelectorKind::Class, "post");
//!         for (i, text) in client.scrape_page(&page, &selector)?.iter().enumerate() {
//!             println!("{}. [{}]", i + 1, text);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod driver;
pub mod error;
pub mod extract;
pub mod options;
pub mod probe;
pub mod resource;
pub mod selector;
pub mod url_check;

pub use crate::client::Client;
pub use crate::driver::{Session, State};
pub use crate::error::{ErrorCode, ScrapeError};
pub use crate::extract::{clean_text, extract};
pub use crate::options::{default_fingerprint, ClientBuilder, NotFoundPolicy, Options};
pub use crate::probe::{classify_status, Probe};
pub use crate::resource::Page;
pub use crate::selector::{pattern_for, SelectorKind, SelectorSpec};
pub use crate::url_check::{is_valid_url, parse_target};
