// ABOUTME: Interactive prompt loop: URL entry, reachability gate, selector menu, fetch and print.
// ABOUTME: Generic over BufRead/Write so the whole session can be scripted in tests.

use std::io::{self, BufRead, Write};

use url::Url;

use crate::client::Client;
use crate::error::{ErrorCode, ScrapeError};
use crate::selector::{SelectorKind, SelectorSpec};
use crate::url_check::parse_target;

const QUIT_WORDS: &[&str] = &["quit", "exit", "q"];

/// Where the session is in its prompt cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    AwaitUrl,
    AwaitReachability(Url),
    AwaitSelector(Url),
    Fetch(Url, SelectorSpec),
    Exit,
}

/// One interactive session over a line reader and a writer.
pub struct Session<'a, R, W> {
    client: &'a Client,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(client: &'a Client, input: R, output: W) -> Self {
        Self {
            client,
            input,
            output,
        }
    }

    /// Run until the user quits or input ends.
    ///
    /// Only output failures escape; every scrape failure is reported and the
    /// loop returns to the URL prompt.
    pub fn run(&mut self) -> io::Result<()> {
        let mut state = State::AwaitUrl;
        while state != State::Exit {
            let next = self.step(state)?;
            tracing::trace!(?next, "state transition");
            state = next;
        }
        Ok(())
    }

    /// Advance one state.
    pub fn step(&mut self, state: State) -> io::Result<State> {
        match state {
            State::AwaitUrl => self.await_url(),
            State::AwaitReachability(url) => self.await_reachability(url),
            State::AwaitSelector(url) => self.await_selector(url),
            State::Fetch(url, selector) => self.fetch(url, selector),
            State::Exit => Ok(State::Exit),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn await_url(&mut self) -> io::Result<State> {
        let Some(line) = self.prompt("\nEnter the URL to scrape (or 'quit' to exit): ")? else {
            return Ok(State::Exit);
        };

        if QUIT_WORDS.contains(&line.to_lowercase().as_str()) {
            writeln!(self.output, "Exiting program...")?;
            return Ok(State::Exit);
        }

        match parse_target(&line) {
            Ok(url) => Ok(State::AwaitReachability(url)),
            Err(err) => {
                tracing::debug!(input = %line, error = %err, "rejected url");
                writeln!(
                    self.output,
                    "Invalid URL format. Please enter a valid URL including 'http://' or 'https://'"
                )?;
                Ok(State::AwaitUrl)
            }
        }
    }

    fn await_reachability(&mut self, url: Url) -> io::Result<State> {
        let probe = self.client.probe(url.as_str());
        if let Some(message) = probe.diagnostic() {
            writeln!(self.output, "{}", message)?;
        }
        if probe.is_reachable() {
            Ok(State::AwaitSelector(url))
        } else {
            Ok(State::AwaitUrl)
        }
    }

    fn await_selector(&mut self, url: Url) -> io::Result<State> {
        writeln!(self.output, "\nSelect the type of element you want to scrape:")?;
        writeln!(self.output, "1. Class name (e.g., 'content', 'post-text')")?;
        writeln!(self.output, "2. ID (e.g., 'main-content', 'post-123')")?;
        writeln!(self.output, "3. HTML tag (e.g., 'p', 'article')")?;

        let kind = loop {
            let Some(choice) = self.prompt("Enter your choice (1-3): ")? else {
                return Ok(State::Exit);
            };
            match SelectorKind::from_choice(&choice) {
                Some(kind) => break kind,
                None => writeln!(self.output, "Invalid choice. Please enter 1, 2, or 3.")?,
            }
        };

        let Some(value) = self.prompt("Enter the selector value: ")? else {
            return Ok(State::Exit);
        };
        Ok(State::Fetch(url, SelectorSpec::new(kind, value)))
    }

    fn fetch(&mut self, url: Url, selector: SelectorSpec) -> io::Result<State> {
        let page = match self.client.fetch(url.as_str()) {
            Ok(page) => page,
            Err(err) => {
                tracing::debug!(error = %err, "fetch failed");
                writeln!(self.output, "{}", fetch_failure_message(&err))?;
                return Ok(State::AwaitUrl);
            }
        };

        if !page.is_ok() {
            writeln!(
                self.output,
                "Warning: Server returned status code {}",
                page.status
            )?;
            writeln!(self.output, "Attempting to process content anyway...\n")?;
        }

        let texts = match self.client.scrape_page(&page, &selector) {
            Ok(texts) => texts,
            Err(err) => {
                tracing::debug!(error = %err, "extraction failed");
                writeln!(self.output, "{}", fetch_failure_message(&err))?;
                return Ok(State::AwaitUrl);
            }
        };

        if texts.is_empty() {
            writeln!(
                self.output,
                "No elements found matching the selector: {}",
                selector.value
            )?;
        }
        for (i, text) in texts.iter().enumerate() {
            writeln!(self.output, "{}. [{}]", i + 1, text)?;
        }
        Ok(State::AwaitUrl)
    }

    /// Print `message` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// User-facing line for a failed fetch.
pub fn fetch_failure_message(err: &ScrapeError) -> String {
    match err.code {
        ErrorCode::Dns => {
            "The website doesn't exist or the domain name could not be resolved.".to_string()
        }
        ErrorCode::Connect => {
            "Failed to connect to the website. Please check your internet connection.".to_string()
        }
        ErrorCode::Timeout => "Request timed out. The website took too long to respond.".to_string(),
        ErrorCode::Transport => format!(
            "An error occurred while fetching the webpage: {}",
            err.detail()
        ),
        ErrorCode::InvalidUrl | ErrorCode::Unexpected | ErrorCode::Config => {
            format!("An unexpected error occurred: {}", err.detail())
        }
    }
}
