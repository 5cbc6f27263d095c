//! Interactive shell.
//!
//! Reads one line at a time, runs at most one API request per line, and
//! prints the result before reading the next line. Every command runs inside
//! its own error boundary: API, transport, and argument errors are printed
//! and the loop carries on. Only a failure to read or write the terminal
//! ends the session early.

pub mod command;
pub mod render;

use std::io::Write;
use std::str::FromStr;

use strum::IntoEnumIterator;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::api_client::ApiClient;
use crate::error::{Error, Result};
use crate::tracing::prelude::*;

pub use command::{ApiCommand, Command, CommandName};
pub use render::Style;

pub const PROMPT: &str = "(mrr) ";
pub const GOODBYE: &str = "Goodbye!";

pub const INTRO: &str = "Welcome to the Raccoon MRR API client.\nType help or ? to list commands.";

/// What the loop does after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// REPL over an owned API client.
pub struct Shell<W> {
    client: ApiClient,
    out: W,
    style: Style,
}

impl<W: Write> Shell<W> {
    pub fn new(client: ApiClient, out: W, style: Style) -> Self {
        Self { client, out, style }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run the read-eval-print loop until `exit` or end of input.
    pub async fn run<R>(&mut self, mut input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        writeln!(self.out, "{}", self.style.orange(INTRO))?;
        info!(base_url = %self.client.base_url(), "Session started");

        let mut buf = Vec::new();
        loop {
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf).await? == 0 {
                // End of input behaves like `exit`.
                writeln!(self.out)?;
                writeln!(self.out, "{GOODBYE}")?;
                break;
            }

            // Invalid UTF-8 reaches the parser as U+FFFD and is reported there.
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            if self.execute_line(line).await? == Flow::Exit {
                break;
            }
        }

        info!("Session ended");
        Ok(())
    }

    /// Handle one input line.
    ///
    /// Returns `Err` only for fatal errors; everything else has already been
    /// printed.
    pub async fn execute_line(&mut self, line: &str) -> Result<Flow> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => {
                self.report(&err)?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Exit => {
                writeln!(self.out, "{GOODBYE}")?;
                Ok(Flow::Exit)
            }
            Command::Help(topic) => {
                self.help(topic.as_deref())?;
                Ok(Flow::Continue)
            }
            Command::Api(api) => {
                match api.dispatch(&self.client).await {
                    Ok(value) => writeln!(self.out, "{}", render::json(&value))?,
                    Err(err) if err.is_fatal() => return Err(err),
                    Err(err) => self.report(&err)?,
                }
                Ok(Flow::Continue)
            }
        }
    }

    fn report(&mut self, err: &Error) -> Result<()> {
        debug!(error = ?err, "Command failed");
        writeln!(self.out, "{}", self.style.red(&render::error(err)))?;
        Ok(())
    }

    fn help(&mut self, topic: Option<&str>) -> Result<()> {
        let Some(topic) = topic else {
            writeln!(self.out, "Documented commands (type help <topic>):")?;
            writeln!(self.out, "{}", "=".repeat(40))?;
            for name in CommandName::iter() {
                writeln!(self.out, "  {:<30} {}", name.name(), name.description())?;
            }
            return Ok(());
        };

        let topic = if topic == "?" { "help" } else { topic };
        match CommandName::from_str(topic) {
            Ok(name) => {
                writeln!(self.out, "{}", name.description())?;
                writeln!(self.out, "Usage: {}", name.usage())?;
            }
            Err(_) => writeln!(self.out, "*** No help on {topic}")?,
        }
        Ok(())
    }
}
