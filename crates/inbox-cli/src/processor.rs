//! Command processor: drives a [`SessionController`] from protocol lines.
//!
//! Input is any iterator of lines and output goes to a [`LineSink`], so the
//! processor runs the same over a file, stdin, the REPL or an in-memory
//! buffer.

use std::fmt;
use std::io::{self, BufRead, Write};

use inbox_models::Item;
use inbox_queue::{ReadOutcome, SessionController};
use serde::Serialize;
use tracing::{debug, warn};

use crate::command::{Command, EmailFields};
use crate::error::Result;

/// What to do with an `EMAIL` line that is missing fields or has a bad date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngestPolicy {
    /// Queue it anyway: missing fields are empty, a bad date becomes the epoch.
    #[default]
    Lenient,
    /// Skip the line.
    Strict,
}

/// Configuration for the processor.
#[derive(Debug, Clone, Default)]
pub struct ProcessorConfig {
    /// Handling of malformed `EMAIL` lines.
    pub policy: IngestPolicy,
    /// Write `> <line>` before the output of each command.
    pub echo_commands: bool,
}

impl ProcessorConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ingest policy.
    pub fn with_policy(mut self, policy: IngestPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enables or disables command echo.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo_commands = echo;
        self
    }
}

/// Destination for output lines.
pub trait LineSink {
    /// Writes one line (without its terminator).
    fn emit(&mut self, line: &str) -> io::Result<()>;
}

impl LineSink for Vec<String> {
    fn emit(&mut self, line: &str) -> io::Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

/// [`LineSink`] over any writer; each line is terminated with `\n`.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LineSink for WriterSink<W> {
    fn emit(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", line)
    }
}

/// Counters for one processor's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Lines seen, including blank ones.
    pub lines: usize,
    /// Blank lines skipped.
    pub blank: usize,
    /// Emails queued.
    pub queued: usize,
    /// `EMAIL` lines with missing fields or a bad date.
    pub malformed: usize,
    /// Malformed lines dropped under the strict policy.
    pub skipped: usize,
    /// Lines that matched no command.
    pub ignored: usize,
    /// `NEXT` commands that showed an email.
    pub previews: usize,
    /// `READ` commands that removed an email.
    pub reads: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines: {} queued, {} malformed ({} skipped), {} ignored, {} blank, {} previews, {} reads",
            self.lines,
            self.queued,
            self.malformed,
            self.skipped,
            self.ignored,
            self.blank,
            self.previews,
            self.reads
        )
    }
}

/// Applies protocol lines to a session and renders the responses.
#[derive(Debug, Default)]
pub struct Processor {
    session: SessionController,
    config: ProcessorConfig,
    summary: RunSummary,
}

impl Processor {
    /// Creates a processor with an empty session.
    pub fn new(config: ProcessorConfig) -> Self {
        Self {
            session: SessionController::new(),
            config,
            summary: RunSummary::default(),
        }
    }

    /// Handles one input line, writing any response to `sink`.
    ///
    /// # Errors
    ///
    /// Only failures to write to `sink`. Bad input is logged and counted.
    pub fn process_line<S: LineSink + ?Sized>(&mut self, line: &str, sink: &mut S) -> io::Result<()> {
        self.summary.lines += 1;

        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => {
                self.summary.blank += 1;
                return Ok(());
            }
            Err(e) => {
                self.summary.ignored += 1;
                warn!(line = self.summary.lines, error = %e, "Ignoring line");
                return Ok(());
            }
        };

        if self.config.echo_commands {
            sink.emit(&format!("> {}", line.trim_end()))?;
        }
        debug!(line = self.summary.lines, command = command.keyword(), "Applying command");

        match command {
            Command::Email(fields) => {
                self.handle_email(line, fields);
                Ok(())
            }
            Command::Count => {
                sink.emit(&format!("There are {} emails to read.", self.session.count()))?;
                sink.emit("")
            }
            Command::Next => match self.session.next() {
                Some(item) => {
                    let lines = render_item(item);
                    self.summary.previews += 1;
                    for out in lines {
                        sink.emit(&out)?;
                    }
                    Ok(())
                }
                None => {
                    sink.emit("No emails to read.")?;
                    sink.emit("")
                }
            },
            Command::Read => {
                if !matches!(self.session.read(), ReadOutcome::Empty) {
                    self.summary.reads += 1;
                }
                Ok(())
            }
        }
    }

    /// Processes every line from `lines`.
    ///
    /// Returns the counters accumulated so far (including earlier runs on
    /// the same processor).
    pub fn run<I, L, S>(&mut self, lines: I, sink: &mut S) -> io::Result<RunSummary>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
        S: LineSink + ?Sized,
    {
        for line in lines {
            self.process_line(line.as_ref(), sink)?;
        }
        Ok(self.summary)
    }

    /// Processes every line from a reader.
    ///
    /// # Errors
    ///
    /// Read failures (including invalid UTF-8) and sink write failures.
    pub fn run_reader<R, S>(&mut self, reader: R, sink: &mut S) -> Result<RunSummary>
    where
        R: BufRead,
        S: LineSink + ?Sized,
    {
        for line in reader.lines() {
            self.process_line(&line?, sink)?;
        }
        Ok(self.summary)
    }

    /// Counters so far.
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// The session being driven.
    pub fn session(&self) -> &SessionController {
        &self.session
    }

    /// Active configuration.
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    fn handle_email(&mut self, line: &str, fields: EmailFields) {
        if let Err(e) = fields.validate(line) {
            self.summary.malformed += 1;
            match self.config.policy {
                IngestPolicy::Strict => {
                    self.summary.skipped += 1;
                    warn!(line = self.summary.lines, error = %e, "Skipping malformed email");
                    return;
                }
                IngestPolicy::Lenient => {
                    warn!(line = self.summary.lines, error = %e, "Queueing malformed email with defaults");
                }
            }
        }

        let EmailFields {
            category,
            label,
            date,
            ..
        } = fields;
        self.session.add(category, label, date);
        self.summary.queued += 1;
    }
}

/// Display lines for a previewed email, including the trailing blank line.
pub fn render_item(item: &Item) -> Vec<String> {
    vec![
        "Next email:".to_string(),
        format!("Sender: {}", item.category()),
        format!("Subject: {}", item.label()),
        format!("Date: {}", item.date_text()),
        String::new(),
    ]
}
