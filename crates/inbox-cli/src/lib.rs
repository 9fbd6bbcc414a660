//! Inbox CLI library.
//!
//! This crate provides the line-oriented command processor, the
//! command-line interface and the interactive REPL for the inbox.

pub mod cli;
pub mod command;
pub mod commands;
pub mod error;
pub mod processor;
pub mod repl;

pub use command::{Command, EmailFields};
pub use error::{CliError, CommandError, Result};
pub use processor::{
    render_item, IngestPolicy, LineSink, Processor, ProcessorConfig, RunSummary, WriterSink,
};
