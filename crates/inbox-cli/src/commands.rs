//! Command handlers for CLI subcommands.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use tracing::info;

use crate::cli::{Cli, Commands, SummaryFormat};
use crate::error::{CliError, Result};
use crate::processor::{Processor, ProcessorConfig, RunSummary, WriterSink};
use crate::repl::Repl;

/// Execute the command selected on the command line.
pub fn execute(cli: &Cli) -> Result<RunSummary> {
    let config = cli.processor_config();

    let summary = match &cli.command {
        Some(Commands::Run { file, .. }) => cmd_run(file.as_deref(), config)?,
        Some(Commands::Repl) => cmd_repl(&cli.state_dir(), config)?,
        None => cmd_run(None, config)?,
    };

    info!(
        lines = summary.lines,
        queued = summary.queued,
        malformed = summary.malformed,
        skipped = summary.skipped,
        ignored = summary.ignored,
        "Run complete"
    );

    write_summary(&mut io::stderr().lock(), &summary, cli.summary)?;
    Ok(summary)
}

fn cmd_run(file: Option<&Path>, config: ProcessorConfig) -> Result<RunSummary> {
    let mut processor = Processor::new(config);
    let stdout = io::stdout();
    let mut sink = WriterSink::new(stdout.lock());

    let summary = match file {
        Some(path) if path != Path::new("-") => {
            info!(path = %path.display(), "Reading commands from file");
            let file = File::open(path).map_err(|source| CliError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            processor.run_reader(BufReader::new(file), &mut sink)?
        }
        _ => {
            info!("Reading commands from stdin");
            processor.run_reader(io::stdin().lock(), &mut sink)?
        }
    };

    sink.into_inner().flush()?;
    Ok(summary)
}

fn cmd_repl(state_dir: &Path, config: ProcessorConfig) -> Result<RunSummary> {
    let mut repl = Repl::new(state_dir, config)?;
    repl.run()
}

/// Writes the run summary in the requested format.
pub fn write_summary<W: Write>(
    out: &mut W,
    summary: &RunSummary,
    format: SummaryFormat,
) -> Result<()> {
    match format {
        SummaryFormat::None => {}
        SummaryFormat::Text => writeln!(out, "{}", summary)?,
        SummaryFormat::Json => writeln!(out, "{}", serde_json::to_string(summary)?)?,
    }
    Ok(())
}
