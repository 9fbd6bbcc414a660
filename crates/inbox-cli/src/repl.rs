//! Interactive REPL (Read-Eval-Print Loop) for the inbox.
//!
//! Every entered line goes through the same [`Processor`] as a command file.
//! `quit` or `exit` (or Ctrl-D) ends the session.

use std::io;
use std::path::{Path, PathBuf};

use inbox_models::RankTable;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing::debug;

use crate::error::Result;
use crate::processor::{IngestPolicy, Processor, ProcessorConfig, RunSummary, WriterSink};

const PROMPT: &str = "inbox> ";

/// Words that end the REPL instead of going to the processor.
const QUIT_WORDS: &[&str] = &["quit", "exit"];

/// Tab completion for protocol keywords and `EMAIL` categories.
struct CommandCompleter {
    /// Category names, highest rank first.
    categories: Vec<String>,
}

impl CommandCompleter {
    const KEYWORDS: &'static [&'static str] = &["COUNT", "EMAIL ", "NEXT", "READ"];
    const EMAIL_PREFIX: &'static str = "EMAIL ";

    fn new(ranks: &RankTable) -> Self {
        Self {
            categories: ranks
                .categories()
                .into_iter()
                .map(|(name, _)| name.to_string())
                .collect(),
        }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];

        // Category names right after "EMAIL ", up to the first comma
        if let Some(rest) = prefix.strip_prefix(Self::EMAIL_PREFIX) {
            if rest.contains(',') {
                return Ok((pos, vec![]));
            }
            let matches = self
                .categories
                .iter()
                .filter(|name| name.starts_with(rest))
                .map(|name| Pair {
                    display: name.clone(),
                    replacement: format!("{},", name),
                })
                .collect();
            return Ok((Self::EMAIL_PREFIX.len(), matches));
        }

        if prefix.contains(' ') {
            return Ok((pos, vec![]));
        }

        let matches = Self::KEYWORDS
            .iter()
            .filter(|kw| kw.starts_with(prefix))
            .map(|kw| Pair {
                display: kw.trim_end().to_string(),
                replacement: kw.to_string(),
            })
            .collect();

        Ok((0, matches))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}
impl Validator for CommandCompleter {}
impl Helper for CommandCompleter {}

/// REPL state
pub struct Repl {
    editor: Editor<CommandCompleter, DefaultHistory>,
    processor: Processor,
    history_path: Option<PathBuf>,
}

impl Repl {
    /// Creates a new REPL, loading history from `state_dir` if present.
    pub fn new(state_dir: &Path, config: ProcessorConfig) -> Result<Self> {
        let rl_config = rustyline::Config::builder()
            .completion_type(rustyline::CompletionType::List)
            .auto_add_history(false)
            .build();
        let processor = Processor::new(config);
        let mut editor = Editor::with_config(rl_config)?;
        editor.set_helper(Some(CommandCompleter::new(processor.session().ranks())));

        let history_path = match std::fs::create_dir_all(state_dir) {
            Ok(()) => {
                let path = state_dir.join("repl_history.txt");
                if path.exists() {
                    let _ = editor.load_history(&path);
                }
                Some(path)
            }
            Err(e) => {
                debug!(dir = %state_dir.display(), error = %e, "History disabled");
                None
            }
        };

        Ok(Self {
            editor,
            processor,
            history_path,
        })
    }

    /// Runs the REPL loop until quit or end of input.
    pub fn run(&mut self) -> Result<RunSummary> {
        println!("Inbox REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Commands: EMAIL <category>,<subject>,<MM-DD-YYYY> | COUNT | NEXT | READ | quit");
        if self.processor.config().policy == IngestPolicy::Strict {
            println!("Strict mode: malformed EMAIL lines are skipped.");
        }
        println!();

        let mut sink = WriterSink::new(io::stdout());

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    if is_quit(&line) {
                        break;
                    }
                    if !line.trim().is_empty() {
                        self.editor.add_history_entry(line.as_str())?;
                    }
                    self.processor.process_line(&line, &mut sink)?;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                }
                Err(ReadlineError::Eof) => {
                    println!("^D");
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }

        if let Some(path) = &self.history_path {
            let _ = self.editor.save_history(path);
        }

        Ok(self.processor.summary())
    }
}

fn is_quit(line: &str) -> bool {
    QUIT_WORDS.contains(&line.trim())
}
