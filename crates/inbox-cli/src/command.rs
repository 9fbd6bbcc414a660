//! Parsing of the line-oriented command protocol.
//!
//! ```text
//! EMAIL <category>,<label>,<MM-DD-YYYY>
//! COUNT
//! NEXT
//! READ
//! ```
//!
//! Keywords are case-sensitive. `EMAIL` must be followed by a space.

use inbox_models::DateKey;

use crate::error::CommandError;

/// Prefix of an `EMAIL` line, including the separating space.
const EMAIL_PREFIX: &str = "EMAIL ";

/// Fields of an `EMAIL` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailFields {
    /// Sender category (first field).
    pub category: String,
    /// Subject (second field).
    pub label: String,
    /// Date text (third field).
    pub date: String,
    /// How many of the three fields were present on the line.
    pub found: usize,
}

impl EmailFields {
    /// Splits the text after `EMAIL ` on commas.
    ///
    /// The first three fields are used; anything after a third comma is
    /// ignored. Missing fields are left empty.
    fn split(rest: &str) -> Self {
        let mut parts = rest.split(',');
        let mut found = 0;
        let mut next = || match parts.next() {
            Some(part) => {
                found += 1;
                part.to_string()
            }
            None => String::new(),
        };
        let (category, label, date) = (next(), next(), next());

        Self {
            category,
            label,
            date,
            found,
        }
    }

    /// Checks that all three fields were present and the date parses.
    ///
    /// The fields are usable either way; this only reports what a strict
    /// reader would reject.
    pub fn validate(&self, line: &str) -> Result<(), CommandError> {
        if self.found < 3 {
            return Err(CommandError::MalformedEmail {
                line: line.to_string(),
                found: self.found,
            });
        }
        DateKey::parse(&self.date)?;
        Ok(())
    }
}

/// A recognized protocol command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Queue a new email.
    Email(EmailFields),
    /// Report how many emails are queued.
    Count,
    /// Preview the top email.
    Next,
    /// Commit (remove) the top email.
    Read,
}

impl Command {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for a blank line. A trailing `\r` is ignored.
    ///
    /// # Errors
    ///
    /// [`CommandError::UnknownCommand`] if the line matches no keyword.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            return Ok(None);
        }

        if let Some(rest) = line.strip_prefix(EMAIL_PREFIX) {
            return Ok(Some(Command::Email(EmailFields::split(rest))));
        }

        match line {
            "COUNT" => Ok(Some(Command::Count)),
            "NEXT" => Ok(Some(Command::Next)),
            "READ" => Ok(Some(Command::Read)),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }

    /// Protocol keyword of this command.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Email(_) => "EMAIL",
            Command::Count => "COUNT",
            Command::Next => "NEXT",
            Command::Read => "READ",
        }
    }
}
