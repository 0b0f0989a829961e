//! Parsing of REPL input lines.

use thiserror::Error;

use crate::shell::PageKind;

pub const HELP: &str = "\
Commands:
  users | resources | bookings   switch page
  set <field> <value>            edit the form of the active page
  submit                         submit the form
  cancel <booking-id>            cancel a booking (bookings page)
  reload                         reload the active page
  show                           render the active page again
  help                           show this help
  quit                           leave the console

Fields:
  users:     name, email
  resources: name, type (ROOM, EQUIPMENT, COURT)
  bookings:  user, resource, start, end (YYYY-MM-DDTHH:MM, local time)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(PageKind),
    Set { field: String, value: String },
    Submit,
    Cancel(String),
    Reload,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}` (type `help`)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

impl std::str::FromStr for Command {
    type Err = CommandError;

    /// `set` keeps everything after the field name, inner spaces included.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((line, ""));

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Err(CommandError::Empty),
            "users" | "resources" | "bookings" => Command::Go(word.parse().map_err(CommandError::Unknown)?),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(CommandError::Usage("set <field> <value>"))?;
                Command::Set {
                    field: field.to_ascii_lowercase(),
                    value: value.trim().to_string(),
                }
            }
            "submit" => Command::Submit,
            "cancel" if rest.is_empty() => return Err(CommandError::Usage("cancel <booking-id>")),
            "cancel" => Command::Cancel(rest.to_string()),
            "reload" => Command::Reload,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(word.to_string())),
        };
        Ok(command)
    }
}
