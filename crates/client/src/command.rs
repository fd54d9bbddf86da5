//! Parsing of the lines typed into the client.

use std::path::PathBuf;
use std::str::FromStr;

use eventboard_core::types::DbId;

/// Text printed by the `help` command.
pub const HELP: &str = "\
Commands:
  list                    refresh and show all events
  show                    show the form being edited
  title <text>            set the title
  description <text>      set the description
  date <YYYY-MM-DD>       set the date
  image <path>            choose an image file
  clear-image             remove the current image
  edit <id>               load an event into the form
  delete <id>             delete an event (asks for confirmation)
  submit                  add the event, or save it when editing
  cancel                  discard the form
  help                    show this text
  quit                    exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Show,
    Title(String),
    Description(String),
    Date(String),
    Image(PathBuf),
    ClearImage,
    Edit(DbId),
    Delete(DbId),
    Submit,
    Cancel,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a valid event id")]
    InvalidId(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb {
            "" => Err(CommandError::Empty),
            "list" | "ls" => Ok(Self::List),
            "show" => Ok(Self::Show),
            "title" => Ok(Self::Title(rest.to_string())),
            "description" | "desc" => Ok(Self::Description(rest.to_string())),
            "date" => Ok(Self::Date(rest.to_string())),
            "image" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("image"));
                }
                Ok(Self::Image(PathBuf::from(rest)))
            }
            "clear-image" => Ok(Self::ClearImage),
            "edit" => parse_id_arg("edit", rest).map(Self::Edit),
            "delete" | "rm" => parse_id_arg("delete", rest).map(Self::Delete),
            "submit" | "save" => Ok(Self::Submit),
            "cancel" => Ok(Self::Cancel),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_id_arg(verb: &'static str, rest: &str) -> Result<DbId, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(verb));
    }
    rest.parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| CommandError::InvalidId(rest.to_string()))
}
