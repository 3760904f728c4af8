//! Command line parsing for the interactive prompt.

use std::str::FromStr;

use thiserror::Error;

/// One prompt command. Rows are the numbers printed in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Expand(usize),
    Collapse(usize),
    Toggle(usize),
    /// Scroll by a signed number of rows.
    Scroll(isize),
    /// Scroll the least amount that brings a row into view.
    Goto(usize),
    Top,
    Bottom,
    ExpandAll,
    CollapseAll,
    /// Re-read one directory row, or everything.
    Refresh(Option<usize>),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{0}' needs a {1}")]
    MissingArgument(String, &'static str),
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
    #[error("unexpected argument '{0}'")]
    Unexpected(String),
}

pub const HELP: &str = "\
commands:
  <row>            toggle a row
  e, expand <row>  expand a row
  c, collapse <row>
  t, toggle <row>
  s, scroll <n>    scroll by n rows (negative scrolls up)
  g, goto <row>    bring a row into view
  top, bottom
  all              expand everything
  none             collapse everything
  r, refresh [row] re-read a directory, or all of them
  h, help
  q, quit";

fn number<T: FromStr>(arg: &str) -> Result<T, CommandError> {
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };
        let arg = words.next();
        if let Some(extra) = words.next() {
            return Err(CommandError::Unexpected(extra.to_string()));
        }

        let row = |what: &'static str| -> Result<usize, CommandError> {
            let arg = arg.ok_or_else(|| CommandError::MissingArgument(name.to_string(), what))?;
            number(arg)
        };
        let none = |command: Command| match arg {
            Some(arg) => Err(CommandError::Unexpected(arg.to_string())),
            None => Ok(command),
        };

        match name {
            "e" | "expand" => Ok(Command::Expand(row("row")?)),
            "c" | "collapse" => Ok(Command::Collapse(row("row")?)),
            "t" | "toggle" => Ok(Command::Toggle(row("row")?)),
            "g" | "goto" => Ok(Command::Goto(row("row")?)),
            "s" | "scroll" => {
                let arg =
                    arg.ok_or_else(|| CommandError::MissingArgument(name.to_string(), "count"))?;
                Ok(Command::Scroll(number(arg)?))
            }
            "r" | "refresh" => Ok(Command::Refresh(arg.map(number::<usize>).transpose()?)),
            "top" => none(Command::Top),
            "bottom" => none(Command::Bottom),
            "all" => none(Command::ExpandAll),
            "none" => none(Command::CollapseAll),
            "h" | "help" | "?" => none(Command::Help),
            "q" | "quit" | "exit" => none(Command::Quit),
            _ if name.chars().all(|c| c.is_ascii_digit()) => {
                none(Command::Toggle(number(name)?))
            }
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}
