//! Grammar of the chat commands.
//!
//! ```text
//! command := "@Jukelify" " "+ ("help" | "test" | ("search" " "+ TEXT) | ("random" " "+ TEXT))
//! ```
//!
//! `help` and `test` only have to appear at the very start of the message and
//! may be followed by anything. `search` and `random` may appear anywhere in
//! the message; their argument runs to the end of the line and may be empty.

use crate::clients::errors::{Error, Result};

pub const PREFIX: &str = "@Jukelify";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Test,
    Search(String),
    Random(String),
}

impl Command {
    pub fn parse(input: &str) -> Result<Self> {
        if let Some(rest) = input.strip_prefix(PREFIX).and_then(skip_spaces) {
            if rest.starts_with("help") {
                return Ok(Command::Help);
            }
            if rest.starts_with("test") {
                return Ok(Command::Test);
            }
        }

        input
            .match_indices(PREFIX)
            .find_map(|(at, _)| query_command(&input[at + PREFIX.len()..]))
            .ok_or_else(|| Error::Parse(input.to_string()))
    }
}

// Expects `" "+ keyword " "+ TEXT` right after a prefix
fn query_command(after_prefix: &str) -> Option<Command> {
    let rest = skip_spaces(after_prefix)?;
    let (command, rest): (fn(String) -> Command, _) =
        if let Some(rest) = rest.strip_prefix("search") {
            (Command::Search, rest)
        } else {
            (Command::Random, rest.strip_prefix("random")?)
        };
    Some(command(line(skip_spaces(rest)?).to_string()))
}

// Strips one or more leading spaces, None if there are none
fn skip_spaces(s: &str) -> Option<&str> {
    let trimmed = s.trim_start_matches(' ');
    (trimmed.len() < s.len()).then_some(trimmed)
}

fn line(s: &str) -> &str {
    s.split('\n').next().unwrap_or_default()
}
