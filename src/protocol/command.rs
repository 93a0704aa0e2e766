//! Input-line parsing for the command protocol.
//!
//! A line is split on the first whitespace run into a keyword and an
//! optional raw argument. Keywords are matched case-insensitively against
//! the fixed command set; the argument (only `INTEG` takes one) is carried
//! unparsed and interpreted by the handler.
use thiserror::Error;

/// List of possible errors an input line can produce.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unrecognized command '{0}'")]
    Unrecognized(String),

    /// Blank or whitespace-only line. Not answered; the dispatcher skips it.
    #[error("no command provided")]
    Empty,
}

/// One parsed command from the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Connect,
    Measure,
    /// `INTEG` with its raw argument; interpretation happens in the handler
    /// so a missing argument can be reported per protocol.
    SetIntegrationTime(Option<String>),
    BacklightOn,
    BacklightOff,
    Disconnect,
    Exit,
}

impl TryFrom<&str> for Command {
    type Error = CommandError;

    fn try_from(line: &str) -> Result<Self, Self::Error> {
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let keyword = parts.next().unwrap_or_default();
        if keyword.is_empty() {
            return Err(CommandError::Empty);
        }
        let argument = parts
            .next()
            .map(str::trim)
            .filter(|rest| !rest.is_empty())
            .map(str::to_string);

        match keyword.to_uppercase().as_str() {
            "CONNECT" => Ok(Command::Connect),
            "MEASURE" => Ok(Command::Measure),
            "INTEG" => Ok(Command::SetIntegrationTime(argument)),
            "BACKLIGHTON" => Ok(Command::BacklightOn),
            "BACKLIGHTOFF" => Ok(Command::BacklightOff),
            "DISCONNECT" => Ok(Command::Disconnect),
            "EXIT" => Ok(Command::Exit),
            _ => Err(CommandError::Unrecognized(keyword.to_string())),
        }
    }
}
