// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log levels, ordered by verbosity.

use colored::Colorize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The level of a log message or of a logger.
///
/// Levels are ordered from least to most verbose, so a logger configured at
/// `level` emits a message at `message_level` iff `level >= message_level`.
///
/// ```
/// use sharedlog::Level;
/// assert!(Level::Error < Level::Warn);
/// assert!(Level::Info < Level::Debug);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Something failed.
    Error,
    /// Suspicious condition.
    Warn,
    /// Regular operational messages.
    Info,
    /// Detailed debugging.
    Debug,
}

impl Level {
    /// All levels, least verbose first.
    pub const ALL: [Level; 4] = [Level::Error, Level::Warn, Level::Info, Level::Debug];

    /// The canonical uppercase name of the level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }

    /**
    The level name decorated for a terminal.

    Coloring follows `colored`'s global control, so it is disabled when stdout
    is not a terminal, when `NO_COLOR` is set, or after
    `colored::control::set_override(false)`.
    */
    pub fn colored_string(self) -> String {
        let name = self.as_str();
        let colored = match self {
            Level::Debug => name.bright_blue(),
            Level::Info => name.cyan(),
            Level::Warn => name.yellow(),
            Level::Error => name.bright_red(),
        };
        colored.to_string()
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names none of the four levels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseLevelError {
    #[error("level is not recognized: {0}")]
    NotRecognized(String),
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLevelError::NotRecognized(s.to_string()))
    }
}

/// Parses a level name, ignoring case.
///
/// ```
/// use sharedlog::{parse_level, Level};
/// assert_eq!(parse_level("warn"), Ok(Level::Warn));
/// assert!(parse_level("verbose").is_err());
/// ```
pub fn parse_level(s: &str) -> Result<Level, ParseLevelError> {
    s.parse()
}
