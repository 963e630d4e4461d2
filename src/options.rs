// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration directives for [`Logger::new`](crate::Logger::new),
//! [`Logger::child`](crate::Logger::child) and
//! [`Logger::patch`](crate::Logger::patch).

use crate::Level;
use crate::writer::Writer;

/// `2006-01-02T15:04:05Z`, always in UTC. The default.
pub const RFC3339: &str = "%Y-%m-%dT%H:%M:%SZ";
/// `Mon, 02 Jan 2006 15:04:05 UTC`
pub const RFC1123: &str = "%a, %d %b %Y %H:%M:%S %Z";
/// `02 Jan 06 15:04 UTC`
pub const RFC822: &str = "%d %b %y %H:%M %Z";
/// `3:04PM`
pub const KITCHEN: &str = "%-I:%M%p";

/**
One setting to change.

Options are applied in order, so a later option wins over an earlier one for
the same field. [`AddWriters`](LoggerOption::AddWriters) is the exception: it
appends to whatever writers are set at that point.

```
use sharedlog::{Level, Logger, LoggerOption, Writer};

let logger = Logger::new([
    LoggerOption::Level(Level::Debug),
    LoggerOption::Component("db".to_string()),
    LoggerOption::Writers(vec![Writer::stderr()]),
    LoggerOption::AddWriters(vec![Writer::stderr(), Writer::stdout()]),
]);
assert_eq!(logger.settings().writers(), &[Writer::stderr(), Writer::stdout()]);
```
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggerOption {
    /// The most verbose level emitted. Defaults to [`Level::Info`].
    Level(Level),
    /// A tag printed as `[component]` on every line. Empty prints nothing.
    Component(String),
    /// Append the caller's file name. Off by default.
    CallerFile(bool),
    /// Append the caller's line number. Off by default.
    CallerLine(bool),
    /**
    Append the caller's function name. Off by default.

    Only lines logged through the macros ([`info!`](crate::info) and friends)
    know their function; lines from plain methods such as
    [`Logger::info`](crate::Logger::info) leave this part out.
    */
    CallerFunc(bool),
    /**
    A `chrono` strftime format for the UTC timestamp starting each line.
    Empty disables the timestamp. Defaults to [`RFC3339`].
    */
    TimeFormat(String),
    /// Replaces the writers. Defaults to [`Writer::stdout`].
    Writers(Vec<Writer>),
    /// Appends writers, skipping any already present.
    AddWriters(Vec<Writer>),
}

impl From<Level> for LoggerOption {
    fn from(level: Level) -> Self {
        LoggerOption::Level(level)
    }
}
