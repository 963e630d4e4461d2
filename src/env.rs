// SPDX-License-Identifier: MIT OR Apache-2.0

//! Options from environment variables.
//!
//! | Variable          | Option                                   | Example          |
//! |-------------------|------------------------------------------|------------------|
//! | `LOG_LEVEL`       | [`LoggerOption::Level`]                  | `debug`          |
//! | `LOG_TIME_FORMAT` | [`LoggerOption::TimeFormat`]             | `%H:%M:%S`       |
//! | `LOG_COMPONENT`   | [`LoggerOption::Component`]              | `api`            |
//! | `LOG_CALLER`      | the three caller options                 | `file,line`      |
//!
//! Unset variables produce no option, so the result can be passed straight to
//! [`Logger::new`](crate::Logger::new) or [`Logger::patch`](crate::Logger::patch)
//! without clobbering anything. `LOG_CALLER` turns on exactly the parts it
//! lists and off the others; `none` or an empty value turns them all off.
//!
//! ```
//! use sharedlog::env::options_from_lookup;
//! use sharedlog::{Level, LoggerOption};
//!
//! let options = options_from_lookup(|name| match name {
//!     "LOG_LEVEL" => Some("warn".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//! assert_eq!(options, vec![LoggerOption::Level(Level::Warn)]);
//! ```

use crate::Level;
use crate::level::ParseLevelError;
use crate::options::LoggerOption;

pub const LEVEL_VAR: &str = "LOG_LEVEL";
pub const TIME_FORMAT_VAR: &str = "LOG_TIME_FORMAT";
pub const COMPONENT_VAR: &str = "LOG_COMPONENT";
pub const CALLER_VAR: &str = "LOG_CALLER";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
    #[error("{var}: {source}")]
    Level {
        var: &'static str,
        source: ParseLevelError,
    },
    #[error("{var}: unknown caller part {part:?}, expected file, line, func or none")]
    CallerPart { var: &'static str, part: String },
}

/// Reads options from the process environment.
pub fn options_from_env() -> Result<Vec<LoggerOption>, EnvError> {
    options_from_lookup(|name| std::env::var(name).ok())
}

/// Reads options through `lookup`, which maps a variable name to its value.
pub fn options_from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Vec<LoggerOption>, EnvError> {
    let mut options = Vec::new();

    if let Some(level) = lookup(LEVEL_VAR) {
        let level = level.trim().parse::<Level>().map_err(|source| EnvError::Level {
            var: LEVEL_VAR,
            source,
        })?;
        options.push(LoggerOption::Level(level));
    }

    if let Some(format) = lookup(TIME_FORMAT_VAR) {
        options.push(LoggerOption::TimeFormat(format));
    }

    if let Some(component) = lookup(COMPONENT_VAR) {
        options.push(LoggerOption::Component(component));
    }

    if let Some(caller) = lookup(CALLER_VAR) {
        options.extend(caller_options(&caller)?);
    }

    Ok(options)
}

fn caller_options(value: &str) -> Result<[LoggerOption; 3], EnvError> {
    let (mut file, mut line, mut func) = (false, false, false);
    for part in value.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        match part.to_ascii_lowercase().as_str() {
            "file" => file = true,
            "line" => line = true,
            "func" | "function" => func = true,
            "none" => {}
            _ => {
                return Err(EnvError::CallerPart {
                    var: CALLER_VAR,
                    part: part.to_string(),
                });
            }
        }
    }
    Ok([
        LoggerOption::CallerFile(file),
        LoggerOption::CallerLine(line),
        LoggerOption::CallerFunc(func),
    ])
}
