// SPDX-License-Identifier: MIT OR Apache-2.0

//! Building the text of one log line.
//!
//! A line is assembled in a single `String` owned by the emitting thread and
//! only handed to the writers once complete, so the write guards are held for
//! a single `write_line` call each and never while formatting.
//!
//! Layout:
//!
//! ```text
//! <timestamp> <LEVEL> [<component>] <message>\t<caller>
//! ```
//!
//! where the timestamp, component and caller parts are each optional.

use crate::Level;
use crate::caller::{self, CallSite};
use crate::options::RFC3339;
use crate::settings::Settings;
use chrono::Utc;
use colored::Colorize;
use std::fmt::{Arguments, Write};

#[derive(Debug, Default)]
pub(crate) struct LogLine {
    text: String,
}

impl LogLine {
    pub(crate) fn new() -> Self {
        Self {
            text: String::with_capacity(64),
        }
    }

    /**
    The current UTC time in `format`, followed by a space.

    Nothing is written for an empty format, nor for one `chrono` cannot render.
    */
    pub(crate) fn log_timestamp(&mut self, format: &str) {
        if format.is_empty() {
            return;
        }
        let mut stamp = String::new();
        if write!(stamp, "{}", Utc::now().format(format)).is_ok() {
            self.text.push_str(&stamp);
            self.text.push(' ');
        }
    }

    pub(crate) fn log_level(&mut self, level: Level) {
        self.text.push_str(&level.colored_string());
        self.text.push(' ');
    }

    pub(crate) fn log_component(&mut self, component: &str) {
        if component.is_empty() {
            return;
        }
        self.text.push('[');
        self.text.push_str(component);
        self.text.push_str("] ");
    }

    pub(crate) fn log_message(&mut self, message: Arguments<'_>) {
        let _ = self.text.write_fmt(message);
    }

    pub(crate) fn log_caller(&mut self, caller: &str) {
        if caller.is_empty() {
            return;
        }
        self.text.push('\t');
        self.text.push_str(&caller.bright_white().to_string());
    }

    pub(crate) fn finish(mut self) -> String {
        self.text.push('\n');
        self.text
    }
}

/// The full line for `message` at `level`, newline included.
pub(crate) fn render(
    settings: &Settings,
    level: Level,
    message: Arguments<'_>,
    site: &CallSite,
) -> String {
    let mut line = LogLine::new();
    line.log_timestamp(settings.time_format().unwrap_or(RFC3339));
    line.log_level(level);
    line.log_component(settings.component());
    line.log_message(message);
    line.log_caller(&caller::line(settings.caller(), site));
    line.finish()
}
