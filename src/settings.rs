// SPDX-License-Identifier: MIT OR Apache-2.0

//! One logger's configuration, as a plain value.
//!
//! Loggers never share a `Settings`. A child starts from a clone of its
//! parent's settings with the child's own options merged on top, and
//! [`Logger::patch`](crate::Logger::patch) replaces a clone, so no change made
//! through one logger is ever visible through another.
//!
//! Fields that can be inherited are `Option`s: `None` means "not set here",
//! which is different from a set value that happens to be empty or false.

use crate::Level;
use crate::caller::CallerSettings;
use crate::options::{LoggerOption, RFC3339};
use crate::writer::Writer;

pub const DEFAULT_LEVEL: Level = Level::Info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub(crate) writers: Vec<Writer>,
    pub(crate) level: Option<Level>,
    pub(crate) time_format: Option<String>,
    pub(crate) component: String,
    pub(crate) caller: CallerSettings,
}

impl Settings {
    /// Settings holding exactly what `options` set, and nothing else.
    pub fn new(options: impl IntoIterator<Item = LoggerOption>) -> Self {
        let mut settings = Settings::default();
        for option in options {
            settings.apply(option);
        }
        settings
    }

    pub fn apply(&mut self, option: LoggerOption) {
        match option {
            LoggerOption::Level(level) => self.level = Some(level),
            LoggerOption::Component(component) => self.component = component,
            LoggerOption::CallerFile(enabled) => self.caller.file = Some(enabled),
            LoggerOption::CallerLine(enabled) => self.caller.line = Some(enabled),
            LoggerOption::CallerFunc(enabled) => self.caller.func = Some(enabled),
            LoggerOption::TimeFormat(format) => self.time_format = Some(format),
            LoggerOption::Writers(writers) => self.writers = writers,
            LoggerOption::AddWriters(writers) => {
                for writer in writers {
                    if !self.writers.contains(&writer) {
                        self.writers.push(writer);
                    }
                }
            }
        }
    }

    /**
    Fills every unset field: stdout, [`Level::Info`], [`RFC3339`], and no
    caller details. Only root loggers need this; children inherit filled
    fields.
    */
    pub fn set_defaults(&mut self) {
        if self.writers.is_empty() {
            self.writers.push(Writer::stdout());
        }
        self.level.get_or_insert(DEFAULT_LEVEL);
        self.time_format.get_or_insert_with(|| RFC3339.to_string());
        self.caller.set_defaults();
    }

    /**
    Takes every field `other` sets and keeps the rest.

    A writer list counts as set when it is non-empty, and a component when it
    is non-empty.
    */
    pub fn override_with(&mut self, other: Settings) {
        if !other.writers.is_empty() {
            self.writers = other.writers;
        }
        if let Some(level) = other.level {
            self.level = Some(level);
        }
        if let Some(format) = other.time_format {
            self.time_format = Some(format);
        }
        if !other.component.is_empty() {
            self.component = other.component;
        }
        self.caller.override_with(&other.caller);
    }

    pub fn writers(&self) -> &[Writer] {
        &self.writers
    }

    pub fn level(&self) -> Option<Level> {
        self.level
    }

    pub fn time_format(&self) -> Option<&str> {
        self.time_format.as_deref()
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn caller(&self) -> &CallerSettings {
        &self.caller
    }

    /// Whether a message at `level` passes the minimum level.
    pub fn enables(&self, level: Level) -> bool {
        self.level.unwrap_or(DEFAULT_LEVEL) >= level
    }
}
