// SPDX-License-Identifier: MIT OR Apache-2.0

//! The surfaces of [`Logger`], as traits, so code can accept "something to log
//! to" without naming the concrete type.

use crate::Logger;
use crate::options::LoggerOption;
use std::fmt::{Arguments, Debug};

/**
Logging at the four levels.

Every method is `#[track_caller]`, so caller details point at the code
calling through the trait, `dyn` included.
*/
pub trait LeveledLogger: Debug + Send + Sync {
    #[track_caller]
    fn debug(&self, s: &str);
    #[track_caller]
    fn info(&self, s: &str);
    #[track_caller]
    fn warn(&self, s: &str);
    #[track_caller]
    fn error(&self, s: &str);
    #[track_caller]
    fn debugf(&self, args: Arguments<'_>);
    #[track_caller]
    fn infof(&self, args: Arguments<'_>);
    #[track_caller]
    fn warnf(&self, args: Arguments<'_>);
    #[track_caller]
    fn errorf(&self, args: Arguments<'_>);
}

/**
Changing a logger in place.

The change is local to the logger patched; see [`Logger::patch`].
*/
pub trait LoggerPatcher {
    fn patch(&self, options: Vec<LoggerOption>);
}

/// Deriving new loggers.
pub trait ChildConstructor {
    fn child(&self, options: Vec<LoggerOption>) -> Logger;
}

impl LeveledLogger for Logger {
    #[track_caller]
    fn debug(&self, s: &str) {
        Logger::debug(self, s)
    }

    #[track_caller]
    fn info(&self, s: &str) {
        Logger::info(self, s)
    }

    #[track_caller]
    fn warn(&self, s: &str) {
        Logger::warn(self, s)
    }

    #[track_caller]
    fn error(&self, s: &str) {
        Logger::error(self, s)
    }

    #[track_caller]
    fn debugf(&self, args: Arguments<'_>) {
        Logger::debugf(self, args)
    }

    #[track_caller]
    fn infof(&self, args: Arguments<'_>) {
        Logger::infof(self, args)
    }

    #[track_caller]
    fn warnf(&self, args: Arguments<'_>) {
        Logger::warnf(self, args)
    }

    #[track_caller]
    fn errorf(&self, args: Arguments<'_>) {
        Logger::errorf(self, args)
    }
}

impl LoggerPatcher for Logger {
    fn patch(&self, options: Vec<LoggerOption>) {
        Logger::patch(self, options)
    }
}

impl ChildConstructor for Logger {
    fn child(&self, options: Vec<LoggerOption>) -> Logger {
        Logger::child(self, options)
    }
}

/*
Boilerplate notes.

These traits are implemented only for Logger. Arc<Logger> reaches them through
Deref; a blanket impl for Arc<T> would add nothing.
Patch and child take a Vec rather than `impl IntoIterator` so the traits stay
usable as `dyn` objects.
*/
