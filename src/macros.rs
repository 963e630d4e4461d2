// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging macros.
//!
//! The macros do the same as the `*f` methods on [`Logger`](crate::Logger),
//! and additionally record the path of the function they are invoked in, so
//! [`LoggerOption::CallerFunc`](crate::LoggerOption::CallerFunc) has a name to
//! print. The first argument is anything that derefs to a `Logger`.
//!
//! ```
//! use sharedlog::{Logger, LoggerOption, MemoryWriter};
//! use std::sync::Arc;
//!
//! fn handle(logger: &Logger) {
//!     sharedlog::info!(logger, "handled {} requests", 3);
//! }
//!
//! colored::control::set_override(false);
//! let buffer = Arc::new(MemoryWriter::new());
//! let logger = Logger::new([
//!     LoggerOption::Writers(vec![buffer.clone().into()]),
//!     LoggerOption::TimeFormat(String::new()),
//!     LoggerOption::CallerFunc(true),
//! ]);
//! handle(&logger);
//! assert_eq!(buffer.contents(), "INFO handled 3 requests\thandle\n");
//! ```

/// The path of the enclosing function, e.g. `my_crate::server::run`.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_path {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        match name.strip_suffix("::f") {
            Some(path) => path,
            None => name,
        }
    }};
}

/// Logs at `level`: `log!(logger, Level::Warn, "retrying in {}s", delay)`.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_at(
            $level,
            $crate::CallSite::here().with_function($crate::__function_path!()),
            ::std::format_args!($($arg)+),
        )
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}
