// SPDX-License-Identifier: MIT OR Apache-2.0

//! The logger.
//!
//! # Locking
//!
//! A [`Logger`] guards its settings and its list of write guards with two
//! separate `RwLock`s:
//!
//! * emission read-locks the settings, clones them, clones the guard list
//!   under its read lock, and releases both before formatting. Each writer's
//!   guard is then taken for that one write only;
//! * [`Logger::patch`] write-locks the settings, resolves the new guards, then
//!   swaps the settings and the guard list.
//!
//! Because the guard list is cloned while the settings read lock is held, the
//! writers an emission uses and the guards it takes always come from the same
//! generation of settings. No logger lock is held while formatting or writing,
//! so a slow writer delays only other writes to that same writer.

use crate::Level;
use crate::caller::CallSite;
use crate::log_line;
use crate::options::LoggerOption;
use crate::registry::{Guard, WriterRegistry};
use crate::settings::Settings;
use parking_lot::RwLock;
use std::fmt::Arguments;
use std::sync::Arc;

/**
A leveled logger, safe to use from any number of threads.

A logger owns its settings. [`child`](Logger::child) builds a new logger from a
copy of them and [`patch`](Logger::patch) changes only the logger it is called
on. What loggers do share are the write guards for their writers, so lines
from a parent and its children written to the same writer never interleave.

```
use sharedlog::{Logger, LoggerOption, MemoryWriter};
use std::sync::Arc;

let buffer = Arc::new(MemoryWriter::new());
let parent = Logger::new([
    LoggerOption::Writers(vec![buffer.clone().into()]),
    LoggerOption::TimeFormat(String::new()),
    LoggerOption::Component("A".to_string()),
]);
let child = parent.child([LoggerOption::Component("B".to_string())]);

parent.info("from parent");
child.info("from child");
assert!(buffer.contents().contains("[A] from parent"));
assert!(buffer.contents().contains("[B] from child"));
```
*/
#[derive(Debug)]
pub struct Logger {
    settings: RwLock<Settings>,
    // parallel to settings.writers
    guards: RwLock<Vec<Option<Guard>>>,
    registry: Arc<WriterRegistry>,
}

impl Logger {
    /**
    A root logger using the process-wide [`WriterRegistry`].

    Every field no option sets gets its default: stdout, [`Level::Info`],
    [`RFC3339`](crate::RFC3339) timestamps, no component and no caller details.
    */
    pub fn new(options: impl IntoIterator<Item = LoggerOption>) -> Self {
        Self::with_registry(WriterRegistry::global(), options)
    }

    /// A root logger whose writers are guarded by `registry`.
    pub fn with_registry(
        registry: Arc<WriterRegistry>,
        options: impl IntoIterator<Item = LoggerOption>,
    ) -> Self {
        let mut settings = Settings::new(options);
        settings.set_defaults();
        Self::from_settings(settings, registry)
    }

    fn from_settings(settings: Settings, registry: Arc<WriterRegistry>) -> Self {
        let guards = registry.register_writers(settings.writers());
        Self {
            settings: RwLock::new(settings),
            guards: RwLock::new(guards),
            registry,
        }
    }

    /**
    A new logger starting from this logger's current settings, with `options`
    applied on top.

    The child shares this logger's registry and nothing else: patching either
    one afterwards leaves the other unchanged.

    Options are first collected on their own and then merged, so
    [`LoggerOption::AddWriters`] here replaces the inherited writers with the
    added ones rather than appending to them. Use
    `patch([AddWriters(..)])` on the child to append.
    */
    pub fn child(&self, options: impl IntoIterator<Item = LoggerOption>) -> Logger {
        let overlay = Settings::new(options);
        let mut settings = self.settings.read().clone();
        settings.override_with(overlay);
        Self::from_settings(settings, self.registry.clone())
    }

    /**
    Applies `options` to this logger only.

    Children created earlier keep the settings they were created with.
    */
    pub fn patch(&self, options: impl IntoIterator<Item = LoggerOption>) {
        let mut settings = self.settings.write();
        let mut updated = settings.clone();
        for option in options {
            updated.apply(option);
        }
        let guards = self.registry.register_writers(updated.writers());
        *settings = updated;
        *self.guards.write() = guards;
    }

    /// A copy of the current settings.
    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    /// The most verbose level currently emitted.
    pub fn level(&self) -> Level {
        self.settings
            .read()
            .level()
            .unwrap_or(crate::settings::DEFAULT_LEVEL)
    }

    /// Whether a message at `level` would be written right now.
    pub fn enabled(&self, level: Level) -> bool {
        self.settings.read().enables(level)
    }

    pub fn registry(&self) -> &Arc<WriterRegistry> {
        &self.registry
    }

    /**
    Writes `message` at `level` as if called from `site`.

    This is what the logging macros expand to. Write errors are ignored.
    */
    pub fn log_at(&self, level: Level, site: CallSite, message: Arguments<'_>) {
        let (settings, guards) = {
            let settings = self.settings.read();
            if !settings.enables(level) {
                return;
            }
            (settings.clone(), self.guards.read().clone())
        };

        let line = log_line::render(&settings, level, message, &site);

        for (writer, guard) in settings.writers().iter().zip(guards.iter()) {
            match guard {
                Some(guard) => {
                    let _held = guard.lock();
                    let _ = writer.write_line(&line);
                }
                None => {
                    let _ = writer.write_line(&line);
                }
            }
        }
    }

    /// Logs `s` at `level`.
    #[track_caller]
    pub fn log(&self, level: Level, s: &str) {
        self.log_at(level, CallSite::here(), format_args!("{s}"));
    }

    /// Logs a formatted message at `level`.
    #[track_caller]
    pub fn logf(&self, level: Level, args: Arguments<'_>) {
        self.log_at(level, CallSite::here(), args);
    }

    #[track_caller]
    pub fn debug(&self, s: &str) {
        self.log_at(Level::Debug, CallSite::here(), format_args!("{s}"));
    }

    #[track_caller]
    pub fn info(&self, s: &str) {
        self.log_at(Level::Info, CallSite::here(), format_args!("{s}"));
    }

    #[track_caller]
    pub fn warn(&self, s: &str) {
        self.log_at(Level::Warn, CallSite::here(), format_args!("{s}"));
    }

    #[track_caller]
    pub fn error(&self, s: &str) {
        self.log_at(Level::Error, CallSite::here(), format_args!("{s}"));
    }

    /// `logger.debugf(format_args!("{} items", n))`
    #[track_caller]
    pub fn debugf(&self, args: Arguments<'_>) {
        self.log_at(Level::Debug, CallSite::here(), args);
    }

    #[track_caller]
    pub fn infof(&self, args: Arguments<'_>) {
        self.log_at(Level::Info, CallSite::here(), args);
    }

    #[track_caller]
    pub fn warnf(&self, args: Arguments<'_>) {
        self.log_at(Level::Warn, CallSite::here(), args);
    }

    #[track_caller]
    pub fn errorf(&self, args: Arguments<'_>) {
        self.log_at(Level::Error, CallSite::here(), args);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new([])
    }
}

/*
Boilerplate notes.

Clone is deliberately absent: a clone would either share settings (then it is
just an Arc<Logger>) or copy them (then it is `child([])`), and picking one
silently would surprise someone.
PartialEq/Eq/Hash: two loggers with equal settings are still different loggers; compare `settings()` instead.
Default: root logger with every default.
Send/Sync: automatic, all state is behind parking_lot locks.
*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caller::CallerSettings;
    use crate::options::{RFC1123, RFC3339};
    use crate::writer::Writer;
    use crate::MemoryWriter;
    use regex::Regex;

    const TIME_PREFIX: &str = r"^2\d{3}-[0-1]\d-[0-3]\dT[0-2]\d:[0-5]\d:[0-5]\dZ ";

    fn buffer() -> (Arc<MemoryWriter>, Writer) {
        colored::control::set_override(false);
        let buffer = Arc::new(MemoryWriter::new());
        let writer = Writer::from(buffer.clone());
        (buffer, writer)
    }

    fn caller(file: bool, line: bool, func: bool) -> CallerSettings {
        CallerSettings {
            file: Some(file),
            line: Some(line),
            func: Some(func),
        }
    }

    fn assert_guards_match(logger: &Logger) {
        let settings = logger.settings.read();
        let guards = logger.guards.read();
        assert_eq!(settings.writers().len(), guards.len());
        for (writer, guard) in settings.writers().iter().zip(guards.iter()) {
            assert_eq!(writer.is_discard(), guard.is_none());
        }
    }

    #[test]
    fn new_without_options() {
        let logger = Logger::with_registry(Arc::new(WriterRegistry::new()), []);
        let settings = logger.settings();
        assert_eq!(settings.writers(), &[Writer::stdout()]);
        assert_eq!(settings.level(), Some(Level::Info));
        assert_eq!(settings.time_format(), Some(RFC3339));
        assert_eq!(settings.component(), "");
        assert_eq!(settings.caller(), &caller(false, false, false));
        assert_guards_match(&logger);
        assert_eq!(logger.registry().len(), 1);
    }

    #[test]
    fn new_with_all_options() {
        let logger = Logger::with_registry(
            Arc::new(WriterRegistry::new()),
            [
                LoggerOption::Level(Level::Info),
                LoggerOption::CallerFile(true),
                LoggerOption::CallerLine(true),
                LoggerOption::CallerFunc(true),
                LoggerOption::TimeFormat(RFC1123.to_string()),
                LoggerOption::Writers(vec![Writer::discard()]),
            ],
        );
        let settings = logger.settings();
        assert_eq!(settings.writers(), &[Writer::discard()]);
        assert_eq!(settings.time_format(), Some(RFC1123));
        assert_eq!(settings.caller(), &caller(true, true, true));
        assert_eq!(logger.guards.read().len(), 1);
        assert!(logger.guards.read()[0].is_none());
        assert!(logger.registry().is_empty());
    }

    #[test]
    fn child_without_options_copies() {
        let parent = Logger::new([LoggerOption::Component("p".to_string())]);
        let child = parent.child([]);
        assert_eq!(child.settings(), parent.settings());
        assert!(Arc::ptr_eq(child.registry(), parent.registry()));
    }

    #[test]
    fn child_overrides() {
        let parent = Logger::new([
            LoggerOption::CallerFile(true),
            LoggerOption::CallerLine(true),
            LoggerOption::CallerFunc(true),
        ]);
        let child = parent.child([
            LoggerOption::Level(Level::Info),
            LoggerOption::CallerFunc(false),
            LoggerOption::TimeFormat(RFC1123.to_string()),
            LoggerOption::Writers(vec![Writer::stderr()]),
        ]);
        let settings = child.settings();
        assert_eq!(settings.writers(), &[Writer::stderr()]);
        assert_eq!(settings.time_format(), Some(RFC1123));
        assert_eq!(settings.caller(), &caller(true, true, false));
        assert_guards_match(&child);
    }

    #[test]
    fn children_share_guards() {
        let (_buffer, writer) = buffer();
        let parent = Logger::with_registry(
            Arc::new(WriterRegistry::new()),
            [LoggerOption::Writers(vec![writer])],
        );
        let child = parent.child([LoggerOption::Level(Level::Debug)]);
        let parent_guard = parent.guards.read()[0].clone().unwrap();
        let child_guard = child.guards.read()[0].clone().unwrap();
        assert!(Arc::ptr_eq(&parent_guard, &child_guard));
    }

    #[test]
    fn patch_without_options() {
        let logger = Logger::new([LoggerOption::Level(Level::Warn)]);
        let before = logger.settings();
        logger.patch([]);
        assert_eq!(logger.settings(), before);
        assert_guards_match(&logger);
    }

    #[test]
    fn patch_with_options() {
        let logger = Logger::new([LoggerOption::Writers(vec![Writer::discard()])]);
        logger.patch([
            LoggerOption::Writers(vec![Writer::stdout()]),
            LoggerOption::Level(Level::Warn),
            LoggerOption::CallerFile(true),
        ]);
        let settings = logger.settings();
        assert_eq!(settings.writers(), &[Writer::stdout()]);
        assert_eq!(settings.level(), Some(Level::Warn));
        assert_eq!(settings.caller(), &caller(true, false, false));
        assert!(logger.guards.read()[0].is_some());
        assert_guards_match(&logger);
    }

    #[test]
    fn patch_add_writers_appends() {
        let (_buffer, writer) = buffer();
        let logger = Logger::new([LoggerOption::Writers(vec![Writer::discard()])]);
        logger.patch([LoggerOption::AddWriters(vec![writer.clone(), Writer::discard()])]);
        assert_eq!(logger.settings().writers(), &[Writer::discard(), writer]);
        assert_guards_match(&logger);
    }

    #[test]
    fn patch_does_not_reach_children_or_parent() {
        let parent = Logger::new([LoggerOption::Level(Level::Info)]);
        let child = parent.child([]);
        let grandchild = child.child([]);

        child.patch([LoggerOption::Level(Level::Debug)]);
        assert_eq!(parent.level(), Level::Info);
        assert_eq!(child.level(), Level::Debug);
        assert_eq!(grandchild.level(), Level::Info);

        parent.patch([LoggerOption::Level(Level::Error)]);
        assert_eq!(child.level(), Level::Debug);
        assert_eq!(grandchild.level(), Level::Info);
    }

    #[test]
    fn log_at_info_with_debug_set() {
        let (buffer, writer) = buffer();
        let logger = Logger::new([
            LoggerOption::Writers(vec![writer]),
            LoggerOption::Level(Level::Debug),
        ]);
        logger.info("some words");
        let regex = Regex::new(&format!("{TIME_PREFIX}INFO some words\n$")).unwrap();
        let line = buffer.drain();
        assert!(regex.is_match(&line), "{line:?}");
    }

    #[test]
    fn log_at_info_with_warn_set() {
        let (buffer, writer) = buffer();
        let logger = Logger::new([
            LoggerOption::Writers(vec![writer]),
            LoggerOption::Level(Level::Warn),
        ]);
        logger.info("some words");
        assert_eq!(buffer.drain(), "");
    }

    #[test]
    fn format_string() {
        let (buffer, writer) = buffer();
        let logger = Logger::new([
            LoggerOption::Writers(vec![writer]),
            LoggerOption::Level(Level::Debug),
        ]);
        logger.debugf(format_args!("some {}", "words"));
        let regex = Regex::new(&format!("{TIME_PREFIX}DEBUG some words\n$")).unwrap();
        let line = buffer.drain();
        assert!(regex.is_match(&line), "{line:?}");
    }

    #[test]
    fn plain_message_is_not_a_format_string() {
        let (buffer, writer) = buffer();
        let logger = Logger::new([
            LoggerOption::Writers(vec![writer]),
            LoggerOption::TimeFormat(String::new()),
        ]);
        logger.info("100% {literal}");
        assert_eq!(buffer.drain(), "INFO 100% {literal}\n");
    }

    #[test]
    fn show_caller() {
        let (buffer, writer) = buffer();
        let logger = Logger::new([
            LoggerOption::Writers(vec![writer]),
            LoggerOption::Level(Level::Debug),
            LoggerOption::CallerFile(true),
            LoggerOption::CallerLine(true),
            LoggerOption::CallerFunc(true),
        ]);
        crate::debug!(logger, "some words");
        let expected_line = line!() - 1;
        let regex = Regex::new(&format!(
            "{TIME_PREFIX}DEBUG some words\tlogger.rs:L{expected_line}:show_caller\n$"
        ))
        .unwrap();
        let line = buffer.drain();
        assert!(regex.is_match(&line), "{line:?}");
    }

    #[test]
    fn method_call_reports_call_site() {
        let (buffer, writer) = buffer();
        let logger = Logger::new([
            LoggerOption::Writers(vec![writer]),
            LoggerOption::TimeFormat(String::new()),
            LoggerOption::CallerFile(true),
            LoggerOption::CallerLine(true),
        ]);
        logger.warn("here");
        let expected_line = line!() - 1;
        assert_eq!(
            buffer.drain(),
            format!("WARN here\tlogger.rs:L{expected_line}\n")
        );
    }

    #[test]
    fn caller_func_needs_a_macro() {
        let (buffer, writer) = buffer();
        let logger = Logger::new([
            LoggerOption::Writers(vec![writer]),
            LoggerOption::TimeFormat(String::new()),
            LoggerOption::CallerFunc(true),
        ]);
        logger.info("method");
        crate::info!(logger, "macro");
        assert_eq!(
            buffer.lines(),
            vec!["INFO method", "INFO macro\tcaller_func_needs_a_macro"]
        );
    }

    #[test]
    fn patch_does_not_wait_for_a_slow_write() {
        use parking_lot::Mutex;
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::mpsc;
        use std::time::Duration;

        // Blocks its first write until released.
        struct Stalled {
            entered: mpsc::Sender<()>,
            release: Mutex<mpsc::Receiver<()>>,
            stalled: AtomicBool,
            timed_out: AtomicBool,
        }
        impl std::io::Write for &Stalled {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                if !self.stalled.swap(true, Ordering::SeqCst) {
                    let _ = self.entered.send(());
                    let released = self.release.lock().recv_timeout(Duration::from_secs(10));
                    self.timed_out.store(released.is_err(), Ordering::SeqCst);
                }
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let sink = Arc::new(Stalled {
            entered: entered_tx,
            release: Mutex::new(release_rx),
            stalled: AtomicBool::new(false),
            timed_out: AtomicBool::new(false),
        });
        let (buffer, other) = buffer();
        let logger = Logger::with_registry(
            Arc::new(WriterRegistry::new()),
            [
                LoggerOption::Writers(vec![Writer::from(sink.clone())]),
                LoggerOption::TimeFormat(String::new()),
            ],
        );

        std::thread::scope(|scope| {
            let slow = scope.spawn(|| logger.info("slow"));
            entered_rx
                .recv_timeout(Duration::from_secs(10))
                .expect("write should start");

            logger.patch([LoggerOption::Writers(vec![other])]);
            logger.info("meanwhile");
            release_tx.send(()).expect("writer is still waiting");
            slow.join().expect("emitting thread should complete");
        });

        assert!(!sink.timed_out.load(Ordering::SeqCst));
        assert_eq!(buffer.lines(), vec!["INFO meanwhile"]);
    }

    #[test]
    fn every_writer_gets_the_line() {
        let (first, first_writer) = buffer();
        let (second, second_writer) = buffer();
        let logger = Logger::new([
            LoggerOption::Writers(vec![first_writer, Writer::discard(), second_writer]),
            LoggerOption::TimeFormat(String::new()),
        ]);
        logger.error("boom");
        assert_eq!(first.drain(), "ERROR boom\n");
        assert_eq!(second.drain(), "ERROR boom\n");
    }

    #[test]
    fn failing_writer_does_not_stop_others() {
        struct Broken;
        impl std::io::Write for &Broken {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("broken"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let (buffer, writer) = buffer();
        let logger = Logger::new([
            LoggerOption::Writers(vec![Writer::new(Broken), writer]),
            LoggerOption::TimeFormat(String::new()),
        ]);
        logger.info("still here");
        assert_eq!(buffer.drain(), "INFO still here\n");
    }

    #[test]
    fn level_filtering() {
        for configured in Level::ALL {
            let (buffer, writer) = buffer();
            let logger = Logger::new([
                LoggerOption::Writers(vec![writer]),
                LoggerOption::Level(configured),
                LoggerOption::TimeFormat(String::new()),
            ]);
            for requested in Level::ALL {
                logger.log(requested, "x");
                let written = !buffer.drain().is_empty();
                assert_eq!(written, configured >= requested, "{configured} vs {requested}");
                assert_eq!(logger.enabled(requested), written);
            }
        }
    }
}
