// SPDX-License-Identifier: MIT OR Apache-2.0

//! Output destinations.
//!
//! A [`Writer`] is a cheap, cloneable handle to a shared [`Sink`]. The
//! identity of a writer is the sink allocation behind it, and the
//! [`WriterRegistry`](crate::WriterRegistry) hands every logger that holds the
//! same identity the same write guard. Two sinks built separately around the
//! same physical resource (say two `File`s opened on one path) are different
//! identities and are not serialized against each other.

use std::fmt::Debug;
use std::io::Write;
use std::sync::{Arc, OnceLock, Weak};

/**
Something a log line can be written to through a shared reference.

This is implemented for every `T` where `&T: Write`, which covers
[`std::io::Stdout`], [`std::io::Stderr`], [`std::fs::File`],
[`std::net::TcpStream`] and [`MemoryWriter`](crate::MemoryWriter).
Implementations need not be atomic: concurrent writes through one
[`Writer`] identity are serialized by the registry guard.
*/
pub trait Sink: Send + Sync + 'static {
    /// Writes one complete, newline-terminated line.
    fn write_line(&self, line: &str) -> std::io::Result<()>;
}

impl<T> Sink for T
where
    T: Send + Sync + 'static,
    for<'a> &'a T: Write,
{
    fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut writer = self;
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }
}

/**
A handle to an output destination.

Equality is identity: two writers are equal iff they point at the same sink
allocation.

```
use sharedlog::{MemoryWriter, Writer};
use std::sync::Arc;

let buffer = Arc::new(MemoryWriter::new());
let a = Writer::from(buffer.clone());
assert_eq!(a, a.clone());
assert_eq!(a, Writer::from(buffer));
assert_ne!(a, Writer::from(Arc::new(MemoryWriter::new())));
assert_eq!(Writer::stdout(), Writer::stdout());
```
*/
#[derive(Clone)]
pub struct Writer {
    sink: Arc<dyn Sink>,
}

static STDOUT: OnceLock<Writer> = OnceLock::new();
static STDERR: OnceLock<Writer> = OnceLock::new();
static DISCARD: OnceLock<Writer> = OnceLock::new();

/// Accepts and drops every byte.
struct Discard;

impl Write for &Discard {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Writer {
    /// Wraps a sink in a new identity.
    pub fn new<S: Sink>(sink: S) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// The process standard output. Every call returns the same identity.
    pub fn stdout() -> Self {
        STDOUT
            .get_or_init(|| Writer::new(std::io::stdout()))
            .clone()
    }

    /// The process standard error. Every call returns the same identity.
    pub fn stderr() -> Self {
        STDERR
            .get_or_init(|| Writer::new(std::io::stderr()))
            .clone()
    }

    /**
    A writer that drops everything.

    The registry never allocates a guard for it, since nothing observable
    happens on write.
    */
    pub fn discard() -> Self {
        DISCARD.get_or_init(|| Writer::new(Discard)).clone()
    }

    pub fn is_discard(&self) -> bool {
        DISCARD.get().is_some_and(|discard| discard == self)
    }

    /// A number unique to this identity for as long as the handle lives.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.sink) as *const () as usize
    }

    /// Tracks whether the sink is still alive without keeping it open.
    pub(crate) fn downgrade(&self) -> Weak<dyn Sink> {
        Arc::downgrade(&self.sink)
    }

    pub(crate) fn write_line(&self, line: &str) -> std::io::Result<()> {
        self.sink.write_line(line)
    }
}

impl<S: Sink> From<Arc<S>> for Writer {
    fn from(sink: Arc<S>) -> Self {
        Self { sink }
    }
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Clone: derived, shares the identity
// - PartialEq/Eq/Hash: by identity, consistent with the registry key
// - Debug: identity only, sinks are not required to be Debug
// - Default: NOT implemented, the default destination is a settings concern
// - Ord: NOT implemented, addresses have no meaningful order

impl PartialEq for Writer {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Writer {}

impl std::hash::Hash for Writer {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl Debug for Writer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self == &Writer::stdout() {
            f.write_str("Writer(stdout)")
        } else if self == &Writer::stderr() {
            f.write_str("Writer(stderr)")
        } else if self.is_discard() {
            f.write_str("Writer(discard)")
        } else {
            write!(f, "Writer({:#x})", self.id())
        }
    }
}
