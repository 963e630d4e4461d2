// SPDX-License-Identifier: MIT OR Apache-2.0

//! Write guards shared between loggers.
//!
//! Every [`Logger`](crate::Logger) owns its settings privately, but the
//! destinations it writes to are often shared: a parent and all of its
//! children usually write to the same stdout or the same file. The registry
//! maps each [`Writer`] identity to one guard, so that any two loggers holding
//! the same writer take the same lock around every write to it, and lines from
//! different loggers never interleave.
//!
//! # Architecture
//!
//! The identity → guard map lives behind a single mutex that is held only while
//! looking up or inserting guards, never while writing. Guards are handed out
//! as `Arc`s and outlive the map lookup, so a logger keeps writing under its
//! guard without touching the registry again until it is patched.
//!
//! Each entry also holds a weak reference to its writer. Entries whose writer
//! has been dropped are removed on the next registration, so the map tracks
//! live identities only and a new writer never inherits a dead one's guard.
//!
//! A process-wide registry is created lazily by [`WriterRegistry::global`] and
//! is what [`Logger::new`](crate::Logger::new) uses. Tests that want isolation
//! build their own with [`WriterRegistry::new`] and pass it to
//! [`Logger::with_registry`](crate::Logger::with_registry).
//!
//! # Examples
//!
//! ```
//! use sharedlog::{MemoryWriter, Writer, WriterRegistry};
//! use std::sync::Arc;
//!
//! let registry = WriterRegistry::new();
//! let writer = Writer::from(Arc::new(MemoryWriter::new()));
//!
//! let first = registry.register_writers(&[writer.clone(), Writer::discard()]);
//! let second = registry.register_writers(&[writer]);
//! assert!(Arc::ptr_eq(first[0].as_ref().unwrap(), second[0].as_ref().unwrap()));
//! assert!(first[1].is_none());
//! ```

use crate::writer::{Sink, Writer};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, Weak};

/// Held for the duration of one write to one destination.
pub type Guard = Arc<Mutex<()>>;

#[derive(Debug)]
struct Entry {
    writer: Weak<dyn Sink>,
    guard: Guard,
}

impl Entry {
    fn is_live(&self) -> bool {
        self.writer.strong_count() > 0
    }
}

static GLOBAL_REGISTRY: OnceLock<Arc<WriterRegistry>> = OnceLock::new();

/// Deduplicates write guards by writer identity.
#[derive(Debug, Default)]
pub struct WriterRegistry {
    entries: Mutex<HashMap<usize, Entry>>,
}

impl WriterRegistry {
    /// An empty registry, independent of the global one.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::with_capacity(1)),
        }
    }

    /// The registry shared by every logger built with [`Logger::new`](crate::Logger::new).
    pub fn global() -> Arc<WriterRegistry> {
        GLOBAL_REGISTRY
            .get_or_init(|| Arc::new(WriterRegistry::new()))
            .clone()
    }

    /**
    Resolves one guard per writer, in order.

    Known identities get their existing guard, unknown ones get a new guard that
    is remembered for later calls. The discard writer gets `None`.
    */
    pub fn register_writers(&self, writers: &[Writer]) -> Vec<Option<Guard>> {
        let mut entries = self.entries.lock();
        entries.retain(|_, entry| entry.is_live());
        writers
            .iter()
            .map(|writer| Self::register_writer(&mut entries, writer))
            .collect()
    }

    fn register_writer(entries: &mut HashMap<usize, Entry>, writer: &Writer) -> Option<Guard> {
        if writer.is_discard() {
            return None;
        }
        let entry = entries.entry(writer.id()).or_insert_with(|| Entry {
            writer: writer.downgrade(),
            guard: Guard::default(),
        });
        Some(entry.guard.clone())
    }

    /// The number of distinct live writer identities registered.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .values()
            .filter(|entry| entry.is_live())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
