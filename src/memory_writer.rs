// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Writer
//!
//! A sink that keeps everything written to it, for tests and for programs
//! that want to inspect their own log output.
//!
//! Wrap it in an `Arc` and keep a clone: the [`Writer`](crate::Writer) built
//! from the `Arc` shares its identity, so every logger writing to it is
//! serialized by the same registry guard.
//!
//! ```
//! use sharedlog::{Logger, LoggerOption, MemoryWriter};
//! use std::sync::Arc;
//!
//! let buffer = Arc::new(MemoryWriter::new());
//! let logger = Logger::new([
//!     LoggerOption::Writers(vec![buffer.clone().into()]),
//!     LoggerOption::TimeFormat(String::new()),
//! ]);
//! logger.warn("disk almost full");
//! assert!(buffer.drain().ends_with("disk almost full\n"));
//! assert_eq!(buffer.drain(), "");
//! ```

use parking_lot::Mutex;
use std::io::Write;

/// Collects written bytes in memory.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    bytes: Mutex<Vec<u8>>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug/Default: derived, an empty buffer is the obvious zero value
// - Clone: NOT implemented, a copy would be a different identity and that is
//   rarely what a caller means; share it with `Arc` instead
// - PartialEq/Eq/Hash: NOT implemented, contents change under concurrent writes
// - Send/Sync: automatic through the mutex

impl MemoryWriter {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self {
            bytes: Mutex::new(Vec::new()),
        }
    }

    /// Everything written so far, without clearing it.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Everything written so far, clearing the buffer.
    pub fn drain(&self) -> String {
        let bytes = std::mem::take(&mut *self.bytes.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// The completed lines written so far, without their newlines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }
}

impl Write for &MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
