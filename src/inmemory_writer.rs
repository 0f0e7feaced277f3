// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Writer
//!
//! This module provides an in-memory writer for testing and debugging purposes.
//! The `InMemoryWriter` keeps every entry it receives instead of printing it,
//! which makes it ideal for:
//!
//! - Unit testing code that logs through a [`Context`](crate::Context)
//! - Checking exactly which entries reached which part of a context tree
//! - Programmatically examining transaction ids and arguments
//!
//! ## Architecture
//!
//! Entries are stored in a `Mutex<Vec<Entry>>`, so one writer can be shared by
//! loggers on many threads.  Register it behind an `Arc` and keep a clone to
//! read the captured entries back.

use crate::entry::Entry;
use crate::writer::Writer;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A writer that stores entries in a `Vec<Entry>`.
///
/// # Example
///
/// ```rust
/// use tracer::{Context, InMemoryWriter, Level, args};
/// use std::sync::Arc;
///
/// let root = Context::detached(Level::Debug, false);
/// let writer = Arc::new(InMemoryWriter::new());
/// root.register_writer(writer.clone());
///
/// root.get_logger("db").warning("slow query {}", args![250]);
///
/// let entries = writer.drain_entries();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].message(), "slow query {}");
/// assert!(writer.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryWriter {
    entries: Mutex<Vec<Entry>>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug: Derived for diagnostic purposes and required by Writer trait
// - Default: Derived, an empty buffer
// - Clone: NOT implemented - share the writer through Arc instead
// - PartialEq/Eq/Hash: NOT implemented - comparing mutex state is problematic
// - Send/Sync: Automatically implemented due to Mutex usage (required for Writer trait)

impl InMemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Entry>> {
        // A panicking writer elsewhere must not make the captured entries unreadable.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of every captured entry, oldest first.
    pub fn entries(&self) -> Vec<Entry> {
        self.lock().clone()
    }

    /// Takes every captured entry, leaving the buffer empty.
    pub fn drain_entries(&self) -> Vec<Entry> {
        std::mem::take(&mut *self.lock())
    }

    /// Drains all entries into a single string, one rendered entry per line.
    ///
    /// ```rust
    /// use tracer::{Context, InMemoryWriter, Level, args};
    /// use std::sync::Arc;
    ///
    /// let root = Context::detached(Level::Debug, false);
    /// let writer = Arc::new(InMemoryWriter::new());
    /// root.register_writer(writer.clone());
    ///
    /// let logger = root.get_logger("jobs");
    /// logger.info("First message", args![]);
    /// logger.trace("job-9").error("Second message", args![]);
    ///
    /// assert_eq!(writer.drain_logs(), "INFO First message\nERROR [job-9] Second message");
    /// assert_eq!(writer.drain_logs(), "");
    /// ```
    pub fn drain_logs(&self) -> String {
        self.drain_entries()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Writer for InMemoryWriter {
    fn write(&self, entry: &Entry) {
        self.lock().push(entry.clone());
    }
}
