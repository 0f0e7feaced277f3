// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::entry::Entry;
use crate::level::Level;
use crate::writer::Writer;

/**
A reference writer that logs to stderr.

Each entry is rendered with its `Display` form on its own line.  An optional
threshold drops entries below a given level; this is where level filtering
happens, loggers deliver everything.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StdErrorWriter {
    minimum_level: Option<Level>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug/Clone/Copy: the writer holds only an optional level
// - PartialEq/Eq/Hash: two writers with the same threshold behave identically
// - Default: no threshold, same as new()
// - Display: NOT implemented - no meaningful string representation

impl StdErrorWriter {
    pub const fn new() -> Self {
        Self {
            minimum_level: None,
        }
    }

    /// A writer that ignores entries less severe than `level`.
    pub const fn with_minimum_level(level: Level) -> Self {
        Self {
            minimum_level: Some(level),
        }
    }

    pub fn accepts(&self, level: Level) -> bool {
        self.minimum_level.is_none_or(|minimum| level >= minimum)
    }
}

impl Writer for StdErrorWriter {
    fn write(&self, entry: &Entry) {
        if !self.accepts(entry.level()) {
            return;
        }
        use std::io::Write;
        let mut lock = std::io::stderr().lock();
        writeln!(lock, "{}", entry).expect("Can't log to stderr");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold() {
        let all = StdErrorWriter::new();
        assert!(all.accepts(Level::Debug));

        let warnings = StdErrorWriter::with_minimum_level(Level::Warning);
        assert!(!warnings.accepts(Level::Notice));
        assert!(warnings.accepts(Level::Warning));
        assert!(warnings.accepts(Level::Emergency));
    }

    #[test]
    fn writes_without_panicking() {
        let entry = Entry::new(Level::Info, "stderr writer test", None, Vec::new());
        StdErrorWriter::new().write(&entry);
        StdErrorWriter::with_minimum_level(Level::Alert).write(&entry);
    }
}
