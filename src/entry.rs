// SPDX-License-Identifier: MIT OR Apache-2.0

//! The entry type delivered to writers.
//!
//! An [`Entry`] is built once per log call by the [`Logger`](crate::Logger) and
//! then handed by reference to every writer visible from the logger's context.
//! Entries are immutable; writers that want to keep one clone it.
//!
//! # Example
//!
//! ```rust
//! use tracer::{Entry, Level, args};
//!
//! let entry = Entry::new(
//!     Level::Alert,
//!     "disk almost full",
//!     Some("tx-17".to_string()),
//!     args!["/var"],
//! );
//! assert_eq!(entry.transaction_id(), Some("tx-17"));
//! assert_eq!(entry.to_string(), "ALERT [tx-17] disk almost full /var");
//! ```

use crate::Level;
use crate::arg::Arg;
use std::fmt::Display;

/**
A single log line.

Carries the message exactly as passed by the caller, the resolved transaction
id (`None` when the line belongs to no transaction), the severity and the
caller's arguments in their original order.
*/
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    message: String,
    transaction_id: Option<String>,
    level: Level,
    args: Vec<Arg>,
}

impl Entry {
    pub fn new(
        level: Level,
        message: impl Into<String>,
        transaction_id: Option<String>,
        args: Vec<Arg>,
    ) -> Self {
        Self {
            message: message.into(),
            transaction_id,
            level,
            args,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }
}

/// Renders `LEVEL [transaction-id] message arg...`.
impl Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.level)?;
        if let Some(id) = &self.transaction_id {
            write!(f, " [{}]", id)?;
        }
        write!(f, " {}", self.message)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
/*
Boilerplate notes for Entry:

IMPLEMENTED:
- Debug, Clone: derived
- PartialEq: derived, lets tests compare whole entries
- Display: one-line rendering used by the bundled writers

NOT IMPLEMENTED:
- Eq/Hash: Arg may wrap floats
- Default: an entry without a level or message is meaningless
- Ord: no meaningful ordering for log lines
*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[test]
    fn display_without_transaction() {
        let entry = Entry::new(Level::Info, "hello", None, args![]);
        assert_eq!(entry.to_string(), "INFO hello");
    }

    #[test]
    fn display_with_args() {
        let entry = Entry::new(Level::Debug, "ids", Some("t".into()), args![1, "two"]);
        assert_eq!(entry.to_string(), "DEBUG [t] ids 1 two");
    }

    #[test]
    fn accessors() {
        let entry = Entry::new(Level::Error, "boom", None, args!["x"]);
        assert_eq!(entry.message(), "boom");
        assert_eq!(entry.transaction_id(), None);
        assert_eq!(entry.level(), Level::Error);
        assert_eq!(entry.args(), &args!["x"][..]);
    }
}
