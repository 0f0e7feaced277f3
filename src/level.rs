// SPDX-License-Identifier: MIT OR Apache-2.0

//! Severity levels.
//!
//! Levels are ordered from least to most severe.  A context's minimum level is
//! compared against an entry's level by this ordering.

use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Detailed diagnostics, usually only interesting while developing
    #[default]
    Debug,
    /// Normal operational messages
    Info,
    /// Normal but significant conditions
    Notice,
    /// Suspicious condition
    Warning,
    /// Runtime error
    Error,
    /// Critical condition, a component is failing
    Critical,
    /// Action must be taken immediately
    Alert,
    /// The system is unusable
    Emergency,
}

impl Level {
    /// Every level, least severe first.
    pub const ALL: [Level; 8] = [
        Level::Debug,
        Level::Info,
        Level::Notice,
        Level::Warning,
        Level::Error,
        Level::Critical,
        Level::Alert,
        Level::Emergency,
    ];

    /// The upper-case name used when rendering entries.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Notice => "NOTICE",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
            Level::Alert => "ALERT",
            Level::Emergency => "EMERGENCY",
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [Level].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level `{0}`")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("warn") {
            return Ok(Level::Warning);
        }
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

/*
Boilerplate notes.

Copy/Clone, Eq/Ord and Hash are derived: a level is a small ordinal.
Default is Debug, the most permissive threshold.
FromStr accepts any casing so levels can come from the environment.
*/
