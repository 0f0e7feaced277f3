// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide default context.
//!
//! Most programs need one tree of loggers.  The default context is its root: it
//! is created on first use, lives until the process exits, and is the parent of
//! every context built with [`Context::new`].  The crate-level [`get_logger`]
//! fetches loggers from it, so no setup is needed to start logging:
//!
//! ```
//! use tracer::{StdErrorWriter, default_context, get_logger, args};
//! use std::sync::Arc;
//!
//! default_context().register_writer(Arc::new(StdErrorWriter::new()));
//!
//! let logger = get_logger("startup");
//! logger.info("ready", args![]);
//! assert_eq!(logger, get_logger("startup"));
//! ```
//!
//! # Configuration
//!
//! The default context starts at [`DEFAULT_MINIMUM_LEVEL`] with implicit
//! transactions off.  If the `TRACER_LEVEL` environment variable holds a level
//! name (`debug`, `warning`, `alert`, ...) when the context is first used, that
//! level is the baseline instead.  An unrecognized value is reported on stderr
//! and ignored.
//!
//! After initialization, configure it like any other context:
//!
//! ```
//! use tracer::{Level, default_context};
//!
//! default_context().set_minimum_level(Level::Notice);
//! default_context().overwrite_children();
//! ```
//!
//! # Isolation
//!
//! Code that must not observe writers registered on the default context (tests,
//! mostly) builds its own tree with [`Context::detached`].

use crate::context::Context;
use crate::entry::Entry;
use crate::level::Level;
use crate::logger::Logger;
use crate::stderror_writer::StdErrorWriter;
use crate::writer::Writer;
use std::sync::OnceLock;

/// Baseline minimum level of the default context.
pub const DEFAULT_MINIMUM_LEVEL: Level = Level::Debug;

/// Environment variable read once to configure the default context's level.
pub const LEVEL_ENV_VAR: &str = "TRACER_LEVEL";

static DEFAULT_CONTEXT: OnceLock<Context> = OnceLock::new();

/// Returns the process-wide default context, creating it on first use.
pub fn default_context() -> &'static Context {
    DEFAULT_CONTEXT.get_or_init(|| {
        let level = baseline_level(std::env::var(LEVEL_ENV_VAR).ok().as_deref());
        Context::detached(level, false)
    })
}

/// Returns the logger registered under `owner` on the default context.
///
/// Repeated calls with the same name return the same logger.
pub fn get_logger(owner: &str) -> Logger {
    default_context().get_logger(owner)
}

fn baseline_level(configured: Option<&str>) -> Level {
    let Some(value) = configured else {
        return DEFAULT_MINIMUM_LEVEL;
    };
    match value.parse() {
        Ok(level) => level,
        Err(err) => {
            StdErrorWriter::new().write(&Entry::new(
                Level::Warning,
                format!("ignoring {LEVEL_ENV_VAR}: {err}"),
                None,
                Vec::new(),
            ));
            DEFAULT_MINIMUM_LEVEL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_from_environment() {
        assert_eq!(baseline_level(None), DEFAULT_MINIMUM_LEVEL);
        assert_eq!(baseline_level(Some("alert")), Level::Alert);
        assert_eq!(baseline_level(Some("Warn")), Level::Warning);
        assert_eq!(baseline_level(Some("loud")), DEFAULT_MINIMUM_LEVEL);
    }

    #[test]
    fn default_context_is_a_root() {
        assert!(default_context().parent().is_none());
        assert_eq!(default_context().nesting_level(), 0);
        assert!(!default_context().implicit_trace());
        assert_eq!(default_context(), default_context());
    }

    #[test]
    fn get_logger_is_memoized() {
        let a = get_logger("A");
        let b = get_logger("B");
        let b2 = get_logger("B");
        assert_ne!(a, b, "it should return two different loggers");
        assert_eq!(b, b2, "it should return the same logger");
        assert_eq!(default_context().child("B").as_ref(), Some(b.context()));
    }

    #[test]
    fn new_contexts_hang_off_the_default() {
        let ctx = Context::new(Level::Error, true);
        assert_eq!(ctx.parent().as_ref(), Some(default_context()));
        assert_eq!(ctx.nesting_level(), 1);
        assert_eq!(ctx.minimum_level(), Level::Error);
        assert!(ctx.implicit_trace());
    }
}
