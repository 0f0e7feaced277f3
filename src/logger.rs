//SPDX-License-Identifier: MIT OR Apache-2.0
use crate::Level;
use crate::arg::Arg;
use crate::context::Context;
use crate::entry::Entry;
use crate::writer::Writer;
use std::fmt::Debug;
use std::sync::Arc;
use uuid::Uuid;

struct Shared {
    owner: String,
    context: Context,
}

/**
A named logger bound to one context.

Loggers are obtained from [Context::get_logger] or the crate-level
[get_logger](crate::get_logger) and are cheap to clone.  Every log method builds
an [Entry] and hands it to all writers visible from the logger's context, on the
calling thread, before returning.

# Transactions

An entry's transaction id is resolved per call:

1. A logger made with [Logger::trace] always uses its fixed id.
2. Otherwise, if the context has implicit trace on, the first argument's
   rendering is the id: its `Display`, or its `Debug` for values wrapped with
   [Arg::debug].  With no arguments a fresh random id is generated.
3. Otherwise the entry has no transaction id.

```rust
use tracer::{Context, InMemoryWriter, Level, args};
use std::sync::Arc;

let root = Context::detached(Level::Debug, false);
let writer = Arc::new(InMemoryWriter::new());
root.register_writer(writer.clone());

let logger = root.get_logger("payments");
logger.info("no transaction", args!["abc"]);
logger.trace("tx-1").info("fixed transaction", args!["abc"]);
logger.context().set_implicit_trace(true);
logger.info("implicit transaction", args!["abc"]);

let ids: Vec<_> = writer
    .drain_entries()
    .iter()
    .map(|e| e.transaction_id().map(str::to_string))
    .collect();
assert_eq!(ids, [None, Some("tx-1".to_string()), Some("abc".to_string())]);
```
*/
#[derive(Clone)]
pub struct Logger {
    shared: Arc<Shared>,
    transaction_id: Option<String>,
}

macro_rules! level_methods {
    ($($name:ident => $level:ident),* $(,)?) => {
        $(
            #[doc = concat!("Emits an entry at [`Level::", stringify!($level), "`].")]
            #[inline]
            pub fn $name(&self, message: &str, args: Vec<Arg>) {
                self.log(Level::$level, message, args)
            }
        )*
    };
}

impl Logger {
    pub(crate) fn new(owner: String, context: Context) -> Logger {
        Logger {
            shared: Arc::new(Shared { owner, context }),
            transaction_id: None,
        }
    }

    /// The name this logger was registered under.
    pub fn owner(&self) -> &str {
        &self.shared.owner
    }

    /// The private context this logger reads its configuration and writers from.
    pub fn context(&self) -> &Context {
        &self.shared.context
    }

    /// The fixed transaction id, if this logger was made with [Logger::trace].
    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    /// Returns a logger that tags every entry with `transaction_id`.
    ///
    /// The new logger shares owner and context with `self`; `self` is unchanged.
    pub fn trace(&self, transaction_id: impl Into<String>) -> Logger {
        Logger {
            shared: self.shared.clone(),
            transaction_id: Some(transaction_id.into()),
        }
    }

    /// The writers this logger currently delivers to.
    pub fn writers(&self) -> Vec<Arc<dyn Writer>> {
        self.shared.context.writers()
    }

    /// Whether entries without a fixed id get one synthesized.
    pub fn creates_implicit_transactions(&self) -> bool {
        self.shared.context.implicit_trace()
    }

    pub fn minimum_level(&self) -> Level {
        self.shared.context.minimum_level()
    }

    /// Whether `level` reaches the context's minimum level.
    ///
    /// Log methods deliver entries either way.  This lets callers skip building
    /// expensive arguments for entries their writers would ignore.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.minimum_level()
    }

    fn resolve_transaction_id(&self, args: &[Arg]) -> Option<String> {
        if let Some(id) = &self.transaction_id {
            return Some(id.clone());
        }
        if !self.shared.context.implicit_trace() {
            return None;
        }
        Some(match args.first() {
            Some(first) => first.to_string(),
            None => Uuid::new_v4().to_string(),
        })
    }

    /// Emits one entry at `level` to every writer.
    ///
    /// A panicking writer is not caught: the panic reaches the caller and the
    /// writers after it do not receive the entry.
    pub fn log(&self, level: Level, message: &str, args: Vec<Arg>) {
        let writers = self.shared.context.writers();
        let transaction_id = self.resolve_transaction_id(&args);
        let entry = Entry::new(level, message, transaction_id, args);
        for writer in &writers {
            writer.write(&entry);
        }
    }

    level_methods! {
        debug => Debug,
        info => Info,
        notice => Notice,
        warning => Warning,
        error => Error,
        critical => Critical,
        alert => Alert,
        emergency => Emergency,
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared) && self.transaction_id == other.transaction_id
    }
}

impl Eq for Logger {}

impl Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("owner", &self.shared.owner)
            .field("transaction_id", &self.transaction_id)
            .finish_non_exhaustive()
    }
}

/*
Boilerplate notes.

# Logger

Clone is cheap: the owner and context are shared, only the transaction id is per-value.
PartialEq/Eq are provenance-based.  Two loggers are equal when they came from the same
get_logger registration and carry the same transaction id.
Hash would follow the same rule but nothing needs it yet.
Default makes no sense, a logger needs a context.
Send/Sync: yes, loggers are meant to be shared across threads.
*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryWriter;
    use crate::args;

    fn fixture(implicit_trace: bool) -> (Context, Logger, Arc<InMemoryWriter>, Arc<InMemoryWriter>) {
        let root = Context::detached(Level::Debug, implicit_trace);
        let w1 = Arc::new(InMemoryWriter::new());
        let w2 = Arc::new(InMemoryWriter::new());
        root.register_writer(w1.clone());
        root.register_writer(w2.clone());
        let logger = root.get_logger("subject");
        (root, logger, w1, w2)
    }

    #[test]
    fn alert_with_implicit_transactions() {
        let (_root, logger, w1, w2) = fixture(true);
        assert!(logger.creates_implicit_transactions());
        logger.alert("this is a test", args!["some-id"]);

        let expected = Entry::new(
            Level::Alert,
            "this is a test",
            Some("some-id".to_string()),
            args!["some-id"],
        );
        assert_eq!(w1.drain_entries(), vec![expected.clone()]);
        assert_eq!(w2.drain_entries(), vec![expected]);
    }

    #[test]
    fn alert_without_implicit_transactions() {
        let (_root, logger, w1, w2) = fixture(false);
        logger.alert("this is a test", args!["some-field"]);

        let expected = Entry::new(Level::Alert, "this is a test", None, args!["some-field"]);
        assert_eq!(w1.drain_entries(), vec![expected.clone()]);
        assert_eq!(w2.drain_entries(), vec![expected]);
    }

    #[test]
    fn alert_on_trace_mode() {
        let (_root, logger, w1, w2) = fixture(false);
        logger.trace("some-id").alert("this is a test", args!["some-field"]);

        let expected = Entry::new(
            Level::Alert,
            "this is a test",
            Some("some-id".to_string()),
            args!["some-field"],
        );
        assert_eq!(w1.drain_entries(), vec![expected.clone()]);
        assert_eq!(w2.drain_entries(), vec![expected]);
    }

    #[test]
    fn fixed_transaction_wins_over_implicit() {
        let (_root, logger, w1, _w2) = fixture(true);
        logger.trace("fixed").debug("m", args!["first-arg"]);
        assert_eq!(w1.drain_entries()[0].transaction_id(), Some("fixed"));
    }

    #[test]
    fn implicit_transaction_without_args_is_fresh() {
        let (_root, logger, w1, _w2) = fixture(true);
        logger.info("one", args![]);
        logger.info("two", args![]);
        let entries = w1.drain_entries();
        let first = entries[0].transaction_id().expect("implicit id");
        let second = entries[1].transaction_id().expect("implicit id");
        assert!(Uuid::parse_str(first).is_ok());
        assert_ne!(first, second);
    }

    #[test]
    fn implicit_transaction_renders_non_string_arg() {
        let (_root, logger, w1, _w2) = fixture(true);
        logger.notice("order", args![4711, "x"]);
        assert_eq!(w1.drain_entries()[0].transaction_id(), Some("4711"));
    }

    #[test]
    fn implicit_transaction_renders_debug_only_arg() {
        let (_root, logger, w1, _w2) = fixture(true);
        logger.notice("batch", vec![Arg::debug(vec![3, 4])]);
        assert_eq!(w1.drain_entries()[0].transaction_id(), Some("[3, 4]"));
    }

    #[test]
    fn trace_does_not_mutate() {
        let (root, logger, _w1, _w2) = fixture(false);
        let traced = logger.trace("some-id");
        assert_eq!(logger.transaction_id(), None);
        assert_eq!(traced.transaction_id(), Some("some-id"));
        assert_ne!(logger, traced);
        assert_eq!(traced.owner(), logger.owner());
        assert_eq!(traced.context(), logger.context());
        // the memoized logger stays untraced
        assert_eq!(root.get_logger("subject").transaction_id(), None);
    }

    #[test]
    fn sub_threshold_entries_are_delivered() {
        let (root, logger, w1, _w2) = fixture(false);
        root.set_minimum_level(Level::Error);
        root.overwrite_children();
        assert!(!logger.enabled(Level::Debug));
        assert!(logger.enabled(Level::Critical));
        logger.debug("still delivered", args![]);
        assert_eq!(w1.len(), 1);
    }

    #[test]
    fn every_level_method() {
        let (_root, logger, w1, _w2) = fixture(false);
        logger.debug("m", args![]);
        logger.info("m", args![]);
        logger.notice("m", args![]);
        logger.warning("m", args![]);
        logger.error("m", args![]);
        logger.critical("m", args![]);
        logger.alert("m", args![]);
        logger.emergency("m", args![]);
        let levels: Vec<Level> = w1.drain_entries().iter().map(Entry::level).collect();
        assert_eq!(levels, Level::ALL);
    }

    #[test]
    fn writers_are_live() {
        let (root, logger, _w1, _w2) = fixture(false);
        assert_eq!(logger.writers().len(), 2);
        root.register_writer(Arc::new(InMemoryWriter::new()));
        assert_eq!(logger.writers().len(), 3);
    }
}
