//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# tracer

tracer is a hierarchical, leveled logging library for Rust.

# The model

Loggers live in a tree of [Context]s.  A context is a scope of configuration:

* a minimum [Level],
* an *implicit transaction* flag,
* a list of [Writer]s.

Asking a context for a logger by name gives that logger its own child context, so
every logger can be tuned separately.  The same name always yields the same
logger.

When a logger emits an entry, it collects the writers of its context and of every
ancestor (ancestors first) and hands the [Entry] to each of them, synchronously,
on the calling thread.

```rust
use tracer::{Context, InMemoryWriter, Level, args};
use std::sync::Arc;

let app = Context::detached(Level::Info, false);
let everything = Arc::new(InMemoryWriter::new());
app.register_writer(everything.clone());

let storage = app.child_context("storage");
let only_storage = Arc::new(InMemoryWriter::new());
storage.register_writer(only_storage.clone());

app.get_logger("main").info("booting", args![]);
storage.get_logger("disk").warning("{} is slow", args!["/dev/sda"]);

assert_eq!(everything.len(), 2);
assert_eq!(only_storage.drain_logs(), "WARNING {} is slow /dev/sda");
```

# Inheritance

Level and implicit-transaction flag are copied into a child when it is created.
Later changes to the parent stay local until [Context::overwrite_children] pushes
them down the entire subtree.  Writers are never copied: a writer registered on a
context is seen immediately by all of its descendants.

# Levels

Levels follow the syslog ordering, from [Level::Debug] up to [Level::Emergency].
Loggers deliver every entry regardless of the context's minimum level.  Deciding
what to drop is up to writers (see [StdErrorWriter::with_minimum_level]); callers
can ask [Logger::enabled] before building expensive arguments.

# Transactions

Entries may carry a transaction id that ties related lines together.
[Logger::trace] returns a logger bound to a fixed id.  When a context has implicit
transactions on, loggers without a fixed id use their first argument as the id,
or a fresh random one when called without arguments.

# Arguments

Log methods take a message and a `Vec<`[Arg]`>`, built with [args!].  Arguments
are opaque to the library and reach writers unchanged.

# The default context

[default_context] is a process-wide root created on first use, and
[get_logger] is a shortcut for fetching loggers from it.  Contexts built with
[Context::new] are parented to it; [Context::detached] builds fully isolated
trees.

# Multithreading

Contexts and loggers are `Send + Sync` and cheap to clone.  Each context guards
its state with its own lock, held only long enough to copy or update that state;
writers are never called under a lock.
*/

mod arg;
mod context;
mod default_context;
mod entry;
mod inmemory_writer;
mod level;
mod logger;
mod spinlock;
mod stderror_writer;
mod writer;

pub use arg::{Arg, ArgValue};
pub use context::Context;
pub use default_context::{DEFAULT_MINIMUM_LEVEL, LEVEL_ENV_VAR, default_context, get_logger};
pub use entry::Entry;
pub use inmemory_writer::InMemoryWriter;
pub use level::{Level, ParseLevelError};
pub use logger::Logger;
pub use stderror_writer::StdErrorWriter;
pub use writer::Writer;
