//SPDX-License-Identifier: MIT OR Apache-2.0
use crate::entry::Entry;
use std::fmt::Debug;

/**
A sink for log entries.

Writers are registered on a [Context](crate::Context) and receive every entry
emitted by loggers at or below that context in the tree.
*/
pub trait Writer: Debug + Send + Sync {
    /**
    Delivers one entry.

    Called synchronously on the logging thread, once per entry, in the order
    the writers are resolved.  The entry is delivered regardless of the
    context's minimum level; a writer that wants a threshold applies its own.

    A panic here is not caught and reaches the caller of the log method.
    */
    fn write(&self, entry: &Entry);
}

/*
Boilerplate notes.

# Writer

Clone on Writer doesn't make sense; writers are shared with Arc instead.
PartialEq/Eq: data equality or identity?  Avoid.  Arc::ptr_eq covers the identity case.
Default is not sensible since who knows how the writer is constructed (a file path, a socket...).
Send/Sync are required: one writer may be reached from loggers on many threads.
*/
