// SPDX-License-Identifier: MIT OR Apache-2.0

//! The context tree.
//!
//! A [`Context`] is one scope of logging configuration.  Contexts form a tree:
//! every context except a root has a parent, and a parent remembers the children
//! it created by name.  Each context carries
//!
//! - a minimum level,
//! - an implicit-transaction flag,
//! - the writers registered directly on it,
//! - the loggers and child contexts it created, by owner name.
//!
//! # Inheritance
//!
//! Level and flag are copied into a child when it is created and are independent
//! afterwards.  Changing a parent later does not reach existing children until
//! [`Context::overwrite_children`] pushes the parent's values down the whole
//! subtree.
//!
//! Writers are not copied.  They are resolved on every call, so a writer
//! registered on an ancestor is seen at once by every descendant:
//!
//! ```rust
//! use tracer::{Context, InMemoryWriter, Level, args};
//! use std::sync::Arc;
//!
//! let root = Context::detached(Level::Debug, false);
//! let http = root.child_context("http");
//! let logger = http.get_logger("router");
//!
//! let all = Arc::new(InMemoryWriter::new());
//! root.register_writer(all.clone());
//!
//! logger.notice("listening", args![8080]);
//! assert_eq!(all.drain_logs(), "NOTICE listening 8080");
//! ```
//!
//! # Loggers
//!
//! [`Context::get_logger`] gives every owner name a private child context, so
//! each logger can be configured on its own:
//!
//! ```rust
//! use tracer::{Context, Level};
//!
//! let root = Context::detached(Level::Info, false);
//! let db = root.get_logger("db");
//! db.context().set_minimum_level(Level::Debug);
//!
//! assert_eq!(root.minimum_level(), Level::Info);
//! assert_eq!(root.get_logger("db").minimum_level(), Level::Debug);
//! ```
//!
//! # Ownership
//!
//! A parent holds its children and loggers, and every child holds its parent.
//! A logger therefore keeps its whole ancestor chain alive: dropping every
//! `Context` handle does not cut it off from writers registered further up.
//! Trees are meant to live as long as the process, like the
//! [default context](crate::default_context()) that [`Context::new`] hangs
//! contexts off; a tree that has children is never freed.

mod context_impl;


pub use context_impl::Context;
