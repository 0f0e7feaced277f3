// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core Context implementation.

use crate::Level;
use crate::logger::Logger;
use crate::spinlock::Spinlock;
use crate::writer::Writer;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Mutable state of one context, guarded by its monitor.
struct ContextState {
    writers: Vec<Arc<dyn Writer>>,
    loggers: HashMap<String, Logger>,
    children: HashMap<String, Context>,
    minimum_level: Level,
    implicit_trace: bool,
}

pub(crate) struct ContextInner {
    /// Fixed at construction.  `None` only for roots.
    ///
    /// Strong: a logger keeps its whole ancestor chain reachable.  With the
    /// parent's `children` map this forms a cycle, so a tree with children lives
    /// for the rest of the process, like the default context.
    parent: Option<Arc<ContextInner>>,
    state: Spinlock<ContextState>,
}

/// A node in the logging configuration tree.
///
/// `Context` is a handle; clones refer to the same node.  All methods take
/// `&self` and are safe to call from many threads at once.  Each context has
/// its own lock, so work on different contexts never contends.
///
/// # Examples
///
/// ```rust
/// use tracer::{Context, Level};
///
/// let root = Context::detached(Level::Warning, true);
/// let child = root.child_context("worker");
/// assert_eq!(child.minimum_level(), Level::Warning);
/// assert!(child.implicit_trace());
///
/// // the child took a copy
/// root.set_minimum_level(Level::Debug);
/// assert_eq!(child.minimum_level(), Level::Warning);
///
/// // until the root pushes its values down
/// root.overwrite_children();
/// assert_eq!(child.minimum_level(), Level::Debug);
/// ```
#[derive(Clone)]
pub struct Context {
    pub(crate) inner: Arc<ContextInner>,
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Context {}

impl Hash for Context {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).hash(state);
    }
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.inner.state.with(|state| {
            let mut children: Vec<&str> = state.children.keys().map(String::as_str).collect();
            children.sort_unstable();
            f.debug_struct("Context")
                .field("minimum_level", &state.minimum_level)
                .field("implicit_trace", &state.implicit_trace)
                .field("writers", &state.writers.len())
                .field("children", &children)
                .finish_non_exhaustive()
        })
    }
}

impl Context {
    /// Creates a context under the process-wide [default context](crate::default_context()).
    ///
    /// The new context sees the default context's writers, but is not one of its
    /// named children, so [`overwrite_children`](Context::overwrite_children) on the
    /// default context does not reach it.
    ///
    /// ```rust
    /// use tracer::{Context, Level, default_context};
    ///
    /// let ctx = Context::new(Level::Error, false);
    /// assert_eq!(ctx.parent().as_ref(), Some(default_context()));
    /// ```
    pub fn new(minimum_level: Level, implicit_trace: bool) -> Context {
        Self::with_parent(
            Some(crate::default_context()),
            minimum_level,
            implicit_trace,
        )
    }

    /// Creates a root context with no parent.
    ///
    /// Nothing registered elsewhere leaks into a detached tree, which makes it the
    /// right choice for tests and for libraries that want full isolation.
    pub fn detached(minimum_level: Level, implicit_trace: bool) -> Context {
        Self::with_parent(None, minimum_level, implicit_trace)
    }

    fn with_parent(parent: Option<&Context>, minimum_level: Level, implicit_trace: bool) -> Context {
        Context {
            inner: Arc::new(ContextInner {
                parent: parent.map(|p| p.inner.clone()),
                state: Spinlock::new(ContextState {
                    writers: Vec::new(),
                    loggers: HashMap::new(),
                    children: HashMap::new(),
                    minimum_level,
                    implicit_trace,
                }),
            }),
        }
    }

    /// Creates a child snapshotting `state`.  The caller registers it.
    fn spawn_child(&self, state: &ContextState) -> Context {
        Self::with_parent(Some(self), state.minimum_level, state.implicit_trace)
    }

    /// Returns the logger registered under `owner`, creating it on first use.
    ///
    /// The first call creates a private child context named `owner` and a logger
    /// bound to it.  Every later call with the same name returns that same logger,
    /// including calls racing on other threads.
    ///
    /// ```rust
    /// use tracer::{Context, Level};
    ///
    /// let root = Context::detached(Level::Debug, false);
    /// let a = root.get_logger("a");
    /// assert_eq!(a, root.get_logger("a"));
    /// assert_ne!(a, root.get_logger("b"));
    /// assert_eq!(root.child("a").as_ref(), Some(a.context()));
    /// ```
    pub fn get_logger(&self, owner: &str) -> Logger {
        if let Some(logger) = self.inner.state.with(|state| state.loggers.get(owner).cloned()) {
            return logger;
        }
        self.inner.state.with_mut(|state| {
            //someone may have created it between our two critical sections
            if let Some(logger) = state.loggers.get(owner) {
                return logger.clone();
            }
            let child = self.spawn_child(state);
            state.children.insert(owner.to_string(), child.clone());
            let logger = Logger::new(owner.to_string(), child);
            state.loggers.insert(owner.to_string(), logger.clone());
            logger
        })
    }

    /// Creates a child context named `owner`.
    ///
    /// The child starts with this context's current minimum level and
    /// implicit-trace flag.  It replaces any child previously registered under
    /// the same name; loggers already handed out keep their own contexts.
    pub fn child_context(&self, owner: &str) -> Context {
        self.inner.state.with_mut(|state| {
            let child = self.spawn_child(state);
            state.children.insert(owner.to_string(), child.clone());
            child
        })
    }

    /// The child currently registered under `owner`, if any.
    pub fn child(&self, owner: &str) -> Option<Context> {
        self.inner.state.with(|state| state.children.get(owner).cloned())
    }

    /// The parent of this context.  `None` only for roots.
    pub fn parent(&self) -> Option<Context> {
        self.inner.parent.clone().map(|inner| Context { inner })
    }

    /// Number of ancestors.  A root has nesting level 0.
    pub fn nesting_level(&self) -> usize {
        let mut level = 0;
        let mut current = self.parent();
        while let Some(context) = current {
            level += 1;
            current = context.parent();
        }
        level
    }

    /// Adds a writer to this context.
    ///
    /// Descendants see it immediately, since they resolve writers on each call.
    pub fn register_writer(&self, writer: Arc<dyn Writer>) {
        self.inner.state.with_mut(|state| state.writers.push(writer));
    }

    /// Every writer visible from this context.
    ///
    /// Ancestors' writers come first, the root's before its children's, then the
    /// writers registered on this context, each group in registration order.
    ///
    /// Each context is locked only while its own writers are copied.  Nothing
    /// makes the combined list atomic across contexts.
    pub fn writers(&self) -> Vec<Arc<dyn Writer>> {
        let mut chain = vec![self.clone()];
        let mut current = self.parent();
        while let Some(context) = current {
            current = context.parent();
            chain.push(context);
        }
        let mut writers = Vec::new();
        for context in chain.iter().rev() {
            context
                .inner
                .state
                .with(|state| writers.extend(state.writers.iter().cloned()));
        }
        writers
    }

    pub fn set_minimum_level(&self, level: Level) {
        self.inner.state.with_mut(|state| state.minimum_level = level);
    }

    pub fn minimum_level(&self) -> Level {
        self.inner.state.with(|state| state.minimum_level)
    }

    pub fn set_implicit_trace(&self, on: bool) {
        self.inner.state.with_mut(|state| state.implicit_trace = on);
    }

    pub fn implicit_trace(&self) -> bool {
        self.inner.state.with(|state| state.implicit_trace)
    }

    /// Forces every descendant to this context's current minimum level and
    /// implicit-trace flag.
    ///
    /// Reaches children, grandchildren and so on, including the private
    /// contexts of loggers.  Values the descendants set on their own are lost.
    pub fn overwrite_children(&self) {
        let (minimum_level, implicit_trace, mut pending) = self.inner.state.with(|state| {
            (
                state.minimum_level,
                state.implicit_trace,
                state.children.values().cloned().collect::<Vec<_>>(),
            )
        });
        while let Some(context) = pending.pop() {
            context.inner.state.with_mut(|state| {
                state.minimum_level = minimum_level;
                state.implicit_trace = implicit_trace;
                pending.extend(state.children.values().cloned());
            });
        }
    }
}
