// SPDX-License-Identifier: MIT OR Apache-2.0

//! Type-erased call arguments.
//!
//! Loggers never format or inspect their arguments, with one exception: when
//! implicit transactions are on, the rendering of the first argument becomes the
//! transaction id.  Everything else is handed to writers verbatim, in order.
//!
//! An argument renders through `Display` when it was built with [`Arg::new`]
//! (or [`args!`](crate::args)), and through `Debug` when it was built with
//! [`Arg::debug`], which accepts values that have no `Display` at all.
//!
//! ```rust
//! use tracer::{Arg, args};
//!
//! let mut args = args!["some-id", 42, 1.5];
//! args.push(Arg::debug(vec![1, 2]));
//! assert_eq!(args.len(), 4);
//! assert_eq!(args[0].to_string(), "some-id");
//! assert_eq!(args[1].downcast_ref::<i32>(), Some(&42));
//! assert_eq!(args[2], Arg::new(1.5));
//! assert_eq!(args[3].to_string(), "[1, 2]");
//! ```

use std::any::Any;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// Anything that can travel as an argument.
///
/// Implemented for every `Debug + Send + Sync + 'static` type.
pub trait ArgValue: Debug + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Debug + Send + Sync + 'static> ArgValue for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

type Render = fn(&dyn Any, &mut Formatter<'_>) -> std::fmt::Result;

fn render_display<T: Display + 'static>(value: &dyn Any, f: &mut Formatter<'_>) -> std::fmt::Result {
    match value.downcast_ref::<T>() {
        Some(value) => Display::fmt(value, f),
        None => Ok(()),
    }
}

/// One opaque argument of a log call.
///
/// Cloning shares the underlying value.
#[derive(Clone)]
pub struct Arg {
    value: Arc<dyn ArgValue>,
    //None renders through Debug
    display: Option<Render>,
}

impl Arg {
    /// Wraps a value that renders through `Display`.
    pub fn new<T: ArgValue + Display>(value: T) -> Self {
        Arg {
            value: Arc::new(value),
            display: Some(render_display::<T> as Render),
        }
    }

    /// Wraps a value that only has `Debug`; it renders through `Debug`.
    pub fn debug<T: ArgValue>(value: T) -> Self {
        Arg {
            value: Arc::new(value),
            display: None,
        }
    }

    /// Returns the wrapped value if it is a `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        (*self.value).as_any().downcast_ref::<T>()
    }

    /// Whether the wrapped value is a `T`.
    pub fn is<T: 'static>(&self) -> bool {
        (*self.value).as_any().is::<T>()
    }
}

impl Debug for Arg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&*self.value, f)
    }
}

impl Display for Arg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.display {
            Some(render) => render((*self.value).as_any(), f),
            None => Debug::fmt(&*self.value, f),
        }
    }
}

/// Two arguments are equal when they wrap the same type and render the same.
impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
            || ((*self.value).as_any().type_id() == (*other.value).as_any().type_id()
                && self.to_string() == other.to_string())
    }
}

impl From<&'static str> for Arg {
    fn from(value: &'static str) -> Self {
        Arg::new(value)
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::new(value)
    }
}

/*
Boilerplate notes.

Clone shares the Arc; the value itself may not be Clone.
Eq is not implemented: floats may be wrapped.
Hash, Ord, Default make no sense for an erased value.
Send/Sync follow from the ArgValue bound, so entries can cross threads.
*/

/// Builds a `Vec<Arg>` from a list of values.
///
/// ```rust
/// use tracer::args;
///
/// let empty: Vec<tracer::Arg> = args![];
/// assert!(empty.is_empty());
/// let two = args!["a", String::from("b")];
/// assert_eq!(two[1].to_string(), "b");
/// ```
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {
        ::std::vec![$($crate::Arg::new($value)),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwards_display_and_debug() {
        let arg = Arg::new("hello");
        assert_eq!(arg.to_string(), "hello");
        assert_eq!(format!("{:?}", arg), "\"hello\"");
    }

    #[test]
    fn equality_needs_same_type() {
        assert_eq!(Arg::new("x"), Arg::from("x"));
        assert_ne!(Arg::new("x"), Arg::new(String::from("x")));
        assert_ne!(Arg::new(1u8), Arg::new(1u16));
        assert_ne!(Arg::new("x"), Arg::new("y"));
    }

    #[test]
    fn debug_only_values() {
        #[derive(Debug)]
        struct Order {
            id: u32,
        }

        let arg = Arg::debug(Order { id: 9 });
        assert_eq!(arg.to_string(), "Order { id: 9 }");
        assert_eq!(arg.downcast_ref::<Order>().map(|o| o.id), Some(9));
        assert_eq!(Arg::debug("x").to_string(), "\"x\"");
    }

    #[test]
    fn downcast() {
        let arg = Arg::new(7u64);
        assert!(arg.is::<u64>());
        assert_eq!(arg.downcast_ref::<u64>(), Some(&7));
        assert_eq!(arg.downcast_ref::<i64>(), None);
    }
}
