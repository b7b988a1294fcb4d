//! Reference-counted payload handle for text and sequence values.
//!
//! Payloads are never mutated after construction: every operator builds a
//! fresh buffer, so a single-threaded `Rc` is all the sharing needs.
//! Equality compares contents, never addresses.
//!
//! Sequences nest without bound, so dropping the last handle to one hands
//! its nested children to [`release`](super::release) instead of letting
//! `Rc` drop them recursively.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use super::{release, take_nested, Value};

/// Payload stored behind a [`Shared`] handle.
pub trait Payload {
    /// Move out any nested values that own further structure.
    fn take_nested(&mut self, _out: &mut Vec<Value>) {}
}

impl Payload for str {}

impl Payload for [Value] {
    fn take_nested(&mut self, out: &mut Vec<Value>) {
        take_nested(self, out);
    }
}

/// Text payload of a [`Value::Text`].
pub type Text = Shared<str>;

/// Element payload of a [`Value::Sequence`].
pub type Sequence = Shared<[Value]>;

/// Immutable, shared-ownership handle with structural equality.
///
/// `#[repr(transparent)]` keeps this the same size as the `Rc` it wraps.
#[repr(transparent)]
pub struct Shared<T: ?Sized + Payload>(Rc<T>);

impl<T: ?Sized + Payload> Shared<T> {
    /// Whether both handles point at the same allocation.
    ///
    /// Only meaningful for cache diagnostics; `==` never uses identity.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of live handles to this allocation.
    #[inline]
    pub fn strong_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// The payload, if this is the only handle to it.
    #[inline]
    pub(crate) fn get_mut(&mut self) -> Option<&mut T> {
        Rc::get_mut(&mut self.0)
    }
}

impl<T: ?Sized + Payload> Drop for Shared<T> {
    fn drop(&mut self) {
        let Some(payload) = Rc::get_mut(&mut self.0) else {
            return;
        };
        let mut pending = Vec::new();
        payload.take_nested(&mut pending);
        release(pending);
    }
}

impl<T: ?Sized + Payload> Clone for Shared<T> {
    #[inline]
    fn clone(&self) -> Self {
        Shared(Rc::clone(&self.0))
    }
}

impl<T: ?Sized + Payload> Deref for Shared<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + Payload + PartialEq> PartialEq for Shared<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl<T: ?Sized + Payload + Eq> Eq for Shared<T> {}

impl<T: ?Sized + Payload + fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (*self.0).fmt(f)
    }
}

impl From<&str> for Shared<str> {
    #[inline]
    fn from(s: &str) -> Self {
        Shared(Rc::from(s))
    }
}

impl From<String> for Shared<str> {
    #[inline]
    fn from(s: String) -> Self {
        Shared(Rc::from(s))
    }
}

impl From<Vec<Value>> for Shared<[Value]> {
    #[inline]
    fn from(items: Vec<Value>) -> Self {
        Shared(Rc::from(items))
    }
}

impl From<&[Value]> for Shared<[Value]> {
    #[inline]
    fn from(items: &[Value]) -> Self {
        Shared(Rc::from(items))
    }
}

impl Default for Shared<str> {
    fn default() -> Self {
        Shared::from("")
    }
}

impl Default for Shared<[Value]> {
    fn default() -> Self {
        Shared(Rc::from(Vec::new()))
    }
}

#[cfg(test)]
mod tests;
