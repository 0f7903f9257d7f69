//! Shared heap storage for `Value`.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Reference-counted heap slot.
///
/// Only the value module can construct one, so every heap value goes through
/// a `Value::` factory method.
pub struct Heap<T: ?Sized>(pub(super) Arc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }
}

impl Heap<str> {
    #[inline]
    pub(super) fn from_str(s: &str) -> Self {
        Heap(Arc::from(s))
    }
}

impl<T: ?Sized> Heap<T> {
    /// Whether two heap slots share one allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
