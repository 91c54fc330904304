// Copyright 2026 the Composure Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-erased value storage.
//!
//! Everything dynamic in the engine travels as a [`Value`]: instance
//! fields, defaults, constructor arguments, hidden state, and value
//! members are all clonable boxes around arbitrary `'static` payloads.
//! The engine moves them around without inspecting them; decorators and
//! initializers downcast them back at the edges.

use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

/// A type-erased, clonable value.
///
/// Wraps any `Clone + 'static` payload. The wrapped type's name is kept
/// for diagnostics, so a `Debug` dump of an instance shows what kind of
/// data each member carries.
///
/// # Example
///
/// ```rust
/// use composure::Value;
///
/// let value = Value::new("reggae");
/// assert!(value.is::<&str>());
/// assert_eq!(value.downcast::<&str>(), Some("reggae"));
/// assert_eq!(value.downcast_ref::<i32>(), None);
/// ```
pub struct Value {
    inner: Box<dyn ErasedValue>,
    type_name: &'static str,
}

impl Value {
    /// Wraps a concrete value.
    #[must_use]
    pub fn new<T: Clone + 'static>(value: T) -> Self {
        Self {
            inner: Box::new(value),
            type_name: core::any::type_name::<T>(),
        }
    }

    /// Returns the name of the wrapped type, for diagnostics only.
    #[must_use]
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if the wrapped value is a `T`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.inner.as_any().is::<T>()
    }

    /// Borrows the wrapped value as a `T`, if it is one.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref()
    }

    /// Clones the wrapped value out as a `T`, if it is one.
    ///
    /// Configuration resolution and loader normalization use this to
    /// recover owned payloads without consuming the argument list.
    #[must_use]
    pub fn downcast<T: Clone + 'static>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_boxed(),
            type_name: self.type_name,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Value").field(&self.type_name).finish()
    }
}

/// The clone-through-erasure seam: `dyn Any` alone cannot clone.
trait ErasedValue: Any {
    fn as_any(&self) -> &dyn Any;
    fn clone_boxed(&self) -> Box<dyn ErasedValue>;
}

impl<T: Clone + 'static> ErasedValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn ErasedValue> {
        Box::new(self.clone())
    }
}
