// Copyright 2026 the Composure Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constructed instances.
//!
//! An [`Instance`] is what a composite factory builds: a bag of public
//! fields, the behavior surface stamped onto it at construction (or merged
//! onto it in decorator mode), and a private hidden-state bucket backing
//! declared properties.
//!
//! Member dispatch follows the own-field-shadows-surface rule: an own field
//! always wins over a same-named surface member, surface accessors intercept
//! writes, and everything else is a raw field operation.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use hashbrown::HashMap;

use crate::hidden::HiddenState;
use crate::surface::{Member, Surface};
use crate::value::Value;

/// An object produced (or decorated) by a [`CompositeFactory`].
///
/// Instances are self-contained: the surface is stamped on at construction,
/// so dispatch needs no back-reference to the factory that built them.
/// The hidden bucket lives and dies with the instance.
///
/// [`CompositeFactory`]: crate::CompositeFactory
///
/// # Example
///
/// ```rust
/// use composure::{Instance, Value};
///
/// let mut instance = Instance::new();
/// instance.set_field("x", Value::new(1_i32));
///
/// assert_eq!(instance.get("x").and_then(|v| v.downcast::<i32>()), Some(1));
/// assert_eq!(instance.field_names().count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Instance {
    surface: Surface,
    fields: HashMap<String, Value>,
    hidden: HiddenState,
}

impl Instance {
    /// Creates a new empty instance with no surface and no fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the behavior surface carried by this instance.
    #[must_use]
    #[inline]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Merges a surface onto this instance, later members winning.
    pub(crate) fn merge_surface(&mut self, surface: &Surface) {
        self.surface.merge_from(surface);
    }

    pub(crate) fn hidden(&self) -> &HiddenState {
        &self.hidden
    }

    pub(crate) fn hidden_mut(&mut self) -> &mut HiddenState {
        &mut self.hidden
    }

    /// Reads a member: own field, then surface value, then accessor getter.
    ///
    /// Returns `None` for absent names, for methods (use [`Self::invoke`]),
    /// and for accessors with no read half.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(field) = self.fields.get(name) {
            return Some(field.clone());
        }
        match self.surface.get(name)? {
            Member::Value(value) => Some(value.clone()),
            Member::Accessor { get: Some(get), .. } => Some(get(self)),
            _ => None,
        }
    }

    /// Writes a member.
    ///
    /// A surface accessor with a write half intercepts the write and
    /// returns the freshly effective value; an accessor without one ignores
    /// the write. Otherwise this is a raw field write: `Some` stores the
    /// value as an own field (shadowing any surface member), `None` removes
    /// the field.
    pub fn set(&mut self, name: &str, value: Option<Value>) -> Option<Value> {
        if let Some(Member::Accessor { set, .. }) = self.surface.get(name) {
            let set = set.clone();
            return match set {
                Some(set) => set(self, value),
                None => None,
            };
        }
        match value {
            Some(value) => {
                self.fields.insert(String::from(name), value.clone());
                Some(value)
            }
            None => {
                self.fields.remove(name);
                None
            }
        }
    }

    /// Invokes a surface method with this instance as receiver.
    ///
    /// # Panics
    ///
    /// Panics if `name` does not resolve to a method member. A dispatch
    /// miss on a dynamic object is a programmer error, not a runtime
    /// condition.
    pub fn invoke(&mut self, name: &str, args: &[Value]) -> Option<Value> {
        let method = match self.surface.get(name) {
            Some(Member::Method(method)) => method.clone(),
            _ => panic!("no method {name:?} on this instance"),
        };
        method(self, args)
    }

    /// Writes an own field directly, bypassing surface accessors.
    ///
    /// This is what initializers use to populate the instance.
    pub fn set_field(&mut self, name: &str, value: Value) {
        self.fields.insert(String::from(name), value);
    }

    /// Reads an own field, ignoring the surface.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Removes an own field.
    ///
    /// Returns the removed value, if any.
    pub fn remove_field(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Returns an iterator over the names of the instance's own fields.
    ///
    /// Surface members and hidden state are not enumerated.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("surface", &self.surface)
            .field("hidden_len", &self.hidden.len())
            .finish()
    }
}
