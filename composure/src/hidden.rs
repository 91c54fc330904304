// Copyright 2026 the Composure Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance hidden state.
//!
//! Declared properties ([`CompositeFactory::property`]) read and write a
//! private bucket owned by each instance rather than the public field table,
//! so backing state never shows up when the instance's own fields are
//! enumerated. The bucket is allocated with the instance and released with
//! it; nothing outside the declared accessor pair can reach it.
//!
//! Entries are keyed by property name, so when surfaces from two factories
//! are merged onto one instance, same-named declarations share one backing
//! slot.
//!
//! [`CompositeFactory::property`]: crate::CompositeFactory::property

use alloc::rc::Rc;
use smallvec::SmallVec;

use crate::surface::Member;
use crate::value::Value;

/// Most instances back only a handful of declared properties; keep the
/// first few entries inline.
const INLINE_CAPACITY: usize = 4;

/// The private per-instance store backing declared properties.
///
/// A sorted vector with binary search, like the public field storage of the
/// surface, but reachable only from accessor pairs built by
/// [`declared_accessor`].
#[derive(Clone, Debug, Default)]
pub(crate) struct HiddenState {
    /// Sorted by name for binary search lookup.
    entries: SmallVec<[(Rc<str>, Value); INLINE_CAPACITY]>,
}

impl HiddenState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn find(&self, name: &str) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|(entry, _)| entry.as_ref().cmp(name))
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Value> {
        self.find(name).ok().map(|idx| &self.entries[idx].1)
    }

    pub(crate) fn set(&mut self, name: Rc<str>, value: Value) {
        match self.find(&name) {
            Ok(idx) => self.entries[idx].1 = value,
            Err(idx) => self.entries.insert(idx, (name, value)),
        }
    }

    /// Removes the entry for `name`, restoring the declared initial value.
    ///
    /// Returns `true` if an entry was removed.
    pub(crate) fn clear(&mut self, name: &str) -> bool {
        if let Ok(idx) = self.find(name) {
            self.entries.remove(idx);
            true
        } else {
            false
        }
    }
}

/// A derived-value transform for a declared property.
///
/// Invoked on every write as `transform(new, previous)`; the result is
/// stored. Returning `None` clears the slot so reads fall back to the
/// declared initial value.
pub(crate) type Transform = Rc<dyn Fn(Option<&Value>, Option<&Value>) -> Option<Value>>;

/// Builds the accessor pair for a declared property.
///
/// Reading returns the stored hidden value, falling back to `initial` when
/// the slot is unset. Writing stores the raw value, or the transform's
/// result when one is supplied, then reports the freshly effective value.
pub(crate) fn declared_accessor(
    name: Rc<str>,
    initial: Value,
    transform: Option<Transform>,
) -> Member {
    let get = {
        let name = name.clone();
        let initial = initial.clone();
        move |instance: &crate::Instance| {
            instance
                .hidden()
                .get(&name)
                .cloned()
                .unwrap_or_else(|| initial.clone())
        }
    };

    let set = move |instance: &mut crate::Instance, incoming: Option<Value>| {
        let stored = match &transform {
            Some(transform) => {
                let previous = instance.hidden().get(&name).cloned();
                transform(incoming.as_ref(), previous.as_ref())
            }
            None => incoming,
        };
        match stored {
            Some(value) => instance.hidden_mut().set(name.clone(), value),
            None => {
                instance.hidden_mut().clear(&name);
            }
        }
        Some(
            instance
                .hidden()
                .get(&name)
                .cloned()
                .unwrap_or_else(|| initial.clone()),
        )
    };

    Member::Accessor {
        get: Some(Rc::new(get)),
        set: Some(Rc::new(set)),
    }
}
