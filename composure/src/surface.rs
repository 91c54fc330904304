// Copyright 2026 the Composure Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behavior surfaces and surface merging.
//!
//! A [`Surface`] is the merged method/accessor/value table a composite
//! factory stamps onto the instances it builds, the prototype-equivalent of
//! the engine. Surfaces merge member-by-member with last-write-wins
//! precedence, and an ordered list of ancestry layers can be flattened into
//! one surface eagerly, so no chain walking happens after composition.
//!
//! # Members
//!
//! A member is one of:
//!
//! - a **value**: shared data, readable through [`Instance::get`] unless
//!   shadowed by an own field;
//! - a **method**: a callable invoked with the instance as receiver;
//! - an **accessor pair**: a getter and/or setter, moved between surfaces as
//!   one unit so a pair is never torn apart by a merge.
//!
//! The reserved names `constructor` and `defaults` never appear in a
//! surface; they are routed to the constructor chain and the defaults map
//! when a decorator is normalized.
//!
//! [`Instance::get`]: crate::Instance::get

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use crate::instance::Instance;
use crate::value::Value;

/// Member names owned by other components and never merged into a surface.
pub(crate) const RESERVED_MEMBERS: &[&str] = &["constructor", "defaults"];

/// A method body, called with the instance as receiver.
pub type Method = Rc<dyn Fn(&mut Instance, &[Value]) -> Option<Value>>;

/// An accessor getter.
pub type Getter = Rc<dyn Fn(&Instance) -> Value>;

/// An accessor setter.
///
/// Receives the incoming value (`None` clears) and returns the freshly
/// effective value.
pub type Setter = Rc<dyn Fn(&mut Instance, Option<Value>) -> Option<Value>>;

/// One named entry on a behavior surface.
#[derive(Clone)]
pub enum Member {
    /// Shared data readable by every instance carrying the surface.
    Value(Value),
    /// A callable member.
    Method(Method),
    /// A getter/setter pair; either half may be absent.
    Accessor {
        /// The read half.
        get: Option<Getter>,
        /// The write half.
        set: Option<Setter>,
    },
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Method(_) => f.write_str("Method"),
            Self::Accessor { get, set } => f
                .debug_struct("Accessor")
                .field("has_get", &get.is_some())
                .field("has_set", &set.is_some())
                .finish(),
        }
    }
}

/// A merged behavior surface: the member table stamped onto instances.
///
/// Internally a vector sorted by member name, searched with binary search.
/// Member payloads are reference counted, so cloning a surface (which
/// happens once per constructed instance) copies the table but shares the
/// callables.
///
/// # Example
///
/// ```rust
/// use composure::SurfaceBuilder;
///
/// let first = SurfaceBuilder::new().value("genre", "reggae").build();
/// let second = SurfaceBuilder::new().value("genre", "soul").build();
///
/// let mut merged = first.clone();
/// merged.merge_from(&second);
///
/// // Later decorator wins.
/// assert!(merged.contains("genre"));
/// assert_eq!(merged.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Surface {
    /// Sorted by name for binary search lookup.
    entries: Vec<(Rc<str>, Member)>,
}

impl Surface {
    /// Creates a new empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the surface has no members.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of members.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn find(&self, name: &str) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|(entry, _)| entry.as_ref().cmp(name))
    }

    /// Gets the member stored under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Member> {
        self.find(name).ok().map(|idx| &self.entries[idx].1)
    }

    /// Returns `true` if a member is stored under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_ok()
    }

    /// Inserts a member, replacing any member already stored under `name`.
    pub fn insert(&mut self, name: Rc<str>, member: Member) {
        match self.find(&name) {
            Ok(idx) => self.entries[idx].1 = member,
            Err(idx) => self.entries.insert(idx, (name, member)),
        }
    }

    /// Merges every member of `other` into this surface, in order.
    ///
    /// Same-named members are replaced whole: a later accessor pair
    /// replaces an earlier value and vice versa. Members only present in
    /// `other` are added; members only present here remain visible.
    pub fn merge_from(&mut self, other: &Self) {
        for (name, member) in &other.entries {
            self.insert(name.clone(), member.clone());
        }
    }

    /// Flattens an ordered list of layers into one surface.
    ///
    /// Layers are folded left to right, so the list is ordered root to
    /// leaf: later layers shadow earlier ones. This is the eager
    /// ancestry-flattening step: a decorator that inherits contributes the
    /// union of everything it inherited, with its own members on top.
    #[must_use]
    pub fn flatten<'a>(layers: impl IntoIterator<Item = &'a Self>) -> Self {
        let mut flattened = Self::new();
        for layer in layers {
            flattened.merge_from(layer);
        }
        flattened
    }

    /// Returns an iterator over the member names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_ref())
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("count", &self.entries.len())
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`Surface`] instances.
///
/// # Example
///
/// ```rust
/// use composure::SurfaceBuilder;
///
/// let surface = SurfaceBuilder::new()
///     .value("genre", "reggae")
///     .method("describe", |instance, _args| {
///         instance.get("genre")
///     })
///     .build();
///
/// assert_eq!(surface.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SurfaceBuilder {
    surface: Surface,
}

impl SurfaceBuilder {
    /// Creates a new empty surface builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value member.
    #[must_use]
    pub fn value<T: Clone + 'static>(mut self, name: &str, value: T) -> Self {
        self.surface.insert(Rc::from(name), Member::Value(Value::new(value)));
        self
    }

    /// Adds a method member.
    #[must_use]
    pub fn method<F>(mut self, name: &str, body: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Option<Value> + 'static,
    {
        self.surface.insert(Rc::from(name), Member::Method(Rc::new(body)));
        self
    }

    /// Adds the read half of an accessor.
    ///
    /// If the name already holds an accessor, the existing write half is
    /// kept; any other member kind is replaced.
    #[must_use]
    pub fn getter<F>(mut self, name: &str, get: F) -> Self
    where
        F: Fn(&Instance) -> Value + 'static,
    {
        let set = match self.surface.get(name) {
            Some(Member::Accessor { set, .. }) => set.clone(),
            _ => None,
        };
        self.surface.insert(
            Rc::from(name),
            Member::Accessor {
                get: Some(Rc::new(get)),
                set,
            },
        );
        self
    }

    /// Adds the write half of an accessor.
    ///
    /// If the name already holds an accessor, the existing read half is
    /// kept; any other member kind is replaced.
    #[must_use]
    pub fn setter<F>(mut self, name: &str, set: F) -> Self
    where
        F: Fn(&mut Instance, Option<Value>) -> Option<Value> + 'static,
    {
        let get = match self.surface.get(name) {
            Some(Member::Accessor { get, .. }) => get.clone(),
            _ => None,
        };
        self.surface.insert(
            Rc::from(name),
            Member::Accessor {
                get,
                set: Some(Rc::new(set)),
            },
        );
        self
    }

    /// Adds a complete accessor pair.
    #[must_use]
    pub fn accessor<G, S>(mut self, name: &str, get: G, set: S) -> Self
    where
        G: Fn(&Instance) -> Value + 'static,
        S: Fn(&mut Instance, Option<Value>) -> Option<Value> + 'static,
    {
        self.surface.insert(
            Rc::from(name),
            Member::Accessor {
                get: Some(Rc::new(get)),
                set: Some(Rc::new(set)),
            },
        );
        self
    }

    /// Builds the surface.
    #[must_use]
    pub fn build(self) -> Surface {
        self.surface
    }
}
