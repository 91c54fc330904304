// Copyright 2026 the Composure Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decorator units.
//!
//! Every contributor to a composition is one of four shapes, expressed as a
//! closed tagged union rather than runtime shape probing:
//!
//! - [`Decorator::Bundle`] - a data bundle: a member surface plus optional
//!   constructor step and defaults;
//! - [`Decorator::Initializer`] - a plain initializer function;
//! - [`Decorator::Class`] - a class-like bundle that allocates its own
//!   identity (at most one per composition, and only first);
//! - [`Decorator::Factory`] - a previously composed factory, contributing
//!   its merged surface, chained initializers, and resolved defaults
//!   transitively.
//!
//! [`Decorator::from_value`] normalizes an erased unit delivered by an
//! external loader into one of these shapes, which is the entire contract
//! this engine has with whatever produced the ordered unit list.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use crate::chain::InitFn;
use crate::config::Config;
use crate::error::CompositionError;
use crate::factory::CompositeFactory;
use crate::instance::Instance;
use crate::surface::{RESERVED_MEMBERS, Surface, SurfaceBuilder};
use crate::value::Value;

/// An allocating constructor for a class-like decorator.
///
/// Unlike an [`InitFn`], this receives no accumulator: it must produce the
/// identity under construction itself.
pub type AllocFn = Rc<dyn Fn(&[Value]) -> Instance>;

/// One contributor to a composition.
#[derive(Clone)]
pub enum Decorator {
    /// A plain capability bundle.
    Bundle(Bundle),
    /// A bare initializer with no member surface.
    Initializer(InitFn),
    /// A class-like bundle that owns the allocated identity.
    Class(ClassDecorator),
    /// A previously built composite factory.
    Factory(CompositeFactory),
}

impl Decorator {
    /// Wraps a mutating initializer that never replaces the identity.
    pub fn initializer<F>(init: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) + 'static,
    {
        Self::Initializer(Rc::new(move |instance, args| {
            init(instance, args);
            None
        }))
    }

    /// Wraps an initializer that may propose an identity swap.
    pub fn initializer_replacing<F>(init: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Option<Instance> + 'static,
    {
        Self::Initializer(Rc::new(init))
    }

    /// Normalizes an erased unit into a decorator.
    ///
    /// Accepts a [`Value`] holding a `Decorator`, [`Bundle`],
    /// [`CompositeFactory`], [`ClassDecorator`], bare [`InitFn`], or plain
    /// [`Config`] (a raw data map becomes a bundle: its `constructor` and
    /// `defaults` entries route to the chain and defaults map, everything
    /// else becomes a value member). Anything else is malformed.
    ///
    /// `position` is the unit's index in the composition order, used in
    /// error reports.
    pub fn from_value(unit: &Value, position: usize) -> Result<Self, CompositionError> {
        if let Some(decorator) = unit.downcast::<Self>() {
            return Ok(decorator);
        }
        if let Some(bundle) = unit.downcast::<Bundle>() {
            return Ok(Self::Bundle(bundle));
        }
        if let Some(factory) = unit.downcast::<CompositeFactory>() {
            return Ok(Self::Factory(factory));
        }
        if let Some(class) = unit.downcast::<ClassDecorator>() {
            return Ok(Self::Class(class));
        }
        if let Some(init) = unit.downcast::<InitFn>() {
            return Ok(Self::Initializer(init));
        }
        if let Some(config) = unit.downcast::<Config>() {
            return Bundle::try_from_config(&config)
                .map(Self::Bundle)
                .map_err(|reason| CompositionError::MalformedDecorator { position, reason });
        }
        Err(CompositionError::MalformedDecorator {
            position,
            reason: "not a recognized decorator shape",
        })
    }

    /// Checks the unit against the reserved-member rule.
    pub(crate) fn validate(&self, position: usize) -> Result<(), CompositionError> {
        let surface = match self {
            Self::Bundle(bundle) => &bundle.surface,
            Self::Class(class) => &class.members,
            _ => return Ok(()),
        };
        for reserved in RESERVED_MEMBERS {
            if surface.contains(reserved) {
                return Err(CompositionError::MalformedDecorator {
                    position,
                    reason: "surface uses a reserved member name",
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Decorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundle(bundle) => f.debug_tuple("Bundle").field(bundle).finish(),
            Self::Initializer(_) => f.write_str("Initializer"),
            Self::Class(class) => f.debug_tuple("Class").field(class).finish(),
            Self::Factory(factory) => f.debug_tuple("Factory").field(factory).finish(),
        }
    }
}

impl From<Bundle> for Decorator {
    fn from(bundle: Bundle) -> Self {
        Self::Bundle(bundle)
    }
}

impl From<ClassDecorator> for Decorator {
    fn from(class: ClassDecorator) -> Self {
        Self::Class(class)
    }
}

impl From<CompositeFactory> for Decorator {
    fn from(factory: CompositeFactory) -> Self {
        Self::Factory(factory)
    }
}

/// A plain capability bundle: members, an optional constructor step, and
/// optional defaults.
///
/// # Example
///
/// ```rust
/// use composure::{BundleBuilder, Config, Value};
///
/// let bundle = BundleBuilder::new()
///     .value("genre", "reggae")
///     .constructor(|instance, _args| {
///         instance.set_field("ready", Value::new(true));
///     })
///     .defaults(Config::new().set("volume", 11_i32))
///     .build();
/// ```
#[derive(Clone)]
pub struct Bundle {
    surface: Surface,
    constructor: Option<InitFn>,
    defaults: Option<Config>,
}

impl Bundle {
    /// Returns the bundle's member surface.
    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Returns the bundle's constructor step, if declared.
    #[must_use]
    pub fn constructor(&self) -> Option<&InitFn> {
        self.constructor.as_ref()
    }

    /// Returns the bundle's contributed defaults, if declared.
    #[must_use]
    pub fn defaults(&self) -> Option<&Config> {
        self.defaults.as_ref()
    }

    /// Builds a bundle from a raw data map.
    ///
    /// A `defaults` entry must hold a [`Config`]; a `constructor` entry
    /// must hold an [`InitFn`]; every other entry becomes a value member.
    fn try_from_config(config: &Config) -> Result<Self, &'static str> {
        let mut surface = Surface::new();
        let mut constructor = None;
        let mut defaults = None;
        for name in config.names() {
            let value = config.get(name).expect("name came from this config");
            match name {
                "defaults" => match value.downcast::<Config>() {
                    Some(map) => defaults = Some(map),
                    None => return Err("`defaults` member must hold a configuration map"),
                },
                "constructor" => match value.downcast::<InitFn>() {
                    Some(init) => constructor = Some(init),
                    None => return Err("`constructor` member must hold an initializer"),
                },
                _ => surface.insert(Rc::from(name), crate::surface::Member::Value(value.clone())),
            }
        }
        Ok(Self {
            surface,
            constructor,
            defaults,
        })
    }
}

impl fmt::Debug for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bundle")
            .field("surface", &self.surface)
            .field("has_constructor", &self.constructor.is_some())
            .field("defaults", &self.defaults)
            .finish()
    }
}

/// Builder for [`Bundle`].
///
/// Member methods mirror [`SurfaceBuilder`]; `constructor` and `defaults`
/// route to the chain and the defaults map rather than the surface.
#[derive(Default)]
pub struct BundleBuilder {
    surface: SurfaceBuilder,
    constructor: Option<InitFn>,
    defaults: Option<Config>,
}

impl fmt::Debug for BundleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BundleBuilder")
            .field("surface", &self.surface)
            .field("has_constructor", &self.constructor.is_some())
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl BundleBuilder {
    /// Creates a new empty bundle builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value member.
    #[must_use]
    pub fn value<T: Clone + 'static>(mut self, name: &str, value: T) -> Self {
        self.surface = self.surface.value(name, value);
        self
    }

    /// Adds a method member.
    #[must_use]
    pub fn method<F>(mut self, name: &str, body: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Option<Value> + 'static,
    {
        self.surface = self.surface.method(name, body);
        self
    }

    /// Adds the read half of an accessor.
    #[must_use]
    pub fn getter<F>(mut self, name: &str, get: F) -> Self
    where
        F: Fn(&Instance) -> Value + 'static,
    {
        self.surface = self.surface.getter(name, get);
        self
    }

    /// Adds the write half of an accessor.
    #[must_use]
    pub fn setter<F>(mut self, name: &str, set: F) -> Self
    where
        F: Fn(&mut Instance, Option<Value>) -> Option<Value> + 'static,
    {
        self.surface = self.surface.setter(name, set);
        self
    }

    /// Sets a mutating constructor step.
    #[must_use]
    pub fn constructor<F>(mut self, init: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) + 'static,
    {
        self.constructor = Some(Rc::new(move |instance, args| {
            init(instance, args);
            None
        }));
        self
    }

    /// Sets a constructor step that may propose an identity swap.
    #[must_use]
    pub fn constructor_replacing<F>(mut self, init: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Option<Instance> + 'static,
    {
        self.constructor = Some(Rc::new(init));
        self
    }

    /// Contributes defaults, merging over any set earlier on this builder.
    #[must_use]
    pub fn defaults(mut self, defaults: Config) -> Self {
        match &mut self.defaults {
            Some(existing) => existing.merge_from(&defaults),
            None => self.defaults = Some(defaults),
        }
        self
    }

    /// Builds the bundle.
    #[must_use]
    pub fn build(self) -> Bundle {
        Bundle {
            surface: self.surface.build(),
            constructor: self.constructor,
            defaults: self.defaults,
        }
    }
}

/// A class-like decorator: owns allocation of the identity under
/// construction.
///
/// Carries its inheritance as an explicit, ordered root-to-leaf list of
/// surface layers, flattened eagerly at composition time: a class that
/// inherits contributes the union of everything it inherited, with its own
/// members taking precedence.
#[derive(Clone)]
pub struct ClassDecorator {
    ancestry: Vec<Surface>,
    members: Surface,
    construct: AllocFn,
}

impl ClassDecorator {
    /// Returns the allocating constructor.
    #[must_use]
    pub(crate) fn construct(&self) -> AllocFn {
        self.construct.clone()
    }

    /// Flattens ancestry and own members into one surface, ancestors first.
    #[must_use]
    pub fn flattened_surface(&self) -> Surface {
        let mut flattened = Surface::flatten(self.ancestry.iter());
        flattened.merge_from(&self.members);
        flattened
    }
}

impl fmt::Debug for ClassDecorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDecorator")
            .field("ancestry_depth", &self.ancestry.len())
            .field("members", &self.members)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ClassDecorator`].
///
/// # Example
///
/// ```rust
/// use composure::{ClassDecoratorBuilder, Instance, SurfaceBuilder, Value};
///
/// let class = ClassDecoratorBuilder::new(|_args| {
///     let mut instance = Instance::new();
///     instance.set_field("test", Value::new(true));
///     instance
/// })
/// .members(SurfaceBuilder::new().value("hours", 24_i32).build())
/// .build();
/// ```
pub struct ClassDecoratorBuilder {
    class: ClassDecorator,
}

impl ClassDecoratorBuilder {
    /// Creates a builder around the class's allocating constructor.
    #[must_use]
    pub fn new<F>(construct: F) -> Self
    where
        F: Fn(&[Value]) -> Instance + 'static,
    {
        Self {
            class: ClassDecorator {
                ancestry: Vec::new(),
                members: Surface::new(),
                construct: Rc::new(construct),
            },
        }
    }

    /// Appends an inherited surface layer.
    ///
    /// Call in root-to-leaf order; later layers shadow earlier ones and the
    /// class's own members shadow them all.
    #[must_use]
    pub fn inherit(mut self, layer: Surface) -> Self {
        self.class.ancestry.push(layer);
        self
    }

    /// Sets the class's own member surface.
    #[must_use]
    pub fn members(mut self, members: Surface) -> Self {
        self.class.members = members;
        self
    }

    /// Builds the class decorator.
    #[must_use]
    pub fn build(self) -> ClassDecorator {
        self.class
    }
}

impl fmt::Debug for ClassDecoratorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDecoratorBuilder")
            .field("class", &self.class)
            .finish()
    }
}
