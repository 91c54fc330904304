// Copyright 2026 the Composure Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composite factories.
//!
//! [`compose`] folds an ordered list of decorator units into a
//! [`CompositeFactory`]: the merged behavior surface, the constructor
//! chain, and the merged defaults. The fold honors the composition
//! invariants (at most one class-like unit, and only in first position)
//! and fails before producing anything usable when they are violated.
//!
//! A built factory has two call modes:
//!
//! - [`CompositeFactory::construct`] allocates a new identity, resolves the
//!   configuration argument, and runs the chain (the first initializer may
//!   swap the identity);
//! - [`CompositeFactory::decorate`] merges the surface onto an existing
//!   receiver and runs the chain against it in place; no identity swap is
//!   ever legal, because the caller owns the receiver.
//!
//! The factory's static API ([`defaults`](CompositeFactory::defaults),
//! [`property`](CompositeFactory::property),
//! [`concat`](CompositeFactory::concat)) is the only way to extend a
//! built factory; the surface, chain, and defaults map are otherwise
//! sealed.
//!
//! # Quick start
//!
//! ```rust
//! use composure::{compose, BundleBuilder, Config, Decorator, Value};
//!
//! let genre = BundleBuilder::new().value("genre", "reggae").build();
//! let artist = BundleBuilder::new()
//!     .constructor(|instance, _args| {
//!         instance.set_field("artist", Value::new("busy signal"));
//!     })
//!     .build();
//!
//! let factory = compose([Decorator::from(genre), Decorator::from(artist)]).unwrap();
//! let instance = factory.construct(&[]).unwrap();
//!
//! assert_eq!(
//!     instance.get("genre").and_then(|v| v.downcast::<&str>()),
//!     Some("reggae")
//! );
//! assert_eq!(
//!     instance.get("artist").and_then(|v| v.downcast::<&str>()),
//!     Some("busy signal")
//! );
//! ```

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;
use core::iter;

use crate::chain::Chain;
use crate::config::Config;
use crate::decorator::Decorator;
use crate::error::{CompositionError, ConstructError};
use crate::hidden::{Transform, declared_accessor};
use crate::instance::Instance;
use crate::surface::Surface;
use crate::value::Value;

/// Composes an ordered list of decorator units into one factory.
///
/// Units may be any mix of the four [`Decorator`] variants. Order is the
/// sole source of override precedence: later units win member-by-member on
/// the surface and key-by-key in the defaults, and initializers run in
/// unit order.
///
/// # Errors
///
/// - [`CompositionError::MultipleClasses`] - more than one class-like unit;
/// - [`CompositionError::ClassNotFirst`] - a class-like unit after the
///   first position;
/// - [`CompositionError::MalformedDecorator`] - a unit whose surface uses a
///   reserved member name.
pub fn compose<I>(units: I) -> Result<CompositeFactory, CompositionError>
where
    I: IntoIterator<Item = Decorator>,
{
    let units: Vec<Decorator> = units.into_iter().collect();

    let mut class_seen = false;
    for (position, unit) in units.iter().enumerate() {
        unit.validate(position)?;
        if let Decorator::Class(_) = unit {
            if class_seen {
                return Err(CompositionError::MultipleClasses { position });
            }
            if position != 0 {
                return Err(CompositionError::ClassNotFirst { position });
            }
            class_seen = true;
        }
    }

    let mut surface = Surface::new();
    let mut chain = Chain::new();
    let mut defaults = Config::new();

    for unit in units {
        match unit {
            Decorator::Bundle(bundle) => {
                if let Some(init) = bundle.constructor() {
                    chain.push_init(init.clone());
                }
                if let Some(contributed) = bundle.defaults() {
                    defaults.merge_from(contributed);
                }
                surface.merge_from(bundle.surface());
            }
            Decorator::Initializer(init) => chain.push_init(init),
            Decorator::Class(class) => {
                let construct = class.construct();
                chain.push_step(Rc::new(move |_acc, args| Ok(Some(construct(args)))));
                surface.merge_from(&class.flattened_surface());
            }
            Decorator::Factory(factory) => {
                if !factory.chain.is_empty() {
                    // The nested chain stamps its own surface on a legal
                    // inner swap, so later inner steps see full behavior.
                    chain.push_step(factory.chain.entry_point(factory.surface.clone()));
                }
                // Resolved defaults, not the contributing decorators' raw maps.
                defaults.merge_from(&factory.defaults);
                surface.merge_from(&factory.surface);
            }
        }
    }

    Ok(CompositeFactory {
        surface,
        chain,
        defaults,
    })
}

/// The sealed output of [`compose`]: builds new instances and decorates
/// existing ones.
///
/// Cloning a factory is cheap-ish (the chain and member callables are
/// reference counted) and is how a factory is passed as a decorator unit
/// into another composition ([`Decorator::Factory`]).
#[derive(Clone)]
pub struct CompositeFactory {
    surface: Surface,
    chain: Chain,
    defaults: Config,
}

impl CompositeFactory {
    /// Returns the factory's merged behavior surface.
    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Returns the number of initializers in the constructor chain.
    #[must_use]
    pub fn chain_len(&self) -> usize {
        self.chain.len()
    }

    /// Constructs a new instance.
    ///
    /// Allocates a fresh identity, stamps the merged surface onto it,
    /// resolves the configuration argument against the stored defaults,
    /// and runs the constructor chain. The first initializer may replace
    /// the identity; the replacement is stamped and carried through the
    /// rest of the chain.
    ///
    /// # Errors
    ///
    /// [`ConstructError::IdentityConflict`] if any initializer after the
    /// first returns a new identity.
    pub fn construct(&self, args: &[Value]) -> Result<Instance, ConstructError> {
        let args = self.resolve_arguments(args);
        let mut instance = Instance::new();
        instance.merge_surface(&self.surface);
        self.chain.run(&mut instance, &args, Some(&self.surface), true)?;
        Ok(instance)
    }

    /// Decorates an existing instance in place.
    ///
    /// Merges this factory's surface onto the receiver (later members
    /// winning), resolves the configuration argument, and runs the chain
    /// against the receiver. The receiver keeps its identity; the same
    /// object the caller supplied carries all the added behavior.
    ///
    /// # Errors
    ///
    /// [`ConstructError::IdentityConflict`] if any initializer, including
    /// the first, tries to replace the receiver.
    pub fn decorate(&self, receiver: &mut Instance, args: &[Value]) -> Result<(), ConstructError> {
        receiver.merge_surface(&self.surface);
        let args = self.resolve_arguments(args);
        self.chain.run(receiver, &args, None, false)
    }

    /// Merges updates into the stored defaults and returns a snapshot.
    ///
    /// Returns a fresh shallow copy of the merged map, never the live
    /// map, or `None` when no defaults exist, which tells callers (and
    /// the construction path) that configuration merging can be skipped.
    pub fn defaults(&mut self, updates: &[Config]) -> Option<Config> {
        for update in updates {
            self.defaults.merge_from(update);
        }
        if self.defaults.is_empty() {
            None
        } else {
            Some(self.defaults.clone())
        }
    }

    /// Declares a hidden-state-backed property.
    ///
    /// Reading the property on an instance returns its private stored
    /// value, or `initial` while unset; writing stores the raw value, and
    /// writing nothing clears back to `initial`. The backing state lives
    /// in the instance's hidden bucket, invisible to field enumeration.
    ///
    /// Applies to instances constructed (or decorated) after the call.
    pub fn property(&mut self, name: &str, initial: Value) -> &mut Self {
        self.declare(name, initial, None)
    }

    /// Declares a hidden-state-backed property with a write transform.
    ///
    /// Every write stores `transform(new, previous)` instead of the raw
    /// value; a `None` result clears the slot so reads fall back to
    /// `initial`.
    pub fn property_with<F>(&mut self, name: &str, initial: Value, transform: F) -> &mut Self
    where
        F: Fn(Option<&Value>, Option<&Value>) -> Option<Value> + 'static,
    {
        self.declare(name, initial, Some(Rc::new(transform)))
    }

    fn declare(&mut self, name: &str, initial: Value, transform: Option<Transform>) -> &mut Self {
        let name: Rc<str> = Rc::from(name);
        self.surface
            .insert(name.clone(), declared_accessor(name, initial, transform));
        self
    }

    /// Concatenates further decorator units onto this factory.
    ///
    /// Equivalent to a fresh composition with this factory as the leading
    /// unit: the existing surface, chain, and resolved defaults carry over,
    /// and the new units override in order.
    ///
    /// # Errors
    ///
    /// Same as [`compose`].
    pub fn concat<I>(self, units: I) -> Result<Self, CompositionError>
    where
        I: IntoIterator<Item = Decorator>,
    {
        compose(iter::once(Decorator::Factory(self)).chain(units))
    }

    /// Merges stored defaults into the trailing configuration argument.
    ///
    /// With no defaults the arguments pass through untouched. Otherwise
    /// the last argument, when it is a configuration map, is replaced by
    /// defaults merged under it (the argument wins key-by-key); when it is
    /// not, the defaults are appended as the configuration argument, so
    /// every initializer observes one fully resolved configuration.
    fn resolve_arguments(&self, args: &[Value]) -> Vec<Value> {
        let mut args = args.to_vec();
        if self.defaults.is_empty() {
            return args;
        }
        let mut resolved = self.defaults.clone();
        let trailing = args.last().and_then(Value::downcast_ref::<Config>).cloned();
        match (trailing, args.last_mut()) {
            (Some(config), Some(last)) => {
                resolved.merge_from(&config);
                *last = Value::new(resolved);
            }
            _ => args.push(Value::new(resolved)),
        }
        args
    }
}

impl fmt::Debug for CompositeFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeFactory")
            .field("surface", &self.surface)
            .field("chain", &self.chain)
            .field("defaults", &self.defaults)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorator::{BundleBuilder, ClassDecoratorBuilder};
    use crate::surface::SurfaceBuilder;
    use alloc::string::String;

    fn as_i32(value: Option<Value>) -> Option<i32> {
        value.and_then(|v| v.downcast())
    }

    fn observe_config() -> Decorator {
        // Records the configuration argument it observed as a field.
        Decorator::initializer(|instance, args| {
            if let Some(config) = args.last().and_then(Value::downcast_ref::<Config>) {
                instance.set_field("observed", Value::new(config.clone()));
            }
        })
    }

    fn observed(instance: &Instance) -> Config {
        instance
            .field("observed")
            .and_then(Value::downcast_ref::<Config>)
            .cloned()
            .expect("initializer stored the observed configuration")
    }

    #[test]
    fn empty_composition_builds_empty_instances() {
        let factory = compose([]).unwrap();
        let instance = factory.construct(&[]).unwrap();
        assert_eq!(instance.field_names().count(), 0);
        assert!(instance.surface().is_empty());
    }

    #[test]
    fn construct_runs_constructors_in_order() {
        let first = BundleBuilder::new()
            .constructor(|instance, _| {
                instance.set_field("order", Value::new(String::from("first")));
            })
            .build();
        let second = BundleBuilder::new()
            .constructor(|instance, _| {
                let prior = instance
                    .field("order")
                    .and_then(Value::downcast_ref::<String>)
                    .cloned()
                    .unwrap_or_default();
                instance.set_field("order", Value::new(alloc::format!("{prior},second")));
            })
            .build();

        let factory = compose([first.into(), second.into()]).unwrap();
        let instance = factory.construct(&[]).unwrap();
        assert_eq!(
            instance.field("order").and_then(Value::downcast_ref::<String>),
            Some(&String::from("first,second"))
        );
    }

    #[test]
    fn surface_override_is_last_write_wins() {
        let first = BundleBuilder::new().value("shared", 1_i32).value("only1", 10_i32).build();
        let second = BundleBuilder::new().value("shared", 2_i32).build();

        let factory = compose([first.into(), second.into()]).unwrap();
        let instance = factory.construct(&[]).unwrap();

        assert_eq!(as_i32(instance.get("shared")), Some(2));
        assert_eq!(as_i32(instance.get("only1")), Some(10));
    }

    #[test]
    fn defaults_merge_and_resolve_into_configuration() {
        let mut factory = compose([observe_config()]).unwrap();
        factory.defaults(&[Config::new().set("a", 1_i32).set("b", 2_i32)]);
        factory.defaults(&[Config::new().set("b", 3_i32).set("c", 4_i32)]);

        let instance = factory
            .construct(&[Value::new(Config::new().set("c", 5_i32))])
            .unwrap();
        let config = observed(&instance);

        assert_eq!(config.get_as::<i32>("a"), Some(&1));
        assert_eq!(config.get_as::<i32>("b"), Some(&3));
        assert_eq!(config.get_as::<i32>("c"), Some(&5));
    }

    #[test]
    fn defaults_appended_when_no_configuration_supplied() {
        let mut factory = compose([observe_config()]).unwrap();
        factory.defaults(&[Config::new().set("mints", "trebor")]);

        let instance = factory.construct(&[]).unwrap();
        assert_eq!(observed(&instance).get_as::<&str>("mints"), Some(&"trebor"));
    }

    #[test]
    fn no_defaults_leaves_arguments_untouched() {
        let factory = compose([Decorator::initializer(|instance, args| {
            instance.set_field("argc", Value::new(args.len()));
            if let Some(first) = args.first() {
                instance.set_field("first", first.clone());
            }
        })])
        .unwrap();

        let instance = factory.construct(&[Value::new("pisco"), Value::new(1_i32)]).unwrap();
        assert_eq!(
            instance.field("argc").and_then(Value::downcast_ref),
            Some(&2_usize)
        );
        assert_eq!(
            instance.field("first").and_then(Value::downcast_ref::<&str>),
            Some(&"pisco")
        );
    }

    #[test]
    fn defaults_returns_detached_snapshot_or_none() {
        let mut factory = compose([]).unwrap();
        assert!(factory.defaults(&[]).is_none());

        let snapshot = factory.defaults(&[Config::new().set("a", 1_i32)]).unwrap();
        assert_eq!(snapshot.get_as::<i32>("a"), Some(&1));

        // Mutating the snapshot must not reach the stored map.
        let mut snapshot = snapshot;
        snapshot.insert("b", Value::new(2_i32));
        let stored = factory.defaults(&[]).unwrap();
        assert!(!stored.contains("b"));
    }

    #[test]
    fn bundle_defaults_contribute_through_composition() {
        let bundle = BundleBuilder::new()
            .defaults(Config::new().set("genre", "reggae").set("artist", "midnite"))
            .build();
        let mut factory = compose([bundle.into(), observe_config()]).unwrap();
        factory.defaults(&[Config::new().set("artist", "lutan fyah")]);

        let instance = factory.construct(&[]).unwrap();
        let config = observed(&instance);
        assert_eq!(config.get_as::<&str>("genre"), Some(&"reggae"));
        assert_eq!(config.get_as::<&str>("artist"), Some(&"lutan fyah"));
    }

    #[test]
    fn class_must_be_alone_and_first() {
        let class = || {
            ClassDecoratorBuilder::new(|_| Instance::new()).build()
        };

        let err = compose([class().into(), class().into()]).unwrap_err();
        assert_eq!(err, CompositionError::MultipleClasses { position: 1 });

        let bundle = BundleBuilder::new().build();
        let err = compose([bundle.into(), class().into()]).unwrap_err();
        assert_eq!(err, CompositionError::ClassNotFirst { position: 1 });
    }

    #[test]
    fn class_allocates_and_factory_surface_wins() {
        let class = ClassDecoratorBuilder::new(|_args| {
            let mut instance = Instance::new();
            instance.set_field("test", Value::new(true));
            instance
        })
        .members(SurfaceBuilder::new().value("hours", 24_i32).value("shared", 1_i32).build())
        .build();
        let later = BundleBuilder::new().value("shared", 2_i32).build();

        let factory = compose([class.into(), later.into()]).unwrap();
        let instance = factory.construct(&[]).unwrap();

        // The class allocated the identity and its constructor ran.
        assert_eq!(
            instance.field("test").and_then(Value::downcast_ref),
            Some(&true)
        );
        // Class members are visible, later decorators override.
        assert_eq!(as_i32(instance.get("hours")), Some(24));
        assert_eq!(as_i32(instance.get("shared")), Some(2));
    }

    #[test]
    fn first_initializer_swap_carries_surface_and_effects() {
        let swap = Decorator::initializer_replacing(|_, _| {
            let mut next = Instance::new();
            next.set_field("fresh", Value::new(true));
            Some(next)
        });
        let second = Decorator::initializer(|instance, _| {
            instance.set_field("second", Value::new(true));
        });
        let third = Decorator::initializer(|instance, _| {
            instance.set_field("third", Value::new(true));
        });
        let members = BundleBuilder::new().value("merged", 7_i32).build();

        let factory = compose([members.into(), swap, second, third]).unwrap();
        let instance = factory.construct(&[]).unwrap();

        assert!(instance.field("fresh").is_some());
        assert!(instance.field("second").is_some());
        assert!(instance.field("third").is_some());
        assert_eq!(as_i32(instance.get("merged")), Some(7));
    }

    #[test]
    fn second_initializer_swap_is_identity_conflict() {
        let first = Decorator::initializer(|_, _| {});
        let swap = Decorator::initializer_replacing(|_, _| Some(Instance::new()));

        let factory = compose([first, swap]).unwrap();
        let err = factory.construct(&[]).unwrap_err();
        assert_eq!(err, ConstructError::IdentityConflict { position: 1 });
    }

    #[test]
    fn decorate_mutates_receiver_in_place() {
        let bundle = BundleBuilder::new()
            .value("genre", "reggae")
            .constructor(|instance, _| {
                instance.set_field("decorated", Value::new(true));
            })
            .build();
        let factory = compose([bundle.into()]).unwrap();

        let mut receiver = Instance::new();
        receiver.set_field("x", Value::new(1_i32));

        factory.decorate(&mut receiver, &[]).unwrap();

        // Existing state survives, new behavior and effects arrive.
        assert_eq!(as_i32(receiver.get("x")), Some(1));
        assert_eq!(
            receiver.get("genre").and_then(|v| v.downcast::<&str>()),
            Some("reggae")
        );
        assert!(receiver.field("decorated").is_some());
    }

    #[test]
    fn decorate_rejects_any_identity_swap() {
        let swap = Decorator::initializer_replacing(|_, _| Some(Instance::new()));
        let factory = compose([swap]).unwrap();

        let mut receiver = Instance::new();
        let err = factory.decorate(&mut receiver, &[]).unwrap_err();
        assert_eq!(err, ConstructError::IdentityConflict { position: 0 });
    }

    #[test]
    fn factory_composes_as_decorator() {
        let inner_bundle = BundleBuilder::new()
            .value("genre", "reggae")
            .constructor(|instance, _| {
                instance.set_field("inner_ran", Value::new(true));
            })
            .build();
        let mut inner = compose([inner_bundle.into()]).unwrap();
        inner.defaults(&[Config::new().set("artist", "khari kill")]);

        let outer = compose([inner.into(), observe_config()]).unwrap();
        let instance = outer.construct(&[]).unwrap();

        // Surface, constructors, and resolved defaults all carried over.
        assert_eq!(
            instance.get("genre").and_then(|v| v.downcast::<&str>()),
            Some("reggae")
        );
        assert!(instance.field("inner_ran").is_some());
        assert_eq!(
            observed(&instance).get_as::<&str>("artist"),
            Some(&"khari kill")
        );
    }

    fn genre_swap_observer() -> [Decorator; 3] {
        let genre = BundleBuilder::new().value("genre", "reggae").build();
        let swap = Decorator::initializer_replacing(|_, _| Some(Instance::new()));
        let observer = Decorator::initializer(|instance, _| {
            instance.set_field(
                "saw_genre",
                Value::new(instance.surface().contains("genre")),
            );
        });
        [genre.into(), swap, observer]
    }

    #[test]
    fn nested_swap_is_stamped_before_later_inner_steps() {
        // Standalone: the swap happens at chain position 0 and the stamped
        // surface is visible to the observer that follows it.
        let direct = compose(genre_swap_observer())
            .unwrap()
            .construct(&[])
            .unwrap();
        assert_eq!(
            direct.field("saw_genre").and_then(Value::downcast_ref),
            Some(&true)
        );

        // The same composition used as a decorator unit must behave the
        // same: the inner swap gets the inner surface before the observer
        // runs.
        let inner = compose(genre_swap_observer()).unwrap();
        let nested = compose([inner.into()]).unwrap().construct(&[]).unwrap();
        assert_eq!(
            nested.field("saw_genre").and_then(Value::downcast_ref),
            Some(&true)
        );
        assert_eq!(
            nested.get("genre").and_then(|v| v.downcast::<&str>()),
            Some("reggae")
        );
    }

    #[test]
    fn defaults_append_after_non_config_trailing_argument() {
        // A non-configuration trailing argument is kept in place; the
        // resolved defaults arrive as one extra trailing argument.
        let mut factory = compose([Decorator::initializer(|instance, args| {
            instance.set_field("argc", Value::new(args.len()));
            if let Some(first) = args.first() {
                instance.set_field("first", first.clone());
            }
            if let Some(config) = args.last().and_then(Value::downcast_ref::<Config>) {
                instance.set_field("observed", Value::new(config.clone()));
            }
        })])
        .unwrap();
        factory.defaults(&[Config::new().set("mints", "trebor")]);

        let instance = factory.construct(&[Value::new("pisco")]).unwrap();
        assert_eq!(
            instance.field("argc").and_then(Value::downcast_ref),
            Some(&2_usize)
        );
        assert_eq!(
            instance.field("first").and_then(Value::downcast_ref::<&str>),
            Some(&"pisco")
        );
        assert_eq!(observed(&instance).get_as::<&str>("mints"), Some(&"trebor"));
    }

    #[test]
    fn declared_property_reads_writes_and_clears() {
        let mut factory = compose([]).unwrap();
        factory.property("panels", Value::new(true));

        let mut instance = factory.construct(&[]).unwrap();
        assert_eq!(instance.get("panels").and_then(|v| v.downcast::<bool>()), Some(true));

        instance.set("panels", Some(Value::new(false)));
        assert_eq!(instance.get("panels").and_then(|v| v.downcast::<bool>()), Some(false));

        instance.set("panels", None);
        assert_eq!(instance.get("panels").and_then(|v| v.downcast::<bool>()), Some(true));
    }

    #[test]
    fn declared_property_with_transform() {
        let mut factory = compose([]).unwrap();
        factory.property_with(
            "flanels",
            Value::new(String::from("yo")),
            |incoming, _previous| {
                incoming
                    .and_then(Value::downcast_ref::<String>)
                    .map(|s| Value::new(alloc::format!("{s}yo")))
            },
        );

        let mut instance = factory.construct(&[]).unwrap();
        assert_eq!(
            instance.get("flanels").and_then(|v| v.downcast::<String>()),
            Some(String::from("yo"))
        );

        let reported = instance.set("flanels", Some(Value::new(String::from("hey-"))));
        assert_eq!(
            reported.and_then(|v| v.downcast::<String>()),
            Some(String::from("hey-yo"))
        );

        instance.set("flanels", None);
        assert_eq!(
            instance.get("flanels").and_then(|v| v.downcast::<String>()),
            Some(String::from("yo"))
        );
    }

    #[test]
    fn declared_property_mixes_into_later_compositions() {
        let mut inner = compose([]).unwrap();
        inner.property("balsam", Value::new(987_i32));

        let outer = compose([inner.into()]).unwrap();
        let mut instance = outer.construct(&[]).unwrap();

        assert_eq!(as_i32(instance.get("balsam")), Some(987));
        instance.set("balsam", Some(Value::new(789_i32)));
        assert_eq!(as_i32(instance.get("balsam")), Some(789));
        instance.set("balsam", None);
        assert_eq!(as_i32(instance.get("balsam")), Some(987));
    }

    #[test]
    fn concat_extends_an_existing_factory() {
        let base = compose([Decorator::initializer(|instance, _| {
            instance.set_field("base", Value::new(true));
        })])
        .unwrap();

        let extended = base
            .concat([Decorator::from(BundleBuilder::new().value("extra", 1_i32).build())])
            .unwrap();

        let instance = extended.construct(&[]).unwrap();
        assert!(instance.field("base").is_some());
        assert_eq!(as_i32(instance.get("extra")), Some(1));
    }

    #[test]
    fn loader_boundary_units_normalize_through_compose() {
        // An external loader hands over erased units; normalize then compose.
        let units = [
            Value::new(Config::new().set("genre", "reggae")),
            Value::new(Config::new().set("artist", "busy signal")),
        ];
        let decorators: Vec<Decorator> = units
            .iter()
            .enumerate()
            .map(|(position, unit)| Decorator::from_value(unit, position).unwrap())
            .collect();

        let factory = compose(decorators).unwrap();
        let instance = factory.construct(&[]).unwrap();
        assert_eq!(
            instance.get("genre").and_then(|v| v.downcast::<&str>()),
            Some("reggae")
        );
        assert_eq!(
            instance.get("artist").and_then(|v| v.downcast::<&str>()),
            Some("busy signal")
        );
    }
}
