// Copyright 2026 the Composure Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composure: An object-composition engine.
//!
//! This crate builds objects out of ordered lists of decorator units. Each
//! unit contributes behavior members, an initializer, and defaults; a
//! composition merges them into a single [`CompositeFactory`] that can
//! construct fresh instances or decorate existing ones.
//!
//! ## Core Concepts
//!
//! ### Decorator units
//!
//! Every contributor is one of four [`Decorator`] shapes:
//!
//! - **Bundle** - a member surface plus optional constructor and defaults
//! - **Initializer** - a bare constructor step
//! - **Class** - allocates the identity itself (at most one, first only)
//! - **Factory** - a previously composed factory, reused transitively
//!
//! ### Key Operations
//!
//! - `compose(units)` - fold units into a factory, validating class rules
//! - `construct(args)` - allocate, stamp the surface, run the chain
//! - `decorate(receiver, args)` - add behavior to an existing instance
//! - `defaults(updates)` / `property(name, initial)` - extend a built factory
//!
//! Order is the sole source of precedence: later units win member-by-member
//! on the surface and key-by-key in the defaults, and initializers run in
//! unit order. Only the first initializer of a construction may replace the
//! identity under construction.
//!
//! ## Quick Start
//!
//! ```rust
//! use composure::{BundleBuilder, Config, Decorator, Value, compose};
//!
//! // Two capability bundles; the later one overrides shared members.
//! let audio = BundleBuilder::new()
//!     .value("genre", "reggae")
//!     .defaults(Config::new().set("volume", 11_i32))
//!     .build();
//! let player = BundleBuilder::new()
//!     .constructor(|instance, args| {
//!         let volume = args
//!             .last()
//!             .and_then(|v| v.downcast_ref::<Config>())
//!             .and_then(|config| config.get_as::<i32>("volume").copied())
//!             .unwrap_or(0);
//!         instance.set_field("volume", Value::new(volume));
//!     })
//!     .build();
//!
//! let factory = compose([Decorator::from(audio), Decorator::from(player)]).unwrap();
//! let instance = factory.construct(&[]).unwrap();
//!
//! assert_eq!(
//!     instance.get("genre").and_then(|v| v.downcast::<&str>()),
//!     Some("reggae")
//! );
//! assert_eq!(
//!     instance.get("volume").and_then(|v| v.downcast::<i32>()),
//!     Some(11)
//! );
//! ```
//!
//! ## Hidden state
//!
//! [`CompositeFactory::property`] declares an accessor backed by a private
//! per-instance slot: reads fall back to the declared initial while unset,
//! writes can be routed through a transform, and the backing value never
//! appears in field enumeration.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod chain;
mod config;
mod decorator;
mod error;
mod factory;
mod hidden;
mod instance;
mod surface;
mod value;

pub use chain::InitFn;
pub use config::Config;
pub use decorator::{
    AllocFn, Bundle, BundleBuilder, ClassDecorator, ClassDecoratorBuilder, Decorator,
};
pub use error::{CompositionError, ConstructError};
pub use factory::{CompositeFactory, compose};
pub use instance::Instance;
pub use surface::{Getter, Member, Method, Setter, Surface, SurfaceBuilder};
pub use value::Value;
