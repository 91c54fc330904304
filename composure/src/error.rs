// Copyright 2026 the Composure Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composition and construction errors.
//!
//! Both taxonomies are terminal for the call that raised them: they mark a
//! static contract violation in how the composition was assembled, and
//! there is no partial-success mode: a composition either yields a usable
//! factory or fails before any instance can be constructed.

use thiserror::Error;

/// Errors raised while building a composite factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompositionError {
    /// A second class-like decorator was supplied.
    #[error("only one class decorator may be composed (unit {position})")]
    MultipleClasses {
        /// Index of the offending unit in the composition order.
        position: usize,
    },
    /// A class-like decorator was supplied anywhere but first.
    #[error("a class decorator must be the first unit in a composition (unit {position})")]
    ClassNotFirst {
        /// Index of the offending unit in the composition order.
        position: usize,
    },
    /// A unit could not be normalized into any known decorator variant.
    #[error("malformed decorator (unit {position}): {reason}")]
    MalformedDecorator {
        /// Index of the offending unit in the composition order.
        position: usize,
        /// Why normalization failed.
        reason: &'static str,
    },
}

/// Errors raised while running a constructor chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConstructError {
    /// An initializer other than the first returned a new identity.
    #[error("only the first constructor may create an object (initializer {position})")]
    IdentityConflict {
        /// Index of the offending initializer in its chain.
        position: usize,
    },
}
