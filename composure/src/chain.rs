// Copyright 2026 the Composure Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The constructor chain.
//!
//! Composition derives exactly one initializer per decorator and appends it
//! to the factory's [`Chain`], preserving decorator order. At construction
//! time the chain runs as a left fold over the receiver:
//!
//! - an initializer returning `None` keeps the current accumulator;
//! - the **first** initializer may return `Some(new)` to swap in a new
//!   identity; the merged surface is stamped onto it immediately and it
//!   becomes the accumulator for the rest of the fold;
//! - any later initializer returning `Some` is an
//!   [`IdentityConflict`](crate::ConstructError::IdentityConflict).
//!
//! A whole chain can be packaged as a single step ([`Chain::entry_point`]),
//! which is how a composite factory participates as a decorator in another
//! composition: the nested chain runs internally, and a swap by its own
//! first step is surfaced to the outer chain to judge by position.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use crate::error::ConstructError;
use crate::instance::Instance;
use crate::surface::Surface;
use crate::value::Value;

/// A decorator-supplied initializer.
///
/// Runs against the current accumulator with the resolved argument list.
/// Returning `None` (the common case) keeps the accumulator; returning
/// `Some` proposes an identity swap, which is legal only for the first
/// initializer in a chain.
pub type InitFn = Rc<dyn Fn(&mut Instance, &[Value]) -> Option<Instance>>;

/// One chain entry: an initializer, or a nested chain acting as one.
pub(crate) type Step =
    Rc<dyn Fn(&mut Instance, &[Value]) -> Result<Option<Instance>, ConstructError>>;

/// The ordered initializer list owned by a composite factory.
#[derive(Clone, Default)]
pub(crate) struct Chain {
    steps: Vec<Step>,
}

impl Chain {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.steps.len()
    }

    /// Appends a plain initializer.
    pub(crate) fn push_init(&mut self, init: InitFn) {
        self.steps
            .push(Rc::new(move |acc, args| Ok(init(acc, args))));
    }

    /// Appends a prebuilt step (class wrappers, nested entry points).
    pub(crate) fn push_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Runs the chain against `acc` as a left fold.
    ///
    /// On a legal identity swap (step 0 with `allow_swap`), `stamp` is
    /// merged onto the new identity before it replaces the accumulator, so
    /// every later step observes the full behavior surface. Any other swap
    /// fails with the position of the offending step.
    pub(crate) fn run(
        &self,
        acc: &mut Instance,
        args: &[Value],
        stamp: Option<&Surface>,
        allow_swap: bool,
    ) -> Result<(), ConstructError> {
        for (position, step) in self.steps.iter().enumerate() {
            if let Some(mut next) = step(acc, args)? {
                if position == 0 && allow_swap {
                    if let Some(surface) = stamp {
                        next.merge_surface(surface);
                    }
                    *acc = next;
                } else {
                    return Err(ConstructError::IdentityConflict { position });
                }
            }
        }
        Ok(())
    }

    /// Packages this whole chain as one step.
    ///
    /// The nested chain keeps its own first-step swap privilege: a swap by
    /// its first step gets `stamp` (the owning factory's merged surface)
    /// merged onto it immediately, is carried through the remaining nested
    /// steps, and is then handed to the enclosing chain, which decides
    /// legality from the nested entry's own position. Later nested swaps
    /// fail immediately.
    pub(crate) fn entry_point(&self, stamp: Surface) -> Step {
        let steps = self.steps.clone();
        Rc::new(move |acc, args| {
            let mut swapped: Option<Instance> = None;
            for (position, step) in steps.iter().enumerate() {
                let target = match swapped.as_mut() {
                    Some(next) => next,
                    None => &mut *acc,
                };
                if let Some(mut next) = step(target, args)? {
                    if position == 0 {
                        next.merge_surface(&stamp);
                        swapped = Some(next);
                    } else {
                        return Err(ConstructError::IdentityConflict { position });
                    }
                }
            }
            Ok(swapped)
        })
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain").field("len", &self.steps.len()).finish()
    }
}
