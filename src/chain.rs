//! Walking error chains.
//!
//! # Overview
//!
//! [`core::error::Error`] exposes a single optional
//! [`source`](core::error::Error::source) and offers no way for an error to
//! take part in an identity check. This module provides the walker used by
//! [`Error::is`] together with iterators over the same structure.
//!
//! An error's *causes* are found as follows:
//!
//! - a [`TypedError`] has exactly one cause, its content value;
//! - a [`Formatted`] error has one cause per wrapped argument, in order;
//! - an [`Error`] handle that ended up inside a foreign error is looked
//!   through to the value it refers to;
//! - any other error has the cause returned by `source`, if any.
//!
//! The *categories* of an error are only visible through typed errors and
//! are never part of the cause chain; they are consulted by [`is`] alone.
//!
//! [`Error::is`]: crate::Error::is

use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::{Error, format::Formatted, typed::TypedError};

type DynError = dyn core::error::Error + 'static;

/// Reports whether `error` is, or descends from, `target`.
///
/// Starting with `error`, every node of the chain is checked. The check
/// succeeds as soon as a node
///
/// 1. is the value `target` refers to, or
/// 2. is a [`TypedError`] whose category is, or descends from, `target`.
///    The category is checked with this same function, so categories of
///    categories match at any depth.
///
/// Otherwise the walk continues into the causes of the node (see the
/// [module documentation](self)), visiting all causes of a formatted error.
///
/// A typed error without a category simply skips the second rule. Category
/// chains that loop back onto themselves are not detected and make this
/// function recurse without bound.
///
/// # Examples
///
/// ```
/// use tyers::{Error, chain};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("config invalid")]
/// struct ConfigInvalid(#[source] Error);
///
/// let parse = Error::msg("parse error");
/// let err = ConfigInvalid(tyers::new(&parse, "line 3: expected '='"));
///
/// assert!(chain::is(&err, &parse));
/// ```
#[must_use]
pub fn is(error: &DynError, target: &Error) -> bool {
    let mut current = error;
    loop {
        if target.is_identical_to(current) {
            return true;
        }
        if let Some(handle) = current.downcast_ref::<Error>() {
            current = handle.as_dyn();
            continue;
        }
        if let Some(typed) = current.downcast_ref::<TypedError>() {
            if typed.category().is_some_and(|category| category.is(target)) {
                return true;
            }
            current = typed.content().as_dyn();
            continue;
        }
        if let Some(formatted) = current.downcast_ref::<Formatted>() {
            return formatted
                .causes()
                .iter()
                .any(|cause| is(cause.as_dyn(), target));
        }
        match current.source() {
            Some(source) => current = source,
            None => return false,
        }
    }
}

/// Iterator over the direct causes of an error.
///
/// Returned by [`Error::causes`](crate::Error::causes).
#[must_use]
pub struct Causes<'a> {
    inner: CausesInner<'a>,
}

enum CausesInner<'a> {
    Single(Option<&'a DynError>),
    Many(core::slice::Iter<'a, Error>),
}

impl<'a> Causes<'a> {
    pub(crate) fn of(error: &'a DynError) -> Self {
        let mut error = error;
        while let Some(handle) = error.downcast_ref::<Error>() {
            error = handle.as_dyn();
        }
        let inner = if let Some(typed) = error.downcast_ref::<TypedError>() {
            CausesInner::Single(Some(typed.content().as_dyn()))
        } else if let Some(formatted) = error.downcast_ref::<Formatted>() {
            CausesInner::Many(formatted.causes().iter())
        } else {
            CausesInner::Single(error.source())
        };
        Self { inner }
    }
}

impl<'a> Iterator for Causes<'a> {
    type Item = &'a DynError;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            CausesInner::Single(cause) => cause.take(),
            CausesInner::Many(iter) => iter.next().map(Error::as_dyn),
        }
    }
}

impl FusedIterator for Causes<'_> {}

/// Depth-first iterator over an error and everything it transitively wraps.
///
/// Returned by [`Error::chain`](crate::Error::chain). The first item is the
/// error the iterator was created from.
#[must_use]
pub struct Chain<'a> {
    stack: Vec<&'a DynError>,
}

impl<'a> Chain<'a> {
    /// Creates a chain iterator starting at `error`.
    pub fn new(error: &'a DynError) -> Self {
        Self {
            stack: alloc::vec![error],
        }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a DynError;

    fn next(&mut self) -> Option<Self::Item> {
        let mut current = self.stack.pop()?;
        while let Some(handle) = current.downcast_ref::<Error>() {
            current = handle.as_dyn();
        }
        let causes: Vec<_> = Causes::of(current).collect();
        self.stack.extend(causes.into_iter().rev());
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}

/// Iterator over the category ancestry of an error.
///
/// Returned by [`Error::categories`](crate::Error::categories). Yields the
/// direct category first and stops after the first category that has no
/// category of its own.
#[must_use]
pub struct Categories<'a> {
    next: Option<&'a Error>,
}

impl<'a> Categories<'a> {
    pub(crate) fn new(first: Option<&'a Error>) -> Self {
        Self { next: first }
    }
}

impl<'a> Iterator for Categories<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.category();
        Some(current)
    }
}

impl FusedIterator for Categories<'_> {}
