#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    unsafe_code,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Typed errors: classify errors by category without touching their message.
//!
//! ## Overview
//!
//! A common way of making errors matchable is to declare a handful of
//! sentinel values ("not found", "invalid input", ...) and compare against
//! them. The drawback is that a sentinel carries one fixed message: as soon as
//! you want to say *which* user was not found you need a new value, and that
//! new value no longer compares equal to the sentinel.
//!
//! This crate decouples the two concerns. A [`TypedError`] pairs a
//! **category** (a sentinel used purely for identity) with a **content**
//! value (the message the user sees, plus any errors it wraps). The
//! [`Error::is`] ancestry check then matches either side:
//!
//! ```
//! use tyers::{Error, Sentinel, errorf};
//!
//! static NOT_FOUND: Sentinel = Sentinel::new("not found");
//!
//! let err = tyers::new(&NOT_FOUND, "user 'bob' not found");
//! assert_eq!(err.to_string(), "user 'bob' not found");
//! assert!(err.is(&NOT_FOUND));
//!
//! let disk = Error::msg("disk error");
//! let err = errorf!(&NOT_FOUND, "read failed: {}", wrap(disk.clone()));
//! assert_eq!(err.to_string(), "read failed: disk error");
//! assert!(err.is(&NOT_FOUND));
//! assert!(err.is(&disk));
//! ```
//!
//! ## Core Concepts
//!
//! - [`Error`] is a cheaply cloneable handle to any error value. Handles are
//!   compared by **identity**: two handles are equal only when they point at
//!   the same allocation, no matter what their messages say.
//! - A **category** is any [`Error`]. Categories may themselves be typed
//!   errors, so `tyers::new(&PARENT, "child")` can be used as the category of
//!   yet another error, and checks against `PARENT` match transitively.
//! - The three constructors are [`new`] (literal text), [`errorf`] /
//!   [`errorf!`] (formatted text with wrapped causes), and [`as_typed`]
//!   (retrofit a category onto an existing error without changing its text).
//! - The ancestry check is implemented by [`chain::is`], which understands
//!   typed errors, formatted errors with several causes, and plain
//!   [`core::error::Error::source`] chains.
//!
//! ## Ecosystem
//!
//! - **`tyers-tracing`** emits structured [`tracing`] events describing the
//!   category ancestry and cause chain of an error.
//! - The `compat-anyhow1` and `compat-eyre06` features provide conversions
//!   to and from [`anyhow`] and [`eyre`].
//!
//! [`tracing`]: https://docs.rs/tracing
//! [`anyhow`]: https://docs.rs/anyhow
//! [`eyre`]: https://docs.rs/eyre

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

pub mod chain;
pub mod compat;
pub mod format;
pub mod prelude;

mod error;
mod result_ext;
mod sentinel;
mod typed;

pub use self::{
    error::Error,
    format::{Arg, Formatted},
    result_ext::ResultExt,
    sentinel::Sentinel,
    typed::{IntoCategory, TypedError, as_typed, errorf, new},
};

/// A [`Result`](core::result::Result) type alias where the error is
/// [`Error`].
///
/// # Examples
///
/// ```
/// fn lookup(id: u32) -> tyers::Result<String> {
///     Ok(format!("user-{id}"))
/// }
/// ```
pub type Result<T, E = Error> = core::result::Result<T, E>;

// Not public API. Referenced by macro-generated code.
#[doc(hidden)]
pub mod __private {
    #[doc(hidden)]
    pub use alloc::{vec, vec::Vec};
    #[doc(hidden)]
    pub use core::result::Result::Err;
}
