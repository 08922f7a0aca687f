use alloc::borrow::Cow;
use core::fmt;

use crate::{Arg, Error, Formatted, Sentinel};

/// An error that belongs to a category.
///
/// A typed error pairs a *category*, an [`Error`] used only for its
/// identity, with a *content* value, the [`Error`] that provides the message
/// and any wrapped causes. It renders exactly like its content, and
/// [`Error::is`] matches it against its category (and the category's own
/// ancestors) as well as against everything the content wraps.
///
/// Typed errors are created with [`new`], [`errorf`] or [`as_typed`] and are
/// always handed out inside an [`Error`], so they can themselves serve as the
/// category of further errors.
///
/// ```
/// use tyers::{Error, TypedError};
///
/// let not_found = Error::msg("not found");
/// let err = tyers::new(&not_found, "user 'bob' not found");
///
/// let typed: &TypedError = err.as_typed_error().unwrap();
/// assert_eq!(typed.category(), Some(&not_found));
/// assert_eq!(typed.content().to_string(), "user 'bob' not found");
/// ```
#[derive(Clone)]
pub struct TypedError {
    category: Option<Error>,
    content: Error,
}

impl TypedError {
    /// The category of this error, or `None` if it was created without one.
    #[must_use]
    pub fn category(&self) -> Option<&Error> {
        self.category.as_ref()
    }

    /// The content value: the error that provides the message and causes.
    #[must_use]
    pub fn content(&self) -> &Error {
        &self.content
    }

    fn into_error(self) -> Error {
        Error::from_value(self)
    }
}

impl fmt::Display for TypedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.content, f)
    }
}

impl fmt::Debug for TypedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedError")
            .field("category", &self.category)
            .field("content", &self.content)
            .finish()
    }
}

impl core::error::Error for TypedError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(self.content.as_dyn())
    }
}

/// Values accepted as the category of a typed error.
///
/// Implemented for owned and borrowed [`Error`]s, for borrowed
/// [`Sentinel`]s, and for `Option<Error>` so that `None` can be passed to
/// create an error without a category.
pub trait IntoCategory {
    /// Converts `self` into an optional category handle.
    fn into_category(self) -> Option<Error>;
}

impl IntoCategory for Error {
    fn into_category(self) -> Option<Error> {
        Some(self)
    }
}

impl IntoCategory for &Error {
    fn into_category(self) -> Option<Error> {
        Some(self.clone())
    }
}

impl IntoCategory for &Sentinel {
    fn into_category(self) -> Option<Error> {
        Some(self.get().clone())
    }
}

impl IntoCategory for Option<Error> {
    fn into_category(self) -> Option<Error> {
        self
    }
}

/// Creates an error that renders as `text` and belongs to `category`.
///
/// ```
/// use tyers::Error;
///
/// let ancestor = Error::msg("ancestor error type");
/// let error_type = tyers::new(&ancestor, "error type");
/// let err = tyers::new(&error_type, "instance of error");
///
/// assert_eq!(err.to_string(), "instance of error");
/// assert!(err.is(&error_type));
/// assert!(err.is(&ancestor));
/// ```
#[must_use]
pub fn new(category: impl IntoCategory, text: impl Into<Cow<'static, str>>) -> Error {
    TypedError {
        category: category.into_category(),
        content: Error::msg(text),
    }
    .into_error()
}

/// Creates an error from a template and arguments that belongs to
/// `category`.
///
/// The message is rendered as described in the [`format`](crate::format)
/// module. Every substituted [`Arg::Wrap`] argument becomes a cause, so the
/// result matches it and everything it wraps. The [`errorf!`] macro is
/// usually more convenient.
///
/// ```
/// use tyers::{Arg, Error};
///
/// let not_found = Error::msg("not found");
/// let inner = Error::msg("disk error");
/// let err = tyers::errorf(&not_found, "read failed: {}", [Arg::wrap(inner.clone())]);
///
/// assert_eq!(err.to_string(), "read failed: disk error");
/// assert!(err.is(&not_found));
/// assert!(err.is(&inner));
/// ```
#[must_use]
pub fn errorf(
    category: impl IntoCategory,
    template: &str,
    args: impl IntoIterator<Item = Arg>,
) -> Error {
    TypedError {
        category: category.into_category(),
        content: Error::from_value(Formatted::new(template, args)),
    }
    .into_error()
}

/// Assigns `category` to an existing error without changing its message.
///
/// The content of the returned error *is* `error`: the same handle, not a
/// copy. The result renders exactly as `error` does and matches `error`,
/// everything `error` matches, and `category`.
///
/// ```
/// use tyers::Error;
///
/// let retryable = Error::msg("retryable");
/// let reset = Error::msg("connection reset by peer");
/// let err = tyers::as_typed(&retryable, reset.clone());
///
/// assert_eq!(err.to_string(), "connection reset by peer");
/// assert!(err.is(&reset));
/// assert!(err.is(&retryable));
/// assert_eq!(err.as_typed_error().map(|t| t.content()), Some(&reset));
/// ```
#[must_use]
pub fn as_typed(category: impl IntoCategory, error: impl Into<Error>) -> Error {
    TypedError {
        category: category.into_category(),
        content: error.into(),
    }
    .into_error()
}
