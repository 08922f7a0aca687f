use core::{fmt, ops::Deref};

#[cfg(not(feature = "std"))]
use spin::Once as OnceCell;
#[cfg(feature = "std")]
use std::sync::OnceLock as OnceCell;

use crate::Error;

/// A category marker that can be declared as a `static`.
///
/// [`Error`] handles are reference counted and cannot be created in a
/// constant context. A `Sentinel` stores only its text and allocates the
/// handle the first time it is used; every later use returns that same
/// handle, so the sentinel has one stable identity for the lifetime of the
/// program.
///
/// The handle is kept in a [`std::sync::OnceLock`] when the `std` feature is
/// enabled and in a [`spin::Once`] otherwise.
///
/// ```
/// use tyers::Sentinel;
///
/// static INVALID_INPUT: Sentinel = Sentinel::new("invalid input");
///
/// fn parse_port(value: &str) -> tyers::Result<u16> {
///     value
///         .parse()
///         .map_err(|_| tyers::new(&INVALID_INPUT, format!("'{value}' is not a port")))
/// }
///
/// let err = parse_port("http").unwrap_err();
/// assert_eq!(err.to_string(), "'http' is not a port");
/// assert!(err.is(&INVALID_INPUT));
/// ```
pub struct Sentinel {
    text: &'static str,
    error: OnceCell<Error>,
}

impl Sentinel {
    /// Declares a sentinel whose error renders as `text`.
    #[must_use]
    pub const fn new(text: &'static str) -> Self {
        Self {
            text,
            error: OnceCell::new(),
        }
    }

    /// Returns the handle of this sentinel, allocating it on first use.
    pub fn get(&self) -> &Error {
        #[cfg(not(feature = "std"))]
        let error = self.error.call_once(|| Error::msg(self.text));

        #[cfg(feature = "std")]
        let error = self.error.get_or_init(|| Error::msg(self.text));

        error
    }

    /// The text the sentinel renders as.
    #[must_use]
    pub const fn text(&self) -> &'static str {
        self.text
    }
}

impl Deref for Sentinel {
    type Target = Error;

    fn deref(&self) -> &Error {
        self.get()
    }
}

impl AsRef<Error> for Sentinel {
    fn as_ref(&self) -> &Error {
        self.get()
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

impl fmt::Debug for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sentinel").field(&self.text).finish()
    }
}
