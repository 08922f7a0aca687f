//! Conversions between tyers [`Error`]s and boxed error trait objects.
//!
//! # Overview
//!
//! `Box<dyn Error + Send + Sync>` is the lowest common denominator of Rust
//! error handling. An [`Error`] already converts into one through the
//! standard `From` implementation (and therefore with `?`), and
//! [`IntoBoxedError`] spells the conversion out for results.
//!
//! In the other direction [`IntoTyers`] adopts a boxed error. If the box
//! holds a tyers [`Error`], that handle is unboxed again so categories and
//! identity survive the round trip:
//!
//! ```
//! use std::error::Error as StdError;
//!
//! use tyers::{Error, compat::IntoTyers};
//!
//! let timeout = Error::msg("timed out");
//! let boxed: Box<dyn StdError + Send + Sync> = timeout.clone().into();
//! let back = boxed.into_tyers();
//!
//! assert_eq!(back, timeout);
//! ```

use alloc::boxed::Box;
use core::{error::Error as StdError, fmt};

use super::IntoTyers;
use crate::Error;

/// Adapter that lets a boxed error trait object be stored in an [`Error`].
///
/// Display, Debug and `source` are forwarded to the boxed value. You
/// normally get one of these through [`IntoTyers`].
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl fmt::Debug for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

/// A trait for converting tyers [`Error`]s into boxed error trait objects.
///
/// # Examples
///
/// ```
/// use std::error::Error as StdError;
///
/// use tyers::{Error, compat::boxed_error::IntoBoxedError};
///
/// fn uses_tyers() -> tyers::Result<i32> {
///     Err(Error::msg("failed"))
/// }
///
/// fn uses_boxed_error() -> Result<i32, Box<dyn StdError + Send + Sync>> {
///     let value = uses_tyers().into_boxed_error()?;
///     Ok(value)
/// }
///
/// assert_eq!(uses_boxed_error().unwrap_err().to_string(), "failed");
/// ```
pub trait IntoBoxedError {
    /// The type produced by the conversion.
    ///
    /// - For [`Error`]: `Box<dyn Error + Send + Sync>`
    /// - For `Result<T, Error>`: `Result<T, Box<dyn Error + Send + Sync>>`
    type Output;

    /// Converts this value into a boxed error type.
    fn into_boxed_error(self) -> Self::Output;
}

impl IntoBoxedError for Error {
    type Output = Box<dyn StdError + Send + Sync>;

    fn into_boxed_error(self) -> Self::Output {
        Box::new(self)
    }
}

impl<T> IntoBoxedError for Result<T, Error> {
    type Output = Result<T, Box<dyn StdError + Send + Sync>>;

    fn into_boxed_error(self) -> Self::Output {
        self.map_err(|e| e.into_boxed_error())
    }
}

impl IntoTyers for Box<dyn StdError + Send + Sync> {
    type Output = Error;

    fn into_tyers(self) -> Self::Output {
        match self.downcast::<Error>() {
            Ok(handle) => *handle,
            Err(boxed) => Error::new(BoxedError(boxed)),
        }
    }
}

impl<T> IntoTyers for Result<T, Box<dyn StdError + Send + Sync>> {
    type Output = Result<T, Error>;

    #[inline(always)]
    fn into_tyers(self) -> Self::Output {
        self.map_err(|e| e.into_tyers())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[derive(Debug)]
    struct Wrapper(Error);

    impl fmt::Display for Wrapper {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("wrapper")
        }
    }

    impl StdError for Wrapper {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_boxed_foreign_error_keeps_chain() {
        let inner = Error::msg("inner");
        let boxed: Box<dyn StdError + Send + Sync> = Box::new(Wrapper(inner.clone()));
        let err = boxed.into_tyers();
        assert_eq!(err.to_string(), "wrapper");
        assert!(err.downcast_ref::<BoxedError>().is_some());
        assert!(err.is(&inner));
    }

    #[test]
    fn test_round_trip_recovers_category() {
        let category = Error::msg("category");
        let err = crate::new(&category, "instance");
        let back = err.clone().into_boxed_error().into_tyers();
        assert_eq!(back, err);
        assert!(back.is(&category));
    }
}
