//! Bidirectional integration with the [`eyre`] 0.6.x error handling library.
//!
//! This module specifically supports `eyre` version 0.6.x. To enable this
//! integration, add the `compat-eyre06` feature flag to your `Cargo.toml`.
//!
//! # Converting from Eyre to Tyers
//!
//! ```
//! use tyers::{Error, compat::IntoTyers};
//!
//! fn eyre_function() -> eyre::Result<String> {
//!     eyre::bail!("quota exceeded");
//! }
//!
//! let throttled = Error::msg("throttled");
//! let err = tyers::as_typed(&throttled, eyre_function().unwrap_err().into_tyers());
//!
//! assert_eq!(err.to_string(), "quota exceeded");
//! assert!(err.is(&throttled));
//! ```
//!
//! # Converting from Tyers to Eyre
//!
//! ```
//! use tyers::{
//!     Error,
//!     compat::{IntoTyers, eyre06::IntoEyre},
//! };
//!
//! let err = Error::msg("connection refused");
//! let report: eyre::Report = err.clone().into_eyre();
//! assert_eq!(report.to_string(), "connection refused");
//! assert_eq!(report.into_tyers(), err);
//! ```
//!
//! The eyre handler hook must be installed before reports are created, as
//! usual for eyre; the examples rely on eyre's `auto-install` feature.

use core::fmt;

use super::IntoTyers;
use crate::Error;

/// Adapter that lets an [`eyre::Report`] be stored in an [`Error`].
///
/// Display, Debug and `source` are forwarded to the report.
pub struct EyreError(pub eyre::Report);

impl fmt::Display for EyreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for EyreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl core::error::Error for EyreError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.0.source()
    }
}

impl IntoTyers for eyre::Report {
    type Output = Error;

    fn into_tyers(self) -> Self::Output {
        // A handle below added context is not the outermost error.
        let outermost = self
            .chain()
            .next()
            .and_then(|top| top.downcast_ref::<Error>())
            .cloned();
        match outermost {
            Some(handle) => handle,
            None => Error::new(EyreError(self)),
        }
    }
}

impl<T> IntoTyers for eyre::Result<T> {
    type Output = Result<T, Error>;

    #[inline(always)]
    fn into_tyers(self) -> Self::Output {
        self.map_err(|e| e.into_tyers())
    }
}

/// A trait for converting tyers [`Error`]s into [`eyre::Report`]s.
///
/// # Examples
///
/// ```
/// use tyers::{Error, compat::eyre06::IntoEyre};
///
/// fn uses_tyers() -> tyers::Result<i32> {
///     Err(Error::msg("failed"))
/// }
///
/// fn uses_eyre() -> eyre::Result<i32> {
///     let value = uses_tyers().into_eyre()?;
///     Ok(value)
/// }
///
/// assert_eq!(uses_eyre().unwrap_err().to_string(), "failed");
/// ```
pub trait IntoEyre {
    /// The type produced by the conversion.
    ///
    /// - For [`Error`]: produces [`eyre::Report`]
    /// - For `Result<T, Error>`: produces [`eyre::Result<T>`]
    type Output;

    /// Converts this value into an eyre type.
    fn into_eyre(self) -> Self::Output;
}

impl IntoEyre for Error {
    type Output = eyre::Report;

    fn into_eyre(self) -> Self::Output {
        eyre::Report::new(self)
    }
}

impl<T> IntoEyre for Result<T, Error> {
    type Output = eyre::Result<T>;

    fn into_eyre(self) -> Self::Output {
        self.map_err(|e| e.into_eyre())
    }
}
