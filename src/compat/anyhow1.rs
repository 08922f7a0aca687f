//! Bidirectional integration with the [`anyhow`] 1.x error handling library.
//!
//! This module specifically supports `anyhow` version 1.x. To enable this
//! integration, add the `compat-anyhow1` feature flag to your `Cargo.toml`.
//!
//! # Converting from Anyhow to Tyers
//!
//! Use the [`IntoTyers`] trait to adopt anyhow errors, for instance to give
//! them a category:
//!
//! ```
//! use tyers::{Error, compat::IntoTyers};
//!
//! fn anyhow_function() -> anyhow::Result<String> {
//!     anyhow::bail!("something went wrong");
//! }
//!
//! let unavailable = Error::msg("unavailable");
//! let err = anyhow_function()
//!     .into_tyers()
//!     .map_err(|e| e.with_category(&unavailable))
//!     .unwrap_err();
//!
//! assert_eq!(err.to_string(), "something went wrong");
//! assert!(err.is(&unavailable));
//! ```
//!
//! # Converting from Tyers to Anyhow
//!
//! [`Error`] implements [`core::error::Error`], so `?` converts it into an
//! [`anyhow::Error`] directly. [`IntoAnyhow`] makes the conversion explicit.
//! Converting back recovers the original handle:
//!
//! ```
//! use tyers::{
//!     Error,
//!     compat::{IntoTyers, anyhow1::IntoAnyhow},
//! };
//!
//! let not_found = Error::msg("not found");
//! let err = tyers::new(&not_found, "no such row");
//!
//! let anyhow_err: anyhow::Error = err.clone().into_anyhow();
//! assert_eq!(anyhow_err.to_string(), "no such row");
//!
//! let back = anyhow_err.into_tyers();
//! assert_eq!(back, err);
//! assert!(back.is(&not_found));
//! ```

use core::fmt;

use super::IntoTyers;
use crate::Error;

/// Adapter that lets an [`anyhow::Error`] be stored in an [`Error`].
///
/// Display, Debug and `source` are forwarded to the anyhow error, so the
/// adopted error renders exactly as it would in pure anyhow code and its
/// context chain stays walkable.
pub struct AnyhowError(pub anyhow::Error);

impl fmt::Display for AnyhowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for AnyhowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl core::error::Error for AnyhowError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.0.source()
    }
}

impl IntoTyers for anyhow::Error {
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
            None => Error::new(AnyhowError(self)),
        }
    }
}

impl<T> IntoTyers for anyhow::Result<T> {
    type Output = Result<T, Error>;

    #[inline(always)]
    fn into_tyers(self) -> Self::Output {
        self.map_err(|e| e.into_tyers())
    }
}

/// A trait for converting tyers [`Error`]s into [`anyhow::Error`].
///
/// # Examples
///
/// ```
/// use tyers::{Error, compat::anyhow1::IntoAnyhow};
///
/// fn uses_tyers() -> tyers::Result<i32> {
///     Err(Error::msg("failed"))
/// }
///
/// fn uses_anyhow() -> anyhow::Result<i32> {
///     let value = uses_tyers().into_anyhow()?;
///     Ok(value)
/// }
///
/// assert_eq!(uses_anyhow().unwrap_err().to_string(), "failed");
/// ```
pub trait IntoAnyhow {
    /// The type produced by the conversion.
    ///
    /// - For [`Error`]: produces [`anyhow::Error`]
    /// - For `Result<T, Error>`: produces [`anyhow::Result<T>`]
    type Output;

    /// Converts this value into an anyhow type.
    fn into_anyhow(self) -> Self::Output;
}

impl IntoAnyhow for Error {
    type Output = anyhow::Error;

    fn into_anyhow(self) -> Self::Output {
        anyhow::Error::new(self)
    }
}

impl<T> IntoAnyhow for Result<T, Error> {
    type Output = anyhow::Result<T>;

    fn into_anyhow(self) -> Self::Output {
        self.map_err(|e| e.into_anyhow())
    }
}
