//! Interoperability with other error handling libraries.
//!
//! # Overview
//!
//! Categories are only useful if errors coming from elsewhere can take part
//! in them. This module converts foreign error values into [`Error`] handles
//! (so they can be given a category or used as one), and converts handles
//! back into the foreign types when calling code that expects them.
//!
//! Conversions in both directions keep the message and the `source` chain of
//! the converted error. When an error makes a round trip (a tyers [`Error`]
//! converted to a foreign type and back) the original handle, and with it
//! its identity, is recovered.
//!
//! # Available Integrations
//!
//! - [`boxed_error`]: `Box<dyn Error + Send + Sync>`, always available
//! - [`anyhow1`]: `anyhow` 1.x, behind the `compat-anyhow1` feature
//! - [`eyre06`]: `eyre` 0.6, behind the `compat-eyre06` feature
//!
//! [`Error`]: crate::Error

/// A trait for converting external error types into tyers [`Error`](crate::Error)s.
///
/// Implemented for foreign error values (producing an [`Error`](crate::Error)) and for
/// results carrying them (producing a `Result<T, Error>`).
///
/// # Examples
///
/// ```
/// use tyers::{Error, compat::IntoTyers};
///
/// let boxed: Box<dyn std::error::Error + Send + Sync> = "socket closed".into();
/// let err: Error = boxed.into_tyers();
/// assert_eq!(err.to_string(), "socket closed");
/// ```
pub trait IntoTyers {
    /// The type produced by the conversion.
    ///
    /// For error types, this is [`Error`](crate::Error). For `Result` types, this is
    /// `Result<T, Error>`.
    type Output;

    /// Converts this value into a tyers type.
    fn into_tyers(self) -> Self::Output;
}

pub mod boxed_error;

#[cfg(feature = "compat-anyhow1")]
#[cfg_attr(docsrs, doc(cfg(feature = "compat-anyhow1")))]
pub mod anyhow1;

#[cfg(feature = "compat-eyre06")]
#[cfg_attr(docsrs, doc(cfg(feature = "compat-eyre06")))]
pub mod eyre06;
