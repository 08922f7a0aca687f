use alloc::string::String;

use crate::{Arg, Error, IntoCategory, chain};

mod sealed {
    pub trait Sealed {}
    impl<A, E> Sealed for Result<A, E> {}
}

/// Extension methods for categorising and inspecting the error of a
/// [`Result`].
pub trait ResultExt<V, E>: sealed::Sealed {
    /// Assigns `category` to the error, keeping its message.
    ///
    /// Equivalent to `self.map_err(|e| tyers::as_typed(category, Error::new(e)))`.
    ///
    /// ```
    /// use tyers::{ResultExt, Sentinel};
    ///
    /// static BAD_REQUEST: Sentinel = Sentinel::new("bad request");
    ///
    /// let result = "eleven".parse::<u32>().typed(&BAD_REQUEST);
    /// let err = result.unwrap_err();
    /// assert_eq!(err.to_string(), "invalid digit found in string");
    /// assert!(err.is(&BAD_REQUEST));
    /// ```
    fn typed(self, category: impl IntoCategory) -> Result<V, Error>
    where
        E: core::error::Error + Send + Sync + 'static;

    /// Replaces the message of the error with `message(&error)` followed by
    /// `": "` and the original text, wrapping the original error as a cause
    /// and assigning `category`.
    ///
    /// The closure only runs when the result is an error.
    ///
    /// ```
    /// use tyers::{Error, ResultExt};
    ///
    /// let config = Error::msg("config error");
    /// let err = "x".parse::<u16>()
    ///     .typed_with(&config, |_| String::from("port must be a number"))
    ///     .unwrap_err();
    ///
    /// assert_eq!(err.to_string(), "port must be a number: invalid digit found in string");
    /// assert!(err.is(&config));
    /// ```
    fn typed_with<F>(self, category: impl IntoCategory, message: F) -> Result<V, Error>
    where
        E: core::error::Error + Send + Sync + 'static,
        F: FnOnce(&E) -> String;

    /// Returns `true` if the result is an error that is, or descends from,
    /// `target`.
    #[must_use]
    fn err_is(&self, target: &Error) -> bool
    where
        E: core::error::Error + 'static;
}

impl<V, E> ResultExt<V, E> for Result<V, E> {
    fn typed(self, category: impl IntoCategory) -> Result<V, Error>
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        self.map_err(|error| crate::as_typed(category, Error::new(error)))
    }

    fn typed_with<F>(self, category: impl IntoCategory, message: F) -> Result<V, Error>
    where
        E: core::error::Error + Send + Sync + 'static,
        F: FnOnce(&E) -> String,
    {
        self.map_err(|error| {
            let text = message(&error);
            crate::errorf(
                category,
                "{}: {}",
                [Arg::display(text), Arg::wrap(Error::new(error))],
            )
        })
    }

    fn err_is(&self, target: &Error) -> bool
    where
        E: core::error::Error + 'static,
    {
        match self {
            Ok(_) => false,
            Err(error) => chain::is(error, target),
        }
    }
}
