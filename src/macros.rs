/// Creates a typed error from a category, a template and arguments.
///
/// This is the macro form of [`errorf`](crate::errorf()). Every argument
/// after the template is turned into an [`Arg`](crate::Arg):
///
/// - `wrap(expr)` becomes [`Arg::wrap`](crate::Arg::wrap): the error is
///   rendered and registered as a cause;
/// - `debug(expr)` becomes [`Arg::debug`](crate::Arg::debug);
/// - any other expression becomes [`Arg::display`](crate::Arg::display).
///
/// The template syntax is described in the [`format`](crate::format) module.
///
/// # Examples
///
/// ```
/// use tyers::{Error, errorf};
///
/// let not_found = Error::msg("not found");
/// let inner = Error::msg("disk error");
///
/// let err = errorf!(&not_found, "read failed: {}", wrap(inner.clone()));
/// assert_eq!(err.to_string(), "read failed: disk error");
/// assert!(err.is(&not_found));
/// assert!(err.is(&inner));
///
/// let err = errorf!(&not_found, "no user {} in {}", "bob", debug(["admins"]));
/// assert_eq!(err.to_string(), "no user bob in [\"admins\"]");
/// ```
#[macro_export]
macro_rules! errorf {
    ($category:expr, $template:expr $(,)?) => {
        $crate::errorf($category, $template, $crate::__private::Vec::<$crate::Arg>::new())
    };
    ($category:expr, $template:expr, $($args:tt)+) => {
        $crate::errorf($category, $template, $crate::__errorf_args!([] $($args)+))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __errorf_args {
    ([$($done:expr,)*]) => {
        $crate::__private::vec![$($done),*]
    };
    ([$($done:expr,)*] wrap($arg:expr) $(, $($rest:tt)*)?) => {
        $crate::__errorf_args!([$($done,)* $crate::Arg::wrap($arg),] $($($rest)*)?)
    };
    ([$($done:expr,)*] debug($arg:expr) $(, $($rest:tt)*)?) => {
        $crate::__errorf_args!([$($done,)* $crate::Arg::debug(&$arg),] $($($rest)*)?)
    };
    ([$($done:expr,)*] $arg:expr $(, $($rest:tt)*)?) => {
        $crate::__errorf_args!([$($done,)* $crate::Arg::display(&$arg),] $($($rest)*)?)
    };
}

/// Returns early with a typed error.
///
/// Takes the same arguments as [`errorf!`] and is equivalent to
/// `return Err(errorf!(...).into())`.
///
/// # Examples
///
/// ```
/// use tyers::{Sentinel, bail};
///
/// static OUT_OF_RANGE: Sentinel = Sentinel::new("out of range");
///
/// fn percentage(value: i32) -> tyers::Result<u8> {
///     if !(0..=100).contains(&value) {
///         bail!(&OUT_OF_RANGE, "{} is not a percentage", value);
///     }
///     Ok(value as u8)
/// }
///
/// let err = percentage(140).unwrap_err();
/// assert_eq!(err.to_string(), "140 is not a percentage");
/// assert!(err.is(&OUT_OF_RANGE));
/// ```
#[macro_export]
macro_rules! bail {
    ($($args:tt)*) => {
        return $crate::__private::Err($crate::errorf!($($args)*).into())
    };
}
