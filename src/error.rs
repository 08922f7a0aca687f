use alloc::borrow::Cow;
use core::{
    any::Any,
    fmt,
    hash::{Hash, Hasher},
};

use triomphe::Arc;
use unsize::CoerceUnsize;

use crate::{
    chain::{self, Categories, Causes, Chain},
    typed::{IntoCategory, TypedError},
};

/// Object-safe view of a thread-safe error value.
///
/// Every `core::error::Error + Send + Sync + 'static` implements this, so
/// [`Error`] can store any of them behind a single trait object and still
/// hand out a plain `&dyn core::error::Error`.
pub(crate) trait DynError: core::error::Error + Send + Sync + 'static {
    fn as_error(&self) -> &(dyn core::error::Error + 'static);
}

impl<E> DynError for E
where
    E: core::error::Error + Send + Sync + 'static,
{
    fn as_error(&self) -> &(dyn core::error::Error + 'static) {
        self
    }
}

/// A shared, immutable handle to an error value.
///
/// `Error` is the value type everything in this crate is built from:
/// categories, content values, wrapped causes and the typed errors
/// themselves are all carried as handles. Cloning a handle is cheap (a
/// reference count increment) and every clone refers to the same error.
///
/// # Identity
///
/// Handles compare by identity. Two handles are equal when they refer to the
/// same allocation, regardless of the text they render:
///
/// ```
/// use tyers::Error;
///
/// let a = Error::msg("not found");
/// let b = Error::msg("not found");
/// assert_eq!(a, a.clone());
/// assert_ne!(a, b);
/// ```
///
/// This is what makes an `Error` usable as a category marker: the sentinel
/// is recognised wherever it is referenced, and nothing else is mistaken for
/// it.
#[derive(Clone)]
pub struct Error {
    inner: Arc<dyn DynError>,
}

/// Plain message error returned by [`Error::msg`].
struct Message(Cow<'static, str>);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl core::error::Error for Message {}

impl Error {
    /// Creates a new error whose text is exactly `text` and which wraps
    /// nothing.
    ///
    /// Each call creates a new identity, so this is the usual way of
    /// declaring a category:
    ///
    /// ```
    /// use tyers::Error;
    ///
    /// let invalid_input = Error::msg("invalid input");
    /// assert_eq!(invalid_input.to_string(), "invalid input");
    /// assert!(invalid_input.is(&invalid_input));
    /// ```
    #[must_use]
    pub fn msg(text: impl Into<Cow<'static, str>>) -> Self {
        Self::from_value(Message(text.into()))
    }

    /// Wraps an existing error value in a handle.
    ///
    /// If `error` already is an [`Error`] the handle is returned as-is, so
    /// adopting a handle twice never changes its identity.
    ///
    /// ```
    /// use tyers::Error;
    ///
    /// #[derive(Debug, thiserror::Error)]
    /// #[error("connection reset")]
    /// struct ConnectionReset;
    ///
    /// let err = Error::new(ConnectionReset);
    /// assert!(err.downcast_ref::<ConnectionReset>().is_some());
    ///
    /// let again = Error::new(err.clone());
    /// assert_eq!(again, err);
    /// ```
    #[must_use]
    pub fn new<E>(error: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        if let Some(handle) = (&error as &dyn Any).downcast_ref::<Error>() {
            return handle.clone();
        }
        Self::from_value(error)
    }

    pub(crate) fn from_value<E>(error: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        let inner = Arc::new(error).unsize(unsize::Coercion!(to dyn DynError));
        Self { inner }
    }

    /// Returns a typed error with `category` whose content is this handle.
    ///
    /// Method form of [`as_typed`](crate::as_typed).
    #[must_use]
    pub fn with_category(self, category: impl IntoCategory) -> Self {
        crate::as_typed(category, self)
    }

    /// Reports whether this error is, or descends from, `target`.
    ///
    /// See [`chain::is`] for the exact rules.
    ///
    /// ```
    /// use tyers::Error;
    ///
    /// let io = Error::msg("i/o failure");
    /// let read = tyers::new(&io, "could not read config.toml");
    /// let load = tyers::as_typed(None, read.clone());
    ///
    /// assert!(load.is(&read));
    /// assert!(load.is(&io));
    /// assert!(!io.is(&read));
    /// ```
    #[must_use]
    pub fn is(&self, target: &Error) -> bool {
        chain::is(self.as_dyn(), target)
    }

    /// Returns `true` when both handles refer to the same error.
    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        other.is_identical_to(this.as_dyn())
    }

    /// Returns `true` when `error` is the value this handle refers to.
    pub(crate) fn is_identical_to(&self, error: &(dyn core::error::Error + 'static)) -> bool {
        let ours: *const dyn DynError = &*self.inner;
        let theirs: *const dyn core::error::Error = error;
        core::ptr::addr_eq(ours, theirs)
    }

    /// Borrows the wrapped value as a plain error trait object.
    #[must_use]
    pub fn as_dyn(&self) -> &(dyn core::error::Error + 'static) {
        self.inner.as_error()
    }

    /// Returns a reference to the wrapped value if it is of type `E`.
    #[must_use]
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: core::error::Error + 'static,
    {
        self.as_dyn().downcast_ref::<E>()
    }

    /// Returns the typed error this handle refers to, if any.
    #[must_use]
    pub fn as_typed_error(&self) -> Option<&TypedError> {
        self.downcast_ref::<TypedError>()
    }

    /// Returns the category of this error, if it is a typed error with one.
    ///
    /// ```
    /// use tyers::Error;
    ///
    /// let not_found = Error::msg("not found");
    /// let err = tyers::new(&not_found, "no such key: 42");
    /// assert_eq!(err.category(), Some(&not_found));
    /// assert_eq!(not_found.category(), None);
    /// ```
    #[must_use]
    pub fn category(&self) -> Option<&Error> {
        self.as_typed_error().and_then(TypedError::category)
    }

    /// Iterates over the category ancestry of this error: its category, the
    /// category's category, and so on.
    ///
    /// ```
    /// use tyers::Error;
    ///
    /// let storage = Error::msg("storage error");
    /// let missing = tyers::new(&storage, "missing object");
    /// let err = tyers::new(&missing, "object 7f3a is missing");
    ///
    /// let texts: Vec<String> = err.categories().map(|c| c.to_string()).collect();
    /// assert_eq!(texts, ["missing object", "storage error"]);
    /// ```
    pub fn categories(&self) -> Categories<'_> {
        Categories::new(self.category())
    }

    /// Iterates over the direct causes of this error.
    ///
    /// A typed error has exactly one cause, its content. A formatted error
    /// has one cause per wrapped argument. Any other error has at most the
    /// one returned by [`source`](core::error::Error::source).
    pub fn causes(&self) -> Causes<'_> {
        Causes::of(self.as_dyn())
    }

    /// Iterates depth-first over this error and everything it transitively
    /// wraps. Categories are not part of the chain.
    ///
    /// ```
    /// use tyers::{Error, errorf};
    ///
    /// let timeout = Error::msg("timed out");
    /// let err = errorf!(None, "fetch failed: {}", wrap(timeout.clone()));
    ///
    /// let texts: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    /// assert_eq!(texts, ["fetch failed: timed out", "fetch failed: timed out", "timed out"]);
    /// ```
    pub fn chain(&self) -> Chain<'_> {
        Chain::new(self.as_dyn())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_dyn(), f)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_dyn(), f)
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.as_dyn().source()
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        Error::ptr_eq(self, other)
    }
}

impl Eq for Error {}

impl Hash for Error {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let ptr: *const dyn DynError = &*self.inner;
        ptr.cast::<()>().hash(state);
    }
}

impl From<&'static str> for Error {
    fn from(text: &'static str) -> Self {
        Error::msg(text)
    }
}

impl From<alloc::string::String> for Error {
    fn from(text: alloc::string::String) -> Self {
        Error::msg(text)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{collections::BTreeSet, format, string::ToString};

    use super::*;

    #[test]
    fn test_error_send_sync() {
        static_assertions::assert_impl_all!(Error: Send, Sync, Clone);
        static_assertions::assert_not_impl_any!(Error: Copy);
    }

    #[test]
    fn test_identity_equality() {
        let a = Error::msg("same text");
        let b = Error::msg("same text");
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert!(Error::ptr_eq(&a, &a.clone()));
        assert!(!Error::ptr_eq(&a, &b));
    }

    #[test]
    fn test_zero_sized_errors_have_distinct_identities() {
        #[derive(Debug)]
        struct Unit;
        impl fmt::Display for Unit {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("unit")
            }
        }
        impl core::error::Error for Unit {}

        let a = Error::new(Unit);
        let b = Error::new(Unit);
        assert_ne!(a, b);
        assert!(a.is(&a));
        assert!(!a.is(&b));
    }

    #[test]
    fn test_new_does_not_rewrap_handles() {
        let a = Error::msg("inner");
        let b = Error::new(a.clone());
        assert_eq!(a, b);
        assert!(b.downcast_ref::<Error>().is_none());
    }

    #[test]
    fn test_message_formatting() {
        let err = Error::msg("plain text");
        assert_eq!(err.to_string(), "plain text");
        assert_eq!(format!("{err:?}"), "\"plain text\"");
        assert!(core::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_hash_follows_identity() {
        let a = Error::msg("a");
        let b = Error::msg("a");
        let mut seen = BTreeSet::new();
        for err in [&a, &a.clone(), &b] {
            let mut hasher = Fnv(0);
            err.hash(&mut hasher);
            seen.insert(hasher.finish());
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_from_string_types() {
        let err: Error = "static".into();
        assert_eq!(err.to_string(), "static");
        let err: Error = "owned".to_string().into();
        assert_eq!(err.to_string(), "owned");
    }

    /// Minimal hasher so the test runs without `std`.
    struct Fnv(u64);

    impl Hasher for Fnv {
        fn finish(&self) -> u64 {
            self.0
        }

        fn write(&mut self, bytes: &[u8]) {
            for byte in bytes {
                self.0 = (self.0 ^ u64::from(*byte)).wrapping_mul(0x100_0000_01b3);
            }
        }
    }
}
