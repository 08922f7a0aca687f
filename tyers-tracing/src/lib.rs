#![deny(
    missing_docs,
    unsafe_code,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]

//! Structured tracing events for tyers errors.
//!
//! The `tyers` crate never logs. This crate turns a typed error into a single
//! [`tracing`] event whose fields describe what the error says *and* what it
//! is, so log pipelines can filter on categories instead of parsing messages.
//!
//! # Quick Start
//!
//! ```
//! use tyers::Sentinel;
//! use tyers_tracing::TraceErrExt;
//!
//! static NOT_FOUND: Sentinel = Sentinel::new("not found");
//!
//! fn find_user(name: &str) -> tyers::Result<u64> {
//!     Err(tyers::new(&NOT_FOUND, format!("user '{name}' not found")))
//! }
//!
//! // Emits an ERROR event with
//! //   error.message  = user 'bob' not found
//! //   error.category = not found
//! let result = find_user("bob").trace_err();
//! assert!(result.is_err());
//! ```
//!
//! # Event Fields
//!
//! | Field              | Content                                           | Emitted        |
//! |--------------------|---------------------------------------------------|----------------|
//! | `error.message`    | the rendered error                                | always         |
//! | `error.category`   | the direct category                               | when present   |
//! | `error.categories` | the category ancestry, joined by ` > `            | `categories`   |
//! | `error.sources`    | the wrapped causes, joined by `: `                | `sources`      |
//!
//! # Environment Variables
//!
//! - `TYERS_TRACING` - Comma-separated options:
//!   - `categories` - Include the full category ancestry
//!   - `sources` - Include the chain of wrapped causes

use std::{fmt, sync::OnceLock};

use tracing::{Level, field};
use tyers::{Error, TypedError};

/// Which optional fields are attached to emitted events.
///
/// # Examples
///
/// ```
/// use tyers_tracing::TracingOptions;
///
/// let options = TracingOptions::parse("sources, CATEGORIES");
/// assert!(options.categories);
/// assert!(options.sources);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TracingOptions {
    /// Attach `error.categories`, the full category ancestry.
    pub categories: bool,
    /// Attach `error.sources`, the chain of wrapped causes.
    pub sources: bool,
}

impl TracingOptions {
    /// Parses a comma-separated option list. Unknown options are ignored.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let mut options = Self::default();
        for option in value.split(',').map(str::trim) {
            if option.eq_ignore_ascii_case("categories") {
                options.categories = true;
            } else if option.eq_ignore_ascii_case("sources") {
                options.sources = true;
            }
        }
        options
    }

    /// The options configured through the `TYERS_TRACING` environment
    /// variable. The variable is read once per process.
    pub fn from_env() -> Self {
        static TYERS_TRACING_FLAGS: OnceLock<TracingOptions> = OnceLock::new();

        *TYERS_TRACING_FLAGS.get_or_init(|| {
            std::env::var_os("TYERS_TRACING")
                .map(|var| Self::parse(&var.to_string_lossy()))
                .unwrap_or_default()
        })
    }
}

/// Renders the category ancestry of an error, nearest category first.
///
/// ```
/// use tyers::Error;
/// use tyers_tracing::CategoryPath;
///
/// let storage = Error::msg("storage");
/// let missing = tyers::new(&storage, "missing");
/// let err = tyers::new(&missing, "object 12 is missing");
///
/// assert_eq!(CategoryPath(&err).to_string(), "missing > storage");
/// ```
#[derive(Copy, Clone, Debug)]
pub struct CategoryPath<'a>(pub &'a Error);

impl fmt::Display for CategoryPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, category) in self.0.categories().enumerate() {
            if index > 0 {
                f.write_str(" > ")?;
            }
            write!(f, "{category}")?;
        }
        Ok(())
    }
}

/// Renders the causes wrapped by an error, outermost first.
///
/// The error itself and the typed-error layers (which render the same text
/// as their content) are skipped.
///
/// ```
/// use tyers::{Error, errorf};
/// use tyers_tracing::SourceChain;
///
/// let disk = Error::msg("disk full");
/// let write = errorf!(None, "write failed: {}", wrap(disk));
/// let err = errorf!(None, "save failed: {}", wrap(write));
///
/// assert_eq!(
///     SourceChain(&err).to_string(),
///     "write failed: disk full: disk full"
/// );
/// ```
#[derive(Copy, Clone, Debug)]
pub struct SourceChain<'a>(pub &'a Error);

impl fmt::Display for SourceChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sources = self
            .0
            .chain()
            .filter(|e| e.downcast_ref::<TypedError>().is_none())
            .skip(1);
        for (index, source) in sources.enumerate() {
            if index > 0 {
                f.write_str(": ")?;
            }
            write!(f, "{source}")?;
        }
        Ok(())
    }
}

macro_rules! emit {
    ($level:expr, $($fields:tt)*) => {
        match $level {
            Level::ERROR => tracing::event!(Level::ERROR, $($fields)*),
            Level::WARN => tracing::event!(Level::WARN, $($fields)*),
            Level::INFO => tracing::event!(Level::INFO, $($fields)*),
            Level::DEBUG => tracing::event!(Level::DEBUG, $($fields)*),
            _ => tracing::event!(Level::TRACE, $($fields)*),
        }
    };
}

/// Emits one event at `level` describing `error`, using `options` to decide
/// on the optional fields.
pub fn record(error: &Error, level: Level, options: TracingOptions) {
    let category = error.category().map(field::display);
    let categories = options
        .categories
        .then(|| field::display(CategoryPath(error)));
    let sources = options.sources.then(|| field::display(SourceChain(error)));

    emit!(
        level,
        error.message = %error,
        error.category = category,
        error.categories = categories,
        error.sources = sources,
    );
}

/// Extension trait for emitting tracing events from failed results.
///
/// Both methods return the result unchanged; an event is emitted only for
/// `Err`. Optional fields follow [`TracingOptions::from_env`].
pub trait TraceErrExt: Sized {
    /// Emits an `ERROR` event if this is an error.
    fn trace_err(self) -> Self {
        self.trace_err_at(Level::ERROR)
    }

    /// Emits an event at `level` if this is an error.
    fn trace_err_at(self, level: Level) -> Self;
}

impl<V> TraceErrExt for Result<V, Error> {
    fn trace_err_at(self, level: Level) -> Self {
        if let Err(error) = &self {
            record(error, level, TracingOptions::from_env());
        }
        self
    }
}

impl TraceErrExt for Error {
    fn trace_err_at(self, level: Level) -> Self {
        record(&self, level, TracingOptions::from_env());
        self
    }
}
