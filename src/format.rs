//! Formatted messages that wrap other errors.
//!
//! # Overview
//!
//! [`errorf`](crate::errorf) builds its content value from a template and a
//! list of [`Arg`]s. Each argument is either rendered into the message
//! ([`Arg::display`], [`Arg::debug`]) or rendered *and* remembered as a cause
//! ([`Arg::wrap`]). Wrapped causes stay reachable from the resulting
//! [`Formatted`] error, so [`Error::is`](crate::Error::is) finds them and
//! anything they wrap in turn.
//!
//! # Template syntax
//!
//! Templates use the brace syntax of [`format!`](alloc::format):
//!
//! | Placeholder | Meaning                                  |
//! |-------------|------------------------------------------|
//! | `{}`        | the next argument                        |
//! | `{N}`       | the argument at position `N`             |
//! | `{{`, `}}`  | a literal `{` or `}`                     |
//!
//! As with `format!`, `{}` counts only the implicit placeholders before it,
//! so `"{1} {} {}"` renders arguments 1, 0 and 1.
//!
//! Mistakes in the template never fail construction. They show up in the
//! rendered text instead:
//!
//! - a placeholder without a matching argument renders as `{!missing}`;
//! - arguments that no placeholder refers to are appended as
//!   `{!extra: a, b}` and are not registered as causes;
//! - anything else between braces (`{name}`, `{:?}`) and unmatched braces are
//!   copied to the output unchanged.
//!
//! ```
//! use tyers::{Arg, Error, Formatted};
//!
//! let cause = Error::msg("disk full");
//! let formatted = Formatted::new(
//!     "write {} failed: {}",
//!     [Arg::debug("a.txt"), Arg::wrap(cause.clone())],
//! );
//! assert_eq!(formatted.to_string(), "write \"a.txt\" failed: disk full");
//! assert_eq!(formatted.causes(), [cause]);
//! ```

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use crate::Error;

/// A single argument of a formatted message.
#[derive(Clone, Debug)]
pub enum Arg {
    /// Text substituted verbatim.
    Text(String),
    /// An error whose text is substituted and which is registered as a cause.
    Wrap(Error),
}

impl Arg {
    /// Renders `value` with its [`Display`](fmt::Display) implementation.
    #[must_use]
    pub fn display(value: impl fmt::Display) -> Self {
        Arg::Text(value.to_string())
    }

    /// Renders `value` with its [`Debug`](fmt::Debug) implementation.
    #[must_use]
    pub fn debug(value: impl fmt::Debug) -> Self {
        Arg::Text(format!("{value:?}"))
    }

    /// Renders `error` and registers it as a cause of the message.
    #[must_use]
    pub fn wrap(error: impl Into<Error>) -> Self {
        Arg::Wrap(error.into())
    }
}

/// One step of a compiled template.
#[derive(Debug, PartialEq, Eq)]
enum Step<'a> {
    Literal(&'a str),
    Argument(usize),
}

/// Parses an explicit position such as the `1` in `{1}`. Only plain ASCII
/// digits are accepted.
fn argument_index(body: &str) -> Option<usize> {
    if !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    body.parse().ok()
}

/// Splits `template` into literal segments and argument references.
fn plan(template: &str) -> Vec<Step<'_>> {
    let mut steps = Vec::new();
    let mut next_implicit = 0;
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        if pos > 0 {
            steps.push(Step::Literal(&rest[..pos]));
        }
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            steps.push(Step::Literal("{"));
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            steps.push(Step::Literal("}"));
            rest = &tail[2..];
        } else if tail.starts_with('}') {
            steps.push(Step::Literal("}"));
            rest = &tail[1..];
        } else if let Some(end) = tail.find('}') {
            let body = &tail[1..end];
            if body.is_empty() {
                steps.push(Step::Argument(next_implicit));
                next_implicit += 1;
            } else if let Some(index) = argument_index(body) {
                steps.push(Step::Argument(index));
            } else {
                steps.push(Step::Literal(&tail[..=end]));
            }
            rest = &tail[end + 1..];
        } else {
            steps.push(Step::Literal(tail));
            rest = "";
        }
    }

    if !rest.is_empty() {
        steps.push(Step::Literal(rest));
    }
    steps
}

/// The content value produced by [`errorf`](crate::errorf): a rendered
/// message plus the errors it wraps.
#[derive(Clone)]
pub struct Formatted {
    message: String,
    causes: Vec<Error>,
}

impl Formatted {
    /// Renders `template` with `args`, registering every substituted
    /// [`Arg::Wrap`] as a cause.
    #[must_use]
    pub fn new(template: &str, args: impl IntoIterator<Item = Arg>) -> Self {
        let args: Vec<Arg> = args.into_iter().collect();
        let mut used = alloc::vec![false; args.len()];
        let mut message = String::with_capacity(template.len());
        let mut causes = Vec::new();

        for step in plan(template) {
            match step {
                Step::Literal(text) => message.push_str(text),
                Step::Argument(index) => match args.get(index) {
                    Some(Arg::Text(text)) => {
                        message.push_str(text);
                        used[index] = true;
                    }
                    Some(Arg::Wrap(error)) => {
                        message.push_str(&error.to_string());
                        if !used[index] {
                            causes.push(error.clone());
                        }
                        used[index] = true;
                    }
                    None => message.push_str("{!missing}"),
                },
            }
        }

        let extra: Vec<String> = args
            .iter()
            .zip(&used)
            .filter(|(_, used)| !**used)
            .map(|(arg, _)| match arg {
                Arg::Text(text) => text.clone(),
                Arg::Wrap(error) => error.to_string(),
            })
            .collect();
        if !extra.is_empty() {
            message.push_str("{!extra: ");
            message.push_str(&extra.join(", "));
            message.push('}');
        }

        Self { message, causes }
    }

    /// The rendered message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped causes, in the order they first appear in the template.
    #[must_use]
    pub fn causes(&self) -> &[Error] {
        &self.causes
    }
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatted")
            .field("message", &self.message)
            .field("causes", &self.causes)
            .finish()
    }
}

impl core::error::Error for Formatted {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.causes.first().map(Error::as_dyn)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, string::ToString, vec};

    use super::*;

    fn render<const N: usize>(template: &str, args: [Arg; N]) -> String {
        Formatted::new(template, args).to_string()
    }

    #[test]
    fn test_plan_steps() {
        assert_eq!(
            plan("a{}b{1}{{c}}"),
            vec![
                Step::Literal("a"),
                Step::Argument(0),
                Step::Literal("b"),
                Step::Argument(1),
                Step::Literal("{"),
                Step::Literal("c"),
                Step::Literal("}"),
            ]
        );
        assert!(plan("").is_empty());
    }

    #[test]
    fn test_matches_format_macro() {
        assert_eq!(
            render("{} {} {}", [Arg::display("string"), Arg::display(10), Arg::debug(Some(true))]),
            format!("{} {} {:?}", "string", 10, Some(true)),
        );
        assert_eq!(
            render("{1} {} {0} {}", [Arg::display('x'), Arg::display('y')]),
            format!("{1} {} {0} {}", 'x', 'y'),
        );
        assert_eq!(render("{{literal}}", []), format!("{{literal}}"));
    }

    #[test]
    fn test_missing_and_extra_arguments() {
        assert_eq!(render("a={} b={}", [Arg::display(1)]), "a=1 b={!missing}");
        assert_eq!(
            render("only {}", [Arg::display(1), Arg::display(2), Arg::display("three")]),
            "only 1{!extra: 2, three}"
        );
    }

    #[test]
    fn test_unsupported_placeholders_are_verbatim() {
        assert_eq!(render("{name} {:?}", [Arg::display(1)]), "{name} {:?}{!extra: 1}");
        assert_eq!(render("open { brace", []), "open { brace");
        assert_eq!(render("close } brace", []), "close } brace");
        assert_eq!(render("{+0}", [Arg::display(1)]), "{+0}{!extra: 1}");
        assert_eq!(render("{ 0}", [Arg::display(1)]), "{ 0}{!extra: 1}");
    }

    #[test]
    fn test_wrap_registers_causes_once() {
        let cause = Error::msg("cause");
        let formatted = Formatted::new("{0}/{0}", [Arg::wrap(cause.clone())]);
        assert_eq!(formatted.message(), "cause/cause");
        assert_eq!(formatted.causes(), [cause.clone()]);
        assert!(
            core::error::Error::source(&formatted)
                .is_some_and(|source| cause.is_identical_to(source))
        );
    }

    #[test]
    fn test_unused_wrap_is_not_a_cause() {
        let cause = Error::msg("cause");
        let formatted = Formatted::new("nothing here", [Arg::wrap(cause)]);
        assert_eq!(formatted.message(), "nothing here{!extra: cause}");
        assert!(formatted.causes().is_empty());
        assert!(core::error::Error::source(&formatted).is_none());
    }

    #[test]
    fn test_unicode_literals_are_preserved() {
        assert_eq!(render("héllo {} wörld", [Arg::display("ü")]), "héllo ü wörld");
    }

    #[test]
    fn test_debug_lists_causes() {
        let formatted = Formatted::new("x {}", [Arg::wrap(Error::msg("y"))]);
        assert_eq!(
            format!("{formatted:?}"),
            "Formatted { message: \"x y\", causes: [\"y\"] }"
        );
        assert_eq!(formatted.to_string(), "x y");
    }
}
