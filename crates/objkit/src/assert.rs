//! Assertions with composable messages.
//!
//! [`assert`] checks a condition and, when it is false, builds an error from
//! a list of message [`Part`]s. The [`ensure!`](crate::ensure) macro accepts
//! the parts as plain arguments.

use objkit_types::Value;

use crate::error::{ObjkitError, ObjkitResult};
use crate::stringify::stringify;

/// Message used when a failed assertion has nothing to say.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// One piece of an assertion message.
#[derive(Clone, Debug)]
pub enum Part {
    /// Used verbatim. The empty string is a placeholder and is skipped.
    Text(String),
    /// Contributes its message; passed through as-is when it is the only
    /// part.
    Error(ObjkitError),
    /// Encoded with [`stringify`], except strings which are used verbatim.
    Value(Value),
}

impl Part {
    fn is_placeholder(&self) -> bool {
        match self {
            Part::Text(s) | Part::Value(Value::String(s)) => s.is_empty(),
            _ => false,
        }
    }

    fn render(&self) -> String {
        match self {
            Part::Text(s) | Part::Value(Value::String(s)) => s.clone(),
            Part::Error(e) => e.message(),
            // No encoding exists for these; they join as empty text.
            Part::Value(Value::Undefined | Value::Callable(_)) => String::new(),
            Part::Value(v) => stringify(v),
        }
    }
}

/// Fail with a composed error unless `condition` holds.
///
/// - A single [`Part::Error`] is returned unchanged, preserving its
///   identity.
/// - Otherwise the non-empty parts are rendered and joined with one space.
/// - With nothing to join, the message is `"Unknown error"`.
///
/// ```
/// use objkit::{assert, Part};
///
/// let err = assert(false, [Part::from("This"), Part::from(""), Part::from("fails")]).unwrap_err();
/// assert_eq!(err.to_string(), "This fails");
/// assert!(assert(true, Vec::<Part>::new()).is_ok());
/// ```
pub fn assert<I>(condition: bool, parts: I) -> ObjkitResult<()>
where
    I: IntoIterator<Item = Part>,
{
    if condition {
        return Ok(());
    }

    let mut parts: Vec<Part> = parts.into_iter().collect();
    if parts.len() == 1 && matches!(parts[0], Part::Error(_)) {
        if let Some(Part::Error(err)) = parts.pop() {
            return Err(err);
        }
    }

    let message = parts
        .iter()
        .filter(|part| !part.is_placeholder())
        .map(Part::render)
        .collect::<Vec<_>>()
        .join(" ");

    if message.is_empty() {
        Err(ObjkitError::assertion(UNKNOWN_ERROR))
    } else {
        Err(ObjkitError::assertion(message))
    }
}

/// Check a condition, composing the failure message from any number of
/// arguments convertible into [`Part`].
///
/// Evaluates to `ObjkitResult<()>`.
///
/// ```
/// use objkit::ensure;
///
/// fn check(port: i64) -> objkit::ObjkitResult<()> {
///     ensure!(port > 0, "invalid port", port)?;
///     Ok(())
/// }
///
/// assert!(check(8080).is_ok());
/// assert_eq!(check(-1).unwrap_err().to_string(), "invalid port -1");
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr $(, $part:expr)* $(,)?) => {{
        let parts: ::std::vec::Vec<$crate::Part> = ::std::vec![$($crate::Part::from($part)),*];
        $crate::assert($cond, parts)
    }};
}

impl From<&str> for Part {
    fn from(s: &str) -> Self {
        Part::Text(s.to_string())
    }
}

impl From<String> for Part {
    fn from(s: String) -> Self {
        Part::Text(s)
    }
}

impl From<&String> for Part {
    fn from(s: &String) -> Self {
        Part::Text(s.clone())
    }
}

impl From<ObjkitError> for Part {
    fn from(err: ObjkitError) -> Self {
        Part::Error(err)
    }
}

impl From<Value> for Part {
    fn from(value: Value) -> Self {
        Part::Value(value)
    }
}

impl From<&Value> for Part {
    fn from(value: &Value) -> Self {
        Part::Value(value.clone())
    }
}

impl From<serde_json::Value> for Part {
    fn from(json: serde_json::Value) -> Self {
        Part::Value(json.into())
    }
}

impl From<bool> for Part {
    fn from(b: bool) -> Self {
        Part::Value(b.into())
    }
}

impl From<i32> for Part {
    fn from(n: i32) -> Self {
        Part::Value(n.into())
    }
}

impl From<i64> for Part {
    fn from(n: i64) -> Self {
        Part::Value(n.into())
    }
}

impl From<f64> for Part {
    fn from(n: f64) -> Self {
        Part::Value(n.into())
    }
}
