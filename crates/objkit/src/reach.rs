//! Path lookup into nested values.
//!
//! A path is split on the configured separator and walked one segment at a
//! time. Traversal stops at the first segment that cannot be resolved; what
//! happens then depends on [`ReachOptions`].
//!
//! # Negative indices
//!
//! On arrays, a segment starting with `-` counts from the end using
//! `len - N`. With `[4, 8, 9, 1]`, `-2` resolves to index 2 (`9`) and `-1`
//! to index 3 (`1`). Out-of-range results simply fail to resolve.

use std::borrow::Cow;

use tracing::{debug, trace};

use objkit_types::{Key, Value};

use crate::ensure;
use crate::error::ObjkitResult;
use crate::options::ReachOptions;

/// Resolve `path` against `source`.
///
/// With no path the whole `source` is returned. Stored values are borrowed;
/// computed properties such as an array's `length` come back owned.
///
/// Unresolvable paths return `options.default_value` unless strict mode or
/// the callable policy turns the miss into an error:
///
/// - `Missing segment <key> in reach path  <path>` when `strict` is set and
///   the unresolved segment is not the last one.
/// - `Invalid segment <key> in reach path  <path>` when traversal stopped on
///   a callable and `functions` is not `Some(true)`.
///
/// ```
/// use objkit::{reach, ReachOptions};
/// use objkit_types::Value;
/// use serde_json::json;
///
/// let obj = Value::from(json!({"a": {"b": [4, 8, 9, 1]}}));
/// let options = ReachOptions::default();
/// assert_eq!(*reach(&obj, Some("a.b.0"), &options).unwrap(), Value::from(4));
/// assert_eq!(*reach(&obj, Some("a.b.-2"), &options).unwrap(), Value::from(9));
/// assert_eq!(*reach(&obj, Some("a.b.length"), &options).unwrap(), Value::from(4));
/// assert!(reach(&obj, Some("a.x"), &options).unwrap().is_undefined());
/// ```
pub fn reach<'a>(
    source: &'a Value,
    path: Option<&str>,
    options: &'a ReachOptions,
) -> ObjkitResult<Cow<'a, Value>> {
    let Some(path) = path else {
        return Ok(Cow::Borrowed(source));
    };

    let segments: Vec<&str> = path.split(options.separator()).collect();
    let mut current = Cow::Borrowed(source);

    for (i, segment) in segments.iter().enumerate() {
        let key = match current.as_ref() {
            Value::Array(items) if segment.starts_with('-') => Key::from_end(items.len(), segment),
            _ => Key::from(*segment),
        };

        let is_callable = matches!(current.as_ref(), Value::Callable(_));
        let next = if is_callable && options.functions == Some(false) {
            None
        } else {
            lookup(&current, &key)
        };

        match next {
            Some(value) => {
                trace!(%key, path, "segment resolved");
                current = value;
            }
            None => {
                let is_last = i + 1 == segments.len();
                ensure!(
                    !options.strict || is_last,
                    "Missing segment",
                    key.to_string(),
                    "in reach path ",
                    path
                )?;
                ensure!(
                    !is_callable || options.functions == Some(true),
                    "Invalid segment",
                    key.to_string(),
                    "in reach path ",
                    path
                )?;
                debug!(%key, path, "segment unresolved, using default");
                return Ok(Cow::Borrowed(&options.default_value));
            }
        }
    }

    Ok(current)
}

/// Read `key` off the current value, keeping borrows tied to the source.
fn lookup<'a>(current: &Cow<'a, Value>, key: &Key) -> Option<Cow<'a, Value>> {
    match current {
        Cow::Borrowed(value) => (*value).property(key),
        Cow::Owned(value) => value.property(key).map(|found| Cow::Owned(found.into_owned())),
    }
}

/// Owned lookup using only a custom separator (the bare-string options
/// shorthand).
pub fn reach_with_separator(
    source: &Value,
    path: Option<&str>,
    separator: &str,
) -> ObjkitResult<Value> {
    let options = ReachOptions::from(separator);
    reach(source, path, &options).map(Cow::into_owned)
}
