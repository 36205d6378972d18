//! Reshape values by mapping destination paths to source paths.
//!
//! A schema is an [`Object`] whose keys are `.`-delimited destination paths
//! and whose values are source paths resolved with [`reach`]. The result is
//! always freshly built; the source is only read.

use tracing::debug;

use objkit_types::{Key, Object, Value};

use crate::ensure;
use crate::error::{ObjkitError, ObjkitResult};
use crate::options::ReachOptions;
use crate::reach::reach;
use crate::stringify::stringify;

/// Raised when the source is not null, undefined, an object, or an array.
pub const INVALID_SOURCE: &str =
    "Invalid source object: must be null, undefined, an object, or an array";

/// Raised when a schema entry's source path is not a string.
pub const INVALID_MAPPING: &str = r#"All mappings must be "." delineated strings"#;

/// Build a new value from `source` according to `schema`.
///
/// Schema entries are applied in the schema's own order, so a later entry
/// overwrites what an earlier one wrote at the same destination. Array
/// sources are transformed element by element, preserving order.
/// `options` is passed to every [`reach`] call; its separator applies to
/// source paths only, destination paths always split on `.`.
///
/// A `Null` or `Undefined` source still produces every destination path,
/// holding the default value.
///
/// ```
/// use objkit::{transform, ReachOptions};
/// use objkit_types::Value;
/// use serde_json::json;
///
/// let source = Value::from(json!({"address": {"one": "X"}}));
/// let schema = Value::from(json!({"person.address.lineOne": "address.one"}));
/// let result = transform(&source, schema.as_object().unwrap(), &ReachOptions::default()).unwrap();
/// assert_eq!(result, Value::from(json!({"person": {"address": {"lineOne": "X"}}})));
/// ```
pub fn transform(source: &Value, schema: &Object, options: &ReachOptions) -> ObjkitResult<Value> {
    ensure!(
        matches!(
            source,
            Value::Undefined | Value::Null | Value::Object(_) | Value::Array(_)
        ),
        INVALID_SOURCE
    )?;

    if let Value::Array(items) = source {
        debug!(count = items.len(), "transforming source array");
        return items
            .iter()
            .map(|item| transform(item, schema, options))
            .collect::<ObjkitResult<Vec<_>>>()
            .map(Value::Array);
    }

    let mut result = Value::object();
    for (destination, mapping) in schema {
        let Value::String(source_path) = mapping else {
            return Err(ObjkitError::assertion(INVALID_MAPPING));
        };

        let value = reach(source, Some(source_path.as_str()), options)?.into_owned();
        debug!(destination = %destination, source = %source_path, "mapping applied");

        let segments: Vec<&str> = destination.split('.').collect();
        assign(&mut result, &segments, value)?;
    }

    Ok(result)
}

/// Write `value` at `segments` below `target`, creating intermediate
/// objects where the slot is missing or falsy.
fn assign(target: &mut Value, segments: &[&str], value: Value) -> ObjkitResult<()> {
    let Some((head, rest)) = segments.split_first() else {
        return Ok(());
    };

    let slot = slot_mut(target, head)?;
    if rest.is_empty() {
        *slot = value;
        return Ok(());
    }
    if !slot.is_truthy() {
        *slot = Value::object();
    }
    assign(slot, rest, value)
}

/// The slot named `segment` inside a container, created as `Undefined` when
/// absent.
///
/// Arrays accept canonical index segments; writing past the end grows the
/// array, filling the gap with `Undefined`.
fn slot_mut<'a>(container: &'a mut Value, segment: &str) -> ObjkitResult<&'a mut Value> {
    match container {
        Value::Object(map) => Ok(map.entry(segment.to_string()).or_default()),
        Value::Callable(f) => Ok(f.properties_mut().entry(segment.to_string()).or_default()),
        Value::Array(items) => match Key::from(segment).name_index() {
            Some(index) => {
                if index >= items.len() {
                    items.resize(index + 1, Value::Undefined);
                }
                Ok(&mut items[index])
            }
            None => Err(cannot_create(segment, "array", &stringify(&*items))),
        },
        other => Err(cannot_create(segment, other.kind(), &stringify(&*other))),
    }
}

fn cannot_create(segment: &str, kind: &str, shown: &str) -> ObjkitError {
    ObjkitError::assertion(format!("Cannot create property {segment} on {kind} {shown}"))
}
