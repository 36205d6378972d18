use serde::{Deserialize, Serialize};

use objkit_types::Value;

/// Separator used when none (or an empty one) is configured.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Options controlling path resolution in [`reach`](crate::reach()) and
/// [`transform`](crate::transform()).
///
/// Every field is optional when deserialized, so an options record can be
/// read straight from a configuration document:
///
/// ```
/// use objkit::ReachOptions;
///
/// let options: ReachOptions = serde_json::from_str(r#"{"separator": "/", "strict": true}"#).unwrap();
/// assert_eq!(options.separator(), "/");
/// assert!(options.strict);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReachOptions {
    /// Delimiter between path segments.
    pub separator: String,
    /// Returned when a path cannot be resolved.
    #[serde(rename = "default", skip_serializing_if = "Value::is_undefined")]
    pub default_value: Value,
    /// Fail on an unresolved intermediate segment instead of returning the
    /// default. The final segment always falls back to the default.
    pub strict: bool,
    /// How callable values take part in traversal:
    /// - `Some(true)`: properties may be read off callables, and a missing
    ///   property yields the default.
    /// - `Some(false)`: callables block traversal; reaching into one fails.
    /// - `None`: existing properties may be read; a missing one fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<bool>,
}

impl Default for ReachOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.into(),
            default_value: Value::Undefined,
            strict: false,
            functions: None,
        }
    }
}

impl ReachOptions {
    /// The effective separator. An empty separator falls back to `"."`.
    pub fn separator(&self) -> &str {
        if self.separator.is_empty() {
            DEFAULT_SEPARATOR
        } else {
            &self.separator
        }
    }

    /// Use `separator` between segments.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Return `value` for unresolvable paths.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Enable or disable strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the callable traversal policy explicitly.
    pub fn with_functions(mut self, allowed: bool) -> Self {
        self.functions = Some(allowed);
        self
    }
}

/// The bare-string shorthand: options that only set the separator.
impl From<&str> for ReachOptions {
    fn from(separator: &str) -> Self {
        Self::default().with_separator(separator)
    }
}
