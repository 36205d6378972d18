//! Safe stringification.
//!
//! [`stringify`] encodes any serializable value as JSON text and never
//! fails: an encoding error is turned into a descriptive string instead.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

/// Indentation is capped at this many spaces or characters.
const MAX_INDENT: usize = 10;

/// Indentation used for pretty output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Indent {
    /// Indent each level by this many spaces (at most 10).
    Spaces(usize),
    /// Indent each level with this text (at most its first 10 characters).
    Text(String),
}

impl Indent {
    fn unit(&self) -> String {
        match self {
            Indent::Spaces(n) => " ".repeat((*n).min(MAX_INDENT)),
            Indent::Text(s) => s.chars().take(MAX_INDENT).collect(),
        }
    }
}

/// Serializer arguments forwarded by [`stringify_with`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringifyOptions {
    /// Pretty-print with this indentation. `None`, zero spaces, or empty
    /// text produce compact output.
    pub indent: Option<Indent>,
}

impl StringifyOptions {
    /// Pretty output indented by `n` spaces.
    pub fn spaces(n: usize) -> Self {
        Self {
            indent: Some(Indent::Spaces(n)),
        }
    }
}

/// Encode `value` as compact JSON text.
///
/// On failure returns `"[Cannot display object: <message>]"`.
///
/// ```
/// use objkit::stringify;
/// use serde_json::json;
///
/// assert_eq!(stringify(&json!({"a": 1})), r#"{"a":1}"#);
/// ```
pub fn stringify<T: Serialize + ?Sized>(value: &T) -> String {
    stringify_with(value, &StringifyOptions::default())
}

/// Encode `value` as JSON text using `options`.
///
/// On failure returns `"[Cannot display object: <message>]"`.
pub fn stringify_with<T: Serialize + ?Sized>(value: &T, options: &StringifyOptions) -> String {
    match encode(value, options) {
        Ok(text) => text,
        Err(e) => {
            debug!(error = %e, "value could not be encoded");
            format!("[Cannot display object: {e}]")
        }
    }
}

fn encode<T: Serialize + ?Sized>(value: &T, options: &StringifyOptions) -> serde_json::Result<String> {
    let indent = options
        .indent
        .as_ref()
        .map(Indent::unit)
        .filter(|unit| !unit.is_empty());

    let Some(indent) = indent else {
        return serde_json::to_string(value);
    };

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
