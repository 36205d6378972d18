//! Object helpers for loosely-typed nested data.
//!
//! Four small, stateless operations over [`objkit_types::Value`]:
//!
//! - [`stringify()`] / [`stringify_with`] -- JSON text that never fails
//! - [`assert()`] / [`ensure!`] -- condition checks with composed messages
//! - [`reach()`] -- resolve a delimited path, with defaults and strict mode
//! - [`transform()`] -- reshape a value by mapping destination paths to
//!   source paths
//!
//! All failures are reported as [`ObjkitError`] values whose message text is
//! stable and may be matched on.
//!
//! # Quick Start
//!
//! ```rust
//! use objkit::{reach, transform, ReachOptions};
//! use objkit_types::Value;
//! use serde_json::json;
//!
//! let source = Value::from(json!({"zip": {"code": 3321232}, "title": "Warehouse"}));
//! let options = ReachOptions::default();
//!
//! assert_eq!(*reach(&source, Some("zip.code"), &options).unwrap(), Value::from(3321232));
//!
//! let schema = Value::from(json!({"place.name": "title", "place.zip": "zip.code"}));
//! let reshaped = transform(&source, schema.as_object().unwrap(), &options).unwrap();
//! assert_eq!(reshaped, Value::from(json!({"place": {"name": "Warehouse", "zip": 3321232}})));
//! ```

pub mod assert;
pub mod error;
pub mod options;
pub mod reach;
pub mod stringify;
pub mod transform;

// Re-exports for convenience.
pub use assert::{assert, Part};
pub use error::{ObjkitError, ObjkitResult};
pub use options::ReachOptions;
pub use reach::{reach, reach_with_separator};
pub use stringify::{stringify, stringify_with, Indent, StringifyOptions};
pub use transform::transform;
