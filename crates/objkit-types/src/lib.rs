//! Dynamic value model for objkit.
//!
//! The operations in the `objkit` crate work on loosely-typed nested data:
//! mappings, sequences, scalars, and callable values that may carry their own
//! properties. This crate provides that data model and its JSON encoding.
//!
//! # Key Types
//!
//! - [`Value`] — Tagged union of every value kind, including `Undefined`
//! - [`Object`] — String-keyed property table used by objects and callables
//! - [`Callable`] — Shared function value with an attached property table
//! - [`Key`] — A path segment after negative-index rewriting

pub mod callable;
pub mod key;
pub mod value;

pub use callable::Callable;
pub use key::{format_number, parse_number, Key};
pub use value::{Object, Value};
