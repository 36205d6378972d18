//! Callable values.
//!
//! A [`Callable`] is a function value that can also carry named properties,
//! so paths may traverse through it like an object.

use std::fmt;
use std::sync::Arc;

use crate::value::{Object, Value};

/// The native function behind a [`Callable`].
pub type NativeFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A shared function value with its own property table.
///
/// Clones share the same underlying function. Two callables compare equal
/// when they share the function and hold equal properties.
#[derive(Clone)]
pub struct Callable {
    name: Option<String>,
    func: Arc<NativeFn>,
    properties: Object,
}

impl Callable {
    /// Wrap a closure as an anonymous callable with no properties.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            name: None,
            func: Arc::new(func),
            properties: Object::new(),
        }
    }

    /// Wrap a closure as a named callable.
    pub fn named<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            name: Some(name.into()),
            ..Self::new(func)
        }
    }

    /// Builder-style property assignment.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Invoke the function.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }

    /// The function's name, if it was given one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Properties attached to the function.
    pub fn properties(&self) -> &Object {
        &self.properties
    }

    /// Mutable access to the attached properties.
    pub fn properties_mut(&mut self) -> &mut Object {
        &mut self.properties
    }

    /// Returns `true` if both callables share the same underlying function.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) && self.properties == other.properties
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "[Function: {name}]"),
            None => f.write_str("[Function]"),
        }
    }
}
