//! Error types for objkit operations.

use std::sync::Arc;

use thiserror::Error;

/// The single failure kind raised by objkit operations.
///
/// Failures are identified by their message text; the wording of every
/// message produced by this crate is stable.
#[derive(Clone, Debug, Error)]
pub enum ObjkitError {
    /// A failed assertion carrying its composed message.
    #[error("{0}")]
    Assertion(String),

    /// A caller-supplied error, passed through untouched by [`assert`].
    ///
    /// Held behind an `Arc` so the very same instance comes back out and can
    /// be compared with [`ObjkitError::same_instance`].
    ///
    /// [`assert`]: crate::assert()
    #[error("{0}")]
    External(Arc<dyn std::error::Error + Send + Sync + 'static>),
}

impl ObjkitError {
    /// Build an assertion error from a message.
    pub fn assertion(message: impl Into<String>) -> Self {
        ObjkitError::Assertion(message.into())
    }

    /// Wrap any error so it can be handed to [`assert`](crate::assert()).
    pub fn external<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ObjkitError::External(Arc::new(err))
    }

    /// The human-readable message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns `true` if both errors wrap the same external error instance.
    ///
    /// Assertion errors are never the same instance as anything else.
    pub fn same_instance(&self, other: &ObjkitError) -> bool {
        match (self, other) {
            (ObjkitError::External(a), ObjkitError::External(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Convenience alias for objkit results.
pub type ObjkitResult<T> = std::result::Result<T, ObjkitError>;
