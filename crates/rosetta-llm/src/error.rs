use thiserror::Error;

use crate::provider::{Operation, ProviderKind};

/// Errors raised by adapter operations
///
/// Malformed input is never an error: parsers and builders degrade to
/// defaults instead. Only structural misuse surfaces here.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The adapter does not perform this operation in its role
    #[error("{adapter} adapter does not implement {operation}")]
    Unimplemented {
        /// Adapter that was called
        adapter: ProviderKind,
        /// Operation that was requested
        operation: Operation,
    },

    /// A native payload could not be encoded as a JSON value
    #[error("failed to encode native payload: {0}")]
    Encode(#[from] serde_json::Error),
}

impl AdapterError {
    /// Build an unimplemented-operation error, logging the misuse
    pub fn unimplemented(adapter: ProviderKind, operation: Operation) -> Self {
        tracing::warn!(%adapter, %operation, "unimplemented adapter operation called");
        Self::Unimplemented { adapter, operation }
    }

    /// Whether this error signals an operation outside the adapter's role
    pub const fn is_unimplemented(&self) -> bool {
        matches!(self, Self::Unimplemented { .. })
    }
}
