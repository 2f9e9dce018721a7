//! Error types for the ZnSize engine.

use crate::types::Axis;
use thiserror::Error;

/// Top-level error type for the ZnSize engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeError {
    /// A strategy name that is not in the table for its axis.
    #[error("Unknown {axis} method: {name}")]
    UnknownMethod { axis: Axis, name: String },

    /// Mutation-driven auto-sizing needs a `MutationObserver`.
    #[error("MutationObserver is not available in this environment")]
    MutationObserverUnavailable,

    /// A host API call failed while attaching a watch or scheduling a timer.
    #[error("Host error: {reason}")]
    Host { reason: String },
}

impl SizeError {
    pub fn host(reason: impl Into<String>) -> Self {
        SizeError::Host { reason: reason.into() }
    }
}
