//! Error types for template resolution and building.

use crate::value::Shape;

/// Error raised by a fallible producer, passed through unmodified.
pub type ProducerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for builder operations.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Root template is not a plain data object
    #[error("Template must be an object, got {found}")]
    InvalidTemplate { found: Shape },

    /// Override passed to a produce call is not a plain data object
    #[error("Override must be an object, got {found}")]
    InvalidOverride { found: Shape },

    /// A producer failed while resolving
    #[error("Producer failed: {0}")]
    Producer(#[source] ProducerError),

    /// Producer chain or nesting did not bottom out
    #[error("Template nesting exceeded {limit} levels (cyclic producer?)")]
    DepthExceeded { limit: usize },
}
