//! Error types for flirone.

use thiserror::Error;

/// Main error type for all flirone operations.
///
/// The decode core itself is infallible by design: resynchronization,
/// overflow and incomplete frames are normal stream states, not errors.
/// Errors only arise at the collaborator surfaces (transport reads,
/// sink writes).
#[derive(Debug, Error)]
pub enum FlirOneError {
    /// I/O error on the transport or a sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A video sink could not be opened.
    #[error("cannot open sink {path}: {source}")]
    Sink {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using FlirOneError.
pub type Result<T> = std::result::Result<T, FlirOneError>;
