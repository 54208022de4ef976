//! Error taxonomy for the public API
//!
//! Numeric parameter problems are never errors (the pipeline clamps and
//! proceeds); everything here is either a source that cannot be interpreted
//! or a programming-contract violation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RevelaError {
    /// Every RAW ingestion strategy failed. Only reachable when placeholder
    /// synthesis itself errors; callers should treat it as fatal.
    #[error("RAW ingestion exhausted: {0}")]
    DecodeExhausted(#[from] revela_raw::IngestFailure),

    /// The byte blob cannot be interpreted as any image.
    #[error("unsupported source: {0}")]
    UnsupportedSource(String),

    /// Buffer length does not match the declared dimensions. This is a
    /// contract violation by the caller, not a user-facing condition.
    #[error("pixel buffer length {actual} does not match {width}x{height} RGBA (expected {expected})")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("export failed: {0}")]
    ExportFailed(String),

    /// The background preview worker or one of its channels is gone.
    #[error("preview scheduler unavailable: {0}")]
    SchedulerUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
