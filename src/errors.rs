//! Error types.
//!
//! Only session import/export can fail with an error; every invalid runtime
//! request (playing an under-populated track, removing an unknown keyframe)
//! is a silent no-op surfaced through inspectable state instead.

use thiserror::Error;

/// The main error type for the kinema engine.
#[derive(Error, Debug)]
pub enum KinemaError {
    /// JSON serialization or parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A session track record that cannot be restored, e.g. an object
    /// keyframe without a time or a camera keyframe without a duration.
    #[error("malformed track record: {0}")]
    MalformedRecord(String),
}

/// Alias for `Result<T, KinemaError>`.
pub type Result<T> = std::result::Result<T, KinemaError>;
