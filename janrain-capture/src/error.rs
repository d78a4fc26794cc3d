//! Error types for the Capture client.
//!
//! Only transport and decoding failures are errors. A response whose `stat`
//! is not `"ok"` is a normal [`Outcome::Failure`](janrain_types::Outcome).

use thiserror::Error;

/// Result type for client operations.
pub type JanrainResult<T> = Result<T, JanrainError>;

/// Errors that can occur while talking to the Capture services.
#[derive(Debug, Error)]
pub enum JanrainError {
    /// The request could not be sent or its body could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// A non-2xx response whose body is not JSON.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A body that should have been JSON was not, or a parameter failed to
    /// encode.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A client setting the call depends on is not defined.
    #[error("missing client setting: {0}")]
    MissingSetting(String),

    /// A response did not match the expected payload shape.
    #[error(transparent)]
    Types(#[from] janrain_types::Error),
}
