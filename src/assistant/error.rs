//! Internal error taxonomy for assistant operations.

use thiserror::Error;

/// Why a single assistant call could not produce a usable result.
///
/// These never escape the assistant module: every public operation
/// collapses them into its deterministic fallback value.
#[derive(Debug, Error)]
pub enum AssistError {
    /// The completion request itself failed (network, auth, rate-limit,
    /// non-success status).
    #[error("model request failed: {0}")]
    Request(String),

    /// The response arrived but was not the JSON the schema asked for.
    #[error("model response did not match the expected shape: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The response parsed but carried nothing usable (no tasks, no
    /// steps, or blank text).
    #[error("model response was empty")]
    Empty,
}
