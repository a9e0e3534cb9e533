//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for seeding operations.
#[derive(Debug, Error)]
pub enum SeedError {
    // ── Configuration / environment ──────────────────────────────────────────
    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Failed to parse an environment variable into the expected type.
    #[error("failed to parse env variable: {key} = '{value}'")]
    EnvParse { key: String, value: String },

    // ── Input file ──────────────────────────────────────────────────────────
    /// I/O or filesystem errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Input array has no records, so no dimensionality can be inferred.
    #[error("input contains no records; cannot infer vector size")]
    EmptyInput,

    /// First record carries a zero-length vector.
    #[error("first record has an empty `vectors` array")]
    EmptyVector,

    /// Element of the input array is not a JSON object.
    #[error("record #{index} is not a JSON object")]
    NotAnObject { index: usize },

    /// Record lacks a required field.
    #[error("record #{index} is missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    /// `id` is neither a non-negative integer nor a string.
    #[error("record #{index} has an unsupported `id` (expected unsigned integer or string)")]
    InvalidId { index: usize },

    /// `vectors` is not an array of numbers.
    #[error("record #{index} has an invalid `vectors` field (expected array of numbers)")]
    InvalidVector { index: usize },

    // ── Qdrant client / transport ───────────────────────────────────────────
    /// Qdrant client errors (wrapped).
    #[error("qdrant error: {0}")]
    Qdrant(String),

    /// Connector gave up after the configured number of attempts.
    #[error("qdrant unreachable after {attempts} attempts: {last_error}")]
    RetryExhausted { attempts: u32, last_error: String },
}
