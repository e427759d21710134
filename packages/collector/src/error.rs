//! Typed errors for the collection pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so the loop can
//! tell recoverable conditions apart from fatal ones.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised by a content source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source signalled a rate limit and told us when it resets.
    ///
    /// Recoverable: the walker sleeps until `reset_at` and retries the
    /// same request. Never surfaced to the collection loop.
    #[error("rate limited until {reset_at}")]
    RateLimited { reset_at: DateTime<Utc> },

    /// Credentials were rejected. Fatal, no amount of waiting helps.
    #[error("authentication failed: {reason}")]
    Auth { reason: String },

    /// The same request kept failing past the configured retry ceiling.
    /// Fatal.
    #[error("retry ceiling exceeded after {attempts} attempts")]
    RetryCeiling { attempts: u32 },

    /// HTTP transport failure. Transient at the loop level.
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The source returned a response we could not decode.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl SourceError {
    /// Whether the collection loop must terminate on this error.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SourceError::Auth { .. } | SourceError::RetryCeiling { .. }
        )
    }
}

/// Errors raised by the classification backend or a strategy.
///
/// A failed classification is never silently mapped to a category;
/// the loop treats these as transient and retries the page.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The model backend is unreachable or failed.
    #[error("model backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The backend returned a label outside the known category set.
    #[error("unrecognized label from backend: {label}")]
    UnrecognizedLabel { label: String },

    /// The backend response was missing expected fields.
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
}

/// Errors raised by a record sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("jitter must be in [0, 1), got {0}")]
    JitterOutOfRange(f64),

    #[error("{name} wait range is inverted: min {min}s > max {max}s")]
    InvertedWaitRange { name: &'static str, min: u64, max: u64 },

    #[error("target_count must be greater than zero")]
    ZeroTarget,

    #[error("session_ceiling must be greater than zero")]
    ZeroSessionCeiling,

    #[error("retry_ceiling must be greater than zero")]
    ZeroRetryCeiling,
}

/// Umbrella error for the collection pipeline.
///
/// Only fatal conditions cross the loop boundary; everything else is
/// contained and retried inside `collect`.
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("classification error: {0}")]
    Classify(#[from] ClassifyError),

    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Result type alias for source operations.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Result type alias for classification operations.
pub type ClassifyResult<T> = std::result::Result<T, ClassifyError>;

/// Result type alias for sink operations.
pub type SinkResult<T> = std::result::Result<T, SinkError>;
