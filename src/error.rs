//! Error types for the capacity-forecast library.

use thiserror::Error;

/// Result type alias for forecasting and planning operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while fitting, backtesting or planning.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// A parameter or argument is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Two series share no timestamps.
    #[error("alignment error: {0}")]
    Alignment(String),

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Index out of bounds.
    #[error("index out of bounds: {index} (size: {size})")]
    IndexOutOfBounds { index: usize, size: usize },

    /// Computation error (e.g., numerical issues).
    #[error("computation error: {0}")]
    ComputationError(String),

    /// Configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}
