//! History aggregation error types

use thiserror::Error;

use super::types::Timeframe;

/// Errors that can occur while aggregating a NAV series
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistoryError {
    /// The window has no samples to read a NAV from
    #[error("Insufficient data for {timeframe} window: series is empty")]
    InsufficientData { timeframe: Timeframe },
}

/// Result type alias for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;
