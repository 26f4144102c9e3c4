//! Error types for schedule generation and track loading

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Period count of zero or below; no ledger can be produced
    #[error("Invalid period count: {period_count} (must be at least 1)")]
    InvalidPeriod { period_count: i64 },

    /// Principal or rate that is not a finite number
    #[error("Invalid amount for {field}: {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("Unknown repayment method: {0} (expected straight, declining or bullet)")]
    UnknownMethod(String),

    #[error("Invalid index series entry: {0}")]
    InvalidIndexSeries(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
