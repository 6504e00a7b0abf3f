//! Dashboard error types
//!
//! Two families: network failures coming from data sync, and local
//! validation failures that never reach the backend.

use chrono::NaiveDate;
use thiserror::Error;

use crate::client::ClientError;

/// Local input validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Date filter with start after end
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Required proposal field left empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Operation needs a selected area
    #[error("No technical area selected")]
    NoActiveArea,

    /// Poller asked to run with a zero period
    #[error("Polling interval must be at least one second")]
    ZeroPollInterval,
}

/// Errors surfaced by dashboard handlers
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Network error: {0}")]
    Network(#[from] ClientError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
