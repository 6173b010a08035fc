//! # Error Types
//!
//! Structured error types for takeoff_core. Every failure is local and
//! synchronous: a calculation either returns a complete result or reports
//! one of these before producing any output.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::errors::{TakeoffError, TakeoffResult};
//!
//! fn validate_span(span_cm: f64) -> TakeoffResult<()> {
//!     if span_cm <= 0.0 {
//!         return Err(TakeoffError::InvalidInput {
//!             field: "span_cm".to_string(),
//!             value: span_cm.to_string(),
//!             reason: "Span must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for takeoff_core operations
pub type TakeoffResult<T> = Result<T, TakeoffError>;

/// Structured error type for takeoff calculations.
///
/// Each variant provides specific context about what went wrong, enabling
/// programmatic handling by the caller. A missing standards-table entry is
/// NOT an error (the resolver falls back to the formula estimate); only a
/// stored nonpositive entry is, since that indicates corrupt table data.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum TakeoffError {
    /// An input value is invalid (nonpositive dimension, zero count, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Bar size designation not in the CNS 560 table
    #[error("Unknown bar size: '{designation}'")]
    UnknownBarSize { designation: String },

    /// A standards-table entry exists but holds a nonpositive length.
    ///
    /// An absent entry triggers the formula fallback; a present entry that
    /// is zero or negative means the table data itself is corrupt.
    #[error(
        "Malformed lap table entry: fy={yield_strength}, fc={concrete_strength}, \
         {column} {size} = {value}"
    )]
    MalformedLapTable {
        yield_strength: u32,
        concrete_strength: u32,
        column: String,
        size: String,
        value: f64,
    },
}

impl TakeoffError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        TakeoffError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownBarSize error
    pub fn unknown_bar_size(designation: impl Into<String>) -> Self {
        TakeoffError::UnknownBarSize {
            designation: designation.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            TakeoffError::InvalidInput { .. } => "INVALID_INPUT",
            TakeoffError::UnknownBarSize { .. } => "UNKNOWN_BAR_SIZE",
            TakeoffError::MalformedLapTable { .. } => "MALFORMED_LAP_TABLE",
        }
    }
}
