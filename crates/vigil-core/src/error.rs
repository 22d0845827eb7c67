//! Error Types
//!
//! This module provides standardized error types for vigil.
//!
//! # Example
//!
//! ```
//! use vigil_core::{VigilError, Result};
//!
//! fn find_initiative(id: &str) -> Result<String> {
//!     if id.is_empty() {
//!         return Err(VigilError::UnknownInitiative {
//!             id: id.to_string(),
//!         });
//!     }
//!     Ok(format!("Initiative {}", id))
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

use crate::ids::OccurrenceId;

/// Standardized error type for vigil.
///
/// This enum covers the typed failure edges of the core: key parsing,
/// catalog lookup, and draft/occurrence linkage. Field-level ticket
/// validation failures are deliberately NOT errors; they are collected as
/// data so callers can render them next to form fields.
#[derive(Debug, Clone, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VigilError {
    /// A period key could not be parsed.
    ///
    /// Period keys are `"YYYY-MM"` for monthly occurrences and `"YYYY-Qn"`
    /// for quarterly ones.
    #[error("Invalid period '{value}': {reason}")]
    InvalidPeriod {
        /// The offending input
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// An initiative slug did not resolve against the catalog.
    #[error("Unknown initiative: {id}")]
    UnknownInitiative {
        /// The initiative slug that was looked up
        id: String,
    },

    /// A ticket draft's denormalized keys do not match the occurrence it
    /// was submitted against.
    #[error("Occurrence mismatch: expected {expected}, got {actual}")]
    OccurrenceMismatch {
        /// The occurrence the submission targets
        expected: OccurrenceId,
        /// The occurrence the draft references
        actual: OccurrenceId,
    },
}

/// Type alias for Results using `VigilError`.
///
/// ```
/// use vigil_core::{Result, VigilError};
///
/// fn example() -> Result<String> {
///     Ok("success".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, VigilError>;
