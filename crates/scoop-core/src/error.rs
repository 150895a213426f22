//! # Error Types
//!
//! Domain error types for scoop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  scoop-core errors (this file)                                         │
//! │  └── CoreError        - Malformed or out-of-range domain values        │
//! │                                                                         │
//! │  scoop-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A duplicate catalog name is NOT an error anywhere in this workspace; it is
//! reported through [`crate::InsertOutcome::Duplicate`].

use thiserror::Error;

/// Domain errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A money amount could not be parsed.
    ///
    /// ## When This Occurs
    /// - Empty input
    /// - More than two fractional digits ("3.999")
    /// - Non-digit characters ("3.9x")
    /// - Amount does not fit in i64 cents
    #[error("Invalid money amount: '{0}'")]
    InvalidMoney(String),

    /// A line total does not fit in i64 cents.
    #[error("Line total overflows: {quantity} x {unit_cents} cents")]
    TotalOverflow { quantity: i64, unit_cents: i64 },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidMoney("3.999".to_string());
        assert_eq!(err.to_string(), "Invalid money amount: '3.999'");

        let err = CoreError::TotalOverflow {
            quantity: 2,
            unit_cents: i64::MAX,
        };
        assert_eq!(
            err.to_string(),
            format!("Line total overflows: 2 x {} cents", i64::MAX)
        );
    }
}
