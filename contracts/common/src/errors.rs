//! Error Types for the Ledger
//!
//! Every entry point returns a [`LedgerResult`]. The dispatcher turns an
//! error into the host's failure signal using [`LedgerError::code`] as the
//! message, and the host then discards the invocation's writes.

use core::fmt;

use crate::big_int::Amount;

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Main error enum for all ledger errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    // ============ Argument Errors ============
    /// Wrong number of arguments supplied to an entry point
    ArgumentCount { expected: usize, actual: usize },

    /// Argument present but malformed
    InvalidArgument { index: usize, reason: &'static str },

    // ============ Balance Errors ============
    /// Transfer amount exceeds the sender's balance
    InsufficientBalance { available: Amount, requested: Amount },

    // ============ State Errors ============
    /// `init` was invoked on an already minted ledger
    AlreadyInitialized,

    // ============ Dispatch Errors ============
    /// No entry point with the requested name
    UnknownFunction,

    // ============ Math Errors ============
    /// Big integer subtraction would go below zero
    Underflow,
}

impl LedgerError {
    /// Returns a stable error code, also used as the failure message
    pub fn code(&self) -> &'static str {
        match self {
            Self::ArgumentCount { .. } => "E001_ARGUMENT_COUNT",
            Self::InvalidArgument { .. } => "E002_INVALID_ARGUMENT",
            Self::InsufficientBalance { .. } => "E010_INSUFFICIENT_BALANCE",
            Self::AlreadyInitialized => "E020_ALREADY_INITIALIZED",
            Self::UnknownFunction => "E030_UNKNOWN_FUNCTION",
            Self::Underflow => "E040_UNDERFLOW",
        }
    }
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArgumentCount { expected, actual } => {
                write!(f, "{}: expected {} arguments, got {}", self.code(), expected, actual)
            }
            Self::InvalidArgument { index, reason } => {
                write!(f, "{}: argument {}: {}", self.code(), index, reason)
            }
            Self::InsufficientBalance { available, requested } => {
                write!(f, "{}: available {}, requested {}", self.code(), available, requested)
            }
            _ => f.write_str(self.code()),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LedgerError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::string::ToString;

    #[test]
    fn test_error_codes_unique() {
        let errors = [
            LedgerError::ArgumentCount { expected: 1, actual: 0 },
            LedgerError::InvalidArgument { index: 0, reason: "bad" },
            LedgerError::InsufficientBalance {
                available: Amount::from(1u64),
                requested: Amount::from(2u64),
            },
            LedgerError::AlreadyInitialized,
            LedgerError::UnknownFunction,
            LedgerError::Underflow,
        ];

        let codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        let unique: BTreeSet<_> = codes.iter().collect();
        assert_eq!(codes.len(), unique.len(), "Error codes must be unique");
    }

    #[test]
    fn test_display_includes_details() {
        let err = LedgerError::InsufficientBalance {
            available: Amount::from(600u64),
            requested: Amount::from(700u64),
        };
        assert_eq!(
            err.to_string(),
            "E010_INSUFFICIENT_BALANCE: available 600, requested 700"
        );
        assert_eq!(LedgerError::AlreadyInitialized.to_string(), "E020_ALREADY_INITIALIZED");
    }
}
