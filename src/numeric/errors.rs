// ============================================================================
// Numeric Errors
// Error types for fixed-point arithmetic operations
// ============================================================================

use thiserror::Error;

/// Errors that can occur during fixed-point arithmetic operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result exceeded the largest representable value
    #[error("arithmetic overflow: result exceeded maximum value")]
    Overflow,

    /// Result below the smallest representable value
    #[error("arithmetic underflow: result below minimum value")]
    Underflow,

    /// Attempted division by zero
    #[error("division by zero")]
    DivisionByZero,

    /// Logarithm of zero or a negative value
    #[error("logarithm undefined: input must be greater than zero")]
    NotPositive,

    /// Square root of a negative value
    #[error("square root undefined: input must not be negative")]
    Negative,

    /// Power-of-two query on zero
    #[error("power of two undefined: input must not be zero")]
    Zero,

    /// Conversion would lose significant digits
    #[error("precision loss: conversion would lose significant digits")]
    PrecisionLoss,

    /// Input string or value is invalid
    #[error("invalid input: could not parse value")]
    InvalidInput,
}

/// Broad classification of a [`NumericError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input violates a precondition unrelated to the integer width.
    Domain,
    /// An intermediate or final value does not fit the integer width.
    Range,
    /// A string or foreign value could not be converted.
    Input,
}

impl NumericError {
    /// Classify this error.
    pub const fn kind(self) -> ErrorKind {
        match self {
            NumericError::DivisionByZero
            | NumericError::NotPositive
            | NumericError::Negative
            | NumericError::Zero => ErrorKind::Domain,
            NumericError::Overflow | NumericError::Underflow => ErrorKind::Range,
            NumericError::PrecisionLoss | NumericError::InvalidInput => ErrorKind::Input,
        }
    }
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::Overflow.to_string(),
            "arithmetic overflow: result exceeded maximum value"
        );
        assert_eq!(NumericError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            NumericError::NotPositive.to_string(),
            "logarithm undefined: input must be greater than zero"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::Overflow, NumericError::Overflow);
        assert_ne!(NumericError::Overflow, NumericError::Underflow);
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(NumericError::Overflow.kind(), ErrorKind::Range);
        assert_eq!(NumericError::Underflow.kind(), ErrorKind::Range);
        assert_eq!(NumericError::DivisionByZero.kind(), ErrorKind::Domain);
        assert_eq!(NumericError::NotPositive.kind(), ErrorKind::Domain);
        assert_eq!(NumericError::Negative.kind(), ErrorKind::Domain);
        assert_eq!(NumericError::Zero.kind(), ErrorKind::Domain);
        assert_eq!(NumericError::InvalidInput.kind(), ErrorKind::Input);
        assert_eq!(NumericError::PrecisionLoss.kind(), ErrorKind::Input);
    }
}
