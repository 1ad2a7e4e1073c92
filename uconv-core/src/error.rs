//! Numeric errors and machine-readable error codes
//!
//! Conversion never panics on bad input. Failures are values that carry a
//! stable code so callers can branch on them without matching messages.

use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const COMPOUND_OFFSET: &str = "COMPOUND_OFFSET";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const NOT_FINITE: &str = "NOT_FINITE";
    pub const NOT_REPRESENTABLE: &str = "NOT_REPRESENTABLE";
    pub const INEXACT: &str = "INEXACT";
}

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Non-finite value: {0}")]
    NotFinite(f64),

    #[error("{value} is not representable as {target}")]
    NotRepresentable { value: String, target: &'static str },

    #[error("{value} cannot be scaled exactly in {target}")]
    Inexact { value: String, target: &'static str },
}

impl NumberError {
    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            NumberError::ParseError(_) => codes::PARSE_ERROR,
            NumberError::DivisionByZero => codes::DIV_ZERO,
            NumberError::NotFinite(_) => codes::NOT_FINITE,
            NumberError::NotRepresentable { .. } => codes::NOT_REPRESENTABLE,
            NumberError::Inexact { .. } => codes::INEXACT,
        }
    }

    /// Suggestion for fixing the error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            NumberError::ParseError(_) => Some("Use an integer or a fraction such as \"1/2\""),
            NumberError::DivisionByZero => None,
            NumberError::NotFinite(_) => Some("Check for overflow or NaN in the input value"),
            NumberError::NotRepresentable { .. } => {
                Some("Cast the quantity to a wider or exact type (f64, RBig) first")
            }
            NumberError::Inexact { .. } => {
                Some("Integer values only accept exact factors; cast to RBig or f64 first")
            }
        }
    }
}
