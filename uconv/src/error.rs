//! Errors that can occur during unit conversion

use thiserror::Error;
use uconv_core::{codes, NumberError};

use crate::{Dimensions, Units};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Units have incompatible dimensions
    #[error("cannot convert {from} ({from_dim}) to {to} ({to_dim}): incompatible dimensions")]
    DimensionalMismatch {
        from: Units,
        to: Units,
        from_dim: Dimensions,
        to_dim: Dimensions,
    },

    /// Unknown unit symbol
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    /// An offset unit (e.g., degC) inside a compound absolute temperature
    #[error("cannot place an absolute temperature in {0}: offset units must stand alone")]
    CompoundOffset(Units),

    /// The backing numeric type cannot hold the converted value
    #[error("numeric error: {0}")]
    Number(#[from] NumberError),
}

impl ConversionError {
    pub(crate) fn mismatch(from: &Units, to: &Units, from_dim: Dimensions, to_dim: Dimensions) -> Self {
        ConversionError::DimensionalMismatch {
            from: from.clone(),
            to: to.clone(),
            from_dim,
            to_dim,
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConversionError::DimensionalMismatch { .. } => codes::DIMENSION_MISMATCH,
            ConversionError::UnknownUnit(_) => codes::UNKNOWN_UNIT,
            ConversionError::CompoundOffset(_) => codes::COMPOUND_OFFSET,
            ConversionError::Number(e) => e.code(),
        }
    }

    /// Suggestion for fixing the error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ConversionError::DimensionalMismatch { .. } => {
                Some("Both sides of a conversion must have the same dimensions")
            }
            ConversionError::UnknownUnit(_) => Some("Register the unit or check its symbol"),
            ConversionError::CompoundOffset(_) => {
                Some("Convert the temperature on its own, or use an offset-free scale such as K")
            }
            ConversionError::Number(e) => e.suggestion(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::{LENGTH, TIME};

    #[test]
    fn test_mismatch_message_names_both_sides() {
        let err = ConversionError::mismatch(
            &Units::single("s"),
            &Units::single("m"),
            Dimensions::base(TIME),
            Dimensions::base(LENGTH),
        );
        assert_eq!(err.to_string(), "cannot convert s (T) to m (L): incompatible dimensions");
        assert_eq!(err.code(), codes::DIMENSION_MISMATCH);
    }

    #[test]
    fn test_number_error_passthrough() {
        let err: ConversionError = NumberError::DivisionByZero.into();
        assert_eq!(err.code(), codes::DIV_ZERO);
        assert_eq!(ConversionError::UnknownUnit("furlong".into()).to_string(), "unknown unit: furlong");
    }

    #[test]
    fn test_compound_offset_message() {
        let units = Units::from_atoms([
            crate::UnitAtom::new("degC"),
            crate::UnitAtom::new("m"),
            crate::UnitAtom::new("s").pow(-1),
        ]);
        let err = ConversionError::CompoundOffset(units);
        assert_eq!(
            err.to_string(),
            "cannot place an absolute temperature in degC·m·s^-1: offset units must stand alone"
        );
        assert_eq!(err.code(), codes::COMPOUND_OFFSET);
    }
}
