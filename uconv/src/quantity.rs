//! Quantity type - a value with its units

use std::fmt;

use serde::{Deserialize, Serialize};
use uconv_core::{cast, NumberError, Scalar};

use crate::convert;
use crate::{ConversionError, Units};

/// A physical quantity: a numeric value in some compound unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity<T> {
    value: T,
    units: Units,
}

impl<T> Quantity<T> {
    pub fn new(value: T, units: Units) -> Self {
        Quantity { value, units }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn units(&self) -> &Units {
        &self.units
    }

    /// Extract the numeric value
    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Units) {
        (self.value, self.units)
    }
}

impl<T: Scalar> Quantity<T> {
    /// A pure number (no units)
    pub fn dimensionless(value: T) -> Self {
        Quantity::new(value, Units::dimensionless())
    }

    /// Same quantity with a different backing type
    pub fn cast<U: Scalar>(&self) -> Result<Quantity<U>, NumberError> {
        Ok(Quantity::new(cast(&self.value)?, self.units.clone()))
    }

    /// Convert to another unit using the standard table
    pub fn convert_to(&self, target: &Units) -> Result<Quantity<T>, ConversionError> {
        convert::uconvert(target, self)
    }
}

impl<T: Scalar> From<T> for Quantity<T> {
    fn from(value: T) -> Self {
        Quantity::dimensionless(value)
    }
}

impl<T: fmt::Display> fmt::Display for Quantity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.units.is_dimensionless_unit() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.units)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uconv_core::{ratio, RBig};

    #[test]
    fn test_accessors() {
        let q = Quantity::new(2.5f64, Units::single("m"));
        assert_eq!(*q.value(), 2.5);
        assert_eq!(q.units(), &Units::single("m"));
        let (value, units) = q.into_parts();
        assert_eq!(value, 2.5);
        assert_eq!(units.to_string(), "m");
    }

    #[test]
    fn test_from_number_is_dimensionless() {
        let q: Quantity<i64> = 7.into();
        assert!(q.units().is_dimensionless_unit());
        assert_eq!(q.to_string(), "7");
    }

    #[test]
    fn test_cast() {
        let q = Quantity::new(ratio(3, 2), Units::single("s"));
        let f: Quantity<f64> = q.cast().unwrap();
        assert_eq!(*f.value(), 1.5);
        assert_eq!(f.units(), q.units());

        let err = q.cast::<i64>().unwrap_err();
        assert!(matches!(err, NumberError::NotRepresentable { .. }));
    }

    #[test]
    fn test_convert_to() {
        let q = Quantity::new(ratio(90, 1), Units::single("min"));
        let h = q.convert_to(&Units::single("h")).unwrap();
        assert_eq!(*h.value(), ratio(3, 2));
    }

    #[test]
    fn test_display() {
        let q = Quantity::new(RBig::ONE, Units::single("K"));
        assert_eq!(q.to_string(), "1 K");
    }

    #[test]
    fn test_serde() {
        let q = Quantity::new(1.5f64, Units::single("h"));
        let json = serde_json::to_string(&q).unwrap();
        let back: Quantity<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, q);
    }
}
