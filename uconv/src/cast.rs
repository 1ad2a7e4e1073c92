//! Conversions that change the backing numeric type as well as the units

use uconv_core::Scalar;

use crate::convert::Converter;
use crate::registry::UnitLookup;
use crate::units::UNITS;
use crate::{ConversionError, Dimensions, Quantity, Units};

impl<'r, R: UnitLookup + ?Sized> Converter<'r, R> {
    /// Convert to `target` units held as `U`
    ///
    /// Values with an exact view are widened to `RBig` before the unit
    /// conversion, so `i64` seconds can become `RBig` hours without an
    /// intermediate integer rounding step.
    pub fn convert_as<T: Scalar, U: Scalar>(
        &self,
        target: &Units,
        q: &Quantity<T>,
    ) -> Result<Quantity<U>, ConversionError> {
        match q.value().to_exact() {
            Some(exact) => {
                let widened = Quantity::new(exact, q.units().clone());
                Ok(self.uconvert(target, &widened)?.cast()?)
            }
            None => Ok(self.uconvert(target, q)?.cast()?),
        }
    }

    /// Plain number from a dimensionless quantity, with any scaled
    /// dimensionless units (percent, m/km) resolved
    pub fn to_number<T: Scalar, U: Scalar>(&self, q: &Quantity<T>) -> Result<U, ConversionError> {
        let dims = self.dimension_of(q.units())?;
        if !dims.is_dimensionless() {
            return Err(ConversionError::mismatch(
                q.units(),
                &Units::dimensionless(),
                dims,
                Dimensions::none(),
            ));
        }
        Ok(self.convert_as::<T, U>(&Units::dimensionless(), q)?.into_value())
    }
}

/// `Converter::convert_as` against the standard table
pub fn convert_as<T: Scalar, U: Scalar>(target: &Units, q: &Quantity<T>) -> Result<Quantity<U>, ConversionError> {
    Converter::new(&*UNITS).convert_as(target, q)
}

/// `Converter::to_number` against the standard table
pub fn to_number<T: Scalar, U: Scalar>(q: &Quantity<T>) -> Result<U, ConversionError> {
    Converter::new(&*UNITS).to_number(q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uconv_core::{ratio, NumberError, RBig};

    #[test]
    fn test_integer_seconds_to_exact_hours() {
        let q = Quantity::new(3602i64, Units::single("s"));
        let h: Quantity<RBig> = convert_as(&Units::single("h"), &q).unwrap();
        assert_eq!(*h.value(), ratio(1801, 1800));
    }

    #[test]
    fn test_integer_result_must_be_whole() {
        let q = Quantity::new(7200i64, Units::single("s"));
        let h: Quantity<i32> = convert_as(&Units::single("h"), &q).unwrap();
        assert_eq!(*h.value(), 2);

        let q = Quantity::new(3602i64, Units::single("s"));
        let err = convert_as::<i64, i64>(&Units::single("h"), &q).unwrap_err();
        assert!(matches!(err, ConversionError::Number(NumberError::NotRepresentable { .. })));
    }

    #[test]
    fn test_float_to_exact() {
        let q = Quantity::new(0.5f64, Units::single("h"));
        let s: Quantity<RBig> = convert_as(&Units::single("s"), &q).unwrap();
        assert_eq!(*s.value(), ratio(1800, 1));
    }

    #[test]
    fn test_convert_as_checks_dimensions() {
        let q = Quantity::new(1.0f64, Units::single("m"));
        let err = convert_as::<f64, f32>(&Units::single("s"), &q).unwrap_err();
        assert!(matches!(err, ConversionError::DimensionalMismatch { .. }));
    }

    #[test]
    fn test_to_number() {
        let pct = Quantity::new(25i64, Units::single("percent"));
        let x: f64 = to_number(&pct).unwrap();
        assert_eq!(x, 0.25);

        let plain: i64 = to_number(&Quantity::dimensionless(4i64)).unwrap();
        assert_eq!(plain, 4);
    }

    #[test]
    fn test_to_number_rejects_dimensioned() {
        let q = Quantity::new(1.0f64, Units::single("m"));
        let err = to_number::<f64, f64>(&q).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot convert m (L) to 1 (1): incompatible dimensions"
        );
    }
}
