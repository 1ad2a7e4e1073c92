//! Numeric backing types for quantities
//!
//! `Scalar` is what a `Quantity` can hold. Floats follow float semantics,
//! `RBig` stays exact, and integers refuse any result that is not an exact
//! integer instead of truncating.

use std::fmt;

use dashu_int::IBig;
use dashu_ratio::RBig;

use crate::factor::{exact_to_f64, mul_f64_exact};
use crate::{Factor, NumberError};

/// A numeric type that conversion factors and offsets can be applied to
pub trait Scalar: Clone + PartialEq + fmt::Debug + Sized {
    /// Short type name used in error messages
    const NAME: &'static str;

    /// Multiply by a conversion factor
    fn scale(&self, factor: &Factor) -> Result<Self, NumberError>;

    /// Add an exact offset (affine conversions)
    fn shift(&self, offset: &RBig) -> Result<Self, NumberError>;

    fn to_f64(&self) -> f64;

    /// Exact rational view of the value; `None` for floating types
    fn to_exact(&self) -> Option<RBig>;

    fn from_f64(value: f64) -> Result<Self, NumberError>;

    fn from_exact(value: &RBig) -> Result<Self, NumberError>;
}

/// Convert between backing types, going through the exact view when the
/// source has one.
pub fn cast<T: Scalar, U: Scalar>(value: &T) -> Result<U, NumberError> {
    match value.to_exact() {
        Some(r) => U::from_exact(&r),
        None => U::from_f64(value.to_f64()),
    }
}

impl Scalar for f64 {
    const NAME: &'static str = "f64";

    fn scale(&self, factor: &Factor) -> Result<Self, NumberError> {
        Ok(match factor {
            Factor::Exact(r) => mul_f64_exact(*self, r),
            Factor::Approx(f) => self * f,
        })
    }

    fn shift(&self, offset: &RBig) -> Result<Self, NumberError> {
        Ok(self + exact_to_f64(offset))
    }

    fn to_f64(&self) -> f64 {
        *self
    }

    fn to_exact(&self) -> Option<RBig> {
        None
    }

    fn from_f64(value: f64) -> Result<Self, NumberError> {
        Ok(value)
    }

    fn from_exact(value: &RBig) -> Result<Self, NumberError> {
        Ok(exact_to_f64(value))
    }
}

impl Scalar for f32 {
    const NAME: &'static str = "f32";

    fn scale(&self, factor: &Factor) -> Result<Self, NumberError> {
        (*self as f64).scale(factor).map(|v| v as f32)
    }

    fn shift(&self, offset: &RBig) -> Result<Self, NumberError> {
        Ok((*self as f64 + exact_to_f64(offset)) as f32)
    }

    fn to_f64(&self) -> f64 {
        *self as f64
    }

    fn to_exact(&self) -> Option<RBig> {
        None
    }

    fn from_f64(value: f64) -> Result<Self, NumberError> {
        Ok(value as f32)
    }

    fn from_exact(value: &RBig) -> Result<Self, NumberError> {
        Ok(exact_to_f64(value) as f32)
    }
}

impl Scalar for RBig {
    const NAME: &'static str = "RBig";

    fn scale(&self, factor: &Factor) -> Result<Self, NumberError> {
        match factor {
            Factor::Exact(r) => Ok(self * r),
            Factor::Approx(f) => Ok(self * &<RBig as Scalar>::from_f64(*f)?),
        }
    }

    fn shift(&self, offset: &RBig) -> Result<Self, NumberError> {
        Ok(self + offset)
    }

    fn to_f64(&self) -> f64 {
        exact_to_f64(self)
    }

    fn to_exact(&self) -> Option<RBig> {
        Some(self.clone())
    }

    fn from_f64(value: f64) -> Result<Self, NumberError> {
        RBig::try_from(value).map_err(|_| NumberError::NotFinite(value))
    }

    fn from_exact(value: &RBig) -> Result<Self, NumberError> {
        Ok(value.clone())
    }
}

/// Integers scale through an exact product and must land on an integer.
macro_rules! impl_integer_scalar {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                const NAME: &'static str = stringify!($t);

                fn scale(&self, factor: &Factor) -> Result<Self, NumberError> {
                    match factor {
                        Factor::Exact(r) => Self::from_exact(&(&RBig::from(IBig::from(*self)) * r)),
                        Factor::Approx(f) => Err(NumberError::Inexact {
                            value: format!("{} * {}", self, f),
                            target: Self::NAME,
                        }),
                    }
                }

                fn shift(&self, offset: &RBig) -> Result<Self, NumberError> {
                    Self::from_exact(&(&RBig::from(IBig::from(*self)) + offset))
                }

                fn to_f64(&self) -> f64 {
                    *self as f64
                }

                fn to_exact(&self) -> Option<RBig> {
                    Some(RBig::from(IBig::from(*self)))
                }

                fn from_f64(value: f64) -> Result<Self, NumberError> {
                    if !value.is_finite() {
                        return Err(NumberError::NotFinite(value));
                    }
                    // MIN is a power of two, so both bounds are exact in f64
                    let min = <$t>::MIN as f64;
                    if value.fract() != 0.0 || value < min || value >= -min {
                        return Err(NumberError::NotRepresentable {
                            value: value.to_string(),
                            target: Self::NAME,
                        });
                    }
                    Ok(value as $t)
                }

                fn from_exact(value: &RBig) -> Result<Self, NumberError> {
                    let not_representable = || NumberError::NotRepresentable {
                        value: value.to_string(),
                        target: Self::NAME,
                    };
                    if *value.denominator() != dashu_int::UBig::ONE {
                        return Err(not_representable());
                    }
                    value.numerator().clone().try_into().map_err(|_| not_representable())
                }
            }
        )*
    };
}

impl_integer_scalar!(i64, i32);
