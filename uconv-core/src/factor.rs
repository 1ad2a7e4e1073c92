//! Conversion factors: exact rationals with a floating fallback
//!
//! A `Factor` is the multiplier `m` with `value_in_target = value_in_source * m`.
//! It stays an exact `RBig` whenever the arithmetic allows and degrades to
//! `f64` only when an irrational constant or an oversized power of ten is
//! involved.

use std::fmt;

use dashu_base::BitTest;
use dashu_int::{IBig, UBig};
use dashu_ratio::RBig;

use crate::NumberError;

/// Widest integer that `f64` holds exactly
const F64_EXACT_BITS: usize = 53;

/// Build an exact rational `num / den`.
///
/// A zero denominator yields zero rather than panicking.
pub fn ratio(num: i64, den: u64) -> RBig {
    if den == 0 {
        return RBig::ZERO;
    }
    RBig::from_parts(IBig::from(num), UBig::from(den))
}

/// Exact integer power; numerator and denominator are raised separately.
pub fn pow_exact(base: &RBig, exp: i32) -> Result<RBig, NumberError> {
    let n = exp.unsigned_abs() as usize;
    let result = RBig::from_parts(base.numerator().pow(n), base.denominator().pow(n));

    if exp < 0 {
        if result == RBig::ZERO {
            return Err(NumberError::DivisionByZero);
        }
        Ok(RBig::ONE / result)
    } else {
        Ok(result)
    }
}

/// Nearest `f64` to an exact rational
pub fn exact_to_f64(r: &RBig) -> f64 {
    r.to_f64().value()
}

/// `10^exp` as an exact unsigned integer
pub fn ten_pow(exp: u32) -> UBig {
    UBig::from(10u8).pow(exp as usize)
}

/// True if both numerator and denominator of `r` fit in `bits` bits
pub fn fits_bits(r: &RBig, bits: usize) -> bool {
    r.numerator().bit_len() <= bits && r.denominator().bit_len() <= bits
}

/// Multiply a float by an exact rational, keeping `num` and `den` exact when
/// they fit in the `f64` mantissa.
pub fn mul_f64_exact(value: f64, r: &RBig) -> f64 {
    if fits_bits(r, F64_EXACT_BITS) {
        let num: i64 = match r.numerator().clone().try_into() {
            Ok(n) => n,
            Err(_) => return value * exact_to_f64(r),
        };
        let den: u64 = match r.denominator().clone().try_into() {
            Ok(d) => d,
            Err(_) => return value * exact_to_f64(r),
        };
        value * num as f64 / den as f64
    } else {
        value * exact_to_f64(r)
    }
}

/// Multiplier between two unit representations
#[derive(Debug, Clone, PartialEq)]
pub enum Factor {
    /// Exact rational multiplier
    Exact(RBig),
    /// Floating approximation, used when no exact ratio is available
    Approx(f64),
}

impl Factor {
    /// The exact identity factor
    pub fn one() -> Self {
        Factor::Exact(RBig::ONE)
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Factor::Exact(_))
    }

    /// True only for the exact identity; `Approx(1.0)` is not exactly one.
    pub fn is_one(&self) -> bool {
        matches!(self, Factor::Exact(r) if *r == RBig::ONE)
    }

    /// The exact value, if there is one
    pub fn as_exact(&self) -> Option<&RBig> {
        match self {
            Factor::Exact(r) => Some(r),
            Factor::Approx(_) => None,
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Factor::Exact(r) => exact_to_f64(r),
            Factor::Approx(f) => *f,
        }
    }

    /// Compose two factors. Exact only if both are exact.
    pub fn mul(&self, other: &Factor) -> Factor {
        match (self, other) {
            (Factor::Exact(a), Factor::Exact(b)) => Factor::Exact(a * b),
            (Factor::Exact(a), Factor::Approx(b)) | (Factor::Approx(b), Factor::Exact(a)) => {
                Factor::Approx(mul_f64_exact(*b, a))
            }
            (Factor::Approx(a), Factor::Approx(b)) => Factor::Approx(a * b),
        }
    }

    /// Inverse factor
    pub fn recip(&self) -> Result<Factor, NumberError> {
        match self {
            Factor::Exact(r) => {
                if *r == RBig::ZERO {
                    Err(NumberError::DivisionByZero)
                } else {
                    Ok(Factor::Exact(RBig::ONE / r.clone()))
                }
            }
            Factor::Approx(f) => {
                if *f == 0.0 {
                    Err(NumberError::DivisionByZero)
                } else {
                    Ok(Factor::Approx(1.0 / f))
                }
            }
        }
    }
}

impl Default for Factor {
    fn default() -> Self {
        Self::one()
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factor::Exact(r) => write!(f, "{}", r),
            Factor::Approx(x) => write!(f, "~{}", x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_reduces() {
        assert_eq!(ratio(3602, 3600), ratio(1801, 1800));
        assert_eq!(ratio(5, 0), RBig::ZERO);
    }

    #[test]
    fn test_pow_exact() {
        let two_thirds = ratio(2, 3);
        assert_eq!(pow_exact(&two_thirds, 2).unwrap(), ratio(4, 9));
        assert_eq!(pow_exact(&two_thirds, -1).unwrap(), ratio(3, 2));
        assert_eq!(pow_exact(&two_thirds, 0).unwrap(), RBig::ONE);
        assert_eq!(pow_exact(&RBig::ZERO, -2), Err(NumberError::DivisionByZero));
    }

    #[test]
    fn test_pow_exact_large_exponent() {
        assert_eq!(pow_exact(&RBig::ONE, 1_000_000_000).unwrap(), RBig::ONE);
        assert_eq!(pow_exact(&ratio(-1, 1), 999_999_999).unwrap(), ratio(-1, 1));
        assert_eq!(pow_exact(&ratio(-1, 2), -3).unwrap(), ratio(-8, 1));
    }

    #[test]
    fn test_ten_pow() {
        assert_eq!(ten_pow(0), UBig::ONE);
        assert_eq!(ten_pow(3), UBig::from(1000u32));
        assert_eq!(ten_pow(19), UBig::from(10_000_000_000_000_000_000u64));
        assert_eq!(ten_pow(400).bit_len(), 1329);
    }

    #[test]
    fn test_fits_bits() {
        assert!(fits_bits(&ratio(1801, 1800), 63));
        let big = RBig::from(ten_pow(30));
        assert!(!fits_bits(&big, 63));
        assert!(fits_bits(&big, 128));
    }

    #[test]
    fn test_mul_f64_exact_keeps_integers() {
        assert_eq!(mul_f64_exact(5000.0, &ratio(1, 1000)), 5.0);
        assert_eq!(mul_f64_exact(3.0, &ratio(3048, 10000)), 3.0 * 3048.0 / 10000.0);
    }

    #[test]
    fn test_factor_mul() {
        let a = Factor::Exact(ratio(1, 3600));
        let b = Factor::Exact(ratio(3600, 1));
        assert!(a.mul(&b).is_one());

        let c = Factor::Approx(2.0);
        let product = a.mul(&c);
        assert!(!product.is_exact());
        assert!((product.to_f64() - 2.0 / 3600.0).abs() < 1e-18);
    }

    #[test]
    fn test_factor_recip() {
        let f = Factor::Exact(ratio(9, 5));
        assert_eq!(f.recip().unwrap(), Factor::Exact(ratio(5, 9)));
        assert_eq!(Factor::Approx(0.0).recip(), Err(NumberError::DivisionByZero));
    }

    #[test]
    fn test_display() {
        assert_eq!(Factor::Exact(ratio(1801, 1800)).to_string(), "1801/1800");
        assert_eq!(Factor::Approx(0.5).to_string(), "~0.5");
    }
}
