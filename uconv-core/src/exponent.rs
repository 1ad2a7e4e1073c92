//! Rational exponents for unit and dimension powers

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use dashu_int::{IBig, UBig};
use dashu_ratio::RBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::factor::exact_to_f64;
use crate::NumberError;

/// A rational power such as `2`, `-1` or `1/2`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Exponent(RBig);

impl Exponent {
    pub const ZERO: Exponent = Exponent(RBig::ZERO);
    pub const ONE: Exponent = Exponent(RBig::ONE);

    /// Create `num / den`; a zero denominator is rejected
    pub fn new(num: i64, den: u64) -> Result<Self, NumberError> {
        if den == 0 {
            return Err(NumberError::DivisionByZero);
        }
        Ok(Exponent(RBig::from_parts(IBig::from(num), UBig::from(den))))
    }

    pub fn integer(n: i64) -> Self {
        Exponent(RBig::from(IBig::from(n)))
    }

    /// Parse "2", "-3" or "1/2"
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();
        let parse_err = || NumberError::ParseError(s.to_string());

        match s.split_once('/') {
            Some((num, den)) => {
                let num: IBig = num.trim().parse().map_err(|_| parse_err())?;
                let den: UBig = den.trim().parse().map_err(|_| parse_err())?;
                if den == UBig::ZERO {
                    return Err(NumberError::DivisionByZero);
                }
                Ok(Exponent(RBig::from_parts(num, den)))
            }
            None => {
                let n: IBig = s.parse().map_err(|_| parse_err())?;
                Ok(Exponent(RBig::from(n)))
            }
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0 == RBig::ZERO
    }

    pub fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }

    pub fn is_integer(&self) -> bool {
        *self.0.denominator() == UBig::ONE
    }

    /// Integer value, if integral and within `i32`
    pub fn to_i32(&self) -> Option<i32> {
        if !self.is_integer() {
            return None;
        }
        self.0.numerator().clone().try_into().ok()
    }

    pub fn to_f64(&self) -> f64 {
        exact_to_f64(&self.0)
    }

    pub fn as_rational(&self) -> &RBig {
        &self.0
    }
}

impl From<i32> for Exponent {
    fn from(n: i32) -> Self {
        Exponent::integer(n as i64)
    }
}

impl From<RBig> for Exponent {
    fn from(r: RBig) -> Self {
        Exponent(r)
    }
}

impl Add for &Exponent {
    type Output = Exponent;
    fn add(self, rhs: &Exponent) -> Exponent {
        Exponent(&self.0 + &rhs.0)
    }
}

impl Sub for &Exponent {
    type Output = Exponent;
    fn sub(self, rhs: &Exponent) -> Exponent {
        Exponent(&self.0 - &rhs.0)
    }
}

impl Mul for &Exponent {
    type Output = Exponent;
    fn mul(self, rhs: &Exponent) -> Exponent {
        Exponent(&self.0 * &rhs.0)
    }
}

impl Neg for &Exponent {
    type Output = Exponent;
    fn neg(self) -> Exponent {
        Exponent(RBig::ZERO - &self.0)
    }
}

impl Default for Exponent {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Exponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.0.numerator())
        } else {
            write!(f, "{}/{}", self.0.numerator(), self.0.denominator())
        }
    }
}

impl Serialize for Exponent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Exponent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
