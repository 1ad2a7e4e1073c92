//! uconv core - numeric primitives for unit conversion
//!
//! This crate provides the numeric types the conversion engine is built on:
//! - `Factor`: exact rational multiplier with a floating fallback
//! - `Exponent`: rational power of a unit or dimension
//! - `Scalar`: numeric types a quantity can be backed by
//! - `NumberError`: structured numeric failures with stable codes

mod error;
mod exponent;
pub mod factor;
mod scalar;

pub use error::{codes, NumberError};
pub use exponent::Exponent;
pub use factor::{ratio, Factor};
pub use scalar::{cast, Scalar};

/// Re-exported so callers can name exact values without a direct dashu dependency
pub use dashu_ratio::RBig;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{cast, ratio, Exponent, Factor, NumberError, RBig, Scalar};
    pub use crate::error::codes;
}
