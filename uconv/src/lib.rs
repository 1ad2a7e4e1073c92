//! uconv - unit conversion with exact factors
//!
//! Quantities carry a value and a compound unit. Conversions check
//! dimensions, then apply a factor that stays an exact rational whenever the
//! registry data and powers of ten allow it, falling back to `f64` otherwise.
//!
//! - `convert_factor`: multiplier between two unit sets
//! - `uconvert`: convert a quantity (affine for plain temperatures)
//! - `uconvert_number`: treat a plain number as dimensionless
//! - `convert_as` / `to_number`: convert and change the backing type
//!
//! The free functions use the standard table `UNITS`; a `Converter` works
//! against any `UnitLookup` with custom `ConvertOptions`.

mod cast;
mod convert;
pub mod dimension;
mod error;
mod quantity;
mod registry;
mod unit;
mod units;

pub use cast::{convert_as, to_number};
pub use convert::{
    convert_factor, dimension_of, uconvert, uconvert_number, ConvertOptions, Converter, ConversionStrategy,
};
pub use dimension::Dimensions;
pub use error::ConversionError;
pub use quantity::Quantity;
pub use registry::{BaseFactor, UnitDef, UnitLookup, UnitTable};
pub use unit::{Prefix, UnitAtom, Units};
pub use units::UNITS;

pub use uconv_core::{cast, codes, ratio, Exponent, Factor, NumberError, RBig, Scalar};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        convert_as, convert_factor, to_number, uconvert, uconvert_number, ConversionError, Converter,
        Dimensions, Factor, Prefix, Quantity, RBig, Scalar, UnitAtom, Units, UNITS,
    };
}
