//! Conversion-factor engine and quantity conversion
//!
//! `convert_factor` computes the multiplier between two unit sets of the same
//! dimension, exact whenever the rational arithmetic stays in range.
//! `uconvert` applies it to a quantity, taking the affine path for plain
//! absolute temperatures.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use uconv_core::factor::{fits_bits, mul_f64_exact, pow_exact, ten_pow};
use uconv_core::{Exponent, Factor, NumberError, RBig, Scalar};

use crate::dimension::TEMPERATURE;
use crate::registry::{UnitLookup, UnitTable};
use crate::units::UNITS;
use crate::{ConversionError, Dimensions, Quantity, UnitAtom, Units};

/// Formula used for a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStrategy {
    /// `(value + offset(source)) * factor - offset(target)`
    PureTemperature,
    /// `value * factor`
    GenericMultiplicative,
}

impl ConversionStrategy {
    /// Only a bare `Temperature^1` dimension is an absolute temperature.
    /// Compound dimensions that include temperature measure differences.
    pub fn for_dimensions(dims: &Dimensions) -> Self {
        if dims.is_pure(TEMPERATURE) {
            ConversionStrategy::PureTemperature
        } else {
            ConversionStrategy::GenericMultiplicative
        }
    }
}

/// Tuning for the exact/floating split
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Bits available to the numerator and denominator of an exact factor
    /// when a power of ten is applied to it
    pub exact_bits: u32,
    /// Relative tolerance for treating the floating part as exactly one
    pub tolerance: f64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            exact_bits: 63,
            tolerance: 4.0 * f64::EPSILON,
        }
    }
}

impl ConvertOptions {
    pub fn with_exact_bits(mut self, bits: u32) -> Self {
        self.exact_bits = bits;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Converts quantities against one registry
pub struct Converter<'r, R: UnitLookup + ?Sized = UnitTable> {
    registry: &'r R,
    options: ConvertOptions,
}

impl<'r, R: UnitLookup + ?Sized> Converter<'r, R> {
    pub fn new(registry: &'r R) -> Self {
        Converter {
            registry,
            options: ConvertOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn registry(&self) -> &'r R {
        self.registry
    }

    /// Dimensions of a compound unit: each atom's dimensions raised to the
    /// atom's power, multiplied together
    pub fn dimension_of(&self, units: &Units) -> Result<Dimensions, ConversionError> {
        let mut dims = Dimensions::none();
        for atom in units.atoms() {
            let atom_dims = self.registry.dimension(&atom.symbol)?;
            dims = dims.multiply(&atom_dims.power(&atom.power));
        }
        Ok(dims)
    }

    /// True if `a` and `b` measure the same dimension
    pub fn compatible(&self, a: &Units, b: &Units) -> Result<bool, ConversionError> {
        Ok(self.dimension_of(a)? == self.dimension_of(b)?)
    }

    fn check_dimensions(&self, target: &Units, source: &Units) -> Result<Dimensions, ConversionError> {
        let target_dim = self.dimension_of(target)?;
        let source_dim = self.dimension_of(source)?;
        if target_dim != source_dim {
            debug!(from = %source, to = %target, "rejected conversion between incompatible dimensions");
            return Err(ConversionError::mismatch(source, target, source_dim, target_dim));
        }
        Ok(target_dim)
    }

    /// Multiplier `m` with `value_in_target = value_in_source * m`
    pub fn convert_factor(&self, target: &Units, source: &Units) -> Result<Factor, ConversionError> {
        self.check_dimensions(target, source)?;
        self.factor_unchecked(target, source)
    }

    fn factor_unchecked(&self, target: &Units, source: &Units) -> Result<Factor, ConversionError> {
        if target == source {
            return Ok(Factor::one());
        }

        let (inexact_target, exact_target) = self.side_factor(target)?;
        let (inexact_source, exact_source) = self.side_factor(source)?;
        if exact_target == RBig::ZERO {
            return Err(NumberError::DivisionByZero.into());
        }

        let mut a = inexact_source / inexact_target;
        let mut ex = &exact_source / &exact_target;

        let pow = &self.tens_sum(source)? - &self.tens_sum(target)?;
        self.apply_tens(&pow, &mut a, &mut ex);

        if (a - 1.0).abs() <= self.options.tolerance {
            trace!(factor = %ex, "floating part is one, factor stays exact");
            Ok(Factor::Exact(ex))
        } else {
            Ok(Factor::Approx(mul_f64_exact(a, &ex)))
        }
    }

    /// Product of the registry base factors of every atom, raised to the
    /// atom's power, as a `(float, exact)` pair
    fn side_factor(&self, units: &Units) -> Result<(f64, RBig), ConversionError> {
        let mut inexact = 1.0;
        let mut exact = RBig::ONE;

        for atom in units.atoms() {
            let base = self.registry.base_factor(&atom.symbol)?;
            match atom.power.to_i32() {
                Some(p) => {
                    inexact *= base.inexact.powi(p);
                    exact = &exact * &pow_exact(&base.exact, p)?;
                }
                // A rational power of a rational is generally irrational
                None => inexact *= base.to_f64().powf(atom.power.to_f64()),
            }
        }

        Ok((inexact, exact))
    }

    fn tens_sum(&self, units: &Units) -> Result<Exponent, ConversionError> {
        let mut sum = Exponent::ZERO;
        for atom in units.atoms() {
            sum = &sum + &self.registry.tens_exponent(atom)?;
        }
        Ok(sum)
    }

    /// Apply `10^pow` to the exact part when it stays within `exact_bits`,
    /// otherwise to the floating part.
    fn apply_tens(&self, pow: &Exponent, a: &mut f64, ex: &mut RBig) {
        if pow.is_zero() {
            return;
        }

        let Some(k) = pow.to_i32() else {
            trace!(pow = %pow, reason = "fractional", "folding power of ten into float");
            *a *= 10f64.powf(pow.to_f64());
            return;
        };

        let bits = self.options.exact_bits as usize;
        let magnitude = k.unsigned_abs();
        if magnitude as f64 * std::f64::consts::LOG2_10 >= bits as f64 {
            trace!(pow = k, reason = "power of ten out of range", "folding power of ten into float");
            *a *= 10f64.powi(k);
            return;
        }

        let scale = RBig::from(ten_pow(magnitude));
        let candidate = if k > 0 { &*ex * &scale } else { &*ex / &scale };
        if fits_bits(&candidate, bits) {
            *ex = candidate;
        } else {
            trace!(pow = k, reason = "scaled ratio out of range", "folding power of ten into float");
            *a *= 10f64.powi(k);
        }
    }

    /// Zero-point offset of a unit, in that unit's own scale
    ///
    /// Only a lone atom to the first power carries an offset. An offset unit
    /// buried in a compound (`degC·km·m^-1`) has no single zero point.
    fn offset_of(&self, units: &Units) -> Result<RBig, ConversionError> {
        let atom = match units.sole_atom() {
            Some(atom) if atom.power.is_one() => atom,
            _ => {
                for atom in units.atoms() {
                    if self.registry.temperature_offset(&atom.symbol)? != RBig::ZERO {
                        return Err(ConversionError::CompoundOffset(units.clone()));
                    }
                }
                return Ok(RBig::ZERO);
            }
        };

        let offset = self.registry.temperature_offset(&atom.symbol)?;
        if offset == RBig::ZERO || atom.tens == 0 {
            return Ok(offset);
        }

        // The registry states offsets for the bare unit
        let shift = RBig::from(ten_pow(atom.tens.unsigned_abs()));
        Ok(if atom.tens > 0 { &offset / &shift } else { &offset * &shift })
    }

    /// Affine conversion between two temperature scales
    ///
    /// The formula runs on the exact value of the input (a finite float is
    /// an exact binary fraction) and is rounded into `T` once at the end.
    pub fn convert_temperature<T: Scalar>(
        &self,
        target: &Units,
        source: &Units,
        value: &T,
    ) -> Result<T, ConversionError> {
        self.check_dimensions(target, source)?;
        if target == source {
            return Ok(value.clone());
        }

        let scale = self.factor_unchecked(target, source)?;
        let from = self.offset_of(source)?;
        let to = self.offset_of(target)?;
        trace!(from = %source, to = %target, source_offset = %from, target_offset = %to, "affine temperature conversion");

        let exact = match value.to_exact() {
            Some(r) => r,
            None => <RBig as Scalar>::from_f64(value.to_f64())?,
        };
        let scaled = Scalar::scale(&(&exact + &from), &scale)?;
        Ok(T::from_exact(&(&scaled - &to))?)
    }

    /// Express a quantity in `target` units
    pub fn uconvert<T: Scalar>(&self, target: &Units, q: &Quantity<T>) -> Result<Quantity<T>, ConversionError> {
        let dims = self.check_dimensions(target, q.units())?;
        if target == q.units() {
            return Ok(Quantity::new(q.value().clone(), target.clone()));
        }

        let value = match ConversionStrategy::for_dimensions(&dims) {
            ConversionStrategy::PureTemperature => self.convert_temperature(target, q.units(), q.value())?,
            ConversionStrategy::GenericMultiplicative => {
                let factor = self.factor_unchecked(target, q.units())?;
                q.value().scale(&factor)?
            }
        };
        Ok(Quantity::new(value, target.clone()))
    }

    /// Interpret a plain number as a dimensionless quantity in `target`
    pub fn uconvert_number<T: Scalar>(&self, target: &Units, x: T) -> Result<Quantity<T>, ConversionError> {
        let source = Units::dimensionless();
        self.check_dimensions(target, &source)?;
        let factor = self.factor_unchecked(target, &source)?;
        Ok(Quantity::new(x.scale(&factor)?, target.clone()))
    }

    /// The value of `q` in `target` units, without the units
    pub fn ustrip<T: Scalar>(&self, target: &Units, q: &Quantity<T>) -> Result<T, ConversionError> {
        Ok(self.uconvert(target, q)?.into_value())
    }

    /// Convert into the registry's base unit for every dimension `q` carries
    pub fn to_base<T: Scalar>(&self, q: &Quantity<T>) -> Result<Quantity<T>, ConversionError> {
        let dims = self.dimension_of(q.units())?;
        let mut atoms = Vec::with_capacity(dims.len());
        for (symbol, power) in dims.iter() {
            let base = self
                .registry
                .base_unit(symbol)
                .ok_or_else(|| ConversionError::UnknownUnit(format!("base unit for {}", symbol)))?;
            atoms.push(UnitAtom {
                power: &base.power * power,
                ..base
            });
        }
        self.uconvert(&Units::from_atoms(atoms), q)
    }
}

/// `Converter::convert_factor` against the standard table
pub fn convert_factor(target: &Units, source: &Units) -> Result<Factor, ConversionError> {
    Converter::new(&*UNITS).convert_factor(target, source)
}

/// `Converter::uconvert` against the standard table
pub fn uconvert<T: Scalar>(target: &Units, q: &Quantity<T>) -> Result<Quantity<T>, ConversionError> {
    Converter::new(&*UNITS).uconvert(target, q)
}

/// `Converter::uconvert_number` against the standard table
pub fn uconvert_number<T: Scalar>(target: &Units, x: T) -> Result<Quantity<T>, ConversionError> {
    Converter::new(&*UNITS).uconvert_number(target, x)
}

/// `Converter::dimension_of` against the standard table
pub fn dimension_of(units: &Units) -> Result<Dimensions, ConversionError> {
    Converter::new(&*UNITS).dimension_of(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::{LENGTH, MASS, TIME};
    use crate::Prefix;
    use uconv_core::ratio;

    fn u(symbol: &str) -> Units {
        Units::single(symbol)
    }

    fn prefixed(prefix: Prefix, symbol: &str) -> Units {
        Units::from(UnitAtom::prefixed(prefix, symbol))
    }

    fn conv() -> Converter<'static> {
        Converter::new(&*UNITS)
    }

    #[test]
    fn test_strategy() {
        assert_eq!(ConversionStrategy::for_dimensions(&Dimensions::base(TEMPERATURE)), ConversionStrategy::PureTemperature);
        let per_kelvin = Dimensions::base(TEMPERATURE).invert();
        assert_eq!(ConversionStrategy::for_dimensions(&per_kelvin), ConversionStrategy::GenericMultiplicative);
        assert_eq!(ConversionStrategy::for_dimensions(&Dimensions::base(LENGTH)), ConversionStrategy::GenericMultiplicative);
    }

    #[test]
    fn test_dimension_of_compound() {
        let newton_meter = Units::from_atoms([UnitAtom::new("N"), UnitAtom::new("m")]);
        let dims = conv().dimension_of(&newton_meter).unwrap();
        assert_eq!(dims, conv().dimension_of(&u("J")).unwrap());
        assert_eq!(dims.get(MASS), Exponent::ONE);
        assert_eq!(dims.get(TIME), Exponent::integer(-2));
    }

    #[test]
    fn test_identity_is_exact_one() {
        assert!(conv().convert_factor(&u("deg"), &u("deg")).unwrap().is_one());
        assert!(conv().convert_factor(&u("psi"), &u("psi")).unwrap().is_one());
    }

    #[test]
    fn test_prefix_factor() {
        let km = prefixed(Prefix::Kilo, "m");
        assert_eq!(conv().convert_factor(&u("m"), &km).unwrap(), Factor::Exact(ratio(1000, 1)));
        assert_eq!(conv().convert_factor(&km, &u("m")).unwrap(), Factor::Exact(ratio(1, 1000)));

        let ms = prefixed(Prefix::Milli, "s");
        assert_eq!(conv().convert_factor(&u("s"), &ms).unwrap(), Factor::Exact(ratio(1, 1000)));
    }

    #[test]
    fn test_hour_second_exact() {
        let f = conv().convert_factor(&u("h"), &u("s")).unwrap();
        assert_eq!(f, Factor::Exact(ratio(1, 3600)));
    }

    #[test]
    fn test_inch_to_centimeter() {
        let cm = prefixed(Prefix::Centi, "m");
        let f = conv().convert_factor(&cm, &u("in")).unwrap();
        assert_eq!(f, Factor::Exact(ratio(254, 100)));
    }

    #[test]
    fn test_irrational_factor_is_approx() {
        let f = conv().convert_factor(&u("rad"), &u("deg")).unwrap();
        assert!(!f.is_exact());
        assert!((f.to_f64() - std::f64::consts::PI / 180.0).abs() < 1e-18);
    }

    #[test]
    fn test_large_power_of_ten_folds_into_float() {
        let quetta = prefixed(Prefix::Quetta, "m");
        let quecto = prefixed(Prefix::Quecto, "m");
        let f = conv().convert_factor(&quecto, &quetta).unwrap();
        assert!(!f.is_exact());
        assert!((f.to_f64() / 1e60 - 1.0).abs() < 1e-12);

        let wide = conv().with_options(ConvertOptions::default().with_exact_bits(256));
        let exact = wide.convert_factor(&quecto, &quetta).unwrap();
        assert_eq!(exact, Factor::Exact(RBig::from(ten_pow(60))));
    }

    #[test]
    fn test_scaled_ratio_out_of_range_folds() {
        // 10^18 fits in 63 bits, but 10^18 * 3600 does not
        let exa_hours = prefixed(Prefix::Exa, "h");
        let f = conv().convert_factor(&u("s"), &exa_hours).unwrap();
        assert!(!f.is_exact());
        assert!((f.to_f64() / 3.6e21 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fractional_power() {
        let sqrt_km = Units::from(UnitAtom::prefixed(Prefix::Kilo, "m").pow(Exponent::new(1, 2).unwrap()));
        let sqrt_m = Units::from(UnitAtom::new("m").pow(Exponent::new(1, 2).unwrap()));
        let f = conv().convert_factor(&sqrt_m, &sqrt_km).unwrap();
        assert!((f.to_f64() - 1000f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_mismatch() {
        let err = conv().convert_factor(&u("m"), &u("s")).unwrap_err();
        assert!(matches!(err, ConversionError::DimensionalMismatch { .. }));
        assert_eq!(err.to_string(), "cannot convert s (T) to m (L): incompatible dimensions");
    }

    #[test]
    fn test_unknown_unit_propagates() {
        let err = conv().convert_factor(&u("m"), &u("furlong")).unwrap_err();
        assert_eq!(err, ConversionError::UnknownUnit("furlong".into()));
    }

    #[test]
    fn test_temperature_offsets() {
        let c = conv();
        let kelvin = c.convert_temperature(&u("K"), &u("degC"), &ratio(0, 1)).unwrap();
        assert_eq!(kelvin, ratio(27_315, 100));

        let fahrenheit = c.convert_temperature(&u("degF"), &u("degC"), &ratio(100, 1)).unwrap();
        assert_eq!(fahrenheit, ratio(212, 1));
    }

    #[test]
    fn test_integer_temperatures() {
        let c = conv();
        assert_eq!(c.convert_temperature(&u("degF"), &u("degC"), &0i64).unwrap(), 32);
        assert_eq!(c.convert_temperature(&u("degC"), &u("degF"), &32i64).unwrap(), 0);
        assert_eq!(c.convert_temperature(&u("degC"), &u("degF"), &212i32).unwrap(), 100);

        // 273.15 K has no integer form
        let err = c.convert_temperature(&u("K"), &u("degC"), &0i64).unwrap_err();
        assert!(matches!(err, ConversionError::Number(NumberError::NotRepresentable { .. })));
    }

    #[test]
    fn test_float_temperatures_round_once() {
        let c = conv();
        assert_eq!(c.convert_temperature(&u("degF"), &u("degC"), &0.0f64).unwrap(), 32.0);
        assert_eq!(c.convert_temperature(&u("degC"), &u("degF"), &32.0f64).unwrap(), 0.0);
        assert_eq!(c.convert_temperature(&u("K"), &u("degC"), &0.0f64).unwrap(), 273.15);
        assert_eq!(c.convert_temperature(&u("degF"), &u("degC"), &-40.0f32).unwrap(), -40.0);
    }

    #[test]
    fn test_compound_offset_unit_rejected() {
        let scaled_celsius = Units::from_atoms([
            UnitAtom::new("degC"),
            UnitAtom::prefixed(Prefix::Kilo, "m"),
            UnitAtom::new("m").pow(-1),
        ]);
        assert_eq!(
            ConversionStrategy::for_dimensions(&conv().dimension_of(&scaled_celsius).unwrap()),
            ConversionStrategy::PureTemperature
        );

        let q = Quantity::new(0.0f64, scaled_celsius.clone());
        let err = conv().uconvert(&u("K"), &q).unwrap_err();
        assert_eq!(err, ConversionError::CompoundOffset(scaled_celsius));

        // Offset-free compounds still scale
        let scaled_kelvin = Units::from_atoms([
            UnitAtom::new("K"),
            UnitAtom::prefixed(Prefix::Kilo, "m"),
            UnitAtom::new("m").pow(-1),
        ]);
        let q = Quantity::new(ratio(2, 1), scaled_kelvin);
        assert_eq!(*conv().uconvert(&u("K"), &q).unwrap().value(), ratio(2000, 1));
    }

    #[test]
    fn test_prefixed_celsius() {
        let milli_celsius = prefixed(Prefix::Milli, "degC");
        let q = Quantity::new(ratio(1000, 1), milli_celsius);
        let kelvin = conv().uconvert(&u("K"), &q).unwrap();
        assert_eq!(*kelvin.value(), ratio(27_415, 100));
    }

    #[test]
    fn test_uconvert_number() {
        let c = conv();
        let pct = c.uconvert_number(&u("percent"), 0.5f64).unwrap();
        assert_eq!(*pct.value(), 50.0);

        let per_km = prefixed(Prefix::Kilo, "m").power(&Exponent::integer(-1));
        let m_per_km = u("m").multiply(&per_km);
        let q = c.uconvert_number(&m_per_km, ratio(2, 1)).unwrap();
        assert_eq!(*q.value(), ratio(2000, 1));

        assert!(matches!(
            c.uconvert_number(&u("m"), 1.0f64),
            Err(ConversionError::DimensionalMismatch { .. })
        ));
    }

    #[test]
    fn test_ustrip() {
        let q = Quantity::new(1.5f64, u("h"));
        assert_eq!(conv().ustrip(&u("min"), &q).unwrap(), 90.0);
    }

    #[test]
    fn test_to_base() {
        let c = conv();
        let speed = prefixed(Prefix::Kilo, "m").divide(&u("h"));
        let q = Quantity::new(ratio(36, 1), speed);
        let base = c.to_base(&q).unwrap();
        assert_eq!(*base.value(), ratio(10, 1));
        assert_eq!(base.units(), &u("m").divide(&u("s")));

        let grams = Quantity::new(ratio(1500, 1), u("g"));
        assert_eq!(*c.to_base(&grams).unwrap().value(), ratio(3, 2));

        let warm = Quantity::new(ratio(25, 1), u("degC"));
        assert_eq!(*c.to_base(&warm).unwrap().value(), ratio(29_815, 100));
    }

    #[test]
    fn test_compatible() {
        assert!(conv().compatible(&u("J"), &u("cal")).unwrap());
        assert!(!conv().compatible(&u("J"), &u("W")).unwrap());
    }

    #[test]
    fn test_options_serde_defaults() {
        let opts: ConvertOptions = serde_json::from_str(r#"{"exact_bits": 127}"#).unwrap();
        assert_eq!(opts.exact_bits, 127);
        assert_eq!(opts.tolerance, ConvertOptions::default().tolerance);
    }
}
