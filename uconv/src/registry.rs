//! Unit registry: what each unit symbol means
//!
//! The conversion engine only reads from a registry through `UnitLookup`.
//! `UnitTable` is the in-memory implementation; it is filled once and then
//! shared read-only.

use std::collections::HashMap;

use uconv_core::factor::exact_to_f64;
use uconv_core::{Exponent, RBig};

use crate::{ConversionError, Dimensions, UnitAtom};

/// Magnitude of one unit in the SI base unit of its dimension
///
/// The true factor is `inexact * exact`. Units related to SI by a rational
/// number keep `inexact == 1.0`; units tied to an irrational or measured
/// constant keep `exact == 1` and carry everything in `inexact`.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseFactor {
    pub inexact: f64,
    pub exact: RBig,
}

impl BaseFactor {
    pub fn exact(exact: RBig) -> Self {
        BaseFactor { inexact: 1.0, exact }
    }

    pub fn inexact(inexact: f64) -> Self {
        BaseFactor { inexact, exact: RBig::ONE }
    }

    pub fn to_f64(&self) -> f64 {
        self.inexact * exact_to_f64(&self.exact)
    }
}

/// Read-only view of a unit registry
pub trait UnitLookup {
    /// Dimensions of one unit symbol
    fn dimension(&self, symbol: &str) -> Result<Dimensions, ConversionError>;

    fn base_factor(&self, symbol: &str) -> Result<BaseFactor, ConversionError>;

    /// Zero-point shift in the unit's own (unprefixed) scale; zero for
    /// non-affine units
    fn temperature_offset(&self, symbol: &str) -> Result<RBig, ConversionError>;

    /// Preferred unit for a base dimension symbol (e.g., `Mass -> kg`)
    fn base_unit(&self, dimension: &str) -> Option<UnitAtom>;

    /// Power of ten an atom contributes through its prefix
    fn tens_exponent(&self, atom: &UnitAtom) -> Result<Exponent, ConversionError> {
        self.dimension(&atom.symbol)?;
        Ok(&Exponent::integer(atom.tens as i64) * &atom.power)
    }
}

/// One registered unit
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDef {
    /// The unit symbol (e.g., "m", "h", "degC")
    pub symbol: String,
    /// The unit name (e.g., "meter", "hour", "celsius")
    pub name: String,
    pub dimension: Dimensions,
    pub base_factor: BaseFactor,
    /// Offset for non-proportional units like Celsius and Fahrenheit
    pub offset: RBig,
}

impl UnitDef {
    /// Create a unit with proportional conversion (no offset)
    pub fn new(symbol: &str, name: &str, dimension: Dimensions, base_factor: BaseFactor) -> Self {
        UnitDef {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            base_factor,
            offset: RBig::ZERO,
        }
    }

    /// Create a unit with offset (for temperature conversions)
    pub fn with_offset(
        symbol: &str,
        name: &str,
        dimension: Dimensions,
        base_factor: BaseFactor,
        offset: RBig,
    ) -> Self {
        UnitDef {
            offset,
            ..UnitDef::new(symbol, name, dimension, base_factor)
        }
    }

    pub fn has_offset(&self) -> bool {
        self.offset != RBig::ZERO
    }
}

/// Registry of known units
#[derive(Debug, Clone, Default)]
pub struct UnitTable {
    units: HashMap<String, UnitDef>,
    aliases: HashMap<String, String>,
    base_units: HashMap<String, UnitAtom>,
}

impl UnitTable {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a unit by symbol or alias
    pub fn get(&self, symbol: &str) -> Option<&UnitDef> {
        if let Some(unit) = self.units.get(symbol) {
            return Some(unit);
        }
        self.aliases
            .get(symbol)
            .and_then(|canonical| self.units.get(canonical))
    }

    fn lookup(&self, symbol: &str) -> Result<&UnitDef, ConversionError> {
        self.get(symbol)
            .ok_or_else(|| ConversionError::UnknownUnit(symbol.to_string()))
    }

    /// Get all unit symbols
    pub fn symbols(&self) -> Vec<&str> {
        self.units.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn register(&mut self, unit: UnitDef) {
        self.units.insert(unit.symbol.clone(), unit);
    }

    pub fn alias(&mut self, alias: &str, symbol: &str) {
        self.aliases.insert(alias.to_string(), symbol.to_string());
    }

    /// Declare the preferred unit of a base dimension
    pub fn base(&mut self, dimension: &str, atom: UnitAtom) {
        self.base_units.insert(dimension.to_string(), atom);
    }

    /// Builder form of `register`
    pub fn with_unit(mut self, unit: UnitDef) -> Self {
        self.register(unit);
        self
    }
}

impl UnitLookup for UnitTable {
    fn dimension(&self, symbol: &str) -> Result<Dimensions, ConversionError> {
        Ok(self.lookup(symbol)?.dimension.clone())
    }

    fn base_factor(&self, symbol: &str) -> Result<BaseFactor, ConversionError> {
        Ok(self.lookup(symbol)?.base_factor.clone())
    }

    fn temperature_offset(&self, symbol: &str) -> Result<RBig, ConversionError> {
        Ok(self.lookup(symbol)?.offset.clone())
    }

    fn base_unit(&self, dimension: &str) -> Option<UnitAtom> {
        self.base_units.get(dimension).cloned()
    }
}
