//! Dimensional analysis types
//!
//! A physical dimension is a set of `(symbol, power)` atoms such as
//! `{Length: 1, Time: -1}`. Atoms with power zero are never stored, so two
//! `Dimensions` are equal exactly when they describe the same dimension.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uconv_core::Exponent;

/// Symbols of the 7 SI base dimensions
pub const LENGTH: &str = "Length";
pub const MASS: &str = "Mass";
pub const TIME: &str = "Time";
pub const CURRENT: &str = "Current";
pub const TEMPERATURE: &str = "Temperature";
pub const AMOUNT: &str = "Amount";
pub const LUMINOSITY: &str = "Luminosity";

/// Represents the dimensions of a physical quantity
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dimensions {
    atoms: BTreeMap<String, Exponent>,
}

impl Dimensions {
    /// Dimensionless (no atoms)
    pub fn none() -> Self {
        Self::default()
    }

    /// A single base dimension to the first power
    pub fn base(symbol: &str) -> Self {
        let mut atoms = BTreeMap::new();
        atoms.insert(symbol.to_string(), Exponent::ONE);
        Dimensions { atoms }
    }

    /// Build from `(symbol, power)` pairs; repeated symbols add up
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Exponent)>,
    {
        let mut dims = Dimensions::none();
        for (symbol, power) in pairs {
            dims.accumulate(symbol, &power);
        }
        dims
    }

    fn accumulate(&mut self, symbol: &str, power: &Exponent) {
        let sum = match self.atoms.get(symbol) {
            Some(existing) => existing + power,
            None => power.clone(),
        };
        if sum.is_zero() {
            self.atoms.remove(symbol);
        } else {
            self.atoms.insert(symbol.to_string(), sum);
        }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.atoms.is_empty()
    }

    /// True if this is exactly `symbol^1` and nothing else
    pub fn is_pure(&self, symbol: &str) -> bool {
        self.atoms.len() == 1 && self.atoms.get(symbol).is_some_and(Exponent::is_one)
    }

    /// Power of one base dimension (zero if absent)
    pub fn get(&self, symbol: &str) -> Exponent {
        self.atoms.get(symbol).cloned().unwrap_or(Exponent::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Exponent)> {
        self.atoms.iter().map(|(s, p)| (s.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Multiply dimensions (add exponents)
    pub fn multiply(&self, other: &Dimensions) -> Dimensions {
        let mut result = self.clone();
        for (symbol, power) in &other.atoms {
            result.accumulate(symbol, power);
        }
        result
    }

    /// Divide dimensions (subtract exponents)
    pub fn divide(&self, other: &Dimensions) -> Dimensions {
        self.multiply(&other.invert())
    }

    /// Raise to a power (multiply exponents)
    pub fn power(&self, exp: &Exponent) -> Dimensions {
        let mut result = Dimensions::none();
        for (symbol, power) in &self.atoms {
            result.accumulate(symbol, &(power * exp));
        }
        result
    }

    /// Invert dimensions (negate exponents)
    pub fn invert(&self) -> Dimensions {
        self.power(&Exponent::integer(-1))
    }
}

fn short_name(symbol: &str) -> &str {
    match symbol {
        LENGTH => "L",
        MASS => "M",
        TIME => "T",
        CURRENT => "I",
        TEMPERATURE => "Θ",
        AMOUNT => "N",
        LUMINOSITY => "J",
        other => other,
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.atoms.is_empty() {
            return write!(f, "1");
        }

        let parts: Vec<String> = self
            .atoms
            .iter()
            .map(|(symbol, power)| {
                if power.is_one() {
                    short_name(symbol).to_string()
                } else {
                    format!("{}^{}", short_name(symbol), power)
                }
            })
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}
