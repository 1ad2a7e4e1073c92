//! Compound unit representation
//!
//! A `Units` value is a product of `UnitAtom`s, each a registered symbol
//! with an SI prefix (as a power of ten) raised to a rational power:
//! `km·s^-1` is `[(m, tens 3, 1), (s, tens 0, -1)]`.

use std::fmt;

use serde::{Deserialize, Serialize};
use uconv_core::Exponent;

/// SI prefixes, stored on an atom as a power of ten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    Quecto,
    Ronto,
    Yocto,
    Zepto,
    Atto,
    Femto,
    Pico,
    Nano,
    Micro,
    Milli,
    Centi,
    Deci,
    Deca,
    Hecto,
    Kilo,
    Mega,
    Giga,
    Tera,
    Peta,
    Exa,
    Zetta,
    Yotta,
    Ronna,
    Quetta,
}

impl Prefix {
    const ALL: [Prefix; 24] = [
        Prefix::Quecto, Prefix::Ronto, Prefix::Yocto, Prefix::Zepto, Prefix::Atto,
        Prefix::Femto, Prefix::Pico, Prefix::Nano, Prefix::Micro, Prefix::Milli,
        Prefix::Centi, Prefix::Deci, Prefix::Deca, Prefix::Hecto, Prefix::Kilo,
        Prefix::Mega, Prefix::Giga, Prefix::Tera, Prefix::Peta, Prefix::Exa,
        Prefix::Zetta, Prefix::Yotta, Prefix::Ronna, Prefix::Quetta,
    ];

    /// Power of ten this prefix stands for
    pub fn tens(self) -> i32 {
        match self {
            Prefix::Quecto => -30,
            Prefix::Ronto => -27,
            Prefix::Yocto => -24,
            Prefix::Zepto => -21,
            Prefix::Atto => -18,
            Prefix::Femto => -15,
            Prefix::Pico => -12,
            Prefix::Nano => -9,
            Prefix::Micro => -6,
            Prefix::Milli => -3,
            Prefix::Centi => -2,
            Prefix::Deci => -1,
            Prefix::Deca => 1,
            Prefix::Hecto => 2,
            Prefix::Kilo => 3,
            Prefix::Mega => 6,
            Prefix::Giga => 9,
            Prefix::Tera => 12,
            Prefix::Peta => 15,
            Prefix::Exa => 18,
            Prefix::Zetta => 21,
            Prefix::Yotta => 24,
            Prefix::Ronna => 27,
            Prefix::Quetta => 30,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Prefix::Quecto => "q",
            Prefix::Ronto => "r",
            Prefix::Yocto => "y",
            Prefix::Zepto => "z",
            Prefix::Atto => "a",
            Prefix::Femto => "f",
            Prefix::Pico => "p",
            Prefix::Nano => "n",
            Prefix::Micro => "μ",
            Prefix::Milli => "m",
            Prefix::Centi => "c",
            Prefix::Deci => "d",
            Prefix::Deca => "da",
            Prefix::Hecto => "h",
            Prefix::Kilo => "k",
            Prefix::Mega => "M",
            Prefix::Giga => "G",
            Prefix::Tera => "T",
            Prefix::Peta => "P",
            Prefix::Exa => "E",
            Prefix::Zetta => "Z",
            Prefix::Yotta => "Y",
            Prefix::Ronna => "R",
            Prefix::Quetta => "Q",
        }
    }

    /// The prefix for a power of ten, if one is named
    pub fn from_tens(tens: i32) -> Option<Prefix> {
        Self::ALL.iter().copied().find(|p| p.tens() == tens)
    }
}

/// One `symbol^power` factor of a compound unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitAtom {
    /// Registered unit symbol (e.g., "m", "s", "degC")
    pub symbol: String,
    /// SI prefix as a power of ten (kilo = 3)
    #[serde(default)]
    pub tens: i32,
    /// Exponent in the compound unit
    #[serde(default)]
    pub power: Exponent,
}

impl UnitAtom {
    /// Unprefixed atom to the first power
    pub fn new(symbol: &str) -> Self {
        UnitAtom {
            symbol: symbol.to_string(),
            tens: 0,
            power: Exponent::ONE,
        }
    }

    pub fn prefixed(prefix: Prefix, symbol: &str) -> Self {
        UnitAtom {
            tens: prefix.tens(),
            ..UnitAtom::new(symbol)
        }
    }

    /// Same atom with an arbitrary power-of-ten prefix
    pub fn with_tens(mut self, tens: i32) -> Self {
        self.tens = tens;
        self
    }

    pub fn pow(mut self, power: impl Into<Exponent>) -> Self {
        self.power = power.into();
        self
    }

    fn sort_key(&self) -> (&str, i32) {
        (self.symbol.as_str(), self.tens)
    }
}

impl fmt::Display for UnitAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.tens, Prefix::from_tens(self.tens)) {
            (0, _) => write!(f, "{}", self.symbol)?,
            (_, Some(prefix)) => write!(f, "{}{}", prefix.symbol(), self.symbol)?,
            (tens, None) => write!(f, "(1e{} {})", tens, self.symbol)?,
        }
        if !self.power.is_one() {
            write!(f, "^{}", self.power)?;
        }
        Ok(())
    }
}

/// A compound unit in canonical form
///
/// Atoms are sorted by symbol then prefix. Atoms that share both are merged
/// by adding their powers, and atoms whose power cancels to zero are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<UnitAtom>", into = "Vec<UnitAtom>")]
pub struct Units {
    atoms: Vec<UnitAtom>,
}

impl Units {
    /// The dimensionless unit (no atoms)
    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// Canonicalize a list of atoms
    pub fn from_atoms(atoms: impl IntoIterator<Item = UnitAtom>) -> Self {
        let mut sorted: Vec<UnitAtom> = atoms.into_iter().collect();
        sorted.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let mut merged: Vec<UnitAtom> = Vec::with_capacity(sorted.len());
        for atom in sorted {
            let same_key = merged.last().is_some_and(|last| last.sort_key() == atom.sort_key());
            if !same_key {
                merged.push(atom);
            } else if let Some(last) = merged.last_mut() {
                last.power = &last.power + &atom.power;
            }
        }
        merged.retain(|a| !a.power.is_zero());

        Units { atoms: merged }
    }

    /// An unprefixed single-symbol unit
    pub fn single(symbol: &str) -> Self {
        Self::from_atoms([UnitAtom::new(symbol)])
    }

    pub fn atoms(&self) -> &[UnitAtom] {
        &self.atoms
    }

    pub fn is_dimensionless_unit(&self) -> bool {
        self.atoms.is_empty()
    }

    /// The only atom, if this unit has exactly one
    pub fn sole_atom(&self) -> Option<&UnitAtom> {
        match self.atoms.as_slice() {
            [atom] => Some(atom),
            _ => None,
        }
    }

    /// Multiply units (concatenate atoms)
    pub fn multiply(&self, other: &Units) -> Units {
        Units::from_atoms(self.atoms.iter().chain(other.atoms.iter()).cloned())
    }

    /// Divide units
    pub fn divide(&self, other: &Units) -> Units {
        self.multiply(&other.power(&Exponent::integer(-1)))
    }

    /// Raise every atom to a power
    pub fn power(&self, exp: &Exponent) -> Units {
        Units::from_atoms(self.atoms.iter().map(|a| UnitAtom {
            power: &a.power * exp,
            ..a.clone()
        }))
    }
}

impl From<Vec<UnitAtom>> for Units {
    fn from(atoms: Vec<UnitAtom>) -> Self {
        Units::from_atoms(atoms)
    }
}

impl From<Units> for Vec<UnitAtom> {
    fn from(units: Units) -> Self {
        units.atoms
    }
}

impl From<UnitAtom> for Units {
    fn from(atom: UnitAtom) -> Self {
        Units::from_atoms([atom])
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.atoms.is_empty() {
            return write!(f, "1");
        }
        let parts: Vec<String> = self.atoms.iter().map(|a| a.to_string()).collect();
        write!(f, "{}", parts.join("·"))
    }
}
