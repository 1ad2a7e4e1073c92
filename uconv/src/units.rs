//! Standard unit table - SI base units plus common derived, imperial and
//! dimensionless units
//!
//! Prefixed forms (km, mg, μs) are not listed: prefixes live on `UnitAtom`,
//! so every entry here is stated for the bare symbol.

use std::sync::LazyLock;

use dashu_int::IBig;
use uconv_core::factor::ten_pow;
use uconv_core::{ratio, Exponent, RBig};

use crate::dimension::{AMOUNT, CURRENT, LENGTH, LUMINOSITY, MASS, TEMPERATURE, TIME};
use crate::registry::{BaseFactor, UnitDef, UnitTable};
use crate::{Dimensions, Prefix, UnitAtom};

/// Global standard unit table, built once on first use
pub static UNITS: LazyLock<UnitTable> = LazyLock::new(UnitTable::standard);

/// `mantissa * 10^-tens` as an exact rational
fn scaled(mantissa: i64, tens: u32) -> RBig {
    RBig::from_parts(IBig::from(mantissa), ten_pow(tens))
}

fn dims(pairs: &[(&str, i64)]) -> Dimensions {
    Dimensions::from_pairs(pairs.iter().map(|&(s, p)| (s, Exponent::integer(p))))
}

fn exact(r: RBig) -> BaseFactor {
    BaseFactor::exact(r)
}

fn unity() -> BaseFactor {
    BaseFactor::exact(RBig::ONE)
}

/// Avoirdupois pound in kilograms
fn pound() -> RBig {
    ratio(45_359_237, 100_000_000)
}

fn inch() -> RBig {
    ratio(127, 5000)
}

/// Pound-force: one pound under standard gravity (9.80665 m/s²)
fn pound_force() -> RBig {
    &pound() * &ratio(980_665, 100_000)
}

impl UnitTable {
    /// The standard table used by `UNITS`
    pub fn standard() -> Self {
        let mut table = UnitTable::new();
        table.register_base_units();
        table.register_length_units();
        table.register_mass_units();
        table.register_time_units();
        table.register_temperature_units();
        table.register_derived_units();
        table.register_dimensionless_units();
        table
    }

    fn register_base_units(&mut self) {
        self.register(UnitDef::new("m", "meter", Dimensions::base(LENGTH), unity()));
        // The gram is the registered symbol; the kilogram is g with a kilo prefix.
        self.register(UnitDef::new("g", "gram", Dimensions::base(MASS), exact(ratio(1, 1000))));
        self.register(UnitDef::new("s", "second", Dimensions::base(TIME), unity()));
        self.register(UnitDef::new("A", "ampere", Dimensions::base(CURRENT), unity()));
        self.register(UnitDef::new("K", "kelvin", Dimensions::base(TEMPERATURE), unity()));
        self.register(UnitDef::new("mol", "mole", Dimensions::base(AMOUNT), unity()));
        self.register(UnitDef::new("cd", "candela", Dimensions::base(LUMINOSITY), unity()));

        self.base(LENGTH, UnitAtom::new("m"));
        self.base(MASS, UnitAtom::prefixed(Prefix::Kilo, "g"));
        self.base(TIME, UnitAtom::new("s"));
        self.base(CURRENT, UnitAtom::new("A"));
        self.base(TEMPERATURE, UnitAtom::new("K"));
        self.base(AMOUNT, UnitAtom::new("mol"));
        self.base(LUMINOSITY, UnitAtom::new("cd"));

        self.alias("meter", "m");
        self.alias("metre", "m");
        self.alias("gram", "g");
        self.alias("second", "s");
        self.alias("sec", "s");
        self.alias("ampere", "A");
        self.alias("kelvin", "K");
        self.alias("mole", "mol");
        self.alias("candela", "cd");
    }

    fn register_length_units(&mut self) {
        let length = Dimensions::base(LENGTH);
        self.register(UnitDef::new("in", "inch", length.clone(), exact(inch())));
        self.register(UnitDef::new("ft", "foot", length.clone(), exact(ratio(3048, 10_000))));
        self.register(UnitDef::new("yd", "yard", length.clone(), exact(ratio(9144, 10_000))));
        self.register(UnitDef::new("mi", "mile", length.clone(), exact(ratio(1_609_344, 1000))));
        self.register(UnitDef::new("nmi", "nautical mile", length.clone(), exact(ratio(1852, 1))));
        self.register(UnitDef::new("Å", "angstrom", length.clone(), exact(scaled(1, 10))));
        self.register(UnitDef::new(
            "au",
            "astronomical unit",
            length,
            exact(ratio(149_597_870_700, 1)),
        ));

        self.alias("inch", "in");
        self.alias("foot", "ft");
        self.alias("feet", "ft");
        self.alias("yard", "yd");
        self.alias("mile", "mi");
    }

    fn register_mass_units(&mut self) {
        let mass = Dimensions::base(MASS);
        self.register(UnitDef::new("lb", "pound", mass.clone(), exact(pound())));
        self.register(UnitDef::new("oz", "ounce", mass.clone(), exact(&pound() / &ratio(16, 1))));
        self.register(UnitDef::new("t", "tonne", mass, exact(ratio(1000, 1))));

        self.alias("pound", "lb");
        self.alias("lbs", "lb");
        self.alias("ounce", "oz");
        self.alias("tonne", "t");
    }

    fn register_time_units(&mut self) {
        let time = Dimensions::base(TIME);
        self.register(UnitDef::new("min", "minute", time.clone(), exact(ratio(60, 1))));
        self.register(UnitDef::new("h", "hour", time.clone(), exact(ratio(3600, 1))));
        self.register(UnitDef::new("d", "day", time.clone(), exact(ratio(86_400, 1))));
        self.register(UnitDef::new("wk", "week", time.clone(), exact(ratio(604_800, 1))));
        // Julian year
        self.register(UnitDef::new("yr", "year", time, exact(ratio(31_557_600, 1))));

        self.alias("minute", "min");
        self.alias("hour", "h");
        self.alias("hr", "h");
        self.alias("day", "d");
        self.alias("week", "wk");
        self.alias("year", "yr");
    }

    fn register_temperature_units(&mut self) {
        let temperature = Dimensions::base(TEMPERATURE);

        // K = C + 273.15
        self.register(UnitDef::with_offset(
            "degC",
            "celsius",
            temperature.clone(),
            unity(),
            ratio(27_315, 100),
        ));

        // Fahrenheit shares the Rankine scale: Ra = F + 459.67, K = Ra * 5/9
        self.register(UnitDef::with_offset(
            "degF",
            "fahrenheit",
            temperature.clone(),
            exact(ratio(5, 9)),
            ratio(45_967, 100),
        ));
        self.register(UnitDef::new("Ra", "rankine", temperature, exact(ratio(5, 9))));

        self.alias("°C", "degC");
        self.alias("celsius", "degC");
        self.alias("°F", "degF");
        self.alias("fahrenheit", "degF");
        self.alias("rankine", "Ra");
    }

    fn register_derived_units(&mut self) {
        let force = dims(&[(MASS, 1), (LENGTH, 1), (TIME, -2)]);
        let energy = dims(&[(MASS, 1), (LENGTH, 2), (TIME, -2)]);
        let power = dims(&[(MASS, 1), (LENGTH, 2), (TIME, -3)]);
        let pressure = dims(&[(MASS, 1), (LENGTH, -1), (TIME, -2)]);

        self.register(UnitDef::new("N", "newton", force.clone(), unity()));
        self.register(UnitDef::new("lbf", "pound-force", force, exact(pound_force())));

        self.register(UnitDef::new("J", "joule", energy.clone(), unity()));
        self.register(UnitDef::new("cal", "calorie", energy.clone(), exact(ratio(4184, 1000))));
        self.register(UnitDef::new("eV", "electronvolt", energy, exact(scaled(1_602_176_634, 28))));

        self.register(UnitDef::new("W", "watt", power.clone(), unity()));
        self.register(UnitDef::new("hp", "horsepower", power, exact(&pound_force() * &ratio(550 * 3048, 10_000))));

        self.register(UnitDef::new("Pa", "pascal", pressure.clone(), unity()));
        self.register(UnitDef::new("bar", "bar", pressure.clone(), exact(ratio(100_000, 1))));
        self.register(UnitDef::new("atm", "atmosphere", pressure.clone(), exact(ratio(101_325, 1))));
        self.register(UnitDef::new(
            "psi",
            "pound per square inch",
            pressure,
            exact(&pound_force() / &(&inch() * &inch())),
        ));

        self.register(UnitDef::new("Hz", "hertz", dims(&[(TIME, -1)]), unity()));
        self.register(UnitDef::new("C", "coulomb", dims(&[(CURRENT, 1), (TIME, 1)]), unity()));
        self.register(UnitDef::new(
            "V",
            "volt",
            dims(&[(MASS, 1), (LENGTH, 2), (TIME, -3), (CURRENT, -1)]),
            unity(),
        ));
        self.register(UnitDef::new("L", "liter", dims(&[(LENGTH, 3)]), exact(ratio(1, 1000))));

        self.alias("newton", "N");
        self.alias("joule", "J");
        self.alias("watt", "W");
        self.alias("pascal", "Pa");
        self.alias("hertz", "Hz");
        self.alias("liter", "L");
        self.alias("litre", "L");
    }

    fn register_dimensionless_units(&mut self) {
        self.register(UnitDef::new("rad", "radian", Dimensions::none(), unity()));
        self.register(UnitDef::new(
            "deg",
            "degree",
            Dimensions::none(),
            BaseFactor::inexact(std::f64::consts::PI / 180.0),
        ));
        self.register(UnitDef::new("percent", "percent", Dimensions::none(), exact(ratio(1, 100))));

        self.alias("radian", "rad");
        self.alias("degree", "deg");
        self.alias("°", "deg");
        self.alias("%", "percent");
    }
}
