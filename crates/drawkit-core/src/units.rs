//! Length units
//!
//! Drawings carry a unit used when reporting coordinates to the user.
//! Every unit has a fixed factor to and from meters; conversions go
//! through meters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Length unit of a drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Millimeters
    #[default]
    Mm,
    /// Centimeters
    Cm,
    /// Meters
    M,
    /// Kilometers
    Km,
    /// Thousandths of an inch
    Mil,
    /// Inches
    In,
    /// Feet
    Ft,
    /// Statute miles
    Mi,
}

impl Unit {
    /// All units, smallest first.
    pub const ALL: [Unit; 8] = [
        Unit::Mil,
        Unit::Mm,
        Unit::Cm,
        Unit::In,
        Unit::Ft,
        Unit::M,
        Unit::Km,
        Unit::Mi,
    ];

    /// Number of meters in one of this unit.
    pub fn to_meters(self) -> f64 {
        match self {
            Unit::Mm => 0.001,
            Unit::Cm => 0.01,
            Unit::M => 1.0,
            Unit::Km => 1000.0,
            Unit::Mil => 0.0000254,
            Unit::In => 0.0254,
            Unit::Ft => 0.3048,
            Unit::Mi => 1609.344,
        }
    }

    /// Number of this unit in one meter.
    pub fn from_meters(self) -> f64 {
        1.0 / self.to_meters()
    }

    /// Short symbol used for display and persistence.
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::M => "m",
            Unit::Km => "km",
            Unit::Mil => "mil",
            Unit::In => "in",
            Unit::Ft => "ft",
            Unit::Mi => "mi",
        }
    }
}

/// Convert `value` expressed in `from` into `to`.
pub fn convert(value: f64, from: Unit, to: Unit) -> f64 {
    if from == to {
        return value;
    }
    value * from.to_meters() * to.from_meters()
}

/// Format a length with three decimals followed by the unit symbol.
pub fn format_length(value: f64, unit: Unit) -> String {
    format!("{:.3} {}", value, unit.symbol())
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => Ok(Unit::Mm),
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => Ok(Unit::Cm),
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(Unit::M),
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => Ok(Unit::Km),
            "mil" | "mils" | "thou" => Ok(Unit::Mil),
            "in" | "inch" | "inches" | "\"" => Ok(Unit::In),
            "ft" | "foot" | "feet" | "'" => Ok(Unit::Ft),
            "mi" | "mile" | "miles" => Ok(Unit::Mi),
            _ => Err(Error::InvalidUnit {
                token: s.to_string(),
            }),
        }
    }
}
