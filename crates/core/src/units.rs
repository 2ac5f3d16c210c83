//! Length units used for shape positions in the inventory.

use crate::Error;
use std::fmt;
use std::str::FromStr;

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// English Metric Units per typographic point.
pub const EMU_PER_POINT: i64 = 12_700;

/// Unit in which inventory positions and sizes are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    /// Inches, rounded to two decimals.
    #[default]
    Inches,
    /// Points, rounded to two decimals.
    Points,
    /// Raw English Metric Units.
    Emu,
}

impl LengthUnit {
    /// Convert a length in EMU to this unit.
    pub fn from_emu(self, emu: i64) -> f64 {
        match self {
            Self::Inches => round2(emu as f64 / EMU_PER_INCH as f64),
            Self::Points => round2(emu as f64 / EMU_PER_POINT as f64),
            Self::Emu => emu as f64,
        }
    }

    /// Convert a length in this unit to EMU.
    pub fn to_emu(self, value: f64) -> i64 {
        match self {
            Self::Inches => (value * EMU_PER_INCH as f64).round() as i64,
            Self::Points => (value * EMU_PER_POINT as f64).round() as i64,
            Self::Emu => value.round() as i64,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Inches => "inches",
            Self::Points => "points",
            Self::Emu => "emu",
        };
        f.write_str(name)
    }
}

impl FromStr for LengthUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "in" | "inch" | "inches" => Ok(Self::Inches),
            "pt" | "point" | "points" => Ok(Self::Points),
            "emu" => Ok(Self::Emu),
            other => Err(Error::UnsupportedFormat(format!(
                "unknown length unit '{}' (expected inches, points or emu)",
                other
            ))),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
