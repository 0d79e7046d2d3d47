//! Unit-tagged text input.
//!
//! Values arrive as text such as `"550 C"`, `"8 MPa"` or `"85%"` and are
//! converted into the engine basis: K, kPa, kg, kJ/kg, kJ/(kg·K), m³/kg.

use std::fmt;
use thiserror::Error;
use tl_core::units::{MassUnit, PressureUnit, TemperatureUnit};
use uom::si::f64::Mass;
use uom::si::mass::{gram, kilogram};

/// Dimension/quantity family for a numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Temperature (canonical: K)
    Temperature,
    /// Absolute pressure (canonical: kPa)
    Pressure,
    /// Specific volume (canonical: m³/kg)
    SpecificVolume,
    /// Specific enthalpy / internal energy / work / heat (canonical: kJ/kg)
    SpecificEnergy,
    /// Specific entropy / specific heat (canonical: kJ/(kg·K))
    SpecificEntropy,
    /// Quality/dryness fraction (canonical: 0-1)
    Quality,
    /// Dimensionless, efficiencies (canonical: as-is, but may include %)
    Dimensionless,
    /// Mass (canonical: kg)
    Mass,
    /// Energy (canonical: kJ)
    Energy,
    /// Velocity (canonical: m/s)
    Velocity,
    /// Elevation (canonical: m)
    Length,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Temperature => "Temperature",
            Self::Pressure => "Absolute Pressure",
            Self::SpecificVolume => "Specific Volume",
            Self::SpecificEnergy => "Specific Energy",
            Self::SpecificEntropy => "Specific Entropy",
            Self::Quality => "Quality",
            Self::Dimensionless => "Dimensionless",
            Self::Mass => "Mass",
            Self::Energy => "Energy",
            Self::Velocity => "Velocity",
            Self::Length => "Length",
        };
        f.write_str(s)
    }
}

/// Error in unit parsing or conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: Quantity },

    #[error("ambiguous unit '{unit}': {reason}")]
    AmbiguousUnit { unit: String, reason: &'static str },

    #[error("value {value} out of range: {reason}")]
    OutOfRange { value: f64, reason: &'static str },
}

/// A value with the text it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitValue {
    /// Raw text as entered (e.g., "14.7 psia", "70F")
    pub raw_text: String,
    /// Value in the engine basis
    pub value: f64,
    pub quantity: Quantity,
}

impl UnitValue {
    pub fn from_text(raw_text: impl Into<String>, quantity: Quantity) -> Result<Self, UnitError> {
        let text = raw_text.into();
        let value = parse_quantity(&text, quantity)?;
        Ok(Self {
            raw_text: text,
            value,
            quantity,
        })
    }
}

/// Parse a unit-tagged value into the engine basis for `quantity`.
///
/// A bare number is taken to already be in the engine basis.
pub fn parse_quantity(raw_text: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let trimmed = raw_text.trim();

    match quantity {
        Quantity::Temperature => parse_temperature(trimmed),
        Quantity::Pressure => parse_pressure(trimmed),
        Quantity::SpecificVolume => parse_scaled(
            trimmed,
            quantity,
            &[("m3/kg", 1.0), ("m^3/kg", 1.0), ("l/kg", 1e-3), ("ft3/lbm", 0.062_428)],
        ),
        Quantity::SpecificEnergy => parse_scaled(
            trimmed,
            quantity,
            &[("kj/kg", 1.0), ("j/kg", 1e-3), ("mj/kg", 1e3), ("btu/lbm", 2.326)],
        ),
        Quantity::SpecificEntropy => parse_scaled(
            trimmed,
            quantity,
            &[
                ("kj/(kg·k)", 1.0),
                ("kj/(kg*k)", 1.0),
                ("kj/kg-k", 1.0),
                ("kj/kgk", 1.0),
                ("j/(kg·k)", 1e-3),
                ("j/(kg*k)", 1e-3),
                ("btu/(lbm·r)", 4.1868),
                ("btu/(lbm*r)", 4.1868),
            ],
        ),
        Quantity::Quality => {
            let x = parse_fraction(trimmed)?;
            if !(0.0..=1.0).contains(&x) {
                return Err(UnitError::OutOfRange {
                    value: x,
                    reason: "quality must be between 0 and 1",
                });
            }
            Ok(x)
        }
        Quantity::Dimensionless => parse_fraction(trimmed),
        Quantity::Mass => parse_mass(trimmed),
        Quantity::Energy => parse_scaled(
            trimmed,
            quantity,
            &[("kj", 1.0), ("j", 1e-3), ("mj", 1e3), ("btu", 1.055_06), ("kwh", 3600.0)],
        ),
        Quantity::Velocity => parse_scaled(
            trimmed,
            quantity,
            &[("m/s", 1.0), ("km/h", 1.0 / 3.6), ("ft/s", 0.3048)],
        ),
        Quantity::Length => parse_scaled(
            trimmed,
            quantity,
            &[("m", 1.0), ("km", 1e3), ("cm", 1e-2), ("ft", 0.3048)],
        ),
    }
}

fn parse_temperature(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let scale = match unit.to_lowercase().as_str() {
        "" | "k" | "kelvin" => TemperatureUnit::Kelvin,
        "c" | "°c" | "degc" | "celsius" => TemperatureUnit::Celsius,
        "f" | "°f" | "degf" | "fahrenheit" => TemperatureUnit::Fahrenheit,
        "r" | "°r" | "rankine" => TemperatureUnit::Rankine,
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: Quantity::Temperature,
            });
        }
    };
    let kelvin = scale.to_kelvin(value);

    if kelvin <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: kelvin,
            reason: "absolute temperature must be > 0 K",
        });
    }
    Ok(kelvin)
}

/// Gauge units are referenced to one standard atmosphere.
fn parse_pressure(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let kpa = match unit.to_lowercase().as_str() {
        "" | "kpa" => value,
        "pa" => PressureUnit::Pascal.to_kpa(value),
        "mpa" => PressureUnit::Megapascal.to_kpa(value),
        "bar" => PressureUnit::Bar.to_kpa(value),
        "atm" => PressureUnit::Atmosphere.to_kpa(value),
        "psia" => PressureUnit::Psi.to_kpa(value),
        "kpag" => value + tl_core::units::constants::P_ATM_KPA,
        "barg" => PressureUnit::Bar.to_kpa(value) + tl_core::units::constants::P_ATM_KPA,
        "psig" => PressureUnit::Psi.to_kpa(value) + tl_core::units::constants::P_ATM_KPA,
        "psi" => {
            return Err(UnitError::AmbiguousUnit {
                unit,
                reason: "use 'psia' (absolute) or 'psig' (gauge)",
            });
        }
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: Quantity::Pressure,
            });
        }
    };

    if kpa < 0.0 {
        return Err(UnitError::OutOfRange {
            value: kpa,
            reason: "absolute pressure cannot be negative",
        });
    }
    Ok(kpa)
}

fn parse_mass(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let kg = match unit.to_lowercase().as_str() {
        "" | "kg" => MassUnit::Kilogram.to_kg(value),
        "g" => Mass::new::<gram>(value).get::<kilogram>(),
        "lbm" => MassUnit::Pound.to_kg(value),
        "lb" => {
            return Err(UnitError::AmbiguousUnit {
                unit,
                reason: "use 'lbm' for mass",
            });
        }
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: Quantity::Mass,
            });
        }
    };

    if kg < 0.0 {
        return Err(UnitError::OutOfRange {
            value: kg,
            reason: "mass cannot be negative",
        });
    }
    Ok(kg)
}

/// Multiply by the factor of the first matching unit tag. No tag means factor 1.
fn parse_scaled(
    input: &str,
    quantity: Quantity,
    factors: &[(&str, f64)],
) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;
    let tag = unit.to_lowercase();
    if tag.is_empty() {
        return Ok(value);
    }
    factors
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, factor)| value * factor)
        .ok_or(UnitError::UnknownUnit { unit, quantity })
}

/// Plain number or percent.
fn parse_fraction(input: &str) -> Result<f64, UnitError> {
    let (num, scale) = match input.strip_suffix('%') {
        Some(num) => (num.trim(), 0.01),
        None => (input, 1.0),
    };
    let value: f64 = num
        .parse()
        .map_err(|_| UnitError::Parse(format!("could not parse fraction from '{input}'")))?;
    Ok(value * scale)
}

/// Split a value+unit string into (numeric_value, unit_string).
///
/// - "70F" -> (70.0, "F")
/// - "14.7 psia" -> (14.7, "psia")
/// - "300" -> (300.0, "")
fn split_value_and_unit(input: &str) -> Result<(f64, String), UnitError> {
    let trimmed = input.trim();

    let split_idx = trimmed
        .char_indices()
        .find(|&(i, c)| {
            let exponent = (c == 'e' || c == 'E')
                && trimmed[i + 1..]
                    .chars()
                    .next()
                    .is_some_and(|n| n.is_ascii_digit() || n == '-' || n == '+');
            !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+' || exponent)
        })
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());

    let (num_part, unit_part) = trimmed.split_at(split_idx);
    let value: f64 = num_part.trim().parse().map_err(|_| {
        UnitError::Parse(format!("could not parse numeric value from '{input}'"))
    })?;

    Ok((value, unit_part.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn parse_kelvin_and_bare_numbers() {
        assert_eq!(parse_quantity("300 K", Quantity::Temperature).unwrap(), 300.0);
        assert_eq!(parse_quantity("300", Quantity::Temperature).unwrap(), 300.0);
    }

    #[test]
    fn parse_celsius() {
        let t = parse_quantity("550 C", Quantity::Temperature).unwrap();
        assert!(close(t, 823.15, 1e-9));
    }

    #[test]
    fn parse_fahrenheit() {
        let t = parse_quantity("32F", Quantity::Temperature).unwrap();
        assert!(close(t, 273.15, 1e-6));
    }

    #[test]
    fn reject_negative_temperature() {
        assert!(matches!(
            parse_quantity("-300 C", Quantity::Temperature),
            Err(UnitError::OutOfRange { .. })
        ));
    }

    #[test]
    fn pressure_lands_in_kpa() {
        assert!(close(parse_quantity("8 MPa", Quantity::Pressure).unwrap(), 8000.0, 1e-9));
        assert!(close(parse_quantity("1 bar", Quantity::Pressure).unwrap(), 100.0, 1e-9));
        assert!(close(parse_quantity("101325 Pa", Quantity::Pressure).unwrap(), 101.325, 1e-9));
        assert!(close(parse_quantity("14.696 psia", Quantity::Pressure).unwrap(), 101.325, 0.01));
        assert!(close(parse_quantity("0 kPag", Quantity::Pressure).unwrap(), 101.325, 1e-9));
    }

    #[test]
    fn reject_plain_psi() {
        assert!(matches!(
            parse_quantity("14.7 psi", Quantity::Pressure),
            Err(UnitError::AmbiguousUnit { unit, .. }) if unit == "psi"
        ));
    }

    #[test]
    fn exponent_is_part_of_the_number() {
        assert_eq!(parse_quantity("1e3 kPa", Quantity::Pressure).unwrap(), 1000.0);
        assert_eq!(parse_quantity("2.5e-1", Quantity::Quality).unwrap(), 0.25);
    }

    #[test]
    fn quality_and_percent() {
        assert_eq!(parse_quantity("0.5", Quantity::Quality).unwrap(), 0.5);
        assert_eq!(parse_quantity("50%", Quantity::Quality).unwrap(), 0.5);
        assert!(parse_quantity("1.5", Quantity::Quality).is_err());
        assert_eq!(parse_quantity("85%", Quantity::Dimensionless).unwrap(), 0.85);
    }

    #[test]
    fn mass_units() {
        assert!(close(parse_quantity("1 lbm", Quantity::Mass).unwrap(), 0.453_592, 1e-5));
        assert!(matches!(
            parse_quantity("5 lb", Quantity::Mass),
            Err(UnitError::AmbiguousUnit { .. })
        ));
    }

    #[test]
    fn grams_convert_to_kilograms() {
        assert!(close(parse_quantity("250 g", Quantity::Mass).unwrap(), 0.25, 1e-12));
        assert!(close(parse_quantity("1500G", Quantity::Mass).unwrap(), 1.5, 1e-12));
    }

    #[test]
    fn scaled_units() {
        assert_eq!(parse_quantity("2 MJ/kg", Quantity::SpecificEnergy).unwrap(), 2000.0);
        assert!(close(parse_quantity("36 km/h", Quantity::Velocity).unwrap(), 10.0, 1e-9));
        assert!(matches!(
            parse_quantity("3 furlongs", Quantity::Length),
            Err(UnitError::UnknownUnit { quantity: Quantity::Length, .. })
        ));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            parse_quantity("hot", Quantity::Temperature),
            Err(UnitError::Parse(_))
        ));
    }

    #[test]
    fn unit_value_keeps_text() {
        let uv = UnitValue::from_text("70F", Quantity::Temperature).unwrap();
        assert_eq!(uv.raw_text, "70F");
        assert!(uv.value > 290.0 && uv.value < 295.0);
    }
}
