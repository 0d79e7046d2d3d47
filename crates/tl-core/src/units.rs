// tl-core/src/units.rs
//
// The property engine works on plain f64 in a fixed basis: K, kPa, kg, kJ.
// uom is used at the edges to turn user-facing units into that basis.

use uom::si::f64::{
    Mass as UomMass, Pressure as UomPressure, Ratio as UomRatio,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};
use uom::si::mass::{kilogram, pound};
use uom::si::pressure::{
    atmosphere, bar, kilopascal, megapascal, pascal, pound_force_per_square_inch,
};
use uom::si::ratio::ratio;
use uom::si::thermodynamic_temperature::{
    degree_celsius, degree_fahrenheit, degree_rankine, kelvin,
};

// Public canonical unit types (SI, f64)
pub type Mass = UomMass;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type Temperature = UomThermodynamicTemperature;

/// Offset between the Celsius and Kelvin scales.
pub const KELVIN_OFFSET: f64 = 273.15;

#[inline]
pub fn kpa(v: f64) -> Pressure {
    Pressure::new::<kilopascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    Ratio::new::<ratio>(v)
}

/// Pressure in the engine basis [kPa].
#[inline]
pub fn to_kpa(p: Pressure) -> f64 {
    p.get::<kilopascal>()
}

/// Temperature in the engine basis [K].
#[inline]
pub fn to_k(t: Temperature) -> f64 {
    t.get::<kelvin>()
}

/// Celsius reading of an engine-basis temperature.
#[inline]
pub fn k_to_celsius(t_k: f64) -> f64 {
    t_k - KELVIN_OFFSET
}

/// Kelvin value of a Celsius reading.
#[inline]
pub fn celsius_to_k(t_c: f64) -> f64 {
    t_c + KELVIN_OFFSET
}

/// Temperature scales accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Kelvin,
    Celsius,
    Fahrenheit,
    Rankine,
}

impl TemperatureUnit {
    pub fn quantity(self, v: f64) -> Temperature {
        match self {
            Self::Kelvin => Temperature::new::<kelvin>(v),
            Self::Celsius => Temperature::new::<degree_celsius>(v),
            Self::Fahrenheit => Temperature::new::<degree_fahrenheit>(v),
            Self::Rankine => Temperature::new::<degree_rankine>(v),
        }
    }

    /// Convert a reading on this scale to kelvin.
    pub fn to_kelvin(self, v: f64) -> f64 {
        to_k(self.quantity(v))
    }
}

/// Pressure units accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureUnit {
    Pascal,
    Kilopascal,
    Megapascal,
    Bar,
    Atmosphere,
    Psi,
}

impl PressureUnit {
    pub fn quantity(self, v: f64) -> Pressure {
        match self {
            Self::Pascal => Pressure::new::<pascal>(v),
            Self::Kilopascal => Pressure::new::<kilopascal>(v),
            Self::Megapascal => Pressure::new::<megapascal>(v),
            Self::Bar => Pressure::new::<bar>(v),
            Self::Atmosphere => Pressure::new::<atmosphere>(v),
            Self::Psi => Pressure::new::<pound_force_per_square_inch>(v),
        }
    }

    /// Convert a reading in this unit to kPa.
    pub fn to_kpa(self, v: f64) -> f64 {
        to_kpa(self.quantity(v))
    }
}

/// Mass units accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MassUnit {
    Kilogram,
    Pound,
}

impl MassUnit {
    /// Convert a reading in this unit to kg.
    pub fn to_kg(self, v: f64) -> f64 {
        match self {
            Self::Kilogram => v,
            Self::Pound => Mass::new::<pound>(v).get::<kilogram>(),
        }
    }
}

pub mod constants {
    /// Standard gravity [m/s²] as used in potential-energy terms.
    pub const G0_MPS2: f64 = 9.81;

    /// Standard atmosphere [kPa].
    pub const P_ATM_KPA: f64 = 101.325;

    /// Universal gas constant [J/(mol·K)].
    pub const R_UNIVERSAL: f64 = 8.314;
}
