//! # Unit Types
//!
//! Lightweight newtype wrappers for the handful of units the formulas mix,
//! plus the [`UnitSystem`] switch used by the Manning calculator.
//!
//! ## Design Philosophy
//!
//! The formula functions themselves take plain `f64` in consistent units.
//! Newtypes appear only where a conversion happens, so that
//! inches→feet and centimeters→meters live in one place:
//! - Length: inches, feet (US); centimeters, meters (SI)
//! - Angle: degrees, radians
//!
//! ## Example
//!
//! ```rust
//! use civil_core::units::{Feet, Inches, UnitSystem};
//!
//! let diameter = Inches(36.0);
//! let diameter_ft: Feet = diameter.into();
//! assert_eq!(diameter_ft.0, 3.0);
//!
//! let units: UnitSystem = "SI".parse().unwrap();
//! assert_eq!(units.conversion_constant(), 1.0);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

impl From<Meters> for Centimeters {
    fn from(m: Meters) -> Self {
        Centimeters(m.0 * 100.0)
    }
}

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

impl From<Feet> for Meters {
    fn from(ft: Feet) -> Self {
        Meters(ft.0 * 0.3048)
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
    }
}

// ============================================================================
// Unit System
// ============================================================================

/// Unit system for the Manning equation.
///
/// | System | Manning constant | Input lengths | Base lengths | Flow |
/// |--------|------------------|---------------|--------------|------|
/// | `Us`   | 1.49             | inches        | feet         | cfs  |
/// | `Si`   | 1.00             | centimeters   | meters       | m³/s |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    /// US customary (inches in, feet out)
    #[default]
    #[serde(rename = "US")]
    Us,
    /// Metric (centimeters in, meters out)
    #[serde(rename = "SI")]
    Si,
}

impl UnitSystem {
    /// Manning conversion constant `c` in v = (c/n)·Rh^(2/3)·S^(1/2)
    pub fn conversion_constant(self) -> f64 {
        match self {
            UnitSystem::Us => 1.49,
            UnitSystem::Si => 1.00,
        }
    }

    /// Convert an input length (in or cm) to the base length (ft or m)
    pub fn to_base_length(self, value: f64) -> f64 {
        match self {
            UnitSystem::Us => Feet::from(Inches(value)).0,
            UnitSystem::Si => Meters::from(Centimeters(value)).0,
        }
    }

    /// Label for velocity results
    pub fn velocity_label(self) -> &'static str {
        match self {
            UnitSystem::Us => "ft/s",
            UnitSystem::Si => "m/s",
        }
    }

    /// Label for flow-rate results
    pub fn flow_label(self) -> &'static str {
        match self {
            UnitSystem::Us => "cfs",
            UnitSystem::Si => "m^3/s",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Us => write!(f, "US"),
            UnitSystem::Si => write!(f, "SI"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "US" => Ok(UnitSystem::Us),
            "SI" => Ok(UnitSystem::Si),
            _ => Err(CalcError::unsupported_unit_system(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches_to_feet() {
        let inches = Inches(36.0);
        let ft: Feet = inches.into();
        assert_eq!(ft.0, 3.0);
    }

    #[test]
    fn test_centimeters_to_meters() {
        let cm = Centimeters(250.0);
        let m: Meters = cm.into();
        assert_eq!(m.0, 2.5);
    }

    #[test]
    fn test_feet_to_meters() {
        let m: Meters = Feet(6.0).into();
        assert!((m.0 - 1.8288).abs() < 1e-12);
    }

    #[test]
    fn test_degrees_to_radians() {
        let rad: Radians = Degrees(180.0).into();
        assert!((rad.0 - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_unit_system_constants() {
        assert_eq!(UnitSystem::Us.conversion_constant(), 1.49);
        assert_eq!(UnitSystem::Si.conversion_constant(), 1.0);
        assert_eq!(UnitSystem::Us.to_base_length(24.0), 2.0);
        assert_eq!(UnitSystem::Si.to_base_length(50.0), 0.5);
    }

    #[test]
    fn test_unit_system_parse() {
        assert_eq!("US".parse::<UnitSystem>().unwrap(), UnitSystem::Us);
        assert_eq!(" si ".parse::<UnitSystem>().unwrap(), UnitSystem::Si);

        let err = "imperial".parse::<UnitSystem>().unwrap_err();
        assert_eq!(err, CalcError::unsupported_unit_system("imperial"));
    }

    #[test]
    fn test_unit_system_serialization() {
        let json = serde_json::to_string(&UnitSystem::Si).unwrap();
        assert_eq!(json, "\"SI\"");

        let roundtrip: UnitSystem = serde_json::from_str("\"US\"").unwrap();
        assert_eq!(roundtrip, UnitSystem::Us);

        assert!(serde_json::from_str::<UnitSystem>("\"metric\"").is_err());
    }

    #[test]
    fn test_serialization() {
        let ft = Feet(12.5);
        let json = serde_json::to_string(&ft).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: Feet = serde_json::from_str(&json).unwrap();
        assert_eq!(ft, roundtrip);
    }
}
