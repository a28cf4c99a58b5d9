//! # Design Criteria
//!
//! Acceptance limits applied by the calculations in [`crate::calculations`].
//! The formulas in [`crate::equations`] never consult these values; a
//! calculation evaluates the formulas and then compares the results here.
//!
//! Criteria are plain data. Load them from JSON, or start from
//! [`DesignCriteria::default`] and override individual fields:
//!
//! ```rust
//! use civil_core::criteria::DesignCriteria;
//!
//! // Missing fields fall back to the defaults
//! let criteria = DesignCriteria::from_json(r#"{ "minimum_factor_of_safety": 2.0 }"#).unwrap();
//! assert_eq!(criteria.minimum_factor_of_safety, 2.0);
//! assert_eq!(criteria.velocity_limits.minimum, 2.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Feet, Meters, UnitSystem};

/// Classification of a flow velocity against [`VelocityLimits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VelocityClass {
    /// Below the self-cleansing minimum
    TooSlow,
    /// Within limits
    Acceptable,
    /// Above the scour maximum
    TooFast,
}

impl VelocityClass {
    /// Short description for reports
    pub fn description(&self) -> &'static str {
        match self {
            VelocityClass::TooSlow => "below minimum velocity, solids may settle",
            VelocityClass::Acceptable => "within velocity limits",
            VelocityClass::TooFast => "above maximum velocity, risk of scour",
        }
    }

    pub fn is_acceptable(&self) -> bool {
        matches!(self, VelocityClass::Acceptable)
    }
}

/// Minimum and maximum allowable flow velocity, in ft/s.
///
/// Use [`VelocityLimits::in_unit_system`] before comparing against an SI
/// velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityLimits {
    /// Self-cleansing minimum velocity
    pub minimum: f64,
    /// Scour maximum velocity
    pub maximum: f64,
}

impl Default for VelocityLimits {
    fn default() -> Self {
        Self {
            minimum: 2.5,
            maximum: 6.0,
        }
    }
}

impl VelocityLimits {
    /// Limits expressed in the velocity unit of `unit_system` (ft/s or m/s).
    ///
    /// ```rust
    /// use civil_core::criteria::VelocityLimits;
    /// use civil_core::units::UnitSystem;
    ///
    /// let si = VelocityLimits::default().in_unit_system(UnitSystem::Si);
    /// assert!((si.maximum - 1.8288).abs() < 1e-12);
    /// ```
    pub fn in_unit_system(&self, unit_system: UnitSystem) -> VelocityLimits {
        match unit_system {
            UnitSystem::Us => *self,
            UnitSystem::Si => VelocityLimits {
                minimum: Meters::from(Feet(self.minimum)).0,
                maximum: Meters::from(Feet(self.maximum)).0,
            },
        }
    }

    /// Classify a velocity in the same unit as the limits. Both limits are
    /// inclusive.
    ///
    /// ```rust
    /// use civil_core::criteria::{VelocityClass, VelocityLimits};
    ///
    /// let limits = VelocityLimits::default();
    /// assert_eq!(limits.classify(1.2), VelocityClass::TooSlow);
    /// assert_eq!(limits.classify(2.5), VelocityClass::Acceptable);
    /// assert_eq!(limits.classify(7.0), VelocityClass::TooFast);
    /// ```
    pub fn classify(&self, velocity: f64) -> VelocityClass {
        if velocity < self.minimum {
            VelocityClass::TooSlow
        } else if velocity > self.maximum {
            VelocityClass::TooFast
        } else {
            VelocityClass::Acceptable
        }
    }
}

/// Acceptance criteria for all calculations.
///
/// ## JSON Example
///
/// ```json
/// {
///   "velocity_limits": { "minimum": 2.5, "maximum": 6.0 },
///   "minimum_factor_of_safety": 1.5,
///   "allowable_stress": 20000.0,
///   "deflection_limit": 0.5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignCriteria {
    /// Channel and pipe velocity window (ft/s)
    pub velocity_limits: VelocityLimits,

    /// Minimum sliding and overturning factor of safety for walls
    pub minimum_factor_of_safety: f64,

    /// Allowable bending stress for cantilevers (psi)
    pub allowable_stress: f64,

    /// Maximum tip deflection for cantilevers (in)
    pub deflection_limit: f64,
}

impl Default for DesignCriteria {
    fn default() -> Self {
        Self {
            velocity_limits: VelocityLimits::default(),
            minimum_factor_of_safety: 1.5,
            allowable_stress: 20_000.0,
            deflection_limit: 0.5,
        }
    }
}

impl DesignCriteria {
    /// Velocity window converted to the unit system of a calculation
    pub fn velocity_limits_for(&self, unit_system: UnitSystem) -> VelocityLimits {
        self.velocity_limits.in_unit_system(unit_system)
    }

    /// Parse criteria from JSON and validate them.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let criteria: DesignCriteria = serde_json::from_str(json)?;
        criteria.validate()?;
        Ok(criteria)
    }

    /// Serialize criteria to pretty JSON.
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate that every limit is usable.
    pub fn validate(&self) -> CalcResult<()> {
        let VelocityLimits { minimum, maximum } = self.velocity_limits;
        if !(minimum.is_finite() && minimum >= 0.0) {
            return Err(CalcError::invalid_input(
                "velocity_limits.minimum",
                minimum.to_string(),
                "Minimum velocity must be zero or greater",
            ));
        }
        if !(maximum.is_finite() && maximum > minimum) {
            return Err(CalcError::invalid_input(
                "velocity_limits.maximum",
                maximum.to_string(),
                "Maximum velocity must exceed the minimum",
            ));
        }
        if !(self.minimum_factor_of_safety.is_finite() && self.minimum_factor_of_safety > 0.0) {
            return Err(CalcError::invalid_input(
                "minimum_factor_of_safety",
                self.minimum_factor_of_safety.to_string(),
                "Factor of safety must be positive",
            ));
        }
        if !(self.allowable_stress.is_finite() && self.allowable_stress > 0.0) {
            return Err(CalcError::invalid_input(
                "allowable_stress",
                self.allowable_stress.to_string(),
                "Allowable stress must be positive",
            ));
        }
        if !(self.deflection_limit.is_finite() && self.deflection_limit > 0.0) {
            return Err(CalcError::invalid_input(
                "deflection_limit",
                self.deflection_limit.to_string(),
                "Deflection limit must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let criteria = DesignCriteria::default();
        assert_eq!(criteria.velocity_limits.minimum, 2.5);
        assert_eq!(criteria.velocity_limits.maximum, 6.0);
        assert_eq!(criteria.minimum_factor_of_safety, 1.5);
        assert_eq!(criteria.allowable_stress, 20_000.0);
        assert_eq!(criteria.deflection_limit, 0.5);
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn test_classify_boundaries() {
        let limits = VelocityLimits::default();
        assert_eq!(limits.classify(2.4999), VelocityClass::TooSlow);
        assert_eq!(limits.classify(6.0), VelocityClass::Acceptable);
        assert_eq!(limits.classify(6.0001), VelocityClass::TooFast);
        assert!(limits.classify(4.0).is_acceptable());
    }

    #[test]
    fn test_limits_converted_for_si() {
        let criteria = DesignCriteria::default();
        assert_eq!(criteria.velocity_limits_for(UnitSystem::Us), VelocityLimits::default());

        let si = criteria.velocity_limits_for(UnitSystem::Si);
        assert!((si.minimum - 0.762).abs() < 1e-12);
        assert!((si.maximum - 1.8288).abs() < 1e-12);
        // 2 m/s is 6.56 ft/s
        assert_eq!(si.classify(2.0), VelocityClass::TooFast);
        assert_eq!(si.classify(1.0), VelocityClass::Acceptable);
    }

    #[test]
    fn test_json_roundtrip() {
        let criteria = DesignCriteria {
            velocity_limits: VelocityLimits { minimum: 0.6, maximum: 3.0 },
            minimum_factor_of_safety: 2.0,
            allowable_stress: 1_200.0,
            deflection_limit: 1.0,
        };
        let json = criteria.to_json().unwrap();
        let roundtrip = DesignCriteria::from_json(&json).unwrap();
        assert_eq!(criteria, roundtrip);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let criteria = DesignCriteria::from_json(r#"{ "allowable_stress": 1500.0 }"#).unwrap();
        assert_eq!(criteria.allowable_stress, 1500.0);
        assert_eq!(criteria.deflection_limit, 0.5);
        assert_eq!(criteria.velocity_limits, VelocityLimits::default());
    }

    #[test]
    fn test_malformed_json() {
        let err = DesignCriteria::from_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_invalid_criteria_rejected() {
        let err = DesignCriteria::from_json(r#"{ "velocity_limits": { "minimum": 5.0, "maximum": 2.0 } }"#)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let criteria = DesignCriteria {
            minimum_factor_of_safety: 0.0,
            ..Default::default()
        };
        assert!(criteria.validate().is_err());
    }
}
