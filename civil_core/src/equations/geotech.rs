//! # Gravity Retaining Wall Stability
//!
//! Sliding and overturning checks for a rectangular gravity wall retaining
//! level backfill with a uniform surcharge. Forces and moments are per unit
//! length of wall.
//!
//! ```text
//!          q (surcharge)
//!   ┌───┐ ↓ ↓ ↓ ↓ ↓
//!   │   │░░░░░░░░░░░
//!   │ W │░░ soil ░░░  H
//!   │   │░░ γs, φ ░░
//!   └───┘░░░░░░░░░░░
//!   toe B
//! ```
//!
//! ## References
//!
//! - Das, Principles of Geotechnical Engineering, Ch. 13: Rankine active pressure

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_open_range, require_positive, CalcError, CalcResult};

/// Factors of safety for a gravity wall.
///
/// The library reports both ratios; deciding what is acceptable is up to the
/// caller (see [`WallStability::passes`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallStability {
    /// Sliding factor of safety FR/Pa
    pub sliding_fos: f64,
    /// Overturning factor of safety M_R/M_OT
    pub overturning_fos: f64,
}

impl WallStability {
    /// Both factors of safety meet the minimum
    pub fn passes(&self, minimum_fos: f64) -> bool {
        self.sliding_fos >= minimum_fos && self.overturning_fos >= minimum_fos
    }

    /// The smaller of the two factors of safety
    pub fn governing_fos(&self) -> f64 {
        self.sliding_fos.min(self.overturning_fos)
    }
}

/// Rankine active earth pressure coefficient Ka = (1 − sin φ)/(1 + sin φ)
#[inline]
pub fn rankine_active_coefficient(phi: f64) -> f64 {
    let sin_phi = phi.sin();
    (1.0 - sin_phi) / (1.0 + sin_phi)
}

/// Active thrust per unit length Pa = ½·Ka·γs·H² + q·H
#[inline]
pub fn active_force(ka: f64, soil_unit_weight: f64, height: f64, surcharge_load: f64) -> f64 {
    0.5 * ka * soil_unit_weight * height.powi(2) + surcharge_load * height
}

/// Sliding and overturning factors of safety for a gravity retaining wall.
///
/// # Formulas
/// - W = B·H·γw
/// - Ka = (1 − sin φ)/(1 + sin φ)
/// - Pa = ½·Ka·γs·H² + q·H
/// - FR = W·μ
/// - M_OT = Pa·H/3
/// - M_R = W·B/2
/// - SFOS = FR/Pa, OFOS = M_R/M_OT
///
/// # Arguments
/// * `base` - Wall base width B
/// * `height` - Wall (and retained soil) height H
/// * `soil_unit_weight` - γs
/// * `wall_unit_weight` - γw
/// * `friction_angle_radians` - φ, strictly between 0 and π/2
/// * `friction_coefficient` - μ between wall base and soil
/// * `surcharge_load` - q, uniform load on the backfill
///
/// # Example
/// ```rust
/// use civil_core::equations::geotech::wall_stability;
///
/// let fos = wall_stability(2.0, 7.0, 100.0, 130.0, 30f64.to_radians(), 0.7, 25.0).unwrap();
/// assert!((fos.sliding_fos - 1.28).abs() < 0.01);
/// assert!((fos.overturning_fos - 0.79).abs() < 0.01);
/// assert!(!fos.passes(1.5));
/// ```
pub fn wall_stability(
    base: f64,
    height: f64,
    soil_unit_weight: f64,
    wall_unit_weight: f64,
    friction_angle_radians: f64,
    friction_coefficient: f64,
    surcharge_load: f64,
) -> CalcResult<WallStability> {
    let b = require_positive("base", base)?;
    let h = require_positive("height", height)?;
    let gamma_soil = require_positive("soil_unit_weight", soil_unit_weight)?;
    let gamma_wall = require_positive("wall_unit_weight", wall_unit_weight)?;
    let phi = require_open_range("friction_angle_radians", friction_angle_radians, 0.0, FRAC_PI_2)?;
    let mu = require_non_negative("friction_coefficient", friction_coefficient)?;
    let q = require_non_negative("surcharge_load", surcharge_load)?;

    let weight = b * h * gamma_wall;
    let ka = rankine_active_coefficient(phi);
    let pa = active_force(ka, gamma_soil, h, q);
    if !(pa.is_finite() && pa > 0.0) {
        return Err(CalcError::domain_error(
            "wall_stability",
            format!("active force {} is not positive", pa),
        ));
    }

    let resisting_force = weight * mu;
    let overturning_moment = pa * h / 3.0;
    let resisting_moment = weight * b / 2.0;

    let sliding_fos = resisting_force / pa;
    let overturning_fos = resisting_moment / overturning_moment;
    if !(sliding_fos.is_finite() && overturning_fos.is_finite()) {
        return Err(CalcError::domain_error(
            "wall_stability",
            format!("non-finite factor of safety (SFOS = {}, OFOS = {})", sliding_fos, overturning_fos),
        ));
    }

    Ok(WallStability {
        sliding_fos,
        overturning_fos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rankine_coefficient() {
        // Ka(30°) = 1/3
        assert_relative_eq!(rankine_active_coefficient(30f64.to_radians()), 1.0 / 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_reference_brick_wall() {
        // 2 ft x 7 ft brick wall, φ = 30°, μ = 0.7, q = 25 psf
        let fos = wall_stability(2.0, 7.0, 100.0, 130.0, 30f64.to_radians(), 0.7, 25.0).unwrap();
        // Pa = ½(1/3)(100)(49) + 25(7) = 991.67 lb/ft; W = 1820 lb/ft
        assert_relative_eq!(fos.sliding_fos, 1.284706, max_relative = 1e-5);
        assert_relative_eq!(fos.overturning_fos, 0.786555, max_relative = 1e-5);
        assert_eq!(fos.governing_fos(), fos.overturning_fos);
        assert!(!fos.passes(1.5));
    }

    #[test]
    fn test_wider_wall_passes() {
        let fos = wall_stability(4.0, 6.0, 100.0, 74.0, 30f64.to_radians(), 0.7, 25.0).unwrap();
        assert_relative_eq!(fos.sliding_fos, 1.6576, max_relative = 1e-9);
        assert_relative_eq!(fos.overturning_fos, 2.368, max_relative = 1e-9);
        assert!(fos.passes(1.5));
    }

    #[test]
    fn test_invalid_friction_angle() {
        assert!(wall_stability(2.0, 7.0, 100.0, 130.0, 0.0, 0.7, 25.0).is_err());
        assert!(wall_stability(2.0, 7.0, 100.0, 130.0, FRAC_PI_2, 0.7, 25.0).is_err());
        // Degrees passed by mistake
        assert!(wall_stability(2.0, 7.0, 100.0, 130.0, 30.0, 0.7, 25.0).is_err());
    }

    #[test]
    fn test_overflowing_wall_weight_rejected() {
        // W = B·H·γw overflows f64
        let err = wall_stability(1e200, 1.0, 1.0, 1e200, 0.5, 0.7, 0.0).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(wall_stability(0.0, 7.0, 100.0, 130.0, 0.5, 0.7, 25.0).is_err());
        assert!(wall_stability(2.0, 0.0, 100.0, 130.0, 0.5, 0.7, 25.0).is_err());
        assert!(wall_stability(2.0, 7.0, 0.0, 130.0, 0.5, 0.7, 25.0).is_err());
        assert!(wall_stability(2.0, 7.0, 100.0, 130.0, 0.5, 0.7, -5.0).is_err());
    }
}
