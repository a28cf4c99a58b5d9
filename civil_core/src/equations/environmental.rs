//! # Clarifier Detention Time
//!
//! Hydraulic detention time of a circular primary clarifier.

use std::f64::consts::PI;

use crate::errors::{require_positive, CalcError, CalcResult};

/// Plan area of a circular tank A = πD²/4
#[inline]
pub fn circular_tank_area(diameter: f64) -> f64 {
    PI * diameter.powi(2) / 4.0
}

/// Detention time of a circular clarifier.
///
/// # Formulas
/// - A = πD²/4
/// - V = A·H
/// - t = V/Q
///
/// # Arguments
/// * `influent_flow_rate` - Q (ft³/hr), strictly positive
/// * `tank_height` - Side water depth H (ft)
/// * `tank_diameter` - D (ft)
///
/// # Returns
/// Detention time in hours when Q is in ft³/hr.
///
/// # Example
/// ```rust
/// use civil_core::equations::environmental::detention_time;
///
/// let hours = detention_time(3000.0, 10.0, 40.0).unwrap();
/// assert!((hours - 4.19).abs() < 0.01);
/// ```
pub fn detention_time(influent_flow_rate: f64, tank_height: f64, tank_diameter: f64) -> CalcResult<f64> {
    let q = require_positive("influent_flow_rate", influent_flow_rate)?;
    let h = require_positive("tank_height", tank_height)?;
    let d = require_positive("tank_diameter", tank_diameter)?;

    let volume = circular_tank_area(d) * h;
    let hours = volume / q;
    if !hours.is_finite() {
        return Err(CalcError::domain_error(
            "detention_time",
            format!("non-finite detention time (V = {}, Q = {})", volume, q),
        ));
    }
    Ok(hours)
}
