//! # Manning Flow
//!
//! Uniform-flow velocity and discharge from Manning's equation.
//!
//! ```text
//! v = (c/n) · Rh^(2/3) · S^(1/2)
//! Q = v · A
//! ```
//!
//! Geometry comes in as inches (US) or centimeters (SI), straight from the
//! [`hydraulics`](super::hydraulics) functions, and is converted to feet or
//! meters before evaluation. Results are ft/s and cfs (US) or m/s and m³/s (SI).

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};
use crate::units::UnitSystem;

use super::hydraulics::pipe_geometry;

/// Velocity and discharge for uniform flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowResult {
    /// Mean velocity (ft/s or m/s), never negative
    pub velocity: f64,
    /// Discharge Q = v·A (cfs or m³/s)
    pub flow_rate: f64,
}

/// Velocity and flow rate from wetted perimeter and hydraulic radius.
///
/// # Formulas
/// - P' = P/12 (US) or P/100 (SI)
/// - Rh' = Rh/12 (US) or Rh/100 (SI)
/// - v = (c/n)·Rh'^(2/3)·S^(1/2), c = 1.49 (US) or 1.00 (SI)
/// - Q = v·(Rh'·P')
///
/// # Arguments
/// * `wetted_perimeter` - P in inches (US) or centimeters (SI)
/// * `hydraulic_radius` - Rh in the same unit as P
/// * `slope` - Energy slope (ft/ft or m/m), zero or greater
/// * `roughness_n` - Manning's n, strictly positive
/// * `unit_system` - [`UnitSystem::Us`] or [`UnitSystem::Si`]
///
/// # Example
/// ```rust
/// use civil_core::equations::manning::compute_flow;
/// use civil_core::units::UnitSystem;
///
/// // 10" x 4" deep rectangular flume
/// let flow = compute_flow(18.0, 40.0 / 18.0, 0.001, 0.013, UnitSystem::Us).unwrap();
/// assert!((flow.velocity - 1.18).abs() < 0.01);
/// ```
pub fn compute_flow(
    wetted_perimeter: f64,
    hydraulic_radius: f64,
    slope: f64,
    roughness_n: f64,
    unit_system: UnitSystem,
) -> CalcResult<FlowResult> {
    let wetted_perimeter = require_positive("wetted_perimeter", wetted_perimeter)?;
    let hydraulic_radius = require_positive("hydraulic_radius", hydraulic_radius)?;
    let slope = require_non_negative("slope", slope)?;
    let n = require_positive("roughness_n", roughness_n)?;

    let c = unit_system.conversion_constant();
    let p = unit_system.to_base_length(wetted_perimeter);
    let rh = unit_system.to_base_length(hydraulic_radius);

    let area = rh * p;
    let velocity = c / n * rh.powf(2.0 / 3.0) * slope.sqrt();
    let flow_rate = velocity * area;

    if !(velocity.is_finite() && flow_rate.is_finite()) {
        return Err(CalcError::domain_error(
            "compute_flow",
            format!("non-finite result (v = {}, Q = {})", velocity, flow_rate),
        ));
    }

    Ok(FlowResult { velocity, flow_rate })
}

/// Flow in a partially full circular pipe.
///
/// Composes [`pipe_geometry`] with [`compute_flow`].
///
/// # Example
/// ```rust
/// use civil_core::equations::manning::pipe_flow;
/// use civil_core::units::UnitSystem;
///
/// // 36" concrete pipe flowing 8" deep
/// let flow = pipe_flow(36.0, 8.0, 0.005, 0.025, UnitSystem::Us).unwrap();
/// assert!((flow.velocity - 2.28).abs() < 0.01);
/// assert!((flow.flow_rate - 2.66).abs() < 0.01);
/// ```
pub fn pipe_flow(
    diameter: f64,
    depth: f64,
    slope: f64,
    roughness_n: f64,
    unit_system: UnitSystem,
) -> CalcResult<FlowResult> {
    let geometry = pipe_geometry(diameter, Some(depth))?;
    compute_flow(
        geometry.wetted_perimeter,
        geometry.hydraulic_radius,
        slope,
        roughness_n,
        unit_system,
    )
}
