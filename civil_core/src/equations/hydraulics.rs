//! # Channel and Pipe Geometry
//!
//! Wetted perimeter and hydraulic radius for the cross-sections used in
//! open-channel and gravity-pipe flow.
//!
//! ## Notation
//!
//! - `D` = Pipe diameter
//! - `d` = Flow depth
//! - `b` = Channel bottom width
//! - `θ` = Side slope angle, measured from horizontal (degrees in, radians internally)
//! - `A` = Flow area
//! - `P` = Wetted perimeter
//! - `Rh` = Hydraulic radius = A/P
//!
//! All lengths must share one unit (inches or centimeters when the result
//! feeds [`compute_flow`](super::manning::compute_flow)).
//!
//! ## References
//!
//! - Chow, Open-Channel Hydraulics (1959), Table 2-1: Geometric elements of channel sections

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_open_range, require_positive, CalcError, CalcResult};
use crate::units::{Degrees, Radians};

/// Wetted perimeter and hydraulic radius of a flowing cross-section.
///
/// Both values are strictly positive and share the caller's length unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelGeometry {
    /// Wetted perimeter P
    pub wetted_perimeter: f64,
    /// Hydraulic radius Rh = A/P
    pub hydraulic_radius: f64,
}

impl ChannelGeometry {
    /// Build a geometry result, rejecting non-positive or non-finite values.
    fn checked(formula: &str, wetted_perimeter: f64, hydraulic_radius: f64) -> CalcResult<Self> {
        if !(wetted_perimeter.is_finite() && wetted_perimeter > 0.0) {
            return Err(CalcError::domain_error(
                formula,
                format!("wetted perimeter {} is not positive", wetted_perimeter),
            ));
        }
        if !(hydraulic_radius.is_finite() && hydraulic_radius > 0.0) {
            return Err(CalcError::domain_error(
                formula,
                format!("hydraulic radius {} is not positive", hydraulic_radius),
            ));
        }
        Ok(Self {
            wetted_perimeter,
            hydraulic_radius,
        })
    }

    /// Flow area A = Rh × P
    pub fn flow_area(&self) -> f64 {
        self.hydraulic_radius * self.wetted_perimeter
    }
}

// =============================================================================
// CIRCULAR PIPE (partially full)
// =============================================================================

/// Wetted perimeter and hydraulic radius for a partially full circular pipe.
///
/// ```text
///        ╭───────╮
///      ╱           ╲
///     │      r      │
///     │~~~~~~~~~~~~~│ ← water surface
///      ╲  ╲ θ ╱    ╱  d
///        ╰───────╯
/// ```
///
/// # Formulas
/// - r = D/2
/// - θ = 2·acos((r − d)/r)   (central angle subtended by the wetted arc)
/// - A = r²(θ − sin θ)/2
/// - P = θ·r
/// - Rh = A/P
///
/// At d = D the pipe flows full: θ = 2π and Rh = D/4.
///
/// # Arguments
/// * `diameter` - Pipe inside diameter
/// * `depth` - Flow depth; `None` means flowing full
///
/// # Errors
/// `InvalidInput` if the diameter or depth is not positive, or if the depth
/// exceeds the diameter.
///
/// # Example
/// ```rust
/// use civil_core::equations::hydraulics::pipe_geometry;
///
/// let full = pipe_geometry(36.0, None).unwrap();
/// assert!((full.hydraulic_radius - 9.0).abs() < 1e-9);
/// assert!(pipe_geometry(36.0, Some(40.0)).is_err());
/// ```
pub fn pipe_geometry(diameter: f64, depth: Option<f64>) -> CalcResult<ChannelGeometry> {
    let diameter = require_positive("diameter", diameter)?;
    let depth = require_positive("depth", depth.unwrap_or(diameter))?;
    if depth > diameter {
        return Err(CalcError::invalid_input(
            "depth",
            depth.to_string(),
            format!("Depth cannot exceed pipe diameter {}", diameter),
        ));
    }

    let r = diameter / 2.0;
    let cos_half_angle = (r - depth) / r;
    if !(-1.0..=1.0).contains(&cos_half_angle) {
        return Err(CalcError::domain_error(
            "pipe_geometry",
            format!("acos argument {} outside [-1, 1]", cos_half_angle),
        ));
    }

    let theta = 2.0 * cos_half_angle.acos();
    let area = r.powi(2) * (theta - theta.sin()) / 2.0;
    let perimeter = theta * r;
    ChannelGeometry::checked("pipe_geometry", perimeter, area / perimeter)
}

// =============================================================================
// RECTANGULAR CHANNEL
// =============================================================================

/// Wetted perimeter and hydraulic radius for a rectangular channel.
///
/// ```text
///    │~~~~~~~~~~~│
///  d │           │
///    └───────────┘
///          b
/// ```
///
/// # Formulas
/// - P = 2d + b
/// - Rh = db/(b + 2d)
///
/// # Example
/// ```rust
/// use civil_core::equations::hydraulics::rectangle_channel_geometry;
///
/// let g = rectangle_channel_geometry(10.0, 4.0).unwrap();
/// assert_eq!(g.wetted_perimeter, 18.0);
/// ```
pub fn rectangle_channel_geometry(width: f64, depth: f64) -> CalcResult<ChannelGeometry> {
    let width = require_positive("width", width)?;
    let depth = require_positive("depth", depth)?;

    let perimeter = 2.0 * depth + width;
    let hydraulic_radius = (depth * width) / (width + 2.0 * depth);
    ChannelGeometry::checked("rectangle_channel_geometry", perimeter, hydraulic_radius)
}

// =============================================================================
// TRAPEZOIDAL CHANNEL
// =============================================================================

/// Wetted perimeter and hydraulic radius for a trapezoidal channel.
///
/// ```text
///   ╲~~~~~~~~~~~~~~╱
///  d ╲            ╱
///     ╲θ_________╱
///          b
/// ```
///
/// # Formulas
/// - P = b + 2d/sin θ
/// - Rh = (b·d·sin θ + d²·cos θ)/(b·sin θ + 2d)
///
/// # Arguments
/// * `base` - Bottom width (zero degenerates to a triangle)
/// * `side_slope_angle_degrees` - Side wall angle from horizontal, 0° < θ < 180°
/// * `depth` - Flow depth
///
/// # Errors
/// `InvalidInput` for an angle outside (0°, 180°); `DomainError` when an
/// obtuse angle drives the flow area to zero or below.
pub fn trapezoid_channel_geometry(
    base: f64,
    side_slope_angle_degrees: f64,
    depth: f64,
) -> CalcResult<ChannelGeometry> {
    let base = require_non_negative("base", base)?;
    let angle = require_open_range("side_slope_angle_degrees", side_slope_angle_degrees, 0.0, 180.0)?;
    let depth = require_positive("depth", depth)?;

    let theta: Radians = Degrees(angle).into();
    let (sin, cos) = theta.0.sin_cos();

    let perimeter = base + 2.0 * (depth / sin);
    let hydraulic_radius = (base * depth * sin + depth.powi(2) * cos) / (base * sin + 2.0 * depth);
    ChannelGeometry::checked("trapezoid_channel_geometry", perimeter, hydraulic_radius)
}

// =============================================================================
// TRIANGULAR CHANNEL
// =============================================================================

/// Wetted perimeter and hydraulic radius for a symmetric triangular channel.
///
/// # Formulas
/// - P = 2d/sin θ
/// - Rh = d·cos θ/2
///
/// Only angles below 90° yield a positive hydraulic radius.
pub fn triangle_channel_geometry(side_slope_angle_degrees: f64, depth: f64) -> CalcResult<ChannelGeometry> {
    let angle = require_open_range("side_slope_angle_degrees", side_slope_angle_degrees, 0.0, 180.0)?;
    let depth = require_positive("depth", depth)?;

    let theta: Radians = Degrees(angle).into();
    let (sin, cos) = theta.0.sin_cos();

    let perimeter = (2.0 * depth) / sin;
    let hydraulic_radius = (depth * cos) / 2.0;
    ChannelGeometry::checked("triangle_channel_geometry", perimeter, hydraulic_radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_full_pipe_hydraulic_radius() {
        for diameter in [1.0, 6.0, 12.0, 36.0, 250.0] {
            let g = pipe_geometry(diameter, None).unwrap();
            assert_relative_eq!(g.hydraulic_radius, diameter / 4.0, max_relative = 1e-12);
            assert_relative_eq!(g.wetted_perimeter, std::f64::consts::PI * diameter, max_relative = 1e-12);

            let explicit = pipe_geometry(diameter, Some(diameter)).unwrap();
            assert_eq!(g, explicit);
        }
    }

    #[test]
    fn test_half_full_pipe() {
        // θ = π, A = πr²/2, P = πr → Rh = r/2 = D/4
        let g = pipe_geometry(20.0, Some(10.0)).unwrap();
        assert_relative_eq!(g.hydraulic_radius, 5.0, max_relative = 1e-12);
        assert_relative_eq!(g.wetted_perimeter, 10.0 * std::f64::consts::PI, max_relative = 1e-12);
    }

    #[test]
    fn test_partial_pipe_reference() {
        // 36" pipe at 8" depth
        let g = pipe_geometry(36.0, Some(8.0)).unwrap();
        assert_relative_eq!(g.hydraulic_radius, 4.765386, max_relative = 1e-5);
        assert_relative_eq!(g.wetted_perimeter, 35.343553, max_relative = 1e-6);
    }

    #[test]
    fn test_pipe_depth_exceeds_diameter() {
        let err = pipe_geometry(36.0, Some(36.5)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_pipe_invalid_inputs() {
        assert!(pipe_geometry(0.0, None).is_err());
        assert!(pipe_geometry(-12.0, None).is_err());
        assert!(pipe_geometry(12.0, Some(0.0)).is_err());
        assert!(pipe_geometry(12.0, Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_rectangle_channel() {
        let g = rectangle_channel_geometry(10.0, 4.0).unwrap();
        assert_eq!(g.wetted_perimeter, 18.0);
        assert_relative_eq!(g.hydraulic_radius, 40.0 / 18.0);
        assert_relative_eq!(g.flow_area(), 40.0, max_relative = 1e-12);
    }

    #[test]
    fn test_trapezoid_channel() {
        let g = trapezoid_channel_geometry(12.0, 60.0, 3.0).unwrap();
        assert_relative_eq!(g.wetted_perimeter, 18.928203, max_relative = 1e-6);
        assert_relative_eq!(g.hydraulic_radius, 2.176443, max_relative = 1e-6);
    }

    #[test]
    fn test_trapezoid_at_right_angle_is_rectangle() {
        let trap = trapezoid_channel_geometry(10.0, 90.0, 4.0).unwrap();
        let rect = rectangle_channel_geometry(10.0, 4.0).unwrap();
        assert_relative_eq!(trap.wetted_perimeter, rect.wetted_perimeter, max_relative = 1e-12);
        assert_relative_eq!(trap.hydraulic_radius, rect.hydraulic_radius, max_relative = 1e-12);
    }

    #[test]
    fn test_triangle_channel() {
        let g = triangle_channel_geometry(45.0, 6.0).unwrap();
        assert_relative_eq!(g.wetted_perimeter, 16.970563, max_relative = 1e-6);
        assert_relative_eq!(g.hydraulic_radius, 2.121320, max_relative = 1e-6);
    }

    #[test]
    fn test_hydraulic_radius_is_area_over_perimeter() {
        // Flow areas computed independently of the Rh formulas
        let d: f64 = 3.0;
        let b: f64 = 8.0;
        for angle in [15.0_f64, 30.0, 45.0, 60.0, 75.0, 89.0] {
            let theta = angle.to_radians();

            let trap = trapezoid_channel_geometry(b, angle, d).unwrap();
            let trap_area = b * d + d * d / theta.tan();
            assert_relative_eq!(trap.hydraulic_radius, trap_area / trap.wetted_perimeter, max_relative = 1e-10);
            assert!(trap.hydraulic_radius > 0.0);

            let tri = triangle_channel_geometry(angle, d).unwrap();
            // Rh = d·cos θ / 2 corresponds to A = d²·cos θ / sin θ
            let tri_area = d * d * theta.cos() / theta.sin();
            assert_relative_eq!(tri.hydraulic_radius, tri_area / tri.wetted_perimeter, max_relative = 1e-10);
            assert!(tri.hydraulic_radius > 0.0);
        }

        for depth in [1.0, 9.0, 18.0, 27.0, 35.0] {
            let r: f64 = 18.0;
            let g = pipe_geometry(36.0, Some(depth)).unwrap();
            let theta = 2.0 * ((r - depth) / r).acos();
            let area = r * r * (theta - theta.sin()) / 2.0;
            assert_relative_eq!(g.hydraulic_radius, area / g.wetted_perimeter, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_angle_out_of_range() {
        assert!(trapezoid_channel_geometry(10.0, 0.0, 2.0).is_err());
        assert!(trapezoid_channel_geometry(10.0, 180.0, 2.0).is_err());
        assert!(triangle_channel_geometry(-30.0, 2.0).is_err());
        assert!(triangle_channel_geometry(200.0, 2.0).is_err());
    }

    #[test]
    fn test_obtuse_triangle_is_domain_error() {
        let err = triangle_channel_geometry(120.0, 2.0).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
    }
}
