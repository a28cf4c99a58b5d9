//! # Cantilever Beam Formulas
//!
//! Fixed-free beam under a uniform distributed load. The fixed support is at
//! x = 0 and the free tip at x = L.
//!
//! ## Notation
//!
//! - `L` = Cantilever length
//! - `w` = Uniform load intensity (force per unit length)
//! - `M` = Bending moment
//! - `δ` = Deflection
//! - `σ` = Bending stress at the extreme fiber
//! - `E` = Modulus of elasticity
//! - `I` = Moment of inertia
//! - `y` = Extreme fiber distance
//!
//! ## Sign Conventions
//!
//! - Loads: Positive downward
//! - Deflection: Positive downward
//! - Moment and stress are reported as magnitudes
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 8.1, Case 2a

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};

/// Maximum deflection and stress of a loaded beam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamResponse {
    /// Maximum deflection (tip deflection for a cantilever)
    pub deflection: f64,
    /// Maximum bending stress at the extreme fiber
    pub stress: f64,
}

/// Fixed-end moment magnitude for a cantilever with uniform load
///
/// ```text
///   ▓│ w w w w w w w w
///   ▓│↓ ↓ ↓ ↓ ↓ ↓ ↓ ↓ ↓
///   ▓├─────────────────
///   ▓│←───── L ───────→
/// ```
///
/// # Formula (Roark's Table 8.1, Case 2a)
/// M_max = wL²/2  (at the fixed support)
#[inline]
pub fn cantilever_uniform_moment(w: f64, l: f64) -> f64 {
    w * l.powi(2) / 2.0
}

/// Tip deflection for a cantilever with uniform load
///
/// # Formula (Roark's Table 8.1, Case 2a)
/// δ_max = wL⁴/(8EI)
#[inline]
pub fn cantilever_uniform_max_deflection(w: f64, l: f64, e: f64, i: f64) -> f64 {
    w * l.powi(4) / (8.0 * e * i)
}

/// Flexure formula σ = My/I
#[inline]
pub fn bending_stress(m: f64, y: f64, i: f64) -> f64 {
    m * y / i
}

/// Deflection and stress for a cantilever under uniform load.
///
/// # Formulas
/// - M = wL²/2
/// - δ = wL⁴/(8EI)
/// - σ = M·y/I
///
/// # Arguments
/// * `length` - Cantilever length L
/// * `inertia` - Moment of inertia I, strictly positive
/// * `extreme_fiber_distance` - y, strictly positive
/// * `modulus` - Modulus of elasticity E, strictly positive
/// * `load_per_length` - w, zero or greater
///
/// # Example
/// ```rust
/// use civil_core::equations::beam::cantilever_response;
/// use civil_core::equations::section::rectangle_section;
///
/// // 10" x 12" timber, 30 ft long, 3 lb/in
/// let props = rectangle_section(10.0, 12.0).unwrap();
/// let response = cantilever_response(
///     360.0,
///     props.moment_of_inertia,
///     props.extreme_fiber_distance,
///     27_000_000.0,
///     3.0,
/// ).unwrap();
/// assert!((response.deflection - 0.162).abs() < 1e-9);
/// assert!((response.stress - 810.0).abs() < 1e-9);
/// ```
pub fn cantilever_response(
    length: f64,
    inertia: f64,
    extreme_fiber_distance: f64,
    modulus: f64,
    load_per_length: f64,
) -> CalcResult<BeamResponse> {
    let l = require_positive("length", length)?;
    let i = require_positive("inertia", inertia)?;
    let y = require_positive("extreme_fiber_distance", extreme_fiber_distance)?;
    let e = require_positive("modulus", modulus)?;
    let w = require_non_negative("load_per_length", load_per_length)?;

    let moment = cantilever_uniform_moment(w, l);
    let deflection = cantilever_uniform_max_deflection(w, l, e, i);
    let stress = bending_stress(moment, y, i);
    if !(deflection.is_finite() && stress.is_finite()) {
        return Err(CalcError::domain_error(
            "cantilever_response",
            format!("non-finite result (deflection = {}, stress = {})", deflection, stress),
        ));
    }

    Ok(BeamResponse { deflection, stress })
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::section::rectangle_section;
    use approx::assert_relative_eq;

    #[test]
    fn test_cantilever_moment() {
        // M = wL²/2 = 3 × 360² / 2 = 194,400 in-lb
        assert_eq!(cantilever_uniform_moment(3.0, 360.0), 194_400.0);
    }

    #[test]
    fn test_cantilever_reference_beam() {
        let props = rectangle_section(10.0, 12.0).unwrap();
        let response = cantilever_response(360.0, props.moment_of_inertia, props.extreme_fiber_distance, 27_000_000.0, 3.0)
            .unwrap();

        // δ = 3 × 360⁴ / (8 × 27e6 × 1440) = 0.162 in
        assert_relative_eq!(response.deflection, 0.162, max_relative = 1e-12);
        // σ = 194,400 × 6 / 1440 = 810 psi
        assert_relative_eq!(response.stress, 810.0, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_load_gives_zero_response() {
        for (b, h) in [(2.0, 4.0), (10.0, 12.0), (3.5, 11.25)] {
            let props = rectangle_section(b, h).unwrap();
            let response =
                cantilever_response(120.0, props.moment_of_inertia, props.extreme_fiber_distance, 1_600_000.0, 0.0)
                    .unwrap();
            assert_eq!(response.deflection, 0.0);
            assert_eq!(response.stress, 0.0);
        }
    }

    #[test]
    fn test_response_scales_with_load() {
        let light = cantilever_response(240.0, 500.0, 5.0, 29_000_000.0, 2.0).unwrap();
        let heavy = cantilever_response(240.0, 500.0, 5.0, 29_000_000.0, 4.0).unwrap();
        assert_relative_eq!(heavy.deflection, 2.0 * light.deflection, max_relative = 1e-12);
        assert_relative_eq!(heavy.stress, 2.0 * light.stress, max_relative = 1e-12);
    }

    #[test]
    fn test_overflowing_response_rejected() {
        // L⁴ overflows f64
        let err = cantilever_response(1e100, 1.0, 1.0, 1.0, 1.0).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_invalid_response_inputs() {
        assert!(cantilever_response(240.0, 0.0, 5.0, 29_000_000.0, 2.0).is_err());
        assert!(cantilever_response(240.0, 500.0, 5.0, 0.0, 2.0).is_err());
        assert!(cantilever_response(240.0, 500.0, 5.0, 29_000_000.0, -1.0).is_err());
        assert!(cantilever_response(0.0, 500.0, 5.0, 29_000_000.0, 1.0).is_err());
    }
}
