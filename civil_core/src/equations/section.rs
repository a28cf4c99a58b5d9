//! # Cross-Section Property Formulas
//!
//! Moment of inertia and extreme-fiber distance for the beam shapes used in
//! the cantilever calculation. These two values are everything
//! [`cantilever_response`](super::beam::cantilever_response) needs.
//!
//! ## Notation
//!
//! - `I` = Moment of inertia (second moment of area) about the bending axis
//! - `y` = Distance from the neutral axis to the extreme fiber
//! - `b` = Width of section
//! - `h` = Height of section (web height for I-beams)
//! - `d` = Overall depth (I-beams) or diameter (rods)
//! - `t` = Web thickness
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table A.1
//! - Any structural mechanics textbook

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};

/// Section properties needed for bending calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Moment of inertia I (length⁴)
    pub moment_of_inertia: f64,
    /// Extreme fiber distance y (length)
    pub extreme_fiber_distance: f64,
}

impl SectionProperties {
    /// Section modulus S = I/y
    pub fn section_modulus(&self) -> f64 {
        self.moment_of_inertia / self.extreme_fiber_distance
    }
}

// =============================================================================
// RECTANGULAR SECTION
// =============================================================================

/// Moment of inertia for a solid rectangle about its centroidal axis
///
/// ```text
///     ┌─────────┐
///     │         │
///   h │ ════════│ ← neutral axis at h/2
///     │         │
///     └─────────┘
///          b
/// ```
///
/// # Formula
/// - I = bh³/12
/// - y = h/2
///
/// # Example
/// ```rust
/// use civil_core::equations::section::rectangle_section;
///
/// let props = rectangle_section(10.0, 12.0).unwrap();
/// assert_eq!(props.moment_of_inertia, 1440.0);
/// assert_eq!(props.extreme_fiber_distance, 6.0);
/// ```
pub fn rectangle_section(base: f64, height: f64) -> CalcResult<SectionProperties> {
    let b = require_positive("base", base)?;
    let h = require_positive("height", height)?;

    Ok(SectionProperties {
        moment_of_inertia: b * h.powi(3) / 12.0,
        extreme_fiber_distance: h / 2.0,
    })
}

// =============================================================================
// SOLID ROD
// =============================================================================

/// Moment of inertia for a solid circular rod
///
/// # Formula
/// - I = πd⁴/64
/// - y = d/2
pub fn rod_section(diameter: f64) -> CalcResult<SectionProperties> {
    let d = require_positive("diameter", diameter)?;

    Ok(SectionProperties {
        moment_of_inertia: PI * d.powi(4) / 64.0,
        extreme_fiber_distance: d / 2.0,
    })
}

// =============================================================================
// HOLLOW PIPE
// =============================================================================

/// Moment of inertia for a hollow circular pipe
///
/// # Formula
/// - I = π(Do⁴ − Di⁴)/64
/// - y = Do
///
/// The extreme fiber distance is the full outer diameter, not Do/2, so
/// stresses from this section are twice those computed with y = Do/2.
///
/// # Arguments
/// * `outer_diameter` - Do, strictly positive
/// * `inner_diameter` - Di, 0 ≤ Di < Do
pub fn pipe_section(outer_diameter: f64, inner_diameter: f64) -> CalcResult<SectionProperties> {
    let d_o = require_positive("outer_diameter", outer_diameter)?;
    let d_i = require_non_negative("inner_diameter", inner_diameter)?;
    if d_i >= d_o {
        return Err(CalcError::invalid_input(
            "inner_diameter",
            d_i.to_string(),
            format!("Inner diameter must be less than outer diameter {}", d_o),
        ));
    }

    Ok(SectionProperties {
        moment_of_inertia: PI * (d_o.powi(4) - d_i.powi(4)) / 64.0,
        extreme_fiber_distance: d_o,
    })
}

// =============================================================================
// I-BEAM
// =============================================================================

/// Moment of inertia for a symmetric I-beam
///
/// ```text
///     ┌───────────┐  ─┬─
///     └────┐ ┌────┘   │
///          │ │ t      │ d
///        h │ │        │
///     ┌────┘ └────┐   │
///     └───────────┘  ─┴─
///           b
/// ```
///
/// The section is the full b×d rectangle minus the two voids beside the web,
/// which together form a (b − t)×h rectangle.
///
/// # Formula
/// - I = (b·d³ − (b − t)·h³)/12
/// - y = d/2
///
/// # Arguments
/// * `base` - Flange width b
/// * `height` - Clear web height h between flanges, h < d
/// * `depth` - Overall depth d
/// * `thickness` - Web thickness t, t < b
pub fn i_beam_section(base: f64, height: f64, depth: f64, thickness: f64) -> CalcResult<SectionProperties> {
    let b = require_positive("base", base)?;
    let h = require_positive("height", height)?;
    let d = require_positive("depth", depth)?;
    let t = require_positive("thickness", thickness)?;

    if t >= b {
        return Err(CalcError::invalid_input(
            "thickness",
            t.to_string(),
            format!("Web thickness must be less than flange width {}", b),
        ));
    }
    if h >= d {
        return Err(CalcError::invalid_input(
            "height",
            h.to_string(),
            format!("Web height must be less than overall depth {}", d),
        ));
    }

    Ok(SectionProperties {
        moment_of_inertia: (b * d.powi(3) - (b - t) * h.powi(3)) / 12.0,
        extreme_fiber_distance: d / 2.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangle_section() {
        let props = rectangle_section(1.5, 9.25).unwrap();
        // I = 1.5 × 9.25³ / 12 = 98.93 in⁴
        assert!((props.moment_of_inertia - 98.93).abs() < 0.01);
        assert_eq!(props.extreme_fiber_distance, 4.625);
        // S = bd²/6 = 21.39 in³
        assert!((props.section_modulus() - 21.39).abs() < 0.01);
    }

    #[test]
    fn test_rod_section() {
        let props = rod_section(4.0).unwrap();
        assert_relative_eq!(props.moment_of_inertia, 4.0 * PI, max_relative = 1e-12);
        assert_eq!(props.extreme_fiber_distance, 2.0);
    }

    #[test]
    fn test_pipe_section_uses_full_outer_diameter() {
        let props = pipe_section(6.0, 5.0).unwrap();
        assert_relative_eq!(props.moment_of_inertia, 32.937635, max_relative = 1e-6);
        assert_eq!(props.extreme_fiber_distance, 6.0);
    }

    #[test]
    fn test_solid_pipe_matches_rod_inertia() {
        let pipe = pipe_section(3.0, 0.0).unwrap();
        let rod = rod_section(3.0).unwrap();
        assert_relative_eq!(pipe.moment_of_inertia, rod.moment_of_inertia, max_relative = 1e-12);
    }

    #[test]
    fn test_i_beam_section() {
        let props = i_beam_section(6.0, 11.0, 12.0, 0.5).unwrap();
        assert_relative_eq!(props.moment_of_inertia, 253.958333, max_relative = 1e-6);
        assert_eq!(props.extreme_fiber_distance, 6.0);
    }

    #[test]
    fn test_i_beam_less_stiff_than_solid_rectangle() {
        let i_beam = i_beam_section(6.0, 11.0, 12.0, 0.5).unwrap();
        let solid = rectangle_section(6.0, 12.0).unwrap();
        assert!(i_beam.moment_of_inertia < solid.moment_of_inertia);
    }

    #[test]
    fn test_invalid_sections() {
        assert!(rectangle_section(0.0, 12.0).is_err());
        assert!(rod_section(-1.0).is_err());
        assert!(pipe_section(4.0, 4.0).is_err());
        assert!(pipe_section(4.0, -1.0).is_err());
        assert!(i_beam_section(6.0, 11.0, 12.0, 6.0).is_err());
        assert!(i_beam_section(6.0, 12.0, 12.0, 0.5).is_err());
    }
}
