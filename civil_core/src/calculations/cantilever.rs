//! # Cantilever Calculation
//!
//! Uniformly loaded cantilever with a rectangle, rod, pipe, or I-beam
//! cross-section. Stress and tip deflection are checked against the
//! allowable values in [`DesignCriteria`].
//!
//! ## Assumptions
//!
//! - Fixed-free support, uniform load over the full length
//! - Linear elastic, small deflections
//! - Consistent units (in, lb/in, psi)
//!
//! ## Example
//!
//! ```rust
//! use civil_core::calculations::cantilever::{calculate, BeamSection, CantileverInput};
//! use civil_core::criteria::DesignCriteria;
//!
//! let input = CantileverInput {
//!     label: "Canopy arm".to_string(),
//!     section: BeamSection::Rectangle { base: 10.0, height: 12.0 },
//!     length: 360.0,
//!     modulus: 27_000_000.0,
//!     load_per_length: 3.0,
//! };
//!
//! let result = calculate(&input, &DesignCriteria::default()).unwrap();
//! assert!(result.passes());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::criteria::DesignCriteria;
use crate::equations::beam::{cantilever_response, BeamResponse};
use crate::equations::registry::{Formula, FormulaTracker};
use crate::equations::section::{i_beam_section, pipe_section, rectangle_section, rod_section, SectionProperties};
use crate::errors::{CalcError, CalcResult};

/// Cross-section of the cantilever (dimensions in inches).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BeamSection {
    /// Solid rectangle, bending about the strong axis
    Rectangle { base: f64, height: f64 },
    /// Solid circular rod
    Rod { diameter: f64 },
    /// Hollow circular pipe
    Pipe { outer_diameter: f64, inner_diameter: f64 },
    /// Symmetric I-beam
    IBeam {
        /// Flange width
        base: f64,
        /// Clear web height between flanges
        height: f64,
        /// Overall depth
        depth: f64,
        /// Web thickness
        thickness: f64,
    },
}

impl BeamSection {
    /// Display name for the section
    pub fn display_name(&self) -> &'static str {
        match self {
            BeamSection::Rectangle { .. } => "Rectangle",
            BeamSection::Rod { .. } => "Rod",
            BeamSection::Pipe { .. } => "Pipe",
            BeamSection::IBeam { .. } => "I-Beam",
        }
    }

    /// Section properties, plus the formula that produced them
    pub fn properties(&self) -> CalcResult<(SectionProperties, Formula)> {
        match *self {
            BeamSection::Rectangle { base, height } => Ok((rectangle_section(base, height)?, Formula::RectangleSection)),
            BeamSection::Rod { diameter } => Ok((rod_section(diameter)?, Formula::RodSection)),
            BeamSection::Pipe {
                outer_diameter,
                inner_diameter,
            } => Ok((pipe_section(outer_diameter, inner_diameter)?, Formula::PipeSection)),
            BeamSection::IBeam {
                base,
                height,
                depth,
                thickness,
            } => Ok((i_beam_section(base, height, depth, thickness)?, Formula::IBeamSection)),
        }
    }
}

/// Input parameters for a cantilever.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Sign post",
///   "section": { "type": "Pipe", "outer_diameter": 6.0, "inner_diameter": 5.0 },
///   "length": 120.0,
///   "modulus": 29000000.0,
///   "load_per_length": 2.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CantileverInput {
    /// User label
    pub label: String,

    /// Cross-section
    pub section: BeamSection,

    /// Cantilever length (in)
    pub length: f64,

    /// Modulus of elasticity (psi)
    pub modulus: f64,

    /// Uniform load (lb/in)
    pub load_per_length: f64,
}

impl CantileverInput {
    /// Validate input parameters. Section dimensions are checked by the
    /// section formulas.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(CalcError::invalid_input(
                "length",
                self.length.to_string(),
                "Length must be positive",
            ));
        }
        if !(self.modulus.is_finite() && self.modulus > 0.0) {
            return Err(CalcError::invalid_input(
                "modulus",
                self.modulus.to_string(),
                "Modulus of elasticity must be positive",
            ));
        }
        if !(self.load_per_length.is_finite() && self.load_per_length >= 0.0) {
            return Err(CalcError::invalid_input(
                "load_per_length",
                self.load_per_length.to_string(),
                "Load cannot be negative",
            ));
        }
        Ok(())
    }
}

/// Results from a cantilever calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "section": { "moment_of_inertia": 1440.0, "extreme_fiber_distance": 6.0 },
///   "response": { "deflection": 0.162, "stress": 810.0 },
///   "stress_unity": 0.0405,
///   "deflection_unity": 0.324,
///   "formulas": {
///     "usages": [
///       { "formula": "RectangleSection", "context": "Sign post" },
///       { "formula": "CantileverUniformMoment", "context": "Sign post" },
///       { "formula": "CantileverUniformDeflection", "context": "Sign post" },
///       { "formula": "BendingStress", "context": "Sign post" },
///       { "formula": "StressUnityRatio", "context": "Sign post" },
///       { "formula": "DeflectionUnityRatio", "context": "Sign post" }
///     ]
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CantileverResult {
    /// Section properties used
    pub section: SectionProperties,

    /// Tip deflection (in) and maximum bending stress (psi)
    pub response: BeamResponse,

    /// Stress unity check: stress / allowable_stress
    pub stress_unity: f64,

    /// Deflection unity check: deflection / deflection_limit
    pub deflection_unity: f64,

    /// Formulas applied, in order
    pub formulas: FormulaTracker,
}

impl CantileverResult {
    /// Check if the cantilever passes all checks
    pub fn passes(&self) -> bool {
        self.stress_unity <= 1.0 && self.deflection_unity <= 1.0
    }

    /// Get the governing (highest) unity ratio
    pub fn governing_unity(&self) -> f64 {
        self.stress_unity.max(self.deflection_unity)
    }

    /// Get the name of the governing check
    pub fn governing_condition(&self) -> &'static str {
        if self.stress_unity >= self.deflection_unity {
            "Stress"
        } else {
            "Deflection"
        }
    }
}

/// Calculate cantilever stress and deflection.
///
/// # Arguments
///
/// * `input` - Cantilever parameters
/// * `criteria` - Allowable stress and deflection limit
///
/// # Returns
///
/// * `Ok(CantileverResult)` - Calculation results
/// * `Err(CalcError)` - If inputs are invalid
pub fn calculate(input: &CantileverInput, criteria: &DesignCriteria) -> CalcResult<CantileverResult> {
    debug!(label = %input.label, section = input.section.display_name(), "calculating cantilever");
    input.validate()?;

    let mut formulas = FormulaTracker::new();

    let (section, section_formula) = input.section.properties()?;
    formulas.record(section_formula, &input.label);

    let response = cantilever_response(
        input.length,
        section.moment_of_inertia,
        section.extreme_fiber_distance,
        input.modulus,
        input.load_per_length,
    )?;
    formulas.record(Formula::CantileverUniformMoment, &input.label);
    formulas.record(Formula::CantileverUniformDeflection, &input.label);
    formulas.record(Formula::BendingStress, &input.label);

    let stress_unity = response.stress / criteria.allowable_stress;
    let deflection_unity = response.deflection / criteria.deflection_limit;
    formulas.record(Formula::StressUnityRatio, &input.label);
    formulas.record(Formula::DeflectionUnityRatio, &input.label);

    debug!(
        label = %input.label,
        stress = response.stress,
        deflection = response.deflection,
        stress_unity,
        deflection_unity,
        "cantilever complete"
    );

    Ok(CantileverResult {
        section,
        response,
        stress_unity,
        deflection_unity,
        formulas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_cantilever() -> CantileverInput {
        CantileverInput {
            label: "Test Cantilever".to_string(),
            section: BeamSection::Rectangle {
                base: 10.0,
                height: 12.0,
            },
            length: 360.0,
            modulus: 27_000_000.0,
            load_per_length: 3.0,
        }
    }

    #[test]
    fn test_reference_rectangle() {
        let result = calculate(&test_cantilever(), &DesignCriteria::default()).unwrap();

        assert_relative_eq!(result.section.moment_of_inertia, 1440.0, max_relative = 1e-12);
        assert_relative_eq!(result.response.deflection, 0.162, max_relative = 1e-12);
        assert_relative_eq!(result.response.stress, 810.0, max_relative = 1e-12);
        // 0.162 / 0.5 and 810 / 20,000
        assert_relative_eq!(result.deflection_unity, 0.324, max_relative = 1e-12);
        assert_relative_eq!(result.stress_unity, 0.0405, max_relative = 1e-12);
        assert!(result.passes());
        assert_eq!(result.governing_condition(), "Deflection");
        assert_relative_eq!(result.governing_unity(), 0.324, max_relative = 1e-12);
    }

    #[test]
    fn test_slender_rod_fails_deflection() {
        let input = CantileverInput {
            label: "Rod".to_string(),
            section: BeamSection::Rod { diameter: 2.0 },
            length: 120.0,
            modulus: 29_000_000.0,
            load_per_length: 1.0,
        };
        let result = calculate(&input, &DesignCriteria::default()).unwrap();

        // I = π(2⁴)/64 = π/4; δ = 120⁴/(8 × 29e6 × π/4) ≈ 1.138 in
        assert_relative_eq!(
            result.response.deflection,
            120f64.powi(4) / (8.0 * 29_000_000.0 * std::f64::consts::FRAC_PI_4),
            max_relative = 1e-12
        );
        assert!(result.deflection_unity > 1.0);
        assert!(result.stress_unity < 1.0);
        assert!(!result.passes());
    }

    #[test]
    fn test_i_beam_and_pipe_sections() {
        let mut input = test_cantilever();
        input.section = BeamSection::IBeam {
            base: 6.0,
            height: 11.0,
            depth: 12.0,
            thickness: 0.5,
        };
        let result = calculate(&input, &DesignCriteria::default()).unwrap();
        assert_relative_eq!(result.section.moment_of_inertia, 253.958333, max_relative = 1e-6);
        assert_eq!(result.formulas.unique_formulas()[0], Formula::IBeamSection);

        input.section = BeamSection::Pipe {
            outer_diameter: 6.0,
            inner_diameter: 5.0,
        };
        let result = calculate(&input, &DesignCriteria::default()).unwrap();
        assert_relative_eq!(result.section.moment_of_inertia, 32.937635, max_relative = 1e-6);
        assert_eq!(result.section.extreme_fiber_distance, 6.0);
    }

    #[test]
    fn test_zero_load() {
        let mut input = test_cantilever();
        input.load_per_length = 0.0;
        let result = calculate(&input, &DesignCriteria::default()).unwrap();
        assert_eq!(result.response.deflection, 0.0);
        assert_eq!(result.response.stress, 0.0);
        assert!(result.passes());
    }

    #[test]
    fn test_custom_criteria() {
        let criteria = DesignCriteria {
            allowable_stress: 500.0,
            ..Default::default()
        };
        let result = calculate(&test_cantilever(), &criteria).unwrap();
        assert!(!result.passes());
        assert_eq!(result.governing_condition(), "Stress");
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = test_cantilever();
        input.load_per_length = -1.0;
        assert!(calculate(&input, &DesignCriteria::default()).is_err());

        let mut input = test_cantilever();
        input.section = BeamSection::Pipe {
            outer_diameter: 4.0,
            inner_diameter: 4.0,
        };
        assert!(calculate(&input, &DesignCriteria::default()).is_err());

        let mut input = test_cantilever();
        input.modulus = 0.0;
        assert!(calculate(&input, &DesignCriteria::default()).is_err());
    }

    #[test]
    fn test_serialization() {
        let input = test_cantilever();
        let json = serde_json::to_string_pretty(&input).unwrap();
        assert!(json.contains("\"type\": \"Rectangle\""));
        let roundtrip: CantileverInput = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.section, input.section);
        assert_eq!(roundtrip.length, input.length);
    }

    #[test]
    fn test_result_json_includes_formulas() {
        let result = calculate(&test_cantilever(), &DesignCriteria::default()).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        let usages = value["formulas"]["usages"].as_array().unwrap();
        assert_eq!(usages.len(), 6);
        assert_eq!(usages[0]["formula"], "RectangleSection");
        assert_eq!(usages[5]["formula"], "DeflectionUnityRatio");
    }
}
