//! # Gravity Retaining Wall Calculation
//!
//! Sliding and overturning checks for a rectangular gravity wall, plus a
//! brute-force search for the cheapest wall that meets the minimum factor
//! of safety.
//!
//! ## Assumptions
//!
//! - Rectangular wall of uniform material
//! - Level cohesionless backfill with uniform surcharge (Rankine active)
//! - Forces per foot of wall; US units (ft, pcf, psf)
//!
//! ## Example
//!
//! ```rust
//! use civil_core::calculations::retaining_wall::{search_designs, WallMaterial, WallSearch};
//! use civil_core::criteria::DesignCriteria;
//!
//! let design = search_designs(&WallSearch::default(), &DesignCriteria::default())
//!     .unwrap()
//!     .expect("a passing wall exists in the default ranges");
//!
//! assert_eq!(design.material, WallMaterial::Plastic);
//! assert_eq!((design.base, design.height), (4.0, 6.0));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::criteria::DesignCriteria;
use crate::equations::geotech::{wall_stability, WallStability};
use crate::equations::registry::{Formula, FormulaTracker};
use crate::errors::{CalcError, CalcResult};
use crate::units::{Degrees, Radians};

// ============================================================================
// Materials
// ============================================================================

/// Wall construction material.
///
/// | Material | Unit weight (pcf) | Cost ($/ft³) |
/// |----------|-------------------|--------------|
/// | Plastic  | 74                | 2.20         |
/// | Brick    | 130               | 10.15        |
/// | Concrete | 150               | 6.45         |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallMaterial {
    Plastic,
    Brick,
    Concrete,
}

impl WallMaterial {
    /// Every material in the catalog
    pub const ALL: [WallMaterial; 3] = [WallMaterial::Plastic, WallMaterial::Brick, WallMaterial::Concrete];

    /// Unit weight γw (pcf)
    pub fn unit_weight(&self) -> f64 {
        match self {
            WallMaterial::Plastic => 74.0,
            WallMaterial::Brick => 130.0,
            WallMaterial::Concrete => 150.0,
        }
    }

    /// Installed cost per cubic foot
    pub fn cost_per_cubic_foot(&self) -> f64 {
        match self {
            WallMaterial::Plastic => 2.20,
            WallMaterial::Brick => 10.15,
            WallMaterial::Concrete => 6.45,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WallMaterial::Plastic => "Plastic",
            WallMaterial::Brick => "Brick",
            WallMaterial::Concrete => "Concrete",
        }
    }
}

impl fmt::Display for WallMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for WallMaterial {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plastic" => Ok(WallMaterial::Plastic),
            "brick" => Ok(WallMaterial::Brick),
            "concrete" => Ok(WallMaterial::Concrete),
            _ => Err(CalcError::material_not_found(s)),
        }
    }
}

// ============================================================================
// Soil
// ============================================================================

/// Backfill and base conditions shared by a check and a search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoilConditions {
    /// Soil unit weight γs (pcf)
    pub soil_unit_weight: f64,
    /// Internal friction angle φ (degrees)
    pub friction_angle_deg: f64,
    /// Wall base friction coefficient μ
    pub friction_coefficient: f64,
    /// Uniform surcharge q (psf)
    pub surcharge_load: f64,
}

impl Default for SoilConditions {
    fn default() -> Self {
        Self {
            soil_unit_weight: 100.0,
            friction_angle_deg: 30.0,
            friction_coefficient: 0.7,
            surcharge_load: 25.0,
        }
    }
}

impl SoilConditions {
    /// Factors of safety for a wall of the given size and material
    fn stability(&self, base: f64, height: f64, material: WallMaterial) -> CalcResult<WallStability> {
        let phi = Radians::from(Degrees(self.friction_angle_deg));
        wall_stability(
            base,
            height,
            self.soil_unit_weight,
            material.unit_weight(),
            phi.0,
            self.friction_coefficient,
            self.surcharge_load,
        )
    }
}

// ============================================================================
// Single wall check
// ============================================================================

/// Input parameters for a single wall check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "RW-1",
///   "material": "Brick",
///   "base": 2.0,
///   "height": 7.0,
///   "soil": {
///     "soil_unit_weight": 100.0,
///     "friction_angle_deg": 30.0,
///     "friction_coefficient": 0.7,
///     "surcharge_load": 25.0
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallInput {
    /// User label
    pub label: String,

    /// Wall material
    pub material: WallMaterial,

    /// Base width B (ft)
    pub base: f64,

    /// Wall height H (ft)
    pub height: f64,

    /// Backfill conditions
    #[serde(default)]
    pub soil: SoilConditions,
}

/// Results from a wall check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallResult {
    /// Sliding and overturning factors of safety
    pub stability: WallStability,

    /// Minimum factor of safety the result was checked against
    pub minimum_factor_of_safety: f64,

    /// Wall weight per foot W = B·H·γw (lb/ft)
    pub weight_per_foot: f64,

    /// Material cost per foot of wall
    pub cost_per_foot: f64,

    /// Formulas applied, in order
    pub formulas: FormulaTracker,
}

impl WallResult {
    /// Both factors of safety meet the minimum
    pub fn passes(&self) -> bool {
        self.stability.passes(self.minimum_factor_of_safety)
    }

    /// Get the name of the governing check
    pub fn governing_condition(&self) -> &'static str {
        if self.stability.sliding_fos <= self.stability.overturning_fos {
            "Sliding"
        } else {
            "Overturning"
        }
    }
}

/// Check sliding and overturning of a single wall.
///
/// # Returns
///
/// * `Ok(WallResult)` - Factors of safety and pass/fail
/// * `Err(CalcError)` - If inputs are invalid
pub fn calculate(input: &WallInput, criteria: &DesignCriteria) -> CalcResult<WallResult> {
    debug!(label = %input.label, material = %input.material, "calculating retaining wall");

    let stability = input.soil.stability(input.base, input.height, input.material)?;

    let mut formulas = FormulaTracker::new();
    for formula in [
        Formula::RankineActiveCoefficient,
        Formula::ActiveForce,
        Formula::SlidingFactorOfSafety,
        Formula::OverturningFactorOfSafety,
        Formula::MinimumFactorOfSafety,
    ] {
        formulas.record(formula, &input.label);
    }

    let volume_per_foot = input.base * input.height;

    debug!(
        label = %input.label,
        sliding_fos = stability.sliding_fos,
        overturning_fos = stability.overturning_fos,
        "retaining wall complete"
    );

    Ok(WallResult {
        stability,
        minimum_factor_of_safety: criteria.minimum_factor_of_safety,
        weight_per_foot: volume_per_foot * input.material.unit_weight(),
        cost_per_foot: volume_per_foot * input.material.cost_per_cubic_foot(),
        formulas,
    })
}

// ============================================================================
// Design search
// ============================================================================

/// Largest number of values a single [`DimensionRange`] may produce.
pub const MAX_CANDIDATES: usize = 10_000;

/// Evenly spaced candidate dimensions `start, start + step, ...` below `stop`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionRange {
    pub start: f64,
    /// Exclusive upper bound
    pub stop: f64,
    pub step: f64,
}

impl DimensionRange {
    pub const fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }

    /// Candidate values. Fails if the range is empty, not positive, or longer
    /// than [`MAX_CANDIDATES`].
    ///
    /// ```rust
    /// use civil_core::calculations::retaining_wall::DimensionRange;
    ///
    /// let bases = DimensionRange::new(1.0, 4.5, 0.5).values().unwrap();
    /// assert_eq!(bases, vec![1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0]);
    /// ```
    pub fn values(&self) -> CalcResult<Vec<f64>> {
        if !(self.start.is_finite() && self.start > 0.0) {
            return Err(CalcError::invalid_input(
                "start",
                self.start.to_string(),
                "Range must start above zero",
            ));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(CalcError::invalid_input(
                "step",
                self.step.to_string(),
                "Step must be positive",
            ));
        }
        if !(self.stop.is_finite() && self.stop > self.start) {
            return Err(CalcError::invalid_input(
                "stop",
                self.stop.to_string(),
                "Stop must exceed start",
            ));
        }

        let count = ((self.stop - self.start) / self.step).ceil();
        if count > MAX_CANDIDATES as f64 {
            return Err(CalcError::invalid_input(
                "step",
                self.step.to_string(),
                format!("Range yields more than {} candidates", MAX_CANDIDATES),
            ));
        }

        let count = count as usize;
        Ok((0..count).map(|i| self.start + i as f64 * self.step).collect())
    }
}

/// Parameters for the cheapest-wall search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WallSearch {
    /// Materials to consider
    pub materials: Vec<WallMaterial>,
    /// Candidate base widths (ft)
    pub base: DimensionRange,
    /// Candidate heights (ft)
    pub height: DimensionRange,
    /// Length of wall to price (ft)
    pub wall_length: f64,
    /// Backfill conditions
    pub soil: SoilConditions,
}

impl Default for WallSearch {
    fn default() -> Self {
        Self {
            materials: WallMaterial::ALL.to_vec(),
            base: DimensionRange::new(1.0, 4.5, 0.5),
            height: DimensionRange::new(6.0, 12.5, 0.5),
            wall_length: 50.0,
            soil: SoilConditions::default(),
        }
    }
}

/// The cheapest passing wall found by [`search_designs`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallDesign {
    pub material: WallMaterial,
    /// Base width B (ft)
    pub base: f64,
    /// Wall height H (ft)
    pub height: f64,
    pub stability: WallStability,
    /// Total cost B·H·L·rate
    pub cost: f64,
}

/// Find the cheapest wall that meets the minimum factor of safety.
///
/// Scans every material × base × height combination. A later candidate
/// replaces the current best only when strictly cheaper, so ties keep the
/// first one found in material, base, height order.
///
/// # Returns
///
/// * `Ok(Some(WallDesign))` - The cheapest passing wall
/// * `Ok(None)` - No candidate passes
/// * `Err(CalcError)` - If the search parameters are invalid
pub fn search_designs(search: &WallSearch, criteria: &DesignCriteria) -> CalcResult<Option<WallDesign>> {
    if !(search.wall_length.is_finite() && search.wall_length > 0.0) {
        return Err(CalcError::invalid_input(
            "wall_length",
            search.wall_length.to_string(),
            "Wall length must be positive",
        ));
    }
    let bases = search.base.values()?;
    let heights = search.height.values()?;

    let mut best: Option<WallDesign> = None;
    let mut evaluated = 0usize;

    for &material in &search.materials {
        for &base in &bases {
            for &height in &heights {
                evaluated += 1;
                let stability = search.soil.stability(base, height, material)?;
                if !stability.passes(criteria.minimum_factor_of_safety) {
                    continue;
                }

                let cost = base * height * search.wall_length * material.cost_per_cubic_foot();
                if best.as_ref().map_or(true, |b| cost < b.cost) {
                    best = Some(WallDesign {
                        material,
                        base,
                        height,
                        stability,
                        cost,
                    });
                }
            }
        }
    }

    match &best {
        Some(design) => info!(
            evaluated,
            material = %design.material,
            base = design.base,
            height = design.height,
            cost = design.cost,
            "cheapest passing wall found"
        ),
        None => info!(evaluated, "no wall meets the minimum factor of safety"),
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_wall() -> WallInput {
        WallInput {
            label: "RW-1".to_string(),
            material: WallMaterial::Brick,
            base: 2.0,
            height: 7.0,
            soil: SoilConditions::default(),
        }
    }

    #[test]
    fn test_material_catalog() {
        assert_eq!(WallMaterial::Plastic.unit_weight(), 74.0);
        assert_eq!(WallMaterial::Brick.cost_per_cubic_foot(), 10.15);
        assert_eq!(WallMaterial::Concrete.unit_weight(), 150.0);
        assert_eq!(WallMaterial::ALL.len(), 3);
    }

    #[test]
    fn test_material_from_str() {
        assert_eq!("concrete".parse::<WallMaterial>().unwrap(), WallMaterial::Concrete);
        assert_eq!(" Brick ".parse::<WallMaterial>().unwrap(), WallMaterial::Brick);

        let err = "granite".parse::<WallMaterial>().unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
        assert!(err.to_string().contains("granite"));
    }

    #[test]
    fn test_reference_brick_wall_fails() {
        let result = calculate(&test_wall(), &DesignCriteria::default()).unwrap();
        assert_relative_eq!(result.stability.sliding_fos, 1.284706, max_relative = 1e-5);
        assert_relative_eq!(result.stability.overturning_fos, 0.786555, max_relative = 1e-5);
        assert_relative_eq!(result.weight_per_foot, 1820.0, max_relative = 1e-12);
        assert!(!result.passes());
        assert_eq!(result.governing_condition(), "Overturning");
        assert_eq!(result.formulas.unique_formulas().len(), 5);
    }

    #[test]
    fn test_plastic_wall_passes() {
        let input = WallInput {
            label: "RW-2".to_string(),
            material: WallMaterial::Plastic,
            base: 4.0,
            height: 6.0,
            soil: SoilConditions::default(),
        };
        let result = calculate(&input, &DesignCriteria::default()).unwrap();
        assert!(result.passes());
        assert_eq!(result.governing_condition(), "Sliding");
        assert_relative_eq!(result.cost_per_foot, 52.8, max_relative = 1e-12);
    }

    #[test]
    fn test_dimension_range() {
        let heights = DimensionRange::new(6.0, 12.5, 0.5).values().unwrap();
        assert_eq!(heights.len(), 13);
        assert_eq!(heights[0], 6.0);
        assert_eq!(heights[12], 12.0);

        assert!(DimensionRange::new(1.0, 1.0, 0.5).values().is_err());
        assert!(DimensionRange::new(1.0, 4.0, 0.0).values().is_err());
        assert!(DimensionRange::new(0.0, 4.0, 0.5).values().is_err());
    }

    #[test]
    fn test_dimension_range_too_many_candidates() {
        let err = DimensionRange::new(1.0, 1e12, 1e-9).values().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let search = WallSearch {
            height: DimensionRange::new(6.0, 12.0, 1e-6),
            ..Default::default()
        };
        assert!(search_designs(&search, &DesignCriteria::default()).is_err());

        let at_limit = DimensionRange::new(1.0, 1.0 + MAX_CANDIDATES as f64, 1.0).values().unwrap();
        assert_eq!(at_limit.len(), MAX_CANDIDATES);
    }

    #[test]
    fn test_default_search() {
        let design = search_designs(&WallSearch::default(), &DesignCriteria::default())
            .unwrap()
            .unwrap();

        assert_eq!(design.material, WallMaterial::Plastic);
        assert_eq!(design.base, 4.0);
        assert_eq!(design.height, 6.0);
        assert_relative_eq!(design.cost, 2640.0, max_relative = 1e-12);
        assert_relative_eq!(design.stability.sliding_fos, 1.6576, max_relative = 1e-9);
        assert_relative_eq!(design.stability.overturning_fos, 2.368, max_relative = 1e-9);
    }

    #[test]
    fn test_search_single_material() {
        let search = WallSearch {
            materials: vec![WallMaterial::Concrete],
            ..Default::default()
        };
        let design = search_designs(&search, &DesignCriteria::default()).unwrap().unwrap();
        assert_eq!(design.material, WallMaterial::Concrete);
        assert_eq!((design.base, design.height), (2.5, 6.0));
        assert_relative_eq!(design.cost, 4837.5, max_relative = 1e-12);

        let search = WallSearch {
            materials: vec![WallMaterial::Brick],
            ..Default::default()
        };
        let design = search_designs(&search, &DesignCriteria::default()).unwrap().unwrap();
        assert_eq!((design.base, design.height), (2.5, 6.0));
        assert_relative_eq!(design.cost, 7612.5, max_relative = 1e-12);
    }

    #[test]
    fn test_search_no_passing_design() {
        let criteria = DesignCriteria {
            minimum_factor_of_safety: 10.0,
            ..Default::default()
        };
        assert!(search_designs(&WallSearch::default(), &criteria).unwrap().is_none());

        let search = WallSearch {
            materials: Vec::new(),
            ..Default::default()
        };
        assert!(search_designs(&search, &DesignCriteria::default()).unwrap().is_none());
    }

    #[test]
    fn test_search_invalid_parameters() {
        let search = WallSearch {
            wall_length: 0.0,
            ..Default::default()
        };
        assert!(search_designs(&search, &DesignCriteria::default()).is_err());

        let search = WallSearch {
            soil: SoilConditions {
                friction_angle_deg: 95.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(search_designs(&search, &DesignCriteria::default()).is_err());
    }

    #[test]
    fn test_serialization() {
        let json = r#"{ "label": "RW-3", "material": "Concrete", "base": 3.0, "height": 8.0 }"#;
        let input: WallInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.material, WallMaterial::Concrete);
        assert_eq!(input.soil, SoilConditions::default());

        let search: WallSearch = serde_json::from_str(r#"{ "wall_length": 20.0 }"#).unwrap();
        assert_eq!(search.materials.len(), 3);
        assert_eq!(search.wall_length, 20.0);
    }
}
