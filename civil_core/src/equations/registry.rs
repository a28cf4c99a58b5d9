//! # Formula Registry
//!
//! Central registry of every formula implemented in civil_core. Each formula
//! carries metadata (plain-text formula, variables, reference, assumptions
//! and the function that implements it) so results can be audited.
//!
//! ## Architecture
//!
//! The registry provides:
//! - Type-safe formula identification via the `Formula` enum
//! - Full metadata for the generated FORMULAS.md reference
//! - A `FormulaTracker` that calculations fill in as they evaluate formulas
//!
//! ## Usage
//!
//! ```rust
//! use civil_core::equations::registry::{Formula, FormulaTracker};
//!
//! let mut tracker = FormulaTracker::new();
//! tracker.record(Formula::ManningVelocity, "Storm sewer SD-1");
//!
//! let meta = Formula::ManningVelocity.metadata();
//! println!("Formula: {}", meta.formula_plain);
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// References
// ============================================================================

/// Published source for a formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reference {
    /// Chow, Open-Channel Hydraulics
    Chow { table: &'static str },
    /// Roark's Formulas for Stress and Strain
    Roarks {
        edition: u8,
        table: &'static str,
        case: &'static str,
    },
    /// Das, Principles of Geotechnical Engineering
    Das { chapter: u8 },
    /// Metcalf & Eddy, Wastewater Engineering
    MetcalfEddy { chapter: u8 },
    /// Fundamental mechanics (no specific reference needed)
    Mechanics,
}

impl Reference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            Reference::Chow { table } => format!("Chow, Open-Channel Hydraulics, {}", table),
            Reference::Roarks { edition, table, case } => {
                format!("Roark's {}ed, {}, Case {}", edition, table, case)
            }
            Reference::Das { chapter } => format!("Das, Principles of Geotechnical Engineering, Ch. {}", chapter),
            Reference::MetcalfEddy { chapter } => format!("Metcalf & Eddy, Wastewater Engineering, Ch. {}", chapter),
            Reference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }
}

// ============================================================================
// Formula Categories
// ============================================================================

/// Categories for grouping formulas in the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormulaCategory {
    /// Wetted perimeter and hydraulic radius
    ChannelGeometry,
    /// Manning velocity and discharge
    OpenChannelFlow,
    /// Moment of inertia and extreme fiber distance
    SectionProperties,
    /// Moment, deflection, stress
    BeamResponse,
    /// Earth pressure and wall stability
    WallStability,
    /// Water and wastewater treatment
    Environmental,
    /// Comparisons against design criteria
    DesignChecks,
}

impl FormulaCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            FormulaCategory::ChannelGeometry => "Channel Geometry",
            FormulaCategory::OpenChannelFlow => "Open-Channel Flow",
            FormulaCategory::SectionProperties => "Section Properties",
            FormulaCategory::BeamResponse => "Beam Response",
            FormulaCategory::WallStability => "Wall Stability",
            FormulaCategory::Environmental => "Environmental",
            FormulaCategory::DesignChecks => "Design Checks",
        }
    }

    /// Sort order for the reference document (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            FormulaCategory::ChannelGeometry => 1,
            FormulaCategory::OpenChannelFlow => 2,
            FormulaCategory::SectionProperties => 3,
            FormulaCategory::BeamResponse => 4,
            FormulaCategory::WallStability => 5,
            FormulaCategory::Environmental => 6,
            FormulaCategory::DesignChecks => 7,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in a formula.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "Rh", "n", "Ka")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "in", "ft/ft", "pcf")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Formula Metadata
// ============================================================================

/// Complete metadata for a formula.
#[derive(Debug, Clone)]
pub struct FormulaMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this formula calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Published source
    pub reference: Reference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: FormulaCategory,
    /// Source module where the implementation lives
    pub source_module: &'static str,
    /// Function name implementing the formula
    pub source_function: &'static str,
}

// ============================================================================
// Formula Enum
// ============================================================================

/// All formulas implemented in civil_core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Formula {
    // -------------------------------------------------------------------------
    // Channel Geometry
    // -------------------------------------------------------------------------
    /// θ = 2·acos((r−d)/r), P = θr, Rh = A/P
    PipeGeometry,
    /// P = 2d + b, Rh = db/(b + 2d)
    RectangleChannelGeometry,
    /// P = b + 2d/sin θ
    TrapezoidChannelGeometry,
    /// P = 2d/sin θ, Rh = d·cos θ/2
    TriangleChannelGeometry,

    // -------------------------------------------------------------------------
    // Open-Channel Flow
    // -------------------------------------------------------------------------
    /// v = (c/n)·Rh^(2/3)·S^(1/2)
    ManningVelocity,
    /// Q = v·A
    ManningFlowRate,

    // -------------------------------------------------------------------------
    // Section Properties
    // -------------------------------------------------------------------------
    /// I = bh³/12
    RectangleSection,
    /// I = πd⁴/64
    RodSection,
    /// I = π(Do⁴ − Di⁴)/64
    PipeSection,
    /// I = (bd³ − (b−t)h³)/12
    IBeamSection,

    // -------------------------------------------------------------------------
    // Beam Response
    // -------------------------------------------------------------------------
    /// M = wL²/2
    CantileverUniformMoment,
    /// δ = wL⁴/(8EI)
    CantileverUniformDeflection,
    /// σ = My/I
    BendingStress,

    // -------------------------------------------------------------------------
    // Wall Stability
    // -------------------------------------------------------------------------
    /// Ka = (1 − sin φ)/(1 + sin φ)
    RankineActiveCoefficient,
    /// Pa = ½KaγsH² + qH
    ActiveForce,
    /// SFOS = Wμ/Pa
    SlidingFactorOfSafety,
    /// OFOS = (WB/2)/(PaH/3)
    OverturningFactorOfSafety,

    // -------------------------------------------------------------------------
    // Environmental
    // -------------------------------------------------------------------------
    /// t = (πD²/4)·H/Q
    DetentionTime,

    // -------------------------------------------------------------------------
    // Design Checks
    // -------------------------------------------------------------------------
    /// v_min ≤ v ≤ v_max
    VelocityLimits,
    /// σ / σ_allow ≤ 1.0
    StressUnityRatio,
    /// δ / δ_limit ≤ 1.0
    DeflectionUnityRatio,
    /// SFOS, OFOS ≥ FS_min
    MinimumFactorOfSafety,
}

impl Formula {
    /// Get the full metadata for this formula
    pub fn metadata(&self) -> FormulaMetadata {
        match self {
            // Channel Geometry
            Formula::PipeGeometry => FormulaMetadata {
                name: "Partially Full Pipe Geometry",
                description: "Wetted perimeter and hydraulic radius of a circular pipe at flow depth d",
                formula_plain: "theta = 2*acos((r-d)/r), A = r^2(theta - sin(theta))/2, P = theta*r, Rh = A/P",
                reference: Reference::Chow { table: "Table 2-1" },
                variables: vec![
                    Variable::new("D", "Pipe diameter (r = D/2)", "in or cm"),
                    Variable::new("d", "Flow depth, 0 < d <= D", "in or cm"),
                    Variable::new("theta", "Central angle of the wetted arc", "rad"),
                    Variable::new("Rh", "Hydraulic radius", "in or cm"),
                ],
                assumptions: vec!["Circular cross-section", "Depth defaults to D (flowing full)"],
                category: FormulaCategory::ChannelGeometry,
                source_module: "equations/hydraulics.rs",
                source_function: "pipe_geometry",
            },

            Formula::RectangleChannelGeometry => FormulaMetadata {
                name: "Rectangular Channel Geometry",
                description: "Wetted perimeter and hydraulic radius of a rectangular channel",
                formula_plain: "P = 2d + b, Rh = db/(b + 2d)",
                reference: Reference::Chow { table: "Table 2-1" },
                variables: vec![
                    Variable::new("b", "Channel width", "in or cm"),
                    Variable::new("d", "Flow depth", "in or cm"),
                ],
                assumptions: vec!["Vertical side walls"],
                category: FormulaCategory::ChannelGeometry,
                source_module: "equations/hydraulics.rs",
                source_function: "rectangle_channel_geometry",
            },

            Formula::TrapezoidChannelGeometry => FormulaMetadata {
                name: "Trapezoidal Channel Geometry",
                description: "Wetted perimeter and hydraulic radius of a trapezoidal channel",
                formula_plain: "P = b + 2d/sin(theta), Rh = (b*d*sin(theta) + d^2*cos(theta))/(b*sin(theta) + 2d)",
                reference: Reference::Chow { table: "Table 2-1" },
                variables: vec![
                    Variable::new("b", "Bottom width", "in or cm"),
                    Variable::new("d", "Flow depth", "in or cm"),
                    Variable::new("theta", "Side slope angle from horizontal", "deg"),
                ],
                assumptions: vec!["Symmetric side slopes", "0 < theta < 180 deg"],
                category: FormulaCategory::ChannelGeometry,
                source_module: "equations/hydraulics.rs",
                source_function: "trapezoid_channel_geometry",
            },

            Formula::TriangleChannelGeometry => FormulaMetadata {
                name: "Triangular Channel Geometry",
                description: "Wetted perimeter and hydraulic radius of a V-shaped channel",
                formula_plain: "P = 2d/sin(theta), Rh = d*cos(theta)/2",
                reference: Reference::Chow { table: "Table 2-1" },
                variables: vec![
                    Variable::new("d", "Flow depth", "in or cm"),
                    Variable::new("theta", "Side slope angle from horizontal", "deg"),
                ],
                assumptions: vec!["Symmetric side slopes", "Positive Rh requires theta < 90 deg"],
                category: FormulaCategory::ChannelGeometry,
                source_module: "equations/hydraulics.rs",
                source_function: "triangle_channel_geometry",
            },

            // Open-Channel Flow
            Formula::ManningVelocity => FormulaMetadata {
                name: "Manning Velocity",
                description: "Mean velocity of uniform flow",
                formula_plain: "v = (c/n) * Rh^(2/3) * S^(1/2)",
                reference: Reference::Chow { table: "Eq. 5-6" },
                variables: vec![
                    Variable::new("v", "Mean velocity", "ft/s or m/s"),
                    Variable::new("c", "1.49 (US) or 1.00 (SI)", "-"),
                    Variable::new("n", "Manning roughness coefficient", "-"),
                    Variable::new("Rh", "Hydraulic radius", "ft or m"),
                    Variable::new("S", "Energy slope", "ft/ft or m/m"),
                ],
                assumptions: vec!["Steady uniform flow", "Fully rough turbulent flow"],
                category: FormulaCategory::OpenChannelFlow,
                source_module: "equations/manning.rs",
                source_function: "compute_flow",
            },

            Formula::ManningFlowRate => FormulaMetadata {
                name: "Manning Discharge",
                description: "Discharge from velocity and flow area",
                formula_plain: "Q = v * A, A = Rh * P",
                reference: Reference::Mechanics,
                variables: vec![
                    Variable::new("Q", "Discharge", "cfs or m^3/s"),
                    Variable::new("A", "Flow area", "ft^2 or m^2"),
                    Variable::new("P", "Wetted perimeter", "ft or m"),
                ],
                assumptions: vec!["Continuity"],
                category: FormulaCategory::OpenChannelFlow,
                source_module: "equations/manning.rs",
                source_function: "compute_flow",
            },

            // Section Properties
            Formula::RectangleSection => FormulaMetadata {
                name: "Rectangular Section",
                description: "Moment of inertia and extreme fiber distance of a solid rectangle",
                formula_plain: "I = b*h^3/12, y = h/2",
                reference: Reference::Roarks { edition: 8, table: "Table A.1", case: "1" },
                variables: vec![
                    Variable::new("b", "Width", "in"),
                    Variable::new("h", "Height", "in"),
                    Variable::new("I", "Moment of inertia", "in^4"),
                ],
                assumptions: vec!["Strong-axis bending"],
                category: FormulaCategory::SectionProperties,
                source_module: "equations/section.rs",
                source_function: "rectangle_section",
            },

            Formula::RodSection => FormulaMetadata {
                name: "Solid Rod Section",
                description: "Moment of inertia and extreme fiber distance of a solid circle",
                formula_plain: "I = pi*d^4/64, y = d/2",
                reference: Reference::Roarks { edition: 8, table: "Table A.1", case: "15" },
                variables: vec![Variable::new("d", "Diameter", "in")],
                assumptions: vec![],
                category: FormulaCategory::SectionProperties,
                source_module: "equations/section.rs",
                source_function: "rod_section",
            },

            Formula::PipeSection => FormulaMetadata {
                name: "Hollow Pipe Section",
                description: "Moment of inertia of a hollow circle with y taken as the full outer diameter",
                formula_plain: "I = pi*(Do^4 - Di^4)/64, y = Do",
                reference: Reference::Roarks { edition: 8, table: "Table A.1", case: "16" },
                variables: vec![
                    Variable::new("Do", "Outer diameter", "in"),
                    Variable::new("Di", "Inner diameter", "in"),
                ],
                assumptions: vec!["y = Do (not Do/2)"],
                category: FormulaCategory::SectionProperties,
                source_module: "equations/section.rs",
                source_function: "pipe_section",
            },

            Formula::IBeamSection => FormulaMetadata {
                name: "I-Beam Section",
                description: "Moment of inertia of a symmetric I-section by subtracting the web voids",
                formula_plain: "I = (b*d^3 - (b - t)*h^3)/12, y = d/2",
                reference: Reference::Mechanics,
                variables: vec![
                    Variable::new("b", "Flange width", "in"),
                    Variable::new("d", "Overall depth", "in"),
                    Variable::new("h", "Clear web height", "in"),
                    Variable::new("t", "Web thickness", "in"),
                ],
                assumptions: vec!["Symmetric flanges", "t < b, h < d"],
                category: FormulaCategory::SectionProperties,
                source_module: "equations/section.rs",
                source_function: "i_beam_section",
            },

            // Beam Response
            Formula::CantileverUniformMoment => FormulaMetadata {
                name: "Cantilever Fixed-End Moment",
                description: "Maximum moment at the support of a uniformly loaded cantilever",
                formula_plain: "M = w*L^2/2",
                reference: Reference::Roarks { edition: 8, table: "Table 8.1", case: "2a" },
                variables: vec![
                    Variable::new("w", "Uniform load", "lb/in"),
                    Variable::new("L", "Length", "in"),
                ],
                assumptions: vec!["Fixed-free support"],
                category: FormulaCategory::BeamResponse,
                source_module: "equations/beam.rs",
                source_function: "cantilever_uniform_moment",
            },

            Formula::CantileverUniformDeflection => FormulaMetadata {
                name: "Cantilever Tip Deflection",
                description: "Free-end deflection of a uniformly loaded cantilever",
                formula_plain: "delta = w*L^4/(8*E*I)",
                reference: Reference::Roarks { edition: 8, table: "Table 8.1", case: "2a" },
                variables: vec![
                    Variable::new("delta", "Tip deflection", "in"),
                    Variable::new("E", "Modulus of elasticity", "psi"),
                    Variable::new("I", "Moment of inertia", "in^4"),
                ],
                assumptions: vec!["Linear elastic material", "Small deflections"],
                category: FormulaCategory::BeamResponse,
                source_module: "equations/beam.rs",
                source_function: "cantilever_uniform_max_deflection",
            },

            Formula::BendingStress => FormulaMetadata {
                name: "Bending Stress",
                description: "Flexure formula at the extreme fiber",
                formula_plain: "sigma = M*y/I",
                reference: Reference::Mechanics,
                variables: vec![
                    Variable::new("sigma", "Bending stress", "psi"),
                    Variable::new("M", "Bending moment", "in-lb"),
                    Variable::new("y", "Extreme fiber distance", "in"),
                ],
                assumptions: vec!["Plane sections remain plane"],
                category: FormulaCategory::BeamResponse,
                source_module: "equations/beam.rs",
                source_function: "bending_stress",
            },

            // Wall Stability
            Formula::RankineActiveCoefficient => FormulaMetadata {
                name: "Rankine Active Coefficient",
                description: "Lateral earth pressure coefficient for a smooth vertical wall",
                formula_plain: "Ka = (1 - sin(phi))/(1 + sin(phi))",
                reference: Reference::Das { chapter: 13 },
                variables: vec![Variable::new("phi", "Soil friction angle", "rad")],
                assumptions: vec!["Level cohesionless backfill", "Smooth vertical back face"],
                category: FormulaCategory::WallStability,
                source_module: "equations/geotech.rs",
                source_function: "rankine_active_coefficient",
            },

            Formula::ActiveForce => FormulaMetadata {
                name: "Active Thrust",
                description: "Resultant active force from soil and uniform surcharge",
                formula_plain: "Pa = 0.5*Ka*gamma_s*H^2 + q*H",
                reference: Reference::Das { chapter: 13 },
                variables: vec![
                    Variable::new("gamma_s", "Soil unit weight", "pcf"),
                    Variable::new("H", "Wall height", "ft"),
                    Variable::new("q", "Surcharge", "psf"),
                ],
                assumptions: vec!["Resultant applied at H/3"],
                category: FormulaCategory::WallStability,
                source_module: "equations/geotech.rs",
                source_function: "active_force",
            },

            Formula::SlidingFactorOfSafety => FormulaMetadata {
                name: "Sliding Factor of Safety",
                description: "Base friction resistance over active thrust",
                formula_plain: "SFOS = (B*H*gamma_w*mu)/Pa",
                reference: Reference::Das { chapter: 13 },
                variables: vec![
                    Variable::new("B", "Base width", "ft"),
                    Variable::new("gamma_w", "Wall unit weight", "pcf"),
                    Variable::new("mu", "Base friction coefficient", "-"),
                ],
                assumptions: vec!["Passive resistance at the toe ignored"],
                category: FormulaCategory::WallStability,
                source_module: "equations/geotech.rs",
                source_function: "wall_stability",
            },

            Formula::OverturningFactorOfSafety => FormulaMetadata {
                name: "Overturning Factor of Safety",
                description: "Resisting moment of wall weight over overturning moment about the toe",
                formula_plain: "OFOS = (W*B/2)/(Pa*H/3)",
                reference: Reference::Das { chapter: 13 },
                variables: vec![
                    Variable::new("W", "Wall weight per unit length", "lb/ft"),
                    Variable::new("Pa", "Active thrust", "lb/ft"),
                ],
                assumptions: vec!["Rectangular wall", "Moments taken about the toe"],
                category: FormulaCategory::WallStability,
                source_module: "equations/geotech.rs",
                source_function: "wall_stability",
            },

            // Environmental
            Formula::DetentionTime => FormulaMetadata {
                name: "Clarifier Detention Time",
                description: "Hydraulic detention time of a circular tank",
                formula_plain: "t = (pi*D^2/4)*H/Q",
                reference: Reference::MetcalfEddy { chapter: 5 },
                variables: vec![
                    Variable::new("Q", "Influent flow", "ft^3/hr"),
                    Variable::new("H", "Side water depth", "ft"),
                    Variable::new("D", "Tank diameter", "ft"),
                ],
                assumptions: vec!["Plug flow through the full tank volume"],
                category: FormulaCategory::Environmental,
                source_module: "equations/environmental.rs",
                source_function: "detention_time",
            },

            // Design Checks
            Formula::VelocityLimits => FormulaMetadata {
                name: "Velocity Window",
                description: "Self-cleansing minimum and scour maximum velocity",
                formula_plain: "v_min <= v <= v_max",
                reference: Reference::Mechanics,
                variables: vec![
                    Variable::new("v_min", "Minimum velocity (default 2.5)", "ft/s"),
                    Variable::new("v_max", "Maximum velocity (default 6.0)", "ft/s"),
                ],
                assumptions: vec!["Limits given in ft/s, converted to m/s for SI calculations"],
                category: FormulaCategory::DesignChecks,
                source_module: "criteria.rs",
                source_function: "VelocityLimits::classify",
            },

            Formula::StressUnityRatio => FormulaMetadata {
                name: "Stress Unity Ratio",
                description: "Bending stress over allowable stress",
                formula_plain: "sigma / sigma_allow <= 1.0",
                reference: Reference::Mechanics,
                variables: vec![Variable::new("sigma_allow", "Allowable stress (default 20000)", "psi")],
                assumptions: vec![],
                category: FormulaCategory::DesignChecks,
                source_module: "calculations/cantilever.rs",
                source_function: "calculate",
            },

            Formula::DeflectionUnityRatio => FormulaMetadata {
                name: "Deflection Unity Ratio",
                description: "Tip deflection over deflection limit",
                formula_plain: "delta / delta_limit <= 1.0",
                reference: Reference::Mechanics,
                variables: vec![Variable::new("delta_limit", "Deflection limit (default 0.5)", "in")],
                assumptions: vec![],
                category: FormulaCategory::DesignChecks,
                source_module: "calculations/cantilever.rs",
                source_function: "calculate",
            },

            Formula::MinimumFactorOfSafety => FormulaMetadata {
                name: "Minimum Factor of Safety",
                description: "Both wall factors of safety must meet the minimum",
                formula_plain: "SFOS >= FS_min and OFOS >= FS_min",
                reference: Reference::Das { chapter: 13 },
                variables: vec![Variable::new("FS_min", "Minimum factor of safety (default 1.5)", "-")],
                assumptions: vec![],
                category: FormulaCategory::DesignChecks,
                source_module: "equations/geotech.rs",
                source_function: "WallStability::passes",
            },
        }
    }

    /// Get all formulas in a given category
    pub fn in_category(category: FormulaCategory) -> Vec<Formula> {
        ALL_FORMULAS
            .iter()
            .filter(|f| f.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories, in document order
    pub fn all_categories() -> Vec<FormulaCategory> {
        use FormulaCategory::*;
        let mut cats = vec![
            ChannelGeometry,
            OpenChannelFlow,
            SectionProperties,
            BeamResponse,
            WallStability,
            Environmental,
            DesignChecks,
        ];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All formulas in the registry (for iteration)
pub static ALL_FORMULAS: &[Formula] = &[
    // Channel geometry
    Formula::PipeGeometry,
    Formula::RectangleChannelGeometry,
    Formula::TrapezoidChannelGeometry,
    Formula::TriangleChannelGeometry,
    // Flow
    Formula::ManningVelocity,
    Formula::ManningFlowRate,
    // Sections
    Formula::RectangleSection,
    Formula::RodSection,
    Formula::PipeSection,
    Formula::IBeamSection,
    // Beam response
    Formula::CantileverUniformMoment,
    Formula::CantileverUniformDeflection,
    Formula::BendingStress,
    // Walls
    Formula::RankineActiveCoefficient,
    Formula::ActiveForce,
    Formula::SlidingFactorOfSafety,
    Formula::OverturningFactorOfSafety,
    // Environmental
    Formula::DetentionTime,
    // Checks
    Formula::VelocityLimits,
    Formula::StressUnityRatio,
    Formula::DeflectionUnityRatio,
    Formula::MinimumFactorOfSafety,
];

// ============================================================================
// Formula Usage Tracking
// ============================================================================

/// Record of a formula being used in a calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormulaUsage {
    /// The formula that was used
    pub formula: Formula,
    /// Context describing where it was used (usually the calculation label)
    pub context: String,
}

/// Collector for formula usage during a calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormulaTracker {
    usages: Vec<FormulaUsage>,
}

impl FormulaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a formula was used
    pub fn record(&mut self, formula: Formula, context: impl Into<String>) {
        self.usages.push(FormulaUsage {
            formula,
            context: context.into(),
        });
    }

    /// Get all recorded usages
    pub fn usages(&self) -> &[FormulaUsage] {
        &self.usages
    }

    /// Unique formulas in first-use order
    pub fn unique_formulas(&self) -> Vec<Formula> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.formula))
            .map(|u| u.formula)
            .collect()
    }

    /// Group unique formulas by category, in document order
    pub fn by_category(&self) -> Vec<(FormulaCategory, Vec<Formula>)> {
        let mut by_cat: HashMap<FormulaCategory, Vec<Formula>> = HashMap::new();
        for formula in self.unique_formulas() {
            by_cat.entry(formula.metadata().category).or_default().push(formula);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }

    /// Merge another tracker into this one
    pub fn merge(&mut self, other: FormulaTracker) {
        self.usages.extend(other.usages);
    }

    /// Markdown list of the formulas used, grouped by category
    pub fn to_markdown(&self) -> String {
        let mut output = String::from("## Formulas Used\n\n");
        let grouped = self.by_category();
        if grouped.is_empty() {
            output.push_str("_No formulas recorded._\n");
            return output;
        }

        for (category, formulas) in grouped {
            output.push_str(&format!("### {}\n\n", category.display_name()));
            for formula in formulas {
                let meta = formula.metadata();
                output.push_str(&format!("- **{}**: `{}` ({})\n", meta.name, meta.formula_plain, meta.reference.citation()));
            }
            output.push('\n');
        }
        output
    }
}

// ============================================================================
// Markdown Reference Generation
// ============================================================================

/// Generate the complete FORMULAS.md reference.
///
/// Regenerate the checked-in file with `cargo run --bin gen-formulas`.
///
/// ```rust
/// use civil_core::equations::registry::generate_formulas_markdown;
///
/// let markdown = generate_formulas_markdown();
/// assert!(markdown.contains("Civil Formulas Reference"));
/// assert!(markdown.contains("Open-Channel Flow"));
/// ```
pub fn generate_formulas_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(
        r#"# Civil Formulas Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-formulas`

Every closed-form formula evaluated by civil_core, with its variables,
reference, source location and assumptions.

## Unit Conventions

| Quantity | US | SI |
|----------|----|----|
| Channel geometry input | in | cm |
| Manning evaluation | ft | m |
| Velocity | ft/s | m/s |
| Discharge | cfs | m^3/s |

---

"#,
    );

    let categories = Formula::all_categories();

    for category in &categories {
        let formulas = Formula::in_category(*category);
        if formulas.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for formula in formulas {
            let meta = formula.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Formulas:** {}\n- **Categories:** {}\n",
        ALL_FORMULAS.len(),
        categories.len()
    ));

    output
}

// ============================================================================
// Tests
// ============================================================================
