//! # Channel Flow Calculation
//!
//! Uniform flow in a pipe or open channel, checked against the velocity
//! window in [`DesignCriteria`].
//!
//! ## Assumptions
//!
//! - Steady uniform flow (Manning)
//! - Cross-section dimensions in inches (US) or centimeters (SI)
//! - Velocity limits are in ft/s and converted to m/s for SI inputs
//!
//! ## Example
//!
//! ```rust
//! use civil_core::calculations::channel::{calculate, ChannelInput, ChannelShape};
//! use civil_core::criteria::{DesignCriteria, VelocityClass};
//! use civil_core::units::UnitSystem;
//!
//! let input = ChannelInput {
//!     label: "SD-1".to_string(),
//!     shape: ChannelShape::Pipe { diameter: 36.0, depth: Some(8.0) },
//!     slope: 0.005,
//!     roughness_n: 0.015,
//!     unit_system: UnitSystem::Us,
//! };
//!
//! let result = calculate(&input, &DesignCriteria::default()).unwrap();
//! assert_eq!(result.velocity_class, VelocityClass::Acceptable);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::criteria::{DesignCriteria, VelocityClass};
use crate::equations::hydraulics::{
    pipe_geometry,
    rectangle_channel_geometry,
    trapezoid_channel_geometry,
    triangle_channel_geometry,
    ChannelGeometry,
};
use crate::equations::manning::{compute_flow, FlowResult};
use crate::equations::registry::{Formula, FormulaTracker};
use crate::errors::{CalcError, CalcResult};
use crate::units::UnitSystem;

/// Cross-section of the conveyance.
///
/// Lengths are in inches (US) or centimeters (SI); angles in degrees from
/// horizontal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChannelShape {
    /// Circular pipe. A missing depth means flowing full.
    Pipe { diameter: f64, depth: Option<f64> },
    /// Rectangular channel
    Rectangle { width: f64, depth: f64 },
    /// Trapezoidal channel with symmetric side slopes
    Trapezoid {
        base: f64,
        side_slope_deg: f64,
        depth: f64,
    },
    /// V-shaped channel with symmetric side slopes
    Triangle { side_slope_deg: f64, depth: f64 },
}

impl ChannelShape {
    /// Display name for the shape
    pub fn display_name(&self) -> &'static str {
        match self {
            ChannelShape::Pipe { .. } => "Circular Pipe",
            ChannelShape::Rectangle { .. } => "Rectangular Channel",
            ChannelShape::Trapezoid { .. } => "Trapezoidal Channel",
            ChannelShape::Triangle { .. } => "Triangular Channel",
        }
    }

    /// Wetted perimeter and hydraulic radius, plus the formula that produced them
    pub fn geometry(&self) -> CalcResult<(ChannelGeometry, Formula)> {
        match *self {
            ChannelShape::Pipe { diameter, depth } => Ok((pipe_geometry(diameter, depth)?, Formula::PipeGeometry)),
            ChannelShape::Rectangle { width, depth } => Ok((
                rectangle_channel_geometry(width, depth)?,
                Formula::RectangleChannelGeometry,
            )),
            ChannelShape::Trapezoid {
                base,
                side_slope_deg,
                depth,
            } => Ok((
                trapezoid_channel_geometry(base, side_slope_deg, depth)?,
                Formula::TrapezoidChannelGeometry,
            )),
            ChannelShape::Triangle { side_slope_deg, depth } => Ok((
                triangle_channel_geometry(side_slope_deg, depth)?,
                Formula::TriangleChannelGeometry,
            )),
        }
    }
}

/// Input parameters for a channel flow calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "SD-1",
///   "shape": { "type": "Pipe", "diameter": 36.0, "depth": 8.0 },
///   "slope": 0.005,
///   "roughness_n": 0.025,
///   "unit_system": "US"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelInput {
    /// User label (e.g., "SD-1", "Swale A")
    pub label: String,

    /// Cross-section
    pub shape: ChannelShape,

    /// Energy slope (ft/ft or m/m)
    pub slope: f64,

    /// Manning's roughness coefficient
    pub roughness_n: f64,

    /// Unit system for dimensions and results
    #[serde(default)]
    pub unit_system: UnitSystem,
}

impl ChannelInput {
    /// Validate the flow parameters. Shape dimensions are checked by the
    /// geometry formulas.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.slope.is_finite() && self.slope >= 0.0) {
            return Err(CalcError::invalid_input(
                "slope",
                self.slope.to_string(),
                "Slope cannot be negative",
            ));
        }
        if !(self.roughness_n.is_finite() && self.roughness_n > 0.0) {
            return Err(CalcError::invalid_input(
                "roughness_n",
                self.roughness_n.to_string(),
                "Manning's n must be positive",
            ));
        }
        Ok(())
    }
}

/// Results from a channel flow calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "geometry": { "wetted_perimeter": 35.34, "hydraulic_radius": 4.77 },
///   "flow": { "velocity": 2.28, "flow_rate": 2.66 },
///   "velocity_class": "TooSlow",
///   "unit_system": "US",
///   "formulas": {
///     "usages": [
///       { "formula": "PipeGeometry", "context": "SD-1" },
///       { "formula": "ManningVelocity", "context": "SD-1" },
///       { "formula": "ManningFlowRate", "context": "SD-1" },
///       { "formula": "VelocityLimits", "context": "SD-1" }
///     ]
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelResult {
    /// Wetted perimeter and hydraulic radius (input length unit)
    pub geometry: ChannelGeometry,

    /// Velocity and discharge
    pub flow: FlowResult,

    /// Velocity compared to the criteria
    pub velocity_class: VelocityClass,

    /// Unit system of the results
    pub unit_system: UnitSystem,

    /// Formulas applied, in order
    pub formulas: FormulaTracker,
}

impl ChannelResult {
    /// Check if the velocity is within limits
    pub fn passes(&self) -> bool {
        self.velocity_class.is_acceptable()
    }

    /// One-line summary with units
    pub fn summary(&self) -> String {
        format!(
            "v = {:.2} {}, Q = {:.3} {} ({})",
            self.flow.velocity,
            self.unit_system.velocity_label(),
            self.flow.flow_rate,
            self.unit_system.flow_label(),
            self.velocity_class.description()
        )
    }
}

/// Calculate uniform flow and classify the velocity.
///
/// # Arguments
///
/// * `input` - Channel parameters
/// * `criteria` - Velocity limits (ft/s, converted for SI inputs)
///
/// # Returns
///
/// * `Ok(ChannelResult)` - Calculation results
/// * `Err(CalcError)` - If inputs are invalid or the geometry is degenerate
pub fn calculate(input: &ChannelInput, criteria: &DesignCriteria) -> CalcResult<ChannelResult> {
    debug!(label = %input.label, shape = input.shape.display_name(), "calculating channel flow");
    input.validate()?;

    let mut formulas = FormulaTracker::new();

    let (geometry, geometry_formula) = input.shape.geometry()?;
    formulas.record(geometry_formula, &input.label);

    let flow = compute_flow(
        geometry.wetted_perimeter,
        geometry.hydraulic_radius,
        input.slope,
        input.roughness_n,
        input.unit_system,
    )?;
    formulas.record(Formula::ManningVelocity, &input.label);
    formulas.record(Formula::ManningFlowRate, &input.label);

    let limits = criteria.velocity_limits_for(input.unit_system);
    let velocity_class = limits.classify(flow.velocity);
    formulas.record(Formula::VelocityLimits, &input.label);

    if !velocity_class.is_acceptable() {
        warn!(
            label = %input.label,
            velocity = flow.velocity,
            minimum = limits.minimum,
            maximum = limits.maximum,
            units = input.unit_system.velocity_label(),
            "velocity {}",
            velocity_class.description()
        );
    }

    debug!(
        label = %input.label,
        velocity = flow.velocity,
        flow_rate = flow.flow_rate,
        "channel flow complete"
    );

    Ok(ChannelResult {
        geometry,
        flow,
        velocity_class,
        unit_system: input.unit_system,
        formulas,
    })
}
