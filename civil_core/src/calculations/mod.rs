//! # Design Calculations
//!
//! Each calculation evaluates formulas from [`crate::equations`] and compares
//! the results against [`DesignCriteria`]. Every module follows the
//! pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results, including the formulas applied
//! - `calculate(input, criteria) -> CalcResult<*Result>`
//!
//! ## Available Calculations
//!
//! - [`channel`] - Pipe and open-channel flow with velocity limits
//! - [`cantilever`] - Cantilever stress and deflection checks
//! - [`retaining_wall`] - Gravity wall stability and cheapest-design search
//! - [`clarifier`] - Clarifier detention time

pub mod cantilever;
pub mod channel;
pub mod clarifier;
pub mod retaining_wall;

use serde::{Deserialize, Serialize};

use crate::criteria::DesignCriteria;
use crate::equations::registry::FormulaTracker;
use crate::errors::CalcResult;

// Re-export commonly used types
pub use cantilever::{BeamSection, CantileverInput, CantileverResult};
pub use channel::{ChannelInput, ChannelResult, ChannelShape};
pub use clarifier::{ClarifierInput, ClarifierResult};
pub use retaining_wall::{
    search_designs,
    DimensionRange,
    SoilConditions,
    WallDesign,
    WallInput,
    WallMaterial,
    WallResult,
    WallSearch,
};

/// Enum wrapper for all calculation types.
///
/// Allows heterogeneous calculations in a single collection with clean
/// tagged serialization.
///
/// ```rust
/// use civil_core::calculations::CalculationItem;
///
/// let json = r#"{
///     "type": "Clarifier",
///     "label": "PC-1",
///     "influent_flow_rate": 3000.0,
///     "tank_height": 10.0,
///     "tank_diameter": 40.0
/// }"#;
/// let item: CalculationItem = serde_json::from_str(json).unwrap();
/// assert_eq!(item.label(), "PC-1");
/// assert_eq!(item.calc_type(), "Clarifier");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Pipe or open-channel flow
    Channel(ChannelInput),
    /// Uniformly loaded cantilever
    Cantilever(CantileverInput),
    /// Gravity retaining wall check
    RetainingWall(WallInput),
    /// Clarifier detention time
    Clarifier(ClarifierInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Channel(c) => &c.label,
            CalculationItem::Cantilever(c) => &c.label,
            CalculationItem::RetainingWall(w) => &w.label,
            CalculationItem::Clarifier(c) => &c.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Channel(_) => "Channel",
            CalculationItem::Cantilever(_) => "Cantilever",
            CalculationItem::RetainingWall(_) => "RetainingWall",
            CalculationItem::Clarifier(_) => "Clarifier",
        }
    }

    /// Run the calculation against the given criteria
    pub fn calculate(&self, criteria: &DesignCriteria) -> CalcResult<CalculationOutcome> {
        Ok(match self {
            CalculationItem::Channel(input) => CalculationOutcome::Channel(channel::calculate(input, criteria)?),
            CalculationItem::Cantilever(input) => {
                CalculationOutcome::Cantilever(cantilever::calculate(input, criteria)?)
            }
            CalculationItem::RetainingWall(input) => {
                CalculationOutcome::RetainingWall(retaining_wall::calculate(input, criteria)?)
            }
            CalculationItem::Clarifier(input) => CalculationOutcome::Clarifier(clarifier::calculate(input)?),
        })
    }
}

/// Result of running a [`CalculationItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutcome {
    Channel(ChannelResult),
    Cantilever(CantileverResult),
    RetainingWall(WallResult),
    Clarifier(ClarifierResult),
}

impl CalculationOutcome {
    /// Whether the result meets the criteria. Clarifiers carry no
    /// acceptance check and always pass.
    pub fn passes(&self) -> bool {
        match self {
            CalculationOutcome::Channel(r) => r.passes(),
            CalculationOutcome::Cantilever(r) => r.passes(),
            CalculationOutcome::RetainingWall(r) => r.passes(),
            CalculationOutcome::Clarifier(_) => true,
        }
    }

    /// Formulas applied by the calculation
    pub fn formulas(&self) -> &FormulaTracker {
        match self {
            CalculationOutcome::Channel(r) => &r.formulas,
            CalculationOutcome::Cantilever(r) => &r.formulas,
            CalculationOutcome::RetainingWall(r) => &r.formulas,
            CalculationOutcome::Clarifier(r) => &r.formulas,
        }
    }
}
