//! # Clarifier Calculation
//!
//! Detention time of a circular primary clarifier.
//!
//! ```rust
//! use civil_core::calculations::clarifier::{calculate, ClarifierInput};
//!
//! let input = ClarifierInput {
//!     label: "PC-1".to_string(),
//!     influent_flow_rate: 3000.0,
//!     tank_height: 10.0,
//!     tank_diameter: 40.0,
//! };
//! let result = calculate(&input).unwrap();
//! assert!((result.detention_time_hr - 4.19).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::environmental::{circular_tank_area, detention_time};
use crate::equations::registry::{Formula, FormulaTracker};
use crate::errors::CalcResult;

/// Input parameters for a clarifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClarifierInput {
    /// User label
    pub label: String,

    /// Influent flow Q (ft³/hr)
    pub influent_flow_rate: f64,

    /// Side water depth H (ft)
    pub tank_height: f64,

    /// Tank diameter D (ft)
    pub tank_diameter: f64,
}

/// Results from a clarifier calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClarifierResult {
    /// Detention time (hr)
    pub detention_time_hr: f64,

    /// Plan area (ft²)
    pub surface_area: f64,

    /// Tank volume (ft³)
    pub volume: f64,

    /// Formulas applied
    pub formulas: FormulaTracker,
}

/// Calculate clarifier detention time.
pub fn calculate(input: &ClarifierInput) -> CalcResult<ClarifierResult> {
    debug!(label = %input.label, "calculating clarifier");

    let detention_time_hr = detention_time(input.influent_flow_rate, input.tank_height, input.tank_diameter)?;
    let surface_area = circular_tank_area(input.tank_diameter);

    let mut formulas = FormulaTracker::new();
    formulas.record(Formula::DetentionTime, &input.label);

    debug!(label = %input.label, detention_time_hr, "clarifier complete");

    Ok(ClarifierResult {
        detention_time_hr,
        surface_area,
        volume: surface_area * input.tank_height,
        formulas,
    })
}
