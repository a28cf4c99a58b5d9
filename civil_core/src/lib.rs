//! # civil_core - Civil Engineering Formula Library
//!
//! `civil_core` evaluates closed-form civil engineering formulas: Manning
//! flow in pipes and open channels, cantilever deflection and stress,
//! gravity retaining wall stability, and clarifier detention time. All
//! inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Auditable**: Every formula is registered with its reference and
//!   every calculation reports the formulas it applied
//!
//! ## Quick Start
//!
//! ```rust
//! use civil_core::equations::{compute_flow, pipe_geometry};
//! use civil_core::units::UnitSystem;
//!
//! // 36" pipe flowing 8" deep
//! let geometry = pipe_geometry(36.0, Some(8.0)).unwrap();
//! let flow = compute_flow(
//!     geometry.wetted_perimeter,
//!     geometry.hydraulic_radius,
//!     0.005,
//!     0.025,
//!     UnitSystem::Us,
//! ).unwrap();
//!
//! println!("v = {:.2} ft/s, Q = {:.2} cfs", flow.velocity, flow.flow_rate);
//! ```
//!
//! ## Modules
//!
//! - [`equations`] - Pure formulas and the formula registry
//! - [`calculations`] - Design checks built on the formulas
//! - [`criteria`] - Acceptance limits (velocity window, factors of safety)
//! - [`units`] - Type-safe unit wrappers and the unit system
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod criteria;
pub mod equations;
pub mod errors;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use criteria::{DesignCriteria, VelocityClass, VelocityLimits};
pub use errors::{CalcError, CalcResult};
pub use units::UnitSystem;
