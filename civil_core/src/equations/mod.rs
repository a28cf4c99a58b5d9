//! # Engineering Formulas
//!
//! Every closed-form formula used by civil_core lives here, grouped by
//! discipline. Functions are pure: they validate their inputs, evaluate, and
//! return a small `Copy` result. Composition happens by passing one
//! function's output into the next.
//!
//! ## Modules
//!
//! - [`hydraulics`] - Pipe and open-channel geometry (P, Rh)
//! - [`manning`] - Manning velocity and discharge
//! - [`section`] - Cross-section properties (I, y)
//! - [`beam`] - Cantilever deflection and stress
//! - [`geotech`] - Gravity retaining wall factors of safety
//! - [`environmental`] - Clarifier detention time
//! - [`registry`] - Formula metadata and usage tracking
//!
//! ## Example
//!
//! ```rust
//! use civil_core::equations::{compute_flow, trapezoid_channel_geometry};
//! use civil_core::units::UnitSystem;
//!
//! let geometry = trapezoid_channel_geometry(48.0, 45.0, 18.0).unwrap();
//! let flow = compute_flow(
//!     geometry.wetted_perimeter,
//!     geometry.hydraulic_radius,
//!     0.002,
//!     0.030,
//!     UnitSystem::Us,
//! ).unwrap();
//! assert!(flow.velocity > 0.0);
//! ```

pub mod beam;
pub mod environmental;
pub mod geotech;
pub mod hydraulics;
pub mod manning;
pub mod registry;
pub mod section;

// Re-export commonly used items
pub use hydraulics::{
    pipe_geometry,
    rectangle_channel_geometry,
    trapezoid_channel_geometry,
    triangle_channel_geometry,
    ChannelGeometry,
};

pub use manning::{compute_flow, pipe_flow, FlowResult};

pub use section::{
    i_beam_section,
    pipe_section,
    rectangle_section,
    rod_section,
    SectionProperties,
};

pub use beam::{cantilever_response, BeamResponse};

pub use geotech::{wall_stability, WallStability};

pub use environmental::detention_time;

pub use registry::{
    generate_formulas_markdown,
    Formula,
    FormulaCategory,
    FormulaMetadata,
    FormulaTracker,
    FormulaUsage,
    Reference,
    Variable,
    ALL_FORMULAS,
};
