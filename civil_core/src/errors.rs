//! # Error Types
//!
//! Structured error types for civil_core. Every formula validates its inputs
//! and reports the offending field instead of returning NaN.
//!
//! ## Example
//!
//! ```rust
//! use civil_core::errors::{CalcError, CalcResult};
//!
//! fn validate_depth(depth: f64) -> CalcResult<()> {
//!     if depth <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "depth".to_string(),
//!             value: depth.to_string(),
//!             reason: "Depth must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for civil_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A caller-supplied value is outside the formula's domain
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// An intermediate value left the valid domain of a formula
    #[error("Domain error in {formula}: {reason}")]
    DomainError { formula: String, reason: String },

    /// Unit system string is neither US nor SI
    #[error("Unrecognized unit system: '{unit_system}' (expected US or SI)")]
    UnsupportedUnitSystem { unit_system: String },

    /// Wall material not found in the catalog
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DomainError
    pub fn domain_error(formula: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DomainError {
            formula: formula.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedUnitSystem error
    pub fn unsupported_unit_system(unit_system: impl Into<String>) -> Self {
        CalcError::UnsupportedUnitSystem {
            unit_system: unit_system.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::DomainError { .. } => "DOMAIN_ERROR",
            CalcError::UnsupportedUnitSystem { .. } => "UNSUPPORTED_UNIT_SYSTEM",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

// ============================================================================
// Input Guards
// ============================================================================

/// Require a finite value strictly greater than zero.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Must be a positive number"))
    }
}

/// Require a finite value greater than or equal to zero.
pub(crate) fn require_non_negative(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Must be zero or greater"))
    }
}

/// Require a finite value inside the open interval (min, max).
pub(crate) fn require_open_range(field: &str, value: f64, min: f64, max: f64) -> CalcResult<f64> {
    if value.is_finite() && value > min && value < max {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Must be strictly between {} and {}", min, max),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("depth", "-5", "Must be a positive number");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::domain_error("pipe_geometry", "acos").error_code(), "DOMAIN_ERROR");
        assert_eq!(CalcError::unsupported_unit_system("metric").error_code(), "UNSUPPORTED_UNIT_SYSTEM");
        assert_eq!(CalcError::material_not_found("steel").error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_error_display() {
        let error = CalcError::unsupported_unit_system("imperial");
        assert_eq!(error.to_string(), "Unrecognized unit system: 'imperial' (expected US or SI)");
    }

    #[test]
    fn test_guards() {
        assert_eq!(require_positive("x", 2.0), Ok(2.0));
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_positive("x", f64::NAN).is_err());
        assert_eq!(require_non_negative("x", 0.0), Ok(0.0));
        assert!(require_non_negative("x", -0.1).is_err());
        assert!(require_non_negative("x", f64::INFINITY).is_err());
        assert!(require_open_range("angle", 90.0, 0.0, 180.0).is_ok());
        assert!(require_open_range("angle", 180.0, 0.0, 180.0).is_err());
        assert!(require_open_range("angle", 0.0, 0.0, 180.0).is_err());
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<f64>("not json").unwrap_err();
        let calc: CalcError = err.into();
        assert_eq!(calc.error_code(), "SERIALIZATION_ERROR");
    }
}
