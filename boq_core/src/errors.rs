//! # Error Types
//!
//! Structured error types for boq_core. Errors carry enough context to be
//! handled programmatically by the wizard shell or any other consumer.
//!
//! ## Example
//!
//! ```rust
//! use boq_core::errors::{EstimateError, EstimateResult};
//!
//! fn validate_length(length_ft: f64) -> EstimateResult<()> {
//!     if length_ft <= 0.0 {
//!         return Err(EstimateError::InvalidInput {
//!             field: "length_ft".to_string(),
//!             value: length_ft.to_string(),
//!             reason: "Length must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for boq_core operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Structured error type for estimation operations.
///
/// Each variant provides specific context about what went wrong. Note that
/// an absent-but-optional input is never an error in this crate: quantity
/// computations return an empty takeoff when the assembly or dimensions are
/// not yet entered. These variants cover present-but-invalid input and the
/// ambient file layer.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// An input value is invalid (out of range, wrong sign, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Material type not found in the catalog
    #[error("Material not found in catalog: {material_type}")]
    MaterialNotFound { material_type: String },

    /// No available shop offer for a material type
    #[error("No available offer for '{material_type}'")]
    NoAvailableOffer { material_type: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl EstimateError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        EstimateError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_type: impl Into<String>) -> Self {
        EstimateError::MaterialNotFound {
            material_type: material_type.into(),
        }
    }

    /// Create a NoAvailableOffer error
    pub fn no_available_offer(material_type: impl Into<String>) -> Self {
        EstimateError::NoAvailableOffer {
            material_type: material_type.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EstimateError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        EstimateError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EstimateError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::InvalidInput { .. } => "INVALID_INPUT",
            EstimateError::MissingField { .. } => "MISSING_FIELD",
            EstimateError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            EstimateError::NoAvailableOffer { .. } => "NO_AVAILABLE_OFFER",
            EstimateError::FileError { .. } => "FILE_ERROR",
            EstimateError::FileLocked { .. } => "FILE_LOCKED",
            EstimateError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EstimateError::VersionMismatch { .. } => "VERSION_MISMATCH",
            EstimateError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = EstimateError::invalid_input("length_ft", "-5.0", "Length must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: EstimateError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            EstimateError::missing_field("wall_type").error_code(),
            "MISSING_FIELD"
        );
        assert_eq!(
            EstimateError::material_not_found("River Sand").error_code(),
            "MATERIAL_NOT_FOUND"
        );
    }

    #[test]
    fn test_recoverable() {
        let locked = EstimateError::file_locked("a.boq", "someone", "now");
        assert!(locked.is_recoverable());
        assert!(!EstimateError::missing_field("x").is_recoverable());
    }
}
