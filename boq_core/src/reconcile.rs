//! # Selection Reconciler
//!
//! Compares declared material requirements against the user's active
//! selections and classifies each requirement as missing, insufficient,
//! ok or extra. Reconciliation is pure: the classification depends only on
//! the requirement/selection snapshot, so it can be rerun after every edit.
//!
//! ## Example
//!
//! ```rust
//! use boq_core::reconcile::{reconcile, ReconcileStatus};
//! use boq_core::requirements::TakeoffLine;
//! use boq_core::units::Unit;
//!
//! let req = TakeoffLine::new("Cement", 9.6, Unit::Bags).to_requirement();
//! let result = reconcile(&req, &[]);
//! assert_eq!(result.status, ReconcileStatus::Missing);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::SelectedMaterial;
use crate::requirements::MaterialRequirement;

/// Classification of one requirement against the current selections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileStatus {
    /// No selected material counts toward this requirement
    Missing,
    /// Selected less than required
    Insufficient,
    /// Requirement met exactly, or not required at all
    Ok,
    /// Selected more than required
    Extra,
}

impl ReconcileStatus {
    /// Whether this status permits proceeding to the BOQ step
    pub fn is_satisfied(&self) -> bool {
        matches!(self, ReconcileStatus::Ok | ReconcileStatus::Extra)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReconcileStatus::Missing => "Missing",
            ReconcileStatus::Insufficient => "Insufficient",
            ReconcileStatus::Ok => "OK",
            ReconcileStatus::Extra => "Extra",
        }
    }
}

impl std::fmt::Display for ReconcileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Outcome of reconciling one requirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Requirement category this outcome belongs to
    pub category: String,

    /// Classification
    pub status: ReconcileStatus,

    /// Human-readable summary with both quantities
    pub message: String,

    /// Required quantity (whole units)
    pub required: f64,

    /// Total provided by counting selections
    pub provided: f64,
}

/// Classify one requirement against a selection snapshot.
///
/// Only selections whose material type appears in the requirement's
/// `valid_types` count toward it; their quantities sum into `provided`.
/// A zero (or negative) requirement is always Ok regardless of selections.
pub fn reconcile(requirement: &MaterialRequirement, selections: &[&SelectedMaterial]) -> Reconciliation {
    let counted: Vec<&SelectedMaterial> = selections
        .iter()
        .copied()
        .filter(|s| requirement.accepts(&s.material_type))
        .collect();
    let provided: f64 = counted.iter().map(|s| s.quantity).sum();
    let required = requirement.required_qty;
    let unit = requirement.unit.label();

    let (status, message) = if required <= 0.0 {
        (ReconcileStatus::Ok, "Not required".to_string())
    } else if counted.is_empty() {
        (
            ReconcileStatus::Missing,
            format!("No material selected - required {required:.2} {unit}"),
        )
    } else if provided < required {
        (
            ReconcileStatus::Insufficient,
            format!("Selected {provided:.2} of {required:.2} {unit} required"),
        )
    } else if provided > required {
        (
            ReconcileStatus::Extra,
            format!("Selected {provided:.2}, exceeds {required:.2} {unit} required"),
        )
    } else {
        (
            ReconcileStatus::Ok,
            format!("Requirement met: {required:.2} {unit}"),
        )
    };

    Reconciliation {
        category: requirement.category.clone(),
        status,
        message,
        required,
        provided,
    }
}

/// Reconcile a full requirement list against a selection snapshot
pub fn reconcile_all(
    requirements: &[MaterialRequirement],
    selections: &[&SelectedMaterial],
) -> Vec<Reconciliation> {
    requirements
        .iter()
        .map(|req| reconcile(req, selections))
        .collect()
}

/// Navigation gate: true when every requirement is Ok or Extra
pub fn all_satisfied(reconciliations: &[Reconciliation]) -> bool {
    reconciliations.iter().all(|r| r.status.is_satisfied())
}
