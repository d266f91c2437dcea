//! # Material Requirements
//!
//! The output vocabulary of the quantity calculators. A takeoff produces
//! [`TakeoffLine`]s with fractional quantities; a line becomes a
//! [`MaterialRequirement`] by rounding **up** exactly once, at the point
//! where the requirement is declared. Intermediate math stays fractional so
//! repeated conversions never accumulate extra rounding.
//!
//! ## Example
//!
//! ```rust
//! use boq_core::requirements::TakeoffLine;
//! use boq_core::units::Unit;
//!
//! // 6.67 boards computed -> 7 boards required
//! let line = TakeoffLine::new("Gypsum Boards", 80.0 * 2.0 / 24.0, Unit::Pieces)
//!     .with_valid_types(&["Standard Gypsum Board"]);
//! let req = line.to_requirement();
//! assert_eq!(req.required_qty, 7.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::units::Unit;

/// One computed quantity, pre-rounding.
///
/// `quantity` is the raw formula output and may be fractional. `valid_types`
/// names the concrete catalog material types that can satisfy this line
/// (e.g. the Bricks line accepts any brick or block type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeoffLine {
    /// Requirement category (e.g. "Bricks", "Joint Compound")
    pub category: String,

    /// Raw computed quantity, fractional
    pub quantity: f64,

    /// Commercial unit for this line
    pub unit: Unit,

    /// Catalog material types that count toward this requirement
    pub valid_types: Vec<String>,
}

impl TakeoffLine {
    /// Create a new line. If no valid types are supplied later, the
    /// category name itself is the only accepted material type.
    pub fn new(category: impl Into<String>, quantity: f64, unit: Unit) -> Self {
        let category = category.into();
        TakeoffLine {
            valid_types: vec![category.clone()],
            category,
            quantity,
            unit,
        }
    }

    /// Replace the accepted material types
    pub fn with_valid_types(mut self, types: &[&str]) -> Self {
        self.valid_types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Declare the requirement for this line.
    ///
    /// This is the single rounding boundary: the raw quantity is clamped at
    /// zero and ceiled here, and nowhere else.
    pub fn to_requirement(&self) -> MaterialRequirement {
        MaterialRequirement {
            category: self.category.clone(),
            required_qty: self.quantity.max(0.0).ceil(),
            unit: self.unit,
            valid_types: self.valid_types.clone(),
        }
    }
}

/// A declared minimum quantity of a material category.
///
/// `required_qty` is always a whole number of units (ceiled once from the
/// takeoff line). A requirement of zero means "not required" and always
/// reconciles as OK.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRequirement {
    /// Requirement category (e.g. "Cement")
    pub category: String,

    /// Minimum whole-unit quantity needed
    pub required_qty: f64,

    /// Commercial unit
    pub unit: Unit,

    /// Catalog material types that count toward this requirement
    pub valid_types: Vec<String>,
}

impl MaterialRequirement {
    /// Whether a selected material type satisfies this requirement's filter
    pub fn accepts(&self, material_type: &str) -> bool {
        self.valid_types.iter().any(|t| t == material_type)
    }
}

/// Convert a full takeoff into declared requirements (one ceil per line).
pub fn declare_requirements(lines: &[TakeoffLine]) -> Vec<MaterialRequirement> {
    lines.iter().map(TakeoffLine::to_requirement).collect()
}
