//! # Unit Types
//!
//! Type-safe wrappers for takeoff dimensions plus the display unit tags used
//! on requirements and BOQ lines. The wrappers are lightweight f64 newtypes:
//! estimation works in a small, consistent set of site units and JSON
//! serialization should stay plain numbers.
//!
//! ## Site Units
//!
//! The estimator uses feet-based site units throughout, matching how Indian
//! fit-out contractors measure:
//! - Length: feet (ft)
//! - Area: square feet (ft²)
//! - Volume: cubic feet (ft³) - mortar, sand, cement bag volume
//!
//! ## Example
//!
//! ```rust
//! use boq_core::units::{Feet, SqFt, CuFt};
//!
//! let area = SqFt::of(Feet(10.0), Feet(8.0));
//! assert_eq!(area.0, 80.0);
//!
//! // 9 inch wall: mortar volume over the wall face
//! let mortar = CuFt::of(area, Feet(0.75));
//! assert_eq!(mortar.0, 60.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

// ============================================================================
// Area and Volume Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

impl SqFt {
    /// Rectangle area from two lengths
    pub fn of(length: Feet, height: Feet) -> Self {
        SqFt(length.0 * height.0)
    }
}

/// Volume in cubic feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuFt(pub f64);

impl CuFt {
    /// Prism volume: area times thickness
    pub fn of(area: SqFt, thickness: Feet) -> Self {
        CuFt(area.0 * thickness.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(SqFt);
impl_arithmetic!(CuFt);

// ============================================================================
// Display Unit Tags
// ============================================================================

/// Commercial unit a requirement or BOQ line is quantified in.
///
/// Serializes to the short site label (e.g. `"pcs"`, `"ft³"`) so exported
/// JSON reads like a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Discrete pieces (bricks, boards, channels)
    #[serde(rename = "pcs")]
    Pieces,
    /// Cement/compound/insulation bags
    #[serde(rename = "bags")]
    Bags,
    /// Loose volume (sand, mortar)
    #[serde(rename = "ft³")]
    CubicFeet,
    /// Surface area (glass, laminate coverage)
    #[serde(rename = "ft²")]
    SquareFeet,
    /// Linear runs (frames, runners)
    #[serde(rename = "rft")]
    RunningFeet,
    /// Hinge pairs, handle pairs
    #[serde(rename = "pair")]
    Pairs,
    /// Hardware sets (patch fittings)
    #[serde(rename = "set")]
    Sets,
    /// Joint tape rolls
    #[serde(rename = "rolls")]
    Rolls,
    /// Screw boxes
    #[serde(rename = "boxes")]
    Boxes,
    /// Insulation sheets
    #[serde(rename = "sheets")]
    Sheets,
}

impl Unit {
    /// Short site label as printed on a bill
    pub fn label(&self) -> &'static str {
        match self {
            Unit::Pieces => "pcs",
            Unit::Bags => "bags",
            Unit::CubicFeet => "ft³",
            Unit::SquareFeet => "ft²",
            Unit::RunningFeet => "rft",
            Unit::Pairs => "pair",
            Unit::Sets => "set",
            Unit::Rolls => "rolls",
            Unit::Boxes => "boxes",
            Unit::Sheets => "sheets",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_of_rectangle() {
        // 10 ft x 8 ft wall = 80 ft²
        let area = SqFt::of(Feet(10.0), Feet(8.0));
        assert_eq!(area.0, 80.0);
    }

    #[test]
    fn test_mortar_volume() {
        // 80 ft² x 0.75 ft (9 inch wall) = 60 ft³
        let vol = CuFt::of(SqFt(80.0), Feet(0.75));
        assert_eq!(vol.0, 60.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Feet(10.0);
        let b = Feet(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_serialization() {
        let ft = Feet(12.5);
        let json = serde_json::to_string(&ft).unwrap();
        assert_eq!(json, "12.5");

        let unit_json = serde_json::to_string(&Unit::CubicFeet).unwrap();
        assert_eq!(unit_json, "\"ft³\"");
    }
}
