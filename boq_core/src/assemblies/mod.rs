//! # Assembly Takeoffs
//!
//! One module per estimated assembly family. Each follows the same shape:
//! an `*Input` struct of optional geometry plus configuration enums, a pure
//! `compute` function, and a `*Takeoff` carrying fractional quantity lines.
//!
//! | Module | Assembly | Output |
//! |--------|----------|--------|
//! | [`partition`] | Brick and stud walls | Material requirements |
//! | [`door`] | Door leaf + frame + hardware | Priced schedule |
//! | [`ceiling`] | Suspended ceilings | Material requirements |

pub mod ceiling;
pub mod door;
pub mod partition;

use serde::{Deserialize, Serialize};

use crate::errors::EstimateResult;

/// One assembly entry in an estimate, any family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AssemblyInput {
    #[serde(rename = "partition")]
    Partition(partition::PartitionInput),
    #[serde(rename = "door")]
    Door(door::DoorInput),
    #[serde(rename = "ceiling")]
    Ceiling(ceiling::CeilingInput),
}

/// Computed takeoff for one assembly entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AssemblyTakeoff {
    #[serde(rename = "partition")]
    Partition(partition::PartitionTakeoff),
    #[serde(rename = "door")]
    Door(door::DoorTakeoff),
    #[serde(rename = "ceiling")]
    Ceiling(ceiling::CeilingTakeoff),
}

impl AssemblyInput {
    /// User label of this entry
    pub fn label(&self) -> &str {
        match self {
            AssemblyInput::Partition(p) => &p.label,
            AssemblyInput::Door(d) => &d.label,
            AssemblyInput::Ceiling(c) => &c.label,
        }
    }

    /// Assembly family name for display
    pub fn kind(&self) -> &'static str {
        match self {
            AssemblyInput::Partition(_) => "partition",
            AssemblyInput::Door(_) => "door",
            AssemblyInput::Ceiling(_) => "ceiling",
        }
    }

    /// Run the family's quantity calculator
    pub fn compute(&self) -> EstimateResult<AssemblyTakeoff> {
        Ok(match self {
            AssemblyInput::Partition(p) => AssemblyTakeoff::Partition(partition::compute(p)?),
            AssemblyInput::Door(d) => AssemblyTakeoff::Door(door::compute(d)?),
            AssemblyInput::Ceiling(c) => AssemblyTakeoff::Ceiling(ceiling::compute(c)?),
        })
    }
}

impl AssemblyTakeoff {
    /// True when inputs were incomplete and nothing was computed
    pub fn is_empty(&self) -> bool {
        match self {
            AssemblyTakeoff::Partition(p) => p.is_empty(),
            AssemblyTakeoff::Door(d) => d.is_empty(),
            AssemblyTakeoff::Ceiling(c) => c.is_empty(),
        }
    }
}
