//! # False Ceiling Takeoff
//!
//! Quantity derivation for suspended ceilings. Grid (tile) ceilings hang a
//! main-runner/cross-tee lattice; boarded ceilings (gypsum, POP) screw boards
//! to furring channels; metal ceilings are panel-and-hanger only. Channel run
//! lengths derive from per-channel coverage constants, all inflated by a
//! uniform wastage factor (default 10%).
//!
//! ## Example
//!
//! ```rust
//! use boq_core::assemblies::ceiling::{compute, CeilingInput, CeilingType};
//!
//! let input = CeilingInput {
//!     ceiling_type: Some(CeilingType::Gypsum),
//!     length_ft: Some(20.0),
//!     width_ft: Some(15.0),
//!     wastage_percent: 0.0,
//!     ..Default::default()
//! };
//! let takeoff = compute(&input).unwrap();
//! assert_eq!(takeoff.area_sqft, 300.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::requirements::{MaterialRequirement, TakeoffLine};
use crate::units::Unit;

/// Default wastage applied to ceiling runs and panels
pub const DEFAULT_CEILING_WASTAGE_PERCENT: f64 = 10.0;
/// Boarded ceiling board coverage (4x12 ft board)
pub const CEILING_BOARD_AREA_SQFT: f64 = 48.0;
/// One suspension point per 16 ft² of ceiling
pub const SUSPENSION_COVERAGE_SQFT: f64 = 16.0;
/// Average drop length per suspension point (ft)
pub const AVG_DROP_HEIGHT_FT: f64 = 0.5;
/// Fasteners per ft² of boarded ceiling
pub const SCREWS_PER_SQFT: f64 = 4.0;
/// Screws per commercial box
pub const SCREWS_PER_BOX: f64 = 500.0;
/// Joint tape roll coverage (ft² of ceiling)
pub const CEILING_TAPE_COVERAGE_SQFT: f64 = 200.0;
/// Joint compound bag coverage (ft² of ceiling)
pub const CEILING_COMPOUND_COVERAGE_SQFT: f64 = 100.0;

// ============================================================================
// Channel Catalog
// ============================================================================

/// Suspended ceiling channel family.
///
/// `coverage_per_unit` is the spacing or coverage the channel is laid at:
/// runner/furring spacing in feet across the width, suspension coverage in
/// ft² per point, perimeter channels at coverage 1 (full perimeter run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    #[serde(rename = "main-runner")]
    MainRunner,
    #[serde(rename = "cross-tee")]
    CrossTee,
    #[serde(rename = "wall-angle")]
    WallAngle,
    #[serde(rename = "suspension")]
    Suspension,
    #[serde(rename = "furring")]
    Furring,
    #[serde(rename = "ceiling-track")]
    CeilingTrack,
}

impl ChannelKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChannelKind::MainRunner => "Main Runner Channels",
            ChannelKind::CrossTee => "Cross Tees / Secondary Channels",
            ChannelKind::WallAngle => "Wall Angles / Perimeter Channels",
            ChannelKind::Suspension => "Suspension Channels",
            ChannelKind::Furring => "Furring Channels",
            ChannelKind::CeilingTrack => "Ceiling Track Channels",
        }
    }

    /// Laying spacing/coverage constant for this channel
    pub fn coverage_per_unit(&self) -> f64 {
        match self {
            ChannelKind::MainRunner => 4.0,
            ChannelKind::CrossTee => 2.0,
            ChannelKind::WallAngle => 1.0,
            ChannelKind::Suspension => SUSPENSION_COVERAGE_SQFT,
            ChannelKind::Furring => 1.5,
            ChannelKind::CeilingTrack => 1.0,
        }
    }

    /// List rate per running foot (INR), used when no shop quote exists
    pub fn list_rate(&self) -> f64 {
        match self {
            ChannelKind::MainRunner => 165.0,
            ChannelKind::CrossTee => 95.0,
            ChannelKind::WallAngle => 85.0,
            ChannelKind::Suspension => 125.0,
            ChannelKind::Furring => 75.0,
            ChannelKind::CeilingTrack => 95.0,
        }
    }
}

// ============================================================================
// Configuration Enums
// ============================================================================

/// Ceiling construction method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CeilingType {
    #[serde(rename = "gypsum-ceiling")]
    Gypsum,
    #[serde(rename = "pop-ceiling")]
    Pop,
    #[serde(rename = "grid-ceiling")]
    Grid,
    #[serde(rename = "metal-ceiling")]
    Metal,
}

impl CeilingType {
    pub const ALL: [CeilingType; 4] = [
        CeilingType::Gypsum,
        CeilingType::Pop,
        CeilingType::Grid,
        CeilingType::Metal,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CeilingType::Gypsum => "Gypsum Board Ceiling",
            CeilingType::Pop => "POP Ceiling",
            CeilingType::Grid => "Grid Tile Ceiling",
            CeilingType::Metal => "Metal Suspended Ceiling",
        }
    }

    /// Boarded ceilings take joint finishing (tape, compound, screws)
    pub fn is_boarded(&self) -> bool {
        matches!(self, CeilingType::Gypsum | CeilingType::Pop)
    }
}

impl std::fmt::Display for CeilingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Grid tile module for grid ceilings.
///
/// Unrecognized values resolve to the 4x8 default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GridSpacing {
    #[default]
    #[serde(rename = "4x8")]
    FourByEight,
    #[serde(rename = "4x16")]
    FourBySixteen,
}

impl GridSpacing {
    /// Tile coverage in ft²
    pub fn tile_area_sqft(&self) -> f64 {
        match self {
            GridSpacing::FourByEight => 32.0,
            GridSpacing::FourBySixteen => 64.0,
        }
    }

    /// Parse from common string representations, defaulting to 4x8
    pub fn from_str_flexible(s: &str) -> Self {
        if s.contains("16") {
            GridSpacing::FourBySixteen
        } else {
            GridSpacing::FourByEight
        }
    }
}

// ============================================================================
// Input / Takeoff
// ============================================================================

/// Input parameters for a false ceiling takeoff.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Reception ceiling",
///   "ceiling_type": "grid-ceiling",
///   "length_ft": 20.0,
///   "width_ft": 15.0,
///   "grid_spacing": "4x8",
///   "wastage_percent": 10.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CeilingInput {
    /// User label for this ceiling area
    #[serde(default)]
    pub label: String,

    /// Ceiling construction method
    pub ceiling_type: Option<CeilingType>,

    /// Room length in feet
    pub length_ft: Option<f64>,

    /// Room width in feet
    pub width_ft: Option<f64>,

    /// Grid tile module (grid ceilings only)
    #[serde(default)]
    pub grid_spacing: GridSpacing,

    /// Wastage percentage applied to runs and panels, 0-20
    #[serde(default = "default_ceiling_wastage")]
    pub wastage_percent: f64,
}

fn default_ceiling_wastage() -> f64 {
    DEFAULT_CEILING_WASTAGE_PERCENT
}

impl Default for CeilingInput {
    fn default() -> Self {
        CeilingInput {
            label: String::new(),
            ceiling_type: None,
            length_ft: None,
            width_ft: None,
            grid_spacing: GridSpacing::default(),
            wastage_percent: DEFAULT_CEILING_WASTAGE_PERCENT,
        }
    }
}

impl CeilingInput {
    pub fn validate(&self) -> EstimateResult<()> {
        for (field, value) in [("length_ft", self.length_ft), ("width_ft", self.width_ft)] {
            if let Some(v) = value {
                if v <= 0.0 {
                    return Err(EstimateError::invalid_input(
                        field,
                        v.to_string(),
                        "Dimension must be positive",
                    ));
                }
            }
        }
        if !(0.0..=20.0).contains(&self.wastage_percent) {
            return Err(EstimateError::invalid_input(
                "wastage_percent",
                self.wastage_percent.to_string(),
                "Wastage must be between 0 and 20",
            ));
        }
        Ok(())
    }
}

/// Computed quantities for one ceiling area
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CeilingTakeoff {
    /// Ceiling type this takeoff was computed for (None if inputs incomplete)
    pub ceiling_type: Option<CeilingType>,

    /// Ceiling area (ft²)
    pub area_sqft: f64,

    /// Room perimeter (ft)
    pub perimeter_ft: f64,

    /// Raw computed quantity lines
    pub lines: Vec<TakeoffLine>,
}

impl CeilingTakeoff {
    pub fn empty() -> Self {
        CeilingTakeoff::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ceiling_type.is_none()
    }

    /// Declared (ceiled) requirements for every line
    pub fn requirements(&self) -> Vec<MaterialRequirement> {
        crate::requirements::declare_requirements(&self.lines)
    }

    /// Raw (fractional) quantity of a category, if present
    pub fn quantity(&self, category: &str) -> Option<f64> {
        self.lines
            .iter()
            .find(|l| l.category == category)
            .map(|l| l.quantity)
    }
}

/// Compute required material quantities for a false ceiling.
///
/// Pure function; returns an empty takeoff when type or dimensions are
/// absent. Channel rows are whole counts (a row cannot be fractional); the
/// resulting run lengths stay fractional until requirement declaration.
pub fn compute(input: &CeilingInput) -> EstimateResult<CeilingTakeoff> {
    let (ceiling_type, length, width) =
        match (input.ceiling_type, input.length_ft, input.width_ft) {
            (Some(t), Some(l), Some(w)) => (t, l, w),
            _ => return Ok(CeilingTakeoff::empty()),
        };
    input.validate()?;

    let area = length * width;
    let perimeter = 2.0 * (length + width);
    let wf = 1.0 + input.wastage_percent / 100.0;

    // Suspension drops are shared by every ceiling family
    let suspension_points = (area / SUSPENSION_COVERAGE_SQFT).ceil();
    let suspension_run = suspension_points * AVG_DROP_HEIGHT_FT * wf;
    let hangers = suspension_points * wf;

    let mut lines: Vec<TakeoffLine> = Vec::new();

    match ceiling_type {
        CeilingType::Grid => {
            // Runner lattice: whole rows across the width, tees along the length
            let runner_rows = (width / ChannelKind::MainRunner.coverage_per_unit()).ceil();
            let runner_run = runner_rows * length * wf;
            let tees_per_row = (length / ChannelKind::CrossTee.coverage_per_unit()).ceil();
            let tee_run = tees_per_row * width * wf;

            let tiles = area / input.grid_spacing.tile_area_sqft() * wf;

            lines.extend([
                TakeoffLine::new("Ceiling Tiles", tiles, Unit::Pieces),
                TakeoffLine::new(ChannelKind::MainRunner.label(), runner_run, Unit::RunningFeet),
                TakeoffLine::new(ChannelKind::CrossTee.label(), tee_run, Unit::RunningFeet),
                TakeoffLine::new(ChannelKind::WallAngle.label(), perimeter * wf, Unit::RunningFeet),
            ]);
        }
        CeilingType::Gypsum | CeilingType::Pop => {
            let board_name = match ceiling_type {
                CeilingType::Gypsum => "Gypsum Ceiling Boards",
                _ => "POP Ceiling Boards",
            };
            let boards = area / CEILING_BOARD_AREA_SQFT * wf;
            let furring_rows = (width / ChannelKind::Furring.coverage_per_unit()).ceil();
            let furring_run = furring_rows * length * wf;

            lines.extend([
                TakeoffLine::new(board_name, boards, Unit::Pieces),
                TakeoffLine::new(ChannelKind::Furring.label(), furring_run, Unit::RunningFeet),
                TakeoffLine::new(
                    ChannelKind::CeilingTrack.label(),
                    perimeter * wf,
                    Unit::RunningFeet,
                ),
            ]);
        }
        CeilingType::Metal => {
            lines.extend([
                TakeoffLine::new("Metal Ceiling Panels", area / input.grid_spacing.tile_area_sqft() * wf, Unit::Pieces),
                TakeoffLine::new(ChannelKind::WallAngle.label(), perimeter * wf, Unit::RunningFeet),
            ]);
        }
    }

    lines.push(TakeoffLine::new(ChannelKind::Suspension.label(), suspension_run, Unit::RunningFeet));
    lines.push(TakeoffLine::new("Ceiling Hangers", hangers, Unit::Pieces));
    lines.push(TakeoffLine::new(
        "Ceiling Screws",
        area * SCREWS_PER_SQFT / SCREWS_PER_BOX,
        Unit::Boxes,
    ));

    if ceiling_type.is_boarded() {
        lines.push(TakeoffLine::new(
            "Joint Tape",
            area / CEILING_TAPE_COVERAGE_SQFT,
            Unit::Rolls,
        ));
        lines.push(TakeoffLine::new(
            "Joint Compound",
            area / CEILING_COMPOUND_COVERAGE_SQFT,
            Unit::Bags,
        ));
    }

    Ok(CeilingTakeoff {
        ceiling_type: Some(ceiling_type),
        area_sqft: area,
        perimeter_ft: perimeter,
        lines,
    })
}
