//! # Wall Partition Takeoff
//!
//! Quantity derivation for the six wall construction methods: civil brick,
//! gypsum, plywood, gypsum+plywood, gypsum+glass and plywood+glass.
//!
//! ## Assumptions
//!
//! - Dimensions are in feet; computed areas in ft², mortar volumes in ft³
//! - Both faces of a stud partition are boarded (`faces = 2`)
//! - Glazed hybrids board only the strip below the glass panel
//! - Brick wastage applies to bricks only, never to mortar materials
//!
//! ## Example
//!
//! ```rust
//! use boq_core::assemblies::partition::{PartitionInput, WallType, WallThickness, compute};
//!
//! let input = PartitionInput {
//!     label: "W-1".to_string(),
//!     wall_type: Some(WallType::Civil),
//!     length_ft: Some(10.0),
//!     height_ft: Some(8.0),
//!     thickness: WallThickness::NineInch,
//!     ..Default::default()
//! };
//!
//! let takeoff = compute(&input).unwrap();
//! let bricks = takeoff.requirement("Bricks").unwrap();
//! assert_eq!(bricks.required_qty, 2000.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::requirements::{MaterialRequirement, TakeoffLine};
use crate::units::{CuFt, Feet, SqFt, Unit};

// ============================================================================
// Coverage Constants
// ============================================================================

/// One standard brick covers ~0.08 ft² of wall face
pub const BRICK_FACE_AREA_FT2: f64 = 0.08;
/// One 50 kg cement bag is ~1.25 ft³
pub const CEMENT_BAG_VOLUME_FT3: f64 = 1.25;
/// Cement fraction of mortar volume (1:4 cement:sand mix)
pub const MORTAR_CEMENT_FRACTION: f64 = 1.0 / 5.0;
/// One rockwool bag/sheet covers 70 ft² of single face
pub const ROCKWOOL_COVERAGE_SQFT: f64 = 70.0;
/// Joint tape roll coverage (ft² of boarded face)
pub const JOINT_TAPE_COVERAGE_SQFT: f64 = 216.0;
/// Joint compound bag coverage (ft² of boarded face)
pub const JOINT_COMPOUND_COVERAGE_SQFT: f64 = 432.0;
/// Joint compound coverage used on the hybrid gypsum side
pub const HYBRID_COMPOUND_COVERAGE_SQFT: f64 = 120.0;
/// Channel piece length for glass framing and plywood studs (ft)
pub const CHANNEL_PIECE_FT: f64 = 10.0;
/// Hybrid wall channel run multiplier on wall length
pub const HYBRID_CHANNEL_FACTOR: f64 = 1.2;

// Accepted catalog material types per requirement category
pub const BRICK_TYPES: [&str; 4] = ["Red Clay Brick", "Fly Ash Brick", "Argon Block", "Solid Block"];
pub const CEMENT_TYPES: [&str; 3] = ["Ordinary Portland Cement", "Pozzolana Cement", "White Cement"];
pub const SAND_TYPES: [&str; 2] = ["River Sand", "M-Sand"];
pub const GYPSUM_BOARD_TYPES: [&str; 3] = [
    "Standard Gypsum Board",
    "Fire-Resistant Gypsum",
    "Moisture-Resistant Gypsum",
];
pub const PLYWOOD_BOARD_TYPES: [&str; 3] = ["Birch Plywood", "Marine Plywood", "Commercial Plywood"];
pub const LAMINATE_TYPES: [&str; 1] = ["High-Pressure Laminate"];
pub const ROCKWOOL_TYPES: [&str; 1] = ["Rockwool Insulation Batts"];
pub const GLASS_TYPES: [&str; 3] = [
    "Clear Tempered Glass",
    "Frosted Tempered Glass",
    "Tinted Tempered Glass",
];

/// Per-board-material coverage record.
///
/// Gypsum and plywood partitions share one formula set; only these numbers
/// differ between them.
#[derive(Debug, Clone, Copy)]
struct BoardSpec {
    /// Boarded faces per partition (both sides)
    faces: f64,
    /// Coverage of one board (ft²)
    board_area_sqft: f64,
    /// Track piece length for floor/ceiling channels (ft)
    track_piece_ft: f64,
    /// Screws consumed per board
    screws_per_board: f64,
}

const GYPSUM_SPEC: BoardSpec = BoardSpec {
    faces: 2.0,
    board_area_sqft: 24.0,
    track_piece_ft: 4.5,
    screws_per_board: 40.0,
};

const PLYWOOD_SPEC: BoardSpec = BoardSpec {
    faces: 2.0,
    board_area_sqft: 32.0,
    track_piece_ft: CHANNEL_PIECE_FT,
    screws_per_board: 40.0,
};

impl BoardSpec {
    /// Boards to cover both faces of `area`, with layering applied
    fn boards(&self, area_sqft: f64, layers: f64) -> f64 {
        area_sqft * self.faces * layers / self.board_area_sqft
    }

    /// Total boarded face area (drives tape/compound/screw consumption)
    fn boarded_area(&self, area_sqft: f64, layers: f64) -> f64 {
        area_sqft * self.faces * layers
    }
}

// ============================================================================
// Configuration Enums
// ============================================================================

/// Wall construction method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallType {
    #[serde(rename = "civil")]
    Civil,
    #[serde(rename = "gypsum")]
    Gypsum,
    #[serde(rename = "plywood")]
    Plywood,
    #[serde(rename = "gypsum-plywood")]
    GypsumPlywood,
    #[serde(rename = "gypsum-glass")]
    GypsumGlass,
    #[serde(rename = "plywood-glass")]
    PlywoodGlass,
}

impl WallType {
    /// All wall types for UI selection
    pub const ALL: [WallType; 6] = [
        WallType::Civil,
        WallType::Gypsum,
        WallType::Plywood,
        WallType::GypsumPlywood,
        WallType::GypsumGlass,
        WallType::PlywoodGlass,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            WallType::Civil => "Civil Wall (Brick)",
            WallType::Gypsum => "Gypsum Partition",
            WallType::Plywood => "Plywood Partition",
            WallType::GypsumPlywood => "Gypsum + Plywood",
            WallType::GypsumGlass => "Gypsum + Glass",
            WallType::PlywoodGlass => "Plywood + Glass",
        }
    }

    /// Whether this wall type carries a glazed strip
    pub fn has_glazing(&self) -> bool {
        matches!(self, WallType::GypsumGlass | WallType::PlywoodGlass)
    }
}

impl std::fmt::Display for WallType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Brick wall thickness sub-option.
///
/// Unrecognized values resolve to the 9 inch default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WallThickness {
    #[serde(rename = "4.5 inch")]
    FourAndHalfInch,
    #[default]
    #[serde(rename = "9 inch")]
    NineInch,
}

impl WallThickness {
    /// Wall thickness in feet (drives mortar volume)
    pub fn thickness_ft(&self) -> f64 {
        match self {
            WallThickness::FourAndHalfInch => 0.375,
            WallThickness::NineInch => 0.75,
        }
    }

    /// Brick count multiplier (a 9 inch wall is two wythes)
    pub fn brick_multiplier(&self) -> f64 {
        match self {
            WallThickness::FourAndHalfInch => 1.0,
            WallThickness::NineInch => 2.0,
        }
    }

    /// Parse from common string representations, defaulting to 9 inch
    pub fn from_str_flexible(s: &str) -> Self {
        if s.contains("4.5") {
            WallThickness::FourAndHalfInch
        } else {
            WallThickness::NineInch
        }
    }
}

/// Board layering sub-option.
///
/// Unrecognized values resolve to single layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Layering {
    #[default]
    #[serde(rename = "Single Layer")]
    Single,
    #[serde(rename = "Double Layer")]
    Double,
}

impl Layering {
    pub fn multiplier(&self) -> f64 {
        match self {
            Layering::Single => 1.0,
            Layering::Double => 2.0,
        }
    }

    /// Parse from common string representations, defaulting to single
    pub fn from_str_flexible(s: &str) -> Self {
        if s.to_lowercase().contains("double") {
            Layering::Double
        } else {
            Layering::Single
        }
    }
}

/// Glazing sub-option for glass hybrids.
///
/// Unrecognized values resolve to single glazing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Glazing {
    #[default]
    #[serde(rename = "Single Glazing")]
    Single,
    #[serde(rename = "Double Glazing")]
    Double,
}

impl Glazing {
    pub fn multiplier(&self) -> f64 {
        match self {
            Glazing::Single => 1.0,
            Glazing::Double => 2.0,
        }
    }

    /// Parse from common string representations, defaulting to single
    pub fn from_str_flexible(s: &str) -> Self {
        if s.to_lowercase().contains("double") {
            Glazing::Double
        } else {
            Glazing::Single
        }
    }
}

// ============================================================================
// Input / Takeoff
// ============================================================================

/// Input parameters for a wall partition takeoff.
///
/// `wall_type`, `length_ft` and `height_ft` are optional because the wizard
/// recomputes on every edit: until all three are present the takeoff is an
/// empty no-op, not an error. Present dimensions must be strictly positive.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "W-1",
///   "wall_type": "civil",
///   "length_ft": 10.0,
///   "height_ft": 8.0,
///   "thickness": "9 inch",
///   "wastage_percent": 10.0
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartitionInput {
    /// User label for this wall (e.g. "W-1", "Cabin partition")
    #[serde(default)]
    pub label: String,

    /// Wall construction method
    pub wall_type: Option<WallType>,

    /// Wall length in feet
    pub length_ft: Option<f64>,

    /// Wall height in feet
    pub height_ft: Option<f64>,

    /// Glass panel length in feet (glazed hybrids; defaults to wall length)
    pub glass_length_ft: Option<f64>,

    /// Glass panel height in feet (glazed hybrids)
    pub glass_height_ft: Option<f64>,

    /// Brick wall thickness (civil only)
    #[serde(default)]
    pub thickness: WallThickness,

    /// Board layering (gypsum/plywood/hybrid)
    #[serde(default)]
    pub layering: Layering,

    /// Glazing (glass hybrids)
    #[serde(default)]
    pub glazing: Glazing,

    /// Brick wastage percentage, 0-20 (civil bricks only)
    #[serde(default)]
    pub wastage_percent: f64,
}

impl PartitionInput {
    /// Validate present inputs. Absent optionals are fine; present values
    /// must be in range.
    pub fn validate(&self) -> EstimateResult<()> {
        for (field, value) in [
            ("length_ft", self.length_ft),
            ("height_ft", self.height_ft),
            ("glass_length_ft", self.glass_length_ft),
            ("glass_height_ft", self.glass_height_ft),
        ] {
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

/// Computed quantities for one wall partition.
///
/// `lines` carry fractional quantities; call [`PartitionTakeoff::requirements`]
/// to get the ceiled requirements for reconciliation and display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartitionTakeoff {
    /// Wall type this takeoff was computed for (None if inputs incomplete)
    pub wall_type: Option<WallType>,

    /// Boarded/bricked wall area (ft²). For glazed hybrids this is the
    /// reduced area below the glass strip.
    pub area_sqft: f64,

    /// Glass panel area (ft²), zero for unglazed walls
    pub glass_area_sqft: f64,

    /// Raw computed quantity lines
    pub lines: Vec<TakeoffLine>,
}

impl PartitionTakeoff {
    /// Neutral result for incomplete inputs
    pub fn empty() -> Self {
        PartitionTakeoff::default()
    }

    /// True when inputs were incomplete and nothing was computed
    pub fn is_empty(&self) -> bool {
        self.wall_type.is_none()
    }

    /// Declared (ceiled) requirements for every line
    pub fn requirements(&self) -> Vec<MaterialRequirement> {
        crate::requirements::declare_requirements(&self.lines)
    }

    /// Look up a single requirement by category
    pub fn requirement(&self, category: &str) -> Option<MaterialRequirement> {
        self.lines
            .iter()
            .find(|l| l.category == category)
            .map(TakeoffLine::to_requirement)
    }

    /// Raw (fractional) quantity of a category, if present
    pub fn quantity(&self, category: &str) -> Option<f64> {
        self.lines
            .iter()
            .find(|l| l.category == category)
            .map(|l| l.quantity)
    }
}

/// Compute required material quantities for a wall partition.
///
/// Pure function: identical inputs always produce identical takeoffs.
/// Returns an empty takeoff when wall type, length or height are absent.
///
/// # Example
///
/// ```rust
/// use boq_core::assemblies::partition::{compute, PartitionInput, WallType, Layering};
///
/// let input = PartitionInput {
///     wall_type: Some(WallType::Gypsum),
///     length_ft: Some(10.0),
///     height_ft: Some(8.0),
///     layering: Layering::Single,
///     ..Default::default()
/// };
/// let takeoff = compute(&input).unwrap();
/// // (80 ft² x 2 faces) / 24 ft² per board = 6.67 boards
/// assert!((takeoff.quantity("Gypsum Boards").unwrap() - 6.6667).abs() < 0.001);
/// ```
pub fn compute(input: &PartitionInput) -> EstimateResult<PartitionTakeoff> {
    let (wall_type, length, height) = match (input.wall_type, input.length_ft, input.height_ft) {
        (Some(w), Some(l), Some(h)) => (w, l, h),
        _ => return Ok(PartitionTakeoff::empty()),
    };
    input.validate()?;

    let area = length * height;

    let takeoff = match wall_type {
        WallType::Civil => civil_takeoff(input, length, height, area),
        WallType::Gypsum => boarded_takeoff(input, length, height, area, BoardFamily::Gypsum),
        WallType::Plywood => boarded_takeoff(input, length, height, area, BoardFamily::Plywood),
        WallType::GypsumGlass => glazed_takeoff(input, length, height, BoardFamily::Gypsum),
        WallType::PlywoodGlass => glazed_takeoff(input, length, height, BoardFamily::Plywood),
        WallType::GypsumPlywood => hybrid_takeoff(input, length, area),
    };

    Ok(takeoff)
}

/// Which board material a stud partition uses
#[derive(Debug, Clone, Copy, PartialEq)]
enum BoardFamily {
    Gypsum,
    Plywood,
}

impl BoardFamily {
    fn board_spec(&self) -> BoardSpec {
        match self {
            BoardFamily::Gypsum => GYPSUM_SPEC,
            BoardFamily::Plywood => PLYWOOD_SPEC,
        }
    }

    fn board_category(&self) -> &'static str {
        match self {
            BoardFamily::Gypsum => "Gypsum Boards",
            BoardFamily::Plywood => "Plywood Boards",
        }
    }

    fn board_types(&self) -> &'static [&'static str] {
        match self {
            BoardFamily::Gypsum => &GYPSUM_BOARD_TYPES,
            BoardFamily::Plywood => &PLYWOOD_BOARD_TYPES,
        }
    }
}

fn civil_takeoff(input: &PartitionInput, _length: f64, _height: f64, area: f64) -> PartitionTakeoff {
    let wastage_factor = 1.0 + input.wastage_percent / 100.0;

    // Bricks: face count x wythes x wastage. Wastage never touches mortar.
    let bricks = area / BRICK_FACE_AREA_FT2 * input.thickness.brick_multiplier() * wastage_factor;

    // Mortar split 1:4 cement:sand by volume
    let mortar = CuFt::of(SqFt(area), Feet(input.thickness.thickness_ft()));
    let cement_ft3 = mortar.value() * MORTAR_CEMENT_FRACTION;
    let sand_ft3 = mortar.value() * (1.0 - MORTAR_CEMENT_FRACTION);

    PartitionTakeoff {
        wall_type: Some(WallType::Civil),
        area_sqft: area,
        glass_area_sqft: 0.0,
        lines: vec![
            TakeoffLine::new("Bricks", bricks, Unit::Pieces).with_valid_types(&BRICK_TYPES),
            TakeoffLine::new("Cement", cement_ft3 / CEMENT_BAG_VOLUME_FT3, Unit::Bags)
                .with_valid_types(&CEMENT_TYPES),
            TakeoffLine::new("Sand", sand_ft3, Unit::CubicFeet).with_valid_types(&SAND_TYPES),
        ],
    }
}

fn boarded_takeoff(
    input: &PartitionInput,
    length: f64,
    height: f64,
    area: f64,
    family: BoardFamily,
) -> PartitionTakeoff {
    let board = family.board_spec();
    let layers = input.layering.multiplier();
    let boards = board.boards(area, layers);
    let boarded_area = board.boarded_area(area, layers);

    let mut lines = vec![
        TakeoffLine::new(family.board_category(), boards, Unit::Pieces)
            .with_valid_types(family.board_types()),
    ];

    match family {
        BoardFamily::Gypsum => {
            // Insulation covers one face only, never doubled with layering
            let studs = (length / 2.0 + 1.0) * 2.0;
            lines.extend([
                TakeoffLine::new("Rockwool Sheets", area / ROCKWOOL_COVERAGE_SQFT, Unit::Sheets)
                    .with_valid_types(&ROCKWOOL_TYPES),
                TakeoffLine::new("Floor Channel", length / board.track_piece_ft, Unit::Pieces),
                TakeoffLine::new("Ceiling Channel", length / board.track_piece_ft, Unit::Pieces),
                TakeoffLine::new("Studs", studs, Unit::Pieces),
                TakeoffLine::new("Joint Tape", boarded_area / JOINT_TAPE_COVERAGE_SQFT, Unit::Rolls),
                TakeoffLine::new(
                    "Joint Compound",
                    boarded_area / JOINT_COMPOUND_COVERAGE_SQFT,
                    Unit::Bags,
                ),
                TakeoffLine::new("Screws", boards * board.screws_per_board, Unit::Pieces),
            ]);
        }
        BoardFamily::Plywood => {
            // Tracks top and bottom, plus vertical studs cut from 10 ft pieces
            let track_pieces = (length * 2.0) / board.track_piece_ft;
            let stud_pieces = (length / 2.0 + 1.0) * (height / board.track_piece_ft);
            lines.extend([
                TakeoffLine::new("Laminate Sheets", boards, Unit::Pieces)
                    .with_valid_types(&LAMINATE_TYPES),
                TakeoffLine::new("Screws", boards * board.screws_per_board, Unit::Pieces),
                TakeoffLine::new("Aluminium Channels", track_pieces + stud_pieces, Unit::Pieces),
                TakeoffLine::new("Rockwool Bags", area / ROCKWOOL_COVERAGE_SQFT, Unit::Bags)
                    .with_valid_types(&ROCKWOOL_TYPES),
            ]);
        }
    }

    PartitionTakeoff {
        wall_type: Some(match family {
            BoardFamily::Gypsum => WallType::Gypsum,
            BoardFamily::Plywood => WallType::Plywood,
        }),
        area_sqft: area,
        glass_area_sqft: 0.0,
        lines,
    }
}

fn glazed_takeoff(
    input: &PartitionInput,
    length: f64,
    height: f64,
    family: BoardFamily,
) -> PartitionTakeoff {
    let board = family.board_spec();
    let glass_height = input.glass_height_ft.unwrap_or(0.0);
    let glass_length = input.glass_length_ft.unwrap_or(length);

    // The glazed strip is excluded from boarding
    let board_height = (height - glass_height).max(0.0);
    let boarded_wall_area = board_height * length;
    let glaz = input.glazing.multiplier();

    // Double Glazing doubles the board count only; insulation and joint
    // finishing still cover the single boarded face area
    let boards = board.boards(boarded_wall_area, glaz);
    let boarded_area = board.boarded_area(boarded_wall_area, 1.0);
    let glass_area = glass_height * glass_length;

    // Perimeter framing around the glass panel, 10 ft pieces
    let glass_channels =
        2.0 * (glass_height / CHANNEL_PIECE_FT) + 2.0 * (length / CHANNEL_PIECE_FT);

    let mut lines = vec![
        TakeoffLine::new(family.board_category(), boards, Unit::Pieces)
            .with_valid_types(family.board_types()),
        TakeoffLine::new(
            "Rockwool Bags",
            boarded_area / ROCKWOOL_COVERAGE_SQFT,
            Unit::Bags,
        )
        .with_valid_types(&ROCKWOOL_TYPES),
    ];

    match family {
        BoardFamily::Gypsum => {
            lines.extend([
                TakeoffLine::new("Floor Channel", length / 2.0, Unit::Pieces),
                TakeoffLine::new("Ceiling Channel", length / 2.0, Unit::Pieces),
                TakeoffLine::new("Studs", length / 5.0, Unit::Pieces),
                TakeoffLine::new("Joint Tape", boarded_area / JOINT_TAPE_COVERAGE_SQFT, Unit::Rolls),
                TakeoffLine::new(
                    "Joint Compound",
                    boarded_area / JOINT_COMPOUND_COVERAGE_SQFT,
                    Unit::Bags,
                ),
            ]);
        }
        BoardFamily::Plywood => {
            // Laminate matches the single-glazing board count
            lines.extend([
                TakeoffLine::new("Laminate Sheets", board.boards(boarded_wall_area, 1.0), Unit::Pieces)
                    .with_valid_types(&LAMINATE_TYPES),
                TakeoffLine::new("Aluminium Channels", length / 2.0, Unit::Pieces),
            ]);
        }
    }

    lines.push(TakeoffLine::new("Glass Channels", glass_channels, Unit::Pieces));
    lines.push(TakeoffLine::new("Glass", glass_area, Unit::SquareFeet).with_valid_types(&GLASS_TYPES));

    PartitionTakeoff {
        wall_type: Some(match family {
            BoardFamily::Gypsum => WallType::GypsumGlass,
            BoardFamily::Plywood => WallType::PlywoodGlass,
        }),
        area_sqft: boarded_wall_area,
        glass_area_sqft: glass_area,
        lines,
    }
}

fn hybrid_takeoff(input: &PartitionInput, length: f64, area: f64) -> PartitionTakeoff {
    let layers = input.layering.multiplier();

    // One face gypsum, one face plywood; each sees the full wall area once
    let gypsum_boards = area / GYPSUM_SPEC.board_area_sqft * layers;
    let plywood_boards = area / PLYWOOD_SPEC.board_area_sqft * layers;
    // Laminate covers the plywood face once, regardless of layering
    let laminate = area / PLYWOOD_SPEC.board_area_sqft;

    PartitionTakeoff {
        wall_type: Some(WallType::GypsumPlywood),
        area_sqft: area,
        glass_area_sqft: 0.0,
        lines: vec![
            TakeoffLine::new("Gypsum Boards", gypsum_boards, Unit::Pieces)
                .with_valid_types(&GYPSUM_BOARD_TYPES),
            TakeoffLine::new("Joint Tape", 1.0, Unit::Rolls),
            TakeoffLine::new("Joint Compound", area / HYBRID_COMPOUND_COVERAGE_SQFT, Unit::Bags),
            TakeoffLine::new("Plywood Boards", plywood_boards, Unit::Pieces)
                .with_valid_types(&PLYWOOD_BOARD_TYPES),
            TakeoffLine::new("Aluminium Channels", length * HYBRID_CHANNEL_FACTOR, Unit::RunningFeet),
            TakeoffLine::new("Laminate Sheets", laminate, Unit::Pieces)
                .with_valid_types(&LAMINATE_TYPES),
            TakeoffLine::new("Rockwool Bags", area / ROCKWOOL_COVERAGE_SQFT, Unit::Bags)
                .with_valid_types(&ROCKWOOL_TYPES),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn civil_input(length: f64, height: f64, thickness: WallThickness, wastage: f64) -> PartitionInput {
        PartitionInput {
            label: "W-1".to_string(),
            wall_type: Some(WallType::Civil),
            length_ft: Some(length),
            height_ft: Some(height),
            thickness,
            wastage_percent: wastage,
            ..Default::default()
        }
    }

    #[test]
    fn test_civil_nine_inch_wall() {
        // 10x8 = 80 ft², bricks = ceil(80/0.08 x 2) = 2000
        let takeoff = compute(&civil_input(10.0, 8.0, WallThickness::NineInch, 0.0)).unwrap();
        assert_eq!(takeoff.requirement("Bricks").unwrap().required_qty, 2000.0);

        // mortar = 80 x 0.75 = 60 ft³, cement = 12 ft³ -> ceil(12/1.25) = 10 bags
        assert_eq!(takeoff.requirement("Cement").unwrap().required_qty, 10.0);

        // sand = 48 ft³
        assert_eq!(takeoff.requirement("Sand").unwrap().required_qty, 48.0);
        assert_eq!(takeoff.area_sqft, 80.0);
    }

    #[test]
    fn test_civil_wastage_scales_bricks_only() {
        let base = compute(&civil_input(10.0, 8.0, WallThickness::NineInch, 0.0)).unwrap();
        let wasted = compute(&civil_input(10.0, 8.0, WallThickness::NineInch, 10.0)).unwrap();

        // bricks(w) == ceil(bricks(0) x 1.10)
        let expected = (base.requirement("Bricks").unwrap().required_qty * 1.10).ceil();
        assert_eq!(wasted.requirement("Bricks").unwrap().required_qty, expected);
        assert_eq!(wasted.requirement("Bricks").unwrap().required_qty, 2200.0);

        // cement and sand untouched by wastage
        assert_eq!(
            wasted.requirement("Cement").unwrap().required_qty,
            base.requirement("Cement").unwrap().required_qty
        );
        assert_eq!(
            wasted.requirement("Sand").unwrap().required_qty,
            base.requirement("Sand").unwrap().required_qty
        );
    }

    #[test]
    fn test_civil_half_brick_wall() {
        let takeoff = compute(&civil_input(10.0, 8.0, WallThickness::FourAndHalfInch, 0.0)).unwrap();
        // single wythe: 80/0.08 = 1000
        assert_eq!(takeoff.requirement("Bricks").unwrap().required_qty, 1000.0);
        // mortar = 80 x 0.375 = 30 ft³ -> cement 6 ft³ -> 4.8 -> 5 bags, sand 24 ft³
        assert_eq!(takeoff.requirement("Cement").unwrap().required_qty, 5.0);
        assert_eq!(takeoff.requirement("Sand").unwrap().required_qty, 24.0);
    }

    fn gypsum_input(layering: Layering) -> PartitionInput {
        PartitionInput {
            wall_type: Some(WallType::Gypsum),
            length_ft: Some(10.0),
            height_ft: Some(8.0),
            layering,
            ..Default::default()
        }
    }

    #[test]
    fn test_gypsum_single_layer() {
        let takeoff = compute(&gypsum_input(Layering::Single)).unwrap();

        // boards = (80 x 2 x 1) / 24 = 6.67
        assert!((takeoff.quantity("Gypsum Boards").unwrap() - 80.0 * 2.0 / 24.0).abs() < 1e-9);
        // rockwool = 80 / 70 = 1.14 (single face)
        assert!((takeoff.quantity("Rockwool Sheets").unwrap() - 80.0 / 70.0).abs() < 1e-9);
        // tracks: 10 / 4.5 pieces each
        assert!((takeoff.quantity("Floor Channel").unwrap() - 10.0 / 4.5).abs() < 1e-9);
        // studs = (10/2 + 1) x 2 = 12
        assert_eq!(takeoff.quantity("Studs").unwrap(), 12.0);
        // screws = boards x 40
        assert!(
            (takeoff.quantity("Screws").unwrap() - takeoff.quantity("Gypsum Boards").unwrap() * 40.0)
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn test_gypsum_doubling_law() {
        let single = compute(&gypsum_input(Layering::Single)).unwrap();
        let double = compute(&gypsum_input(Layering::Double)).unwrap();

        for category in ["Gypsum Boards", "Joint Tape", "Joint Compound", "Screws"] {
            assert!(
                (double.quantity(category).unwrap() - 2.0 * single.quantity(category).unwrap())
                    .abs()
                    < 1e-9,
                "doubling failed for {category}"
            );
        }
        // insulation and framing do not double
        assert_eq!(
            double.quantity("Rockwool Sheets").unwrap(),
            single.quantity("Rockwool Sheets").unwrap()
        );
        assert_eq!(double.quantity("Studs").unwrap(), single.quantity("Studs").unwrap());
    }

    #[test]
    fn test_plywood_channels() {
        let input = PartitionInput {
            wall_type: Some(WallType::Plywood),
            length_ft: Some(10.0),
            height_ft: Some(8.0),
            ..Default::default()
        };
        let takeoff = compute(&input).unwrap();

        // boards = (80 x 2) / 32 = 5
        assert_eq!(takeoff.quantity("Plywood Boards").unwrap(), 5.0);
        // channels = (10x2)/10 + (10/2+1) x (8/10) = 2 + 4.8 = 6.8
        assert!((takeoff.quantity("Aluminium Channels").unwrap() - 6.8).abs() < 1e-9);
        // laminate tracks board count
        assert_eq!(takeoff.quantity("Laminate Sheets").unwrap(), 5.0);
    }

    #[test]
    fn test_glazed_strip_reduces_boarding() {
        let input = PartitionInput {
            wall_type: Some(WallType::GypsumGlass),
            length_ft: Some(10.0),
            height_ft: Some(8.0),
            glass_height_ft: Some(3.0),
            ..Default::default()
        };
        let takeoff = compute(&input).unwrap();

        // boarded area = (8-3) x 10 = 50 ft², boards = 50x2/24
        assert_eq!(takeoff.area_sqft, 50.0);
        assert!((takeoff.quantity("Gypsum Boards").unwrap() - 100.0 / 24.0).abs() < 1e-9);

        // glass channels = 2x(3/10) + 2x(10/10) = 2.6
        assert!((takeoff.quantity("Glass Channels").unwrap() - 2.6).abs() < 1e-9);

        // glass area = 3 x 10 (glass length defaults to wall length)
        assert_eq!(takeoff.glass_area_sqft, 30.0);
    }

    #[test]
    fn test_glazing_doubles_boards_not_glass() {
        let mut input = PartitionInput {
            wall_type: Some(WallType::PlywoodGlass),
            length_ft: Some(12.0),
            height_ft: Some(9.0),
            glass_height_ft: Some(3.0),
            glass_length_ft: Some(10.0),
            ..Default::default()
        };
        let single = compute(&input).unwrap();
        input.glazing = Glazing::Double;
        let double = compute(&input).unwrap();

        assert!(
            (double.quantity("Plywood Boards").unwrap()
                - 2.0 * single.quantity("Plywood Boards").unwrap())
            .abs()
                < 1e-9
        );
        // glass area and laminate unchanged by glazing
        assert_eq!(double.glass_area_sqft, single.glass_area_sqft);
        assert_eq!(double.glass_area_sqft, 30.0);
        assert_eq!(
            double.quantity("Laminate Sheets").unwrap(),
            single.quantity("Laminate Sheets").unwrap()
        );
        // insulation covers the boarded faces once, regardless of glazing
        assert_eq!(
            double.quantity("Rockwool Bags").unwrap(),
            single.quantity("Rockwool Bags").unwrap()
        );
    }

    #[test]
    fn test_glazing_does_not_double_finishing() {
        let mut input = PartitionInput {
            wall_type: Some(WallType::GypsumGlass),
            length_ft: Some(10.0),
            height_ft: Some(8.0),
            glass_height_ft: Some(3.0),
            ..Default::default()
        };
        let single = compute(&input).unwrap();
        input.glazing = Glazing::Double;
        let double = compute(&input).unwrap();

        assert!(
            (double.quantity("Gypsum Boards").unwrap()
                - 2.0 * single.quantity("Gypsum Boards").unwrap())
            .abs()
                < 1e-9
        );
        // rockwool, tape and compound track the boarded face area (50 x 2),
        // which Double Glazing leaves unchanged
        for category in ["Rockwool Bags", "Joint Tape", "Joint Compound"] {
            assert_eq!(
                double.quantity(category).unwrap(),
                single.quantity(category).unwrap(),
                "glazing must not scale {category}"
            );
        }
        assert!((single.quantity("Rockwool Bags").unwrap() - 100.0 / 70.0).abs() < 1e-9);
        assert!((single.quantity("Joint Tape").unwrap() - 100.0 / 216.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_glass_height_contributes_zero() {
        // No glass height yet: boarding covers the full wall, glass terms are zero
        let input = PartitionInput {
            wall_type: Some(WallType::GypsumGlass),
            length_ft: Some(10.0),
            height_ft: Some(8.0),
            ..Default::default()
        };
        let takeoff = compute(&input).unwrap();
        assert_eq!(takeoff.area_sqft, 80.0);
        assert_eq!(takeoff.glass_area_sqft, 0.0);
        assert_eq!(takeoff.requirement("Glass").unwrap().required_qty, 0.0);
    }

    #[test]
    fn test_hybrid_wall() {
        let input = PartitionInput {
            wall_type: Some(WallType::GypsumPlywood),
            length_ft: Some(10.0),
            height_ft: Some(8.0),
            layering: Layering::Double,
            ..Default::default()
        };
        let takeoff = compute(&input).unwrap();

        // both sides double together under the shared flag
        assert!((takeoff.quantity("Gypsum Boards").unwrap() - 80.0 / 24.0 * 2.0).abs() < 1e-9);
        assert!((takeoff.quantity("Plywood Boards").unwrap() - 80.0 / 32.0 * 2.0).abs() < 1e-9);
        // laminate stays single-coverage
        assert_eq!(takeoff.quantity("Laminate Sheets").unwrap(), 2.5);
        // channel run = length x 1.2
        assert_eq!(takeoff.quantity("Aluminium Channels").unwrap(), 12.0);
        // flat one roll of tape
        assert_eq!(takeoff.quantity("Joint Tape").unwrap(), 1.0);
    }

    #[test]
    fn test_incomplete_input_is_empty_not_error() {
        let takeoff = compute(&PartitionInput::default()).unwrap();
        assert!(takeoff.is_empty());
        assert!(takeoff.lines.is_empty());

        let takeoff = compute(&PartitionInput {
            wall_type: Some(WallType::Civil),
            length_ft: Some(10.0),
            ..Default::default()
        })
        .unwrap();
        assert!(takeoff.is_empty());
    }

    #[test]
    fn test_invalid_dimension_rejected() {
        let result = compute(&civil_input(-10.0, 8.0, WallThickness::NineInch, 0.0));
        assert!(matches!(result, Err(EstimateError::InvalidInput { .. })));

        let result = compute(&civil_input(10.0, 8.0, WallThickness::NineInch, 35.0));
        assert!(matches!(result, Err(EstimateError::InvalidInput { .. })));
    }

    #[test]
    fn test_monotonic_in_dimensions() {
        let small = compute(&civil_input(10.0, 8.0, WallThickness::NineInch, 5.0)).unwrap();
        let large = compute(&civil_input(14.0, 8.0, WallThickness::NineInch, 5.0)).unwrap();

        for line in &small.lines {
            let s = small.requirement(&line.category).unwrap().required_qty;
            let l = large.requirement(&line.category).unwrap().required_qty;
            assert!(l >= s, "requirement {} decreased with length", line.category);
        }
    }

    #[test]
    fn test_idempotent() {
        let input = gypsum_input(Layering::Double);
        let a = compute(&input).unwrap();
        let b = compute(&input).unwrap();
        assert_eq!(a.lines, b.lines);
    }

    #[test]
    fn test_flexible_parsing_defaults() {
        assert_eq!(WallThickness::from_str_flexible("4.5 inch"), WallThickness::FourAndHalfInch);
        assert_eq!(WallThickness::from_str_flexible("something else"), WallThickness::NineInch);
        assert_eq!(Layering::from_str_flexible("Double Layer"), Layering::Double);
        assert_eq!(Layering::from_str_flexible("???"), Layering::Single);
        assert_eq!(Glazing::from_str_flexible("double glazing"), Glazing::Double);
    }
}
