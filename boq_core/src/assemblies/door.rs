//! # Door Takeoff
//!
//! Hardware and panel schedules for the five door families: flush, WPC,
//! glass, wooden and aluminium stile doors. Unlike wall partitions, a door
//! takeoff is mostly a fixed schedule of line items keyed on the door type
//! and its sub-option; only the frame run, glass area and hinge count depend
//! on the door dimensions.
//!
//! Doors carry their own list rates (hardware is not shop-quoted like bulk
//! civil material), so each line includes a unit rate and a line total.
//!
//! ## Example
//!
//! ```rust
//! use boq_core::assemblies::door::{compute, DoorInput, DoorType};
//!
//! let input = DoorInput {
//!     door_type: Some(DoorType::Flush),
//!     width_ft: Some(3.0),
//!     height_ft: Some(7.0),
//!     ..Default::default()
//! };
//! let takeoff = compute(&input).unwrap();
//! assert_eq!(takeoff.hinge_pairs, 3.0);
//! assert_eq!(takeoff.frame_running_feet, 20.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::units::Unit;

// ============================================================================
// Configuration Enums
// ============================================================================

/// Door family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorType {
    #[serde(rename = "flush-door")]
    Flush,
    #[serde(rename = "wpc-door")]
    Wpc,
    #[serde(rename = "glass-door")]
    Glass,
    #[serde(rename = "wooden-door")]
    Wooden,
    #[serde(rename = "stile-door")]
    Stile,
}

impl DoorType {
    pub const ALL: [DoorType; 5] = [
        DoorType::Flush,
        DoorType::Wpc,
        DoorType::Glass,
        DoorType::Wooden,
        DoorType::Stile,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            DoorType::Flush => "Flush Door",
            DoorType::Wpc => "WPC Door",
            DoorType::Glass => "Glass Door",
            DoorType::Wooden => "Wooden Door",
            DoorType::Stile => "Aluminium Stile Door",
        }
    }

    /// Glass doors take glass-specific locks/handles instead of mortise sets
    pub fn is_glazed(&self) -> bool {
        matches!(self, DoorType::Glass | DoorType::Stile)
    }

    /// Sub-options offered for this family
    pub fn sub_options(&self) -> &'static [DoorSubOption] {
        match self {
            DoorType::Flush => &[DoorSubOption::WithoutVisionPanel, DoorSubOption::WithVisionPanel],
            DoorType::Wpc => &[DoorSubOption::SolidCore, DoorSubOption::HollowCore],
            DoorType::Glass => &[DoorSubOption::Framed, DoorSubOption::Frameless],
            DoorType::Wooden => &[DoorSubOption::EngineeredWood, DoorSubOption::SolidWood],
            DoorType::Stile => &[DoorSubOption::SingleGlazing, DoorSubOption::DoubleGlazing],
        }
    }

    /// Default sub-option when none is chosen
    pub fn default_sub_option(&self) -> DoorSubOption {
        self.sub_options()[0]
    }
}

impl std::fmt::Display for DoorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Door sub-option. Each door family accepts the subset listed by
/// [`DoorType::sub_options`]; anything else falls back to the family default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorSubOption {
    #[serde(rename = "Without Vision Panel")]
    WithoutVisionPanel,
    #[serde(rename = "With Vision Panel")]
    WithVisionPanel,
    #[serde(rename = "Solid Core")]
    SolidCore,
    #[serde(rename = "Hollow Core")]
    HollowCore,
    #[serde(rename = "Framed")]
    Framed,
    #[serde(rename = "Frameless")]
    Frameless,
    #[serde(rename = "Engineered Wood")]
    EngineeredWood,
    #[serde(rename = "Solid Wood")]
    SolidWood,
    #[serde(rename = "Single Glazing")]
    SingleGlazing,
    #[serde(rename = "Double Glazing")]
    DoubleGlazing,
}

impl DoorSubOption {
    pub fn display_name(&self) -> &'static str {
        match self {
            DoorSubOption::WithoutVisionPanel => "Without Vision Panel",
            DoorSubOption::WithVisionPanel => "With Vision Panel",
            DoorSubOption::SolidCore => "Solid Core",
            DoorSubOption::HollowCore => "Hollow Core",
            DoorSubOption::Framed => "Framed",
            DoorSubOption::Frameless => "Frameless",
            DoorSubOption::EngineeredWood => "Engineered Wood",
            DoorSubOption::SolidWood => "Solid Wood",
            DoorSubOption::SingleGlazing => "Single Glazing",
            DoorSubOption::DoubleGlazing => "Double Glazing",
        }
    }
}

/// BOQ grouping for a door line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorCategory {
    Frame,
    #[serde(rename = "Door Panel")]
    Panel,
    Hardware,
}

impl DoorCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            DoorCategory::Frame => "Frame",
            DoorCategory::Panel => "Door Panel",
            DoorCategory::Hardware => "Hardware",
        }
    }
}

// ============================================================================
// Input / Takeoff
// ============================================================================

/// Input parameters for a door takeoff.
///
/// As with partitions, absent door type or dimensions yield an empty takeoff
/// rather than an error. `count` multiplies every line for identical doors.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "D-1",
///   "door_type": "flush-door",
///   "width_ft": 3.0,
///   "height_ft": 7.0,
///   "sub_option": "With Vision Panel",
///   "framed": true,
///   "count": 2
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorInput {
    /// User label for this door (e.g. "D-1", "Cabin entry")
    #[serde(default)]
    pub label: String,

    /// Door family
    pub door_type: Option<DoorType>,

    /// Leaf width in feet
    pub width_ft: Option<f64>,

    /// Leaf height in feet
    pub height_ft: Option<f64>,

    /// Family sub-option; None means the family default
    pub sub_option: Option<DoorSubOption>,

    /// Whether a wooden frame is installed (frameless glass doors skip it)
    #[serde(default = "default_framed")]
    pub framed: bool,

    /// Number of identical doors
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_framed() -> bool {
    true
}

fn default_count() -> u32 {
    1
}

impl Default for DoorInput {
    fn default() -> Self {
        DoorInput {
            label: String::new(),
            door_type: None,
            width_ft: None,
            height_ft: None,
            sub_option: None,
            framed: true,
            count: 1,
        }
    }
}

impl DoorInput {
    pub fn validate(&self) -> EstimateResult<()> {
        for (field, value) in [("width_ft", self.width_ft), ("height_ft", self.height_ft)] {
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
        if self.count == 0 {
            return Err(EstimateError::invalid_input(
                "count",
                "0",
                "Door count must be at least 1",
            ));
        }
        Ok(())
    }

    /// Effective sub-option: the chosen one if it belongs to the family,
    /// otherwise the family default
    pub fn effective_sub_option(&self) -> Option<DoorSubOption> {
        let door_type = self.door_type?;
        match self.sub_option {
            Some(opt) if door_type.sub_options().contains(&opt) => Some(opt),
            _ => Some(door_type.default_sub_option()),
        }
    }
}

/// One priced line in a door schedule.
///
/// Door lines carry whole quantities already (the schedule declares them
/// whole), so no further rounding happens downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorLine {
    /// Material description (e.g. "Hinges - SS (Pair)")
    pub material: String,

    /// Required quantity, scaled by door count
    pub quantity: f64,

    /// Commercial unit
    pub unit: Unit,

    /// List rate per unit (INR)
    pub rate: f64,

    /// BOQ grouping
    pub category: DoorCategory,
}

impl DoorLine {
    fn new(
        material: impl Into<String>,
        quantity: f64,
        unit: Unit,
        rate: f64,
        category: DoorCategory,
    ) -> Self {
        DoorLine {
            material: material.into(),
            quantity,
            unit,
            rate,
            category,
        }
    }

    /// Line total (quantity x rate)
    pub fn amount(&self) -> f64 {
        self.quantity * self.rate
    }
}

/// Computed schedule for one door entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoorTakeoff {
    /// Door type this schedule was computed for (None if inputs incomplete)
    pub door_type: Option<DoorType>,

    /// Single-leaf area (ft²)
    pub door_area_sqft: f64,

    /// Frame perimeter of one door (ft)
    pub frame_perimeter_ft: f64,

    /// Frame material for one door, whole running feet (0 when frameless)
    pub frame_running_feet: f64,

    /// Hinge pairs per door
    pub hinge_pairs: f64,

    /// Priced schedule lines, scaled by door count
    pub lines: Vec<DoorLine>,
}

impl DoorTakeoff {
    pub fn empty() -> Self {
        DoorTakeoff::default()
    }

    pub fn is_empty(&self) -> bool {
        self.door_type.is_none()
    }

    /// Sum of all line totals
    pub fn total_cost(&self) -> f64 {
        self.lines.iter().map(DoorLine::amount).sum()
    }

    /// Quantity of a material line, if present
    pub fn quantity(&self, material: &str) -> Option<f64> {
        self.lines
            .iter()
            .find(|l| l.material == material)
            .map(|l| l.quantity)
    }
}

/// Hinge pairs for a leaf height: 3 up to 7 ft, 4 up to 8 ft, 5 beyond.
pub fn hinge_pairs_for_height(height_ft: f64) -> f64 {
    if height_ft > 8.0 {
        5.0
    } else if height_ft > 7.0 {
        4.0
    } else {
        3.0
    }
}

/// Compute the priced material schedule for a door entry.
///
/// Pure function; returns an empty takeoff when door type or dimensions are
/// absent. All per-door quantities are multiplied by `count`.
pub fn compute(input: &DoorInput) -> EstimateResult<DoorTakeoff> {
    let (door_type, width, height) = match (input.door_type, input.width_ft, input.height_ft) {
        (Some(t), Some(w), Some(h)) => (t, w, h),
        _ => return Ok(DoorTakeoff::empty()),
    };
    input.validate()?;

    let sub = match input.effective_sub_option() {
        Some(s) => s,
        None => return Ok(DoorTakeoff::empty()),
    };

    let door_area = width * height;
    let frame_perimeter = 2.0 * (width + height);
    // Frame stock is bought in whole running feet
    let frame_rft = if input.framed { frame_perimeter.ceil() } else { 0.0 };
    let hinges = hinge_pairs_for_height(height);

    let mut lines: Vec<DoorLine> = Vec::new();

    if input.framed {
        lines.push(DoorLine::new(
            "Door Frame - Wooden",
            frame_rft,
            Unit::RunningFeet,
            280.0,
            DoorCategory::Frame,
        ));
        lines.push(DoorLine::new(
            "Frame Screws",
            (frame_rft * 2.0).ceil(),
            Unit::Pieces,
            2.0,
            DoorCategory::Frame,
        ));
        lines.push(DoorLine::new(
            "Wall Plugs / Anchors",
            (frame_rft * 1.5).ceil(),
            Unit::Pieces,
            5.0,
            DoorCategory::Frame,
        ));
    }

    match door_type {
        DoorType::Flush => {
            let with_vp = sub == DoorSubOption::WithVisionPanel;
            let (name, rate) = if with_vp {
                ("Flush Door - BWR (With VP)", 4500.0)
            } else {
                ("Flush Door - BWR", 3500.0)
            };
            lines.push(DoorLine::new(name, 1.0, Unit::Pieces, rate, DoorCategory::Panel));
            if with_vp {
                lines.push(DoorLine::new(
                    "Vision Panel Glass",
                    1.0,
                    Unit::SquareFeet,
                    280.0,
                    DoorCategory::Panel,
                ));
            }
            lines.push(DoorLine::new(
                "Hinges - SS (Pair)",
                hinges,
                Unit::Pairs,
                180.0,
                DoorCategory::Hardware,
            ));
        }
        DoorType::Wpc => {
            let (name, rate) = if sub == DoorSubOption::HollowCore {
                ("WPC Door - Hollow", 3800.0)
            } else {
                ("WPC Door - Solid", 5500.0)
            };
            lines.push(DoorLine::new(name, 1.0, Unit::Pieces, rate, DoorCategory::Panel));
            lines.push(DoorLine::new(
                "Hinges - SS (Pair)",
                hinges,
                Unit::Pairs,
                180.0,
                DoorCategory::Hardware,
            ));
        }
        DoorType::Glass => {
            // Frameless leaves take thicker toughened glass
            let (name, rate) = if sub == DoorSubOption::Frameless {
                ("Glass - Toughened 12mm", 420.0)
            } else {
                ("Glass - Toughened 10mm", 320.0)
            };
            lines.push(DoorLine::new(
                name,
                door_area.ceil(),
                Unit::SquareFeet,
                rate,
                DoorCategory::Panel,
            ));
            lines.push(DoorLine::new(
                "Patch Fitting - Standard",
                1.0,
                Unit::Sets,
                2800.0,
                DoorCategory::Hardware,
            ));
            lines.push(DoorLine::new(
                "Floor Spring - Standard",
                1.0,
                Unit::Pieces,
                3500.0,
                DoorCategory::Hardware,
            ));
            if sub == DoorSubOption::Framed {
                lines.push(DoorLine::new(
                    "Header Rail",
                    1.0,
                    Unit::Pieces,
                    1500.0,
                    DoorCategory::Hardware,
                ));
                lines.push(DoorLine::new(
                    "Side Rail",
                    2.0,
                    Unit::Pieces,
                    1200.0,
                    DoorCategory::Hardware,
                ));
            }
        }
        DoorType::Wooden => {
            let (name, rate) = if sub == DoorSubOption::SolidWood {
                ("Wooden Door - Teak", 18000.0)
            } else {
                ("Wooden Door - Sal", 12000.0)
            };
            lines.push(DoorLine::new(name, 1.0, Unit::Pieces, rate, DoorCategory::Panel));
            lines.push(DoorLine::new(
                "Hinges - Brass (Pair)",
                hinges,
                Unit::Pairs,
                350.0,
                DoorCategory::Hardware,
            ));
        }
        DoorType::Stile => {
            // Stile leaf splits 60% glass / 40% aluminium frame by area
            let glass_area = (door_area * 0.6).ceil();
            let frame_area = (door_area * 0.4).ceil();
            let (name, rate) = if sub == DoorSubOption::DoubleGlazing {
                ("Glass - Toughened 12mm (DGU)", 650.0)
            } else {
                ("Glass - Toughened 10mm", 320.0)
            };
            lines.push(DoorLine::new(name, glass_area, Unit::SquareFeet, rate, DoorCategory::Panel));
            lines.push(DoorLine::new(
                "Aluminium Stile Frame",
                frame_area,
                Unit::SquareFeet,
                280.0,
                DoorCategory::Panel,
            ));
            lines.push(DoorLine::new(
                "Patch Fitting - Standard",
                1.0,
                Unit::Sets,
                2800.0,
                DoorCategory::Hardware,
            ));
            lines.push(DoorLine::new(
                "Floor Spring - Standard",
                1.0,
                Unit::Pieces,
                3500.0,
                DoorCategory::Hardware,
            ));
        }
    }

    if door_type.is_glazed() {
        lines.push(DoorLine::new(
            "Glass Door Lock",
            1.0,
            Unit::Pieces,
            1200.0,
            DoorCategory::Hardware,
        ));
        lines.push(DoorLine::new(
            "Glass Door Handle - Standard",
            1.0,
            Unit::Pairs,
            850.0,
            DoorCategory::Hardware,
        ));
    } else {
        lines.push(DoorLine::new(
            "Mortise Lock - Standard",
            1.0,
            Unit::Pieces,
            650.0,
            DoorCategory::Hardware,
        ));
        lines.push(DoorLine::new(
            "Door Handle - Standard",
            1.0,
            Unit::Pieces,
            450.0,
            DoorCategory::Hardware,
        ));
    }

    lines.push(DoorLine::new(
        "Door Stopper - Floor Mount",
        1.0,
        Unit::Pieces,
        120.0,
        DoorCategory::Hardware,
    ));

    if !door_type.is_glazed() {
        lines.push(DoorLine::new(
            "Door Screws",
            hinges * 6.0,
            Unit::Pieces,
            2.0,
            DoorCategory::Hardware,
        ));
    }

    let count = input.count as f64;
    if count > 1.0 {
        for line in &mut lines {
            line.quantity *= count;
        }
    }

    Ok(DoorTakeoff {
        door_type: Some(door_type),
        door_area_sqft: door_area,
        frame_perimeter_ft: frame_perimeter,
        frame_running_feet: frame_rft,
        hinge_pairs: hinges,
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn door(door_type: DoorType, width: f64, height: f64) -> DoorInput {
        DoorInput {
            door_type: Some(door_type),
            width_ft: Some(width),
            height_ft: Some(height),
            ..Default::default()
        }
    }

    #[test]
    fn test_flush_door_schedule() {
        let takeoff = compute(&door(DoorType::Flush, 3.0, 7.0)).unwrap();

        assert_eq!(takeoff.door_area_sqft, 21.0);
        assert_eq!(takeoff.frame_perimeter_ft, 20.0);
        assert_eq!(takeoff.frame_running_feet, 20.0);
        assert_eq!(takeoff.hinge_pairs, 3.0);

        assert_eq!(takeoff.quantity("Door Frame - Wooden"), Some(20.0));
        assert_eq!(takeoff.quantity("Frame Screws"), Some(40.0));
        assert_eq!(takeoff.quantity("Wall Plugs / Anchors"), Some(30.0));
        assert_eq!(takeoff.quantity("Flush Door - BWR"), Some(1.0));
        assert_eq!(takeoff.quantity("Hinges - SS (Pair)"), Some(3.0));
        assert_eq!(takeoff.quantity("Mortise Lock - Standard"), Some(1.0));
        assert_eq!(takeoff.quantity("Door Screws"), Some(18.0));
        // no vision panel by default
        assert_eq!(takeoff.quantity("Vision Panel Glass"), None);
    }

    #[test]
    fn test_vision_panel_variant() {
        let mut input = door(DoorType::Flush, 3.0, 7.0);
        input.sub_option = Some(DoorSubOption::WithVisionPanel);
        let takeoff = compute(&input).unwrap();

        let panel = takeoff
            .lines
            .iter()
            .find(|l| l.material == "Flush Door - BWR (With VP)")
            .unwrap();
        assert_eq!(panel.rate, 4500.0);
        assert_eq!(takeoff.quantity("Vision Panel Glass"), Some(1.0));
    }

    #[test]
    fn test_hinge_pair_steps() {
        assert_eq!(hinge_pairs_for_height(6.5), 3.0);
        assert_eq!(hinge_pairs_for_height(7.0), 3.0);
        assert_eq!(hinge_pairs_for_height(7.5), 4.0);
        assert_eq!(hinge_pairs_for_height(8.0), 4.0);
        assert_eq!(hinge_pairs_for_height(8.5), 5.0);
    }

    #[test]
    fn test_frameless_glass_door() {
        let mut input = door(DoorType::Glass, 3.5, 8.0);
        input.sub_option = Some(DoorSubOption::Frameless);
        input.framed = false;
        let takeoff = compute(&input).unwrap();

        assert_eq!(takeoff.frame_running_feet, 0.0);
        assert_eq!(takeoff.quantity("Door Frame - Wooden"), None);
        // frameless takes 12mm glass, ceil(28 ft²)
        assert_eq!(takeoff.quantity("Glass - Toughened 12mm"), Some(28.0));
        assert_eq!(takeoff.quantity("Header Rail"), None);
        // glazed hardware set replaces mortise lock
        assert_eq!(takeoff.quantity("Glass Door Lock"), Some(1.0));
        assert_eq!(takeoff.quantity("Mortise Lock - Standard"), None);
        assert_eq!(takeoff.quantity("Door Screws"), None);
    }

    #[test]
    fn test_framed_glass_door_rails() {
        let takeoff = compute(&door(DoorType::Glass, 3.0, 7.0)).unwrap();
        assert_eq!(takeoff.quantity("Glass - Toughened 10mm"), Some(21.0));
        assert_eq!(takeoff.quantity("Header Rail"), Some(1.0));
        assert_eq!(takeoff.quantity("Side Rail"), Some(2.0));
    }

    #[test]
    fn test_stile_door_area_split() {
        let mut input = door(DoorType::Stile, 4.0, 8.0);
        input.sub_option = Some(DoorSubOption::DoubleGlazing);
        let takeoff = compute(&input).unwrap();

        // 32 ft²: glass 60% = 19.2 -> 20, frame 40% = 12.8 -> 13
        assert_eq!(takeoff.quantity("Glass - Toughened 12mm (DGU)"), Some(20.0));
        assert_eq!(takeoff.quantity("Aluminium Stile Frame"), Some(13.0));
        let glass = takeoff
            .lines
            .iter()
            .find(|l| l.material == "Glass - Toughened 12mm (DGU)")
            .unwrap();
        assert_eq!(glass.rate, 650.0);
    }

    #[test]
    fn test_count_scales_all_lines() {
        let mut input = door(DoorType::Wpc, 3.0, 7.0);
        input.count = 3;
        let triple = compute(&input).unwrap();
        input.count = 1;
        let single = compute(&input).unwrap();

        assert_eq!(triple.lines.len(), single.lines.len());
        for (t, s) in triple.lines.iter().zip(&single.lines) {
            assert_eq!(t.quantity, s.quantity * 3.0, "count scaling failed for {}", t.material);
        }
        assert!((triple.total_cost() - single.total_cost() * 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_mismatched_sub_option_falls_back() {
        // A WPC door with a glass sub-option resolves to Solid Core
        let mut input = door(DoorType::Wpc, 3.0, 7.0);
        input.sub_option = Some(DoorSubOption::Frameless);
        let takeoff = compute(&input).unwrap();
        assert_eq!(takeoff.quantity("WPC Door - Solid"), Some(1.0));
    }

    #[test]
    fn test_incomplete_input_is_empty() {
        assert!(compute(&DoorInput::default()).unwrap().is_empty());
        let takeoff = compute(&DoorInput {
            door_type: Some(DoorType::Flush),
            width_ft: Some(3.0),
            ..Default::default()
        })
        .unwrap();
        assert!(takeoff.is_empty());
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let mut input = door(DoorType::Flush, 0.0, 7.0);
        assert!(compute(&input).is_err());
        input = door(DoorType::Flush, 3.0, 7.0);
        input.count = 0;
        assert!(compute(&input).is_err());
    }

    #[test]
    fn test_total_cost_additive_over_lines() {
        let takeoff = compute(&door(DoorType::Wooden, 3.5, 7.5)).unwrap();
        let by_hand: f64 = takeoff.lines.iter().map(|l| l.quantity * l.rate).sum();
        assert_eq!(takeoff.total_cost(), by_hand);
    }
}
