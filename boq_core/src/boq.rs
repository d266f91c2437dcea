//! # Bill of Quantities Assembler
//!
//! Takes the flat list of selected line items and partitions it into fixed
//! category buckets, computing per-bucket subtotals, a material cost, an
//! additional-charges cost and the grand total. Grouping is a pure partition
//! by type membership; an item matching no bucket is dropped from the bill.
//!
//! ## Example
//!
//! ```rust
//! use boq_core::boq::{assemble, civil_categories, BoqLineItem};
//!
//! let items = vec![
//!     BoqLineItem::material("Red Clay Brick", 2000.0, "pcs", 8.5, "BuildMart"),
//!     BoqLineItem::charge("Transport", 1500.0),
//! ];
//! let boq = assemble(&items, &civil_categories());
//! assert_eq!(boq.grand_total, 2000.0 * 8.5 + 1500.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::SelectedMaterial;

/// Non-material charge types, shared by every assembly family
pub const ADDITIONAL_CHARGE_TYPES: [&str; 4] =
    ["Hardware", "Loading & Unloading", "Transport", "Labour Charges"];

/// Name reserved for the charges bucket in every category scheme
pub const CHARGES_CATEGORY: &str = "Additional Charges";

/// One priced line on the bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoqLineItem {
    /// Concrete material or charge type
    pub material_type: String,

    /// Quantity bought
    pub quantity: f64,

    /// Commercial unit label
    pub unit: String,

    /// Rate per unit (INR)
    pub rate: f64,

    /// Supplying shop, empty for charges and list-rate items
    pub shop_name: String,
}

impl BoqLineItem {
    pub fn material(
        material_type: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        rate: f64,
        shop_name: impl Into<String>,
    ) -> Self {
        BoqLineItem {
            material_type: material_type.into(),
            quantity,
            unit: unit.into(),
            rate,
            shop_name: shop_name.into(),
        }
    }

    /// A lump-sum additional charge (quantity 1)
    pub fn charge(charge_type: impl Into<String>, amount: f64) -> Self {
        BoqLineItem {
            material_type: charge_type.into(),
            quantity: 1.0,
            unit: "lot".to_string(),
            rate: amount,
            shop_name: String::new(),
        }
    }

    /// Line total (quantity x rate)
    pub fn amount(&self) -> f64 {
        self.quantity * self.rate
    }
}

impl From<&SelectedMaterial> for BoqLineItem {
    fn from(selection: &SelectedMaterial) -> Self {
        BoqLineItem {
            material_type: selection.material_type.clone(),
            quantity: selection.quantity,
            unit: selection.unit.label().to_string(),
            rate: selection.rate,
            shop_name: selection.shop_name.clone(),
        }
    }
}

/// One fixed bucket of the bill, defined by the material types it owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDef {
    /// Bucket heading (e.g. "Bricks")
    pub name: String,

    /// Material types that land in this bucket
    pub member_types: Vec<String>,
}

impl CategoryDef {
    pub fn new(name: &str, member_types: &[&str]) -> Self {
        CategoryDef {
            name: name.to_string(),
            member_types: member_types.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn contains(&self, material_type: &str) -> bool {
        self.member_types.iter().any(|t| t == material_type)
    }

    /// Whether this bucket holds non-material charges
    pub fn is_charges(&self) -> bool {
        self.name == CHARGES_CATEGORY
    }
}

/// One populated bucket with its subtotal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoqGroup {
    pub category: String,
    pub items: Vec<BoqLineItem>,
    pub subtotal: f64,
}

/// The assembled bill: grouped items plus the three totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boq {
    /// Populated buckets, in category scheme order (empty buckets omitted)
    pub groups: Vec<BoqGroup>,

    /// Sum over material buckets
    pub material_cost: f64,

    /// Sum over the additional-charges bucket
    pub charges_cost: f64,

    /// material_cost + charges_cost
    pub grand_total: f64,
}

impl Boq {
    pub fn group(&self, category: &str) -> Option<&BoqGroup> {
        self.groups.iter().find(|g| g.category == category)
    }

    /// Total count of billed line items
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }
}

/// Sum of quantity x rate over a set of line items.
///
/// Pure and order-independent; additional charges are ordinary line items
/// with no special casing here.
pub fn total_cost(items: &[BoqLineItem]) -> f64 {
    items.iter().map(BoqLineItem::amount).sum()
}

/// Partition line items into the given category scheme and total them.
///
/// Every item lands in the first bucket whose member list names its type;
/// items matching no bucket are dropped from the bill without error.
pub fn assemble(items: &[BoqLineItem], categories: &[CategoryDef]) -> Boq {
    let mut groups: Vec<BoqGroup> = Vec::new();
    let mut material_cost = 0.0;
    let mut charges_cost = 0.0;
    let mut consumed = vec![false; items.len()];

    for category in categories {
        let mut bucket: Vec<BoqLineItem> = Vec::new();
        for (i, item) in items.iter().enumerate() {
            if !consumed[i] && category.contains(&item.material_type) {
                consumed[i] = true;
                bucket.push(item.clone());
            }
        }
        if bucket.is_empty() {
            continue;
        }
        let subtotal = total_cost(&bucket);
        if category.is_charges() {
            charges_cost += subtotal;
        } else {
            material_cost += subtotal;
        }
        groups.push(BoqGroup {
            category: category.name.clone(),
            items: bucket,
            subtotal,
        });
    }

    Boq {
        groups,
        material_cost,
        charges_cost,
        grand_total: material_cost + charges_cost,
    }
}

/// Category scheme for civil brick walls
pub fn civil_categories() -> Vec<CategoryDef> {
    vec![
        CategoryDef::new("Bricks", &["Red Clay Brick", "Fly Ash Brick", "Argon Block", "Solid Block"]),
        CategoryDef::new("Cement", &["Ordinary Portland Cement", "Pozzolana Cement", "White Cement"]),
        CategoryDef::new("Sand", &["River Sand", "M-Sand"]),
        CategoryDef::new(CHARGES_CATEGORY, &ADDITIONAL_CHARGE_TYPES),
    ]
}

/// Category scheme for door schedules
pub fn door_categories() -> Vec<CategoryDef> {
    vec![
        CategoryDef::new("Frame", &["Door Frame - Wooden", "Frame Screws", "Wall Plugs / Anchors"]),
        CategoryDef::new(
            "Door Panel",
            &[
                "Flush Door - BWR",
                "Flush Door - BWR (With VP)",
                "Vision Panel Glass",
                "WPC Door - Solid",
                "WPC Door - Hollow",
                "Wooden Door - Teak",
                "Wooden Door - Sal",
                "Glass - Toughened 10mm",
                "Glass - Toughened 12mm",
                "Glass - Toughened 12mm (DGU)",
                "Aluminium Stile Frame",
            ],
        ),
        CategoryDef::new(
            "Hardware",
            &[
                "Hinges - SS (Pair)",
                "Hinges - Brass (Pair)",
                "Mortise Lock - Standard",
                "Door Handle - Standard",
                "Glass Door Lock",
                "Glass Door Handle - Standard",
                "Patch Fitting - Standard",
                "Floor Spring - Standard",
                "Header Rail",
                "Side Rail",
                "Door Stopper - Floor Mount",
                "Door Screws",
            ],
        ),
        CategoryDef::new(CHARGES_CATEGORY, &ADDITIONAL_CHARGE_TYPES),
    ]
}

/// Category scheme for false ceilings
pub fn ceiling_categories() -> Vec<CategoryDef> {
    vec![
        CategoryDef::new(
            "Panels",
            &["Gypsum Ceiling Boards", "POP Ceiling Boards", "Ceiling Tiles", "Metal Ceiling Panels"],
        ),
        CategoryDef::new(
            "Framework",
            &[
                "Main Runner Channels",
                "Cross Tees / Secondary Channels",
                "Wall Angles / Perimeter Channels",
                "Suspension Channels",
                "Furring Channels",
                "Ceiling Track Channels",
                "Ceiling Hangers",
            ],
        ),
        CategoryDef::new(
            "Finishing",
            &["Ceiling Screws", "Joint Tape", "Joint Compound"],
        ),
        CategoryDef::new(CHARGES_CATEGORY, &ADDITIONAL_CHARGE_TYPES),
    ]
}
