//! # Shop Catalog and Selection
//!
//! The catalog is the pricing side of the estimator: a set of
//! (material type, shop, rate, availability) offers. The resolver picks the
//! cheapest available offer per material type; the user may then override
//! quantity, rate or shop on the resulting selection without disturbing the
//! lowest-rate marker.
//!
//! ## Example
//!
//! ```rust
//! use boq_core::catalog::civil_catalog;
//!
//! let offer = civil_catalog().lowest_offer("Red Clay Brick").unwrap();
//! assert_eq!(offer.shop_name, "BuildMart");
//! assert_eq!(offer.rate, 8.5);
//! ```

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::units::Unit;

/// One shop's quote for one material type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopOffer {
    /// Concrete material type (e.g. "Red Clay Brick")
    pub material_type: String,

    /// Quoting shop
    pub shop_name: String,

    /// Rate per commercial unit (INR)
    pub rate: f64,

    /// Whether the shop can currently supply
    pub available: bool,
}

impl ShopOffer {
    pub fn new(material_type: impl Into<String>, shop_name: impl Into<String>, rate: f64, available: bool) -> Self {
        ShopOffer {
            material_type: material_type.into(),
            shop_name: shop_name.into(),
            rate,
            available,
        }
    }
}

/// Offers grouped by material type.
///
/// A BTreeMap keeps material iteration order stable for display and export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    offers: BTreeMap<String, Vec<ShopOffer>>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Add an offer to the catalog
    pub fn add(&mut self, offer: ShopOffer) {
        self.offers
            .entry(offer.material_type.clone())
            .or_default()
            .push(offer);
    }

    /// All material types carried by this catalog
    pub fn material_types(&self) -> impl Iterator<Item = &str> {
        self.offers.keys().map(String::as_str)
    }

    /// All offers for a material type (any availability)
    pub fn offers_for(&self, material_type: &str) -> &[ShopOffer] {
        self.offers
            .get(material_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the catalog carries this material type at all
    pub fn contains(&self, material_type: &str) -> bool {
        self.offers.contains_key(material_type)
    }

    /// Cheapest available offer for a material type.
    ///
    /// Ties on rate break toward the lexically smaller shop name so repeated
    /// resolution is deterministic regardless of insertion order.
    pub fn lowest_offer(&self, material_type: &str) -> EstimateResult<&ShopOffer> {
        let offers = self
            .offers
            .get(material_type)
            .ok_or_else(|| EstimateError::material_not_found(material_type))?;

        offers
            .iter()
            .filter(|o| o.available)
            .min_by(|a, b| {
                a.rate
                    .total_cmp(&b.rate)
                    .then_with(|| a.shop_name.cmp(&b.shop_name))
            })
            .ok_or_else(|| EstimateError::no_available_offer(material_type))
    }
}

/// An active selection: a material type with a pinned quantity, rate and
/// shop. Starts from the resolver's lowest offer; overrides replace fields
/// without recomputing anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedMaterial {
    /// Concrete material type
    pub material_type: String,

    /// Quantity the user intends to buy
    pub quantity: f64,

    /// Active rate per unit (INR)
    pub rate: f64,

    /// Active shop
    pub shop_name: String,

    /// Commercial unit
    pub unit: Unit,
}

impl SelectedMaterial {
    /// Line total (quantity x rate)
    pub fn amount(&self) -> f64 {
        self.quantity * self.rate
    }
}

/// The set of active selections for an estimate.
///
/// At most one selection exists per material type; selecting a type again
/// replaces its previous selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionSet {
    selections: BTreeMap<String, SelectedMaterial>,
}

impl SelectionSet {
    pub fn new() -> Self {
        SelectionSet::default()
    }

    /// Select a material type at the catalog's lowest available offer
    pub fn select_lowest(
        &mut self,
        catalog: &Catalog,
        material_type: &str,
        quantity: f64,
        unit: Unit,
    ) -> EstimateResult<&SelectedMaterial> {
        let offer = catalog.lowest_offer(material_type)?;
        let selection = SelectedMaterial {
            material_type: material_type.to_string(),
            quantity,
            rate: offer.rate,
            shop_name: offer.shop_name.clone(),
            unit,
        };
        self.selections
            .insert(material_type.to_string(), selection);
        Ok(&self.selections[material_type])
    }

    /// Replace a selection wholesale (manual shop/rate/quantity pin)
    pub fn set_override(&mut self, selection: SelectedMaterial) {
        self.selections
            .insert(selection.material_type.clone(), selection);
    }

    /// Update just the quantity of an existing selection
    pub fn set_quantity(&mut self, material_type: &str, quantity: f64) -> EstimateResult<()> {
        let selection = self
            .selections
            .get_mut(material_type)
            .ok_or_else(|| EstimateError::material_not_found(material_type))?;
        selection.quantity = quantity;
        Ok(())
    }

    /// Drop a selection
    pub fn deselect(&mut self, material_type: &str) {
        self.selections.remove(material_type);
    }

    pub fn get(&self, material_type: &str) -> Option<&SelectedMaterial> {
        self.selections.get(material_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedMaterial> {
        self.selections.values()
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Sum of all selection line totals
    pub fn total_amount(&self) -> f64 {
        self.selections.values().map(SelectedMaterial::amount).sum()
    }
}

/// Built-in civil material catalog used when no external catalog is loaded.
static CIVIL_CATALOG: Lazy<Catalog> = Lazy::new(|| {
    let seed: [(&str, &[(&str, f64, bool)]); 9] = [
        ("Red Clay Brick", &[
            ("BuildMart", 8.5, true),
            ("ConstructPro", 9.2, true),
            ("MasonHub", 8.8, true),
            ("BrickWorld", 9.5, false),
        ]),
        ("Fly Ash Brick", &[
            ("GreenBuild", 7.8, true),
            ("EcoBrick", 8.1, true),
            ("BuildMart", 8.3, true),
        ]),
        ("Argon Block", &[
            ("BlockCorp", 12.5, true),
            ("ConstructPro", 13.0, true),
        ]),
        ("Solid Block", &[
            ("BuildMart", 11.0, true),
            ("BlockCorp", 11.5, true),
            ("MasonHub", 10.8, true),
        ]),
        ("Ordinary Portland Cement", &[
            ("CementKing", 450.0, true),
            ("ConstructPro", 460.0, true),
            ("BuildMart", 455.0, true),
        ]),
        ("Pozzolana Cement", &[
            ("EcoCement", 420.0, true),
            ("CementKing", 430.0, true),
        ]),
        ("White Cement", &[
            ("PremiumCement", 650.0, true),
            ("CementKing", 680.0, true),
        ]),
        ("River Sand", &[
            ("SandSupply", 1200.0, true),
            ("BuildMart", 1250.0, true),
            ("ConstructPro", 1300.0, true),
        ]),
        ("M-Sand", &[
            ("MSandCo", 800.0, true),
            ("BuildMart", 850.0, true),
            ("SandSupply", 900.0, true),
        ]),
    ];

    let mut catalog = Catalog::new();
    for (material_type, shops) in seed {
        for (shop, rate, available) in shops {
            catalog.add(ShopOffer::new(material_type, *shop, *rate, *available));
        }
    }
    catalog
});

/// The built-in civil material catalog
pub fn civil_catalog() -> &'static Catalog {
    &CIVIL_CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_shop_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add(ShopOffer::new("Putty", "Zenith", 100.0, true));
        catalog.add(ShopOffer::new("Putty", "Apex", 100.0, true));
        catalog
    }

    #[test]
    fn test_lowest_offer_skips_unavailable() {
        // BrickWorld at 9.5 is unavailable and must never win; among the
        // available shops BuildMart at 8.5 is cheapest
        let offer = civil_catalog().lowest_offer("Red Clay Brick").unwrap();
        assert_eq!(offer.shop_name, "BuildMart");
        assert_eq!(offer.rate, 8.5);
    }

    #[test]
    fn test_lowest_offer_across_types() {
        let catalog = civil_catalog();
        assert_eq!(catalog.lowest_offer("M-Sand").unwrap().shop_name, "MSandCo");
        assert_eq!(
            catalog.lowest_offer("Solid Block").unwrap().shop_name,
            "MasonHub"
        );
        assert_eq!(
            catalog.lowest_offer("Pozzolana Cement").unwrap().rate,
            420.0
        );
    }

    #[test]
    fn test_tie_breaks_lexically() {
        let catalog = two_shop_catalog();
        assert_eq!(catalog.lowest_offer("Putty").unwrap().shop_name, "Apex");
    }

    #[test]
    fn test_unknown_and_unavailable_errors() {
        let mut catalog = Catalog::new();
        catalog.add(ShopOffer::new("Primer", "Apex", 300.0, false));

        assert!(matches!(
            catalog.lowest_offer("Putty"),
            Err(EstimateError::MaterialNotFound { .. })
        ));
        assert!(matches!(
            catalog.lowest_offer("Primer"),
            Err(EstimateError::NoAvailableOffer { .. })
        ));
    }

    #[test]
    fn test_selection_starts_at_lowest() {
        let mut selections = SelectionSet::new();
        let selection = selections
            .select_lowest(civil_catalog(), "Red Clay Brick", 2000.0, Unit::Pieces)
            .unwrap();
        assert_eq!(selection.shop_name, "BuildMart");
        assert_eq!(selection.amount(), 2000.0 * 8.5);
    }

    #[test]
    fn test_override_does_not_recompute_lowest() {
        let mut selections = SelectionSet::new();
        selections
            .select_lowest(civil_catalog(), "Red Clay Brick", 2000.0, Unit::Pieces)
            .unwrap();

        // pin a pricier shop manually
        selections.set_override(SelectedMaterial {
            material_type: "Red Clay Brick".to_string(),
            quantity: 2000.0,
            rate: 9.2,
            shop_name: "ConstructPro".to_string(),
            unit: Unit::Pieces,
        });
        assert_eq!(selections.get("Red Clay Brick").unwrap().rate, 9.2);

        // the catalog's lowest marker is untouched
        let offer = civil_catalog().lowest_offer("Red Clay Brick").unwrap();
        assert_eq!(offer.shop_name, "BuildMart");
    }

    #[test]
    fn test_one_selection_per_type() {
        let mut selections = SelectionSet::new();
        selections
            .select_lowest(civil_catalog(), "River Sand", 48.0, Unit::CubicFeet)
            .unwrap();
        selections
            .select_lowest(civil_catalog(), "River Sand", 50.0, Unit::CubicFeet)
            .unwrap();
        assert_eq!(selections.len(), 1);
        assert_eq!(selections.get("River Sand").unwrap().quantity, 50.0);
    }

    #[test]
    fn test_set_quantity() {
        let mut selections = SelectionSet::new();
        selections
            .select_lowest(civil_catalog(), "M-Sand", 10.0, Unit::CubicFeet)
            .unwrap();
        selections.set_quantity("M-Sand", 24.0).unwrap();
        assert_eq!(selections.get("M-Sand").unwrap().quantity, 24.0);
        assert!(selections.set_quantity("Putty", 1.0).is_err());
    }
}
