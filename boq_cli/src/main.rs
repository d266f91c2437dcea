//! # BOQ CLI Application
//!
//! Terminal wizard for the fit-out estimation engine. Walks the civil wall
//! flow end to end: dimensions, computed requirements, lowest-rate shop
//! selection, reconciliation and the final grouped Bill of Quantities.

mod wizard;

use std::io::{self, BufRead, Write};

use boq_core::assemblies::partition::{compute, PartitionInput, WallThickness, WallType};
use boq_core::boq::{assemble, civil_categories, BoqLineItem};
use boq_core::catalog::{civil_catalog, SelectionSet};
use boq_core::reconcile::{reconcile_all, Reconciliation};
use boq_core::requirements::MaterialRequirement;

use wizard::WizardStep;

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_line(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn main() {
    println!("Fit-out BOQ Estimator");
    println!("=====================");
    println!();

    let mut step = WizardStep::SelectAssembly;
    println!("[{}]", step.title());
    println!("Assembly: Civil Wall (Brick)");
    let thickness_raw = prompt_line("Wall thickness (4.5 inch / 9 inch) [9 inch]: ", "9 inch");
    let thickness = WallThickness::from_str_flexible(&thickness_raw);
    step = step.advance(&[]);

    println!();
    println!("[{}]", step.title());
    let length_ft = prompt_f64("Wall length (ft) [10.0]: ", 10.0);
    let height_ft = prompt_f64("Wall height (ft) [8.0]: ", 8.0);
    let wastage = prompt_f64("Brick wastage %, 0-20 [0]: ", 0.0);

    let input = PartitionInput {
        label: "W-1".to_string(),
        wall_type: Some(WallType::Civil),
        length_ft: Some(length_ft),
        height_ft: Some(height_ft),
        thickness,
        wastage_percent: wastage,
        ..Default::default()
    };

    let takeoff = match compute(&input) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            return;
        }
    };
    let requirements = takeoff.requirements();

    println!();
    println!("Wall area: {:.1} ft²", takeoff.area_sqft);
    println!("Required materials:");
    for req in &requirements {
        println!("  {:<12} {:>10.0} {}", req.category, req.required_qty, req.unit);
    }
    step = step.advance(&[]);

    println!();
    println!("[{}]", step.title());
    println!("Selecting cheapest available shop for each requirement...");
    let catalog = civil_catalog();
    let mut selections = SelectionSet::new();
    for req in &requirements {
        // First catalog type on each requirement's accept list is the
        // conventional default (Red Clay Brick, OPC, River Sand)
        let Some(material_type) = req.valid_types.first() else {
            continue;
        };
        match selections.select_lowest(catalog, material_type, req.required_qty, req.unit) {
            Ok(selection) => println!(
                "  {:<26} {:>10.0} {} @ ₹{:.2} ({})",
                selection.material_type,
                selection.quantity,
                selection.unit,
                selection.rate,
                selection.shop_name
            ),
            Err(e) => println!("  {:<26} -- {}", material_type, e),
        }
    }
    step = step.advance(&[]);

    println!();
    println!("[{}]", step.title());
    let reconciliations = run_reconciliation(&requirements, &selections);
    for rec in &reconciliations {
        println!("  {:<12} [{}] {}", rec.category, rec.status, rec.message);
    }
    step = step.advance(&reconciliations);
    if step != WizardStep::BillOfQuantities {
        println!();
        println!("Requirements not satisfied; adjust selections and rerun.");
        return;
    }

    println!();
    println!("[{}]", step.title());
    let mut items: Vec<BoqLineItem> = selections.iter().map(BoqLineItem::from).collect();
    let transport = prompt_f64("Transport charge (₹) [0]: ", 0.0);
    if transport > 0.0 {
        items.push(BoqLineItem::charge("Transport", transport));
    }
    let labour = prompt_f64("Labour charge (₹) [0]: ", 0.0);
    if labour > 0.0 {
        items.push(BoqLineItem::charge("Labour Charges", labour));
    }

    let boq = assemble(&items, &civil_categories());

    println!();
    println!("═══════════════════════════════════════");
    println!("  BILL OF QUANTITIES");
    println!("═══════════════════════════════════════");
    for group in &boq.groups {
        println!();
        println!("{}", group.category);
        for item in &group.items {
            println!(
                "  {:<26} {:>10.2} {:<5} @ ₹{:<10.2} ₹{:.2}",
                item.material_type,
                item.quantity,
                item.unit,
                item.rate,
                item.amount()
            );
        }
        println!("  Subtotal: ₹{:.2}", group.subtotal);
    }
    println!();
    println!("═══════════════════════════════════════");
    println!("  Material cost:      ₹{:.2}", boq.material_cost);
    println!("  Additional charges: ₹{:.2}", boq.charges_cost);
    println!("  GRAND TOTAL:        ₹{:.2}", boq.grand_total);
    println!("═══════════════════════════════════════");

    println!();
    println!("JSON Output (for export/API use):");
    if let Ok(json) = serde_json::to_string_pretty(&boq) {
        println!("{}", json);
    }
}

fn run_reconciliation(
    requirements: &[MaterialRequirement],
    selections: &SelectionSet,
) -> Vec<Reconciliation> {
    let snapshot: Vec<_> = selections.iter().collect();
    reconcile_all(requirements, &snapshot)
}
