//! # boq_core - Fit-out Estimation Engine
//!
//! `boq_core` is the computational heart of a construction fit-out estimator:
//! quantity takeoffs for walls, doors and false ceilings, shop-rate
//! resolution, requirement reconciliation and Bill of Quantities assembly.
//! All inputs and outputs are JSON-serializable, so a UI shell or automation
//! layer can drive the engine without bespoke bindings.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Incomplete input is not an error**: missing geometry yields an empty
//!   takeoff so a wizard can recompute on every keystroke
//!
//! ## Quick Start
//!
//! ```rust
//! use boq_core::assemblies::partition::{compute, PartitionInput, WallType};
//! use boq_core::catalog::civil_catalog;
//!
//! let wall = PartitionInput {
//!     wall_type: Some(WallType::Civil),
//!     length_ft: Some(10.0),
//!     height_ft: Some(8.0),
//!     ..Default::default()
//! };
//!
//! let takeoff = compute(&wall).unwrap();
//! for req in takeoff.requirements() {
//!     println!("{}: {} {}", req.category, req.required_qty, req.unit);
//! }
//!
//! let offer = civil_catalog().lowest_offer("Red Clay Brick").unwrap();
//! assert_eq!(offer.rate, 8.5);
//! ```
//!
//! ## Modules
//!
//! - [`assemblies`] - Quantity calculators for walls, doors and ceilings
//! - [`requirements`] - Takeoff lines and declared material requirements
//! - [`catalog`] - Shop offers, lowest-rate resolution, selections
//! - [`reconcile`] - Requirement vs. selection classification
//! - [`boq`] - Cost aggregation and Bill of Quantities grouping
//! - [`estimate`] - Estimate container, metadata, and settings
//! - [`units`] - Type-safe unit wrappers and display unit tags
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod assemblies;
pub mod boq;
pub mod catalog;
pub mod errors;
pub mod estimate;
pub mod file_io;
pub mod reconcile;
pub mod requirements;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use boq::{assemble, total_cost, Boq, BoqLineItem};
pub use catalog::{civil_catalog, Catalog, SelectedMaterial, SelectionSet, ShopOffer};
pub use errors::{EstimateError, EstimateResult};
pub use estimate::{Estimate, EstimateMetadata, EstimateSettings};
pub use file_io::{load_estimate, recover_estimate, save_estimate, FileLock};
pub use reconcile::{all_satisfied, reconcile, reconcile_all, ReconcileStatus, Reconciliation};
pub use requirements::{MaterialRequirement, TakeoffLine};
