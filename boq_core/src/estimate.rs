//! # Estimate Data Structures
//!
//! The `Estimate` struct is the root container for an estimation job.
//! Estimates serialize to `.boq` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Estimate
//! ├── meta: EstimateMetadata (version, estimator, job info, timestamps)
//! ├── settings: EstimateSettings (currency, default wastage)
//! └── entries: HashMap<Uuid, EstimateEntry> (assemblies + their selections)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use boq_core::estimate::Estimate;
//!
//! let mut estimate = Estimate::new("R. Sharma", "FO-2108", "Horizon Interiors");
//!
//! // Serialize to JSON
//! let json = serde_json::to_string_pretty(&estimate).unwrap();
//!
//! // Save to file (see file_io module for atomic saves)
//! std::fs::write("site.boq", &json).unwrap();
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assemblies::AssemblyInput;
use crate::catalog::SelectionSet;
use crate::errors::{EstimateError, EstimateResult};

/// Current schema version for .boq files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// One assembly in an estimate together with its material selections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateEntry {
    /// Assembly geometry and configuration
    pub assembly: AssemblyInput,

    /// Active material selections for this assembly
    #[serde(default)]
    pub selections: SelectionSet,
}

impl EstimateEntry {
    pub fn new(assembly: AssemblyInput) -> Self {
        EstimateEntry {
            assembly,
            selections: SelectionSet::new(),
        }
    }
}

/// Root estimate container.
///
/// This is the top-level struct that gets serialized to `.boq` files.
/// Entries are stored in a flat UUID-keyed map for O(1) lookups and stable
/// references across reordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estimate {
    /// Estimate metadata (version, estimator, job info)
    pub meta: EstimateMetadata,

    /// Job-wide settings (currency, default wastage)
    pub settings: EstimateSettings,

    /// All assembly entries, keyed by UUID
    pub entries: HashMap<Uuid, EstimateEntry>,
}

impl Estimate {
    /// Create a new empty estimate.
    ///
    /// # Arguments
    ///
    /// * `estimator` - Name of the responsible estimator
    /// * `job_id` - Job number (e.g. "FO-2108")
    /// * `client` - Client name
    pub fn new(
        estimator: impl Into<String>,
        job_id: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Estimate {
            meta: EstimateMetadata {
                version: SCHEMA_VERSION.to_string(),
                estimator: estimator.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: EstimateSettings::default(),
            entries: HashMap::new(),
        }
    }

    /// Add an assembly entry. Returns the UUID assigned to it.
    pub fn add_entry(&mut self, assembly: AssemblyInput) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.insert(id, EstimateEntry::new(assembly));
        self.touch();
        id
    }

    /// Remove an entry by UUID. Returns the removed entry if it existed.
    pub fn remove_entry(&mut self, id: &Uuid) -> Option<EstimateEntry> {
        let entry = self.entries.remove(id);
        if entry.is_some() {
            self.touch();
        }
        entry
    }

    pub fn get_entry(&self, id: &Uuid) -> Option<&EstimateEntry> {
        self.entries.get(id)
    }

    /// Mutable access to an entry. Marks the estimate modified when found.
    pub fn get_entry_mut(&mut self, id: &Uuid) -> Option<&mut EstimateEntry> {
        if self.entries.contains_key(id) {
            self.meta.modified = Utc::now();
            self.entries.get_mut(id)
        } else {
            None
        }
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl Default for Estimate {
    fn default() -> Self {
        Estimate::new("", "", "")
    }
}

/// Estimate metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible estimator
    pub estimator: String,

    /// Job number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the estimate was created
    pub created: DateTime<Utc>,

    /// When the estimate was last modified
    pub modified: DateTime<Utc>,
}

impl EstimateMetadata {
    /// Check that this file's schema version can be read by the running
    /// build.
    ///
    /// The major number must match. While the schema is pre-1.0, a file
    /// written by a newer minor is refused as well since minor bumps may
    /// still change the format.
    pub fn check_version(&self) -> EstimateResult<()> {
        let mismatch = || EstimateError::VersionMismatch {
            file_version: self.version.clone(),
            expected_version: SCHEMA_VERSION.to_string(),
        };

        let (file_major, file_minor) = parse_version(&self.version).ok_or_else(mismatch)?;
        let (our_major, our_minor) = parse_version(SCHEMA_VERSION).ok_or_else(mismatch)?;

        if file_major != our_major {
            return Err(mismatch());
        }
        if our_major == 0 && file_minor > our_minor {
            return Err(mismatch());
        }
        Ok(())
    }
}

/// Split a `major.minor[.patch]` string into its first two numbers
fn parse_version(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().unwrap_or("0").parse().ok()?;
    Some((major, minor))
}

/// Job-wide estimation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateSettings {
    /// Display currency code
    pub currency: String,

    /// Default brick wastage percentage for new civil walls
    pub default_brick_wastage_percent: f64,

    /// Default ceiling wastage percentage for new ceilings
    pub default_ceiling_wastage_percent: f64,
}

impl Default for EstimateSettings {
    fn default() -> Self {
        EstimateSettings {
            currency: "INR".to_string(),
            default_brick_wastage_percent: 0.0,
            default_ceiling_wastage_percent: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemblies::partition::{PartitionInput, WallType};

    fn wall() -> AssemblyInput {
        AssemblyInput::Partition(PartitionInput {
            label: "W-1".to_string(),
            wall_type: Some(WallType::Civil),
            length_ft: Some(10.0),
            height_ft: Some(8.0),
            ..Default::default()
        })
    }

    #[test]
    fn test_estimate_creation() {
        let estimate = Estimate::new("R. Sharma", "FO-2108", "Horizon Interiors");
        assert_eq!(estimate.meta.estimator, "R. Sharma");
        assert_eq!(estimate.meta.job_id, "FO-2108");
        assert_eq!(estimate.meta.version, SCHEMA_VERSION);
        assert_eq!(estimate.settings.currency, "INR");
    }

    #[test]
    fn test_estimate_serialization() {
        let mut estimate = Estimate::new("R. Sharma", "FO-2108", "Horizon Interiors");
        estimate.add_entry(wall());
        let json = serde_json::to_string_pretty(&estimate).unwrap();

        assert!(json.contains("R. Sharma"));
        assert!(json.contains("FO-2108"));
        assert!(json.contains("\"kind\": \"partition\""));

        let roundtrip: Estimate = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.estimator, "R. Sharma");
        assert_eq!(roundtrip.entry_count(), 1);
    }

    #[test]
    fn test_add_remove_entry() {
        let mut estimate = Estimate::new("Estimator", "FO-1", "Client");

        let id = estimate.add_entry(wall());
        assert_eq!(estimate.entry_count(), 1);
        assert!(estimate.get_entry(&id).is_some());
        assert_eq!(estimate.get_entry(&id).unwrap().assembly.label(), "W-1");

        let removed = estimate.remove_entry(&id);
        assert!(removed.is_some());
        assert_eq!(estimate.entry_count(), 0);
    }

    #[test]
    fn test_version_gate() {
        let mut estimate = Estimate::new("Estimator", "FO-1", "Client");
        assert!(estimate.meta.check_version().is_ok());

        // Older or equal minor within the same major is readable
        estimate.meta.version = "0.1.9".to_string();
        assert!(estimate.meta.check_version().is_ok());

        // Different major is refused
        estimate.meta.version = "1.0.0".to_string();
        assert!(estimate.meta.check_version().is_err());

        // Newer minor is refused while the schema is pre-1.0
        estimate.meta.version = "0.2.0".to_string();
        assert!(estimate.meta.check_version().is_err());

        // Garbage is refused
        estimate.meta.version = "latest".to_string();
        assert!(estimate.meta.check_version().is_err());
    }

    #[test]
    fn test_touch_advances_modified() {
        let mut estimate = Estimate::new("Estimator", "FO-1", "Client");
        let before = estimate.meta.modified;
        estimate.add_entry(wall());
        assert!(estimate.meta.modified >= before);
    }
}
