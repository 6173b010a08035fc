//! # Takeoff Container
//!
//! The `Takeoff` struct is the root container for one schedule: project
//! metadata, scalar settings (material strengths, stock length, unit
//! price), and the ordered list of requirements.
//!
//! ## Structure
//!
//! ```text
//! Takeoff
//! ├── meta: TakeoffMetadata (version, project info, timestamps)
//! ├── settings: TakeoffSettings (fy, fc, stock length, cover, price)
//! └── entries: Vec<TakeoffEntry { id: Uuid, item: BarItem }>
//! ```
//!
//! Entries keep display order but are addressed by their assigned id:
//! removing a row never invalidates the ids of the rows after it, which a
//! positional index would. Detail lines and the summary are recomputed
//! fresh from the entries on every call - the container holds inputs, not
//! cached results, and nothing is persisted beyond the process.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::{BarItem, StirrupInput, StirrupLayout};
//! use takeoff_core::materials::{standard_table, BarSize};
//! use takeoff_core::takeoff::Takeoff;
//!
//! let mut takeoff = Takeoff::new("CDC Center", "C. Fan", "Wash bay");
//! let id = takeoff.add_item(BarItem::Stirrup(StirrupInput {
//!     label: "B1 ties".to_string(),
//!     size: BarSize::No3,
//!     width_cm: 30.0,
//!     height_cm: 50.0,
//!     cover_cm: 4.0,
//!     layout: StirrupLayout::Manual { count: 20 },
//! }));
//!
//! let lines = takeoff.lines(standard_table()).unwrap();
//! assert_eq!(lines.len(), 1);
//! takeoff.remove_item(&id);
//! assert_eq!(takeoff.item_count(), 0);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{BarItem, ComputeContext};
use crate::errors::TakeoffResult;
use crate::materials::LapLengthTable;
use crate::summary::{summarize, LineResult, TakeoffSummary};

/// Current schema version for serialized takeoffs
pub const SCHEMA_VERSION: &str = "0.1.0";

/// One stored requirement with its stable identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeoffEntry {
    /// Stable id assigned at insertion
    pub id: Uuid,

    /// The requirement itself
    pub item: BarItem,
}

/// Root takeoff container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Takeoff {
    /// Project metadata
    pub meta: TakeoffMetadata,

    /// Scalar configuration shared by all entries
    pub settings: TakeoffSettings,

    /// Requirements in display order, keyed by assigned id
    pub entries: Vec<TakeoffEntry>,
}

impl Takeoff {
    /// Create a new empty takeoff.
    ///
    /// # Arguments
    ///
    /// * `project_name` - Project / site name
    /// * `contact` - Contact person
    /// * `structure_part` - Structure part the takeoff covers
    pub fn new(
        project_name: impl Into<String>,
        contact: impl Into<String>,
        structure_part: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Takeoff {
            meta: TakeoffMetadata {
                version: SCHEMA_VERSION.to_string(),
                project_name: project_name.into(),
                contact: contact.into(),
                structure_part: structure_part.into(),
                created: now,
                modified: now,
            },
            settings: TakeoffSettings::default(),
            entries: Vec::new(),
        }
    }

    /// Add a requirement. Returns the id assigned to it.
    pub fn add_item(&mut self, item: BarItem) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push(TakeoffEntry { id, item });
        self.touch();
        id
    }

    /// Remove a requirement by id. Returns the removed item if it existed.
    /// Ids of the remaining entries are unaffected.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<BarItem> {
        let position = self.entries.iter().position(|e| e.id == *id)?;
        let entry = self.entries.remove(position);
        self.touch();
        Some(entry.item)
    }

    /// Get a requirement by id.
    pub fn get_item(&self, id: &Uuid) -> Option<&BarItem> {
        self.entries.iter().find(|e| e.id == *id).map(|e| &e.item)
    }

    /// Remove all requirements.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.touch();
    }

    /// Number of stored requirements.
    pub fn item_count(&self) -> usize {
        self.entries.len()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Recompute every detail line, in entry order.
    ///
    /// A full fresh pass each call; no cached results can go stale.
    pub fn lines(&self, lap_table: &LapLengthTable) -> TakeoffResult<Vec<LineResult>> {
        let ctx = ComputeContext::new(&self.settings, lap_table);
        self.entries
            .iter()
            .map(|entry| entry.item.compute_line(&ctx))
            .collect()
    }

    /// Recompute the per-size summary at the configured unit price.
    pub fn summary(&self, lap_table: &LapLengthTable) -> TakeoffResult<TakeoffSummary> {
        let lines = self.lines(lap_table)?;
        Ok(summarize(&lines, self.settings.unit_price_per_tonne))
    }
}

impl Default for Takeoff {
    fn default() -> Self {
        Takeoff::new("", "", "")
    }
}

/// Takeoff metadata stored alongside the entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeoffMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Project / site name
    pub project_name: String,

    /// Contact person
    pub contact: String,

    /// Structure part this takeoff covers
    pub structure_part: String,

    /// When the takeoff was created
    pub created: DateTime<Utc>,

    /// When the takeoff was last modified
    pub modified: DateTime<Utc>,
}

/// Scalar configuration shared by every entry of a takeoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TakeoffSettings {
    /// Steel yield strength fy (kgf/cm²)
    pub fy_kgf_cm2: f64,

    /// Concrete compressive strength f'c (kgf/cm²)
    pub fc_kgf_cm2: f64,

    /// Stock bar length (cm)
    pub stock_length_cm: f64,

    /// Default concrete cover for new entries (cm)
    pub default_cover_cm: f64,

    /// Steel unit price per tonne
    pub unit_price_per_tonne: f64,
}

impl Default for TakeoffSettings {
    fn default() -> Self {
        TakeoffSettings {
            fy_kgf_cm2: 4200.0,
            fc_kgf_cm2: 280.0,
            stock_length_cm: 1200.0,
            default_cover_cm: 4.0,
            unit_price_per_tonne: 23000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{
        HookType, SpiralInput, StirrupInput, StirrupLayout, StraightBarInput,
    };
    use crate::materials::{standard_table, BarSize, LapSelection};

    fn sample_straight(label: &str) -> BarItem {
        BarItem::Straight(StraightBarInput {
            label: label.to_string(),
            size: BarSize::No4,
            clear_length_cm: 600.0,
            cover_cm: 4.0,
            hook_left: HookType::Deg90,
            hook_right: HookType::Flat,
            lap: LapSelection::tension(false),
            count: 2,
        })
    }

    fn sample_stirrup() -> BarItem {
        BarItem::Stirrup(StirrupInput {
            label: "ties".to_string(),
            size: BarSize::No3,
            width_cm: 30.0,
            height_cm: 50.0,
            cover_cm: 4.0,
            layout: StirrupLayout::Zoned {
                span_cm: 400.0,
                confined_spacing_cm: 10.0,
                ordinary_spacing_cm: 15.0,
            },
        })
    }

    #[test]
    fn test_add_and_count() {
        let mut takeoff = Takeoff::new("Job", "Contact", "Part");
        assert_eq!(takeoff.item_count(), 0);
        takeoff.add_item(sample_straight("B1"));
        takeoff.add_item(sample_stirrup());
        assert_eq!(takeoff.item_count(), 2);
    }

    #[test]
    fn test_ids_survive_prior_removal() {
        let mut takeoff = Takeoff::new("Job", "Contact", "Part");
        let first = takeoff.add_item(sample_straight("B1"));
        let second = takeoff.add_item(sample_straight("B2"));
        let third = takeoff.add_item(sample_stirrup());

        // Removing an earlier row must not shift later addresses.
        assert!(takeoff.remove_item(&first).is_some());
        assert_eq!(takeoff.get_item(&second).unwrap().label(), "B2");
        assert_eq!(takeoff.get_item(&third).unwrap().label(), "ties");

        // The removed id is gone for good.
        assert!(takeoff.remove_item(&first).is_none());
        assert_eq!(takeoff.item_count(), 2);
    }

    #[test]
    fn test_entries_keep_display_order() {
        let mut takeoff = Takeoff::new("Job", "Contact", "Part");
        takeoff.add_item(sample_straight("B1"));
        takeoff.add_item(sample_straight("B2"));
        let lines = takeoff.lines(standard_table()).unwrap();
        assert_eq!(lines[0].note, "B1");
        assert_eq!(lines[1].note, "B2");
    }

    #[test]
    fn test_lines_recompute_fresh() {
        let mut takeoff = Takeoff::new("Job", "Contact", "Part");
        takeoff.add_item(sample_straight("B1"));

        let a = takeoff.lines(standard_table()).unwrap();
        let b = takeoff.lines(standard_table()).unwrap();
        assert_eq!(a, b);

        // Settings changes take effect on the next pass.
        takeoff.settings.stock_length_cm = 500.0;
        let c = takeoff.lines(standard_table()).unwrap();
        assert!(c[0].unit_length_cm > a[0].unit_length_cm);
    }

    #[test]
    fn test_summary_end_to_end() {
        let mut takeoff = Takeoff::new("Job", "Contact", "Part");
        takeoff.add_item(sample_straight("B1"));
        takeoff.add_item(sample_stirrup());
        takeoff.add_item(BarItem::Spiral(SpiralInput {
            label: "P1".to_string(),
            size: BarSize::No4,
            diameter_cm: 80.0,
            pile_length_cm: 1500.0,
            pitch_cm: 15.0,
            cover_cm: 4.0,
            lap_override_cm: None,
            count: 1,
        }));

        let summary = takeoff.summary(standard_table()).unwrap();
        // #3 (stirrups) and #4 (straight + spiral) rows
        assert_eq!(summary.rows.len(), 2);
        assert_eq!(summary.rows[0].size, BarSize::No3);
        assert_eq!(summary.rows[1].size, BarSize::No4);
        assert!(summary.total_weight.value() > 0.0);
        let row_sum: f64 = summary.rows.iter().map(|r| r.cost).sum();
        assert!((summary.total_cost - row_sum).abs() < 1e-6);
    }

    #[test]
    fn test_clear() {
        let mut takeoff = Takeoff::new("Job", "Contact", "Part");
        takeoff.add_item(sample_straight("B1"));
        takeoff.clear();
        assert_eq!(takeoff.item_count(), 0);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut takeoff = Takeoff::new("Job", "Contact", "Part");
        takeoff.add_item(sample_straight("B1"));
        let json = serde_json::to_string_pretty(&takeoff).unwrap();
        let roundtrip: Takeoff = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.item_count(), 1);
        assert_eq!(roundtrip.entries[0].id, takeoff.entries[0].id);
    }
}
