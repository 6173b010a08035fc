//! # Takeoff Calculations
//!
//! One module per reinforcement category, each following the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, ctx) -> Result<*Result, TakeoffError>` - Pure function
//!
//! [`BarItem`] is the closed variant over the four categories; the caller
//! picks a variant once when the requirement is created and every later
//! recomputation dispatches on the tag - there is no string matching on
//! mode names anywhere.
//!
//! ## Available Calculations
//!
//! - [`straight_bar`] - Main bars (beams/columns)
//! - [`slab_bar`] - Distributed slab/wall bars (count from spacing)
//! - [`stirrup`] - Closed ties with spacing-zone allocation
//! - [`spiral`] - Helical ties for circular piles
//! - [`stock`] - Stock-length splitting shared by the linear/helical bars
//! - [`hooks`] - End-hook allowances

pub mod hooks;
pub mod slab_bar;
pub mod spiral;
pub mod stirrup;
pub mod stock;
pub mod straight_bar;

use serde::{Deserialize, Serialize};

use crate::errors::TakeoffResult;
use crate::materials::{BarSize, LapLengthTable};
use crate::summary::LineResult;
use crate::takeoff::TakeoffSettings;

// Re-export commonly used types
pub use hooks::{hook_length, HookType};
pub use slab_bar::{slab_bar_count, SlabBarInput};
pub use spiral::{spiral_length, SpiralGeometry, SpiralInput, SpiralResult};
pub use stirrup::{
    seismic_hook_allowance, stirrup_count, stirrup_perimeter, SpacingRegime, StirrupInput,
    StirrupLayout, StirrupResult,
};
pub use stock::{cut_pieces, merged_length_with_splices, split_to_stock, CutPiece};
pub use straight_bar::{required_straight_length, StraightBarInput, StraightBarResult};

/// Everything a calculation needs besides its own input: the takeoff's
/// scalar configuration and the lap-length table, both by reference.
#[derive(Debug, Clone, Copy)]
pub struct ComputeContext<'a> {
    /// Material strengths, stock length, unit price
    pub settings: &'a TakeoffSettings,

    /// Lap/development length reference data
    pub lap_table: &'a LapLengthTable,
}

impl<'a> ComputeContext<'a> {
    /// Bundle settings and table into a context
    pub fn new(settings: &'a TakeoffSettings, lap_table: &'a LapLengthTable) -> Self {
        ComputeContext {
            settings,
            lap_table,
        }
    }
}

/// Enum wrapper for all requirement categories.
///
/// Allows storing heterogeneous requirements in a single collection while
/// keeping dispatch closed and serialization clean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BarItem {
    /// Main bar (beam/column)
    Straight(StraightBarInput),
    /// Distributed slab/wall bar
    Slab(SlabBarInput),
    /// Closed tie
    Stirrup(StirrupInput),
    /// Helical tie
    Spiral(SpiralInput),
}

impl BarItem {
    /// Get the user-provided label for this requirement
    pub fn label(&self) -> &str {
        match self {
            BarItem::Straight(i) => &i.label,
            BarItem::Slab(i) => &i.label,
            BarItem::Stirrup(i) => &i.label,
            BarItem::Spiral(i) => &i.label,
        }
    }

    /// Get the bar size of this requirement
    pub fn bar_size(&self) -> BarSize {
        match self {
            BarItem::Straight(i) => i.size,
            BarItem::Slab(i) => i.size,
            BarItem::Stirrup(i) => i.size,
            BarItem::Spiral(i) => i.size,
        }
    }

    /// Get the category as a string
    pub fn item_type(&self) -> &'static str {
        match self {
            BarItem::Straight(_) => "Straight bar",
            BarItem::Slab(_) => "Slab bar",
            BarItem::Stirrup(_) => "Stirrup",
            BarItem::Spiral(_) => "Spiral",
        }
    }

    /// Compute the priced detail line for this requirement.
    pub fn compute_line(&self, ctx: &ComputeContext) -> TakeoffResult<LineResult> {
        match self {
            BarItem::Straight(input) => {
                let r = straight_bar::calculate(input, ctx)?;
                let note = splice_note(&input.label, r.splice_count, Some(r.lap_length_cm));
                Ok(LineResult::new(
                    input.size,
                    format!("L={}", input.clear_length_cm),
                    r.unit_length_cm,
                    r.count,
                    note,
                ))
            }
            BarItem::Slab(input) => {
                let r = slab_bar::calculate(input, ctx)?;
                let note = splice_note(&input.label, r.splice_count, Some(r.lap_length_cm));
                Ok(LineResult::new(
                    input.size,
                    format!("L={}", input.clear_length_cm),
                    r.unit_length_cm,
                    r.count,
                    note,
                ))
            }
            BarItem::Stirrup(input) => {
                let r = stirrup::calculate(input, ctx)?;
                let mut note = input.label.clone();
                if r.regime == Some(SpacingRegime::Uniform) {
                    note.push_str(" (uniform spacing)");
                }
                Ok(LineResult::new(
                    input.size,
                    format!("{}x{} tie", input.width_cm, input.height_cm),
                    r.unit_length_cm,
                    r.count,
                    note,
                ))
            }
            BarItem::Spiral(input) => {
                let r = spiral::calculate(input, ctx)?;
                let note = splice_note(&input.label, r.splice_count, None);
                Ok(LineResult::new(
                    input.size,
                    format!("spiral D={}", input.diameter_cm),
                    r.unit_length_cm,
                    r.count,
                    note,
                ))
            }
        }
    }

    /// Enumerate the physically cuttable pieces of one bar of this
    /// requirement. Linear and helical bars run through the stock
    /// splitter; a stirrup is bent from a single piece.
    pub fn cutting_list(&self, ctx: &ComputeContext) -> TakeoffResult<Vec<CutPiece>> {
        let stock = ctx.settings.stock_length_cm;
        match self {
            BarItem::Straight(input) => {
                let r = straight_bar::calculate(input, ctx)?;
                cut_pieces(r.bar_length_cm, stock, r.lap_length_cm)
            }
            BarItem::Slab(input) => {
                let r = slab_bar::calculate(input, ctx)?;
                cut_pieces(r.bar_length_cm, stock, r.lap_length_cm)
            }
            BarItem::Stirrup(input) => {
                let r = stirrup::calculate(input, ctx)?;
                Ok(vec![CutPiece {
                    length_cm: r.unit_length_cm,
                    part: 1,
                    of: 1,
                    is_stock_length: (r.unit_length_cm - stock).abs() < f64::EPSILON,
                }])
            }
            BarItem::Spiral(input) => {
                let r = spiral::calculate(input, ctx)?;
                cut_pieces(r.geometry.total_length_cm, stock, r.lap_length_cm)
            }
        }
    }
}

/// Append the splice remark the detail table shows next to the label.
fn splice_note(label: &str, splice_count: u32, lap_length_cm: Option<f64>) -> String {
    if splice_count == 0 {
        return label.to_string();
    }
    match lap_length_cm {
        Some(lap) => format!("{label} (splices: {splice_count}, lap {lap:.0} cm)"),
        None => format!("{label} (splices: {splice_count})"),
    }
}
