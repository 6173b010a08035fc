//! # Straight Bar Calculation
//!
//! Main bars for beams and columns: the physical bar length is the clear
//! length minus the end covers, plus any end-hook allowances. Bars longer
//! than the stock length get lap splices added in combined-length mode.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::straight_bar::{calculate, StraightBarInput};
//! use takeoff_core::calculations::{hooks::HookType, ComputeContext};
//! use takeoff_core::materials::{standard_table, BarSize, LapSelection};
//! use takeoff_core::takeoff::TakeoffSettings;
//!
//! let input = StraightBarInput {
//!     label: "B1 bottom".to_string(),
//!     size: BarSize::No4,
//!     clear_length_cm: 600.0,
//!     cover_cm: 4.0,
//!     hook_left: HookType::Deg90,
//!     hook_right: HookType::Flat,
//!     lap: LapSelection::tension(false),
//!     count: 2,
//! };
//!
//! let settings = TakeoffSettings::default();
//! let ctx = ComputeContext::new(&settings, standard_table());
//! let result = calculate(&input, &ctx).unwrap();
//! assert_eq!(result.unit_length_cm, 608.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::hooks::{hook_length, HookType};
use crate::calculations::stock::merged_length_with_splices;
use crate::calculations::ComputeContext;
use crate::errors::{TakeoffError, TakeoffResult};
use crate::materials::{BarSize, LapSelection, LapSource};
use crate::summary::aggregate;

/// Physical length of a straight bar: clear length less both covers, plus
/// the end-hook allowances. Errors when the clear length is nonpositive;
/// a cover large enough to drive the net length negative is NOT guarded
/// here - validating cover against span is the caller's responsibility.
pub fn required_straight_length(
    clear_length_cm: f64,
    cover_cm: f64,
    hook_left_cm: f64,
    hook_right_cm: f64,
) -> TakeoffResult<f64> {
    if clear_length_cm <= 0.0 {
        return Err(TakeoffError::invalid_input(
            "clear_length_cm",
            clear_length_cm.to_string(),
            "Clear length must be positive",
        ));
    }
    let net = clear_length_cm - 2.0 * cover_cm;
    Ok(net + hook_left_cm + hook_right_cm)
}

/// Input parameters for a straight (main) bar line.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B1 bottom",
///   "size": "#4",
///   "clear_length_cm": 600.0,
///   "cover_cm": 4.0,
///   "hook_left": "Deg90",
///   "hook_right": "Flat",
///   "lap": { "mode": "Auto", "usage": "Tension", "top_bar": false },
///   "count": 2
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StraightBarInput {
    /// User label for this line (structure part, remark)
    pub label: String,

    /// Bar size
    pub size: BarSize,

    /// Clear length of the member (cm)
    pub clear_length_cm: f64,

    /// Concrete cover at each end (cm)
    pub cover_cm: f64,

    /// Hook at the left end
    pub hook_left: HookType,

    /// Hook at the right end
    pub hook_right: HookType,

    /// Lap length selection for splices
    pub lap: LapSelection,

    /// Number of identical bars
    pub count: u32,
}

impl StraightBarInput {
    /// Validate input parameters.
    pub fn validate(&self) -> TakeoffResult<()> {
        if self.clear_length_cm <= 0.0 {
            return Err(TakeoffError::invalid_input(
                "clear_length_cm",
                self.clear_length_cm.to_string(),
                "Clear length must be positive",
            ));
        }
        if self.count == 0 {
            return Err(TakeoffError::invalid_input(
                "count",
                self.count.to_string(),
                "Count must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Results for a straight bar line, with every intermediate exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StraightBarResult {
    /// Lap length used for splices (cm)
    pub lap_length_cm: f64,

    /// Where the lap length came from
    pub lap_source: LapSource,

    /// Clear length less both covers (cm)
    pub net_length_cm: f64,

    /// Left hook allowance (cm)
    pub hook_left_cm: f64,

    /// Right hook allowance (cm)
    pub hook_right_cm: f64,

    /// Net length plus hooks, before splice overlap (cm)
    pub bar_length_cm: f64,

    /// Number of lap splices (0 when the bar fits one stock length)
    pub splice_count: u32,

    /// Bar length with splice overlaps added (cm)
    pub unit_length_cm: f64,

    /// Number of identical bars
    pub count: u32,

    /// Unit length times count (cm)
    pub total_length_cm: f64,

    /// Total steel weight (kg)
    pub total_weight_kg: f64,
}

/// Calculate a straight bar line.
///
/// Pure function: resolves the lap, applies cover and hook geometry, and
/// adds splice overlap in combined-length mode when the bar exceeds the
/// stock length.
pub fn calculate(
    input: &StraightBarInput,
    ctx: &ComputeContext,
) -> TakeoffResult<StraightBarResult> {
    input.validate()?;

    let lap = input.lap.resolve(
        ctx.lap_table,
        ctx.settings.fy_kgf_cm2,
        ctx.settings.fc_kgf_cm2,
        input.size,
    )?;

    let db = input.size.db_cm();
    let hook_left_cm = hook_length(db, input.hook_left);
    let hook_right_cm = hook_length(db, input.hook_right);
    let bar_length_cm = required_straight_length(
        input.clear_length_cm,
        input.cover_cm,
        hook_left_cm,
        hook_right_cm,
    )?;

    let stock = ctx.settings.stock_length_cm;
    let (unit_length_cm, splice_count) = if bar_length_cm > stock {
        merged_length_with_splices(bar_length_cm, stock, lap.length_cm)?
    } else {
        (bar_length_cm, 0)
    };

    let (total_length_cm, total_weight_kg) = aggregate(
        &[unit_length_cm],
        input.count,
        input.size.unit_weight_kg_per_m(),
    );

    Ok(StraightBarResult {
        lap_length_cm: lap.length_cm,
        lap_source: lap.source,
        net_length_cm: input.clear_length_cm - 2.0 * input.cover_cm,
        hook_left_cm,
        hook_right_cm,
        bar_length_cm,
        splice_count,
        unit_length_cm,
        count: input.count,
        total_length_cm,
        total_weight_kg,
    })
}
