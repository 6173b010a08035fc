//! # Slab / Wall Bar Calculation
//!
//! Distributed bars placed at a regular spacing over a placement range.
//! Geometry is identical to a straight bar; only the count is derived:
//! one bar per spacing interval plus the starting bar.

use serde::{Deserialize, Serialize};

use crate::calculations::hooks::HookType;
use crate::calculations::straight_bar::{self, StraightBarInput, StraightBarResult};
use crate::calculations::ComputeContext;
use crate::errors::{TakeoffError, TakeoffResult};
use crate::materials::{BarSize, LapSelection};

/// Number of bars over a placement range at the given spacing:
/// `ceil(range / spacing) + 1`. A nonpositive range yields a single bar.
pub fn slab_bar_count(placement_range_cm: f64, spacing_cm: f64) -> TakeoffResult<u32> {
    if spacing_cm <= 0.0 {
        return Err(TakeoffError::invalid_input(
            "spacing_cm",
            spacing_cm.to_string(),
            "Spacing must be positive",
        ));
    }
    if placement_range_cm <= 0.0 {
        return Ok(1);
    }
    Ok((placement_range_cm / spacing_cm).ceil() as u32 + 1)
}

/// Input parameters for a slab/wall bar line.
///
/// Same geometry as [`StraightBarInput`], but the count comes from the
/// placement range and spacing instead of being given directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabBarInput {
    /// User label for this line
    pub label: String,

    /// Bar size
    pub size: BarSize,

    /// Clear length of each bar (cm)
    pub clear_length_cm: f64,

    /// Concrete cover at each end (cm)
    pub cover_cm: f64,

    /// Hook at the left end
    pub hook_left: HookType,

    /// Hook at the right end
    pub hook_right: HookType,

    /// Lap length selection for splices
    pub lap: LapSelection,

    /// Width of the zone the bars are distributed over (cm)
    pub placement_range_cm: f64,

    /// Bar spacing (cm)
    pub spacing_cm: f64,
}

impl SlabBarInput {
    /// Validate input parameters.
    pub fn validate(&self) -> TakeoffResult<()> {
        if self.clear_length_cm <= 0.0 {
            return Err(TakeoffError::invalid_input(
                "clear_length_cm",
                self.clear_length_cm.to_string(),
                "Clear length must be positive",
            ));
        }
        if self.spacing_cm <= 0.0 {
            return Err(TakeoffError::invalid_input(
                "spacing_cm",
                self.spacing_cm.to_string(),
                "Spacing must be positive",
            ));
        }
        Ok(())
    }
}

/// Calculate a slab/wall bar line: derive the count from the spacing rule,
/// then run the straight-bar calculator.
pub fn calculate(input: &SlabBarInput, ctx: &ComputeContext) -> TakeoffResult<StraightBarResult> {
    input.validate()?;
    let count = slab_bar_count(input.placement_range_cm, input.spacing_cm)?;
    let bar = StraightBarInput {
        label: input.label.clone(),
        size: input.size,
        clear_length_cm: input.clear_length_cm,
        cover_cm: input.cover_cm,
        hook_left: input.hook_left,
        hook_right: input.hook_right,
        lap: input.lap,
        count,
    };
    straight_bar::calculate(&bar, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::standard_table;
    use crate::takeoff::TakeoffSettings;

    #[test]
    fn test_count_from_spacing() {
        // 300 / 15 = 20 intervals -> 21 bars
        assert_eq!(slab_bar_count(300.0, 15.0).unwrap(), 21);
        // 295 / 15 = 19.67 -> 20 intervals -> 21 bars
        assert_eq!(slab_bar_count(295.0, 15.0).unwrap(), 21);
        // No range given -> a single bar
        assert_eq!(slab_bar_count(0.0, 15.0).unwrap(), 1);
    }

    #[test]
    fn test_nonpositive_spacing_rejected() {
        assert!(slab_bar_count(300.0, 0.0).is_err());
    }

    #[test]
    fn test_calculate_uses_derived_count() {
        let settings = TakeoffSettings::default();
        let ctx = ComputeContext::new(&settings, standard_table());
        let input = SlabBarInput {
            label: "Slab S1".to_string(),
            size: BarSize::No3,
            clear_length_cm: 400.0,
            cover_cm: 4.0,
            hook_left: HookType::Flat,
            hook_right: HookType::Flat,
            lap: LapSelection::tension(false),
            placement_range_cm: 300.0,
            spacing_cm: 15.0,
        };
        let result = calculate(&input, &ctx).unwrap();
        assert_eq!(result.count, 21);
        assert_eq!(result.unit_length_cm, 392.0);
        assert_eq!(result.total_length_cm, 392.0 * 21.0);
    }
}
