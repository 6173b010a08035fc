//! # Stirrup (Closed Tie) Calculation
//!
//! Closed rectangular ties confining the longitudinal bars of a beam or
//! column. Two independent pieces:
//!
//! - the perimeter of one tie (core rectangle inside the cover, plus the
//!   135° seismic hook allowance), and
//! - the tie count along the member span, allocated by spacing zones:
//!   seismic detailing requires close spacing within `2h` of each support
//!   and allows a relaxed spacing mid-span.
//!
//! Stirrups are bent from a single bar and never pass through the stock
//! splitter.

use serde::{Deserialize, Serialize};

use crate::calculations::ComputeContext;
use crate::errors::{TakeoffError, TakeoffResult};
use crate::materials::BarSize;
use crate::summary::aggregate;

/// 135° seismic hook allowance (cm) for one closed tie: `max(24 db, 20)`.
///
/// Not rounded - this is a bend allowance added to the perimeter, not a
/// cut dimension. Distinct from the 90°/180° end-hook table.
pub fn seismic_hook_allowance(db_cm: f64) -> f64 {
    (24.0 * db_cm).max(20.0)
}

/// Perimeter of one closed tie (cm): twice the core rectangle plus the
/// seismic hook allowance. Width and height are the member's outside
/// dimensions; the core is measured inside the cover.
pub fn stirrup_perimeter(
    width_cm: f64,
    height_cm: f64,
    cover_cm: f64,
    db_cm: f64,
) -> TakeoffResult<f64> {
    if width_cm <= 0.0 {
        return Err(TakeoffError::invalid_input(
            "width_cm",
            width_cm.to_string(),
            "Width must be positive",
        ));
    }
    if height_cm <= 0.0 {
        return Err(TakeoffError::invalid_input(
            "height_cm",
            height_cm.to_string(),
            "Height must be positive",
        ));
    }
    let core_width = width_cm - 2.0 * cover_cm;
    let core_height = height_cm - 2.0 * cover_cm;
    Ok(2.0 * (core_width + core_height) + seismic_hook_allowance(db_cm))
}

/// Which spacing rule governed the tie count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpacingRegime {
    /// No confinement zone: one spacing over the whole span
    Uniform,
    /// The `2h` end zones overlap: confined spacing everywhere
    FullyConfined,
    /// Confined end zones with a relaxed middle zone
    ThreeZone,
}

/// Tie count along a span plus the regime that produced it.
///
/// The confined zone extends `2 * depth` from each support. Each branch
/// counts one boundary tie at the span start, hence the `+1`.
pub fn zone_plan(
    span_cm: f64,
    depth_cm: f64,
    confined_spacing_cm: f64,
    ordinary_spacing_cm: f64,
) -> TakeoffResult<(u32, SpacingRegime)> {
    if span_cm <= 0.0 {
        return Err(TakeoffError::invalid_input(
            "span_cm",
            span_cm.to_string(),
            "Span must be positive",
        ));
    }
    if ordinary_spacing_cm <= 0.0 {
        return Err(TakeoffError::invalid_input(
            "ordinary_spacing_cm",
            ordinary_spacing_cm.to_string(),
            "Ordinary spacing must be positive",
        ));
    }

    if confined_spacing_cm <= 0.0 {
        let count = (span_cm / ordinary_spacing_cm).ceil() as u32 + 1;
        return Ok((count, SpacingRegime::Uniform));
    }

    if depth_cm <= 0.0 {
        return Err(TakeoffError::invalid_input(
            "depth_cm",
            depth_cm.to_string(),
            "Depth must be positive when a confined zone exists",
        ));
    }

    let confined_zone = 2.0 * depth_cm;
    if 2.0 * confined_zone >= span_cm {
        let count = (span_cm / confined_spacing_cm).ceil() as u32 + 1;
        return Ok((count, SpacingRegime::FullyConfined));
    }

    let mid_length = span_cm - 2.0 * confined_zone;
    let end_ties = 2.0 * (confined_zone / confined_spacing_cm).ceil();
    let mid_ties = (mid_length / ordinary_spacing_cm).ceil();
    Ok((
        (end_ties + mid_ties) as u32 + 1,
        SpacingRegime::ThreeZone,
    ))
}

/// Tie count along a span (see [`zone_plan`]).
pub fn stirrup_count(
    span_cm: f64,
    depth_cm: f64,
    confined_spacing_cm: f64,
    ordinary_spacing_cm: f64,
) -> TakeoffResult<u32> {
    zone_plan(span_cm, depth_cm, confined_spacing_cm, ordinary_spacing_cm).map(|(count, _)| count)
}

/// How the tie count is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum StirrupLayout {
    /// Allocate by spacing zones along the span; the member depth (the
    /// stirrup height) sets the `2h` confined zone
    Zoned {
        span_cm: f64,
        confined_spacing_cm: f64,
        ordinary_spacing_cm: f64,
    },
    /// Caller-supplied count
    Manual { count: u32 },
}

/// Input parameters for a stirrup line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StirrupInput {
    /// User label for this line
    pub label: String,

    /// Bar size
    pub size: BarSize,

    /// Member width (cm)
    pub width_cm: f64,

    /// Member depth (cm); also the `h` in the `2h` confined-zone rule
    pub height_cm: f64,

    /// Concrete cover (cm)
    pub cover_cm: f64,

    /// Zoned or manual count
    pub layout: StirrupLayout,
}

impl StirrupInput {
    /// Validate input parameters.
    pub fn validate(&self) -> TakeoffResult<()> {
        if self.width_cm <= 0.0 {
            return Err(TakeoffError::invalid_input(
                "width_cm",
                self.width_cm.to_string(),
                "Width must be positive",
            ));
        }
        if self.height_cm <= 0.0 {
            return Err(TakeoffError::invalid_input(
                "height_cm",
                self.height_cm.to_string(),
                "Height must be positive",
            ));
        }
        if let StirrupLayout::Manual { count } = self.layout {
            if count == 0 {
                return Err(TakeoffError::invalid_input(
                    "count",
                    count.to_string(),
                    "Count must be at least 1",
                ));
            }
        }
        Ok(())
    }
}

/// Results for a stirrup line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StirrupResult {
    /// Core width inside the cover (cm)
    pub core_width_cm: f64,

    /// Core height inside the cover (cm)
    pub core_height_cm: f64,

    /// 135° hook allowance (cm)
    pub hook_allowance_cm: f64,

    /// Perimeter of one tie (cm)
    pub unit_length_cm: f64,

    /// Spacing regime that produced the count (None for a manual count)
    pub regime: Option<SpacingRegime>,

    /// Number of ties
    pub count: u32,

    /// Unit length times count (cm)
    pub total_length_cm: f64,

    /// Total steel weight (kg)
    pub total_weight_kg: f64,
}

/// Calculate a stirrup line.
///
/// Takes the context for signature uniformity with the other calculators;
/// ties consult neither the lap table nor the stock length.
pub fn calculate(input: &StirrupInput, _ctx: &ComputeContext) -> TakeoffResult<StirrupResult> {
    input.validate()?;

    let db = input.size.db_cm();
    let unit_length_cm = stirrup_perimeter(input.width_cm, input.height_cm, input.cover_cm, db)?;

    let (count, regime) = match input.layout {
        StirrupLayout::Zoned {
            span_cm,
            confined_spacing_cm,
            ordinary_spacing_cm,
        } => {
            let (count, regime) = zone_plan(
                span_cm,
                input.height_cm,
                confined_spacing_cm,
                ordinary_spacing_cm,
            )?;
            (count, Some(regime))
        }
        StirrupLayout::Manual { count } => (count, None),
    };

    let (total_length_cm, total_weight_kg) =
        aggregate(&[unit_length_cm], count, input.size.unit_weight_kg_per_m());

    Ok(StirrupResult {
        core_width_cm: input.width_cm - 2.0 * input.cover_cm,
        core_height_cm: input.height_cm - 2.0 * input.cover_cm,
        hook_allowance_cm: seismic_hook_allowance(db),
        unit_length_cm,
        regime,
        count,
        total_length_cm,
        total_weight_kg,
    })
}
