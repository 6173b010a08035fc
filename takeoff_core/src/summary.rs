//! # Line Results and Quantity Aggregation
//!
//! The priced, displayable outcome of the takeoff: one [`LineResult`] per
//! requirement, and a per-bar-size [`TakeoffSummary`] reduced over the
//! lines. Everything here is a pure reduction - results are recomputed
//! fresh on every pass, never mutated incrementally, and nothing performs
//! I/O or holds state.
//!
//! Weights come from the bar unit weight in kg per metre (kg per 100 cm),
//! so `weight = length_cm * count * unit_weight / 100`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::materials::BarSize;
use crate::units::{Kilograms, Tonnes};

/// Total length (cm) and weight (kg) for `count` identical bars made of
/// the given pieces. `unit_weight_kg_per_m` is kg per 100 cm of bar.
pub fn aggregate(
    piece_lengths_cm: &[f64],
    count: u32,
    unit_weight_kg_per_m: f64,
) -> (f64, f64) {
    let per_bar: f64 = piece_lengths_cm.iter().sum();
    let total_length_cm = per_bar * f64::from(count);
    let total_weight_kg = total_length_cm * unit_weight_kg_per_m / 100.0;
    (total_length_cm, total_weight_kg)
}

/// One displayable row of the takeoff detail table.
///
/// Lengths are rounded to 0.1 cm and weights to 0.01 kg - these are the
/// values the caller shows and exports, computed fresh each pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineResult {
    /// Bar size
    pub size: BarSize,

    /// Short shape description (e.g. "L=600", "30x50 tie", "spiral D=80")
    pub shape: String,

    /// Length of one bar, splice overlap included (cm)
    pub unit_length_cm: f64,

    /// Number of identical bars
    pub count: u32,

    /// Unit length times count (cm)
    pub total_length_cm: f64,

    /// Bar unit weight (kg/m)
    pub unit_weight_kg_per_m: f64,

    /// Total steel weight (kg)
    pub total_weight_kg: f64,

    /// Free-text note (label plus splice/spacing remarks)
    pub note: String,
}

impl LineResult {
    /// Build a line from its unit length and count, pricing through
    /// [`aggregate`] and applying the display rounding.
    pub fn new(
        size: BarSize,
        shape: impl Into<String>,
        unit_length_cm: f64,
        count: u32,
        note: impl Into<String>,
    ) -> Self {
        let unit_weight = size.unit_weight_kg_per_m();
        let (total_length_cm, total_weight_kg) =
            aggregate(&[unit_length_cm], count, unit_weight);
        LineResult {
            size,
            shape: shape.into(),
            unit_length_cm: round_tenth(unit_length_cm),
            count,
            total_length_cm: round_tenth(total_length_cm),
            unit_weight_kg_per_m: unit_weight,
            total_weight_kg: round_hundredth(total_weight_kg),
            note: note.into(),
        }
    }
}

/// Per-bar-size totals of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Bar size
    pub size: BarSize,

    /// Total weight for this size
    pub total_weight: Kilograms,

    /// Total weight in tonnes
    pub tonnage: Tonnes,

    /// Cost at the configured unit price (per tonne)
    pub cost: f64,
}

/// The summary table: one row per bar size plus grand totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeoffSummary {
    /// Rows ordered by bar size, smallest first
    pub rows: Vec<SummaryRow>,

    /// Grand total weight
    pub total_weight: Kilograms,

    /// Grand total in tonnes
    pub total_tonnage: Tonnes,

    /// Grand total cost
    pub total_cost: f64,
}

/// Reduce the detail lines into the per-size summary.
pub fn summarize(lines: &[LineResult], unit_price_per_tonne: f64) -> TakeoffSummary {
    let mut by_size: BTreeMap<BarSize, f64> = BTreeMap::new();
    for line in lines {
        *by_size.entry(line.size).or_insert(0.0) += line.total_weight_kg;
    }

    let rows: Vec<SummaryRow> = by_size
        .into_iter()
        .map(|(size, weight_kg)| {
            let tonnage = Tonnes::from(Kilograms(weight_kg));
            SummaryRow {
                size,
                total_weight: Kilograms(weight_kg),
                tonnage,
                cost: tonnage.value() * unit_price_per_tonne,
            }
        })
        .collect();

    let total_weight_kg: f64 = rows.iter().map(|r| r.total_weight.value()).sum();
    let total_tonnage = Tonnes::from(Kilograms(total_weight_kg));
    TakeoffSummary {
        total_weight: Kilograms(total_weight_kg),
        total_tonnage,
        total_cost: total_tonnage.value() * unit_price_per_tonne,
        rows,
    }
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round_hundredth(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_worked_example() {
        // Pieces of a 2500 cm #4 bar split over 1200 stock with 40 lap,
        // two identical bars: 2580 * 2 = 5160 cm, * 0.994 / 100 = 51.29 kg
        let (length, weight) = aggregate(&[1200.0, 1200.0, 180.0], 2, 0.994);
        assert_eq!(length, 5160.0);
        assert!((weight - 51.2904).abs() < 1e-9);
    }

    #[test]
    fn test_line_result_rounding() {
        let line = LineResult::new(BarSize::No4, "L=600", 608.333, 3, "B1");
        assert_eq!(line.unit_length_cm, 608.3);
        assert_eq!(line.total_length_cm, 1825.0);
        // 1824.999 * 0.994 / 100 = 18.1405
        assert_eq!(line.total_weight_kg, 18.14);
    }

    #[test]
    fn test_summarize_groups_by_size() {
        let lines = vec![
            LineResult::new(BarSize::No4, "L=600", 608.0, 2, ""),
            LineResult::new(BarSize::No3, "30x50 tie", 158.48, 35, ""),
            LineResult::new(BarSize::No4, "L=450", 442.0, 4, ""),
        ];
        let summary = summarize(&lines, 23000.0);

        assert_eq!(summary.rows.len(), 2);
        // Ordered smallest size first
        assert_eq!(summary.rows[0].size, BarSize::No3);
        assert_eq!(summary.rows[1].size, BarSize::No4);

        let no4 = &summary.rows[1];
        let expected_kg = 12.09 + 17.57;
        assert!((no4.total_weight.value() - expected_kg).abs() < 1e-9);
        assert!((no4.tonnage.value() - expected_kg / 1000.0).abs() < 1e-12);
        assert!((no4.cost - expected_kg / 1000.0 * 23000.0).abs() < 1e-6);

        let grand: f64 = summary.rows.iter().map(|r| r.total_weight.value()).sum();
        assert!((summary.total_weight.value() - grand).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[], 23000.0);
        assert!(summary.rows.is_empty());
        assert_eq!(summary.total_weight.value(), 0.0);
        assert_eq!(summary.total_cost, 0.0);
    }
}
