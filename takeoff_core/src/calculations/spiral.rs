//! # Spiral (Helical Tie) Calculation
//!
//! Continuous helical reinforcement for circular columns and piles. One
//! turn of the helix unrolls to the hypotenuse of the core circumference
//! and the pitch; the full coil is that turn length times the number of
//! turns over the pile, plus a fixed closure allowance of three flat
//! circumferences at the top and bottom.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::spiral::spiral_length;
//!
//! let geometry = spiral_length(80.0, 15.0, 1500.0, 4.0).unwrap();
//! assert_eq!(geometry.core_diameter_cm, 72.0);
//! assert!((geometry.turn_length_cm - 226.69).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::stock::merged_length_with_splices;
use crate::calculations::ComputeContext;
use crate::errors::{TakeoffError, TakeoffResult};
use crate::materials::BarSize;
use crate::summary::aggregate;

/// Geometry of one spiral coil.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpiralGeometry {
    /// Helix diameter inside the cover (cm)
    pub core_diameter_cm: f64,

    /// Flat circumference of the core circle (cm)
    pub circumference_cm: f64,

    /// Unrolled length of one full turn (cm)
    pub turn_length_cm: f64,

    /// Number of turns over the pile length
    pub turn_count: f64,

    /// Fixed top/bottom closure allowance: three flat circumferences (cm)
    pub closure_allowance_cm: f64,

    /// Total coil length (cm)
    pub total_length_cm: f64,
}

impl SpiralGeometry {
    /// Recommended lap for splicing two coils: one and a half turns.
    /// A recommendation only; the caller may override it.
    pub fn suggested_lap_cm(&self) -> f64 {
        1.5 * self.turn_length_cm
    }
}

/// Derive the spiral geometry for a pile.
///
/// Diameter and pitch must be positive (the turn count divides by the
/// pitch); the pile length must not be negative. A cover of half the
/// diameter or more produces a degenerate nonpositive core, which is
/// passed through unguarded - cover validation belongs to the caller.
pub fn spiral_length(
    diameter_cm: f64,
    pitch_cm: f64,
    pile_length_cm: f64,
    cover_cm: f64,
) -> TakeoffResult<SpiralGeometry> {
    if diameter_cm <= 0.0 {
        return Err(TakeoffError::invalid_input(
            "diameter_cm",
            diameter_cm.to_string(),
            "Diameter must be positive",
        ));
    }
    if pitch_cm <= 0.0 {
        return Err(TakeoffError::invalid_input(
            "pitch_cm",
            pitch_cm.to_string(),
            "Pitch must be positive",
        ));
    }
    if pile_length_cm < 0.0 {
        return Err(TakeoffError::invalid_input(
            "pile_length_cm",
            pile_length_cm.to_string(),
            "Pile length must not be negative",
        ));
    }

    let core_diameter_cm = diameter_cm - 2.0 * cover_cm;
    let circumference_cm = std::f64::consts::PI * core_diameter_cm;
    let turn_length_cm = (circumference_cm.powi(2) + pitch_cm.powi(2)).sqrt();
    let turn_count = pile_length_cm / pitch_cm;
    let closure_allowance_cm = 3.0 * circumference_cm;

    Ok(SpiralGeometry {
        core_diameter_cm,
        circumference_cm,
        turn_length_cm,
        turn_count,
        closure_allowance_cm,
        total_length_cm: turn_length_cm * turn_count + closure_allowance_cm,
    })
}

/// Input parameters for a spiral line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiralInput {
    /// User label for this line
    pub label: String,

    /// Bar size
    pub size: BarSize,

    /// Outside diameter of the pile/column (cm)
    pub diameter_cm: f64,

    /// Pile length the helix runs over (cm)
    pub pile_length_cm: f64,

    /// Helix pitch (cm)
    pub pitch_cm: f64,

    /// Concrete cover (cm)
    pub cover_cm: f64,

    /// Splice lap override (cm); None uses the suggested 1.5-turn lap
    pub lap_override_cm: Option<f64>,

    /// Number of identical coils
    pub count: u32,
}

impl SpiralInput {
    /// Validate input parameters.
    pub fn validate(&self) -> TakeoffResult<()> {
        if self.diameter_cm <= 0.0 {
            return Err(TakeoffError::invalid_input(
                "diameter_cm",
                self.diameter_cm.to_string(),
                "Diameter must be positive",
            ));
        }
        if self.pitch_cm <= 0.0 {
            return Err(TakeoffError::invalid_input(
                "pitch_cm",
                self.pitch_cm.to_string(),
                "Pitch must be positive",
            ));
        }
        if self.count == 0 {
            return Err(TakeoffError::invalid_input(
                "count",
                self.count.to_string(),
                "Count must be at least 1",
            ));
        }
        if let Some(lap) = self.lap_override_cm {
            if lap < 0.0 {
                return Err(TakeoffError::invalid_input(
                    "lap_override_cm",
                    lap.to_string(),
                    "Lap override must not be negative",
                ));
            }
        }
        Ok(())
    }
}

/// Results for a spiral line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiralResult {
    /// Coil geometry
    pub geometry: SpiralGeometry,

    /// Lap length used for splices (cm)
    pub lap_length_cm: f64,

    /// Number of lap splices (0 when the coil fits one stock length)
    pub splice_count: u32,

    /// Coil length with splice overlaps added (cm)
    pub unit_length_cm: f64,

    /// Number of identical coils
    pub count: u32,

    /// Unit length times count (cm)
    pub total_length_cm: f64,

    /// Total steel weight (kg)
    pub total_weight_kg: f64,
}

/// Calculate a spiral line.
pub fn calculate(input: &SpiralInput, ctx: &ComputeContext) -> TakeoffResult<SpiralResult> {
    input.validate()?;

    let geometry = spiral_length(
        input.diameter_cm,
        input.pitch_cm,
        input.pile_length_cm,
        input.cover_cm,
    )?;
    let lap_length_cm = input
        .lap_override_cm
        .unwrap_or_else(|| geometry.suggested_lap_cm());

    let stock = ctx.settings.stock_length_cm;
    let (unit_length_cm, splice_count) = if geometry.total_length_cm > stock {
        merged_length_with_splices(geometry.total_length_cm, stock, lap_length_cm)?
    } else {
        (geometry.total_length_cm, 0)
    };

    let (total_length_cm, total_weight_kg) = aggregate(
        &[unit_length_cm],
        input.count,
        input.size.unit_weight_kg_per_m(),
    );

    Ok(SpiralResult {
        geometry,
        lap_length_cm,
        splice_count,
        unit_length_cm,
        count: input.count,
        total_length_cm,
        total_weight_kg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::standard_table;
    use crate::takeoff::TakeoffSettings;

    #[test]
    fn test_geometry_worked_example() {
        // D=80, cover=4 -> core 72, circumference 72π = 226.19
        // one turn = sqrt(226.19² + 15²) = 226.69; 100 turns over 1500
        let g = spiral_length(80.0, 15.0, 1500.0, 4.0).unwrap();
        assert_eq!(g.core_diameter_cm, 72.0);
        assert!((g.circumference_cm - 226.195).abs() < 0.001);
        assert!((g.turn_length_cm - 226.692).abs() < 0.001);
        assert_eq!(g.turn_count, 100.0);
        assert!((g.closure_allowance_cm - 678.584).abs() < 0.001);
        assert!((g.total_length_cm - 23347.8).abs() < 0.1);
    }

    #[test]
    fn test_suggested_lap_is_one_and_a_half_turns() {
        let g = spiral_length(80.0, 15.0, 1500.0, 4.0).unwrap();
        assert!((g.suggested_lap_cm() - 340.04).abs() < 0.01);
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        assert!(spiral_length(0.0, 15.0, 1500.0, 4.0).is_err());
        assert!(spiral_length(80.0, 0.0, 1500.0, 4.0).is_err());
        assert!(spiral_length(80.0, -1.0, 1500.0, 4.0).is_err());
        assert!(spiral_length(80.0, 15.0, -10.0, 4.0).is_err());
    }

    #[test]
    fn test_degenerate_cover_propagates() {
        // Cover of half the diameter collapses the core; not guarded here.
        let g = spiral_length(80.0, 15.0, 1500.0, 40.0).unwrap();
        assert_eq!(g.core_diameter_cm, 0.0);
        assert_eq!(g.circumference_cm, 0.0);
    }

    #[test]
    fn test_calculate_with_splices() {
        let settings = TakeoffSettings::default();
        let ctx = ComputeContext::new(&settings, standard_table());
        let input = SpiralInput {
            label: "P1 spiral".to_string(),
            size: BarSize::No4,
            diameter_cm: 80.0,
            pile_length_cm: 1500.0,
            pitch_cm: 15.0,
            cover_cm: 4.0,
            lap_override_cm: Some(340.0),
            count: 2,
        };
        let result = calculate(&input, &ctx).unwrap();

        // 23347.8 over 1200 stock -> floor = 19 splices
        assert_eq!(result.splice_count, 19);
        assert!((result.unit_length_cm - (result.geometry.total_length_cm + 19.0 * 340.0)).abs() < 1e-9);
        assert_eq!(result.count, 2);
    }

    #[test]
    fn test_short_coil_no_splices() {
        let settings = TakeoffSettings::default();
        let ctx = ComputeContext::new(&settings, standard_table());
        let input = SpiralInput {
            label: "Stub".to_string(),
            size: BarSize::No3,
            diameter_cm: 40.0,
            pile_length_cm: 60.0,
            pitch_cm: 10.0,
            cover_cm: 4.0,
            lap_override_cm: None,
            count: 1,
        };
        let result = calculate(&input, &ctx).unwrap();
        assert_eq!(result.splice_count, 0);
        assert_eq!(result.unit_length_cm, result.geometry.total_length_cm);
        // Suggested lap recorded even though unused
        assert!((result.lap_length_cm - result.geometry.suggested_lap_cm()).abs() < 1e-9);
    }
}
