//! Deformed Bar Sizes (CNS 560)
//!
//! Nominal properties for the deformed reinforcing bars used throughout the
//! engine. Sizes follow the `#3`..`#11` designation series; diameters are in
//! centimetres and unit weights in kilograms per metre of bar (equivalently,
//! kg per 100 cm - the form the weight formula consumes).
//!
//! The data is fixed at compile time and never mutated; everything else in
//! the crate looks bars up by [`BarSize`].
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::materials::BarSize;
//!
//! let size = BarSize::from_designation("#4").unwrap();
//! assert_eq!(size.diameter_cm(), 1.27);
//! assert_eq!(size.unit_weight_kg_per_m(), 0.994);
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{TakeoffError, TakeoffResult};

/// Deformed bar size per CNS 560.
///
/// Ordered smallest to largest, so sorting by `BarSize` sorts by diameter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum BarSize {
    #[serde(rename = "#3")]
    No3,
    #[serde(rename = "#4")]
    #[default]
    No4,
    #[serde(rename = "#5")]
    No5,
    #[serde(rename = "#6")]
    No6,
    #[serde(rename = "#7")]
    No7,
    #[serde(rename = "#8")]
    No8,
    #[serde(rename = "#9")]
    No9,
    #[serde(rename = "#10")]
    No10,
    #[serde(rename = "#11")]
    No11,
}

impl BarSize {
    /// All bar sizes, smallest first
    pub const ALL: [BarSize; 9] = [
        BarSize::No3,
        BarSize::No4,
        BarSize::No5,
        BarSize::No6,
        BarSize::No7,
        BarSize::No8,
        BarSize::No9,
        BarSize::No10,
        BarSize::No11,
    ];

    /// The `#N` designation string
    pub fn designation(&self) -> &'static str {
        match self {
            BarSize::No3 => "#3",
            BarSize::No4 => "#4",
            BarSize::No5 => "#5",
            BarSize::No6 => "#6",
            BarSize::No7 => "#7",
            BarSize::No8 => "#8",
            BarSize::No9 => "#9",
            BarSize::No10 => "#10",
            BarSize::No11 => "#11",
        }
    }

    /// Parse a `#N` designation (a missing `#` prefix is tolerated)
    pub fn from_designation(s: &str) -> TakeoffResult<Self> {
        match s.trim().trim_start_matches('#') {
            "3" => Ok(BarSize::No3),
            "4" => Ok(BarSize::No4),
            "5" => Ok(BarSize::No5),
            "6" => Ok(BarSize::No6),
            "7" => Ok(BarSize::No7),
            "8" => Ok(BarSize::No8),
            "9" => Ok(BarSize::No9),
            "10" => Ok(BarSize::No10),
            "11" => Ok(BarSize::No11),
            _ => Err(TakeoffError::unknown_bar_size(s)),
        }
    }

    /// Nominal diameter (cm)
    pub fn diameter_cm(&self) -> f64 {
        match self {
            BarSize::No3 => 0.953,
            BarSize::No4 => 1.270,
            BarSize::No5 => 1.590,
            BarSize::No6 => 1.910,
            BarSize::No7 => 2.220,
            BarSize::No8 => 2.540,
            BarSize::No9 => 2.870,
            BarSize::No10 => 3.220,
            BarSize::No11 => 3.580,
        }
    }

    /// Unit weight (kg per metre of bar, i.e. kg per 100 cm)
    pub fn unit_weight_kg_per_m(&self) -> f64 {
        match self {
            BarSize::No3 => 0.560,
            BarSize::No4 => 0.994,
            BarSize::No5 => 1.560,
            BarSize::No6 => 2.250,
            BarSize::No7 => 3.040,
            BarSize::No8 => 3.980,
            BarSize::No9 => 5.060,
            BarSize::No10 => 6.370,
            BarSize::No11 => 7.907,
        }
    }

    /// Bar diameter `db` used in development/lap-length formulas (cm).
    ///
    /// For CNS 560 deformed bars this equals the nominal diameter.
    pub fn db_cm(&self) -> f64 {
        self.diameter_cm()
    }
}

impl std::fmt::Display for BarSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.designation())
    }
}

impl FromStr for BarSize {
    type Err = TakeoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BarSize::from_designation(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_designation_roundtrip() {
        for size in BarSize::ALL {
            assert_eq!(BarSize::from_designation(size.designation()).unwrap(), size);
        }
    }

    #[test]
    fn test_parse_without_hash() {
        assert_eq!(BarSize::from_designation("10").unwrap(), BarSize::No10);
    }

    #[test]
    fn test_unknown_designation() {
        let err = BarSize::from_designation("#12").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_BAR_SIZE");
    }

    #[test]
    fn test_properties_positive_and_increasing() {
        let mut last_dia = 0.0;
        let mut last_weight = 0.0;
        for size in BarSize::ALL {
            assert!(size.diameter_cm() > last_dia);
            assert!(size.unit_weight_kg_per_m() > last_weight);
            last_dia = size.diameter_cm();
            last_weight = size.unit_weight_kg_per_m();
        }
    }

    #[test]
    fn test_db_equals_nominal_diameter() {
        for size in BarSize::ALL {
            assert_eq!(size.db_cm(), size.diameter_cm());
        }
    }

    #[test]
    fn test_ordering_follows_diameter() {
        assert!(BarSize::No3 < BarSize::No11);
        let mut sizes = vec![BarSize::No8, BarSize::No3, BarSize::No5];
        sizes.sort();
        assert_eq!(sizes, vec![BarSize::No3, BarSize::No5, BarSize::No8]);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&BarSize::No4).unwrap();
        assert_eq!(json, "\"#4\"");
        let roundtrip: BarSize = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, BarSize::No4);
    }
}
