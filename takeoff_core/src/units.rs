//! # Unit Types
//!
//! Type-safe wrappers for the units the takeoff works in. These are plain
//! f64 newtypes: cheap, serde-transparent, and just enough to keep metre
//! and centimetre (or kilogram and tonne) values from being mixed up at
//! the boundaries.
//!
//! The engine itself uses centimetres and kilograms throughout, matching
//! site practice for rebar schedules; calculation structs carry raw `f64`
//! fields with unit-suffixed names (`_cm`, `_kg`).
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::units::{Centimeters, Meters, Kilograms, Tonnes};
//!
//! let stock: Centimeters = Meters(12.0).into();
//! assert_eq!(stock.0, 1200.0);
//!
//! let t: Tonnes = Kilograms(5129.0).into();
//! assert_eq!(t.0, 5.129);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in centimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Meters> for Centimeters {
    fn from(m: Meters) -> Self {
        Centimeters(m.0 * 100.0)
    }
}

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in tonnes (1 t = 1000 kg)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tonnes(pub f64);

impl From<Kilograms> for Tonnes {
    fn from(kg: Kilograms) -> Self {
        Tonnes(kg.0 / 1000.0)
    }
}

impl From<Tonnes> for Kilograms {
    fn from(t: Tonnes) -> Self {
        Kilograms(t.0 * 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Centimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(Kilograms);
impl_arithmetic!(Tonnes);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_to_centimeters() {
        let m = Meters(12.0);
        let cm: Centimeters = m.into();
        assert_eq!(cm.0, 1200.0);
    }

    #[test]
    fn test_kilograms_to_tonnes() {
        let kg = Kilograms(1500.0);
        let t: Tonnes = kg.into();
        assert_eq!(t.0, 1.5);
    }

    #[test]
    fn test_arithmetic() {
        let a = Centimeters(1200.0);
        let b = Centimeters(40.0);
        assert_eq!((a + b).0, 1240.0);
        assert_eq!((a - b).0, 1160.0);
        assert_eq!((b * 2.0).0, 80.0);
        assert_eq!((a / 2.0).0, 600.0);
    }

    #[test]
    fn test_serialization() {
        let cm = Centimeters(1200.0);
        let json = serde_json::to_string(&cm).unwrap();
        assert_eq!(json, "1200.0");

        let roundtrip: Centimeters = serde_json::from_str(&json).unwrap();
        assert_eq!(cm, roundtrip);
    }
}
