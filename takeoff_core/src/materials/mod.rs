//! # Materials Reference Data
//!
//! Reference data consumed read-only by the calculations:
//!
//! - [`rebar`] - CNS 560 deformed bar sizes (diameter, unit weight, db)
//! - [`lap_table`] - digitized S7-01 lap/development lengths with the
//!   formula fallback for off-grid strength combinations
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::materials::{standard_table, BarSize, LapUse};
//!
//! let lap = standard_table()
//!     .resolve(4200.0, 280.0, BarSize::No6, LapUse::Tension, false)
//!     .unwrap();
//! assert_eq!(lap.length_cm, 95.0);
//! ```

pub mod lap_table;
pub mod rebar;

pub use lap_table::{
    standard_table, LapLength, LapLengthTable, LapSelection, LapSource, LapUse, TableColumn,
};
pub use rebar::BarSize;
