//! # takeoff_core - Rebar Quantity & Cutting-List Engine
//!
//! `takeoff_core` estimates reinforcing-steel quantities for concrete
//! structures: given a bar size, geometry, material strengths, and a stock
//! bar length, it computes the physical length of each piece (hook and lap
//! allowances included), how many pieces are needed, and how an over-length
//! requirement splits into stock-length segments joined by lap splices.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Reference data by reference**: the standards table is built once
//!   and passed into every resolution; nothing is globally mutable
//!
//! ## Quick Start
//!
//! ```rust
//! use takeoff_core::calculations::{BarItem, HookType, StraightBarInput};
//! use takeoff_core::materials::{standard_table, BarSize, LapSelection};
//! use takeoff_core::takeoff::Takeoff;
//!
//! let mut takeoff = Takeoff::new("CDC Center", "C. Fan", "Wash bay");
//! takeoff.add_item(BarItem::Straight(StraightBarInput {
//!     label: "B1 bottom".to_string(),
//!     size: BarSize::No4,
//!     clear_length_cm: 600.0,
//!     cover_cm: 4.0,
//!     hook_left: HookType::Deg90,
//!     hook_right: HookType::Flat,
//!     lap: LapSelection::tension(false),
//!     count: 2,
//! }));
//!
//! let lines = takeoff.lines(standard_table()).unwrap();
//! assert_eq!(lines[0].unit_length_cm, 608.0);
//! ```
//!
//! ## Modules
//!
//! - [`takeoff`] - Takeoff container, metadata, and settings
//! - [`calculations`] - Per-category calculators and the closed item variant
//! - [`materials`] - Bar sizes and the lap-length standards table
//! - [`summary`] - Detail lines and per-size quantity aggregation
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod materials;
pub mod summary;
pub mod takeoff;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{TakeoffError, TakeoffResult};
pub use takeoff::{Takeoff, TakeoffMetadata, TakeoffSettings};
