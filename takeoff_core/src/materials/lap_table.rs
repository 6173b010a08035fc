//! Lap / Development Length Table (S7-01 standard drawing)
//!
//! Digitized lap-splice and development lengths for the (fy, fc) grade
//! pairs covered by the S7-01 standard drawing, with a closed-form fallback
//! for combinations outside the digitized grid.
//!
//! ## Resolution policy
//!
//! A lookup walks `(fy, fc) -> column -> bar size`. Any absent key along
//! that path is an expected condition - the standards drawing only covers a
//! finite grid - and resolves transparently through the fallback formula,
//! tagged [`LapSource::Formula`]. A present entry must be positive; a
//! stored zero or negative length is corrupt reference data and is reported
//! as [`crate::errors::TakeoffError::MalformedLapTable`] rather than
//! silently papered over.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::materials::{standard_table, BarSize, LapSource, LapUse};
//!
//! let table = standard_table();
//!
//! // On the digitized grid: tabulated value.
//! let lap = table.resolve(4200.0, 280.0, BarSize::No4, LapUse::Tension, false).unwrap();
//! assert_eq!(lap.length_cm, 63.0);
//! assert_eq!(lap.source, LapSource::Tabulated);
//!
//! // Off the grid: conservative formula estimate.
//! let lap = table.resolve(4200.0, 300.0, BarSize::No4, LapUse::Tension, false).unwrap();
//! assert_eq!(lap.source, LapSource::Formula);
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{TakeoffError, TakeoffResult};
use crate::materials::rebar::BarSize;

/// What the resolved length is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LapUse {
    /// Compression lap splice (columns, compression members)
    Compression,
    /// Straight development (embedment) length
    Development,
    /// Tension lap splice; top bars get the longer column of the table
    #[default]
    Tension,
}

impl LapUse {
    /// All usage variants
    pub const ALL: [LapUse; 3] = [LapUse::Compression, LapUse::Development, LapUse::Tension];

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            LapUse::Compression => "Compression",
            LapUse::Development => "Development",
            LapUse::Tension => "Tension",
        }
    }
}

impl std::fmt::Display for LapUse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Column of the digitized table.
///
/// Tension splits into bottom/top columns; [`TableColumn::for_use`] picks
/// the column from a [`LapUse`] and the top-bar flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableColumn {
    Compression,
    Development,
    TensionBottom,
    TensionTop,
}

impl TableColumn {
    /// Select the table column for a usage. The top-bar flag matters only
    /// for tension; compression and development have a single column each.
    pub fn for_use(usage: LapUse, top_bar: bool) -> Self {
        match usage {
            LapUse::Compression => TableColumn::Compression,
            LapUse::Development => TableColumn::Development,
            LapUse::Tension => {
                if top_bar {
                    TableColumn::TensionTop
                } else {
                    TableColumn::TensionBottom
                }
            }
        }
    }

    /// Display name (used in malformed-table errors)
    pub fn display_name(&self) -> &'static str {
        match self {
            TableColumn::Compression => "compression",
            TableColumn::Development => "development",
            TableColumn::TensionBottom => "tension-bottom",
            TableColumn::TensionTop => "tension-top",
        }
    }
}

/// Provenance of a resolved lap length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LapSource {
    /// Read from the digitized standards table
    Tabulated,
    /// Estimated by the fallback formula (off-grid strengths or sizes)
    Formula,
    /// Supplied by the caller, overriding both of the above
    Manual,
}

impl LapSource {
    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            LapSource::Tabulated => "tabulated",
            LapSource::Formula => "formula",
            LapSource::Manual => "manual",
        }
    }
}

impl std::fmt::Display for LapSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A resolved lap/development length with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LapLength {
    /// Required length (cm); always positive
    pub length_cm: f64,
    /// Where the value came from
    pub source: LapSource,
}

/// Immutable lap-length lookup structure.
///
/// Keyed by whole-number (fy, fc) strength pairs in kgf/cm²; non-integral
/// strengths are by definition off the digitized grid and resolve through
/// the formula. Built once (see [`standard_table`]) and passed by reference
/// into every resolution - there is no ambient global state.
#[derive(Debug, Clone, Default)]
pub struct LapLengthTable {
    entries: HashMap<(u32, u32), HashMap<TableColumn, HashMap<BarSize, f64>>>,
}

impl LapLengthTable {
    /// Create an empty table (every lookup falls back to the formula)
    pub fn new() -> Self {
        Self::default()
    }

    /// The digitized S7-01 grid: fy 4200 at fc 210/245/280/350 and
    /// fy 2800 at fc 210/280.
    pub fn standard() -> Self {
        let mut table = LapLengthTable::new();

        // fy = 4200 kgf/cm²
        table.insert_grade(
            4200,
            210,
            [55, 73, 91, 110, 158, 181, 205, 229, 255],
            [71, 95, 118, 142, 206, 235, 266, 298, 331],
            [30, 39, 49, 59, 69, 78, 88, 99, 110],
            [42, 56, 70, 84, 122, 139, 157, 177, 196],
        );
        table.insert_grade(
            4200,
            245,
            [51, 68, 85, 101, 147, 168, 189, 212, 236],
            [66, 88, 110, 132, 190, 218, 246, 276, 307],
            [30, 39, 49, 59, 69, 78, 88, 99, 110],
            [39, 52, 65, 78, 113, 129, 146, 164, 182],
        );
        table.insert_grade(
            4200,
            280,
            [48, 63, 79, 95, 137, 157, 177, 199, 221],
            [62, 82, 103, 123, 178, 204, 230, 258, 287],
            [30, 39, 49, 59, 69, 78, 88, 99, 110],
            [37, 49, 61, 73, 106, 121, 136, 153, 170],
        );
        table.insert_grade(
            4200,
            350,
            [43, 57, 71, 85, 123, 140, 159, 178, 198],
            [55, 74, 92, 110, 159, 182, 206, 231, 257],
            [30, 39, 49, 59, 69, 78, 88, 99, 110],
            [33, 44, 55, 65, 95, 108, 122, 137, 152],
        );

        // fy = 2800 kgf/cm²
        table.insert_grade(
            2800,
            210,
            [37, 49, 61, 73, 106, 121, 137, 153, 170],
            [48, 63, 79, 95, 137, 157, 177, 199, 221],
            [30, 30, 33, 40, 46, 52, 59, 66, 74],
            [30, 38, 47, 56, 81, 93, 105, 118, 131],
        );
        table.insert_grade(
            2800,
            280,
            [32, 42, 53, 63, 92, 105, 118, 133, 147],
            [41, 55, 69, 82, 119, 136, 154, 172, 192],
            [30, 30, 33, 40, 46, 52, 59, 66, 74],
            [30, 33, 41, 49, 71, 81, 91, 102, 114],
        );

        table
    }

    /// Insert a single entry (cm). Used by [`LapLengthTable::standard`] and
    /// by callers building project-specific tables.
    pub fn insert(&mut self, fy: u32, fc: u32, column: TableColumn, size: BarSize, length_cm: f64) {
        self.entries
            .entry((fy, fc))
            .or_default()
            .entry(column)
            .or_default()
            .insert(size, length_cm);
    }

    /// Insert one (fy, fc) grade cell: a length per bar size for each of
    /// the four columns, bars ordered as [`BarSize::ALL`].
    fn insert_grade(
        &mut self,
        fy: u32,
        fc: u32,
        tension_bottom: [u32; 9],
        tension_top: [u32; 9],
        compression: [u32; 9],
        development: [u32; 9],
    ) {
        for (i, size) in BarSize::ALL.into_iter().enumerate() {
            self.insert(fy, fc, TableColumn::TensionBottom, size, f64::from(tension_bottom[i]));
            self.insert(fy, fc, TableColumn::TensionTop, size, f64::from(tension_top[i]));
            self.insert(fy, fc, TableColumn::Compression, size, f64::from(compression[i]));
            self.insert(fy, fc, TableColumn::Development, size, f64::from(development[i]));
        }
    }

    /// Look up a tabulated value.
    ///
    /// Returns `Ok(Some(length))` for a positive stored entry, `Ok(None)`
    /// when any key along the path is absent (including non-integral
    /// strengths, which cannot be on the grid), and an error when a stored
    /// entry is nonpositive.
    pub fn tabulated(
        &self,
        fy: f64,
        fc: f64,
        column: TableColumn,
        size: BarSize,
    ) -> TakeoffResult<Option<f64>> {
        let (Some(fy_key), Some(fc_key)) = (grid_key(fy), grid_key(fc)) else {
            return Ok(None);
        };
        let value = self
            .entries
            .get(&(fy_key, fc_key))
            .and_then(|columns| columns.get(&column))
            .and_then(|lengths| lengths.get(&size));
        match value {
            None => Ok(None),
            Some(&v) if v > 0.0 => Ok(Some(v)),
            Some(&v) => Err(TakeoffError::MalformedLapTable {
                yield_strength: fy_key,
                concrete_strength: fc_key,
                column: column.display_name().to_string(),
                size: size.designation().to_string(),
                value: v,
            }),
        }
    }

    /// Resolve the required lap/development length for a bar.
    ///
    /// Returns the tabulated value when the grid covers the inputs,
    /// otherwise the formula estimate; the result is always positive and
    /// carries its provenance. Never returns [`LapSource::Manual`].
    pub fn resolve(
        &self,
        fy: f64,
        fc: f64,
        size: BarSize,
        usage: LapUse,
        top_bar: bool,
    ) -> TakeoffResult<LapLength> {
        if fy <= 0.0 {
            return Err(TakeoffError::invalid_input(
                "fy_kgf_cm2",
                fy.to_string(),
                "Steel yield strength must be positive",
            ));
        }
        if fc <= 0.0 {
            return Err(TakeoffError::invalid_input(
                "fc_kgf_cm2",
                fc.to_string(),
                "Concrete strength must be positive",
            ));
        }

        let column = TableColumn::for_use(usage, top_bar);
        if let Some(length_cm) = self.tabulated(fy, fc, column, size)? {
            return Ok(LapLength {
                length_cm,
                source: LapSource::Tabulated,
            });
        }

        Ok(LapLength {
            length_cm: formula_estimate(fy, fc, size.db_cm(), usage, top_bar),
            source: LapSource::Formula,
        })
    }
}

/// Closed-form estimate for strengths or sizes outside the digitized grid.
///
/// Compression: `ceil(0.043 fy db)`, floored at 20 cm. Tension and
/// development: `46 (fy/4200) sqrt(280/fc)`, x1.3 for top bars, then
/// `ceil(factor * db * 1.3)` - both x1.3 multipliers are part of the
/// established estimation method and are kept as-is.
fn formula_estimate(fy: f64, fc: f64, db: f64, usage: LapUse, top_bar: bool) -> f64 {
    match usage {
        LapUse::Compression => (0.043 * fy * db).ceil().max(20.0),
        LapUse::Development | LapUse::Tension => {
            let mut factor = 46.0 * (fy / 4200.0) * (280.0 / fc).sqrt();
            if top_bar {
                factor *= 1.3;
            }
            (factor * db * 1.3).ceil()
        }
    }
}

/// Whole-number grid key for a strength value; anything else is off-grid.
fn grid_key(strength: f64) -> Option<u32> {
    if strength > 0.0 && strength.fract() == 0.0 && strength <= f64::from(u32::MAX) {
        Some(strength as u32)
    } else {
        None
    }
}

/// The digitized standard table, built once.
pub fn standard_table() -> &'static LapLengthTable {
    static TABLE: Lazy<LapLengthTable> = Lazy::new(LapLengthTable::standard);
    &TABLE
}

/// How a calculation obtains its lap length: resolved through the table
/// (with the takeoff's material strengths) or overridden by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum LapSelection {
    /// Resolve from the standards table / fallback formula
    Auto { usage: LapUse, top_bar: bool },
    /// Caller-supplied length (cm)
    Manual { length_cm: f64 },
}

impl LapSelection {
    /// Tension lap, resolved automatically
    pub fn tension(top_bar: bool) -> Self {
        LapSelection::Auto {
            usage: LapUse::Tension,
            top_bar,
        }
    }

    /// Compression lap, resolved automatically
    pub fn compression() -> Self {
        LapSelection::Auto {
            usage: LapUse::Compression,
            top_bar: false,
        }
    }

    /// Manual override
    pub fn manual(length_cm: f64) -> Self {
        LapSelection::Manual { length_cm }
    }

    /// Resolve to a concrete length.
    pub fn resolve(
        &self,
        table: &LapLengthTable,
        fy: f64,
        fc: f64,
        size: BarSize,
    ) -> TakeoffResult<LapLength> {
        match *self {
            LapSelection::Auto { usage, top_bar } => table.resolve(fy, fc, size, usage, top_bar),
            LapSelection::Manual { length_cm } => {
                if length_cm < 0.0 {
                    return Err(TakeoffError::invalid_input(
                        "lap.length_cm",
                        length_cm.to_string(),
                        "Manual lap length must not be negative",
                    ));
                }
                Ok(LapLength {
                    length_cm,
                    source: LapSource::Manual,
                })
            }
        }
    }
}

impl Default for LapSelection {
    fn default() -> Self {
        LapSelection::tension(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabulated_hit() {
        let table = standard_table();

        let bottom = table
            .resolve(4200.0, 280.0, BarSize::No4, LapUse::Tension, false)
            .unwrap();
        assert_eq!(bottom.length_cm, 63.0);
        assert_eq!(bottom.source, LapSource::Tabulated);

        let top = table
            .resolve(4200.0, 280.0, BarSize::No4, LapUse::Tension, true)
            .unwrap();
        assert_eq!(top.length_cm, 82.0);

        let dev = table
            .resolve(2800.0, 210.0, BarSize::No7, LapUse::Development, false)
            .unwrap();
        assert_eq!(dev.length_cm, 81.0);

        let comp = table
            .resolve(2800.0, 280.0, BarSize::No11, LapUse::Compression, false)
            .unwrap();
        assert_eq!(comp.length_cm, 74.0);
    }

    #[test]
    fn test_off_grid_falls_back_to_formula() {
        let table = standard_table();

        // fc = 300 is not digitized: factor = 46 * sqrt(280/300) = 44.44,
        // #4 bottom = ceil(44.44 * 1.27 * 1.3) = 74.
        let bottom = table
            .resolve(4200.0, 300.0, BarSize::No4, LapUse::Tension, false)
            .unwrap();
        assert_eq!(bottom.source, LapSource::Formula);
        assert_eq!(bottom.length_cm, 74.0);

        // Top bar adds another x1.3: ceil(57.77 * 1.27 * 1.3) = 96.
        let top = table
            .resolve(4200.0, 300.0, BarSize::No4, LapUse::Tension, true)
            .unwrap();
        assert_eq!(top.length_cm, 96.0);
    }

    #[test]
    fn test_compression_formula_and_floor() {
        let table = standard_table();

        // fy = 3500 off-grid: ceil(0.043 * 3500 * 1.27) = 192.
        let lap = table
            .resolve(3500.0, 280.0, BarSize::No4, LapUse::Compression, false)
            .unwrap();
        assert_eq!(lap.length_cm, 192.0);
        assert_eq!(lap.source, LapSource::Formula);

        // Tiny fy: the 20 cm floor governs.
        let lap = table
            .resolve(300.0, 280.0, BarSize::No3, LapUse::Compression, false)
            .unwrap();
        assert_eq!(lap.length_cm, 20.0);
    }

    #[test]
    fn test_non_integral_strength_is_off_grid() {
        let table = standard_table();
        let lap = table
            .resolve(4200.5, 280.0, BarSize::No4, LapUse::Tension, false)
            .unwrap();
        assert_eq!(lap.source, LapSource::Formula);
    }

    #[test]
    fn test_resolve_never_nonpositive() {
        let table = standard_table();
        for size in BarSize::ALL {
            for usage in LapUse::ALL {
                for top_bar in [false, true] {
                    let lap = table.resolve(4200.0, 280.0, size, usage, top_bar).unwrap();
                    assert!(lap.length_cm > 0.0, "{size} {usage} top={top_bar}");
                    let lap = table.resolve(3100.0, 260.0, size, usage, top_bar).unwrap();
                    assert!(lap.length_cm > 0.0);
                    assert_eq!(lap.source, LapSource::Formula);
                }
            }
        }
    }

    #[test]
    fn test_malformed_entry_is_reported() {
        let mut table = LapLengthTable::new();
        table.insert(4200, 280, TableColumn::TensionBottom, BarSize::No4, 0.0);

        let err = table
            .resolve(4200.0, 280.0, BarSize::No4, LapUse::Tension, false)
            .unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_LAP_TABLE");
    }

    #[test]
    fn test_invalid_strengths_rejected() {
        let table = standard_table();
        assert!(table
            .resolve(0.0, 280.0, BarSize::No4, LapUse::Tension, false)
            .is_err());
        assert!(table
            .resolve(4200.0, -10.0, BarSize::No4, LapUse::Tension, false)
            .is_err());
    }

    #[test]
    fn test_lap_selection() {
        let table = standard_table();

        let auto = LapSelection::tension(false)
            .resolve(table, 4200.0, 280.0, BarSize::No4)
            .unwrap();
        assert_eq!(auto.length_cm, 63.0);
        assert_eq!(auto.source, LapSource::Tabulated);

        let manual = LapSelection::manual(45.0)
            .resolve(table, 4200.0, 280.0, BarSize::No4)
            .unwrap();
        assert_eq!(manual.length_cm, 45.0);
        assert_eq!(manual.source, LapSource::Manual);

        assert!(LapSelection::manual(-1.0)
            .resolve(table, 4200.0, 280.0, BarSize::No4)
            .is_err());
    }

    #[test]
    fn test_selection_serialization() {
        let selection = LapSelection::tension(true);
        let json = serde_json::to_string(&selection).unwrap();
        let roundtrip: LapSelection = serde_json::from_str(&json).unwrap();
        assert_eq!(selection, roundtrip);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let table = standard_table();
        let a = table
            .resolve(4200.0, 300.0, BarSize::No8, LapUse::Tension, true)
            .unwrap();
        let b = table
            .resolve(4200.0, 300.0, BarSize::No8, LapUse::Tension, true)
            .unwrap();
        assert_eq!(a, b);
    }
}
