//! Stock-Length Splitting
//!
//! Bars are supplied in a fixed stock length; any requirement longer than
//! that must be spliced together from several pieces, and every splice
//! consumes one lap length of overlap. Two modes are provided:
//!
//! - [`split_to_stock`] emits the discrete cuttable pieces (the cutting
//!   list proper);
//! - [`merged_length_with_splices`] reports only the combined length with
//!   the lap overlaps added, for callers that price a single line without
//!   enumerating pieces.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::stock::split_to_stock;
//!
//! let pieces = split_to_stock(2500.0, 1200.0, 40.0).unwrap();
//! assert_eq!(pieces, vec![1200.0, 1200.0, 180.0]);
//! // Total material exceeds the requirement by exactly 2 laps:
//! assert_eq!(pieces.iter().sum::<f64>(), 2500.0 + 2.0 * 40.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{TakeoffError, TakeoffResult};

/// One physically cuttable segment of a longer requirement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutPiece {
    /// Cut length (cm)
    pub length_cm: f64,
    /// 1-based index of this piece within its parent requirement
    pub part: u32,
    /// Total pieces in the parent requirement
    pub of: u32,
    /// Whether this piece is a full stock length (no cutting needed)
    pub is_stock_length: bool,
}

/// Split an over-length requirement into stock-length pieces.
///
/// A requirement that fits in one stock bar comes back as a single piece.
/// Otherwise full stock pieces are emitted greedily; each emitted piece
/// advances the covered length by `stock - lap`, since the next piece must
/// overlap the splice by one lap length. The loop terminates because that
/// advance is strictly positive (enforced below), and the final remainder
/// is always in `(0, stock]`.
///
/// Postconditions (for `required > stock`): every piece except possibly the
/// last equals the stock length, and the pieces sum to
/// `required + (pieces - 1) * lap` - the lap overlap is real material and
/// must show up in weight totals.
pub fn split_to_stock(
    required_length_cm: f64,
    stock_length_cm: f64,
    lap_length_cm: f64,
) -> TakeoffResult<Vec<f64>> {
    validate_lengths(required_length_cm, stock_length_cm)?;

    if required_length_cm <= stock_length_cm {
        return Ok(vec![required_length_cm]);
    }

    if lap_length_cm <= 0.0 || lap_length_cm >= stock_length_cm {
        return Err(TakeoffError::invalid_input(
            "lap_length_cm",
            lap_length_cm.to_string(),
            "Splitting requires 0 < lap < stock length",
        ));
    }

    let advance = stock_length_cm - lap_length_cm;
    let mut pieces = Vec::new();
    let mut remaining = required_length_cm;
    while remaining > stock_length_cm {
        pieces.push(stock_length_cm);
        remaining -= advance;
    }
    pieces.push(remaining);
    Ok(pieces)
}

/// Split an over-length requirement and label the resulting pieces.
pub fn cut_pieces(
    required_length_cm: f64,
    stock_length_cm: f64,
    lap_length_cm: f64,
) -> TakeoffResult<Vec<CutPiece>> {
    let lengths = split_to_stock(required_length_cm, stock_length_cm, lap_length_cm)?;
    let of = lengths.len() as u32;
    Ok(lengths
        .into_iter()
        .enumerate()
        .map(|(i, length_cm)| CutPiece {
            length_cm,
            part: i as u32 + 1,
            of,
            is_stock_length: (length_cm - stock_length_cm).abs() < f64::EPSILON,
        })
        .collect())
}

/// Combined-length mode: report the total length with lap overlaps added
/// and the number of splice points, without emitting discrete pieces.
///
/// The splice count is `floor(required / stock)`, less one when the
/// requirement is an exact stock multiple (the last joint would fall on a
/// bar end and is not a splice).
pub fn merged_length_with_splices(
    required_length_cm: f64,
    stock_length_cm: f64,
    lap_length_cm: f64,
) -> TakeoffResult<(f64, u32)> {
    validate_lengths(required_length_cm, stock_length_cm)?;
    if lap_length_cm < 0.0 {
        return Err(TakeoffError::invalid_input(
            "lap_length_cm",
            lap_length_cm.to_string(),
            "Lap length must not be negative",
        ));
    }

    let mut splices = (required_length_cm / stock_length_cm).floor() as u32;
    if splices > 0 && (required_length_cm % stock_length_cm).abs() < f64::EPSILON {
        splices -= 1;
    }
    Ok((
        required_length_cm + f64::from(splices) * lap_length_cm,
        splices,
    ))
}

fn validate_lengths(required_length_cm: f64, stock_length_cm: f64) -> TakeoffResult<()> {
    if required_length_cm <= 0.0 {
        return Err(TakeoffError::invalid_input(
            "required_length_cm",
            required_length_cm.to_string(),
            "Required length must be positive",
        ));
    }
    if stock_length_cm <= 0.0 {
        return Err(TakeoffError::invalid_input(
            "stock_length_cm",
            stock_length_cm.to_string(),
            "Stock length must be positive",
        ));
    }
    Ok(())
}
