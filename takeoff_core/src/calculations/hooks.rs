//! Standard Hook Allowances
//!
//! End-hook length allowances for straight and slab bars. The 90° and 180°
//! values are detailing-practice minimums with an absolute floor so that
//! small bars still get a workable hook; lengths are rounded up to whole
//! centimetres.
//!
//! The 135° seismic stirrup hook is a different rule and lives with the
//! stirrup calculator.

use serde::{Deserialize, Serialize};

/// End treatment of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HookType {
    /// Flat cut, no hook
    #[default]
    Flat,
    /// 90° standard hook
    Deg90,
    /// 180° standard hook
    Deg180,
}

impl HookType {
    /// All hook variants
    pub const ALL: [HookType; 3] = [HookType::Flat, HookType::Deg90, HookType::Deg180];

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            HookType::Flat => "Flat cut",
            HookType::Deg90 => "90° hook",
            HookType::Deg180 => "180° hook",
        }
    }
}

impl std::fmt::Display for HookType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Hook length allowance (cm) for a bar of diameter `db_cm`.
///
/// - flat cut: 0
/// - 90°: `ceil(max(12 db, 15))`
/// - 180°: `ceil(max(4 db, 6.5))`
pub fn hook_length(db_cm: f64, hook: HookType) -> f64 {
    match hook {
        HookType::Flat => 0.0,
        HookType::Deg90 => (12.0 * db_cm).max(15.0).ceil(),
        HookType::Deg180 => (4.0 * db_cm).max(6.5).ceil(),
    }
}
