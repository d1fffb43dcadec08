//! The seven estimation forms. Each submodule validates its own form and
//! exposes a pure `compute` over the validated input.

pub mod ceiling;
pub mod curtain;
pub mod floor;
pub mod paint;
pub mod panel;
pub mod pop_ceiling;
pub mod wall;

use crate::utils::error::{EstimatorError, Result};

pub use ceiling::CeilingCalculator;
pub use curtain::{CurtainCalculator, Fullness};
pub use floor::FloorCalculator;
pub use paint::PaintCalculator;
pub use panel::{PanelCalculator, PanelUnit};
pub use pop_ceiling::PopCeilingCalculator;
pub use wall::{OpeningKind, WallCalculator};

/// Largest integer an `f64` holds exactly.
const MAX_COUNT: f64 = 9_007_199_254_740_992.0;

/// 無條件進位成整數數量，超出可表示範圍時回報在 `field` 上
pub(crate) fn round_up_count(field: &str, value: f64) -> Result<u64> {
    let count = value.ceil();
    if !count.is_finite() || count > MAX_COUNT {
        return Err(EstimatorError::degenerate(
            field,
            "Result is too large to count",
        ));
    }
    Ok(count.max(0.0) as u64)
}
