//! Trendline fitting.
//!
//! Responsibilities:
//!
//! - fit a single OLS trendline with degenerate-input checks (`line`)
//! - fit the aggregate line plus one line per species (`grouped`)
//! - compare slope signs for the reversal condition (`paradox`)

pub mod grouped;
pub mod line;
pub mod paradox;

pub use grouped::*;
pub use line::*;
pub use paradox::*;
