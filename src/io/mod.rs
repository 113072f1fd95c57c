//! Input/output helpers.
//!
//! - per-point result exports (CSV) (`export`)
//! - trends JSON read/write (`trends`)
//!
//! Dataset loading lives in `data` because the dataset is bundled, not read
//! from the environment.

pub mod export;
pub mod trends;

pub use export::*;
pub use trends::*;
