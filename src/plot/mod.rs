//! Plotting: deterministic ASCII output for the terminal and PNG figures.

pub mod ascii;
pub mod figures;

pub use ascii::*;
pub use figures::*;
