//! Mathematical utilities: the least squares solver behind every trendline.

pub mod ols;

pub use ols::*;
