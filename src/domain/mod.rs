//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the dataset row and measurement pair (`PenguinRow`, `Observation`)
//! - fit outputs (`TrendLine`, `GroupFit`, `FitSet`, `ParadoxFinding`)
//! - run configuration and the trends JSON schema (`RunConfig`, `TrendsFile`)

pub mod types;

pub use types::*;
