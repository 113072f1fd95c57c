//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting without refitting

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Axis label for the independent measurement.
pub const X_LABEL: &str = "bill length (mm)";
/// Axis label for the dependent measurement.
pub const Y_LABEL: &str = "bill depth (mm)";

/// Penguin species: the fixed category set of the bundled dataset.
///
/// The species is the confounding variable of the demo: it correlates with
/// both bill measurements, and ignoring it flips the apparent trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Adelie,
    Chinstrap,
    Gentoo,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Adelie, Species::Chinstrap, Species::Gentoo];

    /// Human-readable label for terminal output and figure legends.
    pub fn display_name(self) -> &'static str {
        match self {
            Species::Adelie => "Adelie",
            Species::Chinstrap => "Chinstrap",
            Species::Gentoo => "Gentoo",
        }
    }

    /// Parse a dataset label. Case-insensitive; unknown labels are `None`.
    pub fn parse(label: &str) -> Option<Species> {
        match label.trim().to_ascii_lowercase().as_str() {
            "adelie" => Some(Species::Adelie),
            "chinstrap" => Some(Species::Chinstrap),
            "gentoo" => Some(Species::Gentoo),
            _ => None,
        }
    }
}

/// One row of the bundled dataset.
///
/// Only the two bill measurements and the species label feed the fit; the
/// remaining attributes are carried for exports.
#[derive(Debug, Clone)]
pub struct PenguinRow {
    pub species: Species,
    pub island: String,
    pub bill_length_mm: f64,
    pub bill_depth_mm: f64,
    pub flipper_length_mm: f64,
    pub body_mass_g: f64,
    pub sex: String,
}

/// A measurement pair used for fitting: x = bill length, y = bill depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub x: f64,
    pub y: f64,
}

impl From<&PenguinRow> for Observation {
    fn from(row: &PenguinRow) -> Self {
        Observation {
            x: row.bill_length_mm,
            y: row.bill_depth_mm,
        }
    }
}

/// A fitted straight line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    pub n: usize,
    pub rmse: f64,
    pub r2: f64,
}

/// Which slice of the dataset a fit covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupLabel {
    Overall,
    Species(Species),
}

impl GroupLabel {
    pub fn display_name(self) -> &'static str {
        match self {
            GroupLabel::Overall => "Overall",
            GroupLabel::Species(s) => s.display_name(),
        }
    }
}

/// A fitted trendline for one slice of the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupFit {
    pub label: GroupLabel,
    pub line: TrendLine,
    pub quality: FitQuality,
}

/// All fits of one run: the aggregate line plus one line per species.
#[derive(Debug, Clone)]
pub struct FitSet {
    pub overall: GroupFit,
    pub groups: Vec<GroupFit>,
}

/// Outcome of comparing the aggregate slope sign against the per-group signs.
#[derive(Debug, Clone)]
pub struct ParadoxFinding {
    pub overall_slope: f64,
    pub group_slopes: Vec<(Species, f64)>,
    /// True when every within-group slope has the opposite sign of the
    /// aggregate slope, which is the paradox condition itself.
    pub reversed: bool,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub out_dir: PathBuf,
    pub fig_width: u32,
    pub fig_height: u32,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_trends: Option<PathBuf>,
}

/// A saved trends file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendsFile {
    pub tool: String,
    pub x_label: String,
    pub y_label: String,
    pub fits: Vec<TrendEntry>,
}

/// One fitted line in a trends file, with a sampled grid for quick plotting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendEntry {
    pub label: GroupLabel,
    pub line: TrendLine,
    pub quality: FitQuality,
    pub grid: LineGrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}
