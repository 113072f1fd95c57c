//! Read/write trends JSON files.
//!
//! Trends JSON is the "portable" representation of a run's fitted lines:
//! - slope/intercept + quality per group
//! - axis labels
//! - a sampled grid per line for quick external plotting
//!
//! The schema is defined by `domain::TrendsFile`. The `plot` subcommand reads
//! one of these back and re-renders the figures without refitting.

use std::fs::File;
use std::path::Path;

use crate::data::DatasetStats;
use crate::domain::{
    FitSet, GroupFit, GroupLabel, LineGrid, TrendEntry, TrendsFile, X_LABEL, Y_LABEL,
};
use crate::error::AppError;

/// Write a trends JSON file.
pub fn write_trends_json(
    path: &Path,
    fits: &FitSet,
    stats: &DatasetStats,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create trends JSON '{}': {e}", path.display()),
        )
    })?;

    let entries = std::iter::once(&fits.overall)
        .chain(&fits.groups)
        .map(|fit| TrendEntry {
            label: fit.label,
            line: fit.line,
            quality: fit.quality.clone(),
            grid: sample_grid(fit, stats),
        })
        .collect();

    let trends = TrendsFile {
        tool: "penguins".to_string(),
        x_label: X_LABEL.to_string(),
        y_label: Y_LABEL.to_string(),
        fits: entries,
    };

    serde_json::to_writer_pretty(file, &trends)
        .map_err(|e| AppError::new(2, format!("Failed to write trends JSON: {e}")))?;

    Ok(())
}

/// Read a trends JSON file.
pub fn read_trends_json(path: &Path) -> Result<TrendsFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open trends JSON '{}': {e}", path.display()),
        )
    })?;
    let trends: TrendsFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid trends JSON: {e}")))?;
    Ok(trends)
}

/// Rebuild a `FitSet` from a trends file (for `plot`-only runs).
pub fn fit_set_from_trends(trends: &TrendsFile) -> Result<FitSet, AppError> {
    let mut overall = None;
    let mut groups = Vec::new();

    for entry in &trends.fits {
        let fit = GroupFit {
            label: entry.label,
            line: entry.line,
            quality: entry.quality.clone(),
        };
        match entry.label {
            GroupLabel::Overall => overall = Some(fit),
            GroupLabel::Species(_) => groups.push(fit),
        }
    }

    let Some(overall) = overall else {
        return Err(AppError::new(2, "Trends JSON has no overall fit entry."));
    };
    if groups.is_empty() {
        return Err(AppError::new(2, "Trends JSON has no per-species fit entries."));
    }

    Ok(FitSet { overall, groups })
}

// Two samples pin a straight line; the grid exists so external consumers can
// plot without evaluating the line themselves.
fn sample_grid(fit: &GroupFit, stats: &DatasetStats) -> LineGrid {
    let (x0, x1) = if stats.x_min.is_finite() && stats.x_max > stats.x_min {
        (stats.x_min, stats.x_max)
    } else {
        (30.0, 60.0)
    };
    LineGrid {
        x: vec![x0, x1],
        y: vec![fit.line.predict(x0), fit.line.predict(x1)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{dataset_stats, load_penguins};
    use crate::fit::fit_dataset;

    #[test]
    fn trends_roundtrip_preserves_lines() {
        let rows = load_penguins().unwrap();
        let stats = dataset_stats(&rows);
        let fits = fit_dataset(&rows).unwrap();
        let path = std::env::temp_dir().join("penguin-paradox-trends-test.json");

        write_trends_json(&path, &fits, &stats).unwrap();
        let trends = read_trends_json(&path).unwrap();
        assert_eq!(trends.tool, "penguins");
        assert_eq!(trends.fits.len(), 4);

        let rebuilt = fit_set_from_trends(&trends).unwrap();
        assert_eq!(
            rebuilt.overall.line.slope.to_bits(),
            fits.overall.line.slope.to_bits()
        );
        assert_eq!(rebuilt.groups.len(), fits.groups.len());
    }

    #[test]
    fn trends_without_overall_entry_is_an_error() {
        let rows = load_penguins().unwrap();
        let stats = dataset_stats(&rows);
        let fits = fit_dataset(&rows).unwrap();
        let path = std::env::temp_dir().join("penguin-paradox-trends-test-partial.json");

        write_trends_json(&path, &fits, &stats).unwrap();
        let mut trends = read_trends_json(&path).unwrap();
        trends.fits.retain(|e| e.label != GroupLabel::Overall);

        let err = fit_set_from_trends(&trends).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("no overall fit"));
    }
}
