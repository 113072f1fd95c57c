//! Export per-point results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one row per penguin, with fitted values and residuals under both
//! the aggregate line and the penguin's own species line.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{FitSet, GroupLabel, PenguinRow, TrendLine};
use crate::error::AppError;

/// Write per-point results to a CSV file.
pub fn write_results_csv(path: &Path, rows: &[PenguinRow], fits: &FitSet) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(
        file,
        "species,island,sex,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,\
         fit_overall,resid_overall,fit_species,resid_species"
    )
    .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for row in rows {
        let overall = &fits.overall.line;
        let species_line = species_line(fits, row)?;

        let fit_overall = overall.predict(row.bill_length_mm);
        let fit_species = species_line.predict(row.bill_length_mm);
        writeln!(
            file,
            "{},{},{},{:.1},{:.1},{:.1},{:.1},{:.4},{:.4},{:.4},{:.4}",
            row.species.display_name(),
            row.island,
            row.sex,
            row.bill_length_mm,
            row.bill_depth_mm,
            row.flipper_length_mm,
            row.body_mass_g,
            fit_overall,
            row.bill_depth_mm - fit_overall,
            fit_species,
            row.bill_depth_mm - fit_species,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

fn species_line<'a>(fits: &'a FitSet, row: &PenguinRow) -> Result<&'a TrendLine, AppError> {
    fits.groups
        .iter()
        .find(|g| g.label == GroupLabel::Species(row.species))
        .map(|g| &g.line)
        .ok_or_else(|| {
            AppError::new(
                4,
                format!(
                    "No fitted line for species {} during export.",
                    row.species.display_name()
                ),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_penguins;
    use crate::fit::fit_dataset;

    #[test]
    fn export_has_header_plus_one_row_per_penguin() {
        let rows = load_penguins().unwrap();
        let fits = fit_dataset(&rows).unwrap();
        let path = std::env::temp_dir().join("penguin-paradox-export-test.csv");

        write_results_csv(&path, &rows, &fits).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), rows.len() + 1);
        assert!(lines[0].starts_with("species,island,sex,bill_length_mm"));
        assert!(lines[1].contains(','));
    }
}
