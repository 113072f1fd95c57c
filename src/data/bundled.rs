//! Bundled penguin dataset: embedded CSV, parsing, and summary stats.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** with line numbers in every error
//! - **Deterministic behavior** (the dataset is a fixed asset, loaded once,
//!   never mutated)
//!
//! Rows with a missing (`""` or `NA`) bill measurement are skipped with a
//! warning rather than failing the load; an unknown species label is a hard
//! error because the category set is a dataset invariant.

use std::collections::HashMap;

use csv::StringRecord;
use log::{info, warn};

use crate::domain::{PenguinRow, Species};
use crate::error::AppError;

/// The dataset shipped with the binary: 120 penguins, 40 per species,
/// arranged so the aggregate bill-length/bill-depth trend is positive while
/// every within-species trend is negative.
pub const PENGUINS_CSV: &str = include_str!("../../assets/penguins.csv");

const REQUIRED_COLUMNS: [&str; 7] = [
    "species",
    "island",
    "bill_length_mm",
    "bill_depth_mm",
    "flipper_length_mm",
    "body_mass_g",
    "sex",
];

/// Summary stats about the rows actually used for fitting.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub n_rows: usize,
    pub species_counts: Vec<(Species, usize)>,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Load the bundled dataset.
pub fn load_penguins() -> Result<Vec<PenguinRow>, AppError> {
    let rows = parse_penguins(PENGUINS_CSV)?;
    info!("loaded bundled dataset: {} rows", rows.len());
    Ok(rows)
}

/// Parse a penguin CSV from text (split out of `load_penguins` for tests).
pub fn parse_penguins(text: &str) -> Result<Vec<PenguinRow>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read dataset header: {e}")))?
        .clone();
    let columns = column_index(&headers)?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        // Header is line 1, first record is line 2.
        let line = i + 2;
        let record =
            record.map_err(|e| AppError::new(2, format!("Dataset line {line}: {e}")))?;

        match parse_row(&record, &columns, line)? {
            Some(row) => rows.push(row),
            None => warn!("dataset line {line}: missing bill measurement, row skipped"),
        }
    }

    if rows.is_empty() {
        return Err(AppError::new(2, "Dataset contains no usable rows."));
    }

    Ok(rows)
}

/// Compute summary stats over the fitted measurements.
pub fn dataset_stats(rows: &[PenguinRow]) -> DatasetStats {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for row in rows {
        x_min = x_min.min(row.bill_length_mm);
        x_max = x_max.max(row.bill_length_mm);
        y_min = y_min.min(row.bill_depth_mm);
        y_max = y_max.max(row.bill_depth_mm);
    }

    let species_counts = Species::ALL
        .iter()
        .map(|&s| (s, rows.iter().filter(|r| r.species == s).count()))
        .collect();

    DatasetStats {
        n_rows: rows.len(),
        species_counts,
        x_min,
        x_max,
        y_min,
        y_max,
    }
}

fn column_index(headers: &StringRecord) -> Result<HashMap<String, usize>, AppError> {
    let mut columns = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        columns.insert(name.to_ascii_lowercase(), idx);
    }

    for required in REQUIRED_COLUMNS {
        if !columns.contains_key(required) {
            return Err(AppError::new(
                2,
                format!("Dataset is missing required column '{required}'."),
            ));
        }
    }

    Ok(columns)
}

fn field<'r>(record: &'r StringRecord, columns: &HashMap<String, usize>, name: &str) -> &'r str {
    columns
        .get(name)
        .and_then(|&idx| record.get(idx))
        .unwrap_or("")
}

fn parse_row(
    record: &StringRecord,
    columns: &HashMap<String, usize>,
    line: usize,
) -> Result<Option<PenguinRow>, AppError> {
    let field = |name: &str| field(record, columns, name);

    let species_label = field("species");
    let Some(species) = Species::parse(species_label) else {
        return Err(AppError::new(
            2,
            format!("Dataset line {line}: unknown species label '{species_label}'."),
        ));
    };

    let Some(bill_length_mm) = parse_measurement(field("bill_length_mm"), "bill_length_mm", line)?
    else {
        return Ok(None);
    };
    let Some(bill_depth_mm) = parse_measurement(field("bill_depth_mm"), "bill_depth_mm", line)?
    else {
        return Ok(None);
    };

    // These attributes never feed the fit; a missing value becomes 0.0 so the
    // row is still usable for the bill-measurement pipeline.
    let flipper_length_mm =
        parse_measurement(field("flipper_length_mm"), "flipper_length_mm", line)?.unwrap_or(0.0);
    let body_mass_g = parse_measurement(field("body_mass_g"), "body_mass_g", line)?.unwrap_or(0.0);

    Ok(Some(PenguinRow {
        species,
        island: field("island").to_string(),
        bill_length_mm,
        bill_depth_mm,
        flipper_length_mm,
        body_mass_g,
        sex: field("sex").to_string(),
    }))
}

/// Parse a numeric measurement. `""`/`NA` mean "missing" (`Ok(None)`);
/// anything else that fails to parse, or is non-finite, is a dataset error.
fn parse_measurement(raw: &str, name: &str, line: usize) -> Result<Option<f64>, AppError> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("na") {
        return Ok(None);
    }

    let value: f64 = raw.parse().map_err(|_| {
        AppError::new(2, format!("Dataset line {line}: invalid {name} '{raw}'."))
    })?;
    if !value.is_finite() {
        return Err(AppError::new(
            2,
            format!("Dataset line {line}: non-finite {name} '{raw}'."),
        ));
    }

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_dataset_loads() {
        let rows = load_penguins().unwrap();
        assert_eq!(rows.len(), 120);
    }

    #[test]
    fn bundled_dataset_has_all_species() {
        let rows = load_penguins().unwrap();
        let stats = dataset_stats(&rows);
        for (species, count) in stats.species_counts {
            assert_eq!(count, 40, "unexpected count for {}", species.display_name());
        }
        assert!(stats.x_min < stats.x_max);
        assert!(stats.y_min < stats.y_max);
    }

    #[test]
    fn missing_measurements_are_skipped() {
        let csv = "species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex\n\
                   Adelie,Dream,39.1,18.7,181,3750,male\n\
                   Adelie,Dream,NA,17.2,186,3800,female\n\
                   Gentoo,Biscoe,46.1,,211,4500,male\n";
        let rows = parse_penguins(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].species, Species::Adelie);
    }

    #[test]
    fn unknown_species_is_an_error() {
        let csv = "species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex\n\
                   Emperor,Dream,39.1,18.7,181,3750,male\n";
        let err = parse_penguins(csv).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("unknown species"));
    }

    #[test]
    fn missing_column_is_an_error() {
        let csv = "species,island,bill_length_mm\nAdelie,Dream,39.1\n";
        let err = parse_penguins(csv).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("bill_depth_mm"));
    }
}
