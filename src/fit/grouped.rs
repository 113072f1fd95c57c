//! Grouped fitting: the aggregate trendline plus one per species.
//!
//! The grouping key is fixed (species); the interesting property of the run is
//! how the per-group lines relate to the aggregate one, which `paradox` judges.

use crate::domain::{FitSet, GroupFit, GroupLabel, Observation, PenguinRow, Species};
use crate::error::AppError;
use crate::fit::line::fit_line;

/// Fit the full dataset and every species partition.
///
/// An empty or degenerate partition fails the run with the group named in the
/// error, rather than silently dropping the group from the output.
pub fn fit_dataset(rows: &[PenguinRow]) -> Result<FitSet, AppError> {
    let all: Vec<Observation> = rows.iter().map(Observation::from).collect();
    let overall = fit_group(GroupLabel::Overall, &all)?;

    let mut groups = Vec::with_capacity(Species::ALL.len());
    for species in Species::ALL {
        let obs: Vec<Observation> = rows
            .iter()
            .filter(|r| r.species == species)
            .map(Observation::from)
            .collect();
        groups.push(fit_group(GroupLabel::Species(species), &obs)?);
    }

    Ok(FitSet { overall, groups })
}

fn fit_group(label: GroupLabel, obs: &[Observation]) -> Result<GroupFit, AppError> {
    let (line, quality) = fit_line(obs).map_err(|e| {
        AppError::new(e.exit_code(), format!("{} fit: {e}", label.display_name()))
    })?;
    Ok(GroupFit {
        label,
        line,
        quality,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_penguins;

    #[test]
    fn overall_slope_is_positive_on_bundled_data() {
        let rows = load_penguins().unwrap();
        let fits = fit_dataset(&rows).unwrap();
        assert!(
            fits.overall.line.slope > 0.0,
            "overall slope {} should be positive",
            fits.overall.line.slope
        );
    }

    #[test]
    fn each_species_slope_is_negative_on_bundled_data() {
        let rows = load_penguins().unwrap();
        let fits = fit_dataset(&rows).unwrap();
        assert_eq!(fits.groups.len(), 3);
        for group in &fits.groups {
            assert!(
                group.line.slope < 0.0,
                "{} slope {} should be negative",
                group.label.display_name(),
                group.line.slope
            );
        }
    }

    #[test]
    fn refitting_bundled_data_is_deterministic() {
        let rows = load_penguins().unwrap();
        let first = fit_dataset(&rows).unwrap();
        let second = fit_dataset(&rows).unwrap();

        assert_eq!(
            first.overall.line.slope.to_bits(),
            second.overall.line.slope.to_bits()
        );
        for (a, b) in first.groups.iter().zip(&second.groups) {
            assert_eq!(a.line.slope.to_bits(), b.line.slope.to_bits());
            assert_eq!(a.line.intercept.to_bits(), b.line.intercept.to_bits());
        }
    }

    #[test]
    fn missing_species_partition_names_the_group() {
        let rows: Vec<PenguinRow> = load_penguins()
            .unwrap()
            .into_iter()
            .filter(|r| r.species != Species::Gentoo)
            .collect();
        let err = fit_dataset(&rows).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("Gentoo"));
    }
}
