//! Shared "fit pipeline" logic used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load bundled dataset -> fit overall + per-species -> paradox check
//!
//! Subcommands then focus on presentation (summary, figures, exports).

use log::info;

use crate::data::{dataset_stats, load_penguins, DatasetStats};
use crate::domain::{FitSet, ParadoxFinding, PenguinRow};
use crate::error::AppError;
use crate::fit::{assess_paradox, fit_dataset};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub rows: Vec<PenguinRow>,
    pub stats: DatasetStats,
    pub fits: FitSet,
    pub finding: ParadoxFinding,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit() -> Result<RunOutput, AppError> {
    let rows = load_penguins()?;
    let stats = dataset_stats(&rows);

    info!(
        "fitting {} rows ({} species groups + overall)",
        rows.len(),
        crate::domain::Species::ALL.len()
    );
    let fits = fit_dataset(&rows)?;
    let finding = assess_paradox(&fits);
    info!(
        "overall slope {:+.4}, reversal={}",
        finding.overall_slope, finding.reversed
    );

    Ok(RunOutput {
        rows,
        stats,
        fits,
        finding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_produces_consistent_outputs() {
        let run = run_fit().unwrap();
        assert_eq!(run.rows.len(), run.stats.n_rows);
        assert_eq!(run.fits.groups.len(), 3);
        assert_eq!(run.finding.group_slopes.len(), 3);
        assert!(run.finding.reversed);
    }
}
