//! Terminal output: run summary and the trendline table.

use crate::data::DatasetStats;
use crate::domain::{FitSet, ParadoxFinding, X_LABEL, Y_LABEL};

/// Format the full run summary (dataset stats + trendline table + verdict).
pub fn format_run_summary(
    stats: &DatasetStats,
    fits: &FitSet,
    finding: &ParadoxFinding,
) -> String {
    let mut out = String::new();

    out.push_str("=== penguins - Simpson's paradox demo ===\n");
    let counts: Vec<String> = stats
        .species_counts
        .iter()
        .map(|(s, n)| format!("{}={n}", s.display_name()))
        .collect();
    out.push_str(&format!(
        "Dataset: bundled penguins | n={} ({})\n",
        stats.n_rows,
        counts.join(", ")
    ));
    out.push_str(&format!(
        "X: {X_LABEL} [{:.1}, {:.1}]\n",
        stats.x_min, stats.x_max
    ));
    out.push_str(&format!(
        "Y: {Y_LABEL} [{:.1}, {:.1}]\n",
        stats.y_min, stats.y_max
    ));

    out.push_str("\nTrendlines:\n");
    out.push_str(&format_trend_table(fits));

    out.push_str("\nParadox check:\n");
    out.push_str(&format!(
        "- aggregate slope: {:+.4} ({} {} with {})\n",
        finding.overall_slope,
        Y_LABEL,
        slope_direction(finding.overall_slope),
        X_LABEL,
    ));
    for (species, slope) in &finding.group_slopes {
        out.push_str(&format!(
            "- {:<9} slope: {:+.4}\n",
            species.display_name(),
            slope
        ));
    }
    if finding.reversed {
        out.push_str(
            "- verdict: the trend reverses under species grouping (Simpson's paradox)\n",
        );
    } else {
        out.push_str("- verdict: no sign reversal between aggregate and groups\n");
    }

    out
}

/// Describe a slope's direction in words. A zero slope is neither rising
/// nor falling.
fn slope_direction(slope: f64) -> &'static str {
    if slope > 0.0 {
        "rises"
    } else if slope < 0.0 {
        "falls"
    } else {
        "stays flat"
    }
}

/// Format the per-group trendline table.
pub fn format_trend_table(fits: &FitSet) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<10} {:>5} {:>9} {:>10} {:>8} {:>7}\n",
        "group", "n", "slope", "intercept", "rmse", "r2"
    ));
    out.push_str(&format!(
        "{:-<10} {:-<5} {:-<9} {:-<10} {:-<8} {:-<7}\n",
        "", "", "", "", "", ""
    ));

    for fit in std::iter::once(&fits.overall).chain(&fits.groups) {
        out.push_str(&format!(
            "{:<10} {:>5} {:>+9.4} {:>10.4} {:>8.3} {:>7.3}\n",
            fit.label.display_name(),
            fit.quality.n,
            fit.line.slope,
            fit.line.intercept,
            fit.quality.rmse,
            fit.quality.r2,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{dataset_stats, load_penguins};
    use crate::fit::{assess_paradox, fit_dataset};

    #[test]
    fn summary_names_every_group_and_the_verdict() {
        let rows = load_penguins().unwrap();
        let stats = dataset_stats(&rows);
        let fits = fit_dataset(&rows).unwrap();
        let finding = assess_paradox(&fits);

        let summary = format_run_summary(&stats, &fits, &finding);
        assert!(summary.contains("Overall"));
        assert!(summary.contains("Adelie"));
        assert!(summary.contains("Chinstrap"));
        assert!(summary.contains("Gentoo"));
        assert!(summary.contains("Simpson's paradox"));
    }

    #[test]
    fn zero_slope_is_neither_rising_nor_falling() {
        assert_eq!(slope_direction(0.196), "rises");
        assert_eq!(slope_direction(-0.327), "falls");
        assert_eq!(slope_direction(0.0), "stays flat");
    }

    #[test]
    fn trend_table_has_one_row_per_fit_plus_header() {
        let rows = load_penguins().unwrap();
        let fits = fit_dataset(&rows).unwrap();
        let table = format_trend_table(&fits);
        // header + separator + overall + 3 species
        assert_eq!(table.lines().count(), 6);
    }
}
