//! Markdown narrative writer.
//!
//! The narrative is the educational deliverable: the three figures embedded in
//! prose that walks a reader from the aggregate trend to the grouped one and
//! explains why they disagree. It is written next to the figures so relative
//! image links work when the directory is viewed as-is.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::data::DatasetStats;
use crate::domain::{FitSet, ParadoxFinding, X_LABEL, Y_LABEL};
use crate::error::AppError;
use crate::plot::FigurePaths;
use crate::report::format_trend_table;

/// Write the narrative markdown document.
pub fn write_narrative(
    path: &Path,
    stats: &DatasetStats,
    fits: &FitSet,
    finding: &ParadoxFinding,
    figures: &FigurePaths,
) -> Result<(), AppError> {
    let text = render_narrative(stats, fits, finding, figures);
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create narrative '{}': {e}", path.display()))
    })?;
    file.write_all(text.as_bytes())
        .map_err(|e| AppError::new(2, format!("Failed to write narrative: {e}")))?;
    Ok(())
}

/// Render the narrative as a string (split out of `write_narrative` for tests).
pub fn render_narrative(
    stats: &DatasetStats,
    fits: &FitSet,
    finding: &ParadoxFinding,
    figures: &FigurePaths,
) -> String {
    let mut out = String::new();

    out.push_str("# One dataset, two opposite stories\n\n");
    out.push_str(&format!(
        "This note looks at {} penguins and asks a simple question: as {X_LABEL} \
         grows, what happens to {Y_LABEL}? The answer depends entirely on whether \
         we remember that three different species are mixed into the table: a \
         textbook case of Simpson's paradox.\n\n",
        stats.n_rows
    ));

    out.push_str("## The aggregate view\n\n");
    out.push_str(&format!("![All penguins pooled]({})\n\n", file_name(&figures.overall)));
    out.push_str(&format!(
        "Pooling every penguin and fitting one ordinary-least-squares line gives \
         a slope of {:+.4}: longer bills appear to come with {} bills. The cloud \
         of points leans {} and the trendline follows it.\n\n",
        finding.overall_slope,
        if finding.overall_slope >= 0.0 { "deeper" } else { "shallower" },
        if finding.overall_slope >= 0.0 { "upward" } else { "downward" },
    ));

    out.push_str("## The grouped view\n\n");
    out.push_str(&format!("![Split by species]({})\n\n", file_name(&figures.by_species)));
    out.push_str(
        "Fitting the same line separately inside each species tells the opposite \
         story. Within every species, the slope is negative:\n\n",
    );
    for (species, slope) in &finding.group_slopes {
        out.push_str(&format!("- {}: {:+.4}\n", species.display_name(), slope));
    }
    out.push_str("\nThe full table of fits:\n\n```\n");
    out.push_str(&format_trend_table(fits));
    out.push_str("```\n\n");

    out.push_str("## Side by side\n\n");
    out.push_str(&format!(
        "![Aggregate vs grouped]({})\n\n",
        file_name(&figures.side_by_side)
    ));
    out.push_str(&format!(
        "Same points, same axes, opposite conclusions. {}\n\n",
        if finding.reversed {
            "Every within-species slope has the opposite sign of the aggregate one: \
             the pooled trendline describes a relationship that holds for no actual \
             penguin group."
        } else {
            "On this dataset the aggregate and within-group slopes happen to agree \
             in sign, so no reversal is visible."
        }
    ));

    out.push_str("## Why the trend flips\n\n");
    out.push_str(&format!(
        "Species is a confounding variable: it is correlated with both {X_LABEL} \
         and {Y_LABEL}. The three species occupy different corners of the plane \
         (each cluster sits up and to the right of the previous one), so a line \
         through the pooled cloud mostly measures the *between-species* drift. \
         Inside any single cluster, where the species is held fixed, the genuine \
         *within-species* relationship is the reverse. Neither line is wrong; \
         they answer different questions. The aggregate line answers \"how do \
         species differ?\", the grouped lines answer \"how do individuals within \
         a species differ?\".\n\n",
    ));

    out.push_str("## Glossary\n\n");
    out.push_str(
        "- **Simpson's paradox**: a trend present in aggregated data reverses or \
         disappears once the data is split by a confounding grouping variable.\n\
         - **Confounding variable**: a variable correlated with both the \
         independent and dependent variable that, when ignored, distorts the \
         apparent relationship between them.\n\
         - **Ordinary least squares**: fitting a straight line by minimizing the \
         sum of squared vertical distances from the points to the line.\n",
    );

    out
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{dataset_stats, load_penguins};
    use crate::fit::{assess_paradox, fit_dataset};
    use std::path::PathBuf;

    #[test]
    fn narrative_embeds_figures_and_prose() {
        let rows = load_penguins().unwrap();
        let stats = dataset_stats(&rows);
        let fits = fit_dataset(&rows).unwrap();
        let finding = assess_paradox(&fits);
        let figures = FigurePaths {
            overall: PathBuf::from("out/overall.png"),
            by_species: PathBuf::from("out/by_species.png"),
            side_by_side: PathBuf::from("out/side_by_side.png"),
        };

        let text = render_narrative(&stats, &fits, &finding, &figures);
        assert!(text.contains("![All penguins pooled](overall.png)"));
        assert!(text.contains("![Split by species](by_species.png)"));
        assert!(text.contains("![Aggregate vs grouped](side_by_side.png)"));
        assert!(text.contains("Simpson's paradox"));
        assert!(text.contains("confounding"));
        assert!(text.contains("holds for no actual"));
    }
}
