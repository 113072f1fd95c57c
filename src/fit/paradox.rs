//! Slope-sign comparison: does the aggregate trend reverse within groups?

use crate::domain::{FitSet, GroupLabel, ParadoxFinding, Species};

/// Compare the aggregate slope sign against every per-group slope sign.
pub fn assess_paradox(fits: &FitSet) -> ParadoxFinding {
    let overall_slope = fits.overall.line.slope;

    let group_slopes: Vec<(Species, f64)> = fits
        .groups
        .iter()
        .filter_map(|g| match g.label {
            GroupLabel::Species(s) => Some((s, g.line.slope)),
            GroupLabel::Overall => None,
        })
        .collect();

    let reversed = !group_slopes.is_empty()
        && group_slopes
            .iter()
            .all(|&(_, slope)| opposite_signs(overall_slope, slope));

    ParadoxFinding {
        overall_slope,
        group_slopes,
        reversed,
    }
}

fn opposite_signs(a: f64, b: f64) -> bool {
    (a > 0.0 && b < 0.0) || (a < 0.0 && b > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitQuality, GroupFit, TrendLine};

    fn group(label: GroupLabel, slope: f64) -> GroupFit {
        GroupFit {
            label,
            line: TrendLine {
                slope,
                intercept: 0.0,
            },
            quality: FitQuality {
                n: 10,
                rmse: 0.0,
                r2: 1.0,
            },
        }
    }

    #[test]
    fn paradox_holds_on_bundled_data() {
        // The headline regression test: per-group lines do not reproduce the
        // aggregate line's slope sign on the shipped dataset.
        let rows = crate::data::load_penguins().unwrap();
        let fits = crate::fit::fit_dataset(&rows).unwrap();
        let finding = assess_paradox(&fits);
        assert!(finding.reversed);
        assert!(finding.overall_slope > 0.0);
        assert_eq!(finding.group_slopes.len(), 3);
    }

    #[test]
    fn aligned_slopes_are_not_a_reversal() {
        let fits = FitSet {
            overall: group(GroupLabel::Overall, 0.4),
            groups: vec![
                group(GroupLabel::Species(Species::Adelie), 0.3),
                group(GroupLabel::Species(Species::Chinstrap), -0.2),
                group(GroupLabel::Species(Species::Gentoo), 0.5),
            ],
        };
        assert!(!assess_paradox(&fits).reversed);
    }

    #[test]
    fn fully_opposed_slopes_are_a_reversal() {
        let fits = FitSet {
            overall: group(GroupLabel::Overall, 0.4),
            groups: vec![
                group(GroupLabel::Species(Species::Adelie), -0.3),
                group(GroupLabel::Species(Species::Chinstrap), -0.2),
                group(GroupLabel::Species(Species::Gentoo), -0.5),
            ],
        };
        assert!(assess_paradox(&fits).reversed);
    }

    #[test]
    fn zero_overall_slope_is_not_a_reversal() {
        let fits = FitSet {
            overall: group(GroupLabel::Overall, 0.0),
            groups: vec![group(GroupLabel::Species(Species::Adelie), -0.3)],
        };
        assert!(!assess_paradox(&fits).reversed);
    }
}
