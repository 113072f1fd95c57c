//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points: first letter of the species (`A` / `C` / `G`)
//! - overall trendline: `=`
//! - per-species trendlines: `-`

use crate::domain::{FitSet, GroupLabel, PenguinRow, Species, TrendLine, X_LABEL, Y_LABEL};

/// Render the scatter + trendlines as a fixed-size character grid.
pub fn render_ascii_plot(rows: &[PenguinRow], fits: &FitSet, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = x_range(rows).unwrap_or((30.0, 60.0));

    // y-range covers the observed points and the overall trendline; per-species
    // lines stay inside their own clusters so they cannot extend it.
    let overall = sample_line(&fits.overall.line, x_min, x_max, width);
    let (y_min, y_max) = y_range(rows, &overall).unwrap_or((13.0, 22.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw lines first (so points can overlay).
    draw_polyline(&mut grid, &overall, x_min, x_max, y_min, y_max, '=');
    for group in &fits.groups {
        let GroupLabel::Species(species) = group.label else {
            continue;
        };
        let Some((gx_min, gx_max)) = species_x_range(rows, species) else {
            continue;
        };
        let line = sample_line(&group.line, gx_min, gx_max, width);
        draw_polyline(&mut grid, &line, x_min, x_max, y_min, y_max, '-');
    }

    for row in rows {
        let x = map_x(row.bill_length_mm, x_min, x_max, width);
        let y = map_y(row.bill_depth_mm, y_min, y_max, height);
        grid[y][x] = species_glyph(row.species);
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {X_LABEL}=[{x_min:.3}, {x_max:.3}] | {Y_LABEL}=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn species_glyph(species: Species) -> char {
    match species {
        Species::Adelie => 'A',
        Species::Chinstrap => 'C',
        Species::Gentoo => 'G',
    }
}

fn sample_line(line: &TrendLine, x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = x_min + u * (x_max - x_min);
        out.push((x, line.predict(x)));
    }
    out
}

fn x_range(rows: &[PenguinRow]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for row in rows {
        min_x = min_x.min(row.bill_length_mm);
        max_x = max_x.max(row.bill_length_mm);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn species_x_range(rows: &[PenguinRow], species: Species) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for row in rows.iter().filter(|r| r.species == species) {
        min_x = min_x.min(row.bill_length_mm);
        max_x = max_x.max(row.bill_length_mm);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range(rows: &[PenguinRow], line: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for row in rows {
        min_y = min_y.min(row.bill_depth_mm);
        max_y = max_y.max(row.bill_depth_mm);
    }
    for &(_, y) in line {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_polyline(
    grid: &mut [Vec<char>],
    line: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    ch: char,
) {
    if line.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in line {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_segment(grid, c0, r0, col, row, ch);
        } else {
            grid[row][col] = ch;
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish). Only blank cells are written, so
/// earlier layers keep priority.
fn draw_segment(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitQuality, GroupFit};

    fn penguin(species: Species, length: f64, depth: f64) -> PenguinRow {
        PenguinRow {
            species,
            island: "Dream".to_string(),
            bill_length_mm: length,
            bill_depth_mm: depth,
            flipper_length_mm: 190.0,
            body_mass_g: 3800.0,
            sex: "female".to_string(),
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let rows = vec![
            penguin(Species::Adelie, 40.0, 18.0),
            penguin(Species::Adelie, 50.0, 14.0),
        ];
        let fits = FitSet {
            overall: GroupFit {
                label: GroupLabel::Overall,
                line: TrendLine {
                    slope: -0.4,
                    intercept: 34.0,
                },
                quality: FitQuality {
                    n: 2,
                    rmse: 0.0,
                    r2: 1.0,
                },
            },
            groups: vec![],
        };

        let txt = render_ascii_plot(&rows, &fits, 10, 5);
        let expected = concat!(
            "Plot: bill length (mm)=[40.000, 50.000] | bill depth (mm)=[13.80, 18.20]\n",
            "A         \n",
            " ===      \n",
            "    ==    \n",
            "      === \n",
            "         A\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn plot_is_deterministic_on_bundled_data() {
        let rows = crate::data::load_penguins().unwrap();
        let fits = crate::fit::fit_dataset(&rows).unwrap();
        let a = render_ascii_plot(&rows, &fits, 100, 25);
        let b = render_ascii_plot(&rows, &fits, 100, 25);
        assert_eq!(a, b);
        assert_eq!(a.lines().count(), 26);
        assert!(a.contains('A') && a.contains('C') && a.contains('G'));
        assert!(a.contains('=') && a.contains('-'));
    }
}
