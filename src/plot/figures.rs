//! PNG figure rendering via Plotters.
//!
//! Three artifacts per run:
//! - `overall.png`: all points pooled, one trendline
//! - `by_species.png`: points colored per species, one trendline per species
//! - `side_by_side.png`: both views in a single bitmap, split horizontally
//!
//! The drawing helpers are data-driven: bounds and lines are computed from the
//! fit outputs, so the renderer has no knowledge of how fits were produced.

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::domain::{
    FitSet, GroupFit, GroupLabel, PenguinRow, RunConfig, Species, TrendLine, X_LABEL, Y_LABEL,
};
use crate::error::AppError;

/// Where the three figures of a run were written.
#[derive(Debug, Clone)]
pub struct FigurePaths {
    pub overall: PathBuf,
    pub by_species: PathBuf,
    pub side_by_side: PathBuf,
}

// Okabe-Ito palette: distinguishable in print and for most color-vision
// deficiencies, which matters for an educational figure.
const ADELIE_COLOR: RGBColor = RGBColor(230, 159, 0);
const CHINSTRAP_COLOR: RGBColor = RGBColor(86, 180, 233);
const GENTOO_COLOR: RGBColor = RGBColor(0, 158, 115);
const OVERALL_LINE_COLOR: RGBColor = RGBColor(213, 94, 0);
const POOLED_POINT_COLOR: RGBColor = RGBColor(110, 110, 110);
const LIGHT_MESH_COLOR: RGBColor = RGBColor(235, 235, 235);

fn species_color(species: Species) -> RGBColor {
    match species {
        Species::Adelie => ADELIE_COLOR,
        Species::Chinstrap => CHINSTRAP_COLOR,
        Species::Gentoo => GENTOO_COLOR,
    }
}

/// Render all three figures into `out_dir`.
pub fn render_figures(
    out_dir: &Path,
    rows: &[PenguinRow],
    fits: &FitSet,
    config: &RunConfig,
) -> Result<FigurePaths, AppError> {
    create_dir_all(out_dir).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create output dir '{}': {e}", out_dir.display()),
        )
    })?;

    let width = config.fig_width.max(64);
    let height = config.fig_height.max(64);

    let paths = FigurePaths {
        overall: out_dir.join("overall.png"),
        by_species: out_dir.join("by_species.png"),
        side_by_side: out_dir.join("side_by_side.png"),
    };

    {
        let root = BitMapBackend::new(&paths.overall, (width, height)).into_drawing_area();
        draw_overall(&root, rows, &fits.overall)
            .and_then(|()| root.present().map_err(Into::into))
            .map_err(|e| render_error(&paths.overall, e))?;
    }

    {
        let root = BitMapBackend::new(&paths.by_species, (width, height)).into_drawing_area();
        draw_by_species(&root, rows, fits)
            .and_then(|()| root.present().map_err(Into::into))
            .map_err(|e| render_error(&paths.by_species, e))?;
    }

    {
        let root = BitMapBackend::new(&paths.side_by_side, (width.saturating_mul(2), height))
            .into_drawing_area();
        let halves = root.split_evenly((1, 2));
        draw_overall(&halves[0], rows, &fits.overall)
            .and_then(|()| draw_by_species(&halves[1], rows, fits))
            .and_then(|()| root.present().map_err(Into::into))
            .map_err(|e| render_error(&paths.side_by_side, e))?;
    }

    Ok(paths)
}

fn render_error(path: &Path, e: Box<dyn std::error::Error>) -> AppError {
    AppError::new(2, format!("Failed to render '{}': {e}", path.display()))
}

/// The aggregate view: pooled scatter + one trendline.
fn draw_overall(
    area: &DrawingArea<BitMapBackend, Shift>,
    rows: &[PenguinRow],
    overall: &GroupFit,
) -> Result<(), Box<dyn std::error::Error>> {
    area.fill(&WHITE)?;

    let (x_range, y_range) = data_bounds(rows);
    let mut chart = ChartBuilder::on(area)
        .caption("All penguins pooled", ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(48)
        .build_cartesian_2d(x_range.clone(), y_range)?;

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .light_line_style(&LIGHT_MESH_COLOR)
        .draw()?;

    chart.draw_series(rows.iter().map(|r| {
        Circle::new(
            (r.bill_length_mm, r.bill_depth_mm),
            3,
            POOLED_POINT_COLOR.filled(),
        )
    }))?;

    chart
        .draw_series(LineSeries::new(
            line_endpoints(&overall.line, x_range.start, x_range.end),
            OVERALL_LINE_COLOR.stroke_width(3),
        ))?
        .label(format!("OLS slope {:+.3}", overall.line.slope))
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 18, y)], OVERALL_LINE_COLOR.stroke_width(3))
        });

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    Ok(())
}

/// The grouped view: per-species scatter and trendlines.
fn draw_by_species(
    area: &DrawingArea<BitMapBackend, Shift>,
    rows: &[PenguinRow],
    fits: &FitSet,
) -> Result<(), Box<dyn std::error::Error>> {
    area.fill(&WHITE)?;

    let (x_range, y_range) = data_bounds(rows);
    let mut chart = ChartBuilder::on(area)
        .caption("Split by species", ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(48)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .light_line_style(&LIGHT_MESH_COLOR)
        .draw()?;

    for group in &fits.groups {
        let GroupLabel::Species(species) = group.label else {
            continue;
        };
        let color = species_color(species);

        chart.draw_series(
            rows.iter()
                .filter(|r| r.species == species)
                .map(|r| Circle::new((r.bill_length_mm, r.bill_depth_mm), 3, color.filled())),
        )?;

        // Clip each trendline to its own cluster so the lines read as
        // per-group statements rather than competing global fits.
        let (gx_min, gx_max) = species_x_bounds(rows, species);
        chart
            .draw_series(LineSeries::new(
                line_endpoints(&group.line, gx_min, gx_max),
                color.stroke_width(3),
            ))?
            .label(format!(
                "{} (slope {:+.3})",
                species.display_name(),
                group.line.slope
            ))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(3))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    Ok(())
}

fn line_endpoints(line: &TrendLine, x0: f64, x1: f64) -> Vec<(f64, f64)> {
    vec![(x0, line.predict(x0)), (x1, line.predict(x1))]
}

fn data_bounds(rows: &[PenguinRow]) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
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
    if !(x_min.is_finite() && x_max > x_min) {
        (x_min, x_max) = (30.0, 60.0);
    }
    if !(y_min.is_finite() && y_max > y_min) {
        (y_min, y_max) = (13.0, 22.0);
    }

    let x_pad = (x_max - x_min) * 0.05;
    let y_pad = (y_max - y_min) * 0.05;
    (
        (x_min - x_pad)..(x_max + x_pad),
        (y_min - y_pad)..(y_max + y_pad),
    )
}

fn species_x_bounds(rows: &[PenguinRow], species: Species) -> (f64, f64) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    for row in rows.iter().filter(|r| r.species == species) {
        x_min = x_min.min(row.bill_length_mm);
        x_max = x_max.max(row.bill_length_mm);
    }
    if x_min.is_finite() && x_max > x_min {
        (x_min, x_max)
    } else {
        (30.0, 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_penguins;
    use crate::fit::fit_dataset;

    const PNG_MAGIC: [u8; 4] = [0x89, b'P', b'N', b'G'];

    #[test]
    fn renders_three_png_artifacts() {
        let rows = load_penguins().unwrap();
        let fits = fit_dataset(&rows).unwrap();
        let config = RunConfig {
            out_dir: std::env::temp_dir().join("penguin-paradox-figures-test"),
            fig_width: 320,
            fig_height: 240,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_results: None,
            export_trends: None,
        };

        let paths = render_figures(&config.out_dir, &rows, &fits, &config).unwrap();
        for path in [&paths.overall, &paths.by_species, &paths.side_by_side] {
            let bytes = std::fs::read(path).unwrap();
            assert!(bytes.len() > PNG_MAGIC.len(), "{} is empty", path.display());
            assert_eq!(&bytes[..4], &PNG_MAGIC, "{} is not a PNG", path.display());
        }
    }
}
