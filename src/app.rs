//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the fit pipeline
//! - prints the summary / ASCII plot
//! - renders figures and the narrative
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, FitArgs, PlotArgs, ReportArgs};
use crate::domain::RunConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `penguins` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `penguins` (and `penguins -o figs`) to behave like
    // `penguins report ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the one-command UX the demo is meant to have.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Fit(args) => handle_fit(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let config = run_config_from_report_args(&args);
    let run = pipeline::run_fit()?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.stats, &run.fits, &run.finding)
    );

    let figures = crate::plot::render_figures(&config.out_dir, &run.rows, &run.fits, &config)?;
    let narrative_path = config.out_dir.join("report.md");
    crate::report::write_narrative(&narrative_path, &run.stats, &run.fits, &run.finding, &figures)?;

    println!("Figures written to '{}'.", config.out_dir.display());
    println!("Narrative written to '{}'.", narrative_path.display());

    write_exports(&config, &run)?;
    Ok(())
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = run_config_from_fit_args(&args);
    let run = pipeline::run_fit()?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.stats, &run.fits, &run.finding)
    );

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.rows,
            &run.fits,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    write_exports(&config, &run)?;
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let trends = crate::io::read_trends_json(&args.trends)?;
    let fits = crate::io::fit_set_from_trends(&trends)?;

    // The scatter points always come from the bundled dataset; the trends file
    // only replaces the fitting step.
    let rows = crate::data::load_penguins()?;

    let config = RunConfig {
        out_dir: args.out_dir,
        fig_width: args.fig_width,
        fig_height: args.fig_height,
        plot: false,
        plot_width: 0,
        plot_height: 0,
        export_results: None,
        export_trends: None,
    };
    crate::plot::render_figures(&config.out_dir, &rows, &fits, &config)?;

    println!(
        "Figures re-rendered from '{}' into '{}'.",
        args.trends.display(),
        config.out_dir.display()
    );
    Ok(())
}

fn write_exports(config: &RunConfig, run: &pipeline::RunOutput) -> Result<(), AppError> {
    if let Some(path) = &config.export_results {
        crate::io::write_results_csv(path, &run.rows, &run.fits)?;
        println!("Results exported to '{}'.", path.display());
    }
    if let Some(path) = &config.export_trends {
        crate::io::write_trends_json(path, &run.fits, &run.stats)?;
        println!("Trends exported to '{}'.", path.display());
    }
    Ok(())
}

fn run_config_from_report_args(args: &ReportArgs) -> RunConfig {
    RunConfig {
        out_dir: args.out_dir.clone(),
        fig_width: args.fig_width,
        fig_height: args.fig_height,
        plot: false,
        plot_width: 0,
        plot_height: 0,
        export_results: args.export.clone(),
        export_trends: args.export_trends.clone(),
    }
}

fn run_config_from_fit_args(args: &FitArgs) -> RunConfig {
    RunConfig {
        out_dir: std::path::PathBuf::new(),
        fig_width: 0,
        fig_height: 0,
        plot: args.plot_enabled(),
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_trends: args.export_trends.clone(),
    }
}

/// Rewrite argv so `penguins` defaults to `penguins report`.
///
/// Rules:
/// - `penguins`                      -> `penguins report`
/// - `penguins -o figs ...`          -> `penguins report -o figs ...`
/// - `penguins --help/--version/-h`  -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("report".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "report" | "fit" | "plot");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "report flags".
    if arg1.starts_with('-') {
        argv.insert(1, "report".to_string());
        return argv;
    }

    // Otherwise, leave as-is (clap will produce the error message).
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_becomes_report() {
        assert_eq!(
            rewrite_args(argv(&["penguins"])),
            argv(&["penguins", "report"])
        );
    }

    #[test]
    fn leading_flag_becomes_report_flag() {
        assert_eq!(
            rewrite_args(argv(&["penguins", "-o", "figs"])),
            argv(&["penguins", "report", "-o", "figs"])
        );
    }

    #[test]
    fn explicit_subcommands_are_untouched() {
        assert_eq!(
            rewrite_args(argv(&["penguins", "fit", "--no-plot"])),
            argv(&["penguins", "fit", "--no-plot"])
        );
    }

    #[test]
    fn help_is_untouched() {
        assert_eq!(rewrite_args(argv(&["penguins", "--help"])), argv(&["penguins", "--help"]));
    }
}
