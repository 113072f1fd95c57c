//! Command-line parsing for the Simpson's paradox demo.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the fitting/plotting code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "penguins",
    version,
    about = "Simpson's paradox on penguin bill measurements"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full pipeline: fit, render PNG figures, write the markdown narrative.
    ///
    /// This is the default: bare `penguins` behaves like `penguins report`.
    Report(ReportArgs),
    /// Fit trendlines and print the summary + terminal plot (no PNG output).
    Fit(FitArgs),
    /// Re-render figures from a previously exported trends JSON.
    Plot(PlotArgs),
}

/// Options for the full report pipeline.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// Directory for figures and the narrative.
    #[arg(short = 'o', long, default_value = "out")]
    pub out_dir: PathBuf,

    /// Figure width (pixels).
    #[arg(long, default_value_t = 900)]
    pub fig_width: u32,

    /// Figure height (pixels).
    #[arg(long, default_value_t = 600)]
    pub fig_height: u32,

    /// Export per-point results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export fitted trendlines to JSON.
    #[arg(long = "export-trends")]
    pub export_trends: Option<PathBuf>,
}

/// Options for fitting without rendering PNGs.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, overrides_with = "no_plot")]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long, overrides_with = "plot")]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export per-point results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export fitted trendlines to JSON.
    #[arg(long = "export-trends")]
    pub export_trends: Option<PathBuf>,
}

impl FitArgs {
    /// Whether the terminal plot should render. The flags override each
    /// other, so the last of `--plot` / `--no-plot` wins.
    pub fn plot_enabled(&self) -> bool {
        !self.no_plot
    }
}

/// Options for re-rendering figures from a saved trends file.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Trends JSON file produced by `penguins report --export-trends`.
    #[arg(long, value_name = "JSON")]
    pub trends: PathBuf,

    /// Directory for the re-rendered figures.
    #[arg(short = 'o', long, default_value = "out")]
    pub out_dir: PathBuf,

    /// Figure width (pixels).
    #[arg(long, default_value_t = 900)]
    pub fig_width: u32,

    /// Figure height (pixels).
    #[arg(long, default_value_t = 600)]
    pub fig_height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_fit(extra: &[&str]) -> FitArgs {
        let mut argv = vec!["penguins", "fit"];
        argv.extend_from_slice(extra);
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Command::Fit(args) => args,
            other => panic!("expected fit subcommand, got {other:?}"),
        }
    }

    #[test]
    fn terminal_plot_is_on_by_default() {
        assert!(parse_fit(&[]).plot_enabled());
    }

    #[test]
    fn no_plot_disables_the_terminal_plot() {
        assert!(!parse_fit(&["--no-plot"]).plot_enabled());
    }

    #[test]
    fn plot_reenables_after_no_plot() {
        assert!(parse_fit(&["--no-plot", "--plot"]).plot_enabled());
        assert!(!parse_fit(&["--plot", "--no-plot"]).plot_enabled());
    }
}
