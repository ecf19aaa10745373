mod app;
mod chart;
mod color;
mod confirm;
mod data;
mod export;
mod pipeline;
mod state;
mod style;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, ValueHint};

use chart::Chart;
use confirm::{AlwaysNo, AlwaysYes, Confirm, Prompt};
use data::loader::{Layout, DEFAULT_ID_COLUMN};
use data::smooth::DEFAULT_SPAN;
use export::SaveOutcome;
use pipeline::PipelineOptions;
use style::{PlotStyle, DEFAULT_DPI, MAX_DPI};

#[derive(Parser, Debug)]
#[command(name = "gecko-plot", version, about = "Tool for plotting the fatness of geckos", long_about = None)]
struct Cli {
    /// Input CSV files to parse (repeatable)
    #[arg(
        short,
        long = "input",
        value_name = "FILE",
        num_args = 1..,
        action = ArgAction::Append,
        required = true,
        value_hint = ValueHint::FilePath
    )]
    inputs: Vec<PathBuf>,

    /// Path to file for saving; opens a window when omitted
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Names of geckos to be output, in this order
    #[arg(short, long, value_name = "NAME", num_args = 1..)]
    geckos: Vec<String>,

    /// DPI for output files
    #[arg(long, default_value_t = DEFAULT_DPI, value_parser = clap::value_parser!(u32).range(1..=MAX_DPI as i64))]
    dpi: u32,

    /// Overwrite an existing output file without asking
    #[arg(short, long, action = ArgAction::SetTrue)]
    force: bool,

    /// Never overwrite an existing output file
    #[arg(short = 'n', long, action = ArgAction::SetTrue, conflicts_with = "force")]
    no_clobber: bool,

    /// Read gecko names from this column instead of the file names
    #[arg(
        long,
        value_name = "COLUMN",
        num_args = 0..=1,
        default_missing_value = DEFAULT_ID_COLUMN
    )]
    id_column: Option<String>,

    /// Smoothing span of the rolling series
    #[arg(long, default_value_t = DEFAULT_SPAN as u64, value_parser = clap::value_parser!(u64).range(1..))]
    span: u64,

    /// Plot the raw series only
    #[arg(long, action = ArgAction::SetTrue)]
    no_rolling: bool,

    /// JSON file overriding the chart style
    #[arg(long, value_hint = ValueHint::FilePath)]
    style: Option<PathBuf>,
}

impl Cli {
    fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            layout: match &self.id_column {
                Some(column) => Layout::Column(column.clone()),
                None => Layout::FileName,
            },
            wanted: self.geckos.clone(),
            span: (!self.no_rolling).then_some(self.span as usize),
        }
    }

    fn confirmer(&self) -> Box<dyn Confirm> {
        if self.force {
            Box::new(AlwaysYes)
        } else if self.no_clobber {
            Box::new(AlwaysNo)
        } else {
            Box::new(Prompt::stdio())
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let style = match &cli.style {
        Some(path) => PlotStyle::from_file(path)?,
        None => PlotStyle::default(),
    };

    let collection = match pipeline::run(&cli.inputs, &cli.pipeline_options()) {
        Ok(collection) => collection,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };
    for series in &collection {
        log::debug!("Plotting {} ({} records)", series.name, series.len());
    }

    let chart = Chart::build(&collection, &style).context("nothing to plot")?;

    match &cli.output {
        None => app::show_window(chart, style).map_err(|e| anyhow!("opening window: {e}"))?,
        Some(path) => {
            let mut confirm = cli.confirmer();
            let outcome = export::save_chart(&chart, &style, path, cli.dpi, confirm.as_mut())
                .with_context(|| format!("saving {}", path.display()))?;
            match outcome {
                SaveOutcome::Saved => println!("Figure saved as {}", path.display()),
                SaveOutcome::Declined | SaveOutcome::Protected => {
                    log::warn!("Protected file {}. Figure not saved.", path.display())
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn repeated_inputs_are_flattened_in_order() {
        let cli = Cli::try_parse_from([
            "gecko-plot", "-i", "a.csv", "b.csv", "--input", "c.csv", "-g", "lu", "murphey",
        ])
        .unwrap();
        assert_eq!(
            cli.inputs,
            vec![PathBuf::from("a.csv"), PathBuf::from("b.csv"), PathBuf::from("c.csv")]
        );
        assert_eq!(cli.geckos, vec!["lu", "murphey"]);
        assert_eq!(cli.dpi, 96);
        assert!(cli.output.is_none());
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["gecko-plot"]).is_err());
    }

    #[test]
    fn force_conflicts_with_no_clobber() {
        assert!(Cli::try_parse_from(["gecko-plot", "-i", "a.csv", "-f", "-n"]).is_err());
    }

    #[test]
    fn dpi_and_span_must_be_positive() {
        assert!(Cli::try_parse_from(["gecko-plot", "-i", "a.csv", "--dpi", "0"]).is_err());
        assert!(Cli::try_parse_from(["gecko-plot", "-i", "a.csv", "--span", "0"]).is_err());
    }

    #[test]
    fn dpi_is_capped() {
        assert!(Cli::try_parse_from(["gecko-plot", "-i", "a.csv", "--dpi", "20000"]).is_err());
        let cli = Cli::try_parse_from(["gecko-plot", "-i", "a.csv", "--dpi", "600"]).unwrap();
        assert_eq!(cli.dpi, MAX_DPI);
    }

    #[test]
    fn default_options_smooth_per_file_series() {
        let cli = Cli::try_parse_from(["gecko-plot", "-i", "a.csv"]).unwrap();
        let options = cli.pipeline_options();
        assert_eq!(options.layout, Layout::FileName);
        assert_eq!(options.span, Some(2));
        assert!(options.wanted.is_empty());
    }

    #[test]
    fn id_column_flag_defaults_to_gecko() {
        let cli = Cli::try_parse_from(["gecko-plot", "-i", "geckos.csv", "--id-column"]).unwrap();
        assert_eq!(cli.pipeline_options().layout, Layout::Column("gecko".into()));

        let cli = Cli::try_parse_from([
            "gecko-plot", "-i", "geckos.csv", "--id-column", "name", "--no-rolling",
        ])
        .unwrap();
        let options = cli.pipeline_options();
        assert_eq!(options.layout, Layout::Column("name".into()));
        assert_eq!(options.span, None);
    }
}
