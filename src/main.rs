use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use miqscore::error::Result;
use miqscore::input::{load_sample_counts, read_text};
use miqscore::report::exemplars::load_example_data;
use miqscore::report::{DEFAULT_SORTING, ReportOptions, write_reports};
use miqscore::{MiqScoreCalculator, ScoreFloor, ScoringParams, StandardReference, logging};

#[derive(Debug, Parser)]
#[command(name = "miqscore", version, about = "Score a mock community run against its standard")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score one sample and write its reports.
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Reference standard description (JSON).
    #[arg(long)]
    reference: PathBuf,
    /// Per-organism read counts (JSON object, optionally gzipped).
    #[arg(long)]
    counts: PathBuf,
    /// Analysis method, e.g. 16S or WGS.
    #[arg(long)]
    method: String,
    #[arg(long)]
    out: PathBuf,
    #[arg(long)]
    sample_id: Option<String>,
    /// Deviation (percentage points) not counted as error.
    #[arg(long, default_value_t = 0.0)]
    tolerance: f64,
    #[arg(long, allow_negative_numbers = true, conflicts_with = "no_floor")]
    floor: Option<f64>,
    /// Report the raw score even when negative.
    #[arg(long)]
    no_floor: bool,
    #[arg(long, requires = "bad_example")]
    good_example: Option<PathBuf>,
    #[arg(long, requires = "good_example")]
    bad_example: Option<PathBuf>,
    /// HTML template with %%PLACEHOLDER%% markers.
    #[arg(long)]
    template: Option<PathBuf>,
    #[arg(long, default_value = DEFAULT_SORTING)]
    sorting: String,
}

impl RunArgs {
    fn scoring_params(&self) -> ScoringParams {
        let floor = if self.no_floor {
            ScoreFloor::None
        } else {
            self.floor.map(ScoreFloor::Value).unwrap_or_default()
        };
        ScoringParams::new(self.tolerance, floor)
    }

    fn exemplar_paths(&self) -> Option<(&Path, &Path)> {
        match (&self.good_example, &self.bad_example) {
            (Some(good), Some(bad)) => Some((good.as_path(), bad.as_path())),
            _ => None,
        }
    }
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run(args) => run_score(&args),
    }
}

fn run_score(args: &RunArgs) -> Result<()> {
    let reference = StandardReference::load(&args.reference)?;
    reference.sorting(&args.sorting)?;
    let sample = load_sample_counts(&args.counts)?;
    let calculator = MiqScoreCalculator::new(&reference, &args.method, args.scoring_params())?;
    let mut result = calculator.calculate(&sample, args.sample_id.as_deref())?;

    let exemplars = match args.exemplar_paths() {
        Some((good, bad)) => Some(load_example_data(
            good,
            bad,
            &reference,
            &args.method,
            &args.sorting,
        )?),
        None => None,
    };

    let mut options = ReportOptions {
        sorting: args.sorting.clone(),
        ..ReportOptions::default()
    };
    if let Some(path) = &args.template {
        options.template = read_text(path)?;
    }

    let paths = write_reports(&mut result, exemplars.as_ref(), &args.out, &options)?;
    println!("MIQ score: {:.2}", result.miq_score());
    println!("Report: {}", paths.json.display());
    if let Some(html) = &paths.html {
        println!("HTML report: {}", html.display());
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
