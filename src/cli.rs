use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{
	DEFAULT_CENTER_RUNS, DEFAULT_COMPARISON_GROUP, DEFAULT_MAIN_GROUP, DEFAULT_PERCENTILE,
	DEFAULT_TEST_FRACTION, Percentile, TestFraction,
};
use crate::processing::DistanceMetric;

fn parse_fraction(s: &str) -> Result<f64, String> {
	let val: f64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	TestFraction::new(val).map(|f| f.value()).map_err(|e| e.to_string())
}

fn parse_percentile(s: &str) -> Result<f64, String> {
	let val: f64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	Percentile::new(val).map(|p| p.value()).map_err(|e| e.to_string())
}

fn styles() -> Styles {
	let blue = Some(Color::Ansi(AnsiColor::Blue));
	Styles::styled()
		.header(Style::new().bold().fg_color(blue))
		.usage(Style::new().bold().fg_color(blue))
		.literal(Style::new().fg_color(blue))
		.placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
		.valid(Style::new().fg_color(blue))
		.invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))))
}

#[derive(Parser, Debug)]
#[command(
	name = "lookalike",
	author,
	version,
	about = "Medoid-based lookalike classifier for behavior embeddings",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {bin} {run}      {run_args}   {run_desc}
  {bin} {score}    {score_args}   {score_desc}
  {bin} {centers}  {centers_args}             {centers_desc}",
		title = "Examples:".bright_blue().bold(),
		bin = "lookalike".bright_blue(),
		run = "run".yellow(),
		run_args = "-P brand.json -C merge.json -p 80 --save brand",
		run_desc = "Build and evaluate a golden seed".dimmed(),
		score = "score".yellow(),
		score_args = "-s brand.msgpack -i audience.json --export -",
		score_desc = "Classify a new population".dimmed(),
		centers = "centers".yellow(),
		centers_args = "-P brand.json -n 50",
		centers_desc = "Medoid stability across splits".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Compute the golden seed from a positive cohort and evaluate it
	Run {
		/// Positive cohort dataset (.json or .msgpack)
		#[arg(short = 'P', long = "positive", value_name = "PATH")]
		positive: PathBuf,

		/// Comparison population dataset (.json or .msgpack)
		#[arg(short = 'C', long = "comparison", value_name = "PATH")]
		comparison: PathBuf,

		/// Group tag of the positive cohort
		#[arg(long = "main-group", default_value = DEFAULT_MAIN_GROUP)]
		main_group: String,

		/// Group tag of the comparison population
		#[arg(long = "comparison-group", default_value = DEFAULT_COMPARISON_GROUP)]
		comparison_group: String,

		/// Held-out share of the positive cohort
		#[arg(short = 't', long = "test-fraction", default_value_t = DEFAULT_TEST_FRACTION, value_parser = parse_fraction)]
		test_fraction: f64,

		/// Percentile of pool scores used as the threshold (0-100)
		#[arg(short = 'p', long = "percentile", default_value_t = DEFAULT_PERCENTILE, value_parser = parse_percentile)]
		percentile: f64,

		/// Random seed for the train/test partition (default: $LOOKALIKE_SEED or random)
		#[arg(long = "seed")]
		seed: Option<u64>,

		/// Dissimilarity used for the medoid
		#[arg(long = "metric", value_enum, default_value_t = DistanceMetric::Cosine)]
		metric: DistanceMetric,

		/// Save the golden seed (MessagePack)
		#[arg(long = "save", value_name = "PATH")]
		save: Option<PathBuf>,

		/// Export classified pool as JSON to file, or "-" for stdout
		#[arg(short = 'e', long = "export", value_name = "PATH")]
		export: Option<PathBuf>,
	},

	/// Score a population against a saved golden seed
	Score {
		/// Golden seed written by `run --save`
		#[arg(short = 's', long = "seed-file", value_name = "PATH")]
		seed_file: PathBuf,

		/// Population dataset to classify
		#[arg(short = 'i', long = "input", value_name = "PATH")]
		input: PathBuf,

		/// Group tag for the population rows
		#[arg(short = 'g', long = "group", default_value = "audience")]
		group: String,

		/// Override the seed's percentile
		#[arg(short = 'p', long = "percentile", value_parser = parse_percentile)]
		percentile: Option<f64>,

		/// Export classified population as JSON to file, or "-" for stdout
		#[arg(short = 'e', long = "export", value_name = "PATH")]
		export: Option<PathBuf>,
	},

	/// Repeat partition + medoid to see how stable the center is
	Centers {
		/// Positive cohort dataset (.json or .msgpack)
		#[arg(short = 'P', long = "positive", value_name = "PATH")]
		positive: PathBuf,

		/// Group tag of the positive cohort
		#[arg(long = "main-group", default_value = DEFAULT_MAIN_GROUP)]
		main_group: String,

		/// Held-out share of the positive cohort
		#[arg(short = 't', long = "test-fraction", default_value_t = DEFAULT_TEST_FRACTION, value_parser = parse_fraction)]
		test_fraction: f64,

		/// Number of repeated partitions
		#[arg(short = 'n', long = "runs", default_value_t = DEFAULT_CENTER_RUNS)]
		runs: usize,

		/// Base random seed; run i uses seed + i
		#[arg(long = "seed")]
		seed: Option<u64>,

		/// Number of top centers to list
		#[arg(short = 'l', long = "limit", default_value_t = 10)]
		limit: usize,
	},

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}
