//! Run command - build the golden seed and evaluate it

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use colored::*;

use crate::config::{seed_from_env, Percentile, RunConfig, TestFraction};
use crate::core::Evaluation;
use crate::processing::{self, DistanceMetric, RunReport};
use crate::storage::{dataset, export, seed};
use crate::ui;

pub struct RunArgs<'a> {
	pub positive: &'a Path,
	pub comparison: &'a Path,
	pub main_group: &'a str,
	pub comparison_group: &'a str,
	pub test_fraction: f64,
	pub percentile: f64,
	pub seed: Option<u64>,
	pub metric: DistanceMetric,
	pub save: Option<&'a Path>,
	pub export: Option<&'a Path>,
}

pub fn run(args: RunArgs<'_>) -> Result<()> {
	let start = Instant::now();

	let config = RunConfig {
		metric: args.metric,
		test_fraction: TestFraction::new(args.test_fraction)?,
		percentile: Percentile::new(args.percentile)?,
		main_group: args.main_group.to_string(),
		comparison_group: args.comparison_group.to_string(),
		seed: args.seed.or_else(seed_from_env),
	};
	config.validate()?;

	ui::info(&format!("Loading positive cohort from {}", ui::path_link(args.positive, 40)));
	let positive = dataset::load(args.positive, &config.main_group)?;
	ui::info(&format!("Loading comparison population from {}", ui::path_link(args.comparison, 40)));
	let comparison = dataset::load(args.comparison, &config.comparison_group)?;

	ui::success(&format!(
		"Loaded {} '{}' and {} '{}' rows ({}D)",
		positive.set.len(),
		config.main_group,
		comparison.set.len(),
		config.comparison_group,
		positive.set.dim()
	));

	let report = processing::run(&positive.set, &comparison.set, &config)?;

	if let Some(save_path) = args.save {
		let golden = seed::from_report(&report, Some(&positive.hash));
		let written = seed::save(&golden, save_path)?;
		ui::success(&format!("Saved golden seed to {}", ui::path_link(&written, 60)));
	}

	if let Some(export_path) = args.export {
		let data = export::Export::new(
			&report.pool,
			&report.medoid,
			config.percentile.value(),
			report.threshold,
			Some(&report.evaluation),
		);
		export::write(&data, export_path)?;
		if export_path.to_str() == Some("-") {
			return Ok(());
		}
	}

	print_report(&report);
	eprintln!(
		"\n{}",
		format!("Completed in {:.1}s", start.elapsed().as_secs_f32()).dimmed()
	);

	Ok(())
}

fn print_report(report: &RunReport) {
	ui::header("Golden seed");
	eprintln!(
		"  {} cohort row {} of {} training rows",
		"Medoid:".bright_blue(),
		report.cohort_index.to_string().bright_cyan(),
		report.train_size
	);
	eprintln!("  {} {}", "Titles:".bright_blue(), truncate(&report.medoid.row.titles, 80));
	eprintln!("  {} {}", "Keywords:".bright_blue(), truncate(&report.medoid.row.keywords, 80));

	ui::header("Classification");
	eprintln!(
		"  {} P{} -> {:.4}",
		"Threshold:".bright_blue(),
		report.config.percentile.value(),
		report.threshold
	);
	eprintln!(
		"  {} {} of {} pool rows ({} held out, medoid included)",
		"Positive:".bright_blue(),
		report.positives(),
		report.pool.len(),
		report.test_size
	);

	print_evaluation(&report.evaluation, &report.config.comparison_group);
}

pub(crate) fn print_evaluation(eval: &Evaluation, comparison_group: &str) {
	ui::header(&format!("Evaluation: '{}' vs '{}'", eval.main_group, comparison_group));

	let c = &eval.counts;
	eprintln!(
		"  {} {}   {} {}",
		"TP".bright_green(),
		c.true_positive,
		"FP".bright_red(),
		c.false_positive
	);
	eprintln!(
		"  {} {}   {} {}",
		"FN".bright_red(),
		c.false_negative,
		"TN".bright_green(),
		c.true_negative
	);

	for m in eval.metrics() {
		eprintln!("  {:<10} {}", format!("{}:", m.name()).bright_blue(), ui::metric(m));
		if let crate::core::Metric::Undefined { reason, .. } = m {
			ui::debug(&format!("{} undefined: {}", m.name(), reason));
		}
	}
}

fn truncate(text: &str, max: usize) -> String {
	if text.chars().count() <= max {
		text.to_string()
	} else {
		let head: String = text.chars().take(max.saturating_sub(3)).collect();
		format!("{}...", head)
	}
}
