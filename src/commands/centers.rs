//! Centers command - medoid stability across repeated partitions

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use colored::*;

use crate::config::{seed_from_env, RunConfig, TestFraction, DEFAULT_COMPARISON_GROUP};
use crate::processing::center_distribution;
use crate::storage::dataset;
use crate::ui;

pub fn run(
	positive: &Path,
	main_group: &str,
	test_fraction: f64,
	runs: usize,
	seed: Option<u64>,
	limit: usize,
) -> Result<()> {
	let start = Instant::now();

	let config = RunConfig::new(main_group, DEFAULT_COMPARISON_GROUP)
		.with_test_fraction(TestFraction::new(test_fraction)?)
		.with_seed(seed.or_else(seed_from_env));

	ui::info(&format!("Loading positive cohort from {}", ui::path_link(positive, 40)));
	let cohort = dataset::load(positive, main_group)?;
	ui::success(&format!("Loaded {} rows ({}D)", cohort.set.len(), cohort.set.dim()));

	ui::info(&format!("Computing {} medoids", runs));
	let dist = center_distribution(&cohort.set, &config, runs)?;

	ui::header("Centers");
	for (rank, pick) in dist.picks.iter().take(limit).enumerate() {
		let row = &cohort.set.rows()[pick.cohort_index];
		let share = pick.count as f64 / dist.runs as f64 * 100.0;
		eprintln!(
			"{}. row {} {} {}",
			format!("{:2}", rank + 1).bright_blue().bold(),
			pick.cohort_index.to_string().bright_cyan(),
			ui::log::color_gradient(share, 0.0, 100.0, &format!("{:>5.1}%", share)),
			row.titles.chars().take(60).collect::<String>().dimmed()
		);
	}
	if dist.picks.len() > limit {
		eprintln!("   {}", format!("... and {} more", dist.picks.len() - limit).dimmed());
	}

	eprintln!();
	ui::success(&format!(
		"{} distinct centers over {} runs, top center stable in {:.1}% of runs",
		dist.distinct(),
		dist.runs,
		dist.stability()
	));
	let spread = match dist.mean_pairwise_similarity.as_option() {
		Some(sim) => format!("{:.4}", sim).bright_green(),
		None => "undefined".yellow(),
	};
	ui::info(&format!("Mean center similarity: {}", spread));
	eprintln!(
		"{}",
		format!("Completed in {:.1}s", start.elapsed().as_secs_f32()).dimmed()
	);

	Ok(())
}
