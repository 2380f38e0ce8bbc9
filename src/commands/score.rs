//! Score command - classify a new population with a saved golden seed

use std::path::Path;

use anyhow::{bail, Result};
use colored::*;

use crate::config::{Percentile, CENTROID_GROUP};
use crate::core::DatasetHash;
use crate::processing::{classify, SimilarityScorer};
use crate::storage::{dataset, export, seed};
use crate::ui;

pub fn run(
	seed_file: &Path,
	input: &Path,
	group: &str,
	percentile: Option<f64>,
	export_path: Option<&Path>,
) -> Result<()> {
	if group == CENTROID_GROUP {
		bail!("group '{}' is reserved for the medoid row", CENTROID_GROUP);
	}

	let golden = seed::load(seed_file)?;
	ui::info(&format!(
		"Using golden seed for '{}' ({}D, created {})",
		golden.medoid.source_group,
		golden.dim(),
		golden.created
	));
	if let Some(hash) = &golden.source_hash {
		ui::debug(&format!("Seed built from dataset {}", hash));
	}
	if !golden.is_current_version() {
		ui::warn(&format!(
			"Seed was written by v{}, running v{}",
			golden.version,
			env!("CARGO_PKG_VERSION")
		));
	}

	let population = dataset::load(input, group)?;
	ui::success(&format!("Loaded {} rows", population.set.len()));
	if golden.source_hash.as_deref().map(DatasetHash::from_hex).as_ref() == Some(&population.hash) {
		ui::warn("Scoring the cohort the seed was built from, expect inflated scores");
	}

	let percentile = match percentile {
		Some(p) => Percentile::new(p)?,
		None => golden.config.percentile,
	};

	let scorer = SimilarityScorer::new(golden.medoid.vector())?;
	let scored = scorer.score_set(&population.set)?;
	let classification = classify(scored, percentile)?;

	if let Some(path) = export_path {
		let data = export::Export::new(
			&classification.rows,
			&golden.medoid,
			percentile.value(),
			classification.threshold,
			None,
		);
		export::write(&data, path)?;
		if path.to_str() == Some("-") {
			return Ok(());
		}
	}

	ui::header("Classification");
	eprintln!(
		"  {} P{} -> {:.4} (training pool threshold {:.4})",
		"Threshold:".bright_blue(),
		percentile.value(),
		classification.threshold,
		golden.threshold
	);
	eprintln!(
		"  {} {} of {} rows",
		"Lookalikes:".bright_blue(),
		classification.positives().to_string().bright_green(),
		classification.rows.len()
	);

	Ok(())
}
