//! Center distribution: how stable is the golden seed across partitions?

use std::collections::BTreeMap;

use crate::config::RunConfig;
use crate::core::{AtStage, LookalikeError, Metric, Stage, StageError, VectorSet};
use crate::processing::medoid::find_medoid;
use crate::processing::partition::split;
use crate::processing::similarity::cosine_similarity;
use crate::ui;

/// How often one cohort row was picked as the medoid
#[derive(Debug, Clone, PartialEq)]
pub struct CenterPick {
	pub cohort_index: usize,
	pub count: usize,
}

#[derive(Debug, Clone)]
pub struct CenterDistribution {
	pub runs: usize,
	/// Picks sorted by count, most frequent first (lowest index on ties)
	pub picks: Vec<CenterPick>,
	/// Mean cosine similarity between the centers of every pair of runs
	pub mean_pairwise_similarity: Metric,
}

impl CenterDistribution {
	pub fn distinct(&self) -> usize {
		self.picks.len()
	}

	/// Share of runs that agreed on the most frequent center, as a percentage
	pub fn stability(&self) -> f64 {
		match self.picks.first() {
			Some(top) if self.runs > 0 => top.count as f64 / self.runs as f64 * 100.0,
			_ => 0.0,
		}
	}
}

/// Repeat partition + medoid `runs` times.
///
/// When the config carries a seed, run `i` uses `seed + i`, so the whole
/// experiment is reproducible.
pub fn center_distribution(
	cohort: &VectorSet,
	config: &RunConfig,
	runs: usize,
) -> std::result::Result<CenterDistribution, StageError> {
	if runs == 0 {
		return Err(LookalikeError::InvalidConfig("need at least one run".into())).at(Stage::Init);
	}
	if let Some((found, count)) = cohort.foreign_groups(&config.main_group) {
		return Err(LookalikeError::GroupMismatch {
			set: "positive cohort".into(),
			expected: config.main_group.clone(),
			found,
			count,
		})
		.at(Stage::Init);
	}

	let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
	let mut centers: Vec<usize> = Vec::with_capacity(runs);

	for run in 0..runs {
		let seed = config.seed.map(|s| s.wrapping_add(run as u64));
		let split = split(cohort, config.test_fraction, seed).at(Stage::Partitioned)?;
		let medoid = find_medoid(&split.train, config.metric).at(Stage::CenterComputed)?;
		let cohort_index = split.train_indices[medoid.index];

		ui::debug(&format!("Run {}/{}: center is cohort row {}", run + 1, runs, cohort_index));
		*counts.entry(cohort_index).or_default() += 1;
		centers.push(cohort_index);
	}

	let mut picks: Vec<CenterPick> = counts
		.into_iter()
		.map(|(cohort_index, count)| CenterPick { cohort_index, count })
		.collect();
	picks.sort_by(|a, b| b.count.cmp(&a.count).then(a.cohort_index.cmp(&b.cohort_index)));

	let mean_pairwise_similarity = mean_pairwise_similarity(cohort, &centers).at(Stage::Scored)?;

	Ok(CenterDistribution {
		runs,
		picks,
		mean_pairwise_similarity,
	})
}

fn mean_pairwise_similarity(cohort: &VectorSet, centers: &[usize]) -> crate::core::Result<Metric> {
	if centers.len() < 2 {
		return Ok(Metric::Undefined {
			name: "mean center similarity",
			reason: "fewer than two runs".into(),
		});
	}

	let rows = cohort.rows();
	let mut total = 0.0;
	let mut pairs = 0usize;
	for i in 0..centers.len() {
		for j in (i + 1)..centers.len() {
			total += cosine_similarity(&rows[centers[i]].vector, &rows[centers[j]].vector)?;
			pairs += 1;
		}
	}

	Ok(Metric::Value {
		name: "mean center similarity",
		value: total / pairs as f64,
	})
}
