//! Lookalike model run: partition, medoid, score, classify, evaluate
//!
//! A single linear pass over static input. Any stage failure aborts the run
//! with a `StageError` naming the stage; there is no partial result.

use crate::config::RunConfig;
use crate::core::{
	AtStage, ClassifiedVector, Evaluation, LookalikeError, Medoid, Result, ScoredVector, Stage,
	StageError, VectorSet,
};
use crate::processing::evaluate::evaluate;
use crate::processing::medoid::find_medoid;
use crate::processing::partition::{split, Split};
use crate::processing::similarity::SimilarityScorer;
use crate::processing::threshold::classify;
use crate::ui;

/// Everything a finished run hands to reporting and export
#[derive(Debug, Clone)]
pub struct RunReport {
	pub config: RunConfig,
	pub train_size: usize,
	pub test_size: usize,
	pub medoid: Medoid,
	/// Position of the medoid row within the positive cohort
	pub cohort_index: usize,
	pub threshold: f64,
	/// Test split, then comparison population, then the medoid row
	pub pool: Vec<ClassifiedVector>,
	pub evaluation: Evaluation,
}

impl RunReport {
	pub fn positives(&self) -> usize {
		self.pool.iter().filter(|r| r.label.is_positive()).count()
	}

	/// Pool rows that belong to one of the two evaluated populations
	pub fn evaluated_rows(&self) -> impl Iterator<Item = &ClassifiedVector> {
		evaluated_rows(&self.pool, &self.config)
	}
}

fn evaluated_rows<'a>(
	pool: &'a [ClassifiedVector],
	config: &'a RunConfig,
) -> impl Iterator<Item = &'a ClassifiedVector> {
	pool.iter()
		.filter(move |r| r.group() == config.main_group || r.group() == config.comparison_group)
}

/// Preconditions checked before any computation
fn check_inputs(positive: &VectorSet, comparison: &VectorSet, config: &RunConfig) -> Result<()> {
	config.validate()?;

	if positive.dim() != comparison.dim() {
		return Err(LookalikeError::DimensionMismatch {
			context: "comparison population vs positive cohort".into(),
			expected: positive.dim(),
			got: comparison.dim(),
		});
	}

	if let Some((found, count)) = positive.foreign_groups(&config.main_group) {
		return Err(LookalikeError::GroupMismatch {
			set: "positive cohort".into(),
			expected: config.main_group.clone(),
			found,
			count,
		});
	}

	if let Some((found, count)) = comparison.foreign_groups(&config.comparison_group) {
		return Err(LookalikeError::GroupMismatch {
			set: "comparison population".into(),
			expected: config.comparison_group.clone(),
			found,
			count,
		});
	}

	Ok(())
}

/// Run the whole model generation for one positive cohort
pub fn run(
	positive: &VectorSet,
	comparison: &VectorSet,
	config: &RunConfig,
) -> std::result::Result<RunReport, StageError> {
	ui::debug(&format!(
		"Stage {}: {} positive, {} comparison rows ({}D)",
		Stage::Init,
		positive.len(),
		comparison.len(),
		positive.dim()
	));
	check_inputs(positive, comparison, config).at(Stage::Init)?;

	let Split {
		train,
		test,
		train_indices,
		..
	} = split(positive, config.test_fraction, config.seed).at(Stage::Partitioned)?;
	ui::debug(&format!(
		"Stage {}: {} train / {} test (seed: {})",
		Stage::Partitioned,
		train.len(),
		test.len(),
		config.seed.map(|s| s.to_string()).unwrap_or_else(|| "random".into())
	));

	let medoid = find_medoid(&train, config.metric).at(Stage::CenterComputed)?;
	let cohort_index = train_indices[medoid.index];
	ui::debug(&format!(
		"Stage {}: medoid is cohort row {} (total distance {:.4})",
		Stage::CenterComputed,
		cohort_index,
		medoid.total_distance
	));

	let scorer = SimilarityScorer::new(medoid.vector()).at(Stage::Scored)?;
	let mut scored = scorer.score_set(&test).at(Stage::Scored)?;
	scored.extend(scorer.score_set(comparison).at(Stage::Scored)?);
	let self_score = scorer.score(medoid.vector()).at(Stage::Scored)?;
	scored.push(ScoredVector {
		row: medoid.row.clone(),
		score: self_score,
	});
	ui::debug(&format!(
		"Stage {}: {} rows, medoid self-similarity {:.6}",
		Stage::Scored,
		scored.len(),
		self_score
	));

	let classification = classify(scored, config.percentile).at(Stage::Classified)?;
	ui::debug(&format!(
		"Stage {}: P{} threshold {:.4}, {} positive",
		Stage::Classified,
		config.percentile.value(),
		classification.threshold,
		classification.positives()
	));

	let evaluation = evaluate(evaluated_rows(&classification.rows, config), &config.main_group);
	ui::debug(&format!(
		"Stage {}: {} rows evaluated",
		Stage::Evaluated,
		evaluation.counts.total()
	));

	Ok(RunReport {
		config: config.clone(),
		train_size: train.len(),
		test_size: test.len(),
		medoid,
		cohort_index,
		threshold: classification.threshold,
		pool: classification.rows,
		evaluation,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{Percentile, TestFraction, CENTROID_GROUP};
	use crate::core::vector::tests::set_of;
	use crate::core::Label;
	use approx::assert_relative_eq;

	fn config(percentile: f64) -> RunConfig {
		RunConfig::new("P", "C")
			.with_percentile(Percentile::new(percentile).unwrap())
			.with_seed(Some(3))
	}

	#[test]
	fn separable_cohorts_score_perfectly() {
		let positive = set_of(&[&[1.0, 1.0], &[1.0, 1.0], &[1.0, 1.0]], "P");
		let comparison = set_of(&[&[-1.0, -1.0], &[-1.0, -1.0], &[-1.0, -1.0]], "C");

		// Pool: 1 test P, 3 C, medoid. The 70th percentile falls between the clusters.
		let report = run(&positive, &comparison, &config(70.0)).unwrap();

		assert_eq!(report.train_size, 2);
		assert_eq!(report.test_size, 1);
		assert_eq!(report.pool.len(), 5);
		assert!(report.threshold > -1.0 && report.threshold <= 1.0);

		let medoid_row = report.pool.last().unwrap();
		assert_eq!(medoid_row.group(), CENTROID_GROUP);
		assert_eq!(medoid_row.score, 1.0);

		for row in &report.pool {
			match row.group() {
				"C" => assert_eq!(row.label, Label::Negative),
				_ => assert_eq!(row.label, Label::Positive),
			}
		}

		let eval = &report.evaluation;
		assert_eq!(eval.counts.total(), 4);
		assert_relative_eq!(eval.accuracy.value().unwrap(), 100.0);
		assert_relative_eq!(eval.precision.value().unwrap(), 100.0);
		assert_relative_eq!(eval.recall.value().unwrap(), 100.0);
	}

	#[test]
	fn evaluated_rows_exclude_the_medoid() {
		let positive = set_of(&[&[1.0, 0.0], &[0.9, 0.1], &[1.0, 0.2], &[0.8, 0.0]], "P");
		let comparison = set_of(&[&[0.0, 1.0], &[0.1, 1.0]], "C");
		let report = run(&positive, &comparison, &config(50.0)).unwrap();

		assert_eq!(report.evaluated_rows().count(), report.pool.len() - 1);
		assert_eq!(report.evaluation.counts.total(), report.test_size + comparison.len());
	}

	#[test]
	fn cohort_index_points_at_the_medoid_source() {
		let positive = set_of(
			&[&[1.0, 0.0], &[1.0, 0.05], &[1.0, 0.1], &[1.0, 0.15], &[1.0, 0.2], &[1.0, 0.25]],
			"P",
		);
		let comparison = set_of(&[&[0.0, 1.0]], "C");
		let report = run(&positive, &comparison, &config(50.0)).unwrap();
		assert_eq!(
			positive.rows()[report.cohort_index].vector,
			report.medoid.row.vector
		);
	}

	#[test]
	fn too_small_training_split_names_the_stage() {
		let positive = set_of(&[&[1.0, 0.0], &[0.0, 1.0]], "P");
		let comparison = set_of(&[&[1.0, 1.0]], "C");
		let err = run(&positive, &comparison, &config(50.0)).unwrap_err();

		assert_eq!(err.stage, Stage::CenterComputed);
		assert_eq!(err.to_string(), "cannot compute medoid over training split");
		assert_eq!(
			err.source.to_string(),
			"vector set has 1 member, need at least 2"
		);
	}

	#[test]
	fn cross_cohort_dimension_mismatch_fails_at_init() {
		let positive = set_of(&[&[1.0, 0.0], &[0.0, 1.0], &[1.0, 1.0]], "P");
		let comparison = set_of(&[&[1.0, 1.0, 1.0]], "C");
		let err = run(&positive, &comparison, &config(50.0)).unwrap_err();
		assert_eq!(err.stage, Stage::Init);
		assert!(matches!(err.source, LookalikeError::DimensionMismatch { .. }));
	}

	#[test]
	fn mislabeled_comparison_rows_are_rejected() {
		let positive = set_of(&[&[1.0, 0.0], &[0.0, 1.0], &[1.0, 1.0]], "P");
		let comparison = set_of(&[&[1.0, 1.0]], "P");
		let err = run(&positive, &comparison, &config(50.0)).unwrap_err();
		assert!(matches!(err.source, LookalikeError::GroupMismatch { count: 1, .. }));
	}

	#[test]
	fn zero_vector_in_test_split_aborts_scoring() {
		let positive = set_of(&[&[1.0, 0.0], &[0.0, 1.0], &[1.0, 1.0]], "P");
		let comparison = set_of(&[&[0.0, 0.0]], "C");
		let err = run(&positive, &comparison, &config(50.0)).unwrap_err();
		assert_eq!(err.stage, Stage::Scored);
		assert!(matches!(err.source, LookalikeError::ZeroNorm { .. }));
	}

	#[test]
	fn invalid_test_fraction_cannot_be_built() {
		assert!(TestFraction::new(1.0).is_err());
	}
}
