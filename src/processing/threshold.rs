//! Percentile-derived classification threshold
//!
//! The cutoff is drawn from the scored pool itself, so roughly (100 - P)% of
//! the pool lands on the positive side whatever its true composition. That
//! keeps one model definition usable across cohorts whose embeddings sit at
//! different absolute similarity levels.

use crate::config::Percentile;
use crate::core::{ClassifiedVector, Label, LookalikeError, Result, ScoredVector};

/// P-th percentile with linear interpolation between order statistics.
///
/// With `s` sorted ascending and `rank = p / 100 * (K - 1)`, the result is
/// `s[floor(rank)] + (s[ceil(rank)] - s[floor(rank)]) * fract(rank)`.
pub fn percentile(values: &[f64], p: Percentile) -> Result<f64> {
	if values.is_empty() {
		return Err(LookalikeError::InsufficientData {
			what: "scored population".into(),
			have: 0,
			need: 1,
		});
	}

	let mut sorted = values.to_vec();
	sorted.sort_by(|a, b| a.total_cmp(b));

	let rank = p.value() / 100.0 * (sorted.len() - 1) as f64;
	let lo = rank.floor() as usize;
	let hi = (rank.ceil() as usize).min(sorted.len() - 1);
	let frac = rank - lo as f64;

	if lo == hi {
		Ok(sorted[lo])
	} else {
		Ok(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
	}
}

/// Result of cutting a scored pool at a percentile
#[derive(Debug, Clone)]
pub struct Classification {
	pub percentile: Percentile,
	pub threshold: f64,
	pub rows: Vec<ClassifiedVector>,
}

impl Classification {
	pub fn positives(&self) -> usize {
		self.rows.iter().filter(|r| r.label.is_positive()).count()
	}
}

/// Label members with score >= threshold as positive
pub fn apply_threshold(scored: Vec<ScoredVector>, threshold: f64) -> Vec<ClassifiedVector> {
	scored
		.into_iter()
		.map(|s| ClassifiedVector {
			label: if s.score >= threshold {
				Label::Positive
			} else {
				Label::Negative
			},
			row: s.row,
			score: s.score,
		})
		.collect()
}

/// Threshold the whole pool at its own P-th percentile
pub fn classify(scored: Vec<ScoredVector>, p: Percentile) -> Result<Classification> {
	let scores: Vec<f64> = scored.iter().map(|s| s.score).collect();
	let threshold = percentile(&scores, p)?;

	Ok(Classification {
		percentile: p,
		threshold,
		rows: apply_threshold(scored, threshold),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::vector::tests::meta;
	use crate::core::LabeledVector;
	use approx::assert_abs_diff_eq;

	fn pct(p: f64) -> Percentile {
		Percentile::new(p).unwrap()
	}

	fn pool(scores: &[f64]) -> Vec<ScoredVector> {
		scores
			.iter()
			.map(|&score| ScoredVector {
				row: LabeledVector::new(vec![1.0], meta("t", "k"), "G"),
				score,
			})
			.collect()
	}

	#[test]
	fn percentile_interpolates_linearly() {
		let values = [1.0, 2.0, 3.0, 4.0];
		assert_abs_diff_eq!(percentile(&values, pct(0.0)).unwrap(), 1.0);
		assert_abs_diff_eq!(percentile(&values, pct(100.0)).unwrap(), 4.0);
		assert_abs_diff_eq!(percentile(&values, pct(50.0)).unwrap(), 2.5);
		assert_abs_diff_eq!(percentile(&values, pct(25.0)).unwrap(), 1.75);
	}

	#[test]
	fn percentile_ignores_input_order() {
		let values = [4.0, -1.0, 3.0, 0.5, 2.0];
		assert_abs_diff_eq!(percentile(&values, pct(50.0)).unwrap(), 2.0);
	}

	#[test]
	fn single_value_is_every_percentile() {
		for p in [0.0, 37.5, 100.0] {
			assert_abs_diff_eq!(percentile(&[0.42], pct(p)).unwrap(), 0.42);
		}
	}

	#[test]
	fn empty_population_is_insufficient() {
		assert!(matches!(
			percentile(&[], pct(50.0)),
			Err(LookalikeError::InsufficientData { have: 0, .. })
		));
		assert!(classify(Vec::new(), pct(50.0)).is_err());
	}

	#[test]
	fn p100_keeps_only_the_maximum() {
		let result = classify(pool(&[0.1, 0.5, 0.9, 0.3]), pct(100.0)).unwrap();
		assert_eq!(result.positives(), 1);
		assert_abs_diff_eq!(result.threshold, 0.9);

		let tied = classify(pool(&[0.9, 0.5, 0.9, 0.3]), pct(100.0)).unwrap();
		assert_eq!(tied.positives(), 2);
	}

	#[test]
	fn p0_labels_everything_positive() {
		let result = classify(pool(&[0.1, -0.5, 0.9, 0.3]), pct(0.0)).unwrap();
		assert_eq!(result.positives(), 4);
	}

	#[test]
	fn positive_share_follows_percentile() {
		let scores: Vec<f64> = (0..100).map(|i| i as f64 / 100.0).collect();
		let result = classify(pool(&scores), pct(80.0)).unwrap();
		assert_eq!(result.positives(), 20);
	}

	#[test]
	fn classify_keeps_pool_order() {
		let result = classify(pool(&[1.0, -1.0, 1.0, -1.0]), pct(50.0)).unwrap();
		let labels: Vec<Label> = result.rows.iter().map(|r| r.label).collect();
		assert_eq!(
			labels,
			vec![Label::Positive, Label::Negative, Label::Positive, Label::Negative]
		);
	}
}
