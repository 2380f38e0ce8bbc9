//! Confusion counts and derived classifier metrics

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{LookalikeError, Result};

/// Outcome counts for the main group against everything else
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionCounts {
	pub true_positive: usize,
	pub true_negative: usize,
	pub false_positive: usize,
	pub false_negative: usize,
}

impl ConfusionCounts {
	/// Record one prediction against its ground truth
	pub fn record(&mut self, predicted_positive: bool, actual_main: bool) {
		match (predicted_positive, actual_main) {
			(true, true) => self.true_positive += 1,
			(false, false) => self.true_negative += 1,
			(true, false) => self.false_positive += 1,
			(false, true) => self.false_negative += 1,
		}
	}

	pub fn total(&self) -> usize {
		self.true_positive + self.true_negative + self.false_positive + self.false_negative
	}

	/// (TP+TN) / total, as a percentage
	pub fn accuracy(&self) -> Metric {
		Metric::percent(
			"accuracy",
			self.true_positive + self.true_negative,
			self.total(),
			"population is empty",
		)
	}

	/// TP / (TP+FP), as a percentage
	pub fn precision(&self) -> Metric {
		Metric::percent(
			"precision",
			self.true_positive,
			self.true_positive + self.false_positive,
			"no row was predicted positive",
		)
	}

	/// TP / (TP+FN), as a percentage
	pub fn recall(&self) -> Metric {
		Metric::percent(
			"recall",
			self.true_positive,
			self.true_positive + self.false_negative,
			"no row belongs to the main group",
		)
	}

	/// Harmonic mean of precision and recall, as a percentage
	pub fn f1(&self) -> Metric {
		match (self.precision(), self.recall()) {
			(Metric::Value { value: p, .. }, Metric::Value { value: r, .. }) if p + r > 0.0 => Metric::Value {
				name: "f1",
				value: 2.0 * p * r / (p + r),
			},
			(Metric::Value { .. }, Metric::Value { .. }) => Metric::Undefined {
				name: "f1",
				reason: "precision and recall are both zero".into(),
			},
			_ => Metric::Undefined {
				name: "f1",
				reason: "precision or recall is undefined".into(),
			},
		}
	}
}

/// A derived metric that may be undefined when its denominator is zero.
///
/// Undefined is a reportable result, not a fault: a model that predicts no
/// positives has no precision, and that is worth showing as such.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Metric {
	Value { name: &'static str, value: f64 },
	Undefined { name: &'static str, reason: String },
}

impl Metric {
	fn percent(name: &'static str, numerator: usize, denominator: usize, reason: &str) -> Self {
		if denominator == 0 {
			Metric::Undefined {
				name,
				reason: reason.to_string(),
			}
		} else {
			Metric::Value {
				name,
				value: numerator as f64 / denominator as f64 * 100.0,
			}
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			Metric::Value { name, .. } | Metric::Undefined { name, .. } => name,
		}
	}

	pub fn is_defined(&self) -> bool {
		matches!(self, Metric::Value { .. })
	}

	pub fn as_option(&self) -> Option<f64> {
		match self {
			Metric::Value { value, .. } => Some(*value),
			Metric::Undefined { .. } => None,
		}
	}

	/// Numeric value, or `UndefinedMetric` for callers that cannot proceed without one
	pub fn value(&self) -> Result<f64> {
		match self {
			Metric::Value { value, .. } => Ok(*value),
			Metric::Undefined { name, reason } => Err(LookalikeError::UndefinedMetric {
				metric: name,
				reason: reason.clone(),
			}),
		}
	}
}

impl fmt::Display for Metric {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Metric::Value { value, .. } => write!(f, "{:.2}%", value),
			Metric::Undefined { .. } => f.write_str("undefined"),
		}
	}
}

/// Counts plus every derived metric, as reported after a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
	pub main_group: String,
	pub counts: ConfusionCounts,
	pub accuracy: Metric,
	pub precision: Metric,
	pub recall: Metric,
	pub f1: Metric,
}

impl Evaluation {
	pub fn from_counts(main_group: impl Into<String>, counts: ConfusionCounts) -> Self {
		Self {
			main_group: main_group.into(),
			accuracy: counts.accuracy(),
			precision: counts.precision(),
			recall: counts.recall(),
			f1: counts.f1(),
			counts,
		}
	}

	pub fn metrics(&self) -> [&Metric; 4] {
		[&self.accuracy, &self.precision, &self.recall, &self.f1]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	fn counts(tp: usize, tn: usize, fp: usize, fn_: usize) -> ConfusionCounts {
		ConfusionCounts {
			true_positive: tp,
			true_negative: tn,
			false_positive: fp,
			false_negative: fn_,
		}
	}

	#[test]
	fn derived_metrics_are_percentages() {
		let c = counts(3, 5, 1, 1);
		assert_relative_eq!(c.accuracy().value().unwrap(), 80.0);
		assert_relative_eq!(c.precision().value().unwrap(), 75.0);
		assert_relative_eq!(c.recall().value().unwrap(), 75.0);
		assert_relative_eq!(c.f1().value().unwrap(), 75.0);
	}

	#[test]
	fn precision_without_positive_predictions_is_undefined() {
		let c = counts(0, 4, 0, 2);
		assert!(!c.precision().is_defined());
		assert_eq!(c.precision().to_string(), "undefined");
		assert!(matches!(
			c.precision().value(),
			Err(LookalikeError::UndefinedMetric { metric: "precision", .. })
		));
		assert!(!c.f1().is_defined());
		assert_relative_eq!(c.recall().value().unwrap(), 0.0);
	}

	#[test]
	fn empty_counts_leave_everything_undefined() {
		let c = ConfusionCounts::default();
		let eval = Evaluation::from_counts("P", c);
		assert!(eval.metrics().iter().all(|m| !m.is_defined()));
	}

	#[test]
	fn record_routes_to_the_right_cell() {
		let mut c = ConfusionCounts::default();
		c.record(true, true);
		c.record(false, false);
		c.record(true, false);
		c.record(false, true);
		c.record(false, true);
		assert_eq!(c, counts(1, 1, 1, 2));
		assert_eq!(c.total(), 5);
	}
}
