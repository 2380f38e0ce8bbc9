//! Confusion-matrix evaluation of predicted labels

use crate::core::{ClassifiedVector, ConfusionCounts, Evaluation};

/// Compare predictions with ground truth, where "actual positive" means the
/// row belongs to `main_group` and everything else is a negative.
///
/// Every row lands in exactly one cell, so the counts always sum to
/// `rows.len()`. Zero denominators come back as undefined metrics.
pub fn evaluate<'a, I>(rows: I, main_group: &str) -> Evaluation
where
	I: IntoIterator<Item = &'a ClassifiedVector>,
{
	let mut counts = ConfusionCounts::default();
	for row in rows {
		counts.record(row.label.is_positive(), row.group() == main_group);
	}
	Evaluation::from_counts(main_group, counts)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::vector::tests::meta;
	use crate::core::{Label, LabeledVector};
	use approx::assert_relative_eq;

	fn row(group: &str, label: Label) -> ClassifiedVector {
		ClassifiedVector {
			row: LabeledVector::new(vec![1.0], meta("t", "k"), group),
			score: 0.0,
			label,
		}
	}

	#[test]
	fn counts_cover_the_whole_population() {
		let rows = vec![
			row("P", Label::Positive),
			row("P", Label::Negative),
			row("C", Label::Positive),
			row("C", Label::Negative),
			row("C", Label::Negative),
			row("other", Label::Positive),
		];
		let eval = evaluate(&rows, "P");

		assert_eq!(eval.counts.true_positive, 1);
		assert_eq!(eval.counts.false_negative, 1);
		assert_eq!(eval.counts.false_positive, 2);
		assert_eq!(eval.counts.true_negative, 2);
		assert_eq!(eval.counts.total(), rows.len());
		assert_relative_eq!(eval.accuracy.value().unwrap(), 50.0);
		assert_relative_eq!(eval.precision.value().unwrap(), 100.0 / 3.0);
		assert_relative_eq!(eval.recall.value().unwrap(), 50.0);
	}

	#[test]
	fn nothing_predicted_positive_reports_undefined_precision() {
		let rows = vec![row("P", Label::Negative), row("C", Label::Negative)];
		let eval = evaluate(&rows, "P");
		assert!(!eval.precision.is_defined());
		assert!(eval.accuracy.is_defined());
		assert!(eval.recall.is_defined());
	}
}
