//! Scored and classified pool rows

use std::fmt;

use serde::{Deserialize, Serialize};

use super::vector::LabeledVector;

/// Predicted lookalike label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
	Positive,
	Negative,
}

impl Label {
	pub fn is_positive(&self) -> bool {
		matches!(self, Label::Positive)
	}
}

impl fmt::Display for Label {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Label::Positive => f.write_str("positive"),
			Label::Negative => f.write_str("negative"),
		}
	}
}

/// A row with its similarity to the golden seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredVector {
	pub row: LabeledVector,
	pub score: f64,
}

/// A scored row after the percentile cut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedVector {
	pub row: LabeledVector,
	pub score: f64,
	pub label: Label,
}

impl ClassifiedVector {
	pub fn group(&self) -> &str {
		&self.row.group
	}
}
