//! Domain errors for vector sets and the lookalike pipeline

use std::fmt;

/// Errors raised by vector set construction and the classifier stages.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookalikeError {
	/// A stage received fewer members than it needs.
	#[error("{what} has {have} member{}, need at least {need}", plural(.have))]
	InsufficientData {
		what: String,
		have: usize,
		need: usize,
	},

	/// Vector length disagreement within a set or across cohorts.
	#[error("dimension mismatch in {context}: expected {expected}, got {got}")]
	DimensionMismatch {
		context: String,
		expected: usize,
		got: usize,
	},

	/// Embedding rows and metadata rows could not be joined by position.
	#[error("cannot join {embeddings} embeddings with {rows} metadata rows")]
	RowCountMismatch { embeddings: usize, rows: usize },

	/// Cosine similarity is undefined for a zero vector.
	#[error("{what} has zero norm, cosine similarity is undefined")]
	ZeroNorm { what: String },

	/// NaN or infinite component in an input vector.
	#[error("row {row} has a non-finite value at column {column}")]
	NonFinite { row: usize, column: usize },

	/// A metric was requested as a number but its denominator is zero.
	#[error("{metric} is undefined: {reason}")]
	UndefinedMetric { metric: &'static str, reason: String },

	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	/// Rows of a population carry a group tag other than the expected one.
	#[error("{set} has {count} row(s) tagged '{found}', expected '{expected}'")]
	GroupMismatch {
		set: String,
		expected: String,
		found: String,
		count: usize,
	},
}

fn plural(n: &usize) -> &'static str {
	if *n == 1 {
		""
	} else {
		"s"
	}
}

pub type Result<T> = std::result::Result<T, LookalikeError>;

/// Pipeline position used to report where a run aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
	Init,
	Partitioned,
	CenterComputed,
	Scored,
	Classified,
	Evaluated,
}

impl Stage {
	/// What the stage was trying to do, phrased for "cannot ..." messages
	pub fn action(&self) -> &'static str {
		match self {
			Stage::Init => "accept input populations",
			Stage::Partitioned => "partition positive cohort",
			Stage::CenterComputed => "compute medoid over training split",
			Stage::Scored => "score pool against medoid",
			Stage::Classified => "classify scored pool",
			Stage::Evaluated => "evaluate predictions",
		}
	}
}

impl fmt::Display for Stage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Stage::Init => "init",
			Stage::Partitioned => "partitioned",
			Stage::CenterComputed => "center-computed",
			Stage::Scored => "scored",
			Stage::Classified => "classified",
			Stage::Evaluated => "evaluated",
		};
		f.write_str(name)
	}
}

/// A domain error tagged with the stage that raised it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("cannot {}", .stage.action())]
pub struct StageError {
	pub stage: Stage,
	#[source]
	pub source: LookalikeError,
}

impl StageError {
	pub fn new(stage: Stage, source: LookalikeError) -> Self {
		Self { stage, source }
	}
}

/// Attach a stage to a domain result.
pub trait AtStage<T> {
	fn at(self, stage: Stage) -> std::result::Result<T, StageError>;
}

impl<T> AtStage<T> for Result<T> {
	fn at(self, stage: Stage) -> std::result::Result<T, StageError> {
		self.map_err(|e| StageError::new(stage, e))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn insufficient_data_message_is_singular_for_one() {
		let err = LookalikeError::InsufficientData {
			what: "vector set".into(),
			have: 1,
			need: 2,
		};
		assert_eq!(err.to_string(), "vector set has 1 member, need at least 2");
	}

	#[test]
	fn stage_error_names_the_stage() {
		let err: Result<()> = Err(LookalikeError::InsufficientData {
			what: "vector set".into(),
			have: 1,
			need: 2,
		});
		let staged = err.at(Stage::CenterComputed).unwrap_err();
		assert_eq!(staged.stage, Stage::CenterComputed);
		assert_eq!(staged.to_string(), "cannot compute medoid over training split");
	}

	#[test]
	fn stage_error_chain_states_the_cause_once() {
		let staged = StageError::new(
			Stage::CenterComputed,
			LookalikeError::InsufficientData {
				what: "vector set".into(),
				have: 1,
				need: 2,
			},
		);
		let rendered = format!("{:#}", anyhow::Error::new(staged));
		assert_eq!(
			rendered,
			"cannot compute medoid over training split: vector set has 1 member, need at least 2"
		);
		assert_eq!(rendered.matches("need at least 2").count(), 1);
	}
}
