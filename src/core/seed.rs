//! Persisted golden seed record

use serde::{Deserialize, Serialize};

use super::medoid::Medoid;
use crate::config::RunConfig;

/// Everything needed to reuse a trained medoid against a new population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenSeed {
	/// Crate version that created this
	pub version: String,
	/// When the seed was computed (RFC 3339)
	pub created: String,
	pub config: RunConfig,
	pub medoid: Medoid,
	/// Index of the medoid row within the full positive cohort
	pub cohort_index: usize,
	pub train_size: usize,
	pub test_size: usize,
	/// Threshold the configured percentile produced on the evaluation pool
	pub threshold: f64,
	/// Fingerprint of the positive cohort file, when it came from disk
	pub source_hash: Option<String>,
}

impl GoldenSeed {
	pub fn is_current_version(&self) -> bool {
		self.version == env!("CARGO_PKG_VERSION")
	}

	pub fn dim(&self) -> usize {
		self.medoid.row.dim()
	}
}
