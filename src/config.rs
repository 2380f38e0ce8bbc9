//! Application configuration and constants

use serde::{Deserialize, Serialize};

use crate::core::{LookalikeError, Result};
use crate::processing::similarity::DistanceMetric;

// === Groups ===
/// Group tag given to the medoid row once it joins the scored pool
pub const CENTROID_GROUP: &str = "centroid";
pub const DEFAULT_MAIN_GROUP: &str = "main";
pub const DEFAULT_COMPARISON_GROUP: &str = "full_merge";

// === Model Defaults ===
pub const DEFAULT_TEST_FRACTION: f64 = 0.3;
pub const DEFAULT_PERCENTILE: f64 = 50.0;
pub const DEFAULT_CENTER_RUNS: usize = 20;

/// Minimum members the medoid finder accepts
pub const MIN_MEDOID_MEMBERS: usize = 2;

// === Storage ===
pub const SEED_EXT: &str = "msgpack";
pub const SEED_ENV: &str = "LOOKALIKE_SEED";

/// Random seed from LOOKALIKE_SEED, if set and parseable
pub fn seed_from_env() -> Option<u64> {
	let raw = std::env::var(SEED_ENV).ok()?;
	match raw.trim().parse::<u64>() {
		Ok(seed) => {
			crate::ui::debug(&format!("Using {}={}", SEED_ENV, seed));
			Some(seed)
		}
		Err(_) => {
			crate::ui::warn(&format!("Ignoring {}: '{}' is not an integer", SEED_ENV, raw));
			None
		}
	}
}

/// Percentile in [0, 100] used to derive the classification threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percentile(f64);

impl Percentile {
	pub fn new(p: f64) -> Result<Self> {
		if p.is_finite() && (0.0..=100.0).contains(&p) {
			Ok(Self(p))
		} else {
			Err(LookalikeError::InvalidConfig(format!(
				"percentile must be in [0, 100], got {}",
				p
			)))
		}
	}

	pub fn value(&self) -> f64 {
		self.0
	}
}

impl Default for Percentile {
	fn default() -> Self {
		Self(DEFAULT_PERCENTILE)
	}
}

impl TryFrom<f64> for Percentile {
	type Error = LookalikeError;

	fn try_from(p: f64) -> Result<Self> {
		Self::new(p)
	}
}

impl From<Percentile> for f64 {
	fn from(p: Percentile) -> f64 {
		p.0
	}
}

/// Held-out share of the positive cohort, strictly inside (0, 1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TestFraction(f64);

impl TestFraction {
	pub fn new(f: f64) -> Result<Self> {
		if f.is_finite() && f > 0.0 && f < 1.0 {
			Ok(Self(f))
		} else {
			Err(LookalikeError::InvalidConfig(format!(
				"test fraction must be in (0, 1), got {}",
				f
			)))
		}
	}

	pub fn value(&self) -> f64 {
		self.0
	}

	/// Held-out count for a cohort of `n`, rounded up
	pub fn test_count(&self, n: usize) -> usize {
		(self.0 * n as f64).ceil() as usize
	}
}

impl Default for TestFraction {
	fn default() -> Self {
		Self(DEFAULT_TEST_FRACTION)
	}
}

impl TryFrom<f64> for TestFraction {
	type Error = LookalikeError;

	fn try_from(f: f64) -> Result<Self> {
		Self::new(f)
	}
}

impl From<TestFraction> for f64 {
	fn from(f: TestFraction) -> f64 {
		f.0
	}
}

/// Options for one model-generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
	pub metric: DistanceMetric,
	pub test_fraction: TestFraction,
	pub percentile: Percentile,
	pub main_group: String,
	pub comparison_group: String,
	/// Fixes the train/test partition when set
	pub seed: Option<u64>,
}

impl RunConfig {
	pub fn new(main_group: impl Into<String>, comparison_group: impl Into<String>) -> Self {
		Self {
			metric: DistanceMetric::default(),
			test_fraction: TestFraction::default(),
			percentile: Percentile::default(),
			main_group: main_group.into(),
			comparison_group: comparison_group.into(),
			seed: None,
		}
	}

	pub fn with_percentile(mut self, percentile: Percentile) -> Self {
		self.percentile = percentile;
		self
	}

	pub fn with_test_fraction(mut self, test_fraction: TestFraction) -> Self {
		self.test_fraction = test_fraction;
		self
	}

	pub fn with_seed(mut self, seed: Option<u64>) -> Self {
		self.seed = seed;
		self
	}

	/// Group names must be non-empty, distinct, and not the medoid sentinel
	pub fn validate(&self) -> Result<()> {
		for (role, name) in [("main", &self.main_group), ("comparison", &self.comparison_group)] {
			if name.trim().is_empty() {
				return Err(LookalikeError::InvalidConfig(format!("{} group name is empty", role)));
			}
			if name == CENTROID_GROUP {
				return Err(LookalikeError::InvalidConfig(format!(
					"{} group cannot be named '{}'",
					role, CENTROID_GROUP
				)));
			}
		}

		if self.main_group == self.comparison_group {
			return Err(LookalikeError::InvalidConfig(format!(
				"main and comparison groups are both '{}'",
				self.main_group
			)));
		}

		Ok(())
	}
}
