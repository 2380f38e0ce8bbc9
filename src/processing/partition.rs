//! Random train/test split of the positive cohort

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::TestFraction;
use crate::core::{LookalikeError, Result, VectorSet};

/// Train and held-out parts of a cohort, with their source positions
#[derive(Debug, Clone)]
pub struct Split {
	pub train: VectorSet,
	pub test: VectorSet,
	/// Position of each training row within the original cohort
	pub train_indices: Vec<usize>,
	pub test_indices: Vec<usize>,
}

/// Split `cohort` into ceil(fraction·M) held-out rows and the rest.
///
/// Selection is random (seeded when `seed` is set); each side keeps the
/// cohort's original relative order so medoid tie-breaking stays tied to
/// input order rather than shuffle order.
pub fn split(cohort: &VectorSet, fraction: TestFraction, seed: Option<u64>) -> Result<Split> {
	let m = cohort.len();
	let n_test = fraction.test_count(m);
	if n_test >= m {
		return Err(LookalikeError::InsufficientData {
			what: "training split".into(),
			have: 0,
			need: 1,
		});
	}

	let mut order: Vec<usize> = (0..m).collect();
	match seed {
		Some(seed) => {
			let mut rng = StdRng::seed_from_u64(seed);
			order.shuffle(&mut rng);
		}
		None => order.shuffle(&mut rand::rng()),
	}

	let mut test_indices = order[..n_test].to_vec();
	let mut train_indices = order[n_test..].to_vec();
	test_indices.sort_unstable();
	train_indices.sort_unstable();

	Ok(Split {
		train: cohort.subset(&train_indices)?,
		test: cohort.subset(&test_indices)?,
		train_indices,
		test_indices,
	})
}
