//! Exact medoid selection over a vector set
//!
//! Builds the full pairwise dissimilarity matrix (O(M²·N)) and picks the row
//! with the smallest sum. Meant for training cohorts of hundreds to low
//! thousands of members, never for the full comparison population.

use ndarray::{Array2, Axis};

use crate::config::MIN_MEDOID_MEMBERS;
use crate::core::{LookalikeError, Medoid, Result, VectorSet};
use crate::processing::similarity::DistanceMetric;
use crate::ui;

/// Compute the medoid of `set` under `metric`.
///
/// Ties resolve to the lowest index, independent of how the matrix rows
/// were scheduled across threads.
pub fn find_medoid(set: &VectorSet, metric: DistanceMetric) -> Result<Medoid> {
	if set.len() < MIN_MEDOID_MEMBERS {
		return Err(LookalikeError::InsufficientData {
			what: "vector set".into(),
			have: set.len(),
			need: MIN_MEDOID_MEMBERS,
		});
	}

	ui::debug(&format!(
		"Computing {}x{} {} distance matrix ({}D)",
		set.len(),
		set.len(),
		metric,
		set.dim()
	));

	let distances = metric.distance_matrix(set)?;
	let (index, total_distance) = argmin_row_sum(&distances)?;

	let source = set.get(index).ok_or_else(|| LookalikeError::InsufficientData {
		what: "vector set".into(),
		have: set.len(),
		need: index + 1,
	})?;

	Ok(Medoid::from_member(index, source, total_distance))
}

/// Index and value of the smallest row sum, first occurrence wins
pub fn argmin_row_sum(distances: &Array2<f64>) -> Result<(usize, f64)> {
	let sums = distances.sum_axis(Axis(1));

	let mut best: Option<(usize, f64)> = None;
	for (i, &sum) in sums.iter().enumerate() {
		match best {
			Some((_, current)) if sum >= current => {}
			_ => best = Some((i, sum)),
		}
	}

	best.ok_or_else(|| LookalikeError::InsufficientData {
		what: "distance matrix".into(),
		have: 0,
		need: 1,
	})
}
