//! The golden seed: a medoid row selected from a training split

use serde::{Deserialize, Serialize};

use super::vector::LabeledVector;
use crate::config::CENTROID_GROUP;

/// Member of a vector set minimizing total dissimilarity to the others.
///
/// Unlike a centroid it is always an actual member. Its group is replaced
/// by the `centroid` sentinel; titles and keywords come from the source row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medoid {
	/// Position within the set it was selected from
	pub index: usize,
	pub row: LabeledVector,
	/// Group tag of the source row before it was relabeled
	pub source_group: String,
	/// Sum of dissimilarities from this member to every other member
	pub total_distance: f64,
}

impl Medoid {
	pub fn from_member(index: usize, source: &LabeledVector, total_distance: f64) -> Self {
		Self {
			index,
			row: source.regrouped(CENTROID_GROUP),
			source_group: source.group.clone(),
			total_distance,
		}
	}

	pub fn vector(&self) -> &[f32] {
		&self.row.vector
	}
}
