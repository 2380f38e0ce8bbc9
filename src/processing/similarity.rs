//! Cosine similarity scoring and pairwise dissimilarity matrices

use clap::ValueEnum;
use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{LookalikeError, Result, ScoredVector, VectorSet};

/// Dissimilarity used to pick the medoid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
	/// 1 - cosine similarity
	#[default]
	Cosine,
}

impl DistanceMetric {
	/// Full M×M dissimilarity matrix for `set`
	pub fn distance_matrix(&self, set: &VectorSet) -> Result<Array2<f64>> {
		match self {
			DistanceMetric::Cosine => cosine_distance_matrix(set),
		}
	}
}

impl std::fmt::Display for DistanceMetric {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			DistanceMetric::Cosine => f.write_str("cosine"),
		}
	}
}

pub(crate) fn dot(a: &[f32], b: &[f32]) -> f64 {
	a.iter().zip(b.iter()).map(|(&x, &y)| x as f64 * y as f64).sum()
}

pub(crate) fn squared_norm(v: &[f32]) -> f64 {
	dot(v, v)
}

/// Cosine from a dot product and the two squared norms.
///
/// Dividing by `sqrt(na2 * nb2)` rather than `sqrt(na2) * sqrt(nb2)` makes a
/// vector scored against itself come out at exactly 1.0.
fn cosine_from_parts(dot: f64, na2: f64, nb2: f64) -> f64 {
	dot / (na2 * nb2).sqrt()
}

/// (a·b) / (‖a‖·‖b‖). Not clamped, so rounding may push it slightly past ±1.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64> {
	if a.len() != b.len() {
		return Err(LookalikeError::DimensionMismatch {
			context: "cosine similarity".into(),
			expected: a.len(),
			got: b.len(),
		});
	}

	let na2 = squared_norm(a);
	if na2 == 0.0 {
		return Err(LookalikeError::ZeroNorm { what: "left vector".into() });
	}
	let nb2 = squared_norm(b);
	if nb2 == 0.0 {
		return Err(LookalikeError::ZeroNorm { what: "right vector".into() });
	}

	Ok(cosine_from_parts(dot(a, b), na2, nb2))
}

/// Squared norms of every row, failing on the first zero vector
fn squared_norms(set: &VectorSet) -> Result<Vec<f64>> {
	set.iter()
		.enumerate()
		.map(|(i, row)| {
			let n2 = squared_norm(&row.vector);
			if n2 == 0.0 {
				Err(LookalikeError::ZeroNorm {
					what: format!("row {} ({})", i, row.group),
				})
			} else {
				Ok(n2)
			}
		})
		.collect()
}

/// Cosine distance matrix. Rows are computed in parallel; the diagonal is 0.
fn cosine_distance_matrix(set: &VectorSet) -> Result<Array2<f64>> {
	let m = set.len();
	let norms = squared_norms(set)?;
	let rows = set.rows();

	let flat: Vec<f64> = (0..m)
		.into_par_iter()
		.flat_map_iter(|i| {
			let a = &rows[i].vector;
			let na2 = norms[i];
			let norms = &norms;
			(0..m).map(move |j| {
				if i == j {
					0.0
				} else {
					1.0 - cosine_from_parts(dot(a, &rows[j].vector), na2, norms[j])
				}
			})
		})
		.collect();

	let len = flat.len();
	Array2::from_shape_vec((m, m), flat).map_err(|e| LookalikeError::DimensionMismatch {
		context: format!("distance matrix ({})", e),
		expected: m * m,
		got: len,
	})
}

/// Scores vectors against one fixed reference (the golden seed)
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
	reference: Vec<f32>,
	reference_norm2: f64,
}

impl SimilarityScorer {
	pub fn new(reference: &[f32]) -> Result<Self> {
		if reference.is_empty() {
			return Err(LookalikeError::InsufficientData {
				what: "reference vector".into(),
				have: 0,
				need: 1,
			});
		}
		let reference_norm2 = squared_norm(reference);
		if reference_norm2 == 0.0 {
			return Err(LookalikeError::ZeroNorm {
				what: "reference vector".into(),
			});
		}
		Ok(Self {
			reference: reference.to_vec(),
			reference_norm2,
		})
	}

	pub fn dim(&self) -> usize {
		self.reference.len()
	}

	/// Cosine similarity of `v` to the reference
	pub fn score(&self, v: &[f32]) -> Result<f64> {
		if v.len() != self.reference.len() {
			return Err(LookalikeError::DimensionMismatch {
				context: "scored vector".into(),
				expected: self.reference.len(),
				got: v.len(),
			});
		}
		let n2 = squared_norm(v);
		if n2 == 0.0 {
			return Err(LookalikeError::ZeroNorm {
				what: "scored vector".into(),
			});
		}
		Ok(cosine_from_parts(dot(&self.reference, v), self.reference_norm2, n2))
	}

	/// Score every member of `set`, preserving order
	pub fn score_set(&self, set: &VectorSet) -> Result<Vec<ScoredVector>> {
		if set.dim() != self.dim() {
			return Err(LookalikeError::DimensionMismatch {
				context: "scoring population".into(),
				expected: self.dim(),
				got: set.dim(),
			});
		}

		set.rows()
			.par_iter()
			.enumerate()
			.map(|(i, row)| -> Result<ScoredVector> {
				let score = self.score(&row.vector).map_err(|e| match e {
					LookalikeError::ZeroNorm { .. } => LookalikeError::ZeroNorm {
						what: format!("row {} ({})", i, row.group),
					},
					other => other,
				})?;
				Ok(ScoredVector {
					row: row.clone(),
					score,
				})
			})
			.collect()
	}
}
