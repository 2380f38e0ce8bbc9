//! Labeled behavior vectors and fixed-dimensionality vector sets

use serde::{Deserialize, Serialize};

use super::error::{LookalikeError, Result};

/// Text metadata of one source row, before it is joined with its embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowMeta {
	pub titles: String,
	pub keywords: String,
}

/// An embedding plus the row it was produced from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledVector {
	pub vector: Vec<f32>,
	pub titles: String,
	pub keywords: String,
	/// Population tag (e.g. the brand cohort or the comparison merge)
	pub group: String,
}

impl LabeledVector {
	pub fn new(vector: Vec<f32>, meta: RowMeta, group: impl Into<String>) -> Self {
		Self {
			vector,
			titles: meta.titles,
			keywords: meta.keywords,
			group: group.into(),
		}
	}

	pub fn dim(&self) -> usize {
		self.vector.len()
	}

	/// Same row under a different group tag
	pub fn regrouped(&self, group: impl Into<String>) -> Self {
		Self {
			group: group.into(),
			..self.clone()
		}
	}
}

/// Ordered, non-empty collection of labeled vectors sharing one dimensionality.
///
/// Construction validates everything downstream stages rely on, so a
/// `VectorSet` that exists is always safe to feed to the medoid finder and
/// the scorer without re-checking lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorSet {
	rows: Vec<LabeledVector>,
	dim: usize,
}

impl VectorSet {
	/// Validate and wrap rows. Fails on an empty set, unequal lengths or
	/// non-finite components.
	pub fn new(rows: Vec<LabeledVector>) -> Result<Self> {
		let Some(first) = rows.first() else {
			return Err(LookalikeError::InsufficientData {
				what: "vector set".into(),
				have: 0,
				need: 1,
			});
		};
		let dim = first.dim();
		if dim == 0 {
			return Err(LookalikeError::DimensionMismatch {
				context: "vector set row 0".into(),
				expected: 1,
				got: 0,
			});
		}

		for (i, row) in rows.iter().enumerate() {
			if row.dim() != dim {
				return Err(LookalikeError::DimensionMismatch {
					context: format!("vector set row {}", i),
					expected: dim,
					got: row.dim(),
				});
			}
			if let Some(column) = row.vector.iter().position(|v| !v.is_finite()) {
				return Err(LookalikeError::NonFinite { row: i, column });
			}
		}

		Ok(Self { rows, dim })
	}

	/// Join embeddings with their metadata rows by position, tagging every
	/// row with `group`. Row counts must match exactly.
	pub fn assemble(embeddings: Vec<Vec<f32>>, meta: Vec<RowMeta>, group: &str) -> Result<Self> {
		if embeddings.len() != meta.len() {
			return Err(LookalikeError::RowCountMismatch {
				embeddings: embeddings.len(),
				rows: meta.len(),
			});
		}

		let rows = embeddings
			.into_iter()
			.zip(meta)
			.map(|(vector, m)| LabeledVector::new(vector, m, group))
			.collect();

		Self::new(rows)
	}

	/// New set holding the rows at `indices`, in the given order
	pub fn subset(&self, indices: &[usize]) -> Result<Self> {
		let mut rows = Vec::with_capacity(indices.len());
		for &i in indices {
			let row = self.rows.get(i).ok_or_else(|| LookalikeError::InsufficientData {
				what: "vector set".into(),
				have: self.rows.len(),
				need: i + 1,
			})?;
			rows.push(row.clone());
		}
		Self::new(rows)
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Always false for a constructed set, kept for API symmetry with `len`
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	pub fn dim(&self) -> usize {
		self.dim
	}

	pub fn get(&self, index: usize) -> Option<&LabeledVector> {
		self.rows.get(index)
	}

	pub fn rows(&self) -> &[LabeledVector] {
		&self.rows
	}

	pub fn iter(&self) -> std::slice::Iter<'_, LabeledVector> {
		self.rows.iter()
	}

	pub fn into_rows(self) -> Vec<LabeledVector> {
		self.rows
	}

	/// Count of rows whose group differs from `group`, with the first offender
	pub fn foreign_groups(&self, group: &str) -> Option<(String, usize)> {
		let mut foreign = self.rows.iter().filter(|r| r.group != group);
		let first = foreign.next()?;
		Some((first.group.clone(), 1 + foreign.count()))
	}
}

impl<'a> IntoIterator for &'a VectorSet {
	type Item = &'a LabeledVector;
	type IntoIter = std::slice::Iter<'a, LabeledVector>;

	fn into_iter(self) -> Self::IntoIter {
		self.rows.iter()
	}
}
