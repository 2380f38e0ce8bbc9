//! Dataset files: parallel arrays of row metadata and embeddings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::{DatasetHash, RowMeta, VectorSet};

/// On-disk layout produced by the upstream embedding step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetFile {
	pub rows: Vec<RowMeta>,
	pub embeddings: Vec<Vec<f32>>,
}

/// Serialization chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
	Json,
	MessagePack,
}

impl Format {
	pub fn detect(path: &Path) -> Self {
		match path.extension().and_then(|e| e.to_str()) {
			Some(ext) if ext.eq_ignore_ascii_case("msgpack") || ext.eq_ignore_ascii_case("mp") => {
				Format::MessagePack
			}
			_ => Format::Json,
		}
	}
}

/// A loaded population plus the fingerprint of the file it came from
#[derive(Debug, Clone)]
pub struct LoadedDataset {
	pub set: VectorSet,
	pub hash: DatasetHash,
}

pub fn decode(bytes: &[u8], format: Format) -> Result<DatasetFile> {
	match format {
		Format::Json => serde_json::from_slice(bytes).context("Failed to parse JSON dataset"),
		Format::MessagePack => {
			rmp_serde::from_slice(bytes).context("Failed to deserialize MessagePack dataset")
		}
	}
}

pub fn encode(file: &DatasetFile, format: Format) -> Result<Vec<u8>> {
	match format {
		Format::Json => serde_json::to_vec(file).context("Failed to serialize JSON dataset"),
		Format::MessagePack => rmp_serde::to_vec_named(file).context("Failed to serialize MessagePack dataset"),
	}
}

/// Load a dataset and tag every row with `group`
pub fn load(path: &Path, group: &str) -> Result<LoadedDataset> {
	let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
	let hash = DatasetHash::of_bytes(&bytes);
	let file = decode(&bytes, Format::detect(path)).with_context(|| format!("Invalid dataset {}", path.display()))?;

	let set = VectorSet::assemble(file.embeddings, file.rows, group)
		.with_context(|| format!("Cannot assemble vector set from {}", path.display()))?;

	crate::ui::debug(&format!(
		"Loaded {} rows ({}D) from {} [{}]",
		set.len(),
		set.dim(),
		path.display(),
		hash.short()
	));

	Ok(LoadedDataset { set, hash })
}

/// Write a dataset file, creating parent directories
pub fn save(path: &Path, file: &DatasetFile) -> Result<()> {
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent).context("Failed to create dataset directory")?;
	}
	let bytes = encode(file, Format::detect(path))?;
	fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}
