//! Golden seed file I/O

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SEED_EXT;
use crate::core::{DatasetHash, GoldenSeed};
use crate::processing::RunReport;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Freeze a finished run into a reusable seed record
pub fn from_report(report: &RunReport, source: Option<&DatasetHash>) -> GoldenSeed {
	GoldenSeed {
		version: VERSION.to_string(),
		created: chrono::Utc::now().to_rfc3339(),
		config: report.config.clone(),
		medoid: report.medoid.clone(),
		cohort_index: report.cohort_index,
		train_size: report.train_size,
		test_size: report.test_size,
		threshold: report.threshold,
		source_hash: source.map(|h| h.as_str().to_string()),
	}
}

/// Append the default extension when the path has none
pub fn with_default_ext(path: &Path) -> PathBuf {
	if path.extension().is_some() {
		path.to_path_buf()
	} else {
		path.with_extension(SEED_EXT)
	}
}

/// Save seed to disk as MessagePack
pub fn save(seed: &GoldenSeed, path: &Path) -> Result<PathBuf> {
	let path = with_default_ext(path);

	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent).context("Failed to create seed directory")?;
	}

	let bytes = rmp_serde::to_vec_named(seed).context("Failed to serialize seed")?;
	fs::write(&path, bytes).context("Failed to write seed")?;

	Ok(path)
}

/// Load seed from disk
pub fn load(path: &Path) -> Result<GoldenSeed> {
	let bytes = fs::read(path).with_context(|| format!("Failed to read seed {}", path.display()))?;
	rmp_serde::from_slice(&bytes).context("Failed to deserialize seed")
}
