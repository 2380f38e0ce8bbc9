//! JSON export of a classified pool for downstream plotting

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::core::{ClassifiedVector, Evaluation, Label, Medoid};
use crate::ui;

#[derive(Debug, Serialize)]
pub struct ExportRow<'a> {
	pub titles: &'a str,
	pub keywords: &'a str,
	pub group: &'a str,
	pub score: f64,
	pub label: Label,
	pub embedding: &'a [f32],
}

#[derive(Debug, Serialize)]
pub struct ExportMedoid<'a> {
	pub titles: &'a str,
	pub keywords: &'a str,
	pub source_group: &'a str,
	pub total_distance: f64,
	pub embedding: &'a [f32],
}

#[derive(Debug, Serialize)]
pub struct Export<'a> {
	pub timestamp: String,
	pub percentile: f64,
	pub threshold: f64,
	pub total: usize,
	pub positives: usize,
	pub medoid: ExportMedoid<'a>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub evaluation: Option<&'a Evaluation>,
	pub rows: Vec<ExportRow<'a>>,
}

impl<'a> Export<'a> {
	pub fn new(
		rows: &'a [ClassifiedVector],
		medoid: &'a Medoid,
		percentile: f64,
		threshold: f64,
		evaluation: Option<&'a Evaluation>,
	) -> Self {
		Self {
			timestamp: chrono::Utc::now().to_rfc3339(),
			percentile,
			threshold,
			total: rows.len(),
			positives: rows.iter().filter(|r| r.label.is_positive()).count(),
			medoid: ExportMedoid {
				titles: &medoid.row.titles,
				keywords: &medoid.row.keywords,
				source_group: &medoid.source_group,
				total_distance: medoid.total_distance,
				embedding: &medoid.row.vector,
			},
			evaluation,
			rows: rows
				.iter()
				.map(|r| ExportRow {
					titles: &r.row.titles,
					keywords: &r.row.keywords,
					group: &r.row.group,
					score: r.score,
					label: r.label,
					embedding: &r.row.vector,
				})
				.collect(),
		}
	}
}

/// Write pretty JSON to `path`, or stdout for "-" / empty
pub fn write(export: &Export<'_>, path: &Path) -> Result<()> {
	let json = serde_json::to_string_pretty(export)?;

	if path.to_str() == Some("-") || path.as_os_str().is_empty() {
		println!("{}", json);
	} else {
		std::fs::write(path, json)
			.with_context(|| format!("Failed to write export {}", path.display()))?;
		ui::success(&format!("Exported to {}", ui::path_link(path, 60)));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{Percentile, RunConfig};
	use crate::core::vector::tests::set_of;
	use crate::processing::run;

	#[test]
	fn export_carries_pool_and_medoid() {
		let positive = set_of(&[&[1.0, 0.0], &[0.9, 0.2], &[1.0, 0.1]], "P");
		let comparison = set_of(&[&[0.0, 1.0], &[-0.2, 1.0]], "C");
		let config = RunConfig::new("P", "C")
			.with_percentile(Percentile::new(50.0).unwrap())
			.with_seed(Some(8));
		let report = run(&positive, &comparison, &config).unwrap();

		let export = Export::new(
			&report.pool,
			&report.medoid,
			config.percentile.value(),
			report.threshold,
			Some(&report.evaluation),
		);
		let value = serde_json::to_value(&export).unwrap();

		assert_eq!(value["total"], report.pool.len());
		assert_eq!(value["rows"].as_array().unwrap().len(), report.pool.len());
		assert_eq!(value["rows"][report.pool.len() - 1]["group"], "centroid");
		assert_eq!(value["medoid"]["source_group"], "P");
		assert!(value["rows"][0]["label"] == "positive" || value["rows"][0]["label"] == "negative");
		assert_eq!(value["evaluation"]["accuracy"]["state"], "value");
	}

	#[test]
	fn write_creates_file() {
		let positive = set_of(&[&[1.0, 0.0], &[0.9, 0.2], &[1.0, 0.1]], "P");
		let comparison = set_of(&[&[0.0, 1.0]], "C");
		let report = run(&positive, &comparison, &RunConfig::new("P", "C").with_seed(Some(1))).unwrap();
		let export = Export::new(&report.pool, &report.medoid, 50.0, report.threshold, None);

		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("pool.json");
		write(&export, &path).unwrap();

		let text = std::fs::read_to_string(&path).unwrap();
		let value: serde_json::Value = serde_json::from_str(&text).unwrap();
		assert!(value.get("evaluation").is_none());
		assert_eq!(value["positives"], export.positives);
	}

	#[test]
	fn write_failure_names_the_export_path() {
		let positive = set_of(&[&[1.0, 0.0], &[0.9, 0.2], &[1.0, 0.1]], "P");
		let comparison = set_of(&[&[0.0, 1.0]], "C");
		let report = run(&positive, &comparison, &RunConfig::new("P", "C").with_seed(Some(1))).unwrap();
		let export = Export::new(&report.pool, &report.medoid, 50.0, report.threshold, None);

		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("missing").join("pool.json");
		let err = write(&export, &path).unwrap_err();
		assert!(format!("{:#}", err).starts_with("Failed to write export"));
	}
}
