//! The lock file, the only output handed to the build.

use std::path::PathBuf;

use serde::{Serialize, Deserialize};

use crate::artifact::{Coordinate, Scope};

/// A dependency left out because the host runtime already ships it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkippedArtifact {
	#[serde(rename = "coord")]
	pub coordinate: Coordinate,
	/// The version the host runtime is assumed to provide.
	pub available_version: String,
	pub scope: Scope,
}

/// A resolved and downloaded artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEntry {
	#[serde(rename = "coord")]
	pub coordinate: Coordinate,
	pub scope: Scope,
	#[serde(rename = "type")]
	pub packaging: String,
	pub direct: bool,
	pub path: PathBuf,
	/// Every dependency the artifact's descriptor declares.
	#[serde(rename = "deps")]
	pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockFile {
	#[serde(rename = "skipped_deps")]
	pub skipped: Vec<SkippedArtifact>,
	#[serde(rename = "resolved_deps")]
	pub resolved: Vec<LockEntry>,
}

impl LockFile {
	/// Builds the lock file, ordering both lists by coordinate so the output is stable between runs.
	pub fn assemble(mut skipped: Vec<SkippedArtifact>, mut resolved: Vec<LockEntry>) -> Self {
		skipped.sort();
		skipped.dedup();
		resolved.sort_by(|a, b| a.coordinate.cmp(&b.coordinate));
		Self { skipped, resolved }
	}

	pub fn get(&self, coordinate: &Coordinate) -> Option<&LockEntry> {
		self.resolved.iter().find(|e| &e.coordinate == coordinate)
	}

	/// Writes the lock file to [`lock_file_path()`](crate::Config::lock_file_path).
	///
	/// The file is written next to its destination and renamed over it, an existing
	/// lock file is either kept intact or fully replaced.
	pub fn save_to_disk(&self, config: &crate::Config) -> crate::Result<PathBuf> {
		let path = config.lock_file_path();
		std::fs::create_dir_all(config.metadata_dir())?;

		let partial = path.with_extension("json.part");
		std::fs::write(&partial, serde_json::to_string_pretty(self)?)?;
		std::fs::rename(&partial, &path)?;

		log::info!("Wrote lock file to {}", path.display());
		Ok(path)
	}

	pub fn load_from_disk(config: &crate::Config) -> crate::Result<Self> {
		let data = std::fs::read_to_string(config.lock_file_path())?;
		Ok(serde_json::from_str(&data)?)
	}
}
