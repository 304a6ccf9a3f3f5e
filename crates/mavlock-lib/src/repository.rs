//! Access to package descriptors and payloads.
//!
//! The resolver only talks to an [`ArtifactRepository`]. [`RemoteRepository`] is the
//! implementation used against real repositories, tests supply their own.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::artifact::{ArtifactDescriptor, Coordinate};

mod pom;
pub use pom::parse_pom;

mod remote;
pub use remote::RemoteRepository;

/// Why a descriptor or payload could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
	/// No configured repository has the coordinate.
	#[error("not found in any repository")]
	NotFound,
	/// A single repository failed to answer.
	#[error("repository {repository} failed ({}): {message}", .response_code.map(|c| c.to_string()).unwrap_or_else(|| "no response".to_string()))]
	Transport {
		repository: String,
		response_code: Option<u16>,
		message: String,
	},
	/// The payload didn't match its published checksum.
	#[error("hash validation failed")]
	InvalidHash,
	/// Every repository attempted failed, one entry per repository.
	#[error("{} repositories failed", .0.len())]
	Aggregate(Vec<(String, FetchError)>),
}

#[async_trait]
pub trait ArtifactRepository: Send + Sync {
	/// Fetches the descriptor for `coordinate`.
	async fn fetch_descriptor(&self, coordinate: &Coordinate) -> Result<ArtifactDescriptor, FetchError>;

	/// Materializes the artifact's payload at [`local_path()`](ArtifactRepository::local_path).
	async fn download(&self, artifact: &ArtifactDescriptor) -> Result<(), FetchError>;

	/// Fetches the sources payload next to the main payload. Callers treat failure as non-fatal.
	async fn download_sources(&self, artifact: &ArtifactDescriptor) -> Result<(), FetchError>;

	/// Where the payload lives once downloaded.
	fn local_path(&self, artifact: &ArtifactDescriptor) -> PathBuf;

	fn exists_locally(&self, artifact: &ArtifactDescriptor) -> bool {
		self.local_path(artifact).is_file()
	}
}

/// File extension of a payload with the given packaging.
pub fn packaging_extension(packaging: &str) -> &str {
	match packaging {
		"aar" => "aar",
		"pom" => "pom",
		_ => "jar",
	}
}

/// Path of a file in the standard repository layout, relative to the repository root.
///
/// `group/as/dirs/artifact/version/artifact-version[-classifier].extension`
pub fn layout_path(coordinate: &Coordinate, classifier: Option<&str>, extension: &str) -> String {
	let file_name = match classifier {
		Some(classifier) => format!("{}-{}-{}.{}", coordinate.artifact, coordinate.version, classifier, extension),
		None => format!("{}-{}.{}", coordinate.artifact, coordinate.version, extension),
	};
	format!("{}/{}/{}/{}", coordinate.group.replace('.', "/"), coordinate.artifact, coordinate.version, file_name)
}

/// Local payload path of `artifact` inside a repository rooted at `root`.
pub fn local_payload_path(root: &Path, artifact: &ArtifactDescriptor) -> PathBuf {
	root.join(layout_path(&artifact.coordinate, None, packaging_extension(&artifact.packaging)))
}
