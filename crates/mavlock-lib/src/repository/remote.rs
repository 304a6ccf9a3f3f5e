//! Repository access over HTTP.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{ArtifactRepository, FetchError};
use crate::artifact::{ArtifactDescriptor, Coordinate};
use crate::config::RemoteRepositoryConfig;

/// Fetches from a prioritized list of remote repositories and stores payloads in a local repository.
#[derive(Debug)]
pub struct RemoteRepository {
	client: reqwest::Client,
	repositories: Vec<RemoteRepositoryConfig>,
	local_root: PathBuf,
	do_checksums: bool,
}

impl RemoteRepository {
	pub fn new(config: &crate::Config) -> crate::Result<Self> {
		let client = reqwest::Client::builder()
			.https_only(config.https_only())
			.build()?;

		Ok(Self {
			client,
			repositories: config.repositories().to_vec(),
			local_root: config.local_repository().to_path_buf(),
			do_checksums: config.do_checksums(),
		})
	}

	/// Gets `relative` from the first repository that has it.
	///
	/// Returns the body and the repository that served it.
	async fn get(&self, relative: &str) -> Result<(Vec<u8>, &RemoteRepositoryConfig), FetchError> {
		let mut failures = Vec::<(String, FetchError)>::new();

		for repository in &self.repositories {
			let url = format!("{}/{}", repository.url.trim_end_matches('/'), relative);
			log::trace!("GET {}", url);
			match self.get_one(repository, &url).await {
				Ok(Some(body)) => return Ok((body, repository)),
				Ok(None) => continue,
				Err(e) => {
					log::debug!("Repository {} failed for {}: {}", repository.id, relative, e);
					failures.push((repository.id.clone(), e));
				},
			}
		}

		match failures.len() {
			0 => Err(FetchError::NotFound),
			1 => Err(failures.remove(0).1),
			_ => Err(FetchError::Aggregate(failures)),
		}
	}

	/// `Ok(None)` when the repository doesn't have the file.
	async fn get_one(&self, repository: &RemoteRepositoryConfig, url: &str) -> Result<Option<Vec<u8>>, FetchError> {
		let transport = |response_code: Option<u16>, message: String| FetchError::Transport {
			repository: repository.id.clone(),
			response_code,
			message,
		};

		let response = self.client
			.get(url)
			.send()
			.await
			.map_err(|e| transport(e.status().map(|s| s.as_u16()), e.to_string()))?;

		let status = response.status();
		if status == reqwest::StatusCode::NOT_FOUND {
			return Ok(None);
		}
		if !status.is_success() {
			return Err(transport(Some(status.as_u16()), status.canonical_reason().unwrap_or("unexpected status").to_string()));
		}

		let body = response
			.bytes()
			.await
			.map_err(|e| transport(Some(status.as_u16()), e.to_string()))?;

		Ok(Some(body.to_vec()))
	}

	/// Compares `content` against the repository's `.sha256` file when it publishes one.
	async fn verify(&self, repository: &RemoteRepositoryConfig, relative: &str, content: &[u8]) -> Result<(), FetchError> {
		if !self.do_checksums {
			return Ok(());
		}

		let url = format!("{}/{}.sha256", repository.url.trim_end_matches('/'), relative);
		let published = match self.get_one(repository, &url).await? {
			Some(published) => published,
			None => {
				log::debug!("No checksum published for {}", relative);
				return Ok(());
			},
		};

		let published = String::from_utf8_lossy(&published);
		let expected = published.split_whitespace().next().unwrap_or_default().to_lowercase();
		if expected != sha256::digest(content) {
			return Err(FetchError::InvalidHash);
		}
		Ok(())
	}

	async fn fetch_to_disk(&self, relative: &str, destination: PathBuf) -> Result<(), FetchError> {
		let (content, repository) = self.get(relative).await?;
		self.verify(repository, relative, &content).await?;

		log::info!("Writing {} to disk", relative);
		write_atomically(&destination, &content).await.map_err(|e| FetchError::Transport {
			repository: "local".to_string(),
			response_code: None,
			message: format!("writing {}: {}", destination.display(), e),
		})
	}
}

async fn write_atomically(destination: &std::path::Path, content: &[u8]) -> std::io::Result<()> {
	if let Some(parent) = destination.parent() {
		tokio::fs::create_dir_all(parent).await?;
	}
	let partial = destination.with_extension("part");
	tokio::fs::write(&partial, content).await?;
	tokio::fs::rename(&partial, destination).await
}

#[async_trait]
impl ArtifactRepository for RemoteRepository {
	async fn fetch_descriptor(&self, coordinate: &Coordinate) -> Result<ArtifactDescriptor, FetchError> {
		let relative = super::layout_path(coordinate, None, "pom");
		let (content, repository) = self.get(&relative).await?;
		self.verify(repository, &relative, &content).await?;

		super::parse_pom(coordinate, &String::from_utf8_lossy(&content)).map_err(|e| FetchError::Transport {
			repository: repository.id.clone(),
			response_code: None,
			message: e.to_string(),
		})
	}

	async fn download(&self, artifact: &ArtifactDescriptor) -> Result<(), FetchError> {
		let relative = super::layout_path(&artifact.coordinate, None, super::packaging_extension(&artifact.packaging));
		self.fetch_to_disk(&relative, self.local_path(artifact)).await
	}

	async fn download_sources(&self, artifact: &ArtifactDescriptor) -> Result<(), FetchError> {
		let relative = super::layout_path(&artifact.coordinate, Some("sources"), "jar");
		self.fetch_to_disk(&relative, self.local_root.join(&relative)).await
	}

	fn local_path(&self, artifact: &ArtifactDescriptor) -> PathBuf {
		super::local_payload_path(&self.local_root, artifact)
	}
}
