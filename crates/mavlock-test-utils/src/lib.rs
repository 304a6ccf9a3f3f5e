//! Various helpers for testing
//!
//! [`MockRepository`] stands in for remote repositories: descriptors are registered up
//! front and payloads are written under a temporary directory.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use mavlock::artifact::{ArtifactDescriptor, Coordinate, DeclaredDependency};
use mavlock::repository::{local_payload_path, ArtifactRepository, FetchError};

#[derive(Default)]
struct Calls {
	fetched: Vec<Coordinate>,
	downloaded: Vec<Coordinate>,
}

/// In-memory repository.
pub struct MockRepository {
	descriptors: HashMap<Coordinate, ArtifactDescriptor>,
	failing_descriptors: HashMap<Coordinate, FetchError>,
	failing_downloads: HashMap<Coordinate, FetchError>,
	missing_sources: HashSet<Coordinate>,
	root: tempfile::TempDir,
	calls: Mutex<Calls>,
	latency: Option<Duration>,
	in_flight: AtomicUsize,
	peak_in_flight: AtomicUsize,
}

impl MockRepository {
	/// # Panics
	/// When a temporary directory can't be created.
	pub fn new() -> Self {
		Self {
			descriptors: Default::default(),
			failing_descriptors: Default::default(),
			failing_downloads: Default::default(),
			missing_sources: Default::default(),
			root: tempfile::tempdir().expect("failed to create temporary repository"),
			calls: Default::default(),
			latency: None,
			in_flight: AtomicUsize::new(0),
			peak_in_flight: AtomicUsize::new(0),
		}
	}

	/// Makes every descriptor fetch take at least `latency`.
	pub fn with_latency(mut self, latency: Duration) -> Self {
		self.latency = Some(latency);
		self
	}

	/// Registers a `jar` artifact with the given dependencies.
	pub fn with_artifact(self, coordinate: &str, dependencies: Vec<DeclaredDependency>) -> Self {
		self.with_packaged_artifact(coordinate, "jar", dependencies)
	}

	pub fn with_packaged_artifact(mut self, coordinate: &str, packaging: &str, dependencies: Vec<DeclaredDependency>) -> Self {
		let coordinate = parse(coordinate);
		let mut descriptor = ArtifactDescriptor::new(coordinate.clone(), packaging);
		descriptor.dependencies = dependencies;
		self.descriptors.insert(coordinate, descriptor);
		self
	}

	/// Makes fetching the descriptor of `coordinate` fail with `error`.
	pub fn with_failing_descriptor(mut self, coordinate: &str, error: FetchError) -> Self {
		self.failing_descriptors.insert(parse(coordinate), error);
		self
	}

	/// Makes downloading the payload of `coordinate` fail with `error`.
	pub fn with_failing_download(mut self, coordinate: &str, error: FetchError) -> Self {
		self.failing_downloads.insert(parse(coordinate), error);
		self
	}

	pub fn without_sources(mut self, coordinate: &str) -> Self {
		self.missing_sources.insert(parse(coordinate));
		self
	}

	/// Places a payload on disk as if it had been downloaded earlier.
	pub fn with_cached_payload(self, coordinate: &str) -> Self {
		let coordinate = parse(coordinate);
		let path = self.payload_path(&coordinate);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent).expect("failed to create cache directory");
		}
		std::fs::write(&path, b"cached").expect("failed to write cached payload");
		self
	}

	pub fn root(&self) -> &std::path::Path {
		self.root.path()
	}

	/// Every descriptor fetch in the order they were made.
	pub fn fetched(&self) -> Vec<Coordinate> {
		self.calls.lock().expect("poisoned").fetched.clone()
	}

	/// Every payload download in the order they were made.
	pub fn downloaded(&self) -> Vec<Coordinate> {
		self.calls.lock().expect("poisoned").downloaded.clone()
	}

	/// The most descriptor fetches that were ever running at the same time.
	pub fn peak_in_flight(&self) -> usize {
		self.peak_in_flight.load(Ordering::SeqCst)
	}

	fn payload_path(&self, coordinate: &Coordinate) -> PathBuf {
		let packaging = self.descriptors.get(coordinate).map(|d| d.packaging.clone()).unwrap_or_else(|| "jar".to_string());
		local_payload_path(self.root.path(), &ArtifactDescriptor::new(coordinate.clone(), packaging))
	}
}

impl Default for MockRepository {
	fn default() -> Self {
		Self::new()
	}
}

fn parse(coordinate: &str) -> Coordinate {
	Coordinate::parse(coordinate).expect("invalid coordinate in test setup")
}

#[async_trait::async_trait]
impl ArtifactRepository for MockRepository {
	async fn fetch_descriptor(&self, coordinate: &Coordinate) -> Result<ArtifactDescriptor, FetchError> {
		self.calls.lock().expect("poisoned").fetched.push(coordinate.clone());

		if let Some(latency) = self.latency {
			let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
			self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
			tokio::time::sleep(latency).await;
			self.in_flight.fetch_sub(1, Ordering::SeqCst);
		}

		if let Some(e) = self.failing_descriptors.get(coordinate) {
			return Err(e.clone());
		}
		self.descriptors.get(coordinate).cloned().ok_or(FetchError::NotFound)
	}

	async fn download(&self, artifact: &ArtifactDescriptor) -> Result<(), FetchError> {
		self.calls.lock().expect("poisoned").downloaded.push(artifact.coordinate.clone());

		if let Some(e) = self.failing_downloads.get(&artifact.coordinate) {
			return Err(e.clone());
		}

		let path = self.local_path(artifact);
		let write = || -> std::io::Result<()> {
			if let Some(parent) = path.parent() {
				std::fs::create_dir_all(parent)?;
			}
			std::fs::write(&path, artifact.coordinate.to_string())
		};
		write().map_err(|e| FetchError::Transport { repository: "mock".to_string(), response_code: None, message: e.to_string() })
	}

	async fn download_sources(&self, artifact: &ArtifactDescriptor) -> Result<(), FetchError> {
		if self.missing_sources.contains(&artifact.coordinate) {
			Err(FetchError::NotFound)
		} else {
			Ok(())
		}
	}

	fn local_path(&self, artifact: &ArtifactDescriptor) -> PathBuf {
		local_payload_path(self.root.path(), artifact)
	}
}

/// Shorthand for a descriptor dependency.
pub fn dep(coordinate: &str, scope: &str) -> DeclaredDependency {
	let mut parts = coordinate.splitn(3, ':');
	let group = parts.next().unwrap_or_default();
	let artifact = parts.next().unwrap_or_default();
	DeclaredDependency::new(group, artifact, parts.next(), Some(scope))
}
