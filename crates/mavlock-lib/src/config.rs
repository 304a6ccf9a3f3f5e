use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

/// Name of the project metadata directory, relative to the project root.
pub const METADATA_DIR: &str = ".mavlock";
const CONFIG_FILE: &str = "config.json";
const LOCK_FILE: &str = "lock.json";

/// A remote repository artifacts are fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRepositoryConfig {
	pub id: String,
	pub url: String,
}

impl RemoteRepositoryConfig {
	pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
		Self { id: id.into(), url: url.into() }
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	#[serde(skip)]
	project_root: PathBuf,
	local_repository: PathBuf,
	/// Tried in order, the first repository holding an artifact wins.
	repositories: Vec<RemoteRepositoryConfig>,
	https_only: bool,
	do_checksums: bool,
	max_concurrent_downloads: usize,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			project_root: PathBuf::from("."),
			local_repository: {
				let path = if let Ok(e) = std::env::var("XDG_CACHE_HOME") {
					PathBuf::from(e)
				} else if let Ok(home) = std::env::var("HOME") {
					PathBuf::from(home).join(".cache")
				} else {
					std::env::temp_dir()
				};

				path.join("mavlock").join("repository")
			},
			repositories: vec![
				RemoteRepositoryConfig::new("central", "https://repo.maven.apache.org/maven2"),
				RemoteRepositoryConfig::new("google", "https://dl.google.com/dl/android/maven2"),
			],
			https_only: true,
			do_checksums: true,
			max_concurrent_downloads: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4),
		}
	}
}

impl Config {
	/// Default configuration for the project at `project_root`.
	pub fn for_project(project_root: impl Into<PathBuf>) -> Self {
		Self {
			project_root: project_root.into(),
			..Default::default()
		}
	}

	/// Reads `.mavlock/config.json` under `project_root`, falling back to the defaults when it doesn't exist.
	pub fn load_from_disk(project_root: impl AsRef<Path>) -> crate::Result<Self> {
		let project_root = project_root.as_ref();
		let path = project_root.join(METADATA_DIR).join(CONFIG_FILE);
		if !path.exists() {
			log::debug!("No config at {}, using defaults.", path.display());
			return Ok(Self::for_project(project_root));
		}

		log::debug!("Reading config from {}", path.display());
		let mut config: Config = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
		config.project_root = project_root.to_path_buf();
		Ok(config)
	}

	pub fn project_root(&self) -> &Path {
		&self.project_root
	}

	pub fn metadata_dir(&self) -> PathBuf {
		self.project_root.join(METADATA_DIR)
	}

	pub fn lock_file_path(&self) -> PathBuf {
		self.metadata_dir().join(LOCK_FILE)
	}

	pub fn local_repository(&self) -> &Path {
		&self.local_repository
	}
	pub fn set_local_repository(&mut self, local_repository: PathBuf) {
		self.local_repository = local_repository;
	}

	pub fn repositories(&self) -> &[RemoteRepositoryConfig] {
		&self.repositories
	}
	pub fn set_repositories(&mut self, repositories: Vec<RemoteRepositoryConfig>) {
		self.repositories = repositories;
	}

	pub fn https_only(&self) -> bool {
		self.https_only
	}
	pub fn set_https_only(&mut self, https_only: bool) {
		self.https_only = https_only;
	}

	pub fn do_checksums(&self) -> bool {
		self.do_checksums
	}
	pub fn set_do_checksums(&mut self, do_checksums: bool) {
		self.do_checksums = do_checksums;
	}

	/// Never less than one.
	pub fn max_concurrent_downloads(&self) -> usize {
		self.max_concurrent_downloads.max(1)
	}
	pub fn set_max_concurrent_downloads(&mut self, max: usize) {
		self.max_concurrent_downloads = max;
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn lock_file_lives_in_metadata_dir() {
		let config = Config::for_project("/work/app");
		assert_eq!(config.lock_file_path(), PathBuf::from("/work/app/.mavlock/lock.json"));
	}

	#[test]
	fn zero_workers_is_clamped() {
		let mut config = Config::default();
		config.set_max_concurrent_downloads(0);
		assert_eq!(config.max_concurrent_downloads(), 1);
	}

	#[test]
	fn missing_config_gives_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let config = Config::load_from_disk(dir.path()).unwrap();
		assert_eq!(config.project_root(), dir.path());
		assert!(config.https_only());
	}

	#[test]
	fn partial_config_keeps_other_defaults() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::create_dir_all(dir.path().join(METADATA_DIR)).unwrap();
		std::fs::write(
			dir.path().join(METADATA_DIR).join(CONFIG_FILE),
			r#"{ "repositories": [ { "id": "mirror", "url": "https://mirror.example/maven2" } ], "do_checksums": false }"#,
		).unwrap();

		let config = Config::load_from_disk(dir.path()).unwrap();
		assert_eq!(config.repositories(), &[RemoteRepositoryConfig::new("mirror", "https://mirror.example/maven2")]);
		assert!(!config.do_checksums());
		assert!(config.https_only());
	}
}
