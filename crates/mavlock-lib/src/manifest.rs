//! The project's own list of dependencies, `mavlock.json` at the project root.
//!
//! ```json
//! {
//!   "dependencies": [
//!     { "coord": "com.squareup.okhttp3:okhttp:4.9.0", "exclude": ["org.jetbrains.kotlin:kotlin-stdlib"] },
//!     { "coord": "org.jetbrains:annotations:[13.0]", "scope": "compile-only" }
//!   ]
//! }
//! ```

use serde::{Serialize, Deserialize};

use crate::artifact::{DependencyDeclaration, Exclusions, Scope};

pub const MANIFEST_FILE: &str = "mavlock.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectManifest {
	#[serde(default)]
	pub dependencies: Vec<ManifestDependency>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestDependency {
	#[serde(rename = "coord")]
	pub coordinate: String,
	#[serde(default = "default_scope")]
	pub scope: Scope,
	#[serde(default)]
	pub exclude: Vec<String>,
}

fn default_scope() -> Scope {
	Scope::Implementation
}

impl ProjectManifest {
	pub fn load_from_disk(config: &crate::Config) -> crate::Result<Self> {
		let path = config.project_root().join(MANIFEST_FILE);
		log::debug!("Reading project manifest {}", path.display());
		Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
	}

	/// Every entry as a direct declaration.
	///
	/// # Errors
	/// - [`InvalidCoordinate`](crate::Error::InvalidCoordinate) for a malformed coordinate or exclusion.
	pub fn declarations(&self) -> crate::Result<Vec<DependencyDeclaration>> {
		self.dependencies.iter().map(|d| {
			let mut declaration = DependencyDeclaration::new(&d.coordinate, d.scope)?;
			declaration.exclude = Exclusions::parse(&d.exclude)?;
			Ok(declaration)
		}).collect()
	}
}
