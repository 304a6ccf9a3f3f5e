use serde::{Serialize, Deserialize};

use super::Coordinate;

/// A fetched package descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
	pub coordinate: Coordinate,
	/// Packaging type, `jar` when the descriptor doesn't say.
	pub packaging: String,
	/// Every dependency the descriptor declares, in declared order and unfiltered.
	pub dependencies: Vec<DeclaredDependency>,
}

impl ArtifactDescriptor {
	pub fn new(coordinate: Coordinate, packaging: impl Into<String>) -> Self {
		Self {
			coordinate,
			packaging: packaging.into(),
			dependencies: Default::default(),
		}
	}

	pub fn with_dependency(mut self, dependency: DeclaredDependency) -> Self {
		self.dependencies.push(dependency);
		self
	}
}

/// A dependency exactly as written in a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredDependency {
	pub group: String,
	pub artifact: String,
	pub version: Option<String>,
	pub scope: Option<String>,
	pub optional: bool,
}

impl DeclaredDependency {
	pub fn new(group: impl Into<String>, artifact: impl Into<String>, version: Option<&str>, scope: Option<&str>) -> Self {
		Self {
			group: group.into(),
			artifact: artifact.into(),
			version: version.map(str::to_string),
			scope: scope.map(str::to_string),
			optional: false,
		}
	}

	pub fn optional(mut self) -> Self {
		self.optional = true;
		self
	}

	/// The normalized coordinate, `None` when there is no version.
	pub fn coordinate(&self) -> Option<Coordinate> {
		let version = self.version.as_deref()?;
		let coordinate = Coordinate::new(self.group.clone(), self.artifact.clone(), version);
		if coordinate.version.is_empty() { None } else { Some(coordinate) }
	}
}

impl std::fmt::Display for DeclaredDependency {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.coordinate() {
			Some(c) => write!(f, "{}", c),
			None => write!(f, "{}:{}", self.group, self.artifact),
		}
	}
}
