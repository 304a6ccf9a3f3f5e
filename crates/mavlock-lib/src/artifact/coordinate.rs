use serde::{Serialize, Deserialize};

use super::ArtifactVersion;

/// `group:artifact:version` identity of a single artifact.
///
/// The version is always stored without range brackets, so two coordinates
/// written as `a:b:[1.0]` and `a:b:1.0` are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
	pub group: String,
	pub artifact: String,
	pub version: String,
}

impl Coordinate {
	pub fn new(group: impl Into<String>, artifact: impl Into<String>, version: &str) -> Self {
		Self {
			group: group.into(),
			artifact: artifact.into(),
			version: normalize_version(version),
		}
	}

	/// Parses `group:artifact:version`.
	pub fn parse(s: &str) -> crate::Result<Self> {
		let parts: Vec<&str> = s.trim().split(':').collect();
		match parts.as_slice() {
			[group, artifact, version] if !group.is_empty() && !artifact.is_empty() => {
				let version = normalize_version(version);
				if version.is_empty() {
					return Err(crate::Error::InvalidCoordinate(s.to_string()));
				}
				Ok(Self { group: group.to_string(), artifact: artifact.to_string(), version })
			},
			_ => Err(crate::Error::InvalidCoordinate(s.to_string())),
		}
	}

	pub fn identity(&self) -> ArtifactIdentity {
		ArtifactIdentity {
			group: self.group.clone(),
			artifact: self.artifact.clone(),
		}
	}

	pub fn parsed_version(&self) -> ArtifactVersion {
		ArtifactVersion::new(&self.version)
	}
}

impl std::fmt::Display for Coordinate {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
	}
}

impl std::str::FromStr for Coordinate {
	type Err = crate::Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl TryFrom<String> for Coordinate {
	type Error = crate::Error;
	fn try_from(value: String) -> Result<Self, Self::Error> { Self::parse(&value) }
}

impl From<Coordinate> for String {
	fn from(value: Coordinate) -> Self { value.to_string() }
}

/// The version-less part of a coordinate.
///
/// Artifacts sharing an identity are different versions of the same library.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactIdentity {
	pub group: String,
	pub artifact: String,
}

impl std::fmt::Display for ArtifactIdentity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.group, self.artifact)
	}
}

/// Strips range syntax from a version.
///
/// `[1.0]` becomes `1.0`. For a bounded range such as `[1.0,2.0)` the lower bound
/// is used, falling back to the upper bound when there is no lower one.
pub fn normalize_version(version: &str) -> String {
	let stripped: String = version.trim()
		.chars()
		.filter(|c| !matches!(c, '[' | ']' | '(' | ')'))
		.collect();

	match stripped.split_once(',') {
		Some((lower, upper)) => {
			let lower = lower.trim();
			if lower.is_empty() { upper.trim().to_string() } else { lower.to_string() }
		},
		None => stripped,
	}
}
