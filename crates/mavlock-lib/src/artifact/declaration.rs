use std::collections::HashSet;

use super::{ArtifactIdentity, Coordinate, Scope};

/// A dependency listed by the project itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDeclaration {
	pub coordinate: Coordinate,
	pub scope: Scope,
	/// Coordinates never resolved anywhere below this declaration.
	pub exclude: Exclusions,
	pub direct: bool,
}

impl DependencyDeclaration {
	pub fn new(coordinate: &str, scope: Scope) -> crate::Result<Self> {
		Ok(Self {
			coordinate: Coordinate::parse(coordinate)?,
			scope,
			exclude: Default::default(),
			direct: true,
		})
	}

	/// Adds an exclusion, either `group:artifact:version` or `group:artifact` for every version.
	pub fn exclude(mut self, entry: &str) -> crate::Result<Self> {
		self.exclude.add(entry)?;
		Ok(self)
	}
}

/// Checks whether `coordinate` is exactly one of the project's own declarations.
pub fn is_directly_declared(declarations: &[DependencyDeclaration], coordinate: &Coordinate) -> bool {
	declarations.iter().any(|d| d.direct && &d.coordinate == coordinate)
}

/// A set of excluded coordinates and whole libraries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclusions {
	coordinates: HashSet<Coordinate>,
	identities: HashSet<ArtifactIdentity>,
}

impl Exclusions {
	pub fn parse<I, S>(entries: I) -> crate::Result<Self>
	where I: IntoIterator<Item = S>, S: AsRef<str>,
	{
		let mut exclusions = Self::default();
		for entry in entries {
			exclusions.add(entry.as_ref())?;
		}
		Ok(exclusions)
	}

	pub fn add(&mut self, entry: &str) -> crate::Result<()> {
		let parts: Vec<&str> = entry.trim().split(':').collect();
		match parts.as_slice() {
			[group, artifact] if !group.is_empty() && !artifact.is_empty() => {
				self.identities.insert(ArtifactIdentity { group: group.to_string(), artifact: artifact.to_string() });
			},
			[_, _, _] => {
				self.coordinates.insert(Coordinate::parse(entry)?);
			},
			_ => return Err(crate::Error::InvalidCoordinate(entry.to_string())),
		}
		Ok(())
	}

	pub fn excludes(&self, coordinate: &Coordinate) -> bool {
		self.coordinates.contains(coordinate) || self.identities.contains(&coordinate.identity())
	}

	pub fn is_empty(&self) -> bool {
		self.coordinates.is_empty() && self.identities.is_empty()
	}
}
