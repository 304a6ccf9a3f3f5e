//! Libraries the host runtime already ships.

use std::collections::HashMap;

use crate::artifact::{ArtifactIdentity, ArtifactVersion, Coordinate};

/// Libraries bundled with the host runtime and the version each one is at.
const HOST_RUNTIME: &[(&str, &str, &str)] = &[
	("androidx.annotation", "annotation", "1.0.0"),
	("androidx.appcompat", "appcompat", "1.0.0"),
	("androidx.asynclayoutinflater", "asynclayoutinflater", "1.0.0"),
	("androidx.collection", "collection", "1.0.0"),
	("androidx.constraintlayout", "constraintlayout", "1.1.0"),
	("androidx.constraintlayout", "constraintlayout-solver", "1.1.0"),
	("androidx.coordinatorlayout", "coordinatorlayout", "1.0.0"),
	("androidx.core", "core", "1.0.0"),
	("androidx.arch.core", "core-common", "2.0.0"),
	("androidx.arch.core", "core-runtime", "2.0.0"),
	("androidx.cursoradapter", "cursoradapter", "1.0.0"),
	("androidx.customview", "customview", "1.0.0"),
	("androidx.drawerlayout", "drawerlayout", "1.0.0"),
	("androidx.fragment", "fragment", "1.0.0"),
	("androidx.interpolator", "interpolator", "1.0.0"),
	("androidx.legacy", "legacy-support-core-ui", "1.0.0"),
	("androidx.legacy", "legacy-support-core-utils", "1.0.0"),
	("androidx.lifecycle", "lifecycle-common", "2.0.0"),
	("androidx.lifecycle", "lifecycle-livedata", "2.0.0"),
	("androidx.lifecycle", "lifecycle-runtime", "2.0.0"),
	("androidx.lifecycle", "lifecycle-viewmodel", "2.0.0"),
	("androidx.loader", "loader", "1.0.0"),
	("androidx.localbroadcastmanager", "localbroadcastmanager", "1.0.0"),
	("androidx.print", "print", "1.0.0"),
	("androidx.slidingpanelayout", "slidingpanelayout", "1.0.0"),
	("androidx.swiperefreshlayout", "swiperefreshlayout", "1.0.0"),
	("androidx.vectordrawable", "vectordrawable", "1.0.0"),
	("androidx.vectordrawable", "vectordrawable-animated", "1.0.0"),
	("androidx.versionedparcelable", "versionedparcelable", "1.0.0"),
	("androidx.viewpager", "viewpager", "1.0.0"),
	("com.google.code.gson", "gson", "2.1"),
	("com.google.guava", "guava", "14.0.1"),
];

/// Read-only table of platform-provided libraries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformProvided {
	available: HashMap<ArtifactIdentity, String>,
}

impl PlatformProvided {
	/// The libraries bundled with the host runtime.
	pub fn host_runtime() -> Self {
		HOST_RUNTIME.iter()
			.map(|(group, artifact, version)| Coordinate::new(*group, *artifact, version))
			.collect()
	}

	/// A table with nothing in it, every dependency is fetched.
	pub fn none() -> Self {
		Self::default()
	}

	/// The version the host ships for `identity`, if it ships it at all.
	pub fn available_version(&self, identity: &ArtifactIdentity) -> Option<&str> {
		self.available.get(identity).map(String::as_str)
	}

	/// Whether `coordinate` asks for exactly the version the host already has.
	pub fn provides_exactly(&self, coordinate: &Coordinate) -> bool {
		self.available_version(&coordinate.identity())
			.map_or(false, |v| ArtifactVersion::new(v) == coordinate.parsed_version())
	}

	pub fn len(&self) -> usize {
		self.available.len()
	}

	pub fn is_empty(&self) -> bool {
		self.available.is_empty()
	}
}

impl FromIterator<Coordinate> for PlatformProvided {
	fn from_iter<T: IntoIterator<Item = Coordinate>>(iter: T) -> Self {
		Self {
			available: iter.into_iter().map(|c| (c.identity(), c.version)).collect(),
		}
	}
}
