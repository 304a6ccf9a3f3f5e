//! The transitive walk.
//!
//! Each node's children are only known once its descriptor has been fetched, so a
//! single path is walked one fetch at a time. Sibling subtrees don't depend on each
//! other and are walked concurrently, then merged back in declared order. However deep
//! the walk goes, no more than `concurrency` descriptor fetches are in flight at once.

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt, TryStreamExt};

use super::*;

impl<'r> Resolver<'r> {
	/// Walks every direct declaration, each with its own exclusions.
	///
	/// The result holds every node of every walk, duplicates included.
	pub async fn resolve_all(&self) -> crate::Result<Resolution> {
		let walks = self.declarations.iter()
			.map(|d| self.resolve(&d.coordinate, d.scope, &d.exclude));

		let results: Vec<Resolution> = stream::iter(walks)
			.buffered(self.concurrency)
			.try_collect()
			.await?;

		let mut resolution = Resolution::default();
		for r in results {
			resolution.append(r);
		}
		Ok(resolution)
	}

	/// Resolves `coordinate` and everything below it.
	///
	/// Nodes come back in pre-order, a node is always followed by its own subtree
	/// and sibling subtrees keep the order they are declared in.
	///
	/// # Errors
	/// - [`Fetch`](crate::Error::Fetch) when any descriptor in the subtree can't be fetched.
	/// - [`MissingVersion`](crate::Error::MissingVersion) and [`UnknownScope`](crate::Error::UnknownScope) for unusable children.
	pub fn resolve<'a>(&'a self, coordinate: &Coordinate, scope: Scope, exclude: &'a Exclusions) -> BoxFuture<'a, crate::Result<Resolution>> {
		let coordinate = Coordinate::new(coordinate.group.clone(), coordinate.artifact.clone(), &coordinate.version);
		self.resolve_at(coordinate, scope, exclude, 0)
	}

	fn resolve_at<'a>(&'a self, coordinate: Coordinate, scope: Scope, exclude: &'a Exclusions, depth: usize) -> BoxFuture<'a, crate::Result<Resolution>> {
		async move {
			if let Some(skipped) = self.platform_skip(&coordinate, scope) {
				log::debug!("Skipping {}, the host provides {}", coordinate, skipped.available_version);
				return Ok(Resolution::skipped(skipped));
			}

			log::info!("Resolving: {}", coordinate);
			let descriptor = {
				/* The permit is released before the children are walked. The semaphore is never closed */
				let _permit = self.fetch_permits.acquire().await.ok();
				self.repository
					.fetch_descriptor(&coordinate)
					.await
					.map_err(|e| crate::Error::fetch(&coordinate, e))?
			};

			let children: Vec<(Coordinate, Scope)> = retained_children(&descriptor, scope)?
				.into_iter()
				.filter(|(child, _)| {
					let excluded = exclude.excludes(child);
					if excluded { log::debug!("Excluding {} below {}", child, coordinate); }
					!excluded
				})
				.collect();

			let subtrees: Vec<Resolution> = stream::iter(children)
				.map(|(child, child_scope)| self.resolve_at(child, child_scope, exclude, depth + 1))
				.buffered(self.concurrency)
				.try_collect()
				.await?;

			let mut resolution = Resolution::node(ResolvedNode { artifact: descriptor, scope, depth });
			for subtree in subtrees {
				resolution.append(subtree);
			}
			Ok(resolution)
		}.boxed()
	}

	/// A platform-provided artifact is skipped when the host has the requested version,
	/// or when the project didn't ask for this exact coordinate itself.
	fn platform_skip(&self, coordinate: &Coordinate, scope: Scope) -> Option<SkippedArtifact> {
		let available = self.platform.available_version(&coordinate.identity())?;
		if self.platform.provides_exactly(coordinate) || !is_directly_declared(&self.declarations, coordinate) {
			Some(SkippedArtifact {
				coordinate: coordinate.clone(),
				available_version: available.to_string(),
				scope,
			})
		} else {
			log::debug!("{} overrides the host's {}", coordinate, available);
			None
		}
	}
}

/// The children of `descriptor` that are followed when it was reached with `scope`.
///
/// Optional children are dropped, then children whose scope doesn't propagate.
fn retained_children(descriptor: &ArtifactDescriptor, scope: Scope) -> crate::Result<Vec<(Coordinate, Scope)>> {
	let mut children = Vec::new();

	for dependency in &descriptor.dependencies {
		if dependency.optional {
			continue;
		}

		let child_scope = match MavenScope::parse(dependency.scope.as_deref()) {
			Some(maven_scope) => maven_scope.propagated(),
			None => return Err(crate::Error::UnknownScope {
				coordinate: dependency.to_string(),
				scope: dependency.scope.clone().unwrap_or_default(),
			}),
		};
		let child_scope = match child_scope {
			Some(s) if scope.propagates(s) => s,
			_ => continue,
		};

		let coordinate = dependency.coordinate().ok_or_else(|| crate::Error::MissingVersion {
			parent: descriptor.coordinate.to_string(),
			dependency: dependency.to_string(),
		})?;

		children.push((coordinate, child_scope));
	}

	Ok(children)
}

#[cfg(test)]
mod test {
	use super::*;

	fn descriptor() -> ArtifactDescriptor {
		ArtifactDescriptor::new(Coordinate::parse("lib:core:1.0.0").unwrap(), "jar")
			.with_dependency(DeclaredDependency::new("lib", "compile", Some("1.0"), Some("compile")))
			.with_dependency(DeclaredDependency::new("lib", "runtime", Some("1.0"), Some("runtime")))
			.with_dependency(DeclaredDependency::new("lib", "default", Some("[1.0]"), None))
			.with_dependency(DeclaredDependency::new("lib", "tests", Some("1.0"), Some("test")))
			.with_dependency(DeclaredDependency::new("lib", "extra", Some("1.0"), Some("compile")).optional())
	}

	fn names(children: &[(Coordinate, Scope)]) -> Vec<&str> {
		children.iter().map(|(c, _)| c.artifact.as_str()).collect()
	}

	#[test]
	fn implementation_follows_compile_and_runtime() {
		let children = retained_children(&descriptor(), Scope::Implementation).unwrap();
		assert_eq!(names(&children), vec!["compile", "runtime", "default"]);
		assert_eq!(children[1].1, Scope::Implementation);
		assert_eq!(children[2].0.version, "1.0");
	}

	#[test]
	fn compile_only_follows_compile_only() {
		let children = retained_children(&descriptor(), Scope::CompileOnly).unwrap();
		assert_eq!(names(&children), vec!["compile", "default"]);
	}

	#[test]
	fn missing_version_is_fatal() {
		let d = ArtifactDescriptor::new(Coordinate::parse("lib:core:1.0.0").unwrap(), "jar")
			.with_dependency(DeclaredDependency::new("lib", "util", None, Some("compile")));
		assert!(matches!(retained_children(&d, Scope::Implementation), Err(crate::Error::MissingVersion { .. })));
	}

	#[test]
	fn missing_version_on_dropped_child_is_fine() {
		let d = ArtifactDescriptor::new(Coordinate::parse("lib:core:1.0.0").unwrap(), "jar")
			.with_dependency(DeclaredDependency::new("junit", "junit", None, Some("test")));
		assert!(retained_children(&d, Scope::Implementation).unwrap().is_empty());
	}

	#[test]
	fn unknown_scope_is_fatal() {
		let d = ArtifactDescriptor::new(Coordinate::parse("lib:core:1.0.0").unwrap(), "jar")
			.with_dependency(DeclaredDependency::new("lib", "util", Some("1.0"), Some("sideways")));
		assert!(matches!(retained_children(&d, Scope::Implementation), Err(crate::Error::UnknownScope { .. })));
	}
}
