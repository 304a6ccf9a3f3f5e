//! Turns the project's direct declarations into a lock file.
//!
//! # Usage
//! 1. Create a [`ResolverBuilder`] with the repository to fetch from.
//! 1. Add the project's [`DependencyDeclaration`]s and, optionally, a [`PlatformProvided`] table.
//! 1. [`ResolverBuilder::build()`] to get a [`Resolver`].
//! 1. [`Resolver::lock()`] to walk, reconcile and materialize everything into a [`LockFile`].
//!
//! The stages are also available on their own: [`Resolver::resolve_all()`] for the
//! transitive walk, [`resolve_conflicts()`] for version selection and
//! [`crate::materialization::materialize_all()`] for downloading.
//!
//! Any failure aborts the whole run, nothing partial is ever returned.

use crate::artifact::*;
use crate::lockfile::{LockFile, SkippedArtifact};
use crate::repository::ArtifactRepository;

mod platform;
pub use platform::PlatformProvided;

mod resolver_builder;
pub use resolver_builder::ResolverBuilder;

mod transitive;

mod conflict;
pub use conflict::resolve_conflicts;

/// One vertex found by the transitive walk.
///
/// The same artifact may be found several times through different paths, each is a separate node.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNode {
	pub artifact: ArtifactDescriptor,
	/// The scope the artifact was reached with.
	pub scope: Scope,
	/// Distance from the direct declaration the walk started at.
	pub depth: usize,
}

impl ResolvedNode {
	pub fn coordinate(&self) -> &Coordinate {
		&self.artifact.coordinate
	}

	pub fn identity(&self) -> ArtifactIdentity {
		self.artifact.coordinate.identity()
	}
}

/// Output of a walk: nodes in pre-order and everything left to the host runtime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
	pub nodes: Vec<ResolvedNode>,
	pub skipped: Vec<SkippedArtifact>,
}

impl Resolution {
	fn node(node: ResolvedNode) -> Self {
		Self { nodes: vec![node], skipped: vec![] }
	}

	fn skipped(skipped: SkippedArtifact) -> Self {
		Self { nodes: vec![], skipped: vec![skipped] }
	}

	fn append(&mut self, other: Resolution) {
		self.nodes.extend(other.nodes);
		self.skipped.extend(other.skipped);
	}
}

pub struct Resolver<'r> {
	repository: &'r dyn ArtifactRepository,
	declarations: Vec<DependencyDeclaration>,
	platform: PlatformProvided,
	/// Bound on concurrent downloads and on sibling subtrees polled at once.
	concurrency: usize,
	/// Shared by the whole walk, caps descriptor fetches in flight at `concurrency`.
	fetch_permits: tokio::sync::Semaphore,
}

impl<'r> Resolver<'r> {
	pub(super) fn new(repository: &'r dyn ArtifactRepository, declarations: Vec<DependencyDeclaration>, platform: PlatformProvided, concurrency: usize) -> Self {
		let concurrency = concurrency.max(1);
		Self {
			repository,
			declarations,
			platform,
			concurrency,
			fetch_permits: tokio::sync::Semaphore::new(concurrency),
		}
	}

	pub fn declarations(&self) -> &[DependencyDeclaration] {
		&self.declarations
	}

	/// Runs the whole pipeline and returns the lock file without writing it.
	pub async fn lock(&self) -> crate::Result<LockFile> {
		let resolution = self.resolve_all().await?;
		log::debug!("Walk found {} nodes, skipped {}", resolution.nodes.len(), resolution.skipped.len());

		let nodes = resolve_conflicts(resolution.nodes, &self.declarations);
		log::debug!("{} artifacts remain after resolving conflicts", nodes.len());

		let entries = crate::materialization::materialize_all(self.repository, nodes, &self.declarations, self.concurrency).await?;
		Ok(LockFile::assemble(resolution.skipped, entries))
	}
}
