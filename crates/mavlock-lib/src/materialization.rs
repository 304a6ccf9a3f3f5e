//! Downloads resolved artifacts and turns them into lock entries.

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::artifact::{is_directly_declared, DependencyDeclaration};
use crate::lockfile::LockEntry;
use crate::repository::ArtifactRepository;
use crate::resolver::ResolvedNode;

/// Makes sure `node`'s payload is on disk and describes it as a lock entry.
///
/// Payloads already present locally aren't fetched again. A failed sources download
/// is only logged.
pub async fn materialize(repository: &dyn ArtifactRepository, node: ResolvedNode, declarations: &[DependencyDeclaration]) -> crate::Result<LockEntry> {
	let artifact = &node.artifact;

	if repository.exists_locally(artifact) {
		log::debug!("{} already downloaded, skipping.", artifact.coordinate);
	} else {
		log::info!("Downloading {}", artifact.coordinate);
		repository.download(artifact).await.map_err(|e| crate::Error::fetch(&artifact.coordinate, e))?;

		if let Err(e) = repository.download_sources(artifact).await {
			log::warn!("Could not fetch sources for {}: {}", artifact.coordinate, e);
		}
	}

	Ok(LockEntry {
		direct: is_directly_declared(declarations, &artifact.coordinate),
		path: repository.local_path(artifact),
		dependencies: artifact.dependencies.iter().map(|d| d.to_string()).collect(),
		packaging: artifact.packaging.clone(),
		scope: node.scope,
		coordinate: node.artifact.coordinate,
	})
}

/// Materializes every node with at most `workers` downloads in flight.
///
/// Stops at the first failure, downloads still in flight are dropped. Entries come back
/// in completion order.
pub async fn materialize_all(repository: &dyn ArtifactRepository, nodes: Vec<ResolvedNode>, declarations: &[DependencyDeclaration], workers: usize) -> crate::Result<Vec<LockEntry>> {
	stream::iter(nodes)
		.map(|node| materialize(repository, node, declarations))
		.buffer_unordered(workers.max(1))
		.try_collect()
		.await
}
