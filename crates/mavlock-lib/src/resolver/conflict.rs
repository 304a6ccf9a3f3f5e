//! Picking one version per library.
//!
//! This isn't a constraint solver, nothing checks that the chosen version suits every
//! artifact that asked for another one. A version the project declares directly always
//! wins, otherwise the newest version found does.

use std::collections::HashMap;

use super::*;

/// Reduces the walk's nodes to exactly one node per library.
///
/// Identical coordinates collapse to their first occurrence, which is promoted to
/// [`Scope::Implementation`] if any occurrence was reached with it. Libraries keep
/// the order they were first seen in.
pub fn resolve_conflicts(nodes: Vec<ResolvedNode>, declarations: &[DependencyDeclaration]) -> Vec<ResolvedNode> {
	let mut unique = Vec::<ResolvedNode>::new();
	let mut positions = HashMap::<Coordinate, usize>::new();
	for node in nodes {
		match positions.get(node.coordinate()) {
			Some(&i) => {
				if node.scope == Scope::Implementation {
					unique[i].scope = Scope::Implementation;
				}
			},
			None => {
				positions.insert(node.coordinate().clone(), unique.len());
				unique.push(node);
			},
		}
	}

	let mut order = Vec::<ArtifactIdentity>::new();
	let mut groups = HashMap::<ArtifactIdentity, Vec<ResolvedNode>>::new();
	for node in unique {
		let identity = node.identity();
		if !groups.contains_key(&identity) {
			order.push(identity.clone());
		}
		groups.entry(identity).or_default().push(node);
	}

	order.into_iter()
		.filter_map(|identity| groups.remove(&identity))
		.filter_map(|group| select(group, declarations))
		.collect()
}

fn select(mut group: Vec<ResolvedNode>, declarations: &[DependencyDeclaration]) -> Option<ResolvedNode> {
	if group.len() > 1 {
		let versions: Vec<&str> = group.iter().map(|n| n.coordinate().version.as_str()).collect();
		log::debug!("Conflicting versions of {}: {:?}", group[0].identity(), versions);
	}

	if let Some(pinned) = group.iter().position(|n| is_directly_declared(declarations, n.coordinate())) {
		return Some(group.swap_remove(pinned));
	}

	group.into_iter().reduce(|newest, candidate| {
		if candidate.coordinate().parsed_version() > newest.coordinate().parsed_version() { candidate } else { newest }
	})
}

#[cfg(test)]
mod test {
	use std::collections::HashSet;

	use super::*;

	fn node(coordinate: &str) -> ResolvedNode {
		ResolvedNode {
			artifact: ArtifactDescriptor::new(Coordinate::parse(coordinate).unwrap(), "jar"),
			scope: Scope::Implementation,
			depth: 1,
		}
	}

	fn coordinates(nodes: &[ResolvedNode]) -> Vec<String> {
		nodes.iter().map(|n| n.coordinate().to_string()).collect()
	}

	#[test]
	fn newest_version_wins() {
		let nodes = vec![node("lib:util:1.0.0"), node("lib:util:1.2.0"), node("lib:util:1.1.0-beta")];
		assert_eq!(coordinates(&resolve_conflicts(nodes, &[])), vec!["lib:util:1.2.0"]);
	}

	#[test]
	fn direct_declaration_beats_newer() {
		let declarations = vec![DependencyDeclaration::new("lib:util:1.0.0", Scope::Implementation).unwrap()];
		let nodes = vec![node("lib:util:1.2.0"), node("lib:util:1.0.0")];
		assert_eq!(coordinates(&resolve_conflicts(nodes, &declarations)), vec!["lib:util:1.0.0"]);
	}

	#[test]
	fn duplicates_collapse() {
		let nodes = vec![node("lib:core:1.0.0"), node("lib:util:2.0.0"), node("lib:core:1.0.0")];
		assert_eq!(coordinates(&resolve_conflicts(nodes, &[])), vec!["lib:core:1.0.0", "lib:util:2.0.0"]);
	}

	#[test]
	fn implementation_scope_survives_dedup() {
		let mut compile_only = node("lib:core:1.0.0");
		compile_only.scope = Scope::CompileOnly;
		compile_only.depth = 2;
		let nodes = vec![compile_only, node("lib:util:1.0.0"), node("lib:core:1.0.0")];

		let resolved = resolve_conflicts(nodes, &[]);
		assert_eq!(coordinates(&resolved), vec!["lib:core:1.0.0", "lib:util:1.0.0"]);
		assert_eq!(resolved[0].scope, Scope::Implementation);
		assert_eq!(resolved[0].depth, 2);
	}

	#[test]
	fn compile_only_everywhere_stays_compile_only() {
		let mut a = node("lib:core:1.0.0");
		a.scope = Scope::CompileOnly;
		let b = a.clone();
		assert_eq!(resolve_conflicts(vec![a, b], &[])[0].scope, Scope::CompileOnly);
	}

	#[test]
	fn one_node_per_identity() {
		let nodes = vec![
			node("a:x:1"), node("a:x:2"), node("a:y:1"), node("b:x:3"), node("a:y:1.0.1"), node("a:x:1"),
		];
		let resolved = resolve_conflicts(nodes, &[]);
		let identities: HashSet<ArtifactIdentity> = resolved.iter().map(ResolvedNode::identity).collect();
		assert_eq!(identities.len(), resolved.len());
		assert_eq!(coordinates(&resolved), vec!["a:x:2", "a:y:1.0.1", "b:x:3"]);
	}

	#[test]
	fn empty_input_is_empty() {
		assert!(resolve_conflicts(vec![], &[]).is_empty());
	}
}
