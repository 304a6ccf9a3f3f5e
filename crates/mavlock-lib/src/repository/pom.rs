//! Reads the parts of a POM the resolver needs.
//!
//! Only the project's own `dependencies` section is read. `dependencyManagement`,
//! profiles and plugins are ignored, and parent POMs are not fetched; a parent only
//! contributes its `groupId` and `version` for interpolation.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::artifact::{ArtifactDescriptor, Coordinate, DeclaredDependency};

#[derive(Default)]
struct PartialDependency {
	group: Option<String>,
	artifact: Option<String>,
	version: Option<String>,
	scope: Option<String>,
	optional: Option<String>,
}

/// Parses `xml` as the descriptor of `coordinate`.
pub fn parse_pom(coordinate: &Coordinate, xml: &str) -> crate::Result<ArtifactDescriptor> {
	let mut reader = Reader::from_str(xml);
	reader.trim_text(true);

	let mut path = Vec::<String>::new();
	let mut properties = HashMap::<String, String>::new();
	let mut packaging: Option<String> = None;
	let mut dependencies = Vec::<PartialDependency>::new();
	let mut current: Option<PartialDependency> = None;

	loop {
		let event = reader.read_event()
			.map_err(|e| crate::Error::Parse(format!("POM for {} at byte {}: {}", coordinate, reader.buffer_position(), e)))?;

		match event {
			Event::Start(e) => {
				path.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
				if is_path(&path, &["project", "dependencies", "dependency"]) {
					current = Some(PartialDependency::default());
				}
			},
			Event::End(_) => {
				if is_path(&path, &["project", "dependencies", "dependency"]) {
					if let Some(dependency) = current.take() {
						dependencies.push(dependency);
					}
				}
				path.pop();
			},
			Event::Text(t) => {
				let text = t.unescape()
					.map_err(|e| crate::Error::Parse(format!("POM for {}: {}", coordinate, e)))?
					.into_owned();
				let segments: Vec<&str> = path.iter().map(String::as_str).collect();
				match segments.as_slice() {
					["project", "groupId"] => { properties.insert("project.groupId".to_string(), text); },
					["project", "artifactId"] => { properties.insert("project.artifactId".to_string(), text); },
					["project", "version"] => { properties.insert("project.version".to_string(), text); },
					["project", "packaging"] => packaging = Some(text),
					["project", "parent", "groupId"] => { properties.insert("project.parent.groupId".to_string(), text); },
					["project", "parent", "version"] => { properties.insert("project.parent.version".to_string(), text); },
					["project", "properties", name] => { properties.insert(name.to_string(), text); },
					["project", "dependencies", "dependency", field] => {
						if let Some(dependency) = current.as_mut() {
							match *field {
								"groupId" => dependency.group = Some(text),
								"artifactId" => dependency.artifact = Some(text),
								"version" => dependency.version = Some(text),
								"scope" => dependency.scope = Some(text),
								"optional" => dependency.optional = Some(text),
								_ => {},
							}
						}
					},
					_ => {},
				}
			},
			Event::Eof => break,
			_ => {},
		}
	}

	/* Inherited values, a child POM may leave out its own groupId and version */
	if !properties.contains_key("project.groupId") {
		if let Some(group) = properties.get("project.parent.groupId").cloned() {
			properties.insert("project.groupId".to_string(), group);
		}
	}
	if !properties.contains_key("project.version") {
		if let Some(version) = properties.get("project.parent.version").cloned() {
			properties.insert("project.version".to_string(), version);
		}
	}
	for (alias, key) in [("version", "project.version"), ("pom.version", "project.version"), ("groupId", "project.groupId"), ("pom.groupId", "project.groupId")] {
		if let Some(value) = properties.get(key).cloned() {
			properties.entry(alias.to_string()).or_insert(value);
		}
	}

	let mut descriptor = ArtifactDescriptor::new(
		coordinate.clone(),
		packaging.map(|p| interpolate(&p, &properties)).unwrap_or_else(|| "jar".to_string()),
	);

	for d in dependencies {
		let (group, artifact) = match (d.group, d.artifact) {
			(Some(g), Some(a)) => (interpolate(&g, &properties), interpolate(&a, &properties)),
			_ => return Err(crate::Error::Parse(format!("POM for {} has a dependency without groupId or artifactId", coordinate))),
		};
		descriptor.dependencies.push(DeclaredDependency {
			group,
			artifact,
			version: d.version.map(|v| interpolate(&v, &properties)),
			scope: d.scope.map(|s| interpolate(&s, &properties)),
			optional: d.optional.map(|o| interpolate(&o, &properties).trim() == "true").unwrap_or(false),
		});
	}

	Ok(descriptor)
}

fn is_path(path: &[String], expected: &[&str]) -> bool {
	path.len() == expected.len() && path.iter().zip(expected).all(|(a, b)| a == b)
}

/// Replaces `${name}` references. Unknown references are left as written.
fn interpolate(value: &str, properties: &HashMap<String, String>) -> String {
	let mut out = String::with_capacity(value.len());
	let mut rest = value;

	/* Bounded so a property referring to itself can't loop forever */
	for _ in 0..64 {
		let Some(start) = rest.find("${") else { break };
		let Some(len) = rest[start..].find('}') else { break };
		let name = &rest[start + 2..start + len];
		out.push_str(&rest[..start]);
		match properties.get(name) {
			Some(v) => out.push_str(&interpolate_shallow(v, properties)),
			None => out.push_str(&rest[start..start + len + 1]),
		}
		rest = &rest[start + len + 1..];
	}
	out.push_str(rest);
	out
}

/// One more level of substitution for property values that reference other properties.
fn interpolate_shallow(value: &str, properties: &HashMap<String, String>) -> String {
	let mut out = value.to_string();
	for (name, v) in properties {
		let reference = format!("${{{}}}", name);
		if out.contains(&reference) && !v.contains(&reference) {
			out = out.replace(&reference, v);
		}
	}
	out
}
