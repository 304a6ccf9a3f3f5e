use serde::{Serialize, Deserialize};

/// How a dependency is used by whatever declared it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scope {
	/// Needed to compile and at run time. Pulls in both kinds of children.
	#[serde(rename = "implementation", alias = "runtime")]
	Implementation,
	/// Only needed to compile. Pulls in compile-only children.
	#[serde(rename = "compile-only", alias = "compileOnly", alias = "compile")]
	CompileOnly,
}

impl Scope {
	/// Whether a child declared with `child` scope is followed from a node reached with this scope.
	pub fn propagates(self, child: Scope) -> bool {
		match self {
			Scope::CompileOnly => child == Scope::CompileOnly,
			Scope::Implementation => matches!(child, Scope::Implementation | Scope::CompileOnly),
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Scope::Implementation => "implementation",
			Scope::CompileOnly => "compile-only",
		}
	}
}

impl std::fmt::Display for Scope {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::str::FromStr for Scope {
	type Err = crate::Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"implementation" | "runtime" => Ok(Scope::Implementation),
			"compile-only" | "compileOnly" | "compile" => Ok(Scope::CompileOnly),
			s => Err(crate::Error::Parse(format!("unknown scope \"{}\"", s))),
		}
	}
}

/// Scope names as they appear in a package descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MavenScope {
	Compile,
	Runtime,
	Provided,
	Test,
	System,
	Import,
}

impl MavenScope {
	/// Reads a descriptor scope. An absent scope is `compile`.
	///
	/// Returns `None` for names outside the known set.
	pub fn parse(scope: Option<&str>) -> Option<Self> {
		match scope.map(str::trim) {
			None | Some("") | Some("compile") => Some(MavenScope::Compile),
			Some("runtime") => Some(MavenScope::Runtime),
			Some("provided") => Some(MavenScope::Provided),
			Some("test") => Some(MavenScope::Test),
			Some("system") => Some(MavenScope::System),
			Some("import") => Some(MavenScope::Import),
			Some(_) => None,
		}
	}

	/// The scope a child is walked with, `None` when this scope is never walked.
	pub fn propagated(self) -> Option<Scope> {
		match self {
			MavenScope::Runtime => Some(Scope::Implementation),
			MavenScope::Compile => Some(Scope::CompileOnly),
			MavenScope::Provided
			| MavenScope::Test
			| MavenScope::System
			| MavenScope::Import => None,
		}
	}
}
