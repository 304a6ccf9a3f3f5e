//! Types describing artifacts, their versions and how they are depended on.

mod coordinate;
pub use coordinate::Coordinate;
pub use coordinate::ArtifactIdentity;
pub use coordinate::normalize_version;

mod artifact_version;
pub use artifact_version::ArtifactVersion;

mod scope;
pub use scope::Scope;
pub use scope::MavenScope;

mod descriptor;
pub use descriptor::ArtifactDescriptor;
pub use descriptor::DeclaredDependency;

mod declaration;
pub use declaration::DependencyDeclaration;
pub use declaration::Exclusions;
pub use declaration::is_directly_declared;
