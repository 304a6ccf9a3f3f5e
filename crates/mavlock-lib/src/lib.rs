pub mod error;
pub use error::Result;
pub use error::Error;

pub mod config;
pub use config::Config;

pub mod artifact;
pub use artifact::Coordinate;
pub use artifact::Scope;

pub mod repository;
pub use repository::ArtifactRepository;

pub mod resolver;
pub mod materialization;

pub mod lockfile;
pub use lockfile::LockFile;

pub mod manifest;
