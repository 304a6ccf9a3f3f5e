use super::Resolver;
use super::PlatformProvided;
use crate::artifact::DependencyDeclaration;
use crate::repository::ArtifactRepository;

pub struct ResolverBuilder<'r> {
	repository: &'r dyn ArtifactRepository,
	platform: Option<PlatformProvided>,
	concurrency: Option<usize>,

	declarations: Vec<DependencyDeclaration>,
}

impl<'r> ResolverBuilder<'r> {
	pub fn new(repository: &'r dyn ArtifactRepository) -> Self {
		Self {
			repository,
			platform: None,
			concurrency: None,
			declarations: Default::default(),
		}
	}

	pub fn add_declarations(mut self, declarations: impl IntoIterator<Item = DependencyDeclaration>) -> Self {
		for declaration in declarations {
			self.declarations.push(declaration);
		}
		self
	}

	/// Replaces the default [`PlatformProvided::host_runtime()`] table.
	pub fn platform_provided(mut self, platform: PlatformProvided) -> Self {
		self.platform = Some(platform);
		self
	}

	pub fn concurrency(mut self, concurrency: usize) -> Self {
		self.concurrency = Some(concurrency);
		self
	}

	/// Takes the concurrency bound from the config.
	pub fn config(self, config: &crate::Config) -> Self {
		self.concurrency(config.max_concurrent_downloads())
	}

	pub fn build(self) -> Resolver<'r> {
		let platform = self.platform.unwrap_or_else(PlatformProvided::host_runtime);
		let concurrency = self.concurrency
			.unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4));

		Resolver::new(self.repository, self.declarations, platform, concurrency)
	}
}
