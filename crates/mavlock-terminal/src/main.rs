use mavlock::manifest::ProjectManifest;
use mavlock::repository::RemoteRepository;
use mavlock::resolver::{ResolverBuilder, resolve_conflicts};

#[tokio::main]
async fn main() {
	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag( "h", "help",       "Show help");
		opts.optflag( "v", "verbose",    "Increased vebosity");
		opts.optopt(  "p", "project",    "Project directory, defaults to the current directory", "DIR");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m)  => { m }
			Err(e) => { println!("Unable to parse options: {}", e); return }
		};

		if parsed_options.opt_present("h") {
			eprintln!("{}", opts.usage("Usage: mavlock-terminal [options] <resolve|tree>"));
			return;
		}

		parsed_options
	};

	let level = if parsed_options.opt_present("v") { log::LevelFilter::Debug } else { log::LevelFilter::Info };
	env_logger::Builder::new()
		.filter_level(level)
		.parse_default_env()
		.init();

	let project_root = parsed_options.opt_str("p")
		.map(std::path::PathBuf::from)
		.unwrap_or_else(|| std::path::PathBuf::from("."));

	let result = match parsed_options.free.first().map(String::as_str) {
		Some("resolve") => resolve(&project_root).await,
		Some("tree") => tree(&project_root).await,
		Some(other) => Err(Error::UnknownCommand(other.to_string())),
		None => Err(Error::MissingArgument),
	};

	if let Err(e) = result {
		match e {
			Error::Mavlock(e) => log::error!("{}", e.diagnostic().trim_end()),
			e => log::error!("{}", e),
		}
		std::process::exit(1);
	}
}

fn load_project(project_root: &std::path::Path) -> Result<(mavlock::Config, ProjectManifest), Error> {
	let config = mavlock::Config::load_from_disk(project_root)?;
	let manifest = ProjectManifest::load_from_disk(&config)?;
	Ok((config, manifest))
}

/// Resolves the project and writes its lock file.
async fn resolve(project_root: &std::path::Path) -> Result<(), Error> {
	let (config, manifest) = load_project(project_root)?;
	let repository = RemoteRepository::new(&config)?;

	let resolver = ResolverBuilder::new(&repository)
		.add_declarations(manifest.declarations()?)
		.config(&config)
		.build();

	let lock = resolver.lock().await?;
	let path = lock.save_to_disk(&config)?;

	println!("Resolved {} artifacts, {} left to the platform.", lock.resolved.len(), lock.skipped.len());
	for skipped in &lock.skipped {
		println!("\tSKIPPED: {} (platform has {})", skipped.coordinate, skipped.available_version);
	}
	println!("Lock file written to {}", path.display());
	Ok(())
}

/// Prints the dependency tree without downloading anything.
async fn tree(project_root: &std::path::Path) -> Result<(), Error> {
	let (config, manifest) = load_project(project_root)?;
	let repository = RemoteRepository::new(&config)?;
	let declarations = manifest.declarations()?;

	let resolver = ResolverBuilder::new(&repository)
		.add_declarations(declarations.clone())
		.config(&config)
		.build();

	let resolution = resolver.resolve_all().await?;

	for node in &resolution.nodes {
		let indent = "\t".repeat(node.depth);
		let marker = if node.depth == 0 { "" } else { "└───" };
		println!("{}{}{} ({})", indent, marker, node.coordinate(), node.scope);
	}

	let selected = resolve_conflicts(resolution.nodes, &declarations);
	println!("\n{} artifacts after resolving conflicts, {} left to the platform.", selected.len(), resolution.skipped.len());
	Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("mavlock error: {0}")]
	Mavlock(#[from] mavlock::Error),
	#[error("Missing command, expected one of: resolve, tree")]
	MissingArgument,
	#[error("Unknown command: {0}")]
	UnknownCommand(String),
}
