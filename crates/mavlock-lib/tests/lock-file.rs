use mavlock::artifact::*;
use mavlock::repository::FetchError;
use mavlock::resolver::*;
use mavlock::{Config, LockFile};
use mavlock_test_utils::{dep, MockRepository};

fn init_logging() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn c(s: &str) -> Coordinate {
	Coordinate::parse(s).expect("bad coordinate")
}

fn declare(coordinate: &str) -> DependencyDeclaration {
	DependencyDeclaration::new(coordinate, Scope::Implementation).expect("bad declaration")
}

fn resolved(lock: &LockFile) -> Vec<String> {
	lock.resolved.iter().map(|e| e.coordinate.to_string()).collect()
}

/// app:a pulls util 1.0, app:b pulls util 2.0
fn diamond() -> MockRepository {
	MockRepository::new()
		.with_artifact("app:a:1", vec![dep("lib:util:1.0", "compile")])
		.with_artifact("app:b:1", vec![dep("lib:util:2.0", "compile")])
		.with_artifact("lib:util:1.0", vec![])
		.with_artifact("lib:util:2.0", vec![])
}

#[tokio::test]
async fn newest_version_wins() {
	init_logging();
	let repo = diamond();
	let resolver = ResolverBuilder::new(&repo)
		.add_declarations(vec![declare("app:a:1"), declare("app:b:1")])
		.build();

	let lock = resolver.lock().await.unwrap();
	assert_eq!(resolved(&lock), vec!["app:a:1", "app:b:1", "lib:util:2.0"]);
	assert!(!repo.downloaded().contains(&c("lib:util:1.0")));
}

#[tokio::test]
async fn direct_declaration_pins_older_version() {
	init_logging();
	let repo = diamond();
	let resolver = ResolverBuilder::new(&repo)
		.add_declarations(vec![declare("app:b:1"), declare("lib:util:1.0")])
		.build();

	let lock = resolver.lock().await.unwrap();
	assert_eq!(resolved(&lock), vec!["app:b:1", "lib:util:1.0"]);

	let util = lock.get(&c("lib:util:1.0")).unwrap();
	assert!(util.direct);
}

#[tokio::test]
async fn qualifiers_order_below_release() {
	init_logging();
	let repo = MockRepository::new()
		.with_artifact("app:a:1", vec![dep("lib:util:1.1.0-beta", "compile")])
		.with_artifact("app:b:1", vec![dep("lib:util:1.0.0", "compile"), dep("lib:util:1.2.0", "compile")])
		.with_artifact("lib:util:1.0.0", vec![])
		.with_artifact("lib:util:1.1.0-beta", vec![])
		.with_artifact("lib:util:1.2.0", vec![]);

	let resolver = ResolverBuilder::new(&repo)
		.add_declarations(vec![declare("app:a:1"), declare("app:b:1")])
		.build();

	let lock = resolver.lock().await.unwrap();
	assert!(lock.get(&c("lib:util:1.2.0")).is_some());
	assert_eq!(lock.resolved.len(), 3);
}

#[tokio::test]
async fn lock_is_deterministic() {
	init_logging();
	let repo = diamond()
		.with_artifact("app:c:1", vec![dep("app:a:1", "runtime"), dep("lib:util:1.0", "runtime")]);
	let resolver = ResolverBuilder::new(&repo)
		.add_declarations(vec![declare("app:c:1"), declare("app:b:1")])
		.concurrency(4)
		.build();

	let first = resolver.lock().await.unwrap();
	let second = resolver.lock().await.unwrap();
	assert_eq!(first, second);
	assert_eq!(serde_json::to_string(&first).unwrap(), serde_json::to_string(&second).unwrap());
}

#[tokio::test]
async fn entries_describe_the_artifact() {
	init_logging();
	let repo = MockRepository::new()
		.with_packaged_artifact("lib:ui:1.0", "aar", vec![
			dep("lib:util:1.0", "compile"),
			dep("lib:extra:1.0", "compile").optional(),
			dep("junit:junit:4.13", "test"),
		])
		.with_artifact("lib:util:1.0", vec![]);

	let resolver = ResolverBuilder::new(&repo)
		.add_declarations(vec![declare("lib:ui:1.0")])
		.build();

	let lock = resolver.lock().await.unwrap();

	let ui = lock.get(&c("lib:ui:1.0")).unwrap();
	assert_eq!(ui.packaging, "aar");
	assert_eq!(ui.scope, Scope::Implementation);
	assert!(ui.direct);
	assert!(ui.path.is_file());
	assert!(ui.path.starts_with(repo.root()));
	/* Everything the descriptor lists, including what the walk dropped */
	assert_eq!(ui.dependencies, vec!["lib:util:1.0", "lib:extra:1.0", "junit:junit:4.13"]);

	let util = lock.get(&c("lib:util:1.0")).unwrap();
	assert!(!util.direct);
	assert_eq!(util.scope, Scope::CompileOnly);
	assert!(util.dependencies.is_empty());
}

#[tokio::test]
async fn cached_payloads_are_not_downloaded() {
	init_logging();
	let repo = MockRepository::new()
		.with_artifact("lib:core:1.0", vec![dep("lib:util:1.0", "compile")])
		.with_artifact("lib:util:1.0", vec![])
		.with_cached_payload("lib:util:1.0");

	let resolver = ResolverBuilder::new(&repo)
		.add_declarations(vec![declare("lib:core:1.0")])
		.build();

	let lock = resolver.lock().await.unwrap();
	assert_eq!(lock.resolved.len(), 2);
	assert_eq!(repo.downloaded(), vec![c("lib:core:1.0")]);
}

#[tokio::test]
async fn missing_sources_are_not_fatal() {
	init_logging();
	let repo = MockRepository::new()
		.with_artifact("lib:core:1.0", vec![])
		.without_sources("lib:core:1.0");

	let resolver = ResolverBuilder::new(&repo)
		.add_declarations(vec![declare("lib:core:1.0")])
		.build();

	let lock = resolver.lock().await.unwrap();
	assert!(lock.get(&c("lib:core:1.0")).is_some());
}

#[tokio::test]
async fn failed_download_aborts_without_lock_file() {
	init_logging();
	let project = tempfile::tempdir().unwrap();
	let config = Config::for_project(project.path());

	let repo = MockRepository::new()
		.with_artifact("lib:core:1.0", vec![dep("lib:util:1.0", "compile")])
		.with_artifact("lib:util:1.0", vec![])
		.with_failing_download("lib:util:1.0", FetchError::InvalidHash);

	let resolver = ResolverBuilder::new(&repo)
		.add_declarations(vec![declare("lib:core:1.0")])
		.config(&config)
		.build();

	let result = resolver.lock().await.and_then(|lock| lock.save_to_disk(&config));

	match result {
		Err(mavlock::Error::Fetch { coordinate, source }) => {
			assert_eq!(coordinate, "lib:util:1.0");
			assert_eq!(source, FetchError::InvalidHash);
		},
		other => panic!("expected a fetch error, got {:?}", other),
	}
	assert!(!config.lock_file_path().exists());
}

#[tokio::test]
async fn missing_descriptor_aborts_before_downloading() {
	init_logging();
	let project = tempfile::tempdir().unwrap();
	let config = Config::for_project(project.path());

	let repo = MockRepository::new()
		.with_artifact("lib:core:1.0", vec![dep("lib:gone:1.0", "compile")]);

	let resolver = ResolverBuilder::new(&repo)
		.add_declarations(vec![declare("lib:core:1.0")])
		.build();

	let result = resolver.lock().await.and_then(|lock| lock.save_to_disk(&config));

	let error = result.unwrap_err();
	assert_eq!(error.diagnostic().trim(), "ERROR: No artifact found for: lib:gone:1.0");
	assert!(repo.downloaded().is_empty());
	assert!(!config.lock_file_path().exists());
}

#[tokio::test]
async fn transport_failure_is_reported() {
	init_logging();
	let repo = MockRepository::new()
		.with_failing_descriptor("lib:core:1.0", FetchError::Transport {
			repository: "https://repo.example.org/maven2".to_string(),
			response_code: Some(503),
			message: "Service Unavailable".to_string(),
		});

	let resolver = ResolverBuilder::new(&repo)
		.add_declarations(vec![declare("lib:core:1.0")])
		.build();

	let diagnostic = resolver.lock().await.unwrap_err().diagnostic();
	assert!(diagnostic.starts_with("ERROR: Could not fetch: lib:core:1.0"));
	assert!(diagnostic.contains("503"));
}

#[tokio::test]
async fn saved_lock_round_trips() {
	init_logging();
	let project = tempfile::tempdir().unwrap();
	let config = Config::for_project(project.path());

	let repo = diamond();
	let resolver = ResolverBuilder::new(&repo)
		.add_declarations(vec![declare("app:a:1"), declare("app:b:1")])
		.config(&config)
		.build();

	let lock = resolver.lock().await.unwrap();
	lock.save_to_disk(&config).unwrap();
	assert_eq!(LockFile::load_from_disk(&config).unwrap(), lock);
}
