//! Integration tests for the autoload pipeline
//!
//! Each test lays out a routes directory in a temp dir, registers the
//! matching modules and runs a full pass against an in-memory `RouteTable`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use autoroutes::{
    autoload, autoload_into, AutorouteConfig, AutorouteError, Detail, HostRouter, ModuleLoader,
    ModuleRegistry, RouteConflict, RouteMeta, RouteModule, RouteTable, Verb,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tokio::sync::Barrier;

type Table = RouteTable<&'static str>;

// ============================================================================
// Fixtures
// ============================================================================

struct Fixture {
    dir: TempDir,
    registry: ModuleRegistry<Table>,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let routes = dir.path().join("routes");
        fs::create_dir_all(&routes).unwrap();
        Self {
            registry: ModuleRegistry::new(&routes),
            dir,
        }
    }

    fn routes_dir(&self) -> PathBuf {
        self.dir.path().join("routes")
    }

    /// Creates the file and registers its module
    fn route(mut self, relative: &str, module: RouteModule<Table>) -> Self {
        self.file(relative);
        self.registry.insert(relative, module);
        self
    }

    /// Creates the file only
    fn file(&self, relative: &str) {
        let path = self.routes_dir().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    fn config(&self) -> AutorouteConfig {
        AutorouteConfig::default().with_base_dir(self.dir.path())
    }
}

fn paths(table: &Table) -> Vec<(Verb, &str)> {
    table
        .routes()
        .iter()
        .map(|route| (route.verb, route.path.as_str()))
        .collect()
}

fn tags(table: &Table, verb: Verb, path: &str) -> Vec<String> {
    table.get(verb, path).unwrap().meta.tags().to_vec()
}

// ============================================================================
// Example Scenarios
// ============================================================================

#[tokio::test]
async fn test_root_and_dynamic_per_verb() {
    let fixture = Fixture::new()
        .route("index.rs", RouteModule::per_verb([("GET", "home")]))
        .route(
            "users/[id].rs",
            RouteModule::per_verb([("get", "show"), ("delete", "destroy")]),
        );

    let table = autoload(Table::new(), &fixture.registry, &fixture.config())
        .await
        .unwrap();

    assert_eq!(
        paths(&table),
        vec![
            (Verb::Get, "/"),
            (Verb::Get, "/users/:id"),
            (Verb::Delete, "/users/:id"),
        ]
    );
    assert_eq!(tags(&table, Verb::Get, "/"), vec!["/"]);
    assert_eq!(tags(&table, Verb::Delete, "/users/:id"), vec!["/users/:id"]);

    let found = table.find(Verb::Delete, "/users/42").unwrap();
    assert_eq!(*found.handler, "destroy");
    assert_eq!(found.params.get("id"), Some(&"42".to_string()));
}

#[tokio::test]
async fn test_optional_catch_all_matches_any_depth() {
    let fixture = Fixture::new().route(
        "users/[[...rest]].rs",
        RouteModule::per_verb([("get", "users")]),
    );

    let table = autoload(Table::new(), &fixture.registry, &fixture.config())
        .await
        .unwrap();

    assert_eq!(paths(&table), vec![(Verb::Get, "/users/*rest?")]);
    assert_eq!(tags(&table, Verb::Get, "/users/*rest?"), vec!["/users/*rest"]);
    for (path, rest) in [("/users", ""), ("/users/1", "1"), ("/users/1/2", "1/2")] {
        let found = table.find(Verb::Get, path).unwrap();
        assert_eq!(found.params.get("rest"), Some(&rest.to_string()), "{path}");
    }
}

#[tokio::test]
async fn test_routes_dir_is_a_file() {
    let fixture = Fixture::new();
    fs::write(fixture.dir.path().join("routes.txt"), "").unwrap();
    let config = fixture.config().with_routes_dir("routes.txt");

    let err = autoload(Table::new(), &fixture.registry, &config)
        .await
        .unwrap_err();

    assert!(matches!(err, AutorouteError::NotADirectory(path) if path.ends_with("routes.txt")));
}

#[tokio::test]
async fn test_failed_load_mounts_nothing() {
    let fixture = Fixture::new()
        .route("a.rs", RouteModule::per_verb([("get", "a")]))
        .route("c.rs", RouteModule::per_verb([("get", "c")]));
    fixture.file("b.rs");

    let mut table = Table::new();
    let err = autoload_into(&mut table, &fixture.registry, &fixture.config())
        .await
        .unwrap_err();

    match err {
        AutorouteError::ModuleLoad { key, file, .. } => {
            assert_eq!(key, "/b");
            assert!(file.ends_with("b.rs"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(table.is_empty());
}

#[tokio::test]
async fn test_generate_tags_disabled() {
    let fixture = Fixture::new().route("health.rs", RouteModule::per_verb([("get", "ok")]));
    let config = fixture.config().with_generate_tags(false);

    let table = autoload(Table::new(), &fixture.registry, &config)
        .await
        .unwrap();

    assert_eq!(table.get(Verb::Get, "/health").unwrap().meta.detail, None);
}

// ============================================================================
// Pipeline Properties
// ============================================================================

fn blog() -> Fixture {
    Fixture::new()
        .route("index.rs", RouteModule::per_verb([("get", "home")]))
        .route("about.rs", RouteModule::per_verb([("get", "about")]))
        .route("posts/index.rs", RouteModule::per_verb([("get", "list"), ("post", "create")]))
        .route("posts/[id].rs", RouteModule::per_verb([("get", "show"), ("patch", "edit")]))
        .route("docs/[...slug].rs", RouteModule::per_verb([("get", "docs")]))
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let fixture = blog();

    let first = autoload(Table::new(), &fixture.registry, &fixture.config())
        .await
        .unwrap();
    let second = autoload(Table::new(), &fixture.registry, &fixture.config())
        .await
        .unwrap();

    assert_eq!(paths(&first), paths(&second));
    assert_eq!(first.signature(), second.signature());
    assert_eq!(first.len(), 7);
}

#[tokio::test]
async fn test_catch_all_needs_at_least_one_segment() {
    let fixture = blog();
    let table = autoload(Table::new(), &fixture.registry, &fixture.config())
        .await
        .unwrap();

    assert!(table.find(Verb::Get, "/docs").is_none());
    let found = table.find(Verb::Get, "/docs/guide/intro").unwrap();
    assert_eq!(*found.handler, "docs");
    assert_eq!(found.params.get("slug"), Some(&"guide/intro".to_string()));
}

#[tokio::test]
async fn test_index_order_is_file_name_order() {
    let fixture = blog();
    let table = autoload(Table::new(), &fixture.registry, &fixture.config())
        .await
        .unwrap();

    assert_eq!(
        paths(&table),
        vec![
            (Verb::Get, "/about"),
            (Verb::Get, "/docs/*slug"),
            (Verb::Get, "/"),
            (Verb::Get, "/posts/:id"),
            (Verb::Patch, "/posts/:id"),
            (Verb::Get, "/posts"),
            (Verb::Post, "/posts"),
        ]
    );
}

#[tokio::test]
async fn test_tags_never_replace_authored_detail() {
    let authored = RouteMeta::new().with_detail(Detail {
        tags: vec!["reports".to_string()],
        summary: Some("Monthly report".to_string()),
        ..Detail::default()
    });
    let fixture = Fixture::new().route(
        "reports.rs",
        RouteModule::<Table>::new()
            .handler_with_meta("get", "report", authored.clone())
            .handler("post", "submit"),
    );

    let table = autoload(Table::new(), &fixture.registry, &fixture.config())
        .await
        .unwrap();

    assert_eq!(table.get(Verb::Get, "/reports").unwrap().meta, authored);
    assert_eq!(tags(&table, Verb::Post, "/reports"), vec!["/reports"]);
}

#[tokio::test]
async fn test_prefix_is_prepended() {
    let fixture = Fixture::new()
        .route("index.rs", RouteModule::per_verb([("get", "root")]))
        .route("users/[id].rs", RouteModule::per_verb([("get", "user")]));
    let config = fixture.config().with_prefix("/api/");

    let table = autoload(Table::new(), &fixture.registry, &config)
        .await
        .unwrap();

    assert_eq!(
        paths(&table),
        vec![(Verb::Get, "/api"), (Verb::Get, "/api/users/:id")]
    );
    // Tags name the file's route, independent of the prefix
    assert_eq!(tags(&table, Verb::Get, "/api/users/:id"), vec!["/users/:id"]);
}

#[tokio::test]
async fn test_composed_module_and_ignored_exports() {
    let fixture = Fixture::new().route(
        "admin.rs",
        RouteModule::<Table>::composed(|scope| {
            scope
                .get("/", "dashboard")?
                .group("/users", |scope| scope.get("/", "users")?.delete("/:id", "ban"))
        })
        .handler("get", "shadowed"),
    );

    let table = autoload(Table::new(), &fixture.registry, &fixture.config())
        .await
        .unwrap();

    assert_eq!(
        paths(&table),
        vec![
            (Verb::Get, "/admin"),
            (Verb::Get, "/admin/users"),
            (Verb::Delete, "/admin/users/:id"),
        ]
    );
    assert_eq!(table.handler(Verb::Get, "/admin"), Some(&"dashboard"));
    assert_eq!(tags(&table, Verb::Delete, "/admin/users/:id"), vec!["/admin"]);
}

#[tokio::test]
async fn test_extensions_filter_and_hidden_files() {
    let fixture = Fixture::new()
        .route("posts.rs", RouteModule::per_verb([("get", "posts")]));
    fixture.file("README.md");
    fixture.file(".draft.rs");
    let config = fixture.config().with_extensions(["rs"]);

    let table = autoload(Table::new(), &fixture.registry, &config)
        .await
        .unwrap();

    assert_eq!(paths(&table), vec![(Verb::Get, "/posts")]);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_missing_routes_dir() {
    let fixture = Fixture::new();
    let config = fixture.config().with_routes_dir("missing");

    let err = autoload(Table::new(), &fixture.registry, &config)
        .await
        .unwrap_err();

    assert!(matches!(err, AutorouteError::DirectoryNotFound(path) if path.ends_with("missing")));
}

#[tokio::test]
async fn test_invalid_segment_aborts_pass() {
    let fixture = Fixture::new()
        .route("about.rs", RouteModule::per_verb([("get", "about")]))
        .route("[...slug]/edit.rs", RouteModule::per_verb([("get", "edit")]));

    let mut table = Table::new();
    let err = autoload_into(&mut table, &fixture.registry, &fixture.config())
        .await
        .unwrap_err();

    match err {
        AutorouteError::InvalidSegment(err) => {
            assert_eq!(err.key, "/[...slug]/edit");
            assert_eq!(err.segment, "[...slug]");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(table.is_empty());
}

#[tokio::test]
async fn test_colliding_patterns_are_left_to_the_host() {
    let fixture = Fixture::new()
        .route("posts.rs", RouteModule::per_verb([("get", "a")]))
        .route("posts/index.rs", RouteModule::per_verb([("get", "b")]));

    let err = autoload(Table::new(), &fixture.registry, &fixture.config())
        .await
        .unwrap_err();

    assert_eq!(
        err.registration::<RouteConflict>(),
        Some(&RouteConflict::Duplicate {
            verb: Verb::Get,
            path: "/posts".to_string()
        })
    );
}

// ============================================================================
// Concurrent Loading
// ============================================================================

/// Holds every load at a barrier sized to the batch, so the pass only
/// finishes if all loads are in flight at once
struct GatedLoader {
    registry: ModuleRegistry<Table>,
    barrier: Arc<Barrier>,
    slow: &'static str,
    fail_slow: bool,
}

#[async_trait]
impl ModuleLoader<Table> for GatedLoader {
    async fn load(&self, file: &Path) -> anyhow::Result<RouteModule<Table>> {
        self.barrier.wait().await;
        if file.ends_with(self.slow) {
            tokio::time::sleep(Duration::from_millis(50)).await;
            if self.fail_slow {
                anyhow::bail!("slow module failed");
            }
        }
        self.registry.load(file).await
    }
}

fn gated(fail_slow: bool) -> (Fixture, GatedLoader) {
    let fixture = Fixture::new()
        .route("a.rs", RouteModule::per_verb([("get", "a")]))
        .route("b.rs", RouteModule::per_verb([("get", "b")]))
        .route("c.rs", RouteModule::per_verb([("get", "c")]));
    let loader = GatedLoader {
        registry: ModuleRegistry::new(fixture.routes_dir())
            .register("a.rs", RouteModule::per_verb([("get", "a")]))
            .register("b.rs", RouteModule::per_verb([("get", "b")]))
            .register("c.rs", RouteModule::per_verb([("get", "c")])),
        barrier: Arc::new(Barrier::new(3)),
        slow: "a.rs",
        fail_slow,
    };
    (fixture, loader)
}

#[tokio::test]
async fn test_loads_run_concurrently_and_keep_order() {
    let (fixture, loader) = gated(false);

    let table = tokio::time::timeout(
        Duration::from_secs(5),
        autoload(Table::new(), &loader, &fixture.config()),
    )
    .await
    .expect("loads were not started together")
    .unwrap();

    // The slow first file still mounts first
    assert_eq!(
        paths(&table),
        vec![(Verb::Get, "/a"), (Verb::Get, "/b"), (Verb::Get, "/c")]
    );
}

#[tokio::test]
async fn test_delayed_failure_discards_batch() {
    let (fixture, loader) = gated(true);

    let mut table = Table::new();
    let err = tokio::time::timeout(
        Duration::from_secs(5),
        autoload_into(&mut table, &loader, &fixture.config()),
    )
    .await
    .expect("loads were not started together")
    .unwrap_err();

    assert!(matches!(err, AutorouteError::ModuleLoad { ref key, .. } if key == "/a"));
    assert!(table.is_empty());
}
