//! The bundled routes directory and config must mount cleanly

use std::path::PathBuf;

use autoroutes::{autoload, AxumHost, Config, HostRouter, ManifestLoader, Verb};
use pretty_assertions::assert_eq;

fn crate_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

#[tokio::test]
async fn test_bundled_routes_mount() {
    let config = Config::load(crate_dir().join("autoroutes.toml")).unwrap();
    let routing = config.routing.with_base_dir(crate_dir());

    let host: AxumHost = autoload(AxumHost::new(), &ManifestLoader, &routing)
        .await
        .unwrap();

    let mut mounted: Vec<(Verb, String)> = host
        .routes()
        .iter()
        .map(|route| (route.verb, route.path.clone()))
        .collect();
    mounted.sort();

    assert_eq!(
        mounted,
        vec![
            (Verb::Get, "/".to_string()),
            (Verb::Get, "/docs/*slug?".to_string()),
            (Verb::Get, "/health".to_string()),
            (Verb::Get, "/posts".to_string()),
            (Verb::Get, "/posts/:id/comments".to_string()),
            (Verb::Get, "/users/:id".to_string()),
            (Verb::Post, "/posts".to_string()),
            (Verb::Delete, "/users/:id".to_string()),
            (Verb::Head, "/health".to_string()),
        ]
    );
    assert_eq!(config.server.port, 3000);
}

#[tokio::test]
async fn test_authored_summary_survives_tagging() {
    let config = Config::load(crate_dir().join("autoroutes.toml")).unwrap();
    let routing = config.routing.with_base_dir(crate_dir());

    let host: AxumHost = autoload(AxumHost::new(), &ManifestLoader, &routing)
        .await
        .unwrap();

    let index = host
        .routes()
        .iter()
        .find(|route| route.path == "/")
        .unwrap();
    let detail = index.meta.detail.as_ref().unwrap();
    assert_eq!(detail.summary.as_deref(), Some("Landing page"));
    assert!(detail.tags.is_empty());

    let delete = host
        .routes()
        .iter()
        .find(|route| route.verb == Verb::Delete)
        .unwrap();
    assert_eq!(delete.meta.get_meta("permission"), Some(&"users.delete".to_string()));
    assert_eq!(delete.meta.tags(), ["/users/:id".to_string()]);
}
