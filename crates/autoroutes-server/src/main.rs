use anyhow::{Context, Result};
use autoroutes::{autoload, AxumHost, Config, HostRouter, ManifestLoader};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::load_default().unwrap_or_else(|e| {
        warn!("Failed to load config: {:#}, using defaults", e);
        Config::default()
    });

    // Only manifests are served unless the config says otherwise
    let mut routing = config.routing.clone();
    if routing.extensions.is_empty() {
        routing.extensions = vec!["toml".to_string()];
    }

    info!("Routes: {:?}, prefix: {:?}", routing.resolve_dir(), routing.prefix);

    let host: AxumHost = autoload(AxumHost::new(), &ManifestLoader, &routing)
        .await
        .context("Failed to mount routes")?;

    info!("Mounted {} routes", host.routes().len());
    for route in host.routes() {
        info!("  {} {} {:?}", route.verb, route.path, route.meta.tags());
    }

    let app = host.into_router().layer(TraceLayer::new_for_http());

    let addr = std::env::var("AUTOROUTES_ADDR")
        .unwrap_or_else(|_| format!("{}:{}", config.server.host, config.server.port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
