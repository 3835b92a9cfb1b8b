// File: src/autoload.rs
// Purpose: The discovery pass: index, translate, load, mount

use autoroutes_router::translate_with;

use crate::config::AutorouteConfig;
use crate::error::{AutorouteError, Result};
use crate::host::HostRouter;
use crate::index::RouteIndex;
use crate::loader::{load_all, ModuleLoader, TranslatedRoute};
use crate::mount::mount;

/// Discovers the routes under the configured directory and mounts them
///
/// Runs the whole pass against `host` and hands it back with the new routes
/// registered. Nothing is mounted unless the directory is readable, every
/// route key translates and every module loads.
///
/// # Examples
///
/// ```no_run
/// use autoroutes::{autoload, AutorouteConfig, AxumHost, ManifestLoader};
///
/// # async fn run() -> autoroutes::Result<()> {
/// let config = AutorouteConfig::default().with_prefix("/api");
/// let host: AxumHost = autoload(AxumHost::new(), &ManifestLoader, &config).await?;
/// let app = host.into_router();
/// # let _ = app;
/// # Ok(())
/// # }
/// ```
pub async fn autoload<R, L>(mut host: R, loader: &L, config: &AutorouteConfig) -> Result<R>
where
    R: HostRouter,
    L: ModuleLoader<R> + ?Sized,
{
    autoload_into(&mut host, loader, config).await?;
    Ok(host)
}

/// Same pass as [`autoload`] on a borrowed host, returning how many routes
/// it registered
///
/// On error the host keeps whatever it had before, except when the host
/// itself rejects a route: routes mounted ahead of the rejected one stay.
pub async fn autoload_into<R, L>(host: &mut R, loader: &L, config: &AutorouteConfig) -> Result<usize>
where
    R: HostRouter,
    L: ModuleLoader<R> + ?Sized,
{
    let root = config.resolve_dir();
    let index = RouteIndex::scan(&root, &config.extensions)?;

    let syntax = host.syntax();
    let routes = index
        .into_iter()
        .map(|entry| {
            translate_with(&entry.key, &syntax).map(|pattern| TranslatedRoute {
                pattern,
                file: entry.file,
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let loaded = load_all(loader, routes).await?;
    let files = loaded.len();

    let before = host.routes().len();
    mount(host, loaded, &config.prefix, config.generate_tags)
        .map_err(|source| AutorouteError::Registration(Box::new(source)))?;
    let mounted = host.routes().len() - before;

    tracing::info!("Mounted {} routes from {} files in {:?}", mounted, files, root);

    Ok(mounted)
}
