//! Module loading
//!
//! A [`ModuleLoader`] turns a route file into a [`RouteModule`]. The engine
//! loads a whole index as one batch with [`load_all`]: every load is started
//! before any is awaited, and the batch fails as a unit.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use async_trait::async_trait;
use autoroutes_router::RoutePattern;
use futures::future::try_join_all;

use crate::error::{AutorouteError, Result};
use crate::host::HostRouter;
use crate::module::RouteModule;

/// Loads the route module stored at an absolute path
#[async_trait]
pub trait ModuleLoader<R: HostRouter>: Send + Sync {
    /// Fails when the file is missing or cannot be turned into a module
    async fn load(&self, file: &Path) -> anyhow::Result<RouteModule<R>>;
}

/// An indexed file whose key has been translated
#[derive(Debug, Clone)]
pub struct TranslatedRoute {
    pub pattern: RoutePattern,
    pub file: PathBuf,
}

/// A translated route with its module loaded
pub struct LoadedRoute<R: HostRouter> {
    pub pattern: RoutePattern,
    pub file: PathBuf,
    pub module: RouteModule<R>,
}

impl<R: HostRouter> fmt::Debug for LoadedRoute<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedRoute")
            .field("pattern", &self.pattern)
            .field("file", &self.file)
            .field("module", &self.module)
            .finish()
    }
}

/// Loads every route's module concurrently on the current task
///
/// The output keeps the input order. The first failure is reported as
/// [`AutorouteError::ModuleLoad`] and every other result is dropped.
pub async fn load_all<R, L>(loader: &L, routes: Vec<TranslatedRoute>) -> Result<Vec<LoadedRoute<R>>>
where
    R: HostRouter,
    L: ModuleLoader<R> + ?Sized,
{
    let loads = routes.into_iter().map(|route| async move {
        match loader.load(&route.file).await {
            Ok(module) => {
                tracing::debug!("Loaded module for {} from {:?}", route.pattern, route.file);
                Ok(LoadedRoute {
                    pattern: route.pattern,
                    file: route.file,
                    module,
                })
            }
            Err(source) => Err(AutorouteError::ModuleLoad {
                key: route.pattern.key().to_string(),
                file: route.file,
                source,
            }),
        }
    });

    try_join_all(loads).await
}

/// In-memory loader for modules compiled into the binary
///
/// Modules are registered under their path relative to the routes root, the
/// same path the directory index finds them at:
///
/// ```
/// use autoroutes::{ModuleRegistry, RouteModule, RouteTable};
///
/// let registry: ModuleRegistry<RouteTable<&'static str>> = ModuleRegistry::new("./routes")
///     .register("index.rs", RouteModule::per_verb([("get", "home")]))
///     .register("users/[id].rs", RouteModule::per_verb([("get", "show"), ("delete", "destroy")]));
///
/// assert_eq!(registry.len(), 2);
/// ```
pub struct ModuleRegistry<R: HostRouter> {
    root: PathBuf,
    modules: HashMap<PathBuf, RouteModule<R>>,
}

impl<R: HostRouter> ModuleRegistry<R> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            modules: HashMap::new(),
        }
    }

    /// Registers `module` for the file at `relative` under the root
    pub fn register(mut self, relative: impl AsRef<Path>, module: RouteModule<R>) -> Self {
        self.insert(relative, module);
        self
    }

    pub fn insert(&mut self, relative: impl AsRef<Path>, module: RouteModule<R>) {
        self.modules.insert(self.root.join(relative), module);
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[async_trait]
impl<R: HostRouter> ModuleLoader<R> for ModuleRegistry<R> {
    async fn load(&self, file: &Path) -> anyhow::Result<RouteModule<R>> {
        self.modules
            .get(file)
            .cloned()
            .ok_or_else(|| anyhow!("no module registered for {:?}", file))
    }
}
