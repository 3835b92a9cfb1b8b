// Autoroutes - file-system route discovery
// Scans a routes directory, loads one module per file and mounts it on a host router

pub mod autoload;
pub mod config;
pub mod error;
pub mod host;
pub mod index;
pub mod loader;
pub mod meta;
pub mod module;
pub mod mount;
pub mod verb;

#[cfg(feature = "axum")]
pub mod manifest;

// Re-export the pipeline and its inputs
pub use autoload::{autoload, autoload_into};
pub use config::{AutorouteConfig, Config, ServerConfig};
pub use error::{AutorouteError, Result};

// Re-export engine types
pub use host::table::{RouteTable, TableMatch};
pub use host::{HostRouter, MountedRoute, RouteConflict, Scope};
pub use index::{RouteEntry, RouteIndex};
pub use loader::{load_all, LoadedRoute, ModuleLoader, ModuleRegistry, TranslatedRoute};
pub use meta::{Detail, RouteMeta};
pub use module::{Compose, ModuleShape, RouteModule, VerbBinding, VerbTable};
pub use mount::mount;
pub use verb::{UnknownVerb, Verb};

#[cfg(feature = "axum")]
pub use host::axum::{AxumHost, DynHandler};
#[cfg(feature = "axum")]
pub use manifest::{ManifestLoader, RouteManifest};

// Re-export pattern translation
pub use autoroutes_router::{translate, translate_with, RoutePattern, Syntax};
