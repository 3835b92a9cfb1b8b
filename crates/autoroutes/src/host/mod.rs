//! Host router abstraction
//!
//! The engine never dispatches requests. It needs three things from the
//! router it mounts into: register a handler for a verb and path, expose the
//! registered routes with mutable metadata, and scope registrations under a
//! path prefix. [`HostRouter`] covers the first two; [`Scope`] builds the
//! third on top of them.

use autoroutes_router::{join_paths, normalize_path, Syntax};
use thiserror::Error;

use crate::meta::RouteMeta;
use crate::verb::Verb;

#[cfg(feature = "axum")]
pub mod axum;
pub mod table;

/// A route as registered on the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedRoute {
    pub verb: Verb,
    /// Fully prefixed, canonical path
    pub path: String,
    pub meta: RouteMeta,
}

/// Registration conflicts reported by the bundled hosts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteConflict {
    #[error("{verb} {path} is already registered")]
    Duplicate { verb: Verb, path: String },

    /// Same shape, different parameter names (`/users/:id` vs `/users/:name`)
    #[error("{path} overlaps with already registered {existing}")]
    Overlap { path: String, existing: String },
}

/// A router that route modules can be mounted into
///
/// Registration order is preserved by `routes()`: a route added later has a
/// higher index. The mount engine relies on this to find the routes a group
/// registered.
pub trait HostRouter: Sized + 'static {
    type Handler: Clone + Send + Sync + 'static;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Registers `handler` for `verb` at the canonical `path`
    fn add_route(
        &mut self,
        verb: Verb,
        path: &str,
        handler: Self::Handler,
        meta: RouteMeta,
    ) -> Result<(), Self::Error>;

    fn routes(&self) -> &[MountedRoute];

    fn routes_mut(&mut self) -> &mut [MountedRoute];

    /// Placeholder syntax route keys are translated with for this host
    fn syntax(&self) -> Syntax {
        Syntax::default()
    }

    /// Opens a scope rooted at `prefix`
    fn group(&mut self, prefix: &str) -> Scope<'_, Self> {
        Scope::new(self, prefix)
    }
}

/// A view of a host router rooted at a path prefix
///
/// Scopes are passed by value through the builder methods, so a composed
/// route module reads as a chain:
///
/// ```
/// use autoroutes::{HostRouter, RouteTable, Verb};
///
/// let mut table: RouteTable<&'static str> = RouteTable::new();
/// let scope = table.group("/posts");
/// scope
///     .get("/", "list")
///     .and_then(|scope| scope.post("/", "create"))
///     .and_then(|scope| scope.group("/:id", |scope| scope.get("/", "show")))
///     .unwrap();
///
/// let paths: Vec<_> = table.routes().iter().map(|r| (r.verb, r.path.as_str())).collect();
/// assert_eq!(
///     paths,
///     vec![(Verb::Get, "/posts"), (Verb::Post, "/posts"), (Verb::Get, "/posts/:id")]
/// );
/// ```
pub struct Scope<'a, R: HostRouter> {
    host: &'a mut R,
    prefix: String,
}

impl<'a, R: HostRouter> Scope<'a, R> {
    pub fn new(host: &'a mut R, prefix: &str) -> Self {
        Self {
            host,
            prefix: normalize_path(prefix).into_owned(),
        }
    }

    /// The scope's own path
    pub fn path(&self) -> &str {
        &self.prefix
    }

    pub fn host(&self) -> &R {
        &*self.host
    }

    pub fn host_mut(&mut self) -> &mut R {
        &mut *self.host
    }

    /// Registers a handler at `path` relative to this scope
    pub fn route(self, verb: Verb, path: &str, handler: R::Handler) -> Result<Self, R::Error> {
        self.route_with(verb, path, handler, RouteMeta::default())
    }

    /// Registers a handler with metadata at `path` relative to this scope
    pub fn route_with(
        mut self,
        verb: Verb,
        path: &str,
        handler: R::Handler,
        meta: RouteMeta,
    ) -> Result<Self, R::Error> {
        let full_path = join_paths(&self.prefix, path);
        self.host.add_route(verb, &full_path, handler, meta)?;
        Ok(self)
    }

    pub fn get(self, path: &str, handler: R::Handler) -> Result<Self, R::Error> {
        self.route(Verb::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: R::Handler) -> Result<Self, R::Error> {
        self.route(Verb::Post, path, handler)
    }

    pub fn put(self, path: &str, handler: R::Handler) -> Result<Self, R::Error> {
        self.route(Verb::Put, path, handler)
    }

    pub fn patch(self, path: &str, handler: R::Handler) -> Result<Self, R::Error> {
        self.route(Verb::Patch, path, handler)
    }

    pub fn delete(self, path: &str, handler: R::Handler) -> Result<Self, R::Error> {
        self.route(Verb::Delete, path, handler)
    }

    pub fn head(self, path: &str, handler: R::Handler) -> Result<Self, R::Error> {
        self.route(Verb::Head, path, handler)
    }

    pub fn options(self, path: &str, handler: R::Handler) -> Result<Self, R::Error> {
        self.route(Verb::Options, path, handler)
    }

    /// Opens a nested scope at `path`, hands it to `build`, then returns this scope
    pub fn group<F>(mut self, path: &str, build: F) -> Result<Self, R::Error>
    where
        F: FnOnce(Scope<'_, R>) -> Result<Scope<'_, R>, R::Error>,
    {
        let prefix = join_paths(&self.prefix, path);
        build(Scope::new(&mut *self.host, &prefix))?;
        Ok(self)
    }
}
