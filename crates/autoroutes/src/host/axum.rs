//! Axum host adapter
//!
//! Registers mounted routes on an [`axum::Router`]. Handlers are type-erased
//! request functions so route modules loaded at runtime can supply them.
//!
//! Axum panics on conflicting routes, so conflicts are checked up front and
//! reported as [`RouteConflict`] instead. Checked:
//! - the same verb on the same path
//! - paths of the same shape with different parameter names
//!   (`/users/:id` and `/users/:name`)
//! - a catch-all facing any other segment where two paths first differ
//!   (`/users/:id` and `/users/*rest`, `/docs/intro` and `/docs/*slug`)

use std::future::Future;
use std::sync::Arc;

use autoroutes_router::Syntax;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use axum::routing::{on, MethodFilter};
use axum::Router;
use futures::future::BoxFuture;

use super::{HostRouter, MountedRoute, RouteConflict};
use crate::meta::RouteMeta;
use crate::verb::Verb;

/// Type-erased axum handler
pub type DynHandler = Arc<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;

/// Wraps an async function of the request into a [`DynHandler`]
///
/// # Examples
///
/// ```
/// use autoroutes::host::axum::handler;
///
/// let hello = handler(|_req| async { "hello" });
/// ```
pub fn handler<F, Fut>(f: F) -> DynHandler
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: IntoResponse,
{
    Arc::new(move |req| {
        let fut = f(req);
        Box::pin(async move { fut.await.into_response() })
    })
}

/// [`HostRouter`] backed by an axum [`Router`]
pub struct AxumHost<S = ()> {
    router: Router<S>,
    routes: Vec<MountedRoute>,
    /// Paths exactly as handed to axum
    registered: Vec<(Verb, String)>,
}

impl<S> AxumHost<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::from_router(Router::new())
    }

    /// Mounts on top of an existing router
    ///
    /// Routes already on `router` are not known to the conflict checks.
    pub fn from_router(router: Router<S>) -> Self {
        Self {
            router,
            routes: Vec::new(),
            registered: Vec::new(),
        }
    }

    pub fn router(&self) -> &Router<S> {
        &self.router
    }

    pub fn into_router(self) -> Router<S> {
        self.router
    }

    fn check(&self, verb: Verb, path: &str) -> Result<(), RouteConflict> {
        if self
            .registered
            .iter()
            .any(|(existing_verb, existing)| *existing_verb == verb && existing == path)
        {
            return Err(RouteConflict::Duplicate {
                verb,
                path: path.to_string(),
            });
        }

        match self
            .registered
            .iter()
            .find(|(_, existing)| existing != path && overlaps(existing, path))
        {
            Some((_, existing)) => Err(RouteConflict::Overlap {
                path: path.to_string(),
                existing: existing.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl<S> Default for AxumHost<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> HostRouter for AxumHost<S>
where
    S: Clone + Send + Sync + 'static,
{
    type Handler = DynHandler;
    type Error = RouteConflict;

    fn add_route(
        &mut self,
        verb: Verb,
        path: &str,
        handler: DynHandler,
        meta: RouteMeta,
    ) -> Result<(), RouteConflict> {
        let targets = axum_paths(path);
        for target in &targets {
            self.check(verb, target)?;
        }

        for target in targets {
            let handler = handler.clone();
            let method_router = on(method_filter(verb), move |req: Request| handler(req));
            let router = std::mem::replace(&mut self.router, Router::new());
            self.router = router.route(&target, method_router);
            tracing::debug!("axum: {} {}", verb, target);
            self.registered.push((verb, target));
        }

        self.routes.push(MountedRoute {
            verb,
            path: path.to_string(),
            meta,
        });
        Ok(())
    }

    fn routes(&self) -> &[MountedRoute] {
        &self.routes
    }

    fn routes_mut(&mut self) -> &mut [MountedRoute] {
        &mut self.routes
    }

    fn syntax(&self) -> Syntax {
        Syntax::axum()
    }
}

fn method_filter(verb: Verb) -> MethodFilter {
    match verb {
        Verb::Get => MethodFilter::GET,
        Verb::Post => MethodFilter::POST,
        Verb::Put => MethodFilter::PUT,
        Verb::Patch => MethodFilter::PATCH,
        Verb::Delete => MethodFilter::DELETE,
        Verb::Head => MethodFilter::HEAD,
        Verb::Options => MethodFilter::OPTIONS,
    }
}

/// Paths to register with axum for one mounted path
///
/// Axum's `*name` needs at least one segment, so an optional catch-all
/// (`*name?`) becomes two routes: the parent path and the catch-all.
fn axum_paths(path: &str) -> Vec<String> {
    let Some(stripped) = path.strip_suffix('?') else {
        return vec![path.to_string()];
    };

    match stripped.rsplit_once('/') {
        Some((parent, tail)) if tail.starts_with('*') => {
            let parent = if parent.is_empty() { "/" } else { parent };
            vec![parent.to_string(), stripped.to_string()]
        }
        _ => vec![path.to_string()],
    }
}

/// Whether axum refuses to hold both paths in one router
fn overlaps(a: &str, b: &str) -> bool {
    if shape(a) == shape(b) {
        return true;
    }

    segments(a)
        .zip(segments(b))
        .find(|(left, right)| left != right)
        .is_some_and(|(left, right)| left.starts_with('*') || right.starts_with('*'))
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Path with parameter names erased, `/users/:id` → `/users/:`
fn shape(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.chars().next() {
            Some(':') => ":",
            Some('*') => "*",
            _ => segment,
        })
        .collect::<Vec<_>>()
        .join("/")
}
