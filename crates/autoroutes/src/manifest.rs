//! TOML route manifests
//!
//! A manifest is a route file describing static responses, loaded into an
//! [`AxumHost`]. Top-level verb tables make a per-verb module:
//!
//! ```toml
//! [get]
//! body = "pong"
//!
//! [delete]
//! status = 204
//!
//! [delete.detail]
//! summary = "Forget the ping"
//! ```
//!
//! A `[[routes]]` array makes a composed module instead, each entry mounted
//! at its own path below the file's pattern:
//!
//! ```toml
//! [[routes]]
//! method = "get"
//! body = "all posts"
//!
//! [[routes]]
//! method = "get"
//! path = "/:id/comments"
//! body = "comments"
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::http::{header, HeaderValue, StatusCode};
use serde::Deserialize;

use crate::host::axum::{handler, AxumHost, DynHandler};
use crate::loader::ModuleLoader;
use crate::meta::{Detail, RouteMeta};
use crate::module::RouteModule;
use crate::verb::Verb;

/// Loads `.toml` route manifests from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestLoader;

/// One static response
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestResponse {
    #[serde(default = "default_status")]
    pub status: u16,

    #[serde(default)]
    pub body: String,

    #[serde(default = "default_content_type")]
    pub content_type: String,

    #[serde(default)]
    pub detail: Option<Detail>,

    #[serde(default)]
    pub extra: HashMap<String, String>,
}

/// One entry of a composed manifest
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestRoute {
    pub method: String,

    #[serde(default = "default_path")]
    pub path: String,

    #[serde(flatten)]
    pub response: ManifestResponse,
}

/// Parsed manifest file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteManifest {
    #[serde(default)]
    pub routes: Vec<ManifestRoute>,

    /// Every other top-level entry, keyed by export name
    #[serde(flatten)]
    pub exports: BTreeMap<String, toml::Value>,
}

fn default_status() -> u16 {
    200
}

fn default_content_type() -> String {
    "text/plain; charset=utf-8".to_string()
}

fn default_path() -> String {
    "/".to_string()
}

impl ManifestResponse {
    fn meta(&self) -> RouteMeta {
        RouteMeta {
            detail: self.detail.clone(),
            extra: self.extra.clone(),
        }
    }

    /// Handler answering every request with this response
    pub fn handler(&self) -> Result<DynHandler> {
        let status = StatusCode::from_u16(self.status)
            .with_context(|| format!("Invalid status code {}", self.status))?;
        let content_type = HeaderValue::from_str(&self.content_type)
            .with_context(|| format!("Invalid content type {:?}", self.content_type))?;
        let body = self.body.clone();

        Ok(handler(move |_req| {
            let response = (status, [(header::CONTENT_TYPE, content_type.clone())], body.clone());
            async move { response }
        }))
    }
}

impl RouteManifest {
    /// Top-level entries named after a verb, parsed as responses
    ///
    /// Entries with any other name are not routes and are skipped unparsed.
    pub fn verb_responses(&self) -> Result<Vec<(String, ManifestResponse)>> {
        self.exports
            .iter()
            .filter(|(name, _)| {
                let is_verb = name.parse::<Verb>().is_ok();
                if !is_verb {
                    tracing::debug!("Skipping manifest entry `{}`: not a verb", name);
                }
                is_verb
            })
            .map(|(name, value)| -> Result<_> {
                let response = value
                    .clone()
                    .try_into::<ManifestResponse>()
                    .with_context(|| format!("Invalid `{}` response", name))?;
                Ok((name.clone(), response))
            })
            .collect()
    }

    /// Builds the route module this manifest describes
    ///
    /// Verb tables become per-verb exports. With a `routes` array the module
    /// is composed and the verb tables are ignored.
    pub fn into_module<S>(self) -> Result<RouteModule<AxumHost<S>>>
    where
        S: Clone + Send + Sync + 'static,
    {
        if self.routes.is_empty() {
            return self
                .verb_responses()?
                .into_iter()
                .try_fold(RouteModule::new(), |module, (name, response)| -> Result<_> {
                    let handler = response
                        .handler()
                        .with_context(|| format!("Invalid `{}` response", name))?;
                    Ok(module.handler_with_meta(name, handler, response.meta()))
                });
        }

        let routes = self
            .routes
            .into_iter()
            .map(|route| -> Result<_> {
                let verb: Verb = route
                    .method
                    .parse()
                    .with_context(|| format!("Invalid route at {}", route.path))?;
                let handler = route.response.handler()?;
                Ok((verb, route.path, handler, route.response.meta()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RouteModule::<AxumHost<S>>::composed(move |scope| {
            routes
                .iter()
                .try_fold(scope, |scope, (verb, path, handler, meta)| {
                    scope.route_with(*verb, path, handler.clone(), meta.clone())
                })
        }))
    }
}

#[async_trait]
impl<S> ModuleLoader<AxumHost<S>> for ManifestLoader
where
    S: Clone + Send + Sync + 'static,
{
    async fn load(&self, file: &Path) -> Result<RouteModule<AxumHost<S>>> {
        let content = tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read route manifest: {:?}", file))?;

        let manifest: RouteManifest = toml::from_str(&content)
            .with_context(|| format!("Failed to parse route manifest: {:?}", file))?;

        manifest.into_module()
    }
}
