// File: src/meta.rs
// Purpose: Per-route metadata carried alongside registered handlers

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Documentation detail for a route (tags, summary, description)
///
/// Its presence on a route means the author documented it explicitly; tag
/// generation never touches a route that already has one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub deprecated: bool,
}

impl Detail {
    pub fn tagged<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Mutable metadata bag attached to a registered route
///
/// `extra` holds arbitrary hook settings (permissions, cache hints, ...)
/// that the host router may interpret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    #[serde(default)]
    pub detail: Option<Detail>,

    #[serde(default)]
    pub extra: HashMap<String, String>,
}

impl RouteMeta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the documentation detail
    ///
    /// # Examples
    ///
    /// ```
    /// use autoroutes::{Detail, RouteMeta};
    ///
    /// let meta = RouteMeta::new().with_detail(Detail::tagged(["users"]));
    /// assert_eq!(meta.tags(), ["users".to_string()]);
    /// ```
    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_detail(Detail::tagged(tags))
    }

    /// Sets a metadata key-value pair
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn get_meta(&self, key: &str) -> Option<&String> {
        self.extra.get(key)
    }

    pub fn has_meta(&self, key: &str) -> bool {
        self.extra.contains_key(key)
    }

    /// Documentation tags, empty when no detail is set
    pub fn tags(&self) -> &[String] {
        self.detail
            .as_ref()
            .map(|detail| detail.tags.as_slice())
            .unwrap_or(&[])
    }

    /// Fills in `detail` with `tag` unless a detail is already present
    ///
    /// Returns whether the metadata changed. Applying it twice is a no-op.
    pub fn tag_if_undocumented(&mut self, tag: &str) -> bool {
        if self.detail.is_some() {
            return false;
        }
        self.detail = Some(Detail::tagged([tag]));
        true
    }
}
