// File: src/module.rs
// Purpose: Loaded route modules and the two shapes they can take

use std::fmt;
use std::sync::Arc;

use crate::host::{HostRouter, Scope};
use crate::meta::RouteMeta;
use crate::verb::Verb;

/// A function that configures a scope with its own routes
///
/// Receives the group scope for the route file and returns it once every
/// handler (and any nested group) is registered.
pub type Compose<R> = Arc<
    dyn for<'a> Fn(Scope<'a, R>) -> Result<Scope<'a, R>, <R as HostRouter>::Error> + Send + Sync,
>;

/// One verb export: a bare handler, or a handler with route metadata
#[derive(Clone)]
pub enum VerbBinding<H> {
    Handler(H),
    WithMeta { handler: H, meta: RouteMeta },
}

impl<H> VerbBinding<H> {
    pub fn handler(&self) -> &H {
        match self {
            VerbBinding::Handler(handler) | VerbBinding::WithMeta { handler, .. } => handler,
        }
    }

    /// Splits the binding into what the host registers
    pub fn into_parts(self) -> (H, RouteMeta) {
        match self {
            VerbBinding::Handler(handler) => (handler, RouteMeta::default()),
            VerbBinding::WithMeta { handler, meta } => (handler, meta),
        }
    }
}

impl<H> fmt::Debug for VerbBinding<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerbBinding::Handler(_) => f.write_str("Handler"),
            VerbBinding::WithMeta { meta, .. } => {
                f.debug_struct("WithMeta").field("meta", meta).finish()
            }
        }
    }
}

/// Verb bindings of a per-verb module, one per verb, in export order
#[derive(Clone)]
pub struct VerbTable<H> {
    bindings: Vec<(Verb, VerbBinding<H>)>,
}

impl<H> fmt::Debug for VerbTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.bindings.iter().map(|(verb, binding)| (verb, binding)))
            .finish()
    }
}

impl<H> VerbTable<H> {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Builds a table from named exports
    ///
    /// Names are matched case-insensitively against the recognized verbs;
    /// anything else (helpers, constants, `default`) is ignored. When two
    /// exports name the same verb the later one wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use autoroutes::{Verb, VerbBinding, VerbTable};
    ///
    /// let table = VerbTable::from_exports([
    ///     ("GET", VerbBinding::Handler("show")),
    ///     ("delete", VerbBinding::Handler("destroy")),
    ///     ("helper", VerbBinding::Handler("ignored")),
    /// ]);
    ///
    /// let verbs: Vec<Verb> = table.iter().map(|(verb, _)| *verb).collect();
    /// assert_eq!(verbs, vec![Verb::Get, Verb::Delete]);
    /// ```
    pub fn from_exports<I, S>(exports: I) -> Self
    where
        I: IntoIterator<Item = (S, VerbBinding<H>)>,
        S: AsRef<str>,
    {
        exports
            .into_iter()
            .fold(Self::new(), |table, (name, binding)| match name.as_ref().parse::<Verb>() {
                Ok(verb) => table.with(verb, binding),
                Err(_) => {
                    tracing::debug!("Ignoring non-verb export `{}`", name.as_ref());
                    table
                }
            })
    }

    /// Sets the binding for `verb`, replacing an earlier one in place
    pub fn with(mut self, verb: Verb, binding: VerbBinding<H>) -> Self {
        match self.bindings.iter_mut().find(|(existing, _)| *existing == verb) {
            Some((_, slot)) => *slot = binding,
            None => self.bindings.push((verb, binding)),
        }
        self
    }

    pub fn get(&self, verb: Verb) -> Option<&VerbBinding<H>> {
        self.bindings
            .iter()
            .find(|(existing, _)| *existing == verb)
            .map(|(_, binding)| binding)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Verb, VerbBinding<H>)> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<H> Default for VerbTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> IntoIterator for VerbTable<H> {
    type Item = (Verb, VerbBinding<H>);
    type IntoIter = std::vec::IntoIter<(Verb, VerbBinding<H>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.into_iter()
    }
}

/// The exports of one loaded route file
///
/// A module may carry a default export (a [`Compose`] function), named
/// exports, or both. The loader hands this over unresolved; the mount engine
/// decides which shape it is with [`RouteModule::resolve`].
pub struct RouteModule<R: HostRouter> {
    default: Option<Compose<R>>,
    exports: Vec<(String, VerbBinding<R::Handler>)>,
}

/// A route module after shape detection
pub enum ModuleShape<R: HostRouter> {
    /// The default export configures the group scope itself
    Composed(Compose<R>),
    /// Verb-named exports registered at the group root
    PerVerb(VerbTable<R::Handler>),
}

impl<R: HostRouter> RouteModule<R> {
    pub fn new() -> Self {
        Self {
            default: None,
            exports: Vec::new(),
        }
    }

    /// Module whose default export composes the group scope
    ///
    /// # Examples
    ///
    /// ```
    /// use autoroutes::{RouteModule, RouteTable};
    ///
    /// let module = RouteModule::<RouteTable<&'static str>>::composed(|scope| {
    ///     scope.get("/", "index")?.get("/:id", "show")
    /// });
    /// assert!(module.has_default());
    /// ```
    pub fn composed<F>(compose: F) -> Self
    where
        F: for<'a> Fn(Scope<'a, R>) -> Result<Scope<'a, R>, R::Error> + Send + Sync + 'static,
    {
        Self::new().with_default(Arc::new(compose))
    }

    /// Module exporting one handler per verb name
    pub fn per_verb<I, S>(exports: I) -> Self
    where
        I: IntoIterator<Item = (S, R::Handler)>,
        S: Into<String>,
    {
        exports
            .into_iter()
            .fold(Self::new(), |module, (name, handler)| module.handler(name, handler))
    }

    pub fn with_default(mut self, compose: Compose<R>) -> Self {
        self.default = Some(compose);
        self
    }

    /// Adds a named export
    pub fn with_export(mut self, name: impl Into<String>, binding: VerbBinding<R::Handler>) -> Self {
        self.exports.push((name.into(), binding));
        self
    }

    /// Adds a named export that is a bare handler
    pub fn handler(self, name: impl Into<String>, handler: R::Handler) -> Self {
        self.with_export(name, VerbBinding::Handler(handler))
    }

    /// Adds a named export carrying route metadata
    pub fn handler_with_meta(
        self,
        name: impl Into<String>,
        handler: R::Handler,
        meta: RouteMeta,
    ) -> Self {
        self.with_export(name, VerbBinding::WithMeta { handler, meta })
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Names of all named exports, recognized or not
    pub fn export_names(&self) -> impl Iterator<Item = &str> {
        self.exports.iter().map(|(name, _)| name.as_str())
    }

    /// Detects the module shape
    ///
    /// A default export wins: the module is `Composed` and its named exports
    /// are not registered. Otherwise the named exports form a per-verb table,
    /// possibly empty.
    pub fn resolve(self) -> ModuleShape<R> {
        match self.default {
            Some(compose) => {
                if !self.exports.is_empty() {
                    tracing::debug!(
                        "Default export present, ignoring {} named export(s)",
                        self.exports.len()
                    );
                }
                ModuleShape::Composed(compose)
            }
            None => ModuleShape::PerVerb(VerbTable::from_exports(self.exports)),
        }
    }
}

impl<R: HostRouter> Default for RouteModule<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: HostRouter> Clone for RouteModule<R> {
    fn clone(&self) -> Self {
        Self {
            default: self.default.clone(),
            exports: self.exports.clone(),
        }
    }
}

impl<R: HostRouter> fmt::Debug for RouteModule<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteModule")
            .field("default", &self.default.is_some())
            .field("exports", &self.exports.iter().map(|(name, _)| name).collect::<Vec<_>>())
            .finish()
    }
}

impl<R: HostRouter> fmt::Debug for ModuleShape<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleShape::Composed(_) => f.write_str("Composed"),
            ModuleShape::PerVerb(table) => f.debug_tuple("PerVerb").field(table).finish(),
        }
    }
}
