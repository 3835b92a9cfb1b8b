//! In-memory host router
//!
//! Records registrations in order and answers lookups. Useful on its own as a
//! route registry, and the host the engine is tested against.

use std::collections::HashMap;

use autoroutes_router::Syntax;

use super::{HostRouter, MountedRoute, RouteConflict};
use crate::meta::RouteMeta;
use crate::verb::Verb;

/// Ordered route table keyed by verb and path
///
/// Precedence rules:
/// - registering the same verb and path twice fails with
///   [`RouteConflict::Duplicate`]
/// - [`find`](RouteTable::find) returns the first registered route that
///   matches, so earlier registrations shadow later overlapping ones
/// - a `*name` tail matches one or more segments, `*name?` zero or more
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: Vec<MountedRoute>,
    handlers: Vec<H>,
}

/// Result of looking up a request path
#[derive(Debug)]
pub struct TableMatch<'a, H> {
    pub route: &'a MountedRoute,
    pub handler: &'a H,
    pub params: HashMap<String, String>,
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            handlers: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Gets a route by verb and exact registered path
    pub fn get(&self, verb: Verb, path: &str) -> Option<&MountedRoute> {
        self.position(verb, path).map(|index| &self.routes[index])
    }

    /// Handler registered for verb and exact registered path
    pub fn handler(&self, verb: Verb, path: &str) -> Option<&H> {
        self.position(verb, path).map(|index| &self.handlers[index])
    }

    /// Sorted `(verb, path)` pairs, handy for comparing tables
    pub fn signature(&self) -> Vec<(Verb, String)> {
        let mut signature: Vec<(Verb, String)> = self
            .routes
            .iter()
            .map(|route| (route.verb, route.path.clone()))
            .collect();
        signature.sort();
        signature
    }

    /// Finds the first route whose pattern matches a request path
    ///
    /// # Examples
    ///
    /// ```
    /// use autoroutes::{HostRouter, RouteMeta, RouteTable, Verb};
    ///
    /// let mut table = RouteTable::new();
    /// table.add_route(Verb::Get, "/users/:id", "show", RouteMeta::new()).unwrap();
    ///
    /// let found = table.find(Verb::Get, "/users/7").unwrap();
    /// assert_eq!(*found.handler, "show");
    /// assert_eq!(found.params.get("id"), Some(&"7".to_string()));
    /// assert!(table.find(Verb::Post, "/users/7").is_none());
    /// ```
    pub fn find(&self, verb: Verb, path: &str) -> Option<TableMatch<'_, H>> {
        let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        self.routes
            .iter()
            .zip(&self.handlers)
            .filter(|(route, _)| route.verb == verb)
            .find_map(|(route, handler)| {
                let pattern: Vec<&str> =
                    route.path.split('/').filter(|s| !s.is_empty()).collect();
                match_path(&pattern, &path_segments, HashMap::new()).map(|params| TableMatch {
                    route,
                    handler,
                    params,
                })
            })
    }

    fn position(&self, verb: Verb, path: &str) -> Option<usize> {
        self.routes
            .iter()
            .position(|route| route.verb == verb && route.path == path)
    }
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Clone + Send + Sync + 'static> HostRouter for RouteTable<H> {
    type Handler = H;
    type Error = RouteConflict;

    fn add_route(
        &mut self,
        verb: Verb,
        path: &str,
        handler: H,
        meta: RouteMeta,
    ) -> Result<(), RouteConflict> {
        if self.position(verb, path).is_some() {
            return Err(RouteConflict::Duplicate {
                verb,
                path: path.to_string(),
            });
        }

        self.routes.push(MountedRoute {
            verb,
            path: path.to_string(),
            meta,
        });
        self.handlers.push(handler);
        Ok(())
    }

    fn routes(&self) -> &[MountedRoute] {
        &self.routes
    }

    fn routes_mut(&mut self) -> &mut [MountedRoute] {
        &mut self.routes
    }

    /// Marks optional catch-alls with `?` so lookups can tell them apart
    fn syntax(&self) -> Syntax {
        Syntax::new(":", "*").with_optional_suffix("?")
    }
}

/// Matches rendered pattern segments (`:id`, `*rest`) against path segments
fn match_path(
    pattern: &[&str],
    path: &[&str],
    mut params: HashMap<String, String>,
) -> Option<HashMap<String, String>> {
    let Some((head, rest)) = pattern.split_first() else {
        return path.is_empty().then_some(params);
    };

    if let Some(name) = head.strip_prefix('*') {
        let (name, optional) = match name.strip_suffix('?') {
            Some(name) => (name, true),
            None => (name, false),
        };
        if path.is_empty() && !optional {
            return None;
        }
        params.insert(name.to_string(), path.join("/"));
        return Some(params);
    }

    let (segment, tail) = path.split_first()?;
    match head.strip_prefix(':') {
        Some(name) => {
            params.insert(name.to_string(), segment.to_string());
        }
        None if head != segment => return None,
        None => {}
    }
    match_path(rest, tail, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(routes: &[(Verb, &str)]) -> RouteTable<usize> {
        let mut table = RouteTable::new();
        for (index, (verb, path)) in routes.iter().enumerate() {
            table.add_route(*verb, path, index, RouteMeta::new()).unwrap();
        }
        table
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let mut table = table(&[(Verb::Get, "/posts")]);
        let err = table
            .add_route(Verb::Get, "/posts", 1, RouteMeta::new())
            .unwrap_err();
        assert_eq!(
            err,
            RouteConflict::Duplicate {
                verb: Verb::Get,
                path: "/posts".to_string()
            }
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_same_path_other_verb_is_allowed() {
        let table = table(&[(Verb::Get, "/posts"), (Verb::Post, "/posts")]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.handler(Verb::Post, "/posts"), Some(&1));
    }

    #[test]
    fn test_find_first_registered_wins() {
        let table = table(&[(Verb::Get, "/posts/new"), (Verb::Get, "/posts/:id")]);

        let found = table.find(Verb::Get, "/posts/new").unwrap();
        assert_eq!(*found.handler, 0);
        assert!(found.params.is_empty());

        let found = table.find(Verb::Get, "/posts/12").unwrap();
        assert_eq!(*found.handler, 1);
        assert_eq!(found.params.get("id"), Some(&"12".to_string()));
    }

    #[test]
    fn test_find_optional_catch_all_tail() {
        let table = table(&[(Verb::Get, "/users/*path?")]);

        for (path, bound) in [("/users", ""), ("/users/1", "1"), ("/users/1/2", "1/2")] {
            let found = table.find(Verb::Get, path).unwrap();
            assert_eq!(found.params.get("path"), Some(&bound.to_string()));
        }
        assert!(table.find(Verb::Get, "/accounts/1").is_none());
    }

    #[test]
    fn test_find_catch_all_needs_a_segment() {
        let table = table(&[(Verb::Get, "/docs/*slug")]);

        assert!(table.find(Verb::Get, "/docs").is_none());
        let found = table.find(Verb::Get, "/docs/guide/intro").unwrap();
        assert_eq!(found.params.get("slug"), Some(&"guide/intro".to_string()));
    }

    #[test]
    fn test_find_root() {
        let table = table(&[(Verb::Get, "/")]);
        assert!(table.find(Verb::Get, "/").is_some());
        assert!(table.find(Verb::Get, "/x").is_none());
    }

    #[test]
    fn test_signature_is_sorted() {
        let table = table(&[(Verb::Post, "/b"), (Verb::Get, "/b"), (Verb::Get, "/a")]);
        assert_eq!(
            table.signature(),
            vec![
                (Verb::Get, "/a".to_string()),
                (Verb::Get, "/b".to_string()),
                (Verb::Post, "/b".to_string()),
            ]
        );
    }
}
