/// Route module for file-system route keys
///
/// Contains pure functional components for translating and matching routes:
/// - `pattern` classifies single segments
/// - `parser` folds a whole key into a [`RoutePattern`]
/// - `matcher` extracts parameters from concrete URL paths

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

pub mod matcher;
pub mod parser;
pub mod pattern;

use parser::Syntax;
use pattern::PatternSegment;

/// How a route parameter binds path segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Exactly one segment
    Dynamic,
    /// One or more trailing segments
    CatchAll,
    /// Zero or more trailing segments
    OptionalCatchAll,
}

/// A named parameter extracted from a route key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
}

/// A translated route: the URL pattern derived from one route key
///
/// Built by [`translate`](crate::translate). Immutable once produced; the
/// rendered `path` uses the [`Syntax`] it was translated with.
///
/// Two patterns are equal when their segments are, whatever key or syntax
/// they came from:
///
/// ```
/// use autoroutes_router::{translate, translate_with, Syntax};
///
/// assert_eq!(translate("posts/index").unwrap(), translate("/posts").unwrap());
/// assert_eq!(
///     translate("files/[[...path]]").unwrap(),
///     translate_with("files/[[...path]]", &Syntax::axum()).unwrap()
/// );
/// assert_ne!(translate("docs/[...slug]").unwrap(), translate("docs/[[...slug]]").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct RoutePattern {
    key: String,
    path: String,
    segments: Vec<PatternSegment>,
}

impl RoutePattern {
    pub(crate) fn new(key: &str, segments: Vec<PatternSegment>, syntax: &Syntax) -> Self {
        Self {
            key: key.to_string(),
            path: parser::render(&segments, syntax),
            segments,
        }
    }

    /// The route key this pattern was translated from
    pub fn key(&self) -> &str {
        &self.key
    }

    /// URL pattern like "/users/:id"
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Typed segments, index segment already removed
    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// Parameters in path order
    ///
    /// # Examples
    ///
    /// ```
    /// use autoroutes_router::{translate, Param, ParamKind};
    ///
    /// let pattern = translate("shop/[category]/[...rest]").unwrap();
    /// assert_eq!(
    ///     pattern.params(),
    ///     vec![
    ///         Param { name: "category".into(), kind: ParamKind::Dynamic },
    ///         Param { name: "rest".into(), kind: ParamKind::CatchAll },
    ///     ]
    /// );
    /// ```
    pub fn params(&self) -> Vec<Param> {
        self.segments
            .iter()
            .filter_map(|segment| {
                let kind = match segment {
                    PatternSegment::Static(_) => return None,
                    PatternSegment::Dynamic(_) => ParamKind::Dynamic,
                    PatternSegment::CatchAll(_) => ParamKind::CatchAll,
                    PatternSegment::OptionalCatchAll(_) => ParamKind::OptionalCatchAll,
                };
                segment.param_name().map(|name| Param {
                    name: name.to_string(),
                    kind,
                })
            })
            .collect()
    }

    /// Whether the pattern has no parameters at all
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, PatternSegment::Static(_)))
    }

    /// Name used when tagging routes mounted from this pattern
    ///
    /// Rendered with the default syntax whatever the pattern was translated
    /// with, so the same file gets the same tag on every host.
    ///
    /// ```
    /// use autoroutes_router::{translate_with, Syntax};
    ///
    /// let pattern = translate_with("files/[[...path]]", &Syntax::axum()).unwrap();
    /// assert_eq!(pattern.tag(), "/files/*path");
    /// ```
    pub fn tag(&self) -> String {
        self.render(&Syntax::default())
    }

    /// Renders the same segments with another router syntax
    ///
    /// # Examples
    ///
    /// ```
    /// use autoroutes_router::{translate, Syntax};
    ///
    /// let pattern = translate("files/[[...path]]").unwrap();
    /// assert_eq!(pattern.path(), "/files/*path");
    /// assert_eq!(pattern.render(&Syntax::axum()), "/files/*path?");
    /// ```
    pub fn render(&self, syntax: &Syntax) -> String {
        parser::render(&self.segments, syntax)
    }

    /// Matches a concrete URL path (case-sensitive), extracting parameters
    ///
    /// Catch-all parameters bind their segments joined with `/`; an optional
    /// catch-all that matched nothing binds the empty string.
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        matcher::match_segments(&self.segments, &path_segments, HashMap::new())
    }
}

impl PartialEq for RoutePattern {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for RoutePattern {}

impl Hash for RoutePattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
