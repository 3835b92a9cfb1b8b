/// Route key translation
///
/// Pure functional parser that transforms file-system route keys into
/// [`RoutePattern`]s. All functions are **pure**: same input → same output.

use std::collections::HashSet;

use super::pattern::{classify_segment, PatternSegment};
use super::RoutePattern;
use crate::{InvalidSegmentError, SegmentErrorKind};

/// Placeholder conventions of the router a pattern is rendered for
///
/// The default matches the common `:name` / `*name` style, in which a
/// required and an optional catch-all render identically.
/// [`Syntax::axum`] marks optional catch-alls with a trailing `?` so the axum
/// adapter can register the bare prefix as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syntax {
    /// Prefix for dynamic segments (`:` → `:id`)
    pub param: &'static str,
    /// Prefix for catch-all segments (`*` → `*slug`)
    pub catch_all: &'static str,
    /// Appended to optional catch-alls
    pub optional_catch_all_suffix: &'static str,
}

impl Syntax {
    pub const fn new(param: &'static str, catch_all: &'static str) -> Self {
        Self {
            param,
            catch_all,
            optional_catch_all_suffix: "",
        }
    }

    pub const fn with_optional_suffix(mut self, suffix: &'static str) -> Self {
        self.optional_catch_all_suffix = suffix;
        self
    }

    /// Syntax understood by `AxumHost`
    pub const fn axum() -> Self {
        Self::new(":", "*").with_optional_suffix("?")
    }
}

impl Default for Syntax {
    fn default() -> Self {
        Self::new(":", "*")
    }
}

/// Accumulator for fold-based parsing
#[derive(Default)]
struct ParseState {
    segments: Vec<PatternSegment>,
    names: HashSet<String>,
}

impl ParseState {
    fn with_segment(mut self, segment: PatternSegment) -> Result<Self, SegmentErrorKind> {
        if let Some(name) = segment.param_name() {
            if !self.names.insert(name.to_string()) {
                return Err(SegmentErrorKind::DuplicateParam(name.to_string()));
            }
        }
        self.segments.push(segment);
        Ok(self)
    }
}

/// Splits a key into its meaningful segments
///
/// Empty segments are dropped and a trailing `index` denotes the directory
/// itself, so it contributes nothing.
fn key_segments(key: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = key.split('/').filter(|s| !s.is_empty()).collect();
    if segments.last() == Some(&"index") {
        segments.pop();
    }
    segments
}

/// Processes a single segment and updates the parse state
fn process_segment(
    state: ParseState,
    raw: &str,
    is_last: bool,
) -> Result<ParseState, SegmentErrorKind> {
    let segment = classify_segment(raw)?;
    if segment.is_catch_all() && !is_last {
        return Err(SegmentErrorKind::CatchAllNotLast);
    }
    state.with_segment(segment)
}

/// Translates a route key with the default [`Syntax`]
///
/// # Examples
///
/// ```
/// use autoroutes_router::translate;
///
/// assert_eq!(translate("/about").unwrap().path(), "/about");
/// assert_eq!(translate("/users/[id]").unwrap().path(), "/users/:id");
/// assert_eq!(translate("/docs/[...slug]").unwrap().path(), "/docs/*slug");
/// assert_eq!(translate("/posts/index").unwrap().path(), "/posts");
/// assert_eq!(translate("/index").unwrap().path(), "/");
///
/// assert!(translate("/[...slug]/edit").is_err());
/// ```
pub fn translate(key: &str) -> Result<RoutePattern, InvalidSegmentError> {
    translate_with(key, &Syntax::default())
}

/// Translates a route key, rendering placeholders with `syntax`
///
/// Fails on the first segment that is malformed, on a catch-all that is not
/// the final segment, and on a parameter name used twice.
pub fn translate_with(key: &str, syntax: &Syntax) -> Result<RoutePattern, InvalidSegmentError> {
    let raw_segments = key_segments(key);
    let last = raw_segments.len().saturating_sub(1);

    let state = raw_segments.iter().enumerate().try_fold(
        ParseState::default(),
        |state, (index, raw)| {
            process_segment(state, raw, index == last)
                .map_err(|kind| InvalidSegmentError::new(key, raw, kind))
        },
    )?;

    Ok(RoutePattern::new(key, state.segments, syntax))
}

/// Renders typed segments as a URL pattern, `/` when there are none
pub(crate) fn render(segments: &[PatternSegment], syntax: &Syntax) -> String {
    let path = segments.iter().fold(String::new(), |mut path, segment| {
        path.push('/');
        match segment {
            PatternSegment::Static(text) => path.push_str(text),
            PatternSegment::Dynamic(name) => {
                path.push_str(syntax.param);
                path.push_str(name);
            }
            PatternSegment::CatchAll(name) => {
                path.push_str(syntax.catch_all);
                path.push_str(name);
            }
            PatternSegment::OptionalCatchAll(name) => {
                path.push_str(syntax.catch_all);
                path.push_str(name);
                path.push_str(syntax.optional_catch_all_suffix);
            }
        }
        path
    });

    if path.is_empty() {
        "/".to_string()
    } else {
        path
    }
}
