/// Segment classification for file-system route keys
///
/// Pure functional parsing of a single key segment into a typed segment.
/// All functions are **pure**: same input → same output, no side effects.

use crate::SegmentErrorKind;

/// Represents the different kinds of route key segments
///
/// Functional sum type for pattern matching route segments.
/// Each parameter variant carries the parameter name.
///
/// # Examples
///
/// ```
/// use autoroutes_router::{classify_segment, PatternSegment};
///
/// assert_eq!(classify_segment("about"), Ok(PatternSegment::Static("about".into())));
/// assert_eq!(classify_segment("[id]"), Ok(PatternSegment::Dynamic("id".into())));
/// assert_eq!(classify_segment("[...slug]"), Ok(PatternSegment::CatchAll("slug".into())));
/// assert_eq!(
///     classify_segment("[[...slug]]"),
///     Ok(PatternSegment::OptionalCatchAll("slug".into()))
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternSegment {
    /// Literal text, matched case-sensitively
    Static(String),
    /// Dynamic segment: `[id]`
    Dynamic(String),
    /// Required catch-all: `[...slug]` (one or more segments)
    CatchAll(String),
    /// Optional catch-all: `[[...slug]]` (zero or more segments)
    OptionalCatchAll(String),
}

impl PatternSegment {
    /// Parameter name bound by this segment, `None` for static text
    pub fn param_name(&self) -> Option<&str> {
        match self {
            PatternSegment::Static(_) => None,
            PatternSegment::Dynamic(name)
            | PatternSegment::CatchAll(name)
            | PatternSegment::OptionalCatchAll(name) => Some(name),
        }
    }

    /// Whether this segment consumes the rest of the path
    pub fn is_catch_all(&self) -> bool {
        matches!(
            self,
            PatternSegment::CatchAll(_) | PatternSegment::OptionalCatchAll(_)
        )
    }
}

/// Classifies a segment into a pattern segment (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Optional catch-all**: `[[...name]]`
/// 2. **Catch-all**: `[...name]`
/// 3. **Dynamic**: `[name]`
/// 4. **Static**: text without any bracket
///
/// Anything else containing a bracket is rejected with
/// [`SegmentErrorKind::Unbalanced`]; an empty name with
/// [`SegmentErrorKind::EmptyName`].
///
/// # Examples
///
/// ```
/// use autoroutes_router::{classify_segment, SegmentErrorKind};
///
/// assert_eq!(classify_segment("[id"), Err(SegmentErrorKind::Unbalanced));
/// assert_eq!(classify_segment("[[id]]"), Err(SegmentErrorKind::Unbalanced));
/// assert_eq!(classify_segment("[]"), Err(SegmentErrorKind::EmptyName));
/// ```
pub fn classify_segment(segment: &str) -> Result<PatternSegment, SegmentErrorKind> {
    // Optional catch-all: [[...name]] (double brackets)
    if let Some(inner) = segment.strip_prefix("[[") {
        return inner
            .strip_suffix("]]")
            .and_then(|inner| inner.strip_prefix("..."))
            .ok_or(SegmentErrorKind::Unbalanced)
            .and_then(param_name)
            .map(PatternSegment::OptionalCatchAll);
    }

    match segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(inner) => match inner.strip_prefix("...") {
            Some(name) => param_name(name).map(PatternSegment::CatchAll),
            None => param_name(inner).map(PatternSegment::Dynamic),
        },
        None if has_bracket(segment) => Err(SegmentErrorKind::Unbalanced),
        None => Ok(PatternSegment::Static(segment.to_string())),
    }
}

/// Validates the text between the brackets
fn param_name(name: &str) -> Result<String, SegmentErrorKind> {
    if has_bracket(name) {
        Err(SegmentErrorKind::Unbalanced)
    } else if name.is_empty() {
        Err(SegmentErrorKind::EmptyName)
    } else {
        Ok(name.to_string())
    }
}

fn has_bracket(text: &str) -> bool {
    text.contains(|c: char| c == '[' || c == ']')
}
