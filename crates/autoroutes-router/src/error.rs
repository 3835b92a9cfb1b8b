use thiserror::Error;

/// Why a single segment of a route key was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentErrorKind {
    /// `[id`, `id]`, `[[id]]`, `a[b]` and similar
    #[error("unbalanced or misplaced brackets")]
    Unbalanced,

    #[error("parameter name is empty")]
    EmptyName,

    /// `[...slug]` or `[[...slug]]` followed by more segments
    #[error("catch-all segment must be the last segment")]
    CatchAllNotLast,

    #[error("parameter `{0}` appears more than once")]
    DuplicateParam(String),
}

/// A route key whose bracket syntax cannot be translated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid segment `{segment}` in route key `{key}`: {kind}")]
pub struct InvalidSegmentError {
    /// The full route key being translated
    pub key: String,
    /// The offending segment
    pub segment: String,
    pub kind: SegmentErrorKind,
}

impl InvalidSegmentError {
    pub(crate) fn new(key: &str, segment: &str, kind: SegmentErrorKind) -> Self {
        Self {
            key: key.to_string(),
            segment: segment.to_string(),
            kind,
        }
    }
}
