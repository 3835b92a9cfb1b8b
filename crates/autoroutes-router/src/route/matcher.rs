/// Parameter extraction for translated routes
///
/// Walks pattern segments and path segments simultaneously using a
/// tail-recursive helper, one segment pair at a time.

use std::collections::HashMap;

use super::pattern::PatternSegment;

/// Matches path segments against pattern segments (case-sensitive)
///
/// Catch-alls are always the final pattern segment, so they consume whatever
/// is left of the path: at least one segment for a required catch-all, any
/// number for an optional one.
pub fn match_segments(
    pattern: &[PatternSegment],
    path: &[&str],
    mut params: HashMap<String, String>,
) -> Option<HashMap<String, String>> {
    match (pattern.split_first(), path.split_first()) {
        // Base case: both consumed
        (None, None) => Some(params),
        (None, Some(_)) => None,

        (Some((PatternSegment::CatchAll(name), _)), _) => {
            if path.is_empty() {
                return None;
            }
            params.insert(name.clone(), path.join("/"));
            Some(params)
        }
        (Some((PatternSegment::OptionalCatchAll(name), _)), _) => {
            params.insert(name.clone(), path.join("/"));
            Some(params)
        }

        // Remaining segments need exactly one path segment each
        (Some(_), None) => None,
        (Some((PatternSegment::Dynamic(name), rest)), Some((segment, tail))) => {
            params.insert(name.clone(), segment.to_string());
            match_segments(rest, tail, params)
        }
        (Some((PatternSegment::Static(text), rest)), Some((segment, tail))) => {
            if text.as_str() != *segment {
                return None;
            }
            match_segments(rest, tail, params)
        }
    }
}
