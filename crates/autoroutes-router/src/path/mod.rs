/// Path utilities for mount prefixes and joined route paths
///
/// Prefixes come from user configuration and group nesting, so they arrive
/// with stray slashes. Everything handed to a host router goes through
/// [`normalize_path`] first.

use std::borrow::Cow;

/// Whether a path is already canonical
///
/// Canonical means: starts with `/`, no `//`, no `\`, and no trailing `/`
/// unless the path is the root itself.
///
/// # Examples
///
/// ```
/// use autoroutes_router::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/posts/:id"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("api"));
/// assert!(!is_valid_path("/api/"));
/// assert!(!is_valid_path("/api//posts"));
/// ```
pub fn is_valid_path(path: &str) -> bool {
    if !path.starts_with('/') || path.contains("//") || path.contains('\\') {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

/// Normalizes a path to canonical form
///
/// Returns `Cow::Borrowed` when the input is already canonical.
///
/// # Examples
///
/// ```
/// use autoroutes_router::path::normalize_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_path("/api"), Cow::Borrowed("/api")));
/// assert_eq!(normalize_path("api/"), "/api");
/// assert_eq!(normalize_path("\\api\\v1"), "/api/v1");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let segments: Vec<&str> = path
        .split(|c: char| c == '/' || c == '\\')
        .filter(|s| !s.is_empty())
        .collect();

    if segments.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", segments.join("/")))
    }
}

/// Joins a mount prefix and a route path into one canonical path
///
/// The root pattern under a prefix collapses to the prefix itself.
///
/// # Examples
///
/// ```
/// use autoroutes_router::path::join_paths;
///
/// assert_eq!(join_paths("", "/"), "/");
/// assert_eq!(join_paths("", "/posts/:id"), "/posts/:id");
/// assert_eq!(join_paths("/api", "/"), "/api");
/// assert_eq!(join_paths("api/", "/posts"), "/api/posts");
/// assert_eq!(join_paths("/api/posts", ""), "/api/posts");
/// ```
pub fn join_paths(prefix: &str, path: &str) -> String {
    normalize_path(&format!("{}/{}", prefix, path)).into_owned()
}
