// File: src/index.rs
// Purpose: One-shot scan of a routes directory into route keys

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{AutorouteError, Result};

/// One route file found under the routes root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// Path relative to the root, extension removed, like `/posts/[id]`
    pub key: String,
    /// Absolute path of the file
    pub file: PathBuf,
}

/// Route keys of a directory tree, in walk order
#[derive(Debug, Clone, Default)]
pub struct RouteIndex {
    root: PathBuf,
    entries: Vec<RouteEntry>,
}

impl RouteIndex {
    /// Scans `root` recursively
    ///
    /// Entries are sorted by file name at every level and hidden entries
    /// (names starting with `.`) are skipped along with their contents. With
    /// a non-empty `extensions` only files carrying one of them are indexed.
    pub fn scan(root: impl AsRef<Path>, extensions: &[String]) -> Result<Self> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(AutorouteError::DirectoryNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(AutorouteError::NotADirectory(root.to_path_buf()));
        }

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|source| AutorouteError::Scan {
                root: root.to_path_buf(),
                source,
            })?;

            if !entry.file_type().is_file() || !has_extension(entry.path(), extensions) {
                continue;
            }

            let key = route_key(root, entry.path());
            tracing::debug!("Indexed {} -> {:?}", key, entry.path());
            entries.push(RouteEntry {
                key,
                file: entry.into_path(),
            });
        }

        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    /// File backing `key`
    pub fn get(&self, key: &str) -> Option<&Path> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.file.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for RouteIndex {
    type Item = RouteEntry;
    type IntoIter = std::vec::IntoIter<RouteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted.trim_start_matches('.') == ext))
}

/// `<root>/posts/[id].rs` → `/posts/[id]`
fn route_key(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file).with_extension("");
    let joined = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    format!("/{}", joined)
}
