// File: src/error.rs
// Purpose: Failure taxonomy of a discovery pass

use std::path::PathBuf;

use autoroutes_router::InvalidSegmentError;
use thiserror::Error;

/// Everything that can abort an autoload pass
///
/// None of these are retried: they describe a bad directory, a malformed
/// route file or a broken module, and the host is expected to treat them as
/// a startup failure.
#[derive(Debug, Error)]
pub enum AutorouteError {
    #[error("routes directory {0:?} does not exist")]
    DirectoryNotFound(PathBuf),

    #[error("routes path {0:?} is not a directory")]
    NotADirectory(PathBuf),

    #[error("failed to scan routes directory {root:?}")]
    Scan {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error(transparent)]
    InvalidSegment(#[from] InvalidSegmentError),

    /// One module failed to load; the whole batch is discarded
    #[error("failed to load route module `{key}` from {file:?}")]
    ModuleLoad {
        key: String,
        file: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// Raised by the host router while registering; the original error is
    /// the source and can be downcast to the host's own type
    #[error("host router rejected a route")]
    Registration(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl AutorouteError {
    /// Downcasts a registration failure to the host router's error type
    pub fn registration<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            AutorouteError::Registration(source) => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}

pub type Result<T, E = AutorouteError> = std::result::Result<T, E>;
