use std::io;
use std::path::PathBuf;

/// Errors produced while loading a resource file
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The resolved file is missing, unreadable, or not valid UTF-8.
    /// The platform error is kept unmodified as the source.
    #[error("Failed to read resource {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The requested filename is absolute or climbs above the content root
    #[error("Resource path escapes the content root: {}", .requested.display())]
    PathEscapesRoot { requested: PathBuf },

    #[error("Delimiter must not be empty")]
    EmptyDelimiter,
}

impl LoadError {
    /// The `io::ErrorKind` of a file access failure, if this is one
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            LoadError::FileAccess { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

pub type LoadResult<T> = Result<T, LoadError>;
