use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{LoadError, LoadResult};

/// Resolve a caller-supplied relative filename under the content root.
///
/// Resolution is lexical: `.` components are dropped and `..` removes the
/// previous component. The result always stays inside `root`.
///
/// # Errors
/// `LoadError::PathEscapesRoot` when `relative` is empty, absolute, carries a
/// drive prefix, or uses `..` to climb above the root. No filesystem access
/// happens before this check.
///
/// Symlinks are not followed here; [`confine_to_root`] does that before a read.
pub fn resolve_within_root(root: &Path, relative: impl AsRef<Path>) -> LoadResult<PathBuf> {
    let relative = relative.as_ref();
    let escapes = || LoadError::PathEscapesRoot { requested: relative.to_path_buf() };

    let mut normalized = PathBuf::new();
    let mut depth = 0usize;

    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                normalized.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(escapes());
                }
                normalized.pop();
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return Err(escapes()),
        }
    }

    if depth == 0 {
        return Err(escapes());
    }

    let resolved = root.join(normalized);
    debug!("Resolved {} to {}", relative.display(), resolved.display());
    Ok(resolved)
}

/// Follow symlinks in a lexically resolved path and check it still lands under `root`.
///
/// Returns the canonical path to read from.
///
/// # Errors
/// - `FileAccess` with the unmodified `io::Error` when either path cannot be canonicalized
/// - `PathEscapesRoot` when the canonical path is outside the canonical root
pub fn confine_to_root(root: &Path, resolved: &Path, requested: &Path) -> LoadResult<PathBuf> {
    let canonical = std::fs::canonicalize(resolved).map_err(|source| access_error(resolved, source))?;
    let canonical_root = std::fs::canonicalize(root).map_err(|source| access_error(root, source))?;
    check_contained(canonical, &canonical_root, requested)
}

/// Async counterpart of [`confine_to_root`]
pub async fn confine_to_root_async(
    root: &Path,
    resolved: &Path,
    requested: &Path,
) -> LoadResult<PathBuf> {
    let canonical = tokio::fs::canonicalize(resolved)
        .await
        .map_err(|source| access_error(resolved, source))?;
    let canonical_root = tokio::fs::canonicalize(root)
        .await
        .map_err(|source| access_error(root, source))?;
    check_contained(canonical, &canonical_root, requested)
}

fn access_error(path: &Path, source: std::io::Error) -> LoadError {
    warn!("Failed to resolve {}: {}", path.display(), source);
    LoadError::FileAccess { path: path.to_path_buf(), source }
}

fn check_contained(canonical: PathBuf, canonical_root: &Path, requested: &Path) -> LoadResult<PathBuf> {
    if !canonical.starts_with(canonical_root) {
        warn!(
            "Resource {} resolves outside the content root: {}",
            requested.display(),
            canonical.display()
        );
        return Err(LoadError::PathEscapesRoot { requested: requested.to_path_buf() });
    }
    Ok(canonical)
}
