use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::LoaderConfig;
use crate::error::{LoadError, LoadResult};
use crate::identifier::PartIdentifier;
use crate::paths::{confine_to_root, confine_to_root_async, resolve_within_root};
use crate::shaped::ShapedResource;

/// Ordered segments of a resource split on one delimiter.
///
/// Always holds at least one segment: content without the delimiter comes back whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SplitResult(Vec<String>);

impl SplitResult {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a result of [`split_content`], which yields at least one segment
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of delimiter occurrences that produced this split
    pub fn part_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl IntoIterator for SplitResult {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SplitResult {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<SplitResult> for Vec<String> {
    fn from(result: SplitResult) -> Self {
        result.0
    }
}

/// Split `content` on `delimiter`, keeping empty segments and order
///
/// # Example
/// ```
/// use resource_parts::split_content;
/// let parts = split_content("A part--1 B part--1 C", "part--1");
/// assert_eq!(parts.segments(), ["A ", " B ", " C"]);
/// ```
pub fn split_content(content: &str, delimiter: &str) -> SplitResult {
    SplitResult(content.split(delimiter).map(str::to_string).collect())
}

/// Loads resource files from a content root and splits them into parts
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    config: LoaderConfig,
}

impl ResourceLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn with_content_root(content_root: impl Into<PathBuf>) -> Self {
        Self::new(LoaderConfig::with_content_root(content_root))
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Resolve `filename` under the content root without touching the filesystem
    pub fn resolve(&self, filename: impl AsRef<Path>) -> LoadResult<PathBuf> {
        resolve_within_root(&self.config.content_root, filename)
    }

    /// Resolve `filename` and follow symlinks, rejecting targets outside the content root
    pub fn locate(&self, filename: impl AsRef<Path>) -> LoadResult<PathBuf> {
        let requested = filename.as_ref();
        let resolved = self.resolve(requested)?;
        confine_to_root(&self.config.content_root, &resolved, requested)
    }

    /// Async counterpart of [`ResourceLoader::locate`]
    pub async fn locate_async(&self, filename: impl AsRef<Path>) -> LoadResult<PathBuf> {
        let requested = filename.as_ref();
        let resolved = self.resolve(requested)?;
        confine_to_root_async(&self.config.content_root, &resolved, requested).await
    }

    /// Read the whole resource as UTF-8 text
    pub fn read_content(&self, filename: impl AsRef<Path>) -> LoadResult<String> {
        let path = self.locate(filename)?;
        debug!("Reading resource: {}", path.display());

        std::fs::read_to_string(&path).map_err(|source| {
            warn!("Failed to read resource {}: {}", path.display(), source);
            LoadError::FileAccess { path, source }
        })
    }

    /// Read `filename` and split it on the delimiter `identifier` names.
    ///
    /// A delimiter missing from the content is not an error; the result is then
    /// the whole content as a single segment.
    ///
    /// # Errors
    /// - `PathEscapesRoot` if `filename` leaves the content root, directly or through a symlink
    /// - `EmptyDelimiter` for an empty literal delimiter
    /// - `FileAccess` if the file cannot be read
    pub fn load_resources(
        &self,
        filename: impl AsRef<Path>,
        identifier: &PartIdentifier,
    ) -> LoadResult<SplitResult> {
        let delimiter = self.checked_delimiter(identifier)?;
        let content = self.read_content(filename)?;
        Ok(self.split_logged(&content, &delimiter))
    }

    /// Async counterpart of [`ResourceLoader::load_resources`]
    pub async fn load_resources_async(
        &self,
        filename: impl AsRef<Path>,
        identifier: &PartIdentifier,
    ) -> LoadResult<SplitResult> {
        let delimiter = self.checked_delimiter(identifier)?;
        let path = self.locate_async(filename).await?;
        debug!("Reading resource asynchronously: {}", path.display());

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| {
                warn!("Failed to read resource {}: {}", path.display(), source);
                LoadError::FileAccess { path, source }
            })?;

        Ok(self.split_logged(&content, &delimiter))
    }

    /// The segment at `index` of the split, or `None` when the split is shorter
    pub fn load_part(
        &self,
        filename: impl AsRef<Path>,
        identifier: &PartIdentifier,
        index: usize,
    ) -> LoadResult<Option<String>> {
        let parts = self.load_resources(filename, identifier)?;
        let part = parts.into_vec().into_iter().nth(index);
        if part.is_none() {
            debug!("No segment {} for {}", index, identifier);
        }
        Ok(part)
    }

    /// Parse numbered part `number` into a [`ShapedResource`].
    ///
    /// The part runs from its marker to the next numbered marker (or end of file).
    /// A marker followed by another digit belongs to a different part, so
    /// `part--1` never matches inside `part--12`.
    /// Returns `None` when the marker does not occur.
    pub fn load_shaped(
        &self,
        filename: impl AsRef<Path>,
        number: u64,
    ) -> LoadResult<Option<ShapedResource>> {
        let content = self.read_content(filename)?;
        let prefix = self.config.part_prefix.as_str();
        let marker = PartIdentifier::Numbered(number).delimiter(prefix).into_owned();

        let Some(start) = find_marker(&content, &marker) else {
            debug!("Part marker {} not found", marker);
            return Ok(None);
        };

        let body = &content[start + marker.len()..];
        let body = match body.find(prefix) {
            Some(end) if !prefix.is_empty() => &body[..end],
            _ => body,
        };

        Ok(Some(ShapedResource::parse(body)))
    }

    fn checked_delimiter(&self, identifier: &PartIdentifier) -> LoadResult<String> {
        let delimiter = identifier.delimiter(&self.config.part_prefix);
        if delimiter.is_empty() {
            return Err(LoadError::EmptyDelimiter);
        }
        Ok(delimiter.into_owned())
    }

    fn split_logged(&self, content: &str, delimiter: &str) -> SplitResult {
        let parts = split_content(content, delimiter);
        debug!(
            delimiter,
            segments = parts.len(),
            bytes = content.len(),
            "Split resource content"
        );
        parts
    }
}

/// Byte offset of the first `marker` not immediately followed by an ASCII digit
fn find_marker(content: &str, marker: &str) -> Option<usize> {
    content
        .match_indices(marker)
        .map(|(offset, _)| offset)
        .find(|offset| {
            !content[offset + marker.len()..]
                .bytes()
                .next()
                .is_some_and(|b| b.is_ascii_digit())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn loader_with(files: &[(&str, &str)]) -> (TempDir, ResourceLoader) {
        let temp_dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = temp_dir.path().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, content).unwrap();
        }
        let loader = ResourceLoader::with_content_root(temp_dir.path());
        (temp_dir, loader)
    }

    #[test]
    fn test_split_numbered_example() {
        let parts = split_content("A part--1 B part--1 C", "part--1");
        assert_eq!(parts.segments(), ["A ", " B ", " C"]);
        assert_eq!(parts.part_count(), 2);
    }

    #[test]
    fn test_split_keeps_empty_segments() {
        let parts = split_content("||a||", "|");
        assert_eq!(parts.segments(), ["", "", "a", "", ""]);
    }

    #[test]
    fn test_split_empty_content() {
        let parts = split_content("", "part--1");
        assert_eq!(parts.segments(), [""]);
        assert!(!parts.is_empty());
        assert_eq!(parts.part_count(), 0);
    }

    #[test]
    fn test_load_resources_literal() {
        let (_dir, loader) = loader_with(&[("a.txt", "XdelimY")]);
        let parts = loader.load_resources("a.txt", &PartIdentifier::literal("delim")).unwrap();
        assert_eq!(parts.segments(), ["X", "Y"]);
    }

    #[test]
    fn test_load_resources_silent_miss() {
        let (_dir, loader) = loader_with(&[("a.txt", "no markers here")]);
        let parts = loader.load_resources("a.txt", &PartIdentifier::Numbered(9)).unwrap();
        assert_eq!(parts.segments(), ["no markers here"]);
    }

    #[test]
    fn test_empty_literal_delimiter_is_rejected() {
        let (_dir, loader) = loader_with(&[("a.txt", "abc")]);
        let result = loader.load_resources("a.txt", &PartIdentifier::literal(""));
        assert!(matches!(result, Err(LoadError::EmptyDelimiter)));
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let (_dir, loader) = loader_with(&[]);
        let err = loader
            .load_resources("missing.txt", &PartIdentifier::Numbered(1))
            .unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }

    #[test]
    fn test_load_part_out_of_range_is_none() {
        let (_dir, loader) = loader_with(&[("a.txt", "one|two")]);
        let id = PartIdentifier::literal("|");
        assert_eq!(loader.load_part("a.txt", &id, 1).unwrap().as_deref(), Some("two"));
        assert_eq!(loader.load_part("a.txt", &id, 2).unwrap(), None);
    }

    #[test]
    fn test_find_marker_skips_longer_numbers() {
        let content = "part--12 twelve part--1 one";
        assert_eq!(find_marker(content, "part--1"), Some(16));
        assert_eq!(find_marker("part--10", "part--1"), None);
        assert_eq!(find_marker("end part--1", "part--1"), Some(4));
    }

    #[test]
    fn test_load_shaped_stops_at_next_part() {
        let content = "part--1\ntype: intro\ntext: Welcome.\npart--2\ntype: outro\ntext: Bye.\n";
        let (_dir, loader) = loader_with(&[("story.txt", content)]);

        let first = loader.load_shaped("story.txt", 1).unwrap().unwrap();
        assert_eq!(first.kind.as_deref(), Some("intro"));
        assert_eq!(first.text.as_deref(), Some("Welcome."));

        let second = loader.load_shaped("story.txt", 2).unwrap().unwrap();
        assert_eq!(second.kind.as_deref(), Some("outro"));
        assert_eq!(second.text.as_deref(), Some("Bye."));

        assert!(loader.load_shaped("story.txt", 3).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_async_matches_sync() {
        let (_dir, loader) = loader_with(&[("a.txt", "A part--1 B part--1 C")]);
        let id = PartIdentifier::Numbered(1);

        let sync = loader.load_resources("a.txt", &id).unwrap();
        let async_result = loader.load_resources_async("a.txt", &id).await.unwrap();
        assert_eq!(sync, async_result);
    }

    #[tokio::test]
    async fn test_async_missing_file() {
        let (_dir, loader) = loader_with(&[]);
        let result = loader
            .load_resources_async("missing.txt", &PartIdentifier::Numbered(1))
            .await;
        assert!(matches!(result, Err(LoadError::FileAccess { .. })));
    }
}
