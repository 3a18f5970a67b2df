use std::path::PathBuf;

/// Default directory resource files are resolved against
pub const DEFAULT_CONTENT_ROOT: &str = "content";

/// Default prefix for numbered part markers (`part--1`, `part--2`, ...)
pub const DEFAULT_PART_PREFIX: &str = "part--";

/// Configuration for resource loading behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Base directory every requested filename is resolved under
    pub content_root: PathBuf,
    /// Prefix joined with a part number to build its delimiter
    pub part_prefix: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from(DEFAULT_CONTENT_ROOT),
            part_prefix: DEFAULT_PART_PREFIX.to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn with_content_root(content_root: impl Into<PathBuf>) -> Self {
        Self {
            content_root: content_root.into(),
            ..Default::default()
        }
    }
}
