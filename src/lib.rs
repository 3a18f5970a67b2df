pub mod config;
pub mod error;
pub mod identifier;
pub mod loader;
pub mod paths;
pub mod shaped;

// Re-export main types for convenient access
pub use config::{LoaderConfig, DEFAULT_CONTENT_ROOT, DEFAULT_PART_PREFIX};
pub use error::{LoadError, LoadResult};
pub use identifier::PartIdentifier;
pub use loader::{split_content, ResourceLoader, SplitResult};
pub use paths::{confine_to_root, confine_to_root_async, resolve_within_root};
pub use shaped::ShapedResource;
