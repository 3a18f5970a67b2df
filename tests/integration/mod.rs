#![allow(dead_code)]

// Integration test utilities and common code
// WHY: every test needs its own content root on disk

use resource_parts::{LoaderConfig, ResourceLoader};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Story-style resource with three numbered, labeled parts
pub const STORY_TEXT: &str = "Chapter header
part--1
type: narration
text: The hall is quiet.
Dust hangs in the air.
effect: fade-in
part--2
type: dialogue
text: \"Who's there?\"
audio: whisper.ogg
part--3
type: scene
text: A door opens.
photo: door.png
";

/// Test fixture holding a temporary content root with a sibling directory outside it
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub content_root: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let content_root = temp_dir.path().join("content");
        fs::create_dir_all(&content_root).expect("Failed to create content root");

        Self { temp_dir, content_root }
    }

    /// Write a resource file under the content root
    pub fn create_resource<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.content_root.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write resource file");
        file_path
    }

    /// Write a file next to (not inside) the content root
    pub fn create_outside_file(&self, name: &str, content: &str) -> PathBuf {
        let file_path = self.temp_dir.path().join(name);
        fs::write(&file_path, content).expect("Failed to write outside file");
        file_path
    }

    pub fn loader(&self) -> ResourceLoader {
        ResourceLoader::new(LoaderConfig::with_content_root(&self.content_root))
    }
}
