use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary source and output trees for site generation tests
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    /// Create a new temporary workspace with empty `input/` and no `output/`
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::create_dir(dir.path().join("input")).expect("Failed to create input dir");
        Self { dir }
    }

    /// Create a file under `input/`, creating parent directories as needed
    pub fn create_file(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.input_dir().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Create an (empty) directory under `input/`
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.input_dir().join(name);
        std::fs::create_dir_all(&path).expect("Failed to create dir");
        path
    }

    pub fn input_dir(&self) -> PathBuf {
        self.dir.path().join("input")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("output")
    }

    /// Path of `name` inside the output tree
    pub fn output(&self, name: &str) -> PathBuf {
        self.output_dir().join(name)
    }

    /// Get workspace root path
    pub fn root_path(&self) -> &Path {
        self.dir.path()
    }
}
