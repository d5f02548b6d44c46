//! [`TestProject`] builder for widget sync scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures;

/// A temporary app project with helpers for laying out widget assets.
///
/// # Example
///
/// ```rust,no_run
/// use widget_test_utils::TestProject;
///
/// let project = TestProject::new().with_default_widget().with_host_manifest();
/// project.assert_file_exists("widgets/android/MyWidget.kt");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty project directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root path of the project.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Generated native project root (`<root>/android`).
    pub fn platform_root(&self) -> PathBuf {
        self.root().join("android")
    }

    /// Write `content` to `path` relative to the root, creating parents.
    pub fn write(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        full_path
    }

    /// Read a file relative to the root.
    pub fn read(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Lay out the fixture widget under `dir`.
    pub fn with_widget_at(self, dir: &str) -> Self {
        for (rel, content) in fixtures::widget_files() {
            self.write(&format!("{dir}/{rel}"), content);
        }
        self
    }

    /// Lay out the fixture widget in the default `widgets/android` location.
    pub fn with_default_widget(self) -> Self {
        self.with_widget_at("widgets/android")
    }

    /// Write the fixture host manifest into the native project.
    pub fn with_host_manifest(self) -> Self {
        self.write("android/app/src/main/AndroidManifest.xml", fixtures::HOST_MANIFEST);
        self
    }

    /// Host config JSON pointing at this project.
    pub fn host_config_json(&self) -> String {
        fixtures::HOST_CONFIG
            .replace("__PROJECT_ROOT__", &json_path(self.root()))
            .replace("__PLATFORM_ROOT__", &json_path(&self.platform_root()))
    }

    /// Assert that `path` (relative to the root) exists.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` contains `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {path} does not contain expected content.\nExpected: {content}\nActual: {file_content}"
        );
    }
}

fn json_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "\\\\")
}
