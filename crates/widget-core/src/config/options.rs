//! Sync options
//!
//! Option names match the keys the host build passes to the plugin, so the
//! same struct deserializes from plugin JSON and from a `widget-sync.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};
use widget_content::MergeOptions;
use widget_content::manifest::DEFAULT_ELEMENTS;
use widget_fs::ConfigStore;

/// Version-controlled directory holding the canonical widget assets.
pub const DEFAULT_WIDGET_DIR: &str = "widgets/android";
pub const DEFAULT_WIDGET_FILES_PATH: &str = "widgets/android/MyWidget.kt";
pub const DEFAULT_MANIFEST_PATH: &str = "widgets/android/AndroidManifest.xml";
pub const DEFAULT_RES_PATH: &str = "widgets/android/res";
pub const DEFAULT_FILE_MATCH_PATTERN: &str = "Widget";

/// Options controlling where widget assets are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncOptions {
    /// Widget Kotlin source file or directory
    pub widget_files_path: PathBuf,
    /// Widget manifest fragment
    pub manifest_path: PathBuf,
    /// Widget resource directory
    pub res_path: PathBuf,
    /// Extra source directories installed as sub-packages
    pub include_directories: Vec<PathBuf>,
    /// Case-insensitive file name pattern marking widget sources
    pub file_match_pattern: String,
    /// Manifest merge settings
    pub manifest: ManifestSettings,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            widget_files_path: PathBuf::from(DEFAULT_WIDGET_FILES_PATH),
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            res_path: PathBuf::from(DEFAULT_RES_PATH),
            include_directories: Vec::new(),
            file_match_pattern: DEFAULT_FILE_MATCH_PATTERN.to_string(),
            manifest: ManifestSettings::default(),
        }
    }
}

impl SyncOptions {
    /// Load options from a `.toml`, `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let options: Self = ConfigStore::new().load(path)?;
        tracing::debug!(path = %path.display(), "Loaded sync options");
        Ok(options)
    }

    /// Whether any asset path differs from its default.
    pub fn uses_custom_paths(&self) -> bool {
        self.widget_files_path != Path::new(DEFAULT_WIDGET_FILES_PATH)
            || self.manifest_path != Path::new(DEFAULT_MANIFEST_PATH)
            || self.res_path != Path::new(DEFAULT_RES_PATH)
    }

    /// Reject options that would write outside the native source tree.
    pub fn validate(&self) -> Result<()> {
        for dir in &self.include_directories {
            if dir.components().any(|c| matches!(c, Component::ParentDir)) {
                return Err(Error::invalid_options(format!(
                    "include directory {} must not contain '..'",
                    dir.display()
                )));
            }
            if dir.as_os_str().is_empty() {
                return Err(Error::invalid_options("include directory must not be empty"));
            }
        }
        if self.manifest.elements_to_merge.iter().any(|e| e.trim().is_empty()) {
            return Err(Error::invalid_options("manifest.elementsToMerge contains an empty name"));
        }
        Ok(())
    }
}

/// Manifest merge settings as they appear in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManifestSettings {
    pub elements_to_merge: Vec<String>,
    pub merge_application_elements: bool,
    pub merge_manifest_elements: bool,
}

impl Default for ManifestSettings {
    fn default() -> Self {
        Self {
            elements_to_merge: DEFAULT_ELEMENTS.iter().map(|e| e.to_string()).collect(),
            merge_application_elements: true,
            merge_manifest_elements: true,
        }
    }
}

impl ManifestSettings {
    /// Merge options with the standard name-dedup rules registered.
    pub fn merge_options(&self) -> MergeOptions {
        let mut options = MergeOptions::for_elements(self.elements_to_merge.iter().cloned())
            .with_default_rules();
        options.merge_application_elements = self.merge_application_elements;
        options.merge_manifest_elements = self.merge_manifest_elements;
        options
    }
}
