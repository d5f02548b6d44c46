//! Orchestration layer for widget asset synchronization
//!
//! Drives the filesystem and content crates through the two sync passes:
//!
//! - **Sync to defaults**: assets configured at custom locations are mirrored
//!   into the version-controlled `widgets/android/` directory
//! - **Native install**: widget sources, resources and manifest entries are
//!   installed into the generated Android project
//!
//! # Architecture
//!
//! ```text
//!            widget-cli
//!                |
//!           widget-core
//!                |
//!       +--------+--------+
//!       |                 |
//!   widget-fs      widget-content
//! ```

pub mod config;
pub mod copy;
pub mod error;
pub mod plugin;
pub mod sync;

pub use config::{ManifestSettings, SyncOptions};
pub use copy::{ConflictReason, CopyConflict, CopyStats, copy_tree};
pub use error::{Error, Result};
pub use plugin::{AndroidConfig, HostConfig, ModRequest, apply_plugin, apply_plugin_with_report};
pub use sync::{AssetKind, AssetStatus, StatusReport, SyncEngine, SyncReport};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn manifest_not_found_displays_path() {
        let error = Error::ManifestNotFound {
            path: PathBuf::from("/app/android/app/src/main/AndroidManifest.xml"),
        };

        let display = error.to_string();
        assert!(
            display.contains("/app/android/app/src/main/AndroidManifest.xml"),
            "Error display should contain the path, got: {display}"
        );
    }

    #[test]
    fn missing_package_mentions_config_key() {
        assert!(Error::MissingPackage.to_string().contains("android.package"));
    }
}
