//! Plugin options and their on-disk configuration

mod options;

pub use options::{
    DEFAULT_FILE_MATCH_PATTERN, DEFAULT_MANIFEST_PATH, DEFAULT_RES_PATH, DEFAULT_WIDGET_DIR,
    DEFAULT_WIDGET_FILES_PATH, ManifestSettings, SyncOptions,
};
