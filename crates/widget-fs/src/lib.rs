//! Filesystem layer for widget asset synchronization
//!
//! Provides atomic I/O, cycle-safe directory walking, widget source
//! classification and tolerant resolution of user-supplied asset paths.

pub mod checksum;
pub mod classify;
pub mod config;
pub mod error;
pub mod io;
pub mod resolve;
pub mod walk;

pub use classify::{Confidence, WidgetFileCandidate, classify, classify_file};
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use resolve::{
    AssetValidator, ManifestValidator, ResourceDirValidator, SourceKind, SourceLocation,
    WidgetSourceValidator, resolve,
};
pub use walk::{DirWalker, WalkEntry};
