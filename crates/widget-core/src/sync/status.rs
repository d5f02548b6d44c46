//! Status types for SyncEngine inspection
//!
//! Describes how each configured asset resolves without writing anything.

use std::fmt;
use std::path::PathBuf;

use widget_fs::{SourceLocation, WidgetFileCandidate};

/// The three kinds of widget asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    WidgetSources,
    Manifest,
    Resources,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WidgetSources => "widget sources",
            Self::Manifest => "manifest",
            Self::Resources => "resources",
        })
    }
}

/// Resolution result for one configured asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetStatus {
    pub kind: AssetKind,
    /// Path as configured
    pub configured: PathBuf,
    /// Where resolution landed, if anywhere
    pub resolved: Option<SourceLocation>,
    /// Whether the configured path is the default
    pub is_default: bool,
}

/// Report from a status inspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub package: String,
    pub uses_custom_paths: bool,
    pub assets: Vec<AssetStatus>,
    /// Widget sources that a native install would pick up
    pub widget_files: Vec<WidgetFileCandidate>,
}

impl StatusReport {
    /// Whether every asset resolved.
    pub fn is_complete(&self) -> bool {
        self.assets.iter().all(|a| a.resolved.is_some())
    }

    pub fn asset(&self, kind: AssetKind) -> Option<&AssetStatus> {
        self.assets.iter().find(|a| a.kind == kind)
    }
}
