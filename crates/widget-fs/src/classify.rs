//! Widget source classification
//!
//! Ranks Kotlin files in a directory by how strongly their name or content
//! indicates a widget implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::walk::sorted_children;

/// Source file extensions considered by the classifier.
pub const SOURCE_EXTENSIONS: &[&str] = &["kt"];

/// Base classes and APIs only a widget implementation references.
pub const STRONG_MARKERS: &[&str] = &[
    "AppWidgetProvider",
    "GlanceAppWidgetReceiver",
    "GlanceAppWidget",
    "RemoteViews",
];

/// Token that suggests, but does not prove, widget code.
pub const WEAK_MARKER: &str = "Widget";

/// How confident the classifier is that a file implements a widget.
///
/// Variants are ordered so that `Definitive < Possible` sorts definitive
/// candidates first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Confidence {
    /// File name matches the pattern or content has a strong marker
    Definitive,
    /// Content only mentions the weak marker
    Possible,
}

/// A ranked candidate widget source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetFileCandidate {
    pub path: PathBuf,
    pub confidence: Confidence,
}

/// Whether a path has one of the widget source extensions.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.iter().any(|s| s.eq_ignore_ascii_case(ext)))
}

/// Classify a single file, returning `None` when it is not a widget source.
pub fn classify_file(path: &Path, pattern: &str) -> Option<Confidence> {
    if !is_source_file(path) || !path.is_file() {
        return None;
    }

    let name_matches = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .is_some_and(|name| !pattern.is_empty() && name.contains(&pattern.to_lowercase()));
    if name_matches {
        return Some(Confidence::Definitive);
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Cannot read candidate source");
            return None;
        }
    };

    if STRONG_MARKERS.iter().any(|m| content.contains(m)) {
        Some(Confidence::Definitive)
    } else if content.contains(WEAK_MARKER) {
        Some(Confidence::Possible)
    } else {
        None
    }
}

/// Classify the immediate source files of `dir`.
///
/// Returns definitive candidates before possible ones, each bucket in
/// file-name order. Returns an empty list when nothing matches; callers that
/// want every source file instead use [`source_files`].
pub fn classify(dir: &Path, pattern: &str) -> Vec<WidgetFileCandidate> {
    let mut definitive = Vec::new();
    let mut possible = Vec::new();

    for path in source_files(dir) {
        match classify_file(&path, pattern) {
            Some(Confidence::Definitive) => definitive.push(WidgetFileCandidate {
                path,
                confidence: Confidence::Definitive,
            }),
            Some(Confidence::Possible) => possible.push(WidgetFileCandidate {
                path,
                confidence: Confidence::Possible,
            }),
            None => {}
        }
    }

    definitive.extend(possible);
    definitive
}

/// Every immediate source file of `dir`, in file-name order.
pub fn source_files(dir: &Path) -> Vec<PathBuf> {
    match sorted_children(dir) {
        Ok(children) => children
            .into_iter()
            .filter(|p| p.is_file() && is_source_file(p))
            .collect(),
        Err(e) => {
            tracing::debug!(path = %dir.display(), error = %e, "Cannot list source directory");
            Vec::new()
        }
    }
}
