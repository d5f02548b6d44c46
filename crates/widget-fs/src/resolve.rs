//! Tolerant resolution of user-supplied asset paths
//!
//! Widget options may point at files or directories inside the project or in
//! an external IDE project whose layout moved since the options were written.
//! Resolution never fails hard: an unusable path yields `None` and a warning,
//! and the caller skips that optional asset.

use std::fs;
use std::path::{Path, PathBuf};

use crate::classify::{Confidence, classify_file};
use crate::walk::{DirWalker, sorted_children};

/// Number of parent directories tried when the configured path is missing.
pub const MAX_PARENT_ATTEMPTS: usize = 5;

/// Deepest directory level searched below the closest existing ancestor.
pub const MAX_SEARCH_DEPTH: usize = 3;

/// Directory name prefixes that mark an Android resource tree.
const RESOURCE_DIR_PREFIXES: &[&str] = &[
    "values", "drawable", "layout", "mipmap", "xml", "color", "font", "raw", "anim",
];

/// Whether a resolved source is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    File,
    Directory,
}

/// A validated, resolved asset location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub path: PathBuf,
    pub kind: SourceKind,
    pub exists: bool,
}

impl SourceLocation {
    fn file(path: PathBuf) -> Self {
        Self {
            path,
            kind: SourceKind::File,
            exists: true,
        }
    }

    fn directory(path: PathBuf) -> Self {
        Self {
            path,
            kind: SourceKind::Directory,
            exists: true,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == SourceKind::Directory
    }
}

/// Kind-specific validity check applied to every resolution result.
pub trait AssetValidator {
    /// Human-readable asset name used in log lines
    fn describe(&self) -> &str;

    /// Rank a file, or reject it with `None`
    fn accepts_file(&self, path: &Path) -> Option<Confidence>;

    /// Whether a directory is itself the asset
    fn accepts_dir(&self, _path: &Path) -> bool {
        false
    }
}

/// Accepts XML files containing manifest markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestValidator;

impl AssetValidator for ManifestValidator {
    fn describe(&self) -> &str {
        "widget manifest"
    }

    fn accepts_file(&self, path: &Path) -> Option<Confidence> {
        let is_xml = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("xml"));
        if !is_xml {
            return None;
        }
        let content = fs::read_to_string(path).ok()?;
        content.contains("<manifest").then_some(Confidence::Definitive)
    }
}

/// Accepts Kotlin sources that look like widget implementations.
#[derive(Debug, Clone)]
pub struct WidgetSourceValidator {
    pattern: String,
}

impl WidgetSourceValidator {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl AssetValidator for WidgetSourceValidator {
    fn describe(&self) -> &str {
        "widget source"
    }

    fn accepts_file(&self, path: &Path) -> Option<Confidence> {
        classify_file(path, &self.pattern)
    }
}

/// Accepts Android resource directories.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResourceDirValidator;

impl AssetValidator for ResourceDirValidator {
    fn describe(&self) -> &str {
        "resource directory"
    }

    fn accepts_file(&self, _path: &Path) -> Option<Confidence> {
        None
    }

    fn accepts_dir(&self, path: &Path) -> bool {
        if path.file_name().is_some_and(|n| n == "res") {
            return true;
        }
        sorted_children(path).is_ok_and(|children| {
            children.iter().any(|child| {
                child.is_dir()
                    && child.file_name().is_some_and(|name| {
                        let name = name.to_string_lossy();
                        RESOURCE_DIR_PREFIXES.iter().any(|p| name.starts_with(p))
                    })
            })
        })
    }
}

/// Resolve `user_path` against `root` into a validated source location.
///
/// - An absolute `user_path` is used verbatim.
/// - A file is returned only if the validator accepts it.
/// - A directory is returned if the validator accepts it as a whole, otherwise
///   the best-ranked accepted file directly inside it is returned.
/// - A missing path triggers a search from the closest existing ancestor
///   (at most [`MAX_PARENT_ATTEMPTS`] levels up), descending at most
///   [`MAX_SEARCH_DEPTH`] levels.
pub fn resolve(root: &Path, user_path: &Path, validator: &dyn AssetValidator) -> Option<SourceLocation> {
    let path = if user_path.is_absolute() {
        user_path.to_path_buf()
    } else {
        root.join(user_path)
    };

    if path.is_file() {
        if validator.accepts_file(&path).is_some() {
            tracing::debug!(path = %path.display(), "Resolved {}", validator.describe());
            return Some(SourceLocation::file(path));
        }
        tracing::warn!(
            path = %path.display(),
            "File is not a valid {}, skipping",
            validator.describe()
        );
        return None;
    }

    if path.is_dir() {
        if validator.accepts_dir(&path) {
            return Some(SourceLocation::directory(path));
        }
        let best = best_in_directory(&path, validator);
        if best.is_none() {
            tracing::warn!(
                path = %path.display(),
                "No {} found in directory",
                validator.describe()
            );
        }
        return best;
    }

    tracing::debug!(
        path = %path.display(),
        "Configured {} path does not exist, searching nearby",
        validator.describe()
    );
    let found = search_from_ancestor(&path, validator);
    match &found {
        Some(location) => tracing::info!(
            requested = %path.display(),
            found = %location.path.display(),
            "Located {} near configured path",
            validator.describe()
        ),
        None => tracing::warn!(
            path = %path.display(),
            "Could not locate {}, skipping",
            validator.describe()
        ),
    }
    found
}

fn best_in_directory(dir: &Path, validator: &dyn AssetValidator) -> Option<SourceLocation> {
    let children = sorted_children(dir).ok()?;
    children
        .into_iter()
        .filter(|p| p.is_file())
        .filter_map(|p| validator.accepts_file(&p).map(|c| (c, p)))
        .min_by_key(|(confidence, _)| *confidence)
        .map(|(_, path)| SourceLocation::file(path))
}

fn closest_existing_ancestor(path: &Path) -> Option<PathBuf> {
    let mut current = path.parent();
    for _ in 0..MAX_PARENT_ATTEMPTS {
        let dir = current?;
        if dir.is_dir() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

fn search_from_ancestor(path: &Path, validator: &dyn AssetValidator) -> Option<SourceLocation> {
    let ancestor = closest_existing_ancestor(path)?;
    let wanted = path.file_name();

    DirWalker::new(&ancestor)
        .max_depth(MAX_SEARCH_DEPTH)
        .walk()
        .into_iter()
        .filter_map(|entry| {
            let confidence = if entry.is_dir {
                validator
                    .accepts_dir(&entry.path)
                    .then_some(Confidence::Definitive)?
            } else {
                validator.accepts_file(&entry.path)?
            };
            let name_differs = entry.path.file_name() != wanted;
            Some(((name_differs, confidence, entry.depth), entry))
        })
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, entry)| {
            if entry.is_dir {
                SourceLocation::directory(entry.path)
            } else {
                SourceLocation::file(entry.path)
            }
        })
}
