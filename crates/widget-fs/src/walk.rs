//! Cycle-safe directory traversal
//!
//! Traversal uses an explicit work stack instead of recursion. Every directory
//! is keyed by its canonical path before it is expanded, so a symlink pointing
//! back up the tree is visited once instead of looping forever.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A file or directory found during a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Full path of the entry (under the walk root, symlinks not resolved)
    pub path: PathBuf,
    /// Number of path components below the walk root (direct children are 1)
    pub depth: usize,
    /// Whether the entry is a directory (after following symlinks)
    pub is_dir: bool,
}

impl WalkEntry {
    /// Path of this entry relative to the walk root.
    pub fn relative_to<'a>(&'a self, root: &Path) -> &'a Path {
        self.path.strip_prefix(root).unwrap_or(&self.path)
    }
}

/// Directory walker with an optional depth bound.
#[derive(Debug, Clone)]
pub struct DirWalker {
    root: PathBuf,
    max_depth: Option<usize>,
}

impl DirWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_depth: None,
        }
    }

    /// Only expand directories at most `depth` levels below the root.
    ///
    /// The root itself is depth 0, so `max_depth(0)` lists the root's
    /// immediate entries without descending.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Walk the tree and return every entry in pre-order.
    ///
    /// Siblings are visited in file-name order. Unreadable directories are
    /// skipped with a debug log.
    pub fn walk(&self) -> Vec<WalkEntry> {
        let mut entries = Vec::new();
        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut stack: Vec<(PathBuf, usize)> = vec![(self.root.clone(), 0)];

        while let Some((dir, depth)) = stack.pop() {
            let key = dunce::canonicalize(&dir).unwrap_or_else(|_| dir.clone());
            if !visited.insert(key) {
                tracing::debug!(path = %dir.display(), "Skipping already visited directory");
                continue;
            }

            let children = match sorted_children(&dir) {
                Ok(children) => children,
                Err(e) => {
                    tracing::debug!(path = %dir.display(), error = %e, "Cannot read directory");
                    continue;
                }
            };

            let mut subdirs = Vec::new();
            for path in children {
                let is_dir = path.is_dir();
                entries.push(WalkEntry {
                    path: path.clone(),
                    depth: depth + 1,
                    is_dir,
                });
                if is_dir && self.max_depth.is_none_or(|max| depth + 1 <= max) {
                    subdirs.push((path, depth + 1));
                }
            }

            // Reverse so the first sibling is expanded first
            stack.extend(subdirs.into_iter().rev());
        }

        entries
    }

    /// Walk the tree and return only files.
    pub fn files(&self) -> Vec<WalkEntry> {
        self.walk().into_iter().filter(|e| !e.is_dir).collect()
    }
}

/// List a directory's entries sorted by file name.
pub fn sorted_children(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut children: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    children.sort();
    Ok(children)
}
