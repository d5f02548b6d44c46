//! Resource tree copying with conflict resolution
//!
//! Mirrors a source tree into a destination. New files are copied, existing
//! XML files are merged, and every other existing file is left alone and
//! reported as a conflict.

use std::fmt;
use std::path::{Path, PathBuf};

use widget_content::resource::{MergeStrategy, merge_file_strategy};
use widget_fs::checksum::files_identical;
use widget_fs::{DirWalker, io};

/// Counters for one tree copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub copied: usize,
    pub merged: usize,
    /// XML files whose destination already held the merged content
    pub unchanged: usize,
    pub conflicts: usize,
}

impl CopyStats {
    pub fn total(&self) -> usize {
        self.copied + self.merged + self.unchanged + self.conflicts
    }
}

/// Why a destination file was not written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictReason {
    /// Non-XML file already present with different content
    Exists,
    /// Non-XML file already present with identical content
    Identical,
    /// XML merge could not read or write one of the files
    MergeFailed,
    /// Copy or directory creation failed
    WriteFailed(String),
}

/// A destination file the copier did not write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyConflict {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub reason: ConflictReason,
}

impl fmt::Display for CopyConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dest = self.destination.display();
        match &self.reason {
            ConflictReason::Exists => write!(f, "{dest} already exists, skipped"),
            ConflictReason::Identical => write!(f, "{dest} already exists (identical), skipped"),
            ConflictReason::MergeFailed => write!(f, "{dest} could not be merged"),
            ConflictReason::WriteFailed(e) => write!(f, "{dest} could not be written: {e}"),
        }
    }
}

fn is_xml(path: &Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("xml"))
}

/// Copy `source` into `dest`, creating `dest` as needed.
///
/// `on_copy` receives `(source, destination)` for each newly written file;
/// `on_conflict` receives every file that was left untouched. Failures on one
/// file never abort the rest of the copy.
pub fn copy_tree(
    source: &Path,
    dest: &Path,
    mut on_copy: impl FnMut(&Path, &Path),
    mut on_conflict: impl FnMut(&CopyConflict),
) -> CopyStats {
    let mut stats = CopyStats::default();

    let mut conflict = |stats: &mut CopyStats, source: &Path, destination: PathBuf, reason| {
        stats.conflicts += 1;
        let conflict = CopyConflict {
            source: source.to_path_buf(),
            destination,
            reason,
        };
        tracing::warn!("{conflict}");
        on_conflict(&conflict);
    };

    if let Err(e) = io::ensure_dir(dest) {
        conflict(&mut stats, source, dest.to_path_buf(), ConflictReason::WriteFailed(e.to_string()));
        return stats;
    }

    for entry in DirWalker::new(source).walk() {
        let target = dest.join(entry.relative_to(source));

        if entry.is_dir {
            if let Err(e) = io::ensure_dir(&target) {
                conflict(&mut stats, &entry.path, target, ConflictReason::WriteFailed(e.to_string()));
            }
            continue;
        }

        if !target.exists() {
            match io::copy_file(&entry.path, &target) {
                Ok(()) => {
                    stats.copied += 1;
                    tracing::debug!(dest = %target.display(), "Copied file");
                    on_copy(&entry.path, &target);
                }
                Err(e) => {
                    conflict(&mut stats, &entry.path, target, ConflictReason::WriteFailed(e.to_string()))
                }
            }
            continue;
        }

        if is_xml(&entry.path) {
            match merge_file_strategy(&entry.path, &target) {
                Some(MergeStrategy::Unchanged) => stats.unchanged += 1,
                Some(_) => stats.merged += 1,
                None => conflict(&mut stats, &entry.path, target, ConflictReason::MergeFailed),
            }
            continue;
        }

        let reason = if files_identical(&entry.path, &target) {
            ConflictReason::Identical
        } else {
            ConflictReason::Exists
        };
        conflict(&mut stats, &entry.path, target, reason);
    }

    tracing::debug!(
        source = %source.display(),
        copied = stats.copied,
        merged = stats.merged,
        conflicts = stats.conflicts,
        "Tree copy complete"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_source_copies_nothing() {
        let temp = TempDir::new().unwrap();
        let stats = copy_tree(
            &temp.path().join("missing"),
            &temp.path().join("dest"),
            |_, _| {},
            |_| {},
        );
        assert_eq!(stats, CopyStats::default());
    }

    #[test]
    fn conflict_message_distinguishes_identical_files() {
        let conflict = CopyConflict {
            source: PathBuf::from("a.png"),
            destination: PathBuf::from("res/a.png"),
            reason: ConflictReason::Identical,
        };
        assert!(conflict.to_string().contains("identical"));
    }

    #[test]
    fn nested_directories_are_mirrored() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("res");
        fs::create_dir_all(source.join("drawable-hdpi")).unwrap();
        fs::write(source.join("drawable-hdpi/icon.png"), [0u8, 1, 2]).unwrap();
        fs::create_dir_all(source.join("values-night")).unwrap();

        let mut copied = Vec::new();
        let stats = copy_tree(
            &source,
            &temp.path().join("out"),
            |_, dest| copied.push(dest.to_path_buf()),
            |_| {},
        );

        assert_eq!(stats.copied, 1);
        assert_eq!(copied, vec![temp.path().join("out/drawable-hdpi/icon.png")]);
        assert!(temp.path().join("out/values-night").is_dir());
    }
}
