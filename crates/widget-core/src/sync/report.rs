//! Sync reports

use serde::{Deserialize, Serialize};

use crate::copy::CopyStats;

/// Report from a sync pass
///
/// Recoverable problems (missing assets, skipped conflicts) are recorded as
/// warnings and do not clear `success`; only errors do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Whether the pass completed without errors
    pub success: bool,
    /// Actions taken during the pass
    pub actions: Vec<String>,
    /// Assets or files that were skipped
    pub warnings: Vec<String>,
    /// Errors encountered during the pass
    pub errors: Vec<String>,
    /// Files newly copied
    pub files_copied: usize,
    /// Existing files merged in place
    pub files_merged: usize,
    /// Kotlin sources whose package declaration changed
    pub packages_rewritten: usize,
    /// Manifest elements added to the host
    pub manifest_elements_merged: usize,
}

impl SyncReport {
    /// Create an empty successful report
    pub fn success() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    /// Add an action to the report
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action(action);
        self
    }

    pub fn action(&mut self, action: impl Into<String>) {
        let action = action.into();
        tracing::debug!("{action}");
        self.actions.push(action);
    }

    pub fn warn(&mut self, warning: impl Into<String>) {
        let warning = warning.into();
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn error(&mut self, error: impl Into<String>) {
        let error = error.into();
        tracing::error!("{error}");
        self.errors.push(error);
        self.success = false;
    }

    /// Fold tree copy counters into the report.
    pub fn record_copy(&mut self, stats: &CopyStats) {
        self.files_copied += stats.copied;
        self.files_merged += stats.merged;
    }

    /// Append another pass's report.
    pub fn extend(&mut self, other: SyncReport) {
        self.success &= other.success;
        self.actions.extend(other.actions);
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        self.files_copied += other.files_copied;
        self.files_merged += other.files_merged;
        self.packages_rewritten += other.packages_rewritten;
        self.manifest_elements_merged += other.manifest_elements_merged;
    }

    /// Whether the pass wrote or merged anything.
    pub fn changed_anything(&self) -> bool {
        self.files_copied + self.files_merged + self.packages_rewritten + self.manifest_elements_merged > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_keep_success() {
        let mut report = SyncReport::success();
        report.warn("resource directory not found");
        assert!(report.success);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn extend_combines_counts_and_status() {
        let mut first = SyncReport::success().with_action("copied MyWidget.kt");
        first.files_copied = 1;
        let mut second = SyncReport::success();
        second.error("write failed");
        second.manifest_elements_merged = 2;

        first.extend(second);

        assert!(!first.success);
        assert_eq!(first.files_copied, 1);
        assert_eq!(first.manifest_elements_merged, 2);
        assert_eq!(first.actions, vec!["copied MyWidget.kt".to_string()]);
        assert!(first.changed_anything());
    }
}
