//! Building sync options from files and flags

use std::path::{Path, PathBuf};

use widget_core::SyncOptions;

use crate::cli::PathArgs;
use crate::error::Result;

/// Options file picked up from the project root when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "widget-sync.toml";

impl PathArgs {
    /// The project root, defaulting to the current directory.
    pub fn project_root(&self) -> Result<PathBuf> {
        match &self.project_root {
            Some(root) => Ok(root.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    /// Options from the config file with command-line overrides applied.
    pub fn sync_options(&self, project_root: &Path) -> Result<SyncOptions> {
        let mut options = match self.config_file(project_root) {
            Some(path) => SyncOptions::load(&path)?,
            None => SyncOptions::default(),
        };

        if let Some(path) = &self.widget_files {
            options.widget_files_path = path.clone();
        }
        if let Some(path) = &self.manifest {
            options.manifest_path = path.clone();
        }
        if let Some(path) = &self.res {
            options.res_path = path.clone();
        }
        if !self.include_dirs.is_empty() {
            options.include_directories = self.include_dirs.clone();
        }
        if let Some(pattern) = &self.file_match_pattern {
            options.file_match_pattern = pattern.clone();
        }
        Ok(options)
    }

    fn config_file(&self, project_root: &Path) -> Option<PathBuf> {
        if let Some(path) = &self.config {
            return Some(path.clone());
        }
        let default = project_root.join(DEFAULT_CONFIG_FILE);
        default.is_file().then_some(default)
    }
}
