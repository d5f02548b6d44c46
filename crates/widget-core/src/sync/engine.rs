//! SyncEngine implementation
//!
//! The SyncEngine moves widget assets between three places: wherever the
//! options point, the version-controlled defaults directory, and the
//! generated Android project.

use std::path::{Path, PathBuf};

use widget_content::manifest::parse_manifest;
use widget_content::{AndroidManifest, merge_manifest, rewrite_source, subpackage};
use widget_fs::classify::{is_source_file, source_files};
use widget_fs::{
    DirWalker, ManifestValidator, ResourceDirValidator, SourceLocation, WidgetSourceValidator,
    classify, io, resolve,
};

use super::report::SyncReport;
use super::status::{AssetKind, AssetStatus, StatusReport};
use crate::config::{
    DEFAULT_MANIFEST_PATH, DEFAULT_RES_PATH, DEFAULT_WIDGET_DIR, DEFAULT_WIDGET_FILES_PATH,
    SyncOptions,
};
use crate::copy::copy_tree;
use crate::{Error, Result};

/// Widget sources of `dir` in install order.
///
/// Classified candidates when any match; otherwise every Kotlin source in the
/// directory, so a widget whose files carry no recognisable marker still
/// installs.
pub fn widget_sources(dir: &Path, pattern: &str) -> Vec<PathBuf> {
    let candidates = classify(dir, pattern);
    if !candidates.is_empty() {
        return candidates.into_iter().map(|c| c.path).collect();
    }

    let all = source_files(dir);
    if !all.is_empty() {
        tracing::info!(
            dir = %dir.display(),
            count = all.len(),
            "No files matched the widget pattern, using every Kotlin source"
        );
    }
    all
}

/// Engine for synchronizing widget assets
///
/// The SyncEngine provides three operations:
/// - **sync_to_defaults**: mirror custom-path assets into `widgets/android/`
/// - **install_native**: install sources and resources into the native project
/// - **merge_manifest_into**: merge the widget manifest into a host manifest
pub struct SyncEngine {
    /// Root of the app project
    project_root: PathBuf,
    /// Android application package
    package: String,
    options: SyncOptions,
}

impl SyncEngine {
    /// Create a new SyncEngine
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingPackage`] when no package is given and
    /// [`Error::InvalidOptions`] when the options fail validation.
    pub fn new(
        project_root: impl Into<PathBuf>,
        package: Option<&str>,
        options: SyncOptions,
    ) -> Result<Self> {
        let package = package
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or(Error::MissingPackage)?;
        options.validate()?;

        Ok(Self {
            project_root: project_root.into(),
            package: package.to_string(),
            options,
        })
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// The version-controlled widget directory.
    pub fn defaults_dir(&self) -> PathBuf {
        self.project_root.join(DEFAULT_WIDGET_DIR)
    }

    /// `<platform_root>/app/src/main/java/<package path>`
    pub fn native_source_dir(&self, platform_root: &Path) -> PathBuf {
        let mut dir = platform_root.join("app/src/main/java");
        for segment in self.package.split('.') {
            dir.push(segment);
        }
        dir
    }

    pub fn native_res_dir(platform_root: &Path) -> PathBuf {
        platform_root.join("app/src/main/res")
    }

    pub fn native_manifest_path(platform_root: &Path) -> PathBuf {
        platform_root.join("app/src/main/AndroidManifest.xml")
    }

    /// Run both file passes: sync to defaults, then native install.
    pub fn run(&self, platform_root: &Path) -> Result<SyncReport> {
        let mut report = self.sync_to_defaults()?;
        report.extend(self.install_native(platform_root)?);
        Ok(report)
    }

    /// Mirror assets configured at custom locations into the defaults directory.
    ///
    /// Does nothing when every path is at its default.
    pub fn sync_to_defaults(&self) -> Result<SyncReport> {
        let mut report = SyncReport::success();
        if !self.options.uses_custom_paths() {
            report.action("Default widget paths in use, nothing to sync");
            return Ok(report);
        }

        tracing::info!("Syncing widget assets into {DEFAULT_WIDGET_DIR}");
        io::ensure_dir(&self.defaults_dir())?;

        self.sync_sources_to_defaults(&mut report);
        self.sync_manifest_to_defaults(&mut report);
        self.sync_resources_to_defaults(&mut report);

        tracing::info!(
            copied = report.files_copied,
            merged = report.files_merged,
            warnings = report.warnings.len(),
            "Sync to defaults complete"
        );
        Ok(report)
    }

    fn sync_sources_to_defaults(&self, report: &mut SyncReport) {
        let validator = WidgetSourceValidator::new(&self.options.file_match_pattern);
        let Some(location) = resolve(&self.project_root, &self.options.widget_files_path, &validator)
        else {
            report.warn(format!(
                "Widget sources not found at {}, skipping",
                self.options.widget_files_path.display()
            ));
            return;
        };

        let Some(source_dir) = location.path.parent() else {
            return;
        };
        let defaults = self.defaults_dir();
        if io::same_path(source_dir, &defaults) {
            report.action("Widget sources already in defaults directory");
            return;
        }

        let mut files = widget_sources(source_dir, &self.options.file_match_pattern);
        if !files.contains(&location.path) {
            files.insert(0, location.path.clone());
        }
        for file in &files {
            if let Some(name) = file.file_name() {
                self.install_source(file, &defaults.join(name), &self.package, report);
            }
        }

        for dir in &self.options.include_directories {
            if !dir.is_absolute() {
                let root = source_dir.join(dir);
                if root.is_dir() {
                    self.install_tree(&root, dir, &defaults, report);
                }
            }
        }
    }

    fn sync_manifest_to_defaults(&self, report: &mut SyncReport) {
        let Some(location) = resolve(&self.project_root, &self.options.manifest_path, &ManifestValidator)
        else {
            report.warn(format!(
                "Widget manifest not found at {}, skipping",
                self.options.manifest_path.display()
            ));
            return;
        };

        let dest = self.project_root.join(DEFAULT_MANIFEST_PATH);
        if io::same_path(&location.path, &dest) {
            return;
        }
        if widget_fs::checksum::files_identical(&location.path, &dest) {
            report.action(format!("{} is up to date", dest.display()));
            return;
        }
        match io::copy_file(&location.path, &dest) {
            Ok(()) => {
                report.files_copied += 1;
                report.action(format!("Mirrored manifest to {}", dest.display()));
            }
            Err(e) => report.error(format!("Failed to mirror manifest: {e}")),
        }
    }

    fn sync_resources_to_defaults(&self, report: &mut SyncReport) {
        let Some(location) = resolve(&self.project_root, &self.options.res_path, &ResourceDirValidator)
        else {
            report.warn(format!(
                "Resource directory not found at {}, skipping",
                self.options.res_path.display()
            ));
            return;
        };

        let dest = self.project_root.join(DEFAULT_RES_PATH);
        if io::same_path(&location.path, &dest) {
            return;
        }
        copy_resources(&location.path, &dest, report);
    }

    /// Install widget sources and resources into the native project.
    ///
    /// Sources come from the defaults directory and are rewritten into the
    /// app package; include directories become sub-packages.
    pub fn install_native(&self, platform_root: &Path) -> Result<SyncReport> {
        let mut report = SyncReport::success();
        let java_dir = self.native_source_dir(platform_root);
        io::ensure_dir(&java_dir)?;

        let defaults = self.defaults_dir();
        if defaults.is_dir() {
            let files = widget_sources(&defaults, &self.options.file_match_pattern);
            if files.is_empty() {
                report.warn(format!("No Kotlin sources found in {}", defaults.display()));
            }
            for file in &files {
                if let Some(name) = file.file_name() {
                    self.install_source(file, &java_dir.join(name), &self.package, &mut report);
                }
            }
        } else {
            report.warn(format!(
                "Widget directory {} not found, no sources installed",
                defaults.display()
            ));
        }

        for dir in &self.options.include_directories {
            let (root, relative) = if dir.is_absolute() {
                let name = dir.file_name().map(PathBuf::from).unwrap_or_default();
                (dir.clone(), name)
            } else {
                (defaults.join(dir), dir.clone())
            };
            if root.is_dir() {
                self.install_tree(&root, &relative, &java_dir, &mut report);
            } else {
                report.warn(format!("Include directory {} not found, skipping", root.display()));
            }
        }

        let res = self.project_root.join(DEFAULT_RES_PATH);
        if res.is_dir() {
            copy_resources(&res, &Self::native_res_dir(platform_root), &mut report);
        } else {
            report.warn(format!("Resource directory {} not found, skipping", res.display()));
        }

        tracing::info!(
            package = %self.package,
            copied = report.files_copied,
            merged = report.files_merged,
            rewritten = report.packages_rewritten,
            "Native install complete"
        );
        Ok(report)
    }

    /// Merge the widget manifest into `host`, returning the merged copy.
    ///
    /// A missing or unparseable widget manifest leaves the host unchanged and
    /// is reported as a warning.
    pub fn merge_manifest_into(&self, host: &AndroidManifest) -> (AndroidManifest, SyncReport) {
        let mut report = SyncReport::success();
        let path = self.project_root.join(DEFAULT_MANIFEST_PATH);
        if !path.is_file() {
            report.warn(format!("Widget manifest {} not found, host manifest unchanged", path.display()));
            return (host.clone(), report);
        }

        let widget = match load_manifest(&path) {
            Ok(widget) => widget,
            Err(e) => {
                report.warn(format!("Widget manifest could not be read: {e}"));
                return (host.clone(), report);
            }
        };

        let (merged, summary) = merge_manifest(host, &widget, &self.options.manifest.merge_options());
        report.manifest_elements_merged = summary.merged;
        for (kind, count) in &summary.per_element {
            report.action(format!("Merged {count} <{kind}> element(s) into host manifest"));
        }
        tracing::info!(merged = summary.merged, "Manifest merge complete");
        (merged, report)
    }

    /// Resolve every configured asset without writing anything.
    pub fn status(&self) -> StatusReport {
        let pattern = &self.options.file_match_pattern;
        let widget = resolve(
            &self.project_root,
            &self.options.widget_files_path,
            &WidgetSourceValidator::new(pattern),
        );
        let manifest = resolve(&self.project_root, &self.options.manifest_path, &ManifestValidator);
        let resources = resolve(&self.project_root, &self.options.res_path, &ResourceDirValidator);

        let source_dir = widget
            .as_ref()
            .and_then(|l| l.path.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| self.defaults_dir());
        let widget_files = classify(&source_dir, pattern);

        let asset = |kind, configured: &Path, default: &str, resolved: Option<SourceLocation>| AssetStatus {
            kind,
            configured: configured.to_path_buf(),
            resolved,
            is_default: configured == Path::new(default),
        };

        StatusReport {
            package: self.package.clone(),
            uses_custom_paths: self.options.uses_custom_paths(),
            assets: vec![
                asset(
                    AssetKind::WidgetSources,
                    &self.options.widget_files_path,
                    DEFAULT_WIDGET_FILES_PATH,
                    widget,
                ),
                asset(AssetKind::Manifest, &self.options.manifest_path, DEFAULT_MANIFEST_PATH, manifest),
                asset(AssetKind::Resources, &self.options.res_path, DEFAULT_RES_PATH, resources),
            ],
            widget_files,
        }
    }

    /// Copy every Kotlin source under `root` to `dest_root/<relative>/...`,
    /// rewriting each into the matching sub-package.
    fn install_tree(&self, root: &Path, relative: &Path, dest_root: &Path, report: &mut SyncReport) {
        for entry in DirWalker::new(root).files() {
            if !is_source_file(&entry.path) {
                continue;
            }
            let rel = entry.relative_to(root);
            let rel_dir = relative.join(rel.parent().unwrap_or(Path::new("")));
            let package = subpackage(&self.package, &rel_dir);
            self.install_source(&entry.path, &dest_root.join(relative).join(rel), &package, report);
        }
    }

    /// Write `source` to `dest` under `package`. Identical output is not rewritten.
    fn install_source(&self, source: &Path, dest: &Path, package: &str, report: &mut SyncReport) {
        let result = io::read_text(source).and_then(|content| {
            let (rewritten, outcome) = rewrite_source(&content, package);
            let up_to_date = dest.is_file() && io::read_text(dest).is_ok_and(|existing| existing == rewritten);
            if !up_to_date {
                io::write_text(dest, &rewritten)?;
            }
            Ok((outcome, !up_to_date))
        });

        match result {
            Ok((outcome, true)) => {
                report.files_copied += 1;
                if outcome.changed() {
                    report.packages_rewritten += 1;
                }
                report.action(format!("Installed {} as package {package}", dest.display()));
            }
            Ok((_, false)) => tracing::debug!(dest = %dest.display(), "Source up to date"),
            Err(e) => report.error(format!("Failed to install {}: {e}", source.display())),
        }
    }
}

fn load_manifest(path: &Path) -> widget_content::Result<AndroidManifest> {
    let content = io::read_text(path)?;
    parse_manifest(&content)
}

fn copy_resources(source: &Path, dest: &Path, report: &mut SyncReport) {
    let mut copied = Vec::new();
    let mut conflicts = Vec::new();
    let stats = copy_tree(
        source,
        dest,
        |_, to| copied.push(format!("Copied {}", to.display())),
        |conflict| conflicts.push(conflict.to_string()),
    );

    report.record_copy(&stats);
    report.actions.extend(copied);
    report.warnings.extend(conflicts);
}
