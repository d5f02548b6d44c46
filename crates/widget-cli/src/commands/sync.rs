//! Sync command implementation

use std::path::{Path, PathBuf};

use colored::Colorize;

use widget_content::manifest::{parse_manifest, render_manifest};
use widget_core::{Error, SyncEngine, SyncReport};
use widget_fs::io;

use crate::cli::PathArgs;
use crate::error::{CliError, Result};

/// Run the sync command
///
/// Syncs custom-path assets into the defaults directory, then installs them
/// into the native project and merges the widget manifest into the host
/// manifest on disk.
pub fn run_sync(
    paths: &PathArgs,
    package: Option<&str>,
    platform_root: Option<PathBuf>,
    skip_native: bool,
) -> Result<()> {
    let project_root = paths.project_root()?;
    let options = paths.sync_options(&project_root)?;
    let platform_root = platform_root.unwrap_or_else(|| project_root.join("android"));
    let manifest_path = SyncEngine::native_manifest_path(&platform_root);

    if !skip_native && !manifest_path.is_file() {
        return Err(Error::ManifestNotFound { path: manifest_path }.into());
    }

    let host_package = if package.is_none() && !skip_native {
        host_manifest_package(&manifest_path)
    } else {
        None
    };
    let engine = SyncEngine::new(&project_root, package.or(host_package.as_deref()), options)?;

    println!(
        "{} Syncing widget assets for {}...",
        "=>".blue().bold(),
        engine.package().cyan()
    );

    let mut report = engine.sync_to_defaults()?;
    if !skip_native {
        report.extend(engine.install_native(&platform_root)?);

        let host = parse_manifest(&io::read_text(&manifest_path)?)?;
        let (merged, merge_report) = engine.merge_manifest_into(&host);
        if merge_report.manifest_elements_merged > 0 {
            io::write_text(&manifest_path, &render_manifest(&merged))?;
        }
        report.extend(merge_report);
    }

    print_report(&report);

    if report.success {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "Sync finished with {} error(s)",
            report.errors.len()
        )))
    }
}

fn host_manifest_package(path: &Path) -> Option<String> {
    let content = io::read_text(path).ok()?;
    let manifest = parse_manifest(&content).ok()?;
    manifest.package().map(str::to_string)
}

fn print_report(report: &SyncReport) {
    for action in &report.actions {
        println!("   {} {}", "+".green(), action);
    }
    for warning in &report.warnings {
        println!("   {} {}", "!".yellow(), warning);
    }
    for error in &report.errors {
        println!("   {} {}", "x".red(), error);
    }

    if !report.success {
        println!("{} Sync finished with errors.", "FAILED".red().bold());
    } else if report.changed_anything() {
        println!(
            "{} {} file(s) copied, {} merged, {} package(s) rewritten, {} manifest element(s) added.",
            "OK".green().bold(),
            report.files_copied,
            report.files_merged,
            report.packages_rewritten,
            report.manifest_elements_merged
        );
    } else {
        println!("{} Everything up to date.", "OK".green().bold());
    }
}
