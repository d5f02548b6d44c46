//! Status command implementation

use colored::Colorize;

use widget_core::{StatusReport, SyncEngine};
use widget_fs::Confidence;

use crate::cli::PathArgs;
use crate::error::Result;

/// Run the status command
///
/// Resolves every configured asset and lists the widget sources a native
/// install would pick up. Writes nothing.
pub fn run_status(paths: &PathArgs, package: Option<&str>) -> Result<()> {
    let project_root = paths.project_root()?;
    let options = paths.sync_options(&project_root)?;
    let engine = SyncEngine::new(&project_root, package, options)?;

    print_status(&engine.status());
    Ok(())
}

fn print_status(report: &StatusReport) {
    println!("{} {}", "Package:".bold(), report.package.cyan());
    println!(
        "{} {}",
        "Paths:".bold(),
        if report.uses_custom_paths {
            "custom (sync to defaults enabled)".yellow()
        } else {
            "defaults".green()
        }
    );
    println!();

    for asset in &report.assets {
        let configured = asset.configured.display().to_string();
        match &asset.resolved {
            Some(location) => println!(
                "   {} {:<16} {} -> {}",
                "OK".green().bold(),
                asset.kind.to_string(),
                configured.dimmed(),
                location.path.display()
            ),
            None => println!(
                "   {} {:<16} {}",
                "MISSING".yellow().bold(),
                asset.kind.to_string(),
                configured
            ),
        }
    }

    println!();
    if report.widget_files.is_empty() {
        println!("{} No widget sources matched.", "Widget files:".bold());
    } else {
        println!("{}", "Widget files:".bold());
        for candidate in &report.widget_files {
            let tag = match candidate.confidence {
                Confidence::Definitive => "definitive".green(),
                Confidence::Possible => "possible".yellow(),
            };
            println!("   {} {} ({})", "-".cyan(), candidate.path.display(), tag);
        }
    }
}
