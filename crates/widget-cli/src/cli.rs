//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Widget Sync - Install Android widget assets into a generated native project
#[derive(Parser, Debug)]
#[command(name = "widget-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run as a build plugin: host config JSON on stdin, updated config on stdout
    Plugin {
        /// Plugin options file (.json, .toml, .yaml)
        #[arg(long)]
        options: Option<PathBuf>,
    },

    /// Sync widget assets into the defaults directory and the native project
    ///
    /// Examples:
    ///   widget-sync sync --package com.example.app
    ///   widget-sync sync --package com.example.app --widget-files ../ide/app/src/main/java
    ///   widget-sync sync --skip-native --manifest ../ide/app/src/main/AndroidManifest.xml
    ///
    /// A host manifest that gains elements is rewritten: attribute order is
    /// kept, XML comments are dropped and same-kind siblings are grouped.
    Sync {
        /// Android application package (defaults to the host manifest's package)
        #[arg(long, env = "WIDGET_SYNC_PACKAGE")]
        package: Option<String>,

        /// Native project root (defaults to <project-root>/android)
        #[arg(long)]
        platform_root: Option<PathBuf>,

        /// Only sync into the defaults directory
        #[arg(long)]
        skip_native: bool,

        #[command(flatten)]
        paths: PathArgs,
    },

    /// Show how the configured widget assets resolve
    Status {
        /// Android application package
        #[arg(long, env = "WIDGET_SYNC_PACKAGE")]
        package: Option<String>,

        #[command(flatten)]
        paths: PathArgs,
    },
}

/// Options shared by commands that resolve widget assets
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PathArgs {
    /// App project root (defaults to the current directory)
    #[arg(long)]
    pub project_root: Option<PathBuf>,

    /// Options file (defaults to <project-root>/widget-sync.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Widget Kotlin source file or directory
    #[arg(long)]
    pub widget_files: Option<PathBuf>,

    /// Widget manifest fragment
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Widget resource directory
    #[arg(long)]
    pub res: Option<PathBuf>,

    /// Extra source directory installed as a sub-package (repeatable)
    #[arg(long = "include-dir")]
    pub include_dirs: Vec<PathBuf>,

    /// File name pattern marking widget sources
    #[arg(long = "match")]
    pub file_match_pattern: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_sync_with_overrides() {
        let cli = Cli::try_parse_from([
            "widget-sync",
            "sync",
            "--package",
            "com.example.app",
            "--widget-files",
            "../ide/Widget.kt",
            "--include-dir",
            "charts",
            "--include-dir",
            "data",
            "--match",
            "Glance",
        ])
        .unwrap();

        let Some(Commands::Sync { package, paths, skip_native, .. }) = cli.command else {
            panic!("expected sync command");
        };
        assert_eq!(package.as_deref(), Some("com.example.app"));
        assert!(!skip_native);
        assert_eq!(paths.include_dirs, vec![PathBuf::from("charts"), PathBuf::from("data")]);
        assert_eq!(paths.file_match_pattern.as_deref(), Some("Glance"));
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["widget-sync", "status", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
