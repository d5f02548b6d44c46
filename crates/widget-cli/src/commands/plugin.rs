//! Build plugin command
//!
//! Reads the host config JSON from stdin and writes the updated config to
//! stdout. Nothing else is printed to stdout.

use std::io::{Read, Write};
use std::path::Path;

use widget_core::{HostConfig, SyncOptions, apply_plugin};

use crate::error::Result;

/// Run the plugin command
pub fn run_plugin(options_path: Option<&Path>) -> Result<()> {
    let options = match options_path {
        Some(path) => SyncOptions::load(path)?,
        None => SyncOptions::default(),
    };

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let host: HostConfig = serde_json::from_str(&input)?;

    let updated = apply_plugin(host, &options)?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &updated)?;
    writeln!(stdout)?;
    Ok(())
}
