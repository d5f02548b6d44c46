//! Host build plugin contract
//!
//! The host build hands over its app config as JSON and expects the same
//! document back with the manifest enriched. Keys this crate does not model
//! are carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::sync::{SyncEngine, SyncReport};
use crate::{Error, Result, SyncOptions};
use widget_content::AndroidManifest;

/// `android` section of the host config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AndroidConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `modRequest` section: where the build is running.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModRequest {
    pub project_root: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_project_root: Option<PathBuf>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModRequest {
    /// The native project root, `<projectRoot>/android` when unset.
    pub fn platform_root(&self) -> PathBuf {
        self.platform_project_root
            .clone()
            .unwrap_or_else(|| self.project_root.join("android"))
    }
}

/// The host app config passed through the plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mod_request: Option<ModRequest>,

    /// The host manifest tree being modified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mod_results: Option<AndroidManifest>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HostConfig {
    pub fn package(&self) -> Option<&str> {
        self.android.as_ref().and_then(|a| a.package.as_deref())
    }
}

/// Run the full pipeline against a host config and return the updated config.
pub fn apply_plugin(host: HostConfig, options: &SyncOptions) -> Result<HostConfig> {
    apply_plugin_with_report(host, options).map(|(config, _)| config)
}

/// Like [`apply_plugin`], also returning the combined report.
///
/// # Errors
///
/// Fails before touching the filesystem when the package name or the
/// `modRequest.projectRoot` is missing.
pub fn apply_plugin_with_report(
    mut host: HostConfig,
    options: &SyncOptions,
) -> Result<(HostConfig, SyncReport)> {
    let package = host.package().ok_or(Error::MissingPackage)?.to_string();
    let request = host
        .mod_request
        .as_ref()
        .ok_or_else(|| Error::invalid_options("host config has no modRequest.projectRoot"))?;

    let engine = SyncEngine::new(&request.project_root, Some(&package), options.clone())?;
    let mut report = engine.run(&request.platform_root())?;

    match host.mod_results.take() {
        Some(manifest) => {
            let (merged, merge_report) = engine.merge_manifest_into(&manifest);
            host.mod_results = Some(merged);
            report.extend(merge_report);
        }
        None => report.warn("Host config carries no manifest, skipping manifest merge"),
    }

    tracing::info!(
        actions = report.actions.len(),
        warnings = report.warnings.len(),
        "Widget sync plugin finished"
    );
    Ok((host, report))
}
