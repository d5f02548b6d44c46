//! Tests for the host config plugin contract

use pretty_assertions::assert_eq;
use serde_json::Value;
use widget_core::{HostConfig, SyncOptions, apply_plugin, apply_plugin_with_report};
use widget_test_utils::TestProject;

fn host_config(project: &TestProject) -> HostConfig {
    serde_json::from_str(&project.host_config_json()).unwrap()
}

#[test]
fn test_plugin_merges_manifest_and_installs_sources() {
    let project = TestProject::new().with_default_widget();

    let updated = apply_plugin(host_config(&project), &SyncOptions::default()).unwrap();

    let manifest = updated.mod_results.as_ref().unwrap();
    let application = manifest.application().unwrap();
    assert_eq!(application.children("receiver")[0].name(), Some(".MyWidget"));
    assert_eq!(manifest.manifest.children("uses-permission").len(), 2);
    project.assert_file_contains(
        "android/app/src/main/java/com/host/app/MyWidget.kt",
        "package com.host.app",
    );
}

#[test]
fn test_plugin_preserves_unmodelled_keys() {
    let project = TestProject::new().with_default_widget();

    let updated = apply_plugin(host_config(&project), &SyncOptions::default()).unwrap();
    let value = serde_json::to_value(&updated).unwrap();

    assert_eq!(value["name"], Value::from("DevStats"));
    assert_eq!(value["slug"], Value::from("devstats"));
    assert_eq!(value["android"]["versionCode"], Value::from(7));
    assert_eq!(value["modRequest"]["modName"], Value::from("manifest"));
}

#[test]
fn test_plugin_is_idempotent() {
    let project = TestProject::new().with_default_widget();
    let options = SyncOptions::default();

    let (once, _) = apply_plugin_with_report(host_config(&project), &options).unwrap();
    let (twice, report) = apply_plugin_with_report(once.clone(), &options).unwrap();

    assert_eq!(twice, once);
    assert!(!report.changed_anything(), "{report:?}");
}

#[test]
fn test_plugin_without_manifest_warns() {
    let project = TestProject::new().with_default_widget();
    let mut config = host_config(&project);
    config.mod_results = None;

    let (updated, report) = apply_plugin_with_report(config, &SyncOptions::default()).unwrap();

    assert!(updated.mod_results.is_none());
    assert!(report.warnings.iter().any(|w| w.contains("manifest")));
}
