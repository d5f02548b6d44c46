//! Tests for SyncEngine passes

use pretty_assertions::assert_eq;
use std::path::PathBuf;
use widget_content::manifest::parse_manifest;
use widget_content::resource::ResourceDocument;
use widget_core::{AssetKind, Error, SyncEngine, SyncOptions};
use widget_fs::Confidence;
use widget_test_utils::TestProject;
use widget_test_utils::fixtures::{HOST_MANIFEST, HOST_STRINGS, WIDGET_PACKAGE};

const PACKAGE: &str = "com.host.app";
const JAVA_DIR: &str = "android/app/src/main/java/com/host/app";

fn engine(project: &TestProject, options: SyncOptions) -> SyncEngine {
    SyncEngine::new(project.root(), Some(PACKAGE), options).unwrap()
}

fn external_options(dir: &str) -> SyncOptions {
    SyncOptions {
        widget_files_path: PathBuf::from(format!("{dir}/MyWidget.kt")),
        manifest_path: PathBuf::from(format!("{dir}/AndroidManifest.xml")),
        res_path: PathBuf::from(format!("{dir}/res")),
        ..SyncOptions::default()
    }
}

#[test]
fn test_missing_package_aborts_before_any_write() {
    let project = TestProject::new().with_widget_at("ide/widget");

    let result = SyncEngine::new(project.root(), None, external_options("ide/widget"));

    assert!(matches!(result, Err(Error::MissingPackage)));
    project.assert_file_not_exists("widgets/android");
}

#[test]
fn test_native_install_rewrites_packages() {
    let project = TestProject::new().with_default_widget();
    let engine = engine(&project, SyncOptions::default());

    let report = engine.install_native(&project.platform_root()).unwrap();

    assert!(report.success, "{report:?}");
    assert_eq!(report.packages_rewritten, 2);
    project.assert_file_contains(&format!("{JAVA_DIR}/MyWidget.kt"), "package com.host.app\n");
    project.assert_file_contains(
        &format!("{JAVA_DIR}/MyWidget.kt"),
        "import com.host.app.data.CodingStats",
    );
    project.assert_file_contains(&format!("{JAVA_DIR}/CodingStats.kt"), "package com.host.app\n");
    project.assert_file_exists("android/app/src/main/res/values/strings.xml");
    project.assert_file_exists("android/app/src/main/res/xml/my_widget_info.xml");
    project.assert_file_not_exists(&format!("{JAVA_DIR}/AndroidManifest.xml"));
}

#[test]
fn test_second_native_install_changes_nothing() {
    let project = TestProject::new().with_default_widget();
    let engine = engine(&project, SyncOptions::default());
    engine.install_native(&project.platform_root()).unwrap();
    let before = project.read(&format!("{JAVA_DIR}/MyWidget.kt"));

    let report = engine.install_native(&project.platform_root()).unwrap();

    assert!(!report.changed_anything(), "{report:?}");
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    assert_eq!(project.read(&format!("{JAVA_DIR}/MyWidget.kt")), before);
}

#[test]
fn test_host_strings_are_merged_not_replaced() {
    let project = TestProject::new().with_default_widget();
    project.write("android/app/src/main/res/values/strings.xml", HOST_STRINGS);
    let engine = engine(&project, SyncOptions::default());

    let report = engine.install_native(&project.platform_root()).unwrap();

    assert_eq!(report.files_merged, 1);
    let doc = ResourceDocument::parse(&project.read("android/app/src/main/res/values/strings.xml"));
    assert_eq!(doc.value("app_name"), Some("DevStats"));
    assert_eq!(doc.value("widget_title"), Some("Coding Time"));
}

#[test]
fn test_existing_drawable_is_not_overwritten() {
    let project = TestProject::new().with_default_widget();
    project.write("widgets/android/res/drawable/preview.png", "widget preview");
    project.write("android/app/src/main/res/drawable/preview.png", "host preview");
    let engine = engine(&project, SyncOptions::default());

    let report = engine.install_native(&project.platform_root()).unwrap();

    assert!(report.success);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("preview.png"));
    assert_eq!(project.read("android/app/src/main/res/drawable/preview.png"), "host preview");
}

#[test]
fn test_default_paths_skip_sync_to_defaults() {
    let project = TestProject::new().with_default_widget();
    let engine = engine(&project, SyncOptions::default());

    let report = engine.sync_to_defaults().unwrap();

    assert!(!report.changed_anything());
    project.assert_file_contains("widgets/android/MyWidget.kt", &format!("package {WIDGET_PACKAGE}"));
}

#[test]
fn test_external_assets_sync_to_defaults() {
    let project = TestProject::new().with_widget_at("ide/widget");
    let engine = engine(&project, external_options("ide/widget"));

    let report = engine.sync_to_defaults().unwrap();

    assert!(report.success, "{report:?}");
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    project.assert_file_contains("widgets/android/MyWidget.kt", "package com.host.app");
    project.assert_file_contains("widgets/android/CodingStats.kt", "package com.host.app");
    project.assert_file_contains("widgets/android/AndroidManifest.xml", ".MyWidget");
    project.assert_file_exists("widgets/android/res/values/strings.xml");
    project.assert_file_exists("widgets/android/res/layout/my_widget.xml");
    project.assert_file_contains("ide/widget/MyWidget.kt", &format!("package {WIDGET_PACKAGE}"));

    let again = engine.sync_to_defaults().unwrap();
    assert!(!again.changed_anything(), "{again:?}");
}

#[test]
fn test_moved_external_widget_is_found_nearby() {
    let project = TestProject::new().with_widget_at("ide/app/widget");
    let options = SyncOptions {
        widget_files_path: PathBuf::from("ide/old/location/MyWidget.kt"),
        ..SyncOptions::default()
    };
    let engine = engine(&project, options);

    let report = engine.sync_to_defaults().unwrap();

    assert!(report.success);
    project.assert_file_contains("widgets/android/MyWidget.kt", "package com.host.app");
}

#[test]
fn test_unresolvable_assets_are_warnings() {
    let project = TestProject::new();
    let engine = engine(&project, external_options("nowhere/at/all/deep/path"));

    let report = engine.sync_to_defaults().unwrap();

    assert!(report.success);
    assert_eq!(report.warnings.len(), 3);
    assert!(!report.changed_anything());
}

#[test]
fn test_include_directories_become_subpackages() {
    let project = TestProject::new().with_default_widget();
    project.write(
        "widgets/android/charts/line/LineChart.kt",
        "package com.example.widgets.charts.line\n\nclass LineChart\n",
    );
    let options = SyncOptions {
        include_directories: vec![PathBuf::from("charts")],
        ..SyncOptions::default()
    };
    let engine = engine(&project, options);

    engine.install_native(&project.platform_root()).unwrap();

    project.assert_file_contains(
        &format!("{JAVA_DIR}/charts/line/LineChart.kt"),
        "package com.host.app.charts.line\n",
    );
}

#[test]
fn test_widget_manifest_merges_into_host() {
    let project = TestProject::new().with_default_widget();
    let engine = engine(&project, SyncOptions::default());
    let host = parse_manifest(HOST_MANIFEST).unwrap();

    let (merged, report) = engine.merge_manifest_into(&host);

    assert_eq!(report.manifest_elements_merged, 1);
    let receivers = merged.application().unwrap().children("receiver");
    assert_eq!(receivers.len(), 1);
    assert_eq!(receivers[0].name(), Some(".MyWidget"));
    assert_eq!(merged.manifest.children("uses-permission").len(), 2);

    let (again, report) = engine.merge_manifest_into(&merged);
    assert_eq!(report.manifest_elements_merged, 0);
    assert_eq!(again, merged);
}

#[test]
fn test_missing_widget_manifest_keeps_host() {
    let project = TestProject::new();
    let engine = engine(&project, SyncOptions::default());
    let host = parse_manifest(HOST_MANIFEST).unwrap();

    let (merged, report) = engine.merge_manifest_into(&host);

    assert_eq!(merged, host);
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn test_status_lists_ranked_widget_files() {
    let project = TestProject::new().with_default_widget();
    let engine = engine(&project, SyncOptions::default());

    let status = engine.status();

    assert!(status.is_complete());
    assert!(!status.uses_custom_paths);
    assert!(status.asset(AssetKind::Resources).unwrap().resolved.as_ref().unwrap().is_dir());
    let files: Vec<_> = status
        .widget_files
        .iter()
        .map(|c| (c.path.file_name().unwrap().to_string_lossy().to_string(), c.confidence))
        .collect();
    assert_eq!(
        files,
        vec![
            ("MyWidget.kt".to_string(), Confidence::Definitive),
            ("CodingStats.kt".to_string(), Confidence::Possible),
        ]
    );
}
