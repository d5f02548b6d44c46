//! Tests for tolerant asset path resolution

use assert_fs::prelude::*;
use rstest::rstest;
use std::path::Path;
use widget_fs::{
    ManifestValidator, ResourceDirValidator, SourceKind, WidgetSourceValidator, resolve,
};

#[rstest]
#[case("widgets/a/b/MyWidget.kt", true)]
#[case("widgets/a/b/c/MyWidget.kt", true)]
#[case("widgets/a/b/c/d/MyWidget.kt", false)]
fn test_missing_path_search_respects_depth_bound(#[case] actual: &str, #[case] expected: bool) {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child(actual)
        .write_str("class MyWidget : AppWidgetProvider()")
        .unwrap();

    // Closest existing ancestor of the configured path is `widgets/`
    let configured = Path::new("widgets/moved/android/MyWidget.kt");
    let found = resolve(temp.path(), configured, &WidgetSourceValidator::new("Widget"));

    assert_eq!(found.is_some(), expected, "case {actual}");
    if let Some(location) = found {
        assert!(location.path.ends_with("MyWidget.kt"));
        assert_eq!(location.kind, SourceKind::File);
    }
}

#[test]
fn test_missing_path_prefers_file_with_requested_name() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("ide/app/src/OtherWidget.kt")
        .write_str("class OtherWidget : GlanceAppWidget()")
        .unwrap();
    temp.child("ide/app/src/deeper/MyWidget.kt")
        .write_str("class MyWidget")
        .unwrap();

    let found = resolve(
        temp.path(),
        Path::new("ide/app/src/main/java/MyWidget.kt"),
        &WidgetSourceValidator::new("Widget"),
    )
    .unwrap();

    assert!(found.path.ends_with("deeper/MyWidget.kt"));
}

#[test]
fn test_missing_manifest_is_found_in_moved_subfolder() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("external/widget/AndroidManifest.xml")
        .write_str("<manifest xmlns:android=\"http://schemas.android.com/apk/res/android\"/>")
        .unwrap();

    let found = resolve(
        temp.path(),
        Path::new("external/old-location/AndroidManifest.xml"),
        &ManifestValidator,
    )
    .unwrap();

    assert!(found.path.ends_with("external/widget/AndroidManifest.xml"));
}

#[test]
fn test_missing_resource_dir_is_found_by_name() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("external/app/src/main/res/values/strings.xml")
        .write_str("<resources/>")
        .unwrap();

    let found = resolve(
        temp.path(),
        Path::new("external/app/res"),
        &ResourceDirValidator,
    )
    .unwrap();

    assert_eq!(found.kind, SourceKind::Directory);
    assert!(found.path.ends_with("src/main/res"));
}

#[test]
fn test_nothing_found_returns_none() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("widgets/readme.md").write_str("nothing").unwrap();

    let found = resolve(
        temp.path(),
        Path::new("widgets/android/MyWidget.kt"),
        &WidgetSourceValidator::new("Widget"),
    );
    assert!(found.is_none());
}

#[test]
fn test_invalid_existing_file_is_not_searched_around() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("widgets/AndroidManifest.xml")
        .write_str("<resources/>")
        .unwrap();
    temp.child("widgets/real/AndroidManifest.xml")
        .write_str("<manifest/>")
        .unwrap();

    let found = resolve(
        temp.path(),
        Path::new("widgets/AndroidManifest.xml"),
        &ManifestValidator,
    );
    assert!(found.is_none());
}
