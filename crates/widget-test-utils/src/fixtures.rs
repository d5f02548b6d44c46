//! Golden input files shared by the crate test suites.

pub const WIDGET_SOURCE: &str = include_str!("../../../test-fixtures/widgets/android/MyWidget.kt");
pub const HELPER_SOURCE: &str =
    include_str!("../../../test-fixtures/widgets/android/CodingStats.kt");
pub const WIDGET_MANIFEST: &str =
    include_str!("../../../test-fixtures/widgets/android/AndroidManifest.xml");
pub const WIDGET_STRINGS: &str =
    include_str!("../../../test-fixtures/widgets/android/res/values/strings.xml");
pub const WIDGET_INFO: &str =
    include_str!("../../../test-fixtures/widgets/android/res/xml/my_widget_info.xml");
pub const WIDGET_LAYOUT: &str =
    include_str!("../../../test-fixtures/widgets/android/res/layout/my_widget.xml");

pub const HOST_MANIFEST: &str = include_str!("../../../test-fixtures/host/AndroidManifest.xml");
pub const HOST_STRINGS: &str = include_str!("../../../test-fixtures/host/strings.xml");

/// Host config JSON with `__PROJECT_ROOT__` / `__PLATFORM_ROOT__` placeholders.
pub const HOST_CONFIG: &str = include_str!("../../../test-fixtures/host/app.json");

/// Package declared by the fixture widget sources.
pub const WIDGET_PACKAGE: &str = "com.example.widgets";

/// Widget fixture files as `(path relative to the widget dir, content)`.
pub fn widget_files() -> Vec<(&'static str, &'static str)> {
    vec![
        ("MyWidget.kt", WIDGET_SOURCE),
        ("CodingStats.kt", HELPER_SOURCE),
        ("AndroidManifest.xml", WIDGET_MANIFEST),
        ("res/values/strings.xml", WIDGET_STRINGS),
        ("res/xml/my_widget_info.xml", WIDGET_INFO),
        ("res/layout/my_widget.xml", WIDGET_LAYOUT),
    ]
}
