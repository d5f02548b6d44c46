//! Tests for manifest parsing, rendering and merging

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use widget_content::manifest::{NAME_ATTRIBUTE, parse_manifest, render_manifest};
use widget_content::{AndroidManifest, Element, MergeOptions, merge_manifest};

const HOST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android" package="com.host.app">
    <uses-permission android:name="android.permission.VIBRATE" />
    <application android:label="Host">
        <activity android:name=".MainActivity" android:exported="true" />
    </application>
</manifest>
"#;

const WIDGET: &str = r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android">
    <uses-permission android:name="android.permission.INTERNET" />
    <application>
        <receiver android:name=".FooReceiver" android:exported="false">
            <intent-filter>
                <action android:name="android.appwidget.action.APPWIDGET_UPDATE" />
            </intent-filter>
            <meta-data android:name="android.appwidget.provider" android:resource="@xml/foo_widget_info" />
        </receiver>
    </application>
</manifest>
"#;

fn names(elements: &[Element]) -> Vec<&str> {
    elements.iter().filter_map(Element::name).collect()
}

#[test]
fn test_widget_receiver_and_permission_are_merged_once() {
    let host = parse_manifest(HOST).unwrap();
    let widget = parse_manifest(WIDGET).unwrap();
    let options = MergeOptions::default();

    let (merged, summary) = merge_manifest(&host, &widget, &options);

    assert_eq!(summary.merged, 2);
    assert_eq!(
        names(merged.manifest.children("uses-permission")),
        vec!["android.permission.VIBRATE", "android.permission.INTERNET"]
    );
    let application = merged.application().unwrap();
    assert_eq!(names(application.children("receiver")), vec![".FooReceiver"]);
    assert_eq!(names(application.children("activity")), vec![".MainActivity"]);

    let (again, summary) = merge_manifest(&merged, &widget, &options);
    assert_eq!(summary.merged, 0);
    assert_eq!(again, merged);
}

#[test]
fn test_merged_manifest_renders_host_attributes() {
    let host = parse_manifest(HOST).unwrap();
    let widget = parse_manifest(WIDGET).unwrap();
    let (merged, _) = merge_manifest(&host, &widget, &MergeOptions::default());

    let rendered = render_manifest(&merged);

    assert!(rendered.contains("package=\"com.host.app\""));
    assert!(rendered.contains("<receiver android:exported=\"false\" android:name=\".FooReceiver\">"));
    assert_eq!(parse_manifest(&rendered).unwrap(), merged);
}

#[test]
fn test_manifest_tree_uses_xml2js_json_shape() {
    let widget = parse_manifest(WIDGET).unwrap();
    let value = serde_json::to_value(&widget).unwrap();

    assert_eq!(
        value["manifest"]["uses-permission"][0]["$"]["android:name"],
        json!("android.permission.INTERNET")
    );
    assert_eq!(
        value["manifest"]["application"][0]["receiver"][0]["$"]["android:name"],
        json!(".FooReceiver")
    );

    let back: AndroidManifest = serde_json::from_value(value).unwrap();
    assert_eq!(back, widget);
}

#[test]
fn test_host_json_with_text_nodes_deserializes() {
    let value = json!({
        "manifest": {
            "$": { "package": "com.host" },
            "application": [{
                "$": { "android:name": ".MainApplication" },
                "meta-data": [{ "$": { "android:name": "expo.modules.updates.ENABLED", "android:value": "false" } }]
            }],
            "queries": [{ "intent": [{ "action": [{ "$": { "android:name": "android.intent.action.VIEW" } }], "_": "" }] }]
        }
    });

    let manifest: AndroidManifest = serde_json::from_value(value).unwrap();

    assert_eq!(manifest.package(), Some("com.host"));
    assert_eq!(manifest.application().unwrap().children("meta-data").len(), 1);
    let kinds: Vec<_> = manifest.manifest.children.iter().map(|(k, _)| k).collect();
    assert_eq!(kinds, vec!["application", "queries"]);
}

fn element_strategy() -> impl Strategy<Value = Element> {
    (
        prop::option::of(prop::sample::select(vec![".A", ".B", ".C", "android.permission.X"])),
        prop::option::of("[a-z]{1,4}"),
    )
        .prop_map(|(name, extra)| {
            let mut element = Element::new();
            if let Some(name) = name {
                element = element.with_attr(NAME_ATTRIBUTE, name);
            }
            if let Some(extra) = extra {
                element = element.with_attr("android:label", extra);
            }
            element
        })
}

fn manifest_strategy() -> impl Strategy<Value = AndroidManifest> {
    (
        prop::collection::vec(element_strategy(), 0..4),
        prop::collection::vec(element_strategy(), 0..4),
        prop::collection::vec(element_strategy(), 0..4),
        any::<bool>(),
    )
        .prop_map(|(permissions, receivers, services, with_application)| {
            let mut root = Element::new();
            root.set_children("uses-permission", permissions);
            if with_application {
                let mut application = Element::new();
                application.set_children("receiver", receivers);
                application.set_children("service", services);
                root.push_child("application", application);
            }
            AndroidManifest::new(root)
        })
}

fn count_named(elements: &[Element], name: &str) -> usize {
    elements.iter().filter(|e| e.name() == Some(name)).count()
}

proptest! {
    #[test]
    fn test_manifest_merge_is_idempotent(host in manifest_strategy(), widget in manifest_strategy()) {
        let options = MergeOptions::default();
        let (once, _) = merge_manifest(&host, &widget, &options);
        let (twice, summary) = merge_manifest(&once, &widget, &options);

        prop_assert_eq!(summary.merged, 0);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn test_merge_never_duplicates_names(host in manifest_strategy(), widget in manifest_strategy()) {
        let (merged, _) = merge_manifest(&host, &widget, &MergeOptions::default());

        let mut lists = vec![(
            host.manifest.children("uses-permission"),
            widget.manifest.children("uses-permission"),
            merged.manifest.children("uses-permission"),
        )];
        if let (Some(host_app), Some(merged_app)) = (host.application(), merged.application()) {
            let widget_app = widget.application();
            for kind in ["receiver", "service"] {
                lists.push((
                    host_app.children(kind),
                    widget_app.map_or(&[][..], |app| app.children(kind)),
                    merged_app.children(kind),
                ));
            }
        }

        for (host_list, widget_list, merged_list) in lists {
            for name in names(widget_list) {
                let host_count = count_named(host_list, name);
                prop_assert_eq!(count_named(merged_list, name), host_count.max(1));
            }
        }
    }
}
