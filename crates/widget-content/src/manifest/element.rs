//! Manifest tree model
//!
//! Mirrors the JSON shape produced by xml2js: attributes under `$`, text
//! under `_`, and every child kind as an array keyed by its tag name.
//! Attributes and child kinds keep their document order through
//! serialization.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Attribute holding the merge identity of an element.
pub const NAME_ATTRIBUTE: &str = "android:name";

/// One XML element of the manifest tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "$", default, skip_serializing_if = "Attributes::is_empty")]
    pub attrs: Attributes,

    #[serde(rename = "_", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(flatten)]
    pub children: Children,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Builder-style child setter.
    pub fn with_child(mut self, kind: impl Into<String>, child: Element) -> Self {
        self.push_child(kind, child);
        self
    }

    /// The element's `android:name`, if any.
    pub fn name(&self) -> Option<&str> {
        self.attr(NAME_ATTRIBUTE)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key)
    }

    /// Children of one kind, empty when none exist.
    pub fn children(&self, kind: &str) -> &[Element] {
        self.children.get(kind).unwrap_or(&[])
    }

    pub fn children_mut(&mut self, kind: &str) -> Option<&mut Vec<Element>> {
        self.children.get_mut(kind)
    }

    /// Replace all children of one kind, keeping the kind's position.
    pub fn set_children(&mut self, kind: impl Into<String>, elements: Vec<Element>) {
        self.children.set(kind.into(), elements);
    }

    pub fn push_child(&mut self, kind: impl Into<String>, child: Element) {
        let kind = kind.into();
        match self.children.get_mut(&kind) {
            Some(list) => list.push(child),
            None => self.children.set(kind, vec![child]),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Attributes in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key`, replacing an existing value in place.
    pub fn insert(&mut self, key: String, value: String) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributesVisitor;

        impl<'de> Visitor<'de> for AttributesVisitor {
            type Value = Attributes;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of attribute names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Attributes, A::Error> {
                let mut attrs = Attributes::default();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    attrs.insert(key, value);
                }
                Ok(attrs)
            }
        }

        deserializer.deserialize_map(AttributesVisitor)
    }
}

/// Ordered map of child kind to elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children(Vec<(String, Vec<Element>)>);

impl Children {
    pub fn get(&self, kind: &str) -> Option<&[Element]> {
        self.0
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, v)| v.as_slice())
    }

    pub fn get_mut(&mut self, kind: &str) -> Option<&mut Vec<Element>> {
        self.0.iter_mut().find(|(k, _)| k == kind).map(|(_, v)| v)
    }

    pub fn set(&mut self, kind: String, elements: Vec<Element>) {
        match self.get_mut(&kind) {
            Some(list) => *list = elements,
            None => self.0.push((kind, elements)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Element])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|(_, v)| v.is_empty())
    }
}

impl Serialize for Children {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (kind, elements) in &self.0 {
            map.serialize_entry(kind, elements)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Children {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ChildrenVisitor;

        impl<'de> Visitor<'de> for ChildrenVisitor {
            type Value = Children;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of element kinds to element arrays")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Children, A::Error> {
                let mut children = Vec::new();
                while let Some((kind, elements)) = access.next_entry::<String, Vec<Element>>()? {
                    children.push((kind, elements));
                }
                Ok(Children(children))
            }
        }

        deserializer.deserialize_map(ChildrenVisitor)
    }
}

/// A complete manifest document rooted at `<manifest>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidManifest {
    pub manifest: Element,
}

impl AndroidManifest {
    pub fn new(manifest: Element) -> Self {
        Self { manifest }
    }

    /// The first `<application>` element.
    pub fn application(&self) -> Option<&Element> {
        self.manifest.children("application").first()
    }

    pub fn application_mut(&mut self) -> Option<&mut Element> {
        self.manifest
            .children_mut("application")
            .and_then(|apps| apps.first_mut())
    }

    /// The `package` attribute of the root element.
    pub fn package(&self) -> Option<&str> {
        self.manifest.attr("package")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn push_child_groups_by_kind_in_first_seen_order() {
        let mut root = Element::new();
        root.push_child("uses-permission", Element::new().with_attr(NAME_ATTRIBUTE, "a"));
        root.push_child("application", Element::new());
        root.push_child("uses-permission", Element::new().with_attr(NAME_ATTRIBUTE, "b"));

        let kinds: Vec<_> = root.children.iter().map(|(k, v)| (k, v.len())).collect();
        assert_eq!(kinds, vec![("uses-permission", 2), ("application", 1)]);
    }

    #[test]
    fn application_accessors_use_first_element() {
        let manifest = AndroidManifest::new(
            Element::new()
                .with_attr("package", "com.host")
                .with_child("application", Element::new().with_attr("android:label", "first"))
                .with_child("application", Element::new().with_attr("android:label", "second")),
        );

        assert_eq!(manifest.package(), Some("com.host"));
        assert_eq!(
            manifest.application().and_then(|a| a.attr("android:label")),
            Some("first")
        );
    }

    #[test]
    fn attributes_keep_insertion_order_and_replace_in_place() {
        let element = Element::new()
            .with_attr("xmlns:android", "http://schemas.android.com/apk/res/android")
            .with_attr("package", "com.host")
            .with_attr("xmlns:android", "urn:other");

        let keys: Vec<_> = element.attrs.iter().collect();
        assert_eq!(
            keys,
            vec![("xmlns:android", "urn:other"), ("package", "com.host")]
        );
    }

    #[test]
    fn empty_kind_lists_count_as_no_children() {
        let mut element = Element::new();
        element.set_children("receiver", Vec::new());
        assert!(!element.has_children());
        assert!(element.children("receiver").is_empty());
    }
}
