//! Typed Android resource documents
//!
//! Each resource file kind has its own parse/render pair. Parsing is pattern
//! based; a document whose markup is not fully consumed by the patterns for
//! its sniffed kind degrades to [`ResourceDocument::Generic`] instead of
//! silently losing entries.

use regex::Regex;
use std::sync::LazyLock;

/// Standard declaration written at the top of rendered resource files.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<!--[\s\S]*?-->").unwrap());

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<\?xml[^>]*\?>").unwrap());

static RESOURCES_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?resources\b[^>]*>").unwrap());

static NAME_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:^|\s)name\s*=\s*"([^"]*)""#).unwrap());

static PARENT_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:^|\s)parent\s*=\s*"([^"]*)""#).unwrap());

static ROOT_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*(?:<\?xml[^>]*\?>\s*)?(?:<!--.*?-->\s*)*<[A-Za-z_][\w:.-]*([^>]*?)/?>").unwrap()
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][\w:.-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

static STRING_ENTRY: LazyLock<Regex> = LazyLock::new(|| element_pattern("string"));
static COLOR_ENTRY: LazyLock<Regex> = LazyLock::new(|| element_pattern("color"));
static DIMEN_ENTRY: LazyLock<Regex> = LazyLock::new(|| element_pattern("dimen"));
static STYLE_ENTRY: LazyLock<Regex> = LazyLock::new(|| element_pattern("style"));
static STYLE_ITEM: LazyLock<Regex> = LazyLock::new(|| element_pattern("item"));

/// Matches `<tag attrs/>` or `<tag attrs>body</tag>`, capturing attrs and body.
fn element_pattern(tag: &str) -> Regex {
    Regex::new(&format!(
        r"<{tag}\s+([^>]*?)\s*(?:/>|>([\s\S]*?)</{tag}\s*>)"
    ))
    .unwrap()
}

/// Category of an Android resource file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Strings,
    Colors,
    Dimens,
    Styles,
    Generic,
}

impl ResourceKind {
    /// Sniff the kind from raw content.
    ///
    /// Checks run in a fixed order; a file mixing several value types is
    /// sniffed by the first match and later rejected by the typed parser.
    pub fn sniff(content: &str) -> Self {
        if !content.contains("<resources") {
            return Self::Generic;
        }
        if content.contains("<string") {
            Self::Strings
        } else if content.contains("<color") {
            Self::Colors
        } else if content.contains("<dimen") {
            Self::Dimens
        } else if content.contains("<style") {
            Self::Styles
        } else {
            Self::Generic
        }
    }

    /// Element tag used for entries of this kind.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Self::Strings => Some("string"),
            Self::Colors => Some("color"),
            Self::Dimens => Some("dimen"),
            Self::Styles => Some("style"),
            Self::Generic => None,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Strings => "strings",
            Self::Colors => "colors",
            Self::Dimens => "dimens",
            Self::Styles => "styles",
            Self::Generic => "generic",
        };
        f.write_str(name)
    }
}

/// Attributes of a document's root element, in document order.
///
/// Namespace declarations live here, so entries carrying prefixed attributes
/// such as `tools:ignore` stay bound after a re-render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootAttributes(Vec<(String, String)>);

impl RootAttributes {
    /// Attributes of the first element of `content`; empty when there is none.
    pub fn parse(content: &str) -> Self {
        let Some(caps) = ROOT_OPEN.captures(content) else {
            return Self::default();
        };
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        Self(
            ATTRIBUTE
                .captures_iter(attrs)
                .map(|c| {
                    let value = c.get(2).or_else(|| c.get(3)).map_or("", |m| m.as_str());
                    (c[1].to_string(), value.to_string())
                })
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Namespace declarations of `other` that this root does not declare.
    pub fn missing_namespaces(&self, other: &Self) -> Self {
        Self(
            other
                .0
                .iter()
                .filter(|(key, _)| is_namespace(key) && self.get(key).is_none())
                .cloned()
                .collect(),
        )
    }

    /// This root plus the namespace declarations only `other` has.
    pub fn with_namespaces_from(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        merged.0.extend(self.missing_namespaces(other).0);
        merged
    }

    /// ` key="value"` pairs ready to splice into an opening tag.
    pub fn to_attribute_string(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| format!(" {key}=\"{}\"", value.replace('"', "&quot;")))
            .collect()
    }
}

fn is_namespace(key: &str) -> bool {
    key == "xmlns" || key.starts_with("xmlns:")
}

/// Entries that merge by resource name.
pub trait NamedEntry {
    fn name(&self) -> &str;
}

/// A `<string>`, `<color>` or `<dimen>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueEntry {
    pub name: String,
    pub value: String,
    /// Attributes other than `name`, kept verbatim (e.g. `translatable="false"`)
    pub extra_attrs: String,
}

impl ValueEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            extra_attrs: String::new(),
        }
    }
}

impl NamedEntry for ValueEntry {
    fn name(&self) -> &str {
        &self.name
    }
}

/// One `<item>` of a style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleItem {
    pub name: String,
    pub value: String,
    /// Attributes other than `name` (e.g. `tools:targetApi="35"`)
    pub extra_attrs: String,
}

impl StyleItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            extra_attrs: String::new(),
        }
    }
}

/// A `<style>` entry with optional parent and ordered items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    pub name: String,
    pub parent: Option<String>,
    pub items: Vec<StyleItem>,
    /// Attributes other than `name` and `parent`
    pub extra_attrs: String,
}

impl NamedEntry for StyleEntry {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A parsed resource file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceDocument {
    Strings(Vec<ValueEntry>),
    Colors(Vec<ValueEntry>),
    Dimens(Vec<ValueEntry>),
    Styles(Vec<StyleEntry>),
    /// Anything the typed parsers cannot fully account for, kept as raw text
    Generic(String),
}

impl ResourceDocument {
    /// Parse content into the variant matching its sniffed kind.
    pub fn parse(content: &str) -> Self {
        let kind = ResourceKind::sniff(content);
        let body = strip_envelope(content);

        let parsed = match kind {
            ResourceKind::Strings => parse_values(&body, &STRING_ENTRY).map(Self::Strings),
            ResourceKind::Colors => parse_values(&body, &COLOR_ENTRY).map(Self::Colors),
            ResourceKind::Dimens => parse_values(&body, &DIMEN_ENTRY).map(Self::Dimens),
            ResourceKind::Styles => parse_styles(&body).map(Self::Styles),
            ResourceKind::Generic => None,
        };

        parsed.unwrap_or_else(|| {
            if kind != ResourceKind::Generic {
                tracing::debug!(%kind, "Resource content not fully recognised, treating as generic");
            }
            Self::Generic(content.to_string())
        })
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Strings(_) => ResourceKind::Strings,
            Self::Colors(_) => ResourceKind::Colors,
            Self::Dimens(_) => ResourceKind::Dimens,
            Self::Styles(_) => ResourceKind::Styles,
            Self::Generic(_) => ResourceKind::Generic,
        }
    }

    /// Number of named entries (zero for generic documents).
    pub fn len(&self) -> usize {
        match self {
            Self::Strings(v) | Self::Colors(v) | Self::Dimens(v) => v.len(),
            Self::Styles(v) => v.len(),
            Self::Generic(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a value entry by name.
    pub fn value(&self, name: &str) -> Option<&str> {
        match self {
            Self::Strings(v) | Self::Colors(v) | Self::Dimens(v) => v
                .iter()
                .find(|e| e.name == name)
                .map(|e| e.value.as_str()),
            Self::Styles(_) | Self::Generic(_) => None,
        }
    }

    /// Render as a canonical `<resources>` document (generic content verbatim).
    pub fn render(&self) -> String {
        self.render_with_root(&RootAttributes::default())
    }

    /// Like [`render`](Self::render), with `root` on the `<resources>` element.
    pub fn render_with_root(&self, root: &RootAttributes) -> String {
        match self {
            Self::Strings(entries) => render_values("string", entries, root),
            Self::Colors(entries) => render_values("color", entries, root),
            Self::Dimens(entries) => render_values("dimen", entries, root),
            Self::Styles(entries) => render_styles(entries, root),
            Self::Generic(raw) => raw.clone(),
        }
    }
}

/// Remove comments, the XML declaration and the `<resources>` wrapper.
fn strip_envelope(content: &str) -> String {
    let without_comments = COMMENT.replace_all(content, "");
    let without_decl = DECLARATION.replace_all(&without_comments, "");
    RESOURCES_TAG.replace_all(&without_decl, "").into_owned()
}

fn attr(pattern: &Regex, attrs: &str) -> Option<String> {
    pattern.captures(attrs).map(|c| c[1].to_string())
}

/// Attributes left after removing the `consumed` ones, single-space separated.
fn remaining_attrs(attrs: &str, consumed: &[&Regex]) -> String {
    let mut rest = attrs.to_string();
    for pattern in consumed {
        rest = pattern.replace(&rest, "").into_owned();
    }
    ATTRIBUTE
        .find_iter(&rest)
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn with_space(extra: &str) -> String {
    if extra.is_empty() {
        String::new()
    } else {
        format!(" {extra}")
    }
}

fn parse_values(body: &str, pattern: &Regex) -> Option<Vec<ValueEntry>> {
    let mut entries = Vec::new();
    for caps in pattern.captures_iter(body) {
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        let name = attr(&NAME_ATTR, attrs)?;
        let extra_attrs = remaining_attrs(attrs, &[&*NAME_ATTR]);
        let value = caps.get(2).map_or("", |m| m.as_str()).to_string();
        entries.push(ValueEntry {
            name,
            value,
            extra_attrs,
        });
    }

    let leftover = pattern.replace_all(body, "");
    (!entries.is_empty() && leftover.trim().is_empty()).then_some(entries)
}

fn parse_styles(body: &str) -> Option<Vec<StyleEntry>> {
    let mut entries = Vec::new();
    for caps in STYLE_ENTRY.captures_iter(body) {
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        let name = attr(&NAME_ATTR, attrs)?;
        let parent = attr(&PARENT_ATTR, attrs);
        let inner = caps.get(2).map_or("", |m| m.as_str());

        let mut items = Vec::new();
        for item in STYLE_ITEM.captures_iter(inner) {
            let item_attrs = item.get(1).map_or("", |m| m.as_str());
            items.push(StyleItem {
                name: attr(&NAME_ATTR, item_attrs)?,
                value: item.get(2).map_or("", |m| m.as_str()).trim().to_string(),
                extra_attrs: remaining_attrs(item_attrs, &[&*NAME_ATTR]),
            });
        }
        if !STYLE_ITEM.replace_all(inner, "").trim().is_empty() {
            return None;
        }

        entries.push(StyleEntry {
            name,
            parent,
            items,
            extra_attrs: remaining_attrs(attrs, &[&*NAME_ATTR, &*PARENT_ATTR]),
        });
    }

    let leftover = STYLE_ENTRY.replace_all(body, "");
    (!entries.is_empty() && leftover.trim().is_empty()).then_some(entries)
}

fn render_values(tag: &str, entries: &[ValueEntry], root: &RootAttributes) -> String {
    let mut out = format!("{XML_DECLARATION}\n<resources{}>\n", root.to_attribute_string());
    for entry in entries {
        out.push_str(&format!(
            "    <{tag} name=\"{}\"{}>{}</{tag}>\n",
            entry.name,
            with_space(&entry.extra_attrs),
            entry.value
        ));
    }
    out.push_str("</resources>\n");
    out
}

fn render_styles(entries: &[StyleEntry], root: &RootAttributes) -> String {
    let mut out = format!("{XML_DECLARATION}\n<resources{}>\n", root.to_attribute_string());
    for style in entries {
        let parent = style
            .parent
            .as_ref()
            .map(|p| format!(" parent=\"{p}\""))
            .unwrap_or_default();
        let open = format!("<style name=\"{}\"{parent}{}", style.name, with_space(&style.extra_attrs));
        if style.items.is_empty() {
            out.push_str(&format!("    {open} />\n"));
            continue;
        }
        out.push_str(&format!("    {open}>\n"));
        for item in &style.items {
            out.push_str(&format!(
                "        <item name=\"{}\"{}>{}</item>\n",
                item.name,
                with_space(&item.extra_attrs),
                item.value
            ));
        }
        out.push_str("    </style>\n");
    }
    out.push_str("</resources>\n");
    out
}
