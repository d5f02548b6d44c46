//! Manifest element merging
//!
//! Merges manifest-level and application-level elements of a widget manifest
//! fragment into a host manifest. The merge is pure: the host tree is cloned
//! and the merged copy returned alongside a summary.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use super::element::{AndroidManifest, Element};

/// Element kinds that live under `<application>`.
pub const APPLICATION_ELEMENTS: &[&str] = &[
    "activity",
    "activity-alias",
    "receiver",
    "service",
    "provider",
    "meta-data",
    "uses-library",
];

/// Element kinds merged when no explicit list is configured.
pub const DEFAULT_ELEMENTS: &[&str] = &[
    "uses-permission",
    "receiver",
    "service",
    "activity",
    "provider",
];

/// Kinds that get [`dedup_by_name`] registered by default.
const DEDUP_ELEMENTS: &[&str] = &[
    "receiver",
    "uses-permission",
    "activity",
    "service",
    "provider",
];

/// Custom merge for one element kind: `(existing, incoming) -> merged`.
pub type MergeRule = Arc<dyn Fn(&[Element], &[Element]) -> Vec<Element> + Send + Sync>;

/// Controls which elements are merged and how.
#[derive(Clone)]
pub struct MergeOptions {
    pub elements_to_merge: Vec<String>,
    pub merge_application_elements: bool,
    pub merge_manifest_elements: bool,
    pub custom_rules: HashMap<String, MergeRule>,
}

impl MergeOptions {
    /// Options merging the given kinds, with no custom rules registered.
    pub fn for_elements<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements_to_merge: elements.into_iter().map(Into::into).collect(),
            merge_application_elements: true,
            merge_manifest_elements: true,
            custom_rules: HashMap::new(),
        }
    }

    /// Register or replace the rule for an element kind.
    pub fn with_rule(mut self, kind: impl Into<String>, rule: MergeRule) -> Self {
        self.custom_rules.insert(kind.into(), rule);
        self
    }

    /// Register [`dedup_by_name`] for the standard component kinds.
    pub fn with_default_rules(mut self) -> Self {
        for kind in DEDUP_ELEMENTS {
            self.custom_rules
                .entry((*kind).to_string())
                .or_insert_with(|| Arc::new(dedup_by_name) as MergeRule);
        }
        self
    }

    fn merge_kind(&self, kind: &str, existing: &[Element], incoming: &[Element]) -> Vec<Element> {
        match self.custom_rules.get(kind) {
            Some(rule) => rule(existing, incoming),
            None => existing.iter().chain(incoming).cloned().collect(),
        }
    }
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self::for_elements(DEFAULT_ELEMENTS.iter().copied()).with_default_rules()
    }
}

impl fmt::Debug for MergeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rules: Vec<_> = self.custom_rules.keys().collect();
        rules.sort();
        f.debug_struct("MergeOptions")
            .field("elements_to_merge", &self.elements_to_merge)
            .field("merge_application_elements", &self.merge_application_elements)
            .field("merge_manifest_elements", &self.merge_manifest_elements)
            .field("custom_rules", &rules)
            .finish()
    }
}

/// Keep existing elements and append incoming ones whose `android:name` is new.
///
/// Names repeated within `incoming` are added once. Unnamed incoming elements
/// are kept unless an identical element is already present.
pub fn dedup_by_name(existing: &[Element], incoming: &[Element]) -> Vec<Element> {
    let mut merged = existing.to_vec();
    for element in incoming {
        let present = match element.name() {
            Some(name) => merged.iter().any(|e| e.name() == Some(name)),
            None => merged.contains(element),
        };
        if !present {
            merged.push(element.clone());
        }
    }
    merged
}

/// Outcome of a manifest merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Total number of elements added to the host
    pub merged: usize,
    /// Elements added per kind
    pub per_element: BTreeMap<String, usize>,
}

impl MergeSummary {
    fn record(&mut self, kind: &str, added: usize) {
        if added > 0 {
            *self.per_element.entry(kind.to_string()).or_default() += added;
            self.merged += added;
        }
    }
}

/// Merge `widget` into a copy of `host`.
///
/// Manifest-level kinds are merged into the root element, application-level
/// kinds into the host's first `<application>`. Kinds missing from the widget
/// and a host without an application element are logged and skipped.
pub fn merge_manifest(
    host: &AndroidManifest,
    widget: &AndroidManifest,
    options: &MergeOptions,
) -> (AndroidManifest, MergeSummary) {
    let mut merged = host.clone();
    let mut summary = MergeSummary::default();

    for kind in &options.elements_to_merge {
        if APPLICATION_ELEMENTS.contains(&kind.as_str()) {
            if !options.merge_application_elements {
                continue;
            }
            let Some(incoming) = widget.application().map(|a| a.children(kind)) else {
                tracing::debug!(element = %kind, "Widget manifest has no application element");
                continue;
            };
            if incoming.is_empty() {
                tracing::debug!(element = %kind, "No widget elements to merge");
                continue;
            }
            let Some(application) = merged.application_mut() else {
                tracing::warn!(element = %kind, "Host manifest has no application element, skipping");
                continue;
            };
            let added = merge_into(application, kind, incoming, options);
            summary.record(kind, added);
        } else {
            if !options.merge_manifest_elements {
                continue;
            }
            let incoming = widget.manifest.children(kind);
            if incoming.is_empty() {
                tracing::debug!(element = %kind, "No widget elements to merge");
                continue;
            }
            let added = merge_into(&mut merged.manifest, kind, incoming, options);
            summary.record(kind, added);
        }
    }

    tracing::debug!(merged = summary.merged, "Manifest merge complete");
    (merged, summary)
}

fn merge_into(parent: &mut Element, kind: &str, incoming: &[Element], options: &MergeOptions) -> usize {
    let existing = parent.children(kind);
    let combined = options.merge_kind(kind, existing, incoming);
    if combined.as_slice() == existing {
        return 0;
    }
    let added = combined.len().saturating_sub(existing.len());
    tracing::debug!(element = %kind, added, "Merged manifest elements");
    parent.set_children(kind, combined);
    added
}
