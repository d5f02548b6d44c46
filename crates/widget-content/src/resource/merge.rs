//! Resource XML merging
//!
//! Same-kind typed documents are unioned by name with the incoming side
//! winning. Everything else is merged textually under a shared root tag, or
//! replaced when the roots differ. Root attributes of the target are kept and
//! namespace declarations only the incoming side carries are added to them.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use super::document::{NamedEntry, ResourceDocument, ResourceKind, RootAttributes};
use widget_fs::io;

static ROOT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*(?:<\?xml[^>]*\?>\s*)?(?:<!--.*?-->\s*)*<([A-Za-z_][\w:.-]*)\b[^>]*?(/?)>").unwrap()
});

/// How a merge produced its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Target did not exist, source copied verbatim
    Copied,
    /// Same-kind typed union
    Typed(ResourceKind),
    /// Incoming body appended under the target's root element
    Concatenated,
    /// Target already holds the incoming content
    Unchanged,
    /// Roots differ, source replaces target
    Replaced,
}

/// Result of merging two resource documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMerge {
    pub content: String,
    pub strategy: MergeStrategy,
}

impl ResourceMerge {
    fn new(content: impl Into<String>, strategy: MergeStrategy) -> Self {
        Self {
            content: content.into(),
            strategy,
        }
    }
}

/// Union two entry lists by name, incoming winning on collisions.
///
/// Target order is kept; new incoming names are appended in their own order.
pub fn union_by_name<T: NamedEntry + Clone>(target: &[T], incoming: &[T]) -> Vec<T> {
    let mut merged: Vec<T> = Vec::with_capacity(target.len() + incoming.len());
    for entry in target.iter().chain(incoming) {
        match merged.iter_mut().find(|e| e.name() == entry.name()) {
            Some(existing) => *existing = entry.clone(),
            None => merged.push(entry.clone()),
        }
    }
    merged
}

/// Merge `incoming` resource content into `target` content.
pub fn merge_documents(target: &str, incoming: &str) -> ResourceMerge {
    let target_doc = ResourceDocument::parse(target);
    let incoming_doc = ResourceDocument::parse(incoming);

    let typed = match (&target_doc, &incoming_doc) {
        (ResourceDocument::Strings(t), ResourceDocument::Strings(i)) => {
            Some(ResourceDocument::Strings(union_by_name(t, i)))
        }
        (ResourceDocument::Colors(t), ResourceDocument::Colors(i)) => {
            Some(ResourceDocument::Colors(union_by_name(t, i)))
        }
        (ResourceDocument::Dimens(t), ResourceDocument::Dimens(i)) => {
            Some(ResourceDocument::Dimens(union_by_name(t, i)))
        }
        (ResourceDocument::Styles(t), ResourceDocument::Styles(i)) => {
            Some(ResourceDocument::Styles(union_by_name(t, i)))
        }
        _ => None,
    };

    if let Some(doc) = typed {
        let kind = doc.kind();
        let target_root = RootAttributes::parse(target);
        let root = target_root.with_namespaces_from(&RootAttributes::parse(incoming));
        if doc == target_doc && root == target_root {
            return ResourceMerge::new(target, MergeStrategy::Unchanged);
        }
        return ResourceMerge::new(doc.render_with_root(&root), MergeStrategy::Typed(kind));
    }

    merge_generic(target, incoming)
}

fn merge_generic(target: &str, incoming: &str) -> ResourceMerge {
    if normalize(target) == normalize(incoming) {
        return ResourceMerge::new(target, MergeStrategy::Unchanged);
    }

    let (Some((target_root, target_empty)), Some((incoming_root, _))) =
        (root_tag(target), root_tag(incoming))
    else {
        tracing::info!("Resource root not recognised, replacing target");
        return ResourceMerge::new(incoming, MergeStrategy::Replaced);
    };

    if target_root != incoming_root || target_empty {
        tracing::info!(
            target = %target_root,
            incoming = %incoming_root,
            "Resource roots differ, replacing target"
        );
        return ResourceMerge::new(incoming, MergeStrategy::Replaced);
    }

    let body = inner_content(incoming, &incoming_root).unwrap_or_default();
    let body = body.trim();
    if body.is_empty() || normalize(target).contains(&normalize(body)) {
        return ResourceMerge::new(target, MergeStrategy::Unchanged);
    }

    let missing = RootAttributes::parse(target).missing_namespaces(&RootAttributes::parse(incoming));
    let target = declare_namespaces(target, &missing);
    let closing = format!("</{target_root}>");
    match target.rfind(&closing) {
        Some(pos) => {
            let mut content = String::with_capacity(target.len() + body.len() + 8);
            content.push_str(target[..pos].trim_end());
            content.push_str("\n    ");
            content.push_str(body);
            content.push('\n');
            content.push_str(&target[pos..]);
            ResourceMerge::new(content, MergeStrategy::Concatenated)
        }
        None => ResourceMerge::new(incoming, MergeStrategy::Replaced),
    }
}

/// Splice `namespaces` into the opening tag of a non-self-closing root.
fn declare_namespaces(content: &str, namespaces: &RootAttributes) -> String {
    match ROOT_TAG.find(content) {
        Some(open) if !namespaces.is_empty() => {
            let at = open.end() - 1;
            format!("{}{}{}", &content[..at], namespaces.to_attribute_string(), &content[at..])
        }
        _ => content.to_string(),
    }
}

/// Root element name and whether it is self-closing.
fn root_tag(content: &str) -> Option<(String, bool)> {
    ROOT_TAG
        .captures(content)
        .map(|c| (c[1].to_string(), !c[2].is_empty()))
}

fn inner_content(content: &str, root: &str) -> Option<String> {
    let open_end = ROOT_TAG.find(content)?.end();
    let close = content.rfind(&format!("</{root}>"))?;
    (close >= open_end).then(|| content[open_end..close].to_string())
}

fn normalize(content: &str) -> String {
    content.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Merge the resource file at `source` into `target` on disk.
///
/// A missing target receives a verbatim copy. Returns `false` when the files
/// could not be read or written; the failure is logged, never raised.
pub fn merge_files(source: &Path, target: &Path) -> bool {
    merge_file_strategy(source, target).is_some()
}

/// Like [`merge_files`], returning how the target was produced.
pub fn merge_file_strategy(source: &Path, target: &Path) -> Option<MergeStrategy> {
    let result = if target.exists() {
        io::read_text(source).and_then(|incoming| {
            let existing = io::read_text(target)?;
            let merged = merge_documents(&existing, &incoming);
            if merged.strategy != MergeStrategy::Unchanged {
                io::write_text(target, &merged.content)?;
            }
            Ok(merged.strategy)
        })
    } else {
        io::copy_file(source, target).map(|()| MergeStrategy::Copied)
    };

    match result {
        Ok(strategy) => {
            tracing::debug!(target = %target.display(), ?strategy, "Merged resource file");
            Some(strategy)
        }
        Err(e) => {
            tracing::warn!(target = %target.display(), error = %e, "Failed to merge resource file");
            None
        }
    }
}
