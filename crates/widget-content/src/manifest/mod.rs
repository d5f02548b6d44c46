//! Android manifest tree, XML reader/writer and element merger

mod element;
mod merge;
mod xml;

pub use element::{AndroidManifest, Attributes, Children, Element, NAME_ATTRIBUTE};
pub use merge::{
    APPLICATION_ELEMENTS, DEFAULT_ELEMENTS, MergeOptions, MergeRule, MergeSummary, dedup_by_name,
    merge_manifest,
};
pub use xml::{parse_manifest, render_manifest};
