//! Resource, manifest and Kotlin source merging
//!
//! Pure string and tree transformations used when widget assets are copied
//! into a host Android project:
//!
//! - [`resource`]: typed Android resource documents and the XML merger
//! - [`manifest`]: the manifest tree, its XML reader/writer and the element merger
//! - [`kotlin`]: package declaration rewriting for relocated sources

pub mod error;
pub mod kotlin;
pub mod manifest;
pub mod resource;

pub use error::{Error, Result};
pub use kotlin::{RewriteOutcome, rewrite_file, rewrite_source, subpackage};
pub use manifest::{AndroidManifest, Element, MergeOptions, MergeRule, MergeSummary, merge_manifest};
pub use resource::{MergeStrategy, ResourceDocument, ResourceKind, ResourceMerge, merge_documents};
