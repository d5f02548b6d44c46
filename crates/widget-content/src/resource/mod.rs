//! Android resource documents and the resource XML merger

mod document;
mod merge;

pub use document::{
    NamedEntry, ResourceDocument, ResourceKind, RootAttributes, StyleEntry, StyleItem,
    ValueEntry, XML_DECLARATION,
};
pub use merge::{
    MergeStrategy, ResourceMerge, merge_documents, merge_file_strategy, merge_files, union_by_name,
};
