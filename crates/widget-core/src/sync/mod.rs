//! Synchronization engine and its reports

mod engine;
mod report;
mod status;

pub use engine::{SyncEngine, widget_sources};
pub use report::SyncReport;
pub use status::{AssetKind, AssetStatus, StatusReport};
