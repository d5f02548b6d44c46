//! Command implementations

mod options;
mod plugin;
mod status;
mod sync;

pub use plugin::run_plugin;
pub use status::run_status;
pub use sync::run_sync;
