//! Shared test utilities for the widget-sync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: golden widget and host files from `test-fixtures/`
//! - [`project`]: [`TestProject`] builder for temporary Expo-style projects

pub mod fixtures;
pub mod project;

pub use project::TestProject;
