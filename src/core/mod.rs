// mod.rs - Dispatcher core module

pub mod cleanup;
pub mod manager;
pub mod report;

// Re-export main types for convenience
pub use manager::PluginManager;
pub use report::{RunReport, RunStatus};
