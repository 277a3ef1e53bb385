// mod.rs - CLI module

pub mod config;
pub mod invocation;
pub mod merge;
pub mod options;

// Re-export main types for convenience
pub use config::FileConfig;
pub use invocation::Invocation;
pub use options::{OptionDef, OptionRegistry};
