// mod.rs - Task plugin module

pub mod sad_code;
pub mod sad_sam;
pub mod sam_code;
pub mod traits;

// Re-export main types for convenience
pub use sad_code::SadCodePlugin;
pub use sad_sam::SadSamPlugin;
pub use sam_code::SamCodePlugin;
pub use traits::{ensure_path, project_name_option, require_value, TaskPlugin};
