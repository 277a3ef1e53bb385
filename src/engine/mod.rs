// mod.rs - Recovery engine module

pub mod lexical;
pub mod runner;

// Re-export main types for convenience
pub use runner::{SadSamCodeRecovery, SadSamRecovery, SamCodeRecovery};

/// Architecture model flavor accepted by the recovery runners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Pcm,
    Uml,
}

impl std::fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelFormat::Pcm => write!(f, "PCM"),
            ModelFormat::Uml => write!(f, "UML"),
        }
    }
}

/// A single recovered traceability link between two artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLink {
    pub source: String,
    pub target: String,
}

impl TraceLink {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Counts reported by a completed recovery run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoveryStats {
    pub trace_links: usize,
    pub inconsistencies: usize,
}
