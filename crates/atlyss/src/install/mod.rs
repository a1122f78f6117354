//! Installation module
//!
//! Classifies extracted mod archives and turns their listings into copy
//! instructions for the host.

pub mod classify;
pub mod entry;
pub mod instruction;
pub mod plan;
pub mod predicate;

// Re-export commonly used types
pub use classify::ContentClassifier;
pub use instruction::{ClassificationResult, InstallResult, Instruction};
pub use plan::InstallPlanner;
pub use predicate::ContentPredicate;
