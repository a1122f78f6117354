//! Setup module
//!
//! Prepares a discovered game installation for modding.

pub mod fs;
pub mod stager;

pub use fs::{FileSystem, LocalFileSystem};
pub use stager::DependencyStager;
