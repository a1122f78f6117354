//! Install instructions handed back to the host

use serde::{Deserialize, Serialize};

/// One step the host executes while staging a mod
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Instruction {
    /// Copy an extracted archive entry into the mod staging area
    Copy {
        /// Entry path as listed in the archive
        source: String,
        /// Destination relative to the mod staging folder
        destination: String,
    },
}

impl Instruction {
    pub fn copy(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::Copy {
            source: source.into(),
            destination: destination.into(),
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Self::Copy { source, .. } => source,
        }
    }

    pub fn destination(&self) -> &str {
        match self {
            Self::Copy { destination, .. } => destination,
        }
    }
}

/// Result of the install hook
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallResult {
    pub instructions: Vec<Instruction>,
}

/// Result of the supported-content hook
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub supported: bool,
    /// Companion files the archive must also contain
    pub required_files: Vec<String>,
}

impl ClassificationResult {
    pub fn unsupported() -> Self {
        Self::default()
    }

    pub fn supported() -> Self {
        Self {
            supported: true,
            required_files: Vec::new(),
        }
    }
}
