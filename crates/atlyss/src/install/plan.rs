//! Install planning
//!
//! Mods are often packed inside a wrapper folder. The first content entry
//! (the anchor) tells us where the real mod root is; everything under that
//! root is copied with the root prefix stripped.

use tracing::debug;

use super::entry;
use super::instruction::Instruction;
use super::predicate::ContentPredicate;
use crate::error::{ExtensionError, Result};

/// Turns archive listings into copy instructions
#[derive(Debug, Clone)]
pub struct InstallPlanner {
    predicate: ContentPredicate,
}

/// Where the archive's mod content lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRoot<'a> {
    /// First entry matching the content predicate
    pub anchor: &'a str,
    /// Directory containing the anchor, empty at the top level
    pub root: &'a str,
    /// Offset of the anchor's file name within the anchor path
    pub strip_offset: usize,
}

impl InstallPlanner {
    pub fn new(predicate: ContentPredicate) -> Self {
        Self { predicate }
    }

    /// Locate the anchor entry and the root it implies
    ///
    /// A directory anchor is treated like a file named after its last
    /// component, so `BepInEx/` anchors at the top level.
    pub fn detect_root<'a>(&self, entries: &'a [String]) -> Option<ArchiveRoot<'a>> {
        let anchor = self.predicate.find_first(entries)?;
        let anchor_path = entry::trim_directory_marker(anchor);
        Some(ArchiveRoot {
            anchor,
            root: entry::parent(anchor_path),
            strip_offset: entry::file_name_offset(anchor_path),
        })
    }

    /// Compute copy instructions for an archive listing
    pub fn plan(&self, entries: &[String]) -> Result<Vec<Instruction>> {
        let root = self
            .detect_root(entries)
            .ok_or(ExtensionError::NoInstallableContent {
                entries: entries.len(),
            })?;

        debug!(
            "Planning install from anchor '{}' (root '{}')",
            root.anchor, root.root
        );

        let instructions: Vec<Instruction> = entries
            .iter()
            .filter(|e| entry::is_within(e, root.root) && !entry::is_directory_marker(e))
            .map(|e| Instruction::copy(e.as_str(), &e[root.strip_offset..]))
            .collect();

        debug!(
            "Planned {} copy instructions from {} entries",
            instructions.len(),
            entries.len()
        );

        Ok(instructions)
    }
}
