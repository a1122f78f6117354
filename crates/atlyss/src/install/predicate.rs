//! Content predicate deciding which archive entries count as mod content

use std::collections::BTreeSet;

use super::entry;

/// Which archive entries count as installable content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPredicate {
    /// Every entry is content, directories included
    AcceptAll,
    /// Only files whose extension is in the set (lowercase, no dot)
    ExtensionIn(BTreeSet<String>),
}

impl ContentPredicate {
    /// Build an extension predicate, normalising case and leading dots
    pub fn extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::ExtensionIn(
            extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        )
    }

    /// Whether an archive entry is content under this predicate
    ///
    /// Directory markers have no extension, so only `AcceptAll` matches them.
    pub fn matches(&self, archive_entry: &str) -> bool {
        match self {
            Self::AcceptAll => true,
            Self::ExtensionIn(allowed) => entry::extension(archive_entry)
                .is_some_and(|ext| allowed.contains(&ext.to_ascii_lowercase())),
        }
    }

    /// First matching entry in listing order
    pub fn find_first<'a>(&self, entries: &'a [String]) -> Option<&'a str> {
        entries
            .iter()
            .map(String::as_str)
            .find(|candidate| self.matches(candidate))
    }
}
