//! Path helpers for archive entries
//!
//! Entries come straight from the host's extraction listing, so either
//! separator may appear. A trailing separator marks a directory.

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Whether the entry names a directory rather than a file
pub fn is_directory_marker(entry: &str) -> bool {
    entry.ends_with(is_separator)
}

/// Entry path without its trailing directory separators
pub fn trim_directory_marker(entry: &str) -> &str {
    entry.trim_end_matches(is_separator)
}

/// Byte offset at which the final path component starts
pub fn file_name_offset(entry: &str) -> usize {
    entry.rfind(is_separator).map(|i| i + 1).unwrap_or(0)
}

/// Final path component
pub fn file_name(entry: &str) -> &str {
    &entry[file_name_offset(entry)..]
}

/// Containing directory, empty for top-level entries
pub fn parent(entry: &str) -> &str {
    match file_name_offset(entry) {
        0 => "",
        offset => &entry[..offset - 1],
    }
}

/// Extension of the final component without the dot
///
/// Dotfiles such as `.config` have no extension.
pub fn extension(entry: &str) -> Option<&str> {
    let name = file_name(entry);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(i) => Some(&name[i + 1..]),
    }
}

/// Whether `entry` lies inside `root`; everything lies inside the empty root
pub fn is_within(entry: &str, root: &str) -> bool {
    if root.is_empty() {
        return true;
    }
    entry
        .strip_prefix(root)
        .and_then(|rest| rest.chars().next())
        .is_some_and(is_separator)
}
