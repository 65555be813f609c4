//! Relative path resolution and storage key construction
//!
//! Paths here are slash-delimited strings coming from drop payloads or user
//! input, not host filesystem paths, so nothing touches the disk.

use unicode_normalization::UnicodeNormalization;

fn is_dot_segment(segment: &str) -> bool {
    segment == "." || segment == ".."
}

/// Resolve `.` and `..` segments that follow the first real segment.
///
/// Leading dot segments are kept as-is because there is nothing before them to
/// collapse against: `../../foo/image.jpg` is returned unchanged, while
/// `foo/bar/baz/../../image.jpg` becomes `foo/image.jpg`. A `..` that has no
/// live ancestor left is dropped on its own. Empty segments (from `//` or a
/// trailing `/`) count as names a `..` can consume and are dropped when
/// reassembling.
pub fn resolve_relative_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();

    // Tombstoned slots are `None`; indices stay stable while ancestors are consumed.
    let mut slots: Vec<Option<&str>> = Vec::with_capacity(segments.len());
    let mut seen_real = false;

    for segment in segments {
        if seen_real && is_dot_segment(segment) {
            if segment == ".." {
                let ancestor = slots
                    .iter()
                    .rposition(|slot| matches!(slot, Some(s) if !is_dot_segment(s)));
                if let Some(index) = ancestor {
                    slots[index] = None;
                }
            }
            slots.push(None);
            continue;
        }
        if !is_dot_segment(segment) {
            seen_real = true;
        }
        slots.push(Some(segment));
    }

    slots
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Build a storage key from a prefix and a relative path.
///
/// The path is resolved first, then prefix and path are joined by exactly one
/// `/` and the result is normalized to Unicode NFC so composed and decomposed
/// spellings of a name map to the same key.
pub fn storage_key(prefix: &str, path: &str) -> String {
    let resolved = resolve_relative_path(path);
    let prefix = prefix.trim_end_matches('/');
    let joined = if prefix.is_empty() {
        resolved
    } else if resolved.is_empty() {
        prefix.to_string()
    } else {
        format!("{}/{}", prefix, resolved)
    };
    joined.nfc().collect()
}
