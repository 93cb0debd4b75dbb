use crate::catalog::GameEntry;

/// Indices into `entries` of the titles containing `query` as a contiguous
/// substring, compared case-insensitively.
///
/// Relative order is preserved and an empty query matches everything. The
/// query is used exactly as typed, without trimming, so a leading space only
/// matches titles that contain one.
pub fn matching_indices(entries: &[GameEntry], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..entries.len()).collect();
    }

    let needle = query.to_lowercase();
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.title.to_lowercase().contains(&needle))
        .map(|(idx, _)| idx)
        .collect()
}
