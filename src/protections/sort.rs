//! Ordering candidates by how closely their path matches

use super::table::Protection;

/// Most specific paths first
///
/// The sort is stable, so equally specific candidates keep the order they
/// came in (later table lines first, coming out of the filter).
pub fn by_specificity(mut prots: Vec<Protection>) -> Vec<Protection> {
    prots.sort_by(|a, b| b.specificity().cmp(&a.specificity()));
    prots
}

/// The leading run of candidates sharing the highest specificity
pub fn most_specific(sorted: &[Protection]) -> &[Protection] {
    let Some(first) = sorted.first() else {
        return sorted;
    };
    let end = sorted
        .iter()
        .position(|p| p.specificity() != first.specificity())
        .unwrap_or(sorted.len());
    &sorted[..end]
}
