use thiserror::Error;

use super::model::SeriesCollection;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("No valid geckos specified")]
    NoValidSeries,
}

/// Intersect `discovered` with an optional allow-list.
///
/// * `wanted` empty → every discovered item, in discovery order
/// * otherwise      → the items of `wanted` that were discovered, in
///   `wanted`'s order; unknown items are dropped, repeats kept once
pub fn ordered_intersection<T: PartialEq + Clone>(discovered: &[T], wanted: &[T]) -> Vec<T> {
    if wanted.is_empty() {
        return discovered.to_vec();
    }
    let mut out: Vec<T> = Vec::with_capacity(wanted.len());
    for item in wanted {
        if discovered.contains(item) && !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}

/// Prune and reorder `collection` to the allow-list.
///
/// An empty result is an error: there is nothing to draw.
pub fn select_series(
    mut collection: SeriesCollection,
    wanted: &[String],
) -> Result<SeriesCollection, SelectError> {
    let names = ordered_intersection(&collection.names(), wanted);
    if names.is_empty() {
        return Err(SelectError::NoValidSeries);
    }
    collection.retain_ordered(&names);
    Ok(collection)
}
