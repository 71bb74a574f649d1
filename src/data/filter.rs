use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::model::Dataset;
use super::normalize::{normalized_text, SENTINEL};

// ---------------------------------------------------------------------------
// Filter stages: cascading equality predicates over the normalized table
// ---------------------------------------------------------------------------

/// Option meaning "no constraint from this stage".
pub const WILDCARD: &str = "Todos";

/// One chosen filter stage: a column and either a concrete normalized value
/// or [`WILDCARD`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub column: String,
    pub value: String,
}

/// The selections accumulated so far, in stage order. Rebuilt from the UI
/// on every interaction; stages compose left-to-right.
pub type FilterState = Vec<Selection>;

/// View covering the whole dataset, in source order.
pub fn full_view(dataset: &Dataset) -> Vec<usize> {
    (0..dataset.len()).collect()
}

/// Option ordering: the sentinel sorts first, everything else ascending by
/// string form.
fn option_order(a: &str, b: &str) -> Ordering {
    (a != SENTINEL, a).cmp(&(b != SENTINEL, b))
}

/// Distinct values of `column` within `view`, sorted sentinel-first. This
/// is also the ordering the color domain follows.
pub fn distinct_values(dataset: &Dataset, view: &[usize], column: &str) -> Vec<String> {
    let distinct: BTreeSet<String> = view
        .iter()
        .map(|&row| normalized_text(dataset.cell(row, column)))
        .collect();
    let mut values: Vec<String> = distinct.into_iter().collect();
    values.sort_by(|a, b| option_order(a, b));
    values
}

/// Choices offered for one filter stage: the wildcard, then the distinct
/// values of the *current* view (cascading: never the full dataset).
pub fn options_for(dataset: &Dataset, view: &[usize], column: &str) -> Vec<String> {
    let mut options = vec![WILDCARD.to_string()];
    options.extend(distinct_values(dataset, view, column));
    options
}

/// Narrow `view` by one stage. The wildcard keeps the view as-is; any other
/// choice keeps rows whose value matches exactly. The sentinel is an
/// ordinary match target standing for "originally missing".
pub fn apply(dataset: &Dataset, view: &[usize], column: &str, choice: &str) -> Vec<usize> {
    if choice == WILDCARD {
        return view.to_vec();
    }
    view.iter()
        .copied()
        .filter(|&row| normalized_text(dataset.cell(row, column)) == choice)
        .collect()
}

/// Compose all stages left-to-right from the full view. An empty result is
/// a valid view, not an error.
pub fn apply_all(dataset: &Dataset, filters: &FilterState) -> Vec<usize> {
    let mut view = full_view(dataset);
    for sel in filters {
        view = apply(dataset, &view, &sel.column, &sel.value);
    }
    view
}
