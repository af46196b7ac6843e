//! Filtered and sorted item view.
//!
//! The view is a list of indices into the caller's items. It is rebuilt on
//! every use so it always reflects the current items and value.

use std::cmp::Ordering;

/// Predicate deciding whether an item is shown for the current value.
pub type ShouldItemRender<T> = dyn Fn(&T, &str) -> bool;

/// Comparator ordering two shown items for the current value.
pub type SortItems<T> = dyn Fn(&T, &T, &str) -> Ordering;

/// Build the derived view of `items` for `value`.
///
/// Items are kept when `should_render` accepts them (all items without a
/// predicate), then stably ordered by `sort` when one is given.
pub fn filter_items<T>(
    items: &[T],
    value: &str,
    should_render: Option<&ShouldItemRender<T>>,
    sort: Option<&SortItems<T>>,
) -> Vec<usize> {
    let mut view: Vec<usize> = match should_render {
        Some(keep) => items
            .iter()
            .enumerate()
            .filter(|(_, item)| keep(item, value))
            .map(|(idx, _)| idx)
            .collect(),
        None => (0..items.len()).collect(),
    };

    if let Some(cmp) = sort {
        view.sort_by(|&a, &b| cmp(&items[a], &items[b], value));
    }

    view
}
