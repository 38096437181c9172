use itertools::Itertools;
use querywire_model::{
    ast::{Ordering, SortDirection},
    tokens::{DESCENDING_PREFIX, LIST_SEPARATOR},
};

/// Render the value of the `sort` parameter, or `None` when there is nothing to sort by.
pub fn render_sorting(orderings: &[Ordering]) -> Option<String> {
    if orderings.is_empty() {
        return None;
    }
    let sorting = orderings
        .iter()
        .map(|ordering| match ordering.direction {
            SortDirection::Asc => ordering.column.clone(),
            SortDirection::Desc => format!("{DESCENDING_PREFIX}{}", ordering.column),
        })
        .join(LIST_SEPARATOR);
    Some(sorting)
}
