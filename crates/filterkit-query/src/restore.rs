use tracing::debug;

use filterkit_core::query::{InOrNotIn, PathQuery};
use filterkit_core::types::{Filter, FilterValue, SelectedFilter};

fn membership<T: Ord>(set: Option<&InOrNotIn<T>>, value: &T) -> Option<bool> {
    let set = set?;
    if set.is_not_in(value) {
        Some(false)
    } else if set.is_in(value) {
        Some(true)
    } else {
        None
    }
}

/// Maps a path query back onto registered filters.
///
/// Every registered filter whose value appears in the query is returned as a
/// removable selection, with `condition` taken from "in" / "not in". Query
/// ids that no registered filter carries cannot be named and are dropped.
/// Output follows `registry` order.
pub fn selection_from_query<'a, I>(registry: I, query: &PathQuery) -> Vec<SelectedFilter>
where
    I: IntoIterator<Item = &'a Filter>,
{
    let object = query.object.as_ref();
    let mut out = Vec::new();
    for filter in registry {
        let Ok(value) = filter.parse_value() else {
            debug!(key = %filter.key(), "skipping registered filter with unparsable value");
            continue;
        };
        let condition = match value {
            FilterValue::Location(id) => membership(Some(&query.locations), &id),
            FilterValue::Tag(id) => membership(object.map(|o| &o.tags), &id),
            FilterValue::Kind(kind) => membership(object.map(|o| &o.kind), &kind),
            FilterValue::Category(category) => membership(object.map(|o| &o.category), &category),
            FilterValue::Hidden(hidden) => (query.hidden == Some(hidden)).then_some(true),
        };
        if let Some(condition) = condition {
            out.push(SelectedFilter::new(filter.clone(), condition, true));
        }
    }
    out
}
