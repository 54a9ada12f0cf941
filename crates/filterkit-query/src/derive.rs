use tracing::trace;

use filterkit_core::query::{DerivedQuery, ObjectQuery, PathQuery};
use filterkit_core::types::{FilterValue, SelectedFilter};
use filterkit_core::Result;

/// Builds the backend query for a selection.
///
/// Pure and order-independent: ids accumulate into ordered sets, an id that
/// is both included and excluded ends up excluded, and `hidden` is true if
/// any Hidden filter says so. A non-empty object query is nested under
/// `path_query.object`; otherwise that field is left out.
pub fn derive_query_params<'a, I>(selection: I) -> Result<DerivedQuery>
where
    I: IntoIterator<Item = &'a SelectedFilter>,
{
    let mut path = PathQuery::default();
    let mut object = ObjectQuery::default();

    for selected in selection {
        let condition = selected.condition;
        match selected.filter.parse_value()? {
            FilterValue::Location(id) => path.locations.record(id, condition),
            FilterValue::Tag(id) => object.tags.record(id, condition),
            FilterValue::Kind(kind) => object.kind.record(kind, condition),
            FilterValue::Category(category) => object.category.record(category, condition),
            FilterValue::Hidden(hidden) => path.hidden = Some(path.hidden.unwrap_or(false) || hidden),
        }
        trace!(key = %selected.key(), condition, "folded filter into query");
    }

    if !object.is_empty() {
        path.object = Some(object.clone());
    }
    Ok(DerivedQuery { path_query: path, object_query: object })
}

/// [`derive_query_params`] plus a free-text "name contains" constraint.
/// Blank text is ignored.
pub fn derive_query_with_text<'a, I>(selection: I, text: Option<&str>) -> Result<DerivedQuery>
where
    I: IntoIterator<Item = &'a SelectedFilter>,
{
    let mut derived = derive_query_params(selection)?;
    derived.path_query.name = text.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string);
    Ok(derived)
}
