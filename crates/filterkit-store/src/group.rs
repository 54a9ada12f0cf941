use serde::Serialize;

use filterkit_core::types::{FilterKind, SelectedFilter};

/// Selected filters of one kind, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterGroup<'a> {
    pub kind: FilterKind,
    pub filters: Vec<&'a SelectedFilter>,
}

/// Groups filters by kind. Groups appear in the order their kind is first
/// seen; filters keep their relative order inside a group.
pub fn group_by_kind<'a, I>(filters: I) -> Vec<FilterGroup<'a>>
where
    I: IntoIterator<Item = &'a SelectedFilter>,
{
    let mut groups: Vec<FilterGroup<'a>> = Vec::new();
    for selected in filters {
        let kind = selected.filter.kind;
        match groups.iter_mut().find(|g| g.kind == kind) {
            Some(group) => group.filters.push(selected),
            None => groups.push(FilterGroup { kind, filters: vec![selected] }),
        }
    }
    groups
}
