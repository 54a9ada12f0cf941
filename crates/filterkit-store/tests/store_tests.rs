use filterkit_core::types::{Filter, FilterKind};
use filterkit_store::FilterStore;

fn work() -> Filter {
    Filter::new(FilterKind::Tag, "Work", "3")
}

fn home_location() -> Filter {
    Filter::new(FilterKind::Location, "Home", "1")
}

#[test]
fn registering_twice_equals_registering_once() {
    let filters = vec![work(), home_location(), Filter::new(FilterKind::Kind, "Image", "5")];

    let mut once = FilterStore::default();
    once.register_filters(filters.clone());

    let mut twice = FilterStore::default();
    twice.register_filters(filters.clone());
    twice.register_filters(filters);

    let a: Vec<_> = once.registry().cloned().collect();
    let b: Vec<_> = twice.registry().cloned().collect();
    assert_eq!(a, b);
}

#[test]
fn tag_selection_round_trip_through_query() {
    let mut store = FilterStore::default();
    store.select(work()).unwrap();
    let q = store.derive_query().unwrap();
    assert!(q.object_query.tags.is_in(&3));
    assert!(q.path_query.object.is_some());

    assert!(store.deselect_filter(&work()));
    let q = store.derive_query().unwrap();
    assert!(q.object_query.tags.is_empty());
    assert!(q.path_query.object.is_none(), "empty object query is omitted");
}

#[test]
fn fixed_location_cannot_be_deselected() {
    let mut store = FilterStore::default();
    store.initialize_fixed_filters(&[home_location()]);

    let before: Vec<_> = store.selection().cloned().collect();
    assert_eq!(before.len(), 1);
    assert!(!before[0].can_be_removed);

    assert!(!store.deselect_filter(&home_location()));
    let after: Vec<_> = store.selection().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn fixed_filters_come_back_after_clearing() {
    let mut store = FilterStore::default();
    assert!(store.initialize_fixed_filters(&[home_location()]));
    assert!(!store.initialize_fixed_filters(&[home_location()]));

    store.clear_selection();
    assert_eq!(store.selection().count(), 0);

    assert!(store.initialize_fixed_filters(&[home_location()]));
    let fixed: Vec<_> = store.selection().cloned().collect();
    assert_eq!(fixed.len(), 1);
    assert_eq!(fixed[0].key(), home_location().key());
    assert!(!fixed[0].can_be_removed);
}

#[test]
fn selecting_registers_implicitly() {
    let mut store = FilterStore::default();
    store.select(work()).unwrap();
    assert!(store.is_registered(&work().key()));
    for selected in store.selection() {
        assert!(store.is_registered(&selected.key()));
    }
}

#[test]
fn search_matches_substring_of_key_case_insensitively() {
    let mut store = FilterStore::default();
    store.register_filters([work(), home_location()]);
    assert!(store.search_registered_filters("").is_empty());

    let hits = store.search_registered_filters("wOrK");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].key(), work().key());

    let by_kind = store.search_registered_filters("location");
    assert_eq!(by_kind.len(), 1);
}

#[test]
fn groups_follow_first_seen_kind() {
    let mut store = FilterStore::default();
    store.select(work()).unwrap();
    store.select(home_location()).unwrap();
    store.select(Filter::new(FilterKind::Tag, "Home", "4")).unwrap();

    let groups = store.group_selected_by_type();
    let kinds: Vec<_> = groups.iter().map(|g| g.kind).collect();
    assert_eq!(kinds, [FilterKind::Tag, FilterKind::Location]);
    assert_eq!(groups[0].filters.len(), 2);
}

#[tokio::test]
async fn subscribers_see_each_change() {
    let mut store = FilterStore::default();
    let mut rx = store.subscribe();

    store.select(work()).unwrap();
    rx.changed().await.expect("sender alive");
    let snap = rx.borrow_and_update().clone();
    assert_eq!(snap.revision, 1);
    assert_eq!(snap.selection.len(), 1);
    assert_eq!(snap.registry.len(), 1);

    // protected deselect and idempotent register publish nothing
    store.initialize_fixed_filters(&[home_location()]);
    rx.changed().await.expect("sender alive");
    let rev = rx.borrow_and_update().revision;
    store.deselect_filter(&home_location());
    store.register_filters([home_location()]);
    assert!(!rx.has_changed().expect("sender alive"));
    assert_eq!(store.snapshot().revision, rev);
}
