use std::sync::Mutex;

use async_trait::async_trait;

use filterkit_core::query::PathQuery;
use filterkit_core::traits::{Page, PageRequest, PathSearch, SavedSearchBackend};
use filterkit_core::types::{Filter, FilterKind, SavedSearch, SavedSearchCreate};
use filterkit_session::{MemoryBackend, SavedSearches, SearchSession};
use filterkit_store::FilterStore;

fn work() -> Filter { Filter::new(FilterKind::Tag, "Work", "3") }
fn photos() -> Filter { Filter::new(FilterKind::Category, "Photos", "Photos").with_icon("Image") }
fn desktop() -> Filter { Filter::new(FilterKind::Location, "Desktop", "2") }

#[tokio::test]
async fn save_then_load_replaces_selection() -> anyhow::Result<()> {
    let mut searches = SavedSearches::new(MemoryBackend::new());
    let mut store = FilterStore::default();
    store.select(work())?;
    store.select(photos())?;
    store.set_search_text(Some("report".into()));

    let saved = searches.save_search("Work photos", &store).await?;
    assert_eq!(saved.filters.len(), 2);
    assert_eq!(saved.filters[0].icon, "CheckCircle", "missing icon falls back");
    assert_eq!(saved.filters[1].icon, "Image");
    assert_eq!(searches.cached().len(), 1, "cache refreshed after save");

    // a different selection, including a fixed filter, is wiped by the load
    let mut other = FilterStore::default();
    other.initialize_fixed_filters(&[Filter::new(FilterKind::Location, "Home", "1")]);
    other.select(desktop())?;
    assert!(searches.load_search(saved.id, &mut other));

    let keys: Vec<_> = other.selection().map(|s| s.key()).collect();
    assert_eq!(keys, [work().key(), photos().key()]);
    assert!(other.selection().all(|s| s.condition && s.can_be_removed));
    assert_eq!(other.search_text(), Some("report"));
    Ok(())
}

#[tokio::test]
async fn loading_unknown_id_leaves_store_alone() -> anyhow::Result<()> {
    let searches = SavedSearches::new(MemoryBackend::new());
    let mut store = FilterStore::default();
    store.select(work())?;
    let rev = store.revision();
    assert!(!searches.load_search(7, &mut store));
    assert_eq!(store.revision(), rev);
    assert_eq!(store.selection().count(), 1);
    Ok(())
}

#[tokio::test]
async fn remove_deletes_and_refreshes() -> anyhow::Result<()> {
    let mut searches = SavedSearches::new(MemoryBackend::new());
    let mut store = FilterStore::default();
    store.select(work())?;
    let a = searches.save_search("a", &store).await?;
    let b = searches.save_search("b", &store).await?;
    assert_ne!(a.id, b.id);

    searches.remove_search(a.id).await?;
    let ids: Vec<_> = searches.cached().iter().map(|s| s.id).collect();
    assert_eq!(ids, [b.id]);
    assert!(searches.remove_search(a.id).await.is_err(), "second delete reports not found");
    Ok(())
}

struct FailingBackend;

#[async_trait]
impl SavedSearchBackend for FailingBackend {
    async fn list(&self) -> anyhow::Result<Vec<SavedSearch>> { Ok(vec![]) }
    async fn create(&self, _search: SavedSearchCreate) -> anyhow::Result<SavedSearch> {
        anyhow::bail!("disk full")
    }
    async fn delete(&self, _id: i32) -> anyhow::Result<()> { anyhow::bail!("offline") }
}

#[tokio::test]
async fn backend_errors_pass_through() {
    let mut searches = SavedSearches::new(FailingBackend);
    let store = FilterStore::default();
    let err = searches.save_search("x", &store).await.unwrap_err();
    assert_eq!(err.to_string(), "disk full");
    let err = searches.remove_search(1).await.unwrap_err();
    assert_eq!(err.to_string(), "offline");
}

/// Persists through a `MemoryBackend` but can never list.
#[derive(Default)]
struct UnlistableBackend {
    inner: MemoryBackend,
}

#[async_trait]
impl SavedSearchBackend for UnlistableBackend {
    async fn list(&self) -> anyhow::Result<Vec<SavedSearch>> { anyhow::bail!("list unavailable") }
    async fn create(&self, search: SavedSearchCreate) -> anyhow::Result<SavedSearch> {
        self.inner.create(search).await
    }
    async fn delete(&self, id: i32) -> anyhow::Result<()> { self.inner.delete(id).await }
}

#[tokio::test]
async fn save_succeeds_when_refresh_fails() -> anyhow::Result<()> {
    let mut searches = SavedSearches::new(UnlistableBackend::default());
    let mut store = FilterStore::default();
    store.select(work())?;

    let saved = searches.save_search("Work", &store).await?;
    assert_eq!(searches.backend().inner.list().await?.len(), 1);
    assert_eq!(searches.cached(), [saved.clone()]);

    let mut other = FilterStore::default();
    assert!(searches.load_search(saved.id, &mut other));
    assert_eq!(other.selection().map(|s| s.key()).collect::<Vec<_>>(), [work().key()]);
    Ok(())
}

#[derive(Default)]
struct RecordingExecutor {
    seen: Mutex<Vec<PathQuery>>,
}

#[async_trait]
impl PathSearch for RecordingExecutor {
    type Item = String;

    async fn search(&self, query: &PathQuery, page: PageRequest) -> anyhow::Result<Page<String>> {
        self.seen.lock().unwrap().push(query.clone());
        Ok(Page { items: vec!["a.jpg".to_string(); page.take], cursor: None })
    }
}

#[tokio::test]
async fn session_executes_derived_query() -> anyhow::Result<()> {
    let mut session = SearchSession::new(FilterStore::default(), RecordingExecutor::default());
    session.store_mut().select(desktop())?;
    session.store_mut().select(work())?;

    let page = session.execute(PageRequest { take: 2, cursor: None }).await?;
    assert_eq!(page.items.len(), 2);

    let seen = session.executor().seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].locations.is_in(&2));
    assert!(seen[0].object.as_ref().expect("object").tags.is_in(&3));
    Ok(())
}
