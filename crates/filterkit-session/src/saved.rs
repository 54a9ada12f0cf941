use anyhow::Result;
use tracing::{debug, info, warn};

use filterkit_core::traits::SavedSearchBackend;
use filterkit_core::types::{SavedSearch, SavedSearchCreate, SavedSearchFilter};
use filterkit_store::FilterStore;

/// Saved-search lifecycle on top of a persistence backend.
///
/// Keeps the list from the last [`SavedSearches::refresh`] so a search can be
/// loaded without another round trip. Backend errors are returned untouched.
pub struct SavedSearches<B> where B: SavedSearchBackend {
    backend: B,
    cached: Vec<SavedSearch>,
}

impl<B> SavedSearches<B> where B: SavedSearchBackend {
    pub fn new(backend: B) -> Self { Self { backend, cached: Vec::new() } }

    pub fn backend(&self) -> &B { &self.backend }

    pub fn cached(&self) -> &[SavedSearch] { &self.cached }

    pub fn get(&self, id: i32) -> Option<&SavedSearch> { self.cached.iter().find(|s| s.id == id) }

    pub async fn refresh(&mut self) -> Result<&[SavedSearch]> {
        self.cached = self.backend.list().await?;
        debug!(count = self.cached.len(), "refreshed saved searches");
        Ok(&self.cached)
    }

    /// Replaces the store's selection with saved search `id`.
    ///
    /// The whole selection is dropped first, fixed filters included; each
    /// saved filter is then registered and selected as a removable "is"
    /// filter and the saved search text is restored. Returns `false` when
    /// `id` is not in the cached list, leaving the store untouched.
    pub fn load_search(&self, id: i32, store: &mut FilterStore) -> bool {
        let Some(search) = self.get(id) else {
            debug!(id, "saved search not in cache");
            return false;
        };
        store.clear_selection();
        for saved in &search.filters {
            if let Err(e) = store.select(saved.to_filter()) {
                warn!(id, error = %e, "skipping saved filter");
            }
        }
        store.set_search_text(search.search.clone());
        info!(id, name = %search.name, filters = search.filters.len(), "loaded saved search");
        true
    }

    /// Persists the store's current selection under `name` and refreshes the
    /// cached list.
    pub async fn save_search(&mut self, name: &str, store: &FilterStore) -> Result<SavedSearch> {
        let fallback = store.config().fallback_icon.as_str();
        let filters: Vec<SavedSearchFilter> =
            store.selection().map(|s| SavedSearchFilter::from_filter(&s.filter, fallback)).collect();
        let create = SavedSearchCreate {
            name: name.to_string(),
            description: None,
            icon: None,
            search: store.search_text().map(str::to_string),
            filters,
        };
        let saved = self.backend.create(create).await?;
        info!(id = saved.id, name = %saved.name, "saved search");
        // the search is persisted at this point; a stale list is not a failed save
        if let Err(e) = self.refresh().await {
            warn!(error = %e, id = saved.id, "refresh after save failed");
            self.cached.push(saved.clone());
        }
        Ok(saved)
    }

    pub async fn remove_search(&mut self, id: i32) -> Result<()> {
        self.backend.delete(id).await?;
        info!(id, "removed saved search");
        self.refresh().await?;
        Ok(())
    }
}
