use indexmap::IndexMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use twox_hash::XxHash64;

use filterkit_core::config::StoreConfig;
use filterkit_core::query::{DerivedQuery, PathQuery};
use filterkit_core::types::{Filter, SelectedFilter};
use filterkit_core::{FilterKey, Result};
use filterkit_query::{derive_query_with_text, selection_from_query};

use crate::group::{group_by_kind, FilterGroup};
use crate::snapshot::StoreSnapshot;

/// Content hash of a fixed-filter set. Order-sensitive, like the set itself.
fn fixed_filters_hash(filters: &[Filter]) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    filters.hash(&mut hasher);
    hasher.finish()
}

/// Registry of available filters plus the active selection.
///
/// Owned by the view layer and mutated synchronously. Every state change is
/// published as a [`StoreSnapshot`] on a watch channel; see
/// [`FilterStore::subscribe`].
#[derive(Debug)]
pub struct FilterStore {
    registry: IndexMap<FilterKey, Filter>,
    selection: IndexMap<FilterKey, SelectedFilter>,
    search_text: Option<String>,
    fixed_hash: Option<u64>,
    config: StoreConfig,
    revision: u64,
    tx: watch::Sender<Arc<StoreSnapshot>>,
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl FilterStore {
    pub fn new(config: StoreConfig) -> Self {
        let (tx, _) = watch::channel(Arc::new(StoreSnapshot::default()));
        Self {
            registry: IndexMap::new(),
            selection: IndexMap::new(),
            search_text: None,
            fixed_hash: None,
            config,
            revision: 0,
            tx,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<StoreSnapshot>> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> Arc<StoreSnapshot> {
        self.tx.borrow().clone()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn publish(&mut self) {
        self.revision += 1;
        let snapshot = StoreSnapshot {
            revision: self.revision,
            registry: self.registry.values().cloned().collect(),
            selection: self.selection.values().cloned().collect(),
            search_text: self.search_text.clone(),
        };
        self.tx.send_replace(Arc::new(snapshot));
    }

    /// Inserts `filter` unless its key is taken. Returns the registered copy's
    /// key, or the parse error for a value its kind cannot hold.
    fn insert_registered(&mut self, filter: Filter) -> Result<(FilterKey, bool)> {
        filter.parse_value()?;
        let key = filter.key();
        let mut inserted = false;
        self.registry.entry(key.clone()).or_insert_with(|| {
            inserted = true;
            filter
        });
        Ok((key, inserted))
    }

    /// Registers filters that are not registered yet. Existing registrations
    /// are never overwritten, so running this twice equals running it once.
    /// Filters with a value their kind cannot hold are skipped.
    pub fn register_filters<I>(&mut self, filters: I)
    where
        I: IntoIterator<Item = Filter>,
    {
        let mut added = 0usize;
        for filter in filters {
            match self.insert_registered(filter) {
                Ok((_, true)) => added += 1,
                Ok((_, false)) => {}
                Err(e) => warn!(error = %e, "skipping filter registration"),
            }
        }
        if added > 0 {
            debug!(added, total = self.registry.len(), "registered filters");
            self.publish();
        }
    }

    /// Resets the store for a view's fixed filters.
    ///
    /// Runs once per distinct set: when `filters` hashes the same as the last
    /// set this is a no-op returning `false`. Otherwise registry and selection
    /// are cleared and every fixed filter is registered (missing icon taken
    /// from its name) and selected as non-removable.
    pub fn initialize_fixed_filters(&mut self, filters: &[Filter]) -> bool {
        let hash = fixed_filters_hash(filters);
        if self.fixed_hash == Some(hash) {
            debug!(hash, "fixed filters unchanged");
            return false;
        }
        self.fixed_hash = Some(hash);
        self.registry.clear();
        self.selection.clear();

        for filter in filters {
            let mut filter = filter.clone();
            if filter.icon.is_none() {
                filter.icon = Some(filter.name.clone());
            }
            match self.insert_registered(filter.clone()) {
                Ok((key, _)) => {
                    self.selection.insert(key, SelectedFilter::new(filter, true, false));
                }
                Err(e) => warn!(error = %e, "skipping fixed filter"),
            }
        }
        info!(fixed = self.selection.len(), hash, "initialized fixed filters");
        self.publish();
        true
    }

    /// Selects `filter`, registering it if needed. Overwrites any previous
    /// selection of the same key.
    pub fn select_filter(&mut self, filter: Filter, condition: bool, can_be_removed: bool) -> Result<()> {
        let (key, _) = self.insert_registered(filter)?;
        let registered = self.registry[&key].clone();
        debug!(%key, condition, can_be_removed, "select filter");
        self.selection.insert(key, SelectedFilter::new(registered, condition, can_be_removed));
        self.publish();
        Ok(())
    }

    /// Selects `filter` as a removable "is" filter.
    pub fn select(&mut self, filter: Filter) -> Result<()> {
        self.select_filter(filter, true, true)
    }

    /// Removes `filter` from the selection unless it is fixed. Fixed filters
    /// are left in place silently. Returns whether an entry was removed.
    pub fn deselect_filter(&mut self, filter: &Filter) -> bool {
        let key = filter.key();
        match self.selection.get(&key) {
            Some(selected) if selected.can_be_removed => {
                self.selection.shift_remove(&key);
                debug!(%key, "deselect filter");
                self.publish();
                true
            }
            Some(_) => {
                debug!(%key, "ignoring deselect of fixed filter");
                false
            }
            None => false,
        }
    }

    /// Drops every removable selection, keeping fixed filters. Returns the
    /// number of entries removed.
    pub fn clear_removable(&mut self) -> usize {
        let before = self.selection.len();
        self.selection.retain(|_, s| !s.can_be_removed);
        let removed = before - self.selection.len();
        if removed > 0 {
            self.publish();
        }
        removed
    }

    /// Empties the selection, fixed filters included, and clears the search text.
    /// Registry stays as is. The fixed-filter set is forgotten too, so the next
    /// [`FilterStore::initialize_fixed_filters`] reinstates it even if unchanged.
    pub fn clear_selection(&mut self) {
        self.fixed_hash = None;
        if self.selection.is_empty() && self.search_text.is_none() {
            return;
        }
        self.selection.clear();
        self.search_text = None;
        self.publish();
    }

    pub fn set_search_text(&mut self, text: Option<String>) {
        let text = text.filter(|t| !t.trim().is_empty());
        if text != self.search_text {
            self.search_text = text;
            self.publish();
        }
    }

    pub fn search_text(&self) -> Option<&str> {
        self.search_text.as_deref()
    }

    pub fn registry(&self) -> impl Iterator<Item = &Filter> {
        self.registry.values()
    }

    pub fn is_registered(&self, key: &FilterKey) -> bool {
        self.registry.contains_key(key)
    }

    pub fn selection(&self) -> impl Iterator<Item = &SelectedFilter> {
        self.selection.values()
    }

    pub fn selected(&self, key: &FilterKey) -> Option<&SelectedFilter> {
        self.selection.get(key)
    }

    /// Query for the current selection and search text.
    pub fn derive_query(&self) -> Result<DerivedQuery> {
        derive_query_with_text(self.selection.values(), self.search_text.as_deref())
    }

    /// Selects the registered filters named by `query`, leaving current
    /// selections in place. Returns how many filters were selected.
    pub fn select_from_query(&mut self, query: &PathQuery) -> usize {
        let restored = selection_from_query(self.registry.values(), query);
        let count = restored.len();
        for selected in restored {
            self.selection.insert(selected.key(), selected);
        }
        if let Some(name) = &query.name {
            self.search_text = Some(name.clone());
        }
        if count > 0 || query.name.is_some() {
            self.publish();
        }
        count
    }

    pub fn group_selected_by_type(&self) -> Vec<FilterGroup<'_>> {
        group_by_kind(self.selection.values())
    }

    /// Case-insensitive substring search over registered keys.
    ///
    /// A blank query matches nothing. Results follow registration order and
    /// are capped by `max_results` when that is non-zero.
    pub fn search_registered_filters(&self, query: &str) -> Vec<&Filter> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let limit = match self.config.max_results {
            0 => usize::MAX,
            n => n,
        };
        self.registry
            .iter()
            .filter(|(key, _)| key.to_string().to_lowercase().contains(&needle))
            .map(|(_, filter)| filter)
            .take(limit)
            .collect()
    }
}
