use anyhow::Result;
use tracing::debug;

use filterkit_core::traits::{Page, PageRequest, PathSearch};
use filterkit_store::FilterStore;

/// A filter store paired with the executor that runs its queries.
pub struct SearchSession<E> where E: PathSearch {
    store: FilterStore,
    executor: E,
}

impl<E> SearchSession<E> where E: PathSearch {
    pub fn new(store: FilterStore, executor: E) -> Self { Self { store, executor } }

    pub fn store(&self) -> &FilterStore { &self.store }

    pub fn store_mut(&mut self) -> &mut FilterStore { &mut self.store }

    pub fn executor(&self) -> &E { &self.executor }

    /// Derives the query from the current selection and runs one page of it.
    pub async fn execute(&self, page: PageRequest) -> Result<Page<E::Item>> {
        let query = self.store.derive_query()?;
        debug!(revision = self.store.revision(), take = page.take, "executing path query");
        self.executor.search(&query.path_query, page).await
    }
}
