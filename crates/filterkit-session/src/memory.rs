use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use filterkit_core::error::FilterError;
use filterkit_core::traits::SavedSearchBackend;
use filterkit_core::types::{SavedSearch, SavedSearchCreate};

#[derive(Debug, Default)]
struct State {
    next_id: i32,
    searches: Vec<SavedSearch>,
}

/// In-process saved-search backend. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
}

impl MemoryBackend {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl SavedSearchBackend for MemoryBackend {
    async fn list(&self) -> Result<Vec<SavedSearch>> {
        Ok(self.state.lock().await.searches.clone())
    }

    async fn create(&self, search: SavedSearchCreate) -> Result<SavedSearch> {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let saved = SavedSearch {
            id: state.next_id,
            name: search.name,
            description: search.description,
            icon: search.icon,
            search: search.search,
            date_created: Some(Utc::now()),
            filters: search.filters,
        };
        state.searches.push(saved.clone());
        Ok(saved)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let mut state = self.state.lock().await;
        let before = state.searches.len();
        state.searches.retain(|s| s.id != id);
        if state.searches.len() == before {
            return Err(FilterError::NotFound(format!("saved search {id}")).into());
        }
        Ok(())
    }
}
