//! Seams to the collaborators the filter store talks to.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::query::PathQuery;
use crate::types::{SavedSearch, SavedSearchCreate};

/// Persistence collaborator for saved searches.
///
/// Errors are returned as-is to the caller; the store does not translate them.
#[async_trait]
pub trait SavedSearchBackend: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<SavedSearch>>;
    async fn create(&self, search: SavedSearchCreate) -> anyhow::Result<SavedSearch>;
    async fn delete(&self, id: i32) -> anyhow::Result<()>;
}

/// Cursor-based page request handed to a [`PathSearch`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub take: usize,
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub cursor: Option<String>,
}

/// Object/file query collaborator. Results are opaque to the store.
#[async_trait]
pub trait PathSearch: Send + Sync {
    type Item: Send;

    async fn search(&self, query: &PathQuery, page: PageRequest) -> anyhow::Result<Page<Self::Item>>;
}
