use serde::Serialize;

use filterkit_core::types::{Filter, SelectedFilter};

/// Point-in-time copy of the store published to subscribers.
///
/// `revision` increases by one for every mutation that changed state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreSnapshot {
    pub revision: u64,
    pub registry: Vec<Filter>,
    pub selection: Vec<SelectedFilter>,
    pub search_text: Option<String>,
}
