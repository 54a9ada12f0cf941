//! filterkit-session
//!
//! Async edges of the filter store: the saved-search lifecycle over a
//! `SavedSearchBackend`, and `SearchSession`, which hands the derived query
//! to a `PathSearch` executor.
pub mod memory;
pub mod saved;
pub mod session;

pub use memory::MemoryBackend;
pub use saved::SavedSearches;
pub use session::SearchSession;
