//! filterkit-store
//!
//! The owned, observable filter store: a registry of available filters, the
//! active selection, fixed-filter initialization and the read-side helpers
//! views render from. Callers hold a `FilterStore` and subscribe to
//! `StoreSnapshot`s to re-render on change.
pub mod group;
pub mod snapshot;
pub mod store;

pub use group::FilterGroup;
pub use snapshot::StoreSnapshot;
pub use store::FilterStore;
