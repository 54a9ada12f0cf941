//! filterkit-query
//!
//! Pure translation between a filter selection and the backend query shape.
//! `derive` builds the query; `restore` maps a query back onto registered
//! filters.
pub mod derive;
pub mod restore;

pub use derive::{derive_query_params, derive_query_with_text};
pub use restore::selection_from_query;
