#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod key;
pub mod query;
pub mod traits;
pub mod types;

pub use error::{FilterError, Result};
pub use key::FilterKey;
pub use types::{Filter, FilterKind, SelectedFilter};
