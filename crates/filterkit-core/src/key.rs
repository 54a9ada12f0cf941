//! Composite identity of a filter.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::FilterKind;

/// `(kind, name, value)` identity of a filter.
///
/// Fields are compared individually, so a `:` inside a name or value cannot
/// make two distinct filters collide. The `Display` form is only used for
/// matching user input and for logs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FilterKey {
    pub kind: FilterKind,
    pub name: String,
    pub value: String,
}

impl FilterKey {
    pub fn new(kind: FilterKind, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { kind, name: name.into(), value: value.into() }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.kind, self.name, self.value)
    }
}
