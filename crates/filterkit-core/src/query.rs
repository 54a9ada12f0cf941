//! Backend query shapes produced from a filter selection.
//!
//! These are plain data; the derivation lives in `filterkit-query`.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{Category, ObjectKind};

/// Membership accumulator where every id is either "in" or "not in".
///
/// Once an id has been excluded it stays excluded, so the result does not
/// depend on the order entries are recorded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InOrNotIn<T: Ord> {
    members: BTreeMap<T, bool>,
}

impl<T: Ord> Default for InOrNotIn<T> {
    fn default() -> Self {
        Self { members: BTreeMap::new() }
    }
}

impl<T: Ord> InOrNotIn<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` as "in" when `condition` is true, "not in" otherwise.
    pub fn record(&mut self, value: T, condition: bool) {
        let entry = self.members.entry(value).or_insert(condition);
        *entry = *entry && condition;
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn included(&self) -> impl Iterator<Item = &T> {
        self.members.iter().filter(|(_, inc)| **inc).map(|(v, _)| v)
    }

    pub fn excluded(&self) -> impl Iterator<Item = &T> {
        self.members.iter().filter(|(_, inc)| !**inc).map(|(v, _)| v)
    }

    pub fn is_in(&self, value: &T) -> bool {
        self.members.get(value).copied().unwrap_or(false)
    }

    pub fn is_not_in(&self, value: &T) -> bool {
        self.members.get(value).is_some_and(|inc| !*inc)
    }
}

#[derive(Serialize)]
struct InOrNotInRef<'a, T> {
    #[serde(rename = "in", skip_serializing_if = "Vec::is_empty")]
    included: Vec<&'a T>,
    #[serde(rename = "notIn", skip_serializing_if = "Vec::is_empty")]
    excluded: Vec<&'a T>,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct InOrNotInOwned<T> {
    #[serde(rename = "in", default)]
    included: Vec<T>,
    #[serde(rename = "notIn", default)]
    excluded: Vec<T>,
}

impl<T: Ord + Serialize> Serialize for InOrNotIn<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        InOrNotInRef { included: self.included().collect(), excluded: self.excluded().collect() }
            .serialize(serializer)
    }
}

impl<'de, T: Ord + Deserialize<'de>> Deserialize<'de> for InOrNotIn<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let owned = InOrNotInOwned::<T>::deserialize(deserializer)?;
        let mut out = InOrNotIn::new();
        for v in owned.included {
            out.record(v, true);
        }
        for v in owned.excluded {
            out.record(v, false);
        }
        Ok(out)
    }
}

/// Object-level constraints, nested under [`PathQuery::object`] when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectQuery {
    #[serde(default, skip_serializing_if = "InOrNotIn::is_empty")]
    pub tags: InOrNotIn<i32>,
    #[serde(default, skip_serializing_if = "InOrNotIn::is_empty")]
    pub kind: InOrNotIn<ObjectKind>,
    #[serde(default, skip_serializing_if = "InOrNotIn::is_empty")]
    pub category: InOrNotIn<Category>,
}

impl ObjectQuery {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.kind.is_empty() && self.category.is_empty()
    }
}

/// File-path query handed to the object/file query collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathQuery {
    /// Case-insensitive "name contains" text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "InOrNotIn::is_empty")]
    pub locations: InOrNotIn<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<ObjectQuery>,
}

/// Output of query derivation: the path query plus the object query it nests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedQuery {
    pub path_query: PathQuery,
    pub object_query: ObjectQuery,
}
