//! Domain types shared by the store, the query derivation and saved searches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FilterError, Result};
use crate::key::FilterKey;

/// The category a filter belongs to. Each kind feeds a distinct field of the
/// derived query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    Location,
    Tag,
    Kind,
    Category,
    Hidden,
}

impl FilterKind {
    pub const ALL: [FilterKind; 5] = [
        FilterKind::Location,
        FilterKind::Tag,
        FilterKind::Kind,
        FilterKind::Category,
        FilterKind::Hidden,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterKind::Location => "Location",
            FilterKind::Tag => "Tag",
            FilterKind::Kind => "Kind",
            FilterKind::Category => "Category",
            FilterKind::Hidden => "Hidden",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        FilterKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| FilterError::UnknownKind(s.to_string()))
    }
}

/// A named predicate that can narrow a result set.
///
/// Identity is the `(kind, name, value)` triple; `icon` is presentation
/// metadata only and takes no part in the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    pub kind: FilterKind,
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Filter {
    pub fn new(kind: FilterKind, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { kind, name: name.into(), value: value.into(), icon: None }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn key(&self) -> FilterKey {
        FilterKey::new(self.kind, &self.name, &self.value)
    }

    /// Parses `value` into the typed target of this filter's kind.
    pub fn parse_value(&self) -> Result<FilterValue> {
        let invalid = || FilterError::InvalidValue { kind: self.kind, value: self.value.clone() };
        let raw = self.value.trim();
        Ok(match self.kind {
            FilterKind::Location => FilterValue::Location(raw.parse().map_err(|_| invalid())?),
            FilterKind::Tag => FilterValue::Tag(raw.parse().map_err(|_| invalid())?),
            FilterKind::Kind => FilterValue::Kind(raw.parse().map_err(|_| invalid())?),
            FilterKind::Category => FilterValue::Category(raw.parse().map_err(|_| invalid())?),
            FilterKind::Hidden => FilterValue::Hidden(raw == "true"),
        })
    }
}

/// A filter value cast to the type its query field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterValue {
    Location(i32),
    Tag(i32),
    Kind(ObjectKind),
    Category(Category),
    Hidden(bool),
}

fn default_true() -> bool {
    true
}

/// A filter that is part of the active selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedFilter {
    #[serde(flatten)]
    pub filter: Filter,
    /// `true` reads "is", `false` reads "is not".
    #[serde(default = "default_true")]
    pub condition: bool,
    /// `false` marks a filter fixed by the hosting view.
    #[serde(default = "default_true")]
    pub can_be_removed: bool,
}

impl SelectedFilter {
    pub fn new(filter: Filter, condition: bool, can_be_removed: bool) -> Self {
        Self { filter, condition, can_be_removed }
    }

    pub fn key(&self) -> FilterKey {
        self.filter.key()
    }
}

/// Kind of object a file resolves to. Serialized as its numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
pub enum ObjectKind {
    Unknown = 0,
    Document = 1,
    Folder = 2,
    Text = 3,
    Package = 4,
    Image = 5,
    Audio = 6,
    Video = 7,
    Archive = 8,
    Executable = 9,
    Alias = 10,
    Encrypted = 11,
    Key = 12,
    Link = 13,
    WebPageArchive = 14,
    Widget = 15,
    Album = 16,
    Collection = 17,
    Font = 18,
    Mesh = 19,
    Code = 20,
    Database = 21,
    Book = 22,
    Config = 23,
    Dotfile = 24,
    Screenshot = 25,
    Label = 26,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 27] = [
        ObjectKind::Unknown,
        ObjectKind::Document,
        ObjectKind::Folder,
        ObjectKind::Text,
        ObjectKind::Package,
        ObjectKind::Image,
        ObjectKind::Audio,
        ObjectKind::Video,
        ObjectKind::Archive,
        ObjectKind::Executable,
        ObjectKind::Alias,
        ObjectKind::Encrypted,
        ObjectKind::Key,
        ObjectKind::Link,
        ObjectKind::WebPageArchive,
        ObjectKind::Widget,
        ObjectKind::Album,
        ObjectKind::Collection,
        ObjectKind::Font,
        ObjectKind::Mesh,
        ObjectKind::Code,
        ObjectKind::Database,
        ObjectKind::Book,
        ObjectKind::Config,
        ObjectKind::Dotfile,
        ObjectKind::Screenshot,
        ObjectKind::Label,
    ];
}

impl From<ObjectKind> for i32 {
    fn from(kind: ObjectKind) -> Self {
        kind as i32
    }
}

impl TryFrom<i32> for ObjectKind {
    type Error = FilterError;

    fn try_from(id: i32) -> Result<Self> {
        ObjectKind::ALL
            .into_iter()
            .find(|k| *k as i32 == id)
            .ok_or_else(|| FilterError::InvalidValue { kind: FilterKind::Kind, value: id.to_string() })
    }
}

impl FromStr for ObjectKind {
    type Err = FilterError;

    /// Accepts the numeric id (`"5"`) or the variant name (`"Image"`).
    fn from_str(s: &str) -> Result<Self> {
        if let Ok(id) = s.parse::<i32>() {
            return ObjectKind::try_from(id);
        }
        ObjectKind::ALL
            .into_iter()
            .find(|k| format!("{k:?}").eq_ignore_ascii_case(s))
            .ok_or_else(|| FilterError::InvalidValue { kind: FilterKind::Kind, value: s.to_string() })
    }
}

/// Library category a file can be browsed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Recents,
    Favorites,
    Albums,
    Photos,
    Videos,
    Movies,
    Music,
    Documents,
    Downloads,
    Encrypted,
    Projects,
    Applications,
    Archives,
    Databases,
    Games,
    Books,
    Contacts,
    Trash,
    Screenshots,
}

impl Category {
    pub const ALL: [Category; 19] = [
        Category::Recents,
        Category::Favorites,
        Category::Albums,
        Category::Photos,
        Category::Videos,
        Category::Movies,
        Category::Music,
        Category::Documents,
        Category::Downloads,
        Category::Encrypted,
        Category::Projects,
        Category::Applications,
        Category::Archives,
        Category::Databases,
        Category::Games,
        Category::Books,
        Category::Contacts,
        Category::Trash,
        Category::Screenshots,
    ];
}

impl FromStr for Category {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| format!("{c:?}").eq_ignore_ascii_case(s))
            .ok_or_else(|| FilterError::InvalidValue { kind: FilterKind::Category, value: s.to_string() })
    }
}

/// A filter as persisted inside a saved search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearchFilter {
    pub filter_type: FilterKind,
    pub name: String,
    pub value: String,
    pub icon: String,
}

impl SavedSearchFilter {
    /// Builds the persisted shape, substituting `fallback_icon` when the
    /// filter carries none.
    pub fn from_filter(filter: &Filter, fallback_icon: &str) -> Self {
        Self {
            filter_type: filter.kind,
            name: filter.name.clone(),
            value: filter.value.clone(),
            icon: filter.icon.clone().unwrap_or_else(|| fallback_icon.to_string()),
        }
    }

    pub fn to_filter(&self) -> Filter {
        Filter::new(self.filter_type, &self.name, &self.value).with_icon(&self.icon)
    }
}

/// A persisted, named snapshot of a past selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearch {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Free-text name search stored alongside the filters.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
    pub filters: Vec<SavedSearchFilter>,
}

/// Payload submitted to a saved-search backend when saving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearchCreate {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub search: Option<String>,
    pub filters: Vec<SavedSearchFilter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_values_parse_for_id_kinds() {
        let f = Filter::new(FilterKind::Tag, "Work", " 3 ");
        assert_eq!(f.parse_value().expect("tag id"), FilterValue::Tag(3));
        let bad = Filter::new(FilterKind::Location, "Home", "home");
        assert!(matches!(bad.parse_value(), Err(FilterError::InvalidValue { kind: FilterKind::Location, .. })));
    }

    #[test]
    fn filter_kind_parses_case_insensitively() {
        assert_eq!("location".parse::<FilterKind>().expect("kind"), FilterKind::Location);
        assert_eq!("HIDDEN".parse::<FilterKind>().expect("kind"), FilterKind::Hidden);
        assert!(matches!("Folder".parse::<FilterKind>(), Err(FilterError::UnknownKind(k)) if k == "Folder"));
    }

    #[test]
    fn object_kind_accepts_id_or_name() {
        assert_eq!("5".parse::<ObjectKind>().expect("id"), ObjectKind::Image);
        assert_eq!("image".parse::<ObjectKind>().expect("name"), ObjectKind::Image);
        assert!("99".parse::<ObjectKind>().is_err());
    }

    #[test]
    fn hidden_is_true_only_for_literal_true() {
        let on = Filter::new(FilterKind::Hidden, "Hidden", "true");
        let off = Filter::new(FilterKind::Hidden, "Hidden", "yes");
        assert_eq!(on.parse_value().expect("hidden"), FilterValue::Hidden(true));
        assert_eq!(off.parse_value().expect("hidden"), FilterValue::Hidden(false));
    }

    #[test]
    fn selected_filter_json_defaults_to_removable_inclusion() {
        let sf: SelectedFilter =
            serde_json::from_str(r#"{"kind":"Category","name":"Photos","value":"Photos"}"#).expect("json");
        assert!(sf.condition);
        assert!(sf.can_be_removed);
        assert_eq!(sf.filter.parse_value().expect("category"), FilterValue::Category(Category::Photos));
    }

    #[test]
    fn object_kind_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ObjectKind::Video).expect("json"), "7");
    }

    #[test]
    fn saved_filter_uses_fallback_icon() {
        let f = Filter::new(FilterKind::Tag, "Work", "3");
        let saved = SavedSearchFilter::from_filter(&f, "CheckCircle");
        assert_eq!(saved.icon, "CheckCircle");
        assert_eq!(saved.to_filter().key(), f.key());
    }
}
