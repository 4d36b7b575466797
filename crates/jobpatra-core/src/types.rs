//! Core types for jobpatra-core.
//!
//! This module defines the data structures shared by the normalizer and the
//! catalog: the company [`Record`], the [`NamedCollection`] it lives in, and
//! the [`Dataset`] one normalizer run produces.

use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// One company listing.
///
/// Every field is optional; `company` is the only one a listing is expected
/// to carry. Keys the directory does not know about are kept verbatim in
/// [`Record::extra`] so a normalize pass never drops data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecordRepr", into = "RecordRepr")]
pub struct Record {
    /// Company name. Used as the default sort key.
    pub company: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub sector: Option<String>,
    /// Open roles, in the order the listing gives them.
    pub roles: Option<Vec<String>>,
    /// LinkedIn page URL, or `"#"` as a placeholder.
    pub linkedin: Option<String>,
    /// Careers page URL, or `"#"` as a placeholder.
    pub career: Option<String>,
    /// Older listings use `link` for the careers URL.
    pub link: Option<String>,
    /// Any other keys, in source order.
    pub extra: serde_json::Map<String, serde_json::Value>,
    /// Known fields the listing set to an explicit `null`. They read as
    /// `None` above and are written back as `null`.
    pub null_fields: BTreeSet<&'static str>,
}

/// Wire form of [`Record`]: `None` is an absent key, `Some(None)` a `null`.
#[derive(Serialize, Deserialize)]
struct RecordRepr {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    company: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    state: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    city: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    sector: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    roles: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    linkedin: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    career: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    link: Option<Option<String>>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

/// A key that is present deserializes to `Some`, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn take<T>(
    name: &'static str,
    value: Option<Option<T>>,
    nulls: &mut BTreeSet<&'static str>,
) -> Option<T> {
    if matches!(value, Some(None)) {
        nulls.insert(name);
    }
    value.flatten()
}

fn give<T>(name: &str, value: Option<T>, nulls: &BTreeSet<&'static str>) -> Option<Option<T>> {
    match value {
        Some(value) => Some(Some(value)),
        None if nulls.contains(name) => Some(None),
        None => None,
    }
}

impl From<RecordRepr> for Record {
    fn from(repr: RecordRepr) -> Self {
        let mut nulls = BTreeSet::new();
        Self {
            company: take("company", repr.company, &mut nulls),
            state: take("state", repr.state, &mut nulls),
            city: take("city", repr.city, &mut nulls),
            sector: take("sector", repr.sector, &mut nulls),
            roles: take("roles", repr.roles, &mut nulls),
            linkedin: take("linkedin", repr.linkedin, &mut nulls),
            career: take("career", repr.career, &mut nulls),
            link: take("link", repr.link, &mut nulls),
            extra: repr.extra,
            null_fields: nulls,
        }
    }
}

impl From<Record> for RecordRepr {
    fn from(record: Record) -> Self {
        let nulls = &record.null_fields;
        Self {
            company: give("company", record.company, nulls),
            state: give("state", record.state, nulls),
            city: give("city", record.city, nulls),
            sector: give("sector", record.sector, nulls),
            roles: give("roles", record.roles, nulls),
            linkedin: give("linkedin", record.linkedin, nulls),
            career: give("career", record.career, nulls),
            link: give("link", record.link, nulls),
            extra: record.extra,
        }
    }
}

impl Record {
    /// Look up a string-valued field by name, recognised or extra.
    pub fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "company" => self.company.as_deref(),
            "state" => self.state.as_deref(),
            "city" => self.city.as_deref(),
            "sector" => self.sector.as_deref(),
            "linkedin" => self.linkedin.as_deref(),
            "career" => self.career.as_deref(),
            "link" => self.link.as_deref(),
            other => self.extra.get(other).and_then(serde_json::Value::as_str),
        }
    }

    /// Careers URL, preferring `career` over the legacy `link` key.
    /// Placeholders (`"#"`) and empty strings count as absent.
    pub fn careers_url(&self) -> Option<&str> {
        [self.career.as_deref(), self.link.as_deref()]
            .into_iter()
            .flatten()
            .find(|url| is_real_url(url))
    }

    /// LinkedIn URL, with placeholders treated as absent.
    pub fn linkedin_url(&self) -> Option<&str> {
        self.linkedin.as_deref().filter(|url| is_real_url(url))
    }

    /// Roles as a slice; empty when the listing has none.
    pub fn roles(&self) -> &[String] {
        self.roles.as_deref().unwrap_or_default()
    }
}

fn is_real_url(url: &str) -> bool {
    let url = url.trim();
    !url.is_empty() && url != "#"
}

/// Fold a string into its collation key: compatibility-decomposed, with
/// combining marks removed and lowercased. `"Émile"` and `"emile"` fold to
/// the same key.
pub fn collation_key(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Case-insensitive, accent-insensitive comparison of two strings.
pub fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

/// A named, ordered sequence of records, e.g. `andhraPradeshCompanies`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedCollection {
    pub name: String,
    pub records: Vec<Record>,
}

impl NamedCollection {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// Stable sort by `field` under [`collate`]. Records without the field
    /// sort as the empty string, i.e. first.
    pub fn sort_by_field(&mut self, field: &str) {
        self.records
            .sort_by_cached_key(|r| collation_key(r.text_field(field).unwrap_or("")));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Every collection produced by one normalizer run, in source order.
///
/// Duplicate names are kept as separate entries. [`Dataset::get`] and
/// [`Dataset::into_map`] resolve them last-write-wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub collections: Vec<NamedCollection>,
}

impl Dataset {
    pub fn new(collections: Vec<NamedCollection>) -> Self {
        Self { collections }
    }

    pub fn push(&mut self, collection: NamedCollection) {
        self.collections.push(collection);
    }

    /// The last collection registered under `name`.
    pub fn get(&self, name: &str) -> Option<&NamedCollection> {
        self.collections.iter().rev().find(|c| c.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NamedCollection> {
        self.collections.iter()
    }

    /// Every record across all collections, in collection order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.collections.iter().flat_map(|c| c.records.iter())
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Name → records mapping; later duplicates overwrite earlier ones.
    pub fn into_map(self) -> BTreeMap<String, Vec<Record>> {
        self.collections
            .into_iter()
            .map(|c| (c.name, c.records))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a NamedCollection;
    type IntoIter = std::slice::Iter<'a, NamedCollection>;

    fn into_iter(self) -> Self::IntoIter {
        self.collections.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
