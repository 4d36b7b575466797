//! jobpatra-catalog — state → city → sector index over a normalized dataset.
//!
//! The directory page groups listings by state, then city, then sector, and
//! filters a city's listings by sector and free text. [`Catalog`] is that
//! grouping as an owned value built from a [`Dataset`]; it serializes to the
//! nested `data.json` shape the page loads.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use jobpatra_core::{Dataset, NamedCollection, Record};
use serde::Serialize;

/// Sector used for listings that do not name one.
pub const OTHER_SECTOR: &str = "Other";

/// Roles shown per listing in a summary.
pub const MAX_SUMMARY_ROLES: usize = 12;

type Sectors = BTreeMap<String, Vec<Record>>;
type Cities = BTreeMap<String, Sectors>;

/// Listings grouped by state, city, and sector. All keys iterate sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    states: BTreeMap<String, Cities>,
}

impl Catalog {
    /// Group every record in `dataset`. When several collections share a
    /// name only the last one is used.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut seen = HashSet::new();
        let mut latest: Vec<&NamedCollection> = dataset
            .iter()
            .rev()
            .filter(|c| seen.insert(c.name.as_str()))
            .collect();
        latest.reverse();

        let mut catalog = Self::default();
        for collection in latest {
            let mut skipped = 0usize;
            for record in &collection.records {
                if !catalog.insert(record.clone()) {
                    skipped += 1;
                }
            }
            if skipped > 0 {
                tracing::debug!(
                    collection = %collection.name,
                    skipped,
                    "listings without state or city left out of catalog"
                );
            }
        }
        catalog
    }

    /// Add one record. Returns `false` (and drops it) when it has no state
    /// or city.
    pub fn insert(&mut self, record: Record) -> bool {
        let (Some(state), Some(city)) = (non_empty(&record.state), non_empty(&record.city)) else {
            return false;
        };
        let sector = non_empty(&record.sector).unwrap_or(OTHER_SECTOR);
        let (state, city, sector) = (state.to_string(), city.to_string(), sector.to_string());
        self.states
            .entry(state)
            .or_default()
            .entry(city)
            .or_default()
            .entry(sector)
            .or_default()
            .push(record);
        true
    }

    pub fn states(&self) -> Vec<&str> {
        self.states.keys().map(String::as_str).collect()
    }

    pub fn cities(&self, state: &str) -> Vec<&str> {
        self.states
            .get(state)
            .map(|cities| cities.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn sectors(&self, state: &str, city: &str) -> Vec<&str> {
        self.city(state, city)
            .map(|sectors| sectors.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Number of listings in the catalog.
    pub fn len(&self) -> usize {
        self.states
            .values()
            .flat_map(BTreeMap::values)
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Listings in the filter's city, sectors in sorted order.
    pub fn search(&self, filter: &Filter) -> Vec<Match<'_>> {
        let Some((state, city, sectors)) = self.city_entry(&filter.state, &filter.city) else {
            return Vec::new();
        };
        let query = filter
            .query
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());
        let wanted_sector = filter.sector.as_deref().map(str::trim).filter(|s| !s.is_empty());

        sectors
            .iter()
            .filter(|(sector, _)| wanted_sector.map_or(true, |s| s == sector.as_str()))
            .flat_map(|(sector, records)| {
                records.iter().map(move |record| Match {
                    record,
                    state,
                    city,
                    sector,
                })
            })
            .filter(|m| query.as_deref().map_or(true, |q| m.matches(q)))
            .collect()
    }

    /// Pretty-printed nested JSON, `{state: {city: {sector: [record]}}}`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn city(&self, state: &str, city: &str) -> Option<&Sectors> {
        self.states.get(state)?.get(city)
    }

    fn city_entry(&self, state: &str, city: &str) -> Option<(&str, &str, &Sectors)> {
        let (state, cities) = self.states.get_key_value(state)?;
        let (city, sectors) = cities.get_key_value(city)?;
        Some((state, city, sectors))
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// A city-level query. State and city are required; sector and free text
/// narrow the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub state: String,
    pub city: String,
    /// Exact sector name; blank means every sector.
    pub sector: Option<String>,
    /// Case-insensitive substring matched against the company name and the
    /// roles.
    pub query: Option<String>,
}

impl Filter {
    pub fn new(state: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            city: city.into(),
            ..Self::default()
        }
    }

    pub fn sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

/// One listing returned by [`Catalog::search`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'a> {
    pub record: &'a Record,
    pub state: &'a str,
    pub city: &'a str,
    pub sector: &'a str,
}

impl Match<'_> {
    /// The first [`MAX_SUMMARY_ROLES`] roles, comma separated.
    pub fn summary_roles(&self) -> String {
        let roles = self.record.roles();
        roles[..roles.len().min(MAX_SUMMARY_ROLES)].join(", ")
    }

    fn matches(&self, query: &str) -> bool {
        let company = self.record.company.as_deref().unwrap_or_default();
        company.to_lowercase().contains(query)
            || self.record.roles().join(" ").to_lowercase().contains(query)
    }
}

impl fmt::Display for Match<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let company = self.record.company.as_deref().unwrap_or("(unnamed)");
        writeln!(f, "{company}")?;
        write!(f, "  {} • {}, {}", self.sector, self.city, self.state)?;
        let roles = self.summary_roles();
        if !roles.is_empty() {
            write!(f, "\n  Roles: {roles}")?;
        }
        if let Some(url) = self.record.careers_url() {
            write!(f, "\n  Careers: {url}")?;
        }
        if let Some(url) = self.record.linkedin_url() {
            write!(f, "\n  LinkedIn: {url}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
