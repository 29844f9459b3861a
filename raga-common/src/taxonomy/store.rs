//! Read-only Taxonomy Store
//!
//! Holds the four source tables plus derived, pre-sorted name lists. Built
//! once at startup and shared by reference; nothing mutates it afterwards,
//! so concurrent readers need no locking.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use super::types::{
    MoodProfile, RagaFamily, RagaProfile, TaxonomyTables, ThaatGroup, ThaatMembership,
};
use crate::{Error, Result};

/// Embedded taxonomy document
const BUILTIN_TAXONOMY: &str = include_str!("../../data/taxonomy.toml");

/// Immutable, cross-referenced raga taxonomy
#[derive(Debug, Clone)]
pub struct TaxonomyStore {
    families: Vec<RagaFamily>,
    ragas: Vec<RagaProfile>,
    moods: Vec<MoodProfile>,
    thaats: Vec<ThaatGroup>,

    family_index: HashMap<String, usize>,
    raga_index: HashMap<String, usize>,
    mood_index: HashMap<String, usize>,

    sorted_family_names: Vec<String>,
    sorted_mood_labels: Vec<String>,
    sorted_thaat_ragas: Vec<String>,
    general_raga_names: Vec<String>,
    unified_names: Vec<String>,
}

impl TaxonomyStore {
    /// Load the taxonomy compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_TAXONOMY)
    }

    /// Parse a taxonomy document in the embedded TOML layout
    pub fn from_toml_str(document: &str) -> Result<Self> {
        let tables: TaxonomyTables = toml::from_str(document)?;
        Self::from_tables(tables)
    }

    /// Build a store from raw tables, rejecting duplicate keys
    pub fn from_tables(tables: TaxonomyTables) -> Result<Self> {
        let TaxonomyTables {
            families,
            ragas,
            moods,
            thaats,
        } = tables;

        let family_index = build_index("family", families.iter().map(|f| f.name.as_str()))?;
        let raga_index = build_index("raga", ragas.iter().map(|r| r.name.as_str()))?;
        let mood_index = build_index("mood", moods.iter().map(|m| m.label.as_str()))?;
        // Thaat lookups scan in authored order, so only uniqueness is checked
        build_index("thaat", thaats.iter().map(|t| t.name.as_str()))?;

        let sorted_family_names = sorted_unique(families.iter().map(|f| f.name.as_str()));
        let sorted_mood_labels = sorted_unique(moods.iter().map(|m| m.label.as_str()));
        let sorted_thaat_ragas =
            sorted_unique(thaats.iter().flat_map(|t| t.ragas.iter().map(String::as_str)));
        let general_raga_names = ragas.iter().map(|r| r.name.clone()).collect();

        let unified_names = sorted_unique(
            families
                .iter()
                .flat_map(|f| f.ragas.iter().map(String::as_str))
                .chain(ragas.iter().map(|r| r.name.as_str()))
                .chain(
                    moods
                        .iter()
                        .flat_map(|m| m.ragas.iter().map(|r| r.name.as_str())),
                )
                .chain(sorted_thaat_ragas.iter().map(String::as_str)),
        );

        debug!(
            families = families.len(),
            ragas = ragas.len(),
            moods = moods.len(),
            thaats = thaats.len(),
            unified = unified_names.len(),
            "Taxonomy store built"
        );

        Ok(Self {
            families,
            ragas,
            moods,
            thaats,
            family_index,
            raga_index,
            mood_index,
            sorted_family_names,
            sorted_mood_labels,
            sorted_thaat_ragas,
            general_raga_names,
            unified_names,
        })
    }

    /// Member ragas of a family, authored order
    pub fn family_members(&self, family_name: &str) -> Option<&[String]> {
        self.family_index
            .get(family_name)
            .map(|&i| self.families[i].ragas.as_slice())
    }

    /// General-info row for a raga (exact name match)
    pub fn raga_profile(&self, raga_name: &str) -> Option<&RagaProfile> {
        self.raga_index.get(raga_name).map(|&i| &self.ragas[i])
    }

    pub fn mood_profile(&self, mood_label: &str) -> Option<&MoodProfile> {
        self.mood_index.get(mood_label).map(|&i| &self.moods[i])
    }

    /// Locate the thaat listing `raga_name`.
    ///
    /// Groups are scanned in authored order and the first group containing
    /// the raga wins. Siblings keep authored order and exclude the raga.
    pub fn thaat_for_raga(&self, raga_name: &str) -> Option<ThaatMembership> {
        self.thaats
            .iter()
            .find(|group| group.ragas.iter().any(|r| r == raga_name))
            .map(|group| ThaatMembership {
                thaat: group.name.clone(),
                siblings: group
                    .ragas
                    .iter()
                    .filter(|r| *r != raga_name)
                    .cloned()
                    .collect(),
            })
    }

    /// Family names, sorted
    pub fn all_family_names(&self) -> &[String] {
        &self.sorted_family_names
    }

    /// Mood labels, sorted
    pub fn all_mood_labels(&self) -> &[String] {
        &self.sorted_mood_labels
    }

    /// Every raga listed under any thaat, deduplicated and sorted
    pub fn all_thaat_raga_names(&self) -> &[String] {
        &self.sorted_thaat_ragas
    }

    /// General-info raga names in authored table order
    pub fn general_raga_names(&self) -> &[String] {
        &self.general_raga_names
    }

    /// Sorted, deduplicated union of raga names across all four tables
    pub fn unified_raga_names(&self) -> &[String] {
        &self.unified_names
    }

    /// Membership test against the unified name index
    pub fn is_known_raga(&self, raga_name: &str) -> bool {
        self.unified_names
            .binary_search_by(|name| name.as_str().cmp(raga_name))
            .is_ok()
    }
}

fn build_index<'a>(
    table: &'static str,
    keys: impl Iterator<Item = &'a str>,
) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::new();
    for (position, key) in keys.enumerate() {
        if index.insert(key.to_string(), position).is_some() {
            return Err(Error::DuplicateKey {
                table,
                key: key.to_string(),
            });
        }
    }
    Ok(index)
}

fn sorted_unique<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    names
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
