//! Taxonomy record types
//!
//! Records are deserialized from the embedded TOML tables and serialized
//! back out to JSON by the web layer.

use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel used in the general-info table for an unknown parent family
pub const UNKNOWN_FAMILY: &str = "Nil";

/// Informal grouping of ragas sharing melodic lineage
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RagaFamily {
    /// Family name (unique key)
    pub name: String,
    /// Member ragas in authored order
    pub ragas: Vec<String>,
}

/// Number of distinct notes a raga uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum NoteCount {
    Five,
    Six,
    Seven,
}

/// One row of the general raga information table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RagaProfile {
    /// Raga name (unique key within the general-info table)
    pub name: String,
    /// Scale-degree symbols in ascending order
    pub scale: Vec<String>,
    /// Parent thaat, as authored (not reconciled against the thaat table)
    pub thaat: String,
    /// Note count category
    pub notes: NoteCount,
    /// Parent family; advisory text, not a key into the family table
    #[serde(default, deserialize_with = "deserialize_family")]
    pub family: Option<String>,
    /// Traditional performance-time window, free text
    pub time: String,
}

fn deserialize_family<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|family| family != UNKNOWN_FAMILY))
}

/// A raga recommended for a mood
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MoodRaga {
    pub name: String,
    /// Short descriptive phrase
    pub description: String,
    /// Reference link (placeholder `#` in the built-in data)
    pub link: String,
}

/// Mood label with its recommended ragas
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MoodProfile {
    /// Mood label (unique key)
    pub label: String,
    /// Recommended ragas in authored order
    pub ragas: Vec<MoodRaga>,
    /// Free-text summary of shared features
    pub features: String,
}

/// Parent scale classification and its member ragas
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThaatGroup {
    /// Thaat name (unique key)
    pub name: String,
    /// Member ragas in authored order
    pub ragas: Vec<String>,
}

/// Result of locating a raga within the thaat table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThaatMembership {
    /// Thaat that lists the raga
    pub thaat: String,
    /// Other members of that thaat, authored order, selected raga excluded
    pub siblings: Vec<String>,
}

/// Raw table document as authored in TOML
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaxonomyTables {
    #[serde(default, rename = "family")]
    pub families: Vec<RagaFamily>,
    #[serde(default, rename = "raga")]
    pub ragas: Vec<RagaProfile>,
    #[serde(default, rename = "mood")]
    pub moods: Vec<MoodProfile>,
    #[serde(default, rename = "thaat")]
    pub thaats: Vec<ThaatGroup>,
}
