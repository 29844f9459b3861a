//! Query resolvers
//!
//! One resolver per taxonomy axis. Each validates the selection against the
//! Taxonomy Store, assembles the cross-referenced facts, and optionally
//! attaches generated commentary. A missing or unknown selection yields the
//! empty view and never reaches the text generator.

use std::sync::Arc;

use raga_common::taxonomy::{RagaProfile, TaxonomyStore};
use serde::Serialize;
use tracing::{debug, info};

use super::enrichment_client::{EnrichmentFailure, TextGenerator};

/// Generated commentary, or the message shown in its place
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Enrichment {
    Generated { text: String },
    Failed { message: String },
}

impl Enrichment {
    /// Text to display in the enrichment slot
    pub fn as_text(&self) -> &str {
        match self {
            Enrichment::Generated { text } => text,
            Enrichment::Failed { message } => message,
        }
    }

    fn from_result(
        result: Result<String, EnrichmentFailure>,
        describe_failure: impl FnOnce(&EnrichmentFailure) -> String,
    ) -> Self {
        match result {
            Ok(text) => Enrichment::Generated { text },
            Err(e) => {
                tracing::warn!(error = %e, "Enrichment failed");
                Enrichment::Failed {
                    message: describe_failure(&e),
                }
            }
        }
    }
}

/// Family insights view
#[derive(Debug, Clone, Serialize)]
pub struct FamilyView {
    pub raga_families: Vec<String>,
    pub selected_family: Option<String>,
    pub associated_ragas: Vec<String>,
    pub raga_family_details: Option<Enrichment>,
}

/// General raga information view
#[derive(Debug, Clone, Serialize)]
pub struct RagaInfoView {
    pub raga_names: Vec<String>,
    pub selected_raga_name: Option<String>,
    pub raga_details: Option<RagaProfile>,
}

/// One recommended raga with its generated insights
#[derive(Debug, Clone, Serialize)]
pub struct MoodRagaDetails {
    pub name: String,
    pub description: String,
    pub link: String,
    pub details: Enrichment,
}

/// Mood recommendation view
#[derive(Debug, Clone, Serialize)]
pub struct MoodView {
    pub moods: Vec<String>,
    pub selected_mood: Option<String>,
    pub mood_features: Option<String>,
    pub raga_details_list: Vec<MoodRagaDetails>,
}

/// Name finder view; descriptions are fetched through [`QueryResolver::describe`]
#[derive(Debug, Clone, Serialize)]
pub struct NameFinderView {
    pub raga_names: Vec<String>,
    pub selected_raga: Option<String>,
}

/// Detailed description of a single raga
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RagaDescription {
    pub raga: String,
    pub description: String,
}

/// Raga-thaat mapping view
#[derive(Debug, Clone, Serialize)]
pub struct ThaatView {
    pub ragas_for_select: Vec<String>,
    pub selected_raga: Option<String>,
    pub associated_thaat: Option<String>,
    pub thaat_insights: Option<Enrichment>,
    pub other_ragas_in_thaat: Vec<String>,
}

fn family_prompt(family: &str) -> String {
    format!("Provide insights for the raga family {}.", family)
}

fn raga_insights_prompt(raga: &str) -> String {
    format!("Provide insights for the raga {}.", raga)
}

fn description_prompt(raga: &str) -> String {
    format!("Provide a detailed description of the raga {}.", raga)
}

fn thaat_prompt(raga: &str, thaat: &str) -> String {
    format!("Provide insights for the raga '{}' in the '{}' thaat.", raga, thaat)
}

/// Empty submissions count as no selection
fn selection(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.is_empty())
}

/// Resolves user selections against the taxonomy and the text generator
#[derive(Clone)]
pub struct QueryResolver {
    taxonomy: Arc<TaxonomyStore>,
    generator: Arc<dyn TextGenerator>,
}

impl QueryResolver {
    pub fn new(taxonomy: Arc<TaxonomyStore>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            taxonomy,
            generator,
        }
    }

    pub fn taxonomy(&self) -> &TaxonomyStore {
        &self.taxonomy
    }

    /// Family members plus one generated family overview
    pub async fn family(&self, selected: Option<&str>) -> FamilyView {
        let mut view = FamilyView {
            raga_families: self.taxonomy.all_family_names().to_vec(),
            selected_family: None,
            associated_ragas: Vec::new(),
            raga_family_details: None,
        };

        let Some(family) = selection(selected) else {
            return view;
        };
        let Some(members) = self.taxonomy.family_members(family) else {
            debug!(family = %family, "Unknown raga family selected");
            return view;
        };

        info!(family = %family, "Resolving raga family");
        let result = self.generator.generate(&family_prompt(family)).await;

        view.selected_family = Some(family.to_string());
        view.associated_ragas = members.to_vec();
        view.raga_family_details = Some(Enrichment::from_result(result, |e| {
            format!("Error fetching details for {}: {}", family, e)
        }));
        view
    }

    /// General-info lookup; no generated text
    pub fn raga_info(&self, selected: Option<&str>) -> RagaInfoView {
        let profile = selection(selected).and_then(|name| self.taxonomy.raga_profile(name));

        RagaInfoView {
            raga_names: self.taxonomy.general_raga_names().to_vec(),
            selected_raga_name: profile.map(|p| p.name.clone()),
            raga_details: profile.cloned(),
        }
    }

    /// Mood recommendations with per-raga generated insights.
    ///
    /// Issues one call per listed raga, sequentially. A failure on one raga
    /// is recorded in that entry and the remaining ragas are still resolved.
    pub async fn mood(&self, selected: Option<&str>) -> MoodView {
        let mut view = MoodView {
            moods: self.taxonomy.all_mood_labels().to_vec(),
            selected_mood: None,
            mood_features: None,
            raga_details_list: Vec::new(),
        };

        let Some(label) = selection(selected) else {
            return view;
        };
        let Some(mood) = self.taxonomy.mood_profile(label) else {
            debug!(mood = %label, "Unknown mood selected");
            return view;
        };

        info!(mood = %label, ragas = mood.ragas.len(), "Resolving mood recommendations");

        let mut details = Vec::with_capacity(mood.ragas.len());
        for raga in &mood.ragas {
            let result = self.generator.generate(&raga_insights_prompt(&raga.name)).await;
            details.push(MoodRagaDetails {
                name: raga.name.clone(),
                description: raga.description.clone(),
                link: raga.link.clone(),
                details: Enrichment::from_result(result, |e| format!("Error: {}", e)),
            });
        }

        view.selected_mood = Some(mood.label.clone());
        view.mood_features = Some(mood.features.clone());
        view.raga_details_list = details;
        view
    }

    /// Name finder scaffold; the selection is echoed only if it is a known raga
    pub fn name_finder(&self, selected: Option<&str>) -> NameFinderView {
        let selected_raga = selection(selected)
            .filter(|name| self.taxonomy.is_known_raga(name))
            .map(str::to_string);

        NameFinderView {
            raga_names: self.taxonomy.unified_raga_names().to_vec(),
            selected_raga,
        }
    }

    /// Detailed description for any non-empty raga name.
    ///
    /// Returns `None` when no name was supplied.
    pub async fn describe(&self, raga: Option<&str>) -> Option<RagaDescription> {
        let raga = selection(raga)?;

        info!(raga = %raga, "Fetching raga description");
        let result = self.generator.generate(&description_prompt(raga)).await;
        let description = Enrichment::from_result(result, |e| {
            format!("Error fetching details for {}: {}", raga, e)
        });

        Some(RagaDescription {
            raga: raga.to_string(),
            // Error text may quote the raw service body
            description: description.as_text().replace('*', ""),
        })
    }

    /// Thaat lookup plus one generated raga-in-thaat commentary
    pub async fn thaat(&self, selected: Option<&str>) -> ThaatView {
        let mut view = ThaatView {
            ragas_for_select: self.taxonomy.all_thaat_raga_names().to_vec(),
            selected_raga: None,
            associated_thaat: None,
            thaat_insights: None,
            other_ragas_in_thaat: Vec::new(),
        };

        let Some(raga) = selection(selected) else {
            return view;
        };
        let Some(membership) = self.taxonomy.thaat_for_raga(raga) else {
            debug!(raga = %raga, "Raga not listed under any thaat");
            return view;
        };

        info!(raga = %raga, thaat = %membership.thaat, "Resolving thaat mapping");
        let result = self
            .generator
            .generate(&thaat_prompt(raga, &membership.thaat))
            .await;

        view.selected_raga = Some(raga.to_string());
        view.thaat_insights = Some(Enrichment::from_result(result, |e| {
            format!("Error fetching details: {}", e)
        }));
        view.associated_thaat = Some(membership.thaat);
        view.other_ragas_in_thaat = membership.siblings;
        view
    }
}
