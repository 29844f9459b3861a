//! Service layer: external enrichment and selection resolvers

pub mod enrichment_client;
pub mod resolvers;

pub use enrichment_client::{sanitize, EnrichmentFailure, GeminiClient, TextGenerator};
pub use resolvers::{
    Enrichment, FamilyView, MoodRagaDetails, MoodView, NameFinderView, QueryResolver,
    RagaDescription, RagaInfoView, ThaatView,
};
