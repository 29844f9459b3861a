//! # Raga Common Library
//!
//! Shared code for the raga knowledge service:
//! - Error and result types
//! - Configuration loading and credential resolution
//! - The Taxonomy Store (families, general raga profiles, moods, thaats)

pub mod config;
pub mod error;
pub mod taxonomy;

pub use error::{Error, Result};
pub use taxonomy::TaxonomyStore;
