//! Static raga taxonomy
//!
//! Four independently maintained tables (family, general info, mood, thaat)
//! matched to each other by exact raga name.

mod store;
pub mod types;

pub use store::TaxonomyStore;
pub use types::{
    MoodProfile, MoodRaga, NoteCount, RagaFamily, RagaProfile, TaxonomyTables, ThaatGroup,
    ThaatMembership,
};
