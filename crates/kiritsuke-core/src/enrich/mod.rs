pub mod cache;
pub mod fuzzy;

pub use cache::MetadataCache;
pub use fuzzy::{is_confident_match, FuzzyEnricher, MATCH_THRESHOLD};
