//! # Kiritsuke Core
//!
//! Turns scene, P2P and fansub media file names into clean display titles.
//! Names are classified by an ordered cascade of shape rules, rewritten,
//! and optionally corrected against cached metadata when the cached title
//! is a close Jaro-Winkler match.
//!
//! ## Quick Start
//!
//! ```rust
//! use kiritsuke_core::prettify::Prettifier;
//!
//! let prettifier = Prettifier::default().unwrap();
//! let result = prettifier.prettify_detailed("[GroupTag] Anime Title - 05 [1080p][abcd1234].mkv", None);
//!
//! assert_eq!(result.title, "Anime Title - 05");
//! assert_eq!(result.intent.search_key.as_deref(), Some("Anime TitleS01E05"));
//! ```
pub mod enrich;
pub mod error;
pub mod prettify;
pub mod sorting;
pub mod types;

// Re-export primary API
pub use enrich::{is_confident_match, FuzzyEnricher, MetadataCache, MATCH_THRESHOLD};
pub use error::{KiritsukeError, Result};
pub use prettify::{PrettifyConfig, Prettifier, ShapeCascade};
pub use sorting::SortKeyNormalizer;
pub use types::{Enrichment, EnrichmentResult, LookupIntent, PrettifyResult, ShapeCategory};
