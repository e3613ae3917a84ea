//! # Kiritsuke
//!
//! Prettifies scene, P2P and fansub media file names into display titles,
//! optionally corrected against a file-keyed metadata cache.
//!
//! ```rust
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use kiritsuke::{InfoDb, Prettifier};
//!
//! let db = Arc::new(InfoDb::new());
//! let prettifier = Prettifier::default().unwrap().with_cache(db.clone());
//!
//! let title = prettifier.prettify("Show.Name.S01E02.720p.HDTV.x264.mkv", Some(Path::new("a.mkv")));
//! assert_eq!(title, "Show Name - 102");
//! assert_eq!(db.pending().len(), 1);
//! ```

pub use kiritsuke_core::*;
pub use kiritsuke_infodb::{InfoDb, InfoDbError};

