//! # Kiritsuke InfoDb
//!
//! A file-keyed metadata cache for the Kiritsuke prettifier. Implements
//! [`MetadataCache`](kiritsuke_core::MetadataCache): the prettifier reads
//! cached titles from it and records lookup requests on a miss. Whoever
//! performs the actual lookups drains the pending requests and fills the
//! entries back in with [`InfoDb::insert`].
//!
//! The store persists as a single JSON file, by default under the user's
//! data directory (see [`InfoDb::default_path`]).

pub mod error;
pub mod store;

pub use error::{InfoDbError, Result};
pub use store::InfoDb;
