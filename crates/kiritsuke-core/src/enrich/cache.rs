use std::path::Path;

use crate::types::EnrichmentResult;

/// External store of metadata looked up for individual files.
///
/// The prettifier only reads from it and, on a miss, asks for the file to be
/// looked up. Population happens elsewhere and is never awaited, so a
/// requested entry shows up on a later call at the earliest.
///
/// Implementations must tolerate `get` running concurrently with `request`
/// and are responsible for not starting two lookups for the same file.
pub trait MetadataCache: Send + Sync {
    /// Returns the cached metadata for `file`, or `None` if nothing is cached yet.
    fn get(&self, file: &Path) -> Option<EnrichmentResult>;

    /// Asks for `file` to be looked up using `search_key` as the query.
    fn request(&self, file: &Path, search_key: &str);
}
