use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use kiritsuke_core::{EnrichmentResult, MetadataCache};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{InfoDbError, Result};

/// On-disk layout of the store.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    entries: BTreeMap<String, EnrichmentResult>,
    #[serde(default)]
    pending: BTreeMap<String, String>,
}

/// In-memory metadata cache keyed by file path, with pending lookup
/// requests tracked alongside the filled entries.
///
/// A file is pending at most once: repeated requests keep the first search
/// key, and filling the entry clears the request. A filled file is never
/// pending. When both locks are needed, `pending` is always taken first.
#[derive(Debug, Default)]
pub struct InfoDb {
    entries: RwLock<HashMap<String, EnrichmentResult>>,
    pending: Mutex<BTreeMap<String, String>>,
}

fn key(file: &Path) -> String {
    file.to_string_lossy().into_owned()
}

impl InfoDb {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// `<data dir>/kiritsuke/infodb.json` for the current user.
    pub fn default_path() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join("kiritsuke").join("infodb.json"))
            .ok_or(InfoDbError::NoDataDir)
    }

    /// Load a store previously written with [`InfoDb::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        debug!(
            path = %path.display(),
            entries = snapshot.entries.len(),
            pending = snapshot.pending.len(),
            "loaded info db"
        );

        Ok(Self {
            entries: RwLock::new(snapshot.entries.into_iter().collect()),
            pending: Mutex::new(snapshot.pending),
        })
    }

    /// Load the store at `path`, starting empty if it does not exist or
    /// cannot be read.
    pub fn open_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::new();
        }
        match Self::load(path) {
            Ok(db) => db,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable info db");
                Self::new()
            }
        }
    }

    /// Write the store to `path` as JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let snapshot = {
            let pending = self.pending.lock();
            let entries = self.entries.read();
            Snapshot {
                entries: entries.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
                pending: pending.clone(),
            }
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
        debug!(path = %path.display(), "saved info db");
        Ok(())
    }

    /// Fill in the metadata for `file` and drop its pending request.
    pub fn insert(&self, file: &Path, info: EnrichmentResult) {
        let key = key(file);
        let mut pending = self.pending.lock();
        pending.remove(&key);
        self.entries.write().insert(key, info);
    }

    /// Pending requests as `(file, search key)` pairs, ordered by file.
    pub fn pending(&self) -> Vec<(String, String)> {
        self.pending
            .lock()
            .iter()
            .map(|(file, search_key)| (file.clone(), search_key.clone()))
            .collect()
    }

    /// Remove and return all pending requests.
    pub fn take_pending(&self) -> Vec<(String, String)> {
        std::mem::take(&mut *self.pending.lock()).into_iter().collect()
    }

    /// Number of filled entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if no entry has been filled yet.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl MetadataCache for InfoDb {
    fn get(&self, file: &Path) -> Option<EnrichmentResult> {
        self.entries.read().get(&key(file)).cloned()
    }

    fn request(&self, file: &Path, search_key: &str) {
        let key = key(file);
        let mut pending = self.pending.lock();
        if pending.contains_key(&key) || self.entries.read().contains_key(&key) {
            return;
        }
        debug!(file = %key, search_key, "queued metadata lookup");
        pending.insert(key, search_key.to_string());
    }
}
