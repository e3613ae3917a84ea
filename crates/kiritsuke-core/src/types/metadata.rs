use std::fmt;

use serde::{Deserialize, Serialize};

/// Metadata previously fetched for a file by an external lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    /// Canonical show or movie title.
    pub title: String,

    /// Release year, kept as text the way the service returned it.
    #[serde(default)]
    pub year: Option<String>,

    /// Episode title, for series.
    #[serde(default)]
    pub episode_name: Option<String>,
}

impl EnrichmentResult {
    /// Creates a result carrying only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: None,
            episode_name: None,
        }
    }

    /// Sets the release year.
    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Sets the episode title.
    #[must_use]
    pub fn with_episode_name(mut self, name: impl Into<String>) -> Self {
        self.episode_name = Some(name.into());
        self
    }

    /// Year, if present and non-empty.
    #[must_use]
    pub fn year(&self) -> Option<&str> {
        self.year.as_deref().filter(|y| !y.is_empty())
    }

    /// Episode name, if present and non-empty.
    #[must_use]
    pub fn episode_name(&self) -> Option<&str> {
        self.episode_name.as_deref().filter(|e| !e.is_empty())
    }
}

/// How the enrichment step ended for one prettify call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Enrichment {
    /// No lookup intent, no file identity, or no cache attached.
    NotAttempted,
    /// Cache miss; a lookup was requested and the title left unenriched.
    Requested,
    /// Cache hit, but the title could not be compared or was too different.
    Rejected {
        /// Jaro-Winkler similarity, when a comparison happened.
        similarity: Option<f64>,
    },
    /// Cache hit and the cached title replaced the file name title.
    Accepted {
        /// Jaro-Winkler similarity between file name title and cached title.
        similarity: f64,
    },
}

impl Enrichment {
    /// Returns `true` if cached metadata was merged into the title.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

impl fmt::Display for Enrichment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAttempted => write!(f, "not-attempted"),
            Self::Requested => write!(f, "requested"),
            Self::Rejected { similarity: None } => write!(f, "rejected"),
            Self::Rejected {
                similarity: Some(s),
            } => write!(f, "rejected({s:.3})"),
            Self::Accepted { similarity } => write!(f, "accepted({similarity:.3})"),
        }
    }
}
