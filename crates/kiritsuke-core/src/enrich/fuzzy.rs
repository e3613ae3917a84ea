use std::path::Path;

use regex::Regex;
use strsim::jaro_winkler;
use tracing::{debug, trace};

use super::cache::MetadataCache;
use crate::error::Result;
use crate::types::{Enrichment, EnrichmentResult, LookupIntent};

/// Minimum Jaro-Winkler similarity, exclusive, for a cached title to
/// replace the one taken from the file name.
pub const MATCH_THRESHOLD: f64 = 0.91;

/// Returns `true` if `similarity` is strictly above [`MATCH_THRESHOLD`].
#[must_use]
pub fn is_confident_match(similarity: f64) -> bool {
    similarity > MATCH_THRESHOLD
}

/// Merges cached metadata into a prettified title when the cached title is
/// close enough to the one derived from the file name.
///
/// Only text is ever replaced: a rejected comparison leaves the title as it
/// was, and nothing is added that the title did not already have a slot for.
#[derive(Debug, Clone)]
pub struct FuzzyEnricher {
    re_episode_code: Regex,
    re_year: Regex,
}

impl FuzzyEnricher {
    /// Compiles the patterns that locate the episode code and the year.
    ///
    /// # Errors
    ///
    /// Returns `KiritsukeError::RegexError` if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_episode_code: Regex::new(r" - \d\d\d")?,
            re_year: Regex::new(r"\s\(\d{4}\)")?,
        })
    }

    /// Looks `file` up in `cache` and merges the result into `title`.
    ///
    /// On a miss the file is requested once, keyed by the intent's search
    /// key when there is one, and the title is returned unchanged.
    pub fn enrich(
        &self,
        cache: &dyn MetadataCache,
        file: &Path,
        title: &str,
        intent: &LookupIntent,
    ) -> (String, Enrichment) {
        let Some(info) = cache.get(file) else {
            let key = intent
                .search_key
                .as_deref()
                .filter(|key| !key.trim().is_empty())
                .unwrap_or(title);
            debug!(file = %file.display(), key, "metadata not cached, requesting lookup");
            cache.request(file, key);
            return (title.to_string(), Enrichment::Requested);
        };

        if intent.series {
            self.merge_series(&info, title, intent)
        } else if intent.movie {
            self.merge_movie(&info, title, intent)
        } else {
            (title.to_string(), Enrichment::NotAttempted)
        }
    }

    /// Replaces the show title in front of the `" - 102"` episode code.
    fn merge_series(
        &self,
        info: &EnrichmentResult,
        title: &str,
        intent: &LookupIntent,
    ) -> (String, Enrichment) {
        let code_start = self.re_episode_code.find(title).map(|m| m.start());
        let (Some(code_start), false) = (code_start, info.title.is_empty()) else {
            return (title.to_string(), Enrichment::Rejected { similarity: None });
        };

        let show = &title[..code_start];
        let similarity = jaro_winkler(show, &info.title);
        trace!(cached = %info.title, show, similarity, "series title similarity");

        if !is_confident_match(similarity) {
            return (
                title.to_string(),
                Enrichment::Rejected {
                    similarity: Some(similarity),
                },
            );
        }

        let mut merged = format!("{}{}", info.title, &title[code_start..]);
        if intent.episode {
            if let Some(episode_name) = info.episode_name() {
                merged.push_str(" - ");
                merged.push_str(episode_name);
            }
        }
        (merged, Enrichment::Accepted { similarity })
    }

    /// Replaces the whole title with `"<title> (<year>)"` from the cache.
    fn merge_movie(
        &self,
        info: &EnrichmentResult,
        title: &str,
        intent: &LookupIntent,
    ) -> (String, Enrichment) {
        let rejected = || (title.to_string(), Enrichment::Rejected { similarity: None });

        let Some(year) = info.year() else {
            return rejected();
        };
        if info.title.is_empty() {
            return rejected();
        }

        let candidate = if intent.movie_without_year {
            title
        } else {
            match self.re_year.find(title) {
                Some(m) => &title[..m.start()],
                None => return rejected(),
            }
        };

        let similarity = jaro_winkler(candidate, &info.title);
        trace!(cached = %info.title, candidate, similarity, "movie title similarity");

        if is_confident_match(similarity) {
            (
                format!("{} ({year})", info.title),
                Enrichment::Accepted { similarity },
            )
        } else {
            (
                title.to_string(),
                Enrichment::Rejected {
                    similarity: Some(similarity),
                },
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct FakeCache {
        entries: HashMap<PathBuf, EnrichmentResult>,
        requests: Mutex<Vec<(PathBuf, String)>>,
    }

    impl FakeCache {
        fn with(file: &str, info: EnrichmentResult) -> Self {
            let mut cache = Self::default();
            cache.entries.insert(PathBuf::from(file), info);
            cache
        }

        fn requests(&self) -> Vec<(PathBuf, String)> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl MetadataCache for FakeCache {
        fn get(&self, file: &Path) -> Option<EnrichmentResult> {
            self.entries.get(file).cloned()
        }

        fn request(&self, file: &Path, search_key: &str) {
            self.requests
                .lock()
                .unwrap()
                .push((file.to_path_buf(), search_key.to_string()));
        }
    }

    fn enricher() -> FuzzyEnricher {
        FuzzyEnricher::new().unwrap()
    }

    fn series(episode: bool) -> LookupIntent {
        LookupIntent {
            series: true,
            episode,
            ..LookupIntent::default()
        }
    }

    fn movie(without_year: bool) -> LookupIntent {
        LookupIntent {
            movie: true,
            movie_without_year: without_year,
            ..LookupIntent::default()
        }
    }

    #[test]
    fn threshold_is_strict() {
        assert!(!is_confident_match(0.91));
        assert!(is_confident_match(0.92));
        assert!(!is_confident_match(0.5));
        assert!(is_confident_match(1.0));
    }

    #[test]
    fn miss_requests_with_title() {
        let cache = FakeCache::default();
        let (title, outcome) =
            enricher().enrich(&cache, Path::new("/tv/a.mkv"), "Show Name - 102", &series(true));

        assert_eq!(title, "Show Name - 102");
        assert_eq!(outcome, Enrichment::Requested);
        assert_eq!(
            cache.requests(),
            vec![(PathBuf::from("/tv/a.mkv"), "Show Name - 102".to_string())]
        );
    }

    #[test]
    fn miss_prefers_search_key() {
        let cache = FakeCache::default();
        let mut intent = series(true);
        intent.search_key = Some("Anime TitleS01E05".into());

        enricher().enrich(&cache, Path::new("a.mkv"), "Anime Title - 05", &intent);
        assert_eq!(cache.requests()[0].1, "Anime TitleS01E05");

        let cache = FakeCache::default();
        intent.search_key = Some("  ".into());
        enricher().enrich(&cache, Path::new("a.mkv"), "Anime Title - 05", &intent);
        assert_eq!(cache.requests()[0].1, "Anime Title - 05");
    }

    #[test]
    fn series_hit_replaces_show_and_appends_episode_name() {
        let cache = FakeCache::with(
            "a.mkv",
            EnrichmentResult::new("Show Name").with_episode_name("Pilot"),
        );
        let (title, outcome) =
            enricher().enrich(&cache, Path::new("a.mkv"), "Show name - 101", &series(true));

        assert_eq!(title, "Show Name - 101 - Pilot");
        assert!(outcome.is_accepted());
        assert!(cache.requests().is_empty());
    }

    #[test]
    fn series_hit_without_episode_flag_keeps_code_only() {
        let cache = FakeCache::with(
            "a.mkv",
            EnrichmentResult::new("Show: Name").with_episode_name("Pilot"),
        );
        let (title, outcome) =
            enricher().enrich(&cache, Path::new("a.mkv"), "Show Name - 101 - Pilot", &series(false));

        assert_eq!(title, "Show: Name - 101 - Pilot");
        assert!(outcome.is_accepted());
    }

    #[test]
    fn series_hit_with_dissimilar_title_is_rejected() {
        let cache = FakeCache::with("a.mkv", EnrichmentResult::new("Completely Different"));
        let (title, outcome) =
            enricher().enrich(&cache, Path::new("a.mkv"), "Show Name - 101", &series(true));

        assert_eq!(title, "Show Name - 101");
        assert!(matches!(outcome, Enrichment::Rejected { similarity: Some(s) } if s <= MATCH_THRESHOLD));
    }

    #[test]
    fn series_without_episode_code_is_left_alone() {
        let cache = FakeCache::with("a.mkv", EnrichmentResult::new("Anime Title"));
        let (title, outcome) =
            enricher().enrich(&cache, Path::new("a.mkv"), "Anime Title - 05", &series(true));

        assert_eq!(title, "Anime Title - 05");
        assert_eq!(outcome, Enrichment::Rejected { similarity: None });
    }

    #[test]
    fn movie_hit_uses_text_before_year() {
        let cache = FakeCache::with("m.mkv", EnrichmentResult::new("Se7en").with_year("1995"));
        let (title, outcome) =
            enricher().enrich(&cache, Path::new("m.mkv"), "Se7en (1995)", &movie(false));
        assert_eq!(title, "Se7en (1995)");
        assert!(outcome.is_accepted());

        let cache = FakeCache::with(
            "m.mkv",
            EnrichmentResult::new("The Lord of the Rings").with_year("2001"),
        );
        let (title, outcome) =
            enricher().enrich(&cache, Path::new("m.mkv"), "The Lord of the Ring (2001)", &movie(false));
        assert_eq!(title, "The Lord of the Rings (2001)");
        assert!(outcome.is_accepted());
    }

    #[test]
    fn movie_without_year_compares_whole_title() {
        let cache = FakeCache::with("m.mkv", EnrichmentResult::new("Amelie").with_year("2001"));
        let (title, outcome) =
            enricher().enrich(&cache, Path::new("m.mkv"), "Amelie", &movie(true));
        assert_eq!(title, "Amelie (2001)");
        assert!(outcome.is_accepted());
    }

    #[test]
    fn movie_needs_cached_year() {
        let cache = FakeCache::with("m.mkv", EnrichmentResult::new("Amelie"));
        let (title, outcome) =
            enricher().enrich(&cache, Path::new("m.mkv"), "Amelie", &movie(true));
        assert_eq!(title, "Amelie");
        assert_eq!(outcome, Enrichment::Rejected { similarity: None });
    }

    #[test]
    fn movie_without_year_marker_in_title_is_left_alone() {
        let cache = FakeCache::with("m.mkv", EnrichmentResult::new("Amelie").with_year("2001"));
        let (title, outcome) =
            enricher().enrich(&cache, Path::new("m.mkv"), "Amelie", &movie(false));
        assert_eq!(title, "Amelie");
        assert_eq!(outcome, Enrichment::Rejected { similarity: None });
    }
}
