use serde::{Deserialize, Serialize};

/// What the cascade learned about whether external metadata could help.
///
/// All flags start out `false`; the matching shape rule raises the ones
/// that apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupIntent {
    /// The file name carries no episode title, so a cached episode name may
    /// be appended.
    pub episode: bool,

    /// The name looks like an episode of a series.
    pub series: bool,

    /// The name looks like a movie.
    pub movie: bool,

    /// Movie lookup where the file name carried no year at all.
    pub movie_without_year: bool,

    /// Query to hand to the metadata cache instead of the display title,
    /// e.g. `"Anime TitleS01E05"` for bare anime episode numbers.
    pub search_key: Option<String>,
}

impl LookupIntent {
    /// Returns `true` if the cache should be consulted at all.
    #[must_use]
    pub fn wants_lookup(&self) -> bool {
        self.series || self.movie
    }
}
