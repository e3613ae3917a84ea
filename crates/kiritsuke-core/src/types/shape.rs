use std::fmt;

use serde::{Deserialize, Serialize};

/// Structural shape of a file name, as recognised by the rewrite cascade.
///
/// Variants are declared in evaluation priority order: when a name fits
/// several shapes, the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeCategory {
    /// Multi-episode scene marker within seasons 00-09: "S01E01E02", "S01E01-E02"
    SceneEpisodeLowSeasonMulti,
    /// Multi-episode scene marker for seasons 10-99: "S12E01E02"
    SceneEpisodeHighSeasonMulti,
    /// Scene marker within seasons 00-09: "S01E01"
    SceneEpisodeLowSeason,
    /// Scene marker for seasons 10-99: "S12E01"
    SceneEpisodeHighSeason,
    /// Daily shows numbered by air date: "2013.03.18"
    DateBasedEpisode,
    /// Movie with a separator-delimited year: "Movie.2013.BluRay"
    YearDottedMovie,
    /// Movie with a bracketed year: "Movie [2013]"
    YearBracketedMovie,
    /// Movie with a parenthesized year: "Movie (2013)"
    YearParenMovie,
    /// Fansub release ending in a CRC tag: "Title - 05 [ABCD1234]"
    AnimeHashTagged,
    /// Fansub release with bracketed quality tags but no CRC
    AnimeBracketNoHash,
    /// No year anywhere, but technical end tokens are present
    MarkerOnlyMovie,
    /// Nothing recognisable; left as-is
    Unclassified,
}

impl ShapeCategory {
    /// All categories in evaluation priority order.
    pub const ALL: [ShapeCategory; 12] = [
        Self::SceneEpisodeLowSeasonMulti,
        Self::SceneEpisodeHighSeasonMulti,
        Self::SceneEpisodeLowSeason,
        Self::SceneEpisodeHighSeason,
        Self::DateBasedEpisode,
        Self::YearDottedMovie,
        Self::YearBracketedMovie,
        Self::YearParenMovie,
        Self::AnimeHashTagged,
        Self::AnimeBracketNoHash,
        Self::MarkerOnlyMovie,
        Self::Unclassified,
    ];

    /// Returns `true` for shapes that describe an episode of a series.
    #[must_use]
    pub fn is_series(self) -> bool {
        matches!(
            self,
            Self::SceneEpisodeLowSeasonMulti
                | Self::SceneEpisodeHighSeasonMulti
                | Self::SceneEpisodeLowSeason
                | Self::SceneEpisodeHighSeason
                | Self::DateBasedEpisode
                | Self::AnimeHashTagged
                | Self::AnimeBracketNoHash
        )
    }

    /// Returns `true` for shapes that describe a movie.
    #[must_use]
    pub fn is_movie(self) -> bool {
        matches!(
            self,
            Self::YearDottedMovie
                | Self::YearBracketedMovie
                | Self::YearParenMovie
                | Self::MarkerOnlyMovie
        )
    }
}

impl fmt::Display for ShapeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SceneEpisodeLowSeasonMulti => "scene-episode-low-season-multi",
            Self::SceneEpisodeHighSeasonMulti => "scene-episode-high-season-multi",
            Self::SceneEpisodeLowSeason => "scene-episode-low-season",
            Self::SceneEpisodeHighSeason => "scene-episode-high-season",
            Self::DateBasedEpisode => "date-based-episode",
            Self::YearDottedMovie => "year-dotted-movie",
            Self::YearBracketedMovie => "year-bracketed-movie",
            Self::YearParenMovie => "year-paren-movie",
            Self::AnimeHashTagged => "anime-hash-tagged",
            Self::AnimeBracketNoHash => "anime-bracket-no-hash",
            Self::MarkerOnlyMovie => "marker-only-movie",
            Self::Unclassified => "unclassified",
        };
        f.write_str(name)
    }
}
