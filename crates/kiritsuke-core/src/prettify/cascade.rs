//! # Shape Cascade
//!
//! Classifies a stripped file name into a [`ShapeCategory`] and applies the
//! rewrite that belongs to it.
//!
//! The rules form an explicit ordered list of `(predicate, rewrite)` pairs.
//! Evaluation stops at the first predicate that matches, so a name fitting
//! several shapes always resolves to the earliest one. Each rewrite runs
//! edition extraction, end-metadata stripping, period replacement and title
//! casing in its own order; periods are replaced only after the numbering
//! rewrites have consumed the ones that separate digits.

use regex::Regex;
use tracing::debug;

use super::edition::EditionExtractor;
use super::end_metadata::{flag_word_tail, technical_tail, EndMetadataStripper};
use super::text;
use crate::error::Result;
use crate::types::{LookupIntent, ShapeCategory};

/// Working state threaded through one rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    /// Shape rule that claimed the name.
    pub category: ShapeCategory,
    /// Name being rewritten.
    pub name: String,
    /// Edition pulled out of the name, if any.
    pub edition: Option<String>,
    /// Lookup flags raised by the rule.
    pub intent: LookupIntent,
    use_external_info: bool,
}

type Rewrite = fn(&ShapeCascade, &mut Draft);

struct ShapeRule {
    category: ShapeCategory,
    predicate: Regex,
    rewrite: Rewrite,
}

/// Regexes for one episode numbering style (`S01E02`, `2013.03.18`, ...).
struct NumberingRewrite {
    /// Marker directly followed by a technical token and the rest of the name.
    with_technical_tail: Regex,
    /// Marker directly followed by a case-sensitive flag word.
    with_flag_tail: Regex,
    /// Marker followed by a separator, i.e. possibly an episode title.
    with_separator: Regex,
    /// Replacement producing the `" - 102"` style code.
    code: &'static str,
}

impl NumberingRewrite {
    fn new(marker: &str, code: &'static str) -> Result<Self> {
        Ok(Self {
            with_technical_tail: Regex::new(&format!("(?i){marker}(?:{})", technical_tail()))?,
            with_flag_tail: Regex::new(&format!("{marker}(?:{})", flag_word_tail()))?,
            with_separator: Regex::new(&format!(r"(?i){marker}[\s.]"))?,
            code,
        })
    }

    /// Rewrites a marker that is directly followed by end metadata, dropping
    /// the metadata in the same substitution.
    fn consume_tail(&self, name: &str) -> String {
        let name = self.with_technical_tail.replace_all(name, self.code);
        self.with_flag_tail.replace_all(&name, self.code).into_owned()
    }

    /// Rewrites a marker that is still followed by more text into
    /// `" - CODE - "`, setting that text off as the episode title.
    fn mark_episode_title(&self, name: &str) -> String {
        self.with_separator
            .replace_all(name, format!("{} - ", self.code).as_str())
            .into_owned()
    }
}

/// The ordered shape rules plus the regexes their rewrites use.
pub struct ShapeCascade {
    rules: Vec<ShapeRule>,
    low_season_multi: NumberingRewrite,
    high_season_multi: NumberingRewrite,
    low_season: NumberingRewrite,
    high_season: NumberingRewrite,
    air_date: NumberingRewrite,
    re_year_dotted: Regex,
    re_year_bracketed: Regex,
    re_anime_hash_tail: Regex,
    re_anime_bracket_tail: Regex,
    re_anime_episode: Regex,
    editions: EditionExtractor,
    end_metadata: EndMetadataStripper,
}

/// Joins two episode numbers of a multi-episode marker: `E`, `-E`, `-` or nothing.
const EPISODE_JOINER: &str = "(?:[eE]|-[eE]?)?";

impl ShapeCascade {
    /// Compiles every shape predicate and rewrite pattern.
    ///
    /// # Errors
    ///
    /// Returns `KiritsukeError::RegexError` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        let rule = |category, pattern: &str, rewrite: Rewrite| -> Result<ShapeRule> {
            Ok(ShapeRule {
                category,
                predicate: Regex::new(pattern)?,
                rewrite,
            })
        };

        let rules = vec![
            rule(
                ShapeCategory::SceneEpisodeLowSeasonMulti,
                &format!(r"[sS]0\d[eE]\d\d{EPISODE_JOINER}\d\d"),
                Self::rewrite_low_season_multi,
            )?,
            rule(
                ShapeCategory::SceneEpisodeHighSeasonMulti,
                &format!(r"[sS][1-9]\d[eE]\d\d{EPISODE_JOINER}\d\d"),
                Self::rewrite_high_season_multi,
            )?,
            rule(
                ShapeCategory::SceneEpisodeLowSeason,
                r"[sS]0\d[eE]\d\d",
                Self::rewrite_low_season,
            )?,
            rule(
                ShapeCategory::SceneEpisodeHighSeason,
                r"[sS][1-9]\d[eE]\d\d",
                Self::rewrite_high_season,
            )?,
            rule(
                ShapeCategory::DateBasedEpisode,
                r"[\s.](19|20)\d\d[\s.][0-1]\d[\s.][0-3]\d[\s.]",
                Self::rewrite_air_date,
            )?,
            rule(
                ShapeCategory::YearDottedMovie,
                r"[\s.](19|20)\d\d[\s.]",
                Self::rewrite_year_dotted,
            )?,
            rule(
                ShapeCategory::YearBracketedMovie,
                r"\[(19|20)\d\d\]",
                Self::rewrite_year_bracketed,
            )?,
            rule(
                ShapeCategory::YearParenMovie,
                r"\((19|20)\d\d\)",
                Self::rewrite_year_paren,
            )?,
            rule(
                ShapeCategory::AnimeHashTagged,
                r"\[[0-9a-zA-Z]{8}\]$",
                Self::rewrite_anime_hash_tagged,
            )?,
            rule(
                ShapeCategory::AnimeBracketNoHash,
                r"\[BD\]|\[720p\]|\[1080p\]|\[480p\]|\[Blu-Ray|\[h264",
                Self::rewrite_anime_bracket_no_hash,
            )?,
            // Exact case on purpose: a lowercase ".ws" or ".hq" inside a
            // title is not enough to call it a release name.
            rule(
                ShapeCategory::MarkerOnlyMovie,
                &technical_tail(),
                Self::rewrite_marker_only,
            )?,
        ];

        Ok(Self {
            rules,
            low_season_multi: NumberingRewrite::new(
                &format!(r"[\s.]S0(\d)E(\d)(\d){EPISODE_JOINER}(\d)(\d)"),
                " - ${1}${2}${3}-${4}${5}",
            )?,
            high_season_multi: NumberingRewrite::new(
                &format!(r"[\s.]S([1-9]\d)E(\d)(\d){EPISODE_JOINER}(\d)(\d)"),
                " - ${1}${2}${3}-${4}${5}",
            )?,
            low_season: NumberingRewrite::new(r"[\s.]S0(\d)E(\d)(\d)", " - ${1}${2}${3}")?,
            high_season: NumberingRewrite::new(r"[\s.]S([1-9]\d)E(\d)(\d)", " - ${1}${2}${3}")?,
            air_date: NumberingRewrite::new(
                r"[\s.](19|20)(\d\d)[\s.]([0-1]\d)[\s.]([0-3]\d)",
                " - ${1}${2}/${3}/${4}",
            )?,
            re_year_dotted: Regex::new(r"[\s.](19|20)(\d\d)")?,
            re_year_bracketed: Regex::new(r"(?i)\[(19|20)(\d\d)\].*")?,
            re_anime_hash_tail: Regex::new(concat!(
                r"(?i)\s\(1280x720.*|\s\(1920x1080.*|\s\(720x400.*|\[720p.*|\[1080p.*|\[480p.*|",
                r"\s\(BD.*|\s\[Blu-Ray.*|\s\[DVD.*|\.DVD.*|\[[0-9a-zA-Z]{8}\]$|\[h264.*|R1DVD.*|\[BD.*",
            ))?,
            re_anime_bracket_tail: Regex::new(
                r"(?i)\[BD\].*|\[720p.*|\[1080p.*|\[480p.*|\[Blu-Ray.*|\[h264.*",
            )?,
            re_anime_episode: Regex::new(r"^(.*?)[\s._](\d\d)$")?,
            editions: EditionExtractor::new()?,
            end_metadata: EndMetadataStripper::new()?,
        })
    }

    /// Returns the first category whose predicate matches `name`.
    pub fn classify(&self, name: &str) -> ShapeCategory {
        self.rules
            .iter()
            .find(|rule| rule.predicate.is_match(name))
            .map_or(ShapeCategory::Unclassified, |rule| rule.category)
    }

    /// Classifies `name` and applies the matching rewrite.
    ///
    /// `use_external_info` allows the rules to ask for episode names and to
    /// build anime search keys. Unclassified names come back untouched.
    pub fn run(&self, name: &str, use_external_info: bool) -> Draft {
        let mut draft = Draft {
            category: ShapeCategory::Unclassified,
            name: name.to_string(),
            edition: None,
            intent: LookupIntent::default(),
            use_external_info,
        };

        if let Some(rule) = self.rules.iter().find(|rule| rule.predicate.is_match(name)) {
            debug!(category = %rule.category, name, "shape rule matched");
            draft.category = rule.category;
            (rule.rewrite)(self, &mut draft);
        }

        draft
    }

    fn rewrite_low_season_multi(&self, draft: &mut Draft) {
        self.rewrite_numbered_episode(draft, &self.low_season_multi, false);
    }

    fn rewrite_high_season_multi(&self, draft: &mut Draft) {
        self.rewrite_numbered_episode(draft, &self.high_season_multi, false);
    }

    fn rewrite_low_season(&self, draft: &mut Draft) {
        self.rewrite_numbered_episode(draft, &self.low_season, true);
    }

    fn rewrite_high_season(&self, draft: &mut Draft) {
        self.rewrite_numbered_episode(draft, &self.high_season, false);
    }

    fn rewrite_air_date(&self, draft: &mut Draft) {
        self.rewrite_numbered_episode(draft, &self.air_date, false);
    }

    /// Shared rewrite for scene episode markers and air dates.
    ///
    /// When marking the episode title changes nothing, the marker was already
    /// consumed together with the end metadata: the name carries no episode
    /// title, so one may be looked up.
    fn rewrite_numbered_episode(
        &self,
        draft: &mut Draft,
        numbering: &NumberingRewrite,
        edition_first: bool,
    ) {
        draft.intent.series = true;

        if edition_first {
            self.take_edition(draft);
        }
        draft.name = numbering.consume_tail(&draft.name);
        if !edition_first {
            self.take_edition(draft);
        }

        let marked = numbering.mark_episode_title(&draft.name);
        if draft.use_external_info && marked == draft.name {
            draft.intent.episode = true;
        }

        let stripped = self.end_metadata.strip(&marked);
        draft.name = text::title_case_parts_if_lowercase(&text::replace_periods(&stripped));
    }

    fn rewrite_year_dotted(&self, draft: &mut Draft) {
        draft.intent.movie = true;

        let name = self.re_year_dotted.replace_all(&draft.name, " (${1}${2})");
        draft.name = self.end_metadata.strip(&name);
        self.take_edition(draft);
        draft.name = text::title_case_if_lowercase(&text::replace_periods(&draft.name));
    }

    fn rewrite_year_bracketed(&self, draft: &mut Draft) {
        draft.intent.movie = true;

        let name = self.re_year_bracketed.replace_all(&draft.name, " (${1}${2})");
        let name = self.end_metadata.strip(&name);
        draft.name = text::title_case_if_lowercase(&text::replace_periods(&name));
    }

    fn rewrite_year_paren(&self, draft: &mut Draft) {
        draft.intent.movie = true;

        let name = self.end_metadata.strip(&draft.name);
        draft.name = text::title_case_if_lowercase(&text::replace_periods(&name));
    }

    fn rewrite_anime_hash_tagged(&self, draft: &mut Draft) {
        self.rewrite_anime(draft, &self.re_anime_hash_tail);
    }

    fn rewrite_anime_bracket_no_hash(&self, draft: &mut Draft) {
        self.rewrite_anime(draft, &self.re_anime_bracket_tail);
    }

    /// Shared rewrite for fansub names: drop quality/hash brackets, then
    /// build an `S01E` search key when the name ends in a bare two-digit
    /// episode number.
    fn rewrite_anime(&self, draft: &mut Draft, tail: &Regex) {
        draft.intent.series = true;

        let name = draft.name.replace('_', " ");
        let name = tail.replace_all(&name, "");
        let name = name.trim_end();

        if draft.use_external_info {
            if let Some(caps) = self.re_anime_episode.captures(name) {
                let show = caps[1].trim_end_matches([' ', '.', '_', '-']).trim();
                draft.intent.episode = true;
                draft.intent.search_key = Some(format!("{show}S01E{}", &caps[2]));
            }
        }

        draft.name = text::title_case_if_lowercase(name);
    }

    fn rewrite_marker_only(&self, draft: &mut Draft) {
        draft.intent.movie = true;
        draft.intent.movie_without_year = true;

        draft.name = self.end_metadata.strip(&draft.name);
        self.take_edition(draft);
        draft.name = text::title_case_if_lowercase(&text::replace_periods(&draft.name));
    }

    fn take_edition(&self, draft: &mut Draft) {
        let split = self.editions.extract(&draft.name);
        draft.name = split.name;
        if split.edition.is_some() {
            draft.edition = split.edition;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cascade() -> ShapeCascade {
        ShapeCascade::new().unwrap()
    }

    #[test]
    fn classification_follows_priority_order() {
        let c = cascade();
        for (name, expected) in [
            ("Show.Name.S01E01E02.720p", ShapeCategory::SceneEpisodeLowSeasonMulti),
            ("Show.Name.S01E0102.Source", ShapeCategory::SceneEpisodeLowSeasonMulti),
            ("Show.Name.S12E01-E02.HDTV", ShapeCategory::SceneEpisodeHighSeasonMulti),
            ("Show.Name.S01E02.720p", ShapeCategory::SceneEpisodeLowSeason),
            ("Show.Name.S12E02.720p", ShapeCategory::SceneEpisodeHighSeason),
            ("Daily.Show.2013.03.18.HDTV", ShapeCategory::DateBasedEpisode),
            ("Some.Movie.2013.BluRay", ShapeCategory::YearDottedMovie),
            ("Some Movie[2013]", ShapeCategory::YearBracketedMovie),
            ("Some Movie (2013)", ShapeCategory::YearParenMovie),
            ("Anime - 05 [ABCD1234]", ShapeCategory::AnimeHashTagged),
            ("Anime - 05 [720p]", ShapeCategory::AnimeBracketNoHash),
            ("Some.Movie.DVDRip", ShapeCategory::MarkerOnlyMovie),
            ("Holiday Video", ShapeCategory::Unclassified),
            ("", ShapeCategory::Unclassified),
        ] {
            assert_eq!(c.classify(name), expected, "misclassified {name:?}");
        }
    }

    #[test]
    fn earlier_rules_shadow_later_ones() {
        let c = cascade();
        // Also carries a dotted year, a CRC tag and technical tokens.
        assert_eq!(
            c.classify("Show.2013.S02E03.720p [ABCD1234]"),
            ShapeCategory::SceneEpisodeLowSeason
        );
        // A date is also a dotted year.
        assert_eq!(
            c.classify("Show.2013.03.18.720p"),
            ShapeCategory::DateBasedEpisode
        );
    }

    #[test]
    fn episode_marker_with_end_metadata() {
        let draft = cascade().run("Show.Name.S01E02.720p.HDTV.x264", true);
        assert_eq!(draft.category, ShapeCategory::SceneEpisodeLowSeason);
        assert_eq!(draft.name, "Show Name - 102");
        assert!(draft.intent.series);
        assert!(draft.intent.episode);
    }

    #[test]
    fn episode_title_is_kept_and_not_looked_up() {
        let draft = cascade().run("show.name.s01e02.the.pilot.720p.hdtv", true);
        assert_eq!(draft.name, "Show Name - 102 - The Pilot");
        assert!(draft.intent.series);
        assert!(!draft.intent.episode);
    }

    #[test]
    fn episode_lookup_respects_external_info_flag() {
        let draft = cascade().run("Show.Name.S01E02.720p", false);
        assert_eq!(draft.name, "Show Name - 102");
        assert!(draft.intent.series);
        assert!(!draft.intent.episode);
    }

    #[test]
    fn high_season_and_multi_episode_codes() {
        let c = cascade();
        assert_eq!(c.run("Show.S12E05.HDTV", true).name, "Show - 1205");
        assert_eq!(c.run("Show.S01E01E02.720p", true).name, "Show - 101-02");
        assert_eq!(c.run("Show.S01E01-E02.720p", true).name, "Show - 101-02");
        assert_eq!(c.run("Show.S11E03E04.BluRay", true).name, "Show - 1103-04");
    }

    #[test]
    fn flag_word_after_marker_is_consumed() {
        let draft = cascade().run("Show.S01E02.PROPER.DVDSCR", true);
        assert_eq!(draft.name, "Show - 102");
        assert!(draft.intent.episode);
    }

    #[test]
    fn air_date_is_rewritten() {
        let draft = cascade().run("Daily.Show.2013.03.18.HDTV.x264", true);
        assert_eq!(draft.category, ShapeCategory::DateBasedEpisode);
        assert_eq!(draft.name, "Daily Show - 2013/03/18");
        assert!(draft.intent.series);
    }

    #[test]
    fn low_season_takes_edition_before_rewriting() {
        // Removing the edition first leaves ".." behind the marker, so the
        // technical tail no longer sits right after it.
        let draft = cascade().run("Show.S01E02.Uncut.720p", true);
        assert_eq!(draft.edition.as_deref(), Some("(Uncut)"));
        assert_eq!(draft.name, "Show - 102 - ");
        assert!(!draft.intent.episode);
    }

    #[test]
    fn dotted_year_movie() {
        let draft = cascade().run("some.movie.2013.BluRay.x264", true);
        assert_eq!(draft.category, ShapeCategory::YearDottedMovie);
        assert_eq!(draft.name, "Some Movie (2013)");
        assert!(draft.intent.movie);
        assert!(!draft.intent.movie_without_year);
    }

    #[test]
    fn dotted_year_movie_with_edition() {
        let draft = cascade().run("Movie.2013.Directors.Cut.720p", true);
        assert_eq!(draft.name.trim(), "Movie (2013)");
        assert_eq!(draft.edition.as_deref(), Some("(Directors Cut)"));
    }

    #[test]
    fn bracketed_year_drops_the_rest() {
        let draft = cascade().run("some movie[2013] extra stuff", true);
        assert_eq!(draft.category, ShapeCategory::YearBracketedMovie);
        assert_eq!(draft.name, "Some Movie (2013)");
    }

    #[test]
    fn paren_year_keeps_year() {
        let draft = cascade().run("Some.Movie.(2013).720p", true);
        assert_eq!(draft.category, ShapeCategory::YearParenMovie);
        assert_eq!(draft.name, "Some Movie (2013)");
        assert!(draft.intent.movie);
    }

    #[test]
    fn anime_hash_builds_search_key() {
        let draft = cascade().run("Anime Title - 05 [1080p][abcd1234]", true);
        assert_eq!(draft.category, ShapeCategory::AnimeHashTagged);
        assert_eq!(draft.name, "Anime Title - 05");
        assert_eq!(draft.intent.search_key.as_deref(), Some("Anime TitleS01E05"));
        assert!(draft.intent.series);
        assert!(draft.intent.episode);
    }

    #[test]
    fn anime_underscores_and_casing() {
        let draft = cascade().run("some_anime_12_[BD][h264]", true);
        assert_eq!(draft.category, ShapeCategory::AnimeBracketNoHash);
        assert_eq!(draft.name, "Some Anime 12");
        assert_eq!(draft.intent.search_key.as_deref(), Some("some animeS01E12"));
    }

    #[test]
    fn anime_without_trailing_number_has_no_key() {
        let draft = cascade().run("Anime Movie [720p]", true);
        assert_eq!(draft.name, "Anime Movie");
        assert!(draft.intent.search_key.is_none());
        assert!(!draft.intent.episode);

        let draft = cascade().run("Anime Title - 05 [720p]", false);
        assert!(draft.intent.search_key.is_none());
    }

    #[test]
    fn marker_only_movie() {
        let draft = cascade().run("some.movie.UNRATED.DVDRip.XviD", true);
        assert_eq!(draft.category, ShapeCategory::MarkerOnlyMovie);
        assert_eq!(draft.name, "Some Movie");
        assert_eq!(draft.edition.as_deref(), Some("(Unrated)"));
        assert!(draft.intent.movie);
        assert!(draft.intent.movie_without_year);
    }

    #[test]
    fn unclassified_is_untouched() {
        let draft = cascade().run("holiday.video", true);
        assert_eq!(draft.category, ShapeCategory::Unclassified);
        assert_eq!(draft.name, "holiday.video");
        assert!(!draft.intent.wants_lookup());
        assert!(draft.edition.is_none());
    }
}
