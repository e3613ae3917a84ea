use regex::Regex;

use crate::error::Result;

/// Tokens that only ever appear after all useful information in a release
/// name (resolution, source, codec, release flags). Matched
/// case-insensitively by the stripper.
const TECHNICAL_TOKENS: &[&str] = &[
    "AC3",
    "REPACK",
    "480p",
    "720p",
    "m-720p",
    "900p",
    "1080p",
    "2160p",
    "WEB-DL",
    "HDTV",
    "DSR",
    "PDTV",
    "WS",
    "HQ",
    "DVDRip",
    "TVRiP",
    "BDRip",
    "BRRip",
    "WEBRip",
    "BluRay",
    "Blu-ray",
    "SUBBED",
    "x264",
    r"Dual[\s.]Audio",
    "HSBS",
    "H-SBS",
    "RERiP",
    "DIRFIX",
    "READNFO",
    "60FPS",
];

/// Release flags that are also common English words; matched
/// case-sensitively and only as whole separator-delimited tokens.
const FLAG_WORDS: &[&str] = &[
    "PROPER", "iNTERNAL", "LIMITED", "LiMiTED", "FESTiVAL", "NORDIC", "REAL", "SUBBED",
    "RETAIL", "EXTENDED", "NEWEDIT", "WEB",
];

/// Pattern matching a technical token and everything after it.
///
/// Carries no case flag of its own; rewrite patterns embed it after their
/// own `(?i)`.
pub fn technical_tail() -> String {
    format!(r"[\s.](?:{}).*", TECHNICAL_TOKENS.join("|"))
}

/// Pattern matching a separator-delimited flag word and everything after it.
pub fn flag_word_tail() -> String {
    format!(r"[\s.](?:{})[\s.].*", FLAG_WORDS.join("|"))
}

/// Removes trailing quality/source/codec/release tokens from a name.
#[derive(Debug, Clone)]
pub struct EndMetadataStripper {
    re_flag_words: Regex,
    re_technical: Regex,
}

impl EndMetadataStripper {
    /// Compiles both token sets.
    ///
    /// # Errors
    ///
    /// Returns `KiritsukeError::RegexError` if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_flag_words: Regex::new(&flag_word_tail())?,
            re_technical: Regex::new(&format!("(?i){}", technical_tail()))?,
        })
    }

    /// Cuts the name at the first recognised end token.
    ///
    /// The case-sensitive flag words are applied first, then the
    /// case-insensitive technical tokens.
    pub fn strip(&self, name: &str) -> String {
        let name = self.re_flag_words.replace_all(name, "");
        self.re_technical.replace_all(&name, "").into_owned()
    }
}
