use regex::{Match, Regex};

use super::text::capitalize_fully;
use crate::error::Result;

/// Edition vocabulary. Words may be joined by a period or whitespace.
const EDITIONS: &[&str] = &[
    r"Special[\s.]Edition",
    "Unrated",
    r"Final[\s.]Cut",
    "Remastered",
    r"Extended[\s.]Cut",
    r"IMAX[\s.]Edition",
    "Uncensored",
    r"Director'?s[\s.]Cut",
    "Uncut",
];

/// A name with its edition marker taken out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditionSplit {
    /// The name without any edition tokens.
    pub name: String,
    /// Parenthesized, title-cased edition, e.g. `"(Directors Cut)"`.
    pub edition: Option<String>,
}

/// Detects edition keywords ("Director's Cut", "Unrated", ...) and moves
/// them out of the name so they can be reattached at the very end.
///
/// An edition that is already parenthesized is left where it is, which
/// makes extraction idempotent on its own output.
#[derive(Debug, Clone)]
pub struct EditionExtractor {
    re_edition: Regex,
    re_dashed_edition: Regex,
}

impl EditionExtractor {
    /// Compiles the edition vocabulary.
    ///
    /// # Errors
    ///
    /// Returns `KiritsukeError::RegexError` if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        let alternatives = EDITIONS.join("|");
        Ok(Self {
            re_edition: Regex::new(&format!("(?i)(?:{alternatives})"))?,
            re_dashed_edition: Regex::new(&format!("(?i) - (?:{alternatives})"))?,
        })
    }

    /// Splits the first unparenthesized edition out of `name`.
    ///
    /// Every unparenthesized edition occurrence is removed, but only the
    /// first one is kept.
    pub fn extract(&self, name: &str) -> EditionSplit {
        let Some(found) = self
            .re_edition
            .find_iter(name)
            .find(|m| !is_parenthesized(name, m))
        else {
            return EditionSplit {
                name: name.to_string(),
                edition: None,
            };
        };

        let edition = format!("({})", capitalize_fully(&found.as_str().replace('.', " ")));
        let name = remove_unparenthesized(&self.re_dashed_edition, name);
        let name = remove_unparenthesized(&self.re_edition, &name);

        EditionSplit {
            name,
            edition: Some(edition),
        }
    }
}

/// Returns `true` if the match sits directly inside parentheses.
fn is_parenthesized(haystack: &str, m: &Match<'_>) -> bool {
    haystack[..m.start()].ends_with('(') || haystack[m.end()..].starts_with(')')
}

fn remove_unparenthesized(re: &Regex, haystack: &str) -> String {
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    for m in re.find_iter(haystack) {
        if is_parenthesized(haystack, &m) {
            continue;
        }
        out.push_str(&haystack[last..m.start()]);
        last = m.end();
    }
    out.push_str(&haystack[last..]);
    out
}
