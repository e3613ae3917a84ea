//! # Punctuation and Casing Helpers
//!
//! Small string transforms shared by the shape rules: period
//! replacement, and title casing of names that carry no
//! deliberate capitalization.

/// Words left lowercase when they are not the first word of a title.
const MINOR_WORDS: &[&str] = &[
    "a", "an", "and", "in", "it", "for", "of", "on", "the", "to", "vs",
];

/// Separator between the show title, episode code and episode title.
pub const PART_SEPARATOR: &str = " - ";

/// Replaces every period with a space.
pub fn replace_periods(value: &str) -> String {
    value.replace('.', " ")
}

/// Title-cases a lowercase string.
///
/// The first word is always capitalized; later words are capitalized unless
/// they are minor words ("a", "of", "the", ...). Words are re-joined with
/// single spaces. Blank input is returned unchanged.
///
/// # Examples
/// ```
/// use kiritsuke_core::prettify::text::title_case_lowercase;
///
/// assert_eq!(title_case_lowercase("the lord of the rings"), "The Lord of the Rings");
/// ```
pub fn title_case_lowercase(value: &str) -> String {
    if value.trim().is_empty() {
        return value.to_string();
    }

    let mut words = value.split_whitespace();
    let mut converted = String::with_capacity(value.len());
    if let Some(first) = words.next() {
        converted.push_str(&capitalize_first(first));
    }
    for word in words {
        converted.push(' ');
        if MINOR_WORDS.contains(&word) {
            converted.push_str(word);
        } else {
            converted.push_str(&capitalize_first(word));
        }
    }
    converted
}

/// Title-cases `value` only if it contains no uppercase letters at all.
pub fn title_case_if_lowercase(value: &str) -> String {
    if is_all_lowercase(value) {
        title_case_lowercase(value)
    } else {
        value.to_string()
    }
}

/// Like [`title_case_if_lowercase`], but cases each `" - "` part on its own
/// so an episode title after the episode code starts with a capital too.
pub fn title_case_parts_if_lowercase(value: &str) -> String {
    if !is_all_lowercase(value) {
        return value.to_string();
    }

    let mut parts: Vec<&str> = value.split(PART_SEPARATOR).collect();
    while parts.len() > 1 && parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    parts
        .into_iter()
        .map(title_case_lowercase)
        .collect::<Vec<_>>()
        .join(PART_SEPARATOR)
}

/// Lowercases everything, then uppercases the first letter of each
/// whitespace-delimited word.
pub fn capitalize_fully(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if c.is_whitespace() {
            out.push(c);
            at_word_start = true;
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

fn is_all_lowercase(value: &str) -> bool {
    value == value.to_lowercase()
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periods_become_spaces() {
        assert_eq!(replace_periods("some.movie.name"), "some movie name");
        assert_eq!(replace_periods("no periods"), "no periods");
    }

    #[test]
    fn minor_words_stay_lowercase() {
        assert_eq!(
            title_case_lowercase("harry potter and the chamber of secrets"),
            "Harry Potter and the Chamber of Secrets"
        );
        assert_eq!(title_case_lowercase("alien vs predator"), "Alien vs Predator");
    }

    #[test]
    fn first_word_is_always_capitalized() {
        assert_eq!(title_case_lowercase("the thing"), "The Thing");
        assert_eq!(title_case_lowercase("a   quiet place "), "A Quiet Place");
    }

    #[test]
    fn blank_is_unchanged() {
        assert_eq!(title_case_lowercase(""), "");
        assert_eq!(title_case_lowercase("   "), "   ");
    }

    #[test]
    fn mixed_case_is_left_alone() {
        assert_eq!(title_case_if_lowercase("the Wire"), "the Wire");
        assert_eq!(title_case_if_lowercase("the wire (2002)"), "The Wire (2002)");
    }

    #[test]
    fn parts_are_cased_independently() {
        assert_eq!(
            title_case_parts_if_lowercase("show name - 102 - the pilot"),
            "Show Name - 102 - The Pilot"
        );
        assert_eq!(
            title_case_parts_if_lowercase("show name - 102 - "),
            "Show Name - 102"
        );
        assert_eq!(
            title_case_parts_if_lowercase("Show name - 102 - the pilot"),
            "Show name - 102 - the pilot"
        );
    }

    #[test]
    fn capitalize_fully_lowers_the_rest() {
        assert_eq!(capitalize_fully("DIRECTORS CUT"), "Directors Cut");
        assert_eq!(capitalize_fully("imax edition"), "Imax Edition");
        assert_eq!(capitalize_fully("director's cut"), "Director's Cut");
    }
}
