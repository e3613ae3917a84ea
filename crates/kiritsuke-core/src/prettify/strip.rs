use regex::Regex;

use crate::error::Result;

/// Strips the final `.ext` suffix from a file name.
///
/// A period that is followed by a path separator belongs to a directory
/// name, not to an extension, and is left alone.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if !name[dot..].contains(['/', '\\']) => &name[..dot],
        _ => name,
    }
}

/// Removes a leading bracketed release-group tag such as `[SubsPlease]`.
#[derive(Debug, Clone)]
pub struct GroupStripper {
    re_group_prefix: Regex,
    re_single_token: Regex,
}

impl GroupStripper {
    /// Compiles the group tag patterns.
    ///
    /// # Errors
    ///
    /// Returns `KiritsukeError::RegexError` if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_group_prefix: Regex::new(r"^\[[^\]]{0,20}\]\W*(\w.*?)\s*$")?,
            re_single_token: Regex::new(r"^\[([^\[\]]+)\]\s*$")?,
        })
    }

    /// Returns `name` without its leading group tag.
    ///
    /// Tags longer than 20 characters are not treated as group tags. A name
    /// that is nothing but one bracketed token is unwrapped instead.
    pub fn strip<'a>(&self, name: &'a str) -> &'a str {
        if !name.starts_with('[') {
            return name;
        }

        if let Some(rest) = self.re_group_prefix.captures(name).and_then(|c| c.get(1)) {
            return rest.as_str();
        }

        if name.ends_with(']') {
            if let Some(inner) = self.re_single_token.captures(name).and_then(|c| c.get(1)) {
                return inner.as_str();
            }
        }

        name
    }
}
