use fancy_regex::Regex;
use std::sync::LazyLock;

// Grid text markers
pub const BLOCKED_CHAR: char = '#';
pub const EMPTY_CHAR: char = '.';

// Lookup-pattern wildcards (`c.t`, `c?t`)
pub(crate) const PATTERN_WILDCARDS: &str = ".?";

/// Regex fragment for one unknown cell in a rendered slot pattern.
pub(crate) const WILDCARD_FRAGMENT: &str = r"\w";

/// Matches one non-ASCII word character.
pub(crate) static WORD_CHAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w$").unwrap());

pub(crate) trait WordChar {
    /// Same class as a regex `\w`, so rendered patterns and [`SlotPattern::matches`]
    /// accept the same words. Beyond ASCII that includes combining marks and
    /// connector punctuation.
    ///
    /// [`SlotPattern::matches`]: crate::patterns::SlotPattern::matches
    fn is_word_char(&self) -> bool;
    fn is_pattern_wildcard(&self) -> bool;
}

impl WordChar for char {
    fn is_word_char(&self) -> bool {
        if self.is_ascii() {
            return self.is_ascii_alphanumeric() || *self == '_';
        }
        let mut buf = [0u8; 4];
        WORD_CHAR_RE.is_match(self.encode_utf8(&mut buf)).unwrap_or(false)
    }
    fn is_pattern_wildcard(&self) -> bool {
        PATTERN_WILDCARDS.contains(*self)
    }
}

/// True iff `entry` is non-empty and made only of word characters.
pub(crate) fn is_word(entry: &str) -> bool {
    !entry.is_empty() && entry.chars().all(|c| c.is_word_char())
}
