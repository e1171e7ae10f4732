//! Slot patterns: the fixed-length shape a word must have to fit a slot.
//!
//! A pattern has one token per cell: the placed letter, or a wildcard that
//! matches any single word character. It renders as an anchored regular
//! expression (`^c\wt$`) and matches whole words only.

use crate::errors::TemplateError;
use crate::grid::{Direction, Grid};
use crate::word_char::{WordChar, WILDCARD_FRAGMENT};
use fancy_regex::Regex;
use std::fmt;
use std::str::FromStr;

/// One cell of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternToken {
    Letter(char),
    Wildcard,
}

impl PatternToken {
    fn accepts(self, c: char) -> bool {
        match self {
            PatternToken::Letter(letter) => letter == c,
            PatternToken::Wildcard => c.is_word_char(),
        }
    }
}

/// Anchored, fixed-length pattern for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SlotPattern {
    tokens: Vec<PatternToken>,
}

impl SlotPattern {
    #[must_use]
    pub fn new(tokens: Vec<PatternToken>) -> SlotPattern {
        SlotPattern { tokens }
    }

    /// `length` wildcards.
    #[must_use]
    pub fn blank(length: usize) -> SlotPattern {
        SlotPattern { tokens: vec![PatternToken::Wildcard; length] }
    }

    /// Number of cells the pattern spans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True iff `word` matches the whole pattern.
    #[must_use]
    pub fn matches(&self, word: &str) -> bool {
        let mut chars = word.chars();
        self.tokens
            .iter()
            .all(|token| chars.next().is_some_and(|c| token.accepts(c)))
            && chars.next().is_none()
    }

    /// Compile the rendered pattern (see `Display`) into a regex.
    ///
    /// # Errors
    ///
    /// Returns the regex engine's error if compilation fails.
    pub fn to_regex(&self) -> Result<Regex, Box<fancy_regex::Error>> {
        Regex::new(&self.to_string()).map_err(Box::new)
    }
}

impl fmt::Display for SlotPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "^")?;
        for token in &self.tokens {
            match token {
                PatternToken::Letter(c) => write!(f, "{c}")?,
                PatternToken::Wildcard => write!(f, "{WILDCARD_FRAGMENT}")?,
            }
        }
        write!(f, "$")
    }
}

impl FromStr for SlotPattern {
    type Err = Box<TemplateError>;

    /// Parse the lookup shorthand: `.` or `?` for an unknown letter, word characters for known ones.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .chars()
            .map(|ch| {
                if ch.is_pattern_wildcard() {
                    Ok(PatternToken::Wildcard)
                } else if ch.is_word_char() {
                    Ok(PatternToken::Letter(ch))
                } else {
                    Err(Box::new(TemplateError::InvalidPatternChar { ch }))
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(SlotPattern::new)
    }
}

/// Derive the pattern of the slot through `(row, col)` running in `direction`.
///
/// Walks back to the nearest edge or blocked cell to find the slot's start, then
/// forward to the opposite boundary, emitting one token per cell. A start cell that
/// is blocked or outside the grid yields the empty pattern.
#[must_use]
pub fn build_pattern(grid: &Grid, row: usize, col: usize, direction: Direction) -> SlotPattern {
    if !grid.is_open(row, col) {
        return SlotPattern::default();
    }

    let (mut start_row, mut start_col) = (row, col);
    while let Some((r, c)) = direction.retreat(start_row, start_col) {
        if !grid.is_open(r, c) {
            break;
        }
        (start_row, start_col) = (r, c);
    }

    let tokens = (0..)
        .map(|step| direction.advance(start_row, start_col, step))
        .map_while(|(r, c)| grid.get(r, c).filter(|cell| !cell.is_blocked()))
        .map(|cell| cell.letter().map_or(PatternToken::Wildcard, PatternToken::Letter))
        .collect();

    SlotPattern { tokens }
}
