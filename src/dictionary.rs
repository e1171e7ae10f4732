//! `dictionary`: Module to load and prepare the word list the filler draws from
//!
//! A word list can be read from a file (native builds) or parsed from an in-memory
//! string (works everywhere, including WebAssembly, where there is no filesystem).
//!
//! Order matters: candidates are enumerated in dictionary order, so the same
//! template and dictionary always produce the same fill. Unlike a scored entry
//! list, the dictionary is therefore never re-sorted.
//!
//! The parsing logic:
//! - Each line is either `word` or `word;score`.
//! - Scored lines below `min_score`, or whose score isn't an integer, are skipped.
//! - Entries are trimmed and lowercased; blank lines and entries with non-word
//!   characters (spaces, hyphens, apostrophes) are skipped.
//! - Duplicates are dropped, keeping the first occurrence.

use crate::word_char::is_word;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// An ordered, duplicate-free word list with a per-length index.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    /// Every entry, in input order.
    entries: Vec<Rc<str>>,
    /// Entries grouped by character count; each bucket keeps input order.
    by_length: HashMap<usize, Vec<Rc<str>>>,
}

impl Dictionary {
    /// Build a dictionary from words, keeping their order.
    ///
    /// Words are trimmed but not re-cased; callers supply consistent casing.
    pub fn new<I, S>(words: I) -> Dictionary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut dictionary = Dictionary::default();

        for raw in words {
            let word = raw.as_ref().trim();
            if !is_word(word) || !seen.insert(word.to_string()) {
                continue;
            }
            let word: Rc<str> = Rc::from(word);
            dictionary
                .by_length
                .entry(word.chars().count())
                .or_default()
                .push(Rc::clone(&word));
            dictionary.entries.push(word);
        }

        dictionary
    }

    /// Parse a raw word list from an in-memory string.
    ///
    /// This is **WASM-safe** because it doesn't touch the filesystem.
    ///
    /// # Arguments
    /// * `contents`: The raw file contents. Each line is `word` or `word;score`.
    /// * `min_score`: Scored entries lower than this are skipped; unscored entries are always kept.
    pub fn parse_from_str(contents: &str, min_score: i32) -> Dictionary {
        let words = contents.lines().filter_map(|raw_line| {
            let line = raw_line.trim();
            if line.is_empty() {
                None
            } else if let Some((word_raw, score_raw)) = line.split_once(';') {
                let score: i32 = score_raw.trim().parse().ok()?;
                (score >= min_score).then(|| word_raw.trim().to_lowercase())
            } else {
                Some(line.to_lowercase())
            }
        });

        Dictionary::new(words)
    }

    /// Native-only convenience method: read from a file path and parse.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if unable to read a file at `path`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P, min_score: i32) -> std::io::Result<Dictionary> {
        let path_ref = path.as_ref();

        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read dictionary from '{}': {}", path_ref.display(), e),
            )
        })?;

        Ok(Self::parse_from_str(&data, min_score))
    }

    /// Every entry, in dictionary order.
    #[must_use]
    pub fn entries(&self) -> &[Rc<str>] {
        &self.entries
    }

    /// Entries with exactly `length` characters, in dictionary order.
    #[must_use]
    pub fn words_of_length(&self, length: usize) -> &[Rc<str>] {
        self.by_length.get(&length).map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Dictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Dictionary::new(iter)
    }
}
