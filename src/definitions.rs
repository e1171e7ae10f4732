//! Clue text for a finished fill.
//!
//! Definitions come from an injected [`DefinitionSource`]. For each word one
//! definition is picked at random with an explicit, seedable [`StdRng`], cut at its
//! first colon, and replaced by the word itself whenever there is nothing usable:
//! no definitions, an empty pick, or a failed lookup. Enrichment never changes the
//! fill and never fails it.

use crate::crossword::Crossword;
use crate::grid::Direction;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::thread;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("definition lookup for '{word}' failed: {reason}")]
    Unavailable { word: String, reason: String },

    #[error("definition file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read definition file '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that can list the known definitions of a word.
///
/// Lookups for different words run on separate threads, hence `Sync`.
pub trait DefinitionSource: Sync {
    /// Every definition text known for `word`, possibly none.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the source cannot answer.
    fn definitions(&self, word: &str) -> Result<Vec<String>, LookupError>;
}

/// In-memory definitions keyed by lower-cased word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "HashMap<String, Vec<String>>")]
pub struct StaticDefinitions {
    entries: HashMap<String, Vec<String>>,
}

impl From<HashMap<String, Vec<String>>> for StaticDefinitions {
    fn from(entries: HashMap<String, Vec<String>>) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: AsRef<str>> FromIterator<(K, Vec<String>)> for StaticDefinitions {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        for (word, texts) in iter {
            entries.entry(word.as_ref().to_lowercase()).or_default().extend(texts);
        }
        StaticDefinitions { entries }
    }
}

impl StaticDefinitions {
    /// Parse a JSON object mapping each word to a list of definition texts.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Json`] if `json` is not such an object.
    pub fn parse_from_str(json: &str) -> Result<StaticDefinitions, LookupError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns [`LookupError::Io`] if the file can't be read, or [`LookupError::Json`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<StaticDefinitions, LookupError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .map_err(|source| LookupError::Io { path: path.display().to_string(), source })?;
        Self::parse_from_str(&data)
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

impl DefinitionSource for StaticDefinitions {
    fn definitions(&self, word: &str) -> Result<Vec<String>, LookupError> {
        Ok(self.entries.get(&word.to_lowercase()).cloned().unwrap_or_default())
    }
}

/// Pick one of `entries` uniformly at random and keep the text before its first colon.
///
/// Falls back to `word` when `entries` is empty or the kept text is blank.
pub fn select_definition(word: &str, entries: &[String], rng: &mut StdRng) -> String {
    if entries.is_empty() {
        return word.to_string();
    }

    let chosen = &entries[rng.random_range(0..entries.len())];
    let text = chosen.split(':').next().unwrap_or_default().trim();
    if text.is_empty() {
        word.to_string()
    } else {
        text.to_string()
    }
}

/// Look `word` up in `source` and select one definition; a failed lookup yields `word`.
pub fn definition_for(source: &dyn DefinitionSource, word: &str, rng: &mut StdRng) -> String {
    match source.definitions(word) {
        Ok(entries) => select_definition(word, &entries, rng),
        Err(e) => {
            warn!("Using '{word}' as its own definition: {e}");
            word.to_string()
        }
    }
}

/// One assigned slot with its word and chosen definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clue {
    pub direction: Direction,
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub word: String,
    pub definition: String,
}

/// Define every assigned word of `crossword`: horizontal slots first, then vertical.
///
/// Each distinct word is looked up once. All lookups run at the same time on scoped
/// threads and are awaited before any definition is chosen, so the result depends
/// only on `seed`, never on which lookup finishes first.
pub fn define_words(crossword: &Crossword, source: &dyn DefinitionSource, seed: u64) -> Vec<Clue> {
    let mut seen = HashSet::new();
    let words: Vec<&str> = crossword.used_words().into_iter().filter(|word| seen.insert(*word)).collect();
    debug!("Looking up definitions for {} words", words.len());

    let lookups: Vec<Result<Vec<String>, LookupError>> = thread::scope(|scope| {
        let handles: Vec<_> = words
            .iter()
            .map(|&word| scope.spawn(move || source.definitions(word)))
            .collect();
        handles
            .into_iter()
            .zip(&words)
            .map(|(handle, word)| {
                handle.join().unwrap_or_else(|_| {
                    Err(LookupError::Unavailable { word: (*word).to_string(), reason: "lookup panicked".to_string() })
                })
            })
            .collect()
    });

    let mut rng = StdRng::seed_from_u64(seed);
    let chosen: HashMap<&str, String> = words
        .iter()
        .zip(lookups)
        .map(|(&word, lookup)| {
            let definition = match lookup {
                Ok(entries) => select_definition(word, &entries, &mut rng),
                Err(e) => {
                    warn!("Using '{word}' as its own definition: {e}");
                    word.to_string()
                }
            };
            (word, definition)
        })
        .collect();

    [Direction::Horizontal, Direction::Vertical]
        .into_iter()
        .flat_map(|direction| {
            crossword
                .slots(direction)
                .iter()
                .enumerate()
                .map(move |(index, slot)| (direction, index, slot))
        })
        .filter_map(|(direction, index, slot)| {
            let word = slot.word()?;
            Some(Clue {
                direction,
                index,
                row: slot.row,
                col: slot.col,
                word: word.to_string(),
                definition: chosen.get(word).cloned().unwrap_or_else(|| word.to_string()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::WordSlot;
    use crate::grid::Grid;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Knows "cat", fails on "err", counts calls
    struct MockSource {
        calls: AtomicUsize,
    }

    impl DefinitionSource for MockSource {
        fn definitions(&self, word: &str) -> Result<Vec<String>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match word {
                "cat" => Ok(vec!["Feline pet: domestic".to_string()]),
                "err" => Err(LookupError::Unavailable { word: word.to_string(), reason: "offline".to_string() }),
                _ => Ok(vec![]),
            }
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_select_truncates_at_first_colon() {
        let entries = vec!["Small rodent: see also rat: pest".to_string()];
        assert_eq!(select_definition("mouse", &entries, &mut rng()), "Small rodent");
    }

    #[test]
    fn test_select_falls_back_to_word() {
        assert_eq!(select_definition("zyx", &[], &mut rng()), "zyx");
        assert_eq!(select_definition("zyx", &[":starts with colon".to_string()], &mut rng()), "zyx");
        assert_eq!(select_definition("zyx", &[String::new()], &mut rng()), "zyx");
    }

    #[test]
    fn test_select_picks_from_entries_deterministically() {
        let entries: Vec<String> = ["one", "two", "three", "four"].iter().map(|s| s.to_string()).collect();
        let first = select_definition("w", &entries, &mut rng());
        assert!(entries.contains(&first));
        assert_eq!(select_definition("w", &entries, &mut rng()), first);
    }

    #[test]
    fn test_definition_for_degrades_on_error() {
        let source = MockSource { calls: AtomicUsize::new(0) };
        assert_eq!(definition_for(&source, "err", &mut rng()), "err");
        assert_eq!(definition_for(&source, "cat", &mut rng()), "Feline pet");
        assert_eq!(definition_for(&source, "dog", &mut rng()), "dog");
    }

    #[test]
    fn test_static_definitions_from_json() {
        let source = StaticDefinitions::parse_from_str(r#"{"Cat": ["Feline: pet"], "car": ["Auto"]}"#).unwrap();
        assert_eq!(source.len(), 2);
        assert_eq!(source.definitions("CAT").unwrap(), vec!["Feline: pet".to_string()]);
        assert!(source.definitions("tar").unwrap().is_empty());
        assert!(matches!(StaticDefinitions::parse_from_str("[1, 2]"), Err(LookupError::Json(_))));
    }

    #[test]
    fn test_define_words_order_and_fallbacks() {
        let grid: Grid = "...\n.##\n.##".parse().unwrap();
        let crossword = Crossword::new(grid, vec![WordSlot::new(0, 0, 3)], vec![WordSlot::new(0, 0, 3)])
            .unwrap()
            .write_word(Direction::Horizontal, 0, Rc::from("cat")).unwrap()
            .write_word(Direction::Vertical, 0, Rc::from("cow")).unwrap();
        let source = MockSource { calls: AtomicUsize::new(0) };

        let clues = define_words(&crossword, &source, 42);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(clues.len(), 2);
        assert_eq!((clues[0].direction, clues[0].word.as_str(), clues[0].definition.as_str()), (Direction::Horizontal, "cat", "Feline pet"));
        assert_eq!((clues[1].direction, clues[1].word.as_str(), clues[1].definition.as_str()), (Direction::Vertical, "cow", "cow"));
    }

    #[test]
    fn test_define_words_skips_unassigned_slots() {
        let grid: Grid = "...".parse().unwrap();
        let crossword = Crossword::new(grid, vec![WordSlot::new(0, 0, 3)], vec![]).unwrap();
        let source = MockSource { calls: AtomicUsize::new(0) };
        assert!(define_words(&crossword, &source, 0).is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }
}
