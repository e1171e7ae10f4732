//! Candidate lookup: dictionary words that fit a slot pattern and aren't used yet.

use crate::dictionary::Dictionary;
use crate::patterns::SlotPattern;
use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;

/// Every dictionary word that matches `pattern` and is not in `excluded`, in dictionary order.
///
/// `excluded` may hold `&str`, `String` or `Rc<str>`.
pub fn candidates<'a, S>(
    dictionary: &'a Dictionary,
    pattern: &'a SlotPattern,
    excluded: &'a HashSet<S>,
) -> impl Iterator<Item = &'a Rc<str>> + 'a
where
    S: Borrow<str> + Hash + Eq,
{
    // the length bucket preserves dictionary order, so this equals filtering the full list
    dictionary
        .words_of_length(pattern.len())
        .iter()
        .filter(move |word| is_candidate(pattern, excluded, word))
}

/// The `skip`-th word of [`candidates`], or `None` if there are fewer matches.
///
/// Raising `skip` is how a search walks through the alternatives for one slot
/// without touching the dictionary or the exclusion set.
pub fn find_candidate<'a, S>(
    dictionary: &'a Dictionary,
    pattern: &SlotPattern,
    excluded: &HashSet<S>,
    skip: usize,
) -> Option<&'a Rc<str>>
where
    S: Borrow<str> + Hash + Eq,
{
    dictionary
        .words_of_length(pattern.len())
        .iter()
        .filter(|word| is_candidate(pattern, excluded, word))
        .nth(skip)
}

fn is_candidate<S>(pattern: &SlotPattern, excluded: &HashSet<S>, word: &str) -> bool
where
    S: Borrow<str> + Hash + Eq,
{
    pattern.matches(word) && !excluded.contains(word)
}
