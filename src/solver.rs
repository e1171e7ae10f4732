//! The fill engine: forward-checked backtracking over the horizontal slots, then a
//! single greedy pass over the vertical slots.
//!
//! # Outcomes
//!
//! [`fill`] returns `Ok(Some(crossword))` for a complete fill and `Ok(None)` when
//! no fill was found. `Err(FillError)` is reserved for contract violations (a
//! malformed template or a defective candidate source); the engine's own
//! candidates always have the right length and never conflict with placed letters.
//!
//! # Search order
//!
//! Horizontal slot `i` tries the matching, unused dictionary words in dictionary
//! order. Each choice is written into a trial snapshot and forward-checked: every
//! vertical run crossing the slot (runs of one cell excluded) must still have at
//! least one candidate. Surviving choices recurse into slot `i + 1`; the first
//! complete horizontal assignment wins. The vertical slots are then filled in
//! order with their first matching, unused candidate. The vertical pass never
//! backtracks, so a template that would fill under another vertical choice can
//! still be reported as unfillable.
//!
//! # Examples
//!
//! ```
//! use gridfill::crossword::{Crossword, WordSlot};
//! use gridfill::dictionary::Dictionary;
//! use gridfill::grid::Grid;
//! use gridfill::solver;
//!
//! let grid: Grid = "...\n.##\n.##".parse()?;
//! let template = Crossword::new(grid, vec![WordSlot::new(0, 0, 3)], vec![WordSlot::new(0, 0, 3)])?;
//! let dictionary = Dictionary::new(["cat", "car", "art", "tar"]);
//!
//! let filled = solver::fill(&template, &dictionary)?.expect("a fill exists");
//! assert_eq!(filled.used_words(), vec!["cat", "car"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::candidates::{candidates, find_candidate};
use crate::crossword::Crossword;
use crate::dictionary::Dictionary;
use crate::errors::FillError;
use crate::grid::Direction;
use crate::patterns::build_pattern;
use instant::Instant;
use log::{debug, info, trace};
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

/// How a fill attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillStatus {
    /// Every slot in both directions is assigned.
    Filled,

    /// The backtracking search ran out of horizontal candidates.
    HorizontalExhausted,

    /// The greedy vertical pass found no candidate for this vertical slot.
    VerticalDeadEnd { slot: usize },
}

/// Counters collected during a fill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Horizontal candidates written into a trial snapshot.
    pub candidates_tried: usize,
    /// Horizontal candidates discarded by forward checking.
    pub forward_check_rejections: usize,
    /// Horizontal candidates whose deeper search failed.
    pub backtracks: usize,
    /// Highest horizontal slot index reached.
    pub deepest_slot: usize,
}

/// Outcome of [`fill_with_report`].
#[derive(Debug, Clone)]
pub struct FillReport {
    /// The filled crossword, or `None` if no fill was found.
    pub crossword: Option<Crossword>,
    pub status: FillStatus,
    pub stats: FillStats,
    pub elapsed: Duration,
}

/// Context shared by the frames of the horizontal search
struct SearchCtx<'a> {
    dictionary: &'a Dictionary,
    stats: FillStats,
}

/// Fill every slot of `crossword` from `dictionary`.
///
/// # Errors
///
/// Returns a [`FillError`] only for contract violations; "no fill" is `Ok(None)`.
pub fn fill(crossword: &Crossword, dictionary: &Dictionary) -> Result<Option<Crossword>, FillError> {
    Ok(fill_with_report(crossword, dictionary)?.crossword)
}

/// Like [`fill`], with the final status, search counters and elapsed time.
///
/// # Errors
///
/// Returns a [`FillError`] only for contract violations.
pub fn fill_with_report(crossword: &Crossword, dictionary: &Dictionary) -> Result<FillReport, FillError> {
    let start = Instant::now();
    info!(
        "Filling {}x{} grid: {} horizontal and {} vertical slots, {} dictionary entries",
        crossword.grid().rows(),
        crossword.grid().cols(),
        crossword.slots(Direction::Horizontal).len(),
        crossword.slots(Direction::Vertical).len(),
        dictionary.len()
    );

    let mut ctx = SearchCtx { dictionary, stats: FillStats::default() };
    let horizontal = fill_horizontal_with(&mut ctx, crossword)?;

    let (filled, status) = match horizontal {
        None => (None, FillStatus::HorizontalExhausted),
        Some(across) => {
            debug!("Horizontal slots filled:\n{across}");
            match vertical_pass(&across, dictionary)? {
                VerticalPass::Filled(done) => (Some(done), FillStatus::Filled),
                VerticalPass::DeadEnd { slot } => (None, FillStatus::VerticalDeadEnd { slot }),
            }
        }
    };

    let elapsed = start.elapsed();
    info!("Fill finished with {status:?} in {:.3}s ({:?})", elapsed.as_secs_f64(), ctx.stats);

    Ok(FillReport { crossword: filled, status, stats: ctx.stats, elapsed })
}

/// Fill the horizontal slots by backtracking, starting at slot 0.
///
/// A crossword without horizontal slots is returned unchanged.
///
/// # Errors
///
/// Propagates [`FillError`] from writing candidates.
pub fn fill_horizontal(crossword: &Crossword, dictionary: &Dictionary) -> Result<Option<Crossword>, FillError> {
    let mut ctx = SearchCtx { dictionary, stats: FillStats::default() };
    fill_horizontal_with(&mut ctx, crossword)
}

fn fill_horizontal_with(ctx: &mut SearchCtx<'_>, crossword: &Crossword) -> Result<Option<Crossword>, FillError> {
    if crossword.slots(Direction::Horizontal).is_empty() {
        return Ok(Some(crossword.clone()));
    }
    fill_horizontal_from(ctx, crossword, 0)
}

/// One frame of the horizontal search: try the candidates for slot `index` in order.
fn fill_horizontal_from(ctx: &mut SearchCtx<'_>, crossword: &Crossword, index: usize) -> Result<Option<Crossword>, FillError> {
    let dictionary = ctx.dictionary;
    let slot = crossword
        .slot(Direction::Horizontal, index)
        .ok_or(FillError::UnknownSlot { direction: Direction::Horizontal, index })?;
    let is_last = index + 1 == crossword.slots(Direction::Horizontal).len();
    ctx.stats.deepest_slot = ctx.stats.deepest_slot.max(index);

    let pattern = build_pattern(crossword.grid(), slot.row, slot.col, Direction::Horizontal);
    let excluded: HashSet<&str> = crossword.used_words().into_iter().collect();
    debug!("Horizontal slot {index}: pattern {pattern}");

    // the enumeration index is the skip count into this frame's candidate list
    for (skip, candidate) in candidates(dictionary, &pattern, &excluded).enumerate() {
        ctx.stats.candidates_tried += 1;
        let trial = crossword.write_word(Direction::Horizontal, index, Rc::clone(candidate))?;

        if !forward_check(dictionary, &trial, index)? {
            ctx.stats.forward_check_rejections += 1;
            trace!("Horizontal slot {index}: '{candidate}' (skip {skip}) leaves a crossing run without candidates");
            continue;
        }

        if is_last {
            return Ok(Some(trial));
        }
        if let Some(solution) = fill_horizontal_from(ctx, &trial, index + 1)? {
            return Ok(Some(solution));
        }

        ctx.stats.backtracks += 1;
        trace!("Horizontal slot {index}: backtracking from '{candidate}' (skip {skip})");
    }

    debug!("Horizontal slot {index}: candidates exhausted");
    Ok(None)
}

/// Check that every vertical run crossing horizontal slot `index` of `trial` still
/// has at least one unused candidate. Runs of a single cell are not checked.
///
/// Passing does not guarantee success: later horizontal choices can still use up
/// the vertical options.
///
/// # Errors
///
/// Returns [`FillError::UnknownSlot`] if `index` is not a horizontal slot.
pub fn forward_check(dictionary: &Dictionary, trial: &Crossword, index: usize) -> Result<bool, FillError> {
    let slot = trial
        .slot(Direction::Horizontal, index)
        .ok_or(FillError::UnknownSlot { direction: Direction::Horizontal, index })?;
    let excluded: HashSet<&str> = trial.used_words().into_iter().collect();

    for (row, col) in slot.cells(Direction::Horizontal) {
        let pattern = build_pattern(trial.grid(), row, col, Direction::Vertical);
        if pattern.len() <= 1 {
            continue;
        }
        if find_candidate(dictionary, &pattern, &excluded, 0).is_none() {
            trace!("No vertical candidate for {pattern} at ({row}, {col})");
            return Ok(false);
        }
    }

    Ok(true)
}

/// Result of the greedy vertical pass
enum VerticalPass {
    Filled(Crossword),
    DeadEnd { slot: usize },
}

/// Fill the vertical slots in order with their first unused candidate, without backtracking.
///
/// # Errors
///
/// Propagates [`FillError`] from writing candidates.
pub fn fill_vertical(crossword: &Crossword, dictionary: &Dictionary) -> Result<Option<Crossword>, FillError> {
    Ok(match vertical_pass(crossword, dictionary)? {
        VerticalPass::Filled(done) => Some(done),
        VerticalPass::DeadEnd { .. } => None,
    })
}

fn vertical_pass(crossword: &Crossword, dictionary: &Dictionary) -> Result<VerticalPass, FillError> {
    let mut current = crossword.clone();
    let mut used: HashSet<Rc<str>> = crossword.assigned_words().cloned().collect();

    for (index, slot) in crossword.slots(Direction::Vertical).iter().enumerate() {
        let pattern = build_pattern(current.grid(), slot.row, slot.col, Direction::Vertical);

        let Some(word) = find_candidate(dictionary, &pattern, &used, 0) else {
            debug!("Vertical slot {index}: no candidate for {pattern}");
            return Ok(VerticalPass::DeadEnd { slot: index });
        };

        debug!("Vertical slot {index}: {pattern} -> '{word}'");
        current = current.write_word(Direction::Vertical, index, Rc::clone(word))?;
        used.insert(Rc::clone(word));
    }

    Ok(VerticalPass::Filled(current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::WordSlot;
    use crate::grid::Grid;

    fn template(rows: &str, horizontal: &[(usize, usize, usize)], vertical: &[(usize, usize, usize)]) -> Crossword {
        let grid: Grid = rows.parse().unwrap();
        let slots = |origins: &[(usize, usize, usize)]| origins.iter().map(|&(r, c, l)| WordSlot::new(r, c, l)).collect();
        Crossword::new(grid, slots(horizontal), slots(vertical)).unwrap()
    }

    /// Full 2x2 grid: two slots each way
    fn square_2x2() -> Crossword {
        template("..\n..", &[(0, 0, 2), (1, 0, 2)], &[(0, 0, 2), (0, 1, 2)])
    }

    #[test]
    fn test_fill_corner() {
        let crossword = template("...\n.##\n.##", &[(0, 0, 3)], &[(0, 0, 3)]);
        let dictionary = Dictionary::new(["cat", "car", "art", "tar"]);

        let filled = fill(&crossword, &dictionary).unwrap().unwrap();
        assert_eq!(filled.used_words(), vec!["cat", "car"]);
        assert_eq!(filled.grid().to_rows(), vec!["cat", "a##", "r##"]);
    }

    #[test]
    fn test_fill_single_slot() {
        let crossword = template("..", &[(0, 0, 2)], &[]);
        let filled = fill(&crossword, &Dictionary::new(["ab"])).unwrap().unwrap();
        assert_eq!(filled.used_words(), vec!["ab"]);
    }

    #[test]
    fn test_fill_empty_dictionary() {
        let report = fill_with_report(&square_2x2(), &Dictionary::default()).unwrap();
        assert!(report.crossword.is_none());
        assert_eq!(report.status, FillStatus::HorizontalExhausted);
    }

    #[test]
    fn test_forward_check_rejects_dead_crossing() {
        let crossword = square_2x2();
        let dictionary = Dictionary::new(["ab", "cd", "ac"]);

        // "ab" on top leaves a? and b?; nothing starts with b
        let trial = crossword.write_word(Direction::Horizontal, 0, Rc::from("ab")).unwrap();
        assert!(!forward_check(&dictionary, &trial, 0).unwrap());

        // "ac" on top leaves a? (ab) and c? (cd)
        let trial = crossword.write_word(Direction::Horizontal, 0, Rc::from("ac")).unwrap();
        assert!(forward_check(&dictionary, &trial, 0).unwrap());
    }

    #[test]
    fn test_forward_check_excludes_used_words() {
        let crossword = square_2x2();
        // the only vertical fit for "a?" is "ab", which is the trial word itself
        let dictionary = Dictionary::new(["ab", "bb"]);
        let trial = crossword.write_word(Direction::Horizontal, 0, Rc::from("ab")).unwrap();
        assert!(!forward_check(&dictionary, &trial, 0).unwrap());
    }

    #[test]
    fn test_forward_check_ignores_single_cell_runs() {
        let crossword = template("...\n###", &[(0, 0, 3)], &[]);
        let trial = crossword.write_word(Direction::Horizontal, 0, Rc::from("zzz")).unwrap();
        assert!(forward_check(&Dictionary::default(), &trial, 0).unwrap());
    }

    #[test]
    fn test_forward_check_unknown_slot() {
        let err = forward_check(&Dictionary::default(), &square_2x2(), 5).unwrap_err();
        assert_eq!(err, FillError::UnknownSlot { direction: Direction::Horizontal, index: 5 });
    }

    #[test]
    fn test_horizontal_backtracks_past_dead_end() {
        // "ab" and "ba" on top pass the crossing check but leave no second row
        // whose columns are unused words; "aa" over "bb" is the first that works
        let crossword = square_2x2();
        let dictionary = Dictionary::new(["ab", "ba", "aa", "bb"]);

        let mut ctx = SearchCtx { dictionary: &dictionary, stats: FillStats::default() };
        let across = fill_horizontal_with(&mut ctx, &crossword).unwrap().unwrap();
        assert_eq!(across.grid().to_rows(), vec!["aa", "bb"]);
        assert_eq!(ctx.stats.backtracks, 2);
        assert_eq!(fill_horizontal(&crossword, &dictionary).unwrap(), Some(across));
    }

    #[test]
    fn test_horizontal_without_slots_is_unchanged() {
        let crossword = template("..", &[], &[]);
        assert_eq!(fill_horizontal(&crossword, &Dictionary::default()).unwrap(), Some(crossword));
    }

    #[test]
    fn test_vertical_pass_is_greedy() {
        // horizontals fixed as "ab"/"cd"; vertical 0 is "ac", vertical 1 is "bd"
        let crossword = square_2x2()
            .write_word(Direction::Horizontal, 0, Rc::from("ab")).unwrap()
            .write_word(Direction::Horizontal, 1, Rc::from("cd")).unwrap();

        let filled = fill_vertical(&crossword, &Dictionary::new(["ac", "bd"])).unwrap().unwrap();
        assert_eq!(filled.used_words(), vec!["ab", "cd", "ac", "bd"]);
        assert!(filled.is_complete());

        let report = vertical_pass(&crossword, &Dictionary::new(["ac"])).unwrap();
        assert!(matches!(report, VerticalPass::DeadEnd { slot: 1 }));
    }

    #[test]
    fn test_horizontal_exhausted_status() {
        // every top row leaves some pair of columns without unused words
        let crossword = square_2x2();
        let dictionary = Dictionary::new(["ab", "cd", "ac"]);
        let report = fill_with_report(&crossword, &dictionary).unwrap();
        assert!(report.crossword.is_none());
        assert_eq!(report.status, FillStatus::HorizontalExhausted);
    }

    #[test]
    fn test_vertical_dead_end_status() {
        // both columns read "a?" and each passes the crossing check on its own,
        // but there is only one such word to share between them
        let crossword = template("...\n.#.", &[(0, 0, 3)], &[(0, 0, 2), (0, 2, 2)]);
        let dictionary = Dictionary::new(["aba", "ax"]);

        let report = fill_with_report(&crossword, &dictionary).unwrap();
        assert!(report.crossword.is_none());
        assert_eq!(report.status, FillStatus::VerticalDeadEnd { slot: 1 });
        assert_eq!(fill(&crossword, &dictionary).unwrap(), None);
    }

    #[test]
    fn test_contract_violation_is_an_error_not_a_miss() {
        // slot origin one cell into a three-cell run: the pattern covers the whole
        // run, so the only candidate is one letter too long for the slot
        let grid: Grid = "...".parse().unwrap();
        let crossword = Crossword::from_parts_unchecked(grid, vec![WordSlot::new(0, 1, 2)], vec![]);
        let dictionary = Dictionary::new(["ab", "abc"]);

        let expected = FillError::LengthMismatch { word: "abc".to_string(), expected: 2, actual: 3 };
        assert_eq!(fill(&crossword, &dictionary), Err(expected.clone()));
        assert_eq!(fill_with_report(&crossword, &dictionary).unwrap_err(), expected);
    }

    #[test]
    fn test_stats_count_rejections() {
        let crossword = square_2x2();
        let dictionary = Dictionary::new(["ab", "ac", "cd", "bd"]);
        let report = fill_with_report(&crossword, &dictionary).unwrap();

        let filled = report.crossword.unwrap();
        assert_eq!(report.status, FillStatus::Filled);
        assert_eq!(filled.grid().to_rows(), vec!["ab", "cd"]);
        assert_eq!(filled.used_words(), vec!["ab", "cd", "ac", "bd"]);
        // "ab", then "ac" (column 0 would read "aa") and "cd" for the second row
        assert_eq!(report.stats.candidates_tried, 3);
        assert_eq!(report.stats.forward_check_rejections, 1);
        assert_eq!(report.stats.backtracks, 0);
        assert_eq!(report.stats.deepest_slot, 1);
    }
}
