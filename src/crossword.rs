//! `crossword`: a grid together with its ordered horizontal and vertical slots.
//!
//! A [`Crossword`] is a value: writing a word produces a new snapshot and leaves the
//! original untouched, so the search backtracks by simply dropping snapshots.
//! Assigned words are `Rc<str>` shared with the dictionary, which keeps snapshot
//! copies down to the cell vector and a handful of reference-count bumps.

use crate::errors::{FillError, TemplateError};
use crate::grid::{Cell, Direction, Grid};
use std::fmt;
use std::rc::Rc;

/// A run of cells that receives one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSlot {
    /// Row of the first cell
    pub row: usize,
    /// Column of the first cell
    pub col: usize,
    /// Number of cells
    pub length: usize,
    /// The assigned word, if any
    pub word: Option<Rc<str>>,
}

impl WordSlot {
    /// An unassigned slot.
    #[must_use]
    pub fn new(row: usize, col: usize, length: usize) -> WordSlot {
        WordSlot { row, col, length, word: None }
    }

    #[must_use]
    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    /// The `(row, col)` of every cell of this slot, in order.
    pub fn cells(&self, direction: Direction) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(move |step| direction.advance(self.row, self.col, step))
    }
}

/// A grid plus its ordered horizontal and vertical slots.
///
/// Invariants (upheld by [`Crossword::new`] and [`Crossword::write_word`]):
/// - every slot starts where its open run starts and spans the whole run;
/// - every assigned word has its slot's length;
/// - crossing slots agree on the letter of their shared cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crossword {
    grid: Grid,
    horizontal: Vec<WordSlot>,
    vertical: Vec<WordSlot>,
}

impl Crossword {
    /// Build a template from a grid and its pre-derived slots.
    ///
    /// # Errors
    ///
    /// Returns `Box<TemplateError>` if a slot starts outside the grid, on a blocked
    /// cell or in the middle of an open run, if its length differs from the open run
    /// at its origin, or if it is already assigned.
    pub fn new(grid: Grid, horizontal: Vec<WordSlot>, vertical: Vec<WordSlot>) -> Result<Crossword, Box<TemplateError>> {
        for (direction, slots) in [(Direction::Horizontal, &horizontal), (Direction::Vertical, &vertical)] {
            for (index, slot) in slots.iter().enumerate() {
                validate_slot(&grid, direction, index, slot)?;
            }
        }
        Ok(Crossword { grid, horizontal, vertical })
    }

    /// Assemble a crossword without validating its slots.
    #[cfg(test)]
    pub(crate) fn from_parts_unchecked(grid: Grid, horizontal: Vec<WordSlot>, vertical: Vec<WordSlot>) -> Crossword {
        Crossword { grid, horizontal, vertical }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The slots running in `direction`, in fill order.
    #[must_use]
    pub fn slots(&self, direction: Direction) -> &[WordSlot] {
        match direction {
            Direction::Horizontal => &self.horizontal,
            Direction::Vertical => &self.vertical,
        }
    }

    #[must_use]
    pub fn slot(&self, direction: Direction, index: usize) -> Option<&WordSlot> {
        self.slots(direction).get(index)
    }

    fn slots_mut(&mut self, direction: Direction) -> &mut Vec<WordSlot> {
        match direction {
            Direction::Horizontal => &mut self.horizontal,
            Direction::Vertical => &mut self.vertical,
        }
    }

    /// Every assigned word: horizontal slots first, then vertical, each in slot order.
    #[must_use]
    pub fn used_words(&self) -> Vec<&str> {
        self.assigned_words().map(|word| word.as_ref()).collect()
    }

    /// Same order as [`Crossword::used_words`], as shared handles.
    pub fn assigned_words(&self) -> impl Iterator<Item = &Rc<str>> {
        self.horizontal.iter().chain(&self.vertical).filter_map(|slot| slot.word.as_ref())
    }

    /// True iff every slot in both directions is assigned.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.horizontal.iter().chain(&self.vertical).all(|slot| slot.word.is_some())
    }

    /// Return a new crossword with `word` written into slot `index` of `direction`.
    ///
    /// Cells that already hold the same letter are left as they are.
    ///
    /// # Errors
    ///
    /// - [`FillError::UnknownSlot`] if there is no such slot;
    /// - [`FillError::LengthMismatch`] if `word` has a different number of characters than the slot;
    /// - [`FillError::OverwriteConflict`] if a spanned cell already holds a different letter.
    pub fn write_word(&self, direction: Direction, index: usize, word: Rc<str>) -> Result<Crossword, FillError> {
        let slot = self.slot(direction, index).ok_or(FillError::UnknownSlot { direction, index })?;

        let letters: Vec<char> = word.chars().collect();
        if letters.len() != slot.length {
            return Err(FillError::LengthMismatch {
                word: word.to_string(),
                expected: slot.length,
                actual: letters.len(),
            });
        }

        let mut next = self.clone();
        for ((row, col), attempted) in slot.cells(direction).zip(letters) {
            if let Some(Cell::Letter(existing)) = self.grid.get(row, col) {
                if existing != attempted {
                    return Err(FillError::OverwriteConflict { row, col, existing, attempted });
                }
            } else {
                next.grid.set(row, col, Cell::Letter(attempted));
            }
        }
        next.slots_mut(direction)[index].word = Some(word);

        Ok(next)
    }
}

fn validate_slot(grid: &Grid, direction: Direction, index: usize, slot: &WordSlot) -> Result<(), Box<TemplateError>> {
    let (row, col) = (slot.row, slot.col);
    match grid.get(row, col) {
        None => return Err(Box::new(TemplateError::SlotOutOfBounds { direction, index, row, col })),
        Some(Cell::Blocked) => return Err(Box::new(TemplateError::SlotOnBlockedCell { direction, index, row, col })),
        Some(_) => {}
    }

    let actual = grid.run_length(row, col, direction);
    if actual != slot.length {
        return Err(Box::new(TemplateError::SlotLengthMismatch { direction, index, declared: slot.length, actual }));
    }

    if direction.retreat(row, col).is_some_and(|(r, c)| grid.is_open(r, c)) {
        return Err(Box::new(TemplateError::SlotNotAtRunStart { direction, index, row, col }));
    }

    if let Some(word) = slot.word() {
        return Err(Box::new(TemplateError::AssignedTemplateSlot { direction, index, word: word.to_string() }));
    }

    Ok(())
}

impl fmt::Display for Crossword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3×3 grid, open first row and first column, one slot each way at (0, 0)
    fn corner_crossword() -> Crossword {
        let grid: Grid = "...\n.##\n.##".parse().unwrap();
        Crossword::new(grid, vec![WordSlot::new(0, 0, 3)], vec![WordSlot::new(0, 0, 3)]).unwrap()
    }

    #[test]
    fn test_new_validates_slot_runs() {
        let grid: Grid = "...\n.##\n.##".parse().unwrap();

        let err = Crossword::new(grid.clone(), vec![WordSlot::new(0, 0, 2)], vec![]).unwrap_err();
        assert!(matches!(*err, TemplateError::SlotLengthMismatch { declared: 2, actual: 3, .. }));

        let err = Crossword::new(grid.clone(), vec![], vec![WordSlot::new(1, 1, 1)]).unwrap_err();
        assert!(matches!(*err, TemplateError::SlotOnBlockedCell { index: 0, .. }));

        let err = Crossword::new(grid.clone(), vec![WordSlot::new(3, 0, 1)], vec![]).unwrap_err();
        assert!(matches!(*err, TemplateError::SlotOutOfBounds { row: 3, .. }));

        let mut assigned = WordSlot::new(0, 0, 3);
        assigned.word = Some(Rc::from("cat"));
        let err = Crossword::new(grid, vec![assigned], vec![]).unwrap_err();
        assert!(matches!(*err, TemplateError::AssignedTemplateSlot { .. }));
    }

    #[test]
    fn test_new_rejects_slot_inside_run() {
        // (0, 1) runs to the edge in two cells, but the run itself starts at (0, 0)
        let grid: Grid = "...\n#.#\n...".parse().unwrap();
        let err = Crossword::new(grid.clone(), vec![WordSlot::new(0, 1, 2)], vec![]).unwrap_err();
        assert!(matches!(
            *err,
            TemplateError::SlotNotAtRunStart { direction: Direction::Horizontal, index: 0, row: 0, col: 1 }
        ));

        let err = Crossword::new(grid.clone(), vec![], vec![WordSlot::new(0, 1, 3), WordSlot::new(1, 1, 2)]).unwrap_err();
        assert!(matches!(*err, TemplateError::SlotNotAtRunStart { direction: Direction::Vertical, index: 1, .. }));

        // a blocked cell or the grid edge before the origin is fine
        assert!(Crossword::new(grid, vec![WordSlot::new(2, 0, 3)], vec![WordSlot::new(0, 1, 3)]).is_ok());
    }

    #[test]
    fn test_slot_cells() {
        let slot = WordSlot::new(1, 2, 3);
        let across: Vec<_> = slot.cells(Direction::Horizontal).collect();
        let down: Vec<_> = slot.cells(Direction::Vertical).collect();
        assert_eq!(across, vec![(1, 2), (1, 3), (1, 4)]);
        assert_eq!(down, vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_write_word_sets_letters_and_assignment() {
        let crossword = corner_crossword();
        let next = crossword.write_word(Direction::Horizontal, 0, Rc::from("cat")).unwrap();

        assert_eq!(next.grid().to_rows(), vec!["cat", ".##", ".##"]);
        assert_eq!(next.slot(Direction::Horizontal, 0).unwrap().word(), Some("cat"));
        assert_eq!(next.slot(Direction::Vertical, 0).unwrap().word(), None);
    }

    #[test]
    fn test_write_word_leaves_input_untouched() {
        let crossword = corner_crossword();
        let before = crossword.clone();

        let first = crossword.write_word(Direction::Vertical, 0, Rc::from("car")).unwrap();
        let second = crossword.write_word(Direction::Vertical, 0, Rc::from("car")).unwrap();

        assert_eq!(crossword, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_word_accepts_matching_shared_letter() {
        let crossword = corner_crossword().write_word(Direction::Horizontal, 0, Rc::from("cat")).unwrap();
        let filled = crossword.write_word(Direction::Vertical, 0, Rc::from("car")).unwrap();
        assert_eq!(filled.grid().to_rows(), vec!["cat", "a##", "r##"]);
        assert!(filled.is_complete());
    }

    #[test]
    fn test_write_word_overwrite_conflict() {
        let crossword = corner_crossword().write_word(Direction::Horizontal, 0, Rc::from("cat")).unwrap();
        let err = crossword.write_word(Direction::Vertical, 0, Rc::from("art")).unwrap_err();
        assert_eq!(err, FillError::OverwriteConflict { row: 0, col: 0, existing: 'c', attempted: 'a' });
    }

    #[test]
    fn test_write_word_length_mismatch() {
        let err = corner_crossword().write_word(Direction::Horizontal, 0, Rc::from("cats")).unwrap_err();
        assert_eq!(err, FillError::LengthMismatch { word: "cats".to_string(), expected: 3, actual: 4 });
    }

    #[test]
    fn test_write_word_unknown_slot() {
        let err = corner_crossword().write_word(Direction::Vertical, 4, Rc::from("cat")).unwrap_err();
        assert_eq!(err, FillError::UnknownSlot { direction: Direction::Vertical, index: 4 });
    }

    #[test]
    fn test_used_words_order() {
        let grid: Grid = "...\n...\n...".parse().unwrap();
        let crossword = Crossword::new(
            grid,
            vec![WordSlot::new(0, 0, 3), WordSlot::new(1, 0, 3), WordSlot::new(2, 0, 3)],
            vec![WordSlot::new(0, 0, 3), WordSlot::new(0, 1, 3), WordSlot::new(0, 2, 3)],
        )
        .unwrap();
        assert!(crossword.used_words().is_empty());

        let crossword = crossword
            .write_word(Direction::Vertical, 0, Rc::from("cab")).unwrap()
            .write_word(Direction::Horizontal, 2, Rc::from("bee")).unwrap()
            .write_word(Direction::Horizontal, 0, Rc::from("cat")).unwrap();

        // horizontals in slot order, then verticals; unassigned slots omitted
        assert_eq!(crossword.used_words(), vec!["cat", "bee", "cab"]);
        assert!(!crossword.is_complete());
    }
}
