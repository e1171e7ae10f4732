//! JSON templates in, JSON solutions out.
//!
//! A template lists the grid rows and the slots to fill, each direction in fill order:
//!
//! ```json
//! {
//!   "grid": ["...", ".##", ".##"],
//!   "slots": [
//!     { "direction": "H", "row": 0, "col": 0, "length": 3 },
//!     { "direction": "V", "row": 0, "col": 0, "length": 3 }
//!   ]
//! }
//! ```
//!
//! Horizontal and vertical entries may be interleaved; only their relative order
//! within one direction matters.

use crate::crossword::{Crossword, WordSlot};
use crate::definitions::Clue;
use crate::errors::TemplateError;
use crate::grid::{Direction, Grid};
use serde::{Deserialize, Serialize};

/// On-disk shape of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFile {
    pub grid: Vec<String>,
    pub slots: Vec<SlotEntry>,
}

/// One slot of a [`TemplateFile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEntry {
    /// `H`/`V`, `across`/`down` or `horizontal`/`vertical`, in any case
    pub direction: String,
    pub row: usize,
    pub col: usize,
    pub length: usize,
}

impl TemplateFile {
    /// Validate this template and turn it into an unassigned [`Crossword`].
    ///
    /// # Errors
    ///
    /// Returns `Box<TemplateError>` for a malformed grid, an unknown direction, or a
    /// slot that does not match the grid.
    pub fn into_crossword(self) -> Result<Crossword, Box<TemplateError>> {
        let grid = Grid::from_rows(&self.grid)?;

        let mut horizontal = Vec::new();
        let mut vertical = Vec::new();
        for (index, entry) in self.slots.into_iter().enumerate() {
            let direction: Direction = entry
                .direction
                .parse()
                .map_err(|source| Box::new(TemplateError::SlotDirection { index, source }))?;
            let slot = WordSlot::new(entry.row, entry.col, entry.length);
            match direction {
                Direction::Horizontal => horizontal.push(slot),
                Direction::Vertical => vertical.push(slot),
            }
        }

        Crossword::new(grid, horizontal, vertical)
    }
}

/// Parse a template from JSON text.
///
/// # Errors
///
/// Returns [`TemplateError::Json`] for malformed JSON, or any error of
/// [`TemplateFile::into_crossword`].
pub fn parse_template(json: &str) -> Result<Crossword, Box<TemplateError>> {
    let file: TemplateFile = serde_json::from_str(json)?;
    file.into_crossword()
}

/// Read and parse a template file.
///
/// # Errors
///
/// Returns [`TemplateError::Io`] if the file can't be read, or any error of [`parse_template`].
#[cfg(not(target_arch = "wasm32"))]
pub fn load_template<P: AsRef<std::path::Path>>(path: P) -> Result<Crossword, Box<TemplateError>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|source| Box::new(TemplateError::Io { path: path.display().to_string(), source }))?;
    parse_template(&json)
}

/// A crossword as written out after a fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolutionFile {
    pub grid: Vec<String>,
    pub entries: Vec<SolvedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolvedEntry {
    pub direction: Direction,
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub length: usize,
    pub word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

/// Describe every slot of `crossword`, horizontal then vertical, with the matching
/// definition from `clues` when given.
#[must_use]
pub fn solution_file(crossword: &Crossword, clues: Option<&[Clue]>) -> SolutionFile {
    let definition = |direction: Direction, index: usize| {
        clues?
            .iter()
            .find(|clue| clue.direction == direction && clue.index == index)
            .map(|clue| clue.definition.clone())
    };

    let entries = [Direction::Horizontal, Direction::Vertical]
        .into_iter()
        .flat_map(|direction| {
            crossword.slots(direction).iter().enumerate().map(move |(index, slot)| SolvedEntry {
                direction,
                index,
                row: slot.row,
                col: slot.col,
                length: slot.length,
                word: slot.word().map(str::to_string),
                definition: definition(direction, index),
            })
        })
        .collect();

    SolutionFile { grid: crossword.grid().to_rows(), entries }
}
