//! Error types for template loading and for the fill engine, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Template/input errors (`TemplateError`, E001-E012):
//!
//! - E001: `EmptyGrid` (Grid has no rows or no columns)
//! - E002: `RaggedRow` (Grid row has the wrong width)
//! - E003: `InvalidCell` (Unrecognized grid character)
//! - E004: `SlotOutOfBounds` (Slot origin outside the grid)
//! - E005: `SlotOnBlockedCell` (Slot origin is a blocked cell)
//! - E006: `SlotLengthMismatch` (Declared slot length differs from its run)
//! - E007: `AssignedTemplateSlot` (Template slot already carries a word)
//! - E008: `SlotDirection` (Invalid slot direction (wraps [`FillError`]))
//! - E009: `Json` (Malformed template or definitions JSON)
//! - E010: `Io` (File could not be read)
//! - E011: `InvalidPatternChar` (Character not allowed in a lookup pattern)
//! - E012: `SlotNotAtRunStart` (Slot origin lies inside a longer run)
//!
//! Fill-engine contract violations (`FillError`, F001-F004):
//!
//! - F001: `InvalidDirection` (Direction is neither horizontal nor vertical)
//! - F002: `LengthMismatch` (Word length differs from slot length)
//! - F003: `OverwriteConflict` (Word contradicts a letter already in the grid)
//! - F004: `UnknownSlot` (Slot index out of range)
//!
//! # Examples
//!
//! ```
//! use gridfill::errors::TemplateError;
//!
//! fn check_rows(rows: &[&str]) -> Result<(), Box<TemplateError>> {
//!     if rows.is_empty() {
//!         return Err(Box::new(TemplateError::EmptyGrid));
//!     }
//!     Ok(())
//! }
//!
//! match check_rows(&[]) {
//!     Err(e) => {
//!         println!("Error: {}", e);
//!         println!("Code: {}", e.code());
//!         if let Some(help) = e.help() {
//!             println!("Help: {}", help);
//!         }
//!     }
//!     Ok(()) => println!("Success"),
//! }
//! ```

use crate::grid::Direction;
use std::io;

/// Errors raised while turning user input (grids, templates, patterns) into engine values.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Grid is empty")]
    EmptyGrid,

    #[error("Row {row} has {actual} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, actual: usize },

    #[error("Invalid grid character '{ch}' at ({row}, {col})")]
    InvalidCell { row: usize, col: usize, ch: char },

    #[error("{direction} slot {index} starts outside the grid at ({row}, {col})")]
    SlotOutOfBounds { direction: Direction, index: usize, row: usize, col: usize },

    #[error("{direction} slot {index} starts on a blocked cell at ({row}, {col})")]
    SlotOnBlockedCell { direction: Direction, index: usize, row: usize, col: usize },

    #[error("{direction} slot {index} declares length {declared}, but its run is {actual} cells")]
    SlotLengthMismatch { direction: Direction, index: usize, declared: usize, actual: usize },

    #[error("{direction} slot {index} is already assigned \"{word}\"")]
    AssignedTemplateSlot { direction: Direction, index: usize, word: String },

    #[error("Slot entry {index}: {source}")]
    SlotDirection {
        index: usize,
        #[source]
        source: FillError,
    },

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid pattern character '{ch}'")]
    InvalidPatternChar { ch: char },

    #[error("{direction} slot {index} starts at ({row}, {col}), inside an open run")]
    SlotNotAtRunStart { direction: Direction, index: usize, row: usize, col: usize },
}

impl From<serde_json::Error> for Box<TemplateError> {
    fn from(e: serde_json::Error) -> Self {
        Box::new(TemplateError::Json(e))
    }
}

impl TemplateError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            TemplateError::EmptyGrid => "E001",
            TemplateError::RaggedRow { .. } => "E002",
            TemplateError::InvalidCell { .. } => "E003",
            TemplateError::SlotOutOfBounds { .. } => "E004",
            TemplateError::SlotOnBlockedCell { .. } => "E005",
            TemplateError::SlotLengthMismatch { .. } => "E006",
            TemplateError::AssignedTemplateSlot { .. } => "E007",
            TemplateError::SlotDirection { .. } => "E008",
            TemplateError::Json(_) => "E009",
            TemplateError::Io { .. } => "E010",
            TemplateError::InvalidPatternChar { .. } => "E011",
            TemplateError::SlotNotAtRunStart { .. } => "E012",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            TemplateError::EmptyGrid => "Grid has no rows or no columns",
            TemplateError::RaggedRow { .. } => "Grid row has the wrong width",
            TemplateError::InvalidCell { .. } => "Unrecognized grid character",
            TemplateError::SlotOutOfBounds { .. } => "Slot origin outside the grid",
            TemplateError::SlotOnBlockedCell { .. } => "Slot origin is a blocked cell",
            TemplateError::SlotLengthMismatch { .. } => "Declared slot length differs from its run",
            TemplateError::AssignedTemplateSlot { .. } => "Template slot already carries a word",
            TemplateError::SlotDirection { .. } => "Invalid slot direction",
            TemplateError::Json(_) => "Malformed JSON",
            TemplateError::Io { .. } => "File could not be read",
            TemplateError::InvalidPatternChar { .. } => "Character not allowed in a lookup pattern",
            TemplateError::SlotNotAtRunStart { .. } => "Slot origin lies inside a longer run",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            TemplateError::EmptyGrid => "A grid needs at least one row and one column.",
            TemplateError::RaggedRow { .. } => "Every grid row must have the same number of cells as the first row.",
            TemplateError::InvalidCell { .. } => "Grid rows may only contain '#' (blocked), '.' (empty) or word characters (pre-filled letters).",
            TemplateError::SlotOutOfBounds { .. } => "A slot's origin row/column must lie inside the grid.",
            TemplateError::SlotOnBlockedCell { .. } => "A slot must start on an open cell.",
            TemplateError::SlotLengthMismatch { .. } => "A slot's length must equal the number of contiguous open cells starting at its origin in its direction.",
            TemplateError::AssignedTemplateSlot { .. } => "Templates are handed to the filler with every slot unassigned.",
            TemplateError::SlotDirection { .. } => "Slot entries must name their direction as H/V, across/down or horizontal/vertical.",
            TemplateError::Json(_) => "The JSON document could not be parsed into the expected shape.",
            TemplateError::Io { .. } => "The file could not be opened or is not valid UTF-8.",
            TemplateError::InvalidPatternChar { .. } => "Lookup patterns use '.' or '?' for unknown letters and word characters for known ones.",
            TemplateError::SlotNotAtRunStart { .. } => "A slot covers a whole run: the cell before its origin in its direction must be blocked or off the grid.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            TemplateError::EmptyGrid => Some("Example grid: [\"...\", \".#.\", \"...\"]"),
            TemplateError::RaggedRow { .. } => Some("Pad short rows with '#' so every row has the same width"),
            TemplateError::InvalidCell { .. } => Some("Use '#' for blocked cells and '.' for empty cells"),
            TemplateError::SlotLengthMismatch { .. } => Some("Recount the open cells from the slot origin up to the next '#' or grid edge"),
            TemplateError::SlotDirection { .. } => Some("Use \"H\" for across slots and \"V\" for down slots"),
            TemplateError::InvalidPatternChar { .. } => Some("Example: 'c.t' or 'c?t' matches cat, cot, cut"),
            TemplateError::SlotNotAtRunStart { .. } => Some("Move the slot origin back to the first open cell after a '#' or the grid edge"),
            _ => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Contract violations raised by the fill engine.
///
/// None of these is a search outcome: "no fill exists" is reported as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FillError {
    #[error("Invalid direction \"{value}\"")]
    InvalidDirection { value: String },

    #[error("Word \"{word}\" has length {actual}, but the slot has length {expected}")]
    LengthMismatch { word: String, expected: usize, actual: usize },

    #[error("Writing '{attempted}' at ({row}, {col}) would overwrite '{existing}'")]
    OverwriteConflict { row: usize, col: usize, existing: char, attempted: char },

    #[error("No {direction} slot at index {index}")]
    UnknownSlot { direction: Direction, index: usize },
}

impl FillError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            FillError::InvalidDirection { .. } => "F001",
            FillError::LengthMismatch { .. } => "F002",
            FillError::OverwriteConflict { .. } => "F003",
            FillError::UnknownSlot { .. } => "F004",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            FillError::InvalidDirection { .. } => "Direction is neither horizontal nor vertical",
            FillError::LengthMismatch { .. } => "Word length differs from slot length",
            FillError::OverwriteConflict { .. } => "Word contradicts a letter already in the grid",
            FillError::UnknownSlot { .. } => "Slot index out of range",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            FillError::InvalidDirection { .. } => "Directions are written H/V, across/down or horizontal/vertical (any case).",
            FillError::LengthMismatch { .. } => "A word can only be written into a slot with exactly as many cells as the word has characters. The filler never produces this itself; it indicates a defective candidate source or template.",
            FillError::OverwriteConflict { .. } => "A crossing slot already placed a different letter in a shared cell. The filler never produces this itself; it indicates a defective candidate source or template.",
            FillError::UnknownSlot { .. } => "The slot index is larger than the number of slots in that direction.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            FillError::InvalidDirection { .. } => Some("Use \"H\" for across and \"V\" for down"),
            FillError::LengthMismatch { .. } => Some("Check that the template's slot lengths match the grid"),
            FillError::OverwriteConflict { .. } => Some("Check that pre-filled letters agree with the words being written"),
            FillError::UnknownSlot { .. } => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
