//! `grid`: cells, directions and the rectangular letter grid.
//!
//! The grid is stored row-major. Its text form is one line per row:
//! `#` for a blocked cell, `.` for an empty cell, and any word character for a
//! letter that is already placed.

use crate::errors::{FillError, TemplateError};
use crate::word_char::{WordChar, BLOCKED_CHAR, EMPTY_CHAR};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Orientation of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right ("across").
    Horizontal,
    /// Top to bottom ("down").
    Vertical,
}

impl Direction {
    /// The cell `steps` cells further along this direction.
    #[must_use]
    pub fn advance(self, row: usize, col: usize, steps: usize) -> (usize, usize) {
        match self {
            Direction::Horizontal => (row, col + steps),
            Direction::Vertical => (row + steps, col),
        }
    }

    /// The cell one step back along this direction, or `None` at the grid edge.
    #[must_use]
    pub fn retreat(self, row: usize, col: usize) -> Option<(usize, usize)> {
        match self {
            Direction::Horizontal => col.checked_sub(1).map(|c| (row, c)),
            Direction::Vertical => row.checked_sub(1).map(|r| (r, col)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Horizontal => write!(f, "horizontal"),
            Direction::Vertical => write!(f, "vertical"),
        }
    }
}

impl FromStr for Direction {
    type Err = FillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "a" | "across" | "horizontal" => Ok(Direction::Horizontal),
            "v" | "d" | "down" | "vertical" => Ok(Direction::Vertical),
            _ => Err(FillError::InvalidDirection { value: s.to_string() }),
        }
    }
}

/// A single grid square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Blocked,
    Empty,
    Letter(char),
}

impl Cell {
    #[must_use]
    pub fn is_blocked(self) -> bool {
        matches!(self, Cell::Blocked)
    }

    #[must_use]
    pub fn letter(self) -> Option<char> {
        match self {
            Cell::Letter(c) => Some(c),
            _ => None,
        }
    }

    /// Decode one grid text character; `None` if it is neither a marker nor a word character.
    #[must_use]
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            BLOCKED_CHAR => Some(Cell::Blocked),
            EMPTY_CHAR => Some(Cell::Empty),
            c if c.is_word_char() => Some(Cell::Letter(c)),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Cell::Blocked => BLOCKED_CHAR,
            Cell::Empty => EMPTY_CHAR,
            Cell::Letter(c) => c,
        }
    }
}

/// Fixed-size `rows × cols` matrix of cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from its text rows.
    ///
    /// # Errors
    ///
    /// Returns `Box<TemplateError>` if there are no rows or the first row is empty,
    /// if the rows differ in width, or if a row contains an unrecognized character.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Grid, Box<TemplateError>> {
        let cols = rows.first().map_or(0, |r| r.as_ref().chars().count());
        if cols == 0 {
            return Err(Box::new(TemplateError::EmptyGrid));
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, text) in rows.iter().enumerate() {
            let width = text.as_ref().chars().count();
            if width != cols {
                return Err(Box::new(TemplateError::RaggedRow { row, expected: cols, actual: width }));
            }
            for (col, ch) in text.as_ref().chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or_else(|| Box::new(TemplateError::InvalidCell { row, col, ch }))?;
                cells.push(cell);
            }
        }

        Ok(Grid { rows: rows.len(), cols, cells })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The cell at `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Callers guarantee `(row, col)` is inside the grid.
    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let cols = self.cols;
        self.cells[row * cols + col] = cell;
    }

    /// True iff `(row, col)` is inside the grid and not blocked.
    #[must_use]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(|cell| !cell.is_blocked())
    }

    /// Number of contiguous open cells starting at `(row, col)` along `direction`.
    #[must_use]
    pub fn run_length(&self, row: usize, col: usize, direction: Direction) -> usize {
        (0..)
            .map(|step| direction.advance(row, col, step))
            .take_while(|&(r, c)| self.is_open(r, c))
            .count()
    }

    /// True iff no cell is `Empty`.
    #[must_use]
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// The text rows of this grid (inverse of [`Grid::from_rows`]).
    #[must_use]
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|cell| cell.to_char()).collect())
            .collect()
    }
}

impl FromStr for Grid {
    type Err = Box<TemplateError>;

    /// Parse newline-separated rows; blank lines and surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
        Grid::from_rows(&rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.to_rows().iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_str() {
        assert_eq!("H".parse::<Direction>().unwrap(), Direction::Horizontal);
        assert_eq!("across".parse::<Direction>().unwrap(), Direction::Horizontal);
        assert_eq!("Vertical".parse::<Direction>().unwrap(), Direction::Vertical);
        assert_eq!("d".parse::<Direction>().unwrap(), Direction::Vertical);
    }

    #[test]
    fn test_direction_from_str_rejects_unknown() {
        let err = "diagonal".parse::<Direction>().unwrap_err();
        assert_eq!(err, FillError::InvalidDirection { value: "diagonal".to_string() });
        assert_eq!(err.code(), "F001");
        assert!("".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_steps() {
        assert_eq!(Direction::Horizontal.advance(2, 3, 2), (2, 5));
        assert_eq!(Direction::Vertical.advance(2, 3, 2), (4, 3));
        assert_eq!(Direction::Horizontal.retreat(2, 0), None);
        assert_eq!(Direction::Vertical.retreat(2, 0), Some((1, 0)));
    }

    #[test]
    fn test_cell_round_trip_chars() {
        assert_eq!(Cell::from_char('#'), Some(Cell::Blocked));
        assert_eq!(Cell::from_char('.'), Some(Cell::Empty));
        assert_eq!(Cell::from_char('q'), Some(Cell::Letter('q')));
        assert_eq!(Cell::from_char('*'), None);
        assert_eq!(Cell::Letter('q').to_char(), 'q');
    }

    #[test]
    fn test_from_rows() {
        let grid = Grid::from_rows(&["..#", "a.."]).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.get(0, 2), Some(Cell::Blocked));
        assert_eq!(grid.get(1, 0), Some(Cell::Letter('a')));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.to_rows(), vec!["..#", "a.."]);
    }

    #[test]
    fn test_from_rows_errors() {
        let empty: [&str; 0] = [];
        assert!(matches!(*Grid::from_rows(&empty).unwrap_err(), TemplateError::EmptyGrid));
        assert!(matches!(
            *Grid::from_rows(&["...", ".."]).unwrap_err(),
            TemplateError::RaggedRow { row: 1, expected: 3, actual: 2 }
        ));
        assert!(matches!(
            *Grid::from_rows(&["..", ".*"]).unwrap_err(),
            TemplateError::InvalidCell { row: 1, col: 1, ch: '*' }
        ));
    }

    #[test]
    fn test_from_str_ignores_blank_lines() {
        let grid: Grid = "\n  ...\n  .#.\n\n".parse().unwrap();
        assert_eq!(grid.to_rows(), vec!["...", ".#."]);
        assert_eq!(grid.to_string(), "...\n.#.");
    }

    #[test]
    fn test_run_length() {
        let grid: Grid = "...#.\n.#...\n.....".parse().unwrap();
        assert_eq!(grid.run_length(0, 0, Direction::Horizontal), 3);
        assert_eq!(grid.run_length(0, 4, Direction::Horizontal), 1);
        assert_eq!(grid.run_length(0, 0, Direction::Vertical), 3);
        assert_eq!(grid.run_length(0, 1, Direction::Vertical), 1);
        assert_eq!(grid.run_length(0, 3, Direction::Vertical), 0);
        assert_eq!(grid.run_length(7, 7, Direction::Vertical), 0);
    }

    #[test]
    fn test_is_full() {
        let mut grid: Grid = "..".parse().unwrap();
        assert!(!grid.is_full());
        grid.set(0, 0, Cell::Letter('a'));
        assert!(!grid.is_full());
        grid.set(0, 1, Cell::Blocked);
        assert!(grid.is_full());
        assert!("a#\n#b".parse::<Grid>().unwrap().is_full());
    }
}
