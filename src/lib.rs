// Library API shared by the CLI, the helper binaries and the WASM build
pub mod candidates;
pub mod crossword;
pub mod definitions;
pub mod dictionary;
pub mod errors;
pub mod grid;
pub mod log;
pub mod patterns;
pub mod solver;
pub mod template;
pub mod word_char;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crossword::{Crossword, WordSlot};
pub use dictionary::Dictionary;
pub use errors::{FillError, TemplateError};
pub use grid::{Cell, Direction, Grid};
pub use solver::{fill, fill_with_report, FillReport, FillStats, FillStatus};
