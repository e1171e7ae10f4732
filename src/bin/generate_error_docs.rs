//! Generate error code documentation from the error enums themselves.
//!
//! Codes, descriptions, details and help text come straight from the
//! `code()`, `description()`, `details()` and `help()` methods of `TemplateError`
//! and `FillError`.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use gridfill::errors::{FillError, TemplateError};
use gridfill::grid::Direction;

/// Print one section per error value; works for any type with
/// `code()`, `description()`, `details()`, `help()` and `display_detailed()`.
macro_rules! generate_error_docs {
    ($errors:expr) => {
        for error in $errors {
            println!("### {}: {}\n", error.code(), error.description());
            println!("**Details:** {}\n", error.details());

            if let Some(help_text) = error.help() {
                println!("**How to fix:**");
                println!("```");
                println!("{}", help_text);
                println!("```\n");
            }

            println!("**Example error message:**");
            println!("```");
            println!("{}", error);
            println!("```\n");

            println!("**Detailed format:**");
            println!("```");
            println!("{}", error.display_detailed());
            println!("```\n");

            println!("---\n");
        }
    };
}

/// One example value of every `TemplateError` variant, in code order
fn all_template_error_variants() -> Vec<TemplateError> {
    vec![
        TemplateError::EmptyGrid,
        TemplateError::RaggedRow { row: 2, expected: 5, actual: 4 },
        TemplateError::InvalidCell { row: 0, col: 3, ch: '*' },
        TemplateError::SlotOutOfBounds { direction: Direction::Horizontal, index: 4, row: 9, col: 0 },
        TemplateError::SlotOnBlockedCell { direction: Direction::Vertical, index: 1, row: 0, col: 3 },
        TemplateError::SlotLengthMismatch { direction: Direction::Horizontal, index: 0, declared: 5, actual: 3 },
        TemplateError::AssignedTemplateSlot { direction: Direction::Vertical, index: 2, word: "cat".to_string() },
        TemplateError::SlotDirection { index: 3, source: FillError::InvalidDirection { value: "diagonal".to_string() } },
        // Json--produce a real parse error
        TemplateError::Json(serde_json::from_str::<serde_json::Value>("{\"grid\": [").unwrap_err()),
        TemplateError::Io {
            path: "template.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        },
        TemplateError::InvalidPatternChar { ch: '*' },
        TemplateError::SlotNotAtRunStart { direction: Direction::Horizontal, index: 1, row: 2, col: 3 },
    ]
}

/// One example value of every `FillError` variant, in code order
fn all_fill_error_variants() -> Vec<FillError> {
    vec![
        FillError::InvalidDirection { value: "diagonal".to_string() },
        FillError::LengthMismatch { word: "cats".to_string(), expected: 3, actual: 4 },
        FillError::OverwriteConflict { row: 0, col: 0, existing: 'c', attempted: 'a' },
        FillError::UnknownSlot { direction: Direction::Vertical, index: 7 },
    ]
}

fn main() {
    println!("# Error Code Reference\n");
    println!("**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n");

    println!("## Table of Contents\n");
    println!("- [Template Errors (E001–E012)](#template-errors)");
    println!("- [Fill Errors (F001–F004)](#fill-errors)");
    println!("- [How to Use Error Codes](#how-to-use-error-codes)\n");

    println!("## Template Errors\n");
    println!("Errors found while reading a template, grid or lookup pattern.\n");
    generate_error_docs!(all_template_error_variants());

    println!("## Fill Errors\n");
    println!("Contract violations inside the fill engine. A template that simply has no fill is not an error.\n");
    generate_error_docs!(all_fill_error_variants());

    println!("\n## How to Use Error Codes\n");
    println!("When you see an error like:\n");
    println!("```");
    println!("Error: {}", TemplateError::EmptyGrid.display_detailed());
    println!("```\n");
    println!("1. Note the error code (e.g., `E001`)");
    println!("2. Look it up in this document for a detailed explanation");
    println!("3. Follow the suggested fix\n");
}
