use crate::dictionary::Dictionary;
use crate::errors::{FillError, TemplateError};
use crate::log::init_logger;
use crate::solver::{fill_with_report, FillStatus};
use crate::template::{parse_template, solution_file, SolutionFile};
use wasm_bindgen::prelude::*;

use serde_wasm_bindgen::to_value;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "E006", "F003")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<Box<TemplateError>> for WasmError {
    fn from(e: Box<TemplateError>) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            description: e.description().to_string(),
            details: e.details().to_string(),
            help: e.help().map(str::to_string),
        }
    }
}

impl From<FillError> for WasmError {
    fn from(e: FillError) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            description: e.description().to_string(),
            details: e.details().to_string(),
            help: e.help().map(str::to_string),
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if !e.details.is_empty() {
            msg.push_str(&format!("\n\n{}", e.details));
        }

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }

        js_sys::Error::new(&msg).into()
    }
}

fn serialization_error(what: &str, e: &serde_wasm_bindgen::Error) -> WasmError {
    WasmError {
        code: "WASM002".to_string(),
        message: format!("serialization failed: {e}"),
        description: format!("Failed to serialize {what}"),
        details: format!("The {what} could not be converted to JavaScript format."),
        help: Some("This is an internal error. Please report this issue.".to_string()),
    }
}

/// Force every `LazyLock<Regex>` so a bad pattern panics at startup, not on first use.
///
/// If you add a new `LazyLock<Regex>` anywhere in the crate, add it here too.
fn validate_internal_regexes() {
    let _ = &*crate::word_char::WORD_CHAR_RE;
    log::debug!("Internal regex patterns validated successfully");
}

/// Set up the panic hook, validate regexes and start logging.
///
/// Must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    validate_internal_regexes();
    init_logger(debug_enabled);

    log::info!("gridfill WASM module initialized");
}

#[derive(serde::Serialize)]
struct WasmFillResult {
    /// `null` when no fill was found
    solution: Option<SolutionFile>,
    status: String,
    /// Index of the vertical slot the greedy pass got stuck on
    #[serde(skip_serializing_if = "Option::is_none")]
    dead_end_slot: Option<usize>,
    elapsed_ms: f64,
}

/// JS entry: (template_json: string, words: string[]) -> { solution, status, ... }
///
/// `words` is used in the given order; see [`parse_dictionary`] for cleaning a raw list.
#[wasm_bindgen]
pub fn fill_crossword_wasm(template_json: &str, words: JsValue) -> Result<JsValue, JsValue> {
    let words: Vec<String> = serde_wasm_bindgen::from_value(words).map_err(|e| WasmError {
        code: "WASM001".to_string(),
        message: format!("words must be string[]: {e}"),
        description: "Invalid word-list format".to_string(),
        details: "The words parameter must be a JavaScript array of strings.".to_string(),
        help: Some("Pass a string array, e.g. ['cat', 'car', 'art']".to_string()),
    })?;

    let crossword = parse_template(template_json).map_err(WasmError::from)?;
    let dictionary = Dictionary::new(&words);
    let report = fill_with_report(&crossword, &dictionary).map_err(WasmError::from)?;

    let (status, dead_end_slot) = match report.status {
        FillStatus::Filled => ("filled", None),
        FillStatus::HorizontalExhausted => ("horizontal_exhausted", None),
        FillStatus::VerticalDeadEnd { slot } => ("vertical_dead_end", Some(slot)),
    };

    let result = WasmFillResult {
        solution: report.crossword.as_ref().map(|filled| solution_file(filled, None)),
        status: status.to_string(),
        dead_end_slot,
        elapsed_ms: report.elapsed.as_secs_f64() * 1000.0,
    };

    to_value(&result).map_err(|e| serialization_error("fill result", &e).into())
}

/// Clean a raw word list (`word` or `word;score` per line) into the words the
/// filler would use, in order.
#[wasm_bindgen]
pub fn parse_dictionary(text: &str, min_score: i32) -> Result<JsValue, JsValue> {
    let dictionary = Dictionary::parse_from_str(text, min_score);
    let words: Vec<&str> = dictionary.entries().iter().map(|word| word.as_ref()).collect();
    to_value(&words).map_err(|e| serialization_error("word list", &e).into())
}

/// A copy-and-paste report for bug reports.
#[wasm_bindgen]
pub fn get_debug_info(template_json: &str, error_message: &str, word_count: usize) -> String {
    use std::fmt::Write;
    let mut report = String::new();

    // writing to a String never fails
    let _ = writeln!(&mut report, "=== GRIDFILL DEBUG REPORT ===");
    let _ = writeln!(&mut report, "Version: {} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH"));
    let _ = writeln!(&mut report, "Commit: {}", env!("GIT_HASH_FULL"));
    let _ = writeln!(
        &mut report,
        "Generated: {}",
        js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_else(|| "unknown".to_string())
    );
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Error");
    let _ = writeln!(&mut report, "{error_message}");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Input");
    let _ = writeln!(&mut report, "Template: {template_json}");
    let _ = writeln!(&mut report, "Word Count: {word_count}");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Environment");
    if let Some(window) = web_sys::window() {
        if let Ok(user_agent) = window.navigator().user_agent() {
            let _ = writeln!(&mut report, "User Agent: {user_agent}");
        }
    }
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "=== END DEBUG REPORT ===");

    report
}
