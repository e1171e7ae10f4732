use clap::Parser;
use std::process::ExitCode;
use std::time::Instant;

use gridfill::definitions::{self, StaticDefinitions};
use gridfill::dictionary::Dictionary;
use gridfill::errors::{FillError, TemplateError};
use gridfill::grid::Direction;
use gridfill::solver::{self, FillStatus};
use gridfill::template;

/// Fill a crossword grid template from a word list
#[derive(Parser, Debug)]
#[command(author, version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"), about, long_about = None)]
struct Cli {
    /// Path to the JSON template (grid rows plus slots)
    template: String,

    /// Path to the dictionary file (`word` or `word;score` per line)
    #[arg(short, long)]
    dictionary: String,

    /// Minimum score for scored dictionary lines
    #[arg(short = 'm', long, default_value_t = 0)]
    min_score: i32,

    /// JSON file mapping words to definition texts; adds a definition to every entry
    #[arg(long)]
    definitions: Option<String>,

    /// Seed for choosing among several definitions of a word
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print the solution as JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Entry point of the gridfill CLI.
///
/// Delegates to [`try_main`]. Errors are printed with their code and help text;
/// both errors and "no fill" exit with a failure status.
fn main() -> ExitCode {
    let debug_enabled = std::env::var("GRIDFILL_DEBUG").is_ok();
    gridfill::log::init_logger(debug_enabled);

    match try_main() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            if let Some(template_err) = e.downcast_ref::<TemplateError>() {
                eprintln!("Error: {}", template_err.display_detailed());
            } else if let Some(fill_err) = e.downcast_ref::<FillError>() {
                eprintln!("Error: {}", fill_err.display_detailed());
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Load the inputs, fill the template and print the result.
///
/// Returns `Ok(false)` when the template cannot be filled from the dictionary.
fn try_main() -> Result<bool, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let t_load = Instant::now();
    let crossword = template::load_template(&cli.template).map_err(|e| *e)?;
    let dictionary = Dictionary::load_from_path(&cli.dictionary, cli.min_score)?;
    let source = cli.definitions.as_deref().map(StaticDefinitions::load_from_path).transpose()?;
    let load_secs = t_load.elapsed().as_secs_f64();

    let report = solver::fill_with_report(&crossword, &dictionary)?;

    let Some(filled) = &report.crossword else {
        match report.status {
            FillStatus::VerticalDeadEnd { slot } => {
                eprintln!("✗ No fill: vertical slot {slot} has no remaining candidate");
            }
            _ => eprintln!("✗ No fill: horizontal candidates exhausted"),
        }
        print_stats(&dictionary, load_secs, &report);
        return Ok(false);
    };

    let clues = source.as_ref().map(|source| definitions::define_words(filled, source, cli.seed));

    if cli.json {
        let solution = template::solution_file(filled, clues.as_deref());
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        println!("{filled}\n");
        for direction in [Direction::Horizontal, Direction::Vertical] {
            println!("{}:", if direction == Direction::Horizontal { "Across" } else { "Down" });
            for (index, slot) in filled.slots(direction).iter().enumerate() {
                let word = slot.word().unwrap_or_default();
                let definition = clues
                    .iter()
                    .flatten()
                    .find(|clue| clue.direction == direction && clue.index == index)
                    .map(|clue| format!(" - {}", clue.definition))
                    .unwrap_or_default();
                println!("  {index:>3} ({}, {}) {word}{definition}", slot.row, slot.col);
            }
        }
    }

    eprintln!("✓ Filled");
    print_stats(&dictionary, load_secs, &report);
    Ok(true)
}

fn print_stats(dictionary: &Dictionary, load_secs: f64, report: &solver::FillReport) {
    eprintln!(
        "Loaded {} words in {:.3}s; searched in {:.3}s ({} candidates tried, {} pruned, {} backtracks).",
        dictionary.len(),
        load_secs,
        report.elapsed.as_secs_f64(),
        report.stats.candidates_tried,
        report.stats.forward_check_rejections,
        report.stats.backtracks
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_version_carries_git_hash() {
        let short = env!("GIT_HASH");
        let full = env!("GIT_HASH_FULL");
        assert!(!short.is_empty() && !short.contains('\n'));
        assert!(short == "unknown" || full.starts_with(short));

        let version = Cli::command().get_version().map(str::to_string);
        assert_eq!(version, Some(format!("{} ({short})", env!("CARGO_PKG_VERSION"))));
    }
}
