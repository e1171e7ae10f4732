//! `bench_local.rs`: quick local timing runner for the filler (no Criterion)
//!
//! - Loads the dictionary once, then fills each built-in template several times
//!   and reports the median.
//! - One untimed warm-up fill per template.
//! - Printing stays outside the timed section.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:      `cargo run --bin bench_local --release`
//! - Multiple repeats:     `cargo run --bin bench_local --release -- -r 5`
//! - Show the fills:       `cargo run --bin bench_local --release -- --print`
//! - Another dictionary:   `cargo run --bin bench_local --release -- -d words.dict -m 50`

use clap::Parser;
use gridfill::dictionary::Dictionary;
use gridfill::solver::{self, FillReport, FillStatus};
use gridfill::template;
use std::hint::black_box;
use std::time::Instant;

/// Local benchmark runner: load a dictionary once, time several template fills.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the dictionary file (`word` or `word;score` per line)
    #[arg(
        short,
        long,
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/words.txt")
    )]
    dictionary: String,

    /// Minimum score filter
    #[arg(short = 'm', long, default_value_t = 0)]
    min_score: i32,

    /// Number of timed fills per template (median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 1)]
    num_repeats: usize,

    /// Print each filled grid after timing
    #[arg(short = 'p', long)]
    print: bool,
}

struct Case {
    name: &'static str,
    template: &'static str,
}

/// Add new templates here.
fn get_cases() -> Vec<Case> {
    vec![
        Case {
            name: "corner 3x3",
            template: r#"{"grid": ["...", ".##", ".##"], "slots": [
                {"direction": "H", "row": 0, "col": 0, "length": 3},
                {"direction": "V", "row": 0, "col": 0, "length": 3}]}"#,
        },
        Case {
            name: "open 3x3",
            template: r#"{"grid": ["...", "...", "..."], "slots": [
                {"direction": "H", "row": 0, "col": 0, "length": 3},
                {"direction": "H", "row": 1, "col": 0, "length": 3},
                {"direction": "H", "row": 2, "col": 0, "length": 3},
                {"direction": "V", "row": 0, "col": 0, "length": 3},
                {"direction": "V", "row": 0, "col": 1, "length": 3},
                {"direction": "V", "row": 0, "col": 2, "length": 3}]}"#,
        },
        Case {
            name: "open 4x4",
            template: r#"{"grid": ["....", "....", "....", "...."], "slots": [
                {"direction": "H", "row": 0, "col": 0, "length": 4},
                {"direction": "H", "row": 1, "col": 0, "length": 4},
                {"direction": "H", "row": 2, "col": 0, "length": 4},
                {"direction": "H", "row": 3, "col": 0, "length": 4},
                {"direction": "V", "row": 0, "col": 0, "length": 4},
                {"direction": "V", "row": 0, "col": 1, "length": 4},
                {"direction": "V", "row": 0, "col": 2, "length": 4},
                {"direction": "V", "row": 0, "col": 3, "length": 4}]}"#,
        },
        Case {
            name: "blocked 5x5",
            template: r###"{"grid": ["...##", ".....", ".....", ".....", "##..."], "slots": [
                {"direction": "H", "row": 0, "col": 0, "length": 3},
                {"direction": "H", "row": 1, "col": 0, "length": 5},
                {"direction": "H", "row": 2, "col": 0, "length": 5},
                {"direction": "H", "row": 3, "col": 0, "length": 5},
                {"direction": "H", "row": 4, "col": 2, "length": 3},
                {"direction": "V", "row": 0, "col": 0, "length": 4},
                {"direction": "V", "row": 0, "col": 1, "length": 4},
                {"direction": "V", "row": 0, "col": 2, "length": 5},
                {"direction": "V", "row": 1, "col": 3, "length": 4},
                {"direction": "V", "row": 1, "col": 4, "length": 4}]}"###,
        },
    ]
}

/// Median of a small sample; 0.0 if empty.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

fn status_label(status: &FillStatus) -> String {
    match status {
        FillStatus::Filled => "filled".to_string(),
        FillStatus::HorizontalExhausted => "exhausted".to_string(),
        FillStatus::VerticalDeadEnd { slot } => format!("dead end at V{slot}"),
    }
}

/// Summary column for a template; "n/a" when no timed run finished.
fn summary_status(last: Option<&FillReport>) -> String {
    last.map_or_else(|| "n/a".to_string(), |report| status_label(&report.status))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    eprintln!("Loading dictionary from: {}", cli.dictionary);
    let t_load = Instant::now();
    let dictionary = Dictionary::load_from_path(&cli.dictionary, cli.min_score)?;
    eprintln!("Loaded {} words in {:.3}s", dictionary.len(), t_load.elapsed().as_secs_f64());

    let mut summary: Vec<(&str, f64, String)> = Vec::new();

    for (idx, case) in get_cases().iter().enumerate() {
        eprintln!("\n[{:02}] {}", idx + 1, case.name);
        let crossword = template::parse_template(case.template).map_err(|e| *e)?;

        if let Err(e) = solver::fill(&crossword, &dictionary) {
            eprintln!("  ✗ Warm-up failed: {e}");
            continue;
        }

        let mut times = Vec::with_capacity(cli.num_repeats);
        let mut last = None;
        for rep in 0..cli.num_repeats {
            let t_fill = Instant::now();
            let report = solver::fill_with_report(black_box(&crossword), &dictionary)?;
            let fill_secs = t_fill.elapsed().as_secs_f64();

            eprintln!(
                "  run {:>2}/{:>2}: {:.3}s ({}, {} candidates tried)",
                rep + 1,
                cli.num_repeats,
                fill_secs,
                status_label(&report.status),
                report.stats.candidates_tried
            );
            times.push(fill_secs);
            last = Some(report);
        }

        let med = median(times);
        let status = summary_status(last.as_ref());
        if cli.print {
            if let Some(filled) = last.as_ref().and_then(|report| report.crossword.as_ref()) {
                println!("{}\n{filled}\n", case.name);
            }
        }
        eprintln!("  → median {med:.3}s over {} run(s)", cli.num_repeats);
        summary.push((case.name, med, status));
    }

    eprintln!("\n==== Summary ====");
    eprintln!("{:<16} | {:>10} | {:<20}", "template", "median (s)", "status");
    eprintln!("{:-<16}-+-{:-<10}-+-{:-<20}", "", "", "");
    for (name, med, status) in &summary {
        eprintln!("{name:<16} | {med:>10.3} | {status:<20}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median() {
        assert_eq!(median(vec![]), 0.0);
        assert_eq!(median(vec![3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_summary_status() {
        assert_eq!(summary_status(None), "n/a");

        let crossword = template::parse_template(get_cases()[0].template).unwrap();
        let dictionary = Dictionary::new(["cat", "car"]);
        let report = solver::fill_with_report(&crossword, &dictionary).unwrap();
        assert_eq!(summary_status(Some(&report)), "filled");
    }

    #[test]
    fn test_cases_are_valid_templates() {
        for case in get_cases() {
            assert!(template::parse_template(case.template).is_ok(), "invalid template: {}", case.name);
        }
    }
}
