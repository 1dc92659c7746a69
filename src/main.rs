//! Command-line front end for `renumber`.
//!
//! Reads integers from the arguments (or whitespace-separated from stdin when
//! none are given), renumbers them, and prints the result and a write report.
//!
//! Run with:
//! ```bash
//! cargo run -- 8 7 3 6 2 1 4
//! cargo run -- --redistribute 40 30 20 10
//! echo "5 5 5" | cargo run
//!
//! # Watch every write
//! RUST_LOG=renumber=trace cargo run --features tracing -- --redistribute 1 0
//! ```

use std::io::Read;
use std::process::ExitCode;

use renumber::{AssignMode, Number, NumberAssigner};

const USAGE: &str = "usage: renumber [--redistribute] [NUMBER ...]\n\n\
Without numbers, reads whitespace-separated integers from stdin.\n\n\
  --rank          dense ranks 0..N (default)\n\
  --redistribute  keep the numbers, move them into ascending order\n\
  -h, --help      print this help";

// =============================================================================
// Argument Parsing
// =============================================================================

#[derive(Debug)]
struct Args {
    mode: AssignMode,
    numbers: Vec<Number>,
    from_stdin: bool,
}

fn parse_number(text: &str) -> Result<Number, String> {
    text.parse::<Number>()
        .map_err(|e| format!("invalid number '{text}': {e}"))
}

fn parse_args(raw: impl IntoIterator<Item = String>) -> Result<Option<Args>, String> {
    let mut mode = AssignMode::Rank;
    let mut numbers: Vec<Number> = Vec::new();

    for arg in raw {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--rank" => mode = AssignMode::Rank,
            "--redistribute" => mode = AssignMode::Redistribute,
            other => numbers.push(parse_number(other)?),
        }
    }

    let from_stdin = numbers.is_empty();

    Ok(Some(Args {
        mode,
        numbers,
        from_stdin,
    }))
}

fn read_stdin() -> Result<Vec<Number>, String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| format!("failed to read stdin: {e}"))?;

    input.split_whitespace().map(parse_number).collect()
}

fn format_numbers(numbers: &[Number]) -> String {
    numbers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// Main
// =============================================================================

fn run() -> Result<(), String> {
    let Some(mut args) = parse_args(std::env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };

    if args.from_stdin {
        args.numbers = read_stdin()?;
    }

    let before = args.numbers.clone();
    let report = NumberAssigner::new()
        .mode(args.mode)
        .assign(args.numbers.iter_mut())
        .map_err(|e| e.to_string())?;

    println!("Before: {}", format_numbers(&before));
    println!("After:  {}", format_numbers(&args.numbers));
    println!();
    println!("{report}");

    Ok(())
}

fn main() -> ExitCode {
    renumber::init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("renumber: {message}");
            eprintln!("{USAGE}");
            ExitCode::FAILURE
        }
    }
}
