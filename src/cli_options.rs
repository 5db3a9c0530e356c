/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of Combolock.

Combolock is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Combolock is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Combolock. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! The command generates one puzzle and appends it to the puzzle collection read by the game.
//!
//! # Examples
//!
//! Generate a three digit puzzle over `0-9` and save it with a title:
//!
//! ```text
//! $ combolock --title "Warm up"
//! [INFO  combolock::generator::puzzle] Seed: 9618306219446128911
//! [INFO  combolock::generator::puzzle] Starting combos: 1000
//! [INFO  combolock::generator::puzzle]  (   271)    "437" BullsCowsRule                  one digit is right but in the wrong place
//! ...
//! ```
//!
//! Generate a four letter puzzle over `A` to `E` from a known seed, and print it instead of saving it:
//!
//! ```text
//! $ combolock abcde 4 --seed 42 --no-save
//! ```

use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use std::path::PathBuf;

use combolock::generator::alphabet::Alphabet;
use combolock::generator::errors::{GeneratorError, Result};
use combolock::generator::puzzle::{Puzzle, PuzzleData, PuzzleOptions};
use combolock::saver::puzzles::SaverPuzzles;

/// Generate combination lock puzzles.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// Symbols: empty for 0-9, a digit range such as 1-5, or the symbols themselves
    #[arg(default_value = "")]
    alphabet: String,

    /// Number of symbols in the combination
    #[arg(default_value_t = 3)]
    length: usize,

    /// Seed for the random generator, to generate a puzzle again
    #[arg(short, long)]
    seed: Option<u64>,

    /// Title of the puzzle
    #[arg(short, long)]
    title: Option<String>,

    /// Puzzle collection to append the puzzle to
    #[arg(short, long, default_value = "public/puzzles.json")]
    output: PathBuf,

    /// Maximum proportion of the combinations that may remain after a rule
    #[arg(long, default_value_t = 0.9)]
    threshold: f64,

    /// Number of remaining combinations below which any reduction is accepted
    #[arg(long, default_value_t = 10)]
    threshold_above: usize,

    /// Print the puzzle instead of saving it
    #[arg(short, long, default_value_t = false)]
    no_save: bool,

    /// Do not indent the JSON output
    #[arg(short, long, default_value_t = false)]
    compact: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Build the alphabet from the command-line value.
///
/// An empty value selects the decimal digits, `A-B` selects the digits from `A` to `B`, and any
/// other value is taken as the list of symbols, in upper case.
fn parse_alphabet(value: &str) -> Result<Alphabet> {
    let value: &str = value.trim();
    if value.is_empty() {
        return Ok(Alphabet::decimal());
    }
    let chars: Vec<char> = value.chars().collect();
    if let [first, '-', last] = chars[..] {
        if first.is_ascii_digit() && last.is_ascii_digit() {
            return Alphabet::new((first..=last).collect());
        }
    }
    Alphabet::new(value.to_uppercase().chars().collect())
}

/// Generate the puzzle described by the arguments.
fn generate(args: &Args) -> Result<PuzzleData> {
    let alphabet: Alphabet = parse_alphabet(&args.alphabet)?;
    let options: PuzzleOptions = PuzzleOptions {
        target_reduction_threshold: args.threshold,
        target_reduction_threshold_above: args.threshold_above,
    };
    debug!("Alphabet = {alphabet}  Length = {}  Options = {options:?}", args.length);

    let mut puzzle: Puzzle = Puzzle::new(alphabet, args.length, options, args.seed)?;
    if let Err(e) = puzzle.generate() {
        if let GeneratorError::NoCandidate { .. } = e {
            eprintln!("Try again with another seed (this one was {})", puzzle.seed());
        }
        return Err(e);
    }
    debug!(
        "Iterations = {}  Duration = {}",
        puzzle.iteration, puzzle.duration
    );

    let mut data: PuzzleData = puzzle.data();
    data.title = args.title.clone().filter(|t| !t.trim().is_empty());
    Ok(data)
}

/// Parse the command-line options and run. Return the process exit code.
pub fn run() -> u8 {
    let args: Args = Args::parse();

    let default_filter: &str = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let data: PuzzleData = match generate(&args) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    if args.no_save {
        let json = if args.compact {
            serde_json::to_string(&data)
        } else {
            serde_json::to_string_pretty(&data)
        };
        return match json {
            Ok(s) => {
                println!("{s}");
                0
            }
            Err(e) => {
                eprintln!("Error: {e}");
                1
            }
        };
    }

    let saver: SaverPuzzles = SaverPuzzles::new(args.output.clone(), !args.compact);
    match saver.append_puzzle(&data) {
        Ok(index) => {
            info!("Saved puzzle #{index} to {:?}", saver.path());
            0
        }
        Err(e) => {
            eprintln!("Error: cannot save the puzzle to {:?}: {e}", saver.path());
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(value: &str) -> String {
        parse_alphabet(value).unwrap().to_string()
    }

    #[test]
    fn test_parse_alphabet() {
        assert_eq!("0123456789", symbols(""));
        assert_eq!("0123456789", symbols("  "));
        assert_eq!("12345", symbols("1-5"));
        assert_eq!("ABC", symbols("abc"));
        assert_eq!("A-C", symbols("a-c"));
        assert_eq!(
            Err(GeneratorError::EmptyAlphabet),
            parse_alphabet("5-1")
        );
        assert_eq!(
            Err(GeneratorError::DuplicateSymbol('A')),
            parse_alphabet("aA")
        );
    }

    #[test]
    fn test_args() {
        let args = Args::parse_from(["combolock", "1-5", "4", "--seed", "42", "-n"]);
        assert_eq!(4, args.length);
        assert_eq!(Some(42), args.seed);
        assert!(args.no_save);
        assert_eq!(PathBuf::from("public/puzzles.json"), args.output);
    }

    #[test]
    fn test_generate() {
        let args = Args::parse_from(["combolock", "", "3", "--seed", "0", "-t", "Warm up", "-n"]);
        let first = generate(&args);
        assert_eq!(first, generate(&args));
        let data = first.unwrap();
        let digits: Vec<String> = ('0'..='9').map(String::from).collect();
        assert_eq!(digits, data.alphabet);
        assert_eq!(3, data.length);
        assert_eq!(1, data.answer.len());
        assert!(!data.rules.is_empty());
        assert_eq!(Some("Warm up".to_string()), data.title);

        let args = Args::parse_from(["combolock", "", "3", "--seed", "0", "-t", "  ", "-n"]);
        assert_eq!(None, generate(&args).unwrap().title);
    }

    #[test]
    fn test_invalid_length() {
        let args = Args::parse_from(["combolock", "", "0"]);
        assert_eq!(Err(GeneratorError::InvalidLength(0)), generate(&args));
    }
}
