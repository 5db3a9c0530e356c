/*
errors.rs

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

//! Errors raised while building rules or generating a puzzle.

use thiserror::Error;

/// Type of errors.
#[derive(Debug, Error, PartialEq)]
pub enum GeneratorError {
    /// A bulls/cows rule was given a negative target count.
    #[error("Invalid rule target: {0} (must be zero or more)")]
    InvalidTarget(i64),

    /// A bulls/cows rule was given something other than bull(s) or cow(s).
    #[error("Unknown rule target kind: {0:?} (expected bull, bulls, cow, or cows)")]
    UnknownGender(String),

    /// The alphabet has no symbols.
    #[error("The alphabet is empty")]
    EmptyAlphabet,

    /// The alphabet lists the same symbol twice.
    #[error("The alphabet contains {0:?} more than once")]
    DuplicateSymbol(char),

    /// Combinations must have at least one symbol.
    #[error("Invalid combination length: {0}")]
    InvalidLength(usize),

    /// The number of possible combinations does not fit in memory.
    #[error("Too many combinations for an alphabet of {alphabet} symbols and a length of {length}")]
    UniverseTooLarge { alphabet: usize, length: usize },

    /// A generator option is out of range.
    #[error("Invalid option {name}: {value}")]
    InvalidOption { name: &'static str, value: String },

    /// No template and pattern pair produces an acceptable rule. The generation run is over.
    #[error("No possible rule found! {remaining} combinations left, rules so far: {rules:?}")]
    NoCandidate { remaining: usize, rules: Vec<String> },
}

/// Result type alias for the generator.
pub type Result<T> = std::result::Result<T, GeneratorError>;
