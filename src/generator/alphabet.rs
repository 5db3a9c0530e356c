/*
alphabet.rs

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

//! Ordered set of symbols the combinations are made of.

use std::collections::HashSet;
use std::fmt;

use super::combo::Combo;
use super::errors::{GeneratorError, Result};

/// Above this number of combinations, the search would take too long and use too much memory.
pub const MAX_COMBOS: usize = 10_000_000;

/// [`Alphabet`] object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    /// Symbols, in enumeration order.
    symbols: Vec<char>,
}

impl Alphabet {
    /// Create an [`Alphabet`] object.
    ///
    /// # Errors
    ///
    /// The alphabet must have at least one symbol, and each symbol can only appear once.
    pub fn new(symbols: Vec<char>) -> Result<Self> {
        if symbols.is_empty() {
            return Err(GeneratorError::EmptyAlphabet);
        }
        let mut seen: HashSet<char> = HashSet::with_capacity(symbols.len());
        for s in &symbols {
            if !seen.insert(*s) {
                return Err(GeneratorError::DuplicateSymbol(*s));
            }
        }
        Ok(Self { symbols })
    }

    /// The decimal digits, `0` to `9`.
    pub fn decimal() -> Self {
        Self {
            symbols: ('0'..='9').collect(),
        }
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Return a reference to the symbols.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Whether every symbol is a base-10 digit.
    pub fn is_numeric(&self) -> bool {
        self.symbols.iter().all(|s| s.is_ascii_digit())
    }

    /// Number of combinations of the given length, or `None` on overflow.
    pub fn num_combos(&self, length: usize) -> Option<usize> {
        let exp: u32 = u32::try_from(length).ok()?;
        self.symbols.len().checked_pow(exp)
    }

    /// Enumerate every combination of the given length, in lexicographic order over the
    /// alphabet's own order.
    ///
    /// # Errors
    ///
    /// The length must be one or more, and the number of combinations must not exceed
    /// [`MAX_COMBOS`].
    pub fn combos(&self, length: usize) -> Result<Vec<Combo>> {
        if length == 0 {
            return Err(GeneratorError::InvalidLength(length));
        }
        let total: usize = self
            .num_combos(length)
            .filter(|n| *n <= MAX_COMBOS)
            .ok_or(GeneratorError::UniverseTooLarge {
                alphabet: self.len(),
                length,
            })?;

        let k: usize = self.symbols.len();
        let mut combos: Vec<Combo> = Vec::with_capacity(total);
        // Odometer over the symbol indexes, last position spinning fastest
        let mut indexes: Vec<usize> = vec![0; length];
        for _ in 0..total {
            combos.push(Combo::new(indexes.iter().map(|i| self.symbols[*i]).collect()));
            for pos in (0..length).rev() {
                indexes[pos] += 1;
                if indexes[pos] < k {
                    break;
                }
                indexes[pos] = 0;
            }
        }
        Ok(combos)
    }

    /// Return the symbols as strings, as exported in the puzzle data.
    pub fn to_strings(&self) -> Vec<String> {
        self.symbols.iter().map(|s| s.to_string()).collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::decimal()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbols.iter().collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_order() {
        let alphabet = Alphabet::new(vec!['0', '1', '2']).unwrap();
        let combos: Vec<String> = alphabet
            .combos(2)
            .unwrap()
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(
            vec!["00", "01", "02", "10", "11", "12", "20", "21", "22"],
            combos
        );
    }

    #[test]
    fn test_follows_alphabet_order() {
        let alphabet = Alphabet::new(vec!['B', 'A']).unwrap();
        let combos: Vec<String> = alphabet
            .combos(2)
            .unwrap()
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(vec!["BB", "BA", "AB", "AA"], combos);
    }

    #[test]
    fn test_decimal() {
        let alphabet = Alphabet::default();
        assert_eq!(10, alphabet.len());
        assert!(alphabet.is_numeric());
        assert_eq!(1000, alphabet.combos(3).unwrap().len());
        assert!(!Alphabet::new(vec!['A', '1']).unwrap().is_numeric());
    }

    #[test]
    fn test_invalid() {
        assert_eq!(Err(GeneratorError::EmptyAlphabet), Alphabet::new(Vec::new()));
        assert_eq!(
            Err(GeneratorError::DuplicateSymbol('1')),
            Alphabet::new(vec!['1', '2', '1'])
        );
        assert_eq!(
            Err(GeneratorError::InvalidLength(0)),
            Alphabet::default().combos(0)
        );
        assert!(matches!(
            Alphabet::default().combos(64),
            Err(GeneratorError::UniverseTooLarge { .. })
        ));
        assert!(matches!(
            Alphabet::default().combos(8),
            Err(GeneratorError::UniverseTooLarge { .. })
        ));
    }
}
