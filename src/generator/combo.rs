/*
combo.rs

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

//! One combination, a fixed-length sequence of symbols.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// [`Combo`] object.
///
/// Two combos with the same symbols are equal. The frequency table is computed on first use.
#[derive(Debug, Clone)]
pub struct Combo {
    /// Symbols, in order.
    digits: Vec<char>,

    /// Number of occurrences of each symbol.
    frequencies: OnceCell<BTreeMap<char, usize>>,
}

impl Combo {
    /// Create a [`Combo`] object.
    pub fn new(digits: Vec<char>) -> Self {
        Self {
            digits,
            frequencies: OnceCell::new(),
        }
    }

    /// Return a reference to the symbols.
    pub fn digits(&self) -> &[char] {
        &self.digits
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Number of occurrences of each symbol.
    ///
    /// The table always has an entry for the digits `0` to `9`, even when they do not appear.
    pub fn frequencies(&self) -> &BTreeMap<char, usize> {
        self.frequencies.get_or_init(|| {
            let mut freq: BTreeMap<char, usize> = ('0'..='9').map(|d| (d, 0)).collect();
            for d in &self.digits {
                *freq.entry(*d).or_insert(0) += 1;
            }
            freq
        })
    }

    /// Number of occurrences of the given symbol.
    pub fn count(&self, symbol: char) -> usize {
        self.frequencies().get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn distinct_count(&self) -> usize {
        self.frequencies().values().filter(|n| **n > 0).count()
    }

    /// Sum of the digit values. Symbols that are not digits count as zero.
    pub fn digit_sum(&self) -> u32 {
        self.digits.iter().map(|d| d.to_digit(10).unwrap_or(0)).sum()
    }
}

impl PartialEq for Combo {
    fn eq(&self, other: &Self) -> bool {
        self.digits == other.digits
    }
}

impl Eq for Combo {}

impl Hash for Combo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.digits.hash(state);
    }
}

impl From<&str> for Combo {
    fn from(s: &str) -> Self {
        Self::new(s.chars().collect())
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.digits.iter().collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequencies() {
        let combo = Combo::from("3363");
        assert_eq!(10, combo.frequencies().len());
        assert_eq!(3, combo.count('3'));
        assert_eq!(1, combo.count('6'));
        assert_eq!(0, combo.count('0'));
        assert_eq!(0, combo.count('X'));
        assert_eq!(2, combo.distinct_count());
        assert_eq!(15, combo.digit_sum());
    }

    #[test]
    fn test_letters() {
        let combo = Combo::from("ABA");
        assert_eq!(2, combo.count('A'));
        assert_eq!(2, combo.distinct_count());
        assert_eq!(0, combo.digit_sum());
        assert_eq!("ABA", combo.to_string());
    }

    #[test]
    fn test_value_equality() {
        let a = Combo::from("123");
        let b = Combo::new(vec!['1', '2', '3']);
        a.frequencies();
        assert_eq!(a, b);
        assert_ne!(a, Combo::from("321"));
    }
}
