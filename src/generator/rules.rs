/*
rules.rs

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

//! Clues that narrow down the set of combinations.
//!
//! A [`Rule`] is a [`RuleKind`] bound to a pattern, which is one combination used as the
//! comparison template.
//! Bulls and cows rules show their pattern to the player ("`682`: one digit is right and in the
//! right place").
//! The other rules only use their pattern to derive a property, such as the sum of its digits,
//! and the player only sees the description.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, IntoStaticStr};

use super::combo::Combo;
use super::errors::{GeneratorError, Result};

const NUMBERS: [&str; 21] = [
    "no", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
    "twenty",
];

/// What a bulls and cows rule counts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Gender {
    /// Right digit in the right place.
    Bulls,

    /// Right digit in the wrong place.
    Cows,
}

impl FromStr for Gender {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bull" | "bulls" => Ok(Gender::Bulls),
            "cow" | "cows" => Ok(Gender::Cows),
            _ => Err(GeneratorError::UnknownGender(s.to_string())),
        }
    }
}

/// Whether a combination has more even digits, more odd digits, or as many of both.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Parity {
    Even,
    Odd,
    Balanced,
}

impl Parity {
    /// Compute the parity of the given combination. Symbols that are not digits count as even.
    pub fn of(combo: &Combo) -> Self {
        let evens: usize = combo
            .digits()
            .iter()
            .filter(|d| d.to_digit(10).unwrap_or(0) % 2 == 0)
            .count();
        let odds: usize = combo.len() - evens;
        if evens > odds {
            Parity::Even
        } else if odds > evens {
            Parity::Odd
        } else {
            Parity::Balanced
        }
    }

    fn opposite(self) -> Self {
        match self {
            Parity::Even => Parity::Odd,
            _ => Parity::Even,
        }
    }
}

/// Rule variants, without a pattern.
#[derive(Debug, Copy, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum RuleKind {
    /// Exactly `bulls` digits right and in the right place, and `cows` digits right but in the
    /// wrong place. Built with [`RuleKind::bulls_cows`] so that one of the two is zero.
    #[strum(serialize = "BullsCowsRule")]
    BullsCows { bulls: usize, cows: usize },

    /// None of the pattern digits appear in the combination.
    #[strum(serialize = "NoBullsCowsRule")]
    NoBullsCows,

    /// The digits add up to the same total as the pattern's.
    #[strum(serialize = "SumOfDigitsRule")]
    SumOfDigits,

    /// Same [`Parity`] as the pattern.
    #[strum(serialize = "ParityCountComparisonRule")]
    ParityCountComparison,

    /// Same number of distinct digits as the pattern.
    #[strum(serialize = "DiffDigitsRule")]
    DiffDigits,

    /// Digits never decrease (or never increase, depending on the pattern) from left to right.
    #[strum(serialize = "StaircaseRule")]
    Staircase,
}

impl RuleKind {
    /// Create a bulls and cows rule kind from a count and a `bull(s)` or `cow(s)` token.
    ///
    /// # Errors
    ///
    /// The count cannot be negative, and the token must be one of `bull`, `bulls`, `cow`, or
    /// `cows`.
    pub fn bulls_cows(target_number: i64, target_gender: &str) -> Result<Self> {
        let gender: Gender = target_gender.parse()?;
        let n: usize =
            usize::try_from(target_number).map_err(|_| GeneratorError::InvalidTarget(target_number))?;
        Ok(match gender {
            Gender::Bulls => RuleKind::BullsCows { bulls: n, cows: 0 },
            Gender::Cows => RuleKind::BullsCows { bulls: 0, cows: n },
        })
    }

    /// Name of the variant, as exported in the puzzle data.
    pub fn class_name(&self) -> &'static str {
        self.into()
    }

    /// Bind the kind to a pattern.
    pub fn with_pattern(self, pattern: Combo) -> Rule {
        Rule {
            kind: self,
            pattern,
        }
    }
}

/// Rule as exported in the puzzle data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RuleData {
    pub description: String,

    #[serde(rename = "class")]
    pub class_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// [`Rule`] object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    kind: RuleKind,
    pattern: Combo,
}

impl Rule {
    /// Create a bulls and cows [`Rule`] object.
    pub fn bulls_cows(pattern: Combo, target_number: i64, target_gender: &str) -> Result<Self> {
        Ok(RuleKind::bulls_cows(target_number, target_gender)?.with_pattern(pattern))
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn pattern(&self) -> &Combo {
        &self.pattern
    }

    /// Number of positions where the pattern and the combination have the same symbol.
    pub fn bulls(&self, combo: &Combo) -> usize {
        self.pattern
            .digits()
            .iter()
            .zip(combo.digits())
            .filter(|(p, c)| p == c)
            .count()
    }

    /// Number of distinct pattern symbols found in the combination, minus the bulls.
    ///
    /// The subtraction stops at zero instead of going negative, so `112` against itself has no cows.
    pub fn cows(&self, combo: &Combo) -> usize {
        let found: usize = self
            .pattern
            .frequencies()
            .iter()
            .filter(|(symbol, n)| **n > 0 && combo.count(**symbol) > 0)
            .count();
        // Only patterns with repeated symbols can have more bulls than distinct matches
        found.saturating_sub(self.bulls(combo))
    }

    /// Whether the combination satisfies the rule.
    pub fn matches(&self, combo: &Combo) -> bool {
        match self.kind {
            RuleKind::BullsCows { bulls, cows } => {
                self.bulls(combo) == bulls && self.cows(combo) == cows
            }
            RuleKind::NoBullsCows => self.bulls(combo) == 0 && self.cows(combo) == 0,
            RuleKind::SumOfDigits => self.pattern.digit_sum() == combo.digit_sum(),
            RuleKind::ParityCountComparison => Parity::of(&self.pattern) == Parity::of(combo),
            RuleKind::DiffDigits => self.pattern.distinct_count() == combo.distinct_count(),
            RuleKind::Staircase => {
                let mut sorted: Vec<char> = combo.digits().to_vec();
                sorted.sort_unstable();
                if !self.is_ascending() {
                    sorted.reverse();
                }
                sorted == combo.digits()
            }
        }
    }

    /// How much the rule adds to the puzzle difficulty.
    pub fn difficulty(&self) -> f64 {
        match self.kind {
            RuleKind::BullsCows { .. } | RuleKind::NoBullsCows => 1.0,
            RuleKind::SumOfDigits => f64::from(self.pattern.digit_sum() / 2),
            RuleKind::ParityCountComparison | RuleKind::Staircase => 10.0,
            RuleKind::DiffDigits => 8.0,
        }
    }

    /// Whether the pattern can be shown to the player.
    pub fn show_pattern(&self) -> bool {
        matches!(
            self.kind,
            RuleKind::BullsCows { .. } | RuleKind::NoBullsCows
        )
    }

    /// Whether the rule can be worded without ambiguity.
    ///
    /// A pattern that repeats a symbol makes "right but in the wrong place" ambiguous, so such
    /// patterns are rejected unless the rule only counts bulls or claims nothing is present.
    /// Rules that hide their pattern are always valid.
    pub fn is_valid(&self) -> bool {
        match self.kind {
            RuleKind::BullsCows { bulls, cows: 0 } if bulls > 0 => true,
            RuleKind::BullsCows { .. } => self.pattern.distinct_count() == self.pattern.len(),
            _ => true,
        }
    }

    /// Human-readable wording of the rule.
    pub fn description(&self) -> String {
        match self.kind {
            RuleKind::BullsCows { bulls, cows } if bulls > 0 && cows == 0 => format!(
                "{} {} right and in the right place",
                self.number(bulls),
                if bulls == 1 { "digit is" } else { "digits are" }
            ),
            RuleKind::BullsCows { bulls, cows } if cows > 0 && bulls == 0 => format!(
                "{} {} right but in the wrong place",
                self.number(cows),
                if cows == 1 { "digit is" } else { "digits are" }
            ),
            RuleKind::BullsCows { bulls, cows } => format!(
                "{} {}, {} {}",
                self.number(bulls),
                if bulls == 1 { "bull" } else { "bulls" },
                self.number(cows),
                if cows == 1 { "cow" } else { "cows" }
            ),
            RuleKind::NoBullsCows => {
                "all digits are wrong (none of these digits are in the combination)".to_string()
            }
            RuleKind::SumOfDigits => format!(
                "the digits of the combination add up to exactly {}",
                self.pattern.digit_sum()
            ),
            RuleKind::ParityCountComparison => {
                let parity: Parity = Parity::of(&self.pattern);
                if parity == Parity::Balanced {
                    "there are an equal number of odd and even digits".to_string()
                } else {
                    format!(
                        "the number of {parity} digits is greater than the number of {} digits",
                        parity.opposite()
                    )
                }
            }
            RuleKind::DiffDigits => format!(
                "{} different digits are used in the combination",
                self.pattern.distinct_count()
            ),
            RuleKind::Staircase => {
                let (order, never) = if self.is_ascending() {
                    ("ascending", "lower")
                } else {
                    ("descending", "higher")
                };
                format!(
                    "the digits of the combination are in {order} order (i.e. later digits are never {never} than earlier ones)"
                )
            }
        }
    }

    /// Export the rule for the puzzle data.
    pub fn data(&self) -> RuleData {
        RuleData {
            description: self.description(),
            class_name: self.kind.class_name().to_string(),
            pattern: self.show_pattern().then(|| self.pattern.to_string()),
        }
    }

    /// Spell out a count. A count that covers the whole pattern is "all".
    fn number(&self, n: usize) -> String {
        if n == self.pattern.len() {
            return "all".to_string();
        }
        match NUMBERS.get(n) {
            Some(word) => word.to_string(),
            None => n.to_string(),
        }
    }

    /// Staircase direction: odd character code for the first pattern symbol means ascending.
    fn is_ascending(&self) -> bool {
        self.pattern
            .digits()
            .first()
            .is_some_and(|d| (*d as u32) % 2 == 1)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let pattern: String = if self.show_pattern() {
            self.pattern.to_string()
        } else {
            String::new()
        };
        write!(
            f,
            " \"{pattern}\" {:<30} {}",
            self.kind.class_name(),
            self.description()
        )
    }
}
