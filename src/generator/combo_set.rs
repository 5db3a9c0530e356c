/*
combo_set.rs

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

//! Working set of combinations, narrowed down by rules.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::fmt;

use super::alphabet::Alphabet;
use super::combo::Combo;
use super::errors::Result;
use super::rules::Rule;

/// [`ComboSet`] object.
#[derive(Debug, Clone)]
pub struct ComboSet {
    combos: Vec<Combo>,
}

impl ComboSet {
    /// Create a [`ComboSet`] object with all the combinations of the given length.
    pub fn new(alphabet: &Alphabet, length: usize) -> Result<Self> {
        Ok(Self {
            combos: alphabet.combos(length)?,
        })
    }

    /// Number of combinations in the set.
    pub fn len(&self) -> usize {
        self.combos.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    /// Return a reference to the combinations.
    pub fn combos(&self) -> &[Combo] {
        &self.combos
    }

    /// Pick one combination at random.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Combo> {
        self.combos.choose(rng)
    }

    /// Return all the combinations in a random order.
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<&Combo> {
        let mut combos: Vec<&Combo> = self.combos.iter().collect();
        combos.shuffle(rng);
        combos
    }

    /// Return the combinations that match all the given rules. The set is not modified.
    pub fn filter_by(&self, rules: &[Rule]) -> Vec<&Combo> {
        self.combos
            .iter()
            .filter(|combo| rules.iter().all(|rule| rule.matches(combo)))
            .collect()
    }

    /// Number of combinations that match all the given rules.
    pub fn count_matching(&self, rules: &[Rule]) -> usize {
        self.combos
            .iter()
            .filter(|combo| rules.iter().all(|rule| rule.matches(combo)))
            .count()
    }

    /// Only keep the combinations that match all the given rules, applying one rule at a time.
    pub fn retain_matching(&mut self, rules: &[Rule]) -> &mut Self {
        for rule in rules {
            self.combos.retain(|combo| rule.matches(combo));
        }
        self
    }
}

impl fmt::Display for ComboSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} combinations:", self.combos.len())?;
        for combo in &self.combos {
            write!(f, "\n{combo}")?;
        }
        Ok(())
    }
}
