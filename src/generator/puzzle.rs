/*
puzzle.rs

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

//! Search for a set of rules that leaves exactly one combination.
//!
//! The search starts with every combination of the alphabet.
//! Each iteration tries patterns in a random order and, for each pattern, rule templates in a
//! random weighted order.
//! The first rule that is valid, keeps at least one combination, and removes enough combinations
//! is accepted.
//! The search stops when one combination is left, which is the answer.
//! If no rule can be found, the generation fails: the caller can retry with another seed.

use log::{Level, debug, info, log_enabled};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::iter;
use std::time::Instant;

use super::alphabet::Alphabet;
use super::combo::Combo;
use super::combo_set::ComboSet;
use super::errors::{GeneratorError, Result};
use super::rule_template::{RuleTemplate, default_rule_templates};
use super::rules::{Rule, RuleData};

/// Generator options.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PuzzleOptions {
    /// Maximum proportion of the combinations that may remain after a new rule.
    pub target_reduction_threshold: f64,

    /// Below this number of remaining combinations, any reduction is accepted.
    pub target_reduction_threshold_above: usize,
}

impl Default for PuzzleOptions {
    fn default() -> Self {
        Self {
            target_reduction_threshold: 0.9,
            target_reduction_threshold_above: 10,
        }
    }
}

impl PuzzleOptions {
    /// Verify that the options are in range.
    pub fn validate(&self) -> Result<()> {
        let t: f64 = self.target_reduction_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(GeneratorError::InvalidOption {
                name: "target_reduction_threshold",
                value: t.to_string(),
            });
        }
        Ok(())
    }

    /// Whether going from `pre_matches` to `post_matches` combinations is enough of a reduction.
    pub fn is_acceptable(&self, pre_matches: usize, post_matches: usize) -> bool {
        post_matches < self.target_reduction_threshold_above
            || (post_matches as f64 / pre_matches as f64) <= self.target_reduction_threshold
    }
}

/// Generation status.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PuzzleState {
    /// More than one combination left.
    Searching,

    /// Exactly one combination left.
    Solved,

    /// No acceptable rule could be found.
    Failed,
}

/// Puzzle as exported to the puzzle collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PuzzleData {
    pub answer: Vec<String>,
    pub alphabet: Vec<String>,
    pub length: usize,
    pub rules: Vec<RuleData>,
    pub difficulty: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Compute the difficulty score of a set of rules, rounded to one decimal and at least one.
pub fn difficulty_score(length: usize, alphabet_size: usize, rules: &[Rule]) -> f64 {
    let sum: f64 = rules.iter().map(Rule::difficulty).sum();
    let score: f64 = (length.saturating_sub(1).max(1) as f64 + alphabet_size as f64 / 2.0) * sum;
    ((score / 5.0 * 10.0).round() / 10.0).max(1.0)
}

/// [`Puzzle`] object.
pub struct Puzzle {
    /// Symbols the combinations are made of.
    pub alphabet: Alphabet,

    /// Combination length.
    pub length: usize,

    /// Generator options.
    pub options: PuzzleOptions,

    /// Number of candidate rules evaluated.
    pub iteration: usize,

    /// Duration in seconds of the last generation.
    pub duration: f32,

    /// Seed of the random generator, reported so that a puzzle can be generated again.
    seed: u64,

    rng: StdRng,
    rule_templates: Vec<RuleTemplate>,
    combos: ComboSet,
    rules: Vec<Rule>,
    answer: Vec<Combo>,
    state: PuzzleState,
}

impl Puzzle {
    /// Create a [`Puzzle`] object with the default rule templates.
    ///
    /// If `seed` is `None`, then a random seed is drawn. Use [`Puzzle::seed`] to retrieve it.
    ///
    /// # Errors
    ///
    /// The method returns an error if the options are out of range, or if the combinations
    /// cannot be enumerated.
    pub fn new(
        alphabet: Alphabet,
        length: usize,
        options: PuzzleOptions,
        seed: Option<u64>,
    ) -> Result<Self> {
        options.validate()?;
        let seed: u64 = seed.unwrap_or_else(|| rand::rng().random());
        info!("Seed: {seed}");

        let combos: ComboSet = ComboSet::new(&alphabet, length)?;
        let rule_templates: Vec<RuleTemplate> =
            default_rule_templates(length, alphabet.is_numeric());
        let state: PuzzleState = if combos.len() > 1 {
            PuzzleState::Searching
        } else {
            PuzzleState::Solved
        };
        let answer: Vec<Combo> = if state == PuzzleState::Solved {
            combos.combos().to_vec()
        } else {
            Vec::new()
        };

        Ok(Self {
            alphabet,
            length,
            options,
            iteration: 0,
            duration: 0.0,
            seed,
            rng: StdRng::seed_from_u64(seed),
            rule_templates,
            combos,
            rules: Vec::new(),
            answer,
            state,
        })
    }

    /// Replace the default rule templates.
    pub fn with_rule_templates(mut self, rule_templates: Vec<RuleTemplate>) -> Self {
        self.rule_templates = rule_templates;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> PuzzleState {
        self.state
    }

    /// Accepted rules, in the order they were found.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Combinations that satisfy all the rules. Only one once the puzzle is solved.
    pub fn answer(&self) -> &[Combo] {
        &self.answer
    }

    pub fn rule_templates(&self) -> &[RuleTemplate] {
        &self.rule_templates
    }

    /// All the combinations the search started from.
    pub fn combos(&self) -> &ComboSet {
        &self.combos
    }

    /// Add rules until one combination is left.
    ///
    /// Calling the method on a solved puzzle does nothing.
    ///
    /// # Errors
    ///
    /// The method returns [`GeneratorError::NoCandidate`] if no acceptable rule exists for the
    /// remaining combinations. The puzzle is then in the [`PuzzleState::Failed`] state.
    pub fn generate(&mut self) -> Result<()> {
        if self.state == PuzzleState::Solved {
            return Ok(());
        }
        let start: Instant = Instant::now();
        self.iteration = 0;

        let mut remaining: Vec<Combo> = self
            .combos
            .filter_by(&self.rules)
            .into_iter()
            .cloned()
            .collect();
        info!("Starting combos: {}", remaining.len());

        while remaining.len() > 1 {
            let rule: Rule = match self.valid_candidate_rule(&remaining) {
                Ok(r) => r,
                Err(e) => {
                    self.state = PuzzleState::Failed;
                    self.duration = start.elapsed().as_secs_f32();
                    return Err(e);
                }
            };
            remaining.retain(|combo| rule.matches(combo));
            info!(" ({:6})   {rule}", remaining.len());
            self.rules.push(rule);
        }

        self.answer = remaining;
        self.state = PuzzleState::Solved;
        self.duration = start.elapsed().as_secs_f32();
        debug!(
            "Iterations = {}  Duration = {}",
            self.iteration, self.duration
        );
        if let Some(answer) = self.answer.first() {
            info!(
                "Answer: {answer} | Difficulty: {} | Digits Used: {}",
                self.difficulty(),
                answer.distinct_count()
            );
        }
        Ok(())
    }

    /// Find a rule that reduces the remaining combinations enough.
    fn valid_candidate_rule(&mut self, remaining: &[Combo]) -> Result<Rule> {
        let pre_matches: usize = remaining.len();

        // Each available template appears `weight` times, so that heavier templates are more
        // likely to come first once shuffled
        let pool: Vec<usize> = self
            .rule_templates
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_available())
            .flat_map(|(i, t)| iter::repeat_n(i, t.weight))
            .collect();
        if log_enabled!(Level::Debug) {
            debug!("Remaining combos = {pre_matches}  Template pool size = {}", pool.len());
        }

        // Patterns come from all the combinations, not only the remaining ones
        let patterns: Vec<&Combo> = self.combos.shuffled(&mut self.rng);
        let mut tried: Vec<bool> = vec![false; self.rule_templates.len()];

        for pattern in patterns {
            let mut order: Vec<usize> = pool.clone();
            order.shuffle(&mut self.rng);
            tried.fill(false);

            for i in order {
                // Same template and pattern, same outcome
                if tried[i] {
                    continue;
                }
                tried[i] = true;
                self.iteration += 1;

                let candidate: Rule = self.rule_templates[i].instantiate(pattern);
                if !candidate.is_valid() {
                    continue;
                }
                let post_matches: usize = remaining.iter().filter(|c| candidate.matches(c)).count();
                if post_matches == 0 || post_matches == pre_matches {
                    continue;
                }
                if !self.options.is_acceptable(pre_matches, post_matches) {
                    debug!("    Rejected ({post_matches}/{pre_matches}): {candidate}");
                    continue;
                }

                self.rule_templates[i].mark_used();
                return Ok(candidate);
            }
        }

        Err(GeneratorError::NoCandidate {
            remaining: pre_matches,
            rules: self.rules.iter().map(|r| r.to_string()).collect(),
        })
    }

    /// Difficulty score of the accepted rules.
    pub fn difficulty(&self) -> f64 {
        difficulty_score(self.length, self.alphabet.len(), &self.rules)
    }

    /// Export the puzzle. The rules are given in a random order, which only depends on the seed.
    pub fn data(&self) -> PuzzleData {
        let mut rules: Vec<RuleData> = self.rules.iter().map(Rule::data).collect();
        // Separate stream from the search, so that every export gives the same order
        let mut rng: StdRng = StdRng::seed_from_u64(self.seed.wrapping_add(1));
        rules.shuffle(&mut rng);
        PuzzleData {
            answer: self.answer.iter().map(|c| c.to_string()).collect(),
            alphabet: self.alphabet.to_strings(),
            length: self.length,
            rules,
            difficulty: self.difficulty(),
            title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::rules::RuleKind;

    fn alphabet(symbols: &str) -> Alphabet {
        Alphabet::new(symbols.chars().collect()).unwrap()
    }

    fn generate(symbols: &str, length: usize, seed: u64) -> (Puzzle, Result<()>) {
        let mut puzzle =
            Puzzle::new(alphabet(symbols), length, PuzzleOptions::default(), Some(seed)).unwrap();
        let res = puzzle.generate();
        (puzzle, res)
    }

    /// Verify that exactly one combination is left, narrowed down at every step by valid rules.
    fn check_solved(puzzle: &Puzzle) {
        assert_eq!(PuzzleState::Solved, puzzle.state());
        assert_eq!(1, puzzle.answer().len());
        assert!(!puzzle.rules().is_empty());
        let mut previous: usize = puzzle.combos().len();
        for i in 1..=puzzle.rules().len() {
            let count = puzzle.combos().count_matching(&puzzle.rules()[..i]);
            assert!(count >= 1 && count < previous, "seed {}, rule {i}", puzzle.seed());
            previous = count;
        }
        assert_eq!(1, previous);
        assert!(puzzle.rules().iter().all(Rule::is_valid));
        let found = puzzle.combos().filter_by(puzzle.rules());
        assert_eq!(vec![&puzzle.answer()[0]], found);
        assert!(puzzle.difficulty() >= 1.0);
    }

    #[test]
    fn test_convergence_decimal() {
        for seed in 0..6 {
            let (puzzle, res) = generate("0123456789", 3, seed);
            assert_eq!(Ok(()), res, "seed {seed}");
            check_solved(&puzzle);
        }
    }

    #[test]
    fn test_convergence_small() {
        for (symbols, length) in [("012", 2), ("12345", 4), ("ABCD", 3), ("0123456789", 1)] {
            let mut solved: usize = 0;
            for seed in 0..10 {
                let (puzzle, res) = generate(symbols, length, seed);
                match res {
                    Ok(()) => {
                        check_solved(&puzzle);
                        solved += 1;
                    }
                    Err(GeneratorError::NoCandidate { remaining, .. }) => {
                        assert_eq!(PuzzleState::Failed, puzzle.state());
                        assert!(remaining > 1);
                    }
                    Err(e) => panic!("unexpected error {e}"),
                }
            }
            assert!(solved >= 5, "{symbols}/{length}: only {solved} of 10 seeds solved");
        }
    }

    #[test]
    fn test_determinism() {
        let (a, res_a) = generate("0123456789", 3, 0);
        let (b, res_b) = generate("0123456789", 3, 0);
        assert_eq!(Ok(()), res_a);
        assert_eq!(res_a, res_b);
        assert_eq!(a.rules(), b.rules());
        assert_eq!(a.answer(), b.answer());
        assert_eq!(a.difficulty(), b.difficulty());
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn test_random_seed_is_reported() {
        let mut a = Puzzle::new(alphabet("01234"), 3, PuzzleOptions::default(), None).unwrap();
        let mut b =
            Puzzle::new(alphabet("01234"), 3, PuzzleOptions::default(), Some(a.seed())).unwrap();
        assert_eq!(a.generate(), b.generate());
        assert_eq!(a.rules(), b.rules());
    }

    #[test]
    fn test_single_combination() {
        let (puzzle, res) = generate("7", 2, 1);
        assert_eq!(Ok(()), res);
        assert_eq!(PuzzleState::Solved, puzzle.state());
        assert!(puzzle.rules().is_empty());
        assert_eq!("77", puzzle.answer()[0].to_string());
        assert_eq!(1.0, puzzle.difficulty());
    }

    #[test]
    fn test_search_exhaustion() {
        let templates = vec![RuleTemplate::new(RuleKind::DiffDigits)];
        let mut puzzle = Puzzle::new(alphabet("01"), 2, PuzzleOptions::default(), Some(5))
            .unwrap()
            .with_rule_templates(templates);
        match puzzle.generate() {
            Err(GeneratorError::NoCandidate { remaining, rules }) => {
                assert_eq!(2, remaining);
                assert_eq!(1, rules.len());
                assert!(rules[0].contains("DiffDigitsRule"));
            }
            other => panic!("unexpected result {other:?}"),
        }
        assert_eq!(PuzzleState::Failed, puzzle.state());
        assert_eq!(1, puzzle.rule_templates()[0].used_count);
    }

    #[test]
    fn test_acceptance() {
        let options = PuzzleOptions::default();
        // One bull against "01" keeps 4 of the 9 two-digit combinations over {0, 1, 2}
        assert!(options.is_acceptable(9, 4));
        assert!(options.is_acceptable(12, 9));
        assert!(options.is_acceptable(20, 18));
        assert!(!options.is_acceptable(20, 19));
        assert!(!options.is_acceptable(1000, 950));

        let strict = PuzzleOptions {
            target_reduction_threshold: 0.5,
            target_reduction_threshold_above: 0,
        };
        assert!(!strict.is_acceptable(9, 5));
        assert!(strict.is_acceptable(9, 4));
    }

    #[test]
    fn test_invalid_options() {
        for t in [0.0, -0.5, 1.5, f64::NAN] {
            let options = PuzzleOptions {
                target_reduction_threshold: t,
                ..Default::default()
            };
            assert!(matches!(
                Puzzle::new(Alphabet::default(), 3, options, Some(1)),
                Err(GeneratorError::InvalidOption { .. })
            ));
        }
        let options: PuzzleOptions =
            serde_json::from_str(r#"{"target_reduction_threshold": 0.7}"#).unwrap();
        assert_eq!(10, options.target_reduction_threshold_above);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_difficulty_formula() {
        let rule = Rule::bulls_cows(Combo::from("123"), 1, "cows").unwrap();
        assert_eq!(1.4, difficulty_score(3, 10, &[rule.clone()]));
        assert_eq!(1.0, difficulty_score(3, 10, &[]));
        // (max(1, 0) + 1) * 2 = 4, which rounds to 0.8 before the floor
        assert_eq!(1.0, difficulty_score(1, 2, &[rule.clone(), rule]));
    }

    #[test]
    fn test_data() {
        let (puzzle, res) = generate("0123456789", 3, 3);
        assert_eq!(Ok(()), res);
        check_solved(&puzzle);
        let data = puzzle.data();
        // The export order only depends on the seed
        assert_eq!(data, puzzle.data());
        assert_eq!(puzzle.rules().len(), data.rules.len());
        assert_eq!(vec![puzzle.answer()[0].to_string()], data.answer);
        assert_eq!(10, data.alphabet.len());
        assert_eq!(3, data.length);
        for r in &data.rules {
            let has_pattern = r.class_name == "BullsCowsRule" || r.class_name == "NoBullsCowsRule";
            assert_eq!(has_pattern, r.pattern.is_some());
        }
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("title").is_none());
        assert_eq!(data.difficulty, json["difficulty"].as_f64().unwrap());
    }
}
