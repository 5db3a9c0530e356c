/*
generator.rs

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

//! Generate combination lock puzzles.
//!
//! A puzzle is a list of clues, or rules, that together leave exactly one combination out of all
//! the combinations of a given length over an [`alphabet::Alphabet`].
//!
//! * The [`combo_set::ComboSet`] object holds the combinations and filters them by rules.
//! * The [`rules::Rule`] objects are the clues. Each is a [`rules::RuleKind`] bound to a pattern.
//! * The [`rule_template::RuleTemplate`] objects are the rule prototypes the generator draws from,
//!   with a selection weight and an optional usage limit.
//! * The [`puzzle::Puzzle`] object runs the search. Use its [`puzzle::Puzzle::generate`] method,
//!   and then [`puzzle::Puzzle::data`] to export the result.
//!
//! The search uses its own seeded random generator, so that a puzzle can be generated again from
//! its seed.

pub mod alphabet;
pub mod combo;
pub mod combo_set;
pub mod errors;
pub mod puzzle;
pub mod rule_template;
pub mod rules;
