/*
rule_template.rs

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

//! Rule prototypes the generator draws from.

use super::combo::Combo;
use super::rules::{Rule, RuleKind};

/// [`RuleTemplate`] object.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTemplate {
    /// Kind of rule the template produces.
    pub kind: RuleKind,

    /// Relative selection weight, one or more. [`RuleTemplate::weight`] raises zero to one, so
    /// every template stays selectable until its limit is reached.
    pub weight: usize,

    /// Maximum number of rules the template can produce in a puzzle. No limit if `None`.
    pub limit: Option<usize>,

    /// Number of rules the template produced so far.
    pub used_count: usize,
}

impl RuleTemplate {
    /// Create a [`RuleTemplate`] object with a weight of one and no limit.
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            weight: 1,
            limit: None,
            used_count: 0,
        }
    }

    /// Set the selection weight. A weight of zero is raised to one: use [`RuleTemplate::limit`]
    /// with zero to disable a template.
    pub fn weight(mut self, weight: usize) -> Self {
        self.weight = weight.max(1);
        self
    }

    /// Set the usage limit.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether the template can still produce rules.
    pub fn is_available(&self) -> bool {
        self.limit.is_none_or(|limit| self.used_count < limit)
    }

    /// Build a rule from the template for the given pattern.
    pub fn instantiate(&self, pattern: &Combo) -> Rule {
        self.kind.with_pattern(pattern.clone())
    }

    /// Record that a rule from this template has been accepted.
    pub fn mark_used(&mut self) {
        self.used_count += 1;
    }
}

/// Build the templates used when the caller does not provide any.
///
/// The set depends on the combination length, and the digit-only rules are only added when every
/// alphabet symbol is a digit.
pub fn default_rule_templates(length: usize, numeric: bool) -> Vec<RuleTemplate> {
    let mut templates: Vec<RuleTemplate> = vec![
        RuleTemplate::new(RuleKind::BullsCows { bulls: 0, cows: 1 }).weight(12),
        RuleTemplate::new(RuleKind::NoBullsCows)
            .weight(4)
            .limit(if length > 4 { 2 } else { length.saturating_sub(2) }),
        RuleTemplate::new(RuleKind::DiffDigits)
            .weight(2 + length)
            .limit(1),
    ];
    if numeric {
        templates.push(RuleTemplate::new(RuleKind::SumOfDigits).limit(1));
        templates.push(RuleTemplate::new(RuleKind::ParityCountComparison).limit(1));
        templates.push(RuleTemplate::new(RuleKind::Staircase).limit(1));
    }
    if length > 2 {
        let limit: usize = if length == 3 { 2 } else { 1 };
        for i in 0..length - 2 {
            templates.push(
                RuleTemplate::new(RuleKind::BullsCows {
                    bulls: i + 1,
                    cows: 0,
                })
                .weight(4)
                .limit(limit),
            );
            templates.push(
                RuleTemplate::new(RuleKind::BullsCows {
                    bulls: 0,
                    cows: i + 1,
                })
                .weight(8)
                .limit(limit),
            );
        }
    }
    for i in 0..length.saturating_sub(1) {
        templates.push(
            RuleTemplate::new(RuleKind::BullsCows {
                bulls: 0,
                cows: i + 1,
            })
            .weight(4)
            .limit(1),
        );
    }
    templates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits() {
        let mut t = RuleTemplate::new(RuleKind::DiffDigits).limit(1);
        assert!(t.is_available());
        t.mark_used();
        assert!(!t.is_available());

        let mut t = RuleTemplate::new(RuleKind::DiffDigits);
        for _ in 0..100 {
            t.mark_used();
        }
        assert!(t.is_available());
        assert!(!RuleTemplate::new(RuleKind::NoBullsCows).limit(0).is_available());
        assert_eq!(1, RuleTemplate::new(RuleKind::NoBullsCows).weight(0).weight);
    }

    #[test]
    fn test_instantiate() {
        let t = RuleTemplate::new(RuleKind::SumOfDigits);
        let rule = t.instantiate(&Combo::from("123"));
        assert_eq!(RuleKind::SumOfDigits, rule.kind());
        assert_eq!("123", rule.pattern().to_string());
    }

    #[test]
    fn test_default_templates_length_3() {
        let templates = default_rule_templates(3, true);
        // 3 base, 3 digit-only, 2 for i = 0, 2 extra cows
        assert_eq!(10, templates.len());
        assert_eq!(RuleKind::BullsCows { bulls: 0, cows: 1 }, templates[0].kind);
        assert_eq!(12, templates[0].weight);
        assert_eq!(None, templates[0].limit);
        assert_eq!(Some(1), templates[1].limit);
        assert_eq!(5, templates[2].weight);
        assert_eq!(
            RuleTemplate::new(RuleKind::BullsCows { bulls: 1, cows: 0 })
                .weight(4)
                .limit(2),
            templates[6]
        );
        assert_eq!(
            RuleTemplate::new(RuleKind::BullsCows { bulls: 0, cows: 2 })
                .weight(4)
                .limit(1),
            templates[9]
        );
    }

    #[test]
    fn test_default_templates_letters() {
        let templates = default_rule_templates(5, false);
        // 3 base, 6 for i in 0..3, 4 extra cows
        assert_eq!(13, templates.len());
        assert_eq!(Some(2), templates[1].limit);
        assert!(
            templates
                .iter()
                .all(|t| !matches!(t.kind, RuleKind::SumOfDigits | RuleKind::Staircase))
        );
        assert_eq!(Some(0), default_rule_templates(2, false)[1].limit);
    }
}
