// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::apriori::FrequentItemsets;
use crate::config::MiningConfig;
use crate::error::MiningError;
use crate::item::Item;
use crate::itemizer::Itemizer;
use crate::vec_sets::union;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// An association rule `antecedent => consequent`.
///
/// Both sides are sorted and disjoint. `support` is the relative frequency
/// of baskets holding both sides, `confidence` estimates
/// P(consequent | antecedent), and `lift` is confidence over the
/// consequent's own support.
#[derive(Clone, Debug)]
pub struct Rule {
    pub antecedent: Vec<Item>,
    pub consequent: Vec<Item>,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}

impl PartialEq for Rule {
    fn eq(&self, other: &Rule) -> bool {
        self.antecedent == other.antecedent && self.consequent == other.consequent
    }
}

// Can't derive Eq as f64 doesn't satisfy Eq.
impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.antecedent.hash(state);
        self.consequent.hash(state);
    }
}

/// Primary sort key when ranking rules. Both rank in decreasing order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RankBy {
    Confidence,
    Lift,
}

impl Rule {
    // Builds a rule from basket counts of the joint itemset, the
    // antecedent, and the consequent.
    pub fn from_counts(
        antecedent: Vec<Item>,
        consequent: Vec<Item>,
        joint_count: u32,
        antecedent_count: u32,
        consequent_count: u32,
        num_baskets: usize,
    ) -> Rule {
        let n = num_baskets as f64;
        let joint = joint_count as f64;
        let a = antecedent_count as f64;
        let c = consequent_count as f64;
        Rule {
            antecedent,
            consequent,
            support: joint / n,
            confidence: joint / a,
            lift: (joint * n) / (a * c),
        }
    }

    // Creates a new Rule from (antecedent,consequent) if the rule would be
    // above the confidence and lift thresholds. Every side's count must be
    // in the table; a missing one means the table is inconsistent.
    pub fn make(
        antecedent: Vec<Item>,
        consequent: Vec<Item>,
        itemsets: &FrequentItemsets,
        config: &MiningConfig,
    ) -> Result<Option<Rule>, MiningError> {
        if antecedent.is_empty() || consequent.is_empty() {
            return Ok(None);
        }

        let joint: Vec<Item> = union(&antecedent, &consequent);
        let joint_count = lookup(itemsets, joint)?;
        let antecedent_count = lookup(itemsets, antecedent.clone())?;
        if (joint_count as f64) / (antecedent_count as f64) < config.min_confidence {
            return Ok(None);
        }
        let consequent_count = lookup(itemsets, consequent.clone())?;

        let rule = Rule::from_counts(
            antecedent,
            consequent,
            joint_count,
            antecedent_count,
            consequent_count,
            itemsets.num_baskets(),
        );
        if rule.passes_lift(config) {
            Ok(Some(rule))
        } else {
            Ok(None)
        }
    }

    pub fn passes_lift(&self, config: &MiningConfig) -> bool {
        match config.min_lift {
            Some(min_lift) => self.lift >= min_lift,
            None => true,
        }
    }

    pub fn antecedent_labels<'a>(&self, itemizer: &'a Itemizer) -> Vec<&'a str> {
        Item::item_vec_to_labels(&self.antecedent, itemizer)
    }

    pub fn consequent_labels<'a>(&self, itemizer: &'a Itemizer) -> Vec<&'a str> {
        Item::item_vec_to_labels(&self.consequent, itemizer)
    }

    // "a b => c"
    pub fn describe(&self, itemizer: &Itemizer) -> String {
        [
            Item::item_vec_to_string(&self.antecedent, itemizer),
            " => ".to_owned(),
            Item::item_vec_to_string(&self.consequent, itemizer),
        ]
        .join("")
    }
}

fn lookup(itemsets: &FrequentItemsets, itemset: Vec<Item>) -> Result<u32, MiningError> {
    match itemsets.count(&itemset) {
        Some(count) => Ok(count),
        None => Err(MiningError::InconsistentSupport { itemset }),
    }
}

// Ranks rules by decreasing confidence or lift. Ties fall back to the
// antecedent, then the consequent, in lexical order.
pub fn rank_rules(rules: &mut [Rule], by: RankBy) {
    let key = |rule: &Rule| match by {
        RankBy::Confidence => OrderedFloat(rule.confidence),
        RankBy::Lift => OrderedFloat(rule.lift),
    };
    rules.sort_by(|a, b| -> Ordering {
        key(b)
            .cmp(&key(a))
            .then_with(|| a.antecedent.cmp(&b.antecedent))
            .then_with(|| a.consequent.cmp(&b.consequent))
    });
}
