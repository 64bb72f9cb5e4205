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
use crate::cooccurrence::CoOccurrence;
use crate::error::MiningError;
use crate::item::Item;
use crate::rule::{rank_rules, RankBy, Rule};
use crate::vec_sets::split_out;
use itertools::Itertools;

// Every split of a sorted itemset into a nonempty proper subset as the
// antecedent and its complement as the consequent; 2^k - 2 of them.
pub fn partitions(itemset: &[Item]) -> Vec<(Vec<Item>, Vec<Item>)> {
    let mut splits = vec![];
    for size in 1..itemset.len() {
        for antecedent in itemset.iter().cloned().combinations(size) {
            let consequent = split_out(itemset, &antecedent);
            splits.push((antecedent, consequent));
        }
    }
    splits
}

/// Derives rules from every frequent itemset of two or more items, ranked
/// by decreasing confidence.
pub fn generate_rules(
    itemsets: &FrequentItemsets,
    config: &MiningConfig,
) -> Result<Vec<Rule>, MiningError> {
    log::info!("Generating association rules...");
    let mut rules: Vec<Rule> = vec![];
    for (itemset, _) in itemsets.sorted().into_iter().filter(|(i, _)| i.len() > 1) {
        for (antecedent, consequent) in partitions(itemset) {
            if let Some(rule) = Rule::make(antecedent, consequent, itemsets, config)? {
                rules.push(rule);
            }
        }
    }
    rank_rules(&mut rules, RankBy::Confidence);
    log::info!("Generated {} rules.", rules.len());
    Ok(rules)
}

/// Derives a rule for each ordered pair of distinct items in the
/// co-occurrence matrix, ranked by decreasing lift. Both directions are
/// kept, since confidence isn't symmetric. Pairs aren't tested against
/// `min_support`; only the matrix's columns are.
pub fn generate_pairwise_rules(co_occurrence: &CoOccurrence, config: &MiningConfig) -> Vec<Rule> {
    log::info!("Generating pairwise rules...");
    let items = co_occurrence.items();
    let num_baskets = co_occurrence.num_baskets();
    let mut rules: Vec<Rule> = vec![];
    for i in 0..items.len() {
        let count_i = co_occurrence.item_count(i);
        if count_i == 0 {
            continue;
        }
        for j in 0..items.len() {
            if i == j {
                continue;
            }
            let joint = co_occurrence.count(i, j);
            if joint == 0 {
                continue;
            }
            if (joint as f64) / (count_i as f64) < config.min_confidence {
                continue;
            }
            let rule = Rule::from_counts(
                vec![items[i]],
                vec![items[j]],
                joint,
                count_i,
                co_occurrence.item_count(j),
                num_baskets,
            );
            if rule.passes_lift(config) {
                rules.push(rule);
            }
        }
    }
    rank_rules(&mut rules, RankBy::Lift);
    log::info!("Generated {} rules.", rules.len());
    rules
}

#[cfg(test)]
mod tests {
    use super::{generate_pairwise_rules, generate_rules, partitions};
    use crate::apriori::{mine_itemsets, FrequentItemsets};
    use crate::config::MiningConfig;
    use crate::cooccurrence::OccurrenceMatrix;
    use crate::item::Item;
    use crate::transaction_builder::BasketSet;
    use fnv::FnvHashSet;
    use proptest::prelude::*;

    fn level_wise(min_support: f64, min_confidence: f64) -> MiningConfig {
        MiningConfig {
            min_support,
            min_confidence,
            ..MiningConfig::level_wise()
        }
    }

    #[test]
    fn test_partitions() {
        let v = |ids: &[u32]| ids.iter().map(|&i| Item::with_id(i)).collect::<Vec<Item>>();
        let splits = partitions(&v(&[1, 2, 3]));
        assert_eq!(splits.len(), 6);
        assert!(splits.contains(&(v(&[1]), v(&[2, 3]))));
        assert!(splits.contains(&(v(&[2]), v(&[1, 3]))));
        assert!(splits.contains(&(v(&[1, 3]), v(&[2]))));
        assert!(partitions(&v(&[1])).is_empty());
        for (a, c) in splits {
            assert_eq!(a.len() + c.len(), 3);
            assert!(a.iter().all(|x| !c.contains(x)));
        }
    }

    #[test]
    fn test_four_basket_rules() {
        let baskets = BasketSet::from_transactions(&[
            vec!["A", "B"],
            vec!["A", "B"],
            vec!["A", "C"],
            vec!["B", "C"],
        ]);
        let config = level_wise(0.5, 0.5);
        let itemsets = mine_itemsets(baskets.baskets(), &config).unwrap();
        let rules = generate_rules(&itemsets, &config).unwrap();
        let itemizer = baskets.itemizer();
        let described: Vec<String> = rules.iter().map(|r| r.describe(itemizer)).collect();
        // Equal confidence, so ordered by antecedent.
        assert_eq!(described, vec!["A => B", "B => A"]);
        for rule in &rules {
            assert!((rule.confidence - 2.0 / 3.0).abs() < 1e-9);
            assert!((rule.support - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_three_item_rules_ranked_by_confidence() {
        let baskets = BasketSet::from_transactions(&[
            vec!["NOISE", "ASSAULT", "LARCENY"],
            vec!["NOISE", "ASSAULT", "LARCENY"],
            vec!["NOISE", "ASSAULT"],
            vec!["NOISE"],
        ]);
        let config = level_wise(0.5, 0.1);
        let itemsets = mine_itemsets(baskets.baskets(), &config).unwrap();
        let rules = generate_rules(&itemsets, &config).unwrap();
        // 3 pairs × 2 + one triple × 6.
        assert_eq!(rules.len(), 12);
        for pair in rules.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        let itemizer = baskets.itemizer();
        let top = &rules[0];
        assert_eq!(top.confidence, 1.0);
        assert_eq!(top.describe(itemizer), "ASSAULT => NOISE");
        assert!(rules
            .iter()
            .any(|r| r.describe(itemizer) == "LARCENY => ASSAULT NOISE"));
        assert_eq!(rules[0].antecedent_labels(itemizer), vec!["ASSAULT"]);
        assert_eq!(rules[0].consequent_labels(itemizer), vec!["NOISE"]);
    }

    #[test]
    fn test_empty_input_gives_no_rules() {
        let config = MiningConfig::level_wise();
        let rules = generate_rules(&FrequentItemsets::new(0), &config).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_pairwise_rules() {
        let baskets =
            BasketSet::from_transactions(&[vec!["X"], vec!["X", "Y"], vec!["Y"]]);
        let matrix = OccurrenceMatrix::build(&baskets, None);
        let co_occurrence = matrix.co_occurrence();
        let config = MiningConfig::pairwise();
        let rules = generate_pairwise_rules(&co_occurrence, &config);
        assert_eq!(rules.len(), 2);
        let itemizer = baskets.itemizer();
        assert_eq!(rules[0].describe(itemizer), "X => Y");
        assert_eq!(rules[1].describe(itemizer), "Y => X");
        for rule in &rules {
            assert!((rule.confidence - 0.5).abs() < 1e-12);
            assert!((rule.lift - 0.75).abs() < 1e-12);
            assert!((rule.support - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_pairwise_independence_has_unit_lift() {
        // X in half the baskets, Y in half, and independently of each other.
        let mut transactions = vec![];
        for _ in 0..25 {
            transactions.push(vec!["X", "Y", "Z"]);
            transactions.push(vec!["X", "Z"]);
            transactions.push(vec!["Y", "Z"]);
            transactions.push(vec!["Z"]);
        }
        let baskets = BasketSet::from_transactions(&transactions);
        let co_occurrence = OccurrenceMatrix::build(&baskets, None).co_occurrence();
        let config = MiningConfig::pairwise();
        let rules = generate_pairwise_rules(&co_occurrence, &config);
        let x = baskets.itemizer().get("X").unwrap();
        let y = baskets.itemizer().get("Y").unwrap();
        let between: Vec<_> = rules
            .iter()
            .filter(|r| !r.antecedent.contains(&baskets.itemizer().get("Z").unwrap()))
            .filter(|r| !r.consequent.contains(&baskets.itemizer().get("Z").unwrap()))
            .collect();
        assert_eq!(between.len(), 2);
        for rule in between {
            assert!(rule.antecedent == vec![x] || rule.antecedent == vec![y]);
            assert!((rule.lift - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_strategies_agree_on_pairs() {
        let baskets = BasketSet::from_transactions(&[
            vec!["a", "b", "c"],
            vec!["a", "b"],
            vec!["b", "c"],
            vec!["a", "c", "d"],
            vec!["b", "d"],
        ]);
        // Every co-occurring pair here meets min_support (1 in 5).
        let mut config = level_wise(0.2, 0.3);
        config.max_length = 2;
        let itemsets = mine_itemsets(baskets.baskets(), &config).unwrap();
        let level_wise_rules = generate_rules(&itemsets, &config).unwrap();
        let co_occurrence = OccurrenceMatrix::build(&baskets, None)
            .retain_frequent(config.min_support)
            .co_occurrence();
        let pairwise_rules = generate_pairwise_rules(&co_occurrence, &config);
        let a: FnvHashSet<_> = level_wise_rules.iter().cloned().collect();
        let b: FnvHashSet<_> = pairwise_rules.iter().cloned().collect();
        assert_eq!(a, b);
        for rule in &level_wise_rules {
            let other = pairwise_rules.iter().find(|r| *r == rule).unwrap();
            assert!((rule.lift - other.lift).abs() < 1e-12);
            assert!((rule.confidence - other.confidence).abs() < 1e-12);
        }
    }

    #[test]
    fn test_pairwise_rules_ignore_pair_support() {
        let baskets = BasketSet::from_transactions(&[
            vec!["X"],
            vec!["X"],
            vec!["Y"],
            vec!["Y"],
            vec!["X", "Y"],
        ]);
        let config = MiningConfig {
            min_support: 0.5,
            min_confidence: 0.01,
            ..MiningConfig::pairwise()
        };
        let matrix = OccurrenceMatrix::build(&baskets, None).retain_frequent(config.min_support);
        assert_eq!(matrix.num_columns(), 2);
        // X and Y each hold 3/5, their pair only 1/5.
        let rules = generate_pairwise_rules(&matrix.co_occurrence(), &config);
        let itemizer = baskets.itemizer();
        let described: Vec<String> = rules.iter().map(|r| r.describe(itemizer)).collect();
        assert_eq!(described, vec!["X => Y", "Y => X"]);
        for rule in &rules {
            assert!((rule.confidence - 1.0 / 3.0).abs() < 1e-12);
            assert!((rule.support - 0.2).abs() < 1e-12);
        }
    }

    #[test]
    fn test_level_wise_independence_has_unit_lift() {
        let mut transactions = vec![];
        for _ in 0..25 {
            transactions.push(vec!["X", "Y", "Z"]);
            transactions.push(vec!["X", "Z"]);
            transactions.push(vec!["Y", "Z"]);
            transactions.push(vec!["Z"]);
        }
        let baskets = BasketSet::from_transactions(&transactions);
        let config = level_wise(0.1, 0.1);
        let itemsets = mine_itemsets(baskets.baskets(), &config).unwrap();
        let rules = generate_rules(&itemsets, &config).unwrap();
        let itemizer = baskets.itemizer();
        let between: Vec<_> = rules
            .iter()
            .filter(|r| {
                let d = r.describe(itemizer);
                d == "X => Y" || d == "Y => X"
            })
            .collect();
        assert_eq!(between.len(), 2);
        for rule in between {
            assert!((rule.lift - 1.0).abs() < 1e-9);
            assert!((rule.confidence - 0.5).abs() < 1e-9);
        }
        // Z is in every basket, so rules into it have unit lift too.
        let into_z = rules
            .iter()
            .find(|r| r.describe(itemizer) == "X Y => Z")
            .unwrap();
        assert!((into_z.lift - 1.0).abs() < 1e-9);
        assert_eq!(into_z.confidence, 1.0);
    }

    fn arb_transactions() -> impl Strategy<Value = Vec<Vec<&'static str>>> {
        prop::collection::vec(
            prop::sample::subsequence(vec!["a", "b", "c", "d", "e"], 1..5),
            1..30,
        )
    }

    proptest! {
        #[test]
        fn prop_partition_count(k in 1usize..8) {
            let itemset: Vec<Item> = (1..=k as u32).map(Item::with_id).collect();
            prop_assert_eq!(partitions(&itemset).len(), (1usize << k) - 2);
        }

        #[test]
        fn prop_rule_metrics_are_bounded(
            transactions in arb_transactions(),
            min_support in 0.05f64..0.5,
            min_confidence in 0.01f64..1.0,
        ) {
            let baskets = BasketSet::from_transactions(&transactions);
            let config = level_wise(min_support, min_confidence);
            let itemsets = mine_itemsets(baskets.baskets(), &config).unwrap();
            let rules = generate_rules(&itemsets, &config).unwrap();
            for rule in &rules {
                let antecedent_support = itemsets.support(&rule.antecedent).unwrap();
                prop_assert!(rule.confidence >= min_confidence);
                prop_assert!(rule.confidence <= 1.0);
                prop_assert!(rule.support <= rule.confidence);
                prop_assert!(rule.support <= antecedent_support);
                prop_assert!(rule.lift > 0.0);
            }
            let again = generate_rules(&itemsets, &config).unwrap();
            prop_assert_eq!(rules.len(), again.len());
            for (a, b) in rules.iter().zip(again.iter()) {
                prop_assert_eq!(a, b);
                prop_assert_eq!(a.confidence, b.confidence);
                prop_assert_eq!(a.lift, b.lift);
            }
        }
    }
}
