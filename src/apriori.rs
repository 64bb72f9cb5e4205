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

use crate::config::{meets_support, MiningConfig};
use crate::error::MiningError;
use crate::item::Item;
use crate::item_counter::ItemCounter;
use crate::vec_sets::is_subset;
use fnv::{FnvHashMap, FnvHashSet};
use itertools::Itertools;
use rayon::prelude::*;

/// Frequent itemsets and the number of baskets each occurs in.
///
/// Keys are sorted item vectors. Counts are absolute; relative support is
/// derived from the basket count on demand.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrequentItemsets {
    counts: FnvHashMap<Vec<Item>, u32>,
    num_baskets: usize,
}

impl FrequentItemsets {
    pub fn new(num_baskets: usize) -> FrequentItemsets {
        FrequentItemsets {
            counts: FnvHashMap::default(),
            num_baskets,
        }
    }

    pub fn insert(&mut self, itemset: Vec<Item>, count: u32) {
        debug_assert!(itemset.windows(2).all(|w| w[0] < w[1]));
        self.counts.insert(itemset, count);
    }

    pub fn count(&self, itemset: &[Item]) -> Option<u32> {
        self.counts.get(itemset).cloned()
    }

    pub fn support(&self, itemset: &[Item]) -> Option<f64> {
        self.count(itemset)
            .map(|count| count as f64 / self.num_baskets as f64)
    }

    pub fn contains(&self, itemset: &[Item]) -> bool {
        self.counts.contains_key(itemset)
    }

    pub fn num_baskets(&self) -> usize {
        self.num_baskets
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    // Itemsets with their counts, shortest first, then in lexical order.
    pub fn sorted(&self) -> Vec<(&[Item], u32)> {
        self.counts
            .iter()
            .map(|(itemset, &count)| (itemset.as_slice(), count))
            .sorted_by(|a, b| a.0.len().cmp(&b.0.len()).then_with(|| a.0.cmp(b.0)))
            .collect()
    }

    pub fn of_length(&self, length: usize) -> Vec<&[Item]> {
        self.counts
            .keys()
            .filter(|itemset| itemset.len() == length)
            .map(|itemset| itemset.as_slice())
            .sorted()
            .collect()
    }
}

// Joins pairs of sorted (k-1)-itemsets sharing their first k-2 items, then
// drops any candidate with a (k-1)-subset that isn't in `previous`.
pub fn generate_candidates(previous: &[&[Item]]) -> Vec<Vec<Item>> {
    let mut previous = previous.to_vec();
    previous.sort();
    let frequent: FnvHashSet<&[Item]> = previous.iter().cloned().collect();
    let mut candidates: Vec<Vec<Item>> = vec![];
    for i in 0..previous.len() {
        let a = previous[i];
        let prefix_len = a.len() - 1;
        for b in previous.iter().skip(i + 1) {
            // Sorted input keeps shared prefixes adjacent.
            if a[..prefix_len] != b[..prefix_len] {
                break;
            }
            let mut candidate = a.to_vec();
            candidate.push(b[prefix_len]);
            if all_subsets_frequent(&candidate, &frequent) {
                candidates.push(candidate);
            }
        }
    }
    candidates
}

fn all_subsets_frequent(candidate: &[Item], frequent: &FnvHashSet<&[Item]>) -> bool {
    // The two subsets formed by dropping either of the last two items are
    // the join's parents, so only the others need checking.
    let mut subset: Vec<Item> = Vec::with_capacity(candidate.len() - 1);
    for skip in 0..candidate.len().saturating_sub(2) {
        subset.clear();
        subset.extend(
            candidate
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, &item)| item),
        );
        if !frequent.contains(subset.as_slice()) {
            return false;
        }
    }
    true
}

// Counts how many baskets contain each candidate, splitting the baskets
// across threads.
pub fn count_candidates(candidates: &[Vec<Item>], baskets: &[Vec<Item>]) -> Vec<u32> {
    baskets
        .par_iter()
        .fold(
            || vec![0u32; candidates.len()],
            |mut counts, basket| {
                for (count, candidate) in counts.iter_mut().zip(candidates) {
                    if is_subset(candidate, basket) {
                        *count += 1;
                    }
                }
                counts
            },
        )
        .reduce(
            || vec![0u32; candidates.len()],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b) {
                    *x += y;
                }
                a
            },
        )
}

/// Level-wise frequent itemset search up to `config.max_length` items.
pub fn mine_itemsets(
    baskets: &[Vec<Item>],
    config: &MiningConfig,
) -> Result<FrequentItemsets, MiningError> {
    let num_baskets = baskets.len();
    let mut itemsets = FrequentItemsets::new(num_baskets);
    if num_baskets == 0 {
        log::debug!("No baskets to mine");
        return Ok(itemsets);
    }
    log::info!("Mining {} baskets...", num_baskets);

    let item_count = ItemCounter::from_baskets(baskets);
    let mut level: Vec<Vec<Item>> = item_count
        .items_with_count_at_least(1)
        .into_iter()
        .filter(|item| meets_support(item_count.get(item), num_baskets, config.min_support))
        .map(|item| vec![item])
        .collect();
    for itemset in &level {
        itemsets.insert(itemset.clone(), item_count.get(&itemset[0]));
    }
    log::debug!("Found {} frequent 1-itemsets", level.len());

    let mut k = 2;
    while !level.is_empty() && k <= config.max_length {
        let previous: Vec<&[Item]> = level.iter().map(|v| v.as_slice()).collect();
        let candidates = generate_candidates(&previous);
        log::debug!("Generated {} candidates for k={}", candidates.len(), k);
        if let Some(limit) = config.max_candidates {
            if candidates.len() > limit {
                return Err(MiningError::CandidateLimitExceeded {
                    level: k,
                    candidates: candidates.len(),
                    limit,
                });
            }
        }
        if candidates.is_empty() {
            break;
        }

        let counts = count_candidates(&candidates, baskets);
        level = candidates
            .into_iter()
            .zip(counts)
            .filter(|&(_, count)| meets_support(count, num_baskets, config.min_support))
            .map(|(candidate, count)| {
                itemsets.insert(candidate.clone(), count);
                candidate
            })
            .collect();
        log::debug!("Found {} frequent {}-itemsets", level.len(), k);
        k += 1;
    }

    log::info!("Found {} frequent itemsets.", itemsets.len());
    Ok(itemsets)
}
