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

use crate::apriori::{mine_itemsets, FrequentItemsets};
use crate::config::{MiningConfig, Strategy};
use crate::cooccurrence::{CoOccurrence, OccurrenceMatrix};
use crate::error::MiningError;
use crate::generate_rules::{generate_pairwise_rules, generate_rules};
use crate::rule::Rule;
use crate::transaction_builder::BasketSet;

/// Frequent patterns found by a mining run, in the form the chosen
/// strategy produces them.
#[derive(Clone, Debug, PartialEq)]
pub enum Frequent {
    Itemsets(FrequentItemsets),
    CoOccurrence(CoOccurrence),
}

impl Frequent {
    pub fn is_empty(&self) -> bool {
        match self {
            Frequent::Itemsets(itemsets) => itemsets.is_empty(),
            Frequent::CoOccurrence(co_occurrence) => co_occurrence.is_empty(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MiningOutcome {
    pub frequent: Frequent,
    pub rules: Vec<Rule>,
}

/// Mines `baskets` with the strategy named in `config`.
///
/// Each call is independent: nothing is kept between runs. An empty basket
/// set, or thresholds nothing meets, give an empty outcome rather than an
/// error.
pub fn mine(baskets: &BasketSet, config: &MiningConfig) -> Result<MiningOutcome, MiningError> {
    config.validate()?;
    if baskets.is_empty() {
        log::warn!("No transactions found for mining.");
    }
    match config.strategy {
        Strategy::LevelWise => {
            let itemsets = mine_itemsets(baskets.baskets(), config)?;
            let rules = generate_rules(&itemsets, config)?;
            Ok(MiningOutcome {
                frequent: Frequent::Itemsets(itemsets),
                rules,
            })
        }
        Strategy::Pairwise => {
            let matrix = OccurrenceMatrix::build(baskets, config.top_n_categories)
                .retain_frequent(config.min_support);
            log::info!(
                "Counting co-occurrence of {} categories over {} baskets...",
                matrix.num_columns(),
                matrix.num_rows()
            );
            let co_occurrence = matrix.co_occurrence();
            let rules = generate_pairwise_rules(&co_occurrence, config);
            Ok(MiningOutcome {
                frequent: Frequent::CoOccurrence(co_occurrence),
                rules,
            })
        }
    }
}
