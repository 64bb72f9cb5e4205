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

use crate::error::MiningError;
use std::fmt;
use std::str::FromStr;

/// Which frequent itemset algorithm a mining run uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Level-wise candidate generation. Finds itemsets up to `max_length`
    /// items and rules with multi-item antecedents and consequents.
    LevelWise,
    /// Co-occurrence matrix over the basket × category matrix. Pairwise
    /// rules only, suited to low thresholds over many categories.
    Pairwise,
}

impl FromStr for Strategy {
    type Err = MiningError;

    fn from_str(s: &str) -> Result<Strategy, MiningError> {
        match s {
            "level-wise" | "levelwise" | "apriori" => Ok(Strategy::LevelWise),
            "pairwise" | "matrix" => Ok(Strategy::Pairwise),
            _ => Err(MiningError::InvalidConfig(format!(
                "unknown strategy '{}', expected 'level-wise' or 'pairwise'",
                s
            ))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strategy::LevelWise => write!(f, "level-wise"),
            Strategy::Pairwise => write!(f, "pairwise"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MiningConfig {
    pub strategy: Strategy,
    /// Minimum relative support, in (0,1].
    pub min_support: f64,
    /// Minimum rule confidence, in (0,1].
    pub min_confidence: f64,
    /// Rules with lift below this are discarded. `None` keeps all lifts.
    pub min_lift: Option<f64>,
    /// Largest itemset the level-wise strategy searches for. At least 2.
    pub max_length: usize,
    /// Pairwise strategy only: keep just the N most frequent categories as
    /// matrix columns, dropping the rest before mining. Bounds matrix width
    /// and memory. Categories outside the top N never appear in any rule,
    /// so a rare category that would otherwise pass `min_support` at a low
    /// threshold is silently lost. `None` keeps every category.
    pub top_n_categories: Option<usize>,
    /// Level-wise strategy only: abort the run if any level generates more
    /// candidates than this. `None` is unbounded.
    pub max_candidates: Option<usize>,
}

impl MiningConfig {
    /// Strong, short, high confidence rules.
    pub fn level_wise() -> MiningConfig {
        MiningConfig {
            strategy: Strategy::LevelWise,
            min_support: 0.01,
            min_confidence: 0.5,
            min_lift: None,
            max_length: 4,
            top_n_categories: None,
            max_candidates: None,
        }
    }

    /// Exploratory pairwise mining at low thresholds.
    pub fn pairwise() -> MiningConfig {
        MiningConfig {
            strategy: Strategy::Pairwise,
            min_support: 0.001,
            min_confidence: 0.01,
            min_lift: None,
            max_length: 2,
            top_n_categories: Some(50),
            max_candidates: None,
        }
    }

    pub fn for_strategy(strategy: Strategy) -> MiningConfig {
        match strategy {
            Strategy::LevelWise => MiningConfig::level_wise(),
            Strategy::Pairwise => MiningConfig::pairwise(),
        }
    }

    pub fn validate(&self) -> Result<(), MiningError> {
        if !(self.min_support > 0.0 && self.min_support <= 1.0) {
            return Err(MiningError::InvalidConfig(format!(
                "min_support must be in range (0,1], got {}",
                self.min_support
            )));
        }
        if !(self.min_confidence > 0.0 && self.min_confidence <= 1.0) {
            return Err(MiningError::InvalidConfig(format!(
                "min_confidence must be in range (0,1], got {}",
                self.min_confidence
            )));
        }
        if let Some(min_lift) = self.min_lift {
            if !(min_lift >= 0.0) {
                return Err(MiningError::InvalidConfig(format!(
                    "min_lift must be non-negative, got {}",
                    min_lift
                )));
            }
        }
        if self.max_length < 2 {
            return Err(MiningError::InvalidConfig(format!(
                "max_length must be at least 2, got {}",
                self.max_length
            )));
        }
        if self.top_n_categories == Some(0) {
            return Err(MiningError::InvalidConfig(
                "top_n_categories must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for MiningConfig {
    fn default() -> MiningConfig {
        MiningConfig::level_wise()
    }
}

// Relative support test, done in floating point against the basket count
// rather than by rounding min_support to a count.
pub fn meets_support(count: u32, num_baskets: usize, min_support: f64) -> bool {
    num_baskets > 0 && (count as f64) / (num_baskets as f64) >= min_support
}
