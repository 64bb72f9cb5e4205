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

use crate::item::Item;
use thiserror::Error;

/// Errors that terminate a mining run.
///
/// Thresholds that exclude everything, and empty input, are not errors;
/// they produce empty results.
#[derive(Debug, Error)]
pub enum MiningError {
    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An itemset needed during rule generation has no count in the
    /// frequent itemset table. Indicates a counting bug upstream.
    #[error("Itemset {itemset:?} is missing from the frequent itemset table")]
    InconsistentSupport { itemset: Vec<Item> },

    /// A level produced more candidates than the configured bound.
    #[error("Level {level} generated {candidates} candidates, more than the limit of {limit}")]
    CandidateLimitExceeded {
        level: usize,
        candidates: usize,
        limit: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
