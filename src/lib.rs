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

//! Association rule mining over emergency call records.
//!
//! Calls are grouped into baskets of incident categories seen in the same
//! precinct during the same hour, then mined either level-wise for
//! itemsets of several categories, or pairwise through a category
//! co-occurrence matrix.

pub mod apriori;
pub mod config;
pub mod cooccurrence;
pub mod error;
pub mod generate_rules;
pub mod incident;
pub mod incident_reader;
pub mod item;
pub mod item_counter;
pub mod itemizer;
pub mod miner;
pub mod rule;
pub mod transaction_builder;
pub mod vec_sets;

pub use crate::config::{MiningConfig, Strategy};
pub use crate::error::MiningError;
pub use crate::incident::IncidentRecord;
pub use crate::incident_reader::IncidentReader;
pub use crate::miner::{mine, Frequent, MiningOutcome};
pub use crate::rule::Rule;
pub use crate::transaction_builder::{BasketKey, BasketSet};
