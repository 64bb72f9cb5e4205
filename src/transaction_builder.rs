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

use crate::incident::IncidentRecord;
use crate::item::Item;
use crate::itemizer::Itemizer;
use crate::vec_sets::dedupe_sorted;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Identity of a basket: incidents in the same precinct, on the same date,
/// within the same hour.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BasketKey {
    pub date: NaiveDate,
    pub hour: u32,
    pub precinct: String,
}

/// The transactions for one mining run.
///
/// Each basket is a sorted, duplicate free list of items. Items are
/// numbered in lexical label order, and baskets built from records are
/// stored in key order, so the same records in any order produce the same
/// basket set.
#[derive(Clone, Debug)]
pub struct BasketSet {
    keys: Vec<BasketKey>,
    baskets: Vec<Vec<Item>>,
    itemizer: Itemizer,
    num_records: usize,
    skipped_records: usize,
}

impl BasketSet {
    pub fn build<I>(records: I) -> BasketSet
    where
        I: IntoIterator<Item = IncidentRecord>,
    {
        let mut itemizer = Itemizer::new();
        let mut grouped: BTreeMap<BasketKey, Vec<Item>> = BTreeMap::new();
        let mut num_records = 0;
        let mut skipped_records = 0;

        for record in records {
            let hour = match record.hour() {
                Some(hour) => hour,
                None => {
                    log::debug!(
                        "Dropping record with unparseable time '{}' on {} in precinct {}",
                        record.time,
                        record.date,
                        record.precinct
                    );
                    skipped_records += 1;
                    continue;
                }
            };
            num_records += 1;
            let item = itemizer.id_of(&record.category);
            let key = BasketKey {
                date: record.date,
                hour,
                precinct: record.precinct,
            };
            grouped.entry(key).or_insert_with(Vec::new).push(item);
        }

        let remap = itemizer.reorder_sorted();
        let mut keys = Vec::with_capacity(grouped.len());
        let mut baskets = Vec::with_capacity(grouped.len());
        for (key, items) in grouped {
            keys.push(key);
            baskets.push(normalize(items.iter().map(|item| remap[item.as_index()])));
        }

        if skipped_records > 0 {
            log::info!(
                "Dropped {} of {} records with an unparseable time",
                skipped_records,
                num_records + skipped_records
            );
        }

        BasketSet {
            keys,
            baskets,
            itemizer,
            num_records,
            skipped_records,
        }
    }

    // Builds baskets straight from lists of labels, without keys.
    pub fn from_transactions<T, S>(transactions: &[T]) -> BasketSet
    where
        T: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut itemizer = Itemizer::new();
        let raw: Vec<Vec<Item>> = transactions
            .iter()
            .map(|t| t.as_ref().iter().map(|s| itemizer.id_of(s.as_ref())).collect())
            .collect();
        let remap = itemizer.reorder_sorted();
        let baskets = raw
            .into_iter()
            .map(|items| normalize(items.iter().map(|item| remap[item.as_index()])))
            .collect();
        BasketSet {
            keys: vec![],
            baskets,
            itemizer,
            num_records: 0,
            skipped_records: 0,
        }
    }

    pub fn baskets(&self) -> &[Vec<Item>] {
        &self.baskets
    }

    // Empty for basket sets built with `from_transactions`.
    pub fn keys(&self) -> &[BasketKey] {
        &self.keys
    }

    pub fn itemizer(&self) -> &Itemizer {
        &self.itemizer
    }

    pub fn len(&self) -> usize {
        self.baskets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baskets.is_empty()
    }

    pub fn num_records(&self) -> usize {
        self.num_records
    }

    pub fn skipped_records(&self) -> usize {
        self.skipped_records
    }

    // The labels in a basket, in lexical order.
    pub fn labels(&self, index: usize) -> Vec<&str> {
        Item::item_vec_to_labels(&self.baskets[index], &self.itemizer)
    }
}

fn normalize<I: Iterator<Item = Item>>(items: I) -> Vec<Item> {
    let mut basket: Vec<Item> = items.collect();
    basket.sort();
    dedupe_sorted(&mut basket);
    basket
}

#[cfg(test)]
mod tests {
    use super::BasketSet;
    use crate::incident::IncidentRecord;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn record(day: u32, time: &str, precinct: &str, category: &str) -> IncidentRecord {
        let date = NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
        IncidentRecord::new(date, time, precinct, category)
    }

    #[test]
    fn test_groups_by_date_hour_precinct() {
        let records = vec![
            record(1, "10:05:00", "14", "NOISE"),
            record(1, "10:55:00", "14", "ASSAULT"),
            record(1, "10:59:59", "14", "NOISE"),
            record(1, "11:00:00", "14", "NOISE"),
            record(1, "10:15:00", "75", "LARCENY"),
            record(2, "10:15:00", "14", "NOISE"),
        ];
        let baskets = BasketSet::build(records);
        assert_eq!(baskets.len(), 4);
        assert_eq!(baskets.num_records(), 6);
        assert_eq!(baskets.skipped_records(), 0);
        assert_eq!(baskets.labels(0), vec!["ASSAULT", "NOISE"]);
        assert_eq!(baskets.keys()[0].hour, 10);
        assert_eq!(baskets.keys()[0].precinct, "14");
        assert_eq!(baskets.labels(1), vec!["LARCENY"]);
        assert_eq!(baskets.labels(2), vec!["NOISE"]);
        assert_eq!(baskets.keys()[2].hour, 11);
        assert_eq!(baskets.labels(3), vec!["NOISE"]);
    }

    #[test]
    fn test_bad_times_are_dropped_from_baskets() {
        let records = vec![
            record(1, "10:05:00", "14", "NOISE"),
            record(1, "10h", "14", "ASSAULT"),
            record(1, "noon", "14", "ROBBERY"),
            record(1, "25:00:00", "14", "ROBBERY"),
        ];
        let baskets = BasketSet::build(records);
        assert_eq!(baskets.len(), 1);
        assert_eq!(baskets.labels(0), vec!["ASSAULT", "NOISE"]);
        assert_eq!(baskets.num_records(), 2);
        assert_eq!(baskets.skipped_records(), 2);
        assert!(baskets.itemizer().get("ROBBERY").is_none());
    }

    #[test]
    fn test_empty_input() {
        let baskets = BasketSet::build(Vec::<IncidentRecord>::new());
        assert!(baskets.is_empty());
        assert!(baskets.itemizer().is_empty());
    }

    #[test]
    fn test_from_transactions() {
        let baskets = BasketSet::from_transactions(&[vec!["b", "a", "b"], vec!["c"]]);
        assert_eq!(baskets.len(), 2);
        assert_eq!(baskets.labels(0), vec!["a", "b"]);
        assert_eq!(baskets.baskets()[0].len(), 2);
        assert!(baskets.keys().is_empty());
    }

    fn arb_record() -> impl Strategy<Value = IncidentRecord> {
        (
            1u32..4,
            prop_oneof![Just("01:00:00"), Just("01:30:00"), Just("02:00:00"), Just("bad")],
            prop_oneof![Just("1"), Just("2")],
            prop_oneof![Just("A"), Just("B"), Just("C"), Just("D")],
        )
            .prop_map(|(day, time, precinct, category)| record(day, time, precinct, category))
    }

    proptest! {
        #[test]
        fn prop_build_is_order_independent(
            (records, shuffled) in prop::collection::vec(arb_record(), 0..40)
                .prop_flat_map(|records| {
                    let shuffled = Just(records.clone()).prop_shuffle();
                    (Just(records), shuffled)
                })
        ) {
            let a = BasketSet::build(records);
            let b = BasketSet::build(shuffled);
            prop_assert_eq!(a.keys(), b.keys());
            prop_assert_eq!(a.baskets(), b.baskets());
            prop_assert_eq!(a.skipped_records(), b.skipped_records());
            for i in 0..a.len() {
                prop_assert_eq!(a.labels(i), b.labels(i));
            }
        }
    }
}
