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

use crate::config::meets_support;
use crate::item::Item;
use crate::item_counter::ItemCounter;
use crate::transaction_builder::BasketSet;
use rayon::prelude::*;

/// Boolean baskets × categories matrix, row major. Every basket is a row;
/// columns are items in ascending (lexical) order.
#[derive(Clone, Debug, PartialEq)]
pub struct OccurrenceMatrix {
    columns: Vec<Item>,
    cells: Vec<bool>,
    num_rows: usize,
}

impl OccurrenceMatrix {
    // Builds the matrix with one column per category, or only the `top_n`
    // most frequent categories when given. Baskets left with no kept
    // category remain as all-false rows.
    pub fn build(baskets: &BasketSet, top_n: Option<usize>) -> OccurrenceMatrix {
        let item_count = ItemCounter::from_baskets(baskets.baskets());
        let columns = match top_n {
            Some(n) => item_count.top_n(n),
            None => item_count.items_with_count_at_least(1),
        };
        if let Some(n) = top_n {
            let total = item_count.items_with_count_at_least(1).len();
            if total > n {
                log::info!("Keeping the {} most frequent of {} categories", n, total);
            }
        }

        let mut column_of: Vec<Option<usize>> = vec![None; baskets.itemizer().len() + 1];
        for (index, item) in columns.iter().enumerate() {
            column_of[item.as_index()] = Some(index);
        }

        let num_rows = baskets.len();
        let mut cells = vec![false; num_rows * columns.len()];
        for (row, basket) in baskets.baskets().iter().enumerate() {
            for item in basket {
                if let Some(column) = column_of[item.as_index()] {
                    cells[row * columns.len() + column] = true;
                }
            }
        }
        OccurrenceMatrix {
            columns,
            cells,
            num_rows,
        }
    }

    pub fn columns(&self) -> &[Item] {
        &self.columns
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn row(&self, row: usize) -> &[bool] {
        let width = self.columns.len();
        &self.cells[row * width..(row + 1) * width]
    }

    pub fn column_counts(&self) -> Vec<u32> {
        let mut counts = vec![0u32; self.columns.len()];
        for row in 0..self.num_rows {
            for (count, &cell) in counts.iter_mut().zip(self.row(row)) {
                if cell {
                    *count += 1;
                }
            }
        }
        counts
    }

    // Drops the columns whose support is below `min_support`. Rows stay.
    pub fn retain_frequent(&self, min_support: f64) -> OccurrenceMatrix {
        let keep: Vec<usize> = self
            .column_counts()
            .into_iter()
            .enumerate()
            .filter(|&(_, count)| meets_support(count, self.num_rows, min_support))
            .map(|(column, _)| column)
            .collect();
        let columns: Vec<Item> = keep.iter().map(|&column| self.columns[column]).collect();
        let mut cells = Vec::with_capacity(self.num_rows * keep.len());
        for row in 0..self.num_rows {
            let row = self.row(row);
            cells.extend(keep.iter().map(|&column| row[column]));
        }
        OccurrenceMatrix {
            columns,
            cells,
            num_rows: self.num_rows,
        }
    }

    // The transpose of the matrix multiplied by itself. Cell (i,j) counts
    // the rows holding both column i and column j; the diagonal is each
    // column's own count. Rows are reduced in parallel.
    pub fn co_occurrence(&self) -> CoOccurrence {
        let width = self.columns.len();
        let counts = (0..self.num_rows)
            .into_par_iter()
            .fold(
                || vec![0u32; width * width],
                |mut counts, row| {
                    let present: Vec<usize> = self
                        .row(row)
                        .iter()
                        .enumerate()
                        .filter(|&(_, &cell)| cell)
                        .map(|(column, _)| column)
                        .collect();
                    for &i in &present {
                        for &j in &present {
                            counts[i * width + j] += 1;
                        }
                    }
                    counts
                },
            )
            .reduce(
                || vec![0u32; width * width],
                |mut a, b| {
                    for (x, y) in a.iter_mut().zip(b) {
                        *x += y;
                    }
                    a
                },
            );
        CoOccurrence {
            items: self.columns.clone(),
            counts,
            num_baskets: self.num_rows,
        }
    }
}

/// Square, symmetric matrix of basket counts for each pair of items.
#[derive(Clone, Debug, PartialEq)]
pub struct CoOccurrence {
    items: Vec<Item>,
    counts: Vec<u32>,
    num_baskets: usize,
}

impl CoOccurrence {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn num_baskets(&self) -> usize {
        self.num_baskets
    }

    pub fn count(&self, i: usize, j: usize) -> u32 {
        self.counts[i * self.items.len() + j]
    }

    pub fn item_count(&self, i: usize) -> u32 {
        self.count(i, i)
    }

    // Per item relative support, in item order.
    pub fn item_support(&self) -> Vec<f64> {
        (0..self.items.len())
            .map(|i| self.item_count(i) as f64 / self.num_baskets as f64)
            .collect()
    }

    pub fn index_of(&self, item: Item) -> Option<usize> {
        self.items.binary_search(&item).ok()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
