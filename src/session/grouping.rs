// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::types::item::Item;

/// A labelled, ordered list of items: a deck or a category.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    label: String,
    items: Vec<Item>,
}

impl Group {
    pub fn new(label: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            label: label.into(),
            items,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }
}

/// Items as they come out of a dataset file.
pub enum Dataset {
    /// A flat list.
    Flat(Vec<Item>),
    /// Items already sorted into labelled categories, in file order.
    Categorized(Vec<(String, Vec<Item>)>),
}

impl Dataset {
    pub fn item_count(&self) -> usize {
        match self {
            Dataset::Flat(items) => items.len(),
            Dataset::Categorized(categories) => categories.iter().map(|(_, i)| i.len()).sum(),
        }
    }
}

/// How a dataset is split into selectable groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grouping {
    /// Fixed-size decks labelled `Deck 1`, `Deck 2`, and so on. The last
    /// deck may be short.
    Chunked { size: usize },
    /// One group per category label.
    Categories,
}

impl Grouping {
    /// Splits a dataset into groups. Always returns at least one group, so
    /// that a screen over an empty dataset still has something to select.
    pub fn apply(self, dataset: Dataset) -> Vec<Group> {
        let groups = match (self, dataset) {
            (Grouping::Chunked { size }, dataset) => {
                let items: Vec<Item> = match dataset {
                    Dataset::Flat(items) => items,
                    Dataset::Categorized(categories) => {
                        categories.into_iter().flat_map(|(_, items)| items).collect()
                    }
                };
                items
                    .chunks(size.max(1))
                    .enumerate()
                    .map(|(index, chunk)| Group::new(deck_label(index), chunk.to_vec()))
                    .collect::<Vec<_>>()
            }
            (Grouping::Categories, Dataset::Categorized(categories)) => categories
                .into_iter()
                .map(|(label, items)| Group::new(label, items))
                .collect(),
            (Grouping::Categories, Dataset::Flat(items)) => vec![Group::new("All", items)],
        };
        if groups.is_empty() {
            vec![Group::new(deck_label(0), Vec::new())]
        } else {
            groups
        }
    }
}

fn deck_label(index: usize) -> String {
    format!("Deck {}", index + 1)
}
