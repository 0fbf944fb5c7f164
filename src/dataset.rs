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

use std::fmt::Display;
use std::fmt::Formatter;
use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::session::grouping::Dataset;
use crate::types::item::Item;
use crate::types::item::ItemContent;
use crate::types::layout::CardLayout;

/// The shape of a dataset file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// `[{ id, kanji, meaning, kunyomi, onyomi, pronunciation }]`
    Kanji,
    /// `[{ Kanji, Furigana, Romaji, Meaning }]`
    VocabList,
    /// `{ category: { word: "phrase (reading)" } }`
    VocabCategories,
}

impl Format {
    pub fn default_layout(self) -> CardLayout {
        match self {
            Format::Kanji => CardLayout::Kanji,
            Format::VocabList | Format::VocabCategories => CardLayout::Vocab,
        }
    }

    /// Deck size used when the manifest does not give one. `None` means the
    /// dataset is grouped by category.
    pub fn default_deck_size(self) -> Option<usize> {
        match self {
            Format::Kanji => Some(20),
            Format::VocabList => Some(50),
            Format::VocabCategories => None,
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Kanji => write!(f, "kanji"),
            Format::VocabList => write!(f, "vocab-list"),
            Format::VocabCategories => write!(f, "vocab-categories"),
        }
    }
}

#[derive(Deserialize)]
struct KanjiRecord {
    id: u32,
    kanji: String,
    meaning: String,
    #[serde(default)]
    kunyomi: String,
    #[serde(default)]
    onyomi: String,
    #[serde(default)]
    pronunciation: String,
}

#[derive(Deserialize)]
struct VocabRecord {
    #[serde(rename = "Kanji", default)]
    kanji: String,
    #[serde(rename = "Furigana", default)]
    furigana: String,
    #[serde(rename = "Romaji", default)]
    romaji: String,
    #[serde(rename = "Meaning")]
    meaning: String,
}

/// Reads and parses a dataset file. If `format` is `None` it is detected
/// from the file's contents.
pub fn load_dataset(path: &Path, format: Option<Format>) -> Fallible<(Format, Dataset)> {
    let content = read_to_string(path)
        .map_err(|e| ErrorReport::new(format!("cannot read {}: {e}", path.display())))?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|e| ErrorReport::new(format!("malformed JSON in {}: {e}", path.display())))?;
    let format = match format {
        Some(format) => format,
        None => detect_format(&value).ok_or_else(|| {
            ErrorReport::new(format!(
                "cannot detect the dataset format of {}",
                path.display()
            ))
        })?,
    };
    let dataset = parse_dataset(value, format)
        .map_err(|e| ErrorReport::new(format!("{}: {e}", path.display())))?;
    Ok((format, dataset))
}

/// Guesses the format from the JSON shape: an array whose first element has
/// a `kanji` key is a kanji list, any other array of objects is a vocabulary
/// list, and an object is a category map. An empty array loads as an empty
/// kanji list.
pub fn detect_format(value: &Value) -> Option<Format> {
    match value {
        Value::Array(elements) => match elements.first() {
            Some(Value::Object(fields)) if fields.contains_key("kanji") => Some(Format::Kanji),
            Some(Value::Object(fields)) if fields.contains_key("Meaning") => {
                Some(Format::VocabList)
            }
            Some(_) => None,
            None => Some(Format::Kanji),
        },
        Value::Object(_) => Some(Format::VocabCategories),
        _ => None,
    }
}

pub fn parse_dataset(value: Value, format: Format) -> Fallible<Dataset> {
    match format {
        Format::Kanji => {
            let records: Vec<KanjiRecord> = serde_json::from_value(value)?;
            let items = records
                .into_iter()
                .map(|r| {
                    Item::new(ItemContent::Kanji {
                        number: r.id,
                        glyph: r.kanji,
                        meaning: r.meaning,
                        kunyomi: r.kunyomi,
                        onyomi: r.onyomi,
                        pronunciation: r.pronunciation,
                    })
                })
                .collect();
            Ok(Dataset::Flat(items))
        }
        Format::VocabList => {
            let records: Vec<VocabRecord> = serde_json::from_value(value)?;
            let items = records
                .into_iter()
                .map(|r| {
                    Item::new(ItemContent::Vocab {
                        kanji: r.kanji,
                        furigana: r.furigana,
                        romaji: r.romaji,
                        meaning: r.meaning,
                    })
                })
                .collect();
            Ok(Dataset::Flat(items))
        }
        Format::VocabCategories => {
            let Value::Object(categories) = value else {
                return fail("expected an object of categories");
            };
            let mut result = Vec::new();
            for (label, words) in categories {
                let Value::Object(words) = words else {
                    return fail(format!("category '{label}' is not an object"));
                };
                let mut items = Vec::new();
                for (word, phrase) in words {
                    let Value::String(phrase) = phrase else {
                        return fail(format!("entry '{word}' in '{label}' is not a string"));
                    };
                    let (kanji, furigana) = split_reading(&phrase);
                    items.push(Item::new(ItemContent::Vocab {
                        kanji,
                        furigana,
                        romaji: word.clone(),
                        meaning: word,
                    }));
                }
                result.push((label, items));
            }
            Ok(Dataset::Categorized(result))
        }
    }
}

/// Splits a phrase like `日本語 (にほんご)` into the phrase without the
/// annotation and the reading inside the first pair of parentheses. Without
/// an annotation the reading is empty.
pub fn split_reading(phrase: &str) -> (String, String) {
    if let Some(open) = phrase.find('(') {
        if let Some(len) = phrase[open + 1..].find(')') {
            let close = open + 1 + len;
            let reading = phrase[open + 1..close].trim().to_string();
            let mut display = String::with_capacity(phrase.len());
            display.push_str(phrase[..open].trim_end());
            let rest = phrase[close + 1..].trim();
            if !rest.is_empty() {
                if !display.is_empty() {
                    display.push(' ');
                }
                display.push_str(rest);
            }
            return (display, reading);
        }
    }
    (phrase.trim().to_string(), String::new())
}
