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

use serde::Deserialize;

use crate::types::item::Item;
use crate::types::item::ItemContent;

/// Maps an item onto the two faces of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardLayout {
    /// Glyph on the front, meaning and readings on the back.
    Kanji,
    /// Japanese on the front, English on the back.
    Vocab,
}

/// One labelled line on a card face.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub label: Option<&'static str>,
    pub text: String,
    pub emphasis: Emphasis,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    Glyph,
    Large,
    Normal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardFaces {
    pub front: Vec<Field>,
    pub back: Vec<Field>,
    /// Text for speech synthesis, if the item has any.
    pub speakable: Option<String>,
}

impl Field {
    fn new(label: Option<&'static str>, text: &str, emphasis: Emphasis) -> Self {
        Self {
            label,
            text: text.to_string(),
            emphasis,
        }
    }
}

impl CardLayout {
    pub fn faces(self, item: &Item) -> CardFaces {
        match (self, item.content()) {
            (
                CardLayout::Kanji,
                ItemContent::Kanji {
                    glyph,
                    meaning,
                    kunyomi,
                    onyomi,
                    pronunciation,
                    ..
                },
            ) => CardFaces {
                front: vec![Field::new(None, glyph, Emphasis::Glyph)],
                back: vec![
                    Field::new(Some("Meaning"), meaning, Emphasis::Normal),
                    Field::new(Some("Kunyomi"), kunyomi, Emphasis::Normal),
                    Field::new(Some("Onyomi"), onyomi, Emphasis::Normal),
                ],
                speakable: non_empty(pronunciation).or_else(|| non_empty(glyph)),
            },
            (
                CardLayout::Vocab,
                ItemContent::Kanji {
                    glyph,
                    meaning,
                    kunyomi,
                    pronunciation,
                    ..
                },
            ) => CardFaces {
                front: vec![
                    Field::new(None, glyph, Emphasis::Glyph),
                    Field::new(None, kunyomi, Emphasis::Large),
                ],
                back: vec![Field::new(Some("Meaning"), meaning, Emphasis::Large)],
                speakable: non_empty(pronunciation).or_else(|| non_empty(glyph)),
            },
            (
                CardLayout::Kanji,
                ItemContent::Vocab {
                    kanji,
                    furigana,
                    romaji,
                    meaning,
                },
            ) => {
                let glyph = if kanji.is_empty() { furigana } else { kanji };
                CardFaces {
                    front: vec![Field::new(None, glyph, Emphasis::Glyph)],
                    back: vec![
                        Field::new(Some("Meaning"), meaning, Emphasis::Normal),
                        Field::new(Some("Reading"), furigana, Emphasis::Normal),
                        Field::new(Some("Romaji"), romaji, Emphasis::Normal),
                    ],
                    speakable: non_empty(furigana).or_else(|| non_empty(kanji)),
                }
            }
            (
                CardLayout::Vocab,
                ItemContent::Vocab {
                    kanji,
                    furigana,
                    romaji,
                    meaning,
                },
            ) => {
                let mut front = Vec::new();
                if !kanji.is_empty() {
                    front.push(Field::new(None, kanji, Emphasis::Glyph));
                }
                if !furigana.is_empty() || front.is_empty() {
                    front.push(Field::new(None, furigana, Emphasis::Large));
                }
                let mut back = vec![Field::new(Some("Meaning"), meaning, Emphasis::Large)];
                if !romaji.is_empty() && romaji != meaning {
                    back.push(Field::new(Some("Romaji"), romaji, Emphasis::Normal));
                }
                CardFaces {
                    front,
                    back,
                    speakable: non_empty(furigana).or_else(|| non_empty(kanji)),
                }
            }
        }
    }

    /// The label of the flip button: first when showing the front, second
    /// when showing the back.
    pub fn flip_labels(self) -> (&'static str, &'static str) {
        match self {
            CardLayout::Kanji => ("Show Details", "Show Kanji"),
            CardLayout::Vocab => ("Show English", "Show Japanese"),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
