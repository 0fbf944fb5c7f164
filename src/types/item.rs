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

use crate::types::item_hash::Hasher;
use crate::types::item_hash::ItemHash;

/// A single study item. Immutable once loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    /// The item's display fields.
    content: ItemContent,
    /// The cached hash of the item's content.
    hash: ItemHash,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ItemContent {
    Kanji {
        /// The dataset's own numbering.
        number: u32,
        glyph: String,
        meaning: String,
        kunyomi: String,
        onyomi: String,
        /// Text handed to speech synthesis. May be empty.
        pronunciation: String,
    },
    Vocab {
        /// Written form. Empty for kana-only words.
        kanji: String,
        furigana: String,
        romaji: String,
        meaning: String,
    },
}

impl Item {
    pub fn new(content: ItemContent) -> Self {
        let hash = content.hash();
        Self { content, hash }
    }

    pub fn content(&self) -> &ItemContent {
        &self.content
    }

    pub fn hash(&self) -> ItemHash {
        self.hash
    }
}

impl ItemContent {
    pub fn hash(&self) -> ItemHash {
        let mut hasher = Hasher::new();
        match &self {
            ItemContent::Kanji {
                number,
                glyph,
                meaning,
                kunyomi,
                onyomi,
                pronunciation,
            } => {
                hasher.update(b"Kanji");
                hasher.update(&number.to_le_bytes());
                hasher.field(glyph);
                hasher.field(meaning);
                hasher.field(kunyomi);
                hasher.field(onyomi);
                hasher.field(pronunciation);
            }
            ItemContent::Vocab {
                kanji,
                furigana,
                romaji,
                meaning,
            } => {
                hasher.update(b"Vocab");
                hasher.field(kanji);
                hasher.field(furigana);
                hasher.field(romaji);
                hasher.field(meaning);
            }
        }
        hasher.finalize()
    }
}
