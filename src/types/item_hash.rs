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

/// Content hash of a study item. Identifies an item in the known and
/// unknown sets independently of the group it is displayed in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ItemHash {
    inner: blake3::Hash,
}

impl ItemHash {
    pub fn to_hex(self) -> String {
        self.inner.to_hex().to_string()
    }

    /// The first eight hex digits.
    pub fn short(self) -> String {
        self.to_hex()[..8].to_string()
    }
}

impl Display for ItemHash {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

pub struct Hasher {
    inner: blake3::Hasher,
}

impl Hasher {
    pub fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
        }
    }

    /// Feeds one field. Fields are length-prefixed so that adjacent fields
    /// cannot run into each other.
    pub fn field(&mut self, data: &str) {
        self.inner.update(&(data.len() as u64).to_le_bytes());
        self.inner.update(data.as_bytes());
    }

    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    pub fn finalize(self) -> ItemHash {
        ItemHash {
            inner: self.inner.finalize(),
        }
    }
}
