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

use std::collections::HashSet;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::session::gesture::Signal;
use crate::session::grouping::Group;
use crate::types::item::Item;
use crate::types::item_hash::ItemHash;

/// What swipes mean on a screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    /// Swipe right goes forward, swipe left goes back.
    Navigate,
    /// Swipe right marks the item known, swipe left marks it unknown.
    KnownUnknown,
}

/// Per-mount session state. `Default` is the state right after mounting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Index into the active group. Equal to the group's length once the
    /// current pass is exhausted.
    cursor: usize,
    flipped: bool,
    reviewing: bool,
    /// Indices of items marked unknown, oldest first.
    review_queue: VecDeque<usize>,
    known: HashSet<ItemHash>,
    unknown: HashSet<ItemHash>,
}

/// Owns the session state of one screen and implements deck navigation and
/// the review queue.
pub struct Controller {
    groups: Arc<[Group]>,
    active: usize,
    binding: Binding,
    state: SessionState,
}

impl Controller {
    /// `groups` must not be empty.
    pub fn new(groups: Arc<[Group]>, binding: Binding) -> Self {
        debug_assert!(!groups.is_empty());
        Self {
            groups,
            active: 0,
            binding,
            state: SessionState::default(),
        }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_group(&self) -> &Group {
        &self.groups[self.active]
    }

    pub fn binding(&self) -> Binding {
        self.binding
    }

    #[cfg(test)]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn is_flipped(&self) -> bool {
        self.state.flipped
    }

    pub fn is_reviewing(&self) -> bool {
        self.state.reviewing
    }

    #[cfg(test)]
    pub fn review_queue(&self) -> impl Iterator<Item = usize> + '_ {
        self.state.review_queue.iter().copied()
    }

    pub fn review_remaining(&self) -> usize {
        self.state.review_queue.len()
    }

    /// Items of the active group marked known. Marks made in other groups
    /// are kept but not counted here.
    pub fn known_count(&self) -> usize {
        let items = self.active_group().items();
        items.iter().filter(|i| self.is_known(i.hash())).count()
    }

    /// Items of the active group marked unknown.
    pub fn unknown_count(&self) -> usize {
        let items = self.active_group().items();
        items.iter().filter(|i| self.is_unknown(i.hash())).count()
    }

    pub fn is_known(&self, hash: ItemHash) -> bool {
        self.state.known.contains(&hash)
    }

    pub fn is_unknown(&self, hash: ItemHash) -> bool {
        self.state.unknown.contains(&hash)
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.active_group().get(self.state.cursor)
    }

    /// Percentage of the primary pass behind the cursor. Reads 100 for the
    /// whole review pass, and 0 for an empty group.
    pub fn progress(&self) -> u8 {
        let total = self.active_group().len();
        if total == 0 {
            return 0;
        }
        if self.state.reviewing {
            return 100;
        }
        let position = self.state.cursor.min(total);
        ((position * 100) as f64 / total as f64).round() as u8
    }

    pub fn is_complete(&self) -> bool {
        self.state.cursor >= self.active_group().len() && self.state.review_queue.is_empty()
    }

    /// The primary pass is over but missed items are waiting: the next
    /// `advance` starts the review pass.
    pub fn is_awaiting_review(&self) -> bool {
        !self.state.reviewing
            && self.state.cursor >= self.active_group().len()
            && !self.state.review_queue.is_empty()
    }

    pub fn advance(&mut self) {
        let len = self.active_group().len();
        let state = &mut self.state;
        state.flipped = false;
        if state.reviewing {
            state.cursor = state.review_queue.pop_front().unwrap_or(len);
        } else if state.cursor < len {
            state.cursor += 1;
        } else if let Some(index) = state.review_queue.pop_front() {
            state.reviewing = true;
            state.cursor = index;
        }
    }

    pub fn retreat(&mut self) {
        self.state.flipped = false;
        if self.state.cursor > 0 {
            self.state.cursor -= 1;
        }
    }

    /// Switches to another group. Queued indices refer to the old group, so
    /// the review queue is dropped; the known and unknown sets are kept.
    /// Returns false, changing nothing, if `id` is out of range.
    pub fn select_group(&mut self, id: usize) -> bool {
        if id >= self.groups.len() {
            return false;
        }
        self.active = id;
        self.state.cursor = 0;
        self.state.flipped = false;
        self.state.reviewing = false;
        self.state.review_queue.clear();
        true
    }

    pub fn toggle_flip(&mut self) {
        self.state.flipped = !self.state.flipped;
    }

    /// Returns the session to its freshly mounted state. The active group is
    /// kept.
    pub fn reset(&mut self) {
        self.state = SessionState::default();
    }

    pub fn mark_known(&mut self) {
        if let Some(hash) = self.current_item().map(Item::hash) {
            self.state.unknown.remove(&hash);
            self.state.known.insert(hash);
        }
        self.advance();
    }

    pub fn mark_unknown(&mut self) {
        if let Some(hash) = self.current_item().map(Item::hash) {
            self.state.known.remove(&hash);
            self.state.unknown.insert(hash);
            let cursor = self.state.cursor;
            self.state.review_queue.push_back(cursor);
        }
        self.advance();
    }

    /// Applies a card signal according to the screen's binding.
    pub fn apply(&mut self, signal: Signal) {
        match (signal, self.binding) {
            (Signal::Flip, _) => self.toggle_flip(),
            (Signal::SwipeRight, Binding::Navigate) => self.advance(),
            (Signal::SwipeLeft, Binding::Navigate) => self.retreat(),
            (Signal::SwipeRight, Binding::KnownUnknown) => self.mark_known(),
            (Signal::SwipeLeft, Binding::KnownUnknown) => self.mark_unknown(),
        }
    }
}
