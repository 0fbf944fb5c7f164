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

use std::sync::Arc;
use std::sync::Mutex;

use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;

use crate::collection::Collection;
use crate::collection::Screen;
use crate::session::controller::Controller;
use crate::session::gesture::CardGesture;
use crate::types::timestamp::Timestamp;

#[derive(Clone)]
pub struct ServerState {
    pub collection: Arc<Collection>,
    pub mutable: Arc<Mutex<MutableState>>,
}

pub struct MutableState {
    /// The screen the user is on. At most one screen holds session state.
    pub mounted: Option<MountedScreen>,
}

pub struct MountedScreen {
    pub screen: Arc<Screen>,
    pub controller: Controller,
    pub gesture: CardGesture,
    pub mounted_at: Timestamp,
}

impl MountedScreen {
    fn new(screen: Arc<Screen>) -> Self {
        Self {
            controller: screen.controller(),
            screen,
            gesture: CardGesture::new(),
            mounted_at: Timestamp::now(),
        }
    }
}

impl MutableState {
    pub fn new() -> Self {
        Self { mounted: None }
    }

    /// Returns the session for `screen`. Navigating to a different screen
    /// discards the previous screen's session and starts a fresh one.
    pub fn mount(&mut self, screen: Arc<Screen>) -> &mut MountedScreen {
        if self
            .mounted
            .as_ref()
            .is_some_and(|m| m.screen.name != screen.name)
        {
            self.mounted = None;
        }
        self.mounted.get_or_insert_with(|| {
            log::debug!("Mounting screen '{}'.", screen.name);
            MountedScreen::new(screen)
        })
    }
}

/// The path of a screen's page.
pub fn screen_url(name: &str) -> String {
    format!("/s/{}", utf8_percent_encode(name, NON_ALPHANUMERIC))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_screen_url() {
        assert_eq!(screen_url("kanji"), "/s/kanji");
        assert_eq!(screen_url("n5 vocab"), "/s/n5%20vocab");
    }

    #[test]
    fn test_mount_keeps_and_discards_sessions() -> Fallible<()> {
        let coll = Collection::new(Some("./test".to_string()))?;
        let kanji = coll.screen("kanji").unwrap();
        let n4 = coll.screen("n4").unwrap();
        let mut state = MutableState::new();

        state.mount(kanji.clone()).controller.advance();
        // Same screen: session survives.
        assert_eq!(state.mount(kanji.clone()).controller.cursor(), 1);
        // Another screen: fresh session.
        assert_eq!(state.mount(n4).controller.cursor(), 0);
        // Back again: the old session is gone.
        assert_eq!(state.mount(kanji).controller.cursor(), 0);
        Ok(())
    }
}
