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

use axum::Form;
use axum::extract::Path;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::cmd::serve::state::MountedScreen;
use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::state::screen_url;
use crate::error::Fallible;
use crate::error::fail;
use crate::session::controller::Binding;
use crate::session::controller::Controller;
use crate::types::timestamp::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
enum Action {
    Previous,
    Next,
    Flip,
    Known,
    Unknown,
    Reset,
    Select,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    group: Option<usize>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    Form(form): Form<FormData>,
) -> Redirect {
    if let Err(e) = action_handler(&state, &name, form) {
        log::error!("{e}");
    }
    Redirect::to(&screen_url(&name))
}

fn action_handler(state: &ServerState, name: &str, form: FormData) -> Fallible<()> {
    let Some(screen) = state.collection.screen(name) else {
        return fail(format!("no such screen '{name}'."));
    };
    let mut mutable = state.mutable.lock().unwrap();
    let mounted = mutable.mount(screen);
    log::debug!("{name}: {:?}", form.action);
    apply_form(mounted, form.action, form.group)
}

fn apply_form(mounted: &mut MountedScreen, action: Action, group: Option<usize>) -> Fallible<()> {
    apply_action(&mut mounted.controller, action, group)?;
    if action == Action::Reset {
        mounted.mounted_at = Timestamp::now();
    }
    Ok(())
}

fn apply_action(c: &mut Controller, action: Action, group: Option<usize>) -> Fallible<()> {
    let tracking = c.binding() == Binding::KnownUnknown;
    if matches!(action, Action::Known | Action::Unknown) && !tracking {
        return fail(format!("{action:?} on a screen that does not track answers."));
    }
    match action {
        Action::Previous => c.retreat(),
        Action::Next => c.advance(),
        Action::Flip => c.toggle_flip(),
        Action::Known => c.mark_known(),
        Action::Unknown => c.mark_unknown(),
        Action::Reset => c.reset(),
        Action::Select => {
            let Some(group) = group else {
                return fail("no group selected.");
            };
            if !c.select_group(group) {
                return fail(format!("no such group {group}."));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;
    use crate::cmd::serve::state::MutableState;
    use crate::collection::Collection;

    fn controller(name: &str) -> Fallible<Controller> {
        let coll = Collection::new(Some("./test".to_string()))?;
        Ok(coll.screen(name).unwrap().controller())
    }

    #[test]
    fn test_navigation_actions() -> Fallible<()> {
        let mut c = controller("kanji")?;
        apply_action(&mut c, Action::Next, None)?;
        apply_action(&mut c, Action::Flip, None)?;
        assert_eq!(c.cursor(), 1);
        assert!(c.is_flipped());
        apply_action(&mut c, Action::Previous, None)?;
        assert_eq!(c.cursor(), 0);
        apply_action(&mut c, Action::Next, None)?;
        apply_action(&mut c, Action::Reset, None)?;
        assert_eq!(c.cursor(), 0);
        Ok(())
    }

    #[test]
    fn test_answers_need_a_tracking_screen() -> Fallible<()> {
        let mut c = controller("kanji")?;
        let err = apply_action(&mut c, Action::Unknown, None).err().unwrap();
        assert_eq!(
            err.to_string(),
            "error: Unknown on a screen that does not track answers."
        );
        assert!(apply_action(&mut c, Action::Known, None).is_err());
        assert_eq!(c.cursor(), 0);
        assert_eq!(c.review_remaining(), 0);
        assert_eq!(c.unknown_count(), 0);

        let mut c = controller("n5")?;
        apply_action(&mut c, Action::Unknown, None)?;
        assert_eq!(c.review_remaining(), 1);
        Ok(())
    }

    #[test]
    fn test_reset_restarts_the_clock() -> Fallible<()> {
        let coll = Collection::new(Some("./test".to_string()))?;
        let mut state = MutableState::new();
        let mounted = state.mount(coll.screen("kanji").unwrap());
        let long_ago = Timestamp::new(Utc::now() - Duration::hours(2));
        mounted.mounted_at = long_ago;

        apply_form(mounted, Action::Next, None)?;
        assert_eq!(mounted.mounted_at, long_ago);
        apply_form(mounted, Action::Reset, None)?;
        assert_ne!(mounted.mounted_at, long_ago);
        assert_eq!(mounted.mounted_at.minutes_until(Timestamp::now()), 0);
        Ok(())
    }

    #[test]
    fn test_select_action() -> Fallible<()> {
        let mut c = controller("n5")?;
        apply_action(&mut c, Action::Select, Some(1))?;
        assert_eq!(c.active_group().label(), "Numbers");
        assert!(apply_action(&mut c, Action::Select, None).is_err());
        let err = apply_action(&mut c, Action::Select, Some(9)).err().unwrap();
        assert_eq!(err.to_string(), "error: no such group 9.");
        assert_eq!(c.active_index(), 1);
        Ok(())
    }
}
