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

use maud::DOCTYPE;
use maud::Markup;
use maud::html;

use crate::cmd::serve::state::screen_url;
use crate::collection::Collection;

/// Wraps a page body. `current` is the name of the screen being shown, used
/// to highlight its link. `speech` marks pages whose cards can be spoken,
/// so the script warns once if the browser cannot speak.
pub fn page_template(
    collection: &Collection,
    current: Option<&str>,
    speech: bool,
    body: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "kanjicards" }
                link rel="stylesheet" href="/style.css";
            }
            body data-speech=(speech) {
                nav.screens {
                    @for screen in &collection.screens {
                        @if Some(screen.name.as_str()) == current {
                            a.current href=(screen_url(&screen.name)) { (screen.title) }
                        } @else {
                            a href=(screen_url(&screen.name)) { (screen.title) }
                        }
                    }
                }
                (body)
                script src="/script.js" {};
            }
        }
    }
}
