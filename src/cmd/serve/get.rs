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

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use maud::Markup;
use maud::html;

use crate::cmd::serve::state::MountedScreen;
use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::state::screen_url;
use crate::cmd::serve::template::page_template;
use crate::session::controller::Binding;
use crate::session::controller::Controller;
use crate::types::item::Item;
use crate::types::layout::CardFaces;
use crate::types::layout::Emphasis;
use crate::types::layout::Field;
use crate::types::timestamp::Timestamp;

/// `GET /`: go to the first screen.
pub async fn index_handler(State(state): State<ServerState>) -> Response {
    match state.collection.screens.first() {
        Some(screen) => Redirect::to(&screen_url(&screen.name)).into_response(),
        None => not_found_page(&state).into_response(),
    }
}

pub async fn get_handler(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> (StatusCode, Html<String>) {
    let Some(screen) = state.collection.screen(&name) else {
        return not_found_page(&state);
    };
    let speech = screen.is_speakable();
    let mut mutable = state.mutable.lock().unwrap();
    let mounted = mutable.mount(screen);
    let body = render_screen(mounted);
    let html = page_template(&state.collection, Some(&name), speech, body);
    (StatusCode::OK, Html(html.into_string()))
}

pub fn not_found_page(state: &ServerState) -> (StatusCode, Html<String>) {
    let body = html! {
        div.root {
            div.message {
                h1 { "Not Found" }
            }
        }
    };
    let html = page_template(&state.collection, None, false, body);
    (StatusCode::NOT_FOUND, Html(html.into_string()))
}

fn render_screen(mounted: &MountedScreen) -> Markup {
    let screen = &mounted.screen;
    let c = &mounted.controller;
    let action = screen_url(&screen.name);
    let progress = c.progress();
    let progress_label = if c.is_reviewing() {
        // The card on screen counts as left.
        let left = c.review_remaining() + usize::from(c.current_item().is_some());
        format!("Review Mode · {left} left")
    } else {
        format!("{progress}% Complete")
    };
    let progress_style = format!("width: {progress}%;");

    let main: Markup = if c.active_group().is_empty() {
        html! {
            div.message {
                p { "No cards available in this deck." }
            }
        }
    } else if c.is_complete() {
        render_complete(c, mounted.mounted_at, &action)
    } else if c.is_awaiting_review() {
        let n = c.review_remaining();
        html! {
            div.message {
                h2 { "Round finished" }
                p { (n) @if n == 1 { " card to review." } @else { " cards to review." } }
                form action=(action) method="post" {
                    button #next type="submit" name="action" value="Next" { "Start Review" }
                }
            }
        }
    } else if let Some(item) = c.current_item() {
        let faces = screen.layout.faces(item);
        let (show_back, show_front) = screen.layout.flip_labels();
        let flip_label = if c.is_flipped() { show_front } else { show_back };
        html! {
            (render_card(c, item, &faces, &action))
            div.controls {
                form action=(action) method="post" {
                    @match c.binding() {
                        Binding::Navigate => {
                            @if c.cursor() == 0 {
                                button #previous type="submit" name="action" value="Previous" disabled { "Previous" }
                            } @else {
                                button #previous type="submit" name="action" value="Previous" { "Previous" }
                            }
                            button #next type="submit" name="action" value="Next" { "Next" }
                        }
                        Binding::KnownUnknown => {
                            button #unknown type="submit" name="action" value="Unknown" { "Don't Know" }
                            button #known type="submit" name="action" value="Known" { "Know" }
                        }
                    }
                }
                form action=(action) method="post" {
                    button #flip type="submit" name="action" value="Flip" { (flip_label) }
                }
            }
        }
    } else {
        html! {
            div.message {
                p { "No cards available in this deck." }
            }
        }
    };

    html! {
        div.root {
            div.header {
                h1 { (screen.title) }
                div.progress-bar {
                    div.progress-fill style=(progress_style) {}
                }
                div.progress { (progress_label) }
            }
            @if c.groups().len() > 1 {
                form.groups action=(action) method="post" {
                    input type="hidden" name="action" value="Select";
                    @for (index, group) in c.groups().iter().enumerate() {
                        @if index == c.active_index() {
                            button.active type="submit" name="group" value=(index) { (group.label()) }
                        } @else {
                            button type="submit" name="group" value=(index) { (group.label()) }
                        }
                    }
                }
            }
            (main)
        }
    }
}

fn render_card(c: &Controller, item: &Item, faces: &CardFaces, action: &str) -> Markup {
    let pointer = format!("{action}/pointer");
    let status = if c.is_known(item.hash()) {
        Some("known")
    } else if c.is_unknown(item.hash()) {
        Some("missed")
    } else {
        None
    };
    html! {
        div.card-container {
            div #card .card .flipped[c.is_flipped()] data-pointer=(pointer) data-item=(item.hash().short()) {
                div.face.front {
                    @for field in &faces.front {
                        (render_field(field))
                    }
                    div.hint { "Tap to flip or swipe to answer" }
                }
                div.face.back {
                    @for field in &faces.back {
                        (render_field(field))
                    }
                    @if let Some(text) = &faces.speakable {
                        button.speak type="button" data-speak=(text) title="Pronounce" { "🔊" }
                    }
                }
                @if let Some(status) = status {
                    div.status { (status) }
                }
            }
        }
    }
}

fn render_field(field: &Field) -> Markup {
    let text = field.text.as_str();
    html! {
        @match (field.label, field.emphasis) {
            (_, Emphasis::Glyph) => {
                span.glyph { (text) }
            }
            (None, Emphasis::Large) => {
                span.large { (text) }
            }
            (None, Emphasis::Normal) => {
                p { (text) }
            }
            (Some(label), Emphasis::Large) => {
                div.field {
                    h3 { (label) }
                    span.large { (text) }
                }
            }
            (Some(label), Emphasis::Normal) => {
                div.field {
                    h3 { (label) }
                    p { (text) }
                }
            }
        }
    }
}

fn render_complete(c: &Controller, mounted_at: Timestamp, action: &str) -> Markup {
    let minutes = mounted_at.minutes_until(Timestamp::now());
    html! {
        div.finished {
            h2 { "All Done! 🎉" }
            p { "You've completed " (c.active_group().label()) "." }
            div.stats {
                table {
                    tbody {
                        tr {
                            td.key { "Cards" }
                            td.val { (c.active_group().len()) }
                        }
                        @if c.binding() == Binding::KnownUnknown {
                            tr {
                                td.key { "Known" }
                                td.val { (c.known_count()) }
                            }
                            tr {
                                td.key { "Missed" }
                                td.val { (c.unknown_count()) }
                            }
                        }
                        tr {
                            td.key { "Minutes" }
                            td.val { (minutes) }
                        }
                    }
                }
            }
            form action=(action) method="post" {
                button #reset type="submit" name="action" value="Reset" { "Start Again" }
            }
        }
    }
}
