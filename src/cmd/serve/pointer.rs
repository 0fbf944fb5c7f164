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

use axum::Json;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::cmd::serve::state::ServerState;
use crate::session::gesture::PointerEvent;
use crate::session::gesture::Signal;

/// A run of raw pointer events captured on the card by the page script.
#[derive(Deserialize)]
pub struct PointerBatch {
    events: Vec<PointerEvent>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct PointerResponse {
    signals: Vec<Signal>,
    /// Whether the page must be re-rendered.
    reload: bool,
}

/// `POST /s/{screen}/pointer`: feeds the events through the mounted card's
/// gesture machine and applies whatever signals come out.
pub async fn pointer_handler(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    Json(batch): Json<PointerBatch>,
) -> (StatusCode, Json<PointerResponse>) {
    let Some(screen) = state.collection.screen(&name) else {
        log::error!("Pointer events for unknown screen '{name}'.");
        let response = PointerResponse {
            signals: Vec::new(),
            reload: false,
        };
        return (StatusCode::NOT_FOUND, Json(response));
    };
    let mut mutable = state.mutable.lock().unwrap();
    let mounted = mutable.mount(screen);
    let signals = mounted.gesture.replay(batch.events);
    for signal in &signals {
        log::debug!("{name}: {signal:?}");
        mounted.controller.apply(*signal);
    }
    if mounted.gesture.is_dragging() {
        let offset = mounted.gesture.offset();
        log::debug!("{name}: drag in progress at ({}, {}).", offset.x, offset.y);
    }
    let response = PointerResponse {
        reload: !signals.is_empty(),
        signals,
    };
    (StatusCode::OK, Json(response))
}
