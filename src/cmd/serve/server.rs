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
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::time::sleep;

use crate::cmd::serve::get::get_handler;
use crate::cmd::serve::get::index_handler;
use crate::cmd::serve::get::not_found_page;
use crate::cmd::serve::pointer::pointer_handler;
use crate::cmd::serve::post::post_handler;
use crate::cmd::serve::state::MutableState;
use crate::cmd::serve::state::ServerState;
use crate::collection::Collection;
use crate::error::Fallible;

pub struct ServeConfig {
    pub directory: Option<String>,
    pub port: u16,
    pub open_browser: bool,
}

pub async fn start_server(config: ServeConfig) -> Fallible<()> {
    let collection = Collection::new(config.directory)?;
    let item_count: usize = collection.screens.iter().map(|s| s.item_count()).sum();
    log::debug!(
        "Serving {} screens, {item_count} items, from {}.",
        collection.screens.len(),
        collection.directory.display()
    );

    let state = ServerState {
        collection: Arc::new(collection),
        mutable: Arc::new(Mutex::new(MutableState::new())),
    };
    let app = Router::new();
    let app = app.route("/", get(index_handler));
    let app = app.route("/s/{screen}", get(get_handler).post(post_handler));
    let app = app.route("/s/{screen}/pointer", post(pointer_handler));
    let app = app.route("/script.js", get(script));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("127.0.0.1:{}", config.port);

    if config.open_browser {
        // Open the browser once the listener is up.
        let url = format!("http://{bind}/");
        let target = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&target).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            let _ = open::that(url);
        });
    }

    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    println!("Listening on http://{bind}/");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn script() -> (StatusCode, [(HeaderName, &'static str); 1], &'static str) {
    let content = include_str!("script.js");
    (StatusCode::OK, [(CONTENT_TYPE, "text/javascript")], content)
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes: &'static [u8] = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    not_found_page(&state)
}
