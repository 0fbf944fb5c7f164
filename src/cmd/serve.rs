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

mod get;
mod pointer;
mod post;
pub mod server;
mod state;
mod template;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;
    use serde_json::Value;
    use serde_json::json;
    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::time::sleep;

    use crate::cmd::serve::server::ServeConfig;
    use crate::cmd::serve::server::start_server;
    use crate::error::Fallible;

    /// Starts a server on the test collection and waits until it accepts
    /// connections. Returns the base URL.
    async fn start() -> String {
        let port = portpicker::pick_unused_port().unwrap();
        let config = ServeConfig {
            directory: Some("./test".to_string()),
            port,
            open_browser: false,
        };
        spawn(async move { start_server(config).await });
        let bind = format!("127.0.0.1:{port}");
        loop {
            if let Ok(stream) = TcpStream::connect(&bind).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        format!("http://{bind}")
    }

    async fn post(base: &str, screen: &str, action: &str) -> Fallible<String> {
        let response = reqwest::Client::new()
            .post(format!("{base}/s/{screen}"))
            .form(&[("action", action)])
            .send()
            .await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        Ok(response.text().await?)
    }

    async fn pointer(base: &str, screen: &str, events: Value) -> Fallible<Value> {
        let response = reqwest::Client::new()
            .post(format!("{base}/s/{screen}/pointer"))
            .json(&json!({ "events": events }))
            .send()
            .await?;
        assert!(response.status().is_success());
        Ok(response.json().await?)
    }

    #[tokio::test]
    async fn test_start_server_on_non_existent_directory() -> Fallible<()> {
        let config = ServeConfig {
            directory: Some("./derpherp".to_string()),
            port: 0,
            open_browser: false,
        };
        let err = start_server(config).await.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
        Ok(())
    }

    #[tokio::test]
    async fn test_assets_and_not_found() -> Fallible<()> {
        let base = start().await;

        let response = reqwest::get(format!("{base}/style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        let response = reqwest::get(format!("{base}/script.js")).await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/javascript"
        );

        let response = reqwest::get(format!("{base}/herp-derp")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = reqwest::get(format!("{base}/s/nope")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = reqwest::get(format!("{base}/s/nope/pointer")).await?;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        Ok(())
    }

    #[tokio::test]
    async fn test_navigate() -> Fallible<()> {
        let base = start().await;

        // The root redirects to the first screen.
        let response = reqwest::get(format!("{base}/")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.url().path(), "/s/kanji");
        let html = response.text().await?;
        assert!(html.contains("漢字 Flashcards"));
        assert!(html.contains("日"));
        assert!(html.contains("0% Complete"));
        assert!(html.contains("Show Details"));

        let html = post(&base, "kanji", "Next").await?;
        assert!(html.contains("月"));
        assert!(html.contains("33% Complete"));

        let html = post(&base, "kanji", "Flip").await?;
        assert!(html.contains("card flipped"));
        assert!(html.contains("Show Kanji"));

        // Moving clears the flip.
        let html = post(&base, "kanji", "Previous").await?;
        assert!(html.contains("0% Complete"));
        assert!(!html.contains("card flipped"));

        post(&base, "kanji", "Next").await?;
        post(&base, "kanji", "Next").await?;
        let html = post(&base, "kanji", "Next").await?;
        assert!(html.contains("All Done!"));
        assert!(html.contains("100% Complete"));

        let html = post(&base, "kanji", "Reset").await?;
        assert!(html.contains("0% Complete"));
        Ok(())
    }

    #[tokio::test]
    async fn test_pointer_gestures() -> Fallible<()> {
        let base = start().await;
        reqwest::get(format!("{base}/s/kanji")).await?;

        let swipe = json!([
            { "type": "down", "x": 0.0, "y": 0.0 },
            { "type": "move", "x": 150.0, "y": 5.0 },
            { "type": "up" },
        ]);
        let result = pointer(&base, "kanji", swipe).await?;
        assert_eq!(result, json!({ "signals": ["swipe-right"], "reload": true }));
        let html = reqwest::get(format!("{base}/s/kanji")).await?.text().await?;
        assert!(html.contains("33% Complete"));

        // A short drag is neither a swipe nor a tap.
        let drag = json!([
            { "type": "down", "x": 0.0, "y": 0.0 },
            { "type": "move", "x": -50.0, "y": 0.0 },
            { "type": "leave" },
            { "type": "click" },
        ]);
        let result = pointer(&base, "kanji", drag).await?;
        assert_eq!(result, json!({ "signals": [], "reload": false }));

        let tap = json!([{ "type": "click" }]);
        let result = pointer(&base, "kanji", tap).await?;
        assert_eq!(result, json!({ "signals": ["flip"], "reload": true }));

        let back = json!([
            { "type": "down", "x": 200.0, "y": 0.0 },
            { "type": "move", "x": 50.0, "y": 0.0 },
            { "type": "up" },
        ]);
        let result = pointer(&base, "kanji", back).await?;
        assert_eq!(result, json!({ "signals": ["swipe-left"], "reload": true }));
        let html = reqwest::get(format!("{base}/s/kanji")).await?.text().await?;
        assert!(html.contains("0% Complete"));
        assert!(!html.contains("card flipped"));
        Ok(())
    }

    #[tokio::test]
    async fn test_review_pass() -> Fallible<()> {
        let base = start().await;
        let html = reqwest::get(format!("{base}/s/n5")).await?.text().await?;
        assert!(html.contains("Greetings"));
        assert!(html.contains("Numbers"));
        assert!(html.contains("おはようございます"));
        assert!(html.contains("Know"));

        let html = post(&base, "n5", "Unknown").await?;
        assert!(html.contains("有難う"));
        assert!(html.contains("ありがとう"));

        let html = post(&base, "n5", "Known").await?;
        assert!(html.contains("Round finished"));
        assert!(html.contains("1 card to review."));

        let html = post(&base, "n5", "Next").await?;
        assert!(html.contains("Review Mode · 1 left"));
        assert!(html.contains("おはようございます"));
        assert!(html.contains("missed"));

        // Missing it again puts it back in the queue.
        let html = post(&base, "n5", "Unknown").await?;
        assert!(html.contains("Review Mode · 1 left"));
        assert!(html.contains("おはようございます"));

        let html = post(&base, "n5", "Known").await?;
        assert!(html.contains("All Done!"));
        assert!(html.contains("Known"));
        assert!(html.contains("Missed"));

        let html = post(&base, "n5", "Reset").await?;
        assert!(html.contains("0% Complete"));
        assert!(html.contains("おはようございます"));
        Ok(())
    }

    #[tokio::test]
    async fn test_select_group() -> Fallible<()> {
        let base = start().await;
        reqwest::get(format!("{base}/s/n5")).await?;
        let response = reqwest::Client::new()
            .post(format!("{base}/s/n5"))
            .form(&[("action", "Select"), ("group", "1")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("一"));
        assert!(html.contains("いち"));

        // A bad group leaves the screen as it was.
        let response = reqwest::Client::new()
            .post(format!("{base}/s/n5"))
            .form(&[("action", "Select"), ("group", "7")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = reqwest::get(format!("{base}/s/n5")).await?.text().await?;
        assert!(html.contains("いち"));
        Ok(())
    }

    #[tokio::test]
    async fn test_leaving_a_screen_discards_its_session() -> Fallible<()> {
        let base = start().await;
        reqwest::get(format!("{base}/s/n4")).await?;
        let html = post(&base, "n4", "Next").await?;
        assert!(html.contains("50% Complete"));

        let html = reqwest::get(format!("{base}/s/kanji")).await?.text().await?;
        assert!(html.contains("0% Complete"));

        let html = reqwest::get(format!("{base}/s/n4")).await?.text().await?;
        assert!(html.contains("0% Complete"));
        assert!(html.contains("会う"));
        Ok(())
    }
}
