//! RPC method handler for the Sitelens JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be tested without stdin/stdout.
//! `handle_method` dispatches a method call to the navigation controller,
//! the review store, the search client or the settings engine.

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::navigation_controller::NavCommand;
use crate::services::review_format::{
    author_initial, format_relative_time, rating_summary, user_rating_label,
};
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::navigation::PageKey;
use crate::types::review::WebsiteReviewData;
use crate::types::search::SearchEngine;

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Serializes a review record with the display strings the panel needs.
pub fn review_json(data: &WebsiteReviewData, now_ms: i64) -> Value {
    let comments: Vec<Value> = data
        .comments
        .iter()
        .map(|c| {
            json!({
                "id": c.id,
                "author": c.author,
                "initial": author_initial(&c.author),
                "text": c.text,
                "rating": c.rating,
                "timestamp": c.timestamp,
                "age": format_relative_time(c.timestamp, now_ms),
            })
        })
        .collect();

    json!({
        "page": data.page_key,
        "rating": {
            "mean_stars": data.rating.mean_stars,
            "count": data.rating.count,
            "summary": rating_summary(&data.rating),
        },
        "user_rating": data.user_rating,
        "user_rating_label": user_rating_label(data.user_rating),
        "comments": comments,
    })
}

fn nav_state(app: &App) -> Value {
    let nav = &app.navigation;
    let current = nav.current();
    json!({
        "target": current.target,
        "address": current.target.display_text(),
        "view": nav.viewer().current(),
        "can_go_back": nav.can_go_back(),
        "can_go_forward": nav.can_go_forward(),
        "history_length": nav.history().len(),
        "reviews_visible": nav.panel().visible,
    })
}

fn panel_state(app: &App) -> Value {
    let panel = app.navigation.panel();
    match (&panel.page_key, &panel.data) {
        (Some(_), Some(data)) => review_json(data, now_ms()),
        (Some(key), None) => json!({"page": key, "loading": true}),
        (None, _) => json!({"page": null}),
    }
}

fn str_param<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params.get(name).and_then(|v| v.as_str())
}

fn u8_param(params: &Value, name: &str) -> Result<Option<u8>, String> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| format!("invalid {}", name)),
    }
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Navigation ───
        "nav.navigate" => {
            let input = str_param(params, "input").ok_or("missing input")?;
            app.navigation
                .run(NavCommand::Navigate(input.to_string()))
                .await
                .map_err(|e| e.to_string())?;
            Ok(nav_state(app))
        }
        "nav.back" => {
            app.navigation.run(NavCommand::Back).await.map_err(|e| e.to_string())?;
            Ok(nav_state(app))
        }
        "nav.forward" => {
            app.navigation.run(NavCommand::Forward).await.map_err(|e| e.to_string())?;
            Ok(nav_state(app))
        }
        "nav.refresh" => {
            app.navigation.run(NavCommand::Refresh).await.map_err(|e| e.to_string())?;
            Ok(nav_state(app))
        }
        "nav.home" => {
            app.navigation.run(NavCommand::Home).await.map_err(|e| e.to_string())?;
            Ok(nav_state(app))
        }
        "nav.state" => Ok(nav_state(app)),

        // ─── Reviews ───
        "reviews.get" => match str_param(params, "page") {
            Some(page) => {
                let key = PageKey::new(page);
                let data = app.navigation.reviews().load(&key).await;
                app.navigation.apply_reviews(&key, data.clone());
                Ok(review_json(&data, now_ms()))
            }
            None => Ok(panel_state(app)),
        },
        "reviews.rate" => {
            let stars = u8_param(params, "stars")?.ok_or("missing stars")?;
            let data = app
                .navigation
                .rate_current_page(stars)
                .map_err(|e| e.to_string())?;
            Ok(review_json(&data, now_ms()))
        }
        "reviews.comment" => {
            let text = str_param(params, "text").ok_or("missing text")?;
            let author = str_param(params, "author").unwrap_or("");
            let rating = u8_param(params, "rating")?;
            let data = app
                .navigation
                .comment_on_current_page(author, text, rating)
                .await
                .map_err(|e| e.to_string())?;
            Ok(review_json(&data, now_ms()))
        }
        "reviews.toggle" => Ok(json!({"visible": app.navigation.toggle_reviews()})),

        // ─── Search ───
        "search.query" => {
            let query = str_param(params, "query").ok_or("missing query")?;
            let engine = match str_param(params, "engine") {
                Some(name) => name.parse::<SearchEngine>()?,
                None => app.search.default_engine(),
            };
            match app.search.search(query, engine).await {
                Ok(results) => Ok(json!({"query": query, "engine": engine, "results": results})),
                Err(e) => {
                    log::warn!("Search for {:?} failed: {}", query, e);
                    Ok(json!({"query": query, "engine": engine, "results": [], "error": e.to_string()}))
                }
            }
        }

        // ─── Settings ───
        "settings.get" => {
            serde_json::to_value(app.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key").ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.settings_engine
                .set_value(key, value)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
