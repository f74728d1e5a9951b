//! Remote review service client.
//!
//! The service stores raw comments only. Its payloads are loosely shaped
//! (different deployments use `_id`/`id`, `name`/`author`, `comment`/`text`),
//! so everything coming off the wire lands in [`RawComment`] first and is
//! turned into a strict [`Comment`] by [`RawComment::into_comment`].
//!
//! Exactly one attempt is made per call; the review store decides what to do
//! when it fails.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::types::errors::SyncError;
use crate::types::navigation::PageKey;
use crate::types::review::{Comment, NewComment, ANONYMOUS_AUTHOR, MAX_STARS};
use crate::types::settings::ReviewServiceSettings;

/// Operations the review store needs from the remote service.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Fetches every comment stored for `page_key`, newest first.
    async fn fetch_comments(&self, page_key: &PageKey) -> Result<Vec<RawComment>, SyncError>;
    /// Stores a new comment and returns the record the service created.
    async fn post_comment(&self, comment: &NewComment) -> Result<RawComment, SyncError>;
}

/// A comment as sent by the service, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawComment {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, rename = "_id")]
    pub object_id: Option<Value>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default)]
    pub timestamp: Option<Value>,
}

impl RawComment {
    /// Applies the documented defaults. Returns `None` when there is no
    /// usable text, since a comment without text is not a comment.
    ///
    /// `fallback_id` is used when the record carries no id of its own.
    pub fn into_comment(self, now_ms: i64, fallback_id: impl FnOnce() -> String) -> Option<Comment> {
        let text = first_non_blank([self.comment, self.text])?;
        let id = self
            .object_id
            .as_ref()
            .and_then(id_from_value)
            .or_else(|| self.id.as_ref().and_then(id_from_value))
            .unwrap_or_else(fallback_id);
        let author = first_non_blank([self.name, self.author])
            .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string());
        let rating = self.rating.as_ref().map(rating_from_value).unwrap_or(0);
        let timestamp = self
            .timestamp
            .as_ref()
            .and_then(timestamp_from_value)
            .unwrap_or(now_ms);

        Some(Comment {
            id,
            author,
            text,
            timestamp,
            rating,
        })
    }
}

/// Decodes a batch of wire comments, skipping blank ones.
pub fn decode_comments(raw: Vec<RawComment>, now_ms: i64) -> Vec<Comment> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(idx, record)| {
            let decoded = record.into_comment(now_ms, || format!("{}-{}", now_ms, idx));
            if decoded.is_none() {
                log::debug!("Skipping remote comment {} without text", idx);
            }
            decoded
        })
        .collect()
}

fn first_non_blank<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}

fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("$oid").and_then(id_from_value),
        _ => None,
    }
}

fn rating_from_value(value: &Value) -> u8 {
    let stars = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match stars {
        Some(s) if s.is_finite() => s.round().clamp(0.0, f64::from(MAX_STARS)) as u8,
        _ => 0,
    }
}

/// Epoch millis from a wire timestamp. Values outside the calendar range
/// count as missing.
fn timestamp_from_value(value: &Value) -> Option<i64> {
    let ms = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => parse_timestamp(s.trim()),
        Value::Object(map) => map.get("$date").and_then(timestamp_from_value),
        _ => None,
    }?;
    DateTime::<Utc>::from_timestamp_millis(ms).map(|_| ms)
}

fn parse_timestamp(s: &str) -> Option<i64> {
    if let Ok(ms) = s.parse::<i64>() {
        return Some(ms);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Accepted shapes of a comment list response.
#[derive(Deserialize)]
#[serde(untagged)]
enum CommentListEnvelope {
    Comments {
        comments: Vec<RawComment>,
        #[serde(default)]
        success: Option<bool>,
    },
    Data {
        data: Vec<RawComment>,
        #[serde(default)]
        success: Option<bool>,
    },
    Bare(Vec<RawComment>),
}

impl CommentListEnvelope {
    fn into_comments(self) -> Result<Vec<RawComment>, SyncError> {
        let (comments, success) = match self {
            CommentListEnvelope::Comments { comments, success } => (comments, success),
            CommentListEnvelope::Data { data, success } => (data, success),
            CommentListEnvelope::Bare(comments) => (comments, None),
        };
        if success == Some(false) {
            return Err(SyncError::Network("service reported failure".to_string()));
        }
        Ok(comments)
    }
}

/// Accepted shapes of a created-comment response.
#[derive(Deserialize)]
#[serde(untagged)]
enum CreatedEnvelope {
    Data { data: RawComment },
    Comment { comment: RawComment },
    Bare(RawComment),
}

impl CreatedEnvelope {
    fn into_comment(self) -> RawComment {
        match self {
            CreatedEnvelope::Data { data } => data,
            CreatedEnvelope::Comment { comment } => comment,
            CreatedEnvelope::Bare(raw) => raw,
        }
    }
}

/// Parses a comment list response body.
pub fn parse_comment_list(body: &str) -> Result<Vec<RawComment>, SyncError> {
    let envelope: CommentListEnvelope = serde_json::from_str(body)
        .map_err(|e| SyncError::Network(format!("malformed comment list: {}", e)))?;
    envelope.into_comments()
}

/// Parses a created-comment response body.
pub fn parse_created_comment(body: &str) -> Result<RawComment, SyncError> {
    let envelope: CreatedEnvelope = serde_json::from_str(body)
        .map_err(|e| SyncError::Network(format!("malformed comment response: {}", e)))?;
    Ok(envelope.into_comment())
}

/// Pulls a human-readable reason out of an error response body.
fn rejection_reason(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["error", "message"]
                .iter()
                .find_map(|k| v.get(*k).and_then(|m| m.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| format!("HTTP {}", status))
}

/// [`ReviewService`] over HTTP.
pub struct HttpReviewClient {
    client: reqwest::Client,
    settings: ReviewServiceSettings,
}

impl HttpReviewClient {
    pub fn new(settings: ReviewServiceSettings) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| SyncError::Network(e.to_string()))?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self, path: &str) -> Result<url::Url, SyncError> {
        let base = url::Url::parse(&self.settings.base_url)
            .map_err(|e| SyncError::Network(format!("invalid base url: {}", e)))?;
        base.join(path)
            .map_err(|e| SyncError::Network(format!("invalid endpoint {}: {}", path, e)))
    }
}

#[async_trait]
impl ReviewService for HttpReviewClient {
    async fn fetch_comments(&self, page_key: &PageKey) -> Result<Vec<RawComment>, SyncError> {
        let mut url = self.endpoint(&self.settings.fetch_path)?;
        url.query_pairs_mut().append_pair("url", page_key.as_str());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(SyncError::Network(rejection_reason(status, &body)));
        }
        parse_comment_list(&body)
    }

    async fn post_comment(&self, comment: &NewComment) -> Result<RawComment, SyncError> {
        let url = self.endpoint(&self.settings.post_path)?;

        let response = self
            .client
            .post(url)
            .json(comment)
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        if status.is_client_error() {
            return Err(SyncError::Validation(rejection_reason(status, &body)));
        }
        if !status.is_success() {
            return Err(SyncError::Network(rejection_reason(status, &body)));
        }
        parse_created_comment(&body)
    }
}
