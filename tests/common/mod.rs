//! In-process stand-in for the remote review service.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use sitelens::services::sync_client::{RawComment, ReviewService};
use sitelens::types::errors::SyncError;
use sitelens::types::navigation::PageKey;
use sitelens::types::review::NewComment;

/// Fake review service with an in-memory comment table.
///
/// Assigns ids `srv-1`, `srv-2`, ... and returns comments newest first,
/// like the real service.
#[derive(Default)]
pub struct FakeReviewService {
    comments: Mutex<HashMap<String, Vec<RawComment>>>,
    next_id: AtomicUsize,
    fetch_offline: AtomicBool,
    post_offline: AtomicBool,
    rejection: Mutex<Option<String>>,
    pub fetch_calls: AtomicUsize,
    pub post_calls: AtomicUsize,
}

impl FakeReviewService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes both reads and writes fail with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.fetch_offline.store(offline, Ordering::SeqCst);
        self.post_offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_fetch_offline(&self, offline: bool) {
        self.fetch_offline.store(offline, Ordering::SeqCst);
    }

    /// Makes every post fail with a validation error carrying `reason`.
    pub fn reject_posts(&self, reason: &str) {
        *self.rejection.lock().unwrap() = Some(reason.to_string());
    }

    /// Seeds a comment as if another user had posted it.
    pub fn seed(&self, page: &str, author: &str, text: &str, rating: u8) -> String {
        let id = format!("srv-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let raw: RawComment = serde_json::from_value(json!({
            "_id": id,
            "name": author,
            "comment": text,
            "rating": rating,
            "timestamp": 1_700_000_000_000i64,
        }))
        .unwrap();
        self.comments
            .lock()
            .unwrap()
            .entry(page.to_string())
            .or_default()
            .insert(0, raw);
        id
    }

    pub fn stored_count(&self, page: &str) -> usize {
        self.comments
            .lock()
            .unwrap()
            .get(page)
            .map(|c| c.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl ReviewService for FakeReviewService {
    async fn fetch_comments(&self, page_key: &PageKey) -> Result<Vec<RawComment>, SyncError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fetch_offline.load(Ordering::SeqCst) {
            return Err(SyncError::Network("connection refused".to_string()));
        }
        Ok(self
            .comments
            .lock()
            .unwrap()
            .get(page_key.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn post_comment(&self, comment: &NewComment) -> Result<RawComment, SyncError> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
        if self.post_offline.load(Ordering::SeqCst) {
            return Err(SyncError::Network("connection refused".to_string()));
        }
        if let Some(reason) = self.rejection.lock().unwrap().clone() {
            return Err(SyncError::Validation(reason));
        }
        let id = self.seed(
            comment.page_key.as_str(),
            &comment.author,
            &comment.text,
            comment.rating,
        );
        let created = self.comments.lock().unwrap()[comment.page_key.as_str()][0].clone();
        assert_eq!(created.object_id, Some(json!(id)));
        Ok(created)
    }
}
