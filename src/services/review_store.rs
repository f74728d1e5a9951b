//! Review store for the shell.
//!
//! Owns the in-memory review record of every page seen this session and keeps
//! it in step with two sources: the remote review service (comments only) and
//! the local cache (the whole record, including the client-side rating
//! aggregate). Network failures never surface as errors here; reads fall back
//! to the cache and writes fall back to a local echo.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::services::review_cache::ReviewCache;
use crate::services::sync_client::{decode_comments, ReviewService};
use crate::types::errors::{ReviewError, SyncError};
use crate::types::navigation::PageKey;
use crate::types::review::{Comment, NewComment, WebsiteReviewData, ANONYMOUS_AUTHOR, MAX_STARS};

/// Review records keyed by page, backed by a remote service and a local cache.
pub struct ReviewStore {
    service: Arc<dyn ReviewService>,
    cache: Arc<dyn ReviewCache>,
    records: Mutex<HashMap<PageKey, WebsiteReviewData>>,
}

impl ReviewStore {
    pub fn new(service: Arc<dyn ReviewService>, cache: Arc<dyn ReviewCache>) -> Self {
        Self {
            service,
            cache,
            records: Mutex::new(HashMap::new()),
        }
    }

    fn now_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    /// Returns the in-memory record for `key`, if this session has one.
    pub fn snapshot(&self, key: &PageKey) -> Option<WebsiteReviewData> {
        self.records
            .lock()
            .ok()
            .and_then(|records| records.get(key).cloned())
    }

    /// Loads the reviews for `key`.
    ///
    /// On success the remote comment list replaces the local one while the
    /// locally maintained rating aggregate and user rating are kept. On any
    /// network failure the session's record is returned, else the last cached
    /// one, else an empty one.
    pub async fn load(&self, key: &PageKey) -> WebsiteReviewData {
        match self.service.fetch_comments(key).await {
            Ok(raw) => {
                let comments = decode_comments(raw, Self::now_ms());
                let mut record = self.base_record(key);
                record.comments = comments;
                self.commit(record)
            }
            Err(e) => {
                log::warn!("Falling back to local reviews for {}: {}", key, e);
                let record = self.base_record(key);
                self.replace_in_memory(record)
            }
        }
    }

    /// Records the user's star rating for `key`.
    ///
    /// Ratings never leave the client. A first rating adds one to the count;
    /// later ratings replace the user's earlier contribution.
    pub fn submit_rating(&self, key: &PageKey, stars: u8) -> Result<WebsiteReviewData, ReviewError> {
        if !(1..=MAX_STARS).contains(&stars) {
            return Err(ReviewError::InvalidRating(stars));
        }
        let mut record = self.base_record(key);
        record.apply_user_rating(stars);
        Ok(self.commit(record))
    }

    /// Posts a comment for `key`.
    ///
    /// After a successful write the whole comment list is reloaded from the
    /// service. If the service is unreachable the comment is echoed locally
    /// and cached; it is never re-sent.
    ///
    /// # Errors
    /// [`ReviewError::EmptyInput`] for blank text, [`ReviewError::InvalidRating`]
    /// for ratings above 5, [`ReviewError::Validation`] when the service
    /// rejects the payload. None of them change any state.
    pub async fn submit_comment(
        &self,
        key: &PageKey,
        author: &str,
        text: &str,
        rating: u8,
    ) -> Result<WebsiteReviewData, ReviewError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ReviewError::EmptyInput);
        }
        if rating > MAX_STARS {
            return Err(ReviewError::InvalidRating(rating));
        }
        let author = match author.trim() {
            "" => ANONYMOUS_AUTHOR,
            name => name,
        };

        let new_comment = NewComment {
            page_key: key.clone(),
            author: author.to_string(),
            text: text.to_string(),
            rating,
        };

        match self.service.post_comment(&new_comment).await {
            Ok(created) => {
                let record = match self.service.fetch_comments(key).await {
                    Ok(raw) => {
                        let mut record = self.base_record(key);
                        record.comments = decode_comments(raw, Self::now_ms());
                        record
                    }
                    Err(e) => {
                        log::warn!("Reload after posting to {} failed: {}", key, e);
                        let mut record = self.base_record(key);
                        if let Some(comment) = created.into_comment(Self::now_ms(), Self::local_id) {
                            record.comments.retain(|c| c.id != comment.id);
                            record.comments.insert(0, comment);
                        }
                        record
                    }
                };
                Ok(self.commit(record))
            }
            Err(SyncError::Validation(reason)) => Err(ReviewError::Validation(reason)),
            Err(SyncError::Network(reason)) => {
                log::warn!("Review service unreachable, echoing comment on {} locally: {}", key, reason);
                let now = Self::now_ms();
                let comment = Comment {
                    id: Self::local_id_at(now),
                    author: new_comment.author,
                    text: new_comment.text,
                    timestamp: now,
                    rating,
                };
                let mut record = self.base_record(key);
                record.comments.insert(0, comment);
                Ok(self.commit(record))
            }
        }
    }

    /// Current record for `key`: in-memory first, then the cache, then empty.
    fn base_record(&self, key: &PageKey) -> WebsiteReviewData {
        self.snapshot(key)
            .or_else(|| self.cached(key))
            .unwrap_or_else(|| WebsiteReviewData::empty(key.clone()))
    }

    fn cached(&self, key: &PageKey) -> Option<WebsiteReviewData> {
        match self.cache.get(key) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Review cache read for {} failed: {}", key, e);
                None
            }
        }
    }

    /// Replaces the in-memory record and overwrites the cached copy.
    fn commit(&self, record: WebsiteReviewData) -> WebsiteReviewData {
        if let Err(e) = self.cache.set(&record.page_key, &record) {
            log::warn!("Review cache write for {} failed: {}", record.page_key, e);
        }
        self.replace_in_memory(record)
    }

    fn replace_in_memory(&self, record: WebsiteReviewData) -> WebsiteReviewData {
        match self.records.lock() {
            Ok(mut records) => {
                records.insert(record.page_key.clone(), record.clone());
            }
            Err(_) => log::error!("Review record lock poisoned; {} not kept in memory", record.page_key),
        }
        record
    }

    fn local_id() -> String {
        Self::local_id_at(Self::now_ms())
    }

    fn local_id_at(now_ms: i64) -> String {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("local-{}-{}", now_ms, &suffix[..8])
    }
}
