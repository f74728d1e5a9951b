//! Local review cache.
//!
//! Key-value store addressed by page key. Every write replaces the whole
//! record, so a reader never sees a half-updated one.

use std::collections::HashMap;
use std::sync::Mutex;

use rusqlite::{params, OptionalExtension};

use crate::database::connection::Database;
use crate::types::errors::CacheError;
use crate::types::navigation::PageKey;
use crate::types::review::WebsiteReviewData;

/// Persistence port used by the review store.
pub trait ReviewCache: Send + Sync {
    fn get(&self, key: &PageKey) -> Result<Option<WebsiteReviewData>, CacheError>;
    fn set(&self, key: &PageKey, record: &WebsiteReviewData) -> Result<(), CacheError>;
}

/// Review cache backed by the `review_cache` SQLite table.
pub struct SqliteReviewCache {
    db: Mutex<Database>,
}

impl SqliteReviewCache {
    pub fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    /// Number of cached pages.
    pub fn len(&self) -> Result<usize, CacheError> {
        let db = self.db.lock().map_err(|_| CacheError::Poisoned)?;
        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM review_cache", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool, CacheError> {
        Ok(self.len()? == 0)
    }
}

impl ReviewCache for SqliteReviewCache {
    fn get(&self, key: &PageKey) -> Result<Option<WebsiteReviewData>, CacheError> {
        let db = self.db.lock().map_err(|_| CacheError::Poisoned)?;
        let payload: Option<String> = db
            .connection()
            .query_row(
                "SELECT payload FROM review_cache WHERE page_key = ?1",
                params![key.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &PageKey, record: &WebsiteReviewData) -> Result<(), CacheError> {
        let payload = serde_json::to_string(record)?;
        let now = chrono::Utc::now().timestamp_millis();
        let db = self.db.lock().map_err(|_| CacheError::Poisoned)?;
        db.connection().execute(
            "INSERT OR REPLACE INTO review_cache (page_key, payload, updated_at) VALUES (?1, ?2, ?3)",
            params![key.as_str(), payload, now],
        )?;
        Ok(())
    }
}

/// Review cache that lives only as long as the process.
///
/// Records are stored serialized, exactly as the SQLite cache stores them.
#[derive(Default)]
pub struct MemoryReviewCache {
    entries: Mutex<HashMap<PageKey, String>>,
}

impl MemoryReviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReviewCache for MemoryReviewCache {
    fn get(&self, key: &PageKey) -> Result<Option<WebsiteReviewData>, CacheError> {
        let entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        match entries.get(key) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &PageKey, record: &WebsiteReviewData) -> Result<(), CacheError> {
        let payload = serde_json::to_string(record)?;
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        entries.insert(key.clone(), payload);
        Ok(())
    }
}
