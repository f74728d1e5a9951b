use thiserror::Error;

// === HistoryError ===

/// Errors from moving through the navigation history.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// The cursor is already at the oldest entry.
    #[error("Cannot go back: already at the oldest history entry")]
    NoBackEntry,
    /// The cursor is already at the newest entry.
    #[error("Cannot go forward: already at the newest history entry")]
    NoForwardEntry,
}

// === NavigationError ===

/// Errors surfaced by the address bar and navigation controller.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// The address bar input was blank.
    #[error("Navigation input is empty")]
    EmptyInput,
    /// A back/forward move was not possible.
    #[error(transparent)]
    History(#[from] HistoryError),
    /// A review action was requested while no page is open.
    #[error("No page is open for reviews")]
    NoActivePage,
    /// A review action on the active page failed.
    #[error(transparent)]
    Review(#[from] ReviewError),
}

// === ReviewError ===

/// Errors from rating or commenting on a page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    /// The comment text was blank after trimming.
    #[error("Comment text is empty")]
    EmptyInput,
    /// A star value outside the accepted range.
    #[error("Invalid rating: {0}")]
    InvalidRating(u8),
    /// The review service rejected the payload.
    #[error("Review rejected by server: {0}")]
    Validation(String),
}

// === SyncError ===

/// Errors from talking to the remote review service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Transport failure, timeout, non-2xx status or unreadable body.
    #[error("Review service network error: {0}")]
    Network(String),
    /// The service reported the submitted payload as invalid.
    #[error("Review service validation error: {0}")]
    Validation(String),
}

// === CacheError ===

/// Errors from the local review cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Database operation failed.
    #[error("Review cache database error: {0}")]
    Database(String),
    /// A record could not be serialized or a stored record could not be read back.
    #[error("Review cache serialization error: {0}")]
    Serialization(String),
    /// A previous holder of the cache lock panicked.
    #[error("Review cache lock poisoned")]
    Poisoned,
}

impl From<rusqlite::Error> for CacheError {
    fn from(e: rusqlite::Error) -> Self {
        CacheError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        CacheError::Serialization(e.to_string())
    }
}

// === SearchError ===

/// Errors from the external search service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Transport failure, timeout or non-2xx status.
    #[error("Search network error: {0}")]
    Network(String),
    /// The response body did not match the result contract.
    #[error("Search response invalid: {0}")]
    InvalidResponse(String),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
